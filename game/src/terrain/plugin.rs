use bevy::prelude::*;

use crate::player::follow_camera;
use crate::terrain::{
    systems::{draw_outline, load_settings, scroll_terrain, setup_spawn_assets, start_track},
    types::{TerrainOutline, TerrainSettings},
    ui::{setup_hud, toggle_outline, update_hud},
};

pub struct TerrainPlugin;

impl Plugin for TerrainPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(TerrainSettings(load_settings()))
            .init_resource::<TerrainOutline>()
            .add_systems(Startup, (setup_spawn_assets, setup_hud))
            // The follow camera is spawned during Startup.
            .add_systems(PostStartup, start_track)
            .add_systems(
                Update,
                (
                    scroll_terrain.after(follow_camera),
                    draw_outline.after(scroll_terrain),
                    toggle_outline,
                    update_hud,
                ),
            );
    }
}
