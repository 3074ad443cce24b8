use bevy::prelude::*;

use crate::player::RiderSettings;
use crate::terrain::types::{TerrainOutline, TerrainState};

#[derive(Component)]
pub struct HudText;

pub fn setup_hud(mut commands: Commands) {
    commands.spawn((
        Text::new(""),
        TextFont {
            font_size: 16.0,
            ..default()
        },
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(8.0),
            left: Val::Px(8.0),
            ..default()
        },
        HudText,
    ));
}

pub fn update_hud(
    rider: Res<RiderSettings>,
    state: Option<Res<TerrainState>>,
    mut text_q: Query<&mut Text, With<HudText>>,
) {
    let Ok(mut text) = text_q.single_mut() else {
        return;
    };
    let Some(state) = state else {
        text.0 = "terrain disabled, see log".to_string();
        return;
    };
    let controller = &state.controller;
    text.0 = format!(
        "seed {}  speed {:.1}  keys {}  obstacles {}  decorations {}\nA/D speed, Tab outline",
        controller.rng().seed(),
        rider.speed,
        controller.keys().len(),
        controller.obstacles().len(),
        controller.decorations().len(),
    );
}

pub fn toggle_outline(keyboard_input: Res<ButtonInput<KeyCode>>, mut outline: ResMut<TerrainOutline>) {
    if keyboard_input.just_pressed(KeyCode::Tab) {
        outline.visible = !outline.visible;
    }
}
