use bevy::prelude::*;

use crate::terrain::TerrainState;

pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<RiderSettings>()
            .add_systems(Startup, setup_player)
            .add_systems(Update, (rider_speed, rider_move, follow_camera).chain());
    }
}

#[derive(Resource)]
pub struct RiderSettings {
    pub speed: f32,
    pub min_speed: f32,
    pub max_speed: f32,
    pub acceleration: f32,
}

impl Default for RiderSettings {
    fn default() -> Self {
        Self {
            speed: 8.0,
            min_speed: 0.0,
            max_speed: 40.0,
            acceleration: 15.0,
        }
    }
}

/// Marker component for the rider travelling along the terrain
#[derive(Component)]
pub struct Rider;

/// Keeps the camera at a fixed offset from its subject and at a fixed depth.
#[derive(Component)]
pub struct FollowCamera {
    pub x_add: f32,
    pub y_add: f32,
    pub z_pos: f32,
}

const RIDER_SIZE: f32 = 1.0;

fn setup_player(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands.spawn((
        Rider,
        Mesh3d(meshes.add(Cuboid::new(RIDER_SIZE * 1.6, RIDER_SIZE, RIDER_SIZE))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb(0.85, 0.28, 0.17),
            perceptual_roughness: 0.6,
            ..default()
        })),
        Transform::from_xyz(0.0, 0.0, 0.0),
        Name::new("Rider"),
    ));

    let follow = FollowCamera {
        x_add: 8.0,
        y_add: 4.0,
        z_pos: 40.0,
    };
    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: 50.0_f32.to_radians(),
            ..default()
        }),
        // Looks down -Z by default
        Transform::from_xyz(follow.x_add, follow.y_add, follow.z_pos),
        follow,
    ));
}

fn rider_speed(
    mut settings: ResMut<RiderSettings>,
    time: Res<Time>,
    keyboard_input: Res<ButtonInput<KeyCode>>,
) {
    let mut change = 0.0;
    if keyboard_input.pressed(KeyCode::KeyA) {
        change -= settings.acceleration;
    }
    if keyboard_input.pressed(KeyCode::KeyD) {
        change += settings.acceleration;
    }
    if change != 0.0 {
        settings.speed =
            (settings.speed + change * time.delta_secs()).clamp(settings.min_speed, settings.max_speed);
    }
}

fn rider_move(
    settings: Res<RiderSettings>,
    time: Res<Time>,
    terrain: Option<Res<TerrainState>>,
    mut query: Query<&mut Transform, With<Rider>>,
) {
    let Ok(mut transform) = query.single_mut() else {
        return;
    };

    transform.translation.x += settings.speed * time.delta_secs();

    let Some(terrain) = terrain else {
        return;
    };
    if let Some(y) = terrain.controller.surface_height(transform.translation.x as f64) {
        transform.translation.y = y as f32 + RIDER_SIZE / 2.0;
    }
    transform.translation.z = terrain.rider_z;
}

pub fn follow_camera(
    rider_q: Query<&Transform, (With<Rider>, Without<FollowCamera>)>,
    mut camera_q: Query<(&mut Transform, &FollowCamera)>,
) {
    let Ok(subject) = rider_q.single() else {
        return;
    };
    for (mut transform, follow) in &mut camera_q {
        transform.translation = Vec3::new(
            subject.translation.x + follow.x_add,
            subject.translation.y + follow.y_add,
            follow.z_pos,
        );
    }
}
