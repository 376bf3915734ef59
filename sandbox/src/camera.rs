use std::f32::consts::FRAC_PI_2;

use bevy::{
    prelude::*,
    window::{CursorGrabMode, CursorOptions, PrimaryWindow},
};
use leafwing_input_manager::prelude::ActionState;

use crate::{
    convert::{quat, vec3},
    input::PlayerAction,
    interaction::KeypadPanel,
    player::{Player, PlayerController},
};

const LOOK_SENSITIVITY: f32 = 0.002;
const MAX_PITCH: f32 = FRAC_PI_2 - 0.05;

#[derive(Component)]
pub struct PlayerCamera;

/// Accumulated mouse look (radians).
#[derive(Resource, Default, Debug)]
struct LookAngles {
    yaw: f32,
    pitch: f32,
}

pub(super) fn plugin(app: &mut App) {
    app.init_resource::<LookAngles>();
    app.add_systems(Startup, (add_camera, grab_cursor));
    app.add_systems(Update, apply_look);
    app.add_systems(PostUpdate, follow_player);
}

fn add_camera(mut commands: Commands) {
    commands.spawn((
        Name::new("PlayerCamera"),
        PlayerCamera,
        Camera3d::default(),
        Projection::from(PerspectiveProjection {
            fov: 75.0_f32.to_radians(),
            ..default()
        }),
        Transform::default(),
    ));
}

fn grab_cursor(mut cursor: Single<&mut CursorOptions, With<PrimaryWindow>>) {
    cursor.grab_mode = CursorGrabMode::Locked;
    cursor.visible = false;
}

/// Mouse look writes the camera rig rotation and the body's yaw.
fn apply_look(
    actions: Res<ActionState<PlayerAction>>,
    panel: Res<KeypadPanel>,
    mut angles: ResMut<LookAngles>,
    mut players: Query<&mut PlayerController, With<Player>>,
) {
    if !panel.keypad.is_visible() {
        let delta = actions.axis_pair(&PlayerAction::Look) * LOOK_SENSITIVITY;
        angles.yaw -= delta.x;
        angles.pitch = (angles.pitch - delta.y).clamp(-MAX_PITCH, MAX_PITCH);
    }

    for mut player in players.iter_mut() {
        let controller = &mut player.controller;
        controller.camera_mut().set_look(angles.yaw, angles.pitch);
        controller.body_mut().set_rotation(locomotion::Quat::from_axis_angle(
            &locomotion::Vec3::y_axis(),
            angles.yaw,
        ));
    }
}

fn follow_player(
    mut camera: Single<&mut Transform, With<PlayerCamera>>,
    player: Single<&PlayerController, (With<Player>, Without<PlayerCamera>)>,
) {
    let controller = &player.controller;
    let rig = controller.camera();

    camera.translation = vec3(controller.body().position() + rig.local_offset);
    camera.rotation = quat(rig.rotation);
}
