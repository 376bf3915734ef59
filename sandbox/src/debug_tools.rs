//! Diagnostics for native dev builds.
//!
//! Compiled only behind `dev_native` (`#[cfg(feature = "dev_native")] mod debug_tools;` in
//! `main.rs`).

use bevy::diagnostic::{FrameTimeDiagnosticsPlugin, LogDiagnosticsPlugin};
use bevy::prelude::*;
use locomotion::collision::CollisionFlag;

use crate::player::{Player, PlayerController};

pub(super) fn plugin(app: &mut App) {
    app.add_plugins((
        FrameTimeDiagnosticsPlugin::default(),
        LogDiagnosticsPlugin::default(),
    ));

    app.add_systems(PostUpdate, draw_body_gizmo);
}

/// Outline the collision capsule, tinted by the last tick's contacts.
fn draw_body_gizmo(mut gizmos: Gizmos, player: Single<&PlayerController, With<Player>>) {
    let controller = &player.controller;
    let body = controller.body();
    let center = crate::convert::vec3(body.world_center());

    let color = if player
        .last_report
        .is_some_and(|report| report.collisions.has(CollisionFlag::Above))
    {
        Color::srgb(0.9, 0.2, 0.2)
    } else if controller.is_grounded() {
        Color::srgb(0.2, 0.9, 0.4)
    } else {
        Color::srgb(0.9, 0.8, 0.2)
    };

    gizmos.primitive_3d(
        &Capsule3d::new(body.radius(), body.capsule_half_height() * 2.0),
        Isometry3d::from_translation(center),
        color,
    );
}
