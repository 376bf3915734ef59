use bevy::prelude::*;
use locomotion::collision::{ColliderShapeDef, RapierPhysicsWorld, WorldStaticDef};

use crate::convert::to_na_vec3;

pub const FLOOR_ID: u32 = 1;
pub const TERMINAL_ID: u32 = 10;
pub const DOOR_ID: u32 = 20;

/// Collision world for the controller, mirrored from the level blocks.
#[derive(Resource, Default)]
pub struct LevelPhysics(pub RapierPhysicsWorld);

/// Current static definitions; the physics world is rebuilt from these on change.
#[derive(Resource, Default)]
pub struct LevelStatics(pub Vec<WorldStaticDef>);

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelStatic(pub u32);

struct Block {
    id: u32,
    center: Vec3,
    half_extents: Vec3,
    color: Color,
}

pub(super) fn plugin(app: &mut App) {
    app.init_resource::<LevelPhysics>();
    app.init_resource::<LevelStatics>();
    app.add_systems(Startup, spawn_level);
}

fn blocks() -> Vec<Block> {
    let stone = Color::srgb(0.55, 0.55, 0.6);
    let crate_color = Color::srgb_u8(124, 144, 255);
    vec![
        // Jumpable steps.
        Block {
            id: 2,
            center: Vec3::new(4.0, 0.5, -3.0),
            half_extents: Vec3::new(1.0, 0.5, 1.0),
            color: crate_color,
        },
        Block {
            id: 3,
            center: Vec3::new(6.0, 1.0, -5.0),
            half_extents: Vec3::new(1.0, 1.0, 1.0),
            color: crate_color,
        },
        // Crawl tunnel: 1.4 m of headroom.
        Block {
            id: 4,
            center: Vec3::new(-5.0, 1.6, -8.0),
            half_extents: Vec3::new(1.5, 0.2, 3.0),
            color: stone,
        },
        Block {
            id: 5,
            center: Vec3::new(-6.75, 0.7, -8.0),
            half_extents: Vec3::new(0.25, 0.7, 3.0),
            color: stone,
        },
        Block {
            id: 6,
            center: Vec3::new(-3.25, 0.7, -8.0),
            half_extents: Vec3::new(0.25, 0.7, 3.0),
            color: stone,
        },
        // Back wall with a locked door.
        Block {
            id: 11,
            center: Vec3::new(-4.0, 2.0, -13.0),
            half_extents: Vec3::new(6.0, 2.0, 0.25),
            color: stone,
        },
        Block {
            id: 12,
            center: Vec3::new(7.0, 2.0, -13.0),
            half_extents: Vec3::new(3.0, 2.0, 0.25),
            color: stone,
        },
        Block {
            id: 13,
            center: Vec3::new(3.0, 3.5, -13.0),
            half_extents: Vec3::new(1.0, 0.5, 0.25),
            color: stone,
        },
        Block {
            id: DOOR_ID,
            center: Vec3::new(3.0, 1.5, -13.0),
            half_extents: Vec3::new(1.0, 1.5, 0.2),
            color: Color::srgb(0.45, 0.3, 0.2),
        },
        Block {
            id: TERMINAL_ID,
            center: Vec3::new(0.5, 1.3, -12.65),
            half_extents: Vec3::new(0.3, 0.4, 0.1),
            color: Color::srgb(0.15, 0.8, 0.4),
        },
    ]
}

fn spawn_level(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut physics: ResMut<LevelPhysics>,
    mut statics: ResMut<LevelStatics>,
) {
    let mut defs = vec![WorldStaticDef::new(
        FLOOR_ID,
        to_na_vec3(Vec3::ZERO),
        ColliderShapeDef::Plane {
            offset_along_normal: 0.0,
        },
    )];

    commands.spawn((
        Name::new("Floor"),
        LevelStatic(FLOOR_ID),
        Transform::from_xyz(0., 0., 0.),
        Mesh3d(meshes.add(Plane3d::default().mesh().size(60., 60.).build())),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::linear_rgb(0.2, 0.3, 0.25),
            perceptual_roughness: 1.0,
            metallic: 0.0,
            ..default()
        })),
    ));

    for block in blocks() {
        commands.spawn((
            LevelStatic(block.id),
            Mesh3d(meshes.add(Cuboid::from_size(block.half_extents * 2.0))),
            MeshMaterial3d(materials.add(block.color)),
            Transform::from_translation(block.center),
        ));
        defs.push(WorldStaticDef::new(
            block.id,
            to_na_vec3(block.center),
            ColliderShapeDef::Cuboid {
                half_extents: to_na_vec3(block.half_extents),
            },
        ));
    }

    commands.spawn((
        DirectionalLight {
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(4.0, 10.0, 6.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    physics.0.load(defs.clone());
    statics.0 = defs;
    info!("level loaded with {} static colliders", statics.0.len());
}

/// Drop a static from both the scene and the collision world.
pub fn remove_static(
    commands: &mut Commands,
    id: u32,
    entities: &Query<(Entity, &LevelStatic)>,
    statics: &mut LevelStatics,
    physics: &mut LevelPhysics,
) {
    statics.0.retain(|def| def.id != id);
    physics.0.load(statics.0.clone());

    for (entity, level_static) in entities.iter() {
        if level_static.0 == id {
            commands.entity(entity).despawn();
        }
    }
}
