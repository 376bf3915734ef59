/*!
Collision-facing data types shared by the controller and the physical world.

This module intentionally contains no algorithms. Conventions:
- Right-handed, +Y up, view forward is -Z (matches Bevy and glTF).
- A body's origin is its feet; the capsule center sits `height / 2` above it.
*/

use nalgebra as na;

use crate::{bitmask_flags::BitmaskFlags, define_bitmask_flags};

/// Common math aliases for clarity and consistency.
pub type Vec2 = na::Vector2<f32>;
pub type Vec3 = na::Vector3<f32>;
pub type Quat = na::UnitQuaternion<f32>;

define_bitmask_flags!(CollisionFlag, u8, {
    Above,
    Below,
    Sides,
});

/// Which sides of the body touched geometry during a `move_body` call.
pub type CollisionFlags = BitmaskFlags<u8>;

/// World-space contact patch used for ground support queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Footprint {
    /// Lowest point of the body (center of the bottom cap's contact point).
    pub base: Vec3,
    pub radius: f32,
}

/// The collision-aware capsule the controller drives.
///
/// The controller only *requests* changes here: translation goes through
/// [`crate::PhysicsWorld::move_body`], and height changes through [`CharacterBody::resize`].
/// Hosts own the body's placement and may teleport it with [`CharacterBody::set_position`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CharacterBody {
    position: Vec3,
    rotation: Quat,
    height: f32,
    center: Vec3,
    radius: f32,
}

impl CharacterBody {
    pub fn new(position: Vec3, height: f32, radius: f32) -> Self {
        Self {
            position,
            rotation: Quat::identity(),
            height,
            center: Vec3::new(0.0, height * 0.5, 0.0),
            radius,
        }
    }

    #[inline]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    #[inline]
    pub fn rotation(&self) -> Quat {
        self.rotation
    }

    /// Full capsule height including both caps.
    #[inline]
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Capsule center relative to the body origin.
    #[inline]
    pub fn center(&self) -> Vec3 {
        self.center
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Capsule center in world space.
    #[inline]
    pub fn world_center(&self) -> Vec3 {
        self.position + self.center
    }

    /// Half-length of the capsule's cylindrical section (the shape Rapier and parry expect).
    #[inline]
    pub fn capsule_half_height(&self) -> f32 {
        (self.height * 0.5 - self.radius).max(0.0)
    }

    pub fn footprint(&self) -> Footprint {
        Footprint {
            base: self.world_center() - Vec3::new(0.0, self.height * 0.5, 0.0),
            radius: self.radius,
        }
    }

    /// Apply a resolved displacement. Called by physical worlds after collision.
    #[inline]
    pub fn translate(&mut self, delta: Vec3) {
        self.position += delta;
    }

    #[inline]
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    #[inline]
    pub fn set_rotation(&mut self, rotation: Quat) {
        self.rotation = rotation;
    }

    /// Change the capsule height, keeping the feet planted at the body origin.
    pub fn resize(&mut self, height: f32) {
        self.height = height;
        self.center = Vec3::new(0.0, height * 0.5, 0.0);
    }
}
