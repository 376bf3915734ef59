//! nalgebra (locomotion) <-> glam (Bevy) conversions.

use bevy::math::{Quat, Vec2, Vec3};

#[inline]
pub fn vec3(v: locomotion::Vec3) -> Vec3 {
    Vec3::new(v.x, v.y, v.z)
}

#[inline]
pub fn to_na_vec3(v: Vec3) -> locomotion::Vec3 {
    locomotion::Vec3::new(v.x, v.y, v.z)
}

#[inline]
pub fn to_na_vec2(v: Vec2) -> locomotion::Vec2 {
    locomotion::Vec2::new(v.x, v.y)
}

#[inline]
pub fn quat(q: locomotion::Quat) -> Quat {
    Quat::from_xyzw(q.i, q.j, q.k, q.w)
}
