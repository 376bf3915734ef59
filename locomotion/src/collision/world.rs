use super::types::{CharacterBody, CollisionFlags, Footprint, Vec3};

/// The physical world the controller queries and moves its body through.
///
/// Queries return `None` when the world cannot answer (e.g. geometry not loaded yet).
/// Callers map that to the conservative outcome: "not grounded" and "obstructed".
pub trait PhysicsWorld {
    /// Does a walkable surface support the body at `footprint`?
    fn is_supported(&self, footprint: Footprint) -> Option<bool>;

    /// Would a sphere of `radius` swept from `origin` up to `apex` hit anything?
    fn is_obstructed_above(&self, origin: Vec3, apex: Vec3, radius: f32) -> Option<bool>;

    /// Move `body` by `displacement`, resolving collisions, and report which sides touched.
    fn move_body(&mut self, body: &mut CharacterBody, displacement: Vec3) -> CollisionFlags;
}

/// Ray query used by the interaction detector.
pub trait LineOfSight {
    /// Identifier of whatever the ray hits.
    type Key: Copy + Eq;

    /// First hit along `direction` (unit) from `origin` within `max_distance`.
    fn first_hit(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<(Self::Key, f32)>;
}
