/*!
Collision root module.

Everything the controller knows about the physical world goes through the
[`PhysicsWorld`] trait. The code is split for clarity:

- types:        shared data types (CharacterBody, Footprint, CollisionFlags, math aliases)
- settings:     tolerance constants for the Rapier world
- world:        the `PhysicsWorld` and `LineOfSight` traits
- rapier_world: rapier3d-backed implementation (scene queries + kinematic character controller)
*/

pub mod rapier_world;
pub mod settings;
pub mod types;
pub mod world;

pub use rapier_world::{ColliderShapeDef, RapierPhysicsWorld, RapierQueryWorld, WorldStaticDef};
pub use types::{CharacterBody, CollisionFlag, CollisionFlags, Footprint, Quat, Vec2, Vec3};
pub use world::{LineOfSight, PhysicsWorld};
