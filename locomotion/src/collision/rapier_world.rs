//! Rapier-backed [`PhysicsWorld`] for immutable level geometry.
//!
//! Design goals
//! - Deterministic: given the same inputs (sorted by `id`), build identical in-memory sets.
//! - Query-focused: ground probes, clearance sweeps and the Rapier
//!   `KinematicCharacterController` all run against one borrowed `QueryPipeline`.
//! - Immutable world: statics do not move after construction. Rebuild to change the level.

use std::collections::HashMap;

use rapier3d::control::{CharacterAutostep, CharacterLength, KinematicCharacterController};
use rapier3d::na::{Isometry3, Point3, Translation3, UnitQuaternion, Vector3};
use rapier3d::parry::query::ShapeCastOptions;
use rapier3d::parry::shape::{Ball, Capsule};
use rapier3d::prelude::*;

use super::{
    settings::{
        DEFAULT_SKIN, DEFAULT_STEP_SECONDS, DIST_EPS, GROUND_PROBE_DISTANCE, GROUND_PROBE_LIFT,
        MIN_GROUND_NORMAL_Y,
    },
    types::{CharacterBody, CollisionFlag, CollisionFlags, Footprint, Vec3},
    world::{LineOfSight, PhysicsWorld},
};

/// Canonical definition of an immutable level collider.
///
/// Conventions
/// - Units are meters.
/// - Planes are infinite half-spaces whose outward normal is `rotation * +Y`.
#[derive(Clone, Debug)]
pub struct WorldStaticDef {
    /// Stable unique identifier; also the key reported by line-of-sight queries.
    pub id: u32,
    pub translation: Vector3<f32>,
    pub rotation: UnitQuaternion<f32>,
    pub shape: ColliderShapeDef,
}

impl WorldStaticDef {
    pub fn new(id: u32, translation: Vector3<f32>, shape: ColliderShapeDef) -> Self {
        Self {
            id,
            translation,
            rotation: UnitQuaternion::identity(),
            shape,
        }
    }
}

#[derive(Clone, Debug)]
pub enum ColliderShapeDef {
    /// Infinite plane, offset along its normal (meters).
    Plane { offset_along_normal: f32 },

    /// Oriented cuboid with given half-extents (meters).
    Cuboid { half_extents: Vector3<f32> },

    Sphere { radius: f32 },

    /// Y-aligned capsule (meters).
    CapsuleY { radius: f32, half_height: f32 },
}

/// In-memory Rapier sets plus the broad/narrow phases needed to borrow a `QueryPipeline`.
pub struct RapierQueryWorld {
    pub bodies: RigidBodySet,
    pub colliders: ColliderSet,
    pub broad_phase: BroadPhaseBvh,
    pub narrow_phase: NarrowPhase,
    ids: HashMap<ColliderHandle, u32>,
}

impl RapierQueryWorld {
    /// Build a query world from a list of static collider definitions.
    ///
    /// The input is sorted by `id` before insertion; NaN/invalid values should be filtered
    /// by the caller.
    pub fn build(mut defs: Vec<WorldStaticDef>) -> Self {
        defs.sort_by_key(|d| d.id);

        let mut bodies = RigidBodySet::new();
        let mut colliders = ColliderSet::new();
        let mut ids = HashMap::with_capacity(defs.len());

        for def in defs.into_iter() {
            let iso = Isometry3::from_parts(Translation3::from(def.translation), def.rotation);

            let rb = RigidBodyBuilder::fixed().pose(iso).build();
            let rb_handle = bodies.insert(rb);

            let handle = colliders.insert_with_parent(collider_from_def(&def), rb_handle, &mut bodies);
            ids.insert(handle, def.id);
        }

        // Collision-detection only (no dynamics): updates the broad-phase BVH and the
        // narrow-phase contact graph so scene queries can run.
        let mut broad_phase = BroadPhaseBvh::new();
        let mut narrow_phase = NarrowPhase::new();
        let mut collision_pipeline = CollisionPipeline::new();

        let hooks = ();
        let events = ();

        collision_pipeline.step(
            0.0,
            &mut broad_phase,
            &mut narrow_phase,
            &mut bodies,
            &mut colliders,
            &hooks,
            &events,
        );

        Self {
            bodies,
            colliders,
            broad_phase,
            narrow_phase,
            ids,
        }
    }

    /// Borrowed `QueryPipeline` view for scene queries and the KCC.
    pub fn query_pipeline<'a>(&'a self, filter: QueryFilter<'a>) -> QueryPipeline<'a> {
        self.broad_phase.as_query_pipeline(
            self.narrow_phase.query_dispatcher(),
            &self.bodies,
            &self.colliders,
            filter,
        )
    }

    /// The [`WorldStaticDef::id`] a collider was built from.
    pub fn static_id(&self, handle: ColliderHandle) -> Option<u32> {
        self.ids.get(&handle).copied()
    }
}

/// Build a collider with identity local transform; the pose lives on the parent body.
fn collider_from_def(def: &WorldStaticDef) -> Collider {
    match &def.shape {
        ColliderShapeDef::Plane {
            offset_along_normal,
        } => ColliderBuilder::halfspace(Vector::y_axis())
            .translation(Vector3::new(0.0, *offset_along_normal, 0.0))
            .build(),

        ColliderShapeDef::Cuboid { half_extents } => {
            ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z).build()
        }

        ColliderShapeDef::Sphere { radius } => ColliderBuilder::ball(*radius).build(),

        ColliderShapeDef::CapsuleY {
            radius,
            half_height,
        } => ColliderBuilder::capsule_y(*half_height, *radius).build(),
    }
}

/// Character-controller tuning used when none is supplied.
pub fn default_character_controller() -> KinematicCharacterController {
    KinematicCharacterController {
        autostep: Some(CharacterAutostep {
            include_dynamic_bodies: false,
            max_height: CharacterLength::Absolute(0.3),
            ..CharacterAutostep::default()
        }),
        offset: CharacterLength::Absolute(DEFAULT_SKIN),
        // Grounding is owned by the controller's settle velocity, not by Rapier's snap.
        snap_to_ground: None,
        ..KinematicCharacterController::default()
    }
}

/// A [`PhysicsWorld`] over a [`RapierQueryWorld`] that may not be loaded yet.
///
/// While unloaded every query answers `None` and bodies do not move.
pub struct RapierPhysicsWorld {
    scene: Option<RapierQueryWorld>,
    controller: KinematicCharacterController,
    step_seconds: f32,
}

impl Default for RapierPhysicsWorld {
    fn default() -> Self {
        Self::unloaded()
    }
}

impl RapierPhysicsWorld {
    pub fn unloaded() -> Self {
        Self {
            scene: None,
            controller: default_character_controller(),
            step_seconds: DEFAULT_STEP_SECONDS,
        }
    }

    pub fn from_statics(defs: Vec<WorldStaticDef>) -> Self {
        let mut world = Self::unloaded();
        world.load(defs);
        world
    }

    /// Replace the level geometry.
    pub fn load(&mut self, defs: Vec<WorldStaticDef>) {
        log::debug!("building rapier query world from {} statics", defs.len());
        self.scene = Some(RapierQueryWorld::build(defs));
    }

    /// Timestep forwarded to the character controller (slope handling uses it).
    pub fn set_step_seconds(&mut self, dt: f32) {
        if dt.is_finite() && dt > 0.0 {
            self.step_seconds = dt;
        }
    }
}

impl PhysicsWorld for RapierPhysicsWorld {
    fn is_supported(&self, footprint: Footprint) -> Option<bool> {
        let scene = self.scene.as_ref()?;
        let query = scene.query_pipeline(QueryFilter::default());

        // Probe from the feet (slightly lifted) at the center and halfway out to the rim.
        let reach = footprint.radius * 0.5;
        let offsets = [
            (0.0, 0.0),
            (reach, 0.0),
            (-reach, 0.0),
            (0.0, reach),
            (0.0, -reach),
        ];
        let max_toi = GROUND_PROBE_LIFT + GROUND_PROBE_DISTANCE;

        let supported = offsets.iter().any(|&(dx, dz)| {
            let origin = Point3::new(
                footprint.base.x + dx,
                footprint.base.y + GROUND_PROBE_LIFT,
                footprint.base.z + dz,
            );
            let ray = Ray::new(origin, Vector3::new(0.0, -1.0, 0.0));
            query
                .cast_ray_and_get_normal(&ray, max_toi, true)
                .is_some_and(|(_handle, hit)| hit.normal.y >= MIN_GROUND_NORMAL_Y)
        });

        Some(supported)
    }

    fn is_obstructed_above(&self, origin: Vec3, apex: Vec3, radius: f32) -> Option<bool> {
        let scene = self.scene.as_ref()?;

        let span = apex - origin;
        let length = span.norm();
        // Travel until the sphere's leading edge reaches the apex.
        let travel = length - radius;
        if travel <= DIST_EPS {
            return Some(false);
        }
        let direction = span / length;

        // Shrink by the skin so a body resting on the floor does not "hit" it.
        let probe = Ball::new((radius - DEFAULT_SKIN).max(DIST_EPS));
        let pose = Isometry3::translation(origin.x, origin.y, origin.z);
        let mut options = ShapeCastOptions::with_max_time_of_impact(travel);
        options.stop_at_penetration = false;

        let query = scene.query_pipeline(QueryFilter::default());
        Some(query.cast_shape(&pose, &direction, &probe, options).is_some())
    }

    fn move_body(&mut self, body: &mut CharacterBody, displacement: Vec3) -> CollisionFlags {
        let Some(scene) = self.scene.as_ref() else {
            return CollisionFlags::empty();
        };

        let shape = Capsule::new_y(body.capsule_half_height(), body.radius());
        let center = body.world_center();
        let pose = Isometry3::translation(center.x, center.y, center.z);

        let query = scene.query_pipeline(QueryFilter::default());
        let movement = self.controller.move_shape(
            self.step_seconds,
            &query,
            &shape,
            &pose,
            displacement,
            |_| {},
        );

        body.translate(movement.translation);
        classify_contacts(displacement, movement.translation, movement.grounded)
    }
}

impl LineOfSight for RapierPhysicsWorld {
    type Key = u32;

    fn first_hit(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<(u32, f32)> {
        let scene = self.scene.as_ref()?;
        let query = scene.query_pipeline(QueryFilter::default());
        let ray = Ray::new(Point3::from(origin), direction);
        let (handle, toi) = query.cast_ray(&ray, max_distance, true)?;
        scene.static_id(handle).map(|id| (id, toi))
    }
}

/// Derive contact sides by comparing the requested and the resolved translation.
fn classify_contacts(desired: Vec3, resolved: Vec3, grounded: bool) -> CollisionFlags {
    let mut flags = CollisionFlags::empty();

    if desired.y > DIST_EPS && resolved.y < desired.y - DIST_EPS {
        flags.add(CollisionFlag::Above);
    }
    if grounded || (desired.y < -DIST_EPS && resolved.y > desired.y + DIST_EPS) {
        flags.add(CollisionFlag::Below);
    }

    let wanted = Vec3::new(desired.x, 0.0, desired.z).norm();
    let got = Vec3::new(resolved.x, 0.0, resolved.z).norm();
    if wanted > DIST_EPS && got < wanted - DIST_EPS {
        flags.add(CollisionFlag::Sides);
    }

    flags
}

#[cfg(test)]
mod tests {
    use super::*;

    const FLOOR: u32 = 1;
    const CEILING: u32 = 2;

    fn floor() -> WorldStaticDef {
        WorldStaticDef::new(
            FLOOR,
            Vector3::zeros(),
            ColliderShapeDef::Plane {
                offset_along_normal: 0.0,
            },
        )
    }

    fn ceiling(bottom_y: f32) -> WorldStaticDef {
        WorldStaticDef::new(
            CEILING,
            Vector3::new(0.0, bottom_y + 0.25, 0.0),
            ColliderShapeDef::Cuboid {
                half_extents: Vector3::new(5.0, 0.25, 5.0),
            },
        )
    }

    #[test]
    fn unloaded_world_cannot_answer() {
        let mut world = RapierPhysicsWorld::unloaded();
        let mut body = CharacterBody::new(Vec3::new(0.0, 1.0, 0.0), 2.0, 0.5);

        assert_eq!(world.is_supported(body.footprint()), None);
        assert_eq!(
            world.is_obstructed_above(body.world_center(), Vec3::new(0.0, 3.0, 0.0), 0.5),
            None
        );

        let flags = world.move_body(&mut body, Vec3::new(1.0, 0.0, 0.0));
        assert!(flags.is_empty());
        assert_eq!(body.position(), Vec3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn body_resting_on_floor_is_supported() {
        let world = RapierPhysicsWorld::from_statics(vec![floor()]);

        let resting = CharacterBody::new(Vec3::new(0.0, DEFAULT_SKIN, 0.0), 2.0, 0.5);
        assert_eq!(world.is_supported(resting.footprint()), Some(true));

        let airborne = CharacterBody::new(Vec3::new(0.0, 3.0, 0.0), 2.0, 0.5);
        assert_eq!(world.is_supported(airborne.footprint()), Some(false));
    }

    #[test]
    fn low_ceiling_obstructs_standing_up() {
        let crouched = CharacterBody::new(Vec3::new(0.0, DEFAULT_SKIN, 0.0), 1.0, 0.5);
        let apex = crouched.position() + Vec3::new(0.0, 2.0, 0.0);

        let open = RapierPhysicsWorld::from_statics(vec![floor()]);
        assert_eq!(
            open.is_obstructed_above(crouched.world_center(), apex, crouched.radius()),
            Some(false)
        );

        let tunnel = RapierPhysicsWorld::from_statics(vec![floor(), ceiling(1.5)]);
        assert_eq!(
            tunnel.is_obstructed_above(crouched.world_center(), apex, crouched.radius()),
            Some(true)
        );

        let high_roof = RapierPhysicsWorld::from_statics(vec![floor(), ceiling(3.0)]);
        assert_eq!(
            high_roof.is_obstructed_above(crouched.world_center(), apex, crouched.radius()),
            Some(false)
        );
    }

    #[test]
    fn walking_along_floor_reports_ground_contact() {
        let mut world = RapierPhysicsWorld::from_statics(vec![floor()]);
        let mut body = CharacterBody::new(Vec3::new(0.0, 0.1, 0.0), 2.0, 0.5);

        let flags = world.move_body(&mut body, Vec3::new(1.0, -0.2, 0.0));

        assert!(flags.has(CollisionFlag::Below));
        assert!(!flags.has(CollisionFlag::Above));
        assert!((body.position().x - 1.0).abs() < 0.1);
        assert!(body.position().y >= -DIST_EPS);
        assert!(body.position().y < 0.1);
    }

    #[test]
    fn jumping_into_ceiling_reports_above() {
        let mut world = RapierPhysicsWorld::from_statics(vec![floor(), ceiling(2.5)]);
        let mut body = CharacterBody::new(Vec3::new(0.0, 0.05, 0.0), 2.0, 0.5);

        let flags = world.move_body(&mut body, Vec3::new(0.0, 1.0, 0.0));

        assert!(flags.has(CollisionFlag::Above));
        assert!(body.position().y < 0.5 + DIST_EPS);
    }

    #[test]
    fn line_of_sight_reports_static_id() {
        let world = RapierPhysicsWorld::from_statics(vec![floor(), ceiling(2.5)]);

        let hit = world.first_hit(Vec3::new(0.0, 1.5, 0.0), Vec3::new(0.0, 1.0, 0.0), 3.0);
        let (id, distance) = hit.expect("ray should hit the ceiling");
        assert_eq!(id, CEILING);
        assert!((distance - 1.0).abs() < 1.0e-3);

        assert!(world
            .first_hit(Vec3::new(0.0, 1.5, 0.0), Vec3::new(1.0, 0.0, 0.0), 3.0)
            .is_none());
    }

    #[test]
    fn classify_detects_blocked_sides() {
        let flags = classify_contacts(Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.2, 0.0, 0.0), false);
        assert!(flags.has(CollisionFlag::Sides));
        assert!(!flags.has(CollisionFlag::Below));
    }
}
