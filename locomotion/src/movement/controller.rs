/*!
Per-tick orchestrator.

Tick order is fixed:
1. re-read grounded state from the physical world
2. integrate gravity (clamp, accumulate, jump)
3. compose and commit the displacement, reading back collision flags
4. resolve queued stand-up toggles, then smooth body and camera height
5. reconcile the footstep cue
*/

use crate::{
    collision::{CharacterBody, CollisionFlag, CollisionFlags, PhysicsWorld, Vec2, Vec3},
    config::LocomotionConfig,
    error::LocomotionError,
};

use super::{
    camera::CameraRig,
    footsteps::{AudioCue, sync_cue, wants_footsteps},
    horizontal::{compose_displacement, planar_direction, select_speed},
    input::{InputBridge, InputDispatcher, InputEvent, SubscriptionId},
    stance::{Stance, approach, smoothing_factor, toggle},
    vertical::VerticalIntegrator,
};

/// What happened during one [`LocomotionController::tick`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TickReport {
    pub grounded: bool,
    pub collisions: CollisionFlags,
    /// Displacement actually applied to the body after collision.
    pub displacement: Vec3,
    pub vertical_velocity: f32,
    pub stance: Stance,
    pub footsteps_playing: bool,
}

pub struct LocomotionControllerBuilder {
    config: LocomotionConfig,
    body: Option<CharacterBody>,
    camera: Option<CameraRig>,
}

impl LocomotionControllerBuilder {
    pub fn body(mut self, body: CharacterBody) -> Self {
        self.body = Some(body);
        self
    }

    pub fn camera(mut self, camera: CameraRig) -> Self {
        self.camera = Some(camera);
        self
    }

    /// Fails fast when the camera or body is missing or the config is invalid.
    pub fn build(self) -> Result<LocomotionController, LocomotionError> {
        self.config.validate()?;
        let camera = self.camera.ok_or(LocomotionError::MissingCamera)?;
        let body = self.body.ok_or(LocomotionError::MissingBody)?;

        let radius = body.radius();
        if !radius.is_finite() || radius <= 0.0 {
            return Err(LocomotionError::InvalidBodyRadius(radius));
        }

        Ok(LocomotionController {
            config: self.config,
            body,
            camera,
            input: InputBridge::default(),
            vertical: VerticalIntegrator::new(),
            stance: Stance::Standing,
            grounded: false,
            enabled: true,
            subscription: None,
            world_unanswered: false,
        })
    }
}

/// First-person locomotion for one character body.
///
/// Owns the vertical velocity, stance and latched input. The body and camera rig are
/// handles the controller requests changes on; hosts read them back after each tick.
pub struct LocomotionController {
    config: LocomotionConfig,
    body: CharacterBody,
    camera: CameraRig,
    input: InputBridge,
    vertical: VerticalIntegrator,
    stance: Stance,
    grounded: bool,
    enabled: bool,
    subscription: Option<SubscriptionId>,
    // Warn once per outage instead of every tick.
    world_unanswered: bool,
}

impl LocomotionController {
    pub fn builder(config: LocomotionConfig) -> LocomotionControllerBuilder {
        LocomotionControllerBuilder {
            config,
            body: None,
            camera: None,
        }
    }

    pub fn config(&self) -> &LocomotionConfig {
        &self.config
    }

    pub fn body(&self) -> &CharacterBody {
        &self.body
    }

    /// Hosts may teleport or rotate the body between ticks.
    pub fn body_mut(&mut self) -> &mut CharacterBody {
        &mut self.body
    }

    pub fn camera(&self) -> &CameraRig {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut CameraRig {
        &mut self.camera
    }

    pub fn stance(&self) -> Stance {
        self.stance
    }

    pub fn is_crouching(&self) -> bool {
        self.stance.is_crouching()
    }

    pub fn is_running(&self) -> bool {
        self.input.is_running()
    }

    /// Grounded state as of the last tick.
    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    pub fn vertical_velocity(&self) -> f32 {
        self.vertical.velocity()
    }

    pub fn move_input(&self) -> Vec2 {
        self.input.move_input()
    }

    pub fn target_height(&self) -> f32 {
        self.stance.target_height(&self.config)
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Register with `dispatcher` and resume ticking.
    pub fn enable(&mut self, dispatcher: &mut InputDispatcher) {
        if self.subscription.is_none() {
            self.subscription = Some(dispatcher.subscribe());
        }
        self.enabled = true;
        log::info!("locomotion controller enabled");
    }

    /// Deregister from `dispatcher` and stop ticking. The body stays where it is.
    pub fn disable(&mut self, dispatcher: &mut InputDispatcher) {
        if let Some(id) = self.subscription.take() {
            dispatcher.unsubscribe(id);
        }
        self.input.clear();
        self.enabled = false;
        log::info!("locomotion controller disabled");
    }

    /// Apply every event queued for this controller.
    pub fn pump(&mut self, dispatcher: &mut InputDispatcher) {
        let Some(id) = self.subscription else {
            return;
        };
        for event in dispatcher.drain(id) {
            self.handle_input(event);
        }
    }

    /// Mutates input fields only; physics is deferred to the next tick.
    ///
    /// Crouching down needs no probe, so it applies at once unless earlier toggles are
    /// still queued. Every other toggle waits for the clearance probe in the next tick.
    pub fn handle_input(&mut self, event: InputEvent) {
        if !self.enabled {
            return;
        }
        match event {
            InputEvent::CrouchToggle
                if self.stance == Stance::Standing && !self.input.has_pending_crouch_toggles() =>
            {
                log::debug!("stance {:?} -> {:?}", self.stance, Stance::Crouching);
                self.stance = Stance::Crouching;
            }
            _ => self.input.handle(event),
        }
    }

    pub fn tick(
        &mut self,
        dt: f32,
        world: &mut impl PhysicsWorld,
        footsteps: &mut impl AudioCue,
    ) -> TickReport {
        if !self.enabled || !dt.is_finite() || dt <= 0.0 {
            return self.report(CollisionFlags::empty(), Vec3::zeros(), footsteps.is_playing());
        }

        // 1) Grounded.
        let grounded = match world.is_supported(self.body.footprint()) {
            Some(supported) => {
                self.world_unanswered = false;
                supported
            }
            None => {
                if !self.world_unanswered {
                    log::warn!("ground query unanswered; treating body as airborne");
                    self.world_unanswered = true;
                }
                false
            }
        };
        self.grounded = grounded;

        // 2) Gravity and jump.
        let jump_requested = self.input.take_jump();
        let vertical = self.vertical.step(
            grounded,
            jump_requested,
            self.config.gravity,
            self.config.settle_velocity,
            self.config.jump_impulse,
            dt,
        );
        if vertical.landed {
            log::debug!("landed");
        }
        if vertical.jumped {
            log::debug!("jump: vy={:.2}", vertical.velocity);
        }

        // 3) Displacement.
        let direction = planar_direction(self.input.move_input(), self.camera.rotation);
        let speed = select_speed(&self.config, self.stance.is_crouching(), self.input.is_running());
        let desired = compose_displacement(direction, speed, vertical.velocity, dt);

        let before = self.body.position();
        let collisions = world.move_body(&mut self.body, desired);
        let displacement = self.body.position() - before;

        if collisions.has(CollisionFlag::Above) {
            log::debug!("ceiling bump at vy={:.2}", self.vertical.velocity());
            self.vertical.bump_ceiling();
        }

        // 4) Stance, then height and camera smoothing.
        let toggles = self.input.take_crouch_toggles();
        if toggles > 0 {
            self.resolve_crouch_toggles(&*world, toggles);
        }
        self.smooth_heights(dt);

        // 5) Footsteps.
        let wanted = wants_footsteps(
            grounded,
            self.input.move_input().norm(),
            self.config.footstep_deadzone,
        );
        sync_cue(footsteps, wanted);

        self.report(collisions, displacement, footsteps.is_playing())
    }

    /// Apply `count` toggles in order. The body does not move in between, so the
    /// clearance probe runs at most once.
    fn resolve_crouch_toggles<W: PhysicsWorld>(&mut self, world: &W, count: u32) {
        let mut clearance: Option<bool> = None;
        for _ in 0..count {
            let obstructed = match self.stance {
                Stance::Standing => false,
                Stance::Crouching => {
                    *clearance.get_or_insert_with(|| self.probe_clearance(world))
                }
            };

            let next = toggle(self.stance, obstructed);
            if next == self.stance {
                log::warn!("stand-up vetoed: not enough headroom");
            } else {
                log::debug!("stance {:?} -> {:?}", self.stance, next);
            }
            self.stance = next;
        }
    }

    /// Sweep from the body center to where a standing head would be.
    fn probe_clearance<W: PhysicsWorld>(&self, world: &W) -> bool {
        let apex = self.body.position() + Vec3::y() * self.config.standing_height;
        world
            .is_obstructed_above(self.body.world_center(), apex, self.body.radius())
            .unwrap_or_else(|| {
                log::warn!("clearance query unanswered; treating as obstructed");
                true
            })
    }

    fn smooth_heights(&mut self, dt: f32) {
        let factor = smoothing_factor(self.config.crouch_transition_rate, dt);
        let snap = self.config.height_snap_epsilon;
        let target = self.target_height();

        let height = self.body.height();
        if height != target {
            self.body.resize(approach(height, target, factor, snap));
        }

        let camera_target = self.config.camera_height_for(target);
        let offset = &mut self.camera.local_offset;
        if offset.y != camera_target {
            offset.y = approach(offset.y, camera_target, factor, snap);
        }
    }

    fn report(&self, collisions: CollisionFlags, displacement: Vec3, playing: bool) -> TickReport {
        TickReport {
            grounded: self.grounded,
            collisions,
            displacement,
            vertical_velocity: self.vertical.velocity(),
            stance: self.stance,
            footsteps_playing: playing,
        }
    }
}
