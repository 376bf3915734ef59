/// Result of one vertical integration step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VerticalStep {
    /// Velocity after clamp, gravity and (maybe) jump.
    pub velocity: f32,
    /// The fall was just arrested by the ground.
    pub landed: bool,
    pub jumped: bool,
}

/// Owns the signed vertical velocity of the body.
///
/// Per tick, in this order:
/// 1. grounded while falling: clamp to the settle velocity
/// 2. accumulate gravity
/// 3. grounded and a jump was requested: overwrite with the jump impulse
///
/// Clamping happens before accumulation, so the steady grounded velocity after a tick is
/// `settle + gravity * dt`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct VerticalIntegrator {
    velocity: f32,
    was_grounded: bool,
}

impl VerticalIntegrator {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn step(
        &mut self,
        grounded: bool,
        jump_requested: bool,
        gravity: f32,
        settle_velocity: f32,
        jump_impulse: f32,
        dt: f32,
    ) -> VerticalStep {
        // Only the first grounded tick after being airborne is a landing.
        let landed = grounded && !self.was_grounded && self.velocity < 0.0;
        self.was_grounded = grounded;
        if grounded && self.velocity < 0.0 {
            self.velocity = settle_velocity;
        }

        self.velocity += gravity * dt;

        let jumped = jump_requested && grounded;
        if jumped {
            self.velocity = jump_impulse;
        }

        VerticalStep {
            velocity: self.velocity,
            landed,
            jumped,
        }
    }

    /// Motion was blocked from above; drop any residual velocity.
    pub fn bump_ceiling(&mut self) {
        self.velocity = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const G: f32 = -12.0;
    const SETTLE: f32 = -2.0;
    const JUMP: f32 = 7.0;

    #[test]
    fn grounded_velocity_holds_without_drift() {
        for &dt in &[1.0 / 240.0, 1.0 / 60.0, 1.0 / 30.0, 0.1, 0.5] {
            let mut v = VerticalIntegrator::new();
            for _ in 0..200 {
                v.step(true, false, G, SETTLE, JUMP, dt);
            }
            let expected = SETTLE + G * dt;
            assert!((v.velocity() - expected).abs() < 1.0e-5, "dt={dt}");

            let before = v.velocity();
            v.step(true, false, G, SETTLE, JUMP, dt);
            assert_eq!(v.velocity(), before);
        }
    }

    #[test]
    fn falling_accumulates_gravity() {
        let mut v = VerticalIntegrator::new();
        v.step(false, false, G, SETTLE, JUMP, 0.5);
        v.step(false, false, G, SETTLE, JUMP, 0.5);
        assert!((v.velocity() - (-12.0)).abs() < 1.0e-6);
    }

    #[test]
    fn landing_clamps_before_accumulating() {
        let mut v = VerticalIntegrator::new();
        for _ in 0..10 {
            v.step(false, false, G, SETTLE, JUMP, 0.1);
        }
        assert!(v.velocity() < -10.0);

        let step = v.step(true, false, G, SETTLE, JUMP, 0.1);
        assert!(step.landed);
        assert!((step.velocity - (SETTLE + G * 0.1)).abs() < 1.0e-6);

        let step = v.step(true, false, G, SETTLE, JUMP, 0.1);
        assert!(!step.landed);
    }

    #[test]
    fn steady_ground_contact_is_not_a_landing() {
        let mut v = VerticalIntegrator::new();
        let landings = (0..10)
            .filter(|_| v.step(true, false, G, SETTLE, JUMP, 1.0 / 60.0).landed)
            .count();
        assert_eq!(landings, 0);

        // Walking off a ledge and coming back down lands exactly once.
        v.step(false, false, G, SETTLE, JUMP, 1.0 / 60.0);
        assert!(v.step(true, false, G, SETTLE, JUMP, 1.0 / 60.0).landed);
        assert!(!v.step(true, false, G, SETTLE, JUMP, 1.0 / 60.0).landed);
    }

    #[test]
    fn jump_only_applies_when_grounded() {
        let mut airborne = VerticalIntegrator::new();
        airborne.step(false, false, G, SETTLE, JUMP, 0.1);
        let before = airborne.velocity();
        let step = airborne.step(false, true, G, SETTLE, JUMP, 0.1);
        assert!(!step.jumped);
        assert!((step.velocity - (before + G * 0.1)).abs() < 1.0e-6);

        let mut grounded = VerticalIntegrator::new();
        let step = grounded.step(true, true, G, SETTLE, JUMP, 0.1);
        assert!(step.jumped);
        assert_eq!(step.velocity, JUMP);
    }

    #[test]
    fn ceiling_bump_zeroes_velocity() {
        let mut v = VerticalIntegrator::new();
        v.step(true, true, G, SETTLE, JUMP, 0.1);
        assert!(v.velocity() > 0.0);

        v.bump_ceiling();
        assert_eq!(v.velocity(), 0.0);

        // Next tick starts falling from rest.
        v.step(false, false, G, SETTLE, JUMP, 0.1);
        assert!((v.velocity() - G * 0.1).abs() < 1.0e-6);
    }
}
