/*!
Crouch state machine and the exponential smoothing shared by body and camera height.

The logical stance flips atomically; only the visible height converges over time.
*/

use crate::config::LocomotionConfig;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Stance {
    #[default]
    Standing,
    Crouching,
}

impl Stance {
    #[inline]
    pub fn is_crouching(self) -> bool {
        matches!(self, Stance::Crouching)
    }

    /// Target body height for this stance. Always one of the two configured constants.
    #[inline]
    pub fn target_height(self, config: &LocomotionConfig) -> f32 {
        match self {
            Stance::Standing => config.standing_height,
            Stance::Crouching => config.crouching_height,
        }
    }
}

/// Apply a crouch toggle.
///
/// Crouching down always succeeds. Standing up succeeds only when `obstructed` is false;
/// otherwise the stance stays `Crouching`.
#[inline]
pub fn toggle(stance: Stance, obstructed: bool) -> Stance {
    match stance {
        Stance::Standing => Stance::Crouching,
        Stance::Crouching if obstructed => Stance::Crouching,
        Stance::Crouching => Stance::Standing,
    }
}

/// Fraction of the remaining gap closed in `dt` at `rate` (1/s). Always in `[0, 1)`.
#[inline]
pub fn smoothing_factor(rate: f32, dt: f32) -> f32 {
    if rate <= 0.0 || dt <= 0.0 {
        return 0.0;
    }
    1.0 - (-rate * dt).exp()
}

/// Move `current` toward `target` by `factor` of the gap, snapping once within `snap`.
#[inline]
pub fn approach(current: f32, target: f32, factor: f32, snap: f32) -> f32 {
    let next = current + (target - current) * factor;
    if (target - next).abs() <= snap {
        target
    } else {
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crouching_down_always_succeeds() {
        assert_eq!(toggle(Stance::Standing, false), Stance::Crouching);
        assert_eq!(toggle(Stance::Standing, true), Stance::Crouching);
    }

    #[test]
    fn standing_up_requires_clearance() {
        assert_eq!(toggle(Stance::Crouching, false), Stance::Standing);
        assert_eq!(toggle(Stance::Crouching, true), Stance::Crouching);
    }

    #[test]
    fn targets_are_the_configured_heights() {
        let config = LocomotionConfig::default();
        assert_eq!(Stance::Standing.target_height(&config), config.standing_height);
        assert_eq!(Stance::Crouching.target_height(&config), config.crouching_height);
    }

    #[test]
    fn smoothing_factor_stays_below_one() {
        assert_eq!(smoothing_factor(10.0, 0.0), 0.0);
        for &dt in &[1.0e-4, 1.0 / 60.0, 0.25, 5.0] {
            let f = smoothing_factor(10.0, dt);
            assert!(f > 0.0 && f <= 1.0, "dt={dt} f={f}");
        }
    }

    #[test]
    fn approach_is_monotonic_and_terminates() {
        let factor = smoothing_factor(10.0, 1.0 / 60.0);
        let target = 1.0;
        let mut h = 2.0_f32;
        let mut ticks = 0;

        while h != target {
            let next = approach(h, target, factor, 0.01);
            assert!((next - target).abs() < (h - target).abs());
            assert!(next >= target);
            h = next;
            ticks += 1;
            assert!(ticks < 1000);
        }
    }

    #[test]
    fn splitting_dt_converges_to_the_same_height() {
        let whole = approach(2.0, 1.0, smoothing_factor(10.0, 0.1), 0.0);

        let half = smoothing_factor(10.0, 0.05);
        let split = approach(approach(2.0, 1.0, half, 0.0), 1.0, half, 0.0);

        assert!((whole - split).abs() < 1.0e-5);
    }
}
