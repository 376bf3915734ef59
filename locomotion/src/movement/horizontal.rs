use crate::{
    collision::{Quat, Vec2, Vec3},
    config::LocomotionConfig,
};

const MIN_INPUT_SQ: f32 = 1.0e-8;

/// World-space horizontal direction for a 2D move input seen through `view`.
///
/// Input `+y` is view-forward (`-Z` in view space), `+x` is view-right. The result lies on
/// the XZ plane and is unit length, or zero for zero / non-finite input or when the view
/// looks straight up or down.
pub fn planar_direction(input: Vec2, view: Quat) -> Vec3 {
    if !(input.x.is_finite() && input.y.is_finite()) || input.norm_squared() <= MIN_INPUT_SQ {
        return Vec3::zeros();
    }

    let world = view * Vec3::new(input.x, 0.0, -input.y);
    let flat = Vec3::new(world.x, 0.0, world.z);
    let len_sq = flat.norm_squared();
    if !len_sq.is_finite() || len_sq <= MIN_INPUT_SQ {
        return Vec3::zeros();
    }
    flat / len_sq.sqrt()
}

/// Crouch wins over sprint.
#[inline]
pub fn select_speed(config: &LocomotionConfig, crouching: bool, running: bool) -> f32 {
    if crouching {
        config.crouch_speed
    } else if running {
        config.run_speed
    } else {
        config.walk_speed
    }
}

/// Displacement for one tick: planar motion plus the vertical velocity on Y.
#[inline]
pub fn compose_displacement(direction: Vec3, speed: f32, vertical_velocity: f32, dt: f32) -> Vec3 {
    (direction * speed + Vec3::y() * vertical_velocity) * dt
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use super::*;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).norm() < 1.0e-5
    }

    #[test]
    fn forward_input_follows_view_yaw() {
        assert!(approx(
            planar_direction(Vec2::new(0.0, 1.0), Quat::identity()),
            Vec3::new(0.0, 0.0, -1.0)
        ));

        // Turned 90 degrees left: forward becomes -X.
        let yaw_left = Quat::from_axis_angle(&Vec3::y_axis(), FRAC_PI_2);
        assert!(approx(
            planar_direction(Vec2::new(0.0, 1.0), yaw_left),
            Vec3::new(-1.0, 0.0, 0.0)
        ));
        assert!(approx(
            planar_direction(Vec2::new(1.0, 0.0), Quat::identity()),
            Vec3::new(1.0, 0.0, 0.0)
        ));
    }

    #[test]
    fn pitch_does_not_tilt_motion() {
        let look_down = Quat::from_axis_angle(&Vec3::x_axis(), -0.8);
        let dir = planar_direction(Vec2::new(0.0, 1.0), look_down);
        assert_eq!(dir.y, 0.0);
        assert!((dir.norm() - 1.0).abs() < 1.0e-5);
    }

    #[test]
    fn degenerate_input_yields_zero() {
        let view = Quat::identity();
        assert_eq!(planar_direction(Vec2::zeros(), view), Vec3::zeros());
        assert_eq!(planar_direction(Vec2::new(f32::NAN, 1.0), view), Vec3::zeros());
        assert_eq!(
            planar_direction(Vec2::new(0.0, f32::INFINITY), view),
            Vec3::zeros()
        );
    }

    #[test]
    fn oversized_input_is_normalized() {
        let dir = planar_direction(Vec2::new(3.0, 4.0), Quat::identity());
        assert!((dir.norm() - 1.0).abs() < 1.0e-5);
    }

    #[test]
    fn crouch_speed_wins_over_running() {
        let config = LocomotionConfig::default();
        for running in [false, true] {
            assert_eq!(select_speed(&config, true, running), config.crouch_speed);
        }
        assert_eq!(select_speed(&config, false, true), config.run_speed);
        assert_eq!(select_speed(&config, false, false), config.walk_speed);
    }

    #[test]
    fn displacement_scales_with_dt() {
        let d = compose_displacement(Vec3::new(0.0, 0.0, -1.0), 10.0, -2.0, 0.5);
        assert!(approx(d, Vec3::new(0.0, -1.0, -5.0)));
    }
}
