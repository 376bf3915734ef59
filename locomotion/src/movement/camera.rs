use crate::collision::{Quat, Vec3};

/// The camera attached to the body: view rotation plus local offset above the feet.
///
/// The controller reads the rotation (for view-relative movement) and writes the local
/// vertical offset once per tick. Hosts write the rotation from their look input.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraRig {
    pub rotation: Quat,
    pub local_offset: Vec3,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self {
            rotation: Quat::identity(),
            local_offset: Vec3::zeros(),
        }
    }
}

impl CameraRig {
    pub fn new(rotation: Quat, local_offset: Vec3) -> Self {
        Self {
            rotation,
            local_offset,
        }
    }

    /// Yaw around +Y, then pitch around the yawed +X (radians).
    pub fn set_look(&mut self, yaw: f32, pitch: f32) {
        self.rotation = Quat::from_axis_angle(&Vec3::y_axis(), yaw)
            * Quat::from_axis_angle(&Vec3::x_axis(), pitch);
    }

    /// Unit view-forward in world space.
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::new(0.0, 0.0, -1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn look_straight_ahead_faces_negative_z() {
        let mut rig = CameraRig::default();
        rig.set_look(0.0, 0.0);
        assert!((rig.forward() - Vec3::new(0.0, 0.0, -1.0)).norm() < 1.0e-6);
    }

    #[test]
    fn positive_pitch_looks_up() {
        let mut rig = CameraRig::default();
        rig.set_look(0.3, 0.5);
        let forward = rig.forward();
        assert!(forward.y > 0.0);
        assert!((forward.norm() - 1.0).abs() < 1.0e-5);
    }
}
