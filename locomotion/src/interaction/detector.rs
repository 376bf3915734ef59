use crate::{
    collision::{LineOfSight, Vec3},
    constants::INTERACTION_DISTANCE_M,
};

/// Tracks which interactable the view is pointing at.
///
/// `resolve` maps a line-of-sight hit to an interactable key, or `None` for plain geometry.
#[derive(Clone, Debug, PartialEq)]
pub struct InteractionDetector<K> {
    max_distance: f32,
    current: Option<K>,
}

impl<K: Copy + Eq> Default for InteractionDetector<K> {
    fn default() -> Self {
        Self::new(INTERACTION_DISTANCE_M)
    }
}

impl<K: Copy + Eq> InteractionDetector<K> {
    pub fn new(max_distance: f32) -> Self {
        Self {
            max_distance,
            current: None,
        }
    }

    pub fn max_distance(&self) -> f32 {
        self.max_distance
    }

    /// Recast from the view. Only the nearest hit counts, so walls block interaction.
    pub fn update<L>(
        &mut self,
        los: &L,
        origin: Vec3,
        forward: Vec3,
        resolve: impl Fn(L::Key) -> Option<K>,
    ) -> Option<K>
    where
        L: LineOfSight + ?Sized,
    {
        let len = forward.norm();
        self.current = if len.is_finite() && len > 0.0 {
            los.first_hit(origin, forward / len, self.max_distance)
                .and_then(|(key, _distance)| resolve(key))
        } else {
            None
        };
        self.current
    }

    pub fn current(&self) -> Option<K> {
        self.current
    }

    /// The interactable an `interact` press should reach, if any.
    pub fn interact(&self) -> Option<K> {
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A single wall along the ray at a fixed distance.
    struct Wall {
        key: u32,
        distance: f32,
    }

    impl LineOfSight for Wall {
        type Key = u32;

        fn first_hit(&self, _origin: Vec3, _direction: Vec3, max_distance: f32) -> Option<(u32, f32)> {
            (self.distance <= max_distance).then_some((self.key, self.distance))
        }
    }

    const TERMINAL: u32 = 7;

    fn only_terminal(key: u32) -> Option<u32> {
        (key == TERMINAL).then_some(key)
    }

    #[test]
    fn finds_interactable_in_reach() {
        let mut detector = InteractionDetector::default();
        let wall = Wall {
            key: TERMINAL,
            distance: 2.0,
        };

        detector.update(&wall, Vec3::zeros(), Vec3::new(0.0, 0.0, -1.0), only_terminal);
        assert_eq!(detector.interact(), Some(TERMINAL));
    }

    #[test]
    fn out_of_reach_or_plain_geometry_clears_target() {
        let mut detector = InteractionDetector::default();
        let near = Wall {
            key: TERMINAL,
            distance: 1.0,
        };
        detector.update(&near, Vec3::zeros(), Vec3::new(0.0, 0.0, -1.0), only_terminal);
        assert!(detector.current().is_some());

        let far = Wall {
            key: TERMINAL,
            distance: 5.0,
        };
        detector.update(&far, Vec3::zeros(), Vec3::new(0.0, 0.0, -1.0), only_terminal);
        assert_eq!(detector.interact(), None);

        let plain = Wall {
            key: 1,
            distance: 1.0,
        };
        detector.update(&plain, Vec3::zeros(), Vec3::new(0.0, 0.0, -1.0), only_terminal);
        assert_eq!(detector.interact(), None);
    }

    #[test]
    fn zero_forward_finds_nothing() {
        let mut detector = InteractionDetector::default();
        let wall = Wall {
            key: TERMINAL,
            distance: 1.0,
        };
        assert_eq!(detector.update(&wall, Vec3::zeros(), Vec3::zeros(), only_terminal), None);
    }
}
