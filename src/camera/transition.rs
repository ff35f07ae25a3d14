use std::time::{Duration, Instant};

use super::CameraPose;

/// Cubic ease-out: fast start, gentle landing.
pub fn ease_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

/// An in-flight camera move between two poses.
#[derive(Debug, Clone)]
pub struct CameraTransition {
    start: CameraPose,
    target: CameraPose,
    started_at: Instant,
    duration: Duration,
}

impl CameraTransition {
    pub fn new(start: CameraPose, target: CameraPose, started_at: Instant, duration: Duration) -> Self {
        CameraTransition {
            start,
            target,
            started_at,
            duration,
        }
    }

    pub fn start(&self) -> &CameraPose {
        &self.start
    }

    pub fn target(&self) -> &CameraPose {
        &self.target
    }

    /// Linear progress in [0, 1].
    pub fn progress(&self, now: Instant) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.started_at);
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
    }

    pub fn is_finished(&self, now: Instant) -> bool {
        self.progress(now) >= 1.0
    }

    pub fn pose_at(&self, now: Instant) -> CameraPose {
        let progress = self.progress(now);
        if progress >= 1.0 {
            // land exactly, not just within rounding error
            return self.target;
        }
        self.start.lerp(&self.target, ease_out_cubic(progress))
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use nalgebra::Point3;

    use super::*;

    #[test]
    fn test_ease_endpoints() {
        assert_eq!(ease_out_cubic(0.0), 0.0);
        assert_eq!(ease_out_cubic(1.0), 1.0);
        assert_relative_eq!(ease_out_cubic(0.5), 0.875);
    }

    #[test]
    fn test_ease_is_monotonic() {
        let mut prev = ease_out_cubic(0.0);
        for i in 1..=1000 {
            let next = ease_out_cubic(i as f32 / 1000.0);
            assert!(next >= prev);
            prev = next;
        }
    }

    #[test]
    fn test_transition_path() {
        let start = CameraPose::new(Point3::new(0.0, 0.0, 0.0), Point3::new(0.0, 0.0, -1.0));
        let target = CameraPose::new(Point3::new(8.0, 0.0, 0.0), Point3::new(8.0, 4.0, -1.0));
        let t0 = Instant::now();
        let transition = CameraTransition::new(start, target, t0, Duration::from_millis(2000));

        assert_eq!(transition.pose_at(t0), start);

        // Halfway through time is 87.5% of the way there
        let mid = transition.pose_at(t0 + Duration::from_millis(1000));
        assert_relative_eq!(mid.eye, Point3::new(7.0, 0.0, 0.0), epsilon = 1e-5);
        assert_relative_eq!(mid.look_at, Point3::new(7.0, 3.5, -1.0), epsilon = 1e-5);
        assert!(!transition.is_finished(t0 + Duration::from_millis(1999)));

        let late = t0 + Duration::from_millis(5000);
        assert!(transition.is_finished(late));
        assert_eq!(transition.pose_at(late), target);
    }

    #[test]
    fn test_zero_duration() {
        let start = CameraPose::new(Point3::origin(), Point3::new(1.0, 0.0, 0.0));
        let target = CameraPose::new(Point3::new(5.0, 5.0, 5.0), Point3::origin());
        let t0 = Instant::now();
        let transition = CameraTransition::new(start, target, t0, Duration::ZERO);
        assert!(transition.is_finished(t0));
        assert_eq!(transition.pose_at(t0), target);
    }
}
