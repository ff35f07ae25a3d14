use std::time::{Duration, Instant};

use crate::consts::MAX_SPEED_MULTIPLIER;

/// Play/pause, speed, and frame timing. There's exactly one of these, owned by
/// the planetarium.
#[derive(Debug, Clone)]
pub struct AnimationState {
    is_animating: bool,
    speed_multiplier: f64,
    last_frame: Option<Instant>,
    max_frame_delta: Option<Duration>,
}

impl AnimationState {
    pub fn new(speed_multiplier: f64, max_frame_delta: Option<Duration>) -> Self {
        AnimationState {
            is_animating: true,
            speed_multiplier: sanitize_speed(speed_multiplier),
            last_frame: None,
            max_frame_delta,
        }
    }

    pub fn is_animating(&self) -> bool {
        self.is_animating
    }

    pub fn set_animating(&mut self, animating: bool) {
        self.is_animating = animating;
    }

    pub fn toggle(&mut self) -> bool {
        self.is_animating = !self.is_animating;
        self.is_animating
    }

    pub fn speed(&self) -> f64 {
        self.speed_multiplier
    }

    pub fn set_speed(&mut self, speed: f64) {
        self.speed_multiplier = sanitize_speed(speed);
    }

    /// Records a frame at `now` and returns how many seconds of animation time
    /// it covers, with the speed multiplier already applied. The first frame
    /// covers nothing.
    pub fn frame_delta(&mut self, now: Instant) -> f64 {
        let elapsed = match self.last_frame.replace(now) {
            Some(prev) => now.saturating_duration_since(prev),
            None => Duration::ZERO,
        };
        let elapsed = match self.max_frame_delta {
            Some(max) => elapsed.min(max),
            None => elapsed,
        };
        elapsed.as_secs_f64() * self.speed_multiplier
    }
}

fn sanitize_speed(speed: f64) -> f64 {
    // An infinite speed turns the first zero-length frame into NaN
    if speed.is_finite() && speed > 0.0 {
        speed.min(MAX_SPEED_MULTIPLIER)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn test_toggle_twice_is_identity() {
        let mut state = AnimationState::new(1.0, None);
        let original = state.is_animating();
        state.toggle();
        assert_ne!(state.is_animating(), original);
        state.toggle();
        assert_eq!(state.is_animating(), original);
    }

    #[test]
    fn test_speed_is_never_negative() {
        let mut state = AnimationState::new(-3.0, None);
        assert_eq!(state.speed(), 0.0);
        state.set_speed(f64::NAN);
        assert_eq!(state.speed(), 0.0);
        state.set_speed(2.5);
        assert_eq!(state.speed(), 2.5);
        state.set_speed(f64::INFINITY);
        assert_eq!(state.speed(), 0.0);
        state.set_speed(1e300);
        assert_eq!(state.speed(), MAX_SPEED_MULTIPLIER);
    }

    #[test]
    fn test_infinite_speed_keeps_deltas_finite() {
        let start = Instant::now();
        let mut state = AnimationState::new(f64::INFINITY, None);
        assert_eq!(state.frame_delta(start), 0.0);
        assert!(state.frame_delta(start + Duration::from_millis(16)).is_finite());
    }

    #[test]
    fn test_frame_delta() {
        let start = Instant::now();
        let mut state = AnimationState::new(2.0, None);

        assert_eq!(state.frame_delta(start), 0.0);
        let dt = state.frame_delta(start + Duration::from_millis(500));
        assert_relative_eq!(dt, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_frame_delta_clamped() {
        let start = Instant::now();
        let mut state = AnimationState::new(1.0, Some(Duration::from_millis(250)));

        state.frame_delta(start);
        // e.g., the window was minimized for a minute
        let dt = state.frame_delta(start + Duration::from_secs(60));
        assert_relative_eq!(dt, 0.25, epsilon = 1e-9);
    }
}
