use std::time::{Duration, Instant};

use tracing::debug;

use super::orbit::OrbitCamera;
use super::transition::CameraTransition;
use super::view::{View, ViewTarget};
use crate::consts::CAMERA_TRANSITION_MILLIS;
use crate::model::SolarSystem;

/// Moves the camera between view presets.
///
/// There's at most one transition at a time. A new request doesn't queue up
/// behind the current one; it starts from wherever the camera is right now
/// and replaces it.
pub struct ViewController {
    current: View,
    transition: Option<CameraTransition>,
    duration: Duration,
}

impl Default for ViewController {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewController {
    pub fn new() -> Self {
        Self::with_duration(Duration::from_millis(CAMERA_TRANSITION_MILLIS))
    }

    pub fn with_duration(duration: Duration) -> Self {
        ViewController {
            current: View::Space,
            transition: None,
            duration,
        }
    }

    pub fn current_view(&self) -> View {
        self.current
    }

    pub fn transition(&self) -> Option<&CameraTransition> {
        self.transition.as_ref()
    }

    pub fn is_transitioning(&self) -> bool {
        self.transition.is_some()
    }

    pub fn request_view(
        &mut self,
        view: View,
        system: &SolarSystem,
        camera: &mut OrbitCamera,
        now: Instant,
    ) -> ViewTarget {
        let target = view.resolve(system);
        let (min_dist, max_dist) = target.distance_bounds;
        camera.set_distance_bounds(min_dist, max_dist);

        if self.transition.is_some() {
            debug!("Superseding in-flight camera transition");
        }
        self.transition = Some(CameraTransition::new(
            camera.pose(),
            target.pose,
            now,
            self.duration,
        ));
        self.current = view;

        target
    }

    /// Moves the camera along the current transition, if there is one.
    /// Once the transition is done, the camera is left alone.
    pub fn update(&mut self, now: Instant, camera: &mut OrbitCamera) {
        let transition = match &self.transition {
            Some(t) => t,
            None => return,
        };

        camera.set_pose(transition.pose_at(now));
        if transition.is_finished(now) {
            debug!("Camera arrived at {:?}", self.current);
            self.transition = None;
        }
    }
}
