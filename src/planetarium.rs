use std::time::Instant;

use tracing::{debug, info};

use crate::camera::{CameraPose, OrbitCamera, View, ViewController, ViewTarget};
use crate::config::Config;
use crate::consts::{MAX_SPEED_MULTIPLIER, SPEED_STEP};
use crate::model::{AnimationState, SolarSystem};

/// The running system: body angles, animation clock, and camera. Everything
/// the window does goes through here, so it all works without a window too.
pub struct Planetarium {
    system: SolarSystem,
    animation: AnimationState,
    views: ViewController,
    camera: OrbitCamera,
}

impl Planetarium {
    pub fn new(config: &Config) -> Self {
        let system = SolarSystem::new();
        let start = View::Space.resolve(&system);

        let mut camera = OrbitCamera::new(
            start.pose,
            config.camera.fov_degrees.to_radians(),
            config.camera.damping_factor,
        );
        let (min_dist, max_dist) = start.distance_bounds;
        camera.set_distance_bounds(min_dist, max_dist);
        camera.set_viewport(config.window.width, config.window.height);

        let mut animation = AnimationState::new(
            config.animation.initial_speed,
            config.animation.max_frame_delta(),
        );
        animation.set_animating(!config.animation.start_paused);

        Planetarium {
            system,
            animation,
            views: ViewController::new(),
            camera,
        }
    }

    pub fn system(&self) -> &SolarSystem {
        &self.system
    }

    pub fn animation(&self) -> &AnimationState {
        &self.animation
    }

    pub fn views(&self) -> &ViewController {
        &self.views
    }

    pub fn camera(&self) -> &OrbitCamera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut OrbitCamera {
        &mut self.camera
    }

    pub fn camera_pose(&self) -> CameraPose {
        self.camera.pose()
    }

    /// Advances everything by one frame. The bodies only move while the
    /// animation is playing; the camera keeps moving regardless.
    pub fn tick(&mut self, now: Instant) {
        let dt = self.animation.frame_delta(now);
        if self.animation.is_animating() {
            self.system.advance(dt);
        }

        self.views.update(now, &mut self.camera);
        self.camera.update();
    }

    pub fn request_view(&mut self, view: View, now: Instant) -> ViewTarget {
        info!("Switching to {}", view.display_name());
        self.views
            .request_view(view, &self.system, &mut self.camera, now)
    }

    pub fn reset_view(&mut self, now: Instant) -> ViewTarget {
        self.request_view(View::Space, now)
    }

    /// Returns whether the animation is now playing.
    pub fn toggle_animation(&mut self) -> bool {
        let playing = self.animation.toggle();
        info!("Animation {}", if playing { "playing" } else { "paused" });
        playing
    }

    pub fn set_speed(&mut self, speed: f64) {
        self.animation.set_speed(speed);
        debug!("Speed is now {:.1}x", self.animation.speed());
    }

    /// Nudges the speed up or down by `steps` increments, staying within the
    /// range the controls allow.
    pub fn step_speed(&mut self, steps: i32) -> f64 {
        let speed = self.animation.speed() + steps as f64 * SPEED_STEP;
        // Round off the accumulated float error so the HUD reads cleanly
        let speed = (speed * 10.0).round() / 10.0;
        self.set_speed(speed.clamp(0.0, MAX_SPEED_MULTIPLIER));
        self.animation.speed()
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.camera.set_viewport(width, height);
    }
}
