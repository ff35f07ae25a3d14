use std::f32::consts::PI;

use nalgebra::{Perspective3, Point3, Vector2, Vector3};

use super::CameraPose;

const MIN_RADIUS: f32 = 1e-4;

// This camera is a close cousin of ArcBall. It can be click-and-dragged to
// adjust its pitch and yaw around a target point, and scrolled to zoom in and
// out. Unlike ArcBall, rotation is damped: a drag queues up some rotation,
// and each update applies a fraction of what's left, so the camera glides to
// a stop.
//
// The y-axis is up. Angles follow the usual spherical convention around y:
// phi is measured from +y, theta is measured around y starting from +z.
pub struct OrbitCamera {
    // -- position --
    target: Point3<f32>,
    offset: Vector3<f32>, // eye - target
    // -- perspective --
    width: u32,
    height: u32,
    fovy: f32,
    znear: f32,
    zfar: f32,
    // -- interaction --
    pub(crate) last_cursor_pos: Vector2<f32>,
    pending_theta: f32,
    pending_phi: f32,
    // -- knobs to fiddle with --
    rotate_step: f32,
    scroll_ratio: f32,
    damping_factor: f32,
    phi_limit: f32,
    distance_limits: (f32, f32),
}

impl OrbitCamera {
    pub fn new(pose: CameraPose, fovy: f32, damping_factor: f32) -> Self {
        OrbitCamera {
            target: pose.look_at,
            offset: pose.eye - pose.look_at,
            width: 800,
            height: 600,
            fovy,
            znear: 0.1,
            zfar: 10000.0,
            last_cursor_pos: Vector2::zeros(),
            pending_theta: 0.0,
            pending_phi: 0.0,
            rotate_step: 0.005,
            scroll_ratio: 1.1,
            damping_factor: damping_factor.clamp(0.0, 1.0),
            phi_limit: 0.001,
            distance_limits: (0.0, f32::INFINITY),
        }
    }

    pub fn pose(&self) -> CameraPose {
        CameraPose::new(self.target + self.offset, self.target)
    }

    /// Puts the camera exactly at `pose`, dropping any rotation still queued
    /// up from dragging.
    pub fn set_pose(&mut self, pose: CameraPose) {
        self.target = pose.look_at;
        self.offset = pose.eye - pose.look_at;
        self.pending_theta = 0.0;
        self.pending_phi = 0.0;
    }

    pub fn set_distance_bounds(&mut self, min_dist: f32, max_dist: f32) {
        self.distance_limits = (min_dist.min(max_dist), max_dist.max(min_dist));
    }

    pub fn distance_bounds(&self) -> (f32, f32) {
        self.distance_limits
    }

    pub fn distance(&self) -> f32 {
        self.offset.norm()
    }

    pub fn eye(&self) -> Point3<f32> {
        self.target + self.offset
    }

    pub fn target(&self) -> Point3<f32> {
        self.target
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn fovy(&self) -> f32 {
        self.fovy
    }

    pub fn set_viewport(&mut self, width: u32, height: u32) {
        // A minimized window reports 0x0; keep the old aspect ratio instead
        if width == 0 || height == 0 {
            return;
        }
        self.width = width;
        self.height = height;
    }

    pub fn projection(&self) -> Perspective3<f32> {
        Perspective3::new(
            self.width as f32 / self.height as f32,
            self.fovy,
            self.znear,
            self.zfar,
        )
    }

    /// Queues up rotation, which `update` will apply gradually.
    pub fn drag(&mut self, dx: f32, dy: f32) {
        self.pending_theta -= dx * self.rotate_step;
        self.pending_phi -= dy * self.rotate_step;
    }

    pub fn scroll(&mut self, amount: f32) {
        // scroll up == zoom in
        if amount > 0.0 {
            self.zoom(self.scroll_ratio.recip());
        } else if amount < 0.0 {
            self.zoom(self.scroll_ratio);
        }
    }

    pub fn zoom(&mut self, factor: f32) {
        let radius = self.clamp_radius(self.distance() * factor);
        self.set_radius(radius);
    }

    /// Applies one frame's worth of damped rotation, and keeps the distance
    /// inside the current bounds.
    pub fn update(&mut self) {
        let dtheta = self.pending_theta * self.damping_factor;
        let dphi = self.pending_phi * self.damping_factor;
        self.pending_theta -= dtheta;
        self.pending_phi -= dphi;
        if self.is_settled() {
            self.pending_theta = 0.0;
            self.pending_phi = 0.0;
        }

        if dtheta != 0.0 || dphi != 0.0 {
            self.rotate(dtheta, dphi);
        }

        let radius = self.distance();
        let clamped = self.clamp_radius(radius);
        if clamped != radius {
            self.set_radius(clamped);
        }
    }

    pub fn is_settled(&self) -> bool {
        const EPSILON: f32 = 1e-6;
        self.pending_theta.abs() < EPSILON && self.pending_phi.abs() < EPSILON
    }

    fn rotate(&mut self, dtheta: f32, dphi: f32) {
        let radius = self.distance().max(MIN_RADIUS);
        let theta = self.offset.x.atan2(self.offset.z) + dtheta;
        let phi = (self.offset.y / radius).clamp(-1.0, 1.0).acos() + dphi;
        let phi = phi.clamp(self.phi_limit, PI - self.phi_limit);

        self.offset = Vector3::new(
            radius * phi.sin() * theta.sin(),
            radius * phi.cos(),
            radius * phi.sin() * theta.cos(),
        );
    }

    fn clamp_radius(&self, radius: f32) -> f32 {
        let (min, max) = self.distance_limits;
        radius.clamp(min, max).max(MIN_RADIUS)
    }

    fn set_radius(&mut self, radius: f32) {
        let current = self.distance();
        if current < MIN_RADIUS {
            // No direction to scale along; back off along +z
            self.offset = Vector3::z() * radius;
        } else {
            self.offset *= radius / current;
        }
    }
}
