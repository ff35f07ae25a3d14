use nalgebra::Point3;

mod controller;
mod orbit;
mod transition;
mod view;

pub use controller::ViewController;
pub use orbit::OrbitCamera;
pub use transition::{ease_out_cubic, CameraTransition};
pub use view::{EyePlacement, View, ViewPreset, ViewTarget};

/// Where the camera is, and what it's looking at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub eye: Point3<f32>,
    pub look_at: Point3<f32>,
}

impl CameraPose {
    pub fn new(eye: Point3<f32>, look_at: Point3<f32>) -> Self {
        CameraPose { eye, look_at }
    }

    pub fn distance(&self) -> f32 {
        (self.eye - self.look_at).norm()
    }

    pub fn lerp(&self, other: &CameraPose, t: f32) -> CameraPose {
        CameraPose {
            eye: Point3::from(self.eye.coords.lerp(&other.eye.coords, t)),
            look_at: Point3::from(self.look_at.coords.lerp(&other.look_at.coords, t)),
        }
    }
}
