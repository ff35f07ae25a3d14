use nalgebra::{Point3, Vector3};

use super::CameraPose;
use crate::model::{BodyKind, SolarSystem};

/// The fixed set of camera presets the user can jump between.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum View {
    Space,
    Earth,
    Moon,
    Sun,
}

/// Where a preset puts the camera eye.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EyePlacement {
    Absolute(Point3<f32>),
    /// Offset from the body's current world position. The camera looks at the
    /// body.
    FromBody(BodyKind, Vector3<f32>),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewPreset {
    pub eye: EyePlacement,
    /// Min and max distance allowed while orbiting freely in this view.
    pub distance_bounds: (f32, f32),
}

/// A preset resolved against the current body positions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTarget {
    pub pose: CameraPose,
    pub distance_bounds: (f32, f32),
}

impl View {
    pub const ALL: [View; 4] = [View::Space, View::Earth, View::Moon, View::Sun];

    pub fn preset(self) -> ViewPreset {
        match self {
            View::Space => ViewPreset {
                eye: EyePlacement::Absolute(Point3::new(0.0, 50.0, 100.0)),
                distance_bounds: (5.0, 500.0),
            },
            // Far enough out that we don't end up inside the body
            View::Earth => ViewPreset {
                eye: EyePlacement::FromBody(BodyKind::Earth, Vector3::new(12.0, 6.0, 12.0)),
                distance_bounds: (8.0, 50.0),
            },
            View::Moon => ViewPreset {
                eye: EyePlacement::FromBody(BodyKind::Moon, Vector3::new(4.0, 2.0, 4.0)),
                distance_bounds: (3.0, 20.0),
            },
            View::Sun => ViewPreset {
                eye: EyePlacement::Absolute(Point3::new(20.0, 8.0, 20.0)),
                distance_bounds: (15.0, 100.0),
            },
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            View::Space => "Space view",
            View::Earth => "Earth view",
            View::Moon => "Moon view",
            View::Sun => "Sun view",
        }
    }

    /// Works out where the camera should end up, given where the bodies are
    /// right now.
    pub fn resolve(self, system: &SolarSystem) -> ViewTarget {
        let preset = self.preset();
        let pose = match preset.eye {
            EyePlacement::Absolute(eye) => CameraPose::new(eye, Point3::origin()),
            EyePlacement::FromBody(kind, offset) => {
                let body = system.world_position(kind);
                CameraPose::new(body + offset, body)
            }
        };

        ViewTarget {
            pose,
            distance_bounds: preset.distance_bounds,
        }
    }
}
