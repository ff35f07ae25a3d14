use nalgebra::{Isometry3, Point3, Translation3, UnitQuaternion, Vector3};

use std::f64::consts::TAU;

use super::body::BodyKind;
use crate::consts;

/// Transform nodes in the scene. Every frame except `Root` has exactly one
/// parent, and its local transform takes its own coordinates to its parent's.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum Frame {
    Root,
    Sun,
    EarthPivot,
    /// Earth's position on its orbit, tilted by the axial tilt but not spinning.
    EarthAxis,
    Earth,
    MoonPivot,
    Moon,
}

impl Frame {
    /// Every frame below the root, parents before children.
    pub const BELOW_ROOT: [Frame; 6] = [
        Frame::Sun,
        Frame::EarthPivot,
        Frame::EarthAxis,
        Frame::Earth,
        Frame::MoonPivot,
        Frame::Moon,
    ];

    pub fn parent(self) -> Option<Frame> {
        match self {
            Frame::Root => None,
            Frame::Sun | Frame::EarthPivot => Some(Frame::Root),
            Frame::EarthAxis => Some(Frame::EarthPivot),
            Frame::Earth | Frame::MoonPivot => Some(Frame::EarthAxis),
            Frame::Moon => Some(Frame::MoonPivot),
        }
    }
}

/// Rotation angles of every pivot and body, in radians. All of them are kept
/// in [0, 2pi).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BodyAngles {
    pub earth_orbit: f64,
    pub earth_spin: f64,
    pub moon_orbit: f64,
    pub moon_spin: f64,
    pub sun_spin: f64,
}

#[derive(Debug, Clone)]
pub struct SolarSystem {
    angles: BodyAngles,
    axial_tilt: f32,
}

impl Default for SolarSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl SolarSystem {
    pub fn new() -> Self {
        SolarSystem {
            angles: BodyAngles::default(),
            axial_tilt: consts::EARTH_AXIAL_TILT_DEGREES.to_radians(),
        }
    }

    pub fn angles(&self) -> &BodyAngles {
        &self.angles
    }

    /// Advances every angle by its fixed rate. `dt` is already scaled by the
    /// speed multiplier.
    pub fn advance(&mut self, dt: f64) {
        let angles = &mut self.angles;
        angles.earth_orbit = wrap_angle(angles.earth_orbit + dt * consts::EARTH_ORBIT_RATE);
        angles.earth_spin = wrap_angle(angles.earth_spin + dt * consts::EARTH_SPIN_RATE);
        angles.moon_orbit = wrap_angle(angles.moon_orbit + dt * consts::MOON_ORBIT_RATE);
        angles.moon_spin = wrap_angle(angles.moon_spin + dt * consts::MOON_SPIN_RATE);
        angles.sun_spin = wrap_angle(angles.sun_spin + dt * consts::SUN_SPIN_RATE);
    }

    /// Transform taking `frame` coordinates to the coordinates of its parent.
    pub fn local_transform(&self, frame: Frame) -> Isometry3<f32> {
        let about_y = |angle: f64| UnitQuaternion::from_axis_angle(&Vector3::y_axis(), angle as f32);

        match frame {
            Frame::Root => Isometry3::identity(),
            Frame::Sun => Isometry3::from_parts(Translation3::identity(), about_y(self.angles.sun_spin)),
            Frame::EarthPivot => {
                Isometry3::from_parts(Translation3::identity(), about_y(self.angles.earth_orbit))
            }
            Frame::EarthAxis => Isometry3::from_parts(
                Translation3::new(consts::EARTH_ORBIT_RADIUS, 0.0, 0.0),
                UnitQuaternion::from_axis_angle(&Vector3::z_axis(), self.axial_tilt),
            ),
            Frame::Earth => Isometry3::from_parts(Translation3::identity(), about_y(self.angles.earth_spin)),
            Frame::MoonPivot => {
                Isometry3::from_parts(Translation3::identity(), about_y(self.angles.moon_orbit))
            }
            Frame::Moon => Isometry3::from_parts(
                Translation3::new(consts::MOON_ORBIT_RADIUS, 0.0, 0.0),
                about_y(self.angles.moon_spin),
            ),
        }
    }

    /// Transform taking `frame` coordinates to world (root) coordinates.
    pub fn world_transform(&self, frame: Frame) -> Isometry3<f32> {
        let mut transform = self.local_transform(frame);
        let mut current = frame;
        while let Some(parent) = current.parent() {
            transform = self.local_transform(parent) * transform;
            current = parent;
        }
        transform
    }

    /// Transform taking `src` coordinates to `dst` coordinates.
    pub fn convert_frames(&self, src: Frame, dst: Frame) -> Isometry3<f32> {
        self.world_transform(dst).inverse() * self.world_transform(src)
    }

    pub fn world_position(&self, kind: BodyKind) -> Point3<f32> {
        self.frame_origin(kind.frame())
    }

    pub fn frame_origin(&self, frame: Frame) -> Point3<f32> {
        self.world_transform(frame) * Point3::origin()
    }
}

fn wrap_angle(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}
