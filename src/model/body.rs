use nalgebra::Point3;

use super::Frame;
use crate::consts;

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum BodyKind {
    Sun,
    Earth,
    Moon,
}

impl BodyKind {
    pub const ALL: [BodyKind; 3] = [BodyKind::Sun, BodyKind::Earth, BodyKind::Moon];

    pub fn name(self) -> &'static str {
        match self {
            BodyKind::Sun => "Sun",
            BodyKind::Earth => "Earth",
            BodyKind::Moon => "Moon",
        }
    }

    /// The frame whose origin is the center of the body, and which spins with it.
    pub fn frame(self) -> Frame {
        match self {
            BodyKind::Sun => Frame::Sun,
            BodyKind::Earth => Frame::Earth,
            BodyKind::Moon => Frame::Moon,
        }
    }

    pub fn info(self) -> BodyInfo {
        match self {
            BodyKind::Sun => BodyInfo {
                kind: self,
                radius: consts::SUN_RADIUS,
                color: super::hex_color(0xffaa00),
            },
            BodyKind::Earth => BodyInfo {
                kind: self,
                radius: consts::EARTH_RADIUS,
                color: super::hex_color(0x2d5016),
            },
            BodyKind::Moon => BodyInfo {
                kind: self,
                radius: consts::MOON_RADIUS,
                color: super::hex_color(0xc8c8c8),
            },
        }
    }
}

// All the immutable info about a body
#[derive(Debug, Clone)]
pub struct BodyInfo {
    pub kind: BodyKind,
    pub radius: f32,
    /// Flat color, used when drawing the body without a texture.
    pub color: Point3<f32>,
}
