use nalgebra::Point3;

mod animation;
mod body;
mod system;

pub use animation::AnimationState;
pub use body::{BodyInfo, BodyKind};
pub use system::{BodyAngles, Frame, SolarSystem};

/// Converts a 0xRRGGBB literal to a color with components in [0, 1].
pub fn hex_color(hex: u32) -> Point3<f32> {
    let r = (hex >> 16) & 0xff;
    let g = (hex >> 8) & 0xff;
    let b = hex & 0xff;

    Point3::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
}
