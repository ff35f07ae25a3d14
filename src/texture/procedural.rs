//! Stand-in textures, painted from scratch.
//!
//! Large features (continents, maria, big craters) sit at fixed spots so every
//! run looks about the same; small decorations (clouds, flares, little craters)
//! are scattered with an unseeded random source. The `*_with` variants take the
//! random source explicitly.

use std::f32::consts::{PI, TAU};

use image::RgbaImage;
use rand::Rng;

use super::canvas::{Canvas, Paint};

pub fn sun_surface() -> RgbaImage {
    sun_surface_with(&mut rand::thread_rng())
}

pub fn earth_surface() -> RgbaImage {
    earth_surface_with(&mut rand::thread_rng())
}

pub fn earth_bump() -> RgbaImage {
    relief_with(&mut rand::thread_rng(), 256, 0x88, 100, 10.0, (100.0, 200.0))
}

pub fn earth_normal() -> RgbaImage {
    relief_with(&mut rand::thread_rng(), 256, 0x88, 100, 10.0, (100.0, 200.0))
}

pub fn moon_surface() -> RgbaImage {
    moon_surface_with(&mut rand::thread_rng())
}

pub fn moon_bump() -> RgbaImage {
    relief_with(&mut rand::thread_rng(), 128, 0x80, 50, 5.0, (50.0, 150.0))
}

pub fn sun_surface_with<R: Rng + ?Sized>(rng: &mut R) -> RgbaImage {
    let mut canvas = Canvas::new(256, 256);
    canvas.fill_radial_gradient(
        128.0,
        128.0,
        128.0,
        &[
            (0.0, Paint::hex(0xffff00)),
            (0.3, Paint::hex(0xff8800)),
            (0.6, Paint::hex(0xff4400)),
            (1.0, Paint::hex(0xcc2200)),
        ],
    );

    // Flares
    for _ in 0..50 {
        let x = rng.gen::<f32>() * 256.0;
        let y = rng.gen::<f32>() * 256.0;
        let radius = rng.gen::<f32>() * 10.0 + 2.0;
        let green = 100 + rng.gen_range(0..100) as u8;
        let paint = Paint::rgba(255, green, 0, rng.gen::<f32>() * 0.5);
        canvas.fill_circle(x, y, radius, paint);
    }

    canvas.into_image()
}

struct Blob {
    x: f32,
    y: f32,
    w: f32,
    h: f32,
}

// Very roughly: Africa, Asia, South America, North America, Australia, Antarctica
const CONTINENTS: [Blob; 6] = [
    Blob { x: 80.0, y: 150.0, w: 120.0, h: 80.0 },
    Blob { x: 150.0, y: 100.0, w: 180.0, h: 100.0 },
    Blob { x: 50.0, y: 200.0, w: 100.0, h: 120.0 },
    Blob { x: 30.0, y: 80.0, w: 80.0, h: 100.0 },
    Blob { x: 250.0, y: 300.0, w: 60.0, h: 40.0 },
    Blob { x: 200.0, y: 350.0, w: 80.0, h: 30.0 },
];

pub fn earth_surface_with<R: Rng + ?Sized>(rng: &mut R) -> RgbaImage {
    let mut canvas = Canvas::new(512, 512);
    canvas.fill(Paint::hex(0x0f4c75));

    let land = Paint::hex(0x2d5016);
    let mountains = Paint::hex(0x1a3d0a);
    for continent in CONTINENTS.iter() {
        let rotation = rng.gen::<f32>() * PI;
        canvas.fill_ellipse(
            continent.x,
            continent.y,
            continent.w / 2.0,
            continent.h / 2.0,
            rotation,
            land,
        );

        for _ in 0..5 {
            let x = continent.x + (rng.gen::<f32>() - 0.5) * continent.w * 0.5;
            let y = continent.y + (rng.gen::<f32>() - 0.5) * continent.h * 0.5;
            canvas.fill_circle(x, y, rng.gen::<f32>() * 8.0 + 3.0, mountains);
        }
    }

    // Variation in ocean depth
    let shallows = Paint::rgba(15, 76, 117, 0.3);
    for _ in 0..50 {
        let (x, y) = (rng.gen::<f32>() * 512.0, rng.gen::<f32>() * 512.0);
        canvas.fill_circle(x, y, rng.gen::<f32>() * 20.0 + 5.0, shallows);
    }

    let clouds = Paint::rgba(255, 255, 255, 0.4);
    for _ in 0..60 {
        let (x, y) = (rng.gen::<f32>() * 512.0, rng.gen::<f32>() * 512.0);
        canvas.fill_circle(x, y, rng.gen::<f32>() * 25.0 + 8.0, clouds);
    }

    // Ice caps
    let ice = Paint::rgba(240, 248, 255, 0.8);
    canvas.fill_circle(256.0, 50.0, 40.0, ice);
    canvas.fill_circle(256.0, 462.0, 35.0, ice);

    canvas.into_image()
}

struct Crater {
    x: f32,
    y: f32,
    r: f32,
}

const MARIA: [Crater; 5] = [
    Crater { x: 60.0, y: 80.0, r: 25.0 },
    Crater { x: 120.0, y: 60.0, r: 20.0 },
    Crater { x: 180.0, y: 100.0, r: 30.0 },
    Crater { x: 80.0, y: 150.0, r: 18.0 },
    Crater { x: 150.0, y: 180.0, r: 22.0 },
];

const LARGE_CRATERS: [Crater; 4] = [
    Crater { x: 200.0, y: 50.0, r: 15.0 },
    Crater { x: 40.0, y: 200.0, r: 12.0 },
    Crater { x: 180.0, y: 200.0, r: 18.0 },
    Crater { x: 30.0, y: 60.0, r: 10.0 },
];

pub fn moon_surface_with<R: Rng + ?Sized>(rng: &mut R) -> RgbaImage {
    let mut canvas = Canvas::new(256, 256);
    canvas.fill(Paint::hex(0xc8c8c8));

    for mare in MARIA.iter() {
        canvas.fill_circle(mare.x, mare.y, mare.r, Paint::hex(0xa0a0a0));
    }

    for crater in LARGE_CRATERS.iter() {
        canvas.fill_circle(crater.x, crater.y, crater.r, Paint::hex(0x909090));
        canvas.stroke_circle(crater.x, crater.y, crater.r, 2.0, Paint::hex(0xb0b0b0));
    }

    for _ in 0..80 {
        let (x, y) = (rng.gen::<f32>() * 256.0, rng.gen::<f32>() * 256.0);
        let radius = rng.gen::<f32>() * 6.0 + 1.0;
        let paint = Paint::rgba(144, 144, 144, rng.gen::<f32>() * 0.6 + 0.4);
        canvas.fill_circle(x, y, radius, paint);
    }

    // Bright ray streaks
    let rays = Paint::rgba(220, 220, 220, 0.3);
    for _ in 0..20 {
        let (x, y) = (rng.gen::<f32>() * 256.0, rng.gen::<f32>() * 256.0);
        let angle = rng.gen::<f32>() * TAU;
        let length = rng.gen::<f32>() * 50.0 + 20.0;
        let end = (x + angle.cos() * length, y + angle.sin() * length);
        canvas.stroke_line((x, y), end, 1.0, rays);
    }

    canvas.into_image()
}

/// Grey height map: a flat mid-grey with random spots of higher or lower
/// ground.
fn relief_with<R: Rng + ?Sized>(
    rng: &mut R,
    size: u32,
    base_level: u8,
    spots: usize,
    max_radius: f32,
    brightness: (f32, f32),
) -> RgbaImage {
    let mut canvas = Canvas::new(size, size);
    canvas.fill(Paint::grey(base_level));

    let extent = size as f32;
    let (low, high) = brightness;
    for _ in 0..spots {
        let (x, y) = (rng.gen::<f32>() * extent, rng.gen::<f32>() * extent);
        let radius = rng.gen::<f32>() * max_radius;
        let level = (low + rng.gen::<f32>() * (high - low)) as u8;
        canvas.fill_circle(x, y, radius, Paint::grey(level));
    }

    canvas.into_image()
}

pub fn nebula_with<R: Rng + ?Sized>(rng: &mut R) -> RgbaImage {
    let mut canvas = Canvas::new(512, 512);
    canvas.fill_radial_gradient(
        256.0,
        256.0,
        256.0,
        &[
            (0.0, Paint::rgba(138, 43, 226, 0.8)),
            (0.5, Paint::rgba(75, 0, 130, 0.4)),
            (1.0, Paint::rgba(25, 25, 112, 0.1)),
        ],
    );

    for _ in 0..100 {
        let (x, y) = (rng.gen::<f32>() * 512.0, rng.gen::<f32>() * 512.0);
        let paint = Paint::rgba(255, 255, 255, rng.gen::<f32>() * 0.5);
        canvas.fill_circle(x, y, rng.gen::<f32>() * 3.0, paint);
    }

    canvas.into_image()
}
