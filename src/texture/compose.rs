use std::io::Cursor;

use image::{DynamicImage, ImageFormat, RgbaImage};
use nalgebra::Point3;

// kiss3d materials only take a single color texture, so bump maps and
// emissive tints get baked into it ahead of time.

/// Shades `base` as if lit from the top-left over the height map `height`.
/// The height map is sampled nearest-neighbor, so it needn't match in size.
pub fn apply_relief(base: &mut RgbaImage, height: &RgbaImage, strength: f32) {
    let (width, rows) = base.dimensions();
    let (hw, hh) = height.dimensions();
    if width == 0 || rows == 0 || hw == 0 || hh == 0 {
        return;
    }

    // Height in [0, 1], wrapping around the edges like the texture does
    let sample = |x: i64, y: i64| -> f32 {
        let x = x.rem_euclid(width as i64) as u64 * hw as u64 / width as u64;
        let y = y.rem_euclid(rows as i64) as u64 * hh as u64 / rows as u64;
        height.get_pixel(x as u32, y as u32)[0] as f32 / 255.0
    };

    let shades: Vec<f32> = (0..rows as i64)
        .flat_map(|y| (0..width as i64).map(move |x| (x, y)))
        .map(|(x, y)| {
            let slope = (sample(x + 1, y) - sample(x - 1, y)) + (sample(x, y + 1) - sample(x, y - 1));
            (1.0 - strength * slope).max(0.0)
        })
        .collect();

    for (pixel, shade) in base.pixels_mut().zip(shades) {
        for c in 0..3 {
            pixel[c] = (pixel[c] as f32 * shade).round().min(255.0) as u8;
        }
    }
}

/// Adds a constant glow, the way an emissive material term would.
pub fn apply_emissive(base: &mut RgbaImage, color: Point3<f32>, intensity: f32) {
    let glow = [color.x, color.y, color.z].map(|c| c * intensity * 255.0);
    for pixel in base.pixels_mut() {
        for c in 0..3 {
            pixel[c] = (pixel[c] as f32 + glow[c]).round().min(255.0) as u8;
        }
    }
}

/// Flattens a translucent texture over a solid backdrop, scaling its alpha by
/// `opacity`. The result is opaque.
pub fn apply_opacity(base: &mut RgbaImage, opacity: f32, backdrop: Point3<f32>) {
    let opacity = opacity.clamp(0.0, 1.0);
    let backdrop = [backdrop.x, backdrop.y, backdrop.z].map(|c| c * 255.0);
    for pixel in base.pixels_mut() {
        let alpha = pixel[3] as f32 / 255.0 * opacity;
        for c in 0..3 {
            let blended = pixel[c] as f32 * alpha + backdrop[c] * (1.0 - alpha);
            pixel[c] = blended.round().min(255.0) as u8;
        }
        pixel[3] = 255;
    }
}

pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, image::ImageError> {
    let mut bytes = Cursor::new(Vec::new());
    DynamicImage::ImageRgba8(image.clone()).write_to(&mut bytes, ImageFormat::Png)?;
    Ok(bytes.into_inner())
}

#[cfg(test)]
mod tests {
    use image::Rgba;

    use super::*;

    #[test]
    fn test_flat_relief_changes_nothing() {
        let mut base = RgbaImage::from_pixel(16, 16, Rgba([100, 150, 200, 255]));
        let original = base.clone();
        let height = RgbaImage::from_pixel(4, 4, Rgba([128, 128, 128, 255]));
        apply_relief(&mut base, &height, 0.5);
        assert_eq!(base, original);
    }

    #[test]
    fn test_slopes_are_shaded() {
        let mut base = RgbaImage::from_pixel(8, 8, Rgba([100, 100, 100, 255]));
        // A ridge down the middle column
        let mut height = RgbaImage::from_pixel(8, 8, Rgba([0, 0, 0, 255]));
        for y in 0..8 {
            height.put_pixel(4, y, Rgba([255, 255, 255, 255]));
        }
        apply_relief(&mut base, &height, 0.5);

        // Facing the light on one side, away from it on the other
        assert!(base.get_pixel(3, 2)[0] < 100);
        assert!(base.get_pixel(5, 2)[0] > 100);
        assert_eq!(base.get_pixel(0, 2)[0], 100);
        // alpha untouched
        assert_eq!(base.get_pixel(3, 2)[3], 255);
    }

    #[test]
    fn test_emissive_brightens() {
        let mut base = RgbaImage::from_pixel(2, 2, Rgba([250, 0, 0, 255]));
        apply_emissive(&mut base, Point3::new(1.0, 0.5, 0.0), 0.2);
        assert_eq!(base.get_pixel(0, 0), &Rgba([255, 26, 0, 255]));
    }

    #[test]
    fn test_opacity_over_backdrop() {
        let mut base = RgbaImage::from_pixel(1, 1, Rgba([200, 100, 0, 255]));
        apply_opacity(&mut base, 0.5, Point3::new(0.0, 0.0, 1.0));
        assert_eq!(base.get_pixel(0, 0), &Rgba([100, 50, 128, 255]));

        // Fully transparent pixels become the backdrop
        let mut base = RgbaImage::from_pixel(1, 1, Rgba([200, 100, 0, 0]));
        apply_opacity(&mut base, 1.0, Point3::new(0.0, 0.0, 0.0));
        assert_eq!(base.get_pixel(0, 0), &Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn test_png_roundtrip() {
        let image = RgbaImage::from_pixel(3, 5, Rgba([1, 2, 3, 4]));
        let bytes = encode_png(&image).unwrap();
        let decoded = image::load_from_memory(&bytes).unwrap().to_rgba8();
        assert_eq!(decoded, image);
    }
}
