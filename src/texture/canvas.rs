use image::{Rgba, RgbaImage};

/// A color plus how much of it to lay down over what's already there.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Paint {
    pub rgb: [u8; 3],
    pub alpha: f32,
}

impl Paint {
    pub fn rgba(r: u8, g: u8, b: u8, alpha: f32) -> Self {
        Paint {
            rgb: [r, g, b],
            alpha: alpha.clamp(0.0, 1.0),
        }
    }

    pub fn hex(hex: u32) -> Self {
        Self::rgba((hex >> 16) as u8, (hex >> 8) as u8, hex as u8, 1.0)
    }

    pub fn grey(level: u8) -> Self {
        Self::rgba(level, level, level, 1.0)
    }

    fn lerp(&self, other: &Paint, t: f32) -> Paint {
        let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Paint {
            rgb: [
                mix(self.rgb[0], other.rgb[0]),
                mix(self.rgb[1], other.rgb[1]),
                mix(self.rgb[2], other.rgb[2]),
            ],
            alpha: self.alpha + (other.alpha - self.alpha) * t,
        }
    }
}

/// Just enough of a 2D drawing API to paint planet surfaces: filled shapes,
/// strokes and radial gradients, all composited source-over.
pub struct Canvas {
    image: RgbaImage,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Canvas {
            image: RgbaImage::new(width, height),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    pub fn fill(&mut self, paint: Paint) {
        for pixel in self.image.pixels_mut() {
            blend(pixel, paint);
        }
    }

    pub fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, paint: Paint) {
        self.fill_ellipse(cx, cy, radius, radius, 0.0, paint);
    }

    /// Fills an ellipse with semi-axes `rx` and `ry`, rotated by `rotation`
    /// radians.
    pub fn fill_ellipse(&mut self, cx: f32, cy: f32, rx: f32, ry: f32, rotation: f32, paint: Paint) {
        if rx <= 0.0 || ry <= 0.0 {
            return;
        }
        let (sin, cos) = rotation.sin_cos();
        let reach = rx.max(ry);
        self.fill_where(cx - reach, cy - reach, cx + reach, cy + reach, paint, |x, y| {
            let (dx, dy) = (x - cx, y - cy);
            let u = dx * cos + dy * sin;
            let v = -dx * sin + dy * cos;
            (u / rx).powi(2) + (v / ry).powi(2) <= 1.0
        });
    }

    pub fn stroke_circle(&mut self, cx: f32, cy: f32, radius: f32, line_width: f32, paint: Paint) {
        let half = line_width / 2.0;
        let reach = radius + half;
        self.fill_where(cx - reach, cy - reach, cx + reach, cy + reach, paint, |x, y| {
            let d = ((x - cx).powi(2) + (y - cy).powi(2)).sqrt();
            (d - radius).abs() <= half
        });
    }

    pub fn stroke_line(&mut self, from: (f32, f32), to: (f32, f32), line_width: f32, paint: Paint) {
        let half = (line_width / 2.0).max(0.5);
        let (x0, y0) = from;
        let (x1, y1) = to;
        let (dx, dy) = (x1 - x0, y1 - y0);
        let len_sq = dx * dx + dy * dy;

        self.fill_where(
            x0.min(x1) - half,
            y0.min(y1) - half,
            x0.max(x1) + half,
            y0.max(y1) + half,
            paint,
            |x, y| {
                // distance from the segment
                let t = if len_sq > 0.0 {
                    (((x - x0) * dx + (y - y0) * dy) / len_sq).clamp(0.0, 1.0)
                } else {
                    0.0
                };
                let (px, py) = (x0 + t * dx, y0 + t * dy);
                (x - px).powi(2) + (y - py).powi(2) <= half * half
            },
        );
    }

    /// Paints the whole canvas with a radial gradient centered at (cx, cy).
    /// `stops` are (offset in [0, 1], paint) pairs in ascending order.
    pub fn fill_radial_gradient(&mut self, cx: f32, cy: f32, radius: f32, stops: &[(f32, Paint)]) {
        if stops.is_empty() {
            return;
        }
        for (x, y, pixel) in self.image.enumerate_pixels_mut() {
            let d = ((x as f32 + 0.5 - cx).powi(2) + (y as f32 + 0.5 - cy).powi(2)).sqrt();
            let t = if radius > 0.0 { d / radius } else { 1.0 };
            blend(pixel, gradient_at(stops, t));
        }
    }

    fn fill_where<F>(&mut self, x_min: f32, y_min: f32, x_max: f32, y_max: f32, paint: Paint, inside: F)
    where
        F: Fn(f32, f32) -> bool,
    {
        let (width, height) = (self.width() as f32, self.height() as f32);
        let x_start = x_min.floor().clamp(0.0, width) as u32;
        let x_end = x_max.ceil().clamp(0.0, width) as u32;
        let y_start = y_min.floor().clamp(0.0, height) as u32;
        let y_end = y_max.ceil().clamp(0.0, height) as u32;

        for y in y_start..y_end {
            for x in x_start..x_end {
                // sample at the pixel center
                if inside(x as f32 + 0.5, y as f32 + 0.5) {
                    blend(self.image.get_pixel_mut(x, y), paint);
                }
            }
        }
    }
}

fn gradient_at(stops: &[(f32, Paint)], t: f32) -> Paint {
    let (first_offset, first) = stops[0];
    if t <= first_offset {
        return first;
    }
    for pair in stops.windows(2) {
        let (a_offset, a) = pair[0];
        let (b_offset, b) = pair[1];
        if t <= b_offset {
            let span = b_offset - a_offset;
            let local = if span > 0.0 { (t - a_offset) / span } else { 1.0 };
            return a.lerp(&b, local);
        }
    }
    stops[stops.len() - 1].1
}

fn blend(pixel: &mut Rgba<u8>, paint: Paint) {
    let a = paint.alpha;
    if a <= 0.0 {
        return;
    }
    let dst_alpha = pixel[3] as f32 / 255.0;
    for c in 0..3 {
        let src = paint.rgb[c] as f32;
        let dst = pixel[c] as f32;
        pixel[c] = (src * a + dst * (1.0 - a)).round() as u8;
    }
    let out_alpha = a + dst_alpha * (1.0 - a);
    pixel[3] = (out_alpha * 255.0).round() as u8;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_and_blend() {
        let mut canvas = Canvas::new(4, 4);
        canvas.fill(Paint::hex(0x000000));
        canvas.fill(Paint::rgba(255, 255, 255, 0.5));
        let image = canvas.into_image();
        assert_eq!(image.get_pixel(0, 0), &Rgba([128, 128, 128, 255]));
    }

    #[test]
    fn test_circle_coverage() {
        let mut canvas = Canvas::new(32, 32);
        canvas.fill(Paint::hex(0x000000));
        canvas.fill_circle(16.0, 16.0, 4.0, Paint::hex(0xff0000));
        let image = canvas.into_image();

        assert_eq!(image.get_pixel(16, 16), &Rgba([255, 0, 0, 255]));
        assert_eq!(image.get_pixel(16, 25), &Rgba([0, 0, 0, 255]));
        assert_eq!(image.get_pixel(0, 0), &Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn test_shapes_are_clipped() {
        // Shapes hanging off the edge shouldn't panic
        let mut canvas = Canvas::new(8, 8);
        canvas.fill_circle(-2.0, 9.0, 5.0, Paint::hex(0xffffff));
        canvas.stroke_line((-10.0, -10.0), (20.0, 20.0), 2.0, Paint::hex(0xffffff));
        canvas.fill_ellipse(7.0, 0.0, 30.0, 2.0, 1.0, Paint::hex(0xffffff));
        canvas.stroke_circle(4.0, 4.0, 10.0, 2.0, Paint::hex(0xffffff));
    }

    #[test]
    fn test_radial_gradient() {
        let mut canvas = Canvas::new(64, 64);
        let stops = [(0.0, Paint::hex(0xffffff)), (1.0, Paint::hex(0x000000))];
        canvas.fill_radial_gradient(32.0, 32.0, 32.0, &stops);
        let image = canvas.into_image();

        let center = image.get_pixel(32, 32)[0];
        let edge = image.get_pixel(63, 32)[0];
        let corner = image.get_pixel(0, 0)[0];
        assert!(center > 240);
        assert!(center > edge);
        // past the last stop
        assert_eq!(corner, 0);
    }
}
