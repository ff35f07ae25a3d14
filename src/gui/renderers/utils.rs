use kiss3d::renderer::LineRenderer;
use nalgebra::Point3;

/// Samples `f` at `num_segments + 1` evenly spaced parameters from `t_start`
/// to `t_end`, both ends included.
pub fn path_iter_parametric<F, S>(
    f: F,
    t_start: S,
    t_end: S,
    num_segments: usize,
) -> impl Iterator<Item = Point3<f32>>
where
    F: Fn(S) -> Point3<f32>,
    S: nalgebra::RealField + simba::scalar::SupersetOf<usize> + Copy,
{
    // Zero segments would divide by zero below
    let num_segments = num_segments.max(1);
    let convert = nalgebra::convert::<usize, S>;
    (0..=num_segments)
        .map(move |i| convert(i) / convert(num_segments))
        .map(move |u| t_start + u * (t_end - t_start))
        .map(f)
}

/// Joins consecutive points with line segments.
pub fn draw_path<I: IntoIterator<Item = Point3<f32>>>(
    line_renderer: &mut LineRenderer,
    points: I,
    color: Point3<f32>,
) {
    let mut points = points.into_iter();
    let mut prev_pt = match points.next() {
        Some(pt) => pt,
        None => return,
    };
    for pt in points {
        line_renderer.draw_line(prev_pt, pt, color);
        prev_pt = pt;
    }
}

/// Scales a color towards black, which is how translucency looks against a
/// dark sky.
pub fn fade(color: Point3<f32>, opacity: f32) -> Point3<f32> {
    color * opacity.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use std::f32::consts::TAU;

    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn test_closed_loop_ends_where_it_starts() {
        let circle = |t: f32| Point3::new(t.cos(), 0.0, t.sin());
        let points: Vec<_> = path_iter_parametric(circle, 0.0, TAU, 32).collect();
        assert_eq!(points.len(), 33);
        assert_relative_eq!(points[0], points[32], epsilon = 1e-5);
        assert_relative_eq!(points[8], Point3::new(0.0, 0.0, 1.0), epsilon = 1e-5);
    }

    #[test]
    fn test_zero_segments() {
        let points: Vec<_> = path_iter_parametric(|t: f32| Point3::new(t, 0.0, 0.0), 0.0, 1.0, 0).collect();
        assert_eq!(points, vec![Point3::origin(), Point3::new(1.0, 0.0, 0.0)]);
    }

    #[test]
    fn test_fade() {
        assert_relative_eq!(fade(Point3::new(1.0, 0.5, 0.0), 0.2), Point3::new(0.2, 0.1, 0.0));
        assert_relative_eq!(fade(Point3::new(1.0, 1.0, 1.0), 3.0), Point3::new(1.0, 1.0, 1.0));
    }
}
