use std::f32::consts::TAU;

use kiss3d::camera::Camera;
use kiss3d::renderer::{LineRenderer, PointRenderer, Renderer};
use nalgebra::Isometry3;

use self::utils::{draw_path, path_iter_parametric};
use crate::scene::{OrbitRing, Starfield};

mod utils;

pub use self::utils::fade;

/// Everything drawn as lines and points rather than meshes. Both renderers
/// forget what they drew after each frame, so this is refilled every step.
pub struct CompoundRenderer {
    line_renderer: LineRenderer,
    point_renderer: PointRenderer,
}

impl CompoundRenderer {
    pub fn new() -> Self {
        CompoundRenderer {
            line_renderer: LineRenderer::new(),
            point_renderer: PointRenderer::new(),
        }
    }

    pub fn draw_stars(&mut self, stars: &Starfield) {
        self.point_renderer.set_point_size(stars.size);
        for pt in stars.points.iter() {
            self.point_renderer.draw_point(*pt, stars.color);
        }
    }

    /// `transform` takes the ring's frame to world space.
    pub fn draw_ring(&mut self, ring: &OrbitRing, transform: Isometry3<f32>) {
        let points = path_iter_parametric(|t| transform * ring.point_at(t), 0.0, TAU, ring.segments);
        draw_path(&mut self.line_renderer, points, fade(ring.color, ring.opacity));
    }
}

impl Renderer for CompoundRenderer {
    fn render(&mut self, pass: usize, camera: &mut dyn Camera) {
        self.point_renderer.render(pass, camera);
        self.line_renderer.render(pass, camera);
    }
}
