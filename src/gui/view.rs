use std::collections::HashMap;

use kiss3d::ncollide3d::procedural::{self, TriMesh};
use kiss3d::scene::SceneNode;
use kiss3d::window::Window;
use nalgebra::{Point2, Point3, Vector3};
use tracing::warn;

use super::renderers::{fade, CompoundRenderer};
use crate::model::{Frame, SolarSystem};
use crate::planetarium::Planetarium;
use crate::scene::{BodyNode, Shell, SolarScene};
use crate::texture::compose;

/// The kiss3d side of the scene: one group node per frame, with the meshes
/// hanging off them. Only the group transforms change after setup.
pub struct SceneView {
    frames: HashMap<Frame, SceneNode>,
    scene: SolarScene,
}

impl SceneView {
    pub fn new(scene: SolarScene, window: &mut Window) -> Self {
        let bg = scene.background;
        window.set_background_color(bg.x, bg.y, bg.z);

        let mut frames: HashMap<Frame, SceneNode> = HashMap::new();
        for frame in Frame::BELOW_ROOT {
            let mut parent = match frame.parent() {
                Some(Frame::Root) | None => window.scene().clone(),
                Some(parent) => frames
                    .get(&parent)
                    .cloned()
                    .unwrap_or_else(|| window.scene().clone()),
            };
            frames.insert(frame, parent.add_group());
        }

        let view = SceneView { frames, scene };
        view.create_nebula(window);
        for body in view.scene.bodies.iter() {
            view.create_body(window, body);
        }
        view
    }

    fn frame_node(&self, window: &Window, frame: Frame) -> SceneNode {
        self.frames
            .get(&frame)
            .cloned()
            .unwrap_or_else(|| window.scene().clone())
    }

    fn create_nebula(&self, window: &Window) {
        let shell = &self.scene.nebula;
        let mut node = self.frame_node(window, shell.frame).add_sphere(shell.radius);
        // Seen from the inside
        node.enable_backface_culling(false);
        match &shell.texture {
            Some(texture) => {
                let mut texture = texture.clone();
                compose::apply_opacity(&mut texture, shell.opacity, self.scene.background);
                apply_texture(&mut node, &texture, "nebula", fade(shell.color, shell.opacity));
            }
            None => {
                let c = fade(shell.color, shell.opacity);
                node.set_color(c.x, c.y, c.z);
            }
        }
    }

    fn create_body(&self, window: &Window, body: &BodyNode) {
        let mut parent = self.frame_node(window, body.frame);

        let mesh = sphere_mesh(body.info.radius, body.segments);
        let mut sphere = parent.add_trimesh(mesh, Vector3::repeat(1.0));
        let texture = body.material.baked();
        apply_texture(&mut sphere, &texture, body.info.kind.name(), body.info.color);

        for shell in body.shells.iter() {
            add_wire_shell(&mut self.frame_node(window, shell.frame), shell);
        }
    }

    /// Moves every frame to where the system says it is.
    pub fn sync(&mut self, system: &SolarSystem) {
        for (frame, node) in self.frames.iter_mut() {
            node.set_local_transformation(system.local_transform(*frame));
        }
    }

    pub fn queue_lines_and_points(&self, renderer: &mut CompoundRenderer, system: &SolarSystem) {
        renderer.draw_stars(&self.scene.stars);
        for ring in self.scene.rings.iter() {
            renderer.draw_ring(ring, system.world_transform(ring.frame));
        }
    }
}

// add_sphere has a fixed tessellation, so build our own
fn sphere_mesh(radius: f32, (around, pole_to_pole): (u32, u32)) -> TriMesh<f32> {
    procedural::sphere(2.0 * radius, around.max(3), pole_to_pole.max(2), true)
}

fn apply_texture(node: &mut SceneNode, texture: &image::RgbaImage, name: &str, flat: Point3<f32>) {
    match compose::encode_png(texture) {
        Ok(bytes) => node.set_texture_from_memory(&bytes, name),
        Err(err) => {
            warn!("Couldn't hand the {} texture to the renderer: {}", name, err);
            node.set_color(flat.x, flat.y, flat.z);
        }
    }
}

// kiss3d can't blend, so translucent shells become a faint wireframe
fn add_wire_shell(parent: &mut SceneNode, shell: &Shell) {
    let mut node = parent.add_sphere(shell.radius);
    let c = fade(shell.color, shell.opacity);
    node.set_color(c.x, c.y, c.z);
    node.set_surface_rendering_activation(false);
    node.set_lines_width(1.0);
    node.enable_backface_culling(!shell.inverted);
}

pub fn draw_hud(window: &mut Window, planetarium: &Planetarium, fps: Option<f64>) {
    let default_font = kiss3d::text::Font::default();
    let text_color = Point3::new(1.0, 1.0, 1.0);
    window.draw_text(
        &status_text(planetarium),
        &Point2::origin(),
        60.0,
        &default_font,
        &text_color,
    );
    if let Some(fps) = fps {
        window.draw_text(
            &format!("FPS: {:.0}", fps),
            // no idea why i have to multiply by 2.0, but there it is
            &Point2::new(window.width() as f32 * 2.0 - 300.0, 0.0),
            60.0,
            &default_font,
            &text_color,
        );
    }
}

fn status_text(planetarium: &Planetarium) -> String {
    let animation = planetarium.animation();
    format!(
        "{}
Speed: {:.1}x
{}
[1-4] views  [Space] play/pause  [R] reset  [,/.] speed",
        planetarium.views().current_view().display_name(),
        animation.speed(),
        if animation.is_animating() { "Playing" } else { "Paused" },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn test_sphere_mesh() {
        let coarse = sphere_mesh(3.0, (32, 32));
        let fine = sphere_mesh(3.0, (64, 64));
        assert!(fine.coords.len() > coarse.coords.len());
        for pt in fine.coords.iter() {
            assert!((pt.coords.norm() - 3.0).abs() < 1e-4, "{:?} is off the sphere", pt);
        }
    }

    #[test]
    fn test_status_text() {
        let mut planetarium = Planetarium::new(&Config::default());
        let text = status_text(&planetarium);
        assert!(text.starts_with("Space view\nSpeed: 1.0x\nPlaying"));

        planetarium.toggle_animation();
        planetarium.step_speed(5);
        let text = status_text(&planetarium);
        assert!(text.contains("Speed: 1.5x"));
        assert!(text.contains("Paused"));
    }
}
