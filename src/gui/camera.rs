use kiss3d::camera::Camera;
use kiss3d::event::{Action, MouseButton, WindowEvent};
use kiss3d::resource::ShaderUniform;
use kiss3d::window::Canvas;
use nalgebra::{Isometry3, Matrix4, Point3, Vector2, Vector3};

use crate::camera::OrbitCamera;

// Mouse handling lives here rather than in the camera itself, so the camera
// stays usable without a window.
impl OrbitCamera {
    fn projection_matrix(&self) -> Matrix4<f32> {
        self.projection().into_inner()
    }

    fn view_matrix(&self) -> Matrix4<f32> {
        self.look_at().to_homogeneous()
    }

    fn look_at(&self) -> Isometry3<f32> {
        Isometry3::look_at_rh(&self.eye(), &self.target(), &Vector3::y())
    }
}

impl Camera for OrbitCamera {
    fn handle_event(&mut self, canvas: &Canvas, event: &WindowEvent) {
        match *event {
            WindowEvent::CursorPos(x, y, _) => {
                let curr_pos = Vector2::new(x as f32, y as f32);

                if canvas.get_mouse_button(MouseButton::Button1) == Action::Press {
                    let dpos = curr_pos - self.last_cursor_pos;
                    self.drag(dpos.x, dpos.y);
                }

                self.last_cursor_pos = curr_pos;
            }
            WindowEvent::Scroll(_, off, _) => self.scroll(off as f32),
            WindowEvent::FramebufferSize(w, h) => self.set_viewport(w, h),
            _ => {}
        }
    }

    fn eye(&self) -> Point3<f32> {
        OrbitCamera::eye(self)
    }

    fn view_transform(&self) -> Isometry3<f32> {
        self.look_at()
    }

    fn transformation(&self) -> Matrix4<f32> {
        self.projection_matrix() * self.view_matrix()
    }

    fn inverse_transformation(&self) -> Matrix4<f32> {
        // Only singular if the eye sits on the target, which the distance
        // clamp rules out
        self.transformation()
            .try_inverse()
            .unwrap_or_else(Matrix4::identity)
    }

    fn clip_planes(&self) -> (f32, f32) {
        let projection = self.projection();
        (projection.znear(), projection.zfar())
    }

    // Damping and transitions are driven by the planetarium tick, so there's
    // nothing to do here.
    fn update(&mut self, _canvas: &Canvas) {}

    fn upload(
        &self,
        _: usize,
        proj: &mut ShaderUniform<Matrix4<f32>>,
        view: &mut ShaderUniform<Matrix4<f32>>,
    ) {
        proj.upload(&self.projection_matrix());
        view.upload(&self.view_matrix());
    }
}
