use std::time::Instant;

use kiss3d::camera::Camera;
use kiss3d::event::EventManager;
use kiss3d::planar_camera::PlanarCamera;
use kiss3d::post_processing::PostProcessingEffect;
use kiss3d::renderer::Renderer;
use kiss3d::window::{State, Window};

use self::controller::Controller;
use self::renderers::CompoundRenderer;
use self::view::SceneView;
use crate::planetarium::Planetarium;
use crate::scene::SolarScene;

mod camera;
mod controller;
mod renderers;
mod view;

pub struct Simulation {
    planetarium: Planetarium,
    view: SceneView,
    controller: Controller,
    renderer: CompoundRenderer,
    show_fps: bool,
}

impl Simulation {
    pub fn new(planetarium: Planetarium, scene: SolarScene, window: &mut Window, show_fps: bool) -> Self {
        let mut view = SceneView::new(scene, window);
        view.sync(planetarium.system());

        Self {
            planetarium,
            view,
            controller: Controller::new(),
            renderer: CompoundRenderer::new(),
            show_fps,
        }
    }

    fn process_user_input(&mut self, mut events: EventManager) {
        for event in events.iter() {
            self.controller
                .process_event(&event.value, &mut self.planetarium);
        }
    }
}

impl State for Simulation {
    fn cameras_and_effect_and_renderer(
        &mut self,
    ) -> (
        Option<&mut dyn Camera>,
        Option<&mut dyn PlanarCamera>,
        Option<&mut dyn Renderer>,
        Option<&mut dyn PostProcessingEffect>,
    ) {
        (
            Some(self.planetarium.camera_mut()),
            None,
            Some(&mut self.renderer),
            None,
        )
    }

    fn step(&mut self, window: &mut Window) {
        self.process_user_input(window.events());

        self.planetarium.tick(Instant::now());
        self.view.sync(self.planetarium.system());
        self.view
            .queue_lines_and_points(&mut self.renderer, self.planetarium.system());

        let fps = self.show_fps.then(|| self.controller.fps());
        view::draw_hud(window, &self.planetarium, fps);
        self.controller.increment_frame_counter();
    }
}
