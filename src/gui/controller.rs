use std::time::Instant;

use kiss3d::event::{Action, Key, WindowEvent};

use crate::camera::View;
use crate::planetarium::Planetarium;

// Key config, all in one place
const KEY_SPACE_VIEW: Key = Key::Key1;
const KEY_EARTH_VIEW: Key = Key::Key2;
const KEY_MOON_VIEW: Key = Key::Key3;
const KEY_SUN_VIEW: Key = Key::Key4;
const KEY_TOGGLE_PAUSE: Key = Key::Space;
const KEY_RESET_VIEW: Key = Key::R;
const KEY_SPEED_UP: Key = Key::Period;
const KEY_SLOW_DOWN: Key = Key::Comma;

/// What a key press asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    ShowView(View),
    TogglePause,
    ResetView,
    ChangeSpeed(i32),
}

impl Command {
    pub fn from_key(key: Key) -> Option<Command> {
        let command = match key {
            KEY_SPACE_VIEW => Command::ShowView(View::Space),
            KEY_EARTH_VIEW => Command::ShowView(View::Earth),
            KEY_MOON_VIEW => Command::ShowView(View::Moon),
            KEY_SUN_VIEW => Command::ShowView(View::Sun),
            KEY_TOGGLE_PAUSE => Command::TogglePause,
            KEY_RESET_VIEW => Command::ResetView,
            KEY_SPEED_UP => Command::ChangeSpeed(1),
            KEY_SLOW_DOWN => Command::ChangeSpeed(-1),
            _ => return None,
        };
        Some(command)
    }

    pub fn apply(self, planetarium: &mut Planetarium, now: Instant) {
        match self {
            Command::ShowView(view) => {
                planetarium.request_view(view, now);
            }
            Command::TogglePause => {
                planetarium.toggle_animation();
            }
            Command::ResetView => {
                planetarium.reset_view(now);
            }
            Command::ChangeSpeed(steps) => {
                planetarium.step_speed(steps);
            }
        }
    }
}

pub struct Controller {
    fps_counter: FpsCounter,
}

pub struct FpsCounter {
    instant: Instant,
    counter: usize,
    window_size_millis: usize,
    previous_fps: f64,
}

impl FpsCounter {
    pub fn new(window_size_millis: usize) -> Self {
        FpsCounter {
            instant: Instant::now(),
            counter: 0,
            previous_fps: 0.0,
            window_size_millis,
        }
    }

    pub fn value(&self) -> f64 {
        self.previous_fps
    }

    /// Counts one frame drawn at `now`. The reading is refreshed once per
    /// window.
    pub fn increment(&mut self, now: Instant) {
        self.counter += 1;

        let elapsed = now.saturating_duration_since(self.instant);
        if elapsed.as_millis() > self.window_size_millis as u128 {
            self.previous_fps = (1000 * self.counter) as f64 / elapsed.as_millis() as f64;
            self.instant = now;
            self.counter = 0;
        }
    }
}

impl Controller {
    pub fn new() -> Self {
        Controller {
            fps_counter: FpsCounter::new(1000),
        }
    }

    pub fn process_event(&mut self, event: &WindowEvent, planetarium: &mut Planetarium) {
        match *event {
            WindowEvent::Key(key, Action::Press, _) => {
                if let Some(command) = Command::from_key(key) {
                    command.apply(planetarium, Instant::now());
                }
            }
            WindowEvent::FramebufferSize(w, h) => planetarium.resize(w, h),
            _ => {}
        }
    }

    pub fn fps(&self) -> f64 {
        self.fps_counter.value()
    }

    pub fn increment_frame_counter(&mut self) {
        self.fps_counter.increment(Instant::now())
    }
}
