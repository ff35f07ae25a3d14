use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use approx::assert_relative_eq;
use image::{Rgba, RgbaImage};

use solar_orrery::camera::{ease_out_cubic, View};
use solar_orrery::config::{Config, SceneConfig, TextureConfig};
use solar_orrery::model::{BodyKind, Frame};
use solar_orrery::planetarium::Planetarium;
use solar_orrery::scene::SceneBuilder;
use solar_orrery::texture::{
    FileAssetSource, HttpAssetSource, RoutingAssetSource, StatusSink, TextureOrigin, TextureProvider,
};

const FRAME: Duration = Duration::from_millis(16);

struct Recorder(Rc<RefCell<Vec<String>>>);

impl StatusSink for Recorder {
    fn report(&mut self, message: &str) {
        self.0.borrow_mut().push(message.to_owned());
    }
}

fn planetarium() -> Planetarium {
    let mut config = Config::default();
    config.animation.max_frame_delta_secs = None;
    Planetarium::new(&config)
}

#[test]
fn scene_loads_from_disk_with_fallbacks() {
    let dir = tempfile::tempdir().unwrap();
    RgbaImage::from_pixel(32, 16, Rgba([10, 80, 160, 255]))
        .save(dir.path().join("earth.png"))
        .unwrap();
    std::fs::write(dir.path().join("moon.png"), b"definitely not a png").unwrap();

    let textures = TextureConfig {
        root: Some(dir.path().to_path_buf()),
        sun: vec!["missing-sun.jpg".to_string()],
        earth: vec![
            "https://example.com/earth.jpg".to_string(),
            "earth.png".to_string(),
        ],
        moon: vec!["moon.png".to_string()],
    };

    let messages = Rc::new(RefCell::new(vec![]));
    let source = FileAssetSource::new(textures.root.clone()).with_chunk_size(128);
    let mut provider =
        TextureProvider::new(Box::new(source)).with_status_sink(Box::new(Recorder(messages.clone())));
    let scene = SceneBuilder::new(textures, &SceneConfig { star_count: 100 }).build(&mut provider);

    let origin = |kind| scene.body(kind).unwrap().material.base.origin.clone();
    assert_eq!(origin(BodyKind::Sun), TextureOrigin::Procedural);
    assert_eq!(origin(BodyKind::Earth), TextureOrigin::Asset("earth.png".to_string()));
    assert_eq!(origin(BodyKind::Moon), TextureOrigin::Procedural);
    assert_eq!(scene.stars.points.len(), 100);

    let messages = messages.borrow();
    assert!(messages.contains(&"✓ Earth texture loaded".to_string()));
    assert!(messages.contains(&"Loading Earth texture: 100%".to_string()));
    assert!(messages.contains(&"⚠ Moon texture failed to load, using fallback texture".to_string()));
    assert_eq!(messages.last().unwrap(), "✓ Solar system loaded");
}

#[test]
fn unreachable_remote_falls_through_to_disk() {
    let dir = tempfile::tempdir().unwrap();
    RgbaImage::from_pixel(16, 8, Rgba([200, 200, 200, 255]))
        .save(dir.path().join("moon.png"))
        .unwrap();

    // Bind and release a port so nothing answers on it
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let remote = format!("http://{}/moon.jpg", listener.local_addr().unwrap());
    drop(listener);

    let source = RoutingAssetSource::new(
        FileAssetSource::new(Some(dir.path().to_path_buf())),
        HttpAssetSource::new(),
    );
    let mut provider = TextureProvider::new(Box::new(source));
    let mut fallback_calls = 0;
    let loaded = provider.load(BodyKind::Moon, &[remote, "moon.png".to_string()], || {
        fallback_calls += 1;
        RgbaImage::new(1, 1)
    });

    assert_eq!(loaded.origin, TextureOrigin::Asset("moon.png".to_string()));
    assert_eq!(loaded.image.dimensions(), (16, 8));
    assert_eq!(fallback_calls, 0);
}

#[test]
fn every_view_lands_on_its_preset() {
    for view in View::ALL {
        let mut p = planetarium();
        let mut now = Instant::now();
        p.tick(now);
        let target = p.request_view(view, now);

        let end = now + Duration::from_millis(2100);
        while now < end {
            now += FRAME;
            p.tick(now);
        }

        // The bodies kept moving, so compare against where the request aimed
        assert!(!p.views().is_transitioning());
        assert_relative_eq!(p.camera_pose().eye, target.pose.eye, epsilon = 1e-3);
        assert_relative_eq!(p.camera_pose().look_at, target.pose.look_at, epsilon = 1e-3);
        assert_eq!(p.views().current_view(), view);
    }
}

#[test]
fn new_request_starts_from_the_camera_mid_flight() {
    let mut p = planetarium();
    let start = Instant::now();
    p.toggle_animation();
    p.tick(start);

    let origin = p.camera_pose();
    let first = p.request_view(View::Sun, start);

    let halfway = start + Duration::from_millis(1000);
    p.tick(halfway);
    let mid_pose = p.camera_pose();
    let expected = origin.lerp(&first.pose, ease_out_cubic(0.5));
    assert_relative_eq!(mid_pose.look_at, expected.look_at, epsilon = 1e-3);

    p.request_view(View::Moon, halfway);
    let transition = p.views().transition().unwrap();
    assert_eq!(*transition.start(), mid_pose);
    assert_relative_eq!(
        transition.target().look_at,
        p.system().world_position(BodyKind::Moon),
        epsilon = 1e-4
    );
}

#[test]
fn moon_stays_with_earth_while_running() {
    let mut p = planetarium();
    p.set_speed(5.0);
    let mut now = Instant::now();
    for _ in 0..600 {
        now += FRAME;
        p.tick(now);

        let system = p.system();
        let earth = system.world_position(BodyKind::Earth);
        assert_relative_eq!(system.frame_origin(Frame::MoonPivot), earth, epsilon = 1e-3);
        assert_relative_eq!(earth.coords.norm(), 60.0, epsilon = 1e-3);
    }
}

#[test]
fn pausing_freezes_bodies_only() {
    let mut p = planetarium();
    let mut now = Instant::now();
    p.tick(now);
    p.toggle_animation();
    p.camera_mut().drag(200.0, 0.0);

    let earth = p.system().world_position(BodyKind::Earth);
    let eye = p.camera_pose().eye;
    for _ in 0..30 {
        now += FRAME;
        p.tick(now);
    }

    assert_eq!(p.system().world_position(BodyKind::Earth), earth);
    assert!((p.camera_pose().eye - eye).norm() > 1e-3);
}
