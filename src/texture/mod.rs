use image::RgbaImage;
use tracing::{info, warn};

use crate::model::BodyKind;

mod canvas;
pub mod compose;
pub mod procedural;
mod source;

pub use canvas::{Canvas, Paint};
pub use source::{AssetSource, FileAssetSource, HttpAssetSource, LoadProgress, RoutingAssetSource};

/// Receives human-readable progress lines, e.g. for a loading screen.
pub trait StatusSink {
    fn report(&mut self, message: &str);
}

/// Sends status lines to the log.
pub struct LogSink;

impl StatusSink for LogSink {
    fn report(&mut self, message: &str) {
        info!(target: "status", "{}", message);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextureOrigin {
    Asset(String),
    Procedural,
}

#[derive(Debug, Clone)]
pub struct LoadedTexture {
    pub image: RgbaImage,
    pub origin: TextureOrigin,
}

/// Loads a texture from the first candidate location that works, and paints
/// a procedural one when none do. Loading a texture never fails.
pub struct TextureProvider {
    source: Box<dyn AssetSource>,
    sink: Option<Box<dyn StatusSink>>,
}

impl TextureProvider {
    pub fn new(source: Box<dyn AssetSource>) -> Self {
        TextureProvider { source, sink: None }
    }

    pub fn with_status_sink(mut self, sink: Box<dyn StatusSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn report(&mut self, message: &str) {
        report_to(&mut self.sink, message);
    }

    pub fn load<F>(&mut self, kind: BodyKind, candidates: &[String], fallback: F) -> LoadedTexture
    where
        F: FnOnce() -> RgbaImage,
    {
        let name = format!("{} texture", kind.name());

        for location in candidates {
            report_to(&mut self.sink, &format!("Loading {}...", name));

            let sink = &mut self.sink;
            let mut last_percent = None;
            let mut on_progress = |progress: LoadProgress| {
                let percent = match progress.percent() {
                    Some(p) => p,
                    None => return,
                };
                if last_percent != Some(percent) {
                    last_percent = Some(percent);
                    report_to(sink, &format!("Loading {}: {}%", name, percent));
                }
            };

            match self.source.fetch(location, &mut on_progress) {
                Ok(image) => {
                    info!("Loaded {} from {}", name, location);
                    report_to(&mut self.sink, &format!("✓ {} loaded", name));
                    return LoadedTexture {
                        image: image.into_rgba8(),
                        origin: TextureOrigin::Asset(location.clone()),
                    };
                }
                Err(err) => {
                    warn!("Couldn't load {}: {}", name, err);
                }
            }
        }

        warn!("No usable source for {}, painting one instead", name);
        report_to(
            &mut self.sink,
            &format!("⚠ {} failed to load, using fallback texture", name),
        );
        LoadedTexture {
            image: fallback(),
            origin: TextureOrigin::Procedural,
        }
    }
}

fn report_to(sink: &mut Option<Box<dyn StatusSink>>, message: &str) {
    if let Some(sink) = sink {
        sink.report(message);
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::collections::HashMap;
    use std::rc::Rc;

    use image::{DynamicImage, Rgba};

    use super::*;
    use crate::error::AssetLoadError;

    /// Serves images by location, and remembers what was asked for.
    struct FakeSource {
        images: HashMap<String, (u32, u64)>,
        requests: Rc<RefCell<Vec<String>>>,
    }

    impl AssetSource for FakeSource {
        fn fetch(
            &mut self,
            location: &str,
            progress: &mut dyn FnMut(LoadProgress),
        ) -> Result<DynamicImage, AssetLoadError> {
            self.requests.borrow_mut().push(location.to_owned());
            match self.images.get(location) {
                Some(&(width, total)) => {
                    progress(LoadProgress { loaded: total / 2, total });
                    progress(LoadProgress { loaded: total, total });
                    Ok(DynamicImage::new_rgba8(width, 1))
                }
                None => Err(AssetLoadError::UnsupportedLocation(location.to_owned())),
            }
        }
    }

    struct RecordingSink(Rc<RefCell<Vec<String>>>);

    impl StatusSink for RecordingSink {
        fn report(&mut self, message: &str) {
            self.0.borrow_mut().push(message.to_owned());
        }
    }

    fn candidates(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn fallback_image() -> RgbaImage {
        RgbaImage::from_pixel(2, 2, Rgba([1, 2, 3, 255]))
    }

    #[test]
    fn test_first_success_wins() {
        let requests = Rc::new(RefCell::new(vec![]));
        let images = [("good.jpg".to_string(), (7, 100)), ("also-good.jpg".to_string(), (9, 100))];
        let source = FakeSource {
            images: images.into_iter().collect(),
            requests: requests.clone(),
        };
        let mut provider = TextureProvider::new(Box::new(source));

        let fallback_calls = Cell::new(0);
        let loaded = provider.load(
            BodyKind::Earth,
            &candidates(&["bad-1.jpg", "bad-2.jpg", "good.jpg", "also-good.jpg"]),
            || {
                fallback_calls.set(fallback_calls.get() + 1);
                fallback_image()
            },
        );

        assert_eq!(loaded.origin, TextureOrigin::Asset("good.jpg".to_string()));
        assert_eq!(loaded.image.width(), 7);
        assert_eq!(fallback_calls.get(), 0);
        assert_eq!(*requests.borrow(), candidates(&["bad-1.jpg", "bad-2.jpg", "good.jpg"]));
    }

    #[test]
    fn test_fallback_runs_once_when_everything_fails() {
        let source = FakeSource {
            images: HashMap::new(),
            requests: Rc::new(RefCell::new(vec![])),
        };
        let mut provider = TextureProvider::new(Box::new(source));

        let fallback_calls = Cell::new(0);
        let loaded = provider.load(BodyKind::Moon, &candidates(&["a", "b", "c"]), || {
            fallback_calls.set(fallback_calls.get() + 1);
            fallback_image()
        });

        assert_eq!(loaded.origin, TextureOrigin::Procedural);
        assert_eq!(loaded.image, fallback_image());
        assert_eq!(fallback_calls.get(), 1);
    }

    #[test]
    fn test_no_candidates_goes_straight_to_fallback() {
        let source = FakeSource {
            images: HashMap::new(),
            requests: Rc::new(RefCell::new(vec![])),
        };
        let mut provider = TextureProvider::new(Box::new(source));
        let loaded = provider.load(BodyKind::Sun, &[], fallback_image);
        assert_eq!(loaded.origin, TextureOrigin::Procedural);
    }

    #[test]
    fn test_status_messages() {
        let messages = Rc::new(RefCell::new(vec![]));
        let images = [("sun.jpg".to_string(), (4, 2048))];
        let source = FakeSource {
            images: images.into_iter().collect(),
            requests: Rc::new(RefCell::new(vec![])),
        };
        let mut provider = TextureProvider::new(Box::new(source))
            .with_status_sink(Box::new(RecordingSink(messages.clone())));

        provider.load(BodyKind::Sun, &candidates(&["missing.jpg", "sun.jpg"]), fallback_image);
        assert_eq!(
            *messages.borrow(),
            vec![
                "Loading Sun texture...",
                "Loading Sun texture...",
                "Loading Sun texture: 50%",
                "Loading Sun texture: 100%",
                "✓ Sun texture loaded",
            ]
        );

        messages.borrow_mut().clear();
        provider.load(BodyKind::Moon, &candidates(&["missing.jpg"]), fallback_image);
        assert_eq!(
            *messages.borrow(),
            vec![
                "Loading Moon texture...",
                "⚠ Moon texture failed to load, using fallback texture",
            ]
        );
    }

    #[test]
    fn test_unknown_size_reports_no_percent() {
        let messages = Rc::new(RefCell::new(vec![]));
        let images = [("sun.jpg".to_string(), (4, 0))];
        let source = FakeSource {
            images: images.into_iter().collect(),
            requests: Rc::new(RefCell::new(vec![])),
        };
        let mut provider = TextureProvider::new(Box::new(source))
            .with_status_sink(Box::new(RecordingSink(messages.clone())));

        provider.load(BodyKind::Sun, &candidates(&["sun.jpg"]), fallback_image);
        assert!(messages.borrow().iter().all(|m| !m.contains('%')));
    }
}
