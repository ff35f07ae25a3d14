use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;

use image::DynamicImage;
use tracing::debug;

use crate::error::AssetLoadError;

const DEFAULT_CHUNK_SIZE: usize = 64 * 1024;
const REMOTE_TIMEOUT: Duration = Duration::from_secs(30);

/// How far along a fetch is. `total` is zero when the size isn't known.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadProgress {
    pub loaded: u64,
    pub total: u64,
}

impl LoadProgress {
    pub fn percent(&self) -> Option<u32> {
        if self.total == 0 {
            return None;
        }
        let ratio = self.loaded as f64 / self.total as f64;
        Some((ratio * 100.0).round().min(100.0) as u32)
    }
}

/// Something that can fetch and decode an image, given a location string.
pub trait AssetSource {
    fn fetch(
        &mut self,
        location: &str,
        progress: &mut dyn FnMut(LoadProgress),
    ) -> Result<DynamicImage, AssetLoadError>;
}

/// Loads images from the local filesystem. Relative paths are resolved
/// against `root`, if one is given.
pub struct FileAssetSource {
    root: Option<PathBuf>,
    chunk_size: usize,
}

impl FileAssetSource {
    pub fn new(root: Option<PathBuf>) -> Self {
        FileAssetSource {
            root,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    fn resolve(&self, location: &str) -> Result<PathBuf, AssetLoadError> {
        if is_remote(location) {
            return Err(AssetLoadError::UnsupportedLocation(location.to_owned()));
        }

        let path = Path::new(location.strip_prefix("file://").unwrap_or(location));
        match &self.root {
            Some(root) if path.is_relative() => Ok(root.join(path)),
            _ => Ok(path.to_path_buf()),
        }
    }
}

impl AssetSource for FileAssetSource {
    fn fetch(
        &mut self,
        location: &str,
        progress: &mut dyn FnMut(LoadProgress),
    ) -> Result<DynamicImage, AssetLoadError> {
        let path = self.resolve(location)?;
        let io_error = |source| AssetLoadError::Io {
            location: location.to_owned(),
            source,
        };

        let mut file = File::open(&path).map_err(io_error)?;
        let total = file.metadata().map_err(io_error)?.len();
        let bytes = read_chunked(&mut file, total, self.chunk_size, progress).map_err(io_error)?;
        decode(location, &bytes)
    }
}

/// Downloads images over http(s).
pub struct HttpAssetSource {
    agent: ureq::Agent,
    chunk_size: usize,
}

impl HttpAssetSource {
    pub fn new() -> Self {
        HttpAssetSource {
            agent: ureq::AgentBuilder::new().timeout(REMOTE_TIMEOUT).build(),
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }
}

impl Default for HttpAssetSource {
    fn default() -> Self {
        Self::new()
    }
}

impl AssetSource for HttpAssetSource {
    fn fetch(
        &mut self,
        location: &str,
        progress: &mut dyn FnMut(LoadProgress),
    ) -> Result<DynamicImage, AssetLoadError> {
        if !is_remote(location) {
            return Err(AssetLoadError::UnsupportedLocation(location.to_owned()));
        }

        let response = self
            .agent
            .get(location)
            .call()
            .map_err(|source| AssetLoadError::Http {
                location: location.to_owned(),
                source: Box::new(source),
            })?;

        // Without a length there's no percentage to report
        let total = response
            .header("Content-Length")
            .and_then(|len| len.parse().ok())
            .unwrap_or(0);
        debug!("Fetching {} ({} bytes)", location, total);

        let mut reader = response.into_reader();
        let bytes = read_chunked(&mut reader, total, self.chunk_size, progress).map_err(|source| {
            AssetLoadError::Io {
                location: location.to_owned(),
                source,
            }
        })?;
        decode(location, &bytes)
    }
}

/// Sends http(s) locations to the network and everything else to disk.
pub struct RoutingAssetSource {
    files: FileAssetSource,
    http: HttpAssetSource,
}

impl RoutingAssetSource {
    pub fn new(files: FileAssetSource, http: HttpAssetSource) -> Self {
        RoutingAssetSource { files, http }
    }
}

impl AssetSource for RoutingAssetSource {
    fn fetch(
        &mut self,
        location: &str,
        progress: &mut dyn FnMut(LoadProgress),
    ) -> Result<DynamicImage, AssetLoadError> {
        if is_remote(location) {
            self.http.fetch(location, progress)
        } else {
            self.files.fetch(location, progress)
        }
    }
}

fn is_remote(location: &str) -> bool {
    location.starts_with("http://") || location.starts_with("https://")
}

/// Reads `reader` to the end in `chunk_size` pieces, reporting after each one.
fn read_chunked(
    reader: &mut dyn Read,
    total: u64,
    chunk_size: usize,
    progress: &mut dyn FnMut(LoadProgress),
) -> std::io::Result<Vec<u8>> {
    // Don't trust a remote length with the whole allocation
    let mut bytes = Vec::with_capacity(total.min(64 * 1024 * 1024) as usize);
    let mut chunk = vec![0; chunk_size];
    loop {
        let n = reader.read(&mut chunk)?;
        if n == 0 {
            break;
        }
        bytes.extend_from_slice(&chunk[..n]);
        progress(LoadProgress {
            loaded: bytes.len() as u64,
            total,
        });
    }
    Ok(bytes)
}

fn decode(location: &str, bytes: &[u8]) -> Result<DynamicImage, AssetLoadError> {
    image::load_from_memory(bytes).map_err(|source| AssetLoadError::Decode {
        location: location.to_owned(),
        source,
    })
}
