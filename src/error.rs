/// Reasons a single texture candidate couldn't be turned into an image.
/// These never escape the texture provider; it falls through to the next
/// candidate instead.
#[derive(Debug, thiserror::Error)]
pub enum AssetLoadError {
    #[error("failed to read {location}: {source}")]
    Io {
        location: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to fetch {location}: {source}")]
    Http {
        location: String,
        #[source]
        source: Box<ureq::Error>,
    },

    #[error("no way to fetch {0}")]
    UnsupportedLocation(String),

    #[error("failed to decode {location}: {source}")]
    Decode {
        location: String,
        #[source]
        source: image::ImageError,
    },
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Read(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] ron::error::SpannedError),
}
