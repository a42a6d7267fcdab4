//! Error type shared by the fallible setup paths (buffer wrapping, config loading).
//!
//! Drawing and camera updates never fail; they clip and clamp instead.

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A caller-supplied framebuffer does not hold exactly `width * height * 3` bytes.
    #[error("framebuffer holds {actual} bytes, expected {expected}")]
    BufferSize { expected: usize, actual: usize },
    /// The config file could not be read.
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// The config text is not valid JSON for [`crate::ViewerConfig`].
    #[error("invalid config: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
