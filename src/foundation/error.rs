/// Result alias used across the crate.
pub type SpriteResult<T> = Result<T, SpriteError>;

/// Failures raised by the project model, config loading and export.
#[derive(thiserror::Error, Debug)]
pub enum SpriteError {
    /// Input outside its allowed range or an unknown id.
    #[error("validation error: {0}")]
    Validation(String),

    /// Lifecycle step requested from the wrong animation stage.
    #[error("illegal transition: {0}")]
    Transition(String),

    /// Nothing to pack, or no sheet size fits.
    #[error("export error: {0}")]
    Export(String),

    /// Malformed JSON config or frames file.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Sprite decoding or atlas encoding failed.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// Anything else, usually I/O with context attached.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SpriteError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn transition(msg: impl Into<String>) -> Self {
        Self::Transition(msg.into())
    }

    pub fn export(msg: impl Into<String>) -> Self {
        Self::Export(msg.into())
    }

    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
