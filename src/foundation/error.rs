/// Convenience result type used across Thumbforge.
pub type ThumbResult<T> = Result<T, ThumbError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Each variant maps to one user-visible failure category. There is no
/// typography variant because title fitting always produces a layout.
#[derive(thiserror::Error, Debug)]
pub enum ThumbError {
    /// An image could not be read or decoded (missing file, unknown format, corrupt data).
    #[error("image decode error: {0}")]
    ImageDecode(String),

    /// The loader cannot interpret the kind of source (remote URL, malformed data URL, ...).
    #[error("unsupported source: {0}")]
    UnsupportedSource(String),

    /// Invalid configuration or caller-provided parameters.
    #[error("validation error: {0}")]
    Validation(String),

    /// No usable font face could be resolved or registered.
    #[error("font error: {0}")]
    Font(String),

    /// Surface or pixel-buffer invariants were violated while painting.
    #[error("render error: {0}")]
    Render(String),

    /// Output encoding failed.
    #[error("encode error: {0}")]
    Encode(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ThumbError {
    /// Build a [`ThumbError::ImageDecode`] value.
    pub fn image_decode(msg: impl Into<String>) -> Self {
        Self::ImageDecode(msg.into())
    }

    /// Build a [`ThumbError::UnsupportedSource`] value.
    pub fn unsupported_source(msg: impl Into<String>) -> Self {
        Self::UnsupportedSource(msg.into())
    }

    /// Build a [`ThumbError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ThumbError::Font`] value.
    pub fn font(msg: impl Into<String>) -> Self {
        Self::Font(msg.into())
    }

    /// Build a [`ThumbError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`ThumbError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
