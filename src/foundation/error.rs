/// Convenience result type used across scan-canvas.
pub type ScanResult<T> = Result<T, ScanError>;

/// Error taxonomy for the ambient layers (documents, color parsing, export).
///
/// The grid renderer itself never fails: malformed numeric input degrades to "draw nothing".
#[derive(thiserror::Error, Debug)]
pub enum ScanError {
    /// Strict parsing failures (colors, numeric literals).
    #[error("parse error: {0}")]
    Parse(String),

    /// Raster or export failures.
    #[error("render error: {0}")]
    Render(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Filesystem errors.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl ScanError {
    /// Build a [`ScanError::Parse`] value.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Build a [`ScanError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`ScanError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
