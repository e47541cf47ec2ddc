//! Engine errors.

use crate::palette::PaintColor;
use thiserror::Error;

/// Errors raised by the brush engine.
///
/// Pointer geometry never produces an error; only palette misuse and
/// label image encoding/decoding do.
#[derive(Debug, Error)]
pub enum BrushError {
    #[error("Color {0} is not part of the label palette")]
    UnknownColorKind(PaintColor),
    #[error("Invalid color: {0}")]
    InvalidColor(String),
    #[error("Invalid data URL: {0}")]
    InvalidDataUrl(String),
    #[error("PNG encode error: {0}")]
    Encode(String),
    #[error("PNG decode error: {0}")]
    Decode(String),
}

/// Result type for engine operations.
pub type BrushResult<T> = Result<T, BrushError>;
