use thiserror::Error;

/// Errors reported by the canvas configuration surface
#[derive(Debug, Error)]
pub enum CanvasError {
    #[error("Unrecognized color: {0:?}")]
    InvalidColor(String),

    #[error("Brush width must be a finite number greater than zero, got {0}")]
    InvalidWidth(f32),

    #[error("Failed to parse canvas config: {0}")]
    Config(#[from] serde_json::Error),

    #[error("Failed to read canvas config: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for canvas configuration operations
pub type CanvasResult<T> = Result<T, CanvasError>;
