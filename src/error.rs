use thiserror::Error;

/// Top-level error type for the duct engine.
///
/// Geometry, snapping and takeoff are total functions; only session commands
/// and configuration validation can fail.
#[derive(Debug, Error)]
pub enum DuctError {
    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors raised by editing-session commands.
#[derive(Debug, Error, PartialEq)]
pub enum SessionError {
    #[error("part not found: {0}")]
    PartNotFound(String),

    #[error("dimension not found: index {0}")]
    DimensionNotFound(usize),

    #[error("{command} requires a {expected} part, got {actual}")]
    WrongKind {
        command: &'static str,
        expected: &'static str,
        actual: &'static str,
    },

    #[error("nothing to undo")]
    NothingToUndo,

    #[error("nothing to redo")]
    NothingToRedo,

    #[error("no drag in progress")]
    NoActiveDrag,

    #[error("no part is selected")]
    NothingSelected,

    #[error("dimension {0} does not span the two ends of one straight")]
    NotAStraightSpan(usize),

    #[error("a drag is in progress")]
    DragInProgress,

    #[error("{parameter} must be a positive finite value, got {value}")]
    InvalidValue { parameter: &'static str, value: f64 },
}

/// Errors in engine configuration values.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{parameter} must be positive, got {value}")]
    NotPositive { parameter: &'static str, value: f64 },

    #[error("{parameter} must be at least {min}, got {value}")]
    TooSmall {
        parameter: &'static str,
        value: usize,
        min: usize,
    },
}

/// Convenience type alias for results using [`DuctError`].
pub type Result<T> = std::result::Result<T, DuctError>;
