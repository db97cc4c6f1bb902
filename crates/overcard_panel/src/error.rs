//! Error types for overcard_panel

use thiserror::Error;

/// Construction-time configuration errors.
///
/// The running engine never returns errors; degenerate runtime situations
/// are defensive no-ops. Only building a panel from an unusable
/// configuration fails.
#[derive(Error, Debug)]
pub enum PanelError {
    /// The allowed anchor set has no entries
    #[error("allowed anchor set is empty")]
    EmptyAllowedSet,

    /// The container height is not a finite number
    #[error("container height must be finite, got {0}")]
    NonFiniteHeight(f32),

    /// The scrim alpha is outside [0, 1]
    #[error("scrim alpha must be within [0, 1], got {0}")]
    ScrimAlphaOutOfRange(f32),
}

/// Result type for panel construction
pub type Result<T> = std::result::Result<T, PanelError>;
