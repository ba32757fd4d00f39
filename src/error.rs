//! Error type shared by the whole crate.

/// Errors raised by the Mastermind GA core.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GaError {
    /// A configuration value is outside its supported bounds.
    #[error("invalid configuration: {parameter} {reason}")]
    InvalidConfiguration {
        /// Name of the offending parameter.
        parameter: &'static str,
        /// Human-readable description of the violated bound.
        reason: String,
    },

    /// A guess and a secret of different lengths were compared.
    #[error("length mismatch: guess has {guess} pegs, secret has {secret}")]
    LengthMismatch { guess: usize, secret: usize },

    /// Roulette selection was attempted on a population whose total
    /// fitness is zero.
    #[error("degenerate selection: total population fitness is zero")]
    DegenerateSelection,

    /// A colour name that is not part of the palette.
    #[error("unknown colour: {0:?}")]
    UnknownColor(String),
}

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, GaError>;

impl GaError {
    pub(crate) fn invalid(parameter: &'static str, reason: impl Into<String>) -> Self {
        GaError::InvalidConfiguration {
            parameter,
            reason: reason.into(),
        }
    }
}
