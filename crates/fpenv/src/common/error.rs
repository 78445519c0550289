//! Error definitions.
//!
//! The error surface is deliberately small. Raising an exception flag is an
//! observation, never an error: a NaN comparison succeeds and returns a
//! boolean. The only runtime failure in the FPU layer is a rounding mode the
//! platform refuses to install; the remaining variants cover decoding raw
//! integers and converting configuration and snapshots to and from JSON.

use thiserror::Error;

use crate::env::rounding::RoundingMode;

/// Errors produced by this crate.
#[derive(Debug, Error)]
pub enum FpEnvError {
    /// The platform could not install the requested rounding mode.
    ///
    /// Recoverable: the previously active mode is left in place and the
    /// caller may pick a fallback.
    #[error("rounding mode {0} is not supported on this platform")]
    UnsupportedMode(RoundingMode),

    /// A raw rounding-mode encoding outside `0..=3`.
    #[error("invalid rounding mode encoding {0:#x}")]
    InvalidRoundingEncoding(u8),

    /// A raw exception-flag encoding outside `0..=4`.
    #[error("invalid exception flag encoding {0:#x}")]
    InvalidFlagEncoding(u8),

    /// Malformed environment configuration.
    #[error("invalid environment configuration: {0}")]
    Config(#[from] serde_json::Error),

    /// An environment snapshot could not be serialized.
    #[error("failed to serialize environment snapshot: {0}")]
    Snapshot(#[source] serde_json::Error),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, FpEnvError>;
