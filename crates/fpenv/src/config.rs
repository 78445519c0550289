//! Environment configuration.
//!
//! Test harnesses and numeric libraries often need to start from a known
//! floating-point state. This module provides:
//! 1. **[`FpEnvConfig`]:** A serde-deserializable description of the desired
//!    state (rounding mode, which flag sets to clear) and [`FpEnvConfig::apply`]
//!    to install it on the calling thread.
//! 2. **[`FpEnvSnapshot`]:** A read-only capture of the calling thread's
//!    rounding mode, hardware flags and software flags, serializable for
//!    reports.
//!
//! Configuration is supplied as JSON; any missing field takes its default.
//!
//! ```
//! use ieee754_fpenv::{FpEnvConfig, RoundingMode};
//!
//! let config = FpEnvConfig::from_json(r#"{ "rounding_mode": "toward_zero" }"#)?;
//! assert_eq!(config.rounding_mode, RoundingMode::TowardZero);
//! assert!(config.clear_hardware_flags);
//! # Ok::<(), ieee754_fpenv::FpEnvError>(())
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::common::error::{FpEnvError, Result};
use crate::common::flags::ExceptionFlagSet;
use crate::env::hardware::{clear_hardware_exceptions, test_hardware_exceptions};
use crate::env::rounding::{RoundingMode, get_rounding_mode, set_rounding_mode};
use crate::store;

/// Default configuration values.
mod defaults {
    /// Clear the FPU status flags when applying a configuration.
    pub const fn clear_hardware_flags() -> bool {
        true
    }

    /// Clear the calling thread's software flags when applying a configuration.
    pub const fn clear_software_flags() -> bool {
        true
    }
}

/// Desired floating-point environment for the calling thread.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FpEnvConfig {
    /// Rounding direction to install.
    #[serde(default)]
    pub rounding_mode: RoundingMode,
    /// Whether to clear the hardware exception flags.
    #[serde(default = "defaults::clear_hardware_flags")]
    pub clear_hardware_flags: bool,
    /// Whether to clear the software exception flags.
    #[serde(default = "defaults::clear_software_flags")]
    pub clear_software_flags: bool,
}

impl Default for FpEnvConfig {
    fn default() -> Self {
        Self {
            rounding_mode: RoundingMode::default(),
            clear_hardware_flags: defaults::clear_hardware_flags(),
            clear_software_flags: defaults::clear_software_flags(),
        }
    }
}

impl FpEnvConfig {
    /// Parses a configuration from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`crate::FpEnvError::Config`] for malformed JSON, unknown
    /// fields or unknown rounding-mode names.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Installs this configuration on the calling thread.
    ///
    /// The rounding mode is installed first; the flag sets are only cleared
    /// once it has been accepted.
    ///
    /// # Errors
    ///
    /// Returns [`crate::FpEnvError::UnsupportedMode`] if the platform rejects
    /// the rounding mode. Neither flag set is touched in that case.
    pub fn apply(&self) -> Result<()> {
        set_rounding_mode(self.rounding_mode)?;
        if self.clear_hardware_flags {
            clear_hardware_exceptions();
        }
        if self.clear_software_flags {
            store::clear_all();
        }
        debug!(config = ?self, "floating-point environment applied");
        Ok(())
    }
}

/// Snapshot of the calling thread's floating-point environment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FpEnvSnapshot {
    /// Active rounding direction.
    pub rounding_mode: RoundingMode,
    /// FPU status flags.
    pub hardware: ExceptionFlagSet,
    /// Software store flags.
    pub software: ExceptionFlagSet,
}

impl FpEnvSnapshot {
    /// Captures the calling thread's environment without modifying it.
    pub fn capture() -> Self {
        Self {
            rounding_mode: get_rounding_mode(),
            hardware: test_hardware_exceptions(),
            software: store::get_all(),
        }
    }

    /// Serializes the snapshot as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`FpEnvError::Snapshot`] if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(FpEnvError::Snapshot)
    }
}
