//! Common types shared by every component of the crate.
//!
//! This module provides:
//! 1. **Error Handling:** The crate-wide error enum and `Result` alias.
//! 2. **Exception Flags:** The five IEEE 754 exception flags and the set type
//!    used by both the hardware inspector and the software store.

/// Error types.
pub mod error;

/// Exception flag identifiers and flag sets.
pub mod flags;

pub use error::{FpEnvError, Result};
pub use flags::{ExceptionFlag, ExceptionFlagSet};
