//! IEEE 754-2019 floating-point environment control.
//!
//! This crate wraps the host FPU's control and status state and layers the
//! standard's exception-observation semantics on top of it:
//! 1. **Rounding control:** Install and query the active rounding-direction
//!    attribute of the calling thread.
//! 2. **Hardware exceptions:** Snapshot and clear the FPU's sticky status flags.
//! 3. **Software exceptions:** A per-thread mirror of the five exception flags,
//!    maintained independently of the hardware.
//! 4. **Signaling comparisons:** The six comparison predicates for `f32` and
//!    `f64` that raise `invalid` whenever an operand is NaN.
//! 5. **Configuration:** Establishing and snapshotting a known environment.
//!
//! The hardware and software flag sets are never synchronised implicitly.
//! Code that needs a flag visible in both raises it in both, which is what
//! the signaling comparators do.
//!
//! ```
//! use ieee754_fpenv::{ExceptionFlag, compare, store};
//!
//! store::clear_all();
//! assert!(compare::ne(f64::NAN, f64::NAN));
//! assert!(store::test(ExceptionFlag::Invalid));
//! ```

/// Shared vocabulary (error type, exception flags).
pub mod common;
/// Environment configuration and snapshots.
pub mod config;
/// Host FPU access (rounding control, hardware exception flags).
pub mod env;
/// Signaling comparison predicates.
pub mod compare;
/// Per-thread software exception store.
pub mod store;

pub use crate::common::error::{FpEnvError, Result};
pub use crate::common::flags::{ExceptionFlag, ExceptionFlagSet};
pub use crate::compare::{Predicate, SignalingFloat};
pub use crate::config::{FpEnvConfig, FpEnvSnapshot};
pub use crate::env::hardware::{clear_hardware_exceptions, test_hardware_exceptions};
pub use crate::env::rounding::{
    RoundingGuard, RoundingMode, get_rounding_mode, set_rounding_mode, with_rounding_mode,
};
pub use crate::store::{ExceptionSink, ExceptionStore, ThreadExceptions};
