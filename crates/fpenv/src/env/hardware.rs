//! Hardware exception flag inspection.
//!
//! The FPU accumulates exception flags in its status register. The flags
//! are sticky: once raised they stay raised until cleared, so a test long
//! after the operation of interest observes the union of every exception
//! since the last clear. Callers who want an uncontaminated reading clear,
//! run the operation, and test immediately.

use tracing::{debug, warn};

use super::sys;
use crate::common::flags::{ExceptionFlag, ExceptionFlagSet};

/// Snapshots the FPU's exception flags without modifying them.
pub fn test_hardware_exceptions() -> ExceptionFlagSet {
    ExceptionFlagSet::from_native_mask(sys::test_except(sys::FE_ALL_EXCEPT))
}

/// Clears all five hardware exception flags. Idempotent.
///
/// The debug event is emitted before the clear so that work done by a
/// subscriber cannot set flags in the freshly cleared register.
pub fn clear_hardware_exceptions() {
    debug!("clearing hardware exception flags");
    if sys::clear_except(sys::FE_ALL_EXCEPT) != 0 {
        warn!("feclearexcept reported failure");
    }
}

/// Raises `invalid` in the FPU status register.
///
/// Only the signaling comparators raise hardware flags directly; the other
/// four flags are produced by arithmetic alone.
pub(crate) fn raise_hardware_invalid() {
    if sys::raise_except(ExceptionFlag::Invalid.native_bit()) != 0 {
        warn!("feraiseexcept(FE_INVALID) reported failure");
    }
}
