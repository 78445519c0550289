//! Rounding-direction control.
//!
//! IEEE 754-2019 §4.3 defines four binary rounding-direction attributes
//! that a conforming host must support:
//!
//! | Code | Mode             | IEEE 754 name         |
//! |------|------------------|-----------------------|
//! |  0   | `ToNearestEven`  | roundTiesToEven       |
//! |  1   | `TowardNegative` | roundTowardNegative   |
//! |  2   | `TowardPositive` | roundTowardPositive   |
//! |  3   | `TowardZero`     | roundTowardZero       |
//!
//! The active mode is a property of the calling thread. A spawned thread
//! may inherit its parent's mode (it does on Linux), but a mode installed
//! afterwards on either thread affects only that thread.
//!
//! The compiler assumes the default environment when optimising floating
//! point code. It may constant-fold an operation or move it across a call
//! that changes the mode, so arithmetic that must observe a directed mode
//! should pass its operands through [`std::hint::black_box`].

use std::fmt;

use libc::c_int;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::sys;
use crate::common::error::{FpEnvError, Result};

/// IEEE 754 rounding-direction attribute.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum RoundingMode {
    /// Round to nearest, ties to even. The default.
    #[default]
    ToNearestEven = 0,
    /// Round toward negative infinity.
    TowardNegative = 1,
    /// Round toward positive infinity.
    TowardPositive = 2,
    /// Round toward zero (truncate).
    TowardZero = 3,
}

impl RoundingMode {
    /// Every mode, in encoding order.
    pub const ALL: [Self; 4] = [
        Self::ToNearestEven,
        Self::TowardNegative,
        Self::TowardPositive,
        Self::TowardZero,
    ];

    /// Decodes the integer encoding `0..=3`.
    ///
    /// Returns `None` for any other value.
    pub const fn from_bits(bits: u8) -> Option<Self> {
        match bits {
            0 => Some(Self::ToNearestEven),
            1 => Some(Self::TowardNegative),
            2 => Some(Self::TowardPositive),
            3 => Some(Self::TowardZero),
            _ => None,
        }
    }

    /// Decodes the integer encoding, falling back to `ToNearestEven` for
    /// values outside `0..=3`.
    pub const fn from_bits_or_default(bits: u8) -> Self {
        match Self::from_bits(bits) {
            Some(mode) => mode,
            None => Self::ToNearestEven,
        }
    }

    /// Returns the integer encoding of this mode.
    pub const fn bits(self) -> u8 {
        self as u8
    }

    /// Returns the IEEE 754 name of the attribute.
    pub const fn name(self) -> &'static str {
        match self {
            Self::ToNearestEven => "roundTiesToEven",
            Self::TowardNegative => "roundTowardNegative",
            Self::TowardPositive => "roundTowardPositive",
            Self::TowardZero => "roundTowardZero",
        }
    }
}

impl TryFrom<u8> for RoundingMode {
    type Error = FpEnvError;

    fn try_from(bits: u8) -> Result<Self> {
        Self::from_bits(bits).ok_or(FpEnvError::InvalidRoundingEncoding(bits))
    }
}

impl fmt::Display for RoundingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Maps a rounding mode to the target's `FE_*` rounding constant.
pub const fn to_native(mode: RoundingMode) -> c_int {
    match mode {
        RoundingMode::ToNearestEven => sys::FE_TONEAREST,
        RoundingMode::TowardNegative => sys::FE_DOWNWARD,
        RoundingMode::TowardPositive => sys::FE_UPWARD,
        RoundingMode::TowardZero => sys::FE_TOWARDZERO,
    }
}

/// Maps a native `FE_*` rounding constant back to a rounding mode.
///
/// Returns `None` for values outside the four standard constants, such as
/// platform-specific extensions or a failed `fegetround` (-1).
pub const fn from_native(native: c_int) -> Option<RoundingMode> {
    match native {
        sys::FE_TONEAREST => Some(RoundingMode::ToNearestEven),
        sys::FE_DOWNWARD => Some(RoundingMode::TowardNegative),
        sys::FE_UPWARD => Some(RoundingMode::TowardPositive),
        sys::FE_TOWARDZERO => Some(RoundingMode::TowardZero),
        _ => None,
    }
}

/// Maps a native `FE_*` rounding constant back to a rounding mode, reporting
/// anything outside the four standard constants as `ToNearestEven`.
pub const fn from_native_or_default(native: c_int) -> RoundingMode {
    match from_native(native) {
        Some(mode) => mode,
        None => RoundingMode::ToNearestEven,
    }
}

/// Installs `mode` as the calling thread's rounding direction.
///
/// Other threads are unaffected. On failure the previous mode remains active.
///
/// Operations the compiler can evaluate at build time, or schedule before
/// this call, still round to nearest. Hide operands behind
/// [`std::hint::black_box`] when the directed result matters.
///
/// # Errors
///
/// Returns [`FpEnvError::UnsupportedMode`] if the platform rejects the mode.
pub fn set_rounding_mode(mode: RoundingMode) -> Result<()> {
    if sys::set_round(to_native(mode)) != 0 {
        warn!(%mode, "platform rejected rounding mode");
        return Err(FpEnvError::UnsupportedMode(mode));
    }
    debug!(%mode, "rounding mode installed");
    Ok(())
}

/// Returns the calling thread's rounding direction.
///
/// A native value outside the four standard modes is reported as
/// `ToNearestEven`; this is a defined fallback, not an error.
pub fn get_rounding_mode() -> RoundingMode {
    let native = sys::get_round();
    if from_native(native).is_none() {
        warn!(native, "unrecognised native rounding mode, assuming roundTiesToEven");
    }
    from_native_or_default(native)
}

/// Installs a rounding mode for a scope and restores the previous one on drop.
///
/// The same optimiser caveat as [`set_rounding_mode`] applies to arithmetic
/// inside the scope.
///
/// ```
/// use ieee754_fpenv::{RoundingGuard, RoundingMode, get_rounding_mode};
///
/// {
///     let _guard = RoundingGuard::new(RoundingMode::TowardZero)?;
///     assert_eq!(get_rounding_mode(), RoundingMode::TowardZero);
/// }
/// assert_eq!(get_rounding_mode(), RoundingMode::ToNearestEven);
/// # Ok::<(), ieee754_fpenv::FpEnvError>(())
/// ```
#[derive(Debug)]
#[must_use = "the previous rounding mode is restored when the guard is dropped"]
pub struct RoundingGuard {
    previous: RoundingMode,
}

impl RoundingGuard {
    /// Installs `mode`, remembering the currently active mode.
    ///
    /// # Errors
    ///
    /// Returns [`FpEnvError::UnsupportedMode`] if the platform rejects the
    /// mode. No guard is created and nothing needs restoring.
    pub fn new(mode: RoundingMode) -> Result<Self> {
        let previous = get_rounding_mode();
        set_rounding_mode(mode)?;
        Ok(Self { previous })
    }

    /// The mode that will be restored on drop.
    pub const fn previous(&self) -> RoundingMode {
        self.previous
    }
}

impl Drop for RoundingGuard {
    fn drop(&mut self) {
        if let Err(err) = set_rounding_mode(self.previous) {
            warn!(%err, "failed to restore rounding mode");
        }
    }
}

/// Runs `f` with `mode` active, restoring the previous mode afterwards.
///
/// # Errors
///
/// Returns [`FpEnvError::UnsupportedMode`] without running `f` if the
/// platform rejects the mode.
pub fn with_rounding_mode<R>(mode: RoundingMode, f: impl FnOnce() -> R) -> Result<R> {
    let _guard = RoundingGuard::new(mode)?;
    Ok(f())
}
