//! IEEE 754 exception flags.
//!
//! IEEE 754-2019 §7 defines five exceptions, each with a sticky status flag:
//!
//! | Code | Flag        | Raised by                                        |
//! |------|-------------|--------------------------------------------------|
//! |  0   | `invalid`   | NaN-producing operations, signaling comparisons  |
//! |  1   | `divByZero` | Exact infinite result from finite operands       |
//! |  2   | `overflow`  | Rounded result exceeds the largest finite value  |
//! |  3   | `underflow` | Tiny non-zero result                             |
//! |  4   | `inexact`   | Rounded result differs from the exact result     |
//!
//! [`ExceptionFlagSet`] is the common currency between the hardware inspector
//! and the software store. The two sets are distinct instances of the same
//! type and are never merged by this crate.

use std::fmt;
use std::ops::BitOr;

use libc::c_int;
use serde::{Deserialize, Serialize};

use super::error::FpEnvError;
use crate::env::sys;

/// Identifies a single exception flag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[repr(u8)]
pub enum ExceptionFlag {
    /// Invalid operation (§7.2).
    Invalid = 0,
    /// Division by zero (§7.3).
    DivByZero = 1,
    /// Overflow (§7.4).
    Overflow = 2,
    /// Underflow (§7.5).
    Underflow = 3,
    /// Inexact (§7.6).
    Inexact = 4,
}

impl ExceptionFlag {
    /// Every flag, in encoding order.
    pub const ALL: [Self; 5] = [
        Self::Invalid,
        Self::DivByZero,
        Self::Overflow,
        Self::Underflow,
        Self::Inexact,
    ];

    /// Decodes the integer encoding `0..=4`.
    ///
    /// Returns `None` for any other value.
    pub const fn from_bits(bits: u8) -> Option<Self> {
        match bits {
            0 => Some(Self::Invalid),
            1 => Some(Self::DivByZero),
            2 => Some(Self::Overflow),
            3 => Some(Self::Underflow),
            4 => Some(Self::Inexact),
            _ => None,
        }
    }

    /// Returns the integer encoding of this flag.
    pub const fn bits(self) -> u8 {
        self as u8
    }

    /// Returns the target's `FE_*` bit for this flag.
    pub const fn native_bit(self) -> c_int {
        match self {
            Self::Invalid => sys::FE_INVALID,
            Self::DivByZero => sys::FE_DIVBYZERO,
            Self::Overflow => sys::FE_OVERFLOW,
            Self::Underflow => sys::FE_UNDERFLOW,
            Self::Inexact => sys::FE_INEXACT,
        }
    }

    /// Returns the IEEE 754 name of the flag.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Invalid => "invalid",
            Self::DivByZero => "divByZero",
            Self::Overflow => "overflow",
            Self::Underflow => "underflow",
            Self::Inexact => "inexact",
        }
    }
}

impl TryFrom<u8> for ExceptionFlag {
    type Error = FpEnvError;

    fn try_from(bits: u8) -> Result<Self, Self::Error> {
        Self::from_bits(bits).ok_or(FpEnvError::InvalidFlagEncoding(bits))
    }
}

impl fmt::Display for ExceptionFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The state of all five exception flags.
///
/// Fields are independent booleans; no packing or ordering is implied.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExceptionFlagSet {
    /// Invalid operation.
    pub invalid: bool,
    /// Division by zero.
    pub div_by_zero: bool,
    /// Overflow.
    pub overflow: bool,
    /// Underflow.
    pub underflow: bool,
    /// Inexact.
    pub inexact: bool,
}

impl ExceptionFlagSet {
    /// No flags raised.
    pub const NONE: Self = Self {
        invalid: false,
        div_by_zero: false,
        overflow: false,
        underflow: false,
        inexact: false,
    };

    /// All five flags raised.
    pub const ALL: Self = Self {
        invalid: true,
        div_by_zero: true,
        overflow: true,
        underflow: true,
        inexact: true,
    };

    /// Returns a set with only `flag` raised.
    pub const fn only(flag: ExceptionFlag) -> Self {
        let mut set = Self::NONE;
        set.set(flag, true);
        set
    }

    /// Returns the state of `flag`.
    pub const fn get(&self, flag: ExceptionFlag) -> bool {
        match flag {
            ExceptionFlag::Invalid => self.invalid,
            ExceptionFlag::DivByZero => self.div_by_zero,
            ExceptionFlag::Overflow => self.overflow,
            ExceptionFlag::Underflow => self.underflow,
            ExceptionFlag::Inexact => self.inexact,
        }
    }

    /// Sets the state of `flag`.
    pub const fn set(&mut self, flag: ExceptionFlag, raised: bool) {
        match flag {
            ExceptionFlag::Invalid => self.invalid = raised,
            ExceptionFlag::DivByZero => self.div_by_zero = raised,
            ExceptionFlag::Overflow => self.overflow = raised,
            ExceptionFlag::Underflow => self.underflow = raised,
            ExceptionFlag::Inexact => self.inexact = raised,
        }
    }

    /// Returns true if no flag is raised.
    pub const fn is_empty(&self) -> bool {
        !(self.invalid || self.div_by_zero || self.overflow || self.underflow || self.inexact)
    }

    /// Iterates over the raised flags in encoding order.
    pub fn raised(&self) -> impl Iterator<Item = ExceptionFlag> + '_ {
        ExceptionFlag::ALL.into_iter().filter(|&flag| self.get(flag))
    }

    /// Decodes a mask of the target's `FE_*` exception bits.
    ///
    /// Bits that do not correspond to one of the five standard flags (for
    /// example the x87 denormal-operand bit) are ignored.
    pub fn from_native_mask(mask: c_int) -> Self {
        let mut set = Self::NONE;
        for flag in ExceptionFlag::ALL {
            set.set(flag, mask & flag.native_bit() != 0);
        }
        set
    }

    /// Encodes the set as a mask of the target's `FE_*` exception bits.
    pub fn to_native_mask(&self) -> c_int {
        self.raised().fold(0, |mask, flag| mask | flag.native_bit())
    }
}

impl From<ExceptionFlag> for ExceptionFlagSet {
    fn from(flag: ExceptionFlag) -> Self {
        Self::only(flag)
    }
}

impl BitOr for ExceptionFlagSet {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self {
            invalid: self.invalid | rhs.invalid,
            div_by_zero: self.div_by_zero | rhs.div_by_zero,
            overflow: self.overflow | rhs.overflow,
            underflow: self.underflow | rhs.underflow,
            inexact: self.inexact | rhs.inexact,
        }
    }
}

impl fmt::Display for ExceptionFlagSet {
    /// Formats the set as `{invalid, inexact}`, or `{}` when empty.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, flag) in self.raised().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(flag.name())?;
        }
        f.write_str("}")
    }
}
