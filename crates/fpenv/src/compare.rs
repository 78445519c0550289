//! Signaling comparison predicates.
//!
//! IEEE 754-2019 §5.6.1 and §5.11 define comparisons that signal the
//! `invalid` exception when the operands are unordered, i.e. when either is
//! NaN. Here the `invalid` flag is raised in two places on every unordered
//! comparison:
//! - the FPU status register (see [`crate::env::hardware`]), and
//! - an [`ExceptionSink`], by default the calling thread's software store.
//!
//! Quiet and signaling NaNs are treated alike. "Signaling" names the
//! predicate's behaviour, not the encoding of its operands.
//!
//! | Predicate | Ordered result | Unordered result |
//! |-----------|----------------|------------------|
//! | `eq`      | `x == y`       | `false`          |
//! | `lt`      | `x < y`        | `false`          |
//! | `le`      | `x <= y`       | `false`          |
//! | `gt`      | `x > y`        | `false`          |
//! | `ge`      | `x >= y`       | `false`          |
//! | `ne`      | `x != y`       | `true`           |
//!
//! Ordered comparisons touch no flags.

use std::fmt;

use tracing::trace;

use crate::common::flags::ExceptionFlag;
use crate::env::hardware::raise_hardware_invalid;
use crate::store::{ExceptionSink, ThreadExceptions};

mod sealed {
    pub trait Sealed {}
    impl Sealed for f32 {}
    impl Sealed for f64 {}
}

/// IEEE 754 binary formats accepted by the comparators (`f32` and `f64`).
pub trait SignalingFloat: sealed::Sealed + Copy + PartialOrd + fmt::Debug {
    /// Returns true for any NaN, quiet or signaling.
    fn is_nan(self) -> bool;

    /// Returns true for a signaling NaN: all-ones exponent, clear quiet bit,
    /// non-zero payload.
    fn is_signaling_nan(self) -> bool;
}

impl SignalingFloat for f32 {
    #[inline]
    fn is_nan(self) -> bool {
        Self::is_nan(self)
    }

    #[inline]
    fn is_signaling_nan(self) -> bool {
        const QUIET_BIT: u32 = 0x0040_0000;
        Self::is_nan(self) && self.to_bits() & QUIET_BIT == 0
    }
}

impl SignalingFloat for f64 {
    #[inline]
    fn is_nan(self) -> bool {
        Self::is_nan(self)
    }

    #[inline]
    fn is_signaling_nan(self) -> bool {
        const QUIET_BIT: u64 = 0x0008_0000_0000_0000;
        Self::is_nan(self) && self.to_bits() & QUIET_BIT == 0
    }
}

/// The six comparison predicates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Predicate {
    /// `compareSignalingEqual`
    Eq,
    /// `compareSignalingLess`
    Lt,
    /// `compareSignalingLessEqual`
    Le,
    /// `compareSignalingGreater`
    Gt,
    /// `compareSignalingGreaterEqual`
    Ge,
    /// `compareSignalingNotEqual`
    Ne,
}

impl Predicate {
    /// Every predicate.
    pub const ALL: [Self; 6] = [Self::Eq, Self::Lt, Self::Le, Self::Gt, Self::Ge, Self::Ne];

    /// The result mandated when the operands are unordered.
    ///
    /// NaN compares unequal to everything, itself included, so only `Ne`
    /// holds.
    pub const fn unordered_result(self) -> bool {
        matches!(self, Self::Ne)
    }

    /// Evaluates the predicate with the host's native comparison. Never
    /// touches any exception flag.
    #[inline]
    pub fn apply<F: PartialOrd>(self, x: F, y: F) -> bool {
        match self {
            Self::Eq => x == y,
            Self::Lt => x < y,
            Self::Le => x <= y,
            Self::Gt => x > y,
            Self::Ge => x >= y,
            Self::Ne => x != y,
        }
    }

    /// Returns the IEEE 754 operation name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Eq => "compareSignalingEqual",
            Self::Lt => "compareSignalingLess",
            Self::Le => "compareSignalingLessEqual",
            Self::Gt => "compareSignalingGreater",
            Self::Ge => "compareSignalingGreaterEqual",
            Self::Ne => "compareSignalingNotEqual",
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Evaluates `pred` on `x` and `y`, recording `invalid` into `sink` when
/// either operand is NaN.
///
/// The hardware `invalid` flag is raised alongside the sink. Ordered
/// operands return the natural comparison and leave every flag untouched.
pub fn compare_into<F, S>(sink: &mut S, pred: Predicate, x: F, y: F) -> bool
where
    F: SignalingFloat,
    S: ExceptionSink + ?Sized,
{
    if x.is_nan() || y.is_nan() {
        raise_hardware_invalid();
        sink.raise(ExceptionFlag::Invalid);
        trace!(
            %pred,
            ?x,
            ?y,
            signaling_nan = x.is_signaling_nan() || y.is_signaling_nan(),
            "unordered comparison raised invalid"
        );
        return pred.unordered_result();
    }
    pred.apply(x, y)
}

/// Evaluates `pred`, recording `invalid` into the calling thread's store.
#[inline]
pub fn compare<F: SignalingFloat>(pred: Predicate, x: F, y: F) -> bool {
    compare_into(&mut ThreadExceptions, pred, x, y)
}

/// Signaling `x == y`.
#[inline]
pub fn eq<F: SignalingFloat>(x: F, y: F) -> bool {
    compare(Predicate::Eq, x, y)
}

/// Signaling `x < y`.
#[inline]
pub fn lt<F: SignalingFloat>(x: F, y: F) -> bool {
    compare(Predicate::Lt, x, y)
}

/// Signaling `x <= y`.
#[inline]
pub fn le<F: SignalingFloat>(x: F, y: F) -> bool {
    compare(Predicate::Le, x, y)
}

/// Signaling `x > y`.
#[inline]
pub fn gt<F: SignalingFloat>(x: F, y: F) -> bool {
    compare(Predicate::Gt, x, y)
}

/// Signaling `x >= y`.
#[inline]
pub fn ge<F: SignalingFloat>(x: F, y: F) -> bool {
    compare(Predicate::Ge, x, y)
}

/// Signaling `x != y`. True when either operand is NaN.
#[inline]
pub fn ne<F: SignalingFloat>(x: F, y: F) -> bool {
    compare(Predicate::Ne, x, y)
}

macro_rules! width_predicates {
    ($(#[$meta:meta])* $module:ident, $float:ty) => {
        $(#[$meta])*
        pub mod $module {
            /// Signaling `x == y`.
            #[inline]
            pub fn eq(x: $float, y: $float) -> bool {
                super::eq(x, y)
            }

            /// Signaling `x < y`.
            #[inline]
            pub fn lt(x: $float, y: $float) -> bool {
                super::lt(x, y)
            }

            /// Signaling `x <= y`.
            #[inline]
            pub fn le(x: $float, y: $float) -> bool {
                super::le(x, y)
            }

            /// Signaling `x > y`.
            #[inline]
            pub fn gt(x: $float, y: $float) -> bool {
                super::gt(x, y)
            }

            /// Signaling `x >= y`.
            #[inline]
            pub fn ge(x: $float, y: $float) -> bool {
                super::ge(x, y)
            }

            /// Signaling `x != y`.
            #[inline]
            pub fn ne(x: $float, y: $float) -> bool {
                super::ne(x, y)
            }
        }
    };
}

width_predicates!(
    /// Single-precision (binary32) predicates.
    binary32,
    f32
);

width_predicates!(
    /// Double-precision (binary64) predicates.
    binary64,
    f64
);
