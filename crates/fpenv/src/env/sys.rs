//! Native `<fenv.h>` bindings.
//!
//! The `libc` crate does not expose the C99 floating-point environment, so
//! the five functions used here are declared directly. Their `FE_*`
//! arguments are target-specific; the tables below mirror the C headers:
//!
//! | Target                | Exception bits (NV DZ OF UF NX) | Rounding (RNE RDN RUP RTZ)    |
//! |-----------------------|---------------------------------|-------------------------------|
//! | x86 / x86_64 (SysV)   | 0x01 0x04 0x08 0x10 0x20        | 0x000 0x400 0x800 0xc00       |
//! | arm / aarch64         | 0x01 0x02 0x04 0x08 0x10        | 0 0x800000 0x400000 0xc00000  |
//! | riscv32 / riscv64     | 0x10 0x08 0x04 0x02 0x01        | 0 2 3 1                       |
//! | Windows (MSVC UCRT)   | 0x10 0x08 0x04 0x02 0x01        | 0x000 0x100 0x200 0x300       |

use libc::c_int;

#[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), not(target_env = "msvc")))]
#[allow(missing_docs)]
mod consts {
    use libc::c_int;

    pub const FE_INVALID: c_int = 0x01;
    pub const FE_DIVBYZERO: c_int = 0x04;
    pub const FE_OVERFLOW: c_int = 0x08;
    pub const FE_UNDERFLOW: c_int = 0x10;
    pub const FE_INEXACT: c_int = 0x20;

    pub const FE_TONEAREST: c_int = 0x000;
    pub const FE_DOWNWARD: c_int = 0x400;
    pub const FE_UPWARD: c_int = 0x800;
    pub const FE_TOWARDZERO: c_int = 0xc00;
}

#[cfg(all(any(target_arch = "arm", target_arch = "aarch64"), not(target_env = "msvc")))]
#[allow(missing_docs)]
mod consts {
    use libc::c_int;

    pub const FE_INVALID: c_int = 0x01;
    pub const FE_DIVBYZERO: c_int = 0x02;
    pub const FE_OVERFLOW: c_int = 0x04;
    pub const FE_UNDERFLOW: c_int = 0x08;
    pub const FE_INEXACT: c_int = 0x10;

    pub const FE_TONEAREST: c_int = 0x0000_0000;
    pub const FE_UPWARD: c_int = 0x0040_0000;
    pub const FE_DOWNWARD: c_int = 0x0080_0000;
    pub const FE_TOWARDZERO: c_int = 0x00c0_0000;
}

#[cfg(any(target_arch = "riscv32", target_arch = "riscv64"))]
#[allow(missing_docs)]
mod consts {
    use libc::c_int;

    pub const FE_INEXACT: c_int = 0x01;
    pub const FE_UNDERFLOW: c_int = 0x02;
    pub const FE_OVERFLOW: c_int = 0x04;
    pub const FE_DIVBYZERO: c_int = 0x08;
    pub const FE_INVALID: c_int = 0x10;

    pub const FE_TONEAREST: c_int = 0x0;
    pub const FE_TOWARDZERO: c_int = 0x1;
    pub const FE_DOWNWARD: c_int = 0x2;
    pub const FE_UPWARD: c_int = 0x3;
}

#[cfg(target_env = "msvc")]
#[allow(missing_docs)]
mod consts {
    use libc::c_int;

    pub const FE_INEXACT: c_int = 0x01;
    pub const FE_UNDERFLOW: c_int = 0x02;
    pub const FE_OVERFLOW: c_int = 0x04;
    pub const FE_DIVBYZERO: c_int = 0x08;
    pub const FE_INVALID: c_int = 0x10;

    // _RC_NEAR, _RC_DOWN, _RC_UP, _RC_CHOP
    pub const FE_TONEAREST: c_int = 0x000;
    pub const FE_DOWNWARD: c_int = 0x100;
    pub const FE_UPWARD: c_int = 0x200;
    pub const FE_TOWARDZERO: c_int = 0x300;
}

#[cfg(not(any(
    target_env = "msvc",
    target_arch = "x86",
    target_arch = "x86_64",
    target_arch = "arm",
    target_arch = "aarch64",
    target_arch = "riscv32",
    target_arch = "riscv64",
)))]
compile_error!("no <fenv.h> constant table for this target");

pub use consts::*;

/// Union of the five standard exception bits.
pub const FE_ALL_EXCEPT: c_int = FE_INVALID | FE_DIVBYZERO | FE_OVERFLOW | FE_UNDERFLOW | FE_INEXACT;

#[cfg_attr(all(unix, not(target_vendor = "apple")), link(name = "m"))]
unsafe extern "C" {
    fn fesetround(round: c_int) -> c_int;
    fn fegetround() -> c_int;
    fn fetestexcept(excepts: c_int) -> c_int;
    fn feclearexcept(excepts: c_int) -> c_int;
    fn feraiseexcept(excepts: c_int) -> c_int;
}

/// Installs a native rounding direction. Returns zero on success.
#[inline]
pub fn set_round(round: c_int) -> c_int {
    // SAFETY: fesetround only touches the calling thread's FP control word
    // and rejects unknown values with a non-zero return.
    unsafe { fesetround(round) }
}

/// Returns the native rounding direction.
#[inline]
pub fn get_round() -> c_int {
    // SAFETY: fegetround reads the calling thread's FP control word.
    unsafe { fegetround() }
}

/// Returns the subset of `excepts` currently raised.
#[inline]
pub fn test_except(excepts: c_int) -> c_int {
    // SAFETY: fetestexcept reads the FP status word without modifying it.
    unsafe { fetestexcept(excepts & FE_ALL_EXCEPT) }
}

/// Clears the given exception bits. Returns zero on success.
#[inline]
pub fn clear_except(excepts: c_int) -> c_int {
    // SAFETY: feclearexcept only clears status bits in the FP status word.
    unsafe { feclearexcept(excepts & FE_ALL_EXCEPT) }
}

/// Raises the given exception bits. Returns zero on success.
///
/// Traps are never enabled by this crate, so raising only sets the sticky
/// status bits.
#[inline]
pub fn raise_except(excepts: c_int) -> c_int {
    // SAFETY: feraiseexcept sets status bits for the calling thread. With
    // traps masked (the default) no signal is delivered.
    unsafe { feraiseexcept(excepts & FE_ALL_EXCEPT) }
}
