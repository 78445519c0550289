//! Host floating-point environment.
//!
//! Everything in this module reads or writes the calling thread's FPU
//! control and status state through the C runtime's `<fenv.h>` interface:
//! - [`sys`]: Raw bindings and the target's `FE_*` constant table.
//! - [`rounding`]: Rounding-direction control.
//! - [`hardware`]: Hardware exception flag inspection.
//!
//! This state is per thread on every supported platform, but it is shared
//! with any code that runs later on the same thread, including unrelated
//! library code. No locking is provided.
//!
//! A spawned thread may start with a copy of its parent's state: on Linux
//! both the rounding mode and the sticky hardware flags are inherited at
//! spawn time. After that the two threads diverge, so changes made by one
//! are never seen by the other. Code that needs a known starting state
//! installs it explicitly, e.g. with [`crate::FpEnvConfig::apply`].

/// Native `<fenv.h>` bindings and per-target constants.
pub mod sys;

/// Rounding-direction control.
pub mod rounding;

/// Hardware exception flag inspection.
pub mod hardware;
