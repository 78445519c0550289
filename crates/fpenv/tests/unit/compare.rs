//! Signaling comparison tests.
//!
//! Verifies the unordered results, that NaN operands raise `invalid` in both
//! the hardware and the software store, and that ordered comparisons leave
//! every flag untouched.

use ieee754_fpenv::compare::{self, Predicate, SignalingFloat, binary32, binary64};
use ieee754_fpenv::store::{self, ExceptionStore};
use ieee754_fpenv::{ExceptionFlag, ExceptionFlagSet, test_hardware_exceptions};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;

use crate::common::reset_env;

/// Quiet NaN with a payload.
const QNAN_F64: f64 = f64::from_bits(0x7ff8_0000_0000_0001);
/// Signaling NaN (quiet bit clear, non-zero payload).
const SNAN_F64: f64 = f64::from_bits(0x7ff0_0000_0000_0001);
/// Negative quiet NaN.
const NEG_NAN_F64: f64 = f64::from_bits(0xfff8_0000_0000_0000);
const SNAN_F32: f32 = f32::from_bits(0x7f80_0001);

fn expected_invalid_only() -> ExceptionFlagSet {
    ExceptionFlagSet::only(ExceptionFlag::Invalid)
}

// ══════════════════════════════════════════════════════════
// 1. Scenarios
// ══════════════════════════════════════════════════════════

#[test]
fn eq_with_nan_is_false_and_raises_invalid() {
    reset_env();
    assert!(!compare::eq(f64::NAN, 1.0));
    assert!(store::test(ExceptionFlag::Invalid));
}

#[test]
fn ne_of_nan_with_itself_is_true_and_raises_invalid() {
    reset_env();
    assert!(compare::ne(f64::NAN, f64::NAN));
    assert!(store::test(ExceptionFlag::Invalid));
}

// ══════════════════════════════════════════════════════════
// 2. Unordered totality
// ══════════════════════════════════════════════════════════

#[rstest]
fn nan_results_f64(
    #[values(f64::NAN, QNAN_F64, SNAN_F64, NEG_NAN_F64)] nan: f64,
    #[values(0.0, -0.0, 1.0, -2.5, f64::INFINITY, f64::NEG_INFINITY, f64::MIN_POSITIVE / 2.0)]
    y: f64,
) {
    reset_env();
    for (x, y) in [(nan, y), (y, nan), (nan, nan)] {
        assert!(!compare::eq(x, y));
        assert!(!compare::lt(x, y));
        assert!(!compare::le(x, y));
        assert!(!compare::gt(x, y));
        assert!(!compare::ge(x, y));
        assert!(compare::ne(x, y));
    }
    assert_eq!(store::get_all(), expected_invalid_only());
}

#[rstest]
fn nan_results_f32(
    #[values(f32::NAN, SNAN_F32, -f32::NAN)] nan: f32,
    #[values(0.0, -0.0, 1.0, -2.5, f32::INFINITY, f32::MAX)] y: f32,
) {
    reset_env();
    for (x, y) in [(nan, y), (y, nan), (nan, nan)] {
        assert!(!binary32::eq(x, y));
        assert!(!binary32::lt(x, y));
        assert!(!binary32::le(x, y));
        assert!(!binary32::gt(x, y));
        assert!(!binary32::ge(x, y));
        assert!(binary32::ne(x, y));
    }
    assert_eq!(store::get_all(), expected_invalid_only());
}

// ══════════════════════════════════════════════════════════
// 3. Flag effects
// ══════════════════════════════════════════════════════════

#[rstest]
fn nan_raises_invalid_in_both_stores(
    #[values(Predicate::Eq, Predicate::Lt, Predicate::Le, Predicate::Gt, Predicate::Ge, Predicate::Ne)]
    pred: Predicate,
) {
    reset_env();
    let result = compare::compare(pred, 1.0_f64, SNAN_F64);
    let hardware = test_hardware_exceptions();

    assert_eq!(result, pred.unordered_result());
    assert_eq!(store::get_all(), expected_invalid_only());
    assert!(hardware.invalid, "{pred} must raise hardware invalid");
    assert!(!hardware.div_by_zero && !hardware.overflow && !hardware.underflow);
}

#[rstest]
fn ordered_operands_touch_no_flags(
    #[values(Predicate::Eq, Predicate::Lt, Predicate::Le, Predicate::Gt, Predicate::Ge, Predicate::Ne)]
    pred: Predicate,
    #[values((1.0, 2.0), (2.0, 1.0), (3.0, 3.0), (0.0, -0.0), (f64::NEG_INFINITY, f64::INFINITY))]
    operands: (f64, f64),
) {
    let (x, y) = operands;
    reset_env();
    assert_eq!(compare::compare(pred, x, y), pred.apply(x, y));
    assert_eq!(compare::compare(pred, x as f32, y as f32), pred.apply(x as f32, y as f32));
    assert_eq!(store::get_all(), ExceptionFlagSet::NONE);
    assert_eq!(test_hardware_exceptions(), ExceptionFlagSet::NONE);
}

#[test]
fn ordered_results_match_native_operators() {
    reset_env();
    assert!(binary64::eq(0.0, -0.0));
    assert!(binary64::le(0.0, -0.0));
    assert!(!binary64::lt(-0.0, 0.0));
    assert!(binary64::lt(-1.0, 1.0));
    assert!(binary64::gt(f64::INFINITY, f64::MAX));
    assert!(binary64::ge(2.0, 2.0));
    assert!(binary64::ne(1.0, 2.0));
    assert!(!binary64::ne(f64::INFINITY, f64::INFINITY));
    assert_eq!(store::get_all(), ExceptionFlagSet::NONE);
}

#[test]
fn invalid_is_not_cleared_by_later_ordered_comparison() {
    reset_env();
    let _ = compare::lt(f64::NAN, 0.0);
    let _ = compare::lt(0.0, 1.0);
    assert!(store::test(ExceptionFlag::Invalid));
}

#[test]
fn compare_into_explicit_store_leaves_thread_store_alone() {
    reset_env();
    let mut local = ExceptionStore::new();
    assert!(!compare::compare_into(&mut local, Predicate::Ge, f32::NAN, 0.0));
    assert!(local.test(ExceptionFlag::Invalid));
    assert_eq!(store::get_all(), ExceptionFlagSet::NONE);
    assert!(test_hardware_exceptions().invalid);
}

// ══════════════════════════════════════════════════════════
// 4. Predicate helpers
// ══════════════════════════════════════════════════════════

#[test]
fn only_ne_holds_when_unordered() {
    let holds: Vec<_> = Predicate::ALL
        .into_iter()
        .filter(|p| p.unordered_result())
        .collect();
    assert_eq!(holds, vec![Predicate::Ne]);
}

#[test]
fn predicate_names() {
    assert_eq!(Predicate::Le.to_string(), "compareSignalingLessEqual");
    assert_eq!(Predicate::Ne.name(), "compareSignalingNotEqual");
}

#[test]
fn signaling_nan_classification() {
    assert!(SNAN_F64.is_signaling_nan());
    assert!(!QNAN_F64.is_signaling_nan());
    assert!(!f64::NAN.is_signaling_nan());
    assert!(!f64::INFINITY.is_signaling_nan());
    assert!(SNAN_F32.is_signaling_nan());
    assert!(!f32::NAN.is_signaling_nan());
}

// ══════════════════════════════════════════════════════════
// 5. Properties
// ══════════════════════════════════════════════════════════

fn check_compare<F: SignalingFloat>(pred: Predicate, x: F, y: F) -> Result<(), TestCaseError> {
    store::clear_all();
    let unordered = SignalingFloat::is_nan(x) || SignalingFloat::is_nan(y);
    let expected = if unordered { pred.unordered_result() } else { pred.apply(x, y) };

    prop_assert_eq!(compare::compare(pred, x, y), expected);
    let expected_flags = if unordered { expected_invalid_only() } else { ExceptionFlagSet::NONE };
    prop_assert_eq!(store::get_all(), expected_flags);
    Ok(())
}

fn any_predicate() -> impl Strategy<Value = Predicate> {
    proptest::sample::select(Predicate::ALL.to_vec())
}

proptest! {
    #[test]
    fn prop_compare_f64(pred in any_predicate(), x in proptest::num::f64::ANY, y in proptest::num::f64::ANY) {
        check_compare(pred, x, y)?;
    }

    #[test]
    fn prop_compare_f32(pred in any_predicate(), x in proptest::num::f32::ANY, y in proptest::num::f32::ANY) {
        check_compare(pred, x, y)?;
    }

    #[test]
    fn prop_nan_bit_patterns_always_unordered(payload in 1_u64..(1 << 52), negative in any::<bool>(), pred in any_predicate()) {
        let sign = if negative { 1_u64 << 63 } else { 0 };
        let nan = f64::from_bits(sign | 0x7ff0_0000_0000_0000 | payload);
        prop_assert!(nan.is_nan());
        check_compare(pred, nan, 1.0)?;
        check_compare(pred, 1.0, nan)?;
    }
}
