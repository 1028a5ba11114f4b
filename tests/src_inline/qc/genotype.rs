use super::*;

fn t() -> ThresholdConfig {
    ThresholdConfig::fallback()
}

#[test]
fn test_below_hard_floor_fails() {
    assert_eq!(classify_genotype(0.965, 0.85, &t()), QcStatus::Fail);
    assert_eq!(classify_genotype(0.969, 0.99, &t()), QcStatus::Fail);
}

#[test]
fn test_between_floor_and_min_warns() {
    assert_eq!(classify_genotype(0.975, 0.85, &t()), QcStatus::Warn);
    assert_eq!(classify_genotype(0.97, 0.82, &t()), QcStatus::Warn);
}

#[test]
fn test_pass() {
    assert_eq!(classify_genotype(0.99, 0.90, &t()), QcStatus::Pass);
    assert_eq!(classify_genotype(0.98, 0.82, &t()), QcStatus::Pass);
}

#[test]
fn test_low_dish_qc_fails_regardless_of_call_rate() {
    assert_eq!(classify_genotype(0.999, 0.81, &t()), QcStatus::Fail);
    assert_eq!(classify_genotype(0.975, 0.5, &t()), QcStatus::Fail);
}

#[test]
fn test_floor_is_independent_of_configured_min() {
    let mut lax = t();
    lax.callrate_min = 0.95;
    assert_eq!(classify_genotype(0.96, 0.9, &lax), QcStatus::Fail);
    assert_eq!(classify_genotype(0.97, 0.9, &lax), QcStatus::Pass);
}

#[test]
fn test_nan_falls_back_to_fail() {
    assert_eq!(classify_genotype(f64::NAN, 0.9, &t()), QcStatus::Fail);
    assert_eq!(classify_genotype(0.99, f64::NAN, &t()), QcStatus::Fail);
}
