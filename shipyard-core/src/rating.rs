//! Rating derivation.

use chrono::{DateTime, Datelike, Utc};

use crate::validator::MAX_PROD_YEAR;

const RATING_SCALE: f64 = 80.0;
const USED_FACTOR: f64 = 0.5;

/// Compute a ship's rating from its speed, used flag and production date.
///
/// `round2(80 * speed * k / (3019 - year + 1))` where `k` is 0.5 for used
/// ships and 1 otherwise. Inputs are not range-checked; callers validate first.
pub fn compute_rating(speed: f64, is_used: bool, prod_date: &DateTime<Utc>) -> f64 {
    let wear = if is_used { USED_FACTOR } else { 1.0 };
    let numerator = RATING_SCALE * speed * wear;
    let denominator = f64::from(MAX_PROD_YEAR - prod_date.year() + 1);
    round2(numerator / denominator)
}

/// Round half-up to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0 + 0.5).floor() / 100.0
}
