//! The loyalty reward points formula.

/// Purchases above this amount earn two points per dollar over it.
const DOUBLE_POINTS_THRESHOLD: f64 = 100.0;

/// Purchases above this amount earn a flat bonus.
const FLAT_BONUS_THRESHOLD: f64 = 50.0;

/// The bonus earned by any purchase above [FLAT_BONUS_THRESHOLD].
const FLAT_BONUS_POINTS: u64 = 50;

/// Calculate the reward points earned by a single purchase of `amount`.
///
/// A purchase earns two points for every dollar spent over $100, plus a flat
/// 50 points when the purchase is over $50. Both rules apply independently,
/// so a $150 purchase earns `2 * 50 + 50 = 150` points and a $101.50 purchase
/// earns `2 * 1.5 + 50 = 53` points. A fractional point is floored, so $100.25
/// earns 50 points.
///
/// The function is total: zero, negative and NaN amounts earn no points and
/// absurdly large amounts saturate instead of overflowing.
pub fn calculate_points(amount: f64) -> u64 {
    let mut points: u64 = 0;

    if amount > DOUBLE_POINTS_THRESHOLD {
        // Float to int casts saturate, so infinity becomes u64::MAX.
        let double_points = (2.0 * (amount - DOUBLE_POINTS_THRESHOLD)).floor() as u64;
        points = points.saturating_add(double_points);
    }

    if amount > FLAT_BONUS_THRESHOLD {
        points = points.saturating_add(FLAT_BONUS_POINTS);
    }

    points
}
