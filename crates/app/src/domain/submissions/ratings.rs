//! Rating aggregation

use crate::domain::submissions::errors::SubmissionsServiceError;

/// Largest value [`round_to_tenths`] handles; every smaller double has a
/// fractional part, so the binary exponent below stays negative.
const MAX_ROUNDABLE: f64 = 4_503_599_627_370_496.0;

const MANTISSA_BITS: u32 = 52;

/// Average star rating of one product's reviews within a shop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatingSummary {
    /// Mean rating rounded to one decimal place, `None` without reviews.
    pub average: Option<f64>,
    pub count: u64,
}

impl RatingSummary {
    /// Summary for a product nobody has reviewed.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            average: None,
            count: 0,
        }
    }

    /// Build a summary from the number of ratings and their sum.
    ///
    /// The mean is computed in `f64` and rounded to tenths from its exact
    /// binary value, so `23 / 20` (stored as `1.1499..`) becomes `1.1` while
    /// an exact tie such as `4.25` goes up to `4.3`. Storefront widgets
    /// round with `toFixed(1)` and this matches them.
    ///
    /// # Errors
    ///
    /// Returns [`SubmissionsServiceError::Inconsistent`] when the totals
    /// cannot come from ratings in the `1..=5` range.
    pub fn from_totals(count: i64, total: i64) -> Result<Self, SubmissionsServiceError> {
        let count = u64::try_from(count).map_err(|_ignored| SubmissionsServiceError::Inconsistent)?;
        let total = u64::try_from(total).map_err(|_ignored| SubmissionsServiceError::Inconsistent)?;

        if count == 0 {
            return Ok(Self::empty());
        }

        if total < count || total > count.saturating_mul(5) {
            return Err(SubmissionsServiceError::Inconsistent);
        }

        // Review counts stay far below 2^53, so both casts are exact.
        let mean = total as f64 / count as f64;

        let tenths = round_to_tenths(mean)
            .and_then(|tenths| u8::try_from(tenths).ok())
            .ok_or(SubmissionsServiceError::Inconsistent)?;

        Ok(Self {
            average: Some(f64::from(tenths) / 10.0),
            count,
        })
    }
}

impl Default for RatingSummary {
    fn default() -> Self {
        Self::empty()
    }
}

/// `value * 10` rounded to the nearest integer, ties up, computed on the
/// exact binary value of `value`.
fn round_to_tenths(value: f64) -> Option<u64> {
    if !(0.0..MAX_ROUNDABLE).contains(&value) {
        return None;
    }

    let bits = value.to_bits();
    let biased = (bits >> MANTISSA_BITS) & 0x7ff;
    let fraction = u128::from(bits & ((1_u64 << MANTISSA_BITS) - 1));

    // value == mantissa / 2^shift
    let (mantissa, shift) = if biased == 0 {
        (fraction, 1074)
    } else {
        (fraction | (1 << MANTISSA_BITS), 1075 - biased)
    };

    // mantissa * 10 < 2^57, so anything shifted further is below one half.
    if shift > 64 {
        return Some(0);
    }

    let scaled = mantissa * 10;
    let whole = scaled >> shift;
    let remainder = scaled - (whole << shift);
    let half = 1_u128 << (shift - 1);

    let tenths = if remainder >= half { whole + 1 } else { whole };

    u64::try_from(tenths).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn average(count: i64, total: i64) -> Option<f64> {
        RatingSummary::from_totals(count, total)
            .ok()
            .and_then(|summary| summary.average)
    }

    #[test]
    fn no_reviews_has_no_average() {
        let summary = RatingSummary::from_totals(0, 0).ok();

        assert_eq!(summary, Some(RatingSummary::empty()));
    }

    #[test]
    fn single_review_is_its_own_average() {
        assert_eq!(average(1, 4), Some(4.0));
    }

    #[test]
    fn average_rounds_to_one_decimal() {
        // 5, 4, 4 -> 4.333..
        assert_eq!(average(3, 13), Some(4.3));
        // 5, 5, 4 -> 4.666..
        assert_eq!(average(3, 14), Some(4.7));
        // 1, 2 -> 1.5
        assert_eq!(average(2, 3), Some(1.5));
    }

    #[test]
    fn exact_ties_round_up() {
        // 5, 4, 4, 4 -> 4.25
        assert_eq!(average(4, 17), Some(4.3));
        // 1, 1, 1, 2, 2, 2, 2, 2 -> 1.625
        assert_eq!(average(8, 13), Some(1.6));
        // 3 x 5 and 17 x 1 over 20 -> 1.6
        assert_eq!(average(20, 32), Some(1.6));
    }

    #[test]
    fn near_ties_follow_the_binary_value() {
        // 1.05 is stored just above the tie
        assert_eq!(average(40, 42), Some(1.1));
        // 1.15, 1.45 and 4.35 are stored just below it
        assert_eq!(average(20, 23), Some(1.1));
        assert_eq!(average(20, 29), Some(1.4));
        assert_eq!(average(20, 87), Some(4.3));
    }

    #[test]
    fn rounding_helper_handles_edges() {
        assert_eq!(round_to_tenths(0.0), Some(0));
        assert_eq!(round_to_tenths(5.0), Some(50));
        assert_eq!(round_to_tenths(0.05), Some(1));
        assert_eq!(round_to_tenths(f64::NAN), None);
        assert_eq!(round_to_tenths(-1.0), None);
    }

    #[test]
    fn count_is_reported() {
        let summary = RatingSummary::from_totals(7, 28).ok();

        assert_eq!(summary.map(|summary| summary.count), Some(7));
    }

    #[test]
    fn impossible_totals_are_inconsistent() {
        for (count, total) in [(2, 1), (2, 11), (-1, 0)] {
            assert!(matches!(
                RatingSummary::from_totals(count, total),
                Err(SubmissionsServiceError::Inconsistent)
            ));
        }
    }
}
