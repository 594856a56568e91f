use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Decimal places of success rates and month-to-year shares
pub const RATE_DECIMALS: u32 = 2;

/// Convert a stored float amount. Non-finite values count as zero.
pub fn to_decimal(amount: f64) -> Decimal {
    Decimal::from_f64(amount).unwrap_or(Decimal::ZERO)
}

/// Round half away from zero
pub fn round_to(value: Decimal, decimals: u32) -> Decimal {
    value.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero)
}

pub fn sum_amounts<I>(amounts: I) -> Decimal
where
    I: IntoIterator<Item = f64>,
{
    amounts.into_iter().map(to_decimal).sum()
}

/// `actual / total * 100`, rounded to [`RATE_DECIMALS`].
///
/// A zero total yields zero.
pub fn percent_of(actual: Decimal, total: Decimal) -> Decimal {
    if total.is_zero() {
        return Decimal::ZERO;
    }
    round_to(actual / total * Decimal::ONE_HUNDRED, RATE_DECIMALS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_of() {
        assert_eq!(
            percent_of(Decimal::from(250_000), Decimal::from(1_000_000)),
            Decimal::from(25)
        );
        assert_eq!(
            percent_of(Decimal::from(1), Decimal::from(3)),
            Decimal::new(3333, 2)
        );
        assert_eq!(
            percent_of(Decimal::from(2), Decimal::from(3)),
            Decimal::new(6667, 2)
        );
    }

    #[test]
    fn test_percent_of_zero_total() {
        assert_eq!(percent_of(Decimal::from(10), Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn test_round_to_half_away_from_zero() {
        assert_eq!(round_to(Decimal::new(125, 3), 2), Decimal::new(13, 2));
        assert_eq!(round_to(Decimal::new(1015, 2), 1), Decimal::new(102, 1));
        assert_eq!(round_to(Decimal::new(-125, 3), 2), Decimal::new(-13, 2));
    }

    #[test]
    fn test_sum_amounts_is_exact() {
        assert_eq!(round_to(sum_amounts([0.1, 0.2]), 2), Decimal::new(3, 1));
        assert_eq!(sum_amounts([100.5, 0.25]), Decimal::new(10075, 2));
        assert_eq!(sum_amounts(Vec::new()), Decimal::ZERO);
    }

    #[test]
    fn test_non_finite_amount() {
        assert_eq!(to_decimal(f64::NAN), Decimal::ZERO);
    }
}
