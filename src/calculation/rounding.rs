//! Rounding rules used on payslip amounts.
//!
//! Two granularities coexist and must not be unified: most monetary fields
//! are rounded to centimes, while monthly income tax is rounded to a whole
//! dirham. Both round halves upward (towards positive infinity), so
//! `-0.125` becomes `-0.12` and `2.5` becomes `3`.

use rust_decimal::Decimal;

/// Rounds to the nearest whole unit, halves upward.
///
/// # Examples
///
/// ```
/// use paie_engine::calculation::round_half_up;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(round_half_up(Decimal::from_str("166.5").unwrap()), Decimal::from(167));
/// assert_eq!(round_half_up(Decimal::from_str("-2.5").unwrap()), Decimal::from(-2));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    (value + Decimal::new(5, 1)).floor()
}

/// Rounds to two decimal places, halves upward, keeping a scale of 2.
///
/// # Examples
///
/// ```
/// use paie_engine::calculation::round_to_cents;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let rounded = round_to_cents(Decimal::from_str("654.4502617").unwrap());
/// assert_eq!(rounded.to_string(), "654.45");
/// ```
pub fn round_to_cents(value: Decimal) -> Decimal {
    let mut rounded = round_half_up(value * Decimal::ONE_HUNDRED) / Decimal::ONE_HUNDRED;
    rounded.rescale(2);
    rounded
}

/// Applies a percentage rate to a base, rounded to centimes.
///
/// Computed as `round(base * rate) / 100`, so the rounding happens on the
/// product before the percentage division.
pub fn percent_of(base: Decimal, rate_percent: Decimal) -> Decimal {
    let mut amount = round_half_up(base * rate_percent) / Decimal::ONE_HUNDRED;
    amount.rescale(2);
    amount
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_round_half_up_rounds_halves_toward_positive_infinity() {
        assert_eq!(round_half_up(dec("0.5")), dec("1"));
        assert_eq!(round_half_up(dec("1.49")), dec("1"));
        assert_eq!(round_half_up(dec("-0.5")), dec("0"));
        assert_eq!(round_half_up(dec("-1.51")), dec("-2"));
    }

    #[test]
    fn test_round_to_cents_keeps_two_decimals() {
        assert_eq!(round_to_cents(dec("12800")).to_string(), "12800.00");
        assert_eq!(round_to_cents(dec("0.005")).to_string(), "0.01");
        assert_eq!(round_to_cents(dec("0.0049")).to_string(), "0.00");
    }

    #[test]
    fn test_round_to_cents_negative_half() {
        assert_eq!(round_to_cents(dec("-0.125")), dec("-0.12"));
    }

    #[test]
    fn test_percent_of_rounds_the_product() {
        assert_eq!(percent_of(dec("6000"), dec("4.48")).to_string(), "268.80");
        // 3333.33 * 2.26 = 7533.3258 -> 7533 -> 75.33
        assert_eq!(percent_of(dec("3333.33"), dec("2.26")), dec("75.33"));
    }
}
