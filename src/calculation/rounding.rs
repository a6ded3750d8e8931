//! Rounding policy of the benefits calculation.
//!
//! Benefits cost is rounded half away from zero at 5 decimal places. Net pay
//! is always rounded up (toward positive infinity) at 4 decimal places.
//! On-screen values use 2 decimal places, half away from zero.

use rust_decimal::{Decimal, RoundingStrategy};

/// Decimal places kept on the per-paycheck benefits cost.
pub const BENEFITS_COST_DECIMAL_PLACES: u32 = 5;

/// Decimal places kept on the per-paycheck net pay.
pub const NET_PAY_DECIMAL_PLACES: u32 = 4;

/// Decimal places shown on the dashboard.
pub const DISPLAY_DECIMAL_PLACES: u32 = 2;

/// Rounds a benefits cost to 5 decimal places, half away from zero.
///
/// # Examples
///
/// ```
/// use benefits_oracle::calculation::round_benefits_cost;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let cost = Decimal::from(1500) / Decimal::from(26);
/// assert_eq!(round_benefits_cost(cost), Decimal::from_str("57.69231").unwrap());
/// ```
pub fn round_benefits_cost(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(
        BENEFITS_COST_DECIMAL_PLACES,
        RoundingStrategy::MidpointAwayFromZero,
    )
}

/// Rounds net pay up to the next 0.0001.
///
/// Values that are already a multiple of 0.0001 are returned unchanged.
/// Negative values move toward zero.
///
/// # Examples
///
/// ```
/// use benefits_oracle::calculation::ceil_net_pay;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let dec = |s: &str| Decimal::from_str(s).unwrap();
/// assert_eq!(ceil_net_pay(dec("1942.30769")), dec("1942.3077"));
/// assert_eq!(ceil_net_pay(dec("1961.5385")), dec("1961.5385"));
/// assert_eq!(ceil_net_pay(dec("-653.84615")), dec("-653.8461"));
/// ```
pub fn ceil_net_pay(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(NET_PAY_DECIMAL_PLACES, RoundingStrategy::ToPositiveInfinity)
}

/// Renders a value with exactly two decimals, half away from zero.
///
/// This is a display transform only; the result is never fed back into a
/// calculation.
///
/// # Examples
///
/// ```
/// use benefits_oracle::calculation::format_display;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(format_display(Decimal::from(2000)), "2000.00");
/// assert_eq!(format_display(Decimal::from_str("57.69231").unwrap()), "57.69");
/// assert_eq!(format_display(Decimal::from_str("0.125").unwrap()), "0.13");
/// ```
pub fn format_display(value: Decimal) -> String {
    let mut rounded =
        value.round_dp_with_strategy(DISPLAY_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero);
    if rounded.is_zero() {
        rounded = Decimal::ZERO;
    }
    rounded.rescale(DISPLAY_DECIMAL_PLACES);
    rounded.to_string()
}
