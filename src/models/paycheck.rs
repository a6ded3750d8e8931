//! Per-paycheck amounts produced by the benefits calculator.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::format_display;

/// The three per-paycheck amounts of an employee.
///
/// These are canonical values: gross is unrounded, benefits cost is rounded
/// to 5 decimal places and net is rounded up to 4 decimal places.
///
/// # Example
///
/// ```
/// use benefits_oracle::models::PaycheckBreakdown;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let breakdown = PaycheckBreakdown {
///     gross: Decimal::from(2000),
///     benefits_cost: Decimal::from_str("57.69231").unwrap(),
///     net: Decimal::from_str("1942.3077").unwrap(),
/// };
/// assert_eq!(breakdown.displayed().net, "1942.31");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaycheckBreakdown {
    /// Annual salary divided by pay periods per year.
    pub gross: Decimal,
    /// Employee and dependant benefits for one pay period.
    pub benefits_cost: Decimal,
    /// Gross minus benefits cost, rounded up.
    pub net: Decimal,
}

impl PaycheckBreakdown {
    /// Renders all three amounts the way the dashboard table shows them.
    pub fn displayed(&self) -> DisplayedPaycheck {
        DisplayedPaycheck {
            gross: format_display(self.gross),
            benefits_cost: format_display(self.benefits_cost),
            net: format_display(self.net),
        }
    }
}

/// Per-paycheck amounts as on-screen text with two decimals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayedPaycheck {
    /// Gross pay text.
    pub gross: String,
    /// Benefits cost text.
    pub benefits_cost: String,
    /// Net pay text.
    pub net: String,
}
