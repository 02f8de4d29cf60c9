//! Pricing
//!
//! Amounts are whole Chilean pesos, rendered the way the `es-CL` locale prints
//! `CLP`: a leading `$`, `.` as thousands separator and no decimals.

use rusty_money::{Money, MoneyError, iso};
use thiserror::Error;

/// Currency used for every quote.
pub fn currency() -> &'static iso::Currency {
    iso::CLP
}

/// A monetary amount in the quote currency.
pub type Amount = Money<'static, iso::Currency>;

/// Errors that can occur while summing amounts.
#[derive(Debug, Error, PartialEq)]
pub enum TotalPriceError {
    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// Build an amount from a whole number of pesos.
pub fn pesos(value: i64) -> Amount {
    Money::from_major(value, currency())
}

/// Zero in the quote currency.
pub fn zero() -> Amount {
    pesos(0)
}

/// Sums a list of amounts, starting from zero.
///
/// # Errors
///
/// Returns [`TotalPriceError::Money`] on a currency mismatch.
pub fn total_price<'a>(
    amounts: impl IntoIterator<Item = &'a Amount>,
) -> Result<Amount, TotalPriceError> {
    let total = amounts
        .into_iter()
        .try_fold(zero(), |acc, amount| acc.add(*amount))?;

    Ok(total)
}

/// Formats an amount as `es-CL` currency, e.g. `$45.500`.
pub fn format_currency(amount: &Amount) -> String {
    let value = amount.amount().round_dp(0);
    let sign = if value.is_sign_negative() && !value.is_zero() {
        "-"
    } else {
        ""
    };

    let digits = value.abs().to_string();

    format!("{sign}${}", group_thousands(&digits))
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    let len = digits.len();

    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (len - idx) % 3 == 0 {
            out.push('.');
        }

        out.push(ch);
    }

    out
}
