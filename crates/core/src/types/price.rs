//! Exact price arithmetic using decimal numbers.
//!
//! Cart totals are summed from `unit price × quantity` and later frozen into
//! an order, so they must be reproducible bit-for-bit. Floating point cannot
//! promise that; [`Decimal`] can.

use core::fmt;
use core::iter::Sum;
use core::ops::Add;
use core::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The input is not a decimal number.
    #[error("invalid price: {0}")]
    Invalid(String),
    /// The input is below zero.
    #[error("price cannot be negative")]
    Negative,
}

/// A non-negative amount in the store's single currency (US dollars).
///
/// No rounding is ever applied to the stored amount; [`Price::display`]
/// rounds to cents for presentation only.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// A price of zero.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a price from a decimal amount.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create a price from whole dollars.
    #[must_use]
    pub fn from_whole(dollars: u32) -> Self {
        Self(Decimal::from(dollars))
    }

    /// Create a price from cents (e.g., `1999` is `$19.99`).
    #[must_use]
    pub fn from_cents(cents: u32) -> Self {
        Self(Decimal::new(i64::from(cents), 2))
    }

    /// The exact amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// The largest representable amount. Arithmetic saturates here.
    pub const MAX: Self = Self(Decimal::MAX);

    /// This price multiplied by a quantity, saturating at [`Price::MAX`].
    #[must_use]
    pub fn times(self, quantity: u64) -> Self {
        self.0
            .checked_mul(Decimal::from(quantity))
            .map_or(Self::MAX, Self)
    }

    /// Format for display (e.g., "$19.99").
    #[must_use]
    pub fn display(&self) -> String {
        let cents = self
            .0
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        format!("${cents:.2}")
    }
}

impl Add for Price {
    type Output = Self;

    /// Saturates at [`Price::MAX`].
    fn add(self, rhs: Self) -> Self::Output {
        self.0.checked_add(rhs.0).map_or(Self::MAX, Self)
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

impl FromStr for Price {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let amount = Decimal::from_str(trimmed.strip_prefix('$').unwrap_or(trimmed))
            .map_err(|_| PriceError::Invalid(s.to_string()))?;
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative);
        }
        Ok(Self(amount))
    }
}
