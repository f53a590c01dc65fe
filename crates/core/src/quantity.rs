//! Claimable-unit quantities at half-unit granularity.

use core::{
    fmt,
    iter::Sum,
    ops::{Add, AddAssign},
    str::FromStr,
};

use rust_decimal::{Decimal, prelude::ToPrimitive};
use serde::{Deserialize, Serialize};

use crate::{DomainError, ValueObject};

/// Non-negative amount of claimable units, represented as **integer half-units**.
///
/// Both an expense's pool (`item_count`) and a participant's claim (`share`)
/// are quantities. All share arithmetic happens on the half-unit integer, so
/// repeated 0.5 steps never drift. [`Decimal`] is only used at the boundary.
///
/// ```rust
/// use sharetab_core::Quantity;
///
/// let q: Quantity = "1,5".parse().unwrap();
/// assert_eq!(q.halves(), 3);
/// assert_eq!(q.to_string(), "1.5");
/// assert!("0.3".parse::<Quantity>().is_err());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Quantity(u64);

impl Quantity {
    pub const ZERO: Quantity = Quantity(0);
    pub const HALF: Quantity = Quantity(1);
    pub const ONE: Quantity = Quantity(2);
    /// Largest quantity accepted from outside (one billion units). Sums of
    /// bounded quantities stay far below `u64::MAX`.
    pub const MAX: Quantity = Quantity(2_000_000_000);

    /// Creates a quantity from a raw half-unit count (`3` is `1.5`).
    #[must_use]
    pub const fn from_halves(halves: u64) -> Self {
        Self(halves)
    }

    /// Creates a quantity of `units` whole units.
    #[must_use]
    pub const fn whole(units: u64) -> Self {
        Self(units.saturating_mul(2))
    }

    /// Returns the raw half-unit count.
    #[must_use]
    pub const fn halves(self) -> u64 {
        self.0
    }

    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Returns `true` if the quantity has no trailing half-unit.
    #[must_use]
    pub const fn is_whole(self) -> bool {
        self.0 % 2 == 0
    }

    /// Drops a trailing half-unit (`1.5` becomes `1`).
    #[must_use]
    pub const fn floor(self) -> Self {
        Self(self.0 - self.0 % 2)
    }

    /// Subtraction clamped at zero.
    #[must_use]
    pub const fn saturating_sub(self, rhs: Quantity) -> Self {
        Self(self.0.saturating_sub(rhs.0))
    }

    /// Returns the quantity as an exact decimal (`1.5`).
    #[must_use]
    pub fn to_decimal(self) -> Decimal {
        Decimal::from(self.0) / Decimal::from(2)
    }
}

impl ValueObject for Quantity {}

impl Add for Quantity {
    type Output = Quantity;

    /// Saturates at `u64::MAX` half-units.
    fn add(self, rhs: Quantity) -> Self::Output {
        Quantity(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Quantity {
    fn add_assign(&mut self, rhs: Quantity) {
        self.0 = self.0.saturating_add(rhs.0);
    }
}

impl Sum for Quantity {
    fn sum<I: Iterator<Item = Quantity>>(iter: I) -> Self {
        iter.fold(Quantity::ZERO, Add::add)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let units = self.0 / 2;
        if self.is_whole() {
            write!(f, "{units}")
        } else {
            write!(f, "{units}.5")
        }
    }
}

impl From<Quantity> for Decimal {
    fn from(value: Quantity) -> Self {
        value.to_decimal()
    }
}

impl TryFrom<Decimal> for Quantity {
    type Error = DomainError;

    /// Converts a decimal into half-units.
    ///
    /// Rejects negative values, values that are not a multiple of 0.5, and
    /// values above [`Quantity::MAX`].
    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(DomainError::invalid_quantity("must be non-negative"));
        }
        let too_large = || DomainError::invalid_quantity("too large");
        let doubled = value.checked_mul(Decimal::from(2)).ok_or_else(too_large)?;
        if !doubled.fract().is_zero() {
            return Err(DomainError::invalid_quantity("must be a multiple of 0.5"));
        }
        doubled
            .to_u64()
            .map(Quantity)
            .filter(|q| *q <= Quantity::MAX)
            .ok_or_else(too_large)
    }
}

impl FromStr for Quantity {
    type Err = DomainError;

    /// Parses a decimal string; accepts `.` or `,` as separator.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(DomainError::invalid_quantity("empty"));
        }
        let normalized = trimmed.replace(',', ".");
        let value = Decimal::from_str(&normalized)
            .map_err(|_| DomainError::invalid_quantity(trimmed))?;
        Quantity::try_from(value)
    }
}
