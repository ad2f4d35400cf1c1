//! Customer balance ledger.
//!
//! A [`Balance`] is never negative: every constructor and transition checks
//! it, so a value of this type is always a valid stored balance.

use serde::{Deserialize, Serialize};

use super::error::RentalError;

/// Spendable customer balance in minor currency units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Balance(i64);

impl Balance {
    /// Zero balance, as given to newly registered customers.
    pub const ZERO: Self = Self(0);

    /// Wraps a stored amount.
    ///
    /// # Errors
    ///
    /// `InvalidInput` if `amount` is negative.
    pub fn new(amount: i64) -> Result<Self, RentalError> {
        if amount < 0 {
            return Err(RentalError::invalid(format!(
                "balance cannot be negative, got {amount}"
            )));
        }
        Ok(Self(amount))
    }

    /// The amount in minor units.
    #[must_use]
    pub const fn amount(self) -> i64 {
        self.0
    }

    /// Balance after removing `amount`.
    ///
    /// A zero debit is allowed; closing a rental with no extra charge
    /// debits zero.
    ///
    /// # Errors
    ///
    /// `InvalidInput` for a negative amount, `InsufficientFunds` when the
    /// amount exceeds the balance.
    pub fn debit(self, amount: i64) -> Result<Self, RentalError> {
        if amount < 0 {
            return Err(RentalError::invalid(format!(
                "debit amount cannot be negative, got {amount}"
            )));
        }
        if amount > self.0 {
            return Err(RentalError::InsufficientFunds {
                required: amount,
                available: self.0,
            });
        }
        Ok(Self(self.0 - amount))
    }

    /// Balance after adding `amount`.
    ///
    /// # Errors
    ///
    /// `InvalidInput` if `amount` is not positive or the sum overflows.
    pub fn credit(self, amount: i64) -> Result<Self, RentalError> {
        if amount <= 0 {
            return Err(RentalError::invalid(format!(
                "credit amount must be positive, got {amount}"
            )));
        }
        self.0
            .checked_add(amount)
            .map(Self)
            .ok_or_else(|| RentalError::invalid("balance overflows"))
    }
}

impl<'de> Deserialize<'de> for Balance {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let amount = i64::deserialize(deserializer)?;
        Self::new(amount).map_err(serde::de::Error::custom)
    }
}
