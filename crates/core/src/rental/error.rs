//! Rental settlement error types.
//!
//! Every failure of the open/close workflows is one of these variants;
//! callers match on the kind rather than on message text.

use std::fmt;

use fleet_shared::AppError;
use fleet_shared::types::{CustomerId, EmployeeId, RentalId, VehicleId};
use thiserror::Error;

/// The entity a lookup failed to find.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotFoundKind {
    /// Rental transaction.
    Rental(RentalId),
    /// Vehicle.
    Vehicle(VehicleId),
    /// Customer account.
    Customer(CustomerId),
    /// Employee.
    Employee(EmployeeId),
}

impl fmt::Display for NotFoundKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rental(id) => write!(f, "rental {id}"),
            Self::Vehicle(id) => write!(f, "vehicle {id}"),
            Self::Customer(id) => write!(f, "customer {id}"),
            Self::Employee(id) => write!(f, "employee {id}"),
        }
    }
}

/// Opaque failure of the persistence layer (timeout, deadlock, lost
/// connection, failed commit).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct StoreError(String);

impl StoreError {
    /// Wraps a driver message.
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Errors produced by the rental workflows and their building blocks.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RentalError {
    /// Malformed date range, negative charge, empty condition note, or an
    /// amount that overflows.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Vehicle is missing or already rented.
    #[error("Vehicle {0} is not available")]
    VehicleUnavailable(VehicleId),

    /// Balance cannot cover the debit.
    #[error("Insufficient funds: required {required}, available {available}")]
    InsufficientFunds {
        /// Amount the operation needed.
        required: i64,
        /// Balance at the time of the check.
        available: i64,
    },

    /// A referenced entity does not exist.
    #[error("{0} not found")]
    NotFound(NotFoundKind),

    /// The rental already has a return record.
    #[error("Rental {0} has already been returned")]
    AlreadyReturned(RentalId),

    /// The atomic unit failed and was rolled back.
    #[error("Persistence failure: {0}")]
    Persistence(#[from] StoreError),
}

impl RentalError {
    /// Builds an `InvalidInput` error.
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Returns true for infrastructure failures, as opposed to a request
    /// refused by a business rule.
    #[must_use]
    pub const fn is_persistence(&self) -> bool {
        matches!(self, Self::Persistence(_))
    }
}

impl From<RentalError> for AppError {
    fn from(e: RentalError) -> Self {
        match e {
            RentalError::InvalidInput(msg) => Self::Validation(msg),
            RentalError::NotFound(_) => Self::NotFound(e.to_string()),
            RentalError::VehicleUnavailable(_) | RentalError::InsufficientFunds { .. } => {
                Self::BusinessRule(e.to_string())
            }
            RentalError::AlreadyReturned(_) => Self::Conflict(e.to_string()),
            RentalError::Persistence(inner) => Self::Database(inner.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(RentalError::invalid("end_date must be after start_date"), 400)]
    #[case(RentalError::VehicleUnavailable(VehicleId::new()), 422)]
    #[case(RentalError::InsufficientFunds { required: 20_000, available: 10_000 }, 422)]
    #[case(RentalError::NotFound(NotFoundKind::Rental(RentalId::new())), 404)]
    #[case(RentalError::AlreadyReturned(RentalId::new()), 409)]
    #[case(RentalError::Persistence(StoreError::new("deadlock detected")), 500)]
    fn test_maps_to_http_status(#[case] err: RentalError, #[case] status: u16) {
        assert_eq!(AppError::from(err).status_code(), status);
    }

    #[test]
    fn test_insufficient_funds_message() {
        let err = RentalError::InsufficientFunds {
            required: 20_000,
            available: 10_000,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient funds: required 20000, available 10000"
        );
    }

    #[test]
    fn test_not_found_names_the_entity() {
        let id = CustomerId::new();
        let app: AppError = RentalError::NotFound(NotFoundKind::Customer(id)).into();
        assert_eq!(app.to_string(), format!("Not found: customer {id} not found"));
    }

    #[test]
    fn test_is_persistence() {
        assert!(RentalError::from(StoreError::new("timeout")).is_persistence());
        assert!(!RentalError::invalid("x").is_persistence());
    }
}
