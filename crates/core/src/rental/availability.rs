//! Fleet availability rules.
//!
//! The status column is the only gate for "can this vehicle be rented";
//! workflows read it under a row lock and transition it in the same unit.

use fleet_shared::types::VehicleId;

use super::error::RentalError;
use super::types::{VehicleSnapshot, VehicleStatus};

/// Returns the daily rate of a vehicle that can be reserved.
///
/// # Errors
///
/// `VehicleUnavailable` if the vehicle is missing or not `AVAILABLE`.
pub fn check_available(
    snapshot: Option<&VehicleSnapshot>,
    id: VehicleId,
) -> Result<i64, RentalError> {
    match snapshot {
        Some(vehicle) if vehicle.status == VehicleStatus::Available => Ok(vehicle.daily_price),
        _ => Err(RentalError::VehicleUnavailable(id)),
    }
}
