//! Domain types for rentals and returns.

use chrono::{DateTime, NaiveDate, Utc};
use fleet_shared::types::{CustomerId, EmployeeId, RentalId, ReturnId, VehicleId};
use serde::{Deserialize, Serialize};

use super::ledger::Balance;

/// Whether a vehicle can be rented right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VehicleStatus {
    /// Free to rent.
    Available,
    /// Out on an open rental.
    NotAvailable,
}

/// A vehicle row as seen by the workflows, read under lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VehicleSnapshot {
    /// Vehicle ID.
    pub id: VehicleId,
    /// Daily price in minor units.
    pub daily_price: i64,
    /// Current status.
    pub status: VehicleStatus,
}

/// A customer's balance row, read under lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CustomerAccount {
    /// Customer ID.
    pub id: CustomerId,
    /// Spendable balance.
    pub balance: Balance,
}

/// Input to the opening workflow.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OpenRentalRequest {
    /// Renting customer.
    pub customer_id: CustomerId,
    /// Vehicle to reserve.
    pub vehicle_id: VehicleId,
    /// Employee handling the rental.
    pub employee_id: EmployeeId,
    /// First day of the rental.
    pub start_date: NaiveDate,
    /// Day the vehicle is due back.
    pub end_date: NaiveDate,
}

/// Input to the closing workflow.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CloseRentalRequest {
    /// Rental being closed.
    pub rental_id: RentalId,
    /// Condition of the vehicle at return.
    pub condition_note: String,
    /// Free-text remarks about the return.
    #[serde(default)]
    pub description: Option<String>,
    /// Extra charge for damage or late return, in minor units.
    pub extra_charge: i64,
}

/// An opened rental. `price` is fixed at open time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RentalTransaction {
    /// Rental ID.
    pub id: RentalId,
    /// Renting customer.
    pub customer_id: CustomerId,
    /// Rented vehicle.
    pub vehicle_id: VehicleId,
    /// Employee who handled the rental.
    pub employee_id: EmployeeId,
    /// First day of the rental.
    pub start_date: NaiveDate,
    /// Due date.
    pub end_date: NaiveDate,
    /// Total price debited at open.
    pub price: i64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// The settlement record of a closed rental.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleReturn {
    /// Return ID.
    pub id: ReturnId,
    /// Rental this return closes.
    pub rental_id: RentalId,
    /// When the vehicle came back.
    pub return_date: DateTime<Utc>,
    /// Extra charge debited at close.
    pub extra_charge: i64,
    /// Condition of the vehicle at return.
    pub condition_note: String,
    /// Free-text remarks, if any were given.
    pub description: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}
