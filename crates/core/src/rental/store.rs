//! Persistence collaborator for the rental workflows.
//!
//! This trait pair is implemented by the db crate on top of a database
//! transaction with row locks. A [`RentalUnit`] is one atomic unit: reads
//! through `lock_*` hold the row until the unit ends, writes are staged,
//! and nothing is visible to other units before [`RentalUnit::commit`].
//! Dropping a unit without committing discards every staged write.
//!
//! Units that lock several rows must take them in the order rental,
//! vehicle, customer.

use std::future::Future;

use fleet_shared::types::{CustomerId, EmployeeId, RentalId, VehicleId};

use super::error::StoreError;
use super::ledger::Balance;
use super::types::{
    CustomerAccount, RentalTransaction, VehicleReturn, VehicleSnapshot, VehicleStatus,
};

/// Opens atomic units.
pub trait RentalStore: Send + Sync {
    /// The unit type handed out by [`RentalStore::begin`].
    type Unit: RentalUnit;

    /// Starts a new atomic unit.
    fn begin(&self) -> impl Future<Output = Result<Self::Unit, StoreError>> + Send;
}

/// One atomic unit of reads and writes.
pub trait RentalUnit: Send {
    /// Reads and locks a rental row.
    fn lock_rental(
        &mut self,
        id: RentalId,
    ) -> impl Future<Output = Result<Option<RentalTransaction>, StoreError>> + Send;

    /// Reads and locks a vehicle row.
    fn lock_vehicle(
        &mut self,
        id: VehicleId,
    ) -> impl Future<Output = Result<Option<VehicleSnapshot>, StoreError>> + Send;

    /// Reads and locks a customer's balance row.
    fn lock_customer(
        &mut self,
        id: CustomerId,
    ) -> impl Future<Output = Result<Option<CustomerAccount>, StoreError>> + Send;

    /// Whether an active (not deleted) employee exists.
    fn employee_exists(
        &mut self,
        id: EmployeeId,
    ) -> impl Future<Output = Result<bool, StoreError>> + Send;

    /// Whether a return has already been recorded for the rental.
    fn return_exists(
        &mut self,
        rental_id: RentalId,
    ) -> impl Future<Output = Result<bool, StoreError>> + Send;

    /// Stages a new balance for a locked customer.
    fn set_balance(
        &mut self,
        id: CustomerId,
        balance: Balance,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Stages a status transition for a locked vehicle.
    fn set_vehicle_status(
        &mut self,
        id: VehicleId,
        status: VehicleStatus,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Stages a new rental row.
    fn insert_rental(
        &mut self,
        rental: &RentalTransaction,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Stages a new return row.
    fn insert_return(
        &mut self,
        vehicle_return: &VehicleReturn,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Makes every staged write visible and releases the locks.
    fn commit(self) -> impl Future<Output = Result<(), StoreError>> + Send;
}
