//! Opening and closing workflows.
//!
//! Each workflow runs inside a single [`RentalUnit`]. Every early return
//! drops the unit, which rolls back whatever was staged, so a failed call
//! leaves balances, vehicle statuses and row counts untouched. Nothing is
//! retried here.

use std::sync::Arc;

use chrono::Utc;
use fleet_shared::types::{RentalId, ReturnId};
use tracing::{error, info, warn};

use super::availability::check_available;
use super::error::{NotFoundKind, RentalError};
use super::pricing;
use super::store::{RentalStore, RentalUnit};
use super::types::{
    CloseRentalRequest, OpenRentalRequest, RentalTransaction, VehicleReturn, VehicleStatus,
};

/// Orchestrates pricing, availability and the ledger over a [`RentalStore`].
pub struct RentalService<S: RentalStore> {
    store: Arc<S>,
}

impl<S: RentalStore> Clone for RentalService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: RentalStore> RentalService<S> {
    /// Creates a service over `store`.
    #[must_use]
    pub const fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Opens a rental: debits the price, reserves the vehicle and records
    /// the transaction as one atomic unit.
    ///
    /// # Errors
    ///
    /// - `InvalidInput` if `start_date >= end_date`
    /// - `VehicleUnavailable` if the vehicle is missing or rented
    /// - `NotFound` if the employee or customer is missing
    /// - `InsufficientFunds` if the balance cannot cover the price
    /// - `Persistence` if the unit fails
    pub async fn open_rental(
        &self,
        request: OpenRentalRequest,
    ) -> Result<RentalTransaction, RentalError> {
        let result = self.open_in_unit(&request).await;
        match &result {
            Ok(rental) => info!(
                rental_id = %rental.id,
                customer_id = %rental.customer_id,
                vehicle_id = %rental.vehicle_id,
                price = rental.price,
                "Rental opened"
            ),
            Err(e) if e.is_persistence() => error!(
                customer_id = %request.customer_id,
                vehicle_id = %request.vehicle_id,
                error = %e,
                "Rental open rolled back"
            ),
            Err(e) => warn!(
                customer_id = %request.customer_id,
                vehicle_id = %request.vehicle_id,
                reason = %e,
                "Rental open rejected"
            ),
        }
        result
    }

    async fn open_in_unit(
        &self,
        request: &OpenRentalRequest,
    ) -> Result<RentalTransaction, RentalError> {
        pricing::rental_days(request.start_date, request.end_date)?;

        let mut unit = self.store.begin().await?;

        let vehicle = unit.lock_vehicle(request.vehicle_id).await?;
        let daily_rate = check_available(vehicle.as_ref(), request.vehicle_id)?;
        let price = pricing::price(daily_rate, request.start_date, request.end_date)?;

        if !unit.employee_exists(request.employee_id).await? {
            return Err(RentalError::NotFound(NotFoundKind::Employee(
                request.employee_id,
            )));
        }

        let customer = unit
            .lock_customer(request.customer_id)
            .await?
            .ok_or(RentalError::NotFound(NotFoundKind::Customer(
                request.customer_id,
            )))?;
        let remaining = customer.balance.debit(price)?;

        unit.set_balance(customer.id, remaining).await?;
        unit.set_vehicle_status(request.vehicle_id, VehicleStatus::NotAvailable)
            .await?;

        let now = Utc::now();
        let rental = RentalTransaction {
            id: RentalId::new(),
            customer_id: request.customer_id,
            vehicle_id: request.vehicle_id,
            employee_id: request.employee_id,
            start_date: request.start_date,
            end_date: request.end_date,
            price,
            created_at: now,
            updated_at: now,
        };
        unit.insert_rental(&rental).await?;
        unit.commit().await?;

        Ok(rental)
    }

    /// Closes a rental: debits the extra charge from the rental's customer,
    /// releases the rental's vehicle and records the return as one atomic
    /// unit.
    ///
    /// # Errors
    ///
    /// - `InvalidInput` for a negative charge or a blank condition note
    /// - `NotFound` if the rental, its vehicle or its customer is missing
    /// - `AlreadyReturned` if the rental was closed before
    /// - `InsufficientFunds` if the balance cannot cover the charge
    /// - `Persistence` if the unit fails
    pub async fn close_rental(
        &self,
        request: CloseRentalRequest,
    ) -> Result<VehicleReturn, RentalError> {
        let result = self.close_in_unit(&request).await;
        match &result {
            Ok(vehicle_return) => info!(
                rental_id = %vehicle_return.rental_id,
                return_id = %vehicle_return.id,
                extra_charge = vehicle_return.extra_charge,
                "Rental closed"
            ),
            Err(e) if e.is_persistence() => error!(
                rental_id = %request.rental_id,
                error = %e,
                "Rental close rolled back"
            ),
            Err(e) => warn!(rental_id = %request.rental_id, reason = %e, "Rental close rejected"),
        }
        result
    }

    async fn close_in_unit(
        &self,
        request: &CloseRentalRequest,
    ) -> Result<VehicleReturn, RentalError> {
        if request.extra_charge < 0 {
            return Err(RentalError::invalid(format!(
                "extra_charge cannot be negative, got {}",
                request.extra_charge
            )));
        }
        let condition_note = request.condition_note.trim();
        if condition_note.is_empty() {
            return Err(RentalError::invalid("condition_note is required"));
        }

        let mut unit = self.store.begin().await?;

        let rental = unit
            .lock_rental(request.rental_id)
            .await?
            .ok_or(RentalError::NotFound(NotFoundKind::Rental(request.rental_id)))?;
        if unit.return_exists(rental.id).await? {
            return Err(RentalError::AlreadyReturned(rental.id));
        }

        unit.lock_vehicle(rental.vehicle_id)
            .await?
            .ok_or(RentalError::NotFound(NotFoundKind::Vehicle(rental.vehicle_id)))?;
        let customer = unit
            .lock_customer(rental.customer_id)
            .await?
            .ok_or(RentalError::NotFound(NotFoundKind::Customer(
                rental.customer_id,
            )))?;
        let remaining = customer.balance.debit(request.extra_charge)?;

        unit.set_balance(customer.id, remaining).await?;
        unit.set_vehicle_status(rental.vehicle_id, VehicleStatus::Available)
            .await?;

        let now = Utc::now();
        let vehicle_return = VehicleReturn {
            id: ReturnId::new(),
            rental_id: rental.id,
            return_date: now,
            extra_charge: request.extra_charge,
            condition_note: condition_note.to_string(),
            description: request
                .description
                .as_deref()
                .map(str::trim)
                .filter(|d| !d.is_empty())
                .map(str::to_string),
            created_at: now,
            updated_at: now,
        };
        unit.insert_return(&vehicle_return).await?;
        unit.commit().await?;

        Ok(vehicle_return)
    }
}
