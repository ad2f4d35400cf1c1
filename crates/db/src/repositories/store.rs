//! Postgres implementation of the rental persistence traits.
//!
//! A unit is a database transaction at READ COMMITTED. Rows the workflows
//! validate are read with `SELECT ... FOR UPDATE`, so a concurrent unit
//! touching the same vehicle or customer blocks until this one ends and
//! then sees its committed writes.

use std::time::Duration;

use fleet_core::rental::{
    Balance, CustomerAccount, RentalStore, RentalTransaction, RentalUnit, StoreError,
    VehicleReturn, VehicleSnapshot, VehicleStatus,
};
use fleet_shared::types::{CustomerId, EmployeeId, RentalId, VehicleId};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DatabaseTransaction,
    DbErr, EntityTrait, PaginatorTrait, QueryFilter, QuerySelect, Set, TransactionTrait,
};
use tracing::debug;

use crate::entities::{
    customers, employees, rental_transactions, vehicle_returns, vehicles,
};

fn store_err(e: DbErr) -> StoreError {
    StoreError::new(e.to_string())
}

/// Opens rental units on a Postgres connection pool.
#[derive(Debug, Clone)]
pub struct PgRentalStore {
    db: DatabaseConnection,
    statement_timeout: Duration,
}

impl PgRentalStore {
    /// Creates a store whose units abort any statement running longer than
    /// `statement_timeout`.
    #[must_use]
    pub const fn new(db: DatabaseConnection, statement_timeout: Duration) -> Self {
        Self {
            db,
            statement_timeout,
        }
    }
}

impl RentalStore for PgRentalStore {
    type Unit = PgRentalUnit;

    async fn begin(&self) -> Result<PgRentalUnit, StoreError> {
        let txn = self.db.begin().await.map_err(store_err)?;
        txn.execute_unprepared(&format!(
            "SET LOCAL statement_timeout = {}",
            self.statement_timeout.as_millis()
        ))
        .await
        .map_err(store_err)?;
        Ok(PgRentalUnit { txn })
    }
}

/// One rental unit. Dropping it without `commit` rolls the transaction back.
pub struct PgRentalUnit {
    txn: DatabaseTransaction,
}

impl RentalUnit for PgRentalUnit {
    async fn lock_rental(&mut self, id: RentalId) -> Result<Option<RentalTransaction>, StoreError> {
        let row = rental_transactions::Entity::find_by_id(id.into_inner())
            .lock_exclusive()
            .one(&self.txn)
            .await
            .map_err(store_err)?;
        Ok(row.map(RentalTransaction::from))
    }

    async fn lock_vehicle(&mut self, id: VehicleId) -> Result<Option<VehicleSnapshot>, StoreError> {
        let row = vehicles::Entity::find_by_id(id.into_inner())
            .lock_exclusive()
            .one(&self.txn)
            .await
            .map_err(store_err)?;
        Ok(row.map(|v| VehicleSnapshot {
            id,
            daily_price: v.price,
            status: v.status.into(),
        }))
    }

    async fn lock_customer(
        &mut self,
        id: CustomerId,
    ) -> Result<Option<CustomerAccount>, StoreError> {
        let Some(row) = customers::Entity::find_by_id(id.into_inner())
            .lock_exclusive()
            .one(&self.txn)
            .await
            .map_err(store_err)?
        else {
            return Ok(None);
        };
        let balance = Balance::new(row.balance).map_err(|e| StoreError::new(e.to_string()))?;
        Ok(Some(CustomerAccount { id, balance }))
    }

    async fn employee_exists(&mut self, id: EmployeeId) -> Result<bool, StoreError> {
        // FOR SHARE keeps the employee from being soft-deleted until commit.
        let row = employees::Entity::find_by_id(id.into_inner())
            .filter(employees::Column::DeletedAt.is_null())
            .lock_shared()
            .one(&self.txn)
            .await
            .map_err(store_err)?;
        Ok(row.is_some())
    }

    async fn return_exists(&mut self, rental_id: RentalId) -> Result<bool, StoreError> {
        let count = vehicle_returns::Entity::find()
            .filter(vehicle_returns::Column::RentalId.eq(rental_id.into_inner()))
            .count(&self.txn)
            .await
            .map_err(store_err)?;
        Ok(count > 0)
    }

    async fn set_balance(&mut self, id: CustomerId, balance: Balance) -> Result<(), StoreError> {
        customers::ActiveModel {
            id: Set(id.into_inner()),
            balance: Set(balance.amount()),
            ..Default::default()
        }
        .update(&self.txn)
        .await
        .map_err(store_err)?;
        Ok(())
    }

    async fn set_vehicle_status(
        &mut self,
        id: VehicleId,
        status: VehicleStatus,
    ) -> Result<(), StoreError> {
        vehicles::ActiveModel {
            id: Set(id.into_inner()),
            status: Set(status.into()),
            ..Default::default()
        }
        .update(&self.txn)
        .await
        .map_err(store_err)?;
        Ok(())
    }

    async fn insert_rental(&mut self, rental: &RentalTransaction) -> Result<(), StoreError> {
        rental_transactions::ActiveModel {
            id: Set(rental.id.into_inner()),
            customer_id: Set(rental.customer_id.into_inner()),
            vehicle_id: Set(rental.vehicle_id.into_inner()),
            employee_id: Set(rental.employee_id.into_inner()),
            start_date: Set(rental.start_date),
            end_date: Set(rental.end_date),
            price: Set(rental.price),
            created_at: Set(rental.created_at.into()),
            updated_at: Set(rental.updated_at.into()),
        }
        .insert(&self.txn)
        .await
        .map_err(store_err)?;
        Ok(())
    }

    async fn insert_return(&mut self, vehicle_return: &VehicleReturn) -> Result<(), StoreError> {
        vehicle_returns::ActiveModel {
            id: Set(vehicle_return.id.into_inner()),
            rental_id: Set(vehicle_return.rental_id.into_inner()),
            return_date: Set(vehicle_return.return_date.into()),
            extra_charge: Set(vehicle_return.extra_charge),
            condition_note: Set(vehicle_return.condition_note.clone()),
            description: Set(vehicle_return.description.clone()),
            created_at: Set(vehicle_return.created_at.into()),
            updated_at: Set(vehicle_return.updated_at.into()),
        }
        .insert(&self.txn)
        .await
        .map_err(store_err)?;
        Ok(())
    }

    async fn commit(self) -> Result<(), StoreError> {
        self.txn.commit().await.map_err(store_err)?;
        debug!("Rental unit committed");
        Ok(())
    }
}
