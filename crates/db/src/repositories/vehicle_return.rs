//! Return read model: returns joined with their rental and the rental's
//! customer.

use std::collections::HashMap;

use fleet_shared::types::ReturnId;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use serde::Serialize;
use uuid::Uuid;

use super::rental::{DetailError, load_customers, take};
use crate::entities::{customers, rental_transactions, vehicle_returns};

/// A return with its rental and customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReturnDetail {
    /// The return itself.
    pub vehicle_return: vehicle_returns::Model,
    /// Rental the return closed.
    pub rental: rental_transactions::Model,
    /// Customer who rented the vehicle.
    pub customer: customers::Model,
}

/// Return repository for detail reads.
#[derive(Debug, Clone)]
pub struct ReturnRepository {
    db: DatabaseConnection,
}

impl ReturnRepository {
    /// Creates a new return repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Loads one return with its rental and customer.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the return or any row it references is missing.
    pub async fn get_detail(&self, id: ReturnId) -> Result<ReturnDetail, DetailError> {
        let missing = DetailError::NotFound {
            entity: "return",
            id: id.into_inner(),
        };
        let Some(vehicle_return) = vehicle_returns::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await?
        else {
            return Err(missing);
        };
        self.attach(vec![vehicle_return]).await?.pop().ok_or(missing)
    }

    /// Loads every return with its references, newest first.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if any referenced row is missing.
    pub async fn list_details(&self) -> Result<Vec<ReturnDetail>, DetailError> {
        let returns = vehicle_returns::Entity::find()
            .order_by_desc(vehicle_returns::Column::CreatedAt)
            .all(&self.db)
            .await?;
        self.attach(returns).await
    }

    async fn attach(
        &self,
        returns: Vec<vehicle_returns::Model>,
    ) -> Result<Vec<ReturnDetail>, DetailError> {
        let rental_ids: Vec<Uuid> = returns.iter().map(|r| r.rental_id).collect();
        let rentals: HashMap<Uuid, rental_transactions::Model> =
            rental_transactions::Entity::find()
                .filter(rental_transactions::Column::Id.is_in(rental_ids))
                .all(&self.db)
                .await?
                .into_iter()
                .map(|m| (m.id, m))
                .collect();
        let customers = load_customers(&self.db, rentals.values().map(|r| r.customer_id)).await?;

        returns
            .into_iter()
            .map(|vehicle_return| {
                let rental = take(&rentals, "rental", vehicle_return.rental_id)?;
                let customer = take(&customers, "customer", rental.customer_id)?;
                Ok(ReturnDetail {
                    vehicle_return,
                    rental,
                    customer,
                })
            })
            .collect()
    }
}
