//! Rental read model: rentals joined with their vehicle, employee, and
//! customer.

use std::collections::{HashMap, HashSet};

use fleet_shared::AppError;
use fleet_shared::types::RentalId;
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder};
use serde::Serialize;
use uuid::Uuid;

use crate::entities::{customers, employees, rental_transactions, vehicles};

/// Error types for detail reads.
#[derive(Debug, thiserror::Error)]
pub enum DetailError {
    /// The requested row or a row it references is missing.
    #[error("{entity} {id} not found")]
    NotFound {
        /// Table-level name of the missing entity.
        entity: &'static str,
        /// Missing ID.
        id: Uuid,
    },

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<DetailError> for AppError {
    fn from(e: DetailError) -> Self {
        match e {
            DetailError::NotFound { .. } => Self::NotFound(e.to_string()),
            DetailError::Database(inner) => Self::Database(inner.to_string()),
        }
    }
}

/// A rental with the rows it references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RentalDetail {
    /// The rental itself.
    pub rental: rental_transactions::Model,
    /// Rented vehicle.
    pub vehicle: vehicles::Model,
    /// Employee who handled the rental (may since have been deleted).
    pub employee: employees::Model,
    /// Renting customer.
    pub customer: customers::Model,
}

/// Rental repository for detail reads.
#[derive(Debug, Clone)]
pub struct RentalRepository {
    db: DatabaseConnection,
}

impl RentalRepository {
    /// Creates a new rental repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds a rental row by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(
        &self,
        id: RentalId,
    ) -> Result<Option<rental_transactions::Model>, DbErr> {
        rental_transactions::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await
    }

    /// Loads one rental with its vehicle, employee, and customer.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the rental or any row it references is missing.
    pub async fn get_detail(&self, id: RentalId) -> Result<RentalDetail, DetailError> {
        let rental = self.find_by_id(id).await?.ok_or(DetailError::NotFound {
            entity: "rental",
            id: id.into_inner(),
        })?;
        let mut details = self.attach(vec![rental]).await?;
        details.pop().ok_or(DetailError::NotFound {
            entity: "rental",
            id: id.into_inner(),
        })
    }

    /// Loads every rental with its references, newest first.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if any referenced row is missing.
    pub async fn list_details(&self) -> Result<Vec<RentalDetail>, DetailError> {
        let rentals = rental_transactions::Entity::find()
            .order_by_desc(rental_transactions::Column::CreatedAt)
            .all(&self.db)
            .await?;
        self.attach(rentals).await
    }

    async fn attach(
        &self,
        rentals: Vec<rental_transactions::Model>,
    ) -> Result<Vec<RentalDetail>, DetailError> {
        let vehicles = load_vehicles(&self.db, rentals.iter().map(|r| r.vehicle_id)).await?;
        let employees = load_employees(&self.db, rentals.iter().map(|r| r.employee_id)).await?;
        let customers = load_customers(&self.db, rentals.iter().map(|r| r.customer_id)).await?;

        rentals
            .into_iter()
            .map(|rental| {
                Ok(RentalDetail {
                    vehicle: take(&vehicles, "vehicle", rental.vehicle_id)?,
                    employee: take(&employees, "employee", rental.employee_id)?,
                    customer: take(&customers, "customer", rental.customer_id)?,
                    rental,
                })
            })
            .collect()
    }
}

/// Clones a referenced row out of a batch-loaded map.
pub(crate) fn take<M: Clone>(
    rows: &HashMap<Uuid, M>,
    entity: &'static str,
    id: Uuid,
) -> Result<M, DetailError> {
    rows.get(&id)
        .cloned()
        .ok_or(DetailError::NotFound { entity, id })
}

fn unique(ids: impl Iterator<Item = Uuid>) -> Vec<Uuid> {
    ids.collect::<HashSet<_>>().into_iter().collect()
}

async fn load_vehicles(
    db: &DatabaseConnection,
    ids: impl Iterator<Item = Uuid>,
) -> Result<HashMap<Uuid, vehicles::Model>, DbErr> {
    let rows = vehicles::Entity::find()
        .filter(vehicles::Column::Id.is_in(unique(ids)))
        .all(db)
        .await?;
    Ok(rows.into_iter().map(|m| (m.id, m)).collect())
}

async fn load_employees(
    db: &DatabaseConnection,
    ids: impl Iterator<Item = Uuid>,
) -> Result<HashMap<Uuid, employees::Model>, DbErr> {
    let rows = employees::Entity::find()
        .filter(employees::Column::Id.is_in(unique(ids)))
        .all(db)
        .await?;
    Ok(rows.into_iter().map(|m| (m.id, m)).collect())
}

pub(crate) async fn load_customers(
    db: &DatabaseConnection,
    ids: impl Iterator<Item = Uuid>,
) -> Result<HashMap<Uuid, customers::Model>, DbErr> {
    let rows = customers::Entity::find()
        .filter(customers::Column::Id.is_in(unique(ids)))
        .all(db)
        .await?;
    Ok(rows.into_iter().map(|m| (m.id, m)).collect())
}
