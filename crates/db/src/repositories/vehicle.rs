//! Vehicle repository for database operations.
//!
//! Status is never written here; only the rental workflows move a vehicle
//! between `AVAILABLE` and `NOT_AVAILABLE`.

use fleet_shared::AppError;
use fleet_shared::types::VehicleId;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, QueryOrder, QuerySelect, Set,
    SqlErr, TransactionTrait,
};

use crate::entities::{sea_orm_active_enums::VehicleStatus, vehicles};

/// Error types for vehicle operations.
#[derive(Debug, thiserror::Error)]
pub enum VehicleError {
    /// Vehicle not found.
    #[error("Vehicle not found: {0}")]
    NotFound(VehicleId),

    /// Plate already belongs to another vehicle.
    #[error("Plate already registered: {0}")]
    PlateTaken(String),

    /// Daily price must be positive.
    #[error("Vehicle price must be positive, got {0}")]
    InvalidPrice(i64),

    /// Vehicle is out on a rental.
    #[error("Vehicle {0} is currently rented")]
    Rented(VehicleId),

    /// Vehicle is referenced by rental history.
    #[error("Vehicle {0} has rental history and cannot be deleted")]
    HasHistory(VehicleId),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<VehicleError> for AppError {
    fn from(e: VehicleError) -> Self {
        match e {
            VehicleError::NotFound(_) => Self::NotFound(e.to_string()),
            VehicleError::PlateTaken(_) | VehicleError::HasHistory(_) => {
                Self::Conflict(e.to_string())
            }
            VehicleError::InvalidPrice(_) => Self::Validation(e.to_string()),
            VehicleError::Rented(_) => Self::BusinessRule(e.to_string()),
            VehicleError::Database(inner) => Self::Database(inner.to_string()),
        }
    }
}

/// Input for registering a vehicle.
#[derive(Debug, Clone)]
pub struct CreateVehicleInput {
    /// Model name.
    pub name: String,
    /// Vehicle type, e.g. "matic" or "sport".
    pub vehicle_type: String,
    /// Daily price in minor units.
    pub price: i64,
    /// License plate, unique.
    pub plate: String,
    /// Production year.
    pub production_year: i32,
}

/// Input for updating a vehicle. Fields left `None` are unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateVehicleInput {
    /// New model name.
    pub name: Option<String>,
    /// New vehicle type.
    pub vehicle_type: Option<String>,
    /// New daily price.
    pub price: Option<i64>,
    /// New license plate.
    pub plate: Option<String>,
    /// New production year.
    pub production_year: Option<i32>,
}

/// Vehicle repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct VehicleRepository {
    db: DatabaseConnection,
}

fn map_write_err(e: DbErr, plate: Option<String>, id: VehicleId) -> VehicleError {
    match (e.sql_err(), plate) {
        (Some(SqlErr::UniqueConstraintViolation(_)), Some(plate)) => VehicleError::PlateTaken(plate),
        (Some(SqlErr::ForeignKeyConstraintViolation(_)), _) => VehicleError::HasHistory(id),
        _ => VehicleError::Database(e),
    }
}

impl VehicleRepository {
    /// Creates a new vehicle repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds a vehicle by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: VehicleId) -> Result<Option<vehicles::Model>, DbErr> {
        vehicles::Entity::find_by_id(id.into_inner()).one(&self.db).await
    }

    /// Lists all vehicles, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self) -> Result<Vec<vehicles::Model>, DbErr> {
        vehicles::Entity::find()
            .order_by_desc(vehicles::Column::CreatedAt)
            .all(&self.db)
            .await
    }

    /// Registers a vehicle as `AVAILABLE`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPrice` for a non-positive price and `PlateTaken` on a
    /// duplicate plate.
    pub async fn create(&self, input: CreateVehicleInput) -> Result<vehicles::Model, VehicleError> {
        if input.price <= 0 {
            return Err(VehicleError::InvalidPrice(input.price));
        }

        let id = VehicleId::new();
        let now = chrono::Utc::now().into();
        let vehicle = vehicles::ActiveModel {
            id: Set(id.into_inner()),
            name: Set(input.name),
            vehicle_type: Set(input.vehicle_type),
            price: Set(input.price),
            plate: Set(input.plate.clone()),
            production_year: Set(input.production_year),
            status: Set(VehicleStatus::Available),
            created_at: Set(now),
            updated_at: Set(now),
        };

        vehicle
            .insert(&self.db)
            .await
            .map_err(|e| map_write_err(e, Some(input.plate), id))
    }

    /// Updates descriptive fields and price.
    ///
    /// A new price applies to rentals opened afterwards; open rentals keep
    /// the price fixed when they were opened.
    ///
    /// # Errors
    ///
    /// Returns `NotFound`, `InvalidPrice`, or `PlateTaken`.
    pub async fn update(
        &self,
        id: VehicleId,
        input: UpdateVehicleInput,
    ) -> Result<vehicles::Model, VehicleError> {
        if let Some(price) = input.price.filter(|&p| p <= 0) {
            return Err(VehicleError::InvalidPrice(price));
        }

        let existing = self
            .find_by_id(id)
            .await?
            .ok_or(VehicleError::NotFound(id))?;

        let mut vehicle: vehicles::ActiveModel = existing.into();
        if let Some(name) = input.name {
            vehicle.name = Set(name);
        }
        if let Some(vehicle_type) = input.vehicle_type {
            vehicle.vehicle_type = Set(vehicle_type);
        }
        if let Some(price) = input.price {
            vehicle.price = Set(price);
        }
        if let Some(plate) = &input.plate {
            vehicle.plate = Set(plate.clone());
        }
        if let Some(production_year) = input.production_year {
            vehicle.production_year = Set(production_year);
        }

        vehicle
            .update(&self.db)
            .await
            .map_err(|e| map_write_err(e, input.plate, id))
    }

    /// Deletes a vehicle that is not out on a rental.
    ///
    /// The row is locked first so a concurrent rental open cannot reserve
    /// it between the status check and the delete.
    ///
    /// # Errors
    ///
    /// Returns `NotFound`, `Rented` while `NOT_AVAILABLE`, or `HasHistory`
    /// if rentals still reference it.
    pub async fn delete(&self, id: VehicleId) -> Result<(), VehicleError> {
        let txn = self.db.begin().await?;

        let vehicle = vehicles::Entity::find_by_id(id.into_inner())
            .lock_exclusive()
            .one(&txn)
            .await?
            .ok_or(VehicleError::NotFound(id))?;
        if vehicle.status == VehicleStatus::NotAvailable {
            return Err(VehicleError::Rented(id));
        }

        vehicles::Entity::delete_by_id(id.into_inner())
            .exec(&txn)
            .await
            .map_err(|e| map_write_err(e, None, id))?;
        txn.commit().await?;
        Ok(())
    }
}
