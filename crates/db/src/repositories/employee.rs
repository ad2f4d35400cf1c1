//! Employee repository for database operations.
//!
//! Deleting an employee only stamps `deleted_at`; rentals they handled keep
//! their reference and every lookup here skips deleted rows.

use fleet_shared::AppError;
use fleet_shared::types::EmployeeId;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set, SqlErr,
};

use crate::entities::employees;

/// Error types for employee operations.
#[derive(Debug, thiserror::Error)]
pub enum EmployeeError {
    /// Employee not found or deleted.
    #[error("Employee not found: {0}")]
    NotFound(EmployeeId),

    /// Username is already registered.
    #[error("Username already registered: {0}")]
    UsernameTaken(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<EmployeeError> for AppError {
    fn from(e: EmployeeError) -> Self {
        match e {
            EmployeeError::NotFound(_) => Self::NotFound(e.to_string()),
            EmployeeError::UsernameTaken(_) => Self::Conflict(e.to_string()),
            EmployeeError::Database(inner) => Self::Database(inner.to_string()),
        }
    }
}

/// Input for creating an employee.
#[derive(Debug, Clone)]
pub struct CreateEmployeeInput {
    /// Display name.
    pub name: String,
    /// Phone number.
    pub telp: String,
    /// Login name, unique.
    pub username: String,
    /// Argon2 PHC hash.
    pub password_hash: String,
}

/// Input for updating an employee.
#[derive(Debug, Clone, Default)]
pub struct UpdateEmployeeInput {
    /// New display name.
    pub name: Option<String>,
    /// New phone number.
    pub telp: Option<String>,
    /// New Argon2 PHC hash.
    pub password_hash: Option<String>,
}

/// Employee repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct EmployeeRepository {
    db: DatabaseConnection,
}

impl EmployeeRepository {
    /// Creates a new employee repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds an active employee by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: EmployeeId) -> Result<Option<employees::Model>, DbErr> {
        employees::Entity::find_by_id(id.into_inner())
            .filter(employees::Column::DeletedAt.is_null())
            .one(&self.db)
            .await
    }

    /// Finds an active employee by username.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<employees::Model>, DbErr> {
        employees::Entity::find()
            .filter(employees::Column::Username.eq(username))
            .filter(employees::Column::DeletedAt.is_null())
            .one(&self.db)
            .await
    }

    /// Lists active employees, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self) -> Result<Vec<employees::Model>, DbErr> {
        employees::Entity::find()
            .filter(employees::Column::DeletedAt.is_null())
            .order_by_desc(employees::Column::CreatedAt)
            .all(&self.db)
            .await
    }

    /// Creates an employee.
    ///
    /// # Errors
    ///
    /// Returns `UsernameTaken` on a duplicate username, including one held
    /// by a deleted employee.
    pub async fn create(
        &self,
        input: CreateEmployeeInput,
    ) -> Result<employees::Model, EmployeeError> {
        let now = chrono::Utc::now().into();
        let employee = employees::ActiveModel {
            id: Set(EmployeeId::new().into_inner()),
            name: Set(input.name),
            telp: Set(input.telp),
            username: Set(input.username.clone()),
            password_hash: Set(input.password_hash),
            created_at: Set(now),
            updated_at: Set(now),
            deleted_at: Set(None),
        };

        employee.insert(&self.db).await.map_err(|e| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                EmployeeError::UsernameTaken(input.username)
            }
            _ => EmployeeError::Database(e),
        })
    }

    /// Updates an active employee. Fields left `None` are unchanged.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the employee does not exist or was deleted.
    pub async fn update(
        &self,
        id: EmployeeId,
        input: UpdateEmployeeInput,
    ) -> Result<employees::Model, EmployeeError> {
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or(EmployeeError::NotFound(id))?;

        let mut employee: employees::ActiveModel = existing.into();
        if let Some(name) = input.name {
            employee.name = Set(name);
        }
        if let Some(telp) = input.telp {
            employee.telp = Set(telp);
        }
        if let Some(password_hash) = input.password_hash {
            employee.password_hash = Set(password_hash);
        }

        Ok(employee.update(&self.db).await?)
    }

    /// Soft-deletes an active employee.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the employee does not exist or was deleted.
    pub async fn soft_delete(&self, id: EmployeeId) -> Result<(), EmployeeError> {
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or(EmployeeError::NotFound(id))?;

        let mut employee: employees::ActiveModel = existing.into();
        employee.deleted_at = Set(Some(chrono::Utc::now().into()));
        employee.update(&self.db).await?;
        Ok(())
    }
}
