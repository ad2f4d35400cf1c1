//! Customer repository for database operations.

use fleet_core::rental::{Balance, RentalError};
use fleet_shared::AppError;
use fleet_shared::types::CustomerId;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, SqlErr, TransactionTrait,
};
use tracing::info;

use crate::entities::{customers, sea_orm_active_enums::CustomerRole};

/// Error types for customer operations.
#[derive(Debug, thiserror::Error)]
pub enum CustomerError {
    /// Customer not found.
    #[error("Customer not found: {0}")]
    NotFound(CustomerId),

    /// Username is already registered.
    #[error("Username already registered: {0}")]
    UsernameTaken(String),

    /// Balance rule violated.
    #[error(transparent)]
    Ledger(#[from] RentalError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<CustomerError> for AppError {
    fn from(e: CustomerError) -> Self {
        match e {
            CustomerError::NotFound(_) => Self::NotFound(e.to_string()),
            CustomerError::UsernameTaken(_) => Self::Conflict(e.to_string()),
            CustomerError::Ledger(inner) => inner.into(),
            CustomerError::Database(inner) => Self::Database(inner.to_string()),
        }
    }
}

/// Input for registering a customer.
#[derive(Debug, Clone)]
pub struct CreateCustomerInput {
    /// Display name.
    pub name: String,
    /// Login name, unique.
    pub username: String,
    /// Argon2 PHC hash.
    pub password_hash: String,
    /// Postal address.
    pub address: String,
    /// Phone number.
    pub telp: String,
    /// Customer role.
    pub role: CustomerRole,
}

/// Profile fields a customer may change.
#[derive(Debug, Clone, Default)]
pub struct UpdateCustomerInput {
    /// New display name.
    pub name: Option<String>,
    /// New postal address.
    pub address: Option<String>,
    /// New phone number.
    pub telp: Option<String>,
}

/// Customer repository for CRUD and balance top-ups.
#[derive(Debug, Clone)]
pub struct CustomerRepository {
    db: DatabaseConnection,
}

impl CustomerRepository {
    /// Creates a new customer repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds a customer by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: CustomerId) -> Result<Option<customers::Model>, DbErr> {
        customers::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await
    }

    /// Finds a customer by username.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<customers::Model>, DbErr> {
        customers::Entity::find()
            .filter(customers::Column::Username.eq(username))
            .one(&self.db)
            .await
    }

    /// Lists all customers, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self) -> Result<Vec<customers::Model>, DbErr> {
        customers::Entity::find()
            .order_by_desc(customers::Column::CreatedAt)
            .all(&self.db)
            .await
    }

    /// Registers a customer with a zero balance.
    ///
    /// # Errors
    ///
    /// Returns `UsernameTaken` on a duplicate username.
    pub async fn create(&self, input: CreateCustomerInput) -> Result<customers::Model, CustomerError> {
        let now = chrono::Utc::now().into();
        let customer = customers::ActiveModel {
            id: Set(CustomerId::new().into_inner()),
            name: Set(input.name),
            username: Set(input.username.clone()),
            password_hash: Set(input.password_hash),
            address: Set(input.address),
            telp: Set(input.telp),
            role: Set(input.role),
            balance: Set(Balance::ZERO.amount()),
            created_at: Set(now),
            updated_at: Set(now),
        };

        customer.insert(&self.db).await.map_err(|e| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                CustomerError::UsernameTaken(input.username)
            }
            _ => CustomerError::Database(e),
        })
    }

    /// Updates profile fields. Fields left `None` are unchanged.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the customer does not exist.
    pub async fn update_profile(
        &self,
        id: CustomerId,
        input: UpdateCustomerInput,
    ) -> Result<customers::Model, CustomerError> {
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or(CustomerError::NotFound(id))?;

        let mut customer: customers::ActiveModel = existing.into();
        if let Some(name) = input.name {
            customer.name = Set(name);
        }
        if let Some(address) = input.address {
            customer.address = Set(address);
        }
        if let Some(telp) = input.telp {
            customer.telp = Set(telp);
        }

        Ok(customer.update(&self.db).await?)
    }

    /// Replaces the stored password hash.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the customer does not exist.
    pub async fn set_password_hash(
        &self,
        id: CustomerId,
        password_hash: String,
    ) -> Result<(), CustomerError> {
        let result = customers::Entity::update_many()
            .col_expr(
                customers::Column::PasswordHash,
                sea_orm::sea_query::Expr::value(password_hash),
            )
            .filter(customers::Column::Id.eq(id.into_inner()))
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(CustomerError::NotFound(id));
        }
        Ok(())
    }

    /// Credits `amount` to a customer's balance under a row lock.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the customer does not exist, and `Ledger` if the
    /// amount is not positive or the balance would overflow.
    pub async fn top_up(&self, id: CustomerId, amount: i64) -> Result<Balance, CustomerError> {
        let txn = self.db.begin().await?;

        let customer = customers::Entity::find_by_id(id.into_inner())
            .lock_exclusive()
            .one(&txn)
            .await?
            .ok_or(CustomerError::NotFound(id))?;
        let balance = Balance::new(customer.balance)?.credit(amount)?;

        customers::ActiveModel {
            id: Set(customer.id),
            balance: Set(balance.amount()),
            ..Default::default()
        }
        .update(&txn)
        .await?;

        txn.commit().await?;

        info!(customer_id = %id, amount, balance = balance.amount(), "Balance topped up");
        Ok(balance)
    }
}
