//! `SeaORM` Entity for employees table.
//!
//! Employees are soft-deleted; a row with `deleted_at` set is ignored by
//! every lookup.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "employees")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub telp: String,
    #[sea_orm(unique)]
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
    pub deleted_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::rental_transactions::Entity")]
    RentalTransactions,
}

impl Related<super::rental_transactions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RentalTransactions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
