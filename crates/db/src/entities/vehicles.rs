//! `SeaORM` Entity for vehicles table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::VehicleStatus;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "vehicles")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    #[sea_orm(column_name = "type")]
    pub vehicle_type: String,
    pub price: i64,
    #[sea_orm(unique)]
    pub plate: String,
    pub production_year: i32,
    pub status: VehicleStatus,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
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
