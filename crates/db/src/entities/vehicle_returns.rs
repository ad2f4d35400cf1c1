//! `SeaORM` Entity for vehicle_returns table.

use chrono::Utc;
use fleet_core::rental::VehicleReturn;
use fleet_shared::types::{RentalId, ReturnId};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "vehicle_returns")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub rental_id: Uuid,
    pub return_date: DateTimeWithTimeZone,
    pub extra_charge: i64,
    pub condition_note: String,
    pub description: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::rental_transactions::Entity",
        from = "Column::RentalId",
        to = "super::rental_transactions::Column::Id"
    )]
    RentalTransactions,
}

impl Related<super::rental_transactions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RentalTransactions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for VehicleReturn {
    fn from(m: Model) -> Self {
        Self {
            id: ReturnId::from_uuid(m.id),
            rental_id: RentalId::from_uuid(m.rental_id),
            return_date: m.return_date.with_timezone(&Utc),
            extra_charge: m.extra_charge,
            condition_note: m.condition_note,
            description: m.description,
            created_at: m.created_at.with_timezone(&Utc),
            updated_at: m.updated_at.with_timezone(&Utc),
        }
    }
}
