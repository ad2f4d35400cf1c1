//! `SeaORM` Entity for rental_transactions table.

use chrono::Utc;
use fleet_core::rental::RentalTransaction;
use fleet_shared::types::{CustomerId, EmployeeId, RentalId, VehicleId};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "rental_transactions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub customer_id: Uuid,
    pub vehicle_id: Uuid,
    pub employee_id: Uuid,
    pub start_date: Date,
    pub end_date: Date,
    pub price: i64,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::customers::Entity",
        from = "Column::CustomerId",
        to = "super::customers::Column::Id"
    )]
    Customers,
    #[sea_orm(
        belongs_to = "super::vehicles::Entity",
        from = "Column::VehicleId",
        to = "super::vehicles::Column::Id"
    )]
    Vehicles,
    #[sea_orm(
        belongs_to = "super::employees::Entity",
        from = "Column::EmployeeId",
        to = "super::employees::Column::Id"
    )]
    Employees,
    #[sea_orm(has_one = "super::vehicle_returns::Entity")]
    VehicleReturns,
}

impl Related<super::customers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Customers.def()
    }
}

impl Related<super::vehicles::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Vehicles.def()
    }
}

impl Related<super::employees::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Employees.def()
    }
}

impl Related<super::vehicle_returns::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::VehicleReturns.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for RentalTransaction {
    fn from(m: Model) -> Self {
        Self {
            id: RentalId::from_uuid(m.id),
            customer_id: CustomerId::from_uuid(m.customer_id),
            vehicle_id: VehicleId::from_uuid(m.vehicle_id),
            employee_id: EmployeeId::from_uuid(m.employee_id),
            start_date: m.start_date,
            end_date: m.end_date,
            price: m.price,
            created_at: m.created_at.with_timezone(&Utc),
            updated_at: m.updated_at.with_timezone(&Utc),
        }
    }
}
