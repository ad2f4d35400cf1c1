//! `SeaORM` active enums backed by Postgres enum types.

use fleet_core::rental::VehicleStatus as DomainVehicleStatus;
use fleet_shared::Role;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "customer_role")]
pub enum CustomerRole {
    #[sea_orm(string_value = "ADMIN")]
    Admin,
    #[sea_orm(string_value = "USER")]
    User,
}

impl From<CustomerRole> for Role {
    fn from(role: CustomerRole) -> Self {
        match role {
            CustomerRole::Admin => Self::Admin,
            CustomerRole::User => Self::User,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "vehicle_status")]
pub enum VehicleStatus {
    #[sea_orm(string_value = "AVAILABLE")]
    Available,
    #[sea_orm(string_value = "NOT_AVAILABLE")]
    NotAvailable,
}

impl From<VehicleStatus> for DomainVehicleStatus {
    fn from(status: VehicleStatus) -> Self {
        match status {
            VehicleStatus::Available => Self::Available,
            VehicleStatus::NotAvailable => Self::NotAvailable,
        }
    }
}

impl From<DomainVehicleStatus> for VehicleStatus {
    fn from(status: DomainVehicleStatus) -> Self {
        match status {
            DomainVehicleStatus::Available => Self::Available,
            DomainVehicleStatus::NotAvailable => Self::NotAvailable,
        }
    }
}
