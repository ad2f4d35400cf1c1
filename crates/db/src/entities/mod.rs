//! `SeaORM` entity definitions.

pub mod customers;
pub mod employees;
pub mod rental_transactions;
pub mod sea_orm_active_enums;
pub mod vehicle_returns;
pub mod vehicles;
