//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.

pub mod customer;
pub mod employee;
pub mod rental;
pub mod store;
pub mod vehicle;
pub mod vehicle_return;

pub use customer::{CreateCustomerInput, CustomerError, CustomerRepository, UpdateCustomerInput};
pub use employee::{CreateEmployeeInput, EmployeeError, EmployeeRepository, UpdateEmployeeInput};
pub use rental::{DetailError, RentalDetail, RentalRepository};
pub use store::{PgRentalStore, PgRentalUnit};
pub use vehicle::{CreateVehicleInput, UpdateVehicleInput, VehicleError, VehicleRepository};
pub use vehicle_return::{ReturnDetail, ReturnRepository};
