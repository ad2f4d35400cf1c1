//! Rental settlement.
//!
//! This module implements the rental core:
//! - Pricing by whole days
//! - The customer balance ledger
//! - Vehicle availability rules
//! - The opening and closing workflows, generic over a persistence trait
//! - Error types shared by all of the above

pub mod availability;
pub mod error;
pub mod ledger;
pub mod pricing;
pub mod service;
pub mod store;
pub mod types;

#[cfg(test)]
mod memory;
#[cfg(test)]
mod pricing_props;
#[cfg(test)]
mod service_props;

pub use availability::check_available;
pub use error::{NotFoundKind, RentalError, StoreError};
pub use ledger::Balance;
pub use service::RentalService;
pub use store::{RentalStore, RentalUnit};
pub use types::{
    CloseRentalRequest, CustomerAccount, OpenRentalRequest, RentalTransaction, VehicleReturn,
    VehicleSnapshot, VehicleStatus,
};
