//! Core business logic for the fleet rental backend.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! Persistence is reached only through the traits in [`rental::store`].
//!
//! # Modules
//!
//! - `rental` - Pricing, balance ledger, availability, and the open/close workflows
//! - `auth` - Password hashing

pub mod auth;
pub mod rental;
