//! Credential hashing for customer and employee accounts.

mod password;

pub use password::{PasswordError, hash_password, verify_password};
