//! Rental pricing.
//!
//! A rental is priced as `daily_rate * days`, where `days = end - start`.

use chrono::NaiveDate;

use super::error::RentalError;

/// Whole days between `start` and `end`.
///
/// # Errors
///
/// `InvalidInput` unless `start < end`.
pub fn rental_days(start: NaiveDate, end: NaiveDate) -> Result<i64, RentalError> {
    if start >= end {
        return Err(RentalError::invalid(format!(
            "end_date ({end}) must be after start_date ({start})"
        )));
    }
    Ok((end - start).num_days())
}

/// Total price of renting at `daily_rate` from `start` to `end`.
///
/// # Errors
///
/// `InvalidInput` for a non-positive rate, an empty or inverted range, or
/// a total that overflows `i64`.
pub fn price(daily_rate: i64, start: NaiveDate, end: NaiveDate) -> Result<i64, RentalError> {
    if daily_rate <= 0 {
        return Err(RentalError::invalid(format!(
            "daily rate must be positive, got {daily_rate}"
        )));
    }
    let days = rental_days(start, end)?;
    daily_rate
        .checked_mul(days)
        .ok_or_else(|| RentalError::invalid("rental price overflows"))
}
