//! Property-based tests for rental pricing.

use chrono::{Days, NaiveDate};
use proptest::prelude::*;

use super::error::RentalError;
use super::pricing::{price, rental_days};

/// Strategy for start dates across several years, leap days included.
fn start_date() -> impl Strategy<Value = NaiveDate> {
    (0u64..3_650).prop_map(|offset| {
        NaiveDate::from_ymd_opt(2020, 1, 1).unwrap() + Days::new(offset)
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Price is rate times the day difference.
    #[test]
    fn prop_price_is_rate_times_days(
        rate in 1i64..10_000_000,
        start in start_date(),
        days in 1u64..400,
    ) {
        let end = start + Days::new(days);
        let total = price(rate, start, end).unwrap();
        prop_assert_eq!(total, rate * i64::try_from(days).unwrap());
        prop_assert_eq!(rental_days(start, end).unwrap(), i64::try_from(days).unwrap());
    }

    /// Repeated evaluation yields the same price.
    #[test]
    fn prop_price_is_deterministic(
        rate in 1i64..10_000_000,
        start in start_date(),
        days in 1u64..400,
    ) {
        let end = start + Days::new(days);
        prop_assert_eq!(price(rate, start, end), price(rate, start, end));
    }

    /// A range that does not move forward is always rejected.
    #[test]
    fn prop_non_forward_range_rejected(
        rate in 1i64..10_000_000,
        end in start_date(),
        back in 0u64..400,
    ) {
        let start = end + Days::new(back);
        let is_invalid = matches!(price(rate, start, end), Err(RentalError::InvalidInput(_)));
        prop_assert!(is_invalid);
    }
}
