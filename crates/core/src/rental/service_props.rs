//! Property-based tests for the rental workflows.
//!
//! Random sequences of opens and closes are replayed against the in-memory
//! store; after every call the ledger and fleet invariants must hold,
//! whether the call succeeded or not.

use std::sync::Arc;

use chrono::{Days, NaiveDate};
use fleet_shared::types::{CustomerId, RentalId, VehicleId};
use proptest::collection::vec;
use proptest::prelude::*;

use super::memory::{MemoryState, MemoryStore};
use super::{CloseRentalRequest, OpenRentalRequest, RentalService, VehicleStatus};

#[derive(Debug, Clone)]
enum Op {
    Open {
        customer: usize,
        vehicle: usize,
        days: u64,
    },
    Close {
        rental: usize,
        extra_charge: i64,
    },
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..3usize, 0..3usize, 1u64..6).prop_map(|(customer, vehicle, days)| Op::Open {
            customer,
            vehicle,
            days
        }),
        (0..8usize, 0i64..20_000).prop_map(|(rental, extra_charge)| Op::Close {
            rental,
            extra_charge
        }),
    ]
}

/// Checks balances, vehicle statuses and money conservation.
fn check_invariants(
    state: &MemoryState,
    customers: &[CustomerId],
    vehicles: &[VehicleId],
    initial_total: i64,
) -> Result<(), TestCaseError> {
    for &customer in customers {
        prop_assert!(state.balance(customer) >= 0);
    }

    for &vehicle in vehicles {
        let active = state
            .rentals
            .values()
            .filter(|r| r.vehicle_id == vehicle)
            .filter(|r| !state.returns.iter().any(|ret| ret.rental_id == r.id))
            .count();
        prop_assert!(active <= 1);
        prop_assert_eq!(
            state.status(vehicle) == VehicleStatus::NotAvailable,
            active == 1
        );
    }

    let spent: i64 = state.rentals.values().map(|r| r.price).sum::<i64>()
        + state.returns.iter().map(|r| r.extra_charge).sum::<i64>();
    let held: i64 = customers.iter().map(|&c| state.balance(c)).sum();
    prop_assert_eq!(held + spent, initial_total);
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_invariants_hold_across_sequences(
        balances in vec(0i64..60_000, 3),
        prices in vec(1_000i64..15_000, 3),
        ops in vec(op_strategy(), 1..30),
    ) {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap();

        runtime.block_on(async {
            let mut state = MemoryState::default();
            let customers: Vec<_> = balances.iter().map(|&b| state.add_customer(b)).collect();
            let vehicles: Vec<_> = prices.iter().map(|&p| state.add_vehicle(p)).collect();
            let employee = state.add_employee();
            let store = Arc::new(MemoryStore::new(state));
            let service = RentalService::new(Arc::clone(&store));
            let initial_total: i64 = balances.iter().sum();
            let start = NaiveDate::from_ymd_opt(2024, 9, 13).unwrap();
            let mut opened: Vec<RentalId> = Vec::new();

            for op in ops {
                match op {
                    Op::Open { customer, vehicle, days } => {
                        let result = service
                            .open_rental(OpenRentalRequest {
                                customer_id: customers[customer],
                                vehicle_id: vehicles[vehicle],
                                employee_id: employee,
                                start_date: start,
                                end_date: start + Days::new(days),
                            })
                            .await;
                        if let Ok(rental) = result {
                            opened.push(rental.id);
                        }
                    }
                    Op::Close { rental, extra_charge } => {
                        let rental_id = if opened.is_empty() {
                            RentalId::new()
                        } else {
                            opened[rental % opened.len()]
                        };
                        let _ = service
                            .close_rental(CloseRentalRequest {
                                rental_id,
                                condition_note: "ok".to_string(),
                                description: None,
                                extra_charge,
                            })
                            .await;
                    }
                }

                let state = store.snapshot().await;
                check_invariants(&state, &customers, &vehicles, initial_total)?;
            }
            Ok::<(), TestCaseError>(())
        })?;
    }
}
