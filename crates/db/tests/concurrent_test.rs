//! Concurrent access tests for the rental workflows.
//!
//! These tests verify that:
//! - Concurrent opens on one vehicle reserve it exactly once
//! - Concurrent opens by one customer never overdraw the balance
//! - Concurrent top-ups all land

mod common;

use std::sync::Arc;

use chrono::NaiveDate;
use fleet_core::rental::{OpenRentalRequest, RentalError, RentalService};
use fleet_db::repositories::{CustomerRepository, PgRentalStore};
use fleet_shared::types::{CustomerId, VehicleId};
use futures::future::join_all;
use tokio::sync::Barrier;

use common::{STATEMENT_TIMEOUT, connect, insert_customer, insert_employee, insert_vehicle};

fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_opens_reserve_vehicle_once() {
    const CONCURRENT: usize = 10;

    let Some(db) = connect().await else {
        return;
    };
    let vehicle = insert_vehicle(&db, 10_000).await.unwrap();
    let employee = insert_employee(&db).await.unwrap();
    let mut customers: Vec<CustomerId> = Vec::with_capacity(CONCURRENT);
    for _ in 0..CONCURRENT {
        customers.push(insert_customer(&db, 100_000).await.unwrap());
    }

    let service = RentalService::new(Arc::new(PgRentalStore::new(db.clone(), STATEMENT_TIMEOUT)));
    let barrier = Arc::new(Barrier::new(CONCURRENT));

    let handles = customers.iter().map(|&customer_id| {
        let service = service.clone();
        let barrier = Arc::clone(&barrier);
        tokio::spawn(async move {
            barrier.wait().await;
            service
                .open_rental(OpenRentalRequest {
                    customer_id,
                    vehicle_id: vehicle,
                    employee_id: employee,
                    start_date: date("2024-09-13"),
                    end_date: date("2024-09-15"),
                })
                .await
        })
    });
    let results: Vec<_> = join_all(handles)
        .await
        .into_iter()
        .map(|joined| joined.expect("task panicked"))
        .collect();

    let opened = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(opened, 1, "results: {results:?}");
    for err in results.iter().filter_map(|r| r.as_ref().err()) {
        assert_eq!(*err, RentalError::VehicleUnavailable(vehicle));
    }

    let repo = CustomerRepository::new(db.clone());
    let mut total = 0;
    for &customer in &customers {
        total += repo.find_by_id(customer).await.unwrap().unwrap().balance;
    }
    assert_eq!(total, 100_000 * 10 - 20_000);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_opens_never_overdraw() {
    let Some(db) = connect().await else {
        return;
    };
    let customer = insert_customer(&db, 30_000).await.unwrap();
    let employee = insert_employee(&db).await.unwrap();
    let mut vehicles: Vec<VehicleId> = Vec::new();
    for _ in 0..5 {
        vehicles.push(insert_vehicle(&db, 10_000).await.unwrap());
    }

    let service = RentalService::new(Arc::new(PgRentalStore::new(db.clone(), STATEMENT_TIMEOUT)));
    let barrier = Arc::new(Barrier::new(vehicles.len()));

    let handles = vehicles.iter().map(|&vehicle_id| {
        let service = service.clone();
        let barrier = Arc::clone(&barrier);
        tokio::spawn(async move {
            barrier.wait().await;
            service
                .open_rental(OpenRentalRequest {
                    customer_id: customer,
                    vehicle_id,
                    employee_id: employee,
                    start_date: date("2024-09-13"),
                    end_date: date("2024-09-15"),
                })
                .await
        })
    });
    let results: Vec<_> = join_all(handles)
        .await
        .into_iter()
        .map(|joined| joined.expect("task panicked"))
        .collect();

    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    let balance = CustomerRepository::new(db)
        .find_by_id(customer)
        .await
        .unwrap()
        .unwrap()
        .balance;
    assert_eq!(balance, 10_000);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_top_ups_all_land() {
    const CONCURRENT: usize = 20;

    let Some(db) = connect().await else {
        return;
    };
    let customer = insert_customer(&db, 0).await.unwrap();
    let repo = CustomerRepository::new(db);
    let barrier = Arc::new(Barrier::new(CONCURRENT));

    let handles = (0..CONCURRENT).map(|_| {
        let repo = repo.clone();
        let barrier = Arc::clone(&barrier);
        tokio::spawn(async move {
            barrier.wait().await;
            repo.top_up(customer, 1_000).await
        })
    });
    for joined in join_all(handles).await {
        joined.expect("task panicked").unwrap();
    }

    let balance = repo.find_by_id(customer).await.unwrap().unwrap().balance;
    assert_eq!(balance, 20_000);
}
