//! In-memory [`RentalStore`] for workflow tests.
//!
//! A unit holds the whole store for its lifetime, which is stricter than
//! row locks but gives the same guarantees to the workflows. Writes go to a
//! staged copy that replaces the committed state only on `commit`.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex as StdMutex};

use fleet_shared::types::{CustomerId, EmployeeId, RentalId, VehicleId};
use tokio::sync::{Mutex, OwnedMutexGuard};

use super::error::StoreError;
use super::ledger::Balance;
use super::store::{RentalStore, RentalUnit};
use super::types::{
    CustomerAccount, RentalTransaction, VehicleReturn, VehicleSnapshot, VehicleStatus,
};

/// Committed contents of the store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryState {
    pub vehicles: HashMap<VehicleId, VehicleSnapshot>,
    pub balances: HashMap<CustomerId, Balance>,
    pub employees: HashSet<EmployeeId>,
    pub rentals: HashMap<RentalId, RentalTransaction>,
    pub returns: Vec<VehicleReturn>,
}

impl MemoryState {
    pub fn add_vehicle(&mut self, daily_price: i64) -> VehicleId {
        let id = VehicleId::new();
        self.vehicles.insert(
            id,
            VehicleSnapshot {
                id,
                daily_price,
                status: VehicleStatus::Available,
            },
        );
        id
    }

    pub fn add_customer(&mut self, balance: i64) -> CustomerId {
        let id = CustomerId::new();
        self.balances.insert(id, Balance::new(balance).unwrap());
        id
    }

    pub fn add_employee(&mut self) -> EmployeeId {
        let id = EmployeeId::new();
        self.employees.insert(id);
        id
    }

    pub fn balance(&self, id: CustomerId) -> i64 {
        self.balances[&id].amount()
    }

    pub fn status(&self, id: VehicleId) -> VehicleStatus {
        self.vehicles[&id].status
    }
}

/// Step at which an injected failure fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Begin,
    LockRental,
    LockVehicle,
    LockCustomer,
    EmployeeExists,
    ReturnExists,
    SetBalance,
    SetVehicleStatus,
    InsertRental,
    InsertReturn,
    Commit,
}

pub struct MemoryStore {
    state: Arc<Mutex<MemoryState>>,
    fail_at: StdMutex<Option<Step>>,
}

impl MemoryStore {
    pub fn new(state: MemoryState) -> Self {
        Self {
            state: Arc::new(Mutex::new(state)),
            fail_at: StdMutex::new(None),
        }
    }

    /// Makes every unit begun from now on fail at `step`.
    pub fn fail_at(&self, step: Option<Step>) {
        *self.fail_at.lock().unwrap() = step;
    }

    pub async fn snapshot(&self) -> MemoryState {
        self.state.lock().await.clone()
    }
}

pub struct MemoryUnit {
    committed: OwnedMutexGuard<MemoryState>,
    staged: MemoryState,
    fail_at: Option<Step>,
}

impl MemoryUnit {
    fn check(&self, step: Step) -> Result<(), StoreError> {
        if self.fail_at == Some(step) {
            return Err(StoreError::new(format!("injected failure at {step:?}")));
        }
        Ok(())
    }
}

impl RentalStore for MemoryStore {
    type Unit = MemoryUnit;

    async fn begin(&self) -> Result<MemoryUnit, StoreError> {
        let fail_at = *self.fail_at.lock().unwrap();
        if fail_at == Some(Step::Begin) {
            return Err(StoreError::new("injected failure at Begin"));
        }
        let committed = Arc::clone(&self.state).lock_owned().await;
        let staged = committed.clone();
        Ok(MemoryUnit {
            committed,
            staged,
            fail_at,
        })
    }
}

impl RentalUnit for MemoryUnit {
    async fn lock_rental(&mut self, id: RentalId) -> Result<Option<RentalTransaction>, StoreError> {
        self.check(Step::LockRental)?;
        Ok(self.staged.rentals.get(&id).cloned())
    }

    async fn lock_vehicle(&mut self, id: VehicleId) -> Result<Option<VehicleSnapshot>, StoreError> {
        self.check(Step::LockVehicle)?;
        Ok(self.staged.vehicles.get(&id).copied())
    }

    async fn lock_customer(
        &mut self,
        id: CustomerId,
    ) -> Result<Option<CustomerAccount>, StoreError> {
        self.check(Step::LockCustomer)?;
        Ok(self
            .staged
            .balances
            .get(&id)
            .map(|&balance| CustomerAccount { id, balance }))
    }

    async fn employee_exists(&mut self, id: EmployeeId) -> Result<bool, StoreError> {
        self.check(Step::EmployeeExists)?;
        Ok(self.staged.employees.contains(&id))
    }

    async fn return_exists(&mut self, rental_id: RentalId) -> Result<bool, StoreError> {
        self.check(Step::ReturnExists)?;
        Ok(self.staged.returns.iter().any(|r| r.rental_id == rental_id))
    }

    async fn set_balance(&mut self, id: CustomerId, balance: Balance) -> Result<(), StoreError> {
        self.check(Step::SetBalance)?;
        let slot = self
            .staged
            .balances
            .get_mut(&id)
            .ok_or_else(|| StoreError::new("customer row missing"))?;
        *slot = balance;
        Ok(())
    }

    async fn set_vehicle_status(
        &mut self,
        id: VehicleId,
        status: VehicleStatus,
    ) -> Result<(), StoreError> {
        self.check(Step::SetVehicleStatus)?;
        let vehicle = self
            .staged
            .vehicles
            .get_mut(&id)
            .ok_or_else(|| StoreError::new("vehicle row missing"))?;
        vehicle.status = status;
        Ok(())
    }

    async fn insert_rental(&mut self, rental: &RentalTransaction) -> Result<(), StoreError> {
        self.check(Step::InsertRental)?;
        self.staged.rentals.insert(rental.id, rental.clone());
        Ok(())
    }

    async fn insert_return(&mut self, vehicle_return: &VehicleReturn) -> Result<(), StoreError> {
        self.check(Step::InsertReturn)?;
        if self
            .staged
            .returns
            .iter()
            .any(|r| r.rental_id == vehicle_return.rental_id)
        {
            return Err(StoreError::new("duplicate return for rental"));
        }
        self.staged.returns.push(vehicle_return.clone());
        Ok(())
    }

    async fn commit(mut self) -> Result<(), StoreError> {
        self.check(Step::Commit)?;
        *self.committed = std::mem::take(&mut self.staged);
        Ok(())
    }
}
