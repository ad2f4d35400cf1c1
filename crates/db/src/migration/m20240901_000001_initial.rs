//! Initial database migration.
//!
//! Creates the enums, tables, constraints, indexes, and `updated_at`
//! triggers for customers, employees, vehicles, rentals, and returns.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        // ============================================================
        // PART 1: ENUMS AND SHARED FUNCTIONS
        // ============================================================
        db.execute_unprepared(ENUMS_SQL).await?;
        db.execute_unprepared(UPDATED_AT_FUNCTION_SQL).await?;

        // ============================================================
        // PART 2: ACCOUNTS
        // ============================================================
        db.execute_unprepared(CUSTOMERS_SQL).await?;
        db.execute_unprepared(EMPLOYEES_SQL).await?;

        // ============================================================
        // PART 3: FLEET
        // ============================================================
        db.execute_unprepared(VEHICLES_SQL).await?;

        // ============================================================
        // PART 4: RENTALS AND RETURNS
        // ============================================================
        db.execute_unprepared(RENTAL_TRANSACTIONS_SQL).await?;
        db.execute_unprepared(VEHICLE_RETURNS_SQL).await?;

        // ============================================================
        // PART 5: TRIGGERS
        // ============================================================
        db.execute_unprepared(TRIGGERS_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_ALL_SQL).await?;
        Ok(())
    }
}

// ============================================================
// SQL CONSTANTS
// ============================================================

const ENUMS_SQL: &str = r"
CREATE TYPE customer_role AS ENUM ('ADMIN', 'USER');

CREATE TYPE vehicle_status AS ENUM ('AVAILABLE', 'NOT_AVAILABLE');
";

const UPDATED_AT_FUNCTION_SQL: &str = r"
CREATE OR REPLACE FUNCTION set_updated_at()
RETURNS TRIGGER AS $$
BEGIN
    NEW.updated_at = now();
    RETURN NEW;
END;
$$ LANGUAGE plpgsql;
";

const CUSTOMERS_SQL: &str = r"
CREATE TABLE customers (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    name VARCHAR(255) NOT NULL,
    username VARCHAR(100) NOT NULL UNIQUE,
    password_hash VARCHAR(255) NOT NULL,
    address TEXT NOT NULL DEFAULT '',
    telp VARCHAR(32) NOT NULL DEFAULT '',
    role customer_role NOT NULL DEFAULT 'USER',
    balance BIGINT NOT NULL DEFAULT 0,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_customer_balance CHECK (balance >= 0)
);
";

const EMPLOYEES_SQL: &str = r"
CREATE TABLE employees (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    name VARCHAR(255) NOT NULL,
    telp VARCHAR(32) NOT NULL DEFAULT '',
    username VARCHAR(100) NOT NULL UNIQUE,
    password_hash VARCHAR(255) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    deleted_at TIMESTAMPTZ
);

CREATE INDEX idx_employees_active ON employees(id) WHERE deleted_at IS NULL;
";

const VEHICLES_SQL: &str = r"
CREATE TABLE vehicles (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    name VARCHAR(255) NOT NULL,
    type VARCHAR(100) NOT NULL,
    price BIGINT NOT NULL,
    plate VARCHAR(32) NOT NULL UNIQUE,
    production_year INTEGER NOT NULL,
    status vehicle_status NOT NULL DEFAULT 'AVAILABLE',
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_vehicle_price CHECK (price > 0)
);

CREATE INDEX idx_vehicles_status ON vehicles(status);
";

const RENTAL_TRANSACTIONS_SQL: &str = r"
CREATE TABLE rental_transactions (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    customer_id UUID NOT NULL REFERENCES customers(id) ON DELETE RESTRICT,
    vehicle_id UUID NOT NULL REFERENCES vehicles(id) ON DELETE RESTRICT,
    employee_id UUID NOT NULL REFERENCES employees(id) ON DELETE RESTRICT,
    start_date DATE NOT NULL,
    end_date DATE NOT NULL,
    price BIGINT NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_rental_dates CHECK (end_date > start_date),
    CONSTRAINT chk_rental_price CHECK (price > 0)
);

CREATE INDEX idx_rentals_customer ON rental_transactions(customer_id);
CREATE INDEX idx_rentals_vehicle ON rental_transactions(vehicle_id);
CREATE INDEX idx_rentals_created ON rental_transactions(created_at DESC);
";

const VEHICLE_RETURNS_SQL: &str = r"
CREATE TABLE vehicle_returns (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    rental_id UUID NOT NULL REFERENCES rental_transactions(id) ON DELETE RESTRICT,
    return_date TIMESTAMPTZ NOT NULL DEFAULT now(),
    extra_charge BIGINT NOT NULL DEFAULT 0,
    condition_note TEXT NOT NULL,
    description TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_return_extra_charge CHECK (extra_charge >= 0)
);

CREATE UNIQUE INDEX uq_vehicle_returns_rental ON vehicle_returns(rental_id);
CREATE INDEX idx_returns_created ON vehicle_returns(created_at DESC);
";

const TRIGGERS_SQL: &str = r"
CREATE TRIGGER trg_customers_updated_at BEFORE UPDATE ON customers
    FOR EACH ROW EXECUTE FUNCTION set_updated_at();
CREATE TRIGGER trg_employees_updated_at BEFORE UPDATE ON employees
    FOR EACH ROW EXECUTE FUNCTION set_updated_at();
CREATE TRIGGER trg_vehicles_updated_at BEFORE UPDATE ON vehicles
    FOR EACH ROW EXECUTE FUNCTION set_updated_at();
CREATE TRIGGER trg_rentals_updated_at BEFORE UPDATE ON rental_transactions
    FOR EACH ROW EXECUTE FUNCTION set_updated_at();
CREATE TRIGGER trg_returns_updated_at BEFORE UPDATE ON vehicle_returns
    FOR EACH ROW EXECUTE FUNCTION set_updated_at();
";

const DROP_ALL_SQL: &str = r"
DROP TABLE IF EXISTS vehicle_returns;
DROP TABLE IF EXISTS rental_transactions;
DROP TABLE IF EXISTS vehicles;
DROP TABLE IF EXISTS employees;
DROP TABLE IF EXISTS customers;
DROP FUNCTION IF EXISTS set_updated_at();
DROP TYPE IF EXISTS vehicle_status;
DROP TYPE IF EXISTS customer_role;
";
