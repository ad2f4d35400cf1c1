//! Database migration runner.
//!
//! Reads the connection string from `DATABASE_URL` (a `.env` file is
//! honoured). Usage:
//!   migrator up      - Apply the schema
//!   migrator down    - Drop the schema
//!   migrator status  - Show migration status
//!   migrator fresh   - Drop everything and re-apply

use fleet_db::migration::Migrator;
use sea_orm_migration::prelude::*;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    cli::run_cli(Migrator).await;
}
