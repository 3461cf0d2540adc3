//! Test database setup and management
#![allow(dead_code)]

use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use std::env;
use std::sync::Once;

static INIT_SYNC: Once = Once::new();

/// Initialize synchronous global state (SALT, ARGON2)
fn init_sync_globals() {
    INIT_SYNC.call_once(|| {
        // Must be set before the hasher initializes so hashes are stable
        if env::var("SALT").is_err() {
            env::set_var("SALT", "testsaltfortestingonly1234567890AB");
        }

        storefront::session::init();
    });
}

/// Create a fresh in-memory database with the schema installed.
///
/// Each call returns an isolated database; a single connection keeps the
/// in-memory SQLite file alive for the duration of the test.
pub async fn setup_test_database() -> Result<DatabaseConnection, DbErr> {
    init_sync_globals();

    let mut options = ConnectOptions::new("sqlite::memory:".to_string());
    options.max_connections(1);

    let db = Database::connect(options).await?;
    storefront::db::install_schema(&db).await?;

    Ok(db)
}
