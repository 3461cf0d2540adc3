//! Database initialization command.
//!
//! Drops and recreates the schema, then inserts the demo seed data.
//! Destroys any existing data at DATABASE_URL.

use env_logger::Env;
use storefront::db::{get_db_pool, init_db, install_schema, seed_demo_data};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    storefront::session::init();

    let database_url = std::env::var("DATABASE_URL")
        .unwrap_or_else(|_| "sqlite://storefront.sqlite?mode=rwc".to_string());
    log::info!("Initializing database at {}", database_url);

    init_db(database_url).await;
    let db = get_db_pool();

    install_schema(db).await?;
    seed_demo_data(db).await?;

    log::info!("Database initialized.");
    Ok(())
}
