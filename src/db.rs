//! Database pool management, schema installation, and demo seed data.
//!
//! The pool is a process-global set once at startup. Schema statements are
//! plain SQLite DDL executed one by one; `storefront-init-db` drops and
//! recreates everything, so running it against a live database is
//! destructive by design.

use crate::orm::{feature_flags, orders, products, promotions, transaction_log};
use crate::user::create_user;
use once_cell::sync::OnceCell;
use sea_orm::{
    ActiveModelTrait, ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr,
    Statement,
};

static DB_POOL: OnceCell<DatabaseConnection> = OnceCell::new();

/// Connect to the database and store the pool globally.
/// Panics if the connection fails or the pool was already set.
pub async fn init_db(database_url: String) {
    let mut options = ConnectOptions::new(database_url);
    options.max_connections(8);

    let pool = Database::connect(options)
        .await
        .expect("Failed to connect to database.");

    DB_POOL
        .set(pool)
        .expect("init_db() must only be called once.");
}

pub fn get_db_pool() -> &'static DatabaseConnection {
    DB_POOL.get().expect("DB pool not initialized.")
}

/// Schema DDL, executed in order. SQLite accepts one statement per call.
const SCHEMA_SQL: &[&str] = &[
    "DROP TABLE IF EXISTS users;",
    "DROP TABLE IF EXISTS products;",
    "DROP TABLE IF EXISTS orders;",
    "DROP TABLE IF EXISTS transaction_log;",
    "DROP TABLE IF EXISTS promotions;",
    "DROP TABLE IF EXISTS feature_flags;",
    "CREATE TABLE users (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        username TEXT NOT NULL UNIQUE,
        password_hash TEXT NOT NULL,
        role TEXT NOT NULL DEFAULT 'user',
        created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
    );",
    "CREATE TABLE products (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        price REAL NOT NULL,
        stock INTEGER NOT NULL DEFAULT 0
    );",
    "CREATE TABLE orders (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        customer_name TEXT NOT NULL,
        total_amount REAL NOT NULL,
        status TEXT NOT NULL DEFAULT 'pending',
        created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
    );",
    "CREATE TABLE transaction_log (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        description TEXT NOT NULL,
        amount REAL NOT NULL,
        created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
    );",
    "CREATE TABLE promotions (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        discount_percent REAL NOT NULL,
        start_date DATE NOT NULL,
        end_date DATE NOT NULL
    );",
    "CREATE TABLE feature_flags (
        key TEXT PRIMARY KEY,
        enabled BOOLEAN NOT NULL DEFAULT 0 CHECK (enabled IN (0, 1)),
        description TEXT,
        updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
    );",
];

/// Drop and recreate all tables.
pub async fn install_schema(db: &DatabaseConnection) -> Result<(), DbErr> {
    for sql in SCHEMA_SQL {
        db.execute(Statement::from_string(
            db.get_database_backend(),
            (*sql).to_string(),
        ))
        .await?;
    }
    Ok(())
}

/// Insert demo data: two users, a product catalog, a few orders, enough
/// transaction rows to paginate, one promotion, and the feature flags.
///
/// Requires `session::init()` so passwords can be hashed.
pub async fn seed_demo_data(db: &DatabaseConnection) -> Result<(), anyhow::Error> {
    use chrono::Utc;
    use sea_orm::ActiveValue::Set;

    create_user(db, "admin", "admin123", "admin").await?;
    create_user(db, "clerk", "clerk123", "user").await?;

    let catalog = [
        ("Espresso Machine", 249.99_f64, 12),
        ("Ceramic Mug", 8.50, 240),
        ("Coffee Grinder", 74.00, 31),
        ("Pour-Over Kettle", 42.95, 18),
        ("Single-Origin Beans 1kg", 21.00, 96),
    ];
    for (name, price, stock) in catalog {
        products::ActiveModel {
            name: Set(name.to_string()),
            price: Set(price),
            stock: Set(stock),
            ..Default::default()
        }
        .insert(db)
        .await?;
    }

    let now = Utc::now().naive_utc();
    let order_rows = [
        ("Alice Novak", 258.49_f64, "shipped"),
        ("Marco Reyes", 21.00, "pending"),
        ("Dana Whitfield", 116.95, "delivered"),
    ];
    for (i, (customer, total, status)) in order_rows.iter().enumerate() {
        orders::ActiveModel {
            customer_name: Set(customer.to_string()),
            total_amount: Set(*total),
            status: Set(status.to_string()),
            created_at: Set(now - chrono::Duration::hours(i as i64 * 6)),
            ..Default::default()
        }
        .insert(db)
        .await?;
    }

    for i in 0..24i64 {
        transaction_log::ActiveModel {
            description: Set(format!("Card settlement batch #{:03}", 24 - i)),
            amount: Set(19.99 + i as f64 * 3.25),
            created_at: Set(now - chrono::Duration::minutes(i * 17)),
            ..Default::default()
        }
        .insert(db)
        .await?;
    }

    promotions::ActiveModel {
        name: Set("Launch Week".to_string()),
        discount_percent: Set(15.0),
        start_date: Set(now.date()),
        end_date: Set(now.date() + chrono::Duration::days(7)),
        ..Default::default()
    }
    .insert(db)
    .await?;

    let flags = [
        ("promo_editor", true, "Promotion management screen"),
        ("order_export", false, "CSV export of order history"),
    ];
    for (key, enabled, description) in flags {
        feature_flags::ActiveModel {
            key: Set(key.to_string()),
            enabled: Set(enabled),
            description: Set(Some(description.to_string())),
            updated_at: Set(now),
        }
        .insert(db)
        .await?;
    }

    Ok(())
}
