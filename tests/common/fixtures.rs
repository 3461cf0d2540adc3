//! Shared test data builders
#![allow(dead_code)]

use chrono::Utc;
use sea_orm::ActiveValue::Set;
use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr};
use storefront::orm::{feature_flags, orders, products, transaction_log, users};

pub async fn create_test_user(
    db: &DatabaseConnection,
    username: &str,
    password: &str,
    role: &str,
) -> Result<users::Model, anyhow::Error> {
    storefront::user::create_user(db, username, password, role).await
}

pub async fn create_test_flag(
    db: &DatabaseConnection,
    key: &str,
    enabled: bool,
) -> Result<feature_flags::Model, DbErr> {
    feature_flags::ActiveModel {
        key: Set(key.to_string()),
        enabled: Set(enabled),
        description: Set(None),
        updated_at: Set(Utc::now().naive_utc()),
    }
    .insert(db)
    .await
}

pub async fn create_test_product(
    db: &DatabaseConnection,
    name: &str,
    price: f64,
    stock: i32,
) -> Result<products::Model, DbErr> {
    products::ActiveModel {
        name: Set(name.to_string()),
        price: Set(price),
        stock: Set(stock),
        ..Default::default()
    }
    .insert(db)
    .await
}

pub async fn create_test_order(
    db: &DatabaseConnection,
    customer: &str,
    total: f64,
    status: &str,
) -> Result<orders::Model, DbErr> {
    orders::ActiveModel {
        customer_name: Set(customer.to_string()),
        total_amount: Set(total),
        status: Set(status.to_string()),
        created_at: Set(Utc::now().naive_utc()),
        ..Default::default()
    }
    .insert(db)
    .await
}

/// Insert `count` transactions with strictly descending timestamps.
/// `txn-000` is the newest row.
pub async fn seed_test_transactions(db: &DatabaseConnection, count: u64) -> Result<(), DbErr> {
    let base = Utc::now().naive_utc();
    for i in 0..count {
        transaction_log::ActiveModel {
            description: Set(format!("txn-{:03}", i)),
            amount: Set(10.0 + i as f64),
            created_at: Set(base - chrono::Duration::minutes(i as i64)),
            ..Default::default()
        }
        .insert(db)
        .await?;
    }
    Ok(())
}
