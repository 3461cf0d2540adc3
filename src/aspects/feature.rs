//! Feature flags, looked up per request.
//!
//! A missing flag counts as disabled, so typos fail closed.

use crate::orm::feature_flags;
use sea_orm::sea_query::Expr;
use sea_orm::{entity::*, query::*, DatabaseConnection, DbErr};

pub async fn is_enabled(db: &DatabaseConnection, key: &str) -> Result<bool, DbErr> {
    let flag = feature_flags::Entity::find_by_id(key.to_string())
        .one(db)
        .await?;

    let enabled = flag.map(|f| f.enabled).unwrap_or(false);
    log::debug!(
        "feature: '{}' is {}",
        key,
        if enabled { "on" } else { "off" }
    );
    Ok(enabled)
}

/// Flip a flag. No-op if the flag row does not exist.
pub async fn set_enabled(db: &DatabaseConnection, key: &str, enabled: bool) -> Result<(), DbErr> {
    use chrono::Utc;

    feature_flags::Entity::update_many()
        .col_expr(feature_flags::Column::Enabled, Expr::value(enabled))
        .col_expr(
            feature_flags::Column::UpdatedAt,
            Expr::value(Utc::now().naive_utc()),
        )
        .filter(feature_flags::Column::Key.eq(key))
        .exec(db)
        .await?;

    Ok(())
}

/// All flags, for the admin dashboard.
pub async fn all_flags(db: &DatabaseConnection) -> Result<Vec<feature_flags::Model>, DbErr> {
    feature_flags::Entity::find()
        .order_by_asc(feature_flags::Column::Key)
        .all(db)
        .await
}
