use crate::orm::users;
use crate::session;
use sea_orm::{entity::*, DatabaseConnection};

/// A struct to hold the information routes need about the acting user.
#[derive(Clone, Debug)]
pub struct Profile {
    pub id: i32,
    pub username: String,
    pub role: String,
}

impl Profile {
    /// Returns the profile for a user id, or None for a stale session.
    pub async fn get_by_id(
        db: &DatabaseConnection,
        id: i32,
    ) -> Result<Option<Self>, sea_orm::DbErr> {
        Ok(users::Entity::find_by_id(id).one(db).await?.map(|u| Self {
            id: u.id,
            username: u.username,
            role: u.role,
        }))
    }

    pub fn is_admin(&self) -> bool {
        self.role == "admin"
    }
}

/// Insert a user with a freshly hashed password.
/// Used by the seeder and test fixtures; there is no registration endpoint.
pub async fn create_user(
    db: &DatabaseConnection,
    username: &str,
    password: &str,
    role: &str,
) -> Result<users::Model, anyhow::Error> {
    use chrono::Utc;
    use sea_orm::ActiveValue::Set;

    let password_hash = session::hash_password(password)
        .map_err(|e| anyhow::anyhow!("password hashing failed: {}", e))?;

    users::ActiveModel {
        username: Set(username.to_string()),
        password_hash: Set(password_hash),
        role: Set(role.to_string()),
        created_at: Set(Utc::now().naive_utc()),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}
