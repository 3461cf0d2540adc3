use crate::db::get_db_pool;
use crate::middleware::ClientCtx;
use crate::orm::users;
use crate::session;
use actix_web::http::header;
use actix_web::{error, get, post, web, Error, HttpResponse};
use askama::Template;
use askama_actix::TemplateToResponse;
use sea_orm::{entity::*, DatabaseConnection, DbErr, QueryFilter};
use serde::Deserialize;

pub(super) fn configure(conf: &mut actix_web::web::ServiceConfig) {
    conf.service(post_login).service(view_login);
}

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub client: ClientCtx,
    pub error: Option<String>,
}

#[derive(Deserialize)]
pub struct FormData {
    username: String,
    password: String,
}

#[derive(Debug)]
pub enum LoginResultStatus {
    Success,
    BadName,
    BadPassword,
}

pub struct LoginResult {
    pub result: LoginResultStatus,
    pub user_id: Option<i32>,
}

impl LoginResult {
    fn success(user_id: i32) -> Self {
        Self {
            result: LoginResultStatus::Success,
            user_id: Some(user_id),
        }
    }
    fn fail(result: LoginResultStatus) -> Self {
        Self {
            result,
            user_id: None,
        }
    }
}

/// Check credentials against the users table.
pub async fn login(db: &DatabaseConnection, name: &str, pass: &str) -> Result<LoginResult, DbErr> {
    let user = users::Entity::find()
        .filter(users::Column::Username.eq(name.trim()))
        .one(db)
        .await?;

    let user = match user {
        Some(user) => user,
        None => return Ok(LoginResult::fail(LoginResultStatus::BadName)),
    };

    if !session::verify_password(&user.password_hash, pass) {
        return Ok(LoginResult::fail(LoginResultStatus::BadPassword));
    }

    Ok(LoginResult::success(user.id))
}

#[post("/login")]
pub async fn post_login(
    client: ClientCtx,
    cookies: actix_session::Session,
    form: web::Form<FormData>,
) -> Result<HttpResponse, Error> {
    let result = login(get_db_pool(), &form.username, &form.password)
        .await
        .map_err(|e| {
            log::error!("error {:?}", e);
            error::ErrorInternalServerError("DB error")
        })?;

    match result.result {
        LoginResultStatus::Success => {
            let user_id = result.user_id.unwrap();
            cookies.renew();
            cookies
                .insert("uid", user_id)
                .map_err(|_| error::ErrorInternalServerError("middleware error"))?;

            log::info!("login: user_id={} ({})", user_id, form.username);
            Ok(HttpResponse::SeeOther()
                .insert_header((header::LOCATION, "/products"))
                .finish())
        }
        status => {
            log::debug!("login failure: {:?} for {}", status, form.username);
            // Use generic message to avoid username enumeration
            Ok(LoginTemplate {
                client,
                error: Some("Invalid username or password.".to_string()),
            }
            .to_response())
        }
    }
}

#[get("/login")]
pub async fn view_login(client: ClientCtx) -> Result<HttpResponse, Error> {
    Ok(LoginTemplate {
        client,
        error: None,
    }
    .to_response())
}
