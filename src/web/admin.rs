//! Administration dashboard: feature flags and view timings.
//!
//! Every endpoint here demands the `admin` role via the access-control
//! aspect.

use crate::aspects::{audit, feature, metrics, secure};
use crate::db::get_db_pool;
use crate::middleware::csrf::validate_csrf_token;
use crate::middleware::ClientCtx;
use crate::orm::feature_flags;
use actix_web::http::header;
use actix_web::{error, get, post, web, Error, HttpResponse};
use askama::Template;
use askama_actix::TemplateToResponse;
use serde::Deserialize;

pub(super) fn configure(conf: &mut actix_web::web::ServiceConfig) {
    conf.service(view_dashboard).service(toggle_feature_flag);
}

#[derive(Template)]
#[template(path = "admin.html")]
struct AdminTemplate {
    client: ClientCtx,
    flags: Vec<feature_flags::Model>,
    timings: Vec<metrics::ViewTiming>,
}

#[get("/admin")]
pub async fn view_dashboard(client: ClientCtx) -> Result<HttpResponse, Error> {
    secure::require_any_role(&client, &["admin"])?;

    let flags = feature::all_flags(get_db_pool()).await.map_err(|e| {
        log::error!("error {:?}", e);
        error::ErrorInternalServerError("DB error")
    })?;

    Ok(AdminTemplate {
        client,
        flags,
        timings: metrics::snapshot(),
    }
    .to_response())
}

#[derive(Deserialize)]
pub struct ToggleForm {
    csrf_token: String,
    enabled: bool,
}

#[post("/admin/flags/{key}")]
pub async fn toggle_feature_flag(
    client: ClientCtx,
    cookies: actix_session::Session,
    path: web::Path<String>,
    form: web::Form<ToggleForm>,
) -> Result<HttpResponse, Error> {
    secure::require_any_role(&client, &["admin"])?;
    validate_csrf_token(&cookies, &form.csrf_token)?;

    let key = path.into_inner();
    feature::set_enabled(get_db_pool(), &key, form.enabled)
        .await
        .map_err(|e| {
            log::error!("error {:?}", e);
            error::ErrorInternalServerError("DB error")
        })?;

    audit::record(
        &client.get_name(),
        "toggle_feature_flag",
        &format!("key='{}' enabled={}", key, form.enabled),
    );

    Ok(HttpResponse::SeeOther()
        .insert_header((header::LOCATION, "/admin"))
        .finish())
}
