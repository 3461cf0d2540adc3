//! Product list, wrapped in the metrics and cache aspects.
//!
//! Only the rows fragment is cached. The chrome around it (nav, footer)
//! is per-user and renders on every request.

use crate::app_config;
use crate::aspects::{cache, metrics};
use crate::db::get_db_pool;
use crate::middleware::ClientCtx;
use crate::orm::products;
use actix_web::{error, get, Error, HttpResponse};
use askama::Template;
use sea_orm::{entity::*, query::*, DatabaseConnection, DbErr};
use std::time::Duration;

const VIEW: &str = "products";

pub(super) fn configure(conf: &mut actix_web::web::ServiceConfig) {
    conf.service(view_products);
}

#[derive(Template)]
#[template(path = "products.html")]
struct ProductListTemplate {
    client: ClientCtx,
    content: String,
}

#[derive(Template)]
#[template(path = "products_rows.html")]
struct ProductRowsTemplate {
    products: Vec<products::Model>,
}

pub async fn all_products(db: &DatabaseConnection) -> Result<Vec<products::Model>, DbErr> {
    products::Entity::find()
        .order_by_asc(products::Column::Name)
        .all(db)
        .await
}

/// The cached part of the page. Carries no per-user markup, so one copy
/// serves every signed-in user within the TTL.
pub async fn cached_product_rows(db: &DatabaseConnection, ttl: Duration) -> Result<String, Error> {
    cache::with_cache(VIEW, "all", ttl, || async move {
        let products = all_products(db).await.map_err(db_error)?;
        ProductRowsTemplate { products }
            .render()
            .map_err(template_error)
    })
    .await
}

#[get("/products")]
pub async fn view_products(client: ClientCtx) -> Result<HttpResponse, Error> {
    client.require_login()?;

    let db = get_db_pool();
    let ttl = Duration::from_secs(app_config::cache().products_ttl_seconds);
    let tmpl_client = client.clone();

    let body = metrics::timed(VIEW, || async move {
        let content = cached_product_rows(db, ttl).await?;
        ProductListTemplate {
            client: tmpl_client,
            content,
        }
        .render()
        .map_err(template_error)
    })
    .await?;

    Ok(HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(body))
}

fn db_error(e: DbErr) -> Error {
    log::error!("error {:?}", e);
    error::ErrorInternalServerError("DB error")
}

fn template_error(e: askama::Error) -> Error {
    log::error!("error {:?}", e);
    error::ErrorInternalServerError("template error")
}
