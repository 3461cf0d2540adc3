//! Paginated transaction history, wrapped in the metrics and cache aspects.
//!
//! As with the product list, only the rows fragment is cached; the
//! per-user chrome renders on every request.

use crate::app_config;
use crate::aspects::{cache, metrics};
use crate::db::get_db_pool;
use crate::middleware::ClientCtx;
use crate::orm::transaction_log;
use actix_web::{error, get, web, Error, HttpResponse};
use askama::Template;
use sea_orm::{entity::*, query::*, DatabaseConnection, DbErr};
use serde::Deserialize;
use std::time::Duration;

const VIEW: &str = "transactions";

pub(super) fn configure(conf: &mut actix_web::web::ServiceConfig) {
    conf.service(view_transactions);
}

#[derive(Deserialize)]
pub struct PageQuery {
    page: Option<u64>,
}

#[derive(Template)]
#[template(path = "transactions.html")]
struct TransactionListTemplate {
    client: ClientCtx,
    content: String,
}

#[derive(Template)]
#[template(path = "transactions_rows.html")]
struct TransactionRowsTemplate {
    transactions: Vec<transaction_log::Model>,
    page: u64,
    has_next: bool,
}

/// One page of transactions, newest first.
/// Returns the rows and whether a further page exists.
pub async fn page_of_transactions(
    db: &DatabaseConnection,
    page: u64,
    per_page: u64,
) -> Result<(Vec<transaction_log::Model>, bool), DbErr> {
    // Fetch one extra row to detect a next page without a COUNT query.
    // The page number is caller-supplied, so the offset math must saturate.
    let offset = page.saturating_sub(1).saturating_mul(per_page);
    let mut rows = transaction_log::Entity::find()
        .order_by_desc(transaction_log::Column::CreatedAt)
        .limit(per_page + 1)
        .offset(offset)
        .all(db)
        .await?;

    let has_next = rows.len() as u64 > per_page;
    rows.truncate(per_page as usize);
    Ok((rows, has_next))
}

/// The cached part of one history page, keyed by page number only.
pub async fn cached_transaction_page(
    db: &DatabaseConnection,
    page: u64,
    per_page: u64,
    ttl: Duration,
) -> Result<String, Error> {
    cache::with_cache(VIEW, &format!("page={}", page), ttl, || async move {
        let (transactions, has_next) = page_of_transactions(db, page, per_page)
            .await
            .map_err(db_error)?;

        TransactionRowsTemplate {
            transactions,
            page,
            has_next,
        }
        .render()
        .map_err(template_error)
    })
    .await
}

#[get("/transactions")]
pub async fn view_transactions(
    client: ClientCtx,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse, Error> {
    client.require_login()?;

    let db = get_db_pool();
    let page = query.page.unwrap_or(1).max(1);
    let per_page = app_config::limits().transactions_per_page;
    let ttl = Duration::from_secs(app_config::cache().transactions_ttl_seconds);
    let tmpl_client = client.clone();

    let body = metrics::timed(VIEW, || async move {
        let content = cached_transaction_page(db, page, per_page, ttl).await?;
        TransactionListTemplate {
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
