//! Order detail view, wrapped in the audit aspect.

use crate::aspects::audit;
use crate::db::get_db_pool;
use crate::middleware::ClientCtx;
use crate::orm::orders;
use actix_web::{error, get, web, Error, HttpResponse};
use askama::Template;
use askama_actix::TemplateToResponse;
use sea_orm::{entity::*, DatabaseConnection, DbErr};

pub(super) fn configure(conf: &mut actix_web::web::ServiceConfig) {
    conf.service(view_order);
}

#[derive(Template)]
#[template(path = "order_detail.html")]
struct OrderDetailTemplate {
    client: ClientCtx,
    order: orders::Model,
}

pub async fn find_order(
    db: &DatabaseConnection,
    id: i32,
) -> Result<Option<orders::Model>, DbErr> {
    orders::Entity::find_by_id(id).one(db).await
}

#[get("/orders/{id}")]
pub async fn view_order(client: ClientCtx, path: web::Path<i32>) -> Result<HttpResponse, Error> {
    client.require_login()?;
    let id = path.into_inner();

    let order = find_order(get_db_pool(), id)
        .await
        .map_err(|e| {
            log::error!("error {:?}", e);
            error::ErrorInternalServerError("DB error")
        })?
        .ok_or_else(|| error::ErrorNotFound(format!("No order with id {}.", id)))?;

    audit::record(&client.get_name(), "view_order", &format!("id={}", id));

    Ok(OrderDetailTemplate { client, order }.to_response())
}
