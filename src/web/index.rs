use crate::middleware::ClientCtx;
use actix_web::http::header;
use actix_web::{get, HttpResponse, Responder};

pub(super) fn configure(conf: &mut actix_web::web::ServiceConfig) {
    conf.service(view_index);
}

#[get("/")]
pub async fn view_index(client: ClientCtx) -> impl Responder {
    let target = if client.is_user() { "/products" } else { "/login" };
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, target))
        .finish()
}
