//! Promotion management, gated by the `promo_editor` feature flag and
//! form validation.

use crate::aspects::{audit, feature};
use crate::db::get_db_pool;
use crate::middleware::csrf::validate_csrf_token;
use crate::middleware::ClientCtx;
use crate::orm::promotions;
use actix_web::http::header;
use actix_web::{error, get, post, web, Error, HttpResponse};
use askama::Template;
use askama_actix::TemplateToResponse;
use chrono::NaiveDate;
use sea_orm::{entity::*, query::*, DatabaseConnection, DbErr};
use serde::Deserialize;
use validator::{Validate, ValidationError, ValidationErrors};

pub const FLAG: &str = "promo_editor";

pub(super) fn configure(conf: &mut actix_web::web::ServiceConfig) {
    conf.service(view_promotions).service(create_promotion_post);
}

#[derive(Template)]
#[template(path = "promotions.html")]
struct PromotionListTemplate {
    client: ClientCtx,
    promotions: Vec<promotions::Model>,
    errors: Vec<String>,
    notice: Option<String>,
}

#[derive(Template)]
#[template(path = "feature_disabled.html")]
struct FeatureDisabledTemplate {
    client: ClientCtx,
}

#[derive(Debug, Deserialize, Validate)]
#[validate(schema(function = "validate_date_order", skip_on_field_errors = false))]
pub struct PromotionForm {
    #[serde(default)]
    pub csrf_token: String,
    #[validate(length(min = 1, max = 120, message = "name must be 1-120 characters"))]
    pub name: String,
    #[validate(range(min = 0.01, max = 99.99, message = "discount must be between 0 and 100"))]
    pub discount_percent: f64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

fn validate_date_order(form: &PromotionForm) -> Result<(), ValidationError> {
    if form.end_date < form.start_date {
        let mut err = ValidationError::new("date_order");
        err.message = Some("end date must not precede start date".into());
        return Err(err);
    }
    Ok(())
}

/// Flatten validator output into display strings for the template.
/// Struct-level errors arrive under the synthetic `__all__` key.
pub fn error_messages(errors: &ValidationErrors) -> Vec<String> {
    let mut messages: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            let label: &str = if *field == "__all__" { "dates" } else { field };
            errs.iter().map(move |e| {
                let detail = e.message.clone().unwrap_or_else(|| e.code.clone());
                format!("{}: {}", label, detail)
            })
        })
        .collect();
    messages.sort();
    messages
}

pub async fn list_promotions(db: &DatabaseConnection) -> Result<Vec<promotions::Model>, DbErr> {
    promotions::Entity::find()
        .order_by_desc(promotions::Column::StartDate)
        .all(db)
        .await
}

pub async fn create_promotion(
    db: &DatabaseConnection,
    form: &PromotionForm,
) -> Result<promotions::Model, DbErr> {
    use sea_orm::ActiveValue::Set;

    promotions::ActiveModel {
        name: Set(form.name.clone()),
        discount_percent: Set(form.discount_percent),
        start_date: Set(form.start_date),
        end_date: Set(form.end_date),
        ..Default::default()
    }
    .insert(db)
    .await
}

#[derive(Deserialize)]
pub struct NoticeQuery {
    created: Option<String>,
}

#[get("/promotions")]
pub async fn view_promotions(
    client: ClientCtx,
    query: web::Query<NoticeQuery>,
) -> Result<HttpResponse, Error> {
    client.require_login()?;
    let db = get_db_pool();

    if !flag_enabled(db).await? {
        return Ok(FeatureDisabledTemplate { client }.to_response());
    }

    let promotions = list_promotions(db).await.map_err(db_error)?;
    let notice = query
        .created
        .as_ref()
        .map(|name| format!("Promotion \"{}\" created.", name));

    Ok(PromotionListTemplate {
        client,
        promotions,
        errors: Vec::new(),
        notice,
    }
    .to_response())
}

#[post("/promotions")]
pub async fn create_promotion_post(
    client: ClientCtx,
    cookies: actix_session::Session,
    form: web::Form<PromotionForm>,
) -> Result<HttpResponse, Error> {
    client.require_login()?;
    let db = get_db_pool();

    if !flag_enabled(db).await? {
        return Ok(FeatureDisabledTemplate { client }.to_response());
    }

    validate_csrf_token(&cookies, &form.csrf_token)?;

    if let Err(validation) = form.validate() {
        let promotions = list_promotions(db).await.map_err(db_error)?;
        return Ok(PromotionListTemplate {
            client,
            promotions,
            errors: error_messages(&validation),
            notice: None,
        }
        .to_response());
    }

    let created = create_promotion(db, &form).await.map_err(db_error)?;
    audit::record(
        &client.get_name(),
        "create_promotion",
        &format!("name='{}' discount={}", created.name, created.discount_percent),
    );

    Ok(HttpResponse::SeeOther()
        .insert_header((
            header::LOCATION,
            format!("/promotions?created={}", urlencode(&created.name)),
        ))
        .finish())
}

async fn flag_enabled(db: &DatabaseConnection) -> Result<bool, Error> {
    feature::is_enabled(db, FLAG).await.map_err(db_error)
}

fn db_error(e: DbErr) -> Error {
    log::error!("error {:?}", e);
    error::ErrorInternalServerError("DB error")
}

/// Minimal query-string escaping for the redirect notice.
fn urlencode(value: &str) -> String {
    value
        .bytes()
        .map(|b| match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                (b as char).to_string()
            }
            b' ' => "+".to_string(),
            _ => format!("%{:02X}", b),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(name: &str, discount: f64, start: &str, end: &str) -> PromotionForm {
        PromotionForm {
            csrf_token: String::new(),
            name: name.to_string(),
            discount_percent: discount,
            start_date: start.parse().unwrap(),
            end_date: end.parse().unwrap(),
        }
    }

    #[test]
    fn test_valid_form_passes() {
        assert!(form("Summer Sale", 15.5, "2024-06-01", "2024-06-30")
            .validate()
            .is_ok());
    }

    #[test]
    fn test_discount_over_100_rejected() {
        let errors = form("Bad", 150.0, "2024-01-01", "2024-01-31")
            .validate()
            .unwrap_err();
        assert!(error_messages(&errors)
            .iter()
            .any(|m| m.contains("discount")));
    }

    #[test]
    fn test_zero_discount_rejected() {
        assert!(form("Zero", 0.0, "2024-01-01", "2024-01-31")
            .validate()
            .is_err());
    }

    #[test]
    fn test_inverted_date_range_rejected() {
        let errors = form("Backwards", 10.0, "2024-02-01", "2024-01-01")
            .validate()
            .unwrap_err();
        assert!(error_messages(&errors)
            .iter()
            .any(|m| m.contains("end date")));
    }

    #[test]
    fn test_schema_errors_use_readable_label() {
        let errors = form("Backwards", 10.0, "2024-02-01", "2024-01-01")
            .validate()
            .unwrap_err();
        let messages = error_messages(&errors);
        assert!(messages.iter().all(|m| !m.contains("__all__")));
        assert!(messages.iter().any(|m| m.starts_with("dates:")));
    }

    #[test]
    fn test_empty_name_rejected() {
        assert!(form("", 10.0, "2024-01-01", "2024-01-31").validate().is_err());
    }

    #[test]
    fn test_urlencode_spaces_and_reserved() {
        assert_eq!(urlencode("Summer Sale"), "Summer+Sale");
        assert_eq!(urlencode("50%/off"), "50%25%2Foff");
    }
}
