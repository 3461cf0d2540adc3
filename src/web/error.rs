//! HTML error pages wired into actix's ErrorHandlers middleware.

use actix_web::dev::ServiceResponse;
use actix_web::middleware::ErrorHandlerResponse;
use actix_web::HttpResponse;
use askama::Template;

#[derive(Template)]
#[template(path = "error.html")]
struct ErrorTemplate<'a> {
    code: u16,
    title: &'a str,
    message: &'a str,
}

pub fn render_400<B>(res: ServiceResponse<B>) -> actix_web::Result<ErrorHandlerResponse<B>> {
    render_error(res, "Bad request", "The request could not be understood.")
}

pub fn render_404<B>(res: ServiceResponse<B>) -> actix_web::Result<ErrorHandlerResponse<B>> {
    render_error(res, "Not found", "The page you requested does not exist.")
}

pub fn render_500<B>(res: ServiceResponse<B>) -> actix_web::Result<ErrorHandlerResponse<B>> {
    render_error(res, "Server error", "Something went wrong on our side.")
}

fn render_error<B>(
    res: ServiceResponse<B>,
    title: &str,
    message: &str,
) -> actix_web::Result<ErrorHandlerResponse<B>> {
    let (req, res) = res.into_parts();
    let status = res.status();

    let body = ErrorTemplate {
        code: status.as_u16(),
        title,
        message,
    }
    .render()
    .unwrap_or_else(|_| message.to_string());

    let res = HttpResponse::build(status)
        .content_type("text/html; charset=utf-8")
        .body(body);

    Ok(ErrorHandlerResponse::Response(
        ServiceResponse::new(req, res)
            .map_into_boxed_body()
            .map_into_right_body(),
    ))
}
