// Copyright Alexandre D. Díaz
use actix_web::{
    dev::ServiceResponse, http::header, middleware::ErrorHandlerResponse, HttpResponse, Result,
};

use crate::minijinja_renderer::MiniJinjaRenderer;
use crate::utils::get_minijinja_context;

/// Error handler for a 404 Page not found error.
pub fn not_found<B>(svc_res: ServiceResponse<B>) -> Result<ErrorHandlerResponse<B>> {
    handle_error(svc_res, "Page not found")
}

/// Error handler for a 500 Internal server error.
pub fn internal_error<B>(svc_res: ServiceResponse<B>) -> Result<ErrorHandlerResponse<B>> {
    handle_error(svc_res, "Internal server error")
}

fn handle_error<B>(svc_res: ServiceResponse<B>, error: &str) -> Result<ErrorHandlerResponse<B>> {
    let res = get_error_response(&svc_res, error);

    Ok(ErrorHandlerResponse::Response(ServiceResponse::new(
        svc_res.into_parts().0,
        res.map_into_right_body(),
    )))
}

/// Generic error handler.
fn get_error_response<B>(res: &ServiceResponse<B>, error: &str) -> HttpResponse {
    let req = res.request();

    // Provide a fallback to a simple plain text response in case an error occurs during the
    // rendering of the error page.
    let fallback = |err: &str| {
        HttpResponse::build(res.status())
            .content_type(header::ContentType::plaintext())
            .body(err.to_string())
    };

    let Some(tmpl_env) = MiniJinjaRenderer::from_req(req) else {
        return fallback(error);
    };

    let ctx = minijinja::context! {
        ..get_minijinja_context(req),
        ..minijinja::context! {
            page_name => "error",
            error => error,
            status_code => res.status().as_str(),
        }
    };

    match tmpl_env.render_to_string("pages/error.html", ctx) {
        Ok(body) => HttpResponse::build(res.status())
            .content_type(header::ContentType::html())
            .body(body),

        Err(_) => fallback(error),
    }
}
