// Copyright 2025 Alexandre D. Díaz
use actix_session::Session;
use actix_web::HttpRequest;
use minijinja::{context, Value};

use crate::flash::take_flashes;

pub fn get_minijinja_context(req: &HttpRequest) -> Value {
    let scheme = req.connection_info().scheme().to_string();
    let host = req.connection_info().host().to_string();
    context!(
        REQ_SCHEME => scheme.clone(),
        REQ_HOST => host.clone(),
        REQ_BASE_URL => format!("{}://{}", &scheme, &host),
    )
}

/// Request context plus the pending flash messages, which are consumed.
pub fn get_page_context(req: &HttpRequest, session: &Session, page_name: &str) -> Value {
    context!(
        ..get_minijinja_context(req),
        ..context!(
            page_name => page_name,
            flashes => take_flashes(session),
        )
    )
}
