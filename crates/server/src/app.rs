// Copyright 2025 Alexandre D. Díaz
use actix_cors::Cors;
use actix_files as afs;
use actix_session::{storage::CookieSessionStore, SessionMiddleware};
use actix_web::{
    body::MessageBody,
    cookie::Key,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    http::{header, StatusCode},
    middleware::{ErrorHandlers, Logger},
    web, App, Error,
};
use minijinja_autoreload::AutoReloader;

use sqlitedb::Pool;

use crate::config::SERVER_CONFIG;
use crate::middlewares::error_pages;
use crate::routes;

pub fn new_app(
    pool: Pool,
    tmpl_reloader: web::Data<AutoReloader>,
    cookie_secret_key: Key,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Response = ServiceResponse<impl MessageBody>,
        Config = (),
        InitError = (),
        Error = Error,
    >,
> {
    let cors = Cors::default()
        .allowed_origin_fn(|origin, _req_head| {
            SERVER_CONFIG.is_allowed_origin(origin.to_str().unwrap_or(""))
        })
        .allowed_methods(vec!["GET", "POST"])
        .allowed_headers(vec![header::CONTENT_TYPE, header::ACCEPT])
        .max_age(3600);

    App::new()
        // store db pool as Data object
        .app_data(web::Data::new(pool))
        .app_data(tmpl_reloader)
        .service(afs::Files::new("/static", SERVER_CONFIG.get_static_dir()))
        .service(routes::hello::route)
        .service(routes::bank::route_index)
        // must be registered before the `/banks/{bank_id}` routes
        .service(routes::bank::route_add_form)
        .service(routes::bank::route_add)
        .service(routes::bank::route_detail)
        .service(routes::bank::route_edit_form)
        .service(routes::bank::route_edit)
        .service(routes::bank::route_delete)
        .wrap(
            SessionMiddleware::builder(CookieSessionStore::default(), cookie_secret_key)
                .cookie_secure(SERVER_CONFIG.is_cookie_secure())
                .build(),
        )
        .wrap(cors)
        .wrap(
            ErrorHandlers::new()
                .handler(StatusCode::NOT_FOUND, error_pages::not_found)
                .handler(StatusCode::INTERNAL_SERVER_ERROR, error_pages::internal_error),
        )
        .wrap(Logger::default())
}
