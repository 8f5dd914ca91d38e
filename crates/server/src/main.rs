// Copyright 2025 Alexandre D. Díaz
mod app;
mod config;
mod db;
mod error;
mod flash;
mod middlewares;
mod minijinja_renderer;
mod routes;
mod utils;

use std::io;
use std::path::PathBuf;

use actix_web::{cookie::Key, web, HttpServer};

use config::SERVER_CONFIG;
use sqlitedb::{connection, models};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    // MiniJinja
    if SERVER_CONFIG.get_template_autoreload() {
        log::info!("template auto-reloading is enabled");
    } else {
        log::info!(
            "template auto-reloading is disabled; run with BANKR_TEMPLATE_AUTORELOAD=true to enable"
        );
    }
    let tmpl_reloader = web::Data::new(minijinja_renderer::new_reloader(
        PathBuf::from(SERVER_CONFIG.get_template_dir()),
        SERVER_CONFIG.get_template_autoreload(),
    ));

    // Secret Key
    let cookie_secret_key = if SERVER_CONFIG.get_cookie_key_bytes().len() < 64 {
        log::warn!("no cookie key of at least 64 bytes configured; sessions won't survive a restart");
        Key::generate()
    } else {
        Key::from(SERVER_CONFIG.get_cookie_key_bytes().as_slice())
    };

    // connect to the DB
    let db_settings = SERVER_CONFIG.get_db_settings();
    log::info!("using database {}", db_settings.describe());
    let pool = connection::open_pool(db_settings, *SERVER_CONFIG.get_db_pool_max_size())
        .map_err(|err| io::Error::new(io::ErrorKind::Other, err))?;
    {
        let conn = pool
            .get()
            .map_err(|err| io::Error::new(io::ErrorKind::Other, err))?;
        models::prepare_schema(&conn).map_err(|err| io::Error::new(io::ErrorKind::Other, err))?;
    }

    log::info!(
        "starting HTTP server at http://{}:{}",
        &SERVER_CONFIG.get_bind_address(),
        &SERVER_CONFIG.get_port()
    );

    // start HTTP server
    HttpServer::new(move || app::new_app(pool.clone(), tmpl_reloader.clone(), cookie_secret_key.clone()))
        .bind((SERVER_CONFIG.get_bind_address().clone(), *SERVER_CONFIG.get_port()))?
        .workers(*SERVER_CONFIG.get_workers())
        .run()
        .await
}
