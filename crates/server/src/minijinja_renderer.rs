// Copyright 2025 Alexandre D. Díaz
use std::future::{ready, Ready};
use std::path::PathBuf;

use actix_web::{dev, error, http::header::ContentType, web, FromRequest, HttpRequest, HttpResponse};
use minijinja::path_loader;
use minijinja_autoreload::AutoReloader;
use sqlitedb::utils::date::format_sqlite_datetime;

use crate::error::ServerResult;

static DEFAULT_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

fn datetimeformat(value: String, format: Option<String>) -> String {
    format_sqlite_datetime(&value, format.as_deref().unwrap_or(DEFAULT_DATETIME_FORMAT))
}

/// Creates the template environment. The closure is invoked every time the
/// environment is outdated to recreate it.
pub fn new_reloader(tmpl_path: PathBuf, autoreload: bool) -> AutoReloader {
    AutoReloader::new(move |notifier| {
        let mut env: minijinja::Environment<'static> = minijinja::Environment::new();

        // if watch_path is never called, no fs watcher is created
        if autoreload {
            notifier.watch_path(&tmpl_path, true);
        }

        env.set_loader(path_loader(&tmpl_path));
        env.add_filter("datetimeformat", datetimeformat);

        Ok(env)
    })
}

pub struct MiniJinjaRenderer {
    tmpl_env: web::Data<AutoReloader>,
}

impl MiniJinjaRenderer {
    pub fn from_req(req: &HttpRequest) -> Option<MiniJinjaRenderer> {
        req.app_data::<web::Data<AutoReloader>>()
            .map(|tmpl_env| MiniJinjaRenderer { tmpl_env: tmpl_env.clone() })
    }

    pub fn render_to_string(&self, tmpl: &str, ctx: minijinja::Value) -> ServerResult<String> {
        let env = self.tmpl_env.acquire_env()?;
        let html = env.get_template(tmpl)?.render(ctx)?;
        Ok(html)
    }

    pub fn render(&self, tmpl: &str, ctx: minijinja::Value) -> ServerResult<HttpResponse> {
        let html = self.render_to_string(tmpl, ctx).map_err(|err| {
            log::error!("can't render '{tmpl}': {err}");
            err
        })?;
        Ok(HttpResponse::Ok().content_type(ContentType::html()).body(html))
    }
}

impl FromRequest for MiniJinjaRenderer {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _pl: &mut dev::Payload) -> Self::Future {
        ready(
            MiniJinjaRenderer::from_req(req)
                .ok_or_else(|| error::ErrorInternalServerError("template environment not configured")),
        )
    }
}
