// Copyright 2025 Alexandre D. Díaz
use actix_web::{error::BlockingError, ResponseError};
use thiserror::Error;

pub type ServerResult<T> = Result<T, ServerError>;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Pool error: {0}")]
    Pool(#[from] r2d2::Error),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Blocking error: {0}")]
    Blocking(#[from] BlockingError),

    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),
}

// Every variant is an internal failure; the 500 page is rendered by the
// error handlers middleware.
impl ResponseError for ServerError {}
