// Copyright 2025 Alexandre D. Díaz
use actix_web::web;

use sqlitedb::{models::Connection, Pool};

use crate::error::ServerResult;

/// Checks a connection out of the pool, runs `op` with it on the blocking
/// thread pool and hands the connection back before returning, whatever the
/// outcome.
pub async fn run<F, T>(pool: &web::Data<Pool>, op: F) -> ServerResult<T>
where
    F: FnOnce(&Connection) -> Result<T, rusqlite::Error> + Send + 'static,
    T: Send + 'static,
{
    let pool = pool.clone();
    web::block(move || -> ServerResult<T> {
        let conn = pool.get()?;
        let res = op(&conn)?;
        Ok(res)
    })
    .await?
}
