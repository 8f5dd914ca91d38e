// Copyright 2025 Alexandre D. Díaz
use std::fs;
use std::path::PathBuf;

use r2d2_sqlite::SqliteConnectionManager;
use thiserror::Error;

use crate::Pool;

pub static MEMORY_DATABASE: &str = ":memory:";

#[derive(Error, Debug)]
pub enum Error {
    #[error("Unsupported database driver: {0}")]
    UnsupportedDriver(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Pool error: {0}")]
    Pool(#[from] r2d2::Error),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),
}

/// Where the bank database lives. For SQLite `server` is the directory
/// holding the database file and `database` its name without extension.
#[derive(Debug, Clone)]
pub struct ConnectionSettings {
    pub driver: String,
    pub server: String,
    pub database: String,
    pub username: String,
    pub password: String,
}

impl ConnectionSettings {
    pub fn is_memory(&self) -> bool {
        self.database == MEMORY_DATABASE
    }

    pub fn get_database_path(&self) -> PathBuf {
        PathBuf::from(&self.server).join(format!("{}.db", &self.database))
    }

    pub fn describe(&self) -> String {
        let password = if self.password.is_empty() { "" } else { "****" };
        let target = if self.is_memory() {
            MEMORY_DATABASE.to_string()
        } else {
            self.get_database_path().display().to_string()
        };
        format!(
            "DRIVER={};SERVER={};DATABASE={};UID={};PWD={}",
            &self.driver, &self.server, &target, &self.username, password
        )
    }
}

fn check_driver(driver: &str) -> Result<(), Error> {
    match driver.to_lowercase().as_str() {
        "sqlite" | "sqlite3" => Ok(()),
        _ => Err(Error::UnsupportedDriver(driver.to_string())),
    }
}

/// Builds the connection pool handlers check connections out of. An
/// in-memory database is bound to a single connection that is never
/// recycled, otherwise every checkout would see a different database.
pub fn open_pool(settings: &ConnectionSettings, max_size: u32) -> Result<Pool, Error> {
    check_driver(&settings.driver)?;
    if !settings.username.is_empty() || !settings.password.is_empty() {
        log::warn!("sqlite has no authentication; the configured credentials are ignored");
    }

    if settings.is_memory() {
        let pool = Pool::builder()
            .max_size(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .build(SqliteConnectionManager::memory())?;
        return Ok(pool);
    }

    let db_path = settings.get_database_path();
    if let Some(parent) = db_path.parent() {
        fs::create_dir_all(parent)?;
    }
    let manager = SqliteConnectionManager::file(db_path);
    // r2d2 panics on an empty pool
    let pool = Pool::builder().max_size(max_size.max(1)).build(manager)?;
    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{self, bank};

    fn settings(driver: &str, server: &str, database: &str) -> ConnectionSettings {
        ConnectionSettings {
            driver: driver.to_string(),
            server: server.to_string(),
            database: database.to_string(),
            username: String::new(),
            password: String::new(),
        }
    }

    #[test]
    fn test_unsupported_driver() {
        let res = open_pool(&settings("ODBC Driver 18 for SQL Server", "localhost", "bankr"), 2);
        assert!(matches!(res, Err(Error::UnsupportedDriver(_))));
    }

    #[test]
    fn test_memory_pool_shares_data() {
        let pool = open_pool(&settings("SQLite", "", MEMORY_DATABASE), 15).unwrap();
        assert_eq!(pool.max_size(), 1);
        {
            let conn = pool.get().unwrap();
            models::prepare_schema(&conn).unwrap();
            bank::add(&conn, "Shared", "Memory").unwrap();
        }
        let conn = pool.get().unwrap();
        assert_eq!(bank::get_all(&conn).unwrap().len(), 1);
    }

    #[test]
    fn test_file_pool_creates_directory() {
        let tmp_dir = tempfile::tempdir().unwrap();
        let server = tmp_dir.path().join("nested");
        let settings = settings("sqlite", server.to_str().unwrap(), "banks");
        let pool = open_pool(&settings, 3).unwrap();
        let conn = pool.get().unwrap();
        models::prepare_schema(&conn).unwrap();
        assert!(server.join("banks.db").exists());
    }

    #[test]
    fn test_file_pool_zero_size() {
        let tmp_dir = tempfile::tempdir().unwrap();
        let settings = settings("sqlite", tmp_dir.path().to_str().unwrap(), "banks");
        let pool = open_pool(&settings, 0).unwrap();
        assert_eq!(pool.max_size(), 1);
    }

    #[test]
    fn test_describe_masks_password() {
        let mut settings = settings("sqlite", "data", "bankr");
        settings.username = "sa".to_string();
        settings.password = "secret".to_string();
        let desc = settings.describe();
        assert!(desc.contains("UID=sa"));
        assert!(desc.contains("PWD=****"));
        assert!(!desc.contains("secret"));
    }
}
