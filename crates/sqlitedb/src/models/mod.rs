// Copyright 2025 Alexandre D. Díaz
pub mod bank;

pub type Connection = r2d2::PooledConnection<r2d2_sqlite::SqliteConnectionManager>;

pub fn prepare_schema(conn: &rusqlite::Connection) -> Result<(), rusqlite::Error> {
    bank::create_table(conn)?;
    Ok(())
}
