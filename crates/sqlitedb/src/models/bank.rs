// Copyright 2025 Alexandre D. Díaz
use rusqlite::{params, Connection, Result, ToSql};
use serde::{Deserialize, Serialize};

pub static TABLE_NAME: &str = "banks";

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Model {
    pub id: i64,
    pub name: String,
    pub location: String,
    pub created_at: String,
    pub updated_at: String,
}

pub fn create_table(conn: &Connection) -> Result<usize, rusqlite::Error> {
    conn.execute(
        format!(
            "CREATE TABLE IF NOT EXISTS {} (
            id integer primary key autoincrement,
            name text not null,
            location text not null,
            created_at text not null default (datetime('now')),
            updated_at text not null default (datetime('now'))
        )",
            &TABLE_NAME
        )
        .as_str(),
        params![],
    )
}

fn query(conn: &Connection, extra_sql: &str, params: &[&dyn ToSql]) -> Result<Vec<Model>, rusqlite::Error> {
    let sql: String = format!(
        "SELECT bk.id, bk.name, bk.location, bk.created_at, bk.updated_at \
    FROM {} as bk \
    {}",
        &TABLE_NAME, &extra_sql
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params, |row| {
        Ok(Model {
            id: row.get(0)?,
            name: row.get(1)?,
            location: row.get(2)?,
            created_at: row.get(3)?,
            updated_at: row.get(4)?,
        })
    })?;
    rows.collect::<Result<Vec<Model>, rusqlite::Error>>()
}

/// Newest banks first.
pub fn get_all(conn: &Connection) -> Result<Vec<Model>, rusqlite::Error> {
    query(conn, "ORDER BY bk.id DESC", params![])
}

pub fn get_by_id(conn: &Connection, bank_id: &i64) -> Result<Option<Model>, rusqlite::Error> {
    let mut banks = query(conn, "WHERE bk.id = ?1 LIMIT 1", params![&bank_id])?;
    Ok(banks.pop())
}

/// Inserts a bank and returns its id. Timestamps come from the database.
pub fn add(conn: &Connection, name: &str, location: &str) -> Result<i64, rusqlite::Error> {
    conn.execute(
        format!("INSERT INTO {}(name, location) VALUES (?1, ?2)", &TABLE_NAME).as_str(),
        params![&name, &location],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Returns `false` when no bank has the given id.
pub fn update(conn: &Connection, bank_id: &i64, name: &str, location: &str) -> Result<bool, rusqlite::Error> {
    let affected = conn.execute(
        format!(
            "UPDATE {} SET name = ?1, location = ?2, updated_at = datetime('now') WHERE id = ?3",
            &TABLE_NAME
        )
        .as_str(),
        params![&name, &location, &bank_id],
    )?;
    Ok(affected > 0)
}

/// Returns `false` when no bank has the given id.
pub fn delete(conn: &Connection, bank_id: &i64) -> Result<bool, rusqlite::Error> {
    let affected = conn.execute(
        format!("DELETE FROM {} WHERE id = ?1", &TABLE_NAME).as_str(),
        params![&bank_id],
    )?;
    Ok(affected > 0)
}
