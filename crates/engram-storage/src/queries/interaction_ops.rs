//! Append-only interaction log queries.

use rusqlite::{params, Connection, Row};

use engram_core::errors::{EngramResult, StorageError};
use engram_core::models::{InteractionRecord, NewInteraction, Role};

use super::{format_ts, parse_ts};
use crate::to_storage_err;

const TABLE: &str = "interactions";

/// Insert one turn and return its assigned id.
pub fn append(conn: &Connection, record: &NewInteraction) -> EngramResult<i64> {
    conn.execute(
        "INSERT INTO interactions (role, content, created_at) VALUES (?1, ?2, ?3)",
        params![
            record.role.as_str(),
            record.content,
            format_ts(&record.created_at)
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(conn.last_insert_rowid())
}

/// The newest `n` records, returned oldest-first.
pub fn tail(conn: &Connection, n: usize) -> EngramResult<Vec<InteractionRecord>> {
    if n == 0 {
        return Ok(Vec::new());
    }
    let mut records = query_records(
        conn,
        "SELECT id, role, content, created_at FROM interactions ORDER BY id DESC LIMIT ?1",
        params![to_limit(n)],
    )?;
    records.reverse();
    Ok(records)
}

/// Up to `limit` records after `watermark`, oldest-first.
pub fn since(conn: &Connection, watermark: i64, limit: usize) -> EngramResult<Vec<InteractionRecord>> {
    if limit == 0 {
        return Ok(Vec::new());
    }
    query_records(
        conn,
        "SELECT id, role, content, created_at FROM interactions
         WHERE id > ?1 ORDER BY id ASC LIMIT ?2",
        params![watermark, to_limit(limit)],
    )
}

/// Number of records after `watermark`.
pub fn count_since(conn: &Connection, watermark: i64) -> EngramResult<usize> {
    let count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM interactions WHERE id > ?1",
            params![watermark],
            |row| row.get(0),
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(count as usize)
}

/// Total number of records in the log.
pub fn total_count(conn: &Connection) -> EngramResult<usize> {
    count_since(conn, i64::MIN)
}

fn query_records(
    conn: &Connection,
    sql: &str,
    params: impl rusqlite::Params,
) -> EngramResult<Vec<InteractionRecord>> {
    let mut stmt = conn
        .prepare_cached(sql)
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params, raw_row)
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut records = Vec::new();
    for row in rows {
        let (id, role, content, created_at) = row.map_err(|e| to_storage_err(e.to_string()))?;
        let role = Role::parse(&role).ok_or_else(|| StorageError::CorruptRow {
            table: TABLE.to_string(),
            details: format!("unknown role `{role}` on id {id}"),
        })?;
        records.push(InteractionRecord {
            id,
            role,
            content,
            created_at: parse_ts(TABLE, &created_at)?,
        });
    }
    Ok(records)
}

fn raw_row(row: &Row<'_>) -> rusqlite::Result<(i64, String, String, String)> {
    Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
}

fn to_limit(n: usize) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}
