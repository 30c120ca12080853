//! Memory item CRUD and brute-force cosine scoring.

use rusqlite::{params, Connection, OptionalExtension};

use engram_core::errors::{EngramResult, StorageError};
use engram_core::models::{MemoryItem, Metadata};

use crate::to_storage_err;

const TABLE: &str = "memory_items";

/// Insert or replace the item under `(collection, id)`.
pub fn upsert_item(
    conn: &Connection,
    collection: &str,
    id: &str,
    text: &str,
    metadata: &Metadata,
    embedding: &[f32],
) -> EngramResult<()> {
    let metadata_json = serde_json::to_string(metadata)?;
    conn.execute(
        "INSERT INTO memory_items (id, collection, text, metadata, embedding, dimensions, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
         ON CONFLICT(collection, id) DO UPDATE SET
            text = excluded.text,
            metadata = excluded.metadata,
            embedding = excluded.embedding,
            dimensions = excluded.dimensions,
            updated_at = excluded.updated_at",
        params![
            id,
            collection,
            text,
            metadata_json,
            f32_vec_to_bytes(embedding),
            embedding.len() as i64
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// Delete the given ids from a collection. Returns how many rows went away.
pub fn delete_items(conn: &Connection, collection: &str, ids: &[String]) -> EngramResult<usize> {
    let mut stmt = conn
        .prepare_cached("DELETE FROM memory_items WHERE collection = ?1 AND id = ?2")
        .map_err(|e| to_storage_err(e.to_string()))?;
    let mut removed = 0;
    for id in ids {
        removed += stmt
            .execute(params![collection, id])
            .map_err(|e| to_storage_err(e.to_string()))?;
    }
    Ok(removed)
}

/// Fetch one item without similarity.
pub fn get_item(conn: &Connection, collection: &str, id: &str) -> EngramResult<Option<MemoryItem>> {
    let row = conn
        .query_row(
            "SELECT text, metadata FROM memory_items WHERE collection = ?1 AND id = ?2",
            params![collection, id],
            |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)),
        )
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?;

    match row {
        Some((text, metadata)) => Ok(Some(MemoryItem::new(
            id,
            text,
            parse_metadata(id, &metadata)?,
        ))),
        None => Ok(None),
    }
}

/// Number of items in a collection.
pub fn count_items(conn: &Connection, collection: &str) -> EngramResult<usize> {
    let count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM memory_items WHERE collection = ?1",
            params![collection],
            |row| row.get(0),
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(count as usize)
}

/// Score every item in the collection against `query_embedding` and return
/// the best `limit` at or above `min_similarity`, best first.
///
/// Rows whose dimensionality differs from the query are skipped.
pub fn search_items(
    conn: &Connection,
    collection: &str,
    query_embedding: &[f32],
    limit: usize,
    min_similarity: f32,
) -> EngramResult<Vec<MemoryItem>> {
    if limit == 0 {
        return Ok(Vec::new());
    }
    let query_norm_sq: f64 = query_embedding.iter().map(|x| (*x as f64) * (*x as f64)).sum();
    if query_norm_sq == 0.0 {
        return Ok(Vec::new());
    }

    let mut stmt = conn
        .prepare_cached(
            "SELECT id, text, metadata, embedding, dimensions
             FROM memory_items WHERE collection = ?1",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params![collection], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, Vec<u8>>(3)?,
                row.get::<_, i64>(4)?,
            ))
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut scored: Vec<(f32, String, String, String)> = Vec::new();
    for row in rows {
        let (id, text, metadata, blob, dims) = row.map_err(|e| to_storage_err(e.to_string()))?;
        if dims as usize != query_embedding.len() {
            tracing::debug!(id = %id, dims = dims, "skipping item with mismatched dimensions");
            continue;
        }
        let stored = bytes_to_f32_vec(&blob);
        let similarity = cosine_similarity(query_embedding, &stored) as f32;
        if similarity >= min_similarity {
            scored.push((similarity, id, text, metadata));
        }
    }

    // Best first; ties broken by id so results are stable.
    scored.sort_by(|a, b| {
        b.0.partial_cmp(&a.0)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.1.cmp(&b.1))
    });
    scored.truncate(limit);

    scored
        .into_iter()
        .map(|(similarity, id, text, metadata)| -> EngramResult<MemoryItem> {
            let metadata = parse_metadata(&id, &metadata)?;
            Ok(MemoryItem::new(id, text, metadata).with_similarity(similarity))
        })
        .collect()
}

fn parse_metadata(id: &str, raw: &str) -> EngramResult<Metadata> {
    serde_json::from_str(raw).map_err(|e| {
        StorageError::CorruptRow {
            table: TABLE.to_string(),
            details: format!("metadata of `{id}`: {e}"),
        }
        .into()
    })
}

/// Convert f32 slice to bytes (little-endian).
fn f32_vec_to_bytes(v: &[f32]) -> Vec<u8> {
    v.iter().flat_map(|f| f.to_le_bytes()).collect()
}

/// Convert bytes back to an f32 vec.
fn bytes_to_f32_vec(bytes: &[u8]) -> Vec<f32> {
    bytes
        .chunks_exact(4)
        .map(|chunk| f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect()
}

/// Cosine similarity between two vectors.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    let dot: f64 = a
        .iter()
        .zip(b.iter())
        .map(|(x, y)| (*x as f64) * (*y as f64))
        .sum();
    let norm_a: f64 = a.iter().map(|x| (*x as f64) * (*x as f64)).sum::<f64>().sqrt();
    let norm_b: f64 = b.iter().map(|x| (*x as f64) * (*x as f64)).sum::<f64>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}
