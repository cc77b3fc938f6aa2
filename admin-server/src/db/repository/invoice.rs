//! Invoice Record Store
//!
//! Persists invoice rows and surfaces them by id. The upsert-style `add`
//! validates first and dispatches on id presence; `insert` and `update` are
//! public so callers that already know which side they want (the HTTP layer
//! does) pick it explicitly.

use super::{RepoError, RepoResult};
use serde_json::{Map, Value};
use shared::models::Invoice;
use sqlx::SqlitePool;

const INVOICE_SELECT: &str =
    "SELECT id, customer_id, invoice_datetime, filename, file_link, hash FROM invoice";

/// An invoice row about to be written. `id` absent means insert;
/// `invoice_datetime` is stamped server-side on insert.
#[derive(Debug, Clone)]
pub struct InvoiceRecord {
    pub id: Option<i64>,
    pub customer_id: i64,
    pub filename: String,
    pub file_link: String,
    pub hash: String,
}

/// Upsert an invoice record. Validation runs first; a record without an id
/// is inserted (with `invoice_datetime` set to the current wall-clock), one
/// with an id is updated in place. Returns the record id.
pub async fn add(pool: &SqlitePool, record: &InvoiceRecord) -> RepoResult<i64> {
    validate(pool, record).await?;

    match record.id {
        None => insert(pool, record).await,
        Some(id) => {
            update(pool, record).await?;
            Ok(id)
        }
    }
}

/// Insert a new invoice row, returning its id.
pub async fn insert(pool: &SqlitePool, record: &InvoiceRecord) -> RepoResult<i64> {
    let result = sqlx::query(
        "INSERT INTO invoice (customer_id, invoice_datetime, filename, file_link, hash) VALUES (?1, ?2, ?3, ?4, ?5)",
    )
    .bind(record.customer_id)
    .bind(shared::util::now_datetime())
    .bind(&record.filename)
    .bind(&record.file_link)
    .bind(&record.hash)
    .execute(pool)
    .await?;
    Ok(result.last_insert_rowid())
}

/// Update the row named by `record.id`. A write that affects no row is a
/// persistence failure.
pub async fn update(pool: &SqlitePool, record: &InvoiceRecord) -> RepoResult<()> {
    let id = record
        .id
        .ok_or_else(|| RepoError::Persistence("Update requires an invoice id".into()))?;

    let result = sqlx::query(
        "UPDATE invoice SET customer_id = ?1, filename = ?2, file_link = ?3, hash = ?4 WHERE id = ?5",
    )
    .bind(record.customer_id)
    .bind(&record.filename)
    .bind(&record.file_link)
    .bind(&record.hash)
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(RepoError::Persistence(format!(
            "Could not update invoice record {id}"
        )));
    }
    Ok(())
}

/// Validate a record before writing: a supplied id must exist.
pub async fn validate(pool: &SqlitePool, record: &InvoiceRecord) -> RepoResult<bool> {
    if let Some(id) = record.id
        && find_by_id(pool, id).await?.is_none()
    {
        return Err(RepoError::NotFound(format!(
            "Provided invoice id {id} does not exist"
        )));
    }
    Ok(true)
}

/// Delete an invoice row. An absent row returns `false` without error.
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    if find_by_id(pool, id).await?.is_none() {
        return Ok(false);
    }

    sqlx::query("DELETE FROM invoice WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(true)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Invoice>> {
    let sql = format!("{INVOICE_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, Invoice>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Invoices of a customer in insertion order.
pub async fn find_by_customer(pool: &SqlitePool, customer_id: i64) -> RepoResult<Vec<Invoice>> {
    let sql = format!("{INVOICE_SELECT} WHERE customer_id = ? ORDER BY id");
    let rows = sqlx::query_as::<_, Invoice>(&sql)
        .bind(customer_id)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// Full record as a field → value map.
pub async fn get_row(pool: &SqlitePool, id: i64) -> RepoResult<Option<Map<String, Value>>> {
    let row = find_by_id(pool, id).await?;
    Ok(row.map(|invoice| match serde_json::to_value(invoice) {
        Ok(Value::Object(map)) => map,
        _ => Map::new(),
    }))
}

/// A single field of a record. The row must exist and carry the field.
pub async fn get_value(pool: &SqlitePool, field: &str, id: i64) -> RepoResult<Value> {
    let row = get_row(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Invoice {id} does not exist")))?;

    row.get(field)
        .cloned()
        .ok_or_else(|| RepoError::UnknownField(format!("Invoice has no field '{field}'")))
}

/// All rows, optionally narrowed by a `WHERE` fragment in the store's query
/// dialect (SQL over the invoice columns, without the `WHERE` keyword).
pub async fn get_batch(pool: &SqlitePool, where_clause: Option<&str>) -> RepoResult<Vec<Invoice>> {
    let sql = match where_clause {
        Some(clause) if !clause.trim().is_empty() => {
            format!("{INVOICE_SELECT} WHERE {clause} ORDER BY id")
        }
        _ => format!("{INVOICE_SELECT} ORDER BY id"),
    };
    let rows = sqlx::query_as::<_, Invoice>(&sql).fetch_all(pool).await?;
    Ok(rows)
}

/// Generate a fresh opaque invoice hash: the md5 digest of the current
/// seconds-since-epoch, plus a random suffix so that two invoices created
/// within the same second still hash apart.
pub fn generate_hash() -> String {
    let seconds = chrono::Utc::now().timestamp();
    let nonce: u32 = rand::random();
    format!("{:x}{nonce:08x}", md5::compute(seconds.to_string()))
}
