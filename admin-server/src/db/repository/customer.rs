//! Customer Repository

use super::RepoResult;
use shared::models::{Customer, CustomerPayload};
use sqlx::SqlitePool;

const CUSTOMER_SELECT: &str = "SELECT id, first_name, last_name, email, phone_number, address, city, zip_code, notes FROM customer";

/// Filter customers by a free-text key. The key is trimmed and matched
/// case-insensitively as a substring against every text field; an empty key
/// returns all customers.
pub async fn filter(pool: &SqlitePool, key: &str) -> RepoResult<Vec<Customer>> {
    let key = key.trim();
    if key.is_empty() {
        return find_all(pool).await;
    }

    let pattern = format!("%{key}%");
    let sql = format!(
        "{CUSTOMER_SELECT} WHERE first_name LIKE ?1 OR last_name LIKE ?1 OR email LIKE ?1 \
         OR phone_number LIKE ?1 OR address LIKE ?1 OR city LIKE ?1 OR zip_code LIKE ?1 \
         OR notes LIKE ?1 ORDER BY last_name, first_name, id"
    );
    let rows = sqlx::query_as::<_, Customer>(&sql)
        .bind(&pattern)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Customer>> {
    let sql = format!("{CUSTOMER_SELECT} ORDER BY last_name, first_name, id");
    let rows = sqlx::query_as::<_, Customer>(&sql).fetch_all(pool).await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Customer>> {
    let sql = format!("{CUSTOMER_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, Customer>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Insert a new customer, returning its id.
pub async fn insert(pool: &SqlitePool, data: &CustomerPayload) -> RepoResult<i64> {
    let result = sqlx::query(
        "INSERT INTO customer (first_name, last_name, email, phone_number, address, city, zip_code, notes) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
    )
    .bind(&data.first_name)
    .bind(&data.last_name)
    .bind(&data.email)
    .bind(&data.phone_number)
    .bind(&data.address)
    .bind(&data.city)
    .bind(&data.zip_code)
    .bind(&data.notes)
    .execute(pool)
    .await?;
    Ok(result.last_insert_rowid())
}

/// Update an existing customer.
pub async fn update(pool: &SqlitePool, id: i64, data: &CustomerPayload) -> RepoResult<bool> {
    let result = sqlx::query(
        "UPDATE customer SET first_name = ?1, last_name = ?2, email = ?3, phone_number = ?4, address = ?5, city = ?6, zip_code = ?7, notes = ?8 WHERE id = ?9",
    )
    .bind(&data.first_name)
    .bind(&data.last_name)
    .bind(&data.email)
    .bind(&data.phone_number)
    .bind(&data.address)
    .bind(&data.city)
    .bind(&data.zip_code)
    .bind(&data.notes)
    .bind(id)
    .execute(pool)
    .await?;
    Ok(result.rows_affected() > 0)
}

/// Delete a customer. Owned appointments and invoices follow through the
/// foreign-key cascade. An absent row is not an error.
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let result = sqlx::query("DELETE FROM customer WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
