//! Appointment Repository
//!
//! Appointments are created outside the customers page; this repository only
//! reads them for the aggregates and persists the three flags.

use super::{RepoError, RepoResult};
use shared::models::{Appointment, ProviderRef, ServiceRef};
use sqlx::SqlitePool;

const APPOINTMENT_SELECT: &str = "SELECT a.id, a.customer_id, a.start_datetime, a.end_datetime, s.name AS service_name, p.first_name AS provider_first_name, p.last_name AS provider_last_name, a.is_paid, a.is_shown, a.is_invoice FROM appointment a JOIN service s ON a.service_id = s.id JOIN provider p ON a.provider_id = p.id";

/// Flat row shape of [`APPOINTMENT_SELECT`]; mapped into the nested wire type.
#[derive(sqlx::FromRow)]
struct AppointmentRow {
    id: i64,
    customer_id: i64,
    start_datetime: String,
    end_datetime: String,
    service_name: String,
    provider_first_name: String,
    provider_last_name: String,
    is_paid: i64,
    is_shown: i64,
    is_invoice: i64,
}

impl From<AppointmentRow> for Appointment {
    fn from(row: AppointmentRow) -> Self {
        Appointment {
            id: row.id,
            customer_id: row.customer_id,
            start_datetime: row.start_datetime,
            end_datetime: row.end_datetime,
            service: ServiceRef {
                name: row.service_name,
            },
            provider: ProviderRef {
                first_name: row.provider_first_name,
                last_name: row.provider_last_name,
            },
            is_paid: row.is_paid,
            is_shown: row.is_shown,
            is_invoice: row.is_invoice,
        }
    }
}

/// All appointments of a customer, chronologically ascending.
pub async fn find_by_customer(pool: &SqlitePool, customer_id: i64) -> RepoResult<Vec<Appointment>> {
    let sql = format!("{APPOINTMENT_SELECT} WHERE a.customer_id = ? ORDER BY a.start_datetime, a.id");
    let rows = sqlx::query_as::<_, AppointmentRow>(&sql)
        .bind(customer_id)
        .fetch_all(pool)
        .await?;
    Ok(rows.into_iter().map(Into::into).collect())
}

/// Appointments of a customer flagged for invoicing, chronologically
/// ascending. Input of the invoice renderer.
pub async fn find_billable(pool: &SqlitePool, customer_id: i64) -> RepoResult<Vec<Appointment>> {
    let sql = format!(
        "{APPOINTMENT_SELECT} WHERE a.customer_id = ? AND a.is_invoice = 1 ORDER BY a.start_datetime, a.id"
    );
    let rows = sqlx::query_as::<_, AppointmentRow>(&sql)
        .bind(customer_id)
        .fetch_all(pool)
        .await?;
    Ok(rows.into_iter().map(Into::into).collect())
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Appointment>> {
    let sql = format!("{APPOINTMENT_SELECT} WHERE a.id = ?");
    let row = sqlx::query_as::<_, AppointmentRow>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row.map(Into::into))
}

/// Persist exactly the three flags of an appointment. Replaying the same
/// values yields the same state; an unknown id is *not-found*.
pub async fn set_flags(
    pool: &SqlitePool,
    id: i64,
    is_paid: i64,
    is_shown: i64,
    is_invoice: i64,
) -> RepoResult<()> {
    let result = sqlx::query(
        "UPDATE appointment SET is_paid = ?1, is_shown = ?2, is_invoice = ?3 WHERE id = ?4",
    )
    .bind(is_paid)
    .bind(is_shown)
    .bind(is_invoice)
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Appointment {id} not found")));
    }
    Ok(())
}
