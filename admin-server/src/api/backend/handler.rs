//! Backend API Handlers

use axum::{Json, extract::State};

use crate::core::ServerState;
use crate::db::repository::invoice::InvoiceRecord;
use crate::db::repository::{appointment, customer, invoice};
use crate::utils::validation::{parse_flag, parse_record_id, validate_customer};
use crate::utils::{AppError, AppResult};
use shared::models::{Customer, CustomerAggregate, InvoiceCreated, SavedCustomer};
use shared::request::{
    CreateInvoiceRequest, DeleteCustomerRequest, FilterCustomersRequest,
    SaveAppointmentCheckedRequest, SaveCustomerRequest,
};

/// POST /backend_api/ajax_filter_customers
///
/// Case-insensitive substring filter over the customer text fields; each hit
/// embeds its appointments and invoices as of this query.
pub async fn filter_customers(
    State(state): State<ServerState>,
    Json(request): Json<FilterCustomersRequest>,
) -> AppResult<Json<Vec<CustomerAggregate>>> {
    state.csrf.check(&request.csrf_token)?;

    let customers = customer::filter(&state.pool, &request.key).await?;

    let mut aggregates = Vec::with_capacity(customers.len());
    for customer in customers {
        aggregates.push(aggregate_for(&state, customer).await?);
    }
    Ok(Json(aggregates))
}

/// POST /backend_api/ajax_save_customer
///
/// Insert or update, chosen on id presence. Returns the record id.
pub async fn save_customer(
    State(state): State<ServerState>,
    Json(request): Json<SaveCustomerRequest>,
) -> AppResult<Json<SavedCustomer>> {
    state.csrf.check(&request.csrf_token)?;

    validate_customer(&request.customer)?;

    let id = match request.customer.id {
        None => customer::insert(&state.pool, &request.customer).await?,
        Some(id) => {
            if !customer::update(&state.pool, id, &request.customer).await? {
                return Err(AppError::not_found(format!("Customer {id} not found")));
            }
            id
        }
    };

    tracing::info!(customer_id = id, "Customer saved");
    Ok(Json(SavedCustomer { id }))
}

/// POST /backend_api/ajax_delete_customer
///
/// Idempotent: deleting an absent row is success.
pub async fn delete_customer(
    State(state): State<ServerState>,
    Json(request): Json<DeleteCustomerRequest>,
) -> AppResult<Json<serde_json::Value>> {
    state.csrf.check(&request.csrf_token)?;

    let id = parse_record_id(&request.customer_id)?;
    let deleted = customer::delete(&state.pool, id).await?;

    if deleted {
        tracing::info!(customer_id = id, "Customer deleted");
    }
    Ok(Json(serde_json::json!({})))
}

/// POST /backend_api/ajax_save_appointment_checked
///
/// Persists exactly the three flags on the named appointment.
pub async fn save_appointment_checked(
    State(state): State<ServerState>,
    Json(request): Json<SaveAppointmentCheckedRequest>,
) -> AppResult<Json<serde_json::Value>> {
    state.csrf.check(&request.csrf_token)?;

    let id = parse_record_id(&request.id)?;
    let is_paid = parse_flag("is_paid", request.is_paid)?;
    let is_shown = parse_flag("is_shown", request.is_shown)?;
    let is_invoice = parse_flag("is_invoice", request.is_invoice)?;

    appointment::set_flags(&state.pool, id, is_paid, is_shown, is_invoice).await?;

    Ok(Json(serde_json::json!({})))
}

/// POST /backend_api/ajax_create_invoice
///
/// Creates the invoice row, renders the artifact and optionally hands it to
/// the mailer. Mail failure is reported in the response but the persisted
/// invoice stands.
pub async fn create_invoice(
    State(state): State<ServerState>,
    Json(request): Json<CreateInvoiceRequest>,
) -> AppResult<Json<InvoiceCreated>> {
    state.csrf.check(&request.csrf_token)?;

    let customer_id = parse_record_id(&request.id_users_customer)?;
    let customer = customer::find_by_id(&state.pool, customer_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Customer {customer_id} not found")))?;

    let hash = invoice::generate_hash();
    let filename = format!("invoice_{customer_id}_{hash}.pdf");
    let file_link = state.config.invoice_link(&filename);
    let artifact_path = state.config.invoice_dir().join(&filename);

    let billable = appointment::find_billable(&state.pool, customer_id).await?;
    state
        .renderer
        .render(&artifact_path, &customer, &billable)
        .await
        .map_err(|e| AppError::Renderer(e.to_string()))?;

    let record = InvoiceRecord {
        id: None,
        customer_id,
        filename: filename.clone(),
        file_link: file_link.clone(),
        hash: hash.clone(),
    };
    let id = invoice::insert(&state.pool, &record).await?;
    let row = invoice::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Persistence(format!("Invoice {id} vanished after insert")))?;

    let email_sent = if request.send_email {
        match state.mailer.send(&customer.email, &artifact_path).await {
            Ok(()) => Some(true),
            Err(e) => {
                tracing::warn!(error = %e, customer_id, "Invoice mail failed");
                Some(false)
            }
        }
    } else {
        None
    };

    tracing::info!(invoice_id = id, customer_id, "Invoice created");
    Ok(Json(InvoiceCreated {
        descriptor: row.into(),
        email_sent,
    }))
}

/// Assemble the aggregate the filter endpoint returns for one customer.
async fn aggregate_for(state: &ServerState, customer: Customer) -> AppResult<CustomerAggregate> {
    let appointments = appointment::find_by_customer(&state.pool, customer.id).await?;
    let invoices = invoice::find_by_customer(&state.pool, customer.id).await?;
    Ok(CustomerAggregate {
        customer,
        appointments,
        invoices,
    })
}
