//! Typed request payloads for the backend API.
//!
//! One struct per endpoint, used verbatim by the server handlers and the
//! client stubs, so neither side builds string-keyed payloads by hand. Every
//! request carries the caller-supplied CSRF token; the server only consumes
//! it, validation belongs to an external collaborator.
//!
//! Record ids arrive as [`serde_json::Value`] where the legacy page posts
//! them as strings; the server narrows them with its `parse_record_id`
//! helper and answers *bad-argument* for anything non-numeric.

use serde::{Deserialize, Serialize};

use crate::models::CustomerPayload;

/// `POST /backend_api/ajax_filter_customers`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterCustomersRequest {
    #[serde(rename = "csrfToken")]
    pub csrf_token: String,
    pub key: String,
}

/// `POST /backend_api/ajax_save_customer`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveCustomerRequest {
    #[serde(rename = "csrfToken")]
    pub csrf_token: String,
    pub customer: CustomerPayload,
}

/// `POST /backend_api/ajax_delete_customer`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteCustomerRequest {
    #[serde(rename = "csrfToken")]
    pub csrf_token: String,
    pub customer_id: serde_json::Value,
}

/// `POST /backend_api/ajax_save_appointment_checked`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveAppointmentCheckedRequest {
    #[serde(rename = "csrfToken")]
    pub csrf_token: String,
    pub id: serde_json::Value,
    pub is_paid: i64,
    pub is_shown: i64,
    pub is_invoice: i64,
}

/// `POST /backend_api/ajax_create_invoice`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateInvoiceRequest {
    #[serde(rename = "csrfToken")]
    pub csrf_token: String,
    pub id_users_customer: serde_json::Value,
    #[serde(rename = "sendEmail")]
    pub send_email: bool,
}

impl DeleteCustomerRequest {
    pub fn new(csrf_token: impl Into<String>, customer_id: i64) -> Self {
        Self {
            csrf_token: csrf_token.into(),
            customer_id: serde_json::Value::from(customer_id),
        }
    }
}

impl SaveAppointmentCheckedRequest {
    pub fn new(
        csrf_token: impl Into<String>,
        id: i64,
        is_paid: i64,
        is_shown: i64,
        is_invoice: i64,
    ) -> Self {
        Self {
            csrf_token: csrf_token.into(),
            id: serde_json::Value::from(id),
            is_paid,
            is_shown,
            is_invoice,
        }
    }
}

impl CreateInvoiceRequest {
    pub fn new(csrf_token: impl Into<String>, customer_id: i64, send_email: bool) -> Self {
        Self {
            csrf_token: csrf_token.into(),
            id_users_customer: serde_json::Value::from(customer_id),
            send_email,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csrf_token_uses_legacy_field_name() {
        let request = FilterCustomersRequest {
            csrf_token: "token".into(),
            key: "smi".into(),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["csrfToken"], "token");
        assert_eq!(json["key"], "smi");
    }

    #[test]
    fn string_record_ids_deserialize() {
        // The legacy page posts ids as strings.
        let request: DeleteCustomerRequest =
            serde_json::from_str(r#"{"csrfToken":"t","customer_id":"12"}"#).unwrap();
        assert_eq!(request.customer_id, serde_json::Value::from("12"));
    }
}
