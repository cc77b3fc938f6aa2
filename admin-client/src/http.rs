//! HTTP client - one typed stub per backend endpoint.

use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::{ClientConfig, ClientError, ClientResult};
use shared::error::ExceptionsBody;
use shared::models::{CustomerAggregate, CustomerPayload, InvoiceCreated, SavedCustomer};
use shared::request::{
    CreateInvoiceRequest, DeleteCustomerRequest, FilterCustomersRequest,
    SaveAppointmentCheckedRequest, SaveCustomerRequest,
};

/// HTTP client for the backend customers API.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    csrf_token: String,
}

impl HttpClient {
    /// Create a new HTTP client from configuration.
    pub fn new(config: &ClientConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()
            .unwrap_or_default();

        Self {
            client,
            base_url: config.base_url.clone(),
            csrf_token: config.csrf_token.clone(),
        }
    }

    pub fn csrf_token(&self) -> &str {
        &self.csrf_token
    }

    /// Make a POST request with a JSON body.
    async fn post<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let url = format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        let response = self.client.post(&url).json(body).send().await?;
        Self::handle_response(response).await
    }

    /// Handle the HTTP response: success parses the typed body, failure
    /// parses the exceptions body.
    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await?;
            return match serde_json::from_str::<ExceptionsBody>(&text) {
                Ok(body) => Err(ClientError::from_exceptions(body)),
                Err(_) => Err(ClientError::InvalidResponse(format!(
                    "HTTP {status}: {text}"
                ))),
            };
        }

        response.json().await.map_err(Into::into)
    }

    // ========== Backend API ==========

    /// Filter customers by a free-text key.
    pub async fn filter_customers(&self, key: &str) -> ClientResult<Vec<CustomerAggregate>> {
        self.post(
            "/backend_api/ajax_filter_customers",
            &FilterCustomersRequest {
                csrf_token: self.csrf_token.clone(),
                key: key.to_string(),
            },
        )
        .await
    }

    /// Save a customer (insert or update); returns the record id.
    pub async fn save_customer(&self, customer: CustomerPayload) -> ClientResult<SavedCustomer> {
        self.post(
            "/backend_api/ajax_save_customer",
            &SaveCustomerRequest {
                csrf_token: self.csrf_token.clone(),
                customer,
            },
        )
        .await
    }

    /// Delete a customer record.
    pub async fn delete_customer(&self, customer_id: i64) -> ClientResult<()> {
        self.post::<serde_json::Value, _>(
            "/backend_api/ajax_delete_customer",
            &DeleteCustomerRequest::new(self.csrf_token.clone(), customer_id),
        )
        .await?;
        Ok(())
    }

    /// Persist the three flags of an appointment.
    pub async fn save_appointment_checked(
        &self,
        id: i64,
        is_paid: i64,
        is_shown: i64,
        is_invoice: i64,
    ) -> ClientResult<()> {
        self.post::<serde_json::Value, _>(
            "/backend_api/ajax_save_appointment_checked",
            &SaveAppointmentCheckedRequest::new(
                self.csrf_token.clone(),
                id,
                is_paid,
                is_shown,
                is_invoice,
            ),
        )
        .await?;
        Ok(())
    }

    /// Create an invoice for a customer, optionally mailing it.
    pub async fn create_invoice(
        &self,
        customer_id: i64,
        send_email: bool,
    ) -> ClientResult<InvoiceCreated> {
        self.post(
            "/backend_api/ajax_create_invoice",
            &CreateInvoiceRequest::new(self.csrf_token.clone(), customer_id, send_email),
        )
        .await
    }
}
