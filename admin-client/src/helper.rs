//! Customers helper - wires page gestures to the backend API.
//!
//! Owns a [`CustomersPage`] and an [`HttpClient`] and drives the roundtrip
//! choreography: validate locally, POST, then fold the confirmed reply back
//! into the page cache. All state lives in the page; the helper never keeps
//! its own copy of the data.

use tracing::debug;

use shared::models::InvoiceCreated;

use crate::{ClientConfig, ClientError, ClientResult, CustomersPage, FormValidation, HttpClient};

/// Result of a save gesture.
#[derive(Debug)]
pub enum SaveOutcome {
    /// The record was persisted under this id and the page was refreshed.
    Saved(i64),
    /// Client-side validation failed; nothing was sent.
    Invalid(FormValidation),
}

/// Driver for the customers page.
#[derive(Debug)]
pub struct CustomersHelper {
    client: HttpClient,
    page: CustomersPage,
}

impl CustomersHelper {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            client: HttpClient::new(config),
            page: CustomersPage::new(),
        }
    }

    pub fn page(&self) -> &CustomersPage {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut CustomersPage {
        &mut self.page
    }

    /// Load the unfiltered list on page entry.
    pub async fn initialize(&mut self) -> ClientResult<()> {
        self.page.reset_form();
        self.filter("").await
    }

    /// Run a filter and replace the cached results. Ignored while a form
    /// edit is in progress, matching the locked filter input.
    pub async fn filter(&mut self, key: &str) -> ClientResult<()> {
        if !self.page.filter_enabled() {
            return Ok(());
        }
        let results = self.client.filter_customers(key).await?;
        debug!(key, count = results.len(), "filter results");
        self.page.apply_filter_results(key, results, None, false);
        Ok(())
    }

    /// Save the form. Validation failures stay local; on success the list is
    /// refreshed with an empty key and the saved record is re-selected and
    /// displayed.
    pub async fn save(&mut self) -> ClientResult<SaveOutcome> {
        let payload = match self.page.validate_form() {
            Ok(payload) => payload,
            Err(validation) => return Ok(SaveOutcome::Invalid(validation)),
        };

        let saved = self.client.save_customer(payload).await?;
        self.page.save_succeeded();

        let results = self.client.filter_customers("").await?;
        self.page
            .apply_filter_results("", results, Some(saved.id), true);
        Ok(SaveOutcome::Saved(saved.id))
    }

    /// Delete the selected record, then refresh the list under the current
    /// key with nothing selected.
    pub async fn delete_selected(&mut self) -> ClientResult<()> {
        let Some(customer) = self.page.selected_customer() else {
            return Err(ClientError::InvalidResponse(
                "no customer selected".to_string(),
            ));
        };
        let id = customer.id();

        self.client.delete_customer(id).await?;
        self.page.delete_succeeded();

        let key = self.page.filter_key().to_string();
        let results = self.client.filter_customers(&key).await?;
        self.page.apply_filter_results(&key, results, None, false);
        Ok(())
    }

    /// Persist an appointment's three flags, then mirror the confirmed
    /// values into the cached aggregate without re-fetching.
    pub async fn toggle_appointment_flags(
        &mut self,
        customer_id: i64,
        appointment_id: i64,
        is_paid: i64,
        is_shown: i64,
        is_invoice: i64,
    ) -> ClientResult<()> {
        self.client
            .save_appointment_checked(appointment_id, is_paid, is_shown, is_invoice)
            .await?;

        if !self
            .page
            .confirm_appointment_flags(customer_id, appointment_id, is_paid, is_shown, is_invoice)
        {
            debug!(customer_id, appointment_id, "stale flag reply discarded");
        }
        Ok(())
    }

    /// Create an invoice for the selected customer and append it to the
    /// cached aggregate.
    pub async fn create_invoice(&mut self, send_email: bool) -> ClientResult<InvoiceCreated> {
        let Some(customer) = self.page.selected_customer() else {
            return Err(ClientError::InvalidResponse(
                "no customer selected".to_string(),
            ));
        };
        let customer_id = customer.id();

        let created = self.client.create_invoice(customer_id, send_email).await?;
        self.page.confirm_invoice_created(customer_id, &created);
        Ok(created)
    }
}
