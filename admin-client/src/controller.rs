//! Customers page controller.
//!
//! [`CustomersPage`] holds everything the page knows between roundtrips: the
//! cached filter results, the current selection, the form buffer and the form
//! state machine. It performs no I/O; the [`CustomersHelper`](crate::helper)
//! drives it against the HTTP client and feeds confirmed server replies back
//! in.
//!
//! # Form state machine
//!
//! | Transition | Trigger |
//! |---|---|
//! | Idle → EditingNew | add button |
//! | Idle → EditingExisting | edit button (row selected) |
//! | Editing* → Idle | cancel, or save success |
//! | Idle → Idle | row click, delete confirm |
//!
//! The filter input is enabled exactly while `Idle`; edit/delete are enabled
//! exactly while `Idle` with a row selected. Row clicks during an edit are
//! ignored.

use validator::ValidateEmail;

use shared::models::{CustomerAggregate, CustomerPayload, InvoiceCreated};

/// Form state of the customers page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormState {
    #[default]
    Idle,
    EditingNew,
    EditingExisting,
}

/// Outcome of a failed client-side validation: the fields to outline and the
/// summary message to show. No request is issued while this is non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormValidation {
    pub invalid_fields: Vec<String>,
    pub message: String,
}

/// The customers page state.
#[derive(Debug, Default)]
pub struct CustomersPage {
    /// Current filter key, re-used when the list must be refreshed.
    filter_key: String,
    /// Authoritative snapshot between roundtrips.
    filter_results: Vec<CustomerAggregate>,
    /// Selection as an index into `filter_results`.
    selected: Option<usize>,
    /// In-progress form buffer.
    form: CustomerPayload,
    state: FormState,
    /// Fields currently outlined after a failed validation.
    invalid_fields: Vec<String>,
}

impl CustomersPage {
    pub fn new() -> Self {
        Self::default()
    }

    // ========== Queries ==========

    pub fn form_state(&self) -> FormState {
        self.state
    }

    pub fn filter_key(&self) -> &str {
        &self.filter_key
    }

    pub fn filter_results(&self) -> &[CustomerAggregate] {
        &self.filter_results
    }

    pub fn form(&self) -> &CustomerPayload {
        &self.form
    }

    pub fn invalid_fields(&self) -> &[String] {
        &self.invalid_fields
    }

    pub fn selected_customer(&self) -> Option<&CustomerAggregate> {
        self.selected.and_then(|i| self.filter_results.get(i))
    }

    /// The filter input is locked exactly while a form edit is in progress.
    pub fn filter_enabled(&self) -> bool {
        self.state == FormState::Idle
    }

    /// Edit and delete are available exactly while idle with a row selected.
    pub fn edit_delete_enabled(&self) -> bool {
        self.state == FormState::Idle && self.selected.is_some()
    }

    // ========== Filter results ==========

    /// Replace the cached results after a filter roundtrip. Optionally
    /// re-select a record by id, and optionally display it on the form.
    pub fn apply_filter_results(
        &mut self,
        key: &str,
        results: Vec<CustomerAggregate>,
        select_id: Option<i64>,
        display: bool,
    ) {
        self.filter_key = key.to_string();
        self.filter_results = results;
        self.selected = None;

        if let Some(id) = select_id {
            self.select(id, display);
        }
    }

    /// Select a record from the current results by id. Unknown ids leave the
    /// selection empty. `display` additionally loads the record into the
    /// (readonly) form.
    pub fn select(&mut self, id: i64, display: bool) {
        self.selected = self.filter_results.iter().position(|c| c.id() == id);
        if display
            && let Some(payload) = self
                .selected_customer()
                .map(|c| CustomerPayload::from_customer(&c.customer))
        {
            self.form = payload;
        }
    }

    // ========== Gestures ==========

    /// Row click. Ignored while a form edit is in progress; otherwise selects
    /// and displays the record. Returns whether the click was honored.
    pub fn click_row(&mut self, id: i64) -> bool {
        if self.state != FormState::Idle {
            return false;
        }
        self.select(id, true);
        self.selected.is_some()
    }

    /// Add button: clear the form and start editing a new record.
    pub fn begin_add(&mut self) {
        self.reset_form();
        self.state = FormState::EditingNew;
    }

    /// Edit button: unlock the form over the selected record. Returns false
    /// when no row is selected or an edit is already in progress.
    pub fn begin_edit(&mut self) -> bool {
        if !self.edit_delete_enabled() {
            return false;
        }
        // Form already holds the displayed record.
        self.state = FormState::EditingExisting;
        true
    }

    /// Cancel: back to idle. An existing record keeps its row selected
    /// (without re-displaying), a new record leaves nothing selected.
    pub fn cancel(&mut self) {
        let previous = self.form.id;
        let was_existing = self.state == FormState::EditingExisting;
        self.reset_form();
        self.state = FormState::Idle;
        if was_existing && let Some(id) = previous {
            self.select(id, false);
        }
    }

    /// Client-side validation before save: required fields non-empty and a
    /// syntactically valid email. On failure the offending fields are kept
    /// for rendering and no payload is produced.
    pub fn validate_form(&mut self) -> Result<CustomerPayload, FormValidation> {
        let mut invalid = Vec::new();

        if self.form.first_name.trim().is_empty() {
            invalid.push("first_name".to_string());
        }
        if self.form.last_name.trim().is_empty() {
            invalid.push("last_name".to_string());
        }
        if self.form.email.trim().is_empty() {
            invalid.push("email".to_string());
        }

        let message = if !invalid.is_empty() {
            "Required fields are missing".to_string()
        } else if !self.form.email.validate_email() {
            invalid.push("email".to_string());
            "Invalid email address".to_string()
        } else {
            self.invalid_fields.clear();
            return Ok(self.form.clone());
        };

        self.invalid_fields = invalid.clone();
        Err(FormValidation {
            invalid_fields: invalid,
            message,
        })
    }

    /// Mutate the form buffer while editing.
    pub fn form_mut(&mut self) -> &mut CustomerPayload {
        &mut self.form
    }

    /// Save confirmed by the server: back to idle with a clean form. The
    /// helper refilters and re-selects the returned id.
    pub fn save_succeeded(&mut self) {
        self.reset_form();
        self.state = FormState::Idle;
    }

    /// Delete confirmed by the server: clean form, the helper refilters.
    pub fn delete_succeeded(&mut self) {
        self.reset_form();
    }

    /// Bring the form back to its initial state.
    pub fn reset_form(&mut self) {
        self.form = CustomerPayload::default();
        self.invalid_fields.clear();
        self.selected = None;
        self.state = FormState::Idle;
    }

    // ========== Confirmed mutations ==========

    /// Mirror a confirmed flag toggle into the cached aggregate. Keyed by
    /// customer and appointment id, so a reply that arrives after the cache
    /// changed under it is discarded. Returns whether the reply was applied.
    pub fn confirm_appointment_flags(
        &mut self,
        customer_id: i64,
        appointment_id: i64,
        is_paid: i64,
        is_shown: i64,
        is_invoice: i64,
    ) -> bool {
        let Some(customer) = self
            .filter_results
            .iter_mut()
            .find(|c| c.id() == customer_id)
        else {
            return false;
        };
        let Some(appointment) = customer
            .appointments
            .iter_mut()
            .find(|a| a.id == appointment_id)
        else {
            return false;
        };

        appointment.is_paid = is_paid;
        appointment.is_shown = is_shown;
        appointment.is_invoice = is_invoice;
        true
    }

    /// Append a confirmed invoice descriptor to the cached aggregate, keyed
    /// by customer id. No re-fetch. Returns whether the reply was applied.
    pub fn confirm_invoice_created(&mut self, customer_id: i64, created: &InvoiceCreated) -> bool {
        let Some(customer) = self
            .filter_results
            .iter_mut()
            .find(|c| c.id() == customer_id)
        else {
            return false;
        };
        customer.invoices.push(created.to_invoice(customer_id));
        true
    }
}
