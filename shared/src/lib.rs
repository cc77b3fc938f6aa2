//! Shared contracts between the admin server and the admin client.
//!
//! # Contents
//!
//! - **models**: wire types for customers, appointments and invoices
//! - **request**: typed request payloads for the backend API endpoints
//! - **error**: exception kinds and the `{"exceptions": [...]}` wire body
//! - **util**: wall-clock formatting and flag helpers

pub mod error;
pub mod models;
pub mod request;
pub mod util;

pub use error::{ApiException, ExceptionKind, ExceptionsBody};
pub use models::{
    Appointment, Customer, CustomerAggregate, CustomerPayload, Invoice, InvoiceCreated,
    InvoiceDescriptor, ProviderRef, SavedCustomer, ServiceRef,
};
