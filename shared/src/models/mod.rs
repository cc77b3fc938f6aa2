//! Wire models for the backend customers page.

mod appointment;
mod customer;
mod invoice;

pub use appointment::{Appointment, ProviderRef, ServiceRef};
pub use customer::{Customer, CustomerAggregate, CustomerPayload, SavedCustomer};
pub use invoice::{Invoice, InvoiceCreated, InvoiceDescriptor};
