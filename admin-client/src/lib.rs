//! Admin Client - the customers page against the admin server.
//!
//! Split in two layers:
//!
//! - [`HttpClient`]: one typed stub per backend endpoint.
//! - [`CustomersPage`]: the page state machine holding the filter cache,
//!   selection, form buffer and client-side validation. It performs no I/O
//!   of its own; [`CustomersHelper`] pairs it with the HTTP client.

pub mod config;
pub mod controller;
pub mod error;
pub mod helper;
pub mod http;

pub use config::ClientConfig;
pub use controller::{CustomersPage, FormState, FormValidation};
pub use error::{ClientError, ClientResult};
pub use helper::{CustomersHelper, SaveOutcome};
pub use http::HttpClient;
