//! Collaborator services the backend endpoints delegate to.
//!
//! - [`InvoiceRenderer`] - produces the invoice artifact on disk
//! - [`InvoiceMailer`] - best-effort invoice mail delivery
//! - [`CsrfGuard`] - validates the caller-supplied CSRF token

pub mod csrf;
pub mod mailer;
pub mod renderer;

pub use csrf::{CsrfGuard, StaticTokenGuard};
pub use mailer::{InvoiceMailer, LogMailer, MailerError};
pub use renderer::{FileRenderer, InvoiceRenderer, RendererError};
