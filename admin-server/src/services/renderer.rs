//! Invoice artifact renderer.
//!
//! PDF layout is outside this core; the renderer is a collaborator trait and
//! the default implementation writes a plain-text artifact at the stable path
//! the invoice row links to.

use std::path::Path;

use async_trait::async_trait;
use thiserror::Error;

use shared::models::{Appointment, Customer};

#[derive(Debug, Error)]
pub enum RendererError {
    /// The artifact path already exists. Hash collisions must be fatal,
    /// never silently overwritten.
    #[error("Artifact already exists: {0}")]
    Collision(String),

    #[error("Failed to write artifact: {0}")]
    Io(#[from] std::io::Error),
}

/// Produces the invoice artifact for a customer.
#[async_trait]
pub trait InvoiceRenderer: Send + Sync {
    /// Render the artifact at `path` for `customer`, covering the
    /// appointments flagged for invoicing.
    async fn render(
        &self,
        path: &Path,
        customer: &Customer,
        billable: &[Appointment],
    ) -> Result<(), RendererError>;
}

/// Default renderer: one text file per invoice.
pub struct FileRenderer;

#[async_trait]
impl InvoiceRenderer for FileRenderer {
    async fn render(
        &self,
        path: &Path,
        customer: &Customer,
        billable: &[Appointment],
    ) -> Result<(), RendererError> {
        if tokio::fs::try_exists(path).await? {
            return Err(RendererError::Collision(path.display().to_string()));
        }

        let mut content = format!(
            "INVOICE\n\nCustomer: {} {}\nEmail: {}\n\n",
            customer.first_name, customer.last_name, customer.email
        );
        for appointment in billable {
            content.push_str(&format!(
                "{} - {}  {} ({} {})\n",
                appointment.start_datetime,
                appointment.end_datetime,
                appointment.service.name,
                appointment.provider.first_name,
                appointment.provider.last_name,
            ));
        }

        tokio::fs::write(path, content).await?;
        tracing::info!(path = %path.display(), "Invoice artifact rendered");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{ProviderRef, ServiceRef};

    fn customer() -> Customer {
        Customer {
            id: 1,
            first_name: "John".into(),
            last_name: "Smith".into(),
            email: "john@smith.co".into(),
            phone_number: None,
            address: None,
            city: None,
            zip_code: None,
            notes: None,
        }
    }

    fn appointment() -> Appointment {
        Appointment {
            id: 7,
            customer_id: 1,
            start_datetime: "2016-05-01 10:00:00".into(),
            end_datetime: "2016-05-01 11:00:00".into(),
            service: ServiceRef {
                name: "Haircut".into(),
            },
            provider: ProviderRef {
                first_name: "Jane".into(),
                last_name: "Doe".into(),
            },
            is_paid: 0,
            is_shown: 0,
            is_invoice: 1,
        }
    }

    #[tokio::test]
    async fn renders_artifact_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("invoice_1_abc.pdf");

        FileRenderer
            .render(&path, &customer(), &[appointment()])
            .await
            .unwrap();

        let content = tokio::fs::read_to_string(&path).await.unwrap();
        assert!(content.contains("John Smith"));
        assert!(content.contains("Haircut"));
    }

    #[tokio::test]
    async fn existing_artifact_is_a_fatal_collision() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("invoice_1_abc.pdf");
        tokio::fs::write(&path, "previous").await.unwrap();

        let err = FileRenderer
            .render(&path, &customer(), &[])
            .await
            .unwrap_err();
        assert!(matches!(err, RendererError::Collision(_)));

        // The original artifact is untouched.
        let content = tokio::fs::read_to_string(&path).await.unwrap();
        assert_eq!(content, "previous");
    }
}
