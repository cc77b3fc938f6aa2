//! Server state - shared handle passed to every request handler.

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::core::Config;
use crate::db::DbService;
use crate::services::{CsrfGuard, FileRenderer, InvoiceMailer, InvoiceRenderer, LogMailer, StaticTokenGuard};
use crate::utils::AppError;

/// Shared server state.
///
/// Holds the connection pool and the collaborator services. Cloning is a
/// handful of `Arc` bumps.
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration.
    pub config: Arc<Config>,
    /// SQLite connection pool.
    pub pool: SqlitePool,
    /// Invoice artifact renderer.
    pub renderer: Arc<dyn InvoiceRenderer>,
    /// Invoice mailer (best-effort).
    pub mailer: Arc<dyn InvoiceMailer>,
    /// CSRF token collaborator.
    pub csrf: Arc<dyn CsrfGuard>,
}

impl ServerState {
    /// Initialize state for production use: open the database, run
    /// migrations, create the invoice directory and wire the default
    /// collaborators.
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        tokio::fs::create_dir_all(&config.work_dir)
            .await
            .map_err(|e| AppError::internal(format!("Failed to create work dir: {e}")))?;
        tokio::fs::create_dir_all(config.invoice_dir())
            .await
            .map_err(|e| AppError::internal(format!("Failed to create invoice dir: {e}")))?;

        let db = DbService::new(&config.db_path().to_string_lossy()).await?;

        Ok(Self {
            config: Arc::new(config.clone()),
            pool: db.pool,
            renderer: Arc::new(FileRenderer),
            mailer: Arc::new(LogMailer),
            csrf: Arc::new(StaticTokenGuard::new(config.csrf_token.clone())),
        })
    }

    /// Build a state around existing parts. Used by tests to swap in
    /// in-memory pools and recording collaborators.
    pub fn with_parts(
        config: Config,
        pool: SqlitePool,
        renderer: Arc<dyn InvoiceRenderer>,
        mailer: Arc<dyn InvoiceMailer>,
        csrf: Arc<dyn CsrfGuard>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            pool,
            renderer,
            mailer,
            csrf,
        }
    }
}
