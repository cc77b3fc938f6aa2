//! Server configuration.

use std::path::PathBuf;

/// Server configuration - all knobs of the admin backend.
///
/// # Environment variables
///
/// Every item can be overridden through an environment variable:
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | WORK_DIR | ./data | working directory (database, invoices, logs) |
/// | HTTP_PORT | 3000 | HTTP API port |
/// | BASE_URL | http://localhost:3000 | public base URL used in invoice links |
/// | CSRF_TOKEN | (empty) | token the external collaborator issued to the page |
/// | LOG_LEVEL | info | tracing filter level |
///
/// # Example
///
/// ```ignore
/// WORK_DIR=/var/lib/admin HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Working directory; database and invoice artifacts live below it.
    pub work_dir: PathBuf,
    /// HTTP API port.
    pub http_port: u16,
    /// Public base URL, prefix of every invoice `file_link`.
    pub base_url: String,
    /// CSRF token accepted by the [`CsrfGuard`](crate::services::CsrfGuard).
    pub csrf_token: String,
    /// Log level: trace | debug | info | warn | error.
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables, with defaults for
    /// anything unset.
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./data")),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            base_url: std::env::var("BASE_URL")
                .unwrap_or_else(|_| "http://localhost:3000".into()),
            csrf_token: std::env::var("CSRF_TOKEN").unwrap_or_default(),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
        }
    }

    /// Path of the SQLite database file.
    pub fn db_path(&self) -> PathBuf {
        self.work_dir.join("admin.db")
    }

    /// Directory the invoice artifacts are rendered into. Writable by the
    /// server process only.
    pub fn invoice_dir(&self) -> PathBuf {
        self.work_dir.join("invoices")
    }

    /// Public URL of a rendered invoice file.
    pub fn invoice_link(&self, filename: &str) -> String {
        format!("{}/invoices/{}", self.base_url.trim_end_matches('/'), filename)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
