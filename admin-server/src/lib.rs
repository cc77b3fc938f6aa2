//! Admin Server - backend for the customers administration page.
//!
//! # Module structure
//!
//! ```text
//! admin-server/src/
//! ├── core/          # config, state, server
//! ├── api/           # HTTP routes and handlers
//! ├── db/            # SQLite pool and repositories
//! ├── services/      # renderer, mailer, CSRF collaborators
//! ├── routes/        # router assembly and middleware
//! └── utils/         # errors, validation, logging
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod routes;
pub mod services;
pub mod utils;

// Re-export public types
pub use core::{Config, Server, ServerState};
pub use db::DbService;
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};
