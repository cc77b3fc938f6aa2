//! HTTP API modules.

pub mod backend;
pub mod health;
