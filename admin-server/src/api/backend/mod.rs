//! Backend API module - the customers page endpoints.
//!
//! | Path | Handler |
//! |------|---------|
//! | POST /backend_api/ajax_filter_customers | [`handler::filter_customers`] |
//! | POST /backend_api/ajax_save_customer | [`handler::save_customer`] |
//! | POST /backend_api/ajax_delete_customer | [`handler::delete_customer`] |
//! | POST /backend_api/ajax_save_appointment_checked | [`handler::save_appointment_checked`] |
//! | POST /backend_api/ajax_create_invoice | [`handler::create_invoice`] |

pub mod handler;

use axum::{Router, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/backend_api", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/ajax_filter_customers", post(handler::filter_customers))
        .route("/ajax_save_customer", post(handler::save_customer))
        .route("/ajax_delete_customer", post(handler::delete_customer))
        .route(
            "/ajax_save_appointment_checked",
            post(handler::save_appointment_checked),
        )
        .route("/ajax_create_invoice", post(handler::create_invoice))
}
