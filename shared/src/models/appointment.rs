//! Appointment Model
//!
//! Appointments are created elsewhere; the customers page only reads them and
//! mutates the three per-appointment flags. Flags travel as 0/1 integers.

use serde::{Deserialize, Serialize};

/// Service reference embedded in an appointment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceRef {
    pub name: String,
}

/// Provider reference embedded in an appointment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderRef {
    pub first_name: String,
    pub last_name: String,
}

/// Appointment as embedded in a customer aggregate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: i64,
    pub customer_id: i64,
    /// `YYYY-MM-DD HH:MM:SS`
    pub start_datetime: String,
    /// `YYYY-MM-DD HH:MM:SS`
    pub end_datetime: String,
    pub service: ServiceRef,
    pub provider: ProviderRef,
    /// 0/1
    pub is_paid: i64,
    /// 0/1 (no-show)
    pub is_shown: i64,
    /// 0/1 (include when invoicing)
    pub is_invoice: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_stay_numeric_on_the_wire() {
        let appointment = Appointment {
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
            is_paid: 1,
            is_shown: 0,
            is_invoice: 1,
        };

        let json = serde_json::to_value(&appointment).unwrap();
        assert_eq!(json["is_paid"], 1);
        assert_eq!(json["is_shown"], 0);
        assert_eq!(json["service"]["name"], "Haircut");
        assert_eq!(json["provider"]["last_name"], "Doe");
    }
}
