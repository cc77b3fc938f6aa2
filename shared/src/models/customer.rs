//! Customer Model

use serde::{Deserialize, Serialize};

use super::{Appointment, Invoice};

/// Customer entity as persisted and filtered.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Customer {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub zip_code: Option<String>,
    pub notes: Option<String>,
}

/// Save payload: id absent for insert, present for update.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CustomerPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub zip_code: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl CustomerPayload {
    /// Form buffer for an existing record.
    pub fn from_customer(customer: &Customer) -> Self {
        Self {
            id: Some(customer.id),
            first_name: customer.first_name.clone(),
            last_name: customer.last_name.clone(),
            email: customer.email.clone(),
            phone_number: customer.phone_number.clone(),
            address: customer.address.clone(),
            city: customer.city.clone(),
            zip_code: customer.zip_code.clone(),
            notes: customer.notes.clone(),
        }
    }
}

/// Customer plus its embedded appointments and invoices, as returned by the
/// filter endpoint. One element of the client's filter result set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerAggregate {
    #[serde(flatten)]
    pub customer: Customer,
    /// Chronologically ascending.
    pub appointments: Vec<Appointment>,
    /// Insertion order.
    pub invoices: Vec<Invoice>,
}

impl CustomerAggregate {
    pub fn id(&self) -> i64 {
        self.customer.id
    }
}

/// Reply of the save endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedCustomer {
    pub id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aggregate_flattens_customer_fields() {
        let aggregate = CustomerAggregate {
            customer: Customer {
                id: 3,
                first_name: "John".into(),
                last_name: "Smith".into(),
                email: "john@smith.co".into(),
                phone_number: None,
                address: None,
                city: None,
                zip_code: None,
                notes: None,
            },
            appointments: Vec::new(),
            invoices: Vec::new(),
        };

        let json = serde_json::to_value(&aggregate).unwrap();
        assert_eq!(json["id"], 3);
        assert_eq!(json["first_name"], "John");
        assert!(json["appointments"].as_array().unwrap().is_empty());
    }
}
