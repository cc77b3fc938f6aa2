//! Input validation helpers
//!
//! Centralized checks for the customer form and the loose record ids the
//! legacy page posts as strings.

use serde_json::Value;
use validator::ValidateEmail;

use crate::utils::{AppError, AppResult};
use shared::models::CustomerPayload;

/// Required customer fields; validated both here and client-side.
pub const REQUIRED_CUSTOMER_FIELDS: [&str; 3] = ["first_name", "last_name", "email"];

/// Narrow a loose wire value into a record id. Accepts integers and numeric
/// strings; anything else is *bad-argument*.
pub fn parse_record_id(value: &Value) -> AppResult<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .ok_or_else(|| AppError::bad_argument(format!("Invalid record id: {n}"))),
        Value::String(s) => s
            .trim()
            .parse()
            .map_err(|_| AppError::bad_argument(format!("Invalid record id: \"{s}\""))),
        other => Err(AppError::bad_argument(format!(
            "Invalid record id: {other}"
        ))),
    }
}

/// Check a wire flag is 0 or 1.
pub fn parse_flag(name: &str, value: i64) -> AppResult<i64> {
    if shared::util::is_flag(value) {
        Ok(value)
    } else {
        Err(AppError::bad_argument(format!(
            "Flag {name} must be 0 or 1, got {value}"
        )))
    }
}

/// Validate a customer payload: required fields non-empty, email
/// syntactically valid. Returns the offending fields as a validation error.
pub fn validate_customer(customer: &CustomerPayload) -> AppResult<()> {
    let mut fields = Vec::new();

    if customer.first_name.trim().is_empty() {
        fields.push("first_name".to_string());
    }
    if customer.last_name.trim().is_empty() {
        fields.push("last_name".to_string());
    }
    if customer.email.trim().is_empty() {
        fields.push("email".to_string());
    }

    if !fields.is_empty() {
        return Err(AppError::validation("Required fields are missing", fields));
    }

    if !customer.email.validate_email() {
        return Err(AppError::validation(
            "Invalid email address",
            vec!["email".to_string()],
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_ids_accept_numbers_and_numeric_strings() {
        assert_eq!(parse_record_id(&Value::from(7)).unwrap(), 7);
        assert_eq!(parse_record_id(&Value::from("12")).unwrap(), 12);
        assert!(parse_record_id(&Value::from("abc")).is_err());
        assert!(parse_record_id(&Value::Null).is_err());
        assert!(parse_record_id(&Value::from(1.5)).is_err());
    }

    #[test]
    fn flags_must_be_zero_or_one() {
        assert_eq!(parse_flag("is_paid", 1).unwrap(), 1);
        assert!(parse_flag("is_paid", 2).is_err());
    }

    #[test]
    fn missing_required_fields_are_named() {
        let customer = CustomerPayload {
            last_name: "B".into(),
            email: "a@b.co".into(),
            ..Default::default()
        };
        let err = validate_customer(&customer).unwrap_err();
        match err {
            AppError::Validation { fields, .. } => assert_eq!(fields, vec!["first_name"]),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn malformed_email_is_rejected() {
        let customer = CustomerPayload {
            first_name: "A".into(),
            last_name: "B".into(),
            email: "not-an-email".into(),
            ..Default::default()
        };
        let err = validate_customer(&customer).unwrap_err();
        match err {
            AppError::Validation { fields, .. } => assert_eq!(fields, vec!["email"]),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn valid_payload_passes() {
        let customer = CustomerPayload {
            first_name: "A".into(),
            last_name: "B".into(),
            email: "a@b.co".into(),
            ..Default::default()
        };
        assert!(validate_customer(&customer).is_ok());
    }
}
