//! Wall-clock and flag helpers shared by both sides.

use chrono::Local;

/// Datetime format used across the wire and the database.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Current wall-clock as `YYYY-MM-DD HH:MM:SS`.
pub fn now_datetime() -> String {
    Local::now().format(DATETIME_FORMAT).to_string()
}

/// Whether a value is a valid 0/1 wire flag.
pub fn is_flag(value: i64) -> bool {
    value == 0 || value == 1
}
