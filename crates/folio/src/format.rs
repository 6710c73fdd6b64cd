use num_format::{Locale, ToFormattedString};

/// Group an integer with thousands separators (`12345` -> `12,345`).
///
/// Fallback used when the host cannot format with the visitor's locale.
pub fn group_thousands(value: u64) -> String {
    value.to_formatted_string(&Locale::en)
}
