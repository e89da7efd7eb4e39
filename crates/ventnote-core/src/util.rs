//! Shared utility functions used across multiple modules.

/// Normalize optional text by trimming whitespace and removing empties.
///
/// Returns `None` when the input is `None` or the trimmed value is empty.
pub fn normalize_text_option(value: Option<String>) -> Option<String> {
    let value = value?;
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Current Unix timestamp in milliseconds.
pub fn unix_millis_now() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Render a Unix millisecond timestamp as RFC 3339, or `never` for zero.
pub fn format_millis(timestamp_ms: i64) -> String {
    if timestamp_ms == 0 {
        return "never".to_string();
    }
    chrono::DateTime::from_timestamp_millis(timestamp_ms)
        .map_or_else(|| timestamp_ms.to_string(), |time| time.to_rfc3339())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_text_option_rejects_empty() {
        assert_eq!(normalize_text_option(None), None);
        assert_eq!(normalize_text_option(Some("   ".to_string())), None);
    }

    #[test]
    fn normalize_text_option_trims_value() {
        assert_eq!(
            normalize_text_option(Some(" personal ".to_string())),
            Some("personal".to_string())
        );
    }

    #[test]
    fn format_millis_handles_never_and_epoch_values() {
        assert_eq!(format_millis(0), "never");
        assert_eq!(format_millis(1_000), "1970-01-01T00:00:01+00:00");
    }
}
