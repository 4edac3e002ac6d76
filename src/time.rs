use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeError {
    #[error("invalid timestamp format {input:?}: {reason}")]
    InvalidTimestampFormat { input: String, reason: String },
}

impl TimeError {
    fn invalid(input: &str, reason: impl Into<String>) -> Self {
        TimeError::InvalidTimestampFormat {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}

/// Parse a colon-separated clock value (`SS`, `M:SS`, `H:MM:SS`, ...) into seconds.
///
/// Fields are read least-significant last, each worth 60x the one after it.
/// Every field must be a non-empty run of ASCII digits.
pub fn parse_timestamp_to_seconds(text: &str) -> Result<u64, TimeError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(TimeError::invalid(text, "empty timestamp"));
    }

    let mut total: u64 = 0;
    let mut scale: u64 = 1;
    for (i, field) in trimmed.split(':').rev().enumerate() {
        let field = field.trim();
        if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
            return Err(TimeError::invalid(text, format!("field {field:?} is not a whole number")));
        }
        let value: u64 = field
            .parse()
            .map_err(|_| TimeError::invalid(text, format!("field {field:?} is out of range")))?;

        if i > 0 {
            scale = scale
                .checked_mul(60)
                .ok_or_else(|| TimeError::invalid(text, "too many fields"))?;
        }
        total = value
            .checked_mul(scale)
            .and_then(|v| total.checked_add(v))
            .ok_or_else(|| TimeError::invalid(text, "value out of range"))?;
    }

    Ok(total)
}

/// Format seconds as `H:MM:SS` when an hour component exists, otherwise `M:SS`.
///
/// Fractional seconds are truncated. Negative and NaN inputs format as `0:00`.
pub fn format_seconds_to_timestamp(seconds: f64) -> String {
    let total = seconds.floor() as u64;
    let h = total / 3600;
    let m = (total % 3600) / 60;
    let s = total % 60;
    if h > 0 {
        format!("{h}:{m:02}:{s:02}")
    } else {
        format!("{m}:{s:02}")
    }
}

/// Minutes-only `M:SS` form used for caption timestamp lines (`75:03` past the hour).
pub fn format_caption_timestamp(seconds: f64) -> String {
    let total = seconds.round() as u64;
    format!("{}:{:02}", total / 60, total % 60)
}
