//! Input validation for stored fields.

use std::fmt;

use chrono::NaiveDate;

/// Validation error types.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Not a `YYYY-MM-DD` calendar date.
    InvalidDate(String),
    /// End date before start date.
    DateOrder { start: String, end: String },
    /// Number outside its allowed range.
    OutOfRange { field: String, value: f64 },
    /// Value too long.
    TooLong { field: String, max: usize, actual: usize },
    /// Empty value where one is required.
    Empty(String),
    /// Not a `local@domain.tld` address.
    InvalidEmail(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::InvalidDate(value) => {
                write!(f, "Invalid date {:?} (expected YYYY-MM-DD)", value)
            }
            ValidationError::DateOrder { start, end } => {
                write!(f, "End date {} is before start date {}", end, start)
            }
            ValidationError::OutOfRange { field, value } => {
                write!(f, "{} is out of range: {}", field, value)
            }
            ValidationError::TooLong { field, max, actual } => {
                write!(f, "{} is too long ({} chars, max {})", field, actual, max)
            }
            ValidationError::Empty(field) => write!(f, "{} cannot be empty", field),
            ValidationError::InvalidEmail(msg) => write!(f, "Invalid email: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Maximum allowed length for a download task ID.
pub const MAX_TASK_ID_LENGTH: usize = 128;

/// Maximum allowed length for email addresses.
pub const MAX_EMAIL_LENGTH: usize = 254;

/// Validate an account email address.
///
/// Accepts `local@domain.tld`: exactly one `@`, no whitespace, and a dot in
/// the domain with text on both sides of it.
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    let email = email.trim();

    if email.is_empty() {
        return Err(ValidationError::Empty("email".to_string()));
    }

    if email.len() > MAX_EMAIL_LENGTH {
        return Err(ValidationError::TooLong {
            field: "email".to_string(),
            max: MAX_EMAIL_LENGTH,
            actual: email.len(),
        });
    }

    if email.chars().any(char::is_whitespace) {
        return Err(ValidationError::InvalidEmail(
            "cannot contain whitespace".to_string(),
        ));
    }

    let Some((local, domain)) = email.split_once('@') else {
        return Err(ValidationError::InvalidEmail(
            "must contain an @ symbol".to_string(),
        ));
    };

    if domain.contains('@') {
        return Err(ValidationError::InvalidEmail(
            "must contain exactly one @ symbol".to_string(),
        ));
    }

    if local.is_empty() {
        return Err(ValidationError::InvalidEmail(
            "missing local part (before @)".to_string(),
        ));
    }

    // some dot with text before and after it
    let dotted = domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len());
    if !dotted {
        return Err(ValidationError::InvalidEmail(
            "domain must look like name.tld".to_string(),
        ));
    }

    Ok(())
}

/// Validate and normalize a date to `YYYY-MM-DD`.
///
/// Only the first 10 characters are considered, so full timestamps such as
/// `2022-01-10T04:12:00Z` are accepted and truncated to their date.
pub fn validate_iso_date(value: &str) -> Result<String, ValidationError> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Empty("date".to_string()));
    }

    let head = value.get(..10).unwrap_or(value);
    NaiveDate::parse_from_str(head, "%Y-%m-%d")
        .map(|date| date.format("%Y-%m-%d").to_string())
        .map_err(|_| ValidationError::InvalidDate(value.to_string()))
}

/// Validate a start/end pair, returning both normalized.
pub fn validate_date_range(start: &str, end: &str) -> Result<(String, String), ValidationError> {
    let start = validate_iso_date(start)?;
    let end = validate_iso_date(end)?;

    // YYYY-MM-DD compares correctly as text
    if end < start {
        return Err(ValidationError::DateOrder { start, end });
    }

    Ok((start, end))
}

/// Validate a flooded-area percentage (0 to 100 inclusive).
pub fn validate_flooded_pct(value: f64) -> Result<(), ValidationError> {
    if !(0.0..=100.0).contains(&value) {
        return Err(ValidationError::OutOfRange {
            field: "flooded_pct".to_string(),
            value,
        });
    }
    Ok(())
}

/// Validate a download task ID.
pub fn validate_task_id(task_id: &str) -> Result<(), ValidationError> {
    let task_id = task_id.trim();

    if task_id.is_empty() {
        return Err(ValidationError::Empty("task_id".to_string()));
    }

    if task_id.len() > MAX_TASK_ID_LENGTH {
        return Err(ValidationError::TooLong {
            field: "task_id".to_string(),
            max: MAX_TASK_ID_LENGTH,
            actual: task_id.len(),
        });
    }

    Ok(())
}
