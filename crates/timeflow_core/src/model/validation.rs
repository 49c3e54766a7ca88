use chrono::NaiveDate;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Required-field validation failure for creation inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required text field is blank after trim.
    MissingField(&'static str),
    /// `end` is earlier than `start`.
    InvalidDateRange { start: NaiveDate, end: NaiveDate },
    /// Progress or performance score exceeds 100.
    ProgressOutOfRange(u8),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField(field) => write!(f, "required field `{field}` is blank"),
            Self::InvalidDateRange { start, end } => {
                write!(f, "end date ({end}) must be >= start date ({start})")
            }
            Self::ProgressOutOfRange(value) => {
                write!(f, "percentage value {value} is outside 0..=100")
            }
        }
    }
}

impl Error for ValidationError {}

pub(crate) fn require_text(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    Ok(())
}

pub(crate) fn require_date_order(start: NaiveDate, end: NaiveDate) -> Result<(), ValidationError> {
    if end < start {
        return Err(ValidationError::InvalidDateRange { start, end });
    }
    Ok(())
}

pub(crate) fn require_percentage(value: u8) -> Result<(), ValidationError> {
    if value > 100 {
        return Err(ValidationError::ProgressOutOfRange(value));
    }
    Ok(())
}
