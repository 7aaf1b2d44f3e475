//! Parsing of the numeric setup fields typed by the user.
//!
//! The state machine only ever sees whole seconds; anything the user types is
//! normalized here first.

use thiserror::Error;

pub const MAX_HOURS: u64 = 23;
pub const MAX_MINUTES: u64 = 59;
pub const MAX_SECONDS: u64 = 59;
pub const MAX_WARNING_PERIOD: u64 = 3600;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("field is empty")]
    Empty,

    #[error("not a number: {0:?}")]
    NotANumber(String),

    #[error("{value} is above the maximum of {max}")]
    OutOfRange { value: u64, max: u64 },
}

/// Strictly parse a non-negative integer no greater than `max`.
pub fn parse_field(text: &str, max: u64) -> Result<u64, InputError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(InputError::Empty);
    }
    let value: u64 = trimmed
        .parse()
        .map_err(|_| InputError::NotANumber(trimmed.to_string()))?;
    if value > max {
        return Err(InputError::OutOfRange { value, max });
    }
    Ok(value)
}

/// Lenient variant used at the UI boundary: garbage becomes 0, large values clamp.
pub fn normalize_field(text: &str, max: u64) -> u64 {
    match parse_field(text, max) {
        Ok(value) => value,
        Err(InputError::OutOfRange { max, .. }) => max,
        Err(e) => {
            tracing::debug!("Normalizing {:?} to 0: {}", text, e);
            0
        }
    }
}

/// A duration as entered in the hours/minutes/seconds fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DurationInput {
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl DurationInput {
    pub fn new(hours: u64, minutes: u64, seconds: u64) -> Self {
        Self {
            hours,
            minutes,
            seconds,
        }
    }

    pub fn from_minutes(minutes: u64) -> Self {
        Self::new(0, minutes, 0)
    }

    pub fn total_seconds(&self) -> u64 {
        self.hours
            .saturating_mul(3600)
            .saturating_add(self.minutes.saturating_mul(60))
            .saturating_add(self.seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_field() {
        assert_eq!(parse_field("12", MAX_MINUTES), Ok(12));
        assert_eq!(parse_field("  7 ", MAX_MINUTES), Ok(7));
        assert_eq!(parse_field("", MAX_MINUTES), Err(InputError::Empty));
        assert_eq!(
            parse_field("abc", MAX_MINUTES),
            Err(InputError::NotANumber("abc".to_string()))
        );
        assert_eq!(
            parse_field("-3", MAX_MINUTES),
            Err(InputError::NotANumber("-3".to_string()))
        );
        assert_eq!(
            parse_field("75", MAX_MINUTES),
            Err(InputError::OutOfRange { value: 75, max: 59 })
        );
    }

    #[test]
    fn test_normalize_field() {
        assert_eq!(normalize_field("", MAX_HOURS), 0);
        assert_eq!(normalize_field("x1", MAX_HOURS), 0);
        assert_eq!(normalize_field("99", MAX_HOURS), 23);
        assert_eq!(normalize_field("4000", MAX_WARNING_PERIOD), 3600);
        assert_eq!(normalize_field("45", MAX_WARNING_PERIOD), 45);
    }

    #[test]
    fn test_total_seconds() {
        assert_eq!(DurationInput::new(1, 1, 1).total_seconds(), 3661);
        assert_eq!(DurationInput::from_minutes(25).total_seconds(), 1500);
        assert_eq!(DurationInput::default().total_seconds(), 0);
        assert_eq!(
            DurationInput::new(u64::MAX, 1, 0).total_seconds(),
            u64::MAX
        );
    }
}
