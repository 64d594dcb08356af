//! Game attribute validation

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum GameValidationError {
    #[error("weekNumber must not be negative, got {0}")]
    NegativeWeekNumber(i32),

    #[error("line must be a non-negative number, got {0}")]
    InvalidLine(f64),

    #[error("overUnder must be a non-negative number, got {0}")]
    InvalidOverUnder(f64),
}

pub fn validate_week_number(week_number: i32) -> Result<(), GameValidationError> {
    if week_number < 0 {
        return Err(GameValidationError::NegativeWeekNumber(week_number));
    }
    Ok(())
}

pub fn validate_line(line: f64) -> Result<(), GameValidationError> {
    if !line.is_finite() || line < 0.0 {
        return Err(GameValidationError::InvalidLine(line));
    }
    Ok(())
}

pub fn validate_over_under(over_under: f64) -> Result<(), GameValidationError> {
    if !over_under.is_finite() || over_under < 0.0 {
        return Err(GameValidationError::InvalidOverUnder(over_under));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_week_number() {
        assert!(validate_week_number(0).is_ok());
        assert!(validate_week_number(19).is_ok());
        assert_eq!(
            validate_week_number(-1),
            Err(GameValidationError::NegativeWeekNumber(-1))
        );
    }

    #[test]
    fn test_line() {
        assert!(validate_line(0.0).is_ok());
        assert!(validate_line(3.5).is_ok());
        assert!(validate_line(-0.5).is_err());
        assert!(validate_line(f64::NAN).is_err());
        assert!(validate_line(f64::INFINITY).is_err());
    }

    #[test]
    fn test_over_under() {
        assert!(validate_over_under(56.5).is_ok());
        assert!(validate_over_under(-1.0).is_err());
    }
}
