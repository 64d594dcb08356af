//! Team validation

use thiserror::Error;

/// Errors that can occur during team validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TeamValidationError {
    #[error("city cannot be empty")]
    EmptyCity,

    #[error("city cannot exceed {0} characters")]
    CityTooLong(usize),

    #[error("teamName cannot be empty")]
    EmptyTeamName,

    #[error("teamName cannot exceed {0} characters")]
    TeamNameTooLong(usize),
}

const MAX_CITY_LENGTH: usize = 100;
const MAX_TEAM_NAME_LENGTH: usize = 100;

/// Validate a team's city
pub fn validate_city(city: &str) -> Result<(), TeamValidationError> {
    if city.trim().is_empty() {
        return Err(TeamValidationError::EmptyCity);
    }

    if city.chars().count() > MAX_CITY_LENGTH {
        return Err(TeamValidationError::CityTooLong(MAX_CITY_LENGTH));
    }

    Ok(())
}

/// Validate a team name
pub fn validate_team_name(name: &str) -> Result<(), TeamValidationError> {
    if name.trim().is_empty() {
        return Err(TeamValidationError::EmptyTeamName);
    }

    if name.chars().count() > MAX_TEAM_NAME_LENGTH {
        return Err(TeamValidationError::TeamNameTooLong(MAX_TEAM_NAME_LENGTH));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_city() {
        assert!(validate_city("New England").is_ok());
        assert!(validate_city("St. Louis").is_ok());
    }

    #[test]
    fn test_blank_city() {
        assert_eq!(validate_city(""), Err(TeamValidationError::EmptyCity));
        assert_eq!(validate_city("   "), Err(TeamValidationError::EmptyCity));
    }

    #[test]
    fn test_city_too_long() {
        let long = "a".repeat(101);
        assert_eq!(
            validate_city(&long),
            Err(TeamValidationError::CityTooLong(100))
        );
    }

    #[test]
    fn test_valid_team_name() {
        assert!(validate_team_name("Patriots").is_ok());
        assert!(validate_team_name("49ers").is_ok());
    }

    #[test]
    fn test_blank_team_name() {
        assert_eq!(validate_team_name("\t"), Err(TeamValidationError::EmptyTeamName));
    }

    #[test]
    fn test_team_name_at_limit() {
        assert!(validate_team_name(&"b".repeat(100)).is_ok());
        assert!(validate_team_name(&"b".repeat(101)).is_err());
    }
}
