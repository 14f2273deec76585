//! Crate-level error type.
//!
//! Only two things can stop the engine: a configuration it refuses to run
//! on, and a grid handed to gap filling that doesn't belong to the site.
//! A slot nobody can fill is *not* an error; it stays empty and is scored.

use thiserror::Error;

use crate::validation::ValidationError;

/// Errors returned by the public entry points.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RosterError {
    /// The site or worker list failed validation; no search was attempted.
    #[error("invalid configuration: {}", join(.0))]
    InvalidConfiguration(Vec<ValidationError>),
    /// The grid's days or shifts differ from the site's.
    #[error("grid does not match site: {0}")]
    GridMismatch(String),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl From<Vec<ValidationError>> for RosterError {
    fn from(errors: Vec<ValidationError>) -> Self {
        Self::InvalidConfiguration(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SiteConfig;
    use crate::validation::validate_site;

    #[test]
    fn test_invalid_configuration_message() {
        let site = SiteConfig::new(Vec::<String>::new(), ["06-14"]);
        let err: RosterError = validate_site(&site).unwrap_err().into();
        assert!(err.to_string().starts_with("invalid configuration: EmptyDays"));
    }

    #[test]
    fn test_grid_mismatch_message() {
        let err = RosterError::GridMismatch("expected 7 days, got 5".into());
        assert_eq!(
            err.to_string(),
            "grid does not match site: expected 7 days, got 5"
        );
    }
}
