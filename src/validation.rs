//! Input validation for rostering problems.
//!
//! Checks structural integrity of a site and its workers before any search
//! iteration runs. Detects:
//! - Empty day or shift lists
//! - Duplicate day, shift or worker identifiers
//! - Non-positive headcounts
//! - Headcounts or weekly caps referring to unknown days/shifts
//!
//! All problems are collected, not just the first.

use std::collections::HashSet;
use std::fmt;

use tracing::warn;

use crate::models::{SiteConfig, Worker};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// The site defines no days.
    EmptyDays,
    /// The site defines no shifts.
    EmptyShifts,
    /// A (day, shift) requires zero or fewer people.
    InvalidCapacity,
    /// Two entities share the same identifier.
    DuplicateId,
    /// A headcount or cap refers to a day or shift that doesn't exist.
    UnknownReference,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

/// Validates a site configuration.
///
/// Checks:
/// 1. At least one day and one shift
/// 2. No duplicate day labels, no duplicate shift labels
/// 3. Every configured headcount is positive
/// 4. Headcounts and weekly caps reference known days/shifts
pub fn validate_site(site: &SiteConfig) -> ValidationResult {
    let mut errors = Vec::new();

    if site.days.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyDays,
            "Site defines no days",
        ));
    }
    if site.shifts.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyShifts,
            "Site defines no shifts",
        ));
    }

    let mut day_ids = HashSet::new();
    for day in &site.days {
        if !day_ids.insert(day.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate day: {day}"),
            ));
        }
    }

    let mut shift_ids = HashSet::new();
    for shift in &site.shifts {
        if !shift_ids.insert(shift.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate shift: {shift}"),
            ));
        }
    }

    for (day, per_shift) in &site.headcount {
        if !day_ids.contains(day.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownReference,
                format!("Headcount references unknown day '{day}'"),
            ));
        }
        for (shift, &people) in per_shift {
            if !shift_ids.contains(shift.as_str()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::UnknownReference,
                    format!("Headcount for '{day}' references unknown shift '{shift}'"),
                ));
            }
            if people <= 0 {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidCapacity,
                    format!("Headcount for '{day}' / '{shift}' must be positive, got {people}"),
                ));
            }
        }
    }

    for shift in site.weekly_caps.keys() {
        if !shift_ids.contains(shift.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownReference,
                format!("Weekly cap references unknown shift '{shift}'"),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates the worker list against a site.
///
/// Worker names must be unique. Availability entries for days or shifts the
/// site doesn't define are harmless (they can never match) and are only
/// reported through `tracing`.
pub fn validate_workers(site: &SiteConfig, workers: &[Worker]) -> ValidationResult {
    let mut errors = Vec::new();
    let mut names = HashSet::new();

    for worker in workers {
        if !names.insert(worker.name.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate worker: {}", worker.name),
            ));
        }

        for (day, shifts) in &worker.availability {
            if site.day_index(day).is_none() {
                warn!(worker = %worker.name, day = %day, "availability for unknown day ignored");
                continue;
            }
            for shift in shifts {
                if site.shift_index(shift).is_none() {
                    warn!(worker = %worker.name, day = %day, shift = %shift, "availability for unknown shift ignored");
                }
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates a site and its workers together.
pub fn validate_input(site: &SiteConfig, workers: &[Worker]) -> ValidationResult {
    let mut errors = Vec::new();
    if let Err(mut e) = validate_site(site) {
        errors.append(&mut e);
    }
    if let Err(mut e) = validate_workers(site, workers) {
        errors.append(&mut e);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_site() -> SiteConfig {
        SiteConfig::new(["Mon", "Tue"], ["06-14", "14-22", "22-06"])
            .with_headcount("Mon", "06-14", 2)
            .with_weekly_cap("22-06", 3)
    }

    #[test]
    fn test_valid_input() {
        let site = sample_site();
        let workers = vec![
            Worker::new("Ana", 3).available_for_all(&site),
            Worker::new("Ben", 2),
        ];
        assert!(validate_input(&site, &workers).is_ok());
    }

    #[test]
    fn test_empty_days() {
        let site = SiteConfig::new(Vec::<String>::new(), ["06-14"]);
        let errors = validate_site(&site).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::EmptyDays));
    }

    #[test]
    fn test_empty_shifts() {
        let site = SiteConfig::new(["Mon"], Vec::<String>::new());
        let errors = validate_site(&site).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::EmptyShifts));
    }

    #[test]
    fn test_non_positive_capacity() {
        let site = sample_site()
            .with_headcount("Tue", "14-22", 0)
            .with_headcount("Tue", "22-06", -1);
        let errors = validate_site(&site).unwrap_err();
        let bad = errors
            .iter()
            .filter(|e| e.kind == ValidationErrorKind::InvalidCapacity)
            .count();
        assert_eq!(bad, 2);
    }

    #[test]
    fn test_duplicate_labels() {
        let site = SiteConfig::new(["Mon", "Mon"], ["06-14", "06-14"]);
        let errors = validate_site(&site).unwrap_err();
        assert_eq!(
            errors
                .iter()
                .filter(|e| e.kind == ValidationErrorKind::DuplicateId)
                .count(),
            2
        );
    }

    #[test]
    fn test_unknown_references() {
        let site = sample_site()
            .with_headcount("Fri", "06-14", 1)
            .with_weekly_cap("10-18", 2);
        let errors = validate_site(&site).unwrap_err();
        assert_eq!(
            errors
                .iter()
                .filter(|e| e.kind == ValidationErrorKind::UnknownReference)
                .count(),
            2
        );
    }

    #[test]
    fn test_duplicate_worker() {
        let site = sample_site();
        let workers = vec![Worker::new("Ana", 1), Worker::new("Ana", 2)];
        let errors = validate_workers(&site, &workers).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateId && e.message.contains("Ana")));
    }

    #[test]
    fn test_unknown_availability_is_not_an_error() {
        let site = sample_site();
        let workers = vec![Worker::new("Ana", 1).with_availability("Sat", ["06-14"])];
        assert!(validate_workers(&site, &workers).is_ok());
    }

    #[test]
    fn test_multiple_errors() {
        let site = SiteConfig::new(Vec::<String>::new(), Vec::<String>::new());
        let workers = vec![Worker::new("Ana", 1), Worker::new("Ana", 1)];
        let errors = validate_input(&site, &workers).unwrap_err();
        assert!(errors.len() >= 3);
    }

    #[test]
    fn test_error_display() {
        let err = ValidationError::new(ValidationErrorKind::EmptyDays, "Site defines no days");
        assert_eq!(err.to_string(), "EmptyDays: Site defines no days");
    }
}
