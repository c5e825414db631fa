//! Error types for the payroll engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate.
//! Missing or partial domain data (for example an employee without a
//! compensation profile) is never an error; only invalid input, unknown
//! records, concurrency conflicts and storage faults are.

use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

/// The main error type for the payroll engine.
///
/// # Example
///
/// ```
/// use payroll_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/payroll.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/payroll.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A pay period ends before it starts.
    #[error("Invalid pay period: end date {end} is before start date {start}")]
    InvalidPeriod {
        /// The start date of the period.
        start: NaiveDate,
        /// The end date of the period.
        end: NaiveDate,
    },

    /// A monetary or attendance amount failed validation.
    #[error("Invalid amount for '{field}': {message}")]
    InvalidAmount {
        /// The field that was rejected.
        field: String,
        /// A description of what made the value invalid.
        message: String,
    },

    /// An edit referenced an employee that has no line in the run.
    #[error("Employee '{employee_id}' has no payslip line in this run")]
    EmployeeNotInRun {
        /// The employee that could not be located.
        employee_id: String,
    },

    /// No persisted run exists with the given id.
    #[error("Payroll run not found: {id}")]
    RunNotFound {
        /// The id that was looked up.
        id: Uuid,
    },

    /// The run was modified since the caller last read it.
    #[error("Payroll run {id} was modified concurrently: expected version {expected}, found {actual}")]
    VersionConflict {
        /// The run being updated.
        id: Uuid,
        /// The version the caller based its edit on.
        expected: u64,
        /// The version currently stored.
        actual: u64,
    },

    /// The backing store failed to read or write.
    #[error("Storage error: {message}")]
    Storage {
        /// A description of the storage fault.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/payroll.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/payroll.yaml"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/config/bad.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/bad.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_invalid_period_displays_both_dates() {
        let error = EngineError::InvalidPeriod {
            start: NaiveDate::from_ymd_opt(2025, 3, 16).unwrap(),
            end: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid pay period: end date 2025-03-01 is before start date 2025-03-16"
        );
    }

    #[test]
    fn test_invalid_amount_displays_field_and_message() {
        let error = EngineError::InvalidAmount {
            field: "days_present".to_string(),
            message: "must not be negative".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid amount for 'days_present': must not be negative"
        );
    }

    #[test]
    fn test_employee_not_in_run_displays_id() {
        let error = EngineError::EmployeeNotInRun {
            employee_id: "emp_404".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Employee 'emp_404' has no payslip line in this run"
        );
    }

    #[test]
    fn test_version_conflict_displays_versions() {
        let id = Uuid::nil();
        let error = EngineError::VersionConflict {
            id,
            expected: 2,
            actual: 3,
        };
        let message = error.to_string();
        assert!(message.contains("expected version 2"));
        assert!(message.contains("found 3"));
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_storage_error() -> EngineResult<()> {
            Err(EngineError::Storage {
                message: "lock poisoned".to_string(),
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_storage_error()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
