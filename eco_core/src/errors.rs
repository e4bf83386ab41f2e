//! # Error Types
//!
//! Structured error types for eco_core. Calculators themselves never fail on
//! incomplete input (they return [`Outcome::Incomplete`](crate::calculations::Outcome));
//! these errors cover the strict edges: parsing unit/material names, loading
//! settings, and compiling PDF reports.
//!
//! ## Example
//!
//! ```rust
//! use eco_core::errors::{CalcError, CalcResult};
//!
//! fn require_positive(field: &str, value: f64) -> CalcResult<f64> {
//!     if value <= 0.0 {
//!         return Err(CalcError::invalid_input(field, value.to_string(), "Must be positive"));
//!     }
//!     Ok(value)
//! }
//!
//! assert!(require_positive("panel_area_m2", -1.0).is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for eco_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for engine operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is invalid (out of range, wrong type, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// Unit slug is not in the conversion table
    #[error("Unknown unit: {unit}")]
    UnknownUnit { unit: String },

    /// Material name is not in the density table
    #[error("Unknown material: {material}")]
    UnknownMaterial { material: String },

    /// Name did not match any entry of a fixed option list
    #[error("Unknown {kind}: {value}")]
    UnknownOption { kind: String, value: String },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Report rendering failed
    #[error("Report error: {reason}")]
    ReportFailed { reason: String },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an UnknownUnit error
    pub fn unknown_unit(unit: impl Into<String>) -> Self {
        CalcError::UnknownUnit { unit: unit.into() }
    }

    /// Create an UnknownMaterial error
    pub fn unknown_material(material: impl Into<String>) -> Self {
        CalcError::UnknownMaterial {
            material: material.into(),
        }
    }

    /// Create an UnknownOption error
    pub fn unknown_option(kind: impl Into<String>, value: impl Into<String>) -> Self {
        CalcError::UnknownOption {
            kind: kind.into(),
            value: value.into(),
        }
    }

    /// Create a ReportFailed error
    pub fn report_failed(reason: impl Into<String>) -> Self {
        CalcError::ReportFailed { reason: reason.into() }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::UnknownUnit { .. } => "UNKNOWN_UNIT",
            CalcError::UnknownMaterial { .. } => "UNKNOWN_MATERIAL",
            CalcError::UnknownOption { .. } => "UNKNOWN_OPTION",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
            CalcError::ReportFailed { .. } => "REPORT_FAILED",
        }
    }
}

impl From<serde_json::Error> for CalcError {
    fn from(err: serde_json::Error) -> Self {
        CalcError::SerializationError {
            reason: err.to_string(),
        }
    }
}
