//! Errors raised by the consent gate.

use thiserror::Error;

/// Construction-time failure. The gate cannot be built from the given inputs.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("Checkbox must be provided")]
    MissingCheckbox,
    #[error("Checkbox must be a valid, attached element")]
    InvalidCheckbox,
    #[error("TOS content source must be provided")]
    MissingContentSource,
    #[error("TOS content source must be a valid, attached element")]
    InvalidContentSource,
    #[error("TOS destination must be a valid, attached element if provided")]
    InvalidDestination,
    #[error("Approve label must be a non-empty string")]
    EmptyApproveLabel,
    #[error("Timing setting `{field}` is out of range")]
    InvalidTiming { field: &'static str },
}

/// Failure of the approve action. Recoverable: the gate state is left untouched.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfirmationError {
    /// The internal approval checkbox was not checked.
    #[error("{notice}")]
    NotApproved { notice: String },
    #[error("Consent gate is not open")]
    GateClosed,
}
