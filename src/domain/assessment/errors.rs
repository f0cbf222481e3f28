//! Assessment domain errors.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};

/// Errors raised by the navigator and the session aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssessmentError {
    /// A lap, question, option or score is not present in the catalog, or is
    /// not valid at the current position.
    #[error("Invalid argument '{field}': {reason}")]
    InvalidArgument { field: String, reason: String },

    /// The operation requires a complete answer set.
    #[error("Precondition not met: {0}")]
    PreconditionNotMet(String),

    /// The session is in a state that does not allow the operation.
    #[error("Invalid state: {0}")]
    InvalidState(String),
}

impl AssessmentError {
    pub fn invalid_argument(field: impl Into<String>, reason: impl Into<String>) -> Self {
        AssessmentError::InvalidArgument {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn precondition_not_met(message: impl Into<String>) -> Self {
        AssessmentError::PreconditionNotMet(message.into())
    }

    pub fn invalid_state(message: impl Into<String>) -> Self {
        AssessmentError::InvalidState(message.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            AssessmentError::InvalidArgument { .. } => ErrorCode::InvalidArgument,
            AssessmentError::PreconditionNotMet(_) => ErrorCode::PreconditionNotMet,
            AssessmentError::InvalidState(_) => ErrorCode::InvalidStateTransition,
        }
    }
}

impl From<ValidationError> for AssessmentError {
    fn from(err: ValidationError) -> Self {
        let field = match &err {
            ValidationError::EmptyField { field }
            | ValidationError::OutOfRange { field, .. }
            | ValidationError::InvalidFormat { field, .. } => field.clone(),
        };
        AssessmentError::invalid_argument(field, err.to_string())
    }
}

impl From<AssessmentError> for DomainError {
    fn from(err: AssessmentError) -> Self {
        let code = err.code();
        match &err {
            AssessmentError::InvalidArgument { field, .. } => {
                DomainError::new(code, err.to_string()).with_detail("field", field.clone())
            }
            _ => DomainError::new(code, err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_match_variants() {
        assert_eq!(
            AssessmentError::invalid_argument("lap_id", "unknown").code(),
            ErrorCode::InvalidArgument
        );
        assert_eq!(
            AssessmentError::precondition_not_met("incomplete").code(),
            ErrorCode::PreconditionNotMet
        );
        assert_eq!(
            AssessmentError::invalid_state("submitted").code(),
            ErrorCode::InvalidStateTransition
        );
    }

    #[test]
    fn invalid_argument_displays_field_and_reason() {
        let err = AssessmentError::invalid_argument("question_id", "not the active question");
        assert_eq!(
            err.to_string(),
            "Invalid argument 'question_id': not the active question"
        );
    }

    #[test]
    fn validation_error_becomes_invalid_argument() {
        let err: AssessmentError = ValidationError::empty_field("lap_id").into();
        match err {
            AssessmentError::InvalidArgument { field, .. } => assert_eq!(field, "lap_id"),
            other => panic!("Expected InvalidArgument, got {:?}", other),
        }
    }

    #[test]
    fn converts_to_domain_error_with_field_detail() {
        let err: DomainError = AssessmentError::invalid_argument("score", "not offered").into();
        assert_eq!(err.code, ErrorCode::InvalidArgument);
        assert_eq!(err.details.get("field"), Some(&"score".to_string()));
    }
}
