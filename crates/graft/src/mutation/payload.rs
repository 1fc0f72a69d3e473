use graft_core::Instance;

use serde::Serialize;

/// The uniform mutation response envelope.
#[derive(Debug, Clone)]
pub struct Payload {
    /// The output field name the instance is wrapped under
    pub field: String,

    /// The mutated instance; `None` when the mutation failed
    pub instance: Option<Instance>,

    /// Errors that occurred while executing the mutation. Empty on
    /// success, never omitted.
    pub errors: Vec<FieldError>,
}

impl Payload {
    pub(crate) fn success(field: String, instance: Instance) -> Payload {
        Payload {
            field,
            instance: Some(instance),
            errors: vec![],
        }
    }

    pub(crate) fn failure(field: String, errors: Vec<FieldError>) -> Payload {
        Payload {
            field,
            instance: None,
            errors,
        }
    }

    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }
}

/// An error that happened in a mutation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    /// The camel-cased input field that caused the error, or `None` if it
    /// isn't associated with any particular field
    pub field: Option<String>,

    /// The error message
    pub message: String,
}

impl FieldError {
    pub fn new(field: Option<String>, message: impl Into<String>) -> FieldError {
        FieldError {
            field,
            message: message.into(),
        }
    }

    pub fn non_field(message: impl Into<String>) -> FieldError {
        FieldError::new(None, message)
    }
}
