use super::{Error, ErrorKind};

use indexmap::IndexMap;

/// Sentinel key used by field-keyed validation failures to carry
/// object-level messages that belong to no particular field.
pub const NON_FIELD_ERRORS: &str = "__all__";

/// A structured validation failure.
///
/// Validation backends report failures in one of two shapes: a mapping of
/// field name to messages (object-level messages live under
/// [`NON_FIELD_ERRORS`]), or a flat list of messages with no field
/// attribution. Both shapes survive translation to the client; neither is
/// dropped.
#[derive(Debug, Clone)]
pub enum ValidationErrors {
    /// Field-keyed failures, in insertion order.
    Fields(IndexMap<String, Vec<String>>),

    /// Flat failures with no field attribution.
    Messages(Vec<String>),
}

impl ValidationErrors {
    /// Creates an empty field-keyed failure set.
    pub fn new() -> ValidationErrors {
        ValidationErrors::Fields(IndexMap::new())
    }

    /// Creates a failure set with a single field-scoped message.
    pub fn field(name: impl Into<String>, message: impl Into<String>) -> ValidationErrors {
        let mut fields = IndexMap::new();
        fields.insert(name.into(), vec![message.into()]);
        ValidationErrors::Fields(fields)
    }

    /// Creates a failure set with a single object-level message.
    pub fn non_field(message: impl Into<String>) -> ValidationErrors {
        ValidationErrors::field(NON_FIELD_ERRORS, message)
    }

    /// Appends a field-scoped message.
    ///
    /// Panics if this is a flat message-list failure; the two shapes do not
    /// mix within one failure.
    pub fn push_field(&mut self, name: impl Into<String>, message: impl Into<String>) {
        match self {
            ValidationErrors::Fields(fields) => {
                fields.entry(name.into()).or_default().push(message.into());
            }
            ValidationErrors::Messages(_) => {
                panic!("cannot add a field-scoped message to a flat validation failure")
            }
        }
    }

    /// Returns `true` if the failure carries no messages at all.
    pub fn is_empty(&self) -> bool {
        match self {
            ValidationErrors::Fields(fields) => {
                fields.values().all(|messages| messages.is_empty())
            }
            ValidationErrors::Messages(messages) => messages.is_empty(),
        }
    }
}

impl Default for ValidationErrors {
    fn default() -> ValidationErrors {
        ValidationErrors::new()
    }
}

impl core::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str("validation failed")?;
        match self {
            ValidationErrors::Fields(fields) => {
                for (name, messages) in fields {
                    for message in messages {
                        write!(f, "; {name}: {message}")?;
                    }
                }
            }
            ValidationErrors::Messages(messages) => {
                for message in messages {
                    write!(f, "; {message}")?;
                }
            }
        }
        Ok(())
    }
}

impl Error {
    /// Creates a validation error from a structured failure set.
    pub fn validation(errors: ValidationErrors) -> Error {
        Error::from(ErrorKind::Validation(errors))
    }

    /// Creates a validation error with a single field-scoped message.
    pub fn validation_field(name: impl Into<String>, message: impl Into<String>) -> Error {
        Error::validation(ValidationErrors::field(name, message))
    }

    /// Creates a validation error with a single object-level message.
    pub fn validation_message(message: impl Into<String>) -> Error {
        Error::validation(ValidationErrors::non_field(message))
    }
}
