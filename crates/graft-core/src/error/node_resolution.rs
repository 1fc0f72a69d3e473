use super::{Error, ErrorKind};

/// Error when a client-supplied global id cannot be resolved to an
/// instance.
///
/// Carries the input field the offending id was submitted under so the
/// failure can be reported as a field-scoped error.
#[derive(Debug)]
pub(super) struct NodeResolutionError {
    field: Box<str>,
    message: Box<str>,
}

impl std::error::Error for NodeResolutionError {}

impl core::fmt::Display for NodeResolutionError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl Error {
    /// Creates a node resolution error scoped to an input field.
    pub fn node_resolution(field: impl Into<String>, message: impl Into<String>) -> Error {
        Error::from(ErrorKind::NodeResolution(NodeResolutionError {
            field: field.into().into(),
            message: message.into().into(),
        }))
    }

    /// Returns the `(field, message)` pair if this is a node resolution
    /// error.
    pub fn as_node_resolution(&self) -> Option<(&str, &str)> {
        match self.kind() {
            ErrorKind::NodeResolution(err) => Some((&err.field, &err.message)),
            _ => None,
        }
    }
}
