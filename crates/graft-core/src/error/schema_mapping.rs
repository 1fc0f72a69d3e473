use super::{Error, ErrorKind};

/// Error when a persistence field kind has no client-facing schema mapping.
///
/// This indicates a missing mapping in the mutation framework, not bad
/// runtime data. It is raised while a mutation type is being declared and
/// aborts the registration.
#[derive(Debug)]
pub(super) struct SchemaMappingError {
    message: Box<str>,
}

impl std::error::Error for SchemaMappingError {}

impl core::fmt::Display for SchemaMappingError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "no schema mapping: {}", self.message)
    }
}

impl Error {
    /// Creates a schema mapping error.
    pub fn schema_mapping(message: impl Into<String>) -> Error {
        Error::from(ErrorKind::SchemaMapping(SchemaMappingError {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is a schema mapping error.
    pub fn is_schema_mapping(&self) -> bool {
        matches!(self.kind(), ErrorKind::SchemaMapping(_))
    }
}
