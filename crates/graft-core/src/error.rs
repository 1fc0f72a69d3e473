mod adhoc;
mod node_resolution;
mod permission_denied;
mod schema_mapping;
mod unauthorized;
mod validation;

use adhoc::AdhocError;
use node_resolution::NodeResolutionError;
use permission_denied::PermissionDeniedError;
use schema_mapping::SchemaMappingError;
use unauthorized::UnauthorizedError;
pub use validation::{ValidationErrors, NON_FIELD_ERRORS};

use std::sync::Arc;

/// An error that can occur in Graft.
///
/// Errors are cheap to clone and sized to a single word so they can travel
/// through mutation payloads without boxing at every call site.
#[derive(Clone)]
pub struct Error {
    inner: Arc<ErrorKind>,
}

#[derive(Debug)]
enum ErrorKind {
    Anyhow(anyhow::Error),
    Adhoc(AdhocError),
    Unauthorized(UnauthorizedError),
    PermissionDenied(PermissionDeniedError),
    Validation(ValidationErrors),
    NodeResolution(NodeResolutionError),
    SchemaMapping(SchemaMappingError),
}

impl Error {
    fn kind(&self) -> &ErrorKind {
        &self.inner
    }

    /// Returns the structured validation failure, if this is one.
    pub fn as_validation(&self) -> Option<&ValidationErrors> {
        match self.kind() {
            ErrorKind::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self.kind() {
            ErrorKind::Anyhow(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match self.kind() {
            ErrorKind::Anyhow(err) => core::fmt::Display::fmt(err, f),
            ErrorKind::Adhoc(err) => core::fmt::Display::fmt(err, f),
            ErrorKind::Unauthorized(err) => core::fmt::Display::fmt(err, f),
            ErrorKind::PermissionDenied(err) => core::fmt::Display::fmt(err, f),
            ErrorKind::Validation(err) => core::fmt::Display::fmt(err, f),
            ErrorKind::NodeResolution(err) => core::fmt::Display::fmt(err, f),
            ErrorKind::SchemaMapping(err) => core::fmt::Display::fmt(err, f),
        }
    }
}

impl core::fmt::Debug for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        if !f.alternate() {
            core::fmt::Display::fmt(self, f)
        } else {
            f.debug_struct("Error").field("kind", &self.inner).finish()
        }
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Error {
        Error {
            inner: Arc::new(kind),
        }
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Error {
        Error::from(ErrorKind::Anyhow(err))
    }
}
