use super::{Error, ErrorKind};

/// Authorization failure raised by a collaborator (driver, hooks) during
/// persistence, as opposed to the engine's own permission gate.
///
/// Whether this is swallowed into a generic payload error or re-raised is a
/// process-wide configuration decision, not a per-mutation one.
#[derive(Debug)]
pub(super) struct PermissionDeniedError {
    message: Box<str>,
}

impl std::error::Error for PermissionDeniedError {}

impl core::fmt::Display for PermissionDeniedError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "permission denied: {}", self.message)
    }
}

impl Error {
    /// Creates a permission denied error.
    ///
    /// An empty message falls back to a generic denial when surfaced to the
    /// client.
    pub fn permission_denied(message: impl Into<String>) -> Error {
        Error::from(ErrorKind::PermissionDenied(PermissionDeniedError {
            message: message.into().into(),
        }))
    }

    /// Returns the client-facing denial message if this is a permission
    /// denied error.
    pub fn denial_message(&self) -> Option<&str> {
        match self.kind() {
            ErrorKind::PermissionDenied(err) if err.message.is_empty() => {
                Some("permission denied")
            }
            ErrorKind::PermissionDenied(err) => Some(&err.message),
            _ => None,
        }
    }

    /// Returns `true` if this error is a permission denied error.
    pub fn is_permission_denied(&self) -> bool {
        matches!(self.kind(), ErrorKind::PermissionDenied(_))
    }
}
