use super::{Error, ErrorKind};

/// Error when the caller fails the mutation's authentication or permission
/// gate.
///
/// This is raised by the lifecycle engine itself and is always recovered
/// into a single non-field error on the payload; it never escapes as a hard
/// failure.
#[derive(Debug)]
pub(super) struct UnauthorizedError;

impl std::error::Error for UnauthorizedError {}

impl core::fmt::Display for UnauthorizedError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str("no permission to perform this action")
    }
}

impl Error {
    /// Creates an unauthorized error.
    pub fn unauthorized() -> Error {
        Error::from(ErrorKind::Unauthorized(UnauthorizedError))
    }

    /// Returns `true` if this error is an unauthorized error.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self.kind(), ErrorKind::Unauthorized(_))
    }
}
