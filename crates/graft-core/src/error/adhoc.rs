use super::{Error, ErrorKind};

/// A free-form error message with no dedicated kind.
#[derive(Debug)]
pub(super) struct AdhocError {
    message: Box<str>,
}

impl std::error::Error for AdhocError {}

impl core::fmt::Display for AdhocError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str(&self.message)
    }
}

impl Error {
    /// Creates an error from a message.
    pub fn msg(message: impl Into<String>) -> Error {
        Error::from(ErrorKind::Adhoc(AdhocError {
            message: message.into().into(),
        }))
    }
}
