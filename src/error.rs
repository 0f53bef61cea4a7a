//! Library error types.

use thiserror::Error;

/// Errors produced while building or serializing a feed.
#[derive(Debug, Error)]
pub enum Error {
    /// A required argument was missing or malformed.
    #[error("invalid argument `{parameter}`: {reason}")]
    InvalidArgument {
        /// Name of the offending parameter.
        parameter: &'static str,
        /// What was wrong with it.
        reason: String,
    },

    /// The XML writer failed. With the in-memory buffer this library
    /// uses, this only occurs on allocation failure.
    #[error("failed to write feed XML")]
    Xml(#[from] std::io::Error),

    /// The serialized document was not valid UTF-8. Unreachable for
    /// any input this library accepts, kept for propagation instead
    /// of panicking.
    #[error("serialized feed was not valid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),
}

impl Error {
    pub(crate) fn invalid_argument(
        parameter: &'static str,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidArgument {
            parameter,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_argument_names_parameter() {
        let err = Error::invalid_argument("url", "must not be empty");
        assert_eq!(
            err.to_string(),
            "invalid argument `url`: must not be empty"
        );
    }
}
