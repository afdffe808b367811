//! Error taxonomy shared across the runtime
//!
//! Each crate defines its own error enum; this module only fixes how a
//! failure is classified so callers can decide between failing the wiring,
//! no-oping, or recovering locally.

use core::fmt;

/// How a failure should be treated by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Wiring mistake (missing sibling capability, bad config). Fail at setup.
    Configuration,
    /// Something looked up by name or id was not there.
    Lookup,
    /// An external collaborator (animation, audio, asset) could not serve a request.
    ExternalResource,
    /// A defect: double attachment, duplicate registration.
    Invariant,
}

impl ErrorKind {
    /// Whether the failure may be recovered locally with a fallback
    pub fn is_recoverable(self) -> bool {
        matches!(self, ErrorKind::Lookup | ErrorKind::ExternalResource)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Configuration => write!(f, "configuration error"),
            ErrorKind::Lookup => write!(f, "lookup miss"),
            ErrorKind::ExternalResource => write!(f, "external resource failure"),
            ErrorKind::Invariant => write!(f, "invariant violation"),
        }
    }
}

/// Implemented by every error enum in the workspace
pub trait Classify {
    fn kind(&self) -> ErrorKind;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recoverable_kinds() {
        assert!(ErrorKind::Lookup.is_recoverable());
        assert!(ErrorKind::ExternalResource.is_recoverable());
        assert!(!ErrorKind::Configuration.is_recoverable());
        assert!(!ErrorKind::Invariant.is_recoverable());
    }

    #[test]
    fn test_display() {
        assert_eq!(ErrorKind::Invariant.to_string(), "invariant violation");
    }
}
