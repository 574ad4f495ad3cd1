//! Domain-level error type.
//!
//! Transport agnostic: HTTP handlers map these into response payloads and
//! status codes at the adapter boundary.

/// Failure category carried by [`DomainError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    /// No matching customer or account exists.
    NotFound,
    /// The operation conflicts with existing state, e.g. a duplicate
    /// mobile number on create.
    Conflict,
    /// A required collaborator (store, downstream service) is unreachable.
    Unavailable,
    /// An unexpected failure inside the domain or its adapters.
    Internal,
}

/// Domain failure with a stable category and a human-readable message.
///
/// # Examples
/// ```
/// use backend::domain::{DomainError, ErrorKind};
///
/// let err = DomainError::not_found("customer not found");
/// assert_eq!(err.kind(), ErrorKind::NotFound);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainError {
    kind: ErrorKind,
    message: String,
}

impl DomainError {
    /// Create an error with the given category and message.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Failure category.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Human-readable message.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Convenience constructor for [`ErrorKind::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Convenience constructor for [`ErrorKind::Conflict`].
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Conflict, message)
    }

    /// Convenience constructor for [`ErrorKind::Unavailable`].
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unavailable, message)
    }

    /// Convenience constructor for [`ErrorKind::Internal`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for DomainError {}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(DomainError::not_found("missing"), ErrorKind::NotFound)]
    #[case(DomainError::conflict("duplicate"), ErrorKind::Conflict)]
    #[case(DomainError::unavailable("down"), ErrorKind::Unavailable)]
    #[case(DomainError::internal("boom"), ErrorKind::Internal)]
    fn constructors_set_the_kind(#[case] err: DomainError, #[case] expected: ErrorKind) {
        assert_eq!(err.kind(), expected);
    }

    #[rstest]
    fn display_shows_the_message() {
        let err = DomainError::not_found("customer not found");
        assert_eq!(err.to_string(), "customer not found");
    }
}
