// Typed storage errors callers need to tell apart from plain failures
// Decision: Both backends report a duplicate email as UniqueViolation

use thiserror::Error;

/// A write collided with a unique constraint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unique constraint violated: {0}")]
pub struct UniqueViolation(pub &'static str);

impl UniqueViolation {
    pub const USER_EMAIL: Self = Self("users.email");
}

/// True when `err` (or anything it wraps) is a UniqueViolation
pub fn is_unique_violation(err: &anyhow::Error) -> bool {
    err.downcast_ref::<UniqueViolation>().is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_detected_through_context() {
        let err = Err::<(), _>(anyhow::Error::new(UniqueViolation::USER_EMAIL))
            .context("Failed to create user")
            .unwrap_err();
        assert!(is_unique_violation(&err));
    }

    #[test]
    fn test_other_errors_are_not_violations() {
        assert!(!is_unique_violation(&anyhow::anyhow!("connection reset")));
    }
}
