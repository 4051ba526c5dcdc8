//! Domain error types.
//!
//! These errors represent validation failures when constructing domain
//! values from raw input. They are distinct from API/IO errors.

/// Domain-level validation errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    /// Station id was empty or whitespace only
    #[error("station id must not be empty")]
    EmptyStationId,

    /// Coordinate was out of range or not finite
    #[error("invalid coordinate: {reason}")]
    InvalidCoordinate { reason: &'static str },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = DomainError::EmptyStationId;
        assert_eq!(err.to_string(), "station id must not be empty");

        let err = DomainError::InvalidCoordinate {
            reason: "components must be finite",
        };
        assert_eq!(
            err.to_string(),
            "invalid coordinate: components must be finite"
        );
    }
}
