//! Error types for address, block and range operations.

use thiserror::Error;

/// Errors returned by parsing, range and block operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CidrError {
    /// Malformed address, CIDR or mask text, or an address with host bits set.
    #[error("Invalid format: {0}")]
    Format(String),

    /// A range was given with its start above its end.
    #[error("Invalid range: start {start} is greater than end {end}")]
    InvalidRange { start: String, end: String },

    /// A prefix length outside `[min, 32]`.
    #[error("Invalid prefix /{target}: expected /{min} to /32")]
    InvalidPrefix { target: u8, min: u8 },

    /// `cut` was called with a block the parent does not contain.
    #[error("{parent} does not contain {sub}")]
    NotContained { parent: String, sub: String },

    /// Octet index outside `0..4`.
    #[error("Octet index {0} out of range")]
    OctetIndex(usize),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, CidrError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CidrError::InvalidRange {
            start: "10.0.0.2".to_string(),
            end: "10.0.0.1".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid range: start 10.0.0.2 is greater than end 10.0.0.1"
        );
        assert_eq!(
            CidrError::InvalidPrefix { target: 33, min: 24 }.to_string(),
            "Invalid prefix /33: expected /24 to /32"
        );
        assert_eq!(CidrError::OctetIndex(4).to_string(), "Octet index 4 out of range");
    }
}
