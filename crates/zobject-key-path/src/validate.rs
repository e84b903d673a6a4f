//! Validation functions for key paths.

use thiserror::Error;

use crate::types::classify_step;

/// Maximum allowed key path string length.
const MAX_KEY_PATH_LENGTH: usize = 1024;

/// Maximum allowed path depth.
const MAX_PATH_LENGTH: usize = 256;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("KEY_PATH_TOO_LONG")]
    KeyPathTooLong,
    #[error("Path too long")]
    PathTooLong,
    #[error("Invalid path step: {0:?}")]
    InvalidPathStep(String),
}

/// Validate a dotted key path string.
///
/// The empty string addresses the root and is valid. Every other path must
/// consist of keys or list indices separated by single dots.
///
/// # Example
///
/// ```
/// use zobject_key_path::validate_key_path;
///
/// validate_key_path("").unwrap();
/// validate_key_path("Z2K2.Z12K1.1.Z11K2").unwrap();
/// validate_key_path("Z2K2..Z11K1").unwrap_err();
/// validate_key_path("Z2K2.name").unwrap_err();
/// ```
pub fn validate_key_path(key_path: &str) -> Result<(), ValidationError> {
    if key_path.len() > MAX_KEY_PATH_LENGTH {
        return Err(ValidationError::KeyPathTooLong);
    }
    validate_path(&crate::parse_key_path(key_path))
}

/// Validate a path (array of path steps).
///
/// # Example
///
/// ```
/// use zobject_key_path::validate_path;
///
/// validate_path(&["Z2K2".to_string(), "0".to_string()]).unwrap();
/// validate_path(&(0..300).map(|i| i.to_string()).collect::<Vec<_>>()).unwrap_err();
/// ```
pub fn validate_path(path: &[String]) -> Result<(), ValidationError> {
    if path.len() > MAX_PATH_LENGTH {
        return Err(ValidationError::PathTooLong);
    }
    match path.iter().find(|step| classify_step(step).is_none()) {
        Some(step) => Err(ValidationError::InvalidPathStep(step.clone())),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_root() {
        assert!(validate_key_path("").is_ok());
    }

    #[test]
    fn test_validate_mixed_steps() {
        assert!(validate_key_path("Z2K2").is_ok());
        assert!(validate_key_path("Z2K2.K1").is_ok());
        assert!(validate_key_path("Z12K1.3.Z11K1").is_ok());
    }

    #[test]
    fn test_validate_bad_steps() {
        assert_eq!(
            validate_key_path("Z2K2.").unwrap_err(),
            ValidationError::InvalidPathStep(String::new())
        );
        assert_eq!(
            validate_key_path("main.Z2K2").unwrap_err(),
            ValidationError::InvalidPathStep("main".to_string())
        );
    }

    #[test]
    fn test_validate_long_key_path() {
        let long = "Z1K1.".repeat(300);
        assert_eq!(validate_key_path(&long).unwrap_err(), ValidationError::KeyPathTooLong);
    }

    #[test]
    fn test_validate_max_length_path() {
        let path: Vec<String> = (0..256).map(|i| i.to_string()).collect();
        assert!(validate_path(&path).is_ok());
        let path: Vec<String> = (0..257).map(|i| i.to_string()).collect();
        assert_eq!(validate_path(&path).unwrap_err(), ValidationError::PathTooLong);
    }
}
