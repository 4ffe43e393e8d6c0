//! Error types for global coordinate collections

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by [`crate::GlobalCoords`] operations
#[derive(Debug, Error)]
pub enum CoordsError {
    #[error("coordinate with same name already exists: {name}: {existing}")]
    DuplicateName { name: String, existing: String },

    #[error(transparent)]
    InvalidPhysicalType(#[from] PhysicalTypeError),

    #[error("no explicitly added coordinate named '{0}'")]
    NotFound(String),

    #[error("coordinate not found: '{0}'")]
    KeyNotFound(String),
}

impl CoordsError {
    /// Check if this error reports a missing name (removal or lookup)
    pub fn is_not_found(&self) -> bool {
        matches!(self, CoordsError::NotFound(_) | CoordsError::KeyNotFound(_))
    }
}

/// Physical type validation failure
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PhysicalTypeError {
    #[error(
        "{} not a valid IVOA UCD1+ physical type. It must be a string specified in the list \
         (http://www.ivoa.net/documents/latest/UCDlist.html) or if no matching type exists it can \
         be any string prepended with 'custom:'.",
        quote_list(.types)
    )]
    Invalid { types: Vec<String> },
}

fn quote_list(types: &[String]) -> String {
    let quoted: Vec<String> = types.iter().map(|t| format!("'{}'", t)).collect();
    match quoted.len() {
        1 => format!("{} is", quoted[0]),
        _ => format!("{} are", quoted.join(", ")),
    }
}

/// Unit parsing and conversion errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnitError {
    #[error("Unknown unit: '{0}'")]
    Unknown(String),

    #[error("Malformed unit expression: '{0}'")]
    Malformed(String),

    #[error("Units '{from}' and '{to}' are not convertible")]
    Incompatible { from: String, to: String },
}

/// Errors building a dropped world dimensions record
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WcsError {
    #[error("{field} has {found} entries, expected {expected} (one per dropped value)")]
    LengthMismatch {
        field: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("Dropped world dimensions carry {0} values but no units")]
    MissingUnit(usize),
}

/// Errors loading a cube description document
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid cube document: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Coordinate '{name}' rejected: {source}")]
    Coords {
        name: String,
        #[source]
        source: CoordsError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_name_message_includes_existing_entry() {
        let err = CoordsError::DuplicateName {
            name: "time".to_string(),
            existing: "(time, 5 s)".to_string(),
        };

        let msg = err.to_string();
        assert!(msg.contains("already exists"));
        assert!(msg.contains("time: (time, 5 s)"));
    }

    #[test]
    fn test_invalid_physical_type_message_single() {
        let err = PhysicalTypeError::Invalid {
            types: vec!["not_a_real_type".to_string()],
        };

        let msg = err.to_string();
        assert!(msg.starts_with("'not_a_real_type' is not a valid IVOA UCD1+ physical type"));
        assert!(msg.contains("custom:"));
    }

    #[test]
    fn test_invalid_physical_type_message_multiple() {
        let err = PhysicalTypeError::Invalid {
            types: vec!["a".to_string(), "b".to_string()],
        };

        assert!(err.to_string().starts_with("'a', 'b' are not"));
    }

    #[test]
    fn test_is_not_found() {
        assert!(CoordsError::NotFound("x".to_string()).is_not_found());
        assert!(CoordsError::KeyNotFound("x".to_string()).is_not_found());
        assert!(
            !CoordsError::DuplicateName {
                name: "x".to_string(),
                existing: String::new()
            }
            .is_not_found()
        );
    }

    #[test]
    fn test_length_mismatch_message() {
        let err = WcsError::LengthMismatch {
            field: "world_axis_names",
            expected: 2,
            found: 1,
        };

        let msg = err.to_string();
        assert!(msg.contains("world_axis_names"));
        assert!(msg.contains("expected 2"));
    }
}
