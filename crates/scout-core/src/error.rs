//! Error types for core operations

use thiserror::Error;

/// Errors that can occur in record store operations
///
/// None of these is fatal to a session: every variant is reported to the
/// user and the store keeps its last-known-good state.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("missing required columns: {}", missing.join(", "))]
    Schema { missing: Vec<String> },

    #[error("missing required fields: {}", missing.join(", "))]
    Validation { missing: Vec<String> },

    #[error("no record with id {id}")]
    NotFound { id: u64 },
}

impl CoreError {
    /// Field or column names involved, for building user-facing messages
    pub fn field_names(&self) -> &[String] {
        match self {
            CoreError::Schema { missing } | CoreError::Validation { missing } => missing,
            CoreError::NotFound { .. } => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_names_lists_missing_columns_and_fields() {
        let err = CoreError::Schema {
            missing: vec!["Rent".to_string(), "Size".to_string()],
        };
        assert_eq!(err.field_names(), ["Rent", "Size"]);

        let err = CoreError::Validation {
            missing: vec!["Name".to_string()],
        };
        assert_eq!(err.field_names(), ["Name"]);

        assert!(CoreError::NotFound { id: 7 }.field_names().is_empty());
    }
}
