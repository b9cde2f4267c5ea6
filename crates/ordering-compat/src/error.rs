//! Error types for ordering-compat

use thiserror::Error;

use crate::ops::OrderingOp;

pub type Result<T> = std::result::Result<T, CompatError>;

#[derive(Error, Debug)]
pub enum CompatError {
    #[error("{type_name}: must define at least one ordering operation: < > <= >=")]
    MissingOrdering { type_name: String },

    #[error("{type_name}: designated root `{root}` is not natively defined")]
    RootNotDefined { type_name: String, root: OrderingOp },

    #[error("unknown ordering operation: {name:?}")]
    UnknownOperation { name: String },

    #[error("{type_name}: operation `{op}` is not defined")]
    OperationNotDefined { type_name: String, op: OrderingOp },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_ordering_message_names_the_type() {
        let err = CompatError::MissingOrdering {
            type_name: "Box".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Box: must define at least one ordering operation: < > <= >="
        );
    }

    #[test]
    fn root_not_defined_renders_operator_symbol() {
        let err = CompatError::RootNotDefined {
            type_name: "Tag".to_string(),
            root: OrderingOp::Le,
        };
        assert_eq!(err.to_string(), "Tag: designated root `<=` is not natively defined");
    }
}
