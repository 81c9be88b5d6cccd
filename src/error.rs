use thiserror::Error;

/// Errors raised while loading instance data or assembling a model.
///
/// Backend outcomes such as infeasibility are not errors; they are reported
/// through [`Status`](crate::Status) in the solution report.
#[derive(Debug, Error)]
pub enum Error {
    /// A variable family or constraint name was reused within one model.
    #[error("name '{0}' is already in use in this model")]
    DuplicateName(String),

    /// An expression references a variable that was not declared in this model.
    #[error("'{context}' references variable x{var} from another model")]
    UnknownVariable {
        /// The constraint name, or `objective`, holding the foreign reference.
        context: String,
        /// Declaration id of the offending variable in its own model.
        var: usize,
    },

    /// A cost, demand, capacity, size, or distance parameter is negative.
    #[error("parameter {param}{} must be non-negative, got {value}", fmt_index(.index))]
    DataValidation {
        /// Name of the offending parameter, as spelled in the instance document.
        param: String,
        /// Index of the offending entry; empty for scalar parameters.
        index: Vec<usize>,
        /// The rejected value.
        value: f64,
    },

    /// An instance array has a length inconsistent with the declared dimensions.
    #[error("parameter {param} has length {actual}, expected {expected}")]
    DimensionMismatch {
        /// Name of the offending parameter.
        param: String,
        /// Length implied by the instance dimensions.
        expected: usize,
        /// Length actually supplied.
        actual: usize,
    },

    /// Reading an instance document failed.
    #[error("failed to read instance document: {0}")]
    Io(#[from] std::io::Error),

    /// Parsing an instance document failed.
    #[error("failed to parse instance document: {0}")]
    Json(#[from] serde_json::Error),
}

fn fmt_index(index: &[usize]) -> String {
    if index.is_empty() {
        String::new()
    } else {
        format!(
            "[{}]",
            index
                .iter()
                .map(|i| i.to_string())
                .collect::<Vec<_>>()
                .join(",")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_validation_names_the_offending_entry() {
        let err = Error::DataValidation {
            param: "TransportCost".into(),
            index: vec![1, 0],
            value: -2.0,
        };
        assert_eq!(
            err.to_string(),
            "parameter TransportCost[1,0] must be non-negative, got -2"
        );
    }

    #[test]
    fn scalar_validation_has_no_index() {
        let err = Error::DataValidation {
            param: "MaxCapacity".into(),
            index: vec![],
            value: -1.0,
        };
        assert_eq!(
            err.to_string(),
            "parameter MaxCapacity must be non-negative, got -1"
        );
    }
}
