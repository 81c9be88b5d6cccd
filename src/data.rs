//! Thin JSON loaders for problem instance documents.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;

use crate::Error;

/// Parses a problem instance document from a JSON string.
pub fn from_json_str<T: DeserializeOwned>(json: &str) -> Result<T, Error> {
    Ok(serde_json::from_str(json)?)
}

/// Reads and parses a problem instance document from a JSON file.
pub fn from_json_file<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T, Error> {
    let raw = fs::read_to_string(path)?;
    from_json_str(&raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problems::knapsack::KnapsackInstance;

    #[test]
    fn parses_original_key_spelling() {
        let instance: KnapsackInstance = from_json_str(
            r#"{"N": 3, "Weights": [2, 3, 4], "Values": [3, 4, 5], "MaxCapacity": 5}"#,
        )
        .unwrap();

        assert_eq!(instance.n, 3);
        assert_eq!(instance.weights, vec![2.0, 3.0, 4.0]);
        assert_eq!(instance.max_capacity, 5.0);
    }

    #[test]
    fn malformed_document_is_a_parse_error() {
        let err = from_json_str::<KnapsackInstance>(r#"{"N": 3}"#).unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }
}
