//! Encoders for the combinatorial problem families, one module each.
//!
//! Every encoder is a pure mapping from validated instance data to a fully
//! populated [`Model`](crate::Model): instance parameters are checked for
//! negative entries and dimension mismatches before any variable or
//! constraint exists, and an `extract` method maps an optimal solution report
//! back to a domain solution type.

use crate::Error;

pub mod bin_packing;
pub mod cutting_stock;
pub mod facility_location;
pub mod knapsack;
pub mod tsp;
pub mod vrp;

/// Rejects a negative scalar parameter.
pub(crate) fn ensure_scalar(param: &str, value: f64) -> Result<(), Error> {
    if value < 0.0 {
        return Err(Error::DataValidation {
            param: param.to_string(),
            index: Vec::new(),
            value,
        });
    }
    Ok(())
}

/// Checks length and non-negativity of a parameter vector.
pub(crate) fn ensure_vec(param: &str, expected: usize, values: &[f64]) -> Result<(), Error> {
    if values.len() != expected {
        return Err(Error::DimensionMismatch {
            param: param.to_string(),
            expected,
            actual: values.len(),
        });
    }
    for (i, &value) in values.iter().enumerate() {
        if value < 0.0 {
            return Err(Error::DataValidation {
                param: param.to_string(),
                index: vec![i],
                value,
            });
        }
    }
    Ok(())
}

/// Checks dimensions and non-negativity of a parameter matrix.
pub(crate) fn ensure_matrix(
    param: &str,
    rows: usize,
    cols: usize,
    values: &[Vec<f64>],
) -> Result<(), Error> {
    if values.len() != rows {
        return Err(Error::DimensionMismatch {
            param: param.to_string(),
            expected: rows,
            actual: values.len(),
        });
    }
    for (r, row) in values.iter().enumerate() {
        if row.len() != cols {
            return Err(Error::DimensionMismatch {
                param: param.to_string(),
                expected: cols,
                actual: row.len(),
            });
        }
        for (c, &value) in row.iter().enumerate() {
            if value < 0.0 {
                return Err(Error::DataValidation {
                    param: param.to_string(),
                    index: vec![r, c],
                    value,
                });
            }
        }
    }
    Ok(())
}
