//! Row-oriented dataset of named numeric columns.
//!
//! ## Purpose
//!
//! This module provides `Dataset`, the in-memory table the whole pipeline
//! operates on. A dataset is an ordered list of column names (the schema) and
//! an ordered list of records, each holding exactly one value per column.
//!
//! ## Design notes
//!
//! * **Immutable by convention**: Derived columns are appended on a copy via
//!   `with_column`; the input dataset is never modified by the pipeline.
//! * **Validated access**: `feature_column` and `feature_matrix` reject
//!   non-finite values instead of passing them to the numeric code.
//! * **Generics**: Generic over `Float` types.
//!
//! ## Invariants
//!
//! * Every row has exactly `columns().len()` values.
//! * Column names are unique.
//! * Row order is preserved by every operation except explicit `select`.
//!
//! ## Non-goals
//!
//! * This module does not parse or serialize any external format.
//! * This module does not support non-numeric columns.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::string::{String, ToString};
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::string::{String, ToString};
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::primitives::errors::TierError;

// ============================================================================
// Dataset
// ============================================================================

/// Ordered collection of records sharing one schema.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset<T> {
    columns: Vec<String>,
    rows: Vec<Vec<T>>,
}

impl<T: Float> Dataset<T> {
    /// Create an empty dataset with the given schema.
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Create a dataset from a schema and a list of rows.
    ///
    /// Fails with `SchemaMismatch` if a column name repeats or a row does not
    /// have one value per column.
    pub fn from_rows<I, S>(columns: I, rows: Vec<Vec<T>>) -> Result<Self, TierError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut dataset = Self::new(columns);

        for (i, name) in dataset.columns.iter().enumerate() {
            if dataset.columns[..i].contains(name) {
                return Err(TierError::SchemaMismatch {
                    row: 0,
                    reason: format!("duplicate column '{}'", name),
                });
            }
        }

        dataset.rows.reserve(rows.len());
        for row in rows {
            dataset.push_row(row)?;
        }
        Ok(dataset)
    }

    /// Append a record.
    pub fn push_row(&mut self, row: Vec<T>) -> Result<(), TierError> {
        if row.len() != self.columns.len() {
            return Err(TierError::SchemaMismatch {
                row: self.rows.len(),
                reason: format!(
                    "expected {} fields, got {}",
                    self.columns.len(),
                    row.len()
                ),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    /// Number of records.
    #[inline]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the dataset has no records.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Column names in schema order.
    #[inline]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// All records in order.
    #[inline]
    pub fn rows(&self) -> &[Vec<T>] {
        &self.rows
    }

    /// A single record, if `index` is in range.
    #[inline]
    pub fn row(&self, index: usize) -> Option<&[T]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    /// Position of a column in the schema.
    pub fn column_index(&self, name: &str) -> Result<usize, TierError> {
        self.columns
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| TierError::UnknownColumn(name.to_string()))
    }

    /// Raw values of one column, without validation.
    pub fn column(&self, name: &str) -> Result<Vec<T>, TierError> {
        let idx = self.column_index(name)?;
        Ok(self.rows.iter().map(|row| row[idx]).collect())
    }

    /// Values of one column, rejecting NaN and infinities.
    pub fn feature_column(&self, name: &str) -> Result<Vec<T>, TierError> {
        let idx = self.column_index(name)?;
        self.rows
            .iter()
            .enumerate()
            .map(|(i, row)| finite_value(name, i, row[idx]))
            .collect()
    }

    /// Row-major `n x d` matrix of the named columns, rejecting non-finite values.
    pub fn feature_matrix(&self, names: &[&str]) -> Result<Vec<T>, TierError> {
        let indices = names
            .iter()
            .map(|name| self.column_index(name))
            .collect::<Result<Vec<_>, _>>()?;

        let mut out = Vec::with_capacity(self.rows.len() * indices.len());
        for (i, row) in self.rows.iter().enumerate() {
            for (&idx, name) in indices.iter().zip(names) {
                out.push(finite_value(name, i, row[idx])?);
            }
        }
        Ok(out)
    }

    /// Values of a label column as non-negative integers.
    pub fn label_column(&self, name: &str) -> Result<Vec<usize>, TierError> {
        let idx = self.column_index(name)?;
        self.rows
            .iter()
            .enumerate()
            .map(|(i, row)| {
                let v = row[idx];
                if v.is_finite() && v >= T::zero() && v.fract() == T::zero() {
                    if let Some(label) = v.to_usize() {
                        return Ok(label);
                    }
                }
                Err(invalid_value(name, i, v))
            })
            .collect()
    }

    /// Copy of the dataset with `values` as column `name`.
    ///
    /// An existing column of the same name is overwritten in place; otherwise
    /// the column is appended to the schema.
    pub fn with_column(&self, name: &str, values: &[T]) -> Result<Self, TierError> {
        if values.len() != self.rows.len() {
            return Err(TierError::SchemaMismatch {
                row: values.len().min(self.rows.len()),
                reason: format!(
                    "column '{}' has {} values for {} rows",
                    name,
                    values.len(),
                    self.rows.len()
                ),
            });
        }

        let mut out = self.clone();
        match self.columns.iter().position(|c| c == name) {
            Some(idx) => {
                for (row, &v) in out.rows.iter_mut().zip(values) {
                    row[idx] = v;
                }
            }
            None => {
                out.columns.push(name.to_string());
                for (row, &v) in out.rows.iter_mut().zip(values) {
                    row.push(v);
                }
            }
        }
        Ok(out)
    }

    /// Copy of the records at `indices`, in the order given.
    pub fn select(&self, indices: &[usize]) -> Self {
        Self {
            columns: self.columns.clone(),
            rows: indices.iter().map(|&i| self.rows[i].clone()).collect(),
        }
    }
}

// ============================================================================
// Helpers
// ============================================================================

#[inline]
fn finite_value<T: Float>(column: &str, row: usize, value: T) -> Result<T, TierError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(invalid_value(column, row, value))
    }
}

fn invalid_value<T: Float>(column: &str, row: usize, value: T) -> TierError {
    TierError::InvalidFeatureValue {
        column: column.to_string(),
        row,
        value: format!("{}", value.to_f64().unwrap_or(f64::NAN)),
    }
}
