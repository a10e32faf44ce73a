//! JSON reading and writing.
//!
//! ## Purpose
//!
//! This module implements the wire format of the tiering service: a JSON
//! array of flat numeric objects in, and a `clusteredData` /
//! `standardizedClusterBoundaries` document out. It also serializes the
//! per-tier chart data consumed by the chart renderer.
//!
//! ## Design notes
//!
//! * **Schema**: The keys of the first object, in document order, define
//!   the columns. Every other object must carry exactly the same key set.
//! * **Lenient numbers**: JSON numbers and strings holding a finite number
//!   are accepted; anything else is an `InvalidFeatureValue`.
//! * **Integral output**: Whole values (cluster ids, flags, record ids) are
//!   written as JSON integers, everything else as floats.
//!
//! ## Key concepts
//!
//! * **Row keys**: keep the column names verbatim; only top-level keys are
//!   camelCase.
//!
//! ## Non-goals
//!
//! * This module does not read CSV or talk HTTP.

// External dependencies
use serde::Serialize;
use serde_json::{Map, Number, Value};

// Internal dependencies
use crate::engine::output::TierResult;
use crate::primitives::dataset::Dataset;
use crate::primitives::errors::TierError;

/// Largest magnitude written as a JSON integer (2^53).
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

// ============================================================================
// Reading
// ============================================================================

/// Parse a JSON array of numeric objects into a dataset.
///
/// # Errors
///
/// * `InvalidInput` for malformed JSON or a top-level value that is not an array.
/// * `EmptyInput` for an empty array.
/// * `SchemaMismatch` for a non-object row or a row whose keys differ from the first row.
/// * `InvalidFeatureValue` for a field that is not a finite number.
pub fn parse_dataset(input: &str) -> Result<Dataset<f64>, TierError> {
    let value: Value =
        serde_json::from_str(input).map_err(|e| TierError::InvalidInput(e.to_string()))?;
    dataset_from_value(&value)
}

/// Convert an already parsed JSON array of objects into a dataset.
pub fn dataset_from_value(value: &Value) -> Result<Dataset<f64>, TierError> {
    let rows = value.as_array().ok_or_else(|| {
        TierError::InvalidInput(format!("expected a JSON array, found {}", kind(value)))
    })?;
    let first = rows.first().ok_or(TierError::EmptyInput)?;
    let schema: Vec<String> = as_object(first, 0)?.keys().cloned().collect();

    let mut dataset = Dataset::new(schema.iter().cloned());
    for (i, row) in rows.iter().enumerate() {
        let object = as_object(row, i)?;
        check_keys(object, &schema, i)?;

        let values = schema
            .iter()
            .map(|column| field_value(&object[column.as_str()], column, i))
            .collect::<Result<Vec<_>, _>>()?;
        dataset.push_row(values)?;
    }
    Ok(dataset)
}

fn as_object(value: &Value, row: usize) -> Result<&Map<String, Value>, TierError> {
    value.as_object().ok_or_else(|| TierError::SchemaMismatch {
        row,
        reason: format!("expected an object, found {}", kind(value)),
    })
}

fn check_keys(object: &Map<String, Value>, schema: &[String], row: usize) -> Result<(), TierError> {
    if let Some(missing) = schema.iter().find(|c| !object.contains_key(c.as_str())) {
        return Err(TierError::SchemaMismatch {
            row,
            reason: format!("missing field '{}'", missing),
        });
    }
    if let Some(extra) = object.keys().find(|k| !schema.contains(k)) {
        return Err(TierError::SchemaMismatch {
            row,
            reason: format!("unexpected field '{}'", extra),
        });
    }
    Ok(())
}

fn field_value(value: &Value, column: &str, row: usize) -> Result<f64, TierError> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    match parsed {
        Some(v) if v.is_finite() => Ok(v),
        _ => Err(TierError::InvalidFeatureValue {
            column: column.to_string(),
            row,
            value: value.to_string(),
        }),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// ============================================================================
// Writing
// ============================================================================

/// JSON number for `v`, as an integer when `v` is whole.
fn number(v: f64) -> Value {
    if v.fract() == 0.0 && v.abs() <= MAX_EXACT_INTEGER {
        Value::Number(Number::from(v as i64))
    } else {
        Number::from_f64(v).map_or(Value::Null, Value::Number)
    }
}

/// Rows of a dataset as JSON objects keyed by column name.
pub fn dataset_rows(dataset: &Dataset<f64>) -> Vec<Map<String, Value>> {
    dataset
        .rows()
        .iter()
        .map(|row| {
            dataset
                .columns()
                .iter()
                .zip(row)
                .map(|(column, &v)| (column.clone(), number(v)))
                .collect()
        })
        .collect()
}

/// Serialize a dataset as a JSON array of objects.
pub fn write_dataset(dataset: &Dataset<f64>, pretty: bool) -> Result<String, TierError> {
    to_json(&dataset_rows(dataset), pretty)
}

/// Serialize any value, compact or pretty-printed.
pub fn to_json<S: Serialize + ?Sized>(value: &S, pretty: bool) -> Result<String, TierError> {
    let out = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    out.map_err(|e| TierError::InvalidInput(e.to_string()))
}

// ============================================================================
// Response Documents
// ============================================================================

/// Response body of the tiering service.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TierResponse {
    /// Flagged records, grouped by ascending cluster id.
    pub clustered_data: Vec<Map<String, Value>>,

    /// Boundaries between adjacent tiers, in units of the partitioned column.
    pub standardized_cluster_boundaries: Vec<f64>,
}

impl TierResponse {
    /// Build the response body from a tiering result.
    pub fn from_result(result: &TierResult<f64>) -> Self {
        Self {
            clustered_data: dataset_rows(&result.data),
            standardized_cluster_boundaries: result.boundaries.clone(),
        }
    }
}

/// Per-tier chart data for the chart renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartData {
    /// Tier boundaries, in raw units when a standardization was configured.
    pub cluster_boundaries: Vec<f64>,

    /// Interquartile price band per tier, as `[q1, q3]` pairs.
    pub buffer_zones: Vec<[f64; 2]>,

    /// Mean price per tier.
    pub price_means: Vec<f64>,
}

impl ChartData {
    /// Build the chart data from a tiering result.
    pub fn from_result(result: &TierResult<f64>) -> Self {
        let summary = &result.price_summary;
        Self {
            cluster_boundaries: result
                .destandardized_boundaries
                .clone()
                .unwrap_or_else(|| result.boundaries.clone()),
            buffer_zones: summary
                .buffer_zones
                .iter()
                .map(|z| [z.lower, z.upper])
                .collect(),
            price_means: summary.price_means.clone(),
        }
    }
}
