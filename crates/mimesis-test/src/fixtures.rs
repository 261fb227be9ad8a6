//! Record batch fixtures.
//!
//! The standard fixture is a two-column batch, `col1: Int64` and
//! `col2: Float64`, built from the pattern `[1, 2, 3]` / `[0.1, 0.2, 0.3]`
//! repeated some number of times.

use std::sync::Arc;

use arrow_array::{ArrayRef, Float64Array, Int64Array};
use arrow_schema::{DataType, Field, Schema};
use mimesis_plugin_sdk::{RecordBatch, SchemaRef};

const COL1_PATTERN: [i64; 3] = [1, 2, 3];
const COL2_PATTERN: [f64; 3] = [0.1, 0.2, 0.3];

/// An input batch and the output a plugin is expected to produce for it.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchPair {
    pub input: RecordBatch,
    pub expected_output: RecordBatch,
}

impl BatchPair {
    pub fn new(input: RecordBatch, expected_output: RecordBatch) -> Self {
        Self {
            input,
            expected_output,
        }
    }

    /// A pair whose expected output equals its input.
    pub fn identity(batch: RecordBatch) -> Self {
        Self::new(batch.clone(), batch)
    }
}

impl From<BatchPair> for (RecordBatch, RecordBatch) {
    fn from(pair: BatchPair) -> Self {
        (pair.input, pair.expected_output)
    }
}

/// Schema with no columns, for anchors declared without a fixed shape.
pub fn empty_schema() -> SchemaRef {
    Arc::new(Schema::empty())
}

/// `col1: Int64`, `col2: Float64`, both nullable.
pub fn test_schema() -> SchemaRef {
    Arc::new(Schema::new(vec![
        Field::new("col1", DataType::Int64, true),
        Field::new("col2", DataType::Float64, true),
    ]))
}

/// The three-row pattern repeated `repeat` times.
///
/// Panics if `3 * repeat` overflows `usize`.
pub fn repeated_batch(repeat: usize) -> RecordBatch {
    let rows = repeat
        .checked_mul(COL1_PATTERN.len())
        .expect("fixture row count overflows usize");
    let col1 = Int64Array::from_iter_values(COL1_PATTERN.iter().copied().cycle().take(rows));
    let col2 = Float64Array::from_iter_values(COL2_PATTERN.iter().copied().cycle().take(rows));
    let columns: Vec<ArrayRef> = vec![Arc::new(col1), Arc::new(col2)];
    RecordBatch::try_new(test_schema(), columns).expect("fixture columns match test_schema")
}

/// 3 rows.
pub fn small_batches() -> BatchPair {
    BatchPair::new(repeated_batch(1), repeated_batch(1))
}

/// 600 rows.
pub fn medium_batches() -> BatchPair {
    BatchPair::new(repeated_batch(200), repeated_batch(200))
}

/// 60 000 rows.
pub fn large_batches() -> BatchPair {
    BatchPair::new(repeated_batch(20_000), repeated_batch(20_000))
}
