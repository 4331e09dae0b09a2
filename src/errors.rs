//! Errors
//!
//! Custom error types used throughout the `gini-cart` crate.
use crate::data::ValueKind;
use thiserror::Error;

/// Errors that can occur while building or querying a decision tree.
#[derive(Debug, Error)]
pub enum CartError {
    /// A dataset or row set with no rows was supplied.
    #[error("The dataset is empty, at least one row is required.")]
    EmptyDataset,
    /// Rows need at least one feature column and the label column.
    #[error("Rows must have at least 2 columns (features and a label), but {found} found.")]
    TooFewColumns { found: usize },
    /// A row has a different number of columns than the first row.
    #[error("Row {row} has {found} columns, expected {expected}.")]
    ArityMismatch { row: usize, expected: usize, found: usize },
    /// Labels are class names, so they must be categorical.
    #[error("Row {row} has a numeric label, labels must be categorical.")]
    NonCategoricalLabel { row: usize },
    /// A feature column holds both categorical and numeric values.
    #[error("Row {row}, column {column} is {found}, but the column is {expected}.")]
    MixedColumnKinds {
        row: usize,
        column: usize,
        expected: ValueKind,
        found: ValueKind,
    },
    /// NaN can not be ordered against a threshold.
    #[error("Row {row}, column {column} is NaN.")]
    NotANumber { row: usize, column: usize },
    /// A question was asked about a value of the other kind.
    #[error("Question on column {column} expects a {expected} value, but {found} found.")]
    TypeMismatch {
        column: usize,
        expected: ValueKind,
        found: ValueKind,
    },
    /// Wraps a failure with the index of the row it happened on.
    #[error("Row {row}: {source}")]
    AtRow {
        row: usize,
        #[source]
        source: Box<CartError>,
    },
    /// A question references a column the row does not have.
    #[error("Column {column} is out of range for a row with {arity} columns.")]
    ColumnOutOfRange { column: usize, arity: usize },
    /// Information gain needs both sides of a split to be non-empty.
    #[error("Information gain is undefined when one side of the split is empty.")]
    EmptyPartition,
    /// The configured column names do not fit the dataset.
    #[error("{found} column names configured, but the dataset has {expected} columns.")]
    HeaderMismatch { expected: usize, found: usize },
    /// Classification was requested before `fit`.
    #[error("The tree has not been fitted yet.")]
    NotFitted,
    /// Unable to write a configuration.
    #[error("Unable to write configuration: {0}")]
    UnableToWrite(String),
    /// Unable to read a configuration.
    #[error("Unable to read configuration: {0}")]
    UnableToRead(String),
}
