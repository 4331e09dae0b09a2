//! Data
//!
//! Attribute values, rows and the validated `Dataset` the tree is grown from.
use crate::constants::MIN_COLUMNS;
use crate::errors::CartError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::{self, Display};

/// Number of rows per label. Ordered so impurity sums and output are reproducible.
pub type LabelCounts = BTreeMap<String, usize>;

/// Percentage string per label, e.g. `"66%"`.
pub type Predictions = BTreeMap<String, String>;

/// A single attribute value of a row.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// Compared by equality.
    Categorical(String),
    /// Compared against a threshold.
    Numeric(f64),
}

/// The variant of a `Value`, without its payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValueKind {
    Categorical,
    Numeric,
}

impl Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Categorical => "categorical",
            ValueKind::Numeric => "numeric",
        };
        write!(f, "{}", name)
    }
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Categorical(_) => ValueKind::Categorical,
            Value::Numeric(_) => ValueKind::Numeric,
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Categorical(s) => write!(f, "{}", s),
            Value::Numeric(v) => write!(f, "{}", v),
        }
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Categorical(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Categorical(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Numeric(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Numeric(f64::from(v))
    }
}

/// Build a `Row` from a list of values convertible into `Value`.
///
/// ```
/// use gini_cart::row;
/// let r = row!["Green", 3, "Apple"];
/// assert_eq!(r.len(), 3);
/// ```
#[macro_export]
macro_rules! row {
    ($($v:expr),* $(,)?) => {
        $crate::data::Row::new(vec![$($crate::data::Value::from($v)),*])
    };
}

/// An immutable row of attribute values, the last one being the label.
#[derive(Clone, Debug, PartialEq)]
pub struct Row {
    values: Vec<Value>,
}

impl Row {
    pub fn new(values: Vec<Value>) -> Self {
        Row { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Get the value at `column`, failing when the row is too short.
    pub fn get(&self, column: usize) -> Result<&Value, CartError> {
        self.values.get(column).ok_or(CartError::ColumnOutOfRange {
            column,
            arity: self.values.len(),
        })
    }

    /// The value in the last position.
    pub fn label(&self) -> Option<&Value> {
        self.values.last()
    }
}

impl From<Vec<Value>> for Row {
    fn from(values: Vec<Value>) -> Self {
        Row::new(values)
    }
}

/// Count the rows of every label. Rows without any value are not counted.
pub fn label_counts(rows: &[&Row]) -> LabelCounts {
    let mut counts = LabelCounts::new();
    for row in rows {
        if let Some(label) = row.label() {
            *counts.entry(label.to_string()).or_insert(0) += 1;
        }
    }
    counts
}

/// A non-empty set of rows of identical arity.
///
/// Every label is categorical and every feature column holds values of
/// a single kind, so questions built from the data never hit a type mismatch.
#[derive(Clone, Debug)]
pub struct Dataset {
    rows: Vec<Row>,
    arity: usize,
}

impl Dataset {
    /// Validate `rows` and wrap them.
    pub fn new(rows: Vec<Row>) -> Result<Self, CartError> {
        let first = rows.first().ok_or(CartError::EmptyDataset)?;
        let arity = first.len();
        if arity < MIN_COLUMNS {
            return Err(CartError::TooFewColumns { found: arity });
        }
        let kinds: Vec<ValueKind> = first.values()[..arity - 1].iter().map(Value::kind).collect();

        for (i, row) in rows.iter().enumerate() {
            if row.len() != arity {
                return Err(CartError::ArityMismatch {
                    row: i,
                    expected: arity,
                    found: row.len(),
                });
            }
            if let Some(Value::Numeric(_)) = row.label() {
                return Err(CartError::NonCategoricalLabel { row: i });
            }
            for (column, (value, expected)) in row.values().iter().zip(kinds.iter()).enumerate() {
                if let Value::Numeric(v) = value {
                    if v.is_nan() {
                        return Err(CartError::NotANumber { row: i, column });
                    }
                }
                if value.kind() != *expected {
                    return Err(CartError::MixedColumnKinds {
                        row: i,
                        column,
                        expected: *expected,
                        found: value.kind(),
                    });
                }
            }
        }

        Ok(Dataset { rows, arity })
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Borrow every row, the starting point of a split search.
    pub fn row_refs(&self) -> Vec<&Row> {
        self.rows.iter().collect()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of columns, label included.
    pub fn arity(&self) -> usize {
        self.arity
    }

    pub fn n_features(&self) -> usize {
        self.arity - 1
    }

    pub fn label_counts(&self) -> LabelCounts {
        label_counts(&self.row_refs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_display() {
        assert_eq!(Value::from(3).to_string(), "3");
        assert_eq!(Value::from(2.5).to_string(), "2.5");
        assert_eq!(Value::from("Green").to_string(), "Green");
    }

    #[test]
    fn test_row_get_out_of_range() {
        let r = row!["Green", 3, "Apple"];
        assert_eq!(r.get(1).unwrap(), &Value::Numeric(3.0));
        assert!(matches!(r.get(3), Err(CartError::ColumnOutOfRange { column: 3, arity: 3 })));
    }

    #[test]
    fn test_label_counts() {
        let rows = [row!["Green", 3, "Apple"], row!["Red", 1, "Grape"], row!["Yellow", 3, "Apple"]];
        let refs: Vec<&Row> = rows.iter().collect();
        let counts = label_counts(&refs);
        assert_eq!(counts.len(), 2);
        assert_eq!(counts["Apple"], 2);
        assert_eq!(counts["Grape"], 1);
    }

    #[test]
    fn test_dataset_valid() {
        let ds = Dataset::new(vec![row!["Green", 3, "Apple"], row!["Red", 1, "Grape"]]).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.arity(), 3);
        assert_eq!(ds.n_features(), 2);
    }

    #[test]
    fn test_dataset_empty() {
        assert!(matches!(Dataset::new(Vec::new()), Err(CartError::EmptyDataset)));
    }

    #[test]
    fn test_dataset_too_few_columns() {
        let r = Dataset::new(vec![row!["Apple"]]);
        assert!(matches!(r, Err(CartError::TooFewColumns { found: 1 })));
    }

    #[test]
    fn test_dataset_arity_mismatch() {
        let r = Dataset::new(vec![row!["Green", 3, "Apple"], row!["Red", "Grape"]]);
        assert!(matches!(
            r,
            Err(CartError::ArityMismatch {
                row: 1,
                expected: 3,
                found: 2
            })
        ));
    }

    #[test]
    fn test_dataset_numeric_label() {
        let r = Dataset::new(vec![row!["Green", 3, "Apple"], row!["Red", 1, 2]]);
        assert!(matches!(r, Err(CartError::NonCategoricalLabel { row: 1 })));
    }

    #[test]
    fn test_dataset_mixed_kinds() {
        let r = Dataset::new(vec![row!["Green", 3, "Apple"], row!["Red", "big", "Grape"]]);
        assert!(matches!(
            r,
            Err(CartError::MixedColumnKinds {
                row: 1,
                column: 1,
                expected: ValueKind::Numeric,
                found: ValueKind::Categorical
            })
        ));
    }

    #[test]
    fn test_dataset_nan() {
        let r = Dataset::new(vec![row!["Green", f64::NAN, "Apple"]]);
        assert!(matches!(r, Err(CartError::NotANumber { row: 0, column: 1 })));
    }
}
