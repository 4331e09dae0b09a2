//! Question
//!
//! A single-column criterion used to send rows down one of two branches.
use crate::data::{Row, Value};
use crate::errors::CartError;
use std::fmt::{self, Display};

/// Criterion on one feature column.
///
/// A categorical reference matches rows holding the same string. A numeric
/// reference matches rows whose value is at most the reference, i.e.
/// `reference >= row value`.
#[derive(Clone, Debug, PartialEq)]
pub struct Question {
    pub column: usize,
    pub value: Value,
}

impl Question {
    pub fn new(column: usize, value: Value) -> Self {
        Question { column, value }
    }

    /// Evaluate the question against `row`.
    pub fn matches(&self, row: &Row) -> Result<bool, CartError> {
        match (&self.value, row.get(self.column)?) {
            (Value::Categorical(reference), Value::Categorical(v)) => Ok(reference == v),
            (Value::Numeric(reference), Value::Numeric(v)) => Ok(reference >= v),
            (reference, found) => Err(CartError::TypeMismatch {
                column: self.column,
                expected: reference.kind(),
                found: found.kind(),
            }),
        }
    }

    /// The comparison operator as rendered in tree output.
    pub fn operator(&self) -> &'static str {
        match self.value {
            Value::Categorical(_) => "==",
            Value::Numeric(_) => ">=",
        }
    }

    /// Render the question with a column name taken from `column_names`,
    /// falling back to `column <i>`.
    pub fn describe(&self, column_names: Option<&[String]>) -> String {
        let name = column_names
            .and_then(|names| names.get(self.column))
            .cloned()
            .unwrap_or_else(|| format!("column {}", self.column));
        format!("Is {} {} {}", name, self.operator(), self.value)
    }
}

impl Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.describe(None))
    }
}
