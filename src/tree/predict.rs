use super::tree::DecisionTree;
use crate::constants::PERCENT;
use crate::data::{Dataset, LabelCounts, Predictions, Row};
use crate::errors::CartError;
use crate::node::Node;
use std::fmt::{self, Display};

/// Route `row` from `node` down to a leaf and return the leaf's label counts.
pub fn classify<'a>(row: &Row, node: &'a Node) -> Result<&'a LabelCounts, CartError> {
    let mut node = node;
    loop {
        match node {
            Node::Leaf { counts } => return Ok(counts),
            Node::Decision {
                question,
                true_branch,
                false_branch,
            } => {
                node = if question.matches(row)? {
                    true_branch.as_ref()
                } else {
                    false_branch.as_ref()
                };
            }
        }
    }
}

/// Turn label counts into whole percentages, truncated per label.
///
/// Percentages are computed independently, so they can sum to less than 100,
/// e.g. `{Apple: 2, Lemon: 1}` gives `{Apple: "66%", Lemon: "33%"}`.
/// Labels whose counts are all zero get `"0%"`.
pub fn predict(counts: &LabelCounts) -> Predictions {
    let total = counts.values().sum::<usize>();
    counts
        .iter()
        .map(|(label, &count)| {
            let pct = if total == 0 { 0 } else { count * PERCENT / total };
            (label.clone(), format!("{}%", pct))
        })
        .collect()
}

/// Outcome of classifying one labelled row.
#[derive(Clone, Debug, PartialEq)]
pub struct Evaluation {
    pub actual: String,
    pub predicted: Predictions,
}

impl Display for Evaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let items: Vec<String> = self
            .predicted
            .iter()
            .map(|(label, pct)| format!("{}: {}", label, pct))
            .collect();
        write!(f, "Actual: {}, Predicted {{{}}}", self.actual, items.join(", "))
    }
}

impl DecisionTree {
    /// Label counts of the leaf `row` ends up in.
    pub fn classify(&self, row: &Row) -> Result<&LabelCounts, CartError> {
        classify(row, self.fitted_root()?)
    }

    /// Percentages of the leaf `row` ends up in.
    pub fn predict(&self, row: &Row) -> Result<Predictions, CartError> {
        Ok(predict(self.classify(row)?))
    }

    /// Classify every row of a labelled dataset.
    pub fn evaluate(&self, dataset: &Dataset) -> Result<Vec<Evaluation>, CartError> {
        dataset
            .rows()
            .iter()
            .enumerate()
            .map(|(i, row)| {
                let predicted = self.predict(row).map_err(|e| CartError::AtRow {
                    row: i,
                    source: Box::new(e),
                })?;
                let actual = row.label().map(|l| l.to_string()).unwrap_or_default();
                Ok(Evaluation { actual, predicted })
            })
            .collect()
    }
}
