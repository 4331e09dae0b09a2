use crate::config::TreeConfig;
use crate::data::{label_counts, Dataset, Row};
use crate::errors::CartError;
use crate::node::{fmt_counts, Node};
use crate::splitter::{find_best_split, partition};
use log::{debug, info};
use std::fmt::{self, Display};
use std::time::Instant;

/// A CART classification tree grown on Gini impurity.
///
/// The tree is fitted once with [`DecisionTree::fit`] and is read-only
/// afterwards; it is queried with `classify`, `predict` and `evaluate`.
#[derive(Clone, Debug, Default)]
pub struct DecisionTree {
    /// Configuration of the tree.
    pub cfg: TreeConfig,
    pub(crate) root: Option<Node>,
}

impl DecisionTree {
    /// Create an unfitted tree with the default configuration.
    pub fn new() -> Self {
        DecisionTree::default()
    }

    /// Create an unfitted tree from a configuration.
    pub fn from_config(cfg: TreeConfig) -> Self {
        DecisionTree { cfg, root: None }
    }

    /// Grow the tree on `dataset`, replacing any previous fit.
    pub fn fit(&mut self, dataset: &Dataset) -> Result<(), CartError> {
        self.cfg.validate(dataset.arity())?;
        let start = Instant::now();

        let root = grow(&dataset.row_refs(), self.cfg.parallel, 0)?;

        if self.cfg.verbose {
            info!(
                "Finished building a tree on {} rows with {} leaves and depth {} in {:?}.",
                dataset.len(),
                root.n_leaves(),
                root.depth(),
                start.elapsed()
            );
        }
        self.root = Some(root);
        Ok(())
    }

    /// The root node, `None` before `fit`.
    pub fn root(&self) -> Option<&Node> {
        self.root.as_ref()
    }

    pub(crate) fn fitted_root(&self) -> Result<&Node, CartError> {
        self.root.as_ref().ok_or(CartError::NotFitted)
    }
}

impl Display for DecisionTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.root {
            Some(root) => root.write_tree(f, "", self.cfg.column_names.as_deref()),
            None => writeln!(f, "Unfitted tree"),
        }
    }
}

/// Build a tree on every row of `dataset`, searching columns sequentially.
pub fn build_tree(dataset: &Dataset) -> Result<Node, CartError> {
    grow(&dataset.row_refs(), false, 0)
}

/// Grow a sub-tree on `rows`. A leaf is emitted once no question has a
/// positive gain; otherwise both sides of the best split are grown.
///
/// Recurses once per level. Every split leaves rows on both sides, so the
/// recursion is at most `rows.len() - 1` deep.
pub fn grow(rows: &[&Row], parallel: bool, depth: usize) -> Result<Node, CartError> {
    let best = find_best_split(rows, parallel)?;

    let question = match best.question {
        Some(question) => question,
        None => {
            let counts = label_counts(rows);
            debug!(
                "leaf at depth {} with {} rows: {}",
                depth,
                rows.len(),
                fmt_counts(&counts)
            );
            return Ok(Node::leaf(counts));
        }
    };

    let split = partition(rows, &question)?;
    debug!(
        "split at depth {} on `{}`, gain {:.6}, {} true / {} false rows",
        depth,
        question,
        best.gain,
        split.matches.len(),
        split.non_matches.len()
    );

    let true_branch = grow(&split.matches, parallel, depth + 1)?;
    let false_branch = grow(&split.non_matches, parallel, depth + 1)?;

    Ok(Node::decision(question, true_branch, false_branch))
}
