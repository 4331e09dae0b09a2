use crate::constants::INDENT;
use crate::data::LabelCounts;
use crate::question::Question;
use std::fmt::{self, Display, Write};

/// A node of a trained tree.
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    /// Internal node. Rows matching `question` go down `true_branch`.
    Decision {
        question: Question,
        true_branch: Box<Node>,
        false_branch: Box<Node>,
    },
    /// Terminal node holding the label counts of the training rows that reached it.
    Leaf { counts: LabelCounts },
}

impl Node {
    pub fn leaf(counts: LabelCounts) -> Self {
        Node::Leaf { counts }
    }

    pub fn decision(question: Question, true_branch: Node, false_branch: Node) -> Self {
        Node::Decision {
            question,
            true_branch: Box::new(true_branch),
            false_branch: Box::new(false_branch),
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }

    /// Number of leaves of this sub-tree.
    pub fn n_leaves(&self) -> usize {
        self.leaves().len()
    }

    /// Number of nodes of this sub-tree, leaves included.
    pub fn n_nodes(&self) -> usize {
        let mut n = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            n += 1;
            if let Node::Decision {
                true_branch,
                false_branch,
                ..
            } = node
            {
                stack.push(false_branch);
                stack.push(true_branch);
            }
        }
        n
    }

    /// Length of the longest path to a leaf. A single leaf has depth 0.
    pub fn depth(&self) -> usize {
        let mut max_depth = 0;
        let mut stack = vec![(self, 0)];
        while let Some((node, depth)) = stack.pop() {
            match node {
                Node::Decision {
                    true_branch,
                    false_branch,
                    ..
                } => {
                    stack.push((false_branch, depth + 1));
                    stack.push((true_branch, depth + 1));
                }
                Node::Leaf { .. } => max_depth = max_depth.max(depth),
            }
        }
        max_depth
    }

    /// Number of training rows that reached the leaves of this sub-tree.
    pub fn n_rows(&self) -> usize {
        self.leaves().iter().map(|counts| counts.values().sum::<usize>()).sum()
    }

    /// Label counts of every leaf, true branches first.
    pub fn leaves(&self) -> Vec<&LabelCounts> {
        let mut leaves = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            match node {
                Node::Decision {
                    true_branch,
                    false_branch,
                    ..
                } => {
                    stack.push(false_branch);
                    stack.push(true_branch);
                }
                Node::Leaf { counts } => leaves.push(counts),
            }
        }
        leaves
    }

    /// Write the sub-tree, one line per question, branch marker or leaf.
    ///
    /// Recurses once per level, so the stack grows with the depth of the tree.
    pub fn write_tree<W: Write>(&self, w: &mut W, indent: &str, column_names: Option<&[String]>) -> fmt::Result {
        match self {
            Node::Leaf { counts } => writeln!(w, "{} Predict {}", indent, fmt_counts(counts)),
            Node::Decision {
                question,
                true_branch,
                false_branch,
            } => {
                let child_indent = format!("{}{}", indent, INDENT);
                writeln!(w, "{}{}", indent, question.describe(column_names))?;
                writeln!(w, "{}---> True", indent)?;
                true_branch.write_tree(w, &child_indent, column_names)?;
                writeln!(w, "{}---> False", indent)?;
                false_branch.write_tree(w, &child_indent, column_names)
            }
        }
    }
}

impl Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_tree(f, "", None)
    }
}

/// Format counts as `{Apple: 2, Lemon: 1}`.
pub fn fmt_counts(counts: &LabelCounts) -> String {
    let items: Vec<String> = counts.iter().map(|(label, n)| format!("{}: {}", label, n)).collect();
    format!("{{{}}}", items.join(", "))
}
