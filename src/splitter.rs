//! Splitter
//!
//! Gini impurity, partitioning, information gain and the search for the
//! question with the highest gain.
use crate::data::{label_counts, LabelCounts, Row, Value};
use crate::errors::CartError;
use crate::question::Question;
use hashbrown::HashSet;
use log::trace;
use rayon::prelude::*;

/// Rows split by a question. Both sides keep the input order.
#[derive(Debug)]
pub struct Partition<'a> {
    pub matches: Vec<&'a Row>,
    pub non_matches: Vec<&'a Row>,
}

impl Partition<'_> {
    /// True when every row landed on the same side.
    pub fn is_degenerate(&self) -> bool {
        self.matches.is_empty() || self.non_matches.is_empty()
    }
}

/// Winner of a split search. `question` is `None` when no question has a
/// positive gain, which marks the rows as a leaf.
#[derive(Debug, Clone, PartialEq)]
pub struct BestSplit {
    pub gain: f64,
    pub question: Option<Question>,
}

impl Default for BestSplit {
    fn default() -> Self {
        BestSplit {
            gain: 0.0,
            question: None,
        }
    }
}

// Hashable view of a value, used to collect the distinct values of a column.
#[derive(Hash, PartialEq, Eq)]
enum ValueKey<'a> {
    Categorical(&'a str),
    Numeric(u64),
}

impl<'a> From<&'a Value> for ValueKey<'a> {
    fn from(value: &'a Value) -> Self {
        match value {
            Value::Categorical(s) => ValueKey::Categorical(s),
            // -0.0 and 0.0 compare equal, so they share a key.
            Value::Numeric(v) if *v == 0.0 => ValueKey::Numeric(0.0_f64.to_bits()),
            Value::Numeric(v) => ValueKey::Numeric(v.to_bits()),
        }
    }
}

// Sum of squared label counts.
fn sum_of_squares(counts: &LabelCounts) -> u128 {
    counts.values().map(|&c| (c as u128) * (c as u128)).sum()
}

/// Gini impurity computed from label counts over `total` rows, as
/// `1 - sum(c^2) / total^2` so equal proportions give equal impurities.
pub fn gini_from_counts(counts: &LabelCounts, total: usize) -> f64 {
    let total = total as u128;
    1.0 - sum_of_squares(counts) as f64 / (total * total) as f64
}

/// Gini impurity of `rows`: `1 - sum(p_label^2)`.
pub fn gini_impurity(rows: &[&Row]) -> Result<f64, CartError> {
    if rows.is_empty() {
        return Err(CartError::EmptyDataset);
    }
    Ok(gini_from_counts(&label_counts(rows), rows.len()))
}

/// Split `rows` by `question`.
pub fn partition<'a>(rows: &[&'a Row], question: &Question) -> Result<Partition<'a>, CartError> {
    let mut matches = Vec::new();
    let mut non_matches = Vec::new();
    for (i, &row) in rows.iter().enumerate() {
        let is_match = question.matches(row).map_err(|e| CartError::AtRow {
            row: i,
            source: Box::new(e),
        })?;
        if is_match {
            matches.push(row);
        } else {
            non_matches.push(row);
        }
    }
    Ok(Partition { matches, non_matches })
}

/// Reduction of `parent_impurity` achieved by splitting into `left` and `right`,
/// each side weighted by its share of the rows.
pub fn information_gain(left: &[&Row], right: &[&Row], parent_impurity: f64) -> Result<f64, CartError> {
    if left.is_empty() || right.is_empty() {
        return Err(CartError::EmptyPartition);
    }
    let p = left.len() as f64 / (left.len() + right.len()) as f64;
    Ok(parent_impurity - p * gini_impurity(left)? - (1.0 - p) * gini_impurity(right)?)
}

/// Information gain of splitting `left` + `right`, evaluated on integer
/// label counts. Splits whose sides share the parent's label proportions
/// get a gain of exactly 0.
///
/// With `s` the sums of squared counts and `n` the row counts, the gain is
/// `(s_l*n_r*n + s_r*n_l*n - s_p*n_l*n_r) / (n_l*n_r*n^2)`.
pub fn split_gain(left: &[&Row], right: &[&Row]) -> Result<f64, CartError> {
    if left.is_empty() || right.is_empty() {
        return Err(CartError::EmptyPartition);
    }
    let left_counts = label_counts(left);
    let right_counts = label_counts(right);
    let mut parent_counts = left_counts.clone();
    for (label, n) in &right_counts {
        *parent_counts.entry(label.clone()).or_insert(0) += n;
    }

    let n_l = left.len() as i128;
    let n_r = right.len() as i128;
    let n = n_l + n_r;
    let s_l = sum_of_squares(&left_counts) as i128;
    let s_r = sum_of_squares(&right_counts) as i128;
    let s_p = sum_of_squares(&parent_counts) as i128;

    let numerator = s_l * n_r * n + s_r * n_l * n - s_p * n_l * n_r;
    if numerator <= 0 {
        return Ok(0.0);
    }
    Ok(numerator as f64 / (n_l * n_r * n * n) as f64)
}

/// Distinct values of `column`, in order of first appearance.
pub fn distinct_values(rows: &[&Row], column: usize) -> Result<Vec<Value>, CartError> {
    let mut seen = HashSet::new();
    let mut values = Vec::new();
    for (i, row) in rows.iter().enumerate() {
        let value = row.get(column).map_err(|e| CartError::AtRow {
            row: i,
            source: Box::new(e),
        })?;
        if seen.insert(ValueKey::from(value)) {
            values.push(value.clone());
        }
    }
    Ok(values)
}

fn best_split_for_column(rows: &[&Row], column: usize) -> Result<BestSplit, CartError> {
    let mut best = BestSplit::default();
    for value in distinct_values(rows, column)? {
        let question = Question::new(column, value);
        let split = partition(rows, &question)?;
        if split.is_degenerate() {
            continue;
        }
        let gain = split_gain(&split.matches, &split.non_matches)?;
        trace!("candidate `{}` gain {:.6}", question, gain);
        // Later candidates win ties.
        if gain >= best.gain {
            best = BestSplit {
                gain,
                question: Some(question),
            };
        }
    }
    Ok(best)
}

/// Find the question with the highest information gain over all feature
/// columns (every column but the last).
///
/// Columns are visited left to right and values in order of first
/// appearance; a candidate replaces the current best when its gain is
/// greater or equal. Gains come from `split_gain`, so a question that
/// leaves the label proportions unchanged never wins. With `parallel`,
/// columns are searched on the rayon pool and their winners folded in
/// column order, which picks the same question as the sequential search.
pub fn find_best_split(rows: &[&Row], parallel: bool) -> Result<BestSplit, CartError> {
    if rows.is_empty() {
        return Err(CartError::EmptyDataset);
    }
    let n_features = rows[0].len().saturating_sub(1);

    let per_column: Vec<BestSplit> = if parallel {
        (0..n_features)
            .into_par_iter()
            .map(|column| best_split_for_column(rows, column))
            .collect::<Result<Vec<_>, CartError>>()?
    } else {
        (0..n_features)
            .map(|column| best_split_for_column(rows, column))
            .collect::<Result<Vec<_>, CartError>>()?
    };

    let best = per_column
        .into_iter()
        .fold(BestSplit::default(), |best, candidate| {
            if candidate.question.is_some() && candidate.gain >= best.gain {
                candidate
            } else {
                best
            }
        });

    // A zero gain question does not improve on the parent.
    if best.gain > 0.0 {
        Ok(best)
    } else {
        Ok(BestSplit::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::row;

    fn fruit() -> Vec<Row> {
        vec![
            row!["Green", 3, "Apple"],
            row!["Yellow", 3, "Apple"],
            row!["Red", 1, "Grape"],
            row!["Yellow", 3, "Lemon"],
            row!["Yellow", 7, "Banana"],
            row!["Green", 7, "Banana"],
            row!["Orange", 3, "Orange"],
        ]
    }

    #[test]
    fn test_gini_pure() {
        let rows = [row!["a", "x"], row!["b", "x"]];
        let refs: Vec<&Row> = rows.iter().collect();
        assert_eq!(gini_impurity(&refs).unwrap(), 0.0);
    }

    #[test]
    fn test_gini_values() {
        let rows = fruit();
        let refs: Vec<&Row> = rows.iter().collect();
        let g = gini_impurity(&refs).unwrap();
        assert!((g - 38.0 / 49.0).abs() < 1e-12);
        assert!((0.0..1.0).contains(&g));

        let mixed = [row!["a", "x"], row!["b", "y"]];
        let refs: Vec<&Row> = mixed.iter().collect();
        assert!((gini_impurity(&refs).unwrap() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_gini_empty() {
        assert!(matches!(gini_impurity(&[]), Err(CartError::EmptyDataset)));
    }

    #[test]
    fn test_partition_is_complete_and_ordered() {
        let rows = fruit();
        let refs: Vec<&Row> = rows.iter().collect();
        let split = partition(&refs, &Question::new(0, Value::from("Yellow"))).unwrap();
        assert_eq!(split.matches.len() + split.non_matches.len(), rows.len());
        assert_eq!(split.matches.len(), 3);

        // Every row lands on exactly one side, by identity.
        for row in &refs {
            let left = split.matches.iter().filter(|r| std::ptr::eq(**r, *row)).count();
            let right = split.non_matches.iter().filter(|r| std::ptr::eq(**r, *row)).count();
            assert_eq!(left + right, 1);
        }

        // Relative order is kept.
        assert!(std::ptr::eq(split.matches[0], &rows[1]));
        assert!(std::ptr::eq(split.matches[1], &rows[3]));
        assert!(std::ptr::eq(split.matches[2], &rows[4]));
        assert!(std::ptr::eq(split.non_matches[0], &rows[0]));
        assert!(std::ptr::eq(split.non_matches[3], &rows[6]));
    }

    #[test]
    fn test_partition_type_mismatch_reports_row() {
        let rows = [row!["Green", 3, "Apple"], row!["Green", "big", "Apple"]];
        let refs: Vec<&Row> = rows.iter().collect();
        let err = partition(&refs, &Question::new(1, Value::from(3))).unwrap_err();
        match err {
            CartError::AtRow { row, source } => {
                assert_eq!(row, 1);
                assert!(matches!(*source, CartError::TypeMismatch { column: 1, .. }));
            }
            e => panic!("unexpected error {:?}", e),
        }
    }

    #[test]
    fn test_information_gain() {
        let rows = fruit();
        let refs: Vec<&Row> = rows.iter().collect();
        let impurity = gini_impurity(&refs).unwrap();
        let split = partition(&refs, &Question::new(1, Value::from(3))).unwrap();
        let gain = information_gain(&split.matches, &split.non_matches, impurity).unwrap();
        assert!((gain - (38.0 / 49.0 - 5.0 / 7.0 * 0.72)).abs() < 1e-9);
    }

    #[test]
    fn test_information_gain_non_negative() {
        let rows = fruit();
        let refs: Vec<&Row> = rows.iter().collect();
        let impurity = gini_impurity(&refs).unwrap();
        for column in 0..2 {
            for value in distinct_values(&refs, column).unwrap() {
                let split = partition(&refs, &Question::new(column, value)).unwrap();
                if split.is_degenerate() {
                    continue;
                }
                let gain = information_gain(&split.matches, &split.non_matches, impurity).unwrap();
                assert!(gain >= 0.0);
            }
        }
    }

    #[test]
    fn test_information_gain_zero_when_labels_not_separated() {
        let rows = [row!["a", "x"], row!["a", "y"], row!["b", "x"], row!["b", "y"]];
        let refs: Vec<&Row> = rows.iter().collect();
        let impurity = gini_impurity(&refs).unwrap();
        let split = partition(&refs, &Question::new(0, Value::from("a"))).unwrap();
        let gain = information_gain(&split.matches, &split.non_matches, impurity).unwrap();
        assert!(gain.abs() < 1e-12);
        assert_eq!(split_gain(&split.matches, &split.non_matches).unwrap(), 0.0);
    }

    #[test]
    fn test_split_gain_exact_zero_for_same_label_mix() {
        // Both sides hold y0:y1 at 1:2, which rounds to a tiny positive float gain.
        let mut rows = vec![row!["L", "y0"], row!["L", "y1"], row!["L", "y1"]];
        for _ in 0..5 {
            rows.push(row!["R", "y0"]);
            rows.push(row!["R", "y1"]);
            rows.push(row!["R", "y1"]);
        }
        let refs: Vec<&Row> = rows.iter().collect();
        let split = partition(&refs, &Question::new(0, Value::from("L"))).unwrap();
        assert_eq!(split.matches.len(), 3);
        assert_eq!(split_gain(&split.matches, &split.non_matches).unwrap(), 0.0);

        let best = find_best_split(&refs, false).unwrap();
        assert!(best.question.is_none());
        assert_eq!(best.gain, 0.0);
    }

    #[test]
    fn test_split_gain_matches_information_gain() {
        let rows = fruit();
        let refs: Vec<&Row> = rows.iter().collect();
        let impurity = gini_impurity(&refs).unwrap();
        let split = partition(&refs, &Question::new(1, Value::from(3))).unwrap();
        let exact = split_gain(&split.matches, &split.non_matches).unwrap();
        let float = information_gain(&split.matches, &split.non_matches, impurity).unwrap();
        assert!((exact - float).abs() < 1e-12);
    }

    #[test]
    fn test_split_gain_empty_side() {
        let rows = [row!["a", "x"]];
        let refs: Vec<&Row> = rows.iter().collect();
        assert!(matches!(
            split_gain(&refs, &[]),
            Err(CartError::EmptyPartition)
        ));
    }

    #[test]
    fn test_information_gain_empty_side() {
        let rows = [row!["a", "x"]];
        let refs: Vec<&Row> = rows.iter().collect();
        assert!(matches!(information_gain(&refs, &[], 0.5), Err(CartError::EmptyPartition)));
    }

    #[test]
    fn test_distinct_values_first_appearance() {
        let rows = fruit();
        let refs: Vec<&Row> = rows.iter().collect();
        let colors = distinct_values(&refs, 0).unwrap();
        let colors: Vec<String> = colors.iter().map(|v| v.to_string()).collect();
        assert_eq!(colors, vec!["Green", "Yellow", "Red", "Orange"]);
        let diameters = distinct_values(&refs, 1).unwrap();
        assert_eq!(diameters, vec![Value::from(3), Value::from(1), Value::from(7)]);
    }

    #[test]
    fn test_find_best_split_fruit() {
        let rows = fruit();
        let refs: Vec<&Row> = rows.iter().collect();
        let best = find_best_split(&refs, false).unwrap();
        assert_eq!(best.question, Some(Question::new(1, Value::from(3))));
        assert!((best.gain - (38.0 / 49.0 - 5.0 / 7.0 * 0.72)).abs() < 1e-9);
    }

    #[test]
    fn test_find_best_split_later_tie_wins() {
        let rows = [row!["a", "x", "L1"], row!["b", "y", "L2"]];
        let refs: Vec<&Row> = rows.iter().collect();
        let best = find_best_split(&refs, false).unwrap();
        assert!((best.gain - 0.5).abs() < 1e-12);
        assert_eq!(best.question, Some(Question::new(1, Value::from("y"))));
        assert_eq!(find_best_split(&refs, true).unwrap(), best);
    }

    #[test]
    fn test_find_best_split_pure() {
        let rows = [row!["a", 1, "L"], row!["b", 2, "L"]];
        let refs: Vec<&Row> = rows.iter().collect();
        let best = find_best_split(&refs, false).unwrap();
        assert_eq!(best.gain, 0.0);
        assert!(best.question.is_none());
    }

    #[test]
    fn test_find_best_split_parallel_matches_sequential() {
        let rows = fruit();
        let refs: Vec<&Row> = rows.iter().collect();
        assert_eq!(
            find_best_split(&refs, true).unwrap(),
            find_best_split(&refs, false).unwrap()
        );
    }
}
