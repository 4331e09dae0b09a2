/// Rows carry at least one feature and the label.
pub const MIN_COLUMNS: usize = 2;
/// Indentation added per tree level when rendering.
pub const INDENT: &str = " ";
/// Scale used when turning label counts into percentages.
pub const PERCENT: usize = 100;
