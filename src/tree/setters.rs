use super::tree::DecisionTree;

impl DecisionTree {
    // Set methods for parameters

    /// Set the column names used when rendering the tree.
    /// * `column_names` - One name per dataset column, label included.
    pub fn set_column_names(mut self, column_names: Option<Vec<String>>) -> Self {
        self.cfg.column_names = column_names;
        self
    }

    /// Set whether feature columns are searched in parallel.
    /// * `parallel` - Search every column of a node on the rayon pool.
    pub fn set_parallel(mut self, parallel: bool) -> Self {
        self.cfg.parallel = parallel;
        self
    }

    /// Set whether a summary is logged after fitting.
    /// * `verbose` - Log with `info!` once the tree is built.
    pub fn set_verbose(mut self, verbose: bool) -> Self {
        self.cfg.verbose = verbose;
        self
    }
}
