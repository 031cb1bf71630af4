//! Column mapping for benchmark tables

/// Names of the input columns read by the detector
///
/// Output columns keep these names; the derived columns are always
/// `established_worst`, `established_best`, `is_regression`, `pct_change`
/// and `abs_change`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnNames {
    pub date: String,
    pub commit_id: String,
    pub name: String,
    pub params: String,
    pub result: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            date: "date".to_string(),
            commit_id: "commit_id".to_string(),
            name: "name".to_string(),
            params: "params".to_string(),
            result: "result".to_string(),
        }
    }
}

impl ColumnNames {
    pub fn with_date(mut self, column: impl Into<String>) -> Self {
        self.date = column.into();
        self
    }

    pub fn with_commit_id(mut self, column: impl Into<String>) -> Self {
        self.commit_id = column.into();
        self
    }

    pub fn with_name(mut self, column: impl Into<String>) -> Self {
        self.name = column.into();
        self
    }

    pub fn with_params(mut self, column: impl Into<String>) -> Self {
        self.params = column.into();
        self
    }

    pub fn with_result(mut self, column: impl Into<String>) -> Self {
        self.result = column.into();
        self
    }

    /// Input columns in output order
    pub fn inputs(&self) -> [&str; 5] {
        [
            &self.date,
            &self.commit_id,
            &self.name,
            &self.params,
            &self.result,
        ]
    }
}

/// Names of the derived columns, in output order
pub const DERIVED_COLUMNS: [&str; 5] = [
    "established_worst",
    "established_best",
    "is_regression",
    "pct_change",
    "abs_change",
];
