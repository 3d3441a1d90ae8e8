use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum InsightsError {
    #[error("dataset must contain '{product_column}' and '{review_column}' columns (missing: {})", .missing.join(", "))]
    MissingColumns {
        product_column: String,
        review_column: String,
        missing: Vec<String>,
    },
}

#[derive(Error, Debug)]
pub enum TableError {
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error("line {line}: expected at most {expected} fields, found {found}")]
    TooManyFields {
        line: u64,
        expected: usize,
        found: usize,
    },
}

/// Outcome of one analysis run, as reported to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Success,
    MissingColumns,
    NoFileProvided,
}

impl InsightsError {
    pub fn status(&self) -> RunStatus {
        match self {
            Self::MissingColumns { .. } => RunStatus::MissingColumns,
        }
    }
}

impl RunStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::MissingColumns => "missingColumns",
            Self::NoFileProvided => "noFileProvided",
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Self::MissingColumns)
    }
}
