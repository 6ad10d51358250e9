use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::types::RepoSlug;

/// Error type for catalog loading, validation, and join-input failures.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The required catalog file could not be located.
    #[error("data source '{}' is missing", .path.display())]
    DataSourceMissing {
        /// Path that was probed.
        path: PathBuf,
    },
    /// A required column is absent from the catalog header row.
    #[error("required column '{column}' is missing from '{}'", .path.display())]
    MissingColumn {
        /// Header name that was expected.
        column: String,
        /// File whose header row was inspected.
        path: PathBuf,
    },
    /// A date cell failed to parse; the whole load is rejected.
    #[error("row {row}: cannot parse {column} date '{value}'")]
    DateParse {
        /// 1-based file row (header is row 1).
        row: usize,
        /// Column the offending cell belongs to.
        column: String,
        /// Raw cell content.
        value: String,
    },
    /// A non-date cell failed to parse into its typed field.
    #[error("row {row}: cannot parse {column} value '{value}'")]
    FieldParse {
        /// 1-based file row (header is row 1).
        row: usize,
        /// Column the offending cell belongs to.
        column: String,
        /// Raw cell content.
        value: String,
    },
    /// Two rows share a repository slug; slugs are the dataset key.
    #[error("row {row}: duplicate repository '{slug}'")]
    DuplicateRepository {
        /// 1-based file row of the second occurrence.
        row: usize,
        /// Slug that appeared more than once.
        slug: RepoSlug,
    },
    /// The optional contributor-statistics file is absent.
    ///
    /// Non-fatal at the pipeline level: orchestration downgrades this to
    /// the stars-based ranking fallback.
    #[error("contributor statistics '{}' is missing", .path.display())]
    JoinInputMissing {
        /// Path that was probed.
        path: PathBuf,
    },
    /// Underlying filesystem failure.
    #[error(transparent)]
    Io(#[from] io::Error),
    /// Malformed CSV content (ragged rows, encoding failures).
    #[error("malformed csv: {0}")]
    Csv(#[from] csv::Error),
}
