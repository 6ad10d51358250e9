//! CSV loading and schema validation for the catalog and the optional
//! contributor-statistics table.
//!
//! Loading is all-or-nothing: a single unparseable date or star count
//! rejects the whole file, since silently dropping or zeroing rows would
//! corrupt every downstream recency computation.

use std::collections::HashSet;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::debug;

use crate::constants::schema;
use crate::data::{ContributorStatsRecord, RawRepoRecord};
use crate::errors::PipelineError;
use crate::stats::ContributorStatsTable;
use crate::utils::parse_record_date;

/// Resolved column positions for one catalog file.
struct ColumnLayout {
    repository: usize,
    category: usize,
    subcategory: Option<usize>,
    language: Option<usize>,
    stars: usize,
    created: usize,
    last_commit: usize,
    top_contributors: Option<usize>,
    standard: Option<usize>,
}

impl ColumnLayout {
    fn from_headers(headers: &StringRecord, path: &Path) -> Result<Self, PipelineError> {
        let find = |column: &str| headers.iter().position(|header| header == column);
        let require = |column: &str| {
            find(column).ok_or_else(|| PipelineError::MissingColumn {
                column: column.to_string(),
                path: path.to_path_buf(),
            })
        };
        Ok(Self {
            repository: require(schema::COL_REPOSITORY)?,
            category: require(schema::COL_CATEGORY)?,
            subcategory: find(schema::COL_SUBCATEGORY),
            language: find(schema::COL_LANGUAGE),
            stars: require(schema::COL_STARS)?,
            created: require(schema::COL_CREATED)?,
            last_commit: require(schema::COL_LAST_COMMIT)?,
            top_contributors: find(schema::COL_TOP_CONTRIBUTORS),
            standard: find(schema::COL_STANDARD),
        })
    }
}

/// Load and validate the repository catalog.
///
/// Fails with [`PipelineError::DataSourceMissing`] when `path` does not
/// exist, [`PipelineError::MissingColumn`] when a required header is
/// absent, and [`PipelineError::DateParse`]/[`PipelineError::FieldParse`]
/// naming the offending row when a cell cannot be parsed.
pub fn load_repo_records(path: &Path) -> Result<Vec<RawRepoRecord>, PipelineError> {
    if !path.is_file() {
        return Err(PipelineError::DataSourceMissing {
            path: path.to_path_buf(),
        });
    }
    let mut reader = ReaderBuilder::new().trim(Trim::All).from_path(path)?;
    let layout = ColumnLayout::from_headers(reader.headers()?, path)?;

    let mut records = Vec::new();
    let mut seen_slugs = HashSet::new();
    for (idx, row) in reader.records().enumerate() {
        let row = row?;
        // Header occupies file row 1; data rows start at 2.
        let file_row = idx + 2;
        let record = parse_catalog_row(&row, &layout, file_row)?;
        if !seen_slugs.insert(record.repository.clone()) {
            return Err(PipelineError::DuplicateRepository {
                row: file_row,
                slug: record.repository,
            });
        }
        records.push(record);
    }

    debug!(
        rows = records.len(),
        path = %path.display(),
        "loaded repository catalog"
    );
    Ok(records)
}

fn parse_catalog_row(
    row: &StringRecord,
    layout: &ColumnLayout,
    file_row: usize,
) -> Result<RawRepoRecord, PipelineError> {
    let cell = |idx: usize| row.get(idx).unwrap_or("");
    let optional_cell = |idx: Option<usize>| {
        idx.map(cell)
            .filter(|value| !value.is_empty())
            .map(str::to_string)
    };

    let stars_raw = cell(layout.stars);
    let stars = stars_raw
        .parse::<u64>()
        .map_err(|_| PipelineError::FieldParse {
            row: file_row,
            column: schema::COL_STARS.to_string(),
            value: stars_raw.to_string(),
        })?;

    let date_cell = |idx: usize, column: &str| {
        let raw = cell(idx);
        parse_record_date(raw).ok_or_else(|| PipelineError::DateParse {
            row: file_row,
            column: column.to_string(),
            value: raw.to_string(),
        })
    };

    Ok(RawRepoRecord {
        repository: cell(layout.repository).to_string(),
        category: cell(layout.category).to_string(),
        subcategory: optional_cell(layout.subcategory).unwrap_or_default(),
        language: optional_cell(layout.language).unwrap_or_default(),
        stars,
        created: date_cell(layout.created, schema::COL_CREATED)?,
        last_commit: date_cell(layout.last_commit, schema::COL_LAST_COMMIT)?,
        top_contributors: optional_cell(layout.top_contributors),
        standard: optional_cell(layout.standard),
    })
}

/// Load the optional per-contributor statistics table.
///
/// An absent file yields [`PipelineError::JoinInputMissing`]; the pipeline
/// orchestration downgrades exactly that variant to the stars-based
/// ranking fallback instead of failing the render.
pub fn load_contributor_stats(path: &Path) -> Result<ContributorStatsTable, PipelineError> {
    if !path.is_file() {
        return Err(PipelineError::JoinInputMissing {
            path: path.to_path_buf(),
        });
    }
    let mut reader = ReaderBuilder::new().trim(Trim::All).from_path(path)?;
    let mut records = Vec::new();
    for row in reader.deserialize() {
        let record: ContributorStatsRecord = row?;
        records.push(record);
    }
    debug!(
        rows = records.len(),
        path = %path.display(),
        "loaded contributor statistics"
    );
    Ok(ContributorStatsTable::from_records(records))
}
