//! End-to-end orchestration: one call per render, all fatal errors
//! surfaced at this single boundary.

use std::path::Path;

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::config::EnrichConfig;
use crate::data::{EnrichedTable, StandardUsage};
use crate::enrich::{enrich, exclude_categories};
use crate::errors::PipelineError;
use crate::explode::{explode_contributors, explode_standards};
use crate::loader::{load_contributor_stats, load_repo_records};
use crate::stats::{JoinedContribution, RankingSource, join_contributor_stats};

/// Everything a render pass consumes, produced in one pipeline run.
///
/// Either the whole bundle is built or the run fails; a partially
/// enriched table is never handed to the rendering layer.
#[derive(Clone, Debug)]
pub struct PipelineOutput {
    /// The enriched dataset, post category exclusion.
    pub table: EnrichedTable,
    /// Standards explosion of `table`.
    pub standards: Vec<StandardUsage>,
    /// Bot-filtered contributor explosion of `table`, with statistics
    /// joined (zero-filled when the statistics input was absent).
    pub contributions: Vec<JoinedContribution>,
    /// Metric the contributor rankings should use, reflecting whether the
    /// statistics input was actually joined.
    pub ranking: RankingSource,
}

/// Run the full pipeline against the catalog at `repo_csv`.
///
/// `stats_csv` is the optional contributor-statistics input; an absent
/// file is downgraded to the stars ranking fallback, while any other
/// failure there (or anywhere else) fails the run.
pub fn run(
    repo_csv: &Path,
    stats_csv: Option<&Path>,
    now: NaiveDate,
    config: &EnrichConfig,
) -> Result<PipelineOutput, PipelineError> {
    let raw = load_repo_records(repo_csv)?;
    let kept = exclude_categories(raw, &config.excluded_categories);
    let table = enrich(kept, now, config);

    let standards = explode_standards(&table);
    let contributions = explode_contributors(&table, &config.bot_denylist);

    let stats = match stats_csv {
        Some(path) => match load_contributor_stats(path) {
            Ok(stats) => Some(stats),
            Err(PipelineError::JoinInputMissing { path }) => {
                warn!(path = %path.display(), "contributor statistics missing; ranking by stars");
                None
            }
            Err(error) => return Err(error),
        },
        None => None,
    };
    let join = join_contributor_stats(&contributions, stats.as_ref());

    debug!(
        repositories = table.len(),
        standards = standards.len(),
        contributions = join.rows.len(),
        "pipeline run complete"
    );
    Ok(PipelineOutput {
        table,
        standards,
        contributions: join.rows,
        ranking: join.ranking,
    })
}
