//! Left-join of contribution rows with the optional per-contributor line
//! statistics, plus the explicit fallback signal for rankings.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::data::{ActivityStatus, ContributorContribution, ContributorStatsRecord};
use crate::types::{CategoryName, ContributorHandle, OrgName, RepoSlug};

/// Which metric downstream contributor rankings should rank by.
///
/// Surfaced explicitly so the UI can disclose the active mode instead of
/// inferring it from zeroed columns.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum RankingSource {
    /// Line/commit statistics were joined from the external table.
    CommitStats,
    /// No statistics table was available; rank by repository stars.
    Stars,
}

/// Contributor statistics indexed by handle.
#[derive(Clone, Debug, Default)]
pub struct ContributorStatsTable {
    by_handle: HashMap<ContributorHandle, ContributorStatsRecord>,
}

impl ContributorStatsTable {
    /// Index a list of statistics records by handle. Later duplicates of a
    /// handle replace earlier ones.
    pub fn from_records(records: Vec<ContributorStatsRecord>) -> Self {
        let mut by_handle = HashMap::with_capacity(records.len());
        for record in records {
            by_handle.insert(record.username.clone(), record);
        }
        Self { by_handle }
    }

    /// Look up statistics for a handle (exact match).
    pub fn get(&self, handle: &str) -> Option<&ContributorStatsRecord> {
        self.by_handle.get(handle)
    }

    /// Number of indexed contributors.
    pub fn len(&self) -> usize {
        self.by_handle.len()
    }

    /// Returns `true` when no statistics are indexed.
    pub fn is_empty(&self) -> bool {
        self.by_handle.is_empty()
    }
}

/// A contribution row with line statistics attached.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct JoinedContribution {
    /// Trimmed contributor handle.
    pub contributor: ContributorHandle,
    /// Repository the contribution belongs to.
    pub repository: RepoSlug,
    /// Star count of the repository.
    pub stars: u64,
    /// Category of the repository.
    pub category: CategoryName,
    /// Owner of the repository.
    pub org: OrgName,
    /// Activity classification of the repository.
    pub activity_status: ActivityStatus,
    /// Raw standards cell of the repository.
    pub standard: Option<String>,
    /// Total lines added; zero when the handle has no statistics row.
    pub total_additions: i64,
    /// Total commits; zero when the handle has no statistics row.
    pub total_commits: i64,
    /// Net line delta; zero when the handle has no statistics row.
    pub total_net_lines: i64,
}

/// Join result: every contribution row, plus the active ranking source.
#[derive(Clone, Debug)]
pub struct ContributionJoin {
    /// Joined rows, one per input contribution. Never fewer than the
    /// input: unmatched handles are zero-filled, not dropped.
    pub rows: Vec<JoinedContribution>,
    /// Metric downstream rankings should use.
    pub ranking: RankingSource,
}

/// Left-join contributions with statistics by exact handle match.
///
/// With no statistics table the rows are zero-filled and the ranking source
/// flips to the stars fallback.
pub fn join_contributor_stats(
    contributions: &[ContributorContribution],
    stats: Option<&ContributorStatsTable>,
) -> ContributionJoin {
    let ranking = match stats {
        Some(_) => RankingSource::CommitStats,
        None => RankingSource::Stars,
    };
    let rows = contributions
        .iter()
        .map(|contribution| {
            let found = stats.and_then(|table| table.get(&contribution.contributor));
            JoinedContribution {
                contributor: contribution.contributor.clone(),
                repository: contribution.repository.clone(),
                stars: contribution.stars,
                category: contribution.category.clone(),
                org: contribution.org.clone(),
                activity_status: contribution.activity_status,
                standard: contribution.standard.clone(),
                total_additions: found.map(|s| s.total_additions).unwrap_or(0),
                total_commits: found.map(|s| s.total_commits).unwrap_or(0),
                total_net_lines: found.map(|s| s.total_net_lines).unwrap_or(0),
            }
        })
        .collect();
    ContributionJoin { rows, ranking }
}
