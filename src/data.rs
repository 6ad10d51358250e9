use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub use crate::types::{
    CategoryName, ContributorHandle, LanguageName, OrgName, RepoSlug, StandardName,
    SubcategoryName,
};

/// Commit-recency classification driven by the activity window.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ActivityStatus {
    /// Last commit landed strictly inside the activity window.
    Active,
    /// Last commit is at or beyond the window boundary.
    Inactive,
}

impl ActivityStatus {
    /// Label used by filter widgets and chart legends.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
        }
    }
}

/// Owner classification derived from repository counts per owner.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum OwnerType {
    /// Owner holds strictly more repositories than the org threshold.
    Organization,
    /// Everyone else.
    Individual,
}

impl OwnerType {
    /// Label used by chart legends.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Organization => "Organization",
            Self::Individual => "Individual",
        }
    }
}

/// One catalog row as loaded from the repository CSV, before derivation.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RawRepoRecord {
    /// Slug in `<owner>/<name>` form; unique key of the dataset.
    pub repository: RepoSlug,
    /// Taxonomy category label.
    pub category: CategoryName,
    /// Taxonomy subcategory label.
    pub subcategory: SubcategoryName,
    /// Primary programming language.
    pub language: LanguageName,
    /// Star count; never negative.
    pub stars: u64,
    /// Repository creation date.
    pub created: NaiveDate,
    /// Date of the most recent commit.
    pub last_commit: NaiveDate,
    /// Comma-separated contributor handles, when the catalog lists any.
    pub top_contributors: Option<String>,
    /// Comma-separated standard names, when the catalog lists any.
    pub standard: Option<String>,
}

/// A catalog row plus every derived field the dashboard views consume.
///
/// All derivations are pure functions of the raw row, the post-exclusion
/// owner counts, the reference date, and the configured thresholds.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct EnrichedRepoRecord {
    /// Slug in `<owner>/<name>` form; unique key of the dataset.
    pub repository: RepoSlug,
    /// Taxonomy category label.
    pub category: CategoryName,
    /// Taxonomy subcategory label.
    pub subcategory: SubcategoryName,
    /// Primary programming language.
    pub language: LanguageName,
    /// Star count; never negative.
    pub stars: u64,
    /// Repository creation date.
    pub created: NaiveDate,
    /// Date of the most recent commit.
    pub last_commit: NaiveDate,
    /// Raw contributor cell carried through for downstream display.
    pub top_contributors: Option<String>,
    /// Raw standards cell carried through for downstream display.
    pub standard: Option<String>,
    /// Slug prefix before the first `/` (the whole slug when no slash).
    pub org: OrgName,
    /// Reference date minus `last_commit`, in days.
    ///
    /// Negative for future-dated commits; preserved as-is so stale data
    /// surfaces instead of being clamped away.
    pub days_since_last_commit: i64,
    /// Active/Inactive classification against the activity window.
    pub activity_status: ActivityStatus,
    /// `last_commit` minus `created`, in days. Negative only when the
    /// source dates are inconsistent; preserved, never corrected.
    pub lifespan_days: i64,
    /// Calendar year of `created`.
    pub start_year: i32,
    /// Whether the last commit falls inside the recency window.
    pub is_active: bool,
    /// Trimmed, non-empty standard names parsed from `standard`.
    pub standards_list: Vec<StandardName>,
    /// Whether `standards_list` is non-empty.
    pub has_standard: bool,
    /// Number of contributor handles parsed from `top_contributors`.
    pub contributor_count: usize,
    /// Whether this record's owner holds strictly more repositories than
    /// the org threshold.
    pub is_organization: bool,
    /// Organization/Individual classification from `is_organization`.
    pub owner_type: OwnerType,
}

/// The enriched dataset handed to dashboard views.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct EnrichedTable {
    /// Enriched rows in catalog order.
    pub records: Vec<EnrichedRepoRecord>,
}

impl EnrichedTable {
    /// Number of repositories in the table.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` when the table holds no repositories.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// One (repository, standard) pair from the standards explosion.
///
/// Strictly a standard-level aggregation view; repository-count totals must
/// come from the enriched table, since repositories without standards
/// contribute no rows here.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct StandardUsage {
    /// Declared standard name.
    pub standard: StandardName,
    /// Repository declaring the standard.
    pub repository: RepoSlug,
    /// Owner of the repository.
    pub org: OrgName,
    /// Category of the repository.
    pub category: CategoryName,
    /// Star count of the repository.
    pub stars: u64,
    /// Activity classification of the repository.
    pub activity_status: ActivityStatus,
}

/// One (repository, contributor) pair after bot filtering.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContributorContribution {
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
}

/// Per-contributor line statistics from the optional external table.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContributorStatsRecord {
    /// Contributor handle; join key against contribution rows.
    pub username: ContributorHandle,
    /// Total lines added across tracked repositories.
    pub total_additions: i64,
    /// Total commits across tracked repositories.
    pub total_commits: i64,
    /// Net line delta; may be negative.
    pub total_net_lines: i64,
}
