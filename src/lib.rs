#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

/// Aggregate summaries consumed by dashboard views.
pub mod aggregate;
/// Enriched-table memoization keyed by input identity.
pub mod cache;
/// Enrichment thresholds and policies.
pub mod config;
/// Centralized constants used across the loader, enrichment, and views.
pub mod constants;
/// Record and table types flowing through the pipeline.
pub mod data;
/// Category exclusion and the derivation pass.
pub mod enrich;
/// Standards and contributor explosions.
pub mod explode;
/// Pure filter predicates over the enriched table.
pub mod filter;
mod hash;
/// CSV loading and schema validation.
pub mod loader;
/// End-to-end pipeline orchestration.
pub mod pipeline;
/// Contributor-statistics join and ranking-source signaling.
pub mod stats;
/// Shared type aliases.
pub mod types;
/// Cell parsing helpers.
pub mod utils;

mod errors;

pub use aggregate::{
    CategoryGrowth, ContributorLineStats, ContributorRanking, DatasetSummary, GrowthPoint,
    LabelCount, OrgRanking, YearSurvival,
};
pub use cache::TableCache;
pub use config::EnrichConfig;
pub use data::{
    ActivityStatus, ContributorContribution, ContributorStatsRecord, EnrichedRepoRecord,
    EnrichedTable, OwnerType, RawRepoRecord, StandardUsage,
};
pub use enrich::{enrich, exclude_categories};
pub use errors::PipelineError;
pub use explode::{explode_contributors, explode_standards};
pub use filter::RepoFilter;
pub use loader::{load_contributor_stats, load_repo_records};
pub use pipeline::{PipelineOutput, run};
pub use stats::{
    ContributionJoin, ContributorStatsTable, JoinedContribution, RankingSource,
    join_contributor_stats,
};
pub use types::{
    CategoryName, ContributorHandle, LanguageName, OrgName, RepoSlug, StandardName,
    SubcategoryName,
};
