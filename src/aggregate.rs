//! Aggregate summaries consumed directly by dashboard views.
//!
//! Every function here is a pure fold over borrowed rows with a
//! deterministic output order (count descending, then label ascending),
//! so repeated renders of the same table draw identical charts.

use std::collections::HashSet;

use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::data::{ActivityStatus, ContributorContribution, EnrichedRepoRecord, StandardUsage};
use crate::stats::JoinedContribution;
use crate::types::{CategoryName, ContributorHandle, OrgName, RepoSlug};

/// Headline metrics for the dashboard overview row.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct DatasetSummary {
    /// Number of repositories in the (possibly filtered) view.
    pub repositories: usize,
    /// Sum of stars across the view.
    pub total_stars: u64,
    /// Repositories classified Active.
    pub active_repositories: usize,
    /// Distinct owners across the view.
    pub organizations: usize,
}

/// A label with its repository count, used for category/language/standard
/// breakdowns.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct LabelCount {
    /// Category, language, or standard name.
    pub label: String,
    /// Number of repositories carrying the label.
    pub count: usize,
}

/// Per-contributor ranking entry over contribution rows.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContributorRanking {
    /// Contributor handle.
    pub contributor: ContributorHandle,
    /// Stars summed over the contributor's repositories.
    pub total_stars: u64,
    /// Number of repositories the contributor appears in.
    pub repositories: usize,
}

/// Per-contributor line statistics aggregated over contribution rows.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContributorLineStats {
    /// Contributor handle.
    pub contributor: ContributorHandle,
    /// Total lines added (from the external statistics table).
    pub total_additions: i64,
    /// Total commits (from the external statistics table).
    pub total_commits: i64,
    /// Net line delta (from the external statistics table).
    pub total_net_lines: i64,
    /// Number of repositories the contributor appears in.
    pub repositories: usize,
}

/// Per-owner ranking entry.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrgRanking {
    /// Owner identifier.
    pub org: OrgName,
    /// Stars summed over the owner's repositories.
    pub total_stars: u64,
    /// Number of repositories the owner holds.
    pub repositories: usize,
}

/// Active-versus-total counts for one start year.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct YearSurvival {
    /// Calendar year repositories were created in.
    pub start_year: i32,
    /// Repositories from that year still inside the recency window.
    pub active: usize,
    /// All repositories from that year.
    pub total: usize,
    /// `active / total` in percent.
    pub survival_rate: f64,
}

/// Running repository count for one category, ordered by creation date.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryGrowth {
    /// Category the curve belongs to.
    pub category: CategoryName,
    /// One point per repository, in creation order.
    pub points: Vec<GrowthPoint>,
}

/// One point on a cumulative growth curve.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct GrowthPoint {
    /// Creation date of the repository that produced this point.
    pub date: NaiveDate,
    /// Running count of the category's repositories up to `date`.
    pub cumulative: usize,
}

/// Compute the overview metric row for any view of the table.
pub fn dataset_summary<'a, I>(records: I) -> DatasetSummary
where
    I: IntoIterator<Item = &'a EnrichedRepoRecord>,
{
    let mut repositories = 0;
    let mut total_stars = 0u64;
    let mut active_repositories = 0;
    let mut orgs: HashSet<&OrgName> = HashSet::new();
    for record in records {
        repositories += 1;
        total_stars += record.stars;
        if record.activity_status == ActivityStatus::Active {
            active_repositories += 1;
        }
        orgs.insert(&record.org);
    }
    DatasetSummary {
        repositories,
        total_stars,
        active_repositories,
        organizations: orgs.len(),
    }
}

/// Repository counts per category, count descending then name ascending.
pub fn category_counts<'a, I>(records: I) -> Vec<LabelCount>
where
    I: IntoIterator<Item = &'a EnrichedRepoRecord>,
{
    label_counts(records, |record| Some(record.category.clone()))
}

/// Repository counts per primary language, count descending then name
/// ascending. Records with a blank language are skipped.
pub fn language_counts<'a, I>(records: I) -> Vec<LabelCount>
where
    I: IntoIterator<Item = &'a EnrichedRepoRecord>,
{
    label_counts(records, |record| {
        if record.language.is_empty() {
            None
        } else {
            Some(record.language.clone())
        }
    })
}

fn label_counts<'a, I, F>(records: I, label_of: F) -> Vec<LabelCount>
where
    I: IntoIterator<Item = &'a EnrichedRepoRecord>,
    F: Fn(&EnrichedRepoRecord) -> Option<String>,
{
    let mut counts: IndexMap<String, usize> = IndexMap::new();
    for record in records {
        if let Some(label) = label_of(record) {
            *counts.entry(label).or_insert(0) += 1;
        }
    }
    sorted_label_counts(counts)
}

/// Repositories per declared standard over the exploded view.
pub fn standard_adoption(usages: &[StandardUsage]) -> Vec<LabelCount> {
    let mut counts: IndexMap<String, usize> = IndexMap::new();
    for usage in usages {
        *counts.entry(usage.standard.clone()).or_insert(0) += 1;
    }
    sorted_label_counts(counts)
}

fn sorted_label_counts(counts: IndexMap<String, usize>) -> Vec<LabelCount> {
    let mut entries: Vec<LabelCount> = counts
        .into_iter()
        .map(|(label, count)| LabelCount { label, count })
        .collect();
    entries.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.label.cmp(&b.label)));
    entries
}

/// Rank contributors by total stars across their repositories.
pub fn rank_contributors_by_stars(
    contributions: &[ContributorContribution],
) -> Vec<ContributorRanking> {
    let mut rankings = accumulate_contributors(contributions);
    rankings.sort_by(|a, b| {
        b.total_stars
            .cmp(&a.total_stars)
            .then_with(|| a.contributor.cmp(&b.contributor))
    });
    rankings
}

/// Rank contributors by the number of repositories they appear in.
pub fn rank_contributors_by_repos(
    contributions: &[ContributorContribution],
) -> Vec<ContributorRanking> {
    let mut rankings = accumulate_contributors(contributions);
    rankings.sort_by(|a, b| {
        b.repositories
            .cmp(&a.repositories)
            .then_with(|| a.contributor.cmp(&b.contributor))
    });
    rankings
}

fn accumulate_contributors(
    contributions: &[ContributorContribution],
) -> Vec<ContributorRanking> {
    let mut by_handle: IndexMap<&ContributorHandle, (u64, usize)> = IndexMap::new();
    for contribution in contributions {
        let entry = by_handle.entry(&contribution.contributor).or_insert((0, 0));
        entry.0 += contribution.stars;
        entry.1 += 1;
    }
    by_handle
        .into_iter()
        .map(|(contributor, (total_stars, repositories))| ContributorRanking {
            contributor: contributor.clone(),
            total_stars,
            repositories,
        })
        .collect()
}

/// Rank contributors by their external line statistics (lines added,
/// descending).
///
/// The statistics are per-contributor totals repeated on every joined row,
/// so they are taken once per handle rather than summed across rows.
pub fn rank_contributors_by_line_stats(rows: &[JoinedContribution]) -> Vec<ContributorLineStats> {
    let mut by_handle: IndexMap<&ContributorHandle, ContributorLineStats> = IndexMap::new();
    for row in rows {
        let entry = by_handle
            .entry(&row.contributor)
            .or_insert_with(|| ContributorLineStats {
                contributor: row.contributor.clone(),
                total_additions: row.total_additions,
                total_commits: row.total_commits,
                total_net_lines: row.total_net_lines,
                repositories: 0,
            });
        entry.repositories += 1;
    }
    let mut rankings: Vec<ContributorLineStats> = by_handle.into_values().collect();
    rankings.sort_by(|a, b| {
        b.total_additions
            .cmp(&a.total_additions)
            .then_with(|| a.contributor.cmp(&b.contributor))
    });
    rankings
}

/// Rank owners by total stars.
pub fn rank_orgs_by_stars<'a, I>(records: I) -> Vec<OrgRanking>
where
    I: IntoIterator<Item = &'a EnrichedRepoRecord>,
{
    let mut rankings = accumulate_orgs(records);
    rankings.sort_by(|a, b| {
        b.total_stars
            .cmp(&a.total_stars)
            .then_with(|| a.org.cmp(&b.org))
    });
    rankings
}

/// Rank owners by repository count.
pub fn rank_orgs_by_repos<'a, I>(records: I) -> Vec<OrgRanking>
where
    I: IntoIterator<Item = &'a EnrichedRepoRecord>,
{
    let mut rankings = accumulate_orgs(records);
    rankings.sort_by(|a, b| {
        b.repositories
            .cmp(&a.repositories)
            .then_with(|| a.org.cmp(&b.org))
    });
    rankings
}

fn accumulate_orgs<'a, I>(records: I) -> Vec<OrgRanking>
where
    I: IntoIterator<Item = &'a EnrichedRepoRecord>,
{
    let mut by_org: IndexMap<&OrgName, (u64, usize)> = IndexMap::new();
    for record in records {
        let entry = by_org.entry(&record.org).or_insert((0, 0));
        entry.0 += record.stars;
        entry.1 += 1;
    }
    by_org
        .into_iter()
        .map(|(org, (total_stars, repositories))| OrgRanking {
            org: org.clone(),
            total_stars,
            repositories,
        })
        .collect()
}

/// Active-versus-total repository counts per start year, ascending by year.
///
/// "Active" here is the recency flag (`is_active`), not the activity
/// classification; the two windows are configured independently.
pub fn survival_by_year<'a, I>(records: I) -> Vec<YearSurvival>
where
    I: IntoIterator<Item = &'a EnrichedRepoRecord>,
{
    let mut by_year: IndexMap<i32, (usize, usize)> = IndexMap::new();
    for record in records {
        let entry = by_year.entry(record.start_year).or_insert((0, 0));
        if record.is_active {
            entry.0 += 1;
        }
        entry.1 += 1;
    }
    let mut years: Vec<YearSurvival> = by_year
        .into_iter()
        .map(|(start_year, (active, total))| YearSurvival {
            start_year,
            active,
            total,
            survival_rate: if total == 0 {
                0.0
            } else {
                active as f64 / total as f64 * 100.0
            },
        })
        .collect();
    years.sort_by_key(|entry| entry.start_year);
    years
}

/// Cumulative repository-count curve per category, ordered by creation
/// date (ties broken by slug so reruns emit identical curves).
pub fn cumulative_growth<'a, I>(records: I) -> Vec<CategoryGrowth>
where
    I: IntoIterator<Item = &'a EnrichedRepoRecord>,
{
    let mut ordered: Vec<(&NaiveDate, &RepoSlug, &CategoryName)> = records
        .into_iter()
        .map(|record| (&record.created, &record.repository, &record.category))
        .collect();
    ordered.sort_by(|a, b| a.0.cmp(b.0).then_with(|| a.1.cmp(b.1)));

    let mut curves: IndexMap<&CategoryName, Vec<GrowthPoint>> = IndexMap::new();
    for (date, _, category) in ordered {
        let points = curves.entry(category).or_default();
        let cumulative = points.len() + 1;
        points.push(GrowthPoint {
            date: *date,
            cumulative,
        });
    }
    curves
        .into_iter()
        .map(|(category, points)| CategoryGrowth {
            category: category.clone(),
            points,
        })
        .collect()
}
