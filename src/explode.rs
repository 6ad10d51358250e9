//! Multi-valued field explosions: one output row per (record, value) pair.

use std::collections::HashSet;

use crate::data::{ContributorContribution, EnrichedTable, StandardUsage};
use crate::types::ContributorHandle;
use crate::utils::split_delimited_list;

/// Produce one [`StandardUsage`] row per declared standard.
///
/// Records without standards contribute zero rows; they are excluded, not
/// zero-filled, so this view only supports standard-level aggregation.
pub fn explode_standards(table: &EnrichedTable) -> Vec<StandardUsage> {
    let mut usages = Vec::new();
    for record in &table.records {
        for standard in &record.standards_list {
            usages.push(StandardUsage {
                standard: standard.clone(),
                repository: record.repository.clone(),
                org: record.org.clone(),
                category: record.category.clone(),
                stars: record.stars,
                activity_status: record.activity_status,
            });
        }
    }
    usages
}

/// Produce one [`ContributorContribution`] row per listed contributor,
/// dropping denylisted automation accounts.
///
/// Handles are trimmed before comparison and storage. The denylist match is
/// case-insensitive and exact: a handle that merely contains a denylisted
/// name (for example `notdependabot`) is kept.
pub fn explode_contributors(
    table: &EnrichedTable,
    bot_denylist: &[ContributorHandle],
) -> Vec<ContributorContribution> {
    let denylist: HashSet<String> = bot_denylist
        .iter()
        .map(|handle| handle.to_lowercase())
        .collect();

    let mut contributions = Vec::new();
    for record in &table.records {
        let Some(cell) = record.top_contributors.as_deref() else {
            continue;
        };
        for handle in split_delimited_list(cell) {
            if denylist.contains(&handle.to_lowercase()) {
                continue;
            }
            contributions.push(ContributorContribution {
                contributor: handle,
                repository: record.repository.clone(),
                stars: record.stars,
                category: record.category.clone(),
                org: record.org.clone(),
                activity_status: record.activity_status,
                standard: record.standard.clone(),
            });
        }
    }
    contributions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{ActivityStatus, EnrichedRepoRecord, OwnerType};
    use chrono::NaiveDate;

    fn enriched(slug: &str, contributors: Option<&str>, standards: &[&str]) -> EnrichedRepoRecord {
        let date = NaiveDate::from_ymd_opt(2023, 6, 1).unwrap();
        EnrichedRepoRecord {
            repository: slug.to_string(),
            category: "NLP".to_string(),
            subcategory: String::new(),
            language: "Python".to_string(),
            stars: 5,
            created: date,
            last_commit: date,
            top_contributors: contributors.map(str::to_string),
            standard: None,
            org: slug.split('/').next().unwrap_or(slug).to_string(),
            days_since_last_commit: 0,
            activity_status: ActivityStatus::Active,
            lifespan_days: 0,
            start_year: 2023,
            is_active: true,
            standards_list: standards.iter().map(|s| s.to_string()).collect(),
            has_standard: !standards.is_empty(),
            contributor_count: 0,
            is_organization: false,
            owner_type: OwnerType::Individual,
        }
    }

    #[test]
    fn standards_row_count_matches_list_lengths() {
        let table = EnrichedTable {
            records: vec![
                enriched("a/x", None, &["FHIR", "OMOP"]),
                enriched("b/y", None, &[]),
                enriched("c/z", None, &["DICOM"]),
            ],
        };
        let usages = explode_standards(&table);
        assert_eq!(usages.len(), 3);
        assert!(usages.iter().all(|usage| usage.repository != "b/y"));
    }

    #[test]
    fn bot_filtering_is_case_insensitive_and_exact() {
        let table = EnrichedTable {
            records: vec![enriched(
                "a/x",
                Some("alice, Dependabot[bot], notdependabot, DEPENDABOT"),
                &[],
            )],
        };
        let denylist = vec!["dependabot".to_string(), "dependabot[bot]".to_string()];
        let contributions = explode_contributors(&table, &denylist);
        let handles: Vec<&str> = contributions
            .iter()
            .map(|c| c.contributor.as_str())
            .collect();
        assert_eq!(handles, vec!["alice", "notdependabot"]);
    }

    #[test]
    fn records_without_contributors_contribute_no_rows() {
        let table = EnrichedTable {
            records: vec![enriched("a/x", None, &[]), enriched("b/y", Some("  "), &[])],
        };
        assert!(explode_contributors(&table, &[]).is_empty());
    }
}
