//! Category exclusion and the derivation pass that turns raw catalog rows
//! into the analysis-ready table.

use std::collections::HashMap;

use chrono::{Datelike, Duration, NaiveDate};
use tracing::debug;

use crate::config::EnrichConfig;
use crate::data::{ActivityStatus, EnrichedRepoRecord, EnrichedTable, OwnerType, RawRepoRecord};
use crate::types::{CategoryName, OrgName};
use crate::utils::{org_of, parse_standards, split_delimited_list};

/// Drop records whose category is in the exclusion set.
///
/// Pure and order-preserving; categories absent from the input are no-ops.
pub fn exclude_categories(
    records: Vec<RawRepoRecord>,
    excluded: &[CategoryName],
) -> Vec<RawRepoRecord> {
    let before = records.len();
    let kept: Vec<RawRepoRecord> = records
        .into_iter()
        .filter(|record| !excluded.iter().any(|category| category == &record.category))
        .collect();
    debug!(kept = kept.len(), dropped = before - kept.len(), "category exclusion");
    kept
}

/// Compute every derived field for the given records.
///
/// Pure function of (records, `now`, config): the reference date is always
/// passed in, never read from the system clock, so identical inputs yield
/// an identical table. Owner counting runs over exactly the records given
/// here, so category exclusion must happen before this call.
pub fn enrich(records: Vec<RawRepoRecord>, now: NaiveDate, config: &EnrichConfig) -> EnrichedTable {
    // Owner classification needs the full record set before any per-row
    // mapping: count first, then derive.
    let mut org_counts: HashMap<OrgName, usize> = HashMap::new();
    for record in &records {
        *org_counts
            .entry(org_of(&record.repository).to_string())
            .or_insert(0) += 1;
    }

    let recency_cutoff = now - Duration::days(config.recency_window_days);
    let enriched = records
        .into_iter()
        .map(|record| derive_record(record, now, recency_cutoff, &org_counts, config))
        .collect::<Vec<_>>();

    debug!(rows = enriched.len(), reference = %now, "derivation pass");
    EnrichedTable { records: enriched }
}

fn derive_record(
    record: RawRepoRecord,
    now: NaiveDate,
    recency_cutoff: NaiveDate,
    org_counts: &HashMap<OrgName, usize>,
    config: &EnrichConfig,
) -> EnrichedRepoRecord {
    let org = org_of(&record.repository).to_string();
    let days_since_last_commit = (now - record.last_commit).num_days();
    let activity_status = if days_since_last_commit < config.activity_window_days {
        ActivityStatus::Active
    } else {
        ActivityStatus::Inactive
    };
    let standards_list = parse_standards(record.standard.as_deref());
    let contributor_count = record
        .top_contributors
        .as_deref()
        .map(|cell| split_delimited_list(cell).len())
        .unwrap_or(0);
    let repo_count = org_counts.get(&org).copied().unwrap_or(0);
    let is_organization = repo_count > config.org_threshold;

    EnrichedRepoRecord {
        org,
        days_since_last_commit,
        activity_status,
        lifespan_days: (record.last_commit - record.created).num_days(),
        start_year: record.created.year(),
        is_active: record.last_commit >= recency_cutoff,
        has_standard: !standards_list.is_empty(),
        standards_list,
        contributor_count,
        is_organization,
        owner_type: if is_organization {
            OwnerType::Organization
        } else {
            OwnerType::Individual
        },
        repository: record.repository,
        category: record.category,
        subcategory: record.subcategory,
        language: record.language,
        stars: record.stars,
        created: record.created,
        last_commit: record.last_commit,
        top_contributors: record.top_contributors,
        standard: record.standard,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(slug: &str, category: &str, last_commit: NaiveDate) -> RawRepoRecord {
        RawRepoRecord {
            repository: slug.to_string(),
            category: category.to_string(),
            subcategory: String::new(),
            language: "Python".to_string(),
            stars: 10,
            created: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
            last_commit,
            top_contributors: None,
            standard: None,
        }
    }

    #[test]
    fn exclusion_preserves_order_and_drops_only_listed_categories() {
        let date = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
        let records = vec![
            raw("a/x", "Imaging", date),
            raw("b/y", "Lists", date),
            raw("c/z", "NLP", date),
        ];
        let kept = exclude_categories(records, &["Lists".to_string()]);
        let slugs: Vec<&str> = kept.iter().map(|r| r.repository.as_str()).collect();
        assert_eq!(slugs, vec!["a/x", "c/z"]);
    }

    #[test]
    fn activity_boundary_day_is_inactive() {
        let now = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let config = EnrichConfig::default();
        let boundary = now - Duration::days(config.activity_window_days);
        let inside = now - Duration::days(config.activity_window_days - 1);

        let table = enrich(
            vec![raw("a/on-boundary", "NLP", boundary), raw("b/inside", "NLP", inside)],
            now,
            &config,
        );
        assert_eq!(table.records[0].activity_status, ActivityStatus::Inactive);
        assert_eq!(table.records[1].activity_status, ActivityStatus::Active);
    }

    #[test]
    fn negative_day_counts_are_preserved() {
        let now = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let future = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let mut record = raw("a/future", "NLP", future);
        record.created = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();

        let table = enrich(vec![record], now, &EnrichConfig::default());
        assert_eq!(table.records[0].days_since_last_commit, -60);
        assert!(table.records[0].lifespan_days < 0);
    }

    #[test]
    fn org_threshold_is_strict() {
        let now = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let date = NaiveDate::from_ymd_opt(2023, 12, 1).unwrap();
        let config = EnrichConfig::default().with_org_threshold(2);
        let records = vec![
            raw("two/a", "NLP", date),
            raw("two/b", "NLP", date),
            raw("three/a", "NLP", date),
            raw("three/b", "NLP", date),
            raw("three/c", "NLP", date),
        ];
        let table = enrich(records, now, &config);
        let by_slug = |slug: &str| {
            table
                .records
                .iter()
                .find(|r| r.repository == slug)
                .unwrap()
        };
        // Exactly at the threshold does not qualify.
        assert!(!by_slug("two/a").is_organization);
        assert_eq!(by_slug("two/a").owner_type, OwnerType::Individual);
        assert!(by_slug("three/a").is_organization);
        assert_eq!(by_slug("three/a").owner_type, OwnerType::Organization);
    }

    #[test]
    fn activity_and_recency_windows_diverge() {
        let now = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let config = EnrichConfig::default();
        // 200 days stale: inside the 365-day activity window, outside the
        // 180-day recency window.
        let table = enrich(
            vec![raw("a/mid", "NLP", now - Duration::days(200))],
            now,
            &config,
        );
        assert_eq!(table.records[0].activity_status, ActivityStatus::Active);
        assert!(!table.records[0].is_active);
    }

    #[test]
    fn derivation_is_idempotent_for_fixed_inputs() {
        let now = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let config = EnrichConfig::default();
        let records = vec![
            raw("a/x", "NLP", NaiveDate::from_ymd_opt(2023, 6, 1).unwrap()),
            raw("a/y", "Imaging", NaiveDate::from_ymd_opt(2021, 2, 3).unwrap()),
        ];
        let first = enrich(records.clone(), now, &config);
        let second = enrich(records, now, &config);
        assert_eq!(first, second);
    }
}
