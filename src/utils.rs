//! Cell parsing helpers shared by the loader and enrichment passes.

use chrono::{NaiveDate, NaiveDateTime};

use crate::constants::enrich::{LIST_SEPARATOR, NO_STANDARD_SENTINEL};
use crate::types::StandardName;

/// Split a multi-valued cell into trimmed, non-empty entries.
pub fn split_delimited_list(raw: &str) -> Vec<String> {
    raw.split(LIST_SEPARATOR)
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

/// Owner portion of a repository slug: everything before the first `/`.
///
/// A slug without a slash is treated as its own owner.
pub fn org_of(slug: &str) -> &str {
    slug.split('/').next().unwrap_or(slug)
}

/// Parse a date cell, accepting ISO dates, ISO datetimes (space or `T`
/// separated), and `MM/DD/YYYY`. Returns `None` when no format matches.
pub fn parse_record_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(datetime) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S") {
        return Some(datetime.date());
    }
    if let Ok(datetime) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S") {
        return Some(datetime.date());
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%m/%d/%Y") {
        return Some(date);
    }
    None
}

/// Parse a standards cell into trimmed names, treating blank cells and the
/// no-standard sentinel as an empty list.
pub fn parse_standards(raw: Option<&str>) -> Vec<StandardName> {
    let Some(cell) = raw else {
        return Vec::new();
    };
    let trimmed = cell.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(NO_STANDARD_SENTINEL) {
        return Vec::new();
    }
    split_delimited_list(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_delimited_list_trims_and_drops_empties() {
        assert_eq!(
            split_delimited_list("FHIR, OMOP ,,  DICOM"),
            vec!["FHIR", "OMOP", "DICOM"]
        );
        assert!(split_delimited_list("  ,  , ").is_empty());
    }

    #[test]
    fn org_of_takes_prefix_before_first_slash() {
        assert_eq!(org_of("OHDSI/Achilles"), "OHDSI");
        assert_eq!(org_of("a/b/c"), "a");
        assert_eq!(org_of("standalone"), "standalone");
    }

    #[test]
    fn parse_record_date_accepts_expected_formats() {
        let expected = NaiveDate::from_ymd_opt(2023, 6, 1);
        assert_eq!(parse_record_date("2023-06-01"), expected);
        assert_eq!(parse_record_date("2023-06-01 14:30:00"), expected);
        assert_eq!(parse_record_date("2023-06-01T14:30:00"), expected);
        assert_eq!(parse_record_date("06/01/2023"), expected);
        assert_eq!(parse_record_date(" 2023-06-01 "), expected);
        assert_eq!(parse_record_date("June 1, 2023"), None);
        assert_eq!(parse_record_date(""), None);
    }

    #[test]
    fn parse_standards_handles_sentinel_and_blanks() {
        assert_eq!(parse_standards(Some("FHIR, OMOP")), vec!["FHIR", "OMOP"]);
        assert!(parse_standards(Some("No Standard")).is_empty());
        assert!(parse_standards(Some("no standard")).is_empty());
        assert!(parse_standards(Some("   ")).is_empty());
        assert!(parse_standards(None).is_empty());
    }
}
