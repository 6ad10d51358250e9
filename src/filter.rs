//! Pure filter predicates over the enriched table.
//!
//! Filters are views: they borrow the base table and never mutate it, so
//! repeated application with different predicates stays consistent, and
//! independent predicates commute.

use std::collections::HashSet;

use crate::data::{ActivityStatus, EnrichedRepoRecord, EnrichedTable};
use crate::types::{CategoryName, StandardName};

/// Composable predicate set matching the dashboard's sidebar filters.
#[derive(Clone, Debug, Default)]
pub struct RepoFilter {
    categories: Option<HashSet<CategoryName>>,
    activity: Option<ActivityStatus>,
    min_stars: Option<u64>,
    standard: Option<StandardName>,
}

impl RepoFilter {
    /// Create a filter that matches every record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep only records in the given categories.
    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<CategoryName>,
    {
        self.categories = Some(categories.into_iter().map(Into::into).collect());
        self
    }

    /// Keep only records with the given activity classification.
    pub fn with_activity(mut self, status: ActivityStatus) -> Self {
        self.activity = Some(status);
        self
    }

    /// Keep only records with at least `stars` stars.
    pub fn with_min_stars(mut self, stars: u64) -> Self {
        self.min_stars = Some(stars);
        self
    }

    /// Keep only records declaring the given standard.
    pub fn with_standard(mut self, standard: impl Into<StandardName>) -> Self {
        self.standard = Some(standard.into());
        self
    }

    /// Whether a single record passes every configured predicate.
    pub fn matches(&self, record: &EnrichedRepoRecord) -> bool {
        if let Some(categories) = &self.categories
            && !categories.contains(&record.category)
        {
            return false;
        }
        if let Some(activity) = self.activity
            && record.activity_status != activity
        {
            return false;
        }
        if let Some(min_stars) = self.min_stars
            && record.stars < min_stars
        {
            return false;
        }
        if let Some(standard) = &self.standard
            && !record.standards_list.iter().any(|name| name == standard)
        {
            return false;
        }
        true
    }

    /// Borrowed view of every record passing the filter, in table order.
    pub fn apply<'a>(&self, table: &'a EnrichedTable) -> Vec<&'a EnrichedRepoRecord> {
        table
            .records
            .iter()
            .filter(|record| self.matches(record))
            .collect()
    }
}
