use crate::constants::{categories, contributors, enrich};
use crate::types::{CategoryName, ContributorHandle};

/// Tunable thresholds and policies applied during enrichment.
///
/// Every derivation is a pure function of (records, `now`, config), so two
/// runs with equal configs and inputs produce identical tables.
#[derive(Clone, Debug)]
pub struct EnrichConfig {
    /// Look-back window (days) for the Active/Inactive classification.
    ///
    /// A record is Active iff `days_since_last_commit` is strictly below
    /// this value; landing exactly on the boundary classifies as Inactive.
    pub activity_window_days: i64,
    /// Look-back window (days) for the `is_active` recency flag.
    ///
    /// Deliberately independent from `activity_window_days`; the survival
    /// views use this shorter horizon while the activity filter uses the
    /// longer one.
    pub recency_window_days: i64,
    /// Owners with strictly more repositories than this count classify as
    /// organizations.
    pub org_threshold: usize,
    /// Categories dropped before any derivation runs.
    pub excluded_categories: Vec<CategoryName>,
    /// Automation handles removed during contributor explosion.
    pub bot_denylist: Vec<ContributorHandle>,
}

impl Default for EnrichConfig {
    fn default() -> Self {
        Self {
            activity_window_days: enrich::DEFAULT_ACTIVITY_WINDOW_DAYS,
            recency_window_days: enrich::DEFAULT_RECENCY_WINDOW_DAYS,
            org_threshold: enrich::DEFAULT_ORG_THRESHOLD,
            excluded_categories: categories::EXCLUDED_CATEGORIES
                .iter()
                .map(|category| category.to_string())
                .collect(),
            bot_denylist: contributors::BOT_DENYLIST
                .iter()
                .map(|handle| handle.to_string())
                .collect(),
        }
    }
}

impl EnrichConfig {
    /// Create a config with the default thresholds and policies.
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the activity classification window.
    pub fn with_activity_window_days(mut self, days: i64) -> Self {
        self.activity_window_days = days;
        self
    }

    /// Override the recency flag window.
    pub fn with_recency_window_days(mut self, days: i64) -> Self {
        self.recency_window_days = days;
        self
    }

    /// Override the organization classification threshold.
    pub fn with_org_threshold(mut self, threshold: usize) -> Self {
        self.org_threshold = threshold;
        self
    }

    /// Replace the excluded-category set.
    pub fn with_excluded_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<CategoryName>,
    {
        self.excluded_categories = categories.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the bot denylist.
    pub fn with_bot_denylist<I, S>(mut self, handles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<ContributorHandle>,
    {
        self.bot_denylist = handles.into_iter().map(Into::into).collect();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_thresholds_match_named_constants() {
        let config = EnrichConfig::default();
        assert_eq!(config.activity_window_days, 365);
        assert_eq!(config.recency_window_days, 180);
        assert_eq!(config.org_threshold, 3);
        assert!(
            config
                .excluded_categories
                .contains(&"Archived / Deprecated".to_string())
        );
        assert!(config.bot_denylist.contains(&"dependabot[bot]".to_string()));
    }

    #[test]
    fn builder_overrides_replace_defaults() {
        let config = EnrichConfig::new()
            .with_activity_window_days(90)
            .with_recency_window_days(30)
            .with_org_threshold(1)
            .with_excluded_categories(["Lists"])
            .with_bot_denylist(["renovate[bot]"]);
        assert_eq!(config.activity_window_days, 90);
        assert_eq!(config.recency_window_days, 30);
        assert_eq!(config.org_threshold, 1);
        assert_eq!(config.excluded_categories, vec!["Lists".to_string()]);
        assert_eq!(config.bot_denylist, vec!["renovate[bot]".to_string()]);
    }
}
