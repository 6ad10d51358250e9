/// Constants used by CSV schema validation and column lookup.
pub mod schema {
    /// Repository slug column header.
    pub const COL_REPOSITORY: &str = "Repository";
    /// Category column header.
    pub const COL_CATEGORY: &str = "Category";
    /// Subcategory column header.
    pub const COL_SUBCATEGORY: &str = "Subcat";
    /// Primary language column header.
    pub const COL_LANGUAGE: &str = "Language";
    /// Star-count column header.
    pub const COL_STARS: &str = "Stars";
    /// Creation-date column header.
    pub const COL_CREATED: &str = "Created";
    /// Last-commit-date column header.
    pub const COL_LAST_COMMIT: &str = "Last Commit";
    /// Contributor-list column header (optional).
    pub const COL_TOP_CONTRIBUTORS: &str = "Top Contributors";
    /// Standards-list column header (optional).
    pub const COL_STANDARD: &str = "Standard";

    /// Columns that must be present for a catalog load to succeed.
    pub const REQUIRED_COLUMNS: [&str; 5] = [
        COL_REPOSITORY,
        COL_CATEGORY,
        COL_STARS,
        COL_CREATED,
        COL_LAST_COMMIT,
    ];
}

/// Constants used by enrichment derivations.
pub mod enrich {
    /// Look-back window (days) for the Active/Inactive classification.
    pub const DEFAULT_ACTIVITY_WINDOW_DAYS: i64 = 365;
    /// Look-back window (days) for the `is_active` recency flag.
    ///
    /// Intentionally distinct from the activity window; the two
    /// classifications are consumed by different views.
    pub const DEFAULT_RECENCY_WINDOW_DAYS: i64 = 180;
    /// Minimum repository count (exclusive) for an owner to classify as an
    /// organization.
    pub const DEFAULT_ORG_THRESHOLD: usize = 3;
    /// Separator for multi-valued cells (contributors, standards).
    pub const LIST_SEPARATOR: char = ',';
    /// Cell value marking the absence of any declared standard.
    ///
    /// Matched case-insensitively; blank cells mean the same thing.
    pub const NO_STANDARD_SENTINEL: &str = "No Standard";
}

/// Constants used by the category-exclusion pass.
pub mod categories {
    /// Catalog categories that are not actionable software projects.
    pub const EXCLUDED_CATEGORIES: [&str; 5] = [
        "Lists",
        "Tutorials",
        "Specification / Docs",
        "Archived / Deprecated",
        "Educational",
    ];
}

/// Constants used by contributor explosion and bot filtering.
pub mod contributors {
    /// Automation accounts removed from contribution rows.
    ///
    /// Compared case-insensitively as exact handles, never as substrings.
    pub const BOT_DENYLIST: [&str; 3] =
        ["dependabot", "dependabot[bot]", "dependabot-preview[bot]"];
}
