pub(crate) const SCHEMA_V1: &str = r#"
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS storage (
    key         TEXT PRIMARY KEY NOT NULL,
    value       TEXT NOT NULL,
    updated_at  TEXT NOT NULL
);
"#;

pub(crate) const CURRENT_VERSION: i32 = 1;

/// Migrations from version N to N+1.
/// Each entry is (from_version, sql).
pub(crate) const MIGRATIONS: &[(i32, &str)] = &[];

/// Keys the application reads and writes. Values are stored exactly as a
/// browser would keep them in local storage: JSON for structured values,
/// plain text for the threshold and token.
pub(crate) mod keys {
    pub(crate) const TRANSACTIONS: &str = "transactions";
    pub(crate) const BUDGETS: &str = "budgets";
    pub(crate) const GOALS: &str = "goals";
    pub(crate) const RED_ZONE_THRESHOLD: &str = "redZoneThreshold";
    pub(crate) const MONTHLY_INCOMES: &str = "monthlyIncomes";
    pub(crate) const PROFILE: &str = "profile";
    pub(crate) const SETTINGS: &str = "settings";
    pub(crate) const TOKEN: &str = "token";
}
