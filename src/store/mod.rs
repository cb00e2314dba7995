mod schema;

use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::models::*;

pub(crate) use schema::keys;

/// Key/value persistence with browser local-storage semantics: every key
/// holds one serialized value that is read whole and overwritten whole.
pub(crate) struct Store {
    conn: Connection,
}

impl Store {
    pub(crate) fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open store: {}", path.display()))?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")
            .context("Failed to set store pragmas")?;
        let mut store = Self { conn };
        store.migrate().context("Store migration failed")?;
        info!(path = %path.display(), keys = store.keys()?.len(), "opened store");
        Ok(store)
    }

    #[cfg(test)]
    pub(crate) fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let mut store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    fn migrate(&mut self) -> Result<()> {
        let has_version_table: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
            [],
            |row| row.get(0),
        )?;

        if !has_version_table {
            self.conn.execute_batch(schema::SCHEMA_V1)?;
            self.conn.execute(
                "INSERT INTO schema_version (version) VALUES (?1)",
                params![schema::CURRENT_VERSION],
            )?;
            return Ok(());
        }

        let current: i32 = self
            .conn
            .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
                row.get(0)
            })
            .optional()?
            .unwrap_or(0);

        for &(from_version, sql) in schema::MIGRATIONS {
            if current <= from_version {
                self.conn.execute_batch(sql)?;
            }
        }

        if current < schema::CURRENT_VERSION {
            self.conn.execute(
                "UPDATE schema_version SET version = ?1",
                params![schema::CURRENT_VERSION],
            )?;
        }

        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn schema_version(&self) -> Result<i32> {
        Ok(self
            .conn
            .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
                row.get(0)
            })?)
    }

    // ── Raw items ─────────────────────────────────────────────

    pub(crate) fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self
            .conn
            .query_row(
                "SELECT value FROM storage WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?)
    }

    pub(crate) fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO storage (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = ?2, updated_at = ?3",
            params![key, value, chrono::Utc::now().to_rfc3339()],
        )?;
        debug!(key, bytes = value.len(), "stored item");
        Ok(())
    }

    pub(crate) fn remove_item(&self, key: &str) -> Result<bool> {
        let removed = self
            .conn
            .execute("DELETE FROM storage WHERE key = ?1", params![key])?;
        Ok(removed > 0)
    }

    pub(crate) fn keys(&self) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare("SELECT key FROM storage ORDER BY key")?;
        let rows = stmt.query_map([], |row| row.get(0))?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    // ── JSON values ───────────────────────────────────────────

    /// Read a JSON value, falling back to `T::default()` when the key is unset.
    pub(crate) fn load_json<T: DeserializeOwned + Default>(&self, key: &str) -> Result<T> {
        match self.get_item(key)? {
            Some(raw) => serde_json::from_str(&raw)
                .with_context(|| format!("Stored value for '{key}' is not valid")),
            None => Ok(T::default()),
        }
    }

    pub(crate) fn save_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let raw = serde_json::to_string(value)
            .with_context(|| format!("Failed to serialize '{key}'"))?;
        self.set_item(key, &raw)
    }

    // ── Transactions ──────────────────────────────────────────

    pub(crate) fn transactions(&self) -> Result<Vec<Transaction>> {
        self.load_json(keys::TRANSACTIONS)
    }

    pub(crate) fn save_transactions(&self, txns: &[Transaction]) -> Result<()> {
        self.save_json(keys::TRANSACTIONS, txns)
    }

    pub(crate) fn add_transaction(&self, txn: Transaction) -> Result<usize> {
        let mut txns = self.transactions()?;
        txns.push(txn);
        self.save_transactions(&txns)?;
        Ok(txns.len())
    }

    /// Append many transactions in one write. Returns the number appended.
    pub(crate) fn append_transactions(&self, new: Vec<Transaction>) -> Result<usize> {
        let count = new.len();
        if count == 0 {
            return Ok(0);
        }
        let mut txns = self.transactions()?;
        txns.extend(new);
        self.save_transactions(&txns)?;
        info!(count, "appended transactions");
        Ok(count)
    }

    pub(crate) fn delete_transaction(&self, index: usize) -> Result<Option<Transaction>> {
        let mut txns = self.transactions()?;
        if index >= txns.len() {
            return Ok(None);
        }
        let removed = txns.remove(index);
        self.save_transactions(&txns)?;
        Ok(Some(removed))
    }

    // ── Budgets ───────────────────────────────────────────────

    pub(crate) fn budget_plan(&self) -> Result<BudgetPlan> {
        self.load_json(keys::BUDGETS)
    }

    pub(crate) fn save_budget_plan(&self, plan: &BudgetPlan) -> Result<()> {
        self.save_json(keys::BUDGETS, plan)
    }

    // ── Goals ─────────────────────────────────────────────────

    pub(crate) fn goals(&self) -> Result<Vec<SavingsGoal>> {
        self.load_json(keys::GOALS)
    }

    pub(crate) fn save_goals(&self, goals: &[SavingsGoal]) -> Result<()> {
        self.save_json(keys::GOALS, goals)
    }

    /// Insert a goal, or replace the target of one with the same name.
    pub(crate) fn upsert_goal(&self, goal: SavingsGoal) -> Result<()> {
        let mut goals = self.goals()?;
        let lower = goal.name.to_lowercase();
        match goals.iter_mut().find(|g| g.name.to_lowercase() == lower) {
            Some(existing) => existing.target = goal.target,
            None => goals.push(goal),
        }
        self.save_goals(&goals)
    }

    pub(crate) fn delete_goal(&self, index: usize) -> Result<Option<SavingsGoal>> {
        let mut goals = self.goals()?;
        if index >= goals.len() {
            return Ok(None);
        }
        let removed = goals.remove(index);
        self.save_goals(&goals)?;
        Ok(Some(removed))
    }

    // ── Red zone ──────────────────────────────────────────────

    /// Spending threshold; zero when unset or not a number.
    pub(crate) fn red_zone_threshold(&self) -> Result<Decimal> {
        let raw = self.get_item(keys::RED_ZONE_THRESHOLD)?;
        let value = raw.as_deref().and_then(parse_number);
        if raw.is_some() && value.is_none() {
            warn!(raw = ?raw, "ignoring non-numeric red zone threshold");
        }
        Ok(value.unwrap_or(Decimal::ZERO))
    }

    pub(crate) fn set_red_zone_threshold(&self, input: &str) -> Result<Decimal> {
        let value = parse_number(input).unwrap_or(Decimal::ZERO);
        self.set_item(keys::RED_ZONE_THRESHOLD, &value.normalize().to_string())?;
        Ok(value)
    }

    // ── Incomes ───────────────────────────────────────────────

    pub(crate) fn monthly_incomes(&self) -> Result<MonthlyIncomes> {
        self.load_json(keys::MONTHLY_INCOMES)
    }

    pub(crate) fn save_monthly_incomes(&self, incomes: &MonthlyIncomes) -> Result<()> {
        self.save_json(keys::MONTHLY_INCOMES, incomes)
    }

    // ── Profile & settings ────────────────────────────────────

    pub(crate) fn profile(&self) -> Result<Profile> {
        self.load_json(keys::PROFILE)
    }

    /// Validate then persist the profile.
    pub(crate) fn save_profile(&self, profile: &Profile) -> Result<()> {
        profile.validate()?;
        self.save_json(keys::PROFILE, profile)
    }

    pub(crate) fn settings(&self) -> Result<Settings> {
        self.load_json(keys::SETTINGS)
    }

    pub(crate) fn save_settings(&self, settings: &Settings) -> Result<()> {
        self.save_json(keys::SETTINGS, settings)
    }

    // ── Session ───────────────────────────────────────────────

    pub(crate) fn token(&self) -> Result<Option<String>> {
        self.get_item(keys::TOKEN)
    }

    pub(crate) fn save_token(&self, token: &str) -> Result<()> {
        self.set_item(keys::TOKEN, token)
    }

    pub(crate) fn clear_token(&self) -> Result<bool> {
        self.remove_item(keys::TOKEN)
    }
}
