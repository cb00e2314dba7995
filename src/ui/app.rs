use anyhow::Result;
use rust_decimal::Decimal;

use crate::models::*;
use crate::report::{self, BudgetProgress, GoalProgress, MonthlyData};
use crate::store::Store;
use crate::ui::theme::Palette;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    Dashboard,
    Income,
    Tracking,
    Transactions,
    Settings,
    SignIn,
}

impl Screen {
    pub(crate) fn all() -> &'static [Screen] {
        &[
            Self::Dashboard,
            Self::Income,
            Self::Tracking,
            Self::Transactions,
            Self::Settings,
            Self::SignIn,
        ]
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dashboard => write!(f, "Dashboard"),
            Self::Income => write!(f, "Income"),
            Self::Tracking => write!(f, "Tracking"),
            Self::Transactions => write!(f, "Transactions"),
            Self::Settings => write!(f, "Settings"),
            Self::SignIn => write!(f, "Sign In"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Command,
    Search,
    Editing,
    Confirm,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Command => write!(f, "COMMAND"),
            Self::Search => write!(f, "SEARCH"),
            Self::Editing => write!(f, "EDIT"),
            Self::Confirm => write!(f, "CONFIRM"),
        }
    }
}

/// The form field an `Editing` prompt writes into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EditTarget {
    BudgetLimit(usize),
    BudgetSpent(usize),
    NewCategory,
    IncomeAmount(Month, IncomeSource),
    Threshold,
    ProfileName,
    ProfileEmail,
    SignInEmail,
    SignInPassword,
}

impl EditTarget {
    pub(crate) fn label(&self) -> String {
        match self {
            Self::BudgetLimit(_) => "limit".into(),
            Self::BudgetSpent(_) => "spent".into(),
            Self::NewCategory => "new category".into(),
            Self::IncomeAmount(month, source) => format!("{} {source}", month.short()),
            Self::Threshold => "red zone threshold".into(),
            Self::ProfileName => "name".into(),
            Self::ProfileEmail => "email".into(),
            Self::SignInEmail => "email".into(),
            Self::SignInPassword => "password".into(),
        }
    }

    pub(crate) fn is_secret(&self) -> bool {
        matches!(self, Self::SignInPassword)
    }
}

/// Pending action that requires user confirmation.
#[derive(Debug, Clone)]
pub(crate) enum PendingAction {
    DeleteTransaction { index: usize, description: String },
    DeleteGoal { index: usize, name: String },
    RemoveCategory { index: usize, name: String },
}

/// Rows of the Settings screen, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SettingsField {
    Name,
    Email,
    DarkMode,
    Notifications,
}

impl SettingsField {
    pub(crate) fn all() -> &'static [SettingsField] {
        &[Self::Name, Self::Email, Self::DarkMode, Self::Notifications]
    }
}

/// Rows of the Sign In form; the last one is the submit button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SignInField {
    Email,
    Password,
    Submit,
}

impl SignInField {
    pub(crate) fn all() -> &'static [SignInField] {
        &[Self::Email, Self::Password, Self::Submit]
    }
}

pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) screen: Screen,
    pub(crate) input_mode: InputMode,
    pub(crate) command_input: String,
    pub(crate) search_input: String,
    pub(crate) edit_input: String,
    pub(crate) edit_target: Option<EditTarget>,
    pub(crate) status_message: String,
    pub(crate) show_help: bool,
    pub(crate) api_url: String,

    // Dashboard
    pub(crate) plan: BudgetPlan,
    pub(crate) category_index: usize,

    // Income
    pub(crate) incomes: MonthlyIncomes,
    pub(crate) income_month: usize,
    pub(crate) income_source: usize,

    // Tracking
    pub(crate) transactions: Vec<Transaction>,
    pub(crate) monthly: MonthlyData,
    pub(crate) threshold: Decimal,
    pub(crate) tracking: Vec<BudgetProgress>,
    pub(crate) goals: Vec<SavingsGoal>,
    pub(crate) goal_progress: Vec<GoalProgress>,
    pub(crate) goal_index: usize,

    // Transactions
    pub(crate) transaction_index: usize,
    pub(crate) transaction_scroll: usize,

    // Settings: edited in place, written only on save
    pub(crate) profile: Profile,
    pub(crate) settings: Settings,
    pub(crate) settings_index: usize,

    // Sign in
    pub(crate) sign_in_email: String,
    pub(crate) sign_in_password: String,
    pub(crate) sign_in_index: usize,
    pub(crate) signed_in: bool,

    // Confirmation
    pub(crate) pending_action: Option<PendingAction>,
    pub(crate) confirm_message: String,

    // Layout (updated each render frame)
    pub(crate) visible_rows: usize,
}

impl App {
    pub(crate) fn new(api_url: &str) -> Self {
        Self {
            running: true,
            screen: Screen::Dashboard,
            input_mode: InputMode::Normal,
            command_input: String::new(),
            search_input: String::new(),
            edit_input: String::new(),
            edit_target: None,
            status_message: String::new(),
            show_help: false,
            api_url: api_url.to_string(),

            plan: BudgetPlan::default(),
            category_index: 0,

            incomes: MonthlyIncomes::default(),
            income_month: 0,
            income_source: 0,

            transactions: Vec::new(),
            monthly: MonthlyData::default(),
            threshold: Decimal::ZERO,
            tracking: Vec::new(),
            goals: Vec::new(),
            goal_progress: Vec::new(),
            goal_index: 0,

            transaction_index: 0,
            transaction_scroll: 0,

            profile: Profile::default(),
            settings: Settings::default(),
            settings_index: 0,

            sign_in_email: String::new(),
            sign_in_password: String::new(),
            sign_in_index: 0,
            signed_in: false,

            pending_action: None,
            confirm_message: String::new(),

            visible_rows: 20,
        }
    }

    pub(crate) fn palette(&self) -> &'static Palette {
        Palette::for_dark_mode(self.settings.dark_mode)
    }

    pub(crate) fn refresh_dashboard(&mut self, store: &Store) -> Result<()> {
        self.plan = store.budget_plan()?;
        clamp_index(&mut self.category_index, self.plan.categories.len());
        Ok(())
    }

    pub(crate) fn refresh_income(&mut self, store: &Store) -> Result<()> {
        self.incomes = store.monthly_incomes()?;
        Ok(())
    }

    pub(crate) fn refresh_tracking(&mut self, store: &Store) -> Result<()> {
        self.transactions = store.transactions()?;
        self.plan = store.budget_plan()?;
        self.goals = store.goals()?;
        self.threshold = store.red_zone_threshold()?;
        self.recompute_reports();
        clamp_index(&mut self.goal_index, self.goals.len());
        Ok(())
    }

    pub(crate) fn refresh_transactions(&mut self, store: &Store) -> Result<()> {
        self.transactions = store.transactions()?;
        self.recompute_reports();
        let len = self.visible_transactions().len();
        clamp_index(&mut self.transaction_index, len);
        Ok(())
    }

    pub(crate) fn refresh_settings(&mut self, store: &Store) -> Result<()> {
        self.profile = store.profile()?;
        self.settings = store.settings()?;
        Ok(())
    }

    pub(crate) fn refresh_sign_in(&mut self, store: &Store) -> Result<()> {
        self.signed_in = store.token()?.is_some();
        Ok(())
    }

    pub(crate) fn refresh_all(&mut self, store: &Store) -> Result<()> {
        self.refresh_dashboard(store)?;
        self.refresh_income(store)?;
        self.refresh_tracking(store)?; // also loads transactions
        self.refresh_settings(store)?;
        self.refresh_sign_in(store)?;
        Ok(())
    }

    /// Reload whatever the current screen shows, the way each page reads its
    /// slice of storage when it is opened.
    pub(crate) fn refresh_screen(&mut self, store: &Store) -> Result<()> {
        match self.screen {
            Screen::Dashboard => self.refresh_dashboard(store),
            Screen::Income => self.refresh_income(store),
            Screen::Tracking => self.refresh_tracking(store),
            Screen::Transactions => self.refresh_transactions(store),
            Screen::Settings => Ok(()),
            Screen::SignIn => self.refresh_sign_in(store),
        }
    }

    fn recompute_reports(&mut self) {
        self.monthly = report::monthly_data(&self.transactions);
        self.tracking = report::budget_tracking(&self.plan, &self.transactions);
        self.goal_progress = report::goal_progress(&self.goals, &self.transactions);
    }

    /// Indices into `transactions` that match the search text (description or
    /// category, case-insensitive). Newest entries come last, as stored.
    pub(crate) fn visible_transactions(&self) -> Vec<usize> {
        let needle = self.search_input.trim().to_lowercase();
        self.transactions
            .iter()
            .enumerate()
            .filter(|(_, t)| {
                needle.is_empty()
                    || t.description.to_lowercase().contains(&needle)
                    || t.category.to_lowercase().contains(&needle)
            })
            .map(|(i, _)| i)
            .collect()
    }

    pub(crate) fn selected_transaction(&self) -> Option<(usize, &Transaction)> {
        let visible = self.visible_transactions();
        let index = *visible.get(self.transaction_index)?;
        self.transactions.get(index).map(|t| (index, t))
    }

    pub(crate) fn selected_month(&self) -> Month {
        Month::from_index(self.income_month).unwrap_or(Month::January)
    }

    pub(crate) fn selected_source(&self) -> IncomeSource {
        IncomeSource::all()
            .get(self.income_source)
            .copied()
            .unwrap_or(IncomeSource::Salary)
    }

    pub(crate) fn selected_settings_field(&self) -> SettingsField {
        SettingsField::all()
            .get(self.settings_index)
            .copied()
            .unwrap_or(SettingsField::Name)
    }

    pub(crate) fn selected_sign_in_field(&self) -> SignInField {
        SignInField::all()
            .get(self.sign_in_index)
            .copied()
            .unwrap_or(SignInField::Email)
    }

    /// Open the edit prompt for `target`, prefilled with its current value.
    pub(crate) fn begin_edit(&mut self, target: EditTarget) {
        self.edit_input = match target {
            EditTarget::BudgetLimit(i) => self
                .plan
                .categories
                .get(i)
                .map(|c| c.limit.normalize().to_string())
                .unwrap_or_default(),
            EditTarget::BudgetSpent(i) => self
                .plan
                .categories
                .get(i)
                .map(|c| c.spent.normalize().to_string())
                .unwrap_or_default(),
            EditTarget::IncomeAmount(month, source) => {
                let amount = self.incomes.amount(month, source);
                if amount.is_zero() {
                    String::new()
                } else {
                    amount.normalize().to_string()
                }
            }
            EditTarget::Threshold => self.threshold.normalize().to_string(),
            EditTarget::ProfileName => self.profile.name.clone(),
            EditTarget::ProfileEmail => self.profile.email.clone(),
            EditTarget::SignInEmail => self.sign_in_email.clone(),
            EditTarget::SignInPassword => self.sign_in_password.clone(),
            EditTarget::NewCategory => String::new(),
        };
        self.edit_target = Some(target);
        self.input_mode = InputMode::Editing;
    }

    pub(crate) fn confirm(&mut self, action: PendingAction, message: String) {
        self.confirm_message = message;
        self.pending_action = Some(action);
        self.input_mode = InputMode::Confirm;
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }
}

fn clamp_index(index: &mut usize, len: usize) {
    if *index >= len {
        *index = len.saturating_sub(1);
    }
}

#[cfg(test)]
#[path = "app_tests.rs"]
mod tests;
