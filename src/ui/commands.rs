use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::LazyLock;

use rust_decimal::Decimal;
use tracing::info;

use super::app::{App, EditTarget, InputMode, PendingAction, Screen};
use crate::auth::AuthClient;
use crate::config::expand_home;
use crate::models::{
    parse_date, parse_number, IncomeSource, Month, Preference, SavingsGoal, TimeFrame, Transaction,
    TxnKind,
};
use crate::store::Store;
use crate::ui::util::format_amount;

pub(crate) struct Command {
    pub(crate) description: &'static str,
    pub(crate) run: fn(&str, &mut App, &mut Store) -> anyhow::Result<()>,
}

macro_rules! register_command {
    ($name:expr, $desc:expr, $func:expr, $registry:expr) => {{
        $registry.insert(
            $name,
            Command {
                description: $desc,
                run: $func,
            },
        );
    }};
}

pub(crate) static COMMANDS: LazyLock<HashMap<&str, Command>> = LazyLock::new(|| {
    let mut r: HashMap<&str, Command> = HashMap::new();

    register_command!("q", "Quit CacheBudget", cmd_quit, r);
    register_command!("quit", "Quit CacheBudget", cmd_quit, r);
    register_command!("d", "Go to Dashboard", cmd_dashboard, r);
    register_command!("dashboard", "Go to Dashboard", cmd_dashboard, r);
    register_command!("i", "Go to Income", cmd_income, r);
    register_command!("income", "Go to Income", cmd_income, r);
    register_command!("tr", "Go to Tracking", cmd_tracking, r);
    register_command!("tracking", "Go to Tracking", cmd_tracking, r);
    register_command!("t", "Go to Transactions", cmd_transactions, r);
    register_command!("transactions", "Go to Transactions", cmd_transactions, r);
    register_command!("settings", "Go to Settings", cmd_settings, r);
    register_command!("signin", "Go to Sign In", cmd_signin, r);
    register_command!("help", "Show available commands", cmd_help, r);
    register_command!("h", "Show available commands", cmd_help, r);
    register_command!(
        "limit",
        "Set a category limit (e.g. :limit Rent 600)",
        cmd_limit,
        r
    );
    register_command!(
        "spent",
        "Set a category's spent amount (e.g. :spent Rent 450)",
        cmd_spent,
        r
    );
    register_command!(
        "timeframe",
        "Set budget time frame (e.g. :timeframe month)",
        cmd_timeframe,
        r
    );
    register_command!(
        "add-category",
        "Add a budget category (e.g. :add-category Books)",
        cmd_add_category,
        r
    );
    register_command!(
        "remove-category",
        "Remove a budget category (default: selected)",
        cmd_remove_category,
        r
    );
    register_command!(
        "set-income",
        "Set income (e.g. :set-income jan salary 1200, or off)",
        cmd_set_income,
        r
    );
    register_command!(
        "threshold",
        "Set red zone threshold (e.g. :threshold 800)",
        cmd_threshold,
        r
    );
    register_command!(
        "goal",
        "Add or update a savings goal (e.g. :goal Laptop 1500)",
        cmd_goal,
        r
    );
    register_command!("delete-goal", "Delete selected savings goal", cmd_delete_goal, r);
    register_command!(
        "add-txn",
        "Log a transaction (e.g. :add-txn 2024-01-15 expense 4.50 Food Coffee)",
        cmd_add_txn,
        r
    );
    register_command!(
        "delete-txn",
        "Delete selected transaction",
        cmd_delete_txn,
        r
    );
    register_command!(
        "search",
        "Search transactions (e.g. :search coffee)",
        cmd_search,
        r
    );
    register_command!("s", "Search transactions (e.g. :s coffee)", cmd_search, r);
    register_command!(
        "export",
        "Export transactions to CSV (e.g. :export ~/budget.csv)",
        cmd_export,
        r
    );
    register_command!(
        "import",
        "Append transactions from CSV (e.g. :import ~/bank.csv)",
        cmd_import,
        r
    );
    register_command!("name", "Set profile name (e.g. :name Sam Lee)", cmd_name, r);
    register_command!(
        "email",
        "Set profile email (e.g. :email sam@uni.edu)",
        cmd_email,
        r
    );
    register_command!("save-profile", "Save the profile", cmd_save_profile, r);
    register_command!("save-settings", "Save preferences", cmd_save_settings, r);
    register_command!("dark-mode", "Toggle dark mode", cmd_dark_mode, r);
    register_command!(
        "notifications",
        "Toggle notifications",
        cmd_notifications,
        r
    );
    register_command!(
        "login",
        "Sign in (e.g. :login sam@uni.edu secret)",
        cmd_login,
        r
    );
    register_command!("logout", "Forget the stored sign-in token", cmd_logout, r);

    r
});

pub(crate) fn handle_command(input: &str, app: &mut App, store: &mut Store) -> anyhow::Result<()> {
    let trimmed = input.trim();
    let (cmd_name, args) = trimmed.split_once(' ').unwrap_or((trimmed, ""));
    let args = args.trim();

    if let Some(cmd) = COMMANDS.get(cmd_name) {
        (cmd.run)(args, app, store)?;
    } else {
        let suggestion = find_closest(cmd_name);
        app.set_status(format!(
            "Unknown command: :{cmd_name}. Did you mean :{suggestion}?"
        ));
    }

    Ok(())
}

fn find_closest(input: &str) -> String {
    COMMANDS
        .keys()
        .filter(|k| k.len() > 2)
        .min_by_key(|k| (levenshtein(input, k), **k))
        .unwrap_or(&"help")
        .to_string()
}

fn levenshtein(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = usize::from(a[i - 1] != b[j - 1]);
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

// ── Shared actions (keys and commands) ───────────────────────

pub(crate) fn show_screen(app: &mut App, store: &Store, screen: Screen) -> anyhow::Result<()> {
    app.screen = screen;
    app.refresh_screen(store)?;
    app.set_status(format!("{screen}"));
    Ok(())
}

/// Write the edit prompt's text into the field it was opened for.
pub(crate) fn apply_edit(app: &mut App, store: &mut Store) -> anyhow::Result<()> {
    let Some(target) = app.edit_target.take() else {
        return Ok(());
    };
    let input = std::mem::take(&mut app.edit_input);
    app.input_mode = InputMode::Normal;

    match target {
        EditTarget::BudgetLimit(index) => {
            let Some(name) = app.plan.categories.get(index).map(|c| c.name.clone()) else {
                return Ok(());
            };
            let limit = app
                .plan
                .set_limit_from_input(index, &input)
                .unwrap_or(Decimal::ZERO);
            store.save_budget_plan(&app.plan)?;
            app.refresh_tracking(store)?;
            app.set_status(format!("{name} limit: {}", format_amount(limit)));
        }
        EditTarget::BudgetSpent(index) => {
            let spent = parse_number(&input).unwrap_or(Decimal::ZERO);
            if app.plan.set_spent(index, spent) {
                store.save_budget_plan(&app.plan)?;
                app.set_status(format!("Spent: {}", format_amount(spent)));
            }
        }
        EditTarget::NewCategory => add_category(app, store, &input)?,
        EditTarget::IncomeAmount(month, source) => {
            match app.incomes.set_amount_from_input(month, source, &input) {
                Some(amount) => {
                    app.set_status(format!("{month} {source}: {}", format_amount(amount)))
                }
                None => app.set_status(format!("Removed {source} from {month}")),
            }
            store.save_monthly_incomes(&app.incomes)?;
        }
        EditTarget::Threshold => set_threshold(app, store, &input)?,
        EditTarget::ProfileName => app.profile.name = input,
        EditTarget::ProfileEmail => app.profile.email = input,
        EditTarget::SignInEmail => app.sign_in_email = input.trim().to_string(),
        EditTarget::SignInPassword => app.sign_in_password = input,
    }
    Ok(())
}

pub(crate) fn toggle_selected_income(app: &mut App, store: &mut Store) -> anyhow::Result<()> {
    let (month, source) = (app.selected_month(), app.selected_source());
    let checked = !app.incomes.is_checked(month, source);
    app.incomes.set_checked(month, source, checked);
    store.save_monthly_incomes(&app.incomes)?;
    app.set_status(if checked {
        format!("{month}: {source} on")
    } else {
        format!("{month}: {source} off")
    });
    Ok(())
}

pub(crate) fn set_time_frame(app: &mut App, store: &mut Store, frame: TimeFrame) -> anyhow::Result<()> {
    app.plan.time_frame = frame;
    store.save_budget_plan(&app.plan)?;
    app.set_status(format!("Time frame: {frame}"));
    Ok(())
}

pub(crate) fn toggle_preference(app: &mut App, pref: Preference) {
    let on = app.settings.toggle(pref);
    let state = if on { "on" } else { "off" };
    app.set_status(format!("{}: {state} (not saved)", pref.label()));
}

pub(crate) fn save_profile(app: &mut App, store: &mut Store) -> anyhow::Result<()> {
    match store.save_profile(&app.profile) {
        Ok(()) => app.set_status("Profile saved successfully!"),
        Err(e) => app.set_status(format!("{e}")),
    }
    Ok(())
}

pub(crate) fn save_settings(app: &mut App, store: &mut Store) -> anyhow::Result<()> {
    store.save_settings(&app.settings)?;
    app.set_status("Settings saved successfully!");
    Ok(())
}

/// One sign-in attempt with the form's email and password.
pub(crate) fn submit_sign_in(app: &mut App, store: &mut Store) -> anyhow::Result<()> {
    let client = AuthClient::new(&app.api_url)?;
    match client.login(&app.sign_in_email, &app.sign_in_password) {
        Ok(token) => {
            store.save_token(&token)?;
            app.signed_in = true;
            app.sign_in_password.clear();
            app.set_status("Sign in successful!");
        }
        Err(e) => app.set_status(format!("{e}")),
    }
    Ok(())
}

fn add_category(app: &mut App, store: &mut Store, name: &str) -> anyhow::Result<()> {
    match app.plan.add_category(name) {
        Ok(()) => {
            store.save_budget_plan(&app.plan)?;
            app.category_index = app.plan.categories.len() - 1;
            app.set_status(format!("Added category '{}'", name.trim()));
        }
        Err(e) => app.set_status(format!("{e}")),
    }
    Ok(())
}

fn set_threshold(app: &mut App, store: &mut Store, input: &str) -> anyhow::Result<()> {
    app.threshold = store.set_red_zone_threshold(input)?;
    if app.threshold > Decimal::ZERO {
        app.set_status(format!("Red zone threshold: {}", format_amount(app.threshold)));
    } else {
        app.set_status("Red zone disabled");
    }
    Ok(())
}

// ── Command implementations ──────────────────────────────────

fn cmd_quit(_args: &str, app: &mut App, _store: &mut Store) -> anyhow::Result<()> {
    app.running = false;
    Ok(())
}

fn cmd_dashboard(_args: &str, app: &mut App, store: &mut Store) -> anyhow::Result<()> {
    show_screen(app, store, Screen::Dashboard)
}

fn cmd_income(_args: &str, app: &mut App, store: &mut Store) -> anyhow::Result<()> {
    show_screen(app, store, Screen::Income)
}

fn cmd_tracking(_args: &str, app: &mut App, store: &mut Store) -> anyhow::Result<()> {
    show_screen(app, store, Screen::Tracking)
}

fn cmd_transactions(_args: &str, app: &mut App, store: &mut Store) -> anyhow::Result<()> {
    show_screen(app, store, Screen::Transactions)
}

fn cmd_settings(_args: &str, app: &mut App, store: &mut Store) -> anyhow::Result<()> {
    show_screen(app, store, Screen::Settings)
}

fn cmd_signin(_args: &str, app: &mut App, store: &mut Store) -> anyhow::Result<()> {
    show_screen(app, store, Screen::SignIn)
}

fn cmd_help(_args: &str, app: &mut App, _store: &mut Store) -> anyhow::Result<()> {
    app.show_help = true;
    Ok(())
}

/// Split `"<name words...> <value>"` into the name and the trailing value.
fn name_and_value(args: &str) -> Option<(&str, &str)> {
    let (name, value) = args.rsplit_once(' ')?;
    let name = name.trim();
    if name.is_empty() {
        None
    } else {
        Some((name, value))
    }
}

fn cmd_limit(args: &str, app: &mut App, store: &mut Store) -> anyhow::Result<()> {
    let Some((name, value)) = name_and_value(args) else {
        app.set_status("Usage: :limit <category> <amount>");
        return Ok(());
    };
    app.refresh_dashboard(store)?;
    let Some(index) = app.plan.find(name) else {
        app.set_status(format!("Category '{name}' not found"));
        return Ok(());
    };
    app.edit_input = value.to_string();
    app.edit_target = Some(EditTarget::BudgetLimit(index));
    apply_edit(app, store)
}

fn cmd_spent(args: &str, app: &mut App, store: &mut Store) -> anyhow::Result<()> {
    let Some((name, value)) = name_and_value(args) else {
        app.set_status("Usage: :spent <category> <amount>");
        return Ok(());
    };
    app.refresh_dashboard(store)?;
    let Some(index) = app.plan.find(name) else {
        app.set_status(format!("Category '{name}' not found"));
        return Ok(());
    };
    app.edit_input = value.to_string();
    app.edit_target = Some(EditTarget::BudgetSpent(index));
    apply_edit(app, store)
}

fn cmd_timeframe(args: &str, app: &mut App, store: &mut Store) -> anyhow::Result<()> {
    app.refresh_dashboard(store)?;
    let frame = if args.is_empty() {
        app.plan.time_frame.next()
    } else {
        match TimeFrame::parse(args) {
            Some(frame) => frame,
            None => {
                app.set_status(format!("Unknown time frame: {args} (week, month, term)"));
                return Ok(());
            }
        }
    };
    set_time_frame(app, store, frame)
}

fn cmd_add_category(args: &str, app: &mut App, store: &mut Store) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_status("Usage: :add-category <name>");
        return Ok(());
    }
    app.refresh_dashboard(store)?;
    add_category(app, store, args)
}

fn cmd_remove_category(args: &str, app: &mut App, store: &mut Store) -> anyhow::Result<()> {
    app.refresh_dashboard(store)?;
    let index = if args.is_empty() {
        (app.screen == Screen::Dashboard && !app.plan.categories.is_empty())
            .then_some(app.category_index)
    } else {
        app.plan.find(args)
    };
    let Some(category) = index.and_then(|i| app.plan.categories.get(i).map(|c| (i, c))) else {
        app.set_status("Select a category on the Dashboard or name one");
        return Ok(());
    };
    let (index, name) = (category.0, category.1.name.clone());
    app.confirm(
        PendingAction::RemoveCategory {
            index,
            name: name.clone(),
        },
        format!("Remove category '{name}'?"),
    );
    Ok(())
}

fn cmd_set_income(args: &str, app: &mut App, store: &mut Store) -> anyhow::Result<()> {
    let parts: Vec<&str> = args.split_whitespace().collect();
    let [month, source, value] = parts.as_slice() else {
        app.set_status("Usage: :set-income <month> <source> <amount|off>");
        return Ok(());
    };
    let Some(month) = Month::parse(month) else {
        app.set_status(format!("Unknown month: {month}"));
        return Ok(());
    };
    let Some(source) = IncomeSource::parse(source) else {
        app.set_status(format!("Unknown source: {source}"));
        return Ok(());
    };
    app.refresh_income(store)?;
    if value.eq_ignore_ascii_case("off") {
        app.incomes.set_checked(month, source, false);
        store.save_monthly_incomes(&app.incomes)?;
        app.set_status(format!("Removed {source} from {month}"));
        return Ok(());
    }
    app.edit_input = value.to_string();
    app.edit_target = Some(EditTarget::IncomeAmount(month, source));
    apply_edit(app, store)
}

fn cmd_threshold(args: &str, app: &mut App, store: &mut Store) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_status("Usage: :threshold <amount> (0 turns the red zone off)");
        return Ok(());
    }
    set_threshold(app, store, args)?;
    app.refresh_tracking(store)?;
    Ok(())
}

fn cmd_goal(args: &str, app: &mut App, store: &mut Store) -> anyhow::Result<()> {
    let Some((name, value)) = name_and_value(args) else {
        app.set_status("Usage: :goal <name> <target>");
        return Ok(());
    };
    let target = match parse_number(value) {
        Some(t) if t > Decimal::ZERO => t,
        _ => {
            app.set_status(format!("Invalid target: {value}"));
            return Ok(());
        }
    };
    store.upsert_goal(SavingsGoal::new(name.to_string(), target))?;
    app.refresh_tracking(store)?;
    app.set_status(format!("Goal '{name}': {}", format_amount(target)));
    Ok(())
}

fn cmd_delete_goal(_args: &str, app: &mut App, _store: &mut Store) -> anyhow::Result<()> {
    if app.screen != Screen::Tracking || app.goals.is_empty() {
        app.set_status("Navigate to Tracking and select a goal first");
        return Ok(());
    }
    if let Some(goal) = app.goals.get(app.goal_index) {
        let name = goal.name.clone();
        let index = app.goal_index;
        app.confirm(
            PendingAction::DeleteGoal {
                index,
                name: name.clone(),
            },
            format!("Delete goal '{name}'?"),
        );
    }
    Ok(())
}

fn cmd_add_txn(args: &str, app: &mut App, store: &mut Store) -> anyhow::Result<()> {
    let parts: Vec<&str> = args.split_whitespace().collect();
    if parts.len() < 4 {
        app.set_status(
            "Usage: :add-txn <date> <income|expense> <amount> <category> [description]",
        );
        return Ok(());
    }

    let date = parts[0];
    if parse_date(date).is_none() {
        app.set_status(format!("Unreadable date: {date} (use YYYY-MM-DD)"));
        return Ok(());
    }
    let Some(amount) = parse_number(parts[2]) else {
        app.set_status(format!("Invalid amount: {}", parts[2]));
        return Ok(());
    };

    let txn = Transaction::new(
        date.to_string(),
        TxnKind::parse(parts[1]),
        parts[4..].join(" "),
        amount,
        parts[3].to_string(),
    );
    let kind = txn.kind;
    store.add_transaction(txn)?;
    app.refresh_transactions(store)?;
    app.set_status(format!("Transaction added: {kind} {}", format_amount(amount)));
    Ok(())
}

fn cmd_delete_txn(_args: &str, app: &mut App, _store: &mut Store) -> anyhow::Result<()> {
    if app.screen != Screen::Transactions {
        app.set_status("Navigate to Transactions and select one first");
        return Ok(());
    }
    let Some((index, txn)) = app.selected_transaction() else {
        app.set_status("No transaction selected");
        return Ok(());
    };
    let description = if txn.description.is_empty() {
        format!("{} {}", txn.date, format_amount(txn.amount))
    } else {
        txn.description.clone()
    };
    app.confirm(
        PendingAction::DeleteTransaction {
            index,
            description: description.clone(),
        },
        format!("Delete '{description}'?"),
    );
    Ok(())
}

fn cmd_search(args: &str, app: &mut App, store: &mut Store) -> anyhow::Result<()> {
    app.search_input = args.to_string();
    app.screen = Screen::Transactions;
    app.transaction_index = 0;
    app.transaction_scroll = 0;
    app.refresh_transactions(store)?;
    let count = app.visible_transactions().len();
    app.set_status(format!("{count} matching transactions"));
    Ok(())
}

fn cmd_export(args: &str, app: &mut App, store: &mut Store) -> anyhow::Result<()> {
    let path = if args.is_empty() {
        PathBuf::from(crate::transfer::DEFAULT_FILE_NAME)
    } else {
        expand_home(args)
    };
    let txns = store.transactions()?;
    match crate::transfer::export_to_path(&txns, &path) {
        Ok(count) => app.set_status(format!(
            "Exported {count} transactions to {}",
            path.display()
        )),
        Err(e) => app.set_status(format!("{e:#}")),
    }
    Ok(())
}

fn cmd_import(args: &str, app: &mut App, store: &mut Store) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_status("Usage: :import <file.csv>");
        return Ok(());
    }
    let path = expand_home(args);
    let txns = match crate::transfer::import_from_path(&path) {
        Ok(txns) => txns,
        Err(e) => {
            app.set_status(format!("{e:#}"));
            return Ok(());
        }
    };
    let count = txns.len();
    store.append_transactions(txns)?;
    info!(count, path = %path.display(), "imported transactions");
    app.refresh_transactions(store)?;
    app.set_status(format!(
        "Imported {count} transactions from {}",
        path.display()
    ));
    Ok(())
}

fn cmd_name(args: &str, app: &mut App, _store: &mut Store) -> anyhow::Result<()> {
    app.profile.name = args.to_string();
    app.set_status("Name updated (use :save-profile to keep it)");
    Ok(())
}

fn cmd_email(args: &str, app: &mut App, _store: &mut Store) -> anyhow::Result<()> {
    app.profile.email = args.to_string();
    app.set_status("Email updated (use :save-profile to keep it)");
    Ok(())
}

fn cmd_save_profile(_args: &str, app: &mut App, store: &mut Store) -> anyhow::Result<()> {
    save_profile(app, store)
}

fn cmd_save_settings(_args: &str, app: &mut App, store: &mut Store) -> anyhow::Result<()> {
    save_settings(app, store)
}

fn cmd_dark_mode(_args: &str, app: &mut App, _store: &mut Store) -> anyhow::Result<()> {
    toggle_preference(app, Preference::DarkMode);
    Ok(())
}

fn cmd_notifications(_args: &str, app: &mut App, _store: &mut Store) -> anyhow::Result<()> {
    toggle_preference(app, Preference::Notifications);
    Ok(())
}

fn cmd_login(args: &str, app: &mut App, store: &mut Store) -> anyhow::Result<()> {
    let mut parts = args.split_whitespace();
    match (parts.next(), parts.next()) {
        (Some(email), Some(password)) => {
            app.sign_in_email = email.to_string();
            app.sign_in_password = password.to_string();
            submit_sign_in(app, store)
        }
        (Some(email), None) => {
            app.sign_in_email = email.to_string();
            show_screen(app, store, Screen::SignIn)?;
            app.sign_in_index = 1;
            app.begin_edit(EditTarget::SignInPassword);
            Ok(())
        }
        _ => show_screen(app, store, Screen::SignIn),
    }
}

fn cmd_logout(_args: &str, app: &mut App, store: &mut Store) -> anyhow::Result<()> {
    if store.clear_token()? {
        app.set_status("Signed out");
    } else {
        app.set_status("Not signed in");
    }
    app.signed_in = false;
    Ok(())
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;
