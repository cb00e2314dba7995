#![allow(clippy::unwrap_used)]

use super::*;
use rust_decimal_macros::dec;
use std::io::Write;

fn setup() -> (App, Store) {
    let store = Store::open_in_memory().unwrap();
    let mut app = App::new("http://127.0.0.1:1");
    app.refresh_all(&store).unwrap();
    (app, store)
}

fn run(input: &str, app: &mut App, store: &mut Store) {
    handle_command(input, app, store).unwrap();
}

// ── Registry ──────────────────────────────────────────────────

#[test]
fn test_levenshtein() {
    assert_eq!(levenshtein("limit", "limit"), 0);
    assert_eq!(levenshtein("limt", "limit"), 1);
    assert_eq!(levenshtein("", "goal"), 4);
}

#[test]
fn test_unknown_command_suggests_closest() {
    let (mut app, mut store) = setup();
    run("treshold 5", &mut app, &mut store);
    assert_eq!(
        app.status_message,
        "Unknown command: :treshold. Did you mean :threshold?"
    );
}

#[test]
fn test_every_command_has_a_description() {
    for (name, cmd) in COMMANDS.iter() {
        assert!(!cmd.description.is_empty(), ":{name} has no description");
    }
}

#[test]
fn test_screen_commands_switch_screen() {
    let (mut app, mut store) = setup();
    run("income", &mut app, &mut store);
    assert_eq!(app.screen, Screen::Income);
    run("tr", &mut app, &mut store);
    assert_eq!(app.screen, Screen::Tracking);
    run("signin", &mut app, &mut store);
    assert_eq!(app.screen, Screen::SignIn);
    run("q", &mut app, &mut store);
    assert!(!app.running);
}

// ── Budget plan ───────────────────────────────────────────────

#[test]
fn test_limit_persists_and_non_numeric_is_zero() {
    let (mut app, mut store) = setup();
    run("limit Rent 600", &mut app, &mut store);
    let plan = store.budget_plan().unwrap();
    let rent = plan.find("Rent").unwrap();
    assert_eq!(plan.categories[rent].limit, dec!(600));

    run("limit rent lots", &mut app, &mut store);
    let plan = store.budget_plan().unwrap();
    assert_eq!(plan.categories[rent].limit, dec!(0));
}

#[test]
fn test_limit_unknown_category() {
    let (mut app, mut store) = setup();
    run("limit Yachts 10", &mut app, &mut store);
    assert_eq!(app.status_message, "Category 'Yachts' not found");
}

#[test]
fn test_timeframe_set_and_cycle() {
    let (mut app, mut store) = setup();
    run("timeframe term", &mut app, &mut store);
    assert_eq!(store.budget_plan().unwrap().time_frame, TimeFrame::Term);
    run("timeframe", &mut app, &mut store);
    assert_eq!(store.budget_plan().unwrap().time_frame, TimeFrame::Week);
    run("timeframe fortnight", &mut app, &mut store);
    assert!(app.status_message.starts_with("Unknown time frame"));
}

#[test]
fn test_add_category_and_duplicate() {
    let (mut app, mut store) = setup();
    run("add-category Books", &mut app, &mut store);
    assert!(store.budget_plan().unwrap().find("Books").is_some());
    run("add-category books", &mut app, &mut store);
    assert_eq!(store.budget_plan().unwrap().categories.len(), 6);
}

#[test]
fn test_remove_category_asks_for_confirmation() {
    let (mut app, mut store) = setup();
    run("remove-category Transport", &mut app, &mut store);
    assert_eq!(app.input_mode, InputMode::Confirm);
    assert!(matches!(
        app.pending_action,
        Some(PendingAction::RemoveCategory { ref name, .. }) if name == "Transport"
    ));
    // nothing removed until confirmed
    assert!(store.budget_plan().unwrap().find("Transport").is_some());
}

// ── Income ────────────────────────────────────────────────────

#[test]
fn test_set_income_and_remove() {
    let (mut app, mut store) = setup();
    run("set-income jan salary 1200", &mut app, &mut store);
    run("set-income january hustle 300", &mut app, &mut store);
    let incomes = store.monthly_incomes().unwrap();
    assert_eq!(incomes.month_total(Month::January), dec!(1500));

    run("set-income jan hustle off", &mut app, &mut store);
    let incomes = store.monthly_incomes().unwrap();
    assert_eq!(incomes.month_total(Month::January), dec!(1200));
    assert!(!incomes.is_checked(Month::January, IncomeSource::Hustle));
}

#[test]
fn test_zero_income_amount_removes_source() {
    let (mut app, mut store) = setup();
    run("set-income mar freelance 250", &mut app, &mut store);
    run("set-income mar freelance 0", &mut app, &mut store);
    let incomes = store.monthly_incomes().unwrap();
    assert!(!incomes.is_checked(Month::March, IncomeSource::Freelance));
}

#[test]
fn test_toggle_selected_income_persists() {
    let (mut app, mut store) = setup();
    app.income_month = 4;
    app.income_source = 3;
    toggle_selected_income(&mut app, &mut store).unwrap();
    let incomes = store.monthly_incomes().unwrap();
    assert!(incomes.is_checked(Month::May, IncomeSource::Investment));
    assert_eq!(incomes.amount(Month::May, IncomeSource::Investment), dec!(0));

    toggle_selected_income(&mut app, &mut store).unwrap();
    let incomes = store.monthly_incomes().unwrap();
    assert!(!incomes.is_checked(Month::May, IncomeSource::Investment));
}

// ── Tracking ──────────────────────────────────────────────────

#[test]
fn test_threshold_and_goals() {
    let (mut app, mut store) = setup();
    run("threshold 750", &mut app, &mut store);
    assert_eq!(store.red_zone_threshold().unwrap(), dec!(750));
    assert_eq!(app.threshold, dec!(750));

    run("goal New Laptop 1500", &mut app, &mut store);
    run("goal new laptop 1800", &mut app, &mut store);
    let goals = store.goals().unwrap();
    assert_eq!(goals.len(), 1);
    assert_eq!(goals[0].target, dec!(1800));

    run("goal Trip nothing", &mut app, &mut store);
    assert_eq!(app.status_message, "Invalid target: nothing");
}

#[test]
fn test_delete_goal_requires_tracking_screen() {
    let (mut app, mut store) = setup();
    run("goal Bike 300", &mut app, &mut store);
    run("delete-goal", &mut app, &mut store);
    assert_eq!(app.input_mode, InputMode::Normal);

    run("tracking", &mut app, &mut store);
    run("delete-goal", &mut app, &mut store);
    assert_eq!(app.input_mode, InputMode::Confirm);
}

// ── Transactions ──────────────────────────────────────────────

#[test]
fn test_add_txn_persists() {
    let (mut app, mut store) = setup();
    run(
        "add-txn 2024-03-04 expense 12.5 Groceries Milk and eggs",
        &mut app,
        &mut store,
    );
    let txns = store.transactions().unwrap();
    assert_eq!(txns.len(), 1);
    assert_eq!(txns[0].description, "Milk and eggs");
    assert_eq!(txns[0].amount, dec!(12.5));
    assert!(txns[0].is_expense());
    assert_eq!(app.transactions.len(), 1);
}

#[test]
fn test_add_txn_rejects_bad_input() {
    let (mut app, mut store) = setup();
    run("add-txn tomorrow expense 5 Food", &mut app, &mut store);
    assert!(app.status_message.starts_with("Unreadable date"));
    run("add-txn 2024-03-04 expense five Food", &mut app, &mut store);
    assert_eq!(app.status_message, "Invalid amount: five");
    assert!(store.transactions().unwrap().is_empty());
}

#[test]
fn test_delete_txn_uses_filtered_selection() {
    let (mut app, mut store) = setup();
    run("add-txn 2024-03-04 expense 3 Food Coffee", &mut app, &mut store);
    run("add-txn 2024-03-05 expense 9 Food Lunch", &mut app, &mut store);
    run("search lunch", &mut app, &mut store);
    assert_eq!(app.screen, Screen::Transactions);
    run("delete-txn", &mut app, &mut store);
    assert!(matches!(
        app.pending_action,
        Some(PendingAction::DeleteTransaction { index: 1, .. })
    ));
}

#[test]
fn test_export_without_transactions_reports_error() {
    let (mut app, mut store) = setup();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.csv");
    run(&format!("export {}", path.display()), &mut app, &mut store);
    assert_eq!(app.status_message, "No transactions to export.");
    assert!(!path.exists());
}

#[test]
fn test_import_appends() {
    let (mut app, mut store) = setup();
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"Date,Type,Description,Amount,Category\n2024-05-01,income,Grant,900,Salary\n")
        .unwrap();
    run(&format!("import {}", file.path().display()), &mut app, &mut store);
    let txns = store.transactions().unwrap();
    assert_eq!(txns.len(), 1);
    assert!(txns[0].is_income());
}

// ── Settings & sign in ────────────────────────────────────────

#[test]
fn test_profile_saved_only_when_complete() {
    let (mut app, mut store) = setup();
    run("name Sam Lee", &mut app, &mut store);
    run("save-profile", &mut app, &mut store);
    assert_eq!(app.status_message, "Please fill in all profile fields.");
    assert_eq!(store.profile().unwrap(), crate::models::Profile::default());

    run("email sam@uni.edu", &mut app, &mut store);
    run("save-profile", &mut app, &mut store);
    assert_eq!(app.status_message, "Profile saved successfully!");
    assert_eq!(store.profile().unwrap().name, "Sam Lee");
}

#[test]
fn test_dark_mode_applies_before_save() {
    let (mut app, mut store) = setup();
    run("dark-mode", &mut app, &mut store);
    assert!(app.settings.dark_mode);
    assert!(!store.settings().unwrap().dark_mode);

    run("save-settings", &mut app, &mut store);
    assert!(store.settings().unwrap().dark_mode);
    assert_eq!(app.status_message, "Settings saved successfully!");
}

#[test]
fn test_apply_edit_sign_in_fields() {
    let (mut app, mut store) = setup();
    app.begin_edit(EditTarget::SignInEmail);
    app.edit_input = "  sam@uni.edu ".into();
    apply_edit(&mut app, &mut store).unwrap();
    assert_eq!(app.sign_in_email, "sam@uni.edu");
    assert_eq!(app.input_mode, InputMode::Normal);
    assert!(app.edit_target.is_none());
}

#[test]
fn test_login_without_password_opens_prompt() {
    let (mut app, mut store) = setup();
    run("login sam@uni.edu", &mut app, &mut store);
    assert_eq!(app.screen, Screen::SignIn);
    assert_eq!(app.edit_target, Some(EditTarget::SignInPassword));
}

#[test]
fn test_sign_in_with_empty_form_reports_error() {
    let (mut app, mut store) = setup();
    submit_sign_in(&mut app, &mut store).unwrap();
    assert_eq!(app.status_message, "Email and password are required");
    assert!(store.token().unwrap().is_none());
}

#[test]
fn test_logout() {
    let (mut app, mut store) = setup();
    store.save_token("abc").unwrap();
    run("logout", &mut app, &mut store);
    assert_eq!(app.status_message, "Signed out");
    assert!(store.token().unwrap().is_none());
}
