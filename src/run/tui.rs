use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use tracing::{info, warn};

use crate::config::Config;
use crate::models::{IncomeSource, Month, Preference};
use crate::store::Store;
use crate::ui::app::{
    App, EditTarget, InputMode, PendingAction, Screen, SettingsField, SignInField,
};
use crate::ui::commands;
use crate::ui::util::{scroll_down, scroll_to_bottom, scroll_to_top, scroll_up};

pub(crate) fn as_tui(store: &mut Store, config: &Config) -> Result<()> {
    let mut app = App::new(&config.api_url);
    app.refresh_all(store)?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    info!("tui started");
    let result = run_app(&mut terminal, &mut app, store);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        eprintln!("Error: {e:?}");
    }

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    store: &mut Store,
) -> Result<()> {
    while app.running {
        terminal.draw(|f| {
            let content_height = f.area().height.saturating_sub(3) as usize;
            app.visible_rows = content_height.max(1);
            crate::ui::render::render(f, app);
        })?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if app.show_help {
                app.show_help = false;
                continue;
            }
            let handled = match app.input_mode {
                InputMode::Normal => handle_normal_input(key, app, store),
                InputMode::Command => handle_command_input(key, app, store),
                InputMode::Search => handle_search_input(key, app, store),
                InputMode::Editing => handle_editing_input(key, app, store),
                InputMode::Confirm => handle_confirm_input(key, app, store),
            };
            // Failures surface in the status line; the session keeps going.
            if let Err(e) = handled {
                warn!(error = %format!("{e:#}"), "action failed");
                app.input_mode = InputMode::Normal;
                app.set_status(format!("Error: {e:#}"));
            }
        }
    }
    Ok(())
}

// ── Input handlers ───────────────────────────────────────────

fn handle_normal_input(key: event::KeyEvent, app: &mut App, store: &mut Store) -> Result<()> {
    match key.code {
        KeyCode::Char(':') => {
            app.input_mode = InputMode::Command;
            app.command_input.clear();
        }
        KeyCode::Char('/') => {
            app.input_mode = InputMode::Search;
            app.search_input.clear();
            app.screen = Screen::Transactions;
            app.refresh_transactions(store)?;
        }
        KeyCode::Char('q') | KeyCode::Char('c')
            if key.modifiers.contains(KeyModifiers::CONTROL) =>
        {
            app.running = false;
        }
        KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            for _ in 0..app.visible_rows / 2 {
                handle_move_down(app);
            }
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            for _ in 0..app.visible_rows / 2 {
                handle_move_up(app);
            }
        }
        KeyCode::Char(c @ '1'..='6') => {
            let idx = (c as usize) - ('1' as usize);
            if let Some(&screen) = Screen::all().get(idx) {
                commands::show_screen(app, store, screen)?;
            }
        }
        KeyCode::Tab => cycle_screen(app, store, 1)?,
        KeyCode::BackTab => cycle_screen(app, store, -1)?,
        KeyCode::Char('j') | KeyCode::Down => handle_move_down(app),
        KeyCode::Char('k') | KeyCode::Up => handle_move_up(app),
        KeyCode::Char('h') | KeyCode::Left if app.screen == Screen::Income => {
            app.income_source = app.income_source.saturating_sub(1);
        }
        KeyCode::Char('l') | KeyCode::Right if app.screen == Screen::Income => {
            if app.income_source + 1 < IncomeSource::all().len() {
                app.income_source += 1;
            }
        }
        KeyCode::Char('g') => handle_goto_top(app),
        KeyCode::Char('G') => handle_goto_bottom(app),
        KeyCode::Char('?') => {
            app.show_help = true;
        }
        KeyCode::Enter => handle_enter(app, store)?,
        KeyCode::Esc => handle_escape(app, store)?,
        _ => handle_screen_key(key.code, app, store)?,
    }
    Ok(())
}

/// Keys that only mean something on one screen.
fn handle_screen_key(code: KeyCode, app: &mut App, store: &mut Store) -> Result<()> {
    match (app.screen, code) {
        (Screen::Dashboard, KeyCode::Char('s')) => {
            if !app.plan.categories.is_empty() {
                app.begin_edit(EditTarget::BudgetSpent(app.category_index));
            }
        }
        (Screen::Dashboard, KeyCode::Char('t')) => {
            let next = app.plan.time_frame.next();
            commands::set_time_frame(app, store, next)?;
        }
        (Screen::Dashboard, KeyCode::Char('a')) => app.begin_edit(EditTarget::NewCategory),
        (Screen::Dashboard, KeyCode::Char('x')) => {
            commands::handle_command("remove-category", app, store)?;
        }
        (Screen::Income, KeyCode::Char(' ')) => commands::toggle_selected_income(app, store)?,
        (Screen::Tracking, KeyCode::Char('r')) => app.begin_edit(EditTarget::Threshold),
        (Screen::Tracking, KeyCode::Char('x')) => {
            commands::handle_command("delete-goal", app, store)?;
        }
        (Screen::Transactions, KeyCode::Char('D')) => {
            commands::handle_command("delete-txn", app, store)?;
        }
        (Screen::Transactions, KeyCode::Char('a')) => {
            let today = chrono::Local::now().format("%Y-%m-%d");
            app.command_input = format!("add-txn {today} expense ");
            app.input_mode = InputMode::Command;
        }
        (Screen::Settings, KeyCode::Char('P')) => commands::save_profile(app, store)?,
        (Screen::Settings, KeyCode::Char('S')) => commands::save_settings(app, store)?,
        (Screen::Settings, KeyCode::Char('E')) => {
            commands::handle_command("export", app, store)?;
        }
        _ => {}
    }
    Ok(())
}

fn handle_command_input(key: event::KeyEvent, app: &mut App, store: &mut Store) -> Result<()> {
    match key.code {
        KeyCode::Enter => {
            let input = std::mem::take(&mut app.command_input);
            app.input_mode = InputMode::Normal;
            commands::handle_command(&input, app, store)?;
        }
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
        }
        KeyCode::Backspace => {
            app.command_input.pop();
            if app.command_input.is_empty() {
                app.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.command_input.clear();
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Char('w') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            let trimmed = app.command_input.trim_end();
            if let Some(pos) = trimmed.rfind(' ') {
                app.command_input.truncate(pos + 1);
            } else {
                app.command_input.clear();
                app.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Char(c) => {
            app.command_input.push(c);
        }
        _ => {}
    }
    Ok(())
}

fn handle_search_input(key: event::KeyEvent, app: &mut App, store: &mut Store) -> Result<()> {
    match key.code {
        KeyCode::Enter => {
            app.input_mode = InputMode::Normal;
            let count = app.visible_transactions().len();
            app.set_status(format!("{count} matching transactions"));
        }
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            app.search_input.clear();
            app.refresh_transactions(store)?;
        }
        KeyCode::Backspace => {
            app.search_input.pop();
            reset_transaction_cursor(app);
        }
        KeyCode::Char(c) => {
            app.search_input.push(c);
            reset_transaction_cursor(app);
        }
        _ => {}
    }
    Ok(())
}

fn reset_transaction_cursor(app: &mut App) {
    app.transaction_index = 0;
    app.transaction_scroll = 0;
}

fn handle_editing_input(key: event::KeyEvent, app: &mut App, store: &mut Store) -> Result<()> {
    match key.code {
        KeyCode::Enter => commands::apply_edit(app, store)?,
        KeyCode::Esc => {
            app.edit_input.clear();
            app.edit_target = None;
            app.input_mode = InputMode::Normal;
            app.set_status("Edit cancelled");
        }
        KeyCode::Backspace => {
            app.edit_input.pop();
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.edit_input.clear();
        }
        KeyCode::Char(c) => {
            app.edit_input.push(c);
        }
        _ => {}
    }
    Ok(())
}

fn handle_confirm_input(key: event::KeyEvent, app: &mut App, store: &mut Store) -> Result<()> {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => {
            app.input_mode = InputMode::Normal;
            app.confirm_message.clear();
            if let Some(action) = app.pending_action.take() {
                match action {
                    PendingAction::DeleteTransaction { index, description } => {
                        store.delete_transaction(index)?;
                        app.refresh_transactions(store)?;
                        app.set_status(format!("Deleted: {description}"));
                    }
                    PendingAction::DeleteGoal { index, name } => {
                        store.delete_goal(index)?;
                        app.refresh_tracking(store)?;
                        app.set_status(format!("Deleted goal: {name}"));
                    }
                    PendingAction::RemoveCategory { index, name } => {
                        app.plan.remove_category(index);
                        store.save_budget_plan(&app.plan)?;
                        app.refresh_dashboard(store)?;
                        app.set_status(format!("Removed category: {name}"));
                    }
                }
            }
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            app.pending_action = None;
            app.input_mode = InputMode::Normal;
            app.confirm_message.clear();
            app.set_status("Cancelled");
        }
        _ => {}
    }
    Ok(())
}

// ── Navigation helpers ───────────────────────────────────────

fn cycle_screen(app: &mut App, store: &mut Store, step: isize) -> Result<()> {
    let screens = Screen::all();
    let idx = screens.iter().position(|s| *s == app.screen).unwrap_or(0) as isize;
    let next = (idx + step).rem_euclid(screens.len() as isize) as usize;
    commands::show_screen(app, store, screens[next])
}

fn transaction_page(app: &App) -> usize {
    // Table border and header take three rows
    app.visible_rows.saturating_sub(3).max(1)
}

fn handle_move_down(app: &mut App) {
    match app.screen {
        Screen::Dashboard => {
            if app.category_index + 1 < app.plan.categories.len() {
                app.category_index += 1;
            }
        }
        Screen::Income => {
            if app.income_month + 1 < Month::all().len() {
                app.income_month += 1;
            }
        }
        Screen::Tracking => {
            if app.goal_index + 1 < app.goals.len() {
                app.goal_index += 1;
            }
        }
        Screen::Transactions => {
            let len = app.visible_transactions().len();
            let page = transaction_page(app);
            scroll_down(&mut app.transaction_index, &mut app.transaction_scroll, len, page);
        }
        Screen::Settings => {
            if app.settings_index + 1 < SettingsField::all().len() {
                app.settings_index += 1;
            }
        }
        Screen::SignIn => {
            if app.sign_in_index + 1 < SignInField::all().len() {
                app.sign_in_index += 1;
            }
        }
    }
}

fn handle_move_up(app: &mut App) {
    match app.screen {
        Screen::Dashboard => app.category_index = app.category_index.saturating_sub(1),
        Screen::Income => app.income_month = app.income_month.saturating_sub(1),
        Screen::Tracking => app.goal_index = app.goal_index.saturating_sub(1),
        Screen::Transactions => {
            scroll_up(&mut app.transaction_index, &mut app.transaction_scroll);
        }
        Screen::Settings => app.settings_index = app.settings_index.saturating_sub(1),
        Screen::SignIn => app.sign_in_index = app.sign_in_index.saturating_sub(1),
    }
}

fn handle_goto_top(app: &mut App) {
    match app.screen {
        Screen::Dashboard => app.category_index = 0,
        Screen::Income => app.income_month = 0,
        Screen::Tracking => app.goal_index = 0,
        Screen::Transactions => {
            scroll_to_top(&mut app.transaction_index, &mut app.transaction_scroll);
        }
        Screen::Settings => app.settings_index = 0,
        Screen::SignIn => app.sign_in_index = 0,
    }
}

fn handle_goto_bottom(app: &mut App) {
    match app.screen {
        Screen::Dashboard => app.category_index = app.plan.categories.len().saturating_sub(1),
        Screen::Income => app.income_month = Month::all().len() - 1,
        Screen::Tracking => app.goal_index = app.goals.len().saturating_sub(1),
        Screen::Transactions => {
            let len = app.visible_transactions().len();
            let page = transaction_page(app);
            scroll_to_bottom(&mut app.transaction_index, &mut app.transaction_scroll, len, page);
        }
        Screen::Settings => app.settings_index = SettingsField::all().len() - 1,
        Screen::SignIn => app.sign_in_index = SignInField::all().len() - 1,
    }
}

fn handle_enter(app: &mut App, store: &mut Store) -> Result<()> {
    match app.screen {
        Screen::Dashboard => {
            if !app.plan.categories.is_empty() {
                app.begin_edit(EditTarget::BudgetLimit(app.category_index));
            }
        }
        Screen::Income => {
            let (month, source) = (app.selected_month(), app.selected_source());
            if !app.incomes.is_checked(month, source) {
                app.incomes.set_checked(month, source, true);
                store.save_monthly_incomes(&app.incomes)?;
            }
            app.begin_edit(EditTarget::IncomeAmount(month, source));
        }
        Screen::Tracking => app.begin_edit(EditTarget::Threshold),
        Screen::Transactions => {
            if let Some((_, txn)) = app.selected_transaction() {
                let detail = format!(
                    "{} | {} | {} | {} | {}",
                    txn.date, txn.kind, txn.category, txn.amount, txn.description
                );
                app.set_status(detail);
            }
        }
        Screen::Settings => match app.selected_settings_field() {
            SettingsField::Name => app.begin_edit(EditTarget::ProfileName),
            SettingsField::Email => app.begin_edit(EditTarget::ProfileEmail),
            SettingsField::DarkMode => commands::toggle_preference(app, Preference::DarkMode),
            SettingsField::Notifications => {
                commands::toggle_preference(app, Preference::Notifications)
            }
        },
        Screen::SignIn => match app.selected_sign_in_field() {
            SignInField::Email => app.begin_edit(EditTarget::SignInEmail),
            SignInField::Password => app.begin_edit(EditTarget::SignInPassword),
            SignInField::Submit => commands::submit_sign_in(app, store)?,
        },
    }
    Ok(())
}

fn handle_escape(app: &mut App, store: &mut Store) -> Result<()> {
    if app.screen == Screen::Transactions && !app.search_input.is_empty() {
        app.search_input.clear();
        reset_transaction_cursor(app);
        app.refresh_transactions(store)?;
        app.set_status("Search cleared");
    } else {
        app.status_message.clear();
    }
    Ok(())
}
