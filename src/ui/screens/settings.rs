use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph},
    Frame,
};

use crate::models::Preference;
use crate::ui::app::{App, SettingsField};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let p = app.palette();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Profile
            Constraint::Length(4), // Preferences
            Constraint::Min(3),    // Hints
        ])
        .split(area);

    let row = |field: SettingsField, label: &str, value: String| {
        let selected = app.selected_settings_field() == field;
        let label_style = if selected {
            p.selected_style()
        } else {
            p.dim_style()
        };
        ListItem::new(Line::from(vec![
            Span::styled(format!(" {label:<22}"), label_style),
            Span::styled(format!(" {value}"), p.normal_style()),
        ]))
    };
    let placeholder = |value: &str| {
        if value.is_empty() {
            "(not set)".to_string()
        } else {
            value.to_string()
        }
    };
    let checkbox = |pref: Preference| {
        if app.settings.get(pref) {
            "[x]".to_string()
        } else {
            "[ ]".to_string()
        }
    };

    let profile = List::new(vec![
        row(SettingsField::Name, "Name", placeholder(&app.profile.name)),
        row(SettingsField::Email, "Email", placeholder(&app.profile.email)),
    ])
    .block(p.panel("Profile"));
    f.render_widget(profile, chunks[0]);

    let prefs = List::new(vec![
        row(
            SettingsField::DarkMode,
            Preference::DarkMode.label(),
            checkbox(Preference::DarkMode),
        ),
        row(
            SettingsField::Notifications,
            Preference::Notifications.label(),
            checkbox(Preference::Notifications),
        ),
    ])
    .block(p.panel("Preferences"));
    f.render_widget(prefs, chunks[1]);

    let hints = Paragraph::new(vec![
        Line::from(Span::styled(
            " Enter edits a field or toggles a preference. Changes stay here until saved.",
            p.dim_style(),
        )),
        Line::from(vec![
            Span::styled(" P ", Style::default().fg(p.accent).add_modifier(Modifier::BOLD)),
            Span::styled("Save Profile   ", p.normal_style()),
            Span::styled(" S ", Style::default().fg(p.accent).add_modifier(Modifier::BOLD)),
            Span::styled("Save Settings   ", p.normal_style()),
            Span::styled(" E ", Style::default().fg(p.accent).add_modifier(Modifier::BOLD)),
            Span::styled("Export transactions to CSV", p.normal_style()),
        ]),
    ])
    .block(p.panel("Account"));
    f.render_widget(hints, chunks[2]);
}
