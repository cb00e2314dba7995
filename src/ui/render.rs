use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Tabs},
    Frame,
};

use super::app::{App, InputMode, Screen};
use super::commands;
use super::screens;
use super::util::{display_command, mask};

pub(crate) fn render(f: &mut Frame, app: &App) {
    let p = app.palette();
    f.render_widget(
        Block::default().style(Style::default().bg(p.header_bg)),
        f.area(),
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Tab bar
            Constraint::Min(5),    // Main content
            Constraint::Length(1), // Status bar
            Constraint::Length(1), // Command bar
        ])
        .split(f.area());

    render_tab_bar(f, chunks[0], app);
    render_screen(f, chunks[1], app);
    render_status_bar(f, chunks[2], app);
    render_command_bar(f, chunks[3], app);

    if app.show_help {
        render_help_overlay(f, f.area(), app);
    }
}

fn render_tab_bar(f: &mut Frame, area: Rect, app: &App) {
    let p = app.palette();
    let titles: Vec<Line> = Screen::all()
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let num = i + 1;
            if *s == app.screen {
                Line::from(vec![
                    Span::styled(format!("{num}:"), p.dim_style()),
                    Span::styled(
                        s.to_string(),
                        Style::default().fg(p.accent).add_modifier(Modifier::BOLD),
                    ),
                ])
            } else {
                Line::from(Span::styled(format!("{num}:{s}"), p.dim_style()))
            }
        })
        .collect();

    let tabs = Tabs::new(titles)
        .divider(Span::styled(" | ", Style::default().fg(p.overlay)))
        .style(Style::default().bg(p.header_bg));

    f.render_widget(tabs, area);
}

fn render_screen(f: &mut Frame, area: Rect, app: &App) {
    match app.screen {
        Screen::Dashboard => screens::dashboard::render(f, area, app),
        Screen::Income => screens::income::render(f, area, app),
        Screen::Tracking => screens::tracking::render(f, area, app),
        Screen::Transactions => screens::transactions::render(f, area, app),
        Screen::Settings => screens::settings::render(f, area, app),
        Screen::SignIn => screens::sign_in::render(f, area, app),
    }
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let p = app.palette();
    let mode_label = format!(" {} ", app.input_mode);
    let mode_bg = match app.input_mode {
        InputMode::Normal => p.accent,
        InputMode::Command | InputMode::Editing => p.green,
        InputMode::Search => p.yellow,
        InputMode::Confirm => p.red,
    };
    let mode_style = Style::default()
        .fg(p.header_bg)
        .bg(mode_bg)
        .add_modifier(Modifier::BOLD);

    let session = if app.signed_in { "signed in" } else { "local" };
    let info = format!(
        " {} | {} | {} txns | {session}",
        app.screen,
        app.plan.time_frame,
        app.transactions.len()
    );

    let right = match app.screen {
        Screen::Dashboard => " Enter limit | s spent | t frame | a/x category | ? help ",
        Screen::Income => " h/l source | Space toggle | Enter amount | ? help ",
        Screen::Tracking => " r threshold | :goal add | x delete goal | ? help ",
        Screen::Transactions => " a add | D delete | /search | :export | ? help ",
        Screen::Settings => " Enter edit | P save profile | S save prefs | ? help ",
        Screen::SignIn => " Enter edit/submit | j/k field | ? help ",
    };

    let available = area.width as usize;
    let used = mode_label.chars().count() + info.chars().count() + right.chars().count();
    let pad = available.saturating_sub(used);

    let bar = Paragraph::new(Line::from(vec![
        Span::styled(&mode_label, mode_style),
        Span::styled(&info, p.status_bar_style()),
        Span::styled(" ".repeat(pad), p.status_bar_style()),
        Span::styled(right, p.status_bar_style()),
    ]));
    f.render_widget(bar, area);
}

fn render_command_bar(f: &mut Frame, area: Rect, app: &App) {
    let p = app.palette();
    let (content, cursor_offset) = match app.input_mode {
        InputMode::Command => {
            let shown = display_command(&app.command_input);
            let offset = 1 + shown.chars().count() as u16;
            (
                Line::from(vec![
                    Span::styled(":", Style::default().fg(p.accent)),
                    Span::styled(shown, p.command_bar_style()),
                ]),
                Some(offset),
            )
        }
        InputMode::Search => {
            let match_info = if app.search_input.is_empty() {
                String::new()
            } else {
                format!("  ({} matches)", app.visible_transactions().len())
            };
            (
                Line::from(vec![
                    Span::styled("/", Style::default().fg(p.yellow)),
                    Span::styled(&app.search_input, p.command_bar_style()),
                    Span::styled(match_info, p.dim_style()),
                ]),
                Some(1 + app.search_input.chars().count() as u16),
            )
        }
        InputMode::Editing => {
            let label = app
                .edit_target
                .map(|t| t.label())
                .unwrap_or_else(|| "edit".into());
            let prompt = format!("{label}> ");
            let shown = match app.edit_target {
                Some(t) if t.is_secret() => mask(&app.edit_input),
                _ => app.edit_input.clone(),
            };
            let offset = (prompt.chars().count() + shown.chars().count()) as u16;
            (
                Line::from(vec![
                    Span::styled(prompt, Style::default().fg(p.green)),
                    Span::styled(shown, p.command_bar_style()),
                ]),
                Some(offset),
            )
        }
        InputMode::Confirm => (
            Line::from(vec![
                Span::styled(&app.confirm_message, Style::default().fg(p.yellow)),
                Span::styled(" [y/N] ", Style::default().fg(p.red)),
            ]),
            None,
        ),
        InputMode::Normal => (
            if app.status_message.is_empty() {
                Line::from(Span::styled(
                    " Press : for commands, / to search, ? for help",
                    p.dim_style(),
                ))
            } else {
                Line::from(Span::styled(&app.status_message, p.command_bar_style()))
            },
            None,
        ),
    };

    let bar = Paragraph::new(content).style(Style::default().bg(p.command_bg));
    f.render_widget(bar, area);

    if let Some(offset) = cursor_offset {
        f.set_cursor_position((area.x + offset, area.y));
    }
}

fn render_help_overlay(f: &mut Frame, area: Rect, app: &App) {
    let p = app.palette();
    let key_line = |text: &'static str| Line::from(Span::styled(text, p.normal_style()));

    let mut help_text = vec![
        Line::from(Span::styled(
            " CacheBudget Help ",
            Style::default().fg(p.accent).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(" Navigation", p.heading_style())),
        key_line("  j/k or Up/Down   Move cursor           1-6        Switch tabs"),
        key_line("  Tab/Shift-Tab    Cycle tabs            g/G        Top/Bottom"),
        key_line("  h/l (Income)     Move between sources  Ctrl-q     Quit"),
        Line::from(""),
        Line::from(Span::styled(" Actions", p.heading_style())),
        key_line("  :               Command mode           /          Search transactions"),
        key_line("  Enter           Edit / toggle / submit Esc        Cancel"),
        key_line("  Space (Income)  Toggle income source   t (Dash)   Cycle time frame"),
        key_line("  a/x (Dash)      Add/remove category    D (Txns)   Delete transaction"),
        key_line("  P/S (Settings)  Save profile/prefs     r (Track)  Set red zone"),
        Line::from(""),
        Line::from(Span::styled(" Commands", p.heading_style())),
    ];

    // One line per command, longest alias wins
    let mut by_desc: std::collections::HashMap<&str, &str> = std::collections::HashMap::new();
    for (&name, cmd) in commands::COMMANDS.iter() {
        let entry = by_desc.entry(cmd.description).or_insert(name);
        if name.len() > entry.len() {
            *entry = name;
        }
    }
    let mut cmd_lines: Vec<(&str, &str)> = by_desc.into_iter().map(|(d, n)| (n, d)).collect();
    cmd_lines.sort_by_key(|(name, _)| *name);
    for (name, desc) in &cmd_lines {
        help_text.push(Line::from(Span::styled(
            format!("  :{name:<16} {desc}"),
            p.normal_style(),
        )));
    }

    help_text.push(Line::from(""));
    help_text.push(Line::from(Span::styled(
        " Press any key to close ",
        p.dim_style(),
    )));

    let popup_height = (help_text.len() as u16 + 2).min(area.height.saturating_sub(2));
    let popup_width = 80.min(area.width.saturating_sub(4));
    let x = area.x + (area.width.saturating_sub(popup_width)) / 2;
    let y = area.y + (area.height.saturating_sub(popup_height)) / 2;
    let popup_area = Rect::new(x, y, popup_width, popup_height);

    f.render_widget(Clear, popup_area);
    let help = Paragraph::new(help_text).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(p.accent))
            .style(Style::default().bg(p.header_bg)),
    );
    f.render_widget(help, popup_area);
}
