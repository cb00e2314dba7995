use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::ui::app::{App, SignInField};
use crate::ui::util::mask;

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let p = app.palette();
    let width = 56.min(area.width);
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(width),
            Constraint::Fill(1),
        ])
        .split(area);
    let form_area = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(11),
            Constraint::Min(0),
        ])
        .split(columns[1])[1];

    let selected = app.selected_sign_in_field();
    let field = |which: SignInField, label: &str, value: String| {
        let style = if selected == which {
            p.selected_style()
        } else {
            p.normal_style()
        };
        vec![
            Line::from(Span::styled(format!(" {label}"), p.dim_style())),
            Line::from(Span::styled(format!(" {value:<40} "), style)),
        ]
    };

    let mut lines = vec![Line::from("")];
    lines.extend(field(SignInField::Email, "Email", app.sign_in_email.clone()));
    lines.push(Line::from(""));
    lines.extend(field(
        SignInField::Password,
        "Password",
        mask(&app.sign_in_password),
    ));
    lines.push(Line::from(""));

    let button_style = if selected == SignInField::Submit {
        Style::default()
            .fg(p.header_bg)
            .bg(p.green)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(p.green).add_modifier(Modifier::BOLD)
    };
    lines.push(Line::from(Span::styled("  [ Sign In ]  ", button_style)));
    lines.push(Line::from(""));
    let session = if app.signed_in {
        Span::styled(" Signed in. Token stored locally.", p.income_style())
    } else {
        Span::styled(format!(" Server: {}", app.api_url), p.dim_style())
    };
    lines.push(Line::from(session));

    f.render_widget(Paragraph::new(lines).block(p.panel("Sign In")), form_area);
}
