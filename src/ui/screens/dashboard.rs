use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, List, ListItem, Paragraph},
    Frame,
};

use crate::models::TimeFrame;
use crate::report;
use crate::ui::app::App;
use crate::ui::util::{format_amount, progress_bar, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Time frame selector
            Constraint::Min(8),    // Plan + allocation
        ])
        .split(area);

    render_time_frame(f, chunks[0], app);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(chunks[1]);

    render_plan(f, body[0], app);
    render_allocation(f, body[1], app);
}

fn render_time_frame(f: &mut Frame, area: Rect, app: &App) {
    let p = app.palette();
    let mut spans = vec![Span::styled(" Budget for: ", p.dim_style())];
    for frame in TimeFrame::all() {
        let style = if *frame == app.plan.time_frame {
            p.selected_style().add_modifier(Modifier::BOLD)
        } else {
            p.normal_style()
        };
        spans.push(Span::styled(format!(" {frame} "), style));
        spans.push(Span::raw(" "));
    }
    spans.push(Span::styled(
        format!("   Total limit: {}", format_amount(app.plan.total_limit())),
        Style::default().fg(p.accent).add_modifier(Modifier::BOLD),
    ));

    f.render_widget(
        Paragraph::new(Line::from(spans)).block(p.panel("Budget Plan")),
        area,
    );
}

fn render_plan(f: &mut Frame, area: Rect, app: &App) {
    let p = app.palette();
    if app.plan.categories.is_empty() {
        let msg = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled("No budget categories", p.dim_style())),
            Line::from(""),
            Line::from(Span::styled(
                "Press a or use :add-category <name>",
                p.dim_style(),
            )),
        ])
        .centered()
        .block(p.panel("Categories"));
        f.render_widget(msg, area);
        return;
    }

    let items: Vec<ListItem> = app
        .plan
        .categories
        .iter()
        .enumerate()
        .map(|(i, cat)| {
            let over = report::is_over(cat.spent, cat.limit);
            let color = if over { p.red } else { p.green };
            let ratio = report::bar_fraction(cat.spent, cat.limit);
            let pct = report::progress_percent(cat.spent, cat.limit);

            let name_style = if i == app.category_index {
                p.selected_style()
            } else if i % 2 == 1 {
                p.alt_row_style()
            } else {
                p.normal_style()
            };

            ListItem::new(Line::from(vec![
                Span::styled(format!(" {:<16}", truncate(&cat.name, 16)), name_style),
                Span::styled(
                    format!(
                        " {:>11} / {:<11} ",
                        format_amount(cat.spent),
                        format_amount(cat.limit)
                    ),
                    Style::default().fg(color),
                ),
                Span::styled(progress_bar(ratio, 16), Style::default().fg(color)),
                Span::styled(
                    format!(" {pct:.0}%{}", if over { " over" } else { "" }),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ),
            ]))
        })
        .collect();

    let title = format!("Categories ({})", app.plan.time_frame);
    f.render_widget(List::new(items).block(p.panel(title)), area);
}

fn render_allocation(f: &mut Frame, area: Rect, app: &App) {
    let p = app.palette();
    let shares = report::allocation(&app.plan);
    if shares.iter().all(|(_, share)| *share == 0.0) {
        let msg = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled("Set limits to see the split", p.dim_style())),
        ])
        .centered()
        .block(p.panel("Allocation"));
        f.render_widget(msg, area);
        return;
    }

    let bars: Vec<Bar> = shares
        .iter()
        .map(|(name, share)| {
            let pct = (share * 100.0).round() as u64;
            Bar::default()
                .value(pct)
                .text_value(format!("{pct}%"))
                .label(Line::from(truncate(name, 8)))
                .style(Style::default().fg(p.accent))
                .value_style(
                    Style::default()
                        .fg(p.header_bg)
                        .bg(p.accent)
                        .add_modifier(Modifier::BOLD),
                )
        })
        .collect();

    let chart = BarChart::default()
        .block(p.panel("Allocation"))
        .data(BarGroup::default().bars(&bars))
        .bar_width(8)
        .bar_gap(1)
        .max(100);

    f.render_widget(chart, area);
}
