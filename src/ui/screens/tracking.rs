use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Chart, Dataset, GraphType, List, ListItem, Paragraph},
    Frame,
};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::models::Month;
use crate::report;
use crate::ui::app::App;
use crate::ui::util::{format_amount, progress_bar, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(55), // Income vs spending chart
            Constraint::Min(6),         // Budgets + goals
        ])
        .split(area);

    render_chart(f, chunks[0], app);

    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(chunks[1]);

    render_budget_tracking(f, bottom[0], app);
    render_goals(f, bottom[1], app);
}

fn to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or(0.0)
}

fn render_chart(f: &mut Frame, area: Rect, app: &App) {
    let p = app.palette();
    let income: Vec<(f64, f64)> = app
        .monthly
        .iter()
        .map(|(m, s)| (m.index() as f64, to_f64(s.income)))
        .collect();
    let spending: Vec<(f64, f64)> = app
        .monthly
        .iter()
        .map(|(m, s)| (m.index() as f64, to_f64(s.expenses)))
        .collect();
    let threshold = to_f64(app.threshold);
    let threshold_line = [(0.0, threshold), (11.0, threshold)];

    let mut datasets = vec![
        Dataset::default()
            .name("Income")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(p.green))
            .data(&income),
        Dataset::default()
            .name("Spending")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(p.red))
            .data(&spending),
    ];
    if app.threshold > Decimal::ZERO {
        datasets.push(
            Dataset::default()
                .name("Red zone")
                .marker(symbols::Marker::Dot)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(p.yellow))
                .data(&threshold_line),
        );
    }

    let peak = income
        .iter()
        .map(|(_, y)| *y)
        .fold(threshold, f64::max)
        .max(to_f64(report::spending_peak(&app.monthly)));
    let y_max = if peak > 0.0 { peak * 1.1 } else { 100.0 };

    let x_labels: Vec<Span> = [Month::January, Month::April, Month::July, Month::October, Month::December]
        .iter()
        .map(|m| Span::styled(m.short(), p.dim_style()))
        .collect();
    let y_labels = vec![
        Span::styled("0", p.dim_style()),
        Span::styled(format!("{:.0}", y_max / 2.0), p.dim_style()),
        Span::styled(format!("{y_max:.0}"), p.dim_style()),
    ];

    let red_zone = report::red_zone_months(&app.monthly, app.threshold);
    let title = if red_zone.is_empty() {
        "Income vs Spending".to_string()
    } else {
        let names: Vec<&str> = red_zone.iter().map(|m| m.short()).collect();
        format!("Income vs Spending (red zone: {})", names.join(", "))
    };

    let chart = Chart::new(datasets)
        .block(p.panel(title))
        .x_axis(
            Axis::default()
                .style(p.dim_style())
                .bounds([0.0, 11.0])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .style(p.dim_style())
                .bounds([0.0, y_max])
                .labels(y_labels),
        );

    f.render_widget(chart, area);
}

fn render_budget_tracking(f: &mut Frame, area: Rect, app: &App) {
    let p = app.palette();
    if app.tracking.is_empty() {
        let msg = Paragraph::new(Line::from(Span::styled(
            "No budget categories",
            p.dim_style(),
        )))
        .centered()
        .block(p.panel("Budget Tracking"));
        f.render_widget(msg, area);
        return;
    }

    let items: Vec<ListItem> = app
        .tracking
        .iter()
        .map(|b| {
            let color = if b.over { p.red } else { p.green };
            let ratio = report::bar_fraction(b.spent, b.budget);
            ListItem::new(Line::from(vec![
                Span::styled(format!(" {:<14}", truncate(&b.category, 14)), p.normal_style()),
                Span::styled(
                    format!("{:>11} / {:<11} ", format_amount(b.spent), format_amount(b.budget)),
                    Style::default().fg(color),
                ),
                Span::styled(progress_bar(ratio, 12), Style::default().fg(color)),
                Span::styled(
                    format!(" {:.0}%", b.percent),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ),
            ]))
        })
        .collect();

    f.render_widget(List::new(items).block(p.panel("Budget Tracking")), area);
}

fn render_goals(f: &mut Frame, area: Rect, app: &App) {
    let p = app.palette();
    if app.goal_progress.is_empty() {
        let msg = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled("No savings goals", p.dim_style())),
            Line::from(Span::styled(
                "Add one with :goal <name> <target>",
                p.dim_style(),
            )),
        ])
        .centered()
        .block(p.panel("Savings Goals"));
        f.render_widget(msg, area);
        return;
    }

    let items: Vec<ListItem> = app
        .goal_progress
        .iter()
        .enumerate()
        .map(|(i, g)| {
            let name_style = if i == app.goal_index {
                p.selected_style()
            } else {
                p.normal_style()
            };
            let ratio = report::bar_fraction(g.saved, g.target);
            ListItem::new(vec![
                Line::from(vec![
                    Span::styled(format!(" {}", truncate(&g.name, 20)), name_style),
                    Span::styled(
                        format!(
                            "  {} / {}",
                            format_amount(g.saved),
                            format_amount(g.target)
                        ),
                        p.dim_style(),
                    ),
                ]),
                Line::from(vec![
                    Span::raw(" "),
                    Span::styled(progress_bar(ratio, 20), p.income_style()),
                    Span::styled(format!(" {:.0}%", g.percent), p.income_style()),
                ]),
            ])
        })
        .collect();

    f.render_widget(List::new(items).block(p.panel("Savings Goals")), area);
}
