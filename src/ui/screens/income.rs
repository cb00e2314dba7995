use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Cell, Row, Table},
    Frame,
};
use rust_decimal::prelude::ToPrimitive;

use crate::models::{IncomeSource, Month};
use crate::ui::app::App;
use crate::ui::util::format_amount;

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(16), // 12 months + header + border
            Constraint::Min(6),     // Monthly income chart
        ])
        .split(area);

    render_grid(f, chunks[0], app);
    render_chart(f, chunks[1], app);
}

fn render_grid(f: &mut Frame, area: Rect, app: &App) {
    let p = app.palette();
    let mut header_cells = vec![Cell::from("Month").style(p.header_style())];
    for source in IncomeSource::all() {
        header_cells.push(Cell::from(source.as_str()).style(p.header_style()));
    }
    header_cells.push(Cell::from("Total").style(p.header_style()));
    let header = Row::new(header_cells).height(1);

    let rows: Vec<Row> = Month::all()
        .iter()
        .enumerate()
        .map(|(row, month)| {
            let mut cells = vec![Cell::from(month.as_str())];
            for (col, source) in IncomeSource::all().iter().enumerate() {
                let text = if app.incomes.is_checked(*month, *source) {
                    format!("[x] {}", format_amount(app.incomes.amount(*month, *source)))
                } else {
                    "[ ]".to_string()
                };
                let cell = Cell::from(text);
                let cell = if row == app.income_month && col == app.income_source {
                    cell.style(p.selected_style())
                } else if app.incomes.is_checked(*month, *source) {
                    cell.style(p.income_style())
                } else {
                    cell.style(p.dim_style())
                };
                cells.push(cell);
            }
            cells.push(
                Cell::from(format_amount(app.incomes.month_total(*month)))
                    .style(Style::default().fg(p.accent).add_modifier(Modifier::BOLD)),
            );

            let style = if row == app.income_month {
                p.alt_row_style()
            } else {
                p.normal_style()
            };
            Row::new(cells).style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(11),
        Constraint::Length(16),
        Constraint::Length(16),
        Constraint::Length(16),
        Constraint::Length(16),
        Constraint::Min(14),
    ];

    let title = format!(
        "Monthly Income (year total {})",
        format_amount(app.incomes.year_total())
    );
    let table = Table::new(rows, widths).header(header).block(p.panel(title));
    f.render_widget(table, area);
}

fn render_chart(f: &mut Frame, area: Rect, app: &App) {
    let p = app.palette();
    let totals = app.incomes.yearly_totals();
    let bars: Vec<Bar> = Month::all()
        .iter()
        .map(|month| {
            let total = totals[month.index()];
            Bar::default()
                .value(total.round().to_u64().unwrap_or(0))
                .text_value(String::new())
                .label(Line::from(Span::raw(month.short())))
                .style(Style::default().fg(p.green))
        })
        .collect();

    let chart = BarChart::default()
        .block(p.panel("Income by Month"))
        .data(BarGroup::default().bars(&bars))
        .bar_width(5)
        .bar_gap(1);

    f.render_widget(chart, area);
}
