use ratatui::{
    layout::{Constraint, Rect},
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row, Table},
    Frame,
};

use crate::ui::app::App;
use crate::ui::util::{format_amount, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let p = app.palette();
    let visible = app.visible_transactions();

    if visible.is_empty() {
        let msg = if app.search_input.is_empty() {
            vec![
                Line::from(""),
                Line::from(Span::styled("No transactions yet", p.dim_style())),
                Line::from(""),
                Line::from(Span::styled(
                    "Press a to log one, or :import <file.csv>",
                    p.dim_style(),
                )),
            ]
        } else {
            vec![
                Line::from(""),
                Line::from(Span::styled(
                    format!("No transactions matching '{}'", app.search_input),
                    p.dim_style(),
                )),
                Line::from(""),
                Line::from(Span::styled("Press Esc to clear the search", p.dim_style())),
            ]
        };
        f.render_widget(
            Paragraph::new(msg)
                .centered()
                .block(p.panel("Transactions (0)")),
            area,
        );
        return;
    }

    let header_cells = ["Date", "Type", "Description", "Category", "Amount"]
        .iter()
        .map(|h| Cell::from(*h).style(p.header_style()));
    let header = Row::new(header_cells).height(1);

    let rows: Vec<Row> = visible
        .iter()
        .enumerate()
        .skip(app.transaction_scroll)
        .take(area.height.saturating_sub(3) as usize)
        .filter_map(|(row, &index)| app.transactions.get(index).map(|t| (row, t)))
        .map(|(row, txn)| {
            let amount_style = if txn.is_income() {
                p.income_style()
            } else {
                p.expense_style()
            };
            let sign = if txn.is_income() { "+" } else { "-" };

            let style = if row == app.transaction_index {
                p.selected_style()
            } else if row % 2 == 1 {
                p.alt_row_style()
            } else {
                p.normal_style()
            };

            Row::new(vec![
                Cell::from(txn.date.clone()),
                Cell::from(txn.kind.as_str()),
                Cell::from(truncate(&txn.description, 40)),
                Cell::from(truncate(&txn.category, 18)),
                Cell::from(Span::styled(
                    format!("{sign}{}", format_amount(txn.amount)),
                    amount_style,
                )),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(12),
        Constraint::Length(8),
        Constraint::Min(20),
        Constraint::Length(18),
        Constraint::Length(14),
    ];

    let title = if app.search_input.is_empty() {
        format!("Transactions ({})", visible.len())
    } else {
        format!(
            "Transactions ({} of {}) search: '{}'",
            visible.len(),
            app.transactions.len(),
            app.search_input
        )
    };

    let table = Table::new(rows, widths).header(header).block(p.panel(title));
    f.render_widget(table, area);
}
