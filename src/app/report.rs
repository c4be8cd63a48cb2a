use std::fmt::Write;

use crate::{
    app::utils::{format_date, format_decimal, format_percent, format_volume},
    models::{SUMMARY_COLUMNS, SummaryRow, SummaryTable},
};

/// Footnote for lots flagged with `*`.
pub const UNPRICED_NOTE: &str = "* no price data, not included in Total";

/// Cells of one summary row in column order. Lots without price data get a
/// trailing `*` on their id.
pub fn summary_cells(row: &SummaryRow) -> [String; 10] {
    [
        if row.is_total() || row.has_metrics() {
            row.asset_id().clone()
        } else {
            format!("{}*", row.asset_id())
        },
        format_date(*row.purchase_date()),
        format_decimal(*row.purchase_price(), 3),
        format_volume(*row.volume()),
        format_decimal(*row.acquisition(), 2),
        format_decimal(*row.close(), 2),
        format_decimal(*row.market(), 2),
        format_decimal(*row.est_profit(), 2),
        format_percent(*row.pct_est_profit()),
        format_percent(*row.annual_return()),
    ]
}

/// Plain-text rendering of the summary table, one line per row.
pub fn render_summary(summary: &SummaryTable) -> String {
    let rows: Vec<[String; 10]> = summary.iter().map(summary_cells).collect();

    let mut widths = SUMMARY_COLUMNS.map(str::len);
    for cells in &rows {
        for (width, cell) in widths.iter_mut().zip(cells.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let header: Vec<String> = SUMMARY_COLUMNS.iter().map(|h| h.to_string()).collect();
    write_line(&mut out, &header, &widths);
    for cells in &rows {
        write_line(&mut out, cells, &widths);
    }
    if summary.has_unpriced() {
        let _ = writeln!(out, "{}", UNPRICED_NOTE);
    }

    out
}

fn write_line(out: &mut String, cells: &[String], widths: &[usize; 10]) {
    let line = cells
        .iter()
        .zip(widths.iter())
        .enumerate()
        .map(|(i, (cell, width))| {
            if i == 0 {
                format!("{:<width$}", cell, width = width)
            } else {
                format!("{:>width$}", cell, width = width)
            }
        })
        .collect::<Vec<_>>()
        .join("  ");
    let _ = writeln!(out, "{}", line.trim_end());
}
