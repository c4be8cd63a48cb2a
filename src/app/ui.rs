use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::Line,
    widgets::{
        Axis, Block, Borders, Cell, Chart, Clear, Dataset, GraphType, Paragraph, Row, Table,
        TableState, Tabs,
    },
};
use rust_decimal::Decimal;

use crate::{
    app::{
        Portfolio, Session,
        report::{UNPRICED_NOTE, summary_cells},
        utils::{to_chart_point, x_to_date},
    },
    models::{Metric, SUMMARY_COLUMNS, SummaryRow},
};

const PALETTE: [Color; 6] = [
    Color::Cyan,
    Color::Yellow,
    Color::Magenta,
    Color::Green,
    Color::LightBlue,
    Color::LightRed,
];

/// Which lots the chart plots.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum ChartView {
    #[default]
    Lot,
    Portfolio,
}

pub fn render(
    frame: &mut Frame,
    session: &Session,
    table_state: &mut TableState,
    metric: Metric,
    view: ChartView,
    popup_message: &Option<String>,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Percentage(40),
            Constraint::Min(8),
            Constraint::Length(3),
        ])
        .split(frame.area());

    render_tabs(frame, session, chunks[0]);

    match session.portfolio() {
        Some(portfolio) => {
            render_summary(frame, portfolio, table_state, chunks[1]);
            render_chart(frame, portfolio, table_state.selected(), metric, view, chunks[2]);
        }
        None => {
            let empty_message = Paragraph::new("No portfolio loaded.")
                .style(Style::default().fg(Color::Yellow))
                .block(Block::default().borders(Borders::ALL));
            frame.render_widget(empty_message, chunks[1]);
        }
    }

    render_status(frame, session, metric, view, chunks[3]);

    if let Some(message) = popup_message {
        let area = centered_rect(40, 3, frame.area());
        let popup = Paragraph::new(message.as_str())
            .style(Style::default().fg(Color::Cyan))
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(Clear, area);
        frame.render_widget(popup, area);
    }
}

fn render_tabs(frame: &mut Frame, session: &Session, area: Rect) {
    let labels = session.catalog().labels();
    let selected = session
        .current_source()
        .and_then(|label| session.catalog().position(label))
        .unwrap_or(0);

    let tabs = Tabs::new(labels)
        .select(selected)
        .block(Block::default().title("FIPI Asset Manager").borders(Borders::ALL))
        .style(Style::default().fg(Color::Gray))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );

    frame.render_widget(tabs, area);
}

fn render_summary(frame: &mut Frame, portfolio: &Portfolio, table_state: &mut TableState, area: Rect) {
    let header_cells = SUMMARY_COLUMNS
        .iter()
        .map(|h| Cell::from(*h).style(Style::default().fg(Color::Yellow)));
    let header = Row::new(header_cells).style(Style::default()).height(1);

    let rows = portfolio.summary().iter().map(|row| {
        let style = if row.is_total() {
            Style::default().add_modifier(Modifier::BOLD)
        } else if !row.has_metrics() {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        };

        let cells = summary_cells(row)
            .into_iter()
            .enumerate()
            .map(|(i, text)| match gain_of(row, i) {
                Some(gain) => Cell::from(text).style(Style::default().fg(gain_color(gain))),
                None => Cell::from(text),
            })
            .collect::<Vec<_>>();

        Row::new(cells).style(style).height(1)
    });

    let widths = [
        Constraint::Length(16),
        Constraint::Length(13),
        Constraint::Length(14),
        Constraint::Length(8),
        Constraint::Length(14),
        Constraint::Length(10),
        Constraint::Length(14),
        Constraint::Length(14),
        Constraint::Length(13),
        Constraint::Length(13),
    ];

    let mut title = format!("{} (as of {})", portfolio.source(), portfolio.as_of());
    if portfolio.summary().has_unpriced() {
        title.push_str("  ");
        title.push_str(UNPRICED_NOTE);
    }
    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().title(title).borders(Borders::ALL))
        .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED));

    frame.render_stateful_widget(table, area, table_state);
}

/// Signed value behind the gain columns, used for coloring.
fn gain_of(row: &SummaryRow, column: usize) -> Option<Decimal> {
    match column {
        7 => *row.est_profit(),
        8 => *row.pct_est_profit(),
        9 => *row.annual_return(),
        _ => None,
    }
}

fn gain_color(gain: Decimal) -> Color {
    if gain >= Decimal::ZERO {
        Color::Green
    } else {
        Color::Red
    }
}

fn render_chart(
    frame: &mut Frame,
    portfolio: &Portfolio,
    selected: Option<usize>,
    metric: Metric,
    view: ChartView,
    area: Rect,
) {
    let lots: Vec<usize> = match view {
        ChartView::Lot => selected
            .filter(|i| *i < portfolio.lots().len())
            .or(if portfolio.lots().is_empty() { None } else { Some(0) })
            .into_iter()
            .collect(),
        ChartView::Portfolio => (0..portfolio.lots().len()).collect(),
    };

    let series: Vec<(String, Vec<(f64, f64)>)> = lots
        .iter()
        .map(|i| {
            let table = &portfolio.tables()[*i];
            let points = table
                .series(metric)
                .into_iter()
                .filter_map(|(date, value)| to_chart_point(date, value))
                .collect();
            (table.asset_id().clone(), points)
        })
        .collect();

    let title = match (view, lots.first()) {
        (ChartView::Lot, Some(i)) => format!("{} - {}", portfolio.lots()[*i].asset_id(), metric),
        _ => format!("Portfolio - {}", metric),
    };
    let block = Block::default().title(title).borders(Borders::ALL);

    let Some((x_bounds, y_bounds)) = bounds(&series) else {
        let empty = Paragraph::new("No price data available.")
            .style(Style::default().fg(Color::Yellow))
            .block(block);
        frame.render_widget(empty, area);
        return;
    };

    let datasets = series
        .iter()
        .enumerate()
        .map(|(i, (name, points))| {
            Dataset::default()
                .name(name.clone())
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(PALETTE[i % PALETTE.len()]))
                .data(points)
        })
        .collect::<Vec<_>>();

    let x_labels: Vec<Line> = [x_bounds[0], x_bounds[1]]
        .iter()
        .map(|x| Line::from(x_to_date(*x).map(|d| d.to_string()).unwrap_or_default()))
        .collect();
    let y_labels: Vec<Line> = [y_bounds[0], (y_bounds[0] + y_bounds[1]) / 2.0, y_bounds[1]]
        .iter()
        .map(|y| Line::from(format!("{:.2}", y)))
        .collect();

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .title("Date")
                .style(Style::default().fg(Color::Gray))
                .bounds(x_bounds)
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .title(metric.to_string())
                .style(Style::default().fg(Color::Gray))
                .bounds(y_bounds)
                .labels(y_labels),
        );

    frame.render_widget(chart, area);
}

fn bounds(series: &[(String, Vec<(f64, f64)>)]) -> Option<([f64; 2], [f64; 2])> {
    let mut points = series.iter().flat_map(|(_, points)| points.iter());
    let first = points.next()?;
    let (mut x0, mut x1, mut y0, mut y1) = (first.0, first.0, first.1, first.1);

    for (x, y) in points {
        x0 = x0.min(*x);
        x1 = x1.max(*x);
        y0 = y0.min(*y);
        y1 = y1.max(*y);
    }

    if x0 == x1 {
        x1 += 1.0;
    }
    if y0 == y1 {
        y0 -= 1.0;
        y1 += 1.0;
    }

    Some(([x0, x1], [y0, y1]))
}

fn render_status(frame: &mut Frame, session: &Session, metric: Metric, view: ChartView, area: Rect) {
    let status = match load_error_message(session) {
        Some(message) => Paragraph::new(message).style(Style::default().fg(Color::Red)),
        None => Paragraph::new(format!(
            "←/→ portfolio  ↑/↓ asset  m metric ({})  v view ({:?})  r reload  u update asset  q quit",
            metric, view
        ))
        .style(Style::default().fg(Color::Gray)),
    };

    frame.render_widget(status.block(Block::default().borders(Borders::ALL)), area);
}

/// Status text for the last failed load. Mentions the previous portfolio
/// only when one is still on screen.
pub fn load_error_message(session: &Session) -> Option<String> {
    let err = session.last_error()?;
    Some(if session.portfolio().is_some() {
        format!("Load failed: {} (showing previous portfolio)", err)
    } else {
        format!("Load failed: {}", err)
    })
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
