use chrono::NaiveDate;
use rust_decimal::{
    Decimal,
    prelude::{FromPrimitive, ToPrimitive},
};

use crate::models::{
    Lot, PerformanceRow, PerformanceTable, PriceSeries, SummaryRow, SummaryTable,
};

const DAYS_PER_YEAR: f64 = 365.0;

/// Performance of `lot` on every date of `series` from its purchase date
/// through `as_of`.
///
/// For a lot sold by `as_of` the market rows stop before the sale date and a
/// realized row priced at the sale price stands on the sale date. A sale
/// after `as_of` is ignored and the lot is valued as still held. Without
/// price data the table is empty.
pub fn performance_table(
    lot: &Lot,
    series: Option<&PriceSeries>,
    as_of: NaiveDate,
) -> PerformanceTable {
    let series = match series {
        Some(series) if !series.is_empty() => series,
        _ => return PerformanceTable::empty(lot.asset_id()),
    };

    let sale = lot.sale_by(as_of);
    let acquisition = lot.acquisition_value();
    let mut rows: Vec<PerformanceRow> = series
        .bars()
        .iter()
        .filter(|bar| bar.date() >= lot.purchase_date() && *bar.date() <= as_of)
        .filter(|bar| sale.is_none_or(|sale| bar.date() < sale.date()))
        .map(|bar| performance_row(lot, *bar.date(), *bar.close(), acquisition, false))
        .collect();

    if let Some(sale) = sale {
        rows.push(performance_row(
            lot,
            *sale.date(),
            *sale.price(),
            acquisition,
            true,
        ));
    }

    PerformanceTable::new(lot.asset_id().clone(), rows)
}

fn performance_row(
    lot: &Lot,
    date: NaiveDate,
    close: Decimal,
    acquisition: Decimal,
    realized: bool,
) -> PerformanceRow {
    let market = lot.value_at(close);
    let est_profit = market - acquisition;

    PerformanceRow::new(
        date,
        acquisition,
        close,
        market,
        est_profit,
        percent_profit(est_profit, acquisition),
        realized,
    )
}

/// Profit as a fraction of cost, `None` for a zero cost basis.
pub fn percent_profit(est_profit: Decimal, acquisition: Decimal) -> Option<Decimal> {
    if acquisition.is_zero() {
        return None;
    }
    est_profit.checked_div(acquisition)
}

/// Holding-period return annualized over the days since purchase:
/// `(market / acquisition)^(365 / days) - 1`.
pub fn annual_return(
    acquisition: Decimal,
    market: Decimal,
    purchase_date: NaiveDate,
    date: NaiveDate,
) -> Option<Decimal> {
    let days = (date - purchase_date).num_days();
    if days <= 0 || acquisition.is_zero() {
        return None;
    }

    let ratio = market.checked_div(acquisition)?.to_f64()?;
    let annualized = ratio.powf(DAYS_PER_YEAR / days as f64) - 1.0;

    Decimal::from_f64(annualized).map(|r| r.round_dp(6))
}

/// One row per lot from its latest performance row, then the Total row.
///
/// Lots without price data keep their identifying columns and cost basis
/// but stay out of the totals.
pub fn summarize<'a, I>(entries: I) -> SummaryTable
where
    I: IntoIterator<Item = (&'a Lot, &'a PerformanceTable)>,
{
    let mut rows = Vec::new();
    let mut total_acquisition = Decimal::ZERO;
    let mut total_market = Decimal::ZERO;
    let mut total_profit = Decimal::ZERO;

    for (lot, table) in entries {
        let row = match table.latest() {
            Some(latest) => {
                total_acquisition += *latest.acquisition();
                total_market += *latest.market();
                total_profit += *latest.est_profit();

                SummaryRow::new(
                    lot.asset_id().clone(),
                    Some(*lot.purchase_date()),
                    Some(*lot.purchase_price()),
                    Some(*lot.volume()),
                    Some(*latest.acquisition()),
                    Some(*latest.close()),
                    Some(*latest.market()),
                    Some(*latest.est_profit()),
                    *latest.pct_est_profit(),
                    annual_return(
                        *latest.acquisition(),
                        *latest.market(),
                        *lot.purchase_date(),
                        *latest.date(),
                    ),
                )
            }
            None => SummaryRow::new(
                lot.asset_id().clone(),
                Some(*lot.purchase_date()),
                Some(*lot.purchase_price()),
                Some(*lot.volume()),
                Some(lot.acquisition_value()),
                None,
                None,
                None,
                None,
                None,
            ),
        };
        rows.push(row);
    }

    SummaryTable::new(
        rows,
        SummaryRow::total(total_acquisition, total_market, total_profit),
    )
}
