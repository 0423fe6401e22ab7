use analytics::{
    CrossTimeframeStockView, EntityDetails, SectorDetails, SectorStats, StatusCounts,
    StockDetails, StockStats, TimeframeAggregate,
};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, CellAlignment, Color, ContentArrangement, Table};
use core_types::{SectorStatus, Timeframe};
use rust_decimal::Decimal;

/// A return as shown to the user: one decimal and a `%` suffix.
pub fn pct(value: Decimal) -> String {
    format!("{:.1}%", value)
}

fn pct_or_dash(value: Option<Decimal>) -> String {
    value.map(pct).unwrap_or_else(|| "-".to_string())
}

fn new_table<I, S>(header: I) -> Table
where
    I: IntoIterator<Item = S>,
    S: Into<Cell>,
{
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

fn return_cell(value: Decimal) -> Cell {
    let color = if value.is_sign_negative() && !value.is_zero() {
        Color::Red
    } else {
        Color::Green
    };
    Cell::new(pct(value)).fg(color).set_alignment(CellAlignment::Right)
}

fn status_cell(status: SectorStatus) -> Cell {
    let color = match status {
        SectorStatus::Hot => Color::Red,
        SectorStatus::Emerging => Color::Yellow,
        SectorStatus::Cooling => Color::Blue,
        SectorStatus::Stable => Color::Grey,
    };
    Cell::new(status).fg(color)
}

fn timeframes(list: &[Timeframe]) -> String {
    list.iter().map(Timeframe::to_string).collect::<Vec<_>>().join(", ")
}

pub fn stock_stats_table(rows: &[StockStats]) -> Table {
    let mut table = new_table(["Stock", "Sector", "Index", "Appearances", "Avg Return", "Max Return"]);
    for s in rows {
        table.add_row(vec![
            Cell::new(&s.stock),
            Cell::new(&s.sector),
            Cell::new(&s.index),
            Cell::new(s.appearances).set_alignment(CellAlignment::Right),
            return_cell(s.avg_return),
            return_cell(s.max_return),
        ]);
    }
    table
}

/// The matrix with one column per period; empty cells stay blank.
pub fn heatmap_table(aggregate: &TimeframeAggregate, search: Option<&str>) -> Table {
    let mut header = vec!["Stock".to_string()];
    header.extend(aggregate.periods.iter().cloned());
    let mut table = new_table(header);

    let needle = search.map(str::to_lowercase);
    for row in &aggregate.matrix {
        if let Some(needle) = &needle {
            if !row.stock.to_lowercase().contains(needle) {
                continue;
            }
        }
        let mut cells = vec![Cell::new(&row.stock)];
        cells.extend(row.cells.iter().map(|cell| match cell {
            Some(value) => return_cell(*value),
            None => Cell::new(""),
        }));
        table.add_row(cells);
    }
    table
}

pub fn cross_timeframe_table(rows: &[CrossTimeframeStockView]) -> Table {
    let mut table = new_table(["Stock", "Sector", "Timeframes", "Count", "Avg Return", "Max Return"]);
    for v in rows {
        table.add_row(vec![
            Cell::new(&v.stock),
            Cell::new(&v.sector),
            Cell::new(timeframes(&v.timeframes)),
            Cell::new(v.total_timeframes).set_alignment(CellAlignment::Right),
            return_cell(v.avg_return),
            return_cell(v.max_return),
        ]);
    }
    table
}

pub fn sector_table(rows: &[SectorStats]) -> Table {
    let mut table = new_table([
        "Sector", "Status", "Avg Return", "Max Return", "Monthly", "Quarterly", "Yearly", "Stocks",
        "Returns",
    ]);
    for s in rows {
        table.add_row(vec![
            Cell::new(&s.sector),
            status_cell(s.status),
            return_cell(s.overall_avg_return),
            return_cell(s.max_return),
            Cell::new(pct_or_dash(s.monthly_avg)),
            Cell::new(pct_or_dash(s.quarterly_avg)),
            Cell::new(pct_or_dash(s.yearly_avg)),
            Cell::new(s.stock_count).set_alignment(CellAlignment::Right),
            Cell::new(s.return_count).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

pub fn status_summary(counts: &StatusCounts) -> String {
    format!(
        "Hot: {}  Emerging: {}  Cooling: {}  Stable: {}",
        counts.hot, counts.emerging, counts.cooling, counts.stable
    )
}

/// A summary table followed by the table of individual appearances.
pub fn details_tables(details: &EntityDetails) -> (Table, Table) {
    match details {
        EntityDetails::Stock(d) => (stock_summary(d), appearance_table(d.all_appearances.iter(), false)),
        EntityDetails::Sector(d) => (sector_summary(d), appearance_table(d.all_appearances.iter(), true)),
    }
}

fn stock_summary(d: &StockDetails) -> Table {
    let mut table = new_table(["Stock", "Sector", "Appearances", "Avg Return", "Max Return", "Monthly", "Quarterly", "Yearly"]);
    table.add_row(vec![
        Cell::new(&d.stock),
        Cell::new(&d.sector),
        Cell::new(d.total_appearances),
        return_cell(d.overall_avg_return),
        return_cell(d.overall_max_return),
        Cell::new(format!("{} ({})", pct_or_dash(d.monthly_avg_return), d.monthly_appearances)),
        Cell::new(format!("{} ({})", pct_or_dash(d.quarterly_avg_return), d.quarterly_appearances)),
        Cell::new(format!("{} ({})", pct_or_dash(d.yearly_avg_return), d.yearly_appearances)),
    ]);
    table
}

fn sector_summary(d: &SectorDetails) -> Table {
    let mut table = new_table(["Sector", "Stocks", "Appearances", "Avg Return", "Max Return", "Monthly", "Quarterly", "Yearly"]);
    table.add_row(vec![
        Cell::new(&d.sector),
        Cell::new(d.stock_count),
        Cell::new(d.total_appearances),
        return_cell(d.overall_avg_return),
        return_cell(d.overall_max_return),
        Cell::new(format!("{} ({})", pct_or_dash(d.monthly_avg_return), d.monthly_appearances)),
        Cell::new(format!("{} ({})", pct_or_dash(d.quarterly_avg_return), d.quarterly_appearances)),
        Cell::new(format!("{} ({})", pct_or_dash(d.yearly_avg_return), d.yearly_appearances)),
    ]);
    table
}

fn appearance_table<'a>(
    appearances: impl Iterator<Item = &'a analytics::Appearance>,
    with_stock: bool,
) -> Table {
    let mut header = vec!["Timeframe", "Period"];
    if with_stock {
        header.push("Stock");
    }
    header.push("Return");
    let mut table = new_table(header);

    for a in appearances {
        let mut row = vec![Cell::new(a.timeframe), Cell::new(&a.period)];
        if with_stock {
            row.push(Cell::new(&a.stock));
        }
        row.push(return_cell(a.value));
        table.add_row(row);
    }
    table
}
