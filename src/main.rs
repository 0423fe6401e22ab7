use clap::{Args, Parser, Subcommand, ValueEnum};
use core_types::{SortKey, Timeframe};
use rust_decimal::Decimal;
use std::path::PathBuf;

mod commands;
mod logging;
mod render;

/// The main entry point for the SectorScope dashboard.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine; it only carries optional overrides.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut config = configuration::load_config(cli.config.as_deref())?;
    if let Some(dir) = cli.data_dir {
        config.data.dir = dir;
    }
    let _log_guard = logging::init(&config.logging)?;

    let app = commands::App::new(config)?;
    match cli.command {
        Commands::Stocks(args) => app.stocks(args).await,
        Commands::Heatmap(args) => app.heatmap(args).await,
        Commands::Cross(args) => app.cross(args).await,
        Commands::Sectors(args) => app.sectors(args).await,
        Commands::Details(args) => app.details(args).await,
        Commands::Export(args) => app.export(args).await,
        Commands::ConvertPaste(args) => app.convert_paste(args).await,
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Cross-timeframe stock and sector return analysis.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to a TOML config file. Defaults to ./sectorscope.toml when present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding monthly.json, quarterly.json, yearly.json, fno.json and ipo.json.
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Per-stock statistics for one timeframe.
    Stocks(StocksArgs),
    /// The stock×period return matrix for one timeframe.
    Heatmap(HeatmapArgs),
    /// Stocks merged across all three timeframes.
    Cross(CrossArgs),
    /// Pooled sector statistics and Hot/Emerging/Cooling/Stable status.
    Sectors(SectorsArgs),
    /// Drill-down for a stock or sector label.
    Details(DetailsArgs),
    /// Write a CSV export to the export directory.
    Export(ExportArgs),
    /// Convert tab-separated pasted rows into a records JSON file.
    ConvertPaste(ConvertPasteArgs),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// Filters shared by the list views. Unset values fall back to `[view]` in the config.
#[derive(Args, Clone, Debug, Default)]
pub struct ViewArgs {
    /// Case-insensitive substring of the stock (or sector) name.
    #[arg(long)]
    search: Option<String>,

    /// Minimum average return, in percent.
    #[arg(long, allow_negative_numbers = true)]
    min_return: Option<Decimal>,

    /// Minimum number of appearances (timeframes, for the cross view).
    #[arg(long)]
    min_appearances: Option<usize>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,
}

#[derive(Args)]
pub struct StocksArgs {
    #[arg(long, short, default_value = "monthly")]
    timeframe: Timeframe,

    /// Sort key: avg-return, max-return or consistency.
    #[arg(long)]
    sort: Option<SortKey>,

    #[command(flatten)]
    view: ViewArgs,
}

#[derive(Args)]
pub struct HeatmapArgs {
    #[arg(long, short, default_value = "monthly")]
    timeframe: Timeframe,

    #[arg(long)]
    search: Option<String>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,
}

#[derive(Args)]
pub struct CrossArgs {
    #[command(flatten)]
    view: ViewArgs,
}

#[derive(Args)]
pub struct SectorsArgs {
    /// Restrict to one timeframe. All timeframes are pooled when omitted.
    #[arg(long, short)]
    timeframe: Option<Timeframe>,

    #[command(flatten)]
    view: ViewArgs,
}

#[derive(Args)]
pub struct DetailsArgs {
    /// A stock or sector name. Stocks win when a name is both.
    label: String,

    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ExportKind {
    /// Raw records of one timeframe.
    Timeframe,
    /// Raw records of every timeframe with a timeframe column.
    All,
    /// Every distinct stock identifier.
    Unique,
    /// Distinct stock identifiers not in the F&O list.
    NonFno,
    /// Distinct stock identifiers in the IPO list and not in the F&O list.
    IpoNonFno,
    /// Per-stock statistics of one timeframe.
    Stats,
    /// The merged cross-timeframe view.
    Cross,
    /// Sector statistics, pooled or for one timeframe.
    Sectors,
}

#[derive(Args)]
pub struct ExportArgs {
    kind: ExportKind,

    /// Timeframe for the `timeframe`, `stats` and `sectors` exports.
    #[arg(long, short)]
    timeframe: Option<Timeframe>,

    /// Overrides `[export] output_dir`.
    #[arg(long)]
    output_dir: Option<PathBuf>,
}

#[derive(Args)]
pub struct ConvertPasteArgs {
    /// Tab-separated input file. Reads stdin when omitted.
    #[arg(long, short)]
    input: Option<PathBuf>,

    /// Wrap the records under this timeframe's key.
    #[arg(long, short)]
    timeframe: Option<Timeframe>,

    /// Output JSON file. Writes to stdout when omitted.
    #[arg(long, short)]
    output: Option<PathBuf>,
}
