use crate::render;
use crate::{
    ConvertPasteArgs, CrossArgs, DetailsArgs, ExportArgs, ExportKind, HeatmapArgs, OutputFormat,
    SectorsArgs, StocksArgs, ViewArgs,
};
use analytics::{
    AnalyticsEngine, DatasetAggregates, EntityDetails, StockFilter, exclude_members,
    filter_cross_timeframe, filter_sectors, filter_stock_stats, members_excluding, status_counts,
    unique_identifiers,
};
use anyhow::Context;
use configuration::Config;
use core_types::{Dataset, Timeframe};
use serde::Serialize;
use std::io::Read;
use std::path::PathBuf;

/// Loaded configuration plus the analytics engine built from it.
pub struct App {
    config: Config,
    engine: AnalyticsEngine,
}

impl App {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let engine = AnalyticsEngine::new(&config.analysis)?;
        Ok(Self { config, engine })
    }

    async fn load(&self) -> anyhow::Result<(Dataset, DatasetAggregates)> {
        let dataset = ingest::load_dataset(&self.config.data)
            .await
            .context("failed to load return records")?;
        if dataset.is_empty() {
            tracing::warn!(dir = %self.config.data.dir.display(), "No records found.");
        }
        let aggregates = self.engine.aggregate_dataset(&dataset);
        Ok((dataset, aggregates))
    }

    fn filter(&self, view: &ViewArgs) -> StockFilter {
        let defaults = StockFilter::from_defaults(&self.config.view);
        StockFilter {
            search: view.search.clone().unwrap_or(defaults.search),
            min_return: view.min_return.unwrap_or(defaults.min_return),
            min_appearances: view.min_appearances.unwrap_or(defaults.min_appearances),
        }
    }

    pub async fn stocks(&self, args: StocksArgs) -> anyhow::Result<()> {
        let (_, aggregates) = self.load().await?;
        let sort_by = args.sort.unwrap_or(self.config.view.sort_by);
        let rows = filter_stock_stats(
            &aggregates.get(args.timeframe).stock_stats,
            &self.filter(&args.view),
            sort_by,
        );
        match args.view.format {
            OutputFormat::Json => print_json(&rows),
            OutputFormat::Table => {
                println!("{} stocks ({} shown)", args.timeframe, rows.len());
                println!("{}", render::stock_stats_table(&rows));
                Ok(())
            }
        }
    }

    pub async fn heatmap(&self, args: HeatmapArgs) -> anyhow::Result<()> {
        let (_, aggregates) = self.load().await?;
        let aggregate = aggregates.get(args.timeframe);
        match args.format {
            OutputFormat::Json => print_json(aggregate),
            OutputFormat::Table => {
                println!("{}", render::heatmap_table(aggregate, args.search.as_deref()));
                Ok(())
            }
        }
    }

    pub async fn cross(&self, args: CrossArgs) -> anyhow::Result<()> {
        let (_, aggregates) = self.load().await?;
        let merged = self.engine.merge_cross_timeframe(&aggregates);
        let rows = filter_cross_timeframe(&merged, &self.filter(&args.view));
        match args.view.format {
            OutputFormat::Json => print_json(&rows),
            OutputFormat::Table => {
                println!("{} of {} stocks", rows.len(), merged.len());
                println!("{}", render::cross_timeframe_table(&rows));
                Ok(())
            }
        }
    }

    pub async fn sectors(&self, args: SectorsArgs) -> anyhow::Result<()> {
        let (_, aggregates) = self.load().await?;
        let analysis = self.engine.analyze_sectors(&aggregates);
        let scope = analysis.scope(args.timeframe);
        let rows = filter_sectors(scope, &self.filter(&args.view));
        match args.view.format {
            OutputFormat::Json => print_json(&rows),
            OutputFormat::Table => {
                let scope_name = args.timeframe.map_or("All timeframes".to_string(), |tf| tf.to_string());
                println!("{scope_name}: {}", render::status_summary(&status_counts(scope)));
                println!("{}", render::sector_table(&rows));
                Ok(())
            }
        }
    }

    pub async fn details(&self, args: DetailsArgs) -> anyhow::Result<()> {
        let (_, aggregates) = self.load().await?;
        let details = self.engine.entity_details(&aggregates, &args.label);
        let empty = match &details {
            EntityDetails::Stock(d) => d.total_appearances == 0,
            EntityDetails::Sector(d) => d.total_appearances == 0,
        };
        if empty {
            tracing::warn!(label = %args.label, "No returns found for this label.");
        }
        match args.format {
            OutputFormat::Json => print_json(&details),
            OutputFormat::Table => {
                let (summary, appearances) = render::details_tables(&details);
                println!("{summary}");
                println!("{appearances}");
                Ok(())
            }
        }
    }

    pub async fn export(&self, args: ExportArgs) -> anyhow::Result<()> {
        let (dataset, aggregates) = self.load().await?;
        let timeframe = args.timeframe.unwrap_or(Timeframe::Monthly);

        let Some((prefix, contents)) = self.render_export(args.kind, args.timeframe, timeframe, &dataset, &aggregates).await?
        else {
            return Ok(());
        };

        let dir = args.output_dir.unwrap_or_else(|| self.config.export.output_dir.clone());
        let date = chrono::Local::now().date_naive();
        let path = export::write_export(&dir, &export::export_file_name(&prefix, date), &contents)?;
        println!("Exported {}", path.display());
        Ok(())
    }

    /// The file prefix and CSV body of an export, or `None` when there is nothing to write.
    async fn render_export(
        &self,
        kind: ExportKind,
        scope: Option<Timeframe>,
        timeframe: Timeframe,
        dataset: &Dataset,
        aggregates: &DatasetAggregates,
    ) -> anyhow::Result<Option<(String, String)>> {
        let universe = || unique_identifiers(&aggregates.monthly, &aggregates.quarterly, &aggregates.yearly);

        let rendered = match kind {
            ExportKind::Timeframe => (
                format!("{}-data", timeframe.key()),
                export::records_csv(dataset.records(timeframe))?,
            ),
            ExportKind::All => ("stock-dashboard-complete".to_string(), export::dataset_csv(dataset)?),
            ExportKind::Unique => ("unique-stocks".to_string(), export::identifiers_csv(&universe())?),
            ExportKind::NonFno => {
                let fno = ingest::load_members(&self.config.data.fno_path()).await?;
                let ids = exclude_members(&universe(), &fno);
                if ids.is_empty() {
                    println!("No non-F&O stocks found to export.");
                    return Ok(None);
                }
                ("non-fno-unique-stocks".to_string(), export::identifiers_csv(&ids)?)
            }
            ExportKind::IpoNonFno => {
                let (fno_path, ipo_path) = (self.config.data.fno_path(), self.config.data.ipo_path());
                let (fno, ipo) = tokio::try_join!(
                    ingest::load_members(&fno_path),
                    ingest::load_members(&ipo_path),
                )?;
                let ids = members_excluding(&universe(), &ipo, &fno);
                if ids.is_empty() {
                    println!("No IPO (non-F&O) stocks found to export.");
                    return Ok(None);
                }
                ("ipo-non-fno-unique-stocks".to_string(), export::identifiers_csv(&ids)?)
            }
            ExportKind::Stats => (
                format!("{}-stock-stats", timeframe.key()),
                export::stock_stats_csv(&aggregates.get(timeframe).stock_stats)?,
            ),
            ExportKind::Cross => (
                "cross-timeframe-stocks".to_string(),
                export::cross_timeframe_csv(&self.engine.merge_cross_timeframe(aggregates))?,
            ),
            ExportKind::Sectors => {
                let analysis = self.engine.analyze_sectors(aggregates);
                let prefix = match scope {
                    Some(tf) => format!("{}-sector-analysis", tf.key()),
                    None => "sector-analysis".to_string(),
                };
                (prefix, export::sector_stats_csv(analysis.scope(scope))?)
            }
        };
        Ok(Some(rendered))
    }

    pub async fn convert_paste(&self, args: ConvertPasteArgs) -> anyhow::Result<()> {
        let text = match &args.input {
            Some(path) => tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("failed to read {}", path.display()))?,
            None => {
                let mut buffer = String::new();
                std::io::stdin()
                    .read_to_string(&mut buffer)
                    .context("failed to read stdin")?;
                buffer
            }
        };

        let records = ingest::parse_paste(&text)?;
        let json = match args.timeframe {
            Some(tf) => {
                let mut wrapped = serde_json::Map::new();
                wrapped.insert(tf.key().to_string(), serde_json::to_value(&records)?);
                export::to_json(&wrapped)?
            }
            None => export::to_json(&records)?,
        };

        match args.output {
            Some(path) => write_output(path, &json).await?,
            None => println!("{json}"),
        }
        tracing::info!(records = records.len(), "Converted pasted rows.");
        Ok(())
    }
}

async fn write_output(path: PathBuf, contents: &str) -> anyhow::Result<()> {
    tokio::fs::write(&path, contents)
        .await
        .with_context(|| format!("failed to write {}", path.display()))?;
    println!("Wrote {}", path.display());
    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", export::to_json(value)?);
    Ok(())
}
