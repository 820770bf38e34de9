//! Tourviz CLI - cleaning, summary and export entry points for the
//! tourism dashboard data core.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tourviz::analysis::{aggregate, FilterSpec, Metric, Reducer};
use tourviz::config::DataPaths;
use tourviz::data::columns::{AVG_STAY, NIGHTS, TOURISTS};
use tourviz::data::{clean_datasets, store, DatasetKey};
use tourviz::export;
use tourviz::views::overview;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tourviz", about = "Tourism statistics data core", version)]
struct Cli {
    /// TOML file overriding the default data directories.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Clean the raw CSV sources and write the cleaned files.
    Clean,
    /// Load the cleaned datasets and print the overview figures.
    Summary {
        /// Restrict the figures to one origin region.
        #[arg(long)]
        region: Option<String>,
    },
    /// Aggregate a dataset and write the result as CSV.
    Export {
        #[arg(long, default_value = "frequentation_region")]
        dataset: String,
        /// Grouping column (e.g. Pays, Region, Mois).
        #[arg(long)]
        group_by: String,
        #[arg(long)]
        out: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("tourviz=info")),
        )
        .init();

    let cli = Cli::parse();
    let paths = match &cli.config {
        Some(path) => DataPaths::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => DataPaths::default(),
    };

    match cli.command {
        Command::Clean => {
            let cleaned = clean_datasets(&paths)?;
            info!(datasets = cleaned.len(), "cleaning finished");
        }
        Command::Summary { region } => run_summary(&paths, region)?,
        Command::Export {
            dataset,
            group_by,
            out,
        } => run_export(&paths, &dataset, &group_by, &out)?,
    }
    Ok(())
}

fn run_summary(paths: &DataPaths, region: Option<String>) -> Result<()> {
    let store = store::init(paths)?;
    let df = store
        .get(DatasetKey::Region)
        .context("the frequentation_region dataset is not loaded")?;

    let filtered;
    let df = match region {
        Some(name) => {
            filtered = FilterSpec::region(&name).apply(df)?;
            &filtered
        }
        None => df,
    };

    let kpis = overview::kpis(df)?;
    println!("Touristes      : {:.1}M", kpis.total_tourists / 1000.0);
    println!("Nuitées        : {:.1}M", kpis.total_nights / 1000.0);
    match kpis.mean_stay {
        Some(stay) => println!("Séjour moyen   : {stay:.1} jours"),
        None => println!("Séjour moyen   : n/a"),
    }
    println!("Pays d'origine : {}", kpis.countries);
    println!("Régions        : {}", kpis.regions);
    Ok(())
}

fn run_export(paths: &DataPaths, dataset: &str, group_by: &str, out: &Path) -> Result<()> {
    let store = store::init(paths)?;
    let key = DatasetKey::from_key(dataset)
        .with_context(|| format!("unknown dataset key '{dataset}'"))?;
    let df = store
        .get(key)
        .with_context(|| format!("dataset '{dataset}' is not loaded"))?;

    // only request the metric columns this dataset actually carries
    let metrics: Vec<Metric> = [
        (TOURISTS, Reducer::Sum),
        (NIGHTS, Reducer::Sum),
        (AVG_STAY, Reducer::Mean),
    ]
    .into_iter()
    .filter(|(column, _)| df.column(column).is_ok())
    .map(|(column, reducer)| Metric::new(column, reducer))
    .collect();

    let agg = aggregate(df, &[group_by], &metrics)?;

    export::write_csv_file(&agg, out)?;
    info!(path = %out.display(), rows = agg.height(), "export written");
    Ok(())
}
