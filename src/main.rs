use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use readiness_insights::catalog::{CatalogLoader, source_from_location};
use readiness_insights::{
    CapabilityRow, Config, DemographicFilter, Flavor, SentimentRow, Weakness, analyze_wave,
    compute_capability_weaknesses, compute_sentiment_heatmap, compute_sentiment_weaknesses,
    recommend_interventions,
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "readiness")]
#[command(about = "AI readiness survey analysis", version)]
struct Cli {
    /// Catalog location (file path or http(s) URL), overrides config
    #[arg(long, global = true)]
    catalog: Option<String>,
    /// Compact JSON output
    #[arg(long, global = true)]
    compact: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug, Default)]
struct FilterArgs {
    #[arg(long)]
    region: Option<String>,
    #[arg(long)]
    department: Option<String>,
    #[arg(long)]
    role: Option<String>,
    #[arg(long)]
    age_group: Option<String>,
}

impl FilterArgs {
    fn to_filter(&self) -> DemographicFilter {
        DemographicFilter {
            region: self.region.clone(),
            department: self.department.clone(),
            role: self.role.clone(),
            age_group: self.age_group.clone(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the 5x5 sentiment heatmap
    Heatmap {
        /// JSON array of sentiment rows
        #[arg(long)]
        sentiment: PathBuf,
        /// Earlier wave; prints per-cell deltas instead of the heatmap
        #[arg(long)]
        baseline: Option<PathBuf>,
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// List sentiment and capability weaknesses
    Weaknesses {
        #[arg(long)]
        sentiment: Option<PathBuf>,
        #[arg(long)]
        capability: Option<PathBuf>,
    },
    /// Map a JSON array of weaknesses to recommended interventions
    Recommend {
        #[arg(long)]
        weaknesses: PathBuf,
    },
    /// Run the full pipeline over one wave
    Analyze {
        #[arg(long)]
        sentiment: PathBuf,
        #[arg(long)]
        capability: Option<PathBuf>,
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Show the mini interventions for one cell
    Actions {
        /// Concern level id (1-5)
        #[arg(long)]
        level: u8,
        /// Root cause id (1-5)
        #[arg(long)]
        category: u8,
    },
    /// Search mini interventions by text
    Search {
        query: String,
        /// basic, risky or safe
        #[arg(long)]
        flavor: Option<String>,
    },
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Invalid JSON in {}", path.display()))
}

fn read_optional<T: DeserializeOwned>(path: Option<&PathBuf>) -> Result<Vec<T>> {
    match path {
        Some(p) => read_json(p),
        None => Ok(Vec::new()),
    }
}

fn print_json<T: Serialize>(value: &T, compact: bool) -> Result<()> {
    let out = if compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    println!("{}", out);
    Ok(())
}

async fn catalog_loader(cli_location: Option<&str>, config: &Config) -> Result<CatalogLoader> {
    let location = cli_location.unwrap_or(&config.catalog.source);
    let source = source_from_location(location, config.catalog_timeout())
        .with_context(|| format!("Invalid catalog location '{}'", location))?;
    Ok(CatalogLoader::from_boxed(source))
}

#[tokio::main]
async fn main() -> Result<()> {
    // stdout carries the JSON output, logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("readiness_insights=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::load().context("Failed to load configuration")?;
    let compact = cli.compact;

    match &cli.command {
        Commands::Heatmap {
            sentiment,
            baseline,
            filter,
        } => {
            let rows: Vec<SentimentRow> = read_json(sentiment)?;
            let heatmap = compute_sentiment_heatmap(&rows, &filter.to_filter());
            match baseline {
                Some(path) => {
                    let base_rows: Vec<SentimentRow> = read_json(path)?;
                    let base = compute_sentiment_heatmap(&base_rows, &filter.to_filter());
                    print_json(&heatmap.compare(&base), compact)?;
                }
                None => print_json(&heatmap, compact)?,
            }
        }
        Commands::Weaknesses {
            sentiment,
            capability,
        } => {
            let s_rows: Vec<SentimentRow> = read_optional(sentiment.as_ref())?;
            let c_rows: Vec<CapabilityRow> = read_optional(capability.as_ref())?;
            let mut all = compute_sentiment_weaknesses(&s_rows, &config.sentiment_options());
            all.extend(compute_capability_weaknesses(&c_rows, &config.benchmarks()));
            print_json(&all, compact)?;
        }
        Commands::Recommend { weaknesses } => {
            let list: Vec<Weakness> = read_json(weaknesses)?;
            print_json(&recommend_interventions(&list), compact)?;
        }
        Commands::Analyze {
            sentiment,
            capability,
            filter,
        } => {
            let s_rows: Vec<SentimentRow> = read_json(sentiment)?;
            let c_rows: Vec<CapabilityRow> = read_optional(capability.as_ref())?;
            let analysis = analyze_wave(
                &s_rows,
                &c_rows,
                &filter.to_filter(),
                &config.benchmarks(),
                &config.sentiment_options(),
            );
            print_json(&analysis, compact)?;
        }
        Commands::Actions { level, category } => {
            let loader = catalog_loader(cli.catalog.as_deref(), &config).await?;
            let catalog = loader.get_or_load().await?;
            let actions = catalog.actions_for(*level, *category)?;
            if actions.is_empty() {
                info!("No actions for L{}_C{}", level, category);
            }
            print_json(&actions, compact)?;
        }
        Commands::Search { query, flavor } => {
            let flavor = match flavor {
                Some(f) => Some(
                    Flavor::parse(f)
                        .with_context(|| format!("Unknown flavor '{}' (basic, risky, safe)", f))?,
                ),
                None => None,
            };
            let loader = catalog_loader(cli.catalog.as_deref(), &config).await?;
            let catalog = loader.get_or_load().await?;
            let hits: Vec<_> = catalog
                .search(query)
                .into_iter()
                .filter(|m| flavor.is_none_or(|f| m.flavor == f))
                .collect();
            print_json(&hits, compact)?;
        }
    }

    Ok(())
}
