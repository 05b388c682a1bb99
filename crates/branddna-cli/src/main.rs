//! Brand DNA CLI
//!
//! Command-line front end over a directory of brand documents:
//! - Regenerating `manifest.json` for a data directory
//! - Browsing and filtering the collection (search, quality, facets)
//! - Brand detail, similarity ranking and side-by-side comparison
//! - Insights dashboard, radar and landscape chart data (text or JSON)

use anyhow::{anyhow, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use branddna_core::{BrandRecord, FacetCatalog, QueryState};
use branddna_ingest::{load_collection, DirectorySource, LoaderConfig};

mod charts;
mod explore;
mod insights;
mod render;
mod similar;

#[derive(Parser)]
#[command(name = "branddna")]
#[command(author, version, about = "Brand DNA: explore and compare brand profiles")]
struct Cli {
    /// Log loader progress and skipped sources at debug level.
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

/// Where to read from and how to write results.
#[derive(Args, Debug, Clone)]
pub struct OutputArgs {
    /// Data directory holding `manifest.json` and one JSON document per brand.
    #[arg(long, default_value = "data")]
    pub data: PathBuf,
    /// Output format: json|text
    #[arg(long, default_value = "text")]
    pub format: String,
    /// Output path (defaults to stdout).
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}

/// Collection filter shared by the browsing commands.
#[derive(Args, Debug, Clone, Default)]
pub struct QueryArgs {
    /// Case-insensitive substring match on brand name.
    #[arg(long, default_value = "")]
    pub search: String,
    /// Hide brands whose overall confidence is below 0.5.
    #[arg(long)]
    pub hide_unknown: bool,
    /// Facet selection `key=value`; repeat to select more values.
    #[arg(long = "facet", value_name = "KEY=VALUE")]
    pub facets: Vec<String>,
}

impl QueryArgs {
    pub fn to_query(&self, catalog: &FacetCatalog) -> Result<QueryState> {
        let mut selections: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
        for raw in &self.facets {
            let (key, value) = raw
                .split_once('=')
                .ok_or_else(|| anyhow!("invalid --facet `{raw}` (expected key=value)"))?;
            let key = key.trim();
            if catalog.get(key).is_none() {
                let known: Vec<&str> = catalog.facets.iter().map(|f| f.key.as_str()).collect();
                return Err(anyhow!(
                    "unknown facet `{key}` (expected one of {})",
                    known.join("|")
                ));
            }
            selections.entry(key).or_default().push(value.trim());
        }

        let mut query = QueryState::new()
            .with_search(self.search.clone())
            .with_hide_unknown(self.hide_unknown);
        for (key, values) in selections {
            query = query.with_selection(key, values);
        }
        Ok(query)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Regenerate `manifest.json` from the `*.json` files in a data directory.
    Manifest {
        /// Data directory to scan.
        #[arg(long, default_value = "data")]
        data: PathBuf,
    },

    /// List brands passing the filter, with overall confidence.
    List {
        #[command(flatten)]
        output: OutputArgs,
        #[command(flatten)]
        query: QueryArgs,
    },

    /// Facet value counts over the whole collection.
    Facets {
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Detail view of one brand: attributes, per-block fields with evidence, similar brands.
    Show {
        /// Brand name (case-insensitive).
        name: String,
        /// Only show this DNA block (essence, audience, product, style,
        /// positioning, operations, trend_behavior, season_intent).
        #[arg(long)]
        block: Option<String>,
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Brands most similar to the named one.
    Similar {
        /// Brand name (case-insensitive).
        name: String,
        /// Number of results.
        #[arg(long, default_value_t = branddna_core::similarity::DEFAULT_TOP_N)]
        top: usize,
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Side-by-side comparison of 2 to 6 brands.
    Compare {
        /// Brand names (case-insensitive).
        #[arg(required = true, num_args = 2..=6)]
        names: Vec<String>,
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Collection-wide distributions, block completeness and promo/price cross-tab.
    Insights {
        #[command(flatten)]
        output: OutputArgs,
        #[command(flatten)]
        query: QueryArgs,
    },

    /// Radar chart series for 1 to 6 brands.
    Radar {
        /// Brand names (case-insensitive).
        #[arg(required = true, num_args = 1..=6)]
        names: Vec<String>,
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Price vs novelty landscape for the filtered collection.
    Landscape {
        #[command(flatten)]
        output: OutputArgs,
        #[command(flatten)]
        query: QueryArgs,
    },
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Manifest { data } => cmd_manifest(&data)?,
        Commands::List { output, query } => explore::cmd_list(&output, &query)?,
        Commands::Facets { output } => explore::cmd_facets(&output)?,
        Commands::Show {
            name,
            block,
            output,
        } => explore::cmd_show(&output, &name, block.as_deref())?,
        Commands::Similar { name, top, output } => similar::cmd_similar(&output, &name, top)?,
        Commands::Compare { names, output } => similar::cmd_compare(&output, &names)?,
        Commands::Insights { output, query } => insights::cmd_insights(&output, &query)?,
        Commands::Radar { names, output } => charts::cmd_radar(&output, &names)?,
        Commands::Landscape { output, query } => charts::cmd_landscape(&output, &query)?,
    }
    Ok(())
}

fn cmd_manifest(data: &Path) -> Result<()> {
    let files = branddna_ingest::write_manifest(data)?;
    eprintln!(
        "{} {} ({} brand files)",
        "wrote".green().bold(),
        data.join(branddna_ingest::MANIFEST_FILE).display(),
        files.len()
    );
    Ok(())
}

/// Load the brand collection from `data`. Skipped sources are reported on
/// stderr; an empty collection is not an error.
pub fn load_brands(data: &Path) -> Result<Vec<BrandRecord>> {
    if !data.is_dir() {
        return Err(anyhow!("data directory `{}` does not exist", data.display()));
    }
    let config = LoaderConfig::default();
    let source = DirectorySource::new(data);
    let report = load_collection(&source, &config);

    if report.used_fallback {
        eprintln!(
            "{} no readable {} in {}; tried fallback sources",
            "note".yellow().bold(),
            config.manifest_name,
            data.display()
        );
    }
    if !report.skipped.is_empty() {
        eprintln!(
            "{} skipped {} source(s) (run with -v for details)",
            "warning".yellow().bold(),
            report.skipped.len()
        );
    }
    Ok(report.brands)
}

/// Case-insensitive lookup by brand name.
pub fn find_brand<'a>(brands: &'a [BrandRecord], name: &str) -> Result<&'a BrandRecord> {
    let wanted = name.trim();
    brands
        .iter()
        .find(|b| b.name() == wanted)
        .or_else(|| brands.iter().find(|b| b.name().eq_ignore_ascii_case(wanted)))
        .ok_or_else(|| anyhow!("unknown brand `{wanted}`"))
}
