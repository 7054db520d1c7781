//! assetbind - Discover asset files and name them for code generation.
//!
//! Usage:
//!   assetbind list [INPUTS]...     List discovered assets and identifiers
//!   assetbind tree [INPUTS]...     Show assets as a hierarchy of names
//!   assetbind export [INPUTS]...   Export the catalog to JSON
//!   assetbind --help               Show help
//!
//! An input ending in `/...` is walked recursively.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use color_eyre::eyre::{Context, Result};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use assetbind_scan::{AssetTree, Catalog, DiscoveryConfig, InputSpec, discover};

/// Environment variable overriding the log filter.
const LOG_ENV: &str = "ASSETBIND_LOG";

#[derive(Parser)]
#[command(
    name = "assetbind",
    version,
    about = "Discover asset files and give them stable names and identifiers",
    long_about = "assetbind walks files and directories and builds a catalog of assets, \
                  each with a logical name and an identifier that is unique within the \
                  catalog. Append `/...` to an input to descend into subdirectories."
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List discovered assets
    List {
        #[command(flatten)]
        discover: DiscoverArgs,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Show discovered assets as a tree of names
    Tree {
        #[command(flatten)]
        discover: DiscoverArgs,
    },

    /// Export the catalog to JSON
    Export {
        #[command(flatten)]
        discover: DiscoverArgs,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Args)]
struct DiscoverArgs {
    /// Input files or directories (defaults to the current directory)
    inputs: Vec<String>,

    /// Leading path stripped from asset names
    #[arg(short, long, default_value = "")]
    prefix: String,

    /// Regular expression; matching paths are skipped (repeatable)
    #[arg(short, long)]
    ignore: Vec<String>,

    /// Read inputs, prefix and ignore patterns from a JSON file
    #[arg(short, long, conflicts_with_all = ["inputs", "prefix", "ignore"])]
    config: Option<PathBuf>,
}

impl DiscoverArgs {
    fn to_config(&self) -> Result<DiscoveryConfig> {
        if let Some(path) = &self.config {
            return DiscoveryConfig::from_json_file(path).context("Invalid config file");
        }

        let inputs: Vec<InputSpec> = if self.inputs.is_empty() {
            vec![InputSpec::new(".", false)]
        } else {
            self.inputs.iter().map(|s| InputSpec::parse(s)).collect()
        };

        DiscoveryConfig::builder()
            .inputs(inputs)
            .prefix(self.prefix.clone())
            .ignore(self.ignore.clone())
            .build()
            .context("Invalid configuration")
    }
}

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::List { discover, format } => run_list(&discover, format)?,
        Command::Tree { discover } => run_tree(&discover)?,
        Command::Export { discover, output } => run_export(&discover, output)?,
    }

    Ok(())
}

/// Install the stderr subscriber; `ASSETBIND_LOG` wins over `-v`.
fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Build the config and run discovery.
fn run_discovery(args: &DiscoverArgs) -> Result<Catalog> {
    let config = args.to_config()?;
    debug!(?config, "resolved configuration");

    eprintln!("Discovering assets in {} input(s)...", config.inputs.len());

    let catalog = discover(&config).context("Discovery failed")?;
    Ok(catalog)
}

/// List assets with their identifiers.
fn run_list(args: &DiscoverArgs, format: OutputFormat) -> Result<()> {
    let catalog = run_discovery(args)?;

    match format {
        OutputFormat::Text => {
            let width = catalog.iter().map(|a| a.func.len()).max().unwrap_or(0);
            for asset in &catalog {
                println!("{:<width$}  {}", asset.func, asset.name);
            }
            print_summary(&catalog);
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&catalog)?);
        }
    }

    Ok(())
}

/// Print the hierarchical view of asset names.
fn run_tree(args: &DiscoverArgs) -> Result<()> {
    let catalog = run_discovery(args)?;
    let tree = AssetTree::from_catalog(&catalog);

    println!(".");
    print!("{}", tree.render());
    print_summary(&catalog);

    Ok(())
}

/// Export the catalog to JSON.
fn run_export(args: &DiscoverArgs, output: Option<PathBuf>) -> Result<()> {
    let catalog = run_discovery(args)?;
    let json = serde_json::to_string_pretty(&catalog)?;

    match output {
        Some(output_path) => {
            std::fs::write(&output_path, json)
                .with_context(|| format!("Failed to write {}", output_path.display()))?;
            eprintln!("Exported {} asset(s) to {}", catalog.len(), output_path.display());
        }
        None => {
            println!("{}", json);
        }
    }

    Ok(())
}

fn print_summary(catalog: &Catalog) {
    let stats = &catalog.stats;
    eprintln!();
    eprintln!(
        " {} asset(s) from {} director{}",
        catalog.len(),
        stats.dirs_entered,
        if stats.dirs_entered == 1 { "y" } else { "ies" }
    );
    if stats.ignored > 0 {
        eprintln!(" {} entr{} ignored", stats.ignored, if stats.ignored == 1 { "y" } else { "ies" });
    }
    if stats.symlinks_followed > 0 || stats.cycles_skipped > 0 {
        eprintln!(
            " {} symlink(s) followed, {} already visited",
            stats.symlinks_followed, stats.cycles_skipped
        );
    }
    if stats.broken_symlinks > 0 {
        eprintln!(" {} broken symlink(s) skipped", stats.broken_symlinks);
    }
}
