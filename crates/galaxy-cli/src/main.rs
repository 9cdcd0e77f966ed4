use anyhow::{Context, Result};
use clap::Parser;
use galaxy_core::{config, Config};
use std::path::{Path, PathBuf};

mod commands;
mod tui;

#[derive(Debug, Parser)]
#[command(name = "galaxy", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Path to the catalog artifact (default: catalog_path from config)
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Path to the config file (default: ~/.config/galaxy/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

/// Genre and popularity filters shared by the listing commands.
#[derive(Debug, Clone, clap::Args)]
pub struct FilterArgs {
    /// Only include this genre (repeatable; default: every genre)
    #[arg(long = "genre", short = 'g')]
    pub genres: Vec<String>,

    /// Minimum popularity, 0-100 (default: min_popularity from config)
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub min_popularity: Option<u8>,
}

#[derive(Debug, clap::Subcommand)]
enum Commands {
    /// Open the interactive dashboard (default)
    ///
    /// Three tabs share one set of filters:
    ///
    /// - Galaxy Explorer: scatter plot of the filtered tracks, colored by genre
    /// - Search & Recommend: find a song by name and rank its nearest neighbors
    /// - Raw List: the filtered tracks as a table
    ///
    /// Filters: Left/Right pick a genre, Space toggles it, 'a' toggles all,
    /// +/- change the minimum popularity by 1 and ]/[ by 10.
    Explore,
    /// Recommend tracks near a song found by name
    ///
    /// Searches track names (case-insensitive substring) within the filtered
    /// catalog, picks one match, and ranks the remaining filtered tracks by
    /// Euclidean distance in the embedding. Relevance is 1 for the nearest
    /// possible track and 0 for the farthest filtered track.
    Recommend {
        /// Song name, or part of it
        query: String,

        /// Which match to use when several tracks match (1-based)
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u64).range(1..))]
        pick: u64,

        /// Number of recommendations (multiples of 5)
        #[arg(long, short = 'n')]
        count: Option<usize>,

        #[command(flatten)]
        filters: FilterArgs,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// List the filtered tracks
    List {
        #[command(flatten)]
        filters: FilterArgs,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Show the genres in the catalog with their track counts
    Genres,
    /// Show a summary of the catalog
    Info,
    /// Re-encode a catalog artifact (format picked by file extension)
    Convert {
        /// Catalog to read (.bin, .galaxy, .db, .sqlite, .sqlite3, .json)
        input: PathBuf,
        /// Catalog to write; replaced if it exists
        output: PathBuf,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Debug, clap::Subcommand)]
enum ConfigCommands {
    /// Show the effective configuration
    Show,
    /// Print the config file path
    Path,
    /// Print an example config file
    Example,
    /// Create the config file with defaults
    Init,
    /// Print one value, or the whole file without a key
    Get {
        key: Option<String>,
    },
    /// Set one value in the config file
    Set {
        key: String,
        value: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.unwrap_or_else(config::config_file_path);

    // These only touch the file, so they must work even when it holds bad values.
    if let Some(Commands::Config { command }) = &cli.command {
        if let Some(result) = run_config_file_command(command, &config_path) {
            return result;
        }
    }

    let mut config = Config::load_from(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;
    if let Some(catalog) = cli.catalog {
        config = config.with_catalog_path(catalog);
    }

    let _logger = twyg::setup(config.logging.clone())
        .map_err(|e| anyhow::anyhow!("Failed to set up logging: {e}"))?;

    match cli.command.unwrap_or(Commands::Explore) {
        Commands::Explore => {
            commands::run_explore(&config)?;
        }
        Commands::Recommend {
            query,
            pick,
            count,
            filters,
            json,
        } => {
            let pick = usize::try_from(pick.saturating_sub(1)).unwrap_or(usize::MAX);
            commands::run_recommend(&config, &query, pick, count, &filters, json)?;
        }
        Commands::List { filters, json } => {
            commands::run_list(&config, &filters, json)?;
        }
        Commands::Genres => {
            commands::show_genres(&config)?;
        }
        Commands::Info => {
            commands::show_info(&config)?;
        }
        Commands::Convert { input, output } => {
            commands::run_convert(&input, &output)?;
        }
        Commands::Config { command } => match command {
            ConfigCommands::Show => commands::config::show_config(&config, &config_path)?,
            ConfigCommands::Get { key } => commands::config::get_config(&config, &config_path, key)?,
            other => {
                if let Some(result) = run_config_file_command(&other, &config_path) {
                    result?;
                }
            }
        },
    }

    Ok(())
}

/// Run the config subcommands that never read the effective configuration.
///
/// Returns `None` for `show` and `get`, which need the loaded values.
fn run_config_file_command(command: &ConfigCommands, config_path: &Path) -> Option<Result<()>> {
    match command {
        ConfigCommands::Path => Some(commands::config::show_path(config_path)),
        ConfigCommands::Example => Some(commands::config::show_example()),
        ConfigCommands::Init => Some(commands::config::init_config(config_path)),
        ConfigCommands::Set { key, value } => {
            Some(commands::config::set_config(config_path, key, value))
        }
        ConfigCommands::Show | ConfigCommands::Get { .. } => None,
    }
}
