use anyhow::{Context, Result};
use galaxy_core::catalog::shared;
use galaxy_core::{Catalog, Config, FilterCriteria};

use crate::FilterArgs;

pub mod config;
pub mod convert;
pub mod explore;
pub mod info;
pub mod list;
pub mod recommend;
pub mod table;

pub use convert::run_convert;
pub use explore::run_explore;
pub use info::{show_genres, show_info};
pub use list::run_list;
pub use recommend::run_recommend;

/// Load the process-wide catalog named by the configuration.
fn load_catalog(config: &Config) -> Result<&'static Catalog> {
    shared::load(&config.catalog_path).with_context(|| {
        format!(
            "Failed to load catalog from {}\n\nSet catalog_path with 'galaxy config set catalog_path <PATH>' or pass --catalog.",
            config.catalog_path.display()
        )
    })
}

/// Turn command-line filter flags into criteria for `catalog`.
fn criteria_from_args(catalog: &Catalog, config: &Config, args: &FilterArgs) -> Result<FilterCriteria> {
    let min_popularity = args.min_popularity.unwrap_or(config.min_popularity);
    FilterCriteria::for_genres(catalog, args.genres.as_slice(), min_popularity).with_context(|| {
        format!("Available genres: {}", catalog.genres().join(", "))
    })
}
