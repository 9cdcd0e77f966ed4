use anyhow::Result;
use galaxy_core::Config;

use crate::tui;

/// Load the catalog and open the dashboard.
pub fn run_explore(config: &Config) -> Result<()> {
    let catalog = super::load_catalog(config)?;

    if catalog.is_empty() {
        println!("The catalog at {} has no tracks.", config.catalog_path.display());
        return Ok(());
    }

    tui::run_tui(catalog, config)
}
