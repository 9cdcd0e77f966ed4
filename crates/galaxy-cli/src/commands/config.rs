use anyhow::{Context, Result};
use galaxy_core::{config, Config};
use std::path::Path;

/// Show the current effective configuration.
pub fn show_config(config: &Config, config_path: &Path) -> Result<()> {
    println!("Current Configuration");
    println!("=====================\n");

    println!("Config file: {}", config_path.display());

    let exists = config_path.exists();
    println!("File exists: {}\n", if exists { "yes" } else { "no (using defaults)" });

    println!("Settings:");
    println!("  catalog_path: {}", config.catalog_path.display());
    println!("  min_popularity: {}", config.min_popularity);
    println!("  max_recommendations: {}", config.max_recommendations);
    println!("  logging.level: {:?}", config.logging.level());
    println!("  logging.coloured: {}", config.logging.coloured());
    println!("  logging.output: {:?}", config.logging.output());

    println!("\nPriority: CLI args > ENV vars (GALAXY_*) > Config file > Defaults");

    Ok(())
}

/// Get a specific config value.
pub fn get_config(config: &Config, config_path: &Path, key: Option<String>) -> Result<()> {
    if let Some(key) = key {
        println!("{}", config.get(&key)?);
    } else {
        // No key provided, show entire config file contents
        if config_path.exists() {
            let contents = std::fs::read_to_string(config_path)
                .context("Failed to read config file")?;
            print!("{}", contents);
        } else {
            println!("Config file does not exist: {}", config_path.display());
            println!("\nRun 'galaxy config init' to create it.");
        }
    }

    Ok(())
}

/// Set a config value.
pub fn set_config(config_path: &Path, key: &str, value: &str) -> Result<()> {
    config::set_value(config_path, key, value)?;

    println!("✓ Updated {} = {}", key, value);
    println!("  in {}", config_path.display());

    Ok(())
}

/// Show the config file path.
pub fn show_path(config_path: &Path) -> Result<()> {
    println!("{}", config_path.display());
    Ok(())
}

/// Show example configuration.
pub fn show_example() -> Result<()> {
    print!("{}", config::example_config());
    Ok(())
}

/// Initialize config file with defaults.
pub fn init_config(config_path: &Path) -> Result<()> {
    let created = config::ensure_config_file(config_path)?;

    if created {
        println!("✓ Created config file: {}", config_path.display());
        println!("\nEdit this file to configure galaxy.");
    } else {
        println!("Config file already exists: {}", config_path.display());
    }

    Ok(())
}
