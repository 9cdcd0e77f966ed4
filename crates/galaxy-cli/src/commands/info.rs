use anyhow::Result;
use galaxy_core::catalog::Summary;
use galaxy_core::Config;
use std::io::{self, Write};

use super::table::cell;

/// Show a summary of the catalog.
pub fn show_info(config: &Config) -> Result<()> {
    let catalog = super::load_catalog(config)?;
    println!("\n🌌 Galaxy Catalog\n");
    println!("  Catalog: {}", config.catalog_path.display());
    write_summary(&mut io::stdout().lock(), &catalog.summary())?;
    Ok(())
}

/// Show genres with their track counts.
pub fn show_genres(config: &Config) -> Result<()> {
    let catalog = super::load_catalog(config)?;
    write_genres(&mut io::stdout().lock(), &catalog.summary())?;
    Ok(())
}

fn write_summary(out: &mut impl Write, summary: &Summary) -> io::Result<()> {
    writeln!(out, "  Tracks: {}", summary.track_count)?;
    writeln!(out, "  Genres: {}", summary.genres.len())?;
    if let Some((lowest, highest)) = summary.popularity {
        writeln!(out, "  Popularity: {} - {}", lowest, highest)?;
    }
    if let Some(bounds) = summary.bounds {
        writeln!(
            out,
            "  Embedding: x {:.3} .. {:.3}, y {:.3} .. {:.3}",
            bounds.min.x, bounds.max.x, bounds.min.y, bounds.max.y
        )?;
    }
    Ok(())
}

fn write_genres(out: &mut impl Write, summary: &Summary) -> io::Result<()> {
    if summary.genres.is_empty() {
        return writeln!(out, "The catalog has no tracks.");
    }
    for genre in &summary.genres {
        writeln!(out, "  {}  {:>6}", cell(&genre.genre, 24), genre.tracks)?;
    }
    Ok(())
}
