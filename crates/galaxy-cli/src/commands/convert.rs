use anyhow::{Context, Result};
use galaxy_core::catalog::{artifact, ArtifactFormat};
use std::path::Path;

/// Read a catalog in one encoding and write it in another.
pub fn run_convert(input: &Path, output: &Path) -> Result<()> {
    // Check the output format before doing any work.
    let output_format = ArtifactFormat::from_path(output)?;

    let catalog = artifact::load(input)
        .with_context(|| format!("Failed to load catalog from {}", input.display()))?;
    artifact::save(&catalog, output)
        .with_context(|| format!("Failed to write catalog to {}", output.display()))?;

    println!(
        "✓ Wrote {} tracks to {} ({})",
        catalog.len(),
        output.display(),
        output_format
    );
    Ok(())
}
