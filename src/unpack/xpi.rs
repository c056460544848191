use anyhow::{Context, Result};
use std::fs::File;
use std::io::Cursor;
use std::path::Path;
use zip::ZipArchive;

/// Extracts a plain ZIP archive (XPI files are plain ZIP) to `output_dir`.
pub fn extract_zip(data: &[u8], output_dir: &Path) -> Result<()> {
    let cursor = Cursor::new(data);
    let mut archive = ZipArchive::new(cursor).context("Failed to read ZIP archive")?;

    archive
        .extract(output_dir)
        .context("Failed to extract ZIP contents")?;

    Ok(())
}

/// Extracts a ZIP/XPI file from disk without buffering it in memory.
pub fn extract_zip_file(path: &Path, output_dir: &Path) -> Result<()> {
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let mut archive = ZipArchive::new(file).context("Failed to read ZIP archive")?;

    archive
        .extract(output_dir)
        .context("Failed to extract ZIP contents")?;

    Ok(())
}
