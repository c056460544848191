use anyhow::{Context, Result};
use std::fs::File;
use std::io::{Cursor, Read, Seek};
use std::path::Path;
use zip::ZipArchive;

use super::partial::PartialFileView;
use crate::crx::locate;

/// Opens the ZIP archive embedded in the CRX file at `path` in place.
///
/// The archive is read through a [`PartialFileView`] over the payload
/// range, so nothing is copied; a bare ZIP file works too (payload offset
/// 0).
pub fn open_archive(path: &Path) -> Result<ZipArchive<PartialFileView<File>>> {
    let offset = locate::locate_zip_offset(path)
        .with_context(|| format!("Failed to locate ZIP payload in {}", path.display()))?;

    let file = File::open(path)?;
    let total = file.metadata()?.len();
    if offset > total {
        anyhow::bail!(
            "CRX header claims a payload at {} but {} is only {} bytes",
            offset,
            path.display(),
            total
        );
    }

    let view = PartialFileView::new(file, offset, total - offset)?;
    ZipArchive::new(view).context("Failed to read ZIP from CRX payload")
}

/// Reads one archive member by name.
pub fn read_entry<R: Read + Seek>(archive: &mut ZipArchive<R>, name: &str) -> Result<Vec<u8>> {
    let mut entry = archive
        .by_name(name)
        .with_context(|| format!("No archive entry named {name}"))?;
    let mut data = Vec::with_capacity(entry.size() as usize);
    entry.read_to_end(&mut data)?;
    Ok(data)
}

/// Extracts the CRX file at `path` to `output_dir`, streaming from disk.
pub fn extract_crx_file(path: &Path, output_dir: &Path) -> Result<()> {
    let mut archive = open_archive(path)?;
    archive
        .extract(output_dir)
        .context("Failed to extract CRX contents")?;
    Ok(())
}

/// Extracts in-memory CRX bytes (e.g. a store download) to `output_dir`.
pub fn extract_crx(data: &[u8], output_dir: &Path) -> Result<()> {
    let offset = locate::zip_offset(data).context("Failed to parse CRX prefix")? as usize;
    if offset >= data.len() {
        anyhow::bail!("CRX header length runs past the end of the data");
    }

    let cursor = Cursor::new(&data[offset..]);
    let mut archive = ZipArchive::new(cursor).context("Failed to read ZIP from CRX")?;
    archive
        .extract(output_dir)
        .context("Failed to extract CRX contents")?;
    Ok(())
}
