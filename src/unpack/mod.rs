pub mod crx;
pub mod partial;
pub mod xpi;

use anyhow::Result;
use std::path::Path;

pub use crx::{extract_crx_file, open_archive, read_entry};
pub use partial::PartialFileView;

#[derive(Debug, Clone, PartialEq)]
pub enum ExtensionFormat {
    Crx3,
    Zip, // XPI files are plain ZIP
    Unknown,
}

pub fn detect_format(data: &[u8]) -> ExtensionFormat {
    if data.len() < 4 {
        return ExtensionFormat::Unknown;
    }

    // CRX3 magic: "Cr24"
    if data.starts_with(b"Cr24") {
        return ExtensionFormat::Crx3;
    }

    // ZIP magic: "PK\x03\x04"
    if data.starts_with(b"PK\x03\x04") {
        return ExtensionFormat::Zip;
    }

    ExtensionFormat::Unknown
}

/// Extracts in-memory package bytes (a store download, usually).
pub fn extract(data: &[u8], output_dir: &Path) -> Result<()> {
    match detect_format(data) {
        ExtensionFormat::Crx3 => crx::extract_crx(data, output_dir),
        ExtensionFormat::Zip => xpi::extract_zip(data, output_dir),
        ExtensionFormat::Unknown => anyhow::bail!("Unknown extension format"),
    }
}

/// Extracts a package file from disk, streaming the archive in place.
pub fn extract_file(path: &Path, output_dir: &Path) -> Result<()> {
    let mut magic = [0u8; 4];
    {
        use anyhow::Context;
        use std::io::Read;
        let mut file = std::fs::File::open(path)?;
        file.read_exact(&mut magic)
            .with_context(|| format!("{} is too short to be an extension package", path.display()))?;
    }

    match detect_format(&magic) {
        ExtensionFormat::Crx3 => crx::extract_crx_file(path, output_dir),
        ExtensionFormat::Zip => xpi::extract_zip_file(path, output_dir),
        ExtensionFormat::Unknown => anyhow::bail!("Unknown extension format"),
    }
}
