use std::fs::{self, File};
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

use rsa::pkcs8::EncodePublicKey;
use rsa::RsaPrivateKey;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use super::error::CrxError;
use super::locate::{CRX_MAGIC, CRX_VERSION};
use super::{header, id, keys, sign};

/// Packs `source_dir` into a signed CRX3 file at `output_path`.
///
/// The signing key is resolved per [`keys::load_or_generate`]: absent path
/// means an ephemeral key, a fresh path gets a generated PEM written to it,
/// an existing path is loaded.
pub fn pack(
    source_dir: &Path,
    output_path: &Path,
    key_path: Option<&Path>,
) -> Result<PathBuf, CrxError> {
    let key = keys::load_or_generate(key_path, &mut rand::thread_rng())?;
    pack_with_key(source_dir, output_path, &key)
}

/// Packs with a caller-supplied key, which keeps the output a pure
/// function of the key and directory contents.
pub fn pack_with_key(
    source_dir: &Path,
    output_path: &Path,
    key: &RsaPrivateKey,
) -> Result<PathBuf, CrxError> {
    let zip_data = zip_directory(source_dir)?;

    let public_key_der = key.to_public_key().to_public_key_der()?;
    let crx_id = id::raw_id(public_key_der.as_bytes());
    let signed_header_data = header::encode_signed_data(&crx_id);

    let signature = sign::sign(key, &signed_header_data, Cursor::new(&zip_data))?;

    let proof = header::encode_proof(public_key_der.as_bytes(), &signature);
    let header_bytes = header::build_header(&[proof], &signed_header_data);

    let mut out = File::create(output_path)?;
    out.write_all(CRX_MAGIC)?;
    out.write_all(&CRX_VERSION.to_le_bytes())?;
    out.write_all(&(header_bytes.len() as u32).to_le_bytes())?;
    out.write_all(&header_bytes)?;
    out.write_all(&zip_data)?;

    Ok(output_path.to_path_buf())
}

/// Zips the directory tree into an in-memory archive.
///
/// Member order follows directory iteration and is not guaranteed stable
/// across filesystems.
fn zip_directory(source_dir: &Path) -> Result<Vec<u8>, CrxError> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    add_dir_entries(&mut writer, source_dir, source_dir, options)?;

    let cursor = writer.finish()?;
    Ok(cursor.into_inner())
}

fn add_dir_entries(
    writer: &mut ZipWriter<Cursor<Vec<u8>>>,
    root: &Path,
    dir: &Path,
    options: SimpleFileOptions,
) -> Result<(), CrxError> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        let name = zip_entry_name(root, &path)?;

        if path.is_dir() {
            writer.add_directory(format!("{name}/"), options)?;
            add_dir_entries(writer, root, &path, options)?;
        } else {
            writer.start_file(name, options)?;
            writer.write_all(&fs::read(&path)?)?;
        }
    }
    Ok(())
}

fn zip_entry_name(root: &Path, path: &Path) -> Result<String, CrxError> {
    let relative = path.strip_prefix(root).map_err(|_| {
        CrxError::Io(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("{} escapes the source directory", path.display()),
        ))
    })?;

    // ZIP member names always use forward slashes.
    let parts: Vec<String> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    Ok(parts.join("/"))
}
