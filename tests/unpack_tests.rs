use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crxkit::crx;
use crxkit::unpack::{detect_format, extract_file, open_archive, read_entry, ExtensionFormat};

const MANIFEST_JSON: &str = r#"{"name": "Unpack Fixture", "version": "2.0", "manifest_version": 3}"#;

fn packed_fixture(root: &Path) -> PathBuf {
    let source = root.join("source");
    fs::create_dir_all(source.join("icons")).unwrap();
    fs::write(source.join("manifest.json"), MANIFEST_JSON).unwrap();
    fs::write(source.join("icons").join("icon.svg"), "<svg/>").unwrap();

    let out = root.join("fixture.crx");
    crx::pack(&source, &out, None).unwrap();
    out
}

#[test]
fn test_detect_crx_format() {
    // CRX3 magic: "Cr24"
    let crx_data = b"Cr24\x03\x00\x00\x00";
    assert_eq!(detect_format(crx_data), ExtensionFormat::Crx3);
}

#[test]
fn test_detect_zip_format() {
    // ZIP magic: "PK\x03\x04"
    let zip_data = b"PK\x03\x04";
    assert_eq!(detect_format(zip_data), ExtensionFormat::Zip);
}

#[test]
fn test_detect_unknown_format() {
    let unknown = b"UNKNOWN";
    assert_eq!(detect_format(unknown), ExtensionFormat::Unknown);
}

#[test]
fn test_open_archive_reads_members_in_place() {
    let tmp = TempDir::new().unwrap();
    let crx_path = packed_fixture(tmp.path());

    let mut archive = open_archive(&crx_path).unwrap();
    let manifest = read_entry(&mut archive, "manifest.json").unwrap();
    assert_eq!(manifest, MANIFEST_JSON.as_bytes());

    let icon = read_entry(&mut archive, "icons/icon.svg").unwrap();
    assert_eq!(icon, b"<svg/>");
}

#[test]
fn test_read_entry_unknown_name() {
    let tmp = TempDir::new().unwrap();
    let crx_path = packed_fixture(tmp.path());

    let mut archive = open_archive(&crx_path).unwrap();
    assert!(read_entry(&mut archive, "no-such-member").is_err());
}

#[test]
fn test_extract_crx_file_round_trip() {
    let tmp = TempDir::new().unwrap();
    let crx_path = packed_fixture(tmp.path());

    let out_dir = tmp.path().join("extracted");
    extract_file(&crx_path, &out_dir).unwrap();

    let manifest = fs::read_to_string(out_dir.join("manifest.json")).unwrap();
    assert_eq!(manifest, MANIFEST_JSON);
    assert!(out_dir.join("icons").join("icon.svg").exists());
}

#[test]
fn test_open_archive_on_bare_zip() {
    use std::io::Write;
    use zip::write::SimpleFileOptions;

    let tmp = TempDir::new().unwrap();
    let zip_path = tmp.path().join("plain.zip");

    let file = fs::File::create(&zip_path).unwrap();
    let mut writer = zip::ZipWriter::new(file);
    writer
        .start_file("manifest.json", SimpleFileOptions::default())
        .unwrap();
    writer.write_all(MANIFEST_JSON.as_bytes()).unwrap();
    writer.finish().unwrap();

    let mut archive = open_archive(&zip_path).unwrap();
    let manifest = read_entry(&mut archive, "manifest.json").unwrap();
    assert_eq!(manifest, MANIFEST_JSON.as_bytes());
}

#[test]
fn test_extract_rejects_unknown_bytes() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("garbage.bin");
    fs::write(&path, b"neither zip nor crx").unwrap();

    assert!(extract_file(&path, &tmp.path().join("out")).is_err());
}
