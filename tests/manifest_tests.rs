use crxkit::models::Manifest;

#[test]
fn test_parse_manifest() {
    let json = r#"{
        "name": "Test Extension",
        "version": "1.0.0",
        "manifest_version": 3,
        "permissions": ["storage", "tabs"]
    }"#;

    let manifest = Manifest::parse(json).unwrap();
    assert_eq!(manifest.name, Some("Test Extension".to_string()));
    assert_eq!(manifest.manifest_version, Some(3));
    assert_eq!(
        manifest.permissions,
        Some(vec!["storage".to_string(), "tabs".to_string()])
    );
}

#[test]
fn test_parse_manifest_with_background_and_scripts() {
    let json = r#"{
        "name": "Worker Extension",
        "manifest_version": 3,
        "background": {"service_worker": "worker.js"},
        "content_scripts": [{"matches": ["https://example.com/*"], "js": ["content.js"]}]
    }"#;

    let manifest = Manifest::parse(json).unwrap();
    let background = manifest.background.unwrap();
    assert_eq!(background.service_worker, Some("worker.js".to_string()));

    let scripts = manifest.content_scripts.unwrap();
    assert_eq!(scripts.len(), 1);
    assert_eq!(scripts[0].js, Some(vec!["content.js".to_string()]));
}

#[test]
fn test_parse_manifest_tolerates_unknown_fields() {
    let json = r#"{"name": "X", "minimum_chrome_version": "120", "icons": {"128": "icon.png"}}"#;
    let manifest = Manifest::parse(json).unwrap();
    assert_eq!(manifest.name, Some("X".to_string()));
}
