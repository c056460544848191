use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub enum ExtensionSource {
    Chrome,
    Firefox,
    LocalFile,
}

/// One browser extension as the toolkit sees it: where it came from, its
/// canonical ID, and whatever the manifest said once the package was
/// opened.
#[derive(Debug, Clone)]
pub struct Extension {
    pub id: String,
    pub name: Option<String>,
    pub version: Option<String>,
    pub source: ExtensionSource,
    pub manifest: Option<Manifest>,
    pub extract_path: Option<PathBuf>,
}

impl Extension {
    pub fn new(id: String, source: ExtensionSource) -> Self {
        Self {
            id,
            name: None,
            version: None,
            source,
            manifest: None,
            extract_path: None,
        }
    }

    /// Fills name/version from a parsed manifest.
    pub fn with_manifest(mut self, manifest: Manifest) -> Self {
        self.name = manifest.name.clone();
        self.version = manifest.version.clone();
        self.manifest = Some(manifest);
        self
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Manifest {
    pub name: Option<String>,
    pub version: Option<String>,
    pub manifest_version: Option<u8>,
    pub description: Option<String>,
    pub permissions: Option<Vec<String>>,
    pub host_permissions: Option<Vec<String>>,
    pub content_scripts: Option<Vec<ContentScript>>,
    pub background: Option<Background>,
}

impl Manifest {
    pub fn parse(json: &str) -> Result<Manifest> {
        let manifest: Manifest = serde_json::from_str(json)?;
        Ok(manifest)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ContentScript {
    pub matches: Option<Vec<String>>,
    pub js: Option<Vec<String>>,
    pub css: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Background {
    pub service_worker: Option<String>,
    pub scripts: Option<Vec<String>>,
}
