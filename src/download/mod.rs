pub mod chrome;
pub mod firefox;

pub use chrome::ChromeDownloader;
pub use firefox::FirefoxDownloader;

use anyhow::Result;
use async_trait::async_trait;

/// A vendor store client that fetches a package by ID or slug.
#[async_trait]
pub trait Downloader {
    async fn download(&self, id: &str) -> Result<Vec<u8>>;
}
