pub mod extension;

pub use extension::{Background, ContentScript, Extension, ExtensionSource, Manifest};
