pub mod crx;
pub mod download;
pub mod input;
pub mod models;
pub mod output;
pub mod unpack;

pub use crx::{get_extension_id, locate_zip_offset, pack, verify, CrxError};
pub use models::*;
