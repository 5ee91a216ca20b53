//! Error types.
//!
//! None of these reach the user: callers log them and fall back to a reduced
//! rendition (see `assets::load_or_fallback`).

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("no asset directory configured")]
    NoDirectory,

    #[error("failed to read asset {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("asset {} is empty", path.display())]
    Empty { path: PathBuf },
}
