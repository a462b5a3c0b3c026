use std::path::{Path, PathBuf};

use filter_logging::filter_debug;

use crate::decode::{decode_snapshot, DecodeError, DecodedSnapshot};

#[derive(Debug, thiserror::Error)]
pub enum FixtureError {
    #[error("failed to read snapshot {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode snapshot {path}")]
    Decode {
        path: PathBuf,
        #[source]
        source: DecodeError,
    },
}

/// Reads a saved page from disk and decodes it to text.
pub fn read_snapshot(path: &Path, charset_hint: Option<&str>) -> Result<DecodedSnapshot, FixtureError> {
    let bytes = std::fs::read(path).map_err(|source| FixtureError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let decoded = decode_snapshot(&bytes, charset_hint).map_err(|source| FixtureError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    filter_debug!("read {} bytes as {}", bytes.len(), decoded.encoding);
    Ok(decoded)
}
