//! Reading transcript files from disk.

use std::fs;
use std::path::Path;

use sdcard_model::Sequence;
use tracing::info_span;

use crate::error::{IngestError, Result};
use crate::transcript::parse_transcript;

/// Reads a transcript file and parses every sequence in it.
///
/// The file is read completely before parsing starts. Bytes that are not
/// valid UTF-8 are replaced rather than rejected.
pub fn read_transcript(path: &Path) -> Result<Vec<Sequence>> {
    let span = info_span!("read_transcript", path = %path.display());
    let _guard = span.enter();
    let bytes = fs::read(path).map_err(|source| IngestError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let text = String::from_utf8_lossy(&bytes);
    Ok(parse_transcript(&text))
}
