use std::fs::File;
use std::path::Path;

use log::{debug, info};
use memmap2::Mmap;

use crate::error::{HashBenchError, Result};

/// Splits `text` into keys: one per line, surrounding whitespace trimmed,
/// blank lines dropped. Order and duplicates are preserved.
pub fn parse_keys(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Reads the keys file at `path`.
///
/// Invalid UTF-8 is replaced rather than rejected. A file without a single
/// non-blank line is reported as [`HashBenchError::EmptyInput`].
pub fn load_keys(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let path = path.as_ref();
    let load_err = |source| HashBenchError::Load {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(load_err)?;
    let len = file.metadata().map_err(load_err)?.len();

    // Mapping a zero-length file fails on some platforms.
    let keys = if len == 0 {
        Vec::new()
    } else {
        // SAFETY: the map is read-only and dropped before returning; the
        // benchmark does not expect the file to change while it is read.
        let mmap = unsafe { Mmap::map(&file) }.map_err(load_err)?;
        parse_keys(&String::from_utf8_lossy(&mmap))
    };

    if keys.is_empty() {
        return Err(HashBenchError::EmptyInput {
            path: path.to_path_buf(),
        });
    }

    debug!("read {} bytes from {}", len, path.display());
    info!("loaded {} keys from {}", keys.len(), path.display());
    Ok(keys)
}
