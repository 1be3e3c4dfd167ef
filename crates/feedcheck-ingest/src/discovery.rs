//! Feed file discovery.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{IngestError, Result};

/// Lists `.txt` files in `dir` (extension matched case-insensitively).
///
/// With a `template` filter only files whose name contains it, ignoring
/// case, are returned. Returns files sorted by filename.
pub fn list_feed_files(dir: &Path, template: Option<&str>) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(IngestError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let filter = template.map(str::to_uppercase);
    let mut files = Vec::new();

    let entries = std::fs::read_dir(dir).map_err(|e| IngestError::DirectoryRead {
        path: dir.to_path_buf(),
        source: e,
    })?;

    for entry_result in entries {
        let entry = entry_result.map_err(|e| IngestError::DirectoryRead {
            path: dir.to_path_buf(),
            source: e,
        })?;

        let path = entry.path();

        // Skip directories
        if !path.is_file() {
            continue;
        }

        if !is_txt(&path) {
            continue;
        }

        if let Some(filter) = &filter {
            let name = file_name(&path).to_uppercase();
            if !name.contains(filter.as_str()) {
                continue;
            }
        }

        files.push(path);
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    debug!(
        dir = %dir.display(),
        template = template.unwrap_or("*"),
        count = files.len(),
        "listed feed files"
    );

    Ok(files)
}

/// File name of `path` as text (lossy), empty when there is none.
pub fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Template token of a feed file name: the second `_`-separated segment
/// of the stem, e.g. `TXSTA` in `CALD_TXSTA_DEV_20070805.txt`.
pub fn template_token(path: &Path) -> Option<String> {
    let stem = path.file_stem()?.to_string_lossy();
    stem.split('_')
        .nth(1)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
}

fn is_txt(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("txt"))
        .unwrap_or(false)
}
