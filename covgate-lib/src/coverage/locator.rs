use camino::{Utf8Path, Utf8PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

const LOG_TARGET: &str = "   locator";

/// The file name rcov gives its summary page.
pub const DEFAULT_REPORT_FILE: &str = "index.html";

#[derive(Debug, Error)]
pub enum LocateError {
    #[error("report directory '{0}' does not exist")]
    MissingDirectory(Utf8PathBuf),

    #[error("unable to scan report directory '{dir}'")]
    Walk {
        dir: Utf8PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("found a report path that is not valid UTF-8: {0}")]
    NonUtf8Path(String),
}

/// Find every file below `dir` whose name matches `file_name`, ignoring ASCII case.
///
/// Candidates are returned sorted by path so that the first one is stable across runs.
///
/// # Errors
///
/// Returns a [`LocateError`] if `dir` is missing or cannot be walked.
pub fn locate_reports(dir: &Utf8Path, file_name: &str) -> Result<Vec<Utf8PathBuf>, LocateError> {
    if !dir.is_dir() {
        return Err(LocateError::MissingDirectory(dir.to_path_buf()));
    }

    let mut candidates = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.map_err(|source| LocateError::Walk {
            dir: dir.to_path_buf(),
            source,
        })?;

        if !entry.file_type().is_file() || !entry.file_name().eq_ignore_ascii_case(file_name) {
            continue;
        }

        let path = Utf8PathBuf::try_from(entry.into_path()).map_err(|e| LocateError::NonUtf8Path(e.into_path_buf().display().to_string()))?;
        log::debug!(target: LOG_TARGET, "Found report candidate '{path}'");
        candidates.push(path);
    }

    candidates.sort();
    Ok(candidates)
}
