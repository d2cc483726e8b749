use directories::BaseDirs;
use std::fs;
use std::path::{Path, PathBuf};
#[cfg(target_os = "macos")]
use std::process::Command;
use tracing::info;

use crate::error::OutputError;

/// `~/Desktop`, where pages land unless configured otherwise.
pub fn default_output_dir() -> Result<PathBuf, OutputError> {
    BaseDirs::new()
        .map(|dirs| dirs.home_dir().join("Desktop"))
        .ok_or(OutputError::HomeDirUnavailable)
}

/// File name for the page of a search, e.g. `“Abbey Road” Images.html`.
pub fn document_file_name(title: &str) -> String {
    let safe_title = title.replace(['/', '\\'], "-");
    format!("“{}” Images.html", safe_title)
}

pub fn document_path(output_dir: &Path, title: &str) -> PathBuf {
    output_dir.join(document_file_name(title))
}

pub fn write_document(path: &Path, contents: &str) -> Result<(), OutputError> {
    fs::write(path, contents).map_err(|source| OutputError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    info!("Wrote {:?}", path);
    Ok(())
}

/// Hands the page to the system viewer. Only macOS has one we drive; on
/// every other system this is a no-op returning `Ok(false)`.
#[cfg(target_os = "macos")]
pub fn open_in_viewer(path: &Path) -> Result<bool, OutputError> {
    let status = Command::new("open")
        .arg(path)
        .status()
        .map_err(|source| OutputError::Open {
            path: path.to_path_buf(),
            source,
        })?;

    if !status.success() {
        return Err(OutputError::OpenStatus {
            path: path.to_path_buf(),
            status,
        });
    }

    info!("Opened {:?}", path);
    Ok(true)
}

#[cfg(not(target_os = "macos"))]
pub fn open_in_viewer(path: &Path) -> Result<bool, OutputError> {
    tracing::debug!("Not opening {:?}: no viewer integration on this system", path);
    Ok(false)
}
