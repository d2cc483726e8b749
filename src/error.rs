use std::path::PathBuf;
#[cfg(target_os = "macos")]
use std::process::ExitStatus;
use thiserror::Error;

/// Failures that abort the run. Each maps to a distinct process exit code.
#[derive(Debug, Error)]
pub enum FatalError {
    #[error("Couldn't create request for `{url}`: {reason}")]
    RequestConstruction { url: String, reason: String },
    #[error("Something went wrong while trying to get Apple data: {0}")]
    Network(#[source] ureq::Error),
    #[error("Couldn't decode the presumably-JSON response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl FatalError {
    pub fn exit_code(&self) -> u8 {
        match self {
            FatalError::RequestConstruction { .. } => 1,
            FatalError::Network(_) => 2,
            FatalError::Decode(_) => 3,
        }
    }
}

/// Failures while persisting or opening the generated page. These are
/// reported but never change the exit code.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Couldn't determine the home directory")]
    HomeDirUnavailable,
    #[error("Couldn't open {path:?} for writing: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[cfg(target_os = "macos")]
    #[error("Couldn't automatically open {path:?} in a browser: {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },
    #[cfg(target_os = "macos")]
    #[error("Couldn't automatically open {path:?} in a browser: opener exited with {status}")]
    OpenStatus { path: PathBuf, status: ExitStatus },
}
