use std::path::PathBuf;
use tracing::{error, info};

use crate::error::FatalError;
use crate::itunes::{decode_response, SearchTransport};
use crate::normalize::normalize_results;
use crate::output;
use crate::query::{QueryParameters, SearchConfig};
use crate::render::render_page;
use crate::settings::Settings;

/// Runs one search end to end.
///
/// Request, transport and decode failures abort with a [`FatalError`].
/// Everything after that is best effort: failures are logged and the run
/// still succeeds. Returns the page path when one was written.
pub fn run(
    config: &SearchConfig,
    settings: &Settings,
    transport: &dyn SearchTransport,
) -> Result<Option<PathBuf>, FatalError> {
    let params = QueryParameters::build(config);
    let uri = params.request_uri(&settings.endpoint)?;

    info!("Searching for '{}' ({:?})", params.term(), config.category);
    let raw = transport.get(&uri).map_err(FatalError::Network)?;

    let mut response = decode_response(params.term(), &raw)?;
    normalize_results(&mut response.results, params.size());
    info!("Found {} result(s)", response.results.len());

    let output_dir = match &settings.output_dir {
        Some(dir) => Ok(dir.clone()),
        None => output::default_output_dir(),
    };
    let path = match output_dir {
        Ok(dir) => output::document_path(&dir, &response.title),
        Err(e) => {
            error!("{}", e);
            return Ok(None);
        }
    };

    let mut written = false;
    match render_page(&response) {
        Ok(html) => match output::write_document(&path, &html) {
            Ok(()) => written = true,
            Err(e) => error!("{}", e),
        },
        Err(e) => error!("Couldn't whip up the HTML: {}", e),
    }

    if settings.open_in_viewer {
        if let Err(e) = output::open_in_viewer(&path) {
            error!("{}", e);
        }
    }

    Ok(written.then_some(path))
}
