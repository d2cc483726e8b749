use clap::Parser;
use std::process::ExitCode;
use std::time::Duration;
use tracing::{error, warn};
use tracing_subscriber::EnvFilter;

mod app;
mod cli;
mod error;
mod itunes;
mod model;
mod normalize;
mod output;
mod query;
mod render;
mod settings;

use cli::Cli;
use itunes::ItunesClient;
use settings::Settings;

fn main() -> ExitCode {
    let mut env_filter = EnvFilter::from_default_env();
    if let Ok(directive) = "ipic=info".parse() {
        env_filter = env_filter.add_directive(directive);
    }

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let settings = match settings::load_settings() {
        Ok(settings) => settings,
        Err(e) => {
            warn!("Ignoring settings file: {:#}", e);
            Settings::default()
        }
    };
    let settings = cli.apply_overrides(settings);
    let config = cli.search_config();

    let client = ItunesClient::with_timeout(Duration::from_secs(settings.timeout_secs));
    match app::run(&config, &settings, &client) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::from(e.exit_code())
        }
    }
}
