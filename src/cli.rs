use clap::Parser;
use std::path::PathBuf;

use crate::query::{Category, SearchConfig};
use crate::settings::Settings;

#[derive(Debug, Parser)]
#[command(name = "ipic", version)]
#[command(
    about = "Generates a page of thumbnails and links to larger images for items in the iTunes/App/macOS App Stores.",
    after_help = "Only one option is allowed. The HTML file for the generated webpage is saved to ~/Desktop."
)]
pub struct Cli {
    /// iOS app
    #[arg(short = 'i')]
    pub ios: bool,

    /// macOS app
    #[arg(short = 'm')]
    pub macos: bool,

    /// album
    #[arg(short = 'a')]
    pub album: bool,

    /// film
    #[arg(short = 'f')]
    pub film: bool,

    /// TV show
    #[arg(short = 't')]
    pub tv_show: bool,

    /// book
    #[arg(short = 'b')]
    pub book: bool,

    /// Write the page here instead of ~/Desktop
    #[arg(short = 'o', long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Don't open the page after writing it
    #[arg(long)]
    pub no_open: bool,

    /// Words to search for
    #[arg(value_name = "SEARCH_TERM", trailing_var_arg = true)]
    pub term: Vec<String>,
}

impl Cli {
    pub fn search_config(&self) -> SearchConfig {
        let category = Category::select(|category| match category {
            Category::IosApp => self.ios,
            Category::MacApp => self.macos,
            Category::Album => self.album,
            Category::Film => self.film,
            Category::TvShow => self.tv_show,
            Category::Book => self.book,
        });

        SearchConfig {
            category,
            term: self.term.join(" "),
        }
    }

    /// Command-line options win over the settings file.
    pub fn apply_overrides(&self, mut settings: Settings) -> Settings {
        if let Some(dir) = &self.output_dir {
            settings.output_dir = Some(dir.clone());
        }
        if self.no_open {
            settings.open_in_viewer = false;
        }
        settings
    }
}
