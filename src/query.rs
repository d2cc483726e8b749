use std::collections::BTreeMap;

use ureq::http::Uri;

use crate::error::FatalError;

/// Largest artwork edge the store will hand out.
pub const ARTWORK_SIZE: &str = "4096";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    IosApp,
    MacApp,
    Album,
    Film,
    TvShow,
    Book,
}

/// Store-specific parameters a category adds on top of the defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryParams {
    pub media: &'static str,
    pub entity: &'static str,
    /// Replaces the default `name=trackName` when the category labels
    /// its results by collection.
    pub name: Option<&'static str>,
}

impl Category {
    /// Evaluation order when several category flags are set at once.
    pub const PRIORITY: [Category; 6] = [
        Category::IosApp,
        Category::MacApp,
        Category::Album,
        Category::Film,
        Category::TvShow,
        Category::Book,
    ];

    /// Returns the first category, in priority order, for which `is_set` holds.
    pub fn select(is_set: impl Fn(Category) -> bool) -> Option<Self> {
        Self::PRIORITY.into_iter().find(|category| is_set(*category))
    }

    pub fn params(self) -> CategoryParams {
        match self {
            Category::IosApp => CategoryParams {
                media: "software",
                entity: "software",
                name: None,
            },
            Category::MacApp => CategoryParams {
                media: "software",
                entity: "macSoftware",
                name: None,
            },
            Category::Album => CategoryParams {
                media: "music",
                entity: "album",
                name: Some("collectionName"),
            },
            Category::Film => CategoryParams {
                media: "movie",
                entity: "movie",
                name: None,
            },
            Category::TvShow => CategoryParams {
                media: "tvShow",
                entity: "tvSeason",
                name: Some("collectionName"),
            },
            Category::Book => CategoryParams {
                media: "ebook",
                entity: "ebook",
                name: None,
            },
        }
    }
}

/// Immutable search settings resolved once from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    pub category: Option<Category>,
    pub term: String,
}

/// Query string parameters for a single search request.
///
/// Keys are kept sorted so the encoded form is stable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryParameters {
    values: BTreeMap<&'static str, String>,
}

impl QueryParameters {
    pub fn build(config: &SearchConfig) -> Self {
        let mut values = BTreeMap::new();
        values.insert("size", ARTWORK_SIZE.to_string());
        values.insert("name", "trackName".to_string());
        values.insert("term", config.term.clone());

        if let Some(category) = config.category {
            let params = category.params();
            values.insert("media", params.media.to_string());
            values.insert("entity", params.entity.to_string());
            if let Some(name) = params.name {
                values.insert("name", name.to_string());
            }
        }

        Self { values }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn term(&self) -> &str {
        self.get("term").unwrap_or_default()
    }

    pub fn size(&self) -> &str {
        self.get("size").unwrap_or(ARTWORK_SIZE)
    }

    pub fn encode(&self) -> String {
        self.values
            .iter()
            .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Joins the parameters onto `endpoint`, which must be an absolute http(s) URL.
    /// A query string already present on the endpoint is kept ahead of them.
    pub fn request_uri(&self, endpoint: &str) -> Result<Uri, FatalError> {
        let separator = if endpoint.ends_with(['?', '&']) {
            ""
        } else if endpoint.contains('?') {
            "&"
        } else {
            "?"
        };
        let url = format!("{}{}{}", endpoint, separator, self.encode());
        let uri: Uri = url
            .parse()
            .map_err(|e: ureq::http::uri::InvalidUri| FatalError::RequestConstruction {
                url: url.clone(),
                reason: e.to_string(),
            })?;

        let is_http = matches!(uri.scheme_str(), Some("http") | Some("https"));
        if !is_http || uri.host().is_none() {
            return Err(FatalError::RequestConstruction {
                url,
                reason: "not an absolute http(s) URL".to_string(),
            });
        }

        Ok(uri)
    }
}
