use serde::{Deserialize, Deserializer};

/// One store item as returned by the search API, plus the fields derived
/// from it for display.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SearchResult {
    #[serde(rename = "artworkUrl100", default, deserialize_with = "string_or_null")]
    pub artwork_url_100: String,
    #[serde(rename = "trackName", default, deserialize_with = "string_or_null")]
    pub track_name: String,
    #[serde(rename = "collectionName", default, deserialize_with = "string_or_null")]
    pub collection_name: String,
    /// Thumbnail URL rewritten to the requested artwork size
    #[serde(skip)]
    pub artwork_url_big: String,
    /// Track name, falling back to the collection name
    #[serde(skip)]
    pub name: String,
}

#[cfg(test)]
impl SearchResult {
    pub fn new(artwork_url_100: &str, track_name: &str, collection_name: &str) -> Self {
        Self {
            artwork_url_100: artwork_url_100.to_string(),
            track_name: track_name.to_string(),
            collection_name: collection_name.to_string(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchResponse {
    pub title: String,
    pub results: Vec<SearchResult>,
}

/// Top-level body of a search API reply.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiResponse {
    /// `null` entries are kept as empty results
    #[serde(default)]
    pub results: Option<Vec<Option<SearchResult>>>,
}

impl ApiResponse {
    pub fn into_results(self) -> Vec<SearchResult> {
        self.results
            .unwrap_or_default()
            .into_iter()
            .map(Option::unwrap_or_default)
            .collect()
    }
}

fn string_or_null<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
