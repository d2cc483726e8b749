use crate::model::SearchResult;

const THUMBNAIL_SIZE: &str = "100x100";

/// Fills in the display fields of every result, in place and in order.
///
/// `size` is the requested edge length, as sent in the `size` query parameter.
pub fn normalize_results(results: &mut [SearchResult], size: &str) {
    let dimensions = format!("{}x{}", size, size);
    for result in results.iter_mut() {
        result.artwork_url_big = big_artwork_url(&result.artwork_url_100, &dimensions);
        result.name = display_name(&result.track_name, &result.collection_name).to_string();
    }
}

fn big_artwork_url(thumbnail_url: &str, dimensions: &str) -> String {
    thumbnail_url.replace(THUMBNAIL_SIZE, dimensions)
}

fn display_name<'a>(track_name: &'a str, collection_name: &'a str) -> &'a str {
    if track_name.is_empty() {
        collection_name
    } else {
        track_name
    }
}
