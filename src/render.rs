//! HTML page for a finished search.
//!
//! Rendering is a pure function of the title and the normalized results, so
//! it can be exercised without a network round trip.

use askama::Template;

use crate::model::{SearchResponse, SearchResult};

#[derive(Template)]
#[template(path = "page.html")]
struct PageTemplate<'a> {
    title: &'a str,
    results: &'a [SearchResult],
}

pub fn render_page(response: &SearchResponse) -> askama::Result<String> {
    PageTemplate {
        title: &response.title,
        results: &response.results,
    }
    .render()
}
