use std::time::Duration;
use serde::Deserialize;
use tracing::{debug, warn};
use ureq::http::Uri;
use ureq::Agent;

use crate::model::{ApiResponse, SearchResponse};

pub const DEFAULT_ENDPOINT: &str = "https://itunes.apple.com/search";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(3);

const EXPECTED_CONTENT_TYPE: &str = "text/javascript";

/// Status-agnostic view of an HTTP reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub content_type: Option<String>,
    pub body: String,
}

/// Anything that can perform the single GET a search needs.
pub trait SearchTransport {
    fn get(&self, uri: &Uri) -> Result<RawResponse, ureq::Error>;
}

#[derive(Clone)]
pub struct ItunesClient {
    agent: Agent,
}

impl ItunesClient {
    pub fn with_timeout(timeout: Duration) -> Self {
        // Error statuses still carry a body worth decoding
        let agent = Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl SearchTransport for ItunesClient {
    fn get(&self, uri: &Uri) -> Result<RawResponse, ureq::Error> {
        let url = uri.to_string();
        debug!("GET {}", url);
        let mut resp = self.agent.get(url.as_str()).call()?;

        let content_type = resp
            .headers()
            .get("content-type")
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let body = resp.body_mut().read_to_string()?;

        debug!("Received {} bytes ({})", body.len(), resp.status());
        Ok(RawResponse { content_type, body })
    }
}

pub fn claims_javascript(content_type: Option<&str>) -> bool {
    content_type.is_some_and(|ct| ct.starts_with(EXPECTED_CONTENT_TYPE))
}

/// Decodes a search reply, warning (but carrying on) when the server does not
/// label it as the store's usual `text/javascript`.
///
/// Only the first JSON value in the body is read; anything after it is ignored.
pub fn decode_response(title: &str, raw: &RawResponse) -> Result<SearchResponse, serde_json::Error> {
    if !claims_javascript(raw.content_type.as_deref()) {
        warn!("Response doesn't even claim to be text/javascript. Suspicious!");
    }

    let mut deserializer = serde_json::Deserializer::from_str(&raw.body);
    let api = ApiResponse::deserialize(&mut deserializer)?;
    Ok(SearchResponse {
        title: title.to_string(),
        results: api.into_results(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FatalError;
    use crate::model::SearchResult;
    use crate::query::{QueryParameters, SearchConfig};
    use crate::settings::Settings;
    use std::io::{BufRead, BufReader, Write};
    use std::net::TcpListener;
    use std::thread::{self, JoinHandle};
    use std::time::Instant;

    fn raw(content_type: Option<&str>, body: &str) -> RawResponse {
        RawResponse {
            content_type: content_type.map(str::to_string),
            body: body.to_string(),
        }
    }

    #[test]
    fn test_claims_javascript() {
        assert!(claims_javascript(Some("text/javascript; charset=utf-8")));
        assert!(claims_javascript(Some("text/javascript")));
        assert!(!claims_javascript(Some("application/json")));
        assert!(!claims_javascript(None));
    }

    #[test]
    fn test_decode_keeps_api_order() {
        let body = r#"{"resultCount": 2, "results": [
            {"trackName": "Second Coming", "artworkUrl100": "https://x/100x100bb.jpg"},
            {"collectionName": "Abbey Road"}
        ]}"#;

        let response = decode_response("beatles", &raw(Some("text/javascript"), body)).unwrap();
        assert_eq!(response.title, "beatles");
        assert_eq!(response.results.len(), 2);
        assert_eq!(response.results[0].track_name, "Second Coming");
        assert_eq!(response.results[1].collection_name, "Abbey Road");
    }

    #[test]
    fn test_decode_content_type_mismatch_is_not_fatal() {
        let response = decode_response("x", &raw(Some("text/html"), r#"{"results": []}"#)).unwrap();
        assert!(response.results.is_empty());
    }

    #[test]
    fn test_decode_missing_results_is_empty() {
        let response = decode_response("x", &raw(None, "{}")).unwrap();
        assert!(response.results.is_empty());
    }

    #[test]
    fn test_decode_ignores_trailing_data() {
        let body = "{\"results\": [{\"collectionName\": \"OK Computer\"}]}\n{}";
        let response = decode_response("x", &raw(None, body)).unwrap();
        assert_eq!(response.results.len(), 1);
        assert_eq!(response.results[0].collection_name, "OK Computer");
    }

    #[test]
    fn test_decode_keeps_null_entries() {
        let response = decode_response("x", &raw(None, r#"{"results": [null]}"#)).unwrap();
        assert_eq!(response.results, vec![SearchResult::default()]);
    }

    #[test]
    fn test_decode_rejects_malformed_bodies() {
        for body in ["", "<html></html>", "{\"results\": [", "42", r#"{"results": {}}"#] {
            assert!(decode_response("x", &raw(None, body)).is_err(), "{}", body);
        }
    }

    /// Serves one canned HTTP reply on a local port, optionally after a delay.
    /// The join handle yields the request line the client sent.
    fn serve_once(reply: String, delay: Option<Duration>) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let endpoint = format!("http://{}/search", listener.local_addr().unwrap());

        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream.try_clone().unwrap());

            let mut request_line = String::new();
            reader.read_line(&mut request_line).unwrap();
            loop {
                let mut header = String::new();
                if reader.read_line(&mut header).unwrap_or(0) <= 2 {
                    break;
                }
            }

            if let Some(delay) = delay {
                thread::sleep(delay);
            }
            // The client may have hung up already
            let _ = stream.write_all(reply.as_bytes());
            request_line.trim_end().to_string()
        });

        (endpoint, handle)
    }

    fn http_reply(status: &str, content_type: &str, body: &str) -> String {
        format!(
            "HTTP/1.1 {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            content_type,
            body.len(),
            body
        )
    }

    fn search_uri(endpoint: &str, term: &str) -> Uri {
        let config = SearchConfig {
            category: None,
            term: term.to_string(),
        };
        QueryParameters::build(&config).request_uri(endpoint).unwrap()
    }

    #[test]
    fn test_client_reads_content_type_and_body() {
        let body = r#"{"resultCount": 0, "results": []}"#;
        let (endpoint, server) = serve_once(
            http_reply("200 OK", "text/javascript; charset=utf-8", body),
            None,
        );

        let client = ItunesClient::with_timeout(DEFAULT_TIMEOUT);
        let raw = client.get(&search_uri(&endpoint, "a b")).unwrap();

        assert_eq!(
            raw.content_type.as_deref(),
            Some("text/javascript; charset=utf-8")
        );
        assert_eq!(raw.body, body);
        assert_eq!(
            server.join().unwrap(),
            "GET /search?name=trackName&size=4096&term=a%20b HTTP/1.1"
        );
    }

    #[test]
    fn test_client_error_status_is_still_decoded() {
        let body = r#"{"results": [{"trackName": "Reckoner"}]}"#;
        let (endpoint, server) = serve_once(
            http_reply("500 Internal Server Error", "application/json", body),
            None,
        );

        let client = ItunesClient::with_timeout(DEFAULT_TIMEOUT);
        let raw = client.get(&search_uri(&endpoint, "reckoner")).unwrap();
        server.join().unwrap();

        assert_eq!(raw.content_type.as_deref(), Some("application/json"));
        let response = decode_response("reckoner", &raw).unwrap();
        assert_eq!(response.results.len(), 1);
        assert_eq!(response.results[0].track_name, "Reckoner");
    }

    #[test]
    fn test_client_timeout_is_a_network_error() {
        let (endpoint, server) = serve_once(
            http_reply("200 OK", "text/javascript", "{}"),
            Some(Duration::from_secs(2)),
        );

        let client = ItunesClient::with_timeout(Duration::from_millis(300));
        let started = Instant::now();
        let err = client
            .get(&search_uri(&endpoint, "x"))
            .map_err(FatalError::Network)
            .unwrap_err();

        assert!(started.elapsed() < Duration::from_secs(2));
        assert!(matches!(err, FatalError::Network(ureq::Error::Timeout(_))));
        assert_eq!(err.exit_code(), 2);
        server.join().unwrap();
    }

    #[test]
    fn test_run_against_local_server() {
        let (endpoint, server) = serve_once(
            http_reply("500 Internal Server Error", "application/json", r#"{"results": []}"#),
            None,
        );
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings {
            endpoint,
            output_dir: Some(dir.path().to_path_buf()),
            open_in_viewer: false,
            ..Settings::default()
        };
        let config = SearchConfig {
            category: None,
            term: "a b".to_string(),
        };

        let client = ItunesClient::with_timeout(DEFAULT_TIMEOUT);
        let path = crate::app::run(&config, &settings, &client).unwrap().unwrap();

        assert_eq!(path, dir.path().join("“a b” Images.html"));
        assert!(std::fs::read_to_string(path).unwrap().contains("No results."));
        assert_eq!(
            server.join().unwrap(),
            "GET /search?name=trackName&size=4096&term=a%20b HTTP/1.1"
        );
    }
}
