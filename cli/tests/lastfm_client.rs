mod common;

use common::StubLastFm;
use indicatif::ProgressBar;
use std::time::Duration;
use tagmetrics::lastfm::{ArtistTagSource, FetchError, LastFmClient, RetryPolicy, fetch_dataset};

const RATE_LIMITED: &str = r#"{"error": 29, "message": "Rate limit exceeded"}"#;
const NOT_FOUND: &str = r#"{"error": 6, "message": "The artist you supplied could not be found"}"#;

fn client_for(stub: &StubLastFm, attempts: u32) -> LastFmClient {
    LastFmClient::new("test-key")
        .unwrap()
        .with_base_url(&stub.base_url)
        .with_retry(RetryPolicy {
            attempts,
            backoff: Duration::ZERO,
        })
}

fn chart_page(names: &[&str], total_pages: Option<&str>) -> String {
    let artists: Vec<_> = names
        .iter()
        .map(|name| serde_json::json!({ "name": name, "playcount": "1" }))
        .collect();
    let mut chart = serde_json::json!({ "artists": { "artist": artists } });
    if let Some(total) = total_pages {
        chart["artists"]["@attr"] = serde_json::json!({ "page": "1", "totalPages": total });
    }
    chart.to_string()
}

#[test]
fn test_rate_limited_request_is_retried() {
    let stub = StubLastFm::start(&[
        RATE_LIMITED,
        r#"{"toptags": {"tag": [{"count": 100, "name": "dubstep"}]}}"#,
    ]);
    let client = client_for(&stub, 3);

    let tags = client.top_tags("Burial").unwrap();

    assert_eq!(tags, vec!["dubstep"]);
    let requests = stub.requests();
    assert_eq!(requests.len(), 2);
    assert!(requests[0].contains("method=artist.gettoptags"));
    assert!(requests[0].contains("artist=Burial"));
    assert!(requests[0].contains("api_key=test-key"));
    assert!(requests[0].contains("format=json"));
}

#[test]
fn test_permanent_error_is_not_retried() {
    let stub = StubLastFm::start(&[NOT_FOUND]);
    let client = client_for(&stub, 3);

    let result = client.top_tags("Nobody");

    assert!(matches!(result, Err(FetchError::Api { code: 6, .. })));
    assert_eq!(stub.requests().len(), 1);
}

#[test]
fn test_retries_stop_after_policy_attempts() {
    let stub = StubLastFm::start(&[RATE_LIMITED]);
    let client = client_for(&stub, 2);

    let result = client.top_tags("Burial");

    assert!(matches!(result, Err(FetchError::Api { code: 29, .. })));
    assert_eq!(stub.requests().len(), 2);
}

#[test]
fn test_chart_paging_collects_across_pages() {
    let first = chart_page(&["Radiohead", "Burial"], Some("2"));
    let second = chart_page(&["Burial", "Björk"], Some("2"));
    let stub = StubLastFm::start(&[&first, &second]);
    let client = client_for(&stub, 1);

    let artists = client.top_artists(3).unwrap();

    assert_eq!(artists, vec!["Radiohead", "Burial", "Björk"]);
    let requests = stub.requests();
    assert_eq!(requests.len(), 2);
    assert!(requests[0].contains("method=chart.gettopartists"));
    assert!(requests[0].contains("page=1"));
    assert!(requests[1].contains("page=2"));
}

#[test]
fn test_chart_paging_stops_on_empty_page() {
    let first = chart_page(&["Radiohead", "Burial"], None);
    let empty = chart_page(&[], None);
    let stub = StubLastFm::start(&[&first, &empty]);
    let client = client_for(&stub, 1);

    let artists = client.top_artists(5).unwrap();

    assert_eq!(artists, vec!["Radiohead", "Burial"]);
    assert_eq!(stub.requests().len(), 2);
}

#[test]
fn test_chart_paging_stops_when_page_repeats() {
    // Every page is the same single artist.
    let repeated = chart_page(&["Only"], None);
    let stub = StubLastFm::start(&[&repeated]);
    let client = client_for(&stub, 1);

    let artists = client.top_artists(5).unwrap();

    assert_eq!(artists, vec!["Only"]);
    assert_eq!(stub.requests().len(), 2);
}

#[test]
fn test_chart_paging_stops_at_total_pages() {
    let only_page = chart_page(&["Radiohead"], Some("1"));
    let stub = StubLastFm::start(&[&only_page]);
    let client = client_for(&stub, 1);

    let artists = client.top_artists(5).unwrap();

    assert_eq!(artists, vec!["Radiohead"]);
    assert_eq!(stub.requests().len(), 1);
}

#[test]
fn test_fetch_dataset_through_client() {
    let chart = chart_page(&["Burial"], Some("1"));
    let stub = StubLastFm::start(&[
        &chart,
        r#"{"toptags": {"tag": {"count": 100, "name": "dubstep"}}}"#,
    ]);
    let client = client_for(&stub, 1);

    let dataset = fetch_dataset(&client, 1, &ProgressBar::hidden()).unwrap();

    assert_eq!(dataset.len(), 1);
    assert!(dataset.tags_of("Burial").unwrap().contains("dubstep"));
}
