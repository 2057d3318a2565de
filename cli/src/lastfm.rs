use indicatif::ProgressBar;
use reqwest::blocking::Client;
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};
use std::thread;
use std::time::Duration;
use tagmetrics_core::{Dataset, DatasetError};
use thiserror::Error;
use tracing::{debug, warn};

const API_URL: &str = "http://ws.audioscrobbler.com/2.0/";
const CHART_PAGE_SIZE: usize = 100;

// Last.fm error codes worth another attempt: operation failed, service
// offline, temporarily unavailable, rate limit exceeded.
const TRANSIENT_API_ERRORS: [u32; 4] = [8, 11, 16, 29];

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Last.fm request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Last.fm error {code}: {message}")]
    Api { code: u32, message: String },

    #[error("unexpected Last.fm response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("fetched data is not a usable dataset: {0}")]
    Dataset(#[from] DatasetError),
}

impl FetchError {
    pub fn is_transient(&self) -> bool {
        match self {
            FetchError::Http(_) => true,
            FetchError::Api { code, .. } => TRANSIENT_API_ERRORS.contains(code),
            FetchError::Decode(_) | FetchError::Dataset(_) => false,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: u32,
    message: String,
}

#[derive(Debug, Deserialize)]
struct NamedEntry {
    name: String,
}

/// Last.fm collapses single-element lists into a bare object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> Default for OneOrMany<T> {
    fn default() -> Self {
        OneOrMany::Many(Vec::new())
    }
}

impl<T> OneOrMany<T> {
    fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::Many(items) => items,
            OneOrMany::One(item) => vec![item],
        }
    }
}

#[derive(Debug, Deserialize)]
struct TopArtistsResponse {
    artists: ArtistList,
}

#[derive(Debug, Deserialize)]
struct ArtistList {
    #[serde(default)]
    artist: OneOrMany<NamedEntry>,
    #[serde(rename = "@attr")]
    attr: Option<PageAttr>,
}

#[derive(Debug, Deserialize)]
struct PageAttr {
    #[serde(rename = "totalPages")]
    total_pages: Option<Count>,
}

/// Last.fm sends counts as strings, but not always.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Count {
    Number(usize),
    Text(String),
}

impl Count {
    fn value(&self) -> Option<usize> {
        match self {
            Count::Number(n) => Some(*n),
            Count::Text(text) => text.trim().parse().ok(),
        }
    }
}

/// One page of `chart.gettopartists`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartPage {
    pub artists: Vec<String>,
    pub total_pages: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct TopTagsResponse {
    toptags: TagList,
}

#[derive(Debug, Deserialize)]
struct TagList {
    #[serde(default)]
    tag: OneOrMany<NamedEntry>,
}

/// The [`FetchError::Api`] carried by an `{"error": .., "message": ..}` body,
/// if that is what `body` is.
pub fn api_error(body: &str) -> Option<FetchError> {
    serde_json::from_str::<ApiErrorBody>(body)
        .ok()
        .map(|api_error| FetchError::Api {
            code: api_error.error,
            message: api_error.message,
        })
}

/// Parsers expect a body that already passed [`api_error`].
pub fn parse_chart_page(body: &str) -> Result<ChartPage, FetchError> {
    let response: TopArtistsResponse = serde_json::from_str(body)?;
    let total_pages = response
        .artists
        .attr
        .and_then(|attr| attr.total_pages)
        .and_then(|count| count.value());

    Ok(ChartPage {
        artists: names(response.artists.artist),
        total_pages,
    })
}

pub fn parse_top_artists(body: &str) -> Result<Vec<String>, FetchError> {
    Ok(parse_chart_page(body)?.artists)
}

pub fn parse_top_tags(body: &str) -> Result<Vec<String>, FetchError> {
    let response: TopTagsResponse = serde_json::from_str(body)?;
    Ok(names(response.toptags.tag))
}

fn names(entries: OneOrMany<NamedEntry>) -> Vec<String> {
    entries
        .into_vec()
        .into_iter()
        .map(|entry| entry.name)
        .filter(|name| !name.trim().is_empty())
        .collect()
}

/// Where artist names and their tags come from.
pub trait ArtistTagSource {
    /// Up to `count` artists, most popular first.
    fn top_artists(&self, count: usize) -> Result<Vec<String>, FetchError>;
    fn top_tags(&self, artist: &str) -> Result<Vec<String>, FetchError>;
}

#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub attempts: u32,
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: 3,
            backoff: Duration::from_millis(500),
        }
    }
}

pub struct LastFmClient {
    client: Client,
    api_key: String,
    base_url: String,
    retry: RetryPolicy,
}

impl LastFmClient {
    pub fn new(api_key: impl Into<String>) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!("tagmetrics/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url: API_URL.to_string(),
            retry: RetryPolicy::default(),
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    fn call(&self, method: &str, params: &[(&str, String)]) -> Result<String, FetchError> {
        let mut attempt = 1;
        loop {
            match self.call_once(method, params) {
                Ok(body) => return Ok(body),
                Err(error) if error.is_transient() && attempt < self.retry.attempts => {
                    warn!(method, attempt, %error, "Last.fm request failed, retrying");
                    thread::sleep(self.retry.backoff * attempt);
                    attempt += 1;
                }
                Err(error) => return Err(error),
            }
        }
    }

    fn call_once(&self, method: &str, params: &[(&str, String)]) -> Result<String, FetchError> {
        let body = self
            .client
            .get(&self.base_url)
            .query(&[
                ("method", method),
                ("api_key", self.api_key.as_str()),
                ("format", "json"),
            ])
            .query(params)
            .send()?
            .text()?;

        // Surface API errors here so the retry loop can see them
        match api_error(&body) {
            Some(error) => Err(error),
            None => Ok(body),
        }
    }
}

impl ArtistTagSource for LastFmClient {
    /// Pages through the chart until `count` distinct names are collected,
    /// the last page is reached, or a page adds nothing new.
    fn top_artists(&self, count: usize) -> Result<Vec<String>, FetchError> {
        let mut artists = Vec::with_capacity(count);
        let mut seen = BTreeSet::new();
        let mut page = 1;

        while artists.len() < count {
            let body = self.call(
                "chart.gettopartists",
                &[
                    ("limit", CHART_PAGE_SIZE.to_string()),
                    ("page", page.to_string()),
                ],
            )?;
            let chart = parse_chart_page(&body)?;

            let before = artists.len();
            for artist in chart.artists {
                if artists.len() < count && seen.insert(artist.clone()) {
                    artists.push(artist);
                }
            }
            let added = artists.len() - before;
            debug!(page, added, total_pages = ?chart.total_pages, "Fetched chart page");

            let last_page = chart.total_pages.is_some_and(|total| page >= total);
            if added == 0 || last_page {
                break;
            }
            page += 1;
        }

        if artists.len() < count {
            warn!(
                requested = count,
                received = artists.len(),
                pages = page,
                "Chart paging stopped before reaching the requested count"
            );
        }

        Ok(artists)
    }

    fn top_tags(&self, artist: &str) -> Result<Vec<String>, FetchError> {
        let body = self.call("artist.gettoptags", &[("artist", artist.to_string())])?;
        parse_top_tags(&body)
    }
}

/// Builds a dataset from the `size` most popular artists and their top tags.
///
/// An artist Last.fm refuses to give tags for (unknown name and similar
/// permanent errors) is kept with no tags. Transient failures that outlast the
/// retries abort the fetch.
pub fn fetch_dataset(
    source: &dyn ArtistTagSource,
    size: usize,
    progress: &ProgressBar,
) -> Result<Dataset, FetchError> {
    let artists = source.top_artists(size)?;
    if artists.len() < size {
        warn!(
            requested = size,
            received = artists.len(),
            "Chart returned fewer artists than requested"
        );
    }

    progress.set_length(artists.len() as u64);
    let mut entries = BTreeMap::new();

    for artist in artists {
        progress.set_message(artist.clone());
        let tags = match source.top_tags(&artist) {
            Ok(tags) => tags.into_iter().collect(),
            Err(error @ FetchError::Api { .. }) if !error.is_transient() => {
                warn!(artist = %artist, %error, "No tags for artist");
                BTreeSet::new()
            }
            Err(error) => return Err(error),
        };
        entries.insert(artist, tags);
        progress.inc(1);
    }

    progress.finish_with_message("Dataset complete");
    Ok(Dataset::new(entries)?)
}
