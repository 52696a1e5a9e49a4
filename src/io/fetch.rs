use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{COOKIE, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;

use crate::model::candidate::{CandidateSource, PeoplePayload, Person, TagsPayload};
use crate::model::config::ServerConfig;

/// Events sent from the fetch thread to the TUI event loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchEvent {
    People(Vec<Person>),
    Tags(Vec<String>),
}

/// Error type for candidate fetches
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{url} returned status {status}")]
    Status { url: String, status: u16 },
    #[error("invalid JSON from {url}: {source}")]
    Json {
        url: String,
        source: serde_json::Error,
    },
    #[error("invalid session cookie")]
    Cookie(#[from] reqwest::header::InvalidHeaderValue),
}

/// One-shot background fetch of both candidate lists.
///
/// Each list is sent as soon as it arrives. A failed fetch is logged and sends
/// nothing, so that list simply stays empty.
pub struct CandidateFetcher {
    rx: mpsc::Receiver<FetchEvent>,
}

impl CandidateFetcher {
    /// Start fetching in the background. Without a base URL nothing is fetched.
    pub fn start(server: &ServerConfig) -> Self {
        let (tx, rx) = mpsc::channel();
        let (Some(people_url), Some(tags_url)) = (server.people_url(), server.tags_url()) else {
            tracing::info!("no server configured, candidates stay empty");
            return CandidateFetcher { rx };
        };

        let client = match build_client(server) {
            Ok(c) => c,
            Err(e) => {
                tracing::warn!(error = %e, "could not build http client");
                return CandidateFetcher { rx };
            }
        };

        thread::spawn(move || {
            match fetch_people(&client, &people_url) {
                Ok(people) => {
                    tracing::info!(count = people.len(), "fetched people");
                    let _ = tx.send(FetchEvent::People(people));
                }
                Err(e) => tracing::warn!(error = %e, "people fetch failed"),
            }
            match fetch_tags(&client, &tags_url) {
                Ok(tags) => {
                    tracing::info!(count = tags.len(), "fetched tags");
                    let _ = tx.send(FetchEvent::Tags(tags));
                }
                Err(e) => tracing::warn!(error = %e, "tags fetch failed"),
            }
        });

        CandidateFetcher { rx }
    }

    /// A fetcher that resolves immediately with an already-loaded source.
    pub fn from_source(source: CandidateSource) -> Self {
        let (tx, rx) = mpsc::channel();
        let _ = tx.send(FetchEvent::People(source.people));
        let _ = tx.send(FetchEvent::Tags(source.tags));
        CandidateFetcher { rx }
    }

    /// Non-blocking poll for pending fetch results.
    /// Returns all queued events (may be empty).
    pub fn poll(&self) -> Vec<FetchEvent> {
        let mut events = Vec::new();
        while let Ok(evt) = self.rx.try_recv() {
            events.push(evt);
        }
        events
    }
}

/// Fold a fetch result into the cached source.
pub fn apply_event(source: &mut CandidateSource, event: FetchEvent) {
    match event {
        FetchEvent::People(people) => source.people = people,
        FetchEvent::Tags(tags) => source.tags = tags,
    }
}

pub fn build_client(server: &ServerConfig) -> Result<Client, FetchError> {
    let mut headers = HeaderMap::new();
    if let Some(cookie) = &server.session_cookie {
        headers.insert(COOKIE, HeaderValue::from_str(cookie)?);
    }
    let client = Client::builder()
        .timeout(Duration::from_secs(server.timeout_secs))
        .default_headers(headers)
        .build()?;
    Ok(client)
}

pub fn fetch_people(client: &Client, url: &str) -> Result<Vec<Person>, FetchError> {
    let payload: PeoplePayload = fetch_json(client, url)?;
    Ok(payload.into_people())
}

pub fn fetch_tags(client: &Client, url: &str) -> Result<Vec<String>, FetchError> {
    let payload: TagsPayload = fetch_json(client, url)?;
    Ok(payload.tags)
}

fn fetch_json<T: DeserializeOwned>(client: &Client, url: &str) -> Result<T, FetchError> {
    let response = client.get(url).send()?;
    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }
    let body = response.text()?;
    serde_json::from_str(&body).map_err(|e| FetchError::Json {
        url: url.to_string(),
        source: e,
    })
}
