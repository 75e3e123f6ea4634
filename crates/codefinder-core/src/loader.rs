//! Fetching static JSON resources.
//!
//! A load is all-or-nothing: every resource an adapter declares is fetched
//! concurrently, and the first failure (in declaration order) aborts the
//! whole load. There is no timeout and no retry.

use std::convert::Infallible;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::thread;

use reqwest::header::{CACHE_CONTROL, HeaderMap, HeaderValue, PRAGMA, USER_AGENT};
use serde::de::DeserializeOwned;
use tracing::{debug, info, info_span};

use codefinder_model::{Catalog, LoadError, Result};

use crate::source::SourceAdapter;

/// User agent string for data requests.
const USER_AGENT_VALUE: &str = concat!("codefinder/", env!("CARGO_PKG_VERSION"));

/// Where a JSON document lives.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ResourceLocation {
    Url(String),
    Path(PathBuf),
}

impl ResourceLocation {
    #[must_use]
    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Url(_))
    }
}

impl FromStr for ResourceLocation {
    type Err = Infallible;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        let lower = value.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Ok(Self::Url(value.to_string()))
        } else {
            Ok(Self::Path(PathBuf::from(value)))
        }
    }
}

impl From<PathBuf> for ResourceLocation {
    fn from(path: PathBuf) -> Self {
        Self::Path(path)
    }
}

impl fmt::Display for ResourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Url(url) => f.write_str(url),
            Self::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Raw bytes of a fetched resource, tagged with where they came from.
#[derive(Debug, Clone)]
pub struct Document {
    pub location: ResourceLocation,
    pub bytes: Vec<u8>,
}

impl Document {
    pub fn new(location: ResourceLocation, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            location,
            bytes: bytes.into(),
        }
    }

    /// Decode the document as JSON.
    pub fn parse<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_slice(&self.bytes)
            .map_err(|source| LoadError::json(self.location.to_string(), source))
    }
}

/// Retrieves the bytes behind a [`ResourceLocation`].
pub trait ResourceFetcher: Send + Sync {
    fn fetch(&self, location: &ResourceLocation) -> Result<Vec<u8>>;
}

/// Fetches URLs over HTTP, bypassing caches, and reads paths from disk.
#[derive(Debug, Clone)]
pub struct DefaultFetcher {
    client: reqwest::blocking::Client,
}

impl DefaultFetcher {
    pub fn new() -> Result<Self> {
        Self::build(reqwest::blocking::Client::builder())
    }

    /// Connects directly, ignoring proxy environment variables.
    pub fn without_proxy() -> Result<Self> {
        Self::build(reqwest::blocking::Client::builder().no_proxy())
    }

    fn build(builder: reqwest::blocking::ClientBuilder) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
        headers.insert(PRAGMA, HeaderValue::from_static("no-cache"));
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));

        let client = builder
            .default_headers(headers)
            .build()
            .map_err(|e| LoadError::Network {
                location: "http client".to_string(),
                message: format!("failed to create HTTP client: {e}"),
            })?;

        Ok(Self { client })
    }

    fn fetch_url(&self, url: &str) -> Result<Vec<u8>> {
        debug!("Fetching {}", url);
        let network = |e: reqwest::Error| LoadError::Network {
            location: url.to_string(),
            message: e.to_string(),
        };
        let response = self.client.get(url).send().map_err(network)?;
        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::Status {
                location: url.to_string(),
                status: status.as_u16(),
            });
        }
        let bytes = response.bytes().map_err(network)?;
        Ok(bytes.to_vec())
    }
}

impl ResourceFetcher for DefaultFetcher {
    fn fetch(&self, location: &ResourceLocation) -> Result<Vec<u8>> {
        match location {
            ResourceLocation::Url(url) => self.fetch_url(url),
            ResourceLocation::Path(path) => {
                debug!("Reading {}", path.display());
                std::fs::read(path).map_err(|source| LoadError::io(path, source))
            }
        }
    }
}

/// Fetch every resource, one thread per resource when there is more than one.
///
/// Documents come back in the order of `resources`.
pub fn fetch_all<F>(fetcher: &F, resources: &[ResourceLocation]) -> Result<Vec<Document>>
where
    F: ResourceFetcher + ?Sized,
{
    let results: Vec<Result<Vec<u8>>> = if resources.len() <= 1 {
        resources.iter().map(|location| fetcher.fetch(location)).collect()
    } else {
        thread::scope(|scope| {
            let handles: Vec<_> = resources
                .iter()
                .map(|location| scope.spawn(move || fetcher.fetch(location)))
                .collect();
            handles
                .into_iter()
                .zip(resources)
                .map(|(handle, location)| {
                    handle.join().unwrap_or_else(|_| {
                        Err(LoadError::Network {
                            location: location.to_string(),
                            message: "fetch thread panicked".to_string(),
                        })
                    })
                })
                .collect()
        })
    };

    resources
        .iter()
        .cloned()
        .zip(results)
        .map(|(location, bytes)| bytes.map(|bytes| Document::new(location, bytes)))
        .collect()
}

/// Fetch and normalize the adapter's resources into a [`Catalog`].
pub fn load_catalog<F>(adapter: &dyn SourceAdapter, fetcher: &F) -> Result<Catalog>
where
    F: ResourceFetcher + ?Sized,
{
    let span = info_span!("load", source = %adapter.kind());
    let _guard = span.enter();

    let documents = fetch_all(fetcher, adapter.resources())?;
    let catalog = adapter.normalize(documents)?;
    info!(
        categories = catalog.categories().len(),
        sub_categories = catalog.sub_category_count(),
        records = catalog.leaves().len(),
        "catalog loaded"
    );
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_urls_and_paths() {
        let url: ResourceLocation = "https://example.test/data/codes.json".parse().unwrap();
        assert!(url.is_remote());
        let upper: ResourceLocation = "HTTP://example.test/codes.json".parse().unwrap();
        assert!(upper.is_remote());
        let path: ResourceLocation = "data/codes.json".parse().unwrap();
        assert_eq!(path, ResourceLocation::Path(PathBuf::from("data/codes.json")));
        assert_eq!(path.to_string(), "data/codes.json");
    }

    #[test]
    fn document_parse_reports_location() {
        let document = Document::new("broken.json".parse().unwrap(), "{ not json");
        let error = document.parse::<serde_json::Value>().unwrap_err();
        assert!(matches!(error, LoadError::Json { ref location, .. } if location == "broken.json"));
    }
}
