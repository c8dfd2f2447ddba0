// src/core/net.rs
//! Document retrieval.
//!
//! One operation: `fetch(file_name) -> text`. Every failure mode (missing
//! document, transport error, non-success status) surfaces as a single
//! [`FetchError`] carrying the file name.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};

use crate::config::options::FetchOptions;
use crate::error::{FetchCause, FetchError};

#[async_trait]
pub trait DocumentFetcher: Send + Sync {
    async fn fetch(&self, file_name: &str) -> Result<String, FetchError>;
}

/// GET `<base_url><file_name>` over HTTP(S).
pub struct HttpFetcher {
    http: Client,
    base: Url,
}

impl HttpFetcher {
    pub fn new(opts: &FetchOptions) -> Result<Self, FetchError> {
        let base = Url::parse(&opts.base_url)
            .map_err(|e| FetchError::new(&opts.base_url, FetchCause::InvalidUrl(e.to_string())))?;
        let http = Client::builder()
            .timeout(opts.timeout)
            .user_agent(opts.user_agent.clone())
            .build()
            .map_err(|e| FetchError::new(&opts.base_url, FetchCause::Network(e)))?;
        Ok(Self { http, base })
    }

    /// File names carry spaces and apostrophes; `Url::join` percent-encodes them.
    fn url_for(&self, file_name: &str) -> Result<Url, FetchError> {
        self.base
            .join(file_name)
            .map_err(|e| FetchError::new(file_name, FetchCause::InvalidUrl(e.to_string())))
    }
}

#[async_trait]
impl DocumentFetcher for HttpFetcher {
    async fn fetch(&self, file_name: &str) -> Result<String, FetchError> {
        let url = self.url_for(file_name)?;
        logd!("GET {url}");

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::new(file_name, FetchCause::Network(e)))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(FetchError::new(file_name, FetchCause::NotFound));
        }
        if !status.is_success() {
            return Err(FetchError::new(file_name, FetchCause::Status(status.as_u16())));
        }
        response
            .text()
            .await
            .map_err(|e| FetchError::new(file_name, FetchCause::Network(e)))
    }
}

/// Reads catalog documents from a local checkout of the data repository.
pub struct DirFetcher {
    dir: PathBuf,
}

impl DirFetcher {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self { dir: dir.as_ref().to_path_buf() }
    }
}

#[async_trait]
impl DocumentFetcher for DirFetcher {
    async fn fetch(&self, file_name: &str) -> Result<String, FetchError> {
        let path = self.dir.join(file_name);
        match tokio::fs::read_to_string(&path).await {
            Ok(text) => Ok(text),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(FetchError::new(file_name, FetchCause::NotFound))
            }
            Err(e) => Err(FetchError::new(file_name, FetchCause::Io(e))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_encodes_file_names() {
        let fetcher = HttpFetcher::new(&FetchOptions::default()).unwrap();
        let url = fetcher.url_for("Imperium - Space Marines.cat").unwrap();
        assert_eq!(
            url.as_str(),
            "https://raw.githubusercontent.com/BSData/wh40k-10e/main/Imperium%20-%20Space%20Marines.cat"
        );
    }

    #[test]
    fn base_url_without_slash_keeps_last_segment() {
        let opts = FetchOptions::default().with_base_url("https://example.org/data/main");
        let fetcher = HttpFetcher::new(&opts).unwrap();
        let url = fetcher.url_for("Orks.cat").unwrap();
        assert_eq!(url.as_str(), "https://example.org/data/main/Orks.cat");
    }

    #[tokio::test]
    async fn dir_fetcher_reports_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("Orks.cat"), "<catalogue/>").unwrap();
        let fetcher = DirFetcher::new(dir.path());

        assert_eq!(fetcher.fetch("Orks.cat").await.unwrap(), "<catalogue/>");
        let err = fetcher.fetch("Necrons.cat").await.unwrap_err();
        assert_eq!(err.file_name, "Necrons.cat");
        assert!(matches!(err.cause, FetchCause::NotFound));
    }
}
