//! Retrieval of manifests and raw documents
//!
//! Locations are either absolute `http(s)://` URLs, fetched with ureq on the
//! blocking pool, or paths relative to the site root. A site root that is not
//! a URL is a local directory and is read from disk.

use std::future::Future;
use std::io::ErrorKind;
use std::path::PathBuf;
use thiserror::Error;

use crate::helpers::{is_remote, join_url};

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request to {url} failed: {message}")]
    Request { url: String, message: String },

    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("fetch task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// A completed request, whatever its status
#[derive(Debug, Clone)]
pub struct Response {
    pub status: u16,
    pub body: String,
}

impl Response {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Asynchronous GET of a location
pub trait Transport: Send + Sync {
    fn get(&self, location: &str) -> impl Future<Output = Result<Response, TransportError>> + Send;
}

/// Resolves relative locations against the configured site root
#[derive(Clone)]
pub struct SiteTransport {
    root: String,
    agent: ureq::Agent,
}

impl SiteTransport {
    pub fn new(root: &str) -> Self {
        Self {
            root: root.to_string(),
            agent: ureq::AgentBuilder::new().build(),
        }
    }

    async fn get_remote(&self, url: String) -> Result<Response, TransportError> {
        let agent = self.agent.clone();
        tokio::task::spawn_blocking(move || match agent.get(&url).call() {
            Ok(resp) => {
                let status = resp.status();
                let body = resp.into_string().map_err(|e| TransportError::Request {
                    url: url.clone(),
                    message: e.to_string(),
                })?;
                Ok(Response { status, body })
            }
            Err(ureq::Error::Status(status, resp)) => Ok(Response {
                status,
                body: resp.into_string().unwrap_or_default(),
            }),
            Err(e) => Err(TransportError::Request {
                url: url.clone(),
                message: e.to_string(),
            }),
        })
        .await?
    }

    async fn get_local(&self, path: PathBuf) -> Result<Response, TransportError> {
        match tokio::fs::read_to_string(&path).await {
            Ok(body) => Ok(Response::ok(body)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Response {
                status: 404,
                body: String::new(),
            }),
            Err(source) => Err(TransportError::Io { path, source }),
        }
    }
}

impl Transport for SiteTransport {
    async fn get(&self, location: &str) -> Result<Response, TransportError> {
        let target = join_url(&self.root, location);
        tracing::debug!("GET {}", target);
        if is_remote(&target) {
            self.get_remote(target).await
        } else {
            // Local locations arrive URI-encoded like remote ones
            let decoded = percent_encoding::percent_decode_str(location)
                .decode_utf8()
                .map_err(|e| TransportError::Request {
                    url: target.clone(),
                    message: e.to_string(),
                })?;
            self.get_local(PathBuf::from(join_url(&self.root, &decoded)))
                .await
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_local_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("blogs")).unwrap();
        std::fs::write(dir.path().join("blogs/index.json"), "[]").unwrap();

        let transport = SiteTransport::new(dir.path().to_str().unwrap());
        let resp = transport.get("blogs/index.json").await.unwrap();
        assert!(resp.is_success());
        assert_eq!(resp.body, "[]");
    }

    #[tokio::test]
    async fn test_missing_local_file_is_404() {
        let dir = tempfile::tempdir().unwrap();
        let transport = SiteTransport::new(dir.path().to_str().unwrap());
        let resp = transport.get("blogs/index.json").await.unwrap();
        assert_eq!(resp.status, 404);
        assert!(!resp.is_success());
    }

    #[tokio::test]
    async fn test_local_location_is_decoded() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("blogs/sub")).unwrap();
        std::fs::write(dir.path().join("blogs/你好 世界.md"), "cjk").unwrap();
        std::fs::write(dir.path().join("blogs/sub/x.md"), "nested").unwrap();

        let transport = SiteTransport::new(dir.path().to_str().unwrap());
        let resp = transport
            .get("blogs/%E4%BD%A0%E5%A5%BD%20%E4%B8%96%E7%95%8C.md")
            .await
            .unwrap();
        assert_eq!(resp.body, "cjk");

        let resp = transport.get("blogs/sub%2Fx.md").await.unwrap();
        assert_eq!(resp.body, "nested");
    }
}
