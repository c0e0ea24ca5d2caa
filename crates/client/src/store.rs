//! Movie store client.
//!
//! The store answers `GET ?action=movies` with JSON and every `POST` with a
//! plain status string, where only `OK` means success.

use std::time::Duration;

use async_trait::async_trait;
use movienight_common::{ClientConfig, Movie, OK_REPLY, StoreRequest};
use reqwest::{Client, header::CONTENT_TYPE};
use tracing::{debug, info, warn};
use url::Url;

use crate::error::{ClientError, ClientResult};

/// The remote movie store.
#[async_trait]
pub trait MovieStore: Send + Sync {
    /// Fetch every movie.
    async fn fetch_movies(&self) -> ClientResult<Vec<Movie>>;
    /// Send one request; succeeds only on an `OK` reply.
    async fn submit(&self, request: &StoreRequest) -> ClientResult<()>;
}

/// [`MovieStore`] over HTTP.
#[derive(Debug, Clone)]
pub struct HttpMovieStore {
    client: Client,
    base_url: Url,
}

impl HttpMovieStore {
    /// Create a client for the store at `base_url`.
    pub fn new(base_url: &str) -> ClientResult<Self> {
        let base_url = Url::parse(base_url)?;
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("movienight/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, base_url })
    }

    /// Create a client from configuration.
    pub fn from_config(config: &ClientConfig) -> ClientResult<Self> {
        Self::new(&config.api_url)
    }

    /// The store endpoint.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }
}

#[async_trait]
impl MovieStore for HttpMovieStore {
    async fn fetch_movies(&self) -> ClientResult<Vec<Movie>> {
        let mut url = self.base_url.clone();
        url.query_pairs_mut().append_pair("action", "movies");

        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            warn!(status = %status, body = %body, "Movie fetch failed");
            return Err(ClientError::Rejected(body));
        }

        let movies: Vec<Movie> = serde_json::from_str(&body)?;
        debug!(count = movies.len(), "Fetched movies");
        Ok(movies)
    }

    async fn submit(&self, request: &StoreRequest) -> ClientResult<()> {
        let body = serde_json::to_string(request)?;

        // Sent as text/plain; the store parses JSON from the raw body.
        let response = self
            .client
            .post(self.base_url.clone())
            .header(CONTENT_TYPE, "text/plain;charset=utf-8")
            .body(body)
            .send()
            .await?;
        let reply = response.text().await?;

        if reply.trim() == OK_REPLY {
            info!(kind = request.kind(), "Store accepted request");
            Ok(())
        } else {
            warn!(kind = request.kind(), reply = %reply, "Store rejected request");
            Err(ClientError::Rejected(reply))
        }
    }
}
