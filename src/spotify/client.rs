use reqwest::{Client, Response};
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, trace};

use crate::{
    config::Config,
    error::{ApiError, Error},
    types::Credential,
};

/// HTTP client for the Spotify accounts service and Web API.
///
/// Every call is a single attempt: non-success statuses are returned as
/// [`ApiError::Status`] and never retried.
#[derive(Debug, Clone)]
pub struct SpotifyClient {
    http: Client,
    config: Config,
}

impl SpotifyClient {
    pub fn new(config: Config) -> Result<Self, Error> {
        let mut builder =
            Client::builder().user_agent(concat!("syncliked/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = config.http_timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder
                .build()
                .map_err(|e| Error::Config(format!("cannot build http client: {e}")))?,
            config,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub(crate) fn http(&self) -> &Client {
        &self.http
    }

    pub(crate) fn api_url(&self, path: &str) -> String {
        format!(
            "{base}/{path}",
            base = self.config.api_url.trim_end_matches('/'),
            path = path.trim_start_matches('/')
        )
    }

    /// Authenticated GET against the Web API.
    pub(crate) async fn get_json<R: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
        credential: &Credential,
    ) -> Result<R, ApiError> {
        let url = self.api_url(path);
        debug!(%url, "GET");

        let response = self
            .http
            .get(&url)
            .query(query)
            .bearer_auth(credential.as_str())
            .send()
            .await?;

        parse_json(response).await
    }

    /// Authenticated POST with a JSON body against the Web API.
    pub(crate) async fn post_json<B, R>(
        &self,
        path: &str,
        body: &B,
        credential: &Credential,
    ) -> Result<R, ApiError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = self.api_url(path);
        debug!(%url, "POST");

        let response = self
            .http
            .post(&url)
            .json(body)
            .bearer_auth(credential.as_str())
            .send()
            .await?;

        parse_json(response).await
    }
}

/// Turns a non-success status into [`ApiError::Status`], otherwise decodes the body.
pub(crate) async fn parse_json<R: DeserializeOwned>(response: Response) -> Result<R, ApiError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        debug!(%status, "request rejected");
        trace!(%body, "error body");
        return Err(ApiError::Status { status, body });
    }

    Ok(response.json::<R>().await?)
}
