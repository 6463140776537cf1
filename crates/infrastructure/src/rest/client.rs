//! reqwest-backed transport client
//!
//! The primary adapter for the `ResourceClient` port. One instance
//! wraps a `reqwest::Client` configured with the server's API key and
//! is cheap to clone. No retries: a failed call surfaces immediately.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Response, StatusCode};
use tracing::debug;
use url::Url;

use capstan_application::{ResourceClient, TransportError};
use capstan_domain::{Resource, ResourceKind, VariableSet};

use crate::persistence::ServerProfile;
use crate::rest::dto::{ResourceDto, VariableSetDto};

/// Header carrying the API key on every request.
const API_KEY_HEADER: &str = "X-API-Key";

/// HTTP client implementation for the deployment server's REST API.
#[derive(Debug, Clone)]
pub struct RestResourceClient {
    http: reqwest::Client,
    base_url: Url,
}

impl RestResourceClient {
    /// Creates a client for the given server profile.
    ///
    /// # Errors
    /// Fails when the server URL does not parse or the API key cannot
    /// be carried in a header.
    pub fn new(profile: &ServerProfile) -> Result<Self, TransportError> {
        let base_url = Url::parse(&profile.server_url)
            .map_err(|e| TransportError::Network(format!("invalid server URL: {e}")))?;

        let mut api_key = HeaderValue::from_str(&profile.api_key)
            .map_err(|e| TransportError::Network(format!("invalid API key: {e}")))?;
        api_key.set_sensitive(true);
        let mut headers = HeaderMap::new();
        headers.insert(API_KEY_HEADER, api_key);

        let http = reqwest::Client::builder()
            .user_agent(concat!("capstan/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()
            .map_err(|e| TransportError::Network(e.to_string()))?;

        Ok(Self { http, base_url })
    }

    fn endpoint(&self, path: &str) -> Result<Url, TransportError> {
        self.base_url
            .join(path)
            .map_err(|e| TransportError::Network(format!("invalid endpoint '{path}': {e}")))
    }

    fn map_send_error(error: &reqwest::Error) -> TransportError {
        TransportError::Network(error.to_string())
    }

    /// Turns a non-success response into the port's error taxonomy.
    async fn rejection(response: Response) -> TransportError {
        let status = response.status().as_u16();
        let message = response.text().await.unwrap_or_default();
        TransportError::Rejected { status, message }
    }

    async fn decode<T: serde::de::DeserializeOwned>(
        response: Response,
    ) -> Result<T, TransportError> {
        response
            .json::<T>()
            .await
            .map_err(|e| TransportError::Decode(e.to_string()))
    }
}

#[async_trait]
impl ResourceClient for RestResourceClient {
    async fn find_all(&self, kind: ResourceKind) -> Result<Vec<Resource>, TransportError> {
        let url = self.endpoint(&format!("api/{}/all", kind.collection()))?;
        debug!(%url, "fetching full collection");
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| Self::map_send_error(&e))?;
        if !response.status().is_success() {
            return Err(Self::rejection(response).await);
        }
        let dtos: Vec<ResourceDto> = Self::decode(response).await?;
        Ok(dtos.into_iter().map(Resource::from).collect())
    }

    async fn get(&self, kind: ResourceKind, id: &str) -> Result<Resource, TransportError> {
        let url = self.endpoint(&format!("api/{}/{id}", kind.collection()))?;
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| Self::map_send_error(&e))?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(TransportError::NotFound {
                kind,
                id: id.to_string(),
            });
        }
        if !response.status().is_success() {
            return Err(Self::rejection(response).await);
        }
        let dto: ResourceDto = Self::decode(response).await?;
        Ok(dto.into())
    }

    async fn get_variable_set(&self, link: &str) -> Result<VariableSet, TransportError> {
        let url = self.endpoint(link)?;
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| Self::map_send_error(&e))?;
        if !response.status().is_success() {
            return Err(Self::rejection(response).await);
        }
        let dto: VariableSetDto = Self::decode(response).await?;
        Ok(dto.into())
    }

    async fn update_variable_set(&self, set: &VariableSet) -> Result<(), TransportError> {
        let url = self.endpoint(&format!("api/variables/{}", set.id))?;
        debug!(%url, owner = %set.owner_id, "committing variable set");
        let response = self
            .http
            .put(url)
            .json(&VariableSetDto::from(set))
            .send()
            .await
            .map_err(|e| Self::map_send_error(&e))?;
        if !response.status().is_success() {
            return Err(Self::rejection(response).await);
        }
        Ok(())
    }

    async fn delete(&self, kind: ResourceKind, resource: &Resource) -> Result<(), TransportError> {
        // Prefer the resource's own hyperlink; fall back to the
        // collection route.
        let url = match resource.link("Self") {
            Some(link) => self.endpoint(link)?,
            None => self.endpoint(&format!("api/{}/{}", kind.collection(), resource.id))?,
        };
        debug!(%url, "deleting resource");
        let response = self
            .http
            .delete(url)
            .send()
            .await
            .map_err(|e| Self::map_send_error(&e))?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(TransportError::NotFound {
                kind,
                id: resource.id.clone(),
            });
        }
        if !response.status().is_success() {
            return Err(Self::rejection(response).await);
        }
        Ok(())
    }
}
