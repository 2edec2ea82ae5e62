//! HAL API client.
//!
//! HTTP transport plus response decoding. Every JSON response goes through
//! the HAL decoder, and a decoded `Error` resource is turned into
//! [`HalError::Api`] here, so callers see server errors and transport
//! errors through the same `Result`.

use std::env;
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use url::Url;

use crate::decode;
use crate::error::{HalError, Result};
use crate::filters::Filters;
use crate::link::Link;
use crate::models::Collection;
use crate::registry::TypeRegistry;
use crate::resource::Resource;

const USER_AGENT: &str = concat!("ophal/", env!("CARGO_PKG_VERSION"));
const JSON: &str = "application/json";

/// User name the API key is sent with in basic auth.
const API_KEY_USER: &str = "apikey";

/// HAL API client.
///
/// Paths are resolved against the base URL, so the absolute paths found in
/// link hrefs (`/api/v3/...`) can be passed as they are.
///
/// This struct is cheaply cloneable; clones share the connection pool and
/// the type registry.
///
/// # Example
///
/// ```no_run
/// use ophal::HalClient;
///
/// # async fn example() -> ophal::Result<()> {
/// // Create from environment variables
/// let client = HalClient::from_env()?;
///
/// // Or configure manually
/// let client = HalClient::new("https://community.openproject.org")?.with_api_key("secret");
/// let projects = client.get_collection("/api/v3/projects").await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct HalClient {
    http: Client,
    base_url: Arc<Url>,
    api_key: Option<String>,
    registry: Arc<TypeRegistry>,
}

impl std::fmt::Debug for HalClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HalClient")
            .field("base_url", &self.base_url.as_str())
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish_non_exhaustive()
    }
}

impl HalClient {
    /// Create a client from environment variables.
    ///
    /// Uses `OPENPROJECT_URL` for the base URL and, if set,
    /// `OPENPROJECT_API_KEY` for authentication.
    ///
    /// # Errors
    ///
    /// Returns an error if `OPENPROJECT_URL` is not set or invalid.
    pub fn from_env() -> Result<Self> {
        let base_url = env::var("OPENPROJECT_URL").map_err(|_| {
            HalError::ConfigMissing("OPENPROJECT_URL environment variable not set".to_string())
        })?;

        let client = Self::new(&base_url)?;
        Ok(match env::var("OPENPROJECT_API_KEY") {
            Ok(key) if !key.is_empty() => client.with_api_key(key),
            _ => client,
        })
    }

    /// Create a new unauthenticated client for the given base URL.
    ///
    /// The base URL is the server root, e.g. `https://op.example.com`.
    /// Request paths and link hrefs are absolute (`/api/v3/...`) and replace
    /// any path on the base, so a base with a path prefix is rejected.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or not a server root.
    pub fn new(base_url: &str) -> Result<Self> {
        // Ensure base URL ends with /
        let base_url_str = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };

        let base_url = Url::parse(&base_url_str)?;
        if base_url.path() != "/" {
            return Err(HalError::ConfigMissing(format!(
                "base URL must be the server root, got path '{}'",
                base_url.path()
            )));
        }

        let http = Client::builder()
            .user_agent(USER_AGENT)
            .brotli(true)
            .gzip(true)
            .deflate(true)
            .timeout(Duration::from_secs(300))
            .build()
            .map_err(HalError::HttpError)?;

        Ok(Self {
            http,
            base_url: Arc::new(base_url),
            api_key: None,
            registry: Arc::new(TypeRegistry::default()),
        })
    }

    /// Authenticate every request with an API key (basic auth as `apikey`).
    #[must_use]
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.set_api_key(key);
        self
    }

    pub fn set_api_key(&mut self, key: impl Into<String>) {
        self.api_key = Some(key.into());
    }

    /// Decode responses with a custom type registry.
    #[must_use]
    pub fn with_registry(mut self, registry: TypeRegistry) -> Self {
        self.registry = Arc::new(registry);
        self
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    /// Decode a HAL document with this client's registry.
    pub fn decode(&self, bytes: &[u8]) -> Result<Resource> {
        decode::decode(bytes, &self.registry)
    }

    /// Fetch and decode a resource.
    #[tracing::instrument(skip(self))]
    pub async fn get(&self, path: &str) -> Result<Resource> {
        let request = self.json_request(Method::GET, path)?;
        self.send_decoded(request).await
    }

    /// Fetch a resource body without decoding it (e.g. attachment content).
    #[tracing::instrument(skip(self))]
    pub async fn get_file(&self, path: &str) -> Result<Response> {
        let request = self.request(Method::GET, path)?;
        let response = request.send().await.map_err(HalError::HttpError)?;
        Self::check_status(response).await
    }

    /// POST a resource and decode the response.
    #[tracing::instrument(skip(self, body))]
    pub async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Resource> {
        let request = self.json_request(Method::POST, path)?.json(body);
        self.send_decoded(request).await
    }

    /// PATCH a resource and decode the response.
    #[tracing::instrument(skip(self, body))]
    pub async fn patch<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Resource> {
        let request = self.json_request(Method::PATCH, path)?.json(body);
        self.send_decoded(request).await
    }

    /// Issue a DELETE and hand back the raw response.
    ///
    /// Delete responses are usually empty, so nothing is decoded and the
    /// status is left for the caller to check.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, path: &str) -> Result<Response> {
        let request = self.json_request(Method::DELETE, path)?;
        request.send().await.map_err(HalError::HttpError)
    }

    /// Fetch a resource that must be a collection.
    pub async fn get_collection(&self, path: &str) -> Result<Collection> {
        self.get(path).await?.downcast()
    }

    /// Fetch a collection with a `filters` query parameter.
    ///
    /// Empty filters add no parameter.
    pub async fn get_filtered_collection(&self, path: &str, filters: &Filters) -> Result<Collection> {
        self.get_collection(&filters.apply_to(path)).await
    }

    /// Follow a link with a GET.
    pub async fn link_get(&self, link: &Link) -> Result<Resource> {
        self.get(&link.href).await
    }

    /// Follow a link and return the undecoded body.
    pub async fn link_get_file(&self, link: &Link) -> Result<Response> {
        self.get_file(&link.href).await
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let url = self.base_url.join(path)?;
        let request = self.http.request(method, url);
        Ok(match &self.api_key {
            Some(key) => request.basic_auth(API_KEY_USER, Some(key)),
            None => request,
        })
    }

    fn json_request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        Ok(self
            .request(method, path)?
            .header(ACCEPT, HeaderValue::from_static(JSON))
            .header(CONTENT_TYPE, HeaderValue::from_static(JSON)))
    }

    async fn send_decoded(&self, request: RequestBuilder) -> Result<Resource> {
        let response = request.send().await.map_err(HalError::HttpError)?;
        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(Self::rate_limited(&response));
        }

        let body = response.bytes().await.map_err(HalError::HttpError)?;
        let resource = match self.decode(&body) {
            Ok(resource) => resource,
            // An error page that is not a HAL document says more by its status.
            Err(err) if !status.is_success() => {
                tracing::debug!(%status, error = %err, "non-HAL error response");
                return Err(Self::status_error(status, &body));
            }
            Err(err) => return Err(err),
        };

        // Convert HAL errors into the error channel
        resource.into_result()
    }

    /// Check response status and convert errors.
    pub(crate) async fn check_status(response: Response) -> Result<Response> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(Self::rate_limited(&response));
        }

        let body = response.bytes().await.map_err(HalError::HttpError)?;
        let api_error = serde_json::from_slice::<serde_json::Value>(&body)
            .ok()
            .and_then(|value| match value {
                serde_json::Value::Object(map)
                    if map.get("_type").and_then(|t| t.as_str()) == Some("Error") =>
                {
                    crate::models::ApiError::from_map(&map).ok()
                }
                _ => None,
            });

        Err(match api_error {
            Some(err) => HalError::Api(err),
            None => Self::status_error(status, &body),
        })
    }

    fn rate_limited(response: &Response) -> HalError {
        let retry_after = response
            .headers()
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok());
        HalError::RateLimited {
            retry_after_secs: retry_after,
        }
    }

    fn status_error(status: StatusCode, body: &[u8]) -> HalError {
        let text = String::from_utf8_lossy(body);
        let message = if text.trim().is_empty() {
            status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string()
        } else {
            text.into_owned()
        };
        HalError::Status {
            status: status.as_u16(),
            message,
        }
    }
}
