//! HTTP provider for a Bot Framework connector endpoint

use super::{HttpProvider, Method, RequestBuilder};
use crate::error::{Error, Result};
use http::{HeaderValue, header};
use secrecy::{ExposeSecret, SecretString};
use std::{sync::Arc, time::Duration};
use url::Url;

/// HTTP provider for one connector service URL.
///
/// Every request carries `Content-Type: application/json` and, when a token
/// is configured, `Authorization: Bearer <token>`. Obtaining the token is
/// the caller's business.
///
/// # Example
///
/// ```rust,no_run
/// use botconnector::http::ConnectorHttpProvider;
///
/// let provider = ConnectorHttpProvider::builder()
///     .service_url("https://smba.trafficmanager.net/amer/")
///     .auth_token("eyJ...")
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct ConnectorHttpProvider {
    pub(crate) inner: Arc<ProviderInner>,
}

#[derive(Debug)]
pub(crate) struct ProviderInner {
    pub(crate) http_client: reqwest::Client,
    /// Always ends with `/` so relative paths join under it
    pub(crate) base_url: Url,
    pub(crate) auth_token: Option<SecretString>,
    pub(crate) timeout: Duration,
    pub(crate) default_headers: http::HeaderMap,
}

impl ConnectorHttpProvider {
    /// Create a new builder for configuring the provider.
    pub fn builder() -> ConnectorHttpProviderBuilder {
        ConnectorHttpProviderBuilder::default()
    }

    /// A provider for another service URL sharing this one's HTTP client,
    /// token and headers.
    pub fn with_service_url(&self, service_url: &str) -> Result<Self> {
        let inner = ProviderInner {
            http_client: self.inner.http_client.clone(),
            base_url: parse_service_url(service_url)?,
            auth_token: self.inner.auth_token.clone(),
            timeout: self.inner.timeout,
            default_headers: self.inner.default_headers.clone(),
        };
        Ok(Self {
            inner: Arc::new(inner),
        })
    }

    fn build_request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let url = self.inner.base_url.join(path).map_err(|e| {
            Error::InvalidUrl(format!(
                "Failed to construct URL from path '{}': {}",
                path, e
            ))
        })?;

        let mut builder = RequestBuilder::new(method, url)
            .with_client(self.inner.http_client.clone())
            .timeout(self.inner.timeout)
            .header(
                header::CONTENT_TYPE,
                HeaderValue::from_static("application/json; charset=utf-8"),
            );

        if let Some(token) = &self.inner.auth_token {
            let mut value = HeaderValue::try_from(format!("Bearer {}", token.expose_secret()))
                .map_err(|_| Error::InvalidHeaderValue("authorization".to_string()))?;
            value.set_sensitive(true);
            builder = builder.header(header::AUTHORIZATION, value);
        }

        for (key, value) in &self.inner.default_headers {
            builder = builder.header(key.clone(), value.clone());
        }

        Ok(builder)
    }
}

impl HttpProvider for ConnectorHttpProvider {
    fn create_request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        self.build_request(method, path)
    }

    fn provider_name(&self) -> &'static str {
        "botconnector"
    }

    fn base_url(&self) -> &str {
        self.inner.base_url.as_str()
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

/// Builder for a [`ConnectorHttpProvider`].
#[derive(Default)]
pub struct ConnectorHttpProviderBuilder {
    service_url: Option<String>,
    auth_token: Option<SecretString>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
    default_headers: http::HeaderMap,
}

impl ConnectorHttpProviderBuilder {
    /// Set the connector service URL. Required.
    pub fn service_url(mut self, service_url: impl Into<String>) -> Self {
        self.service_url = Some(service_url.into());
        self
    }

    /// Set the bearer token.
    pub fn auth_token(mut self, auth_token: impl Into<String>) -> Self {
        self.auth_token = Some(SecretString::new(auth_token.into().into_boxed_str()));
        self
    }

    /// Set the bearer token from an existing secret.
    pub fn auth_token_secret(mut self, auth_token: Option<SecretString>) -> Self {
        self.auth_token = auth_token;
        self
    }

    /// Set the per-request timeout.
    ///
    /// Defaults to 100 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the `User-Agent`.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Add headers to include with every request.
    pub fn headers(mut self, headers: &http::HeaderMap) -> Self {
        for (key, value) in headers {
            self.default_headers.insert(key.clone(), value.clone());
        }
        self
    }

    /// Add a custom header to include with every request.
    ///
    /// # Errors
    ///
    /// Returns an error if the header name or value is invalid.
    pub fn header(mut self, key: impl AsRef<str>, value: impl AsRef<str>) -> Result<Self> {
        let (key, value) = super::parse_header(key.as_ref(), value.as_ref())?;
        self.default_headers.insert(key, value);
        Ok(self)
    }

    /// Build the provider.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No service URL is set
    /// - The service URL is empty, unparseable or not http(s)
    /// - HTTP client creation fails
    pub fn build(self) -> Result<ConnectorHttpProvider> {
        let service_url = self
            .service_url
            .ok_or_else(|| Error::MissingConfig("service_url".to_string()))?;
        let base_url = parse_service_url(&service_url)?;
        let timeout = self.timeout.unwrap_or(crate::config::DEFAULT_TIMEOUT);

        let user_agent = self
            .user_agent
            .unwrap_or_else(|| format!("botconnector-rust/{}", crate::VERSION));
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| Error::HttpClient(e.to_string()))?;

        let inner = Arc::new(ProviderInner {
            http_client,
            base_url,
            auth_token: self.auth_token,
            timeout,
            default_headers: self.default_headers,
        });

        Ok(ConnectorHttpProvider { inner })
    }
}

/// Parse and validate a service URL, making sure its path ends with `/`.
fn parse_service_url(service_url: &str) -> Result<Url> {
    if service_url.trim().is_empty() {
        return Err(Error::InvalidUrl("Service URL cannot be empty".to_string()));
    }

    let mut url: Url = service_url
        .trim()
        .parse()
        .map_err(|e| Error::InvalidUrl(format!("{}", e)))?;

    match url.scheme() {
        "http" | "https" => {}
        scheme => {
            return Err(Error::InvalidUrl(format!(
                "Invalid URL scheme '{}'. Only 'http' and 'https' are supported.",
                scheme
            )));
        }
    }

    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }

    Ok(url)
}
