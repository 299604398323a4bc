//! Main client implementation for the Bot Framework connector

use std::future::Future;
use std::sync::{Arc, OnceLock};
use std::time::Duration;

use botconnector_core::retry::{ThrottlePolicy, run_with_retry, run_with_retry_cancellable};
use tokio_util::sync::CancellationToken;
use tracing::Instrument;

use crate::{
    config::ClientConfig,
    error::{Error, Result},
    http::{ConnectorHttpProvider, HttpProvider, RequestBuilder},
    observability::operation_span,
    resources::{Attachments, Conversations, Teams},
};

/// Client for one connector service URL.
///
/// Cloning is cheap; clones share the HTTP connection pool and the lazily
/// created resource handles.
///
/// # Example
///
/// ```rust,no_run
/// use botconnector::Client;
///
/// # async fn example() -> botconnector::Result<()> {
/// let client = Client::builder()
///     .service_url("https://smba.trafficmanager.net/amer/")
///     .auth_token("eyJ...")
///     .build()?;
///
/// let page = client.conversations().get_conversations(None).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    provider: Arc<dyn HttpProvider>,
    throttle_policy: ThrottlePolicy,

    conversations: OnceLock<Conversations>,
    attachments: OnceLock<Attachments>,
    teams: OnceLock<Teams>,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("provider", &self.inner.provider.provider_name())
            .field("base_url", &self.inner.provider.base_url())
            .field("throttle_policy", &self.inner.throttle_policy)
            .finish()
    }
}

impl Client {
    /// Create a client for a service URL with default settings and no token.
    ///
    /// # Errors
    ///
    /// Returns an error if the service URL is invalid or the HTTP client
    /// cannot be built.
    pub fn new(service_url: impl Into<String>) -> Result<Self> {
        Self::builder().service_url(service_url).build()
    }

    /// Create a new client builder for advanced configuration.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    /// Create a client with a custom HTTP provider and the default
    /// throttle policy.
    pub fn from_provider(provider: Arc<dyn HttpProvider>) -> Self {
        Self::with_parts(provider, ThrottlePolicy::default())
    }

    /// Create a client from a configuration object.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingConfig`] without a service URL, and URL or
    /// HTTP client errors from the provider.
    pub fn from_config(config: ClientConfig) -> Result<Self> {
        let throttle_policy = config.throttle_policy();

        let service_url = config
            .service_url
            .ok_or_else(|| Error::MissingConfig("service_url".to_string()))?;

        let mut provider_builder = ConnectorHttpProvider::builder()
            .service_url(service_url)
            .auth_token_secret(config.auth_token)
            .timeout(config.timeout)
            .headers(&config.default_headers);
        if let Some(user_agent) = config.user_agent {
            provider_builder = provider_builder.user_agent(user_agent);
        }

        let provider = Arc::new(provider_builder.build()?);
        Ok(Self::with_parts(provider, throttle_policy))
    }

    fn with_parts(provider: Arc<dyn HttpProvider>, throttle_policy: ThrottlePolicy) -> Self {
        Self {
            inner: Arc::new(ClientInner {
                provider,
                throttle_policy,
                conversations: OnceLock::new(),
                attachments: OnceLock::new(),
                teams: OnceLock::new(),
            }),
        }
    }

    /// A client for another service URL that keeps this client's token,
    /// headers, timeout and throttle policy.
    ///
    /// Activities from different regions carry different service URLs.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidUrl`] for a bad URL, and
    /// [`Error::InvalidArgument`] when the client was built from a custom
    /// provider that cannot be rebased.
    pub fn with_service_url(&self, service_url: &str) -> Result<Self> {
        let provider = self
            .inner
            .provider
            .as_any()
            .downcast_ref::<ConnectorHttpProvider>()
            .ok_or_else(|| {
                Error::InvalidArgument(format!(
                    "provider '{}' cannot be rebased to a new service URL",
                    self.inner.provider.provider_name()
                ))
            })?
            .with_service_url(service_url)?;

        Ok(Self::with_parts(
            Arc::new(provider),
            self.inner.throttle_policy,
        ))
    }

    /// Access the Conversations API.
    pub fn conversations(&self) -> &Conversations {
        self.inner
            .conversations
            .get_or_init(|| Conversations::new(self.clone()))
    }

    /// Access the Attachments API.
    pub fn attachments(&self) -> &Attachments {
        self.inner
            .attachments
            .get_or_init(|| Attachments::new(self.clone()))
    }

    /// Access the Teams API.
    pub fn teams(&self) -> &Teams {
        self.inner.teams.get_or_init(|| Teams::new(self.clone()))
    }

    /// Policy applied to throttled batch operations.
    pub fn throttle_policy(&self) -> ThrottlePolicy {
        self.inner.throttle_policy
    }

    /// Service URL requests are sent to.
    pub fn base_url(&self) -> &str {
        self.inner.provider.base_url()
    }

    /// Create a request builder for a path relative to the service URL.
    pub(crate) fn request(&self, method: http::Method, path: &str) -> Result<RequestBuilder> {
        self.inner.provider.create_request(method, path)
    }

    /// Run `request` once inside an operation span.
    pub(crate) async fn traced<F, T>(&self, operation: &'static str, request: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        request.instrument(operation_span(operation)).await
    }

    /// Run `request` under the throttle policy inside an operation span.
    ///
    /// Throttled responses are retried; every other failure is returned
    /// as is. With a token, cancelling it abandons the retry loop with
    /// [`Error::Cancelled`].
    pub(crate) async fn throttled<F, Fut, T>(
        &self,
        operation: &'static str,
        cancel: Option<&CancellationToken>,
        request: F,
    ) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let policy = self.inner.throttle_policy;
        let run = async {
            match cancel {
                Some(token) => run_with_retry_cancellable(request, &policy, token).await,
                None => run_with_retry(request, &policy).await,
            }
        };
        run.instrument(operation_span(operation)).await
    }
}

/// Builder for creating a configured Client.
#[derive(Default)]
pub struct ClientBuilder {
    config: ClientConfig,
}

impl ClientBuilder {
    /// Start from an existing configuration.
    pub fn from_config(config: ClientConfig) -> Self {
        Self { config }
    }

    /// Set the connector service URL.
    pub fn service_url(mut self, service_url: impl Into<String>) -> Self {
        self.config.service_url = Some(service_url.into());
        self
    }

    /// Set the bearer token.
    pub fn auth_token(mut self, auth_token: impl Into<String>) -> Self {
        self.config.auth_token = Some(secrecy::SecretString::new(
            auth_token.into().into_boxed_str(),
        ));
        self
    }

    /// Set the per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set how many times a throttled batch operation without
    /// `Retry-After` is retried.
    pub fn max_retries(mut self, max_retries: u32) -> Self {
        self.config.max_retries = max_retries;
        self
    }

    /// Set the delay between such retries.
    pub fn back_off(mut self, back_off: Duration) -> Self {
        self.config.back_off = back_off;
        self
    }

    /// Stop retrying a throttled batch operation after `limit` retries even
    /// when the service keeps sending `Retry-After`. Unbounded by default.
    pub fn retry_after_limit(mut self, limit: u32) -> Self {
        self.config.retry_after_limit = Some(limit);
        self
    }

    /// Set the `User-Agent`.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = Some(user_agent.into());
        self
    }

    /// Add a custom default header.
    ///
    /// # Errors
    ///
    /// Returns an error if the header name or value is not valid HTTP.
    pub fn default_header(mut self, key: impl AsRef<str>, value: impl AsRef<str>) -> Result<Self> {
        let (key, value) = crate::http::parse_header(key.as_ref(), value.as_ref())?;
        self.config.default_headers.insert(key, value);
        Ok(self)
    }

    /// Build the client with the configured options.
    pub fn build(self) -> Result<Client> {
        Client::from_config(self.config)
    }
}
