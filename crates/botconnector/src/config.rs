//! Configuration for the Bot Connector client

use botconnector_core::retry::{DefaultBackOff, ThrottlePolicy};
use http::HeaderMap;
use secrecy::SecretString;
use std::time::Duration;

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(100);

/// Configuration for the Bot Connector client.
///
/// The service URL normally comes from the incoming activity, since each
/// channel region has its own connector endpoint.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Connector endpoint, e.g. `https://smba.trafficmanager.net/amer/`
    pub service_url: Option<String>,

    /// Bearer token sent as `Authorization: Bearer <token>`
    pub auth_token: Option<SecretString>,

    /// Timeout for a single HTTP attempt
    pub timeout: Duration,

    /// Retries allowed for throttled batch operations that carry no `Retry-After`
    pub max_retries: u32,

    /// Delay between such retries
    pub back_off: Duration,

    /// Bound on retries that follow a `Retry-After`; unbounded when `None`
    pub retry_after_limit: Option<u32>,

    /// Custom headers to include with every request
    pub default_headers: HeaderMap,

    /// `User-Agent` override
    pub user_agent: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            service_url: None,
            auth_token: None,
            timeout: DEFAULT_TIMEOUT,
            max_retries: DefaultBackOff::MAX_RETRIES,
            back_off: DefaultBackOff::DEFAULT_BACK_OFF,
            retry_after_limit: None,
            default_headers: HeaderMap::new(),
            user_agent: None,
        }
    }
}

impl ClientConfig {
    /// Create a new configuration for a service URL.
    pub fn with_service_url(service_url: impl Into<String>) -> Self {
        Self {
            service_url: Some(service_url.into()),
            ..Default::default()
        }
    }

    /// Load configuration from environment variables.
    ///
    /// A `.env` file in the working directory is read first, if present.
    /// This will look for:
    /// - `BOTCONNECTOR_SERVICE_URL` for the connector endpoint
    /// - `BOTCONNECTOR_AUTH_TOKEN` for the bearer token
    /// - `BOTCONNECTOR_TIMEOUT` for request timeout (in seconds)
    /// - `BOTCONNECTOR_MAX_RETRIES` for throttle retries without `Retry-After`
    /// - `BOTCONNECTOR_BACK_OFF_MS` for the delay between such retries
    ///
    /// Unparseable numeric values are ignored.
    #[cfg(feature = "env")]
    pub fn from_env() -> Result<Self, crate::error::Error> {
        use std::env;

        let _ = dotenvy::dotenv();

        let mut config = Self::default();

        if let Ok(service_url) = env::var("BOTCONNECTOR_SERVICE_URL") {
            config.service_url = Some(service_url);
        }

        if let Ok(auth_token) = env::var("BOTCONNECTOR_AUTH_TOKEN") {
            config.auth_token = Some(SecretString::new(auth_token.into_boxed_str()));
        }

        if let Ok(timeout_str) = env::var("BOTCONNECTOR_TIMEOUT")
            && let Ok(timeout_secs) = timeout_str.parse::<u64>()
        {
            config.timeout = Duration::from_secs(timeout_secs);
        }

        if let Ok(max_retries_str) = env::var("BOTCONNECTOR_MAX_RETRIES")
            && let Ok(max_retries) = max_retries_str.parse::<u32>()
        {
            config.max_retries = max_retries;
        }

        if let Ok(back_off_str) = env::var("BOTCONNECTOR_BACK_OFF_MS")
            && let Ok(back_off_ms) = back_off_str.parse::<u64>()
        {
            config.back_off = Duration::from_millis(back_off_ms);
        }

        Ok(config)
    }

    /// Merge this configuration with another, with the other taking precedence.
    ///
    /// Fields left at their default in `other` do not override.
    pub fn merge(mut self, other: ClientConfig) -> Self {
        if other.service_url.is_some() {
            self.service_url = other.service_url;
        }
        if other.auth_token.is_some() {
            self.auth_token = other.auth_token;
        }
        if other.timeout != DEFAULT_TIMEOUT {
            self.timeout = other.timeout;
        }
        if other.max_retries != DefaultBackOff::MAX_RETRIES {
            self.max_retries = other.max_retries;
        }
        if other.back_off != DefaultBackOff::DEFAULT_BACK_OFF {
            self.back_off = other.back_off;
        }
        if other.retry_after_limit.is_some() {
            self.retry_after_limit = other.retry_after_limit;
        }
        for (key, value) in other.default_headers.iter() {
            self.default_headers.insert(key.clone(), value.clone());
        }
        if other.user_agent.is_some() {
            self.user_agent = other.user_agent;
        }

        self
    }

    /// The flat back-off used for throttled responses without `Retry-After`.
    pub fn back_off_policy(&self) -> DefaultBackOff {
        DefaultBackOff::new(self.max_retries, self.back_off)
    }

    /// The policy batch operations retry under.
    pub fn throttle_policy(&self) -> ThrottlePolicy {
        let policy = ThrottlePolicy::new(self.back_off_policy());
        match self.retry_after_limit {
            Some(limit) => policy.with_retry_after_limit(limit),
            None => policy,
        }
    }
}

/// Builder for creating ClientConfig with a fluent API.
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the service URL.
    pub fn service_url(mut self, service_url: impl Into<String>) -> Self {
        self.config.service_url = Some(service_url.into());
        self
    }

    /// Set the bearer token.
    pub fn auth_token(mut self, auth_token: impl Into<String>) -> Self {
        self.config.auth_token = Some(SecretString::new(auth_token.into().into_boxed_str()));
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set the throttle retry bound.
    pub fn max_retries(mut self, max_retries: u32) -> Self {
        self.config.max_retries = max_retries;
        self
    }

    /// Set the throttle back-off delay.
    pub fn back_off(mut self, back_off: Duration) -> Self {
        self.config.back_off = back_off;
        self
    }

    /// Bound retries that follow a `Retry-After`.
    pub fn retry_after_limit(mut self, limit: u32) -> Self {
        self.config.retry_after_limit = Some(limit);
        self
    }

    /// Set the `User-Agent`.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = Some(user_agent.into());
        self
    }

    /// Add a default header.
    ///
    /// # Errors
    ///
    /// Returns an error if the header name or value is not valid HTTP.
    pub fn default_header(
        mut self,
        key: impl AsRef<str>,
        value: impl AsRef<str>,
    ) -> crate::Result<Self> {
        let (key, value) = crate::http::parse_header(key.as_ref(), value.as_ref())?;
        self.config.default_headers.insert(key, value);
        Ok(self)
    }

    /// Build the configuration.
    pub fn build(self) -> ClientConfig {
        self.config
    }
}
