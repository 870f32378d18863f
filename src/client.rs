//! getaddress.io async client implementation.

use crate::{Error, LookupResponse, Result, parse_response};
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use reqwest::{StatusCode, Url};
use std::fmt;
use std::time::Duration;

const BASE_URL: &str = "https://api.getaddress.io";
const USER_AGENT_VALUE: &str = concat!("getaddress-client/", env!("CARGO_PKG_VERSION"));

/// Environment variable read by [`Client::from_env`].
pub const API_KEY_ENV: &str = "GETADDRESS_API_KEY";

/// Older name for [`API_KEY_ENV`], still honoured as a fallback.
pub const LEGACY_API_KEY_ENV: &str = "GETADDRESSKEY";

/// Async client for the getaddress.io postcode lookup API.
///
/// Use [`Client::new`] for defaults or [`Client::builder`] for custom settings
/// like proxies, timeouts, TLS behavior, and a custom user agent. The client
/// holds no per-lookup state, so one instance can serve many concurrent lookups.
#[derive(Clone)]
pub struct Client {
    http: reqwest::Client,
    api_key: String,
    proxy: Option<String>,
    base_url: Url,
}

impl Client {
    /// Create a builder for configuring the client.
    pub fn builder(api_key: impl Into<String>) -> ClientBuilder {
        ClientBuilder::new(api_key)
    }

    /// Create a new client with the given API key.
    ///
    /// Fails with [`Error::Configuration`] when the key is empty.
    ///
    /// # Examples
    /// ```
    /// # use getaddress_client::{Client, Error};
    /// let client = Client::new("my-api-key")?;
    ///
    /// let err = Client::new("").unwrap_err();
    /// assert!(matches!(err, Error::Configuration(_)));
    /// # Ok::<(), Error>(())
    /// ```
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        ClientBuilder::new(api_key).build()
    }

    /// Create a client with the API key taken from `GETADDRESS_API_KEY`,
    /// falling back to `GETADDRESSKEY`.
    pub fn from_env() -> Result<Self> {
        let api_key = api_key_from(|name| std::env::var(name).ok())?;
        Self::new(api_key)
    }

    /// Get the proxy URL if one was configured.
    ///
    /// Returns `None` when no proxy was set on the builder.
    pub fn proxy(&self) -> Option<&str> {
        self.proxy.as_deref()
    }

    /// The API root requests are sent to.
    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// Look up the addresses for a UK postcode.
    ///
    /// # Arguments
    /// * `postcode` - The postcode to look up. Whitespace is removed and the
    ///   value upper-cased; the format is otherwise left to the API to judge.
    /// * `filter` - Optional house name or number. It is sent to the API and
    ///   then applied locally as a case-sensitive substring match on each
    ///   address.
    ///
    /// # Errors
    /// * [`Error::EmptyPostcode`] when `postcode` is blank
    /// * [`Error::Authentication`] on 401/403
    /// * [`Error::NotFound`] on 404
    /// * [`Error::ResponseParse`] when a 2xx body has the wrong shape
    /// * [`Error::Status`] on any other status, [`Error::Request`] on transport failure
    ///
    /// # Examples
    /// ```no_run
    /// # use getaddress_client::Client;
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), getaddress_client::Error> {
    /// let client = Client::from_env()?;
    /// let response = client.lookup("NR10 4JJ", Some("Bank")).await?;
    /// for address in response.addresses() {
    ///     println!("{address}");
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn lookup(&self, postcode: &str, filter: Option<&str>) -> Result<LookupResponse> {
        let postcode = normalize_postcode(postcode);
        if postcode.is_empty() {
            return Err(Error::EmptyPostcode);
        }
        let filter = filter.filter(|f| !f.is_empty());

        let url = self.find_url(&postcode, filter);
        log::debug!("looking up postcode {postcode} (filter: {filter:?})");

        let response = self
            .http
            .get(url)
            .headers(self.headers())
            .send()
            .await?;

        let status = response.status();
        log::debug!("lookup of {postcode} returned {status}");

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                return Err(Error::Authentication { status });
            }
            StatusCode::NOT_FOUND => return Err(Error::NotFound { postcode }),
            status if status.is_success() => {}
            status => return Err(Error::Status { status }),
        }

        let body = response.text().await?;
        let parsed = parse_response(&body)?;

        Ok(match filter {
            Some(needle) => parsed.filter(needle),
            None => parsed,
        })
    }

    /// Build `{base}/find/{postcode}?api-key=...[&house=...]`.
    fn find_url(&self, postcode: &str, filter: Option<&str>) -> Url {
        let mut url = self.base_url.clone();

        // cannot-be-a-base URLs are rejected by `ClientBuilder::build`
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push("find").push(postcode);
        }

        {
            let mut query = url.query_pairs_mut();
            query.append_pair("api-key", &self.api_key);
            if let Some(house) = filter {
                query.append_pair("house", house);
            }
        }

        url
    }

    /// Build headers for API requests.
    fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("api_key", &"<redacted>")
            .field("proxy", &self.proxy)
            .field("base_url", &self.base_url.as_str())
            .finish()
    }
}

/// Resolve the API key from the first non-empty of the known variables.
fn api_key_from(var: impl Fn(&str) -> Option<String>) -> Result<String> {
    [API_KEY_ENV, LEGACY_API_KEY_ENV]
        .into_iter()
        .filter_map(|name| var(name))
        .find(|key| !key.trim().is_empty())
        .ok_or_else(|| Error::Configuration(format!("{API_KEY_ENV} is not set")))
}

/// Strip all whitespace and upper-case, so `"nr10 4jj"` becomes `"NR104JJ"`.
fn normalize_postcode(postcode: &str) -> String {
    postcode
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_uppercase)
        .collect()
}

/// Builder for configuring a getaddress.io client.
///
/// Start with [`Client::builder`] to override defaults.
#[derive(Debug, Clone)]
pub struct ClientBuilder {
    api_key: String,
    proxy: Option<String>,
    danger_accept_invalid_certs: bool,
    user_agent: String,
    base_url: String,
    timeout: Option<Duration>,
}

impl ClientBuilder {
    /// Create a new builder with default settings.
    ///
    /// Defaults:
    /// - No proxy
    /// - `danger_accept_invalid_certs = false`
    /// - `getaddress-client/<version>` user agent
    /// - `https://api.getaddress.io` endpoint
    /// - No timeout
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            proxy: None,
            danger_accept_invalid_certs: false,
            user_agent: USER_AGENT_VALUE.to_string(),
            base_url: BASE_URL.to_string(),
            timeout: None,
        }
    }

    /// Set a proxy URL (e.g., "http://127.0.0.1:8080" or "socks5://127.0.0.1:9050").
    ///
    /// This uses reqwest's proxy support for all requests.
    pub fn proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    /// Control whether to accept invalid TLS certificates (default: false).
    pub fn danger_accept_invalid_certs(mut self, value: bool) -> Self {
        self.danger_accept_invalid_certs = value;
        self
    }

    /// Override the default user agent string.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Override the API root URL.
    ///
    /// Useful for testing against a local server.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Abort requests that take longer than `timeout` end to end.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Validate the settings and build the client.
    ///
    /// No network request is made.
    ///
    /// # Examples
    /// ```
    /// # use getaddress_client::Client;
    /// # use std::time::Duration;
    /// let client = Client::builder("my-api-key")
    ///     .user_agent("my-app/1.0")
    ///     .timeout(Duration::from_secs(10))
    ///     .build()?;
    /// # Ok::<(), getaddress_client::Error>(())
    /// ```
    pub fn build(self) -> Result<Client> {
        if self.api_key.trim().is_empty() {
            return Err(Error::Configuration("No apiKey provided".into()));
        }

        let base_url = Url::parse(&self.base_url)
            .map_err(|e| Error::Configuration(format!("invalid base URL {}: {e}", self.base_url)))?;
        if base_url.cannot_be_a_base() {
            return Err(Error::Configuration(format!(
                "invalid base URL {}: cannot be a base",
                self.base_url
            )));
        }

        let mut builder = reqwest::Client::builder()
            .danger_accept_invalid_certs(self.danger_accept_invalid_certs)
            .user_agent(&self.user_agent);

        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        if let Some(proxy_url) = &self.proxy {
            let proxy = reqwest::Proxy::all(proxy_url)
                .map_err(|e| Error::Configuration(format!("invalid proxy {proxy_url}: {e}")))?;
            builder = builder.proxy(proxy);
        }

        let http = builder.build()?;

        Ok(Client {
            http,
            api_key: self.api_key,
            proxy: self.proxy,
            base_url,
        })
    }
}
