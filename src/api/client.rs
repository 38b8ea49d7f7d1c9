use crate::config::config::ClientConfig;
use crate::error::{AmbariError, Result};
use reqwest::blocking::{Client, ClientBuilder, RequestBuilder, Response};
use reqwest::redirect::Policy;
use reqwest::{Method, StatusCode, Url};
use serde::de::DeserializeOwned;

/// Header Ambari insists on for every modifying request
pub const REQUESTED_BY_HEADER: &str = "X-Requested-By";
const REQUESTED_BY_VALUE: &str = "ambari";

/// Handle on an Ambari server.
///
/// Cloning is cheap: clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct AmbariClient {
    base_url: String,
    base: Url,
    login: String,
    password: String,
    client: Client,
}

impl AmbariClient {
    /// `base_url` points at the API root, e.g. `http://ambari:8080/api/v1`
    pub fn new(base_url: &str, login: &str, password: &str) -> Result<Self> {
        Self::with_builder(base_url, login, password, Client::builder())
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let builder = Client::builder().danger_accept_invalid_certs(config.disable_verify_ssl);
        Self::with_builder(&config.base_url, &config.login, &config.password, builder)
    }

    fn with_builder(
        base_url: &str,
        login: &str,
        password: &str,
        builder: ClientBuilder,
    ) -> Result<Self> {
        let base_url = base_url.trim_end_matches('/');
        let base = Url::parse(base_url)
            .map_err(|err| AmbariError::InvalidBaseUrl(format!("{}: {}", base_url, err)))?;
        if base.cannot_be_a_base() {
            return Err(AmbariError::InvalidBaseUrl(base_url.to_string()));
        }

        // 3xx must reach the status check instead of being followed
        let client = builder.redirect(Policy::none()).build()?;

        Ok(Self {
            base_url: base_url.to_string(),
            base,
            login: login.to_string(),
            password: password.to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL of `segments` below the base URL; each segment is percent-encoded
    pub(crate) fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        // with_builder rejects cannot-be-a-base URLs
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    pub(crate) fn request(&self, method: Method, segments: &[&str]) -> RequestBuilder {
        let url = self.url(segments);
        crate::trace_request!(method, url.path());

        self.client
            .request(method, url)
            .basic_auth(&self.login, Some(&self.password))
            .header(REQUESTED_BY_HEADER, REQUESTED_BY_VALUE)
    }
}

/// Turn any status >= 300 into an API error.
pub(crate) fn expect_success(response: Response) -> Result<Response> {
    let status = response.status();
    tracing::debug!(target: "ambari", %status, "Response received");

    if status.as_u16() >= 300 {
        return Err(api_error(status));
    }
    Ok(response)
}

/// Like [`expect_success`], but a 404 means the resource is absent.
pub(crate) fn expect_found(response: Response) -> Result<Option<Response>> {
    let status = response.status();
    tracing::debug!(target: "ambari", %status, "Response received");

    if status == StatusCode::NOT_FOUND {
        return Ok(None);
    }
    if status.as_u16() >= 300 {
        return Err(api_error(status));
    }
    Ok(Some(response))
}

pub(crate) fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let body = response.text()?;
    tracing::trace!(target: "ambari", "Body: {}", body);
    Ok(serde_json::from_str(&body)?)
}

fn api_error(status: StatusCode) -> AmbariError {
    AmbariError::api(status.as_u16(), status.to_string())
}
