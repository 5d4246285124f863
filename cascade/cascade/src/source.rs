use crate::config::CascadeConfig;
use crate::error::PopulateError;
use crate::record::{OptionRecord, OptionsResponse, ParentId};
use reqwest::Url;
use reqwest::header::{ACCEPT, COOKIE, HeaderMap, HeaderValue};

/// Absolute path of a helper endpoint plus the query parameter that carries
/// the parent id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endpoint {
    pub path: String,
    pub query_param: String,
}

impl Endpoint {
    pub fn new(path: &str, query_param: &str) -> Self {
        Self {
            path: path.to_string(),
            query_param: query_param.to_string(),
        }
    }
}

/// Where option records come from.
#[async_trait::async_trait]
pub trait OptionSource: Send + Sync {
    async fn fetch(
        &self,
        endpoint: &Endpoint,
        parent: &ParentId,
    ) -> Result<Vec<OptionRecord>, PopulateError>;
}

// ---------------------------------------------------------------------------
// HTTP
// ---------------------------------------------------------------------------

pub struct HttpOptionSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpOptionSource {
    pub fn new(config: &CascadeConfig) -> Result<Self, PopulateError> {
        let mut builder = reqwest::Client::builder()
            .danger_accept_invalid_certs(config.insecure_tls)
            .default_headers(default_headers(config)?);
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(PopulateError::Client)?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// `{base_url}{path}?{query_param}=<parent>`
    pub fn endpoint_url(&self, endpoint: &Endpoint, parent: &ParentId) -> Result<Url, PopulateError> {
        let raw = format!("{}{}", self.base_url, endpoint.path);
        Url::parse_with_params(&raw, [(endpoint.query_param.as_str(), parent.as_str())]).map_err(
            |err| PopulateError::InvalidUrl {
                url: raw.clone(),
                reason: err.to_string(),
            },
        )
    }
}

#[async_trait::async_trait]
impl OptionSource for HttpOptionSource {
    async fn fetch(
        &self,
        endpoint: &Endpoint,
        parent: &ParentId,
    ) -> Result<Vec<OptionRecord>, PopulateError> {
        let url = self.endpoint_url(endpoint, parent)?;
        let url_str = url.to_string();

        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| PopulateError::Request {
                url: url_str.clone(),
                source,
            })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(PopulateError::Status {
                url: url_str,
                status: status.as_u16(),
            });
        }

        let body = resp.text().await.map_err(|source| PopulateError::Request {
            url: url_str.clone(),
            source,
        })?;

        OptionsResponse::parse(&body).map_err(|source| PopulateError::Decode {
            url: url_str,
            source,
        })
    }
}

fn default_headers(config: &CascadeConfig) -> Result<HeaderMap, PopulateError> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

    if let Some(cookie) = &config.session_cookie {
        let value = HeaderValue::from_str(cookie)
            .map_err(|err| PopulateError::InvalidHeader(format!("session cookie: {err}")))?;
        headers.insert(COOKIE, value);
    }

    Ok(headers)
}
