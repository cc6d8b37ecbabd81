//! JSON request wrapper shared by all resource clients.
//!
//! Every request is sent with `Content-Type: application/json`. A response body
//! is only parsed when the server labels it as JSON (`application/json` or a
//! `+json` type like `application/problem+json`), and a body that fails to
//! parse is treated as absent. Non-2xx responses become an [ApiError] built
//! from the problem body (`title`/`detail`) when there is one.

use reqwest::{
    header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE},
    Method, StatusCode,
};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

const JSON: &str = "application/json";
const FALLBACK_TITLE: &str = "Error";
const FALLBACK_DETAIL: &str = "Request failed";

/// A non-2xx response.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{status} {title}: {detail}")]
pub struct ApiError {
    pub status: u16,
    pub title:  String,
    pub detail: String,
    /// The parsed response body, if it was JSON.
    pub raw:    Option<Value>,
}

impl ApiError {
    pub fn from_response(status: StatusCode, raw: Option<Value>) -> Self {
        let field = |name: &str| -> Option<String> {
            raw.as_ref()
                .and_then(|data| data.get(name))
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };
        let title = field("title")
            .or_else(|| status.canonical_reason().map(str::to_string))
            .unwrap_or_else(|| FALLBACK_TITLE.to_string());
        let detail = field("detail").unwrap_or_else(|| FALLBACK_DETAIL.to_string());
        Self {
            status: status.as_u16(),
            title,
            detail,
            raw,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_path_to_error::Error<serde_json::Error>),
    #[error("could not encode request body: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("expected a JSON body from {0}, got none")]
    EmptyBody(String),
    #[error("invalid base url {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

impl Error {
    /// The server's error response, if that is what this is.
    pub fn as_api(&self) -> Option<&ApiError> {
        match self {
            Error::Api(err) => Some(err),
            _ => None,
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Json(Value),
    /// Sent as is, without serialization.
    Raw(String),
}

impl RequestBody {
    pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<Self> {
        Ok(RequestBody::Json(
            serde_json::to_value(value).map_err(Error::Encode)?,
        ))
    }
}

#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub method:  Method,
    pub body:    Option<RequestBody>,
    /// Merged over the default headers; these win on conflict.
    pub headers: HeaderMap,
}

impl RequestOptions {
    pub fn new(method: Method) -> Self {
        Self {
            method,
            ..Self::default()
        }
    }

    pub fn with_body(mut self, body: RequestBody) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }
}

#[derive(Debug, Clone)]
pub struct Client {
    inner:    reqwest::Client,
    base_url: String,
}

impl Client {
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(inner: reqwest::Client, base_url: &str) -> Result<Self> {
        let parsed = reqwest::Url::parse(base_url).map_err(|e| Error::InvalidBaseUrl {
            url:    base_url.to_string(),
            reason: e.to_string(),
        })?;
        if parsed.cannot_be_a_base() || !matches!(parsed.scheme(), "http" | "https") {
            return Err(Error::InvalidBaseUrl {
                url:    base_url.to_string(),
                reason: "expected an http(s) url".to_string(),
            });
        }
        Ok(Self {
            inner,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Sends a request and returns the parsed JSON body of a 2xx response.
    ///
    /// Returns `Ok(None)` when the response carried no JSON, e.g. on `204 No
    /// Content`.
    pub async fn request(&self, path: &str, options: RequestOptions) -> Result<Option<Value>> {
        let RequestOptions {
            method,
            body,
            headers,
        } = options;
        let url = self.url(path);

        let mut all_headers = HeaderMap::new();
        all_headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON));
        all_headers.extend(headers);

        let mut builder = self
            .inner
            .request(method.clone(), &url)
            .headers(all_headers);
        if let Some(body) = body {
            builder = match body {
                RequestBody::Json(value) => builder.body(value.to_string()),
                RequestBody::Raw(text) => builder.body(text),
            };
        }

        debug!(%method, %url, "sending request");
        let response = builder.send().await?;
        let status = response.status();
        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map_or(false, is_json_media_type);
        let data = if is_json {
            response
                .bytes()
                .await
                .ok()
                .and_then(|bytes| serde_json::from_slice::<Value>(&bytes).ok())
                .filter(|value| !value.is_null())
        } else {
            None
        };

        if status.is_success() {
            debug!(%method, %url, status = status.as_u16(), "request succeeded");
            return Ok(data);
        }

        let error = ApiError::from_response(status, data);
        warn!(
            %method,
            %url,
            status = error.status,
            title = %error.title,
            detail = %error.detail,
            "request failed"
        );
        Err(error.into())
    }

    /// Sends a request and decodes the JSON response into `T`.
    pub async fn fetch<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<T> {
        let data = self.request(path, options).await?;
        decode(path, data)
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.fetch(path, RequestOptions::default()).await
    }

    /// Sends `body` as JSON and decodes the JSON response into `T`.
    pub async fn send<B, T>(&self, method: Method, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let options = RequestOptions::new(method).with_body(RequestBody::json(body)?);
        self.fetch(path, options).await
    }

    /// Sends a request whose response body, if any, is of no interest.
    pub async fn execute(&self, method: Method, path: &str) -> Result<()> {
        self.request(path, RequestOptions::new(method)).await?;
        Ok(())
    }
}

/// `application/json` or any `+json` structured syntax suffix, such as
/// `application/problem+json`. Parameters like `charset` are ignored.
pub fn is_json_media_type(content_type: &str) -> bool {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    essence == JSON || (essence.starts_with("application/") && essence.ends_with("+json"))
}

/// Decodes a response body, reporting the JSON path of the first mismatch.
pub fn decode<T: DeserializeOwned>(path: &str, data: Option<Value>) -> Result<T> {
    let data = data.ok_or_else(|| Error::EmptyBody(path.to_string()))?;
    Ok(serde_path_to_error::deserialize(data)?)
}
