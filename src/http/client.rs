use log::debug;
use reqwest::header::{CONTENT_TYPE, HeaderValue};
use serde_json::Value;

use crate::api::Params;
use crate::error::{DecodeReason, Error, Result, api_message};

const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";

/// HTTP verbs dispatched against the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        };
        f.write_str(name)
    }
}

/// One-request-per-call executor over a shared `reqwest::Client`.
///
/// GET and DELETE serialize parameters into the query string; POST and PUT
/// send them as a URL-encoded form body. Responses are decoded as JSON and
/// non-200 statuses are turned into classified errors. No retries.
#[derive(Clone)]
pub struct HttpClient {
    client: reqwest::Client,
}

impl HttpClient {
    /// Wraps a preconfigured reqwest Client. Headers, user agent, timeouts,
    /// and TLS mode are the builder's concern.
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Returns a reference to the underlying reqwest Client.
    pub fn inner(&self) -> &reqwest::Client {
        &self.client
    }

    /// Executes one request and decodes the JSON response.
    ///
    /// `form_header_on_get` forces the URL-encoded content-type header onto
    /// GET-shaped requests; the token endpoint expects it.
    #[tracing::instrument(skip(self, params))]
    pub async fn request(
        &self,
        method: Method,
        url: &str,
        params: &Params,
        form_header_on_get: bool,
    ) -> Result<Value> {
        debug!("{} {} with {} parameter(s)...", method, url, params.len());

        let mut request = match method {
            Method::Get => self.client.get(url),
            Method::Post => self.client.post(url),
            Method::Put => self.client.put(url),
            Method::Delete => self.client.delete(url),
        };

        request = match method {
            Method::Get | Method::Delete => {
                if !params.is_empty() {
                    request = request.query(params);
                }
                if form_header_on_get {
                    request = request.header(CONTENT_TYPE, HeaderValue::from_static(FORM_URLENCODED));
                }
                request
            }
            Method::Post | Method::Put => request.form(params),
        };

        let response = request.send().await.map_err(|e| Error::Transport {
            url: url.to_string(),
            message: e.to_string(),
        })?;

        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(|e| Error::Transport {
            url: url.to_string(),
            message: e.to_string(),
        })?;

        let decoded: Value = serde_json::from_slice(&body).map_err(|e| Error::Decode {
            url: url.to_string(),
            reason: DecodeReason::classify(&e),
        })?;

        if status != 200 {
            return Err(Error::Api {
                status,
                message: api_message(&decoded, status),
            });
        }

        Ok(decoded)
    }
}
