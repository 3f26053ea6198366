use std::time::Duration;

use async_trait::async_trait;
use reqwest::Url;
use reqwest::header::{ACCEPT_CHARSET, HeaderMap, HeaderValue};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::http::{HttpClient, Method};

use super::params::{Params, merge};
use super::path::resolve_path;
use super::types::Meta;

/// Default Meetup API host.
pub const API_URL: &str = "https://api.meetup.com";
/// OAuth2 authorization redirect endpoint.
pub const AUTHORIZE_URL: &str = "https://secure.meetup.com/oauth2/authorize";
/// OAuth2 token endpoint.
pub const ACCESS_URL: &str = "https://secure.meetup.com/oauth2/access";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);
const DEFAULT_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Connection settings for a [`Meetup`] client.
///
/// The URL fields exist so tests can point the client at a local mock
/// server; production use keeps the defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub api_url: String,
    pub authorize_url: String,
    pub access_url: String,
    /// Sent as the `User-Agent` header; `None` uses the crate default.
    pub user_agent: Option<String>,
    /// Applied as both connect and total timeout on every request.
    pub timeout: Duration,
    /// Disables TLS certificate verification. Test environments only.
    pub danger_accept_invalid_certs: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: API_URL.to_string(),
            authorize_url: AUTHORIZE_URL.to_string(),
            access_url: ACCESS_URL.to_string(),
            user_agent: None,
            timeout: DEFAULT_TIMEOUT,
            danger_accept_invalid_certs: false,
        }
    }
}

/// Resource operations of the Meetup API.
///
/// Implemented by [`Meetup`]; host applications can depend on the trait and
/// substitute a mock in their own tests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MeetupApi: Send + Sync {
    async fn events(&self, parameters: Params) -> Result<Value>;
    async fn groups(&self, parameters: Params) -> Result<Value>;
    async fn photos(&self, parameters: Params) -> Result<Value>;
    async fn members(&self, parameters: Params) -> Result<Value>;
    async fn discussion_boards(&self, parameters: Params) -> Result<Value>;
    async fn discussions(&self, parameters: Params) -> Result<Value>;
    async fn post_event(&self, parameters: Params) -> Result<Value>;
    async fn delete_event(&self, parameters: Params) -> Result<Value>;
    async fn access(&self, parameters: Params) -> Result<Value>;
    async fn refresh(&self, parameters: Params) -> Result<Value>;
    async fn get_next(&self, response: &Value) -> Result<Value>;
}

/// Asynchronous Meetup API client.
///
/// Parameters supplied at construction (API key, OAuth client credentials,
/// access token) are merged into every outgoing request and override
/// per-call values on key collision. The client holds no other state across
/// calls; pagination is driven by passing responses back to [`Meetup::get_next`].
pub struct Meetup {
    http: HttpClient,
    config: Config,
    params: Params,
}

impl Meetup {
    /// Creates a client against the production endpoints.
    pub fn new(parameters: Params) -> Result<Self> {
        Self::with_config(Config::default(), parameters)
    }

    /// Creates a client with explicit connection settings.
    #[tracing::instrument(skip(config, parameters))]
    pub fn with_config(config: Config, parameters: Params) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT_CHARSET, HeaderValue::from_static("utf-8"));

        let user_agent = config
            .user_agent
            .clone()
            .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string());

        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .default_headers(headers)
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .danger_accept_invalid_certs(config.danger_accept_invalid_certs)
            .build()
            .map_err(|e| Error::Transport {
                url: config.api_url.clone(),
                message: e.to_string(),
            })?;

        Ok(Self {
            http: HttpClient::new(client),
            config,
            params: parameters,
        })
    }

    /// GET against any Meetup path; `:name` placeholders are filled from
    /// `parameters`.
    ///
    /// ```no_run
    /// # async fn run() -> meetup_api::Result<()> {
    /// let client = meetup_api::Meetup::new(Default::default())?;
    /// let event = client
    ///     .get("/2/event/:id", meetup_api::params(&[("id", "10")]))
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    #[tracing::instrument(skip(self, parameters))]
    pub async fn get(&self, path: &str, parameters: Params) -> Result<Value> {
        let (path, parameters) = resolve_path(path, &parameters)?;
        let url = format!("{}{}", self.config.api_url, path);
        self.request(Method::Get, &url, parameters).await
    }

    /// POST against any Meetup path; `:name` placeholders are filled from
    /// `parameters`, the rest are form-encoded into the body.
    #[tracing::instrument(skip(self, parameters))]
    pub async fn post(&self, path: &str, parameters: Params) -> Result<Value> {
        let (path, parameters) = resolve_path(path, &parameters)?;
        let url = format!("{}{}", self.config.api_url, path);
        self.request(Method::Post, &url, parameters).await
    }

    /// PUT against any Meetup path.
    #[tracing::instrument(skip(self, parameters))]
    pub async fn put(&self, path: &str, parameters: Params) -> Result<Value> {
        let (path, parameters) = resolve_path(path, &parameters)?;
        let url = format!("{}{}", self.config.api_url, path);
        self.request(Method::Put, &url, parameters).await
    }

    /// DELETE against any Meetup path.
    #[tracing::instrument(skip(self, parameters))]
    pub async fn delete(&self, path: &str, parameters: Params) -> Result<Value> {
        let (path, parameters) = resolve_path(path, &parameters)?;
        let url = format!("{}{}", self.config.api_url, path);
        self.request(Method::Delete, &url, parameters).await
    }

    /// Lists events.
    pub async fn events(&self, parameters: Params) -> Result<Value> {
        self.get("/2/events", parameters).await
    }

    /// Lists groups.
    pub async fn groups(&self, parameters: Params) -> Result<Value> {
        self.get("/2/groups", parameters).await
    }

    /// Lists photos.
    pub async fn photos(&self, parameters: Params) -> Result<Value> {
        self.get("/2/photos", parameters).await
    }

    /// Lists members.
    pub async fn members(&self, parameters: Params) -> Result<Value> {
        self.get("/2/members", parameters).await
    }

    /// Lists the discussion boards of the group named by `urlname`.
    pub async fn discussion_boards(&self, parameters: Params) -> Result<Value> {
        self.get("/:urlname/boards", parameters).await
    }

    /// Lists the discussions of board `bid` in the group named by `urlname`.
    pub async fn discussions(&self, parameters: Params) -> Result<Value> {
        self.get("/:urlname/boards/:bid/discussions", parameters).await
    }

    /// Updates the event named by `id`.
    pub async fn post_event(&self, parameters: Params) -> Result<Value> {
        self.post("/2/event/:id", parameters).await
    }

    /// Deletes the event named by `id`.
    pub async fn delete_event(&self, parameters: Params) -> Result<Value> {
        self.delete("/2/event/:id", parameters).await
    }

    /// True when `response` carries a non-empty `meta.next` cursor.
    pub fn has_next(response: &Value) -> bool {
        Meta::of(response).as_ref().and_then(Meta::next_url).is_some()
    }

    /// Fetches the page named by the `meta.next` cursor of `response`.
    ///
    /// The cursor is an absolute URL and is requested as-is (no path
    /// templating), with the stored parameters and signing rule applied like
    /// any other request.
    #[tracing::instrument(skip(self, response))]
    pub async fn get_next(&self, response: &Value) -> Result<Value> {
        let meta = Meta::of(response);
        match meta.as_ref().and_then(Meta::next_url) {
            Some(next) => self.request(Method::Get, next, Params::new()).await,
            None => Err(Error::InvalidResponse {
                message: "response has no meta.next cursor".to_string(),
            }),
        }
    }

    /// Builds the URL the end user must visit to authorize the application.
    ///
    /// Stored and call parameters are merged into the query string and
    /// `response_type=code` is always included. Issuing the actual redirect
    /// is the host application's side effect; nothing is requested here.
    pub fn authorize_url(&self, parameters: Params) -> Result<String> {
        let mut query = merge(&parameters, &self.params);
        query.insert("response_type".to_string(), "code".to_string());

        let url = Url::parse_with_params(&self.config.authorize_url, &query).map_err(|e| {
            Error::Transport {
                url: self.config.authorize_url.clone(),
                message: e.to_string(),
            }
        })?;
        Ok(url.into())
    }

    /// Exchanges an authorization code for an access token.
    /// `grant_type=authorization_code` is always included.
    #[tracing::instrument(skip(self, parameters))]
    pub async fn access(&self, mut parameters: Params) -> Result<Value> {
        parameters.insert("grant_type".to_string(), "authorization_code".to_string());
        self.request(Method::Post, &self.config.access_url, parameters).await
    }

    /// Trades a refresh token for a fresh access token.
    /// `grant_type=refresh_token` is always included.
    #[tracing::instrument(skip(self, parameters))]
    pub async fn refresh(&self, mut parameters: Params) -> Result<Value> {
        parameters.insert("grant_type".to_string(), "refresh_token".to_string());
        self.request(Method::Post, &self.config.access_url, parameters).await
    }

    /// Merges stored parameters over call parameters, applies the signing
    /// rule, and executes. All network traffic funnels through here.
    async fn request(&self, method: Method, url: &str, parameters: Params) -> Result<Value> {
        let mut merged = merge(&parameters, &self.params);

        // API-key requests must be signed; the token and authorize endpoints
        // are exempt
        let oauth_endpoint = url == self.config.access_url || url == self.config.authorize_url;
        if merged.contains_key("key") && !oauth_endpoint {
            merged
                .entry("sign".to_string())
                .or_insert_with(|| "true".to_string());
        }

        let form_header_on_get = url == self.config.access_url;
        self.http.request(method, url, &merged, form_header_on_get).await
    }
}

#[async_trait]
impl MeetupApi for Meetup {
    async fn events(&self, parameters: Params) -> Result<Value> {
        Meetup::events(self, parameters).await
    }

    async fn groups(&self, parameters: Params) -> Result<Value> {
        Meetup::groups(self, parameters).await
    }

    async fn photos(&self, parameters: Params) -> Result<Value> {
        Meetup::photos(self, parameters).await
    }

    async fn members(&self, parameters: Params) -> Result<Value> {
        Meetup::members(self, parameters).await
    }

    async fn discussion_boards(&self, parameters: Params) -> Result<Value> {
        Meetup::discussion_boards(self, parameters).await
    }

    async fn discussions(&self, parameters: Params) -> Result<Value> {
        Meetup::discussions(self, parameters).await
    }

    async fn post_event(&self, parameters: Params) -> Result<Value> {
        Meetup::post_event(self, parameters).await
    }

    async fn delete_event(&self, parameters: Params) -> Result<Value> {
        Meetup::delete_event(self, parameters).await
    }

    async fn access(&self, parameters: Params) -> Result<Value> {
        Meetup::access(self, parameters).await
    }

    async fn refresh(&self, parameters: Params) -> Result<Value> {
        Meetup::refresh(self, parameters).await
    }

    async fn get_next(&self, response: &Value) -> Result<Value> {
        Meetup::get_next(self, response).await
    }
}
