//! X (Twitter) API v2 client.

use crate::OAuth1Credentials;
use crate::oauth::nonce;
use crate::sanitize::sanitize_post_text;
use async_trait::async_trait;
use kahovitz_error::{KahovitzResult, PostingError, PostingErrorKind};
use kahovitz_interface::{PostedStatus, PosterAccount, StatusPoster};
use reqwest::Method;
use reqwest::header::{AUTHORIZATION, HeaderMap};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// X API base URL.
pub const X_API_URL: &str = "https://api.twitter.com";

const APP_KEY_VAR: &str = "TWITTER_APP_KEY";
const APP_SECRET_VAR: &str = "TWITTER_APP_SECRET";
const ACCESS_TOKEN_VAR: &str = "TWITTER_ACCESS_TOKEN";
const ACCESS_SECRET_VAR: &str = "TWITTER_ACCESS_SECRET";
const BEARER_TOKEN_VAR: &str = "TWITTER_BEARER_TOKEN";
const PROXY_VAR: &str = "HTTP_PROXY";

/// How requests are authenticated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XAuth {
    /// OAuth 1.0a user context
    OAuth1(OAuth1Credentials),
    /// OAuth 2.0 bearer token
    Bearer(String),
}

/// Which X credentials the environment provides, without their values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct XCredentialStatus {
    /// `TWITTER_APP_KEY` is set
    pub has_app_key: bool,
    /// `TWITTER_APP_SECRET` is set
    pub has_app_secret: bool,
    /// `TWITTER_ACCESS_TOKEN` is set
    pub has_access_token: bool,
    /// `TWITTER_ACCESS_SECRET` is set
    pub has_access_secret: bool,
    /// `TWITTER_BEARER_TOKEN` is set
    pub has_bearer_token: bool,
    /// `HTTP_PROXY` is set
    pub has_proxy: bool,
}

impl XCredentialStatus {
    /// Inspect the environment.
    pub fn from_env() -> Self {
        Self {
            has_app_key: env_value(APP_KEY_VAR).is_some(),
            has_app_secret: env_value(APP_SECRET_VAR).is_some(),
            has_access_token: env_value(ACCESS_TOKEN_VAR).is_some(),
            has_access_secret: env_value(ACCESS_SECRET_VAR).is_some(),
            has_bearer_token: env_value(BEARER_TOKEN_VAR).is_some(),
            has_proxy: env_value(PROXY_VAR).is_some(),
        }
    }

    /// Whether requests would use OAuth 1.0a rather than the bearer token.
    pub fn using_oauth(&self) -> bool {
        !self.has_bearer_token
    }
}

fn env_value(var: &str) -> Option<String> {
    std::env::var(var).ok().filter(|v| !v.trim().is_empty())
}

fn required(var: &str) -> KahovitzResult<String> {
    env_value(var).ok_or_else(|| {
        PostingError::new(PostingErrorKind::MissingCredential(var.to_string())).into()
    })
}

#[derive(Deserialize)]
struct Envelope<T> {
    data: T,
}

#[derive(Serialize)]
struct CreatePost<'a> {
    text: &'a str,
}

/// Client for the X API v2 endpoints Kahovitz uses.
#[derive(Clone)]
pub struct XClient {
    http: reqwest::Client,
    auth: XAuth,
    base_url: String,
}

impl std::fmt::Debug for XClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("XClient")
            .field("auth", &self.auth_mode())
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl XClient {
    /// Client without a proxy.
    pub fn new(auth: XAuth) -> Self {
        Self {
            http: reqwest::Client::new(),
            auth,
            base_url: X_API_URL.to_string(),
        }
    }

    /// Client routed through an HTTP(S) proxy.
    ///
    /// # Errors
    ///
    /// Returns error if the proxy URL is invalid.
    pub fn with_proxy(auth: XAuth, proxy: &str) -> KahovitzResult<Self> {
        let proxy = reqwest::Proxy::all(proxy)
            .map_err(|e| PostingError::new(PostingErrorKind::Http(e.to_string())))?;
        let http = reqwest::Client::builder()
            .proxy(proxy)
            .build()
            .map_err(|e| PostingError::new(PostingErrorKind::Http(e.to_string())))?;
        Ok(Self {
            http,
            auth,
            base_url: X_API_URL.to_string(),
        })
    }

    /// Client from `TWITTER_*` credentials and optional `HTTP_PROXY`.
    ///
    /// A bearer token takes precedence over the four OAuth 1.0a values.
    ///
    /// # Errors
    ///
    /// Returns a missing-credential error naming the first absent variable,
    /// or an error for an invalid proxy URL.
    pub fn from_env() -> KahovitzResult<Self> {
        let auth = match env_value(BEARER_TOKEN_VAR) {
            Some(token) => XAuth::Bearer(token),
            None => XAuth::OAuth1(OAuth1Credentials {
                consumer_key: required(APP_KEY_VAR)?,
                consumer_secret: required(APP_SECRET_VAR)?,
                access_token: required(ACCESS_TOKEN_VAR)?,
                access_secret: required(ACCESS_SECRET_VAR)?,
            }),
        };

        let client = match env_value(PROXY_VAR) {
            Some(proxy) => {
                debug!("Routing X requests through proxy");
                Self::with_proxy(auth, &proxy)?
            }
            None => Self::new(auth),
        };
        info!(auth = client.auth_mode(), "X client configured");
        Ok(client)
    }

    /// Point the client at another base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// `"oauth1"` or `"bearer"`.
    pub fn auth_mode(&self) -> &'static str {
        match self.auth {
            XAuth::OAuth1(_) => "oauth1",
            XAuth::Bearer(_) => "bearer",
        }
    }

    fn authorization(&self, method: &Method, url: &str) -> KahovitzResult<String> {
        match &self.auth {
            XAuth::Bearer(token) => Ok(format!("Bearer {}", token)),
            XAuth::OAuth1(credentials) => credentials.authorization_header(
                method.as_str(),
                url,
                &[],
                &nonce(),
                chrono::Utc::now().timestamp(),
            ),
        }
    }

    async fn send<B, T>(&self, method: Method, path: &str, body: Option<&B>) -> KahovitzResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self
            .http
            .request(method.clone(), &url)
            .header(AUTHORIZATION, self.authorization(&method, &url)?);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| PostingError::new(PostingErrorKind::Http(e.to_string())))?;

        let status = response.status();
        let remaining = header_number::<u32>(response.headers(), "x-rate-limit-remaining");
        let reset = header_number::<i64>(response.headers(), "x-rate-limit-reset");
        let text = response
            .text()
            .await
            .map_err(|e| PostingError::new(PostingErrorKind::Http(e.to_string())))?;

        if status.as_u16() == 403 || status.as_u16() == 429 {
            warn!(status = status.as_u16(), ?remaining, ?reset, "X rate limit");
            return Err(PostingError::new(PostingErrorKind::RateLimited {
                status: status.as_u16(),
                remaining,
                reset,
                details: text,
            })
            .into());
        }

        if !status.is_success() {
            warn!(status = status.as_u16(), "X API error");
            return Err(PostingError::new(PostingErrorKind::Api {
                status: status.as_u16(),
                details: text,
            })
            .into());
        }

        let envelope: Envelope<T> = serde_json::from_str(&text)
            .map_err(|e| PostingError::new(PostingErrorKind::ResponseParsing(e.to_string())))?;
        Ok(envelope.data)
    }
}

fn header_number<N: std::str::FromStr>(headers: &HeaderMap, name: &str) -> Option<N> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse().ok())
}

#[async_trait]
impl StatusPoster for XClient {
    #[instrument(skip(self, text), fields(chars = text.chars().count()))]
    async fn post(&self, text: &str) -> KahovitzResult<PostedStatus> {
        let text = sanitize_post_text(text);
        if text.is_empty() {
            return Err(PostingError::new(PostingErrorKind::EmptyText).into());
        }

        let status: PostedStatus = self
            .send(Method::POST, "/2/tweets", Some(&CreatePost { text: &text }))
            .await?;
        info!(id = %status.id, "Post published");
        Ok(status)
    }

    #[instrument(skip(self))]
    async fn verify_credentials(&self) -> KahovitzResult<PosterAccount> {
        self.send::<(), _>(Method::GET, "/2/users/me", None).await
    }
}
