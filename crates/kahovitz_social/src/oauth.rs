//! OAuth 1.0a request signing (HMAC-SHA1).

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use hmac::{Hmac, Mac};
use kahovitz_error::{KahovitzResult, PostingError, PostingErrorKind};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use rand::Rng;
use rand::distributions::Alphanumeric;
use sha1::Sha1;

type HmacSha1 = Hmac<Sha1>;

/// Characters left unescaped by RFC 3986.
const UNRESERVED: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// The four OAuth 1.0a user-context credentials.
#[derive(Clone, PartialEq, Eq)]
pub struct OAuth1Credentials {
    /// Consumer (app) key
    pub consumer_key: String,
    /// Consumer (app) secret
    pub consumer_secret: String,
    /// User access token
    pub access_token: String,
    /// User access token secret
    pub access_secret: String,
}

impl std::fmt::Debug for OAuth1Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OAuth1Credentials")
            .field("consumer_key", &self.consumer_key)
            .field("access_token", &self.access_token)
            .finish_non_exhaustive()
    }
}

fn encode(value: &str) -> String {
    utf8_percent_encode(value, UNRESERVED).to_string()
}

pub(crate) fn nonce() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(32)
        .map(char::from)
        .collect()
}

impl OAuth1Credentials {
    fn protocol_params(&self, nonce: &str, timestamp: i64) -> Vec<(String, String)> {
        vec![
            ("oauth_consumer_key".to_string(), self.consumer_key.clone()),
            ("oauth_nonce".to_string(), nonce.to_string()),
            ("oauth_signature_method".to_string(), "HMAC-SHA1".to_string()),
            ("oauth_timestamp".to_string(), timestamp.to_string()),
            ("oauth_token".to_string(), self.access_token.clone()),
            ("oauth_version".to_string(), "1.0".to_string()),
        ]
    }

    /// Signature base string over the protocol and request parameters.
    pub(crate) fn base_string(
        &self,
        method: &str,
        url: &str,
        params: &[(&str, &str)],
        nonce: &str,
        timestamp: i64,
    ) -> String {
        let mut pairs: Vec<(String, String)> = self
            .protocol_params(nonce, timestamp)
            .into_iter()
            .chain(params.iter().map(|(k, v)| (k.to_string(), v.to_string())))
            .map(|(k, v)| (encode(&k), encode(&v)))
            .collect();
        pairs.sort();

        let normalized = pairs
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("&");

        format!(
            "{}&{}&{}",
            method.to_ascii_uppercase(),
            encode(url),
            encode(&normalized)
        )
    }

    /// Base64 HMAC-SHA1 signature.
    pub(crate) fn signature(
        &self,
        method: &str,
        url: &str,
        params: &[(&str, &str)],
        nonce: &str,
        timestamp: i64,
    ) -> KahovitzResult<String> {
        let key = format!(
            "{}&{}",
            encode(&self.consumer_secret),
            encode(&self.access_secret)
        );
        let mut mac = HmacSha1::new_from_slice(key.as_bytes())
            .map_err(|e| PostingError::new(PostingErrorKind::Signing(e.to_string())))?;
        mac.update(self.base_string(method, url, params, nonce, timestamp).as_bytes());
        Ok(STANDARD.encode(mac.finalize().into_bytes()))
    }

    /// `Authorization` header value for a request.
    ///
    /// `params` are the query or form parameters; JSON bodies are not signed.
    pub(crate) fn authorization_header(
        &self,
        method: &str,
        url: &str,
        params: &[(&str, &str)],
        nonce: &str,
        timestamp: i64,
    ) -> KahovitzResult<String> {
        let signature = self.signature(method, url, params, nonce, timestamp)?;
        let mut fields = self.protocol_params(nonce, timestamp);
        fields.push(("oauth_signature".to_string(), signature));
        fields.sort();

        let header = fields
            .iter()
            .map(|(k, v)| format!("{}=\"{}\"", encode(k), encode(v)))
            .collect::<Vec<_>>()
            .join(", ");
        Ok(format!("OAuth {}", header))
    }
}
