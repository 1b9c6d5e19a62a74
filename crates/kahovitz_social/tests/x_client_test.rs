//! XClient against a mock X API.

use kahovitz_error::{KahovitzError, KahovitzErrorKind, PostingErrorKind};
use kahovitz_interface::StatusPoster;
use kahovitz_social::{OAuth1Credentials, XAuth, XClient};
use mockito::Matcher;
use serde_json::json;

fn oauth() -> XAuth {
    XAuth::OAuth1(OAuth1Credentials {
        consumer_key: "app-key".to_string(),
        consumer_secret: "app-secret".to_string(),
        access_token: "token".to_string(),
        access_secret: "token-secret".to_string(),
    })
}

fn posting_kind(err: &KahovitzError) -> PostingErrorKind {
    match err.kind() {
        KahovitzErrorKind::Posting(e) => e.kind.clone(),
        other => panic!("expected posting error, got {other}"),
    }
}

#[tokio::test]
async fn post_sends_signed_sanitized_text() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/2/tweets")
        .match_header(
            "authorization",
            Matcher::Regex(r#"^OAuth oauth_consumer_key="app-key", oauth_nonce="[A-Za-z0-9]{32}", oauth_signature="[^"]+", oauth_signature_method="HMAC-SHA1", oauth_timestamp="\d+", oauth_token="token", oauth_version="1.0"$"#.to_string()),
        )
        .match_body(Matcher::Json(json!({"text": "Dream big with #Moscownpur"})))
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(json!({"data": {"id": "1790", "text": "Dream big with #Moscownpur"}}).to_string())
        .expect(1)
        .create_async()
        .await;

    let client = XClient::new(oauth()).with_base_url(server.url());
    let status = client
        .post("  Dream big\n\nwith   #Moscownpur ")
        .await
        .expect("post succeeds");

    assert_eq!(status.id, "1790");
    assert_eq!(status.text, "Dream big with #Moscownpur");
    mock.assert_async().await;
}

#[tokio::test]
async fn bearer_token_is_sent_as_is() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/2/users/me")
        .match_header("authorization", "Bearer bearer-123")
        .with_status(200)
        .with_body(json!({"data": {"id": "42", "username": "moscownpur", "name": "Moscownpur"}}).to_string())
        .create_async()
        .await;

    let client = XClient::new(XAuth::Bearer("bearer-123".to_string())).with_base_url(server.url());
    let account = client.verify_credentials().await.expect("lookup succeeds");

    assert_eq!(account.username, "moscownpur");
    assert_eq!(account.status_url("7"), "https://x.com/moscownpur/status/7");
    assert_eq!(client.auth_mode(), "bearer");
    mock.assert_async().await;
}

#[tokio::test]
async fn too_many_requests_carries_rate_limit_headers() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/2/tweets")
        .with_status(429)
        .with_header("x-rate-limit-remaining", "0")
        .with_header("x-rate-limit-reset", "1700000000")
        .with_body(r#"{"title":"Too Many Requests"}"#)
        .create_async()
        .await;

    let client = XClient::new(oauth()).with_base_url(server.url());
    let err = client.post("hello").await.expect_err("rate limited");

    let kind = posting_kind(&err);
    assert!(kind.is_rate_limit());
    assert_eq!(kind.exhausted_until(), Some(1_700_000_000));
    assert_eq!(err.details().as_deref(), Some(r#"{"title":"Too Many Requests"}"#));
}

#[tokio::test]
async fn forbidden_counts_as_rate_limit() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/2/tweets")
        .with_status(403)
        .with_body("Forbidden")
        .create_async()
        .await;

    let client = XClient::new(oauth()).with_base_url(server.url());
    let err = client.post("hello").await.expect_err("forbidden");

    match posting_kind(&err) {
        PostingErrorKind::RateLimited {
            status, remaining, ..
        } => {
            assert_eq!(status, 403);
            assert_eq!(remaining, None);
        }
        other => panic!("unexpected kind {other}"),
    }
}

#[tokio::test]
async fn other_statuses_are_api_errors() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/2/users/me")
        .with_status(401)
        .with_body(r#"{"title":"Unauthorized"}"#)
        .create_async()
        .await;

    let client = XClient::new(oauth()).with_base_url(server.url());
    let err = client.verify_credentials().await.expect_err("unauthorized");

    assert_eq!(
        posting_kind(&err),
        PostingErrorKind::Api {
            status: 401,
            details: r#"{"title":"Unauthorized"}"#.to_string()
        }
    );
}

#[tokio::test]
async fn blank_text_is_not_sent() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/2/tweets")
        .expect(0)
        .create_async()
        .await;

    let client = XClient::new(oauth()).with_base_url(server.url());
    let err = client.post(" \n ").await.expect_err("empty text");

    assert_eq!(posting_kind(&err), PostingErrorKind::EmptyText);
    mock.assert_async().await;
}

#[tokio::test]
async fn malformed_body_is_a_parse_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/2/tweets")
        .with_status(201)
        .with_body("not json")
        .create_async()
        .await;

    let client = XClient::new(oauth()).with_base_url(server.url());
    let err = client.post("hello").await.expect_err("bad body");

    assert!(matches!(posting_kind(&err), PostingErrorKind::ResponseParsing(_)));
}

#[test]
fn debug_output_hides_credentials() {
    let client = XClient::new(oauth());
    let debug = format!("{:?}", client);
    assert!(debug.contains("oauth1"));
    assert!(!debug.contains("token-secret"));
}
