//! HttpChatTransport を wiremock のサーバに向けて動かす
//!
//! reqwest の blocking クライアントは非同期ランタイムの中で直接使えないので、
//! 呼び出しは spawn_blocking の中で行う。

use crate::adapter::HttpChatTransport;
use crate::domain::{Framing, Role, SendRequest, SessionId, Turn, UserMessage};
use crate::ports::outbound::ChatTransport;
use crate::usecase::reply_stream::ReplyStream;
use common::adapter::NoopLog;
use common::error::Error;
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn blocking<T, F>(f: F) -> T
where
    T: Send + 'static,
    F: FnOnce() -> T + Send + 'static,
{
    tokio::task::spawn_blocking(f).await.expect("blocking task panicked")
}

fn transport(base: &str) -> HttpChatTransport {
    HttpChatTransport::new(base, None, Arc::new(NoopLog)).expect("client")
}

fn request(session: &str, message: &str) -> SendRequest {
    SendRequest::new(
        &SessionId::parse(session).unwrap(),
        &UserMessage::new(message).unwrap(),
        3,
    )
}

fn send_and_collect(base: String, req: SendRequest) -> Result<Vec<String>, Error> {
    let fragments = transport(&base).send(&req)?;
    ReplyStream::new(fragments, Framing::Heuristic, Arc::new(NoopLog)).collect()
}

#[tokio::test]
async fn send_posts_json_and_decodes_reply() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/send"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({
            "session_id": "s-1",
            "message": "hello",
            "top_k": 3
        })))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"reply":"Hi there"}"#))
        .expect(1)
        .mount(&server)
        .await;

    let base = format!("{}/chat", server.uri());
    let replies = blocking(move || send_and_collect(base, request("s-1", "hello")))
        .await
        .unwrap();
    assert_eq!(replies, vec!["Hi there".to_string()]);
}

#[tokio::test]
async fn send_with_no_content_is_http_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/send"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let base = format!("{}/chat", server.uri());
    let err = blocking(move || send_and_collect(base, request("s-1", "hello")))
        .await
        .unwrap_err();
    assert_eq!(err, Error::http("No body in response"));
}

#[tokio::test]
async fn send_error_status_uses_detail() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/send"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({ "detail": "retriever unavailable" })),
        )
        .mount(&server)
        .await;

    let base = format!("{}/chat", server.uri());
    let err = blocking(move || send_and_collect(base, request("s-1", "hello")))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Http(_)));
    assert!(err.to_string().contains("retriever unavailable"), "{}", err);
    assert!(err.to_string().contains("500"), "{}", err);
}

#[tokio::test]
async fn send_to_closed_port_is_http_error() {
    let server = MockServer::start().await;
    let base = format!("{}/chat", server.uri());
    drop(server);

    let err = blocking(move || send_and_collect(base, request("s-1", "hello")))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Http(_)));
}

#[tokio::test]
async fn history_passes_encoded_session_id() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/chat/history"))
        .and(query_param("session_id", "a b&c"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "role": "user", "content": "hello" },
            { "role": "assistant", "content": "Hi there" }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let base = format!("{}/chat", server.uri());
    let turns = blocking(move || transport(&base).history(&SessionId::parse("a b&c").unwrap()))
        .await
        .unwrap();
    assert_eq!(turns, vec![Turn::user("hello"), Turn::assistant("Hi there")]);
    assert_eq!(turns[1].role, Role::Assistant);
}

#[tokio::test]
async fn history_of_fresh_session_is_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/chat/history"))
        .and(query_param("session_id", "fresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let base = format!("{}/chat", server.uri());
    let turns = blocking(move || transport(&base).history(&SessionId::parse("fresh").unwrap()))
        .await
        .unwrap();
    assert!(turns.is_empty());
}

#[tokio::test]
async fn history_with_bad_body_is_json_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/chat/history"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let base = format!("{}/chat", server.uri());
    let err = blocking(move || transport(&base).history(&SessionId::parse("s-1").unwrap()))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Json(_)));
}

#[tokio::test]
async fn reset_posts_once_with_session_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/reset"))
        .and(query_param("session_id", "s-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "cleared" })))
        .expect(1)
        .mount(&server)
        .await;

    let base = format!("{}/chat", server.uri());
    blocking(move || transport(&base).reset(&SessionId::parse("s-1").unwrap()))
        .await
        .unwrap();
}

#[tokio::test]
async fn reset_error_status_is_http_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/reset"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let base = format!("{}/chat", server.uri());
    let err = blocking(move || transport(&base).reset(&SessionId::parse("s-1").unwrap()))
        .await
        .unwrap_err();
    assert_eq!(err, Error::http("reset failed: HTTP 503 Service Unavailable"));
}

#[tokio::test]
async fn zero_timeout_means_no_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/reset"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "cleared" })))
        .expect(1)
        .mount(&server)
        .await;

    let base = format!("{}/chat", server.uri());
    blocking(move || {
        HttpChatTransport::new(&base, Some(0), Arc::new(NoopLog))?
            .reset(&SessionId::parse("s-1").unwrap())
    })
    .await
    .unwrap();
}
