//! HTTP-level tests for the cloud adapter against a mock vendor.

use llm_switch::{
    AsyncChatApi, AsyncOpenAiClient, ChatApi, ChatOptions, Error, Message, MessageRole,
    OpenAiClient,
};
use mockito::Matcher;
use serde_json::json;

const CHAT_BODY: &str = r#"{
    "choices": [{"message": {"role": "assistant", "content": "hi", "tool_calls": []}}]
}"#;

#[tokio::test]
async fn async_chat_round_trip() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/chat/completions")
        .match_header("authorization", "Bearer sk-test")
        .match_header("content-type", "application/json")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(CHAT_BODY)
        .create_async()
        .await;

    let client = AsyncOpenAiClient::with_base_url("sk-test", server.url()).unwrap();
    let response = client
        .chat("gpt-4o", &[Message::user("hello")], None, None, None)
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(response.message.role, MessageRole::Assistant);
    assert_eq!(response.message.content, "hi");
    assert!(response.tool_calls.is_empty());
    assert!(response.done);
    assert_eq!(response.model, "gpt-4o");
}

#[tokio::test]
async fn async_chat_maps_options_onto_the_wire() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/chat/completions")
        .match_body(Matcher::Json(json!({
            "model": "gpt-4o",
            "messages": [{"role": "user", "content": "hello"}],
            "temperature": 0.2,
            "max_tokens": 50
        })))
        .with_status(200)
        .with_body(CHAT_BODY)
        .create_async()
        .await;

    let client = AsyncOpenAiClient::with_base_url("sk-test", server.url()).unwrap();
    let options = ChatOptions::new().with_temperature(0.2).with_num_predict(50);
    client
        .chat("gpt-4o", &[Message::user("hello")], Some(&options), None, None)
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn async_chat_omits_max_tokens_when_unset() {
    let mut server = mockito::Server::new_async().await;
    // Exact-body match: a null or zero max_tokens would fail here.
    let mock = server
        .mock("POST", "/chat/completions")
        .match_body(Matcher::Json(json!({
            "model": "gpt-4o",
            "messages": [{"role": "user", "content": "hello"}],
            "temperature": 0.7
        })))
        .with_status(200)
        .with_body(CHAT_BODY)
        .create_async()
        .await;

    let client = AsyncOpenAiClient::with_base_url("sk-test", server.url()).unwrap();
    client
        .chat("gpt-4o", &[Message::user("hello")], None, None, None)
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn async_chat_surfaces_vendor_errors() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/chat/completions")
        .with_status(500)
        .with_body("upstream exploded")
        .create_async()
        .await;

    let client = AsyncOpenAiClient::with_base_url("sk-test", server.url()).unwrap();
    let err = client
        .chat("gpt-4o", &[Message::user("hello")], None, None, None)
        .await
        .unwrap_err();

    match err {
        Error::Provider {
            provider,
            status,
            body,
        } => {
            assert_eq!(provider, "openai");
            assert_eq!(status, 500);
            assert_eq!(body, "upstream exploded");
        }
        other => panic!("expected provider error, got {other:?}"),
    }
}

#[tokio::test]
async fn async_embeddings_extracts_first_vector() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/embeddings")
        .match_body(Matcher::Json(json!({
            "model": "text-embedding-3-small",
            "input": "hello"
        })))
        .with_status(200)
        .with_body(r#"{"data": [{"index": 0, "embedding": [0.25, -0.5]}]}"#)
        .create_async()
        .await;

    let client = AsyncOpenAiClient::with_base_url("sk-test", server.url()).unwrap();
    let response = client
        .embeddings("text-embedding-3-small", "hello")
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(response.embedding, vec![0.25, -0.5]);
}

#[test]
fn blocking_chat_round_trip() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/chat/completions")
        .match_header("authorization", "Bearer sk-test")
        .with_status(200)
        .with_body(CHAT_BODY)
        .create();

    let client = OpenAiClient::with_base_url("sk-test", server.url()).unwrap();
    let response = client
        .chat("gpt-4o", &[Message::user("hello")], None, None, None)
        .unwrap();

    mock.assert();
    assert_eq!(response.message.content, "hi");
    assert!(response.done);
}

#[test]
fn blocking_chat_surfaces_vendor_errors() {
    let mut server = mockito::Server::new();
    let _mock = server
        .mock("POST", "/chat/completions")
        .with_status(401)
        .with_body(r#"{"error": "invalid api key"}"#)
        .create();

    let client = OpenAiClient::with_base_url("sk-test", server.url()).unwrap();
    let err = client
        .chat("gpt-4o", &[Message::user("hello")], None, None, None)
        .unwrap_err();
    assert!(matches!(err, Error::Provider { status: 401, .. }));
}
