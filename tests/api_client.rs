mod common;

use common::{unreachable_client, Backend, MODES};
use sprintchat::client::ApiError;
use sprintchat::types::api::ChatRequest;

fn request(session_id: &str, message: &str, mode: &str) -> ChatRequest {
    ChatRequest {
        session_id: session_id.to_string(),
        message: message.to_string(),
        mode: mode.to_string(),
        use_rag: true,
    }
}

#[tokio::test]
async fn test_new_session_and_modes() {
    let backend = Backend::new();
    let client = backend.spawn().await;

    let first = client.new_session().await.unwrap();
    let second = client.new_session().await.unwrap();
    assert_eq!(first.session_id, "sess-0001");
    assert_eq!(second.session_id, "sess-0002");

    let modes = client.modes().await.unwrap();
    assert_eq!(modes, MODES.iter().map(|m| m.to_string()).collect::<Vec<_>>());
}

#[tokio::test]
async fn test_buffered_chat_sends_full_request() {
    let backend = Backend::new();
    let client = backend.spawn().await;

    let response = client.chat(&request("sess-0001", "hello", "Study")).await.unwrap();
    assert_eq!(response.reply, "[Study] echo: hello");
    assert_eq!(response.mode, "Study");

    let recorded = backend.recorded.lock().unwrap();
    assert_eq!(recorded.chat_requests.len(), 1);
    assert_eq!(recorded.chat_requests[0], request("sess-0001", "hello", "Study"));
}

#[tokio::test]
async fn test_status_error_carries_body() {
    let client = Backend::new().spawn().await;

    let err = client
        .chat(&request("sess-0001", "hello", "Poetry"))
        .await
        .unwrap_err();
    match &err {
        ApiError::Status { status, body } => {
            assert_eq!(status.as_u16(), 400);
            assert_eq!(body, "Unknown mode: Poetry");
        }
        other => panic!("expected a status error, got {other:?}"),
    }
    assert_eq!(err.to_string(), "Unknown mode: Poetry");
}

#[tokio::test]
async fn test_status_error_without_body_shows_code() {
    let client = Backend::new().spawn().await;

    let err = client
        .chat(&request("sess-0001", "explode", "General"))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "HTTP 500");
}

#[tokio::test]
async fn test_stream_decodes_split_multibyte_characters() {
    let client = Backend::new().spawn().await;

    let mut stream = client
        .chat_stream(&request("sess-0001", "hi", "General"))
        .await
        .unwrap();
    let mut pieces = Vec::new();
    while let Some(text) = stream.next_text().await.unwrap() {
        assert!(!text.contains('\u{FFFD}'), "piece {text:?} was decoded lossily");
        pieces.push(text);
    }
    assert!(!pieces.is_empty());
    assert_eq!(pieces.concat(), "Olá, mundo ☕");
}

#[tokio::test]
async fn test_stream_rejected_before_body() {
    let client = Backend::new().spawn().await;

    let err = match client.chat_stream(&request("sess-0001", "refuse", "General")).await {
        Ok(_) => panic!("stream should have been rejected"),
        Err(err) => err,
    };
    assert_eq!(err.to_string(), "Model overloaded");
}

#[tokio::test]
async fn test_rag_upload_then_status() {
    let backend = Backend::new();
    let client = backend.spawn().await;

    let empty = client.rag_status("sess-0001").await.unwrap();
    assert_eq!(empty.total_chunks, 0);
    assert!(empty.by_doc.is_empty());

    let reply = client
        .rag_upload("sess-0001", "notes.md", b"# Week 1\nLinear algebra recap".to_vec())
        .await
        .unwrap();
    assert!(reply.contains("notes.md"));

    let status = client.rag_status("sess-0001").await.unwrap();
    assert_eq!(status.total_chunks, 4);
    assert_eq!(status.by_doc.get("notes.md"), Some(&4));
    assert_eq!(status.label(), "RAG chunks: 4");

    let recorded = backend.recorded.lock().unwrap();
    assert_eq!(recorded.uploads[0].0, "notes.md");
    assert_eq!(recorded.uploads[0].1, "text/markdown");
}

#[tokio::test]
async fn test_rag_upload_error_body() {
    let client = Backend::new().spawn().await;

    let err = client
        .rag_upload("sess-0001", "empty.txt", Vec::new())
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Empty file");
}

#[tokio::test]
async fn test_health_and_history() {
    let backend = Backend::new().with_history("sess-0042", &[("user", "hi"), ("assistant", "hello")]);
    let client = backend.spawn().await;

    let health = client.health().await.unwrap();
    assert!(health.ok);
    assert_eq!(health.badge(), "demo");
    assert_eq!(health.has_gemini_key, Some(false));

    let history = client.history("sess-0042").await.unwrap();
    assert_eq!(history.session_id, "sess-0042");
    assert_eq!(history.history.len(), 2);
    assert_eq!(history.history[1].content, "hello");
}

#[tokio::test]
async fn test_clear_session() {
    let backend = Backend::new().with_history("sess-0007", &[("user", "hi")]);
    let client = backend.spawn().await;

    let cleared = client.clear_session("sess-0007").await.unwrap();
    assert!(cleared.ok);
    assert_eq!(cleared.session_id, "sess-0007");
    assert!(client.history("sess-0007").await.unwrap().history.is_empty());
    assert_eq!(backend.recorded.lock().unwrap().cleared, vec!["sess-0007".to_string()]);
}

#[tokio::test]
async fn test_unreachable_backend_is_transport_error() {
    let client = unreachable_client().await;

    let err = client.modes().await.unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)));
}
