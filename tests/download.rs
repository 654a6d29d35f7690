//! File download tests: streamed HTTP, local shortcut and failure mapping.

mod common;

use bytes::Bytes;
use common::{client, local_client, MockServerFixture, MockTransport, UnreachableTransport};
use std::io::{Cursor, Write};
use std::sync::Arc;
use tgbot_core::transport::{HttpResponse, ReadMode, TransportError};
use tgbot_core::{CancellationToken, Error};

#[tokio::test]
async fn streams_file_from_server() {
    let mut fx = MockServerFixture::new().await;
    let payload = "line one\nline two\n".repeat(512);
    let mock = fx
        .server
        .mock("GET", MockServerFixture::file_path("documents/file_1.txt").as_str())
        .with_status(200)
        .with_body(&payload)
        .create_async()
        .await;

    let mut out: Vec<u8> = Vec::new();
    fx.client
        .download_file("documents/file_1.txt", &mut out, &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(out, payload.as_bytes());
    mock.assert_async().await;
}

#[tokio::test]
async fn download_uses_headers_only_get() {
    let transport = MockTransport::respond(200, "abc");
    let mut out = Vec::new();
    client(transport.clone())
        .download_file("photos/file_2.jpg", &mut out, &CancellationToken::new())
        .await
        .unwrap();

    let seen = transport.requests();
    assert_eq!(seen[0].method, reqwest::Method::GET);
    assert_eq!(seen[0].read_mode, ReadMode::HeadersOnly);
    assert_eq!(
        seen[0].url.as_str(),
        format!(
            "https://api.telegram.org/file/bot{}/photos/file_2.jpg",
            common::TOKEN
        )
    );
    assert_eq!(out, b"abc");
}

#[tokio::test]
async fn short_path_is_rejected_without_network() {
    let mut out = Vec::new();
    let err = client(Arc::new(UnreachableTransport))
        .download_file("a", &mut out, &CancellationToken::new())
        .await
        .unwrap_err();

    match err {
        Error::InvalidArgument { message, .. } => assert_eq!(message, "Invalid file path"),
        other => panic!("unexpected {:?}", other),
    }
}

#[tokio::test]
async fn transport_failure_leaves_destination_untouched() {
    let transport = MockTransport::fail(|| TransportError::Other("connection refused".into()));
    let mut out = Cursor::new(Vec::new());
    let err = client(transport)
        .download_file("documents/file_1.txt", &mut out, &CancellationToken::new())
        .await
        .unwrap_err();

    match err {
        Error::Transport { message, .. } => {
            assert_eq!(message, "Exception during file download request")
        }
        other => panic!("unexpected {:?}", other),
    }
    assert_eq!(out.position(), 0);
    assert!(out.get_ref().is_empty());
}

#[tokio::test]
async fn download_timeout_uses_download_wording() {
    let transport = MockTransport::fail(|| TransportError::Timeout("elapsed".into()));
    let mut out = Vec::new();
    let err = client(transport)
        .download_file("documents/file_1.txt", &mut out, &CancellationToken::new())
        .await
        .unwrap_err();

    assert!(err.is_timeout());
    assert!(err.to_string().starts_with("File download request timed out"));
}

#[tokio::test]
async fn local_server_reads_existing_file_directly() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"stored by the local bot api server").unwrap();
    let path = file.path().to_str().unwrap().to_string();

    let mut out = Vec::new();
    local_client(Arc::new(UnreachableTransport))
        .download_file(&path, &mut out, &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(out, b"stored by the local bot api server");
}

#[tokio::test]
async fn local_server_falls_back_to_http_for_missing_files() {
    let transport = MockTransport::respond(200, "remote bytes");
    let mut out = Vec::new();
    local_client(transport.clone())
        .download_file(
            "/definitely/not/here/file_9.bin",
            &mut out,
            &CancellationToken::new(),
        )
        .await
        .unwrap();

    assert_eq!(transport.calls(), 1);
    assert!(transport.requests()[0]
        .url
        .as_str()
        .starts_with(common::LOCAL_SERVER));
    assert_eq!(out, b"remote bytes");
}

#[tokio::test]
async fn hosted_server_ignores_local_files() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"local").unwrap();
    let path = file.path().to_str().unwrap().to_string();

    let transport = MockTransport::respond(200, "remote");
    let mut out = Vec::new();
    client(transport.clone())
        .download_file(&path, &mut out, &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(transport.calls(), 1);
    assert_eq!(out, b"remote");
}

#[tokio::test]
async fn error_envelope_becomes_api_error() {
    let body = r#"{"ok":false,"error_code":404,"description":"Not Found"}"#;
    let transport = MockTransport::respond(404, body);
    let mut out = Vec::new();
    let err = client(transport)
        .download_file("documents/gone.txt", &mut out, &CancellationToken::new())
        .await
        .unwrap_err();

    assert_eq!(err.error_code(), Some(404));
    assert_eq!(err.description(), Some("Not Found"));
    assert_eq!(err.http_status(), Some(404));
    assert_eq!(err.body(), Some(body));
    assert!(out.is_empty());
}

#[tokio::test]
async fn unparseable_error_body_is_dropped() {
    let transport = MockTransport::respond(500, "<html>oops</html>");
    let mut out = Vec::new();
    let err = client(transport)
        .download_file("documents/file_1.txt", &mut out, &CancellationToken::new())
        .await
        .unwrap_err();

    assert_eq!(err.error_code(), Some(500));
    assert!(err.body().is_none());
}

#[tokio::test]
async fn missing_content_is_api_error() {
    let transport = MockTransport::new(|_| Ok(HttpResponse::new(200)));
    let mut out = Vec::new();
    let err = client(transport)
        .download_file("documents/file_1.txt", &mut out, &CancellationToken::new())
        .await
        .unwrap_err();

    assert_eq!(err.error_code(), Some(200));
    assert_eq!(err.description(), Some("Response doesn't contain any content"));
}

#[tokio::test]
async fn interrupted_stream_is_api_error_with_cause() {
    let transport = MockTransport::new(|_| {
        let chunks: Vec<Result<Bytes, TransportError>> = vec![
            Ok(Bytes::from_static(b"partial")),
            Err(TransportError::Other("connection reset".into())),
        ];
        Ok(HttpResponse::new(200).with_stream(Box::pin(futures::stream::iter(chunks))))
    });
    let mut out = Vec::new();
    let err = client(transport)
        .download_file("documents/file_1.txt", &mut out, &CancellationToken::new())
        .await
        .unwrap_err();

    match err {
        Error::Api {
            error_code,
            description,
            context,
            cause,
            ..
        } => {
            assert_eq!(error_code, 200);
            assert_eq!(description, "Exception during file download");
            assert_eq!(context.http_status, Some(200));
            assert!(cause.is_some());
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[tokio::test]
async fn cancelled_download_is_cancellation() {
    let cancel = CancellationToken::new();
    cancel.cancel();
    let mut out = Vec::new();
    let err = client(Arc::new(UnreachableTransport))
        .download_file("documents/file_1.txt", &mut out, &cancel)
        .await
        .unwrap_err();
    assert!(err.is_cancelled());
}

#[tokio::test]
async fn get_info_and_download_resolves_then_streams() {
    let transport = MockTransport::new(|request| {
        let path = request.url.path();
        if path.ends_with("/getFile") {
            Ok(HttpResponse::new(200).with_body(
                r#"{"ok":true,"result":{"file_id":"BQAC","file_unique_id":"u9","file_size":5,"file_path":"documents/file_5.txt"}}"#,
            ))
        } else if path.ends_with("/documents/file_5.txt") {
            Ok(HttpResponse::new(200).with_body("hello"))
        } else {
            Ok(HttpResponse::new(404).with_body(
                r#"{"ok":false,"error_code":404,"description":"Not Found"}"#,
            ))
        }
    });

    let mut out = Vec::new();
    let file = client(transport.clone())
        .get_info_and_download_file("BQAC", &mut out, &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(file.file_id, "BQAC");
    assert_eq!(file.file_path.as_deref(), Some("documents/file_5.txt"));
    assert_eq!(out, b"hello");
    assert_eq!(transport.calls(), 2);
}

#[tokio::test]
async fn get_info_without_path_is_rejected() {
    let transport = MockTransport::respond(
        200,
        r#"{"ok":true,"result":{"file_id":"BQAC","file_unique_id":"u9"}}"#,
    );
    let mut out = Vec::new();
    let err = client(transport.clone())
        .get_info_and_download_file("BQAC", &mut out, &CancellationToken::new())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::InvalidArgument { .. }));
    assert_eq!(transport.calls(), 1);
}

#[tokio::test]
async fn chunks_are_written_in_order() {
    let transport = MockTransport::new(|_| {
        let chunks: Vec<Result<Bytes, TransportError>> = vec![
            Ok(Bytes::from_static(b"first ")),
            Ok(Bytes::from_static(b"second")),
        ];
        Ok(HttpResponse::new(200).with_stream(Box::pin(futures::stream::iter(chunks))))
    });
    let mut sink = tokio_test::io::Builder::new()
        .write(b"first ")
        .write(b"second")
        .build();

    client(transport)
        .download_file("videos/file_3.mp4", &mut sink, &CancellationToken::new())
        .await
        .unwrap();
}

#[tokio::test]
async fn local_server_downloads_relative_paths_over_http() {
    // Relative to the crate root, where the test binary runs.
    assert!(std::path::Path::new("Cargo.toml").is_file());

    let transport = MockTransport::respond(200, "served remotely");
    let mut out = Vec::new();
    local_client(transport.clone())
        .download_file("Cargo.toml", &mut out, &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(transport.calls(), 1);
    assert_eq!(out, b"served remotely");
}
