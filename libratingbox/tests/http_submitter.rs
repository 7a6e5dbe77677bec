//! HTTP submitter against a local listener
//!
//! The listener speaks just enough HTTP/1.1 to answer one request.

use std::sync::Arc;
use std::time::Duration;

use libratingbox::ports::http::HttpSubmitter;
use libratingbox::ports::mock::RecordingTracker;
use libratingbox::ports::Submitter;
use libratingbox::{RatingBox, SubmissionState, SubmitError};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Serve one request with `response`, returning the raw request text
async fn serve_once(response: &'static str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}/ratings", listener.local_addr().unwrap());

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        // Read until the JSON body has arrived
        while !request.ends_with(b"}") {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
        }
        socket.write_all(response.as_bytes()).await.unwrap();
        let _ = socket.shutdown().await;
        String::from_utf8_lossy(&request).to_string()
    });

    (url, handle)
}

#[tokio::test]
async fn test_success_response() {
    let (url, server) =
        serve_once("HTTP/1.1 204 No Content\r\nContent-Length: 0\r\nConnection: close\r\n\r\n")
            .await;
    let submitter = HttpSubmitter::new(&url, Duration::from_secs(5)).unwrap();

    submitter.submit(4).await.unwrap();

    let request = server.await.unwrap();
    assert!(request.starts_with("POST /ratings HTTP/1.1"));
    assert!(request.to_lowercase().contains("content-type: application/json"));
    assert!(request.ends_with(r#"{"rating":4}"#));
}

#[tokio::test]
async fn test_error_status_is_rejected() {
    let (url, _server) = serve_once(
        "HTTP/1.1 503 Service Unavailable\r\nContent-Length: 11\r\nConnection: close\r\n\r\nmaintenance",
    )
    .await;
    let submitter = HttpSubmitter::new(&url, Duration::from_secs(5)).unwrap();

    let err = submitter.submit(2).await.unwrap_err();

    assert_eq!(
        err,
        SubmitError::Rejected {
            status: 503,
            message: "maintenance".to_string(),
        }
    );
}

#[tokio::test]
async fn test_empty_error_body_uses_status_reason() {
    let (url, _server) =
        serve_once("HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n")
            .await;
    let submitter = HttpSubmitter::new(&url, Duration::from_secs(5)).unwrap();

    let err = submitter.submit(2).await.unwrap_err();

    assert_eq!(
        err,
        SubmitError::Rejected {
            status: 404,
            message: "Not Found".to_string(),
        }
    );
}

#[tokio::test]
async fn test_connection_refused_is_network_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}/ratings", listener.local_addr().unwrap());
    drop(listener);

    let submitter = HttpSubmitter::new(&url, Duration::from_secs(5)).unwrap();
    let err = submitter.submit(1).await.unwrap_err();

    assert!(matches!(err, SubmitError::Network { .. }), "got {:?}", err);
}

#[tokio::test]
async fn test_unresponsive_server_times_out() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}/ratings", listener.local_addr().unwrap());

    // Accept but never answer
    let _server = tokio::spawn(async move {
        let (socket, _) = listener.accept().await.unwrap();
        tokio::time::sleep(Duration::from_secs(5)).await;
        drop(socket);
    });

    let submitter = HttpSubmitter::new(&url, Duration::from_millis(200)).unwrap();
    let err = submitter.submit(3).await.unwrap_err();

    assert_eq!(err, SubmitError::Timeout { millis: 200 });
}

#[tokio::test]
async fn test_rating_box_surfaces_http_failure() {
    let (url, _server) = serve_once(
        "HTTP/1.1 400 Bad Request\r\nContent-Length: 10\r\nConnection: close\r\n\r\nbad rating",
    )
    .await;
    let submitter = HttpSubmitter::new(&url, Duration::from_secs(5)).unwrap();
    let mut rating_box = RatingBox::new(Arc::new(submitter), Arc::new(RecordingTracker::new()));

    rating_box.select_rating(7);
    rating_box.request_submit();
    let state = rating_box.settle().await;

    assert_eq!(
        state,
        Some(SubmissionState::Failure(SubmitError::Rejected {
            status: 400,
            message: "bad rating".to_string(),
        }))
    );
}
