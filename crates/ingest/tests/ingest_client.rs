use std::time::Duration;

use ingest::{Error, IngestClient, ReqwestHttpClient};
use serde_json::json;
use wiremock::matchers::{body_string, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer, timeout: Duration) -> IngestClient<ReqwestHttpClient> {
    let base = server.uri().parse().expect("mock server uri must parse");
    IngestClient::new(ReqwestHttpClient::new(base, timeout).expect("client must build"))
}

fn client(server: &MockServer) -> IngestClient<ReqwestHttpClient> {
    client_for(server, Duration::from_secs(5))
}

#[tokio::test]
async fn submit_posts_form_and_parses_video() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/process"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string(
            "youtube_url=https%3A%2F%2Fwww.youtube.com%2Fwatch%3Fv%3Dabc",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "video_id": "1f0c",
            "video_title": "A talk",
            "video_path": "uploads/1f0c/video.mp4",
            "message": "Video processed successfully"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let video = client(&server)
        .submit("  https://www.youtube.com/watch?v=abc \n")
        .await
        .unwrap();

    assert_eq!(video.id, "1f0c");
    assert_eq!(video.title, "A talk");
    assert_eq!(video.media_path, "uploads/1f0c/video.mp4");
}

#[tokio::test]
async fn submit_surfaces_backend_error_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/process"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({ "error": "Video unavailable" })),
        )
        .mount(&server)
        .await;

    let err = client(&server).submit("https://youtu.be/x").await.unwrap_err();
    assert!(matches!(err, Error::SubmissionRejected(ref m) if m == "Video unavailable"));
    assert_eq!(err.notice(), "Error: Video unavailable");
}

#[tokio::test]
async fn empty_reference_never_hits_the_backend() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = client(&server).submit("   ").await.unwrap_err();
    assert!(matches!(err, Error::EmptyReference));
}

#[tokio::test]
async fn slow_backend_times_out_as_submission_failure() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/process"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(500))
                .set_body_json(json!({ "success": true })),
        )
        .mount(&server)
        .await;

    let err = client_for(&server, Duration::from_millis(50))
        .submit("https://youtu.be/x")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::SubmissionFailed(_)));
    assert!(err.is_submission());
}

#[tokio::test]
async fn fetch_transcript_returns_payload() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/transcript/1f0c"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "text": " Hello world",
            "segments": [
                { "id": 0, "text": " Hello world", "words": [
                    { "text": "Hello", "start": 0.1, "end": 0.5, "confidence": 0.9 },
                    { "text": "world", "start": 0.6, "end": 0.9, "confidence": 0.8 }
                ]}
            ]
        })))
        .mount(&server)
        .await;

    let payload = client(&server).fetch_transcript("1f0c").await.unwrap();
    let segments = payload.segments.expect("segments present");
    let words = segments[0].words.as_ref().expect("words present");
    assert_eq!(words.len(), 2);
    assert_eq!(words[1].text, "world");
    assert_eq!(words[1].start, Some(0.6));
}

#[tokio::test]
async fn fetch_transcript_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/transcript/missing"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({ "error": "Transcript not found" })),
        )
        .mount(&server)
        .await;

    let err = client(&server).fetch_transcript("missing").await.unwrap_err();
    assert!(matches!(err, Error::TranscriptFetchFailed(ref m) if m == "Transcript not found"));
    assert!(!err.is_submission());
}

#[tokio::test]
async fn fetch_transcript_without_segments_is_ok() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/transcript/bare"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "text": "" })))
        .mount(&server)
        .await;

    let payload = client(&server).fetch_transcript("bare").await.unwrap();
    assert!(payload.segments.is_none());
}

#[tokio::test]
async fn fetch_transcript_encodes_id_once() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/transcript/a%20b%25c"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "segments": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let payload = client(&server).fetch_transcript("a b%c").await.unwrap();
    assert_eq!(payload.segments.map(|s| s.len()), Some(0));
}

#[tokio::test]
async fn fetch_transcript_rejects_ids_spanning_segments() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "segments": [] })))
        .expect(0)
        .mount(&server)
        .await;

    for id in ["", "a/b", "a?b"] {
        let err = client(&server).fetch_transcript(id).await.unwrap_err();
        assert!(matches!(err, Error::TranscriptFetchFailed(_)));
    }
}

#[tokio::test]
async fn unreachable_backend_is_transport_failure() {
    let base = "http://127.0.0.1:9".parse().unwrap();
    let client = IngestClient::new(ReqwestHttpClient::new(base, Duration::from_secs(2)).unwrap());

    let err = client.fetch_transcript("x").await.unwrap_err();
    assert!(matches!(err, Error::TranscriptFetchFailed(_)));

    let err = client.submit("https://youtu.be/x").await.unwrap_err();
    assert!(matches!(err, Error::SubmissionFailed(_)));
}
