use hypr_http::HttpClient;
use hypr_transcript_sync::TranscriptPayload;

use crate::error::Error;
use crate::types::{SubmitRequest, SubmittedVideo, parse_submit_response, parse_transcript_response};

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Client for the ingestion backend (`POST /process`) and the transcript
/// store (`GET /transcript/{id}`).
pub struct IngestClient<C> {
    http: C,
}

impl<C: HttpClient> IngestClient<C> {
    pub fn new(http: C) -> Self {
        Self { http }
    }

    pub fn http(&self) -> &C {
        &self.http
    }

    /// Submit a video reference for download and transcription.
    ///
    /// The reference is trimmed; an empty one is refused locally without a
    /// request.
    pub async fn submit(&self, reference: &str) -> Result<SubmittedVideo, Error> {
        let reference = reference.trim();
        if reference.is_empty() {
            return Err(Error::EmptyReference);
        }

        let body = serde_html_form::to_string(SubmitRequest {
            youtube_url: reference,
        })
        .map_err(|e| Error::SubmissionFailed(e.to_string()))?;

        tracing::info!(reference = %reference, "submission_started");

        let response = self
            .http
            .post("/process", body.into_bytes(), FORM_CONTENT_TYPE)
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "submission_transport_failed");
                Error::SubmissionFailed(e.to_string())
            })?;

        match parse_submit_response(&response) {
            Ok(video) => {
                tracing::info!(video_id = %video.id, title = %video.title, "submission_succeeded");
                Ok(video)
            }
            Err(e) => {
                tracing::warn!(status = response.status, error = %e, "submission_failed");
                Err(e)
            }
        }
    }

    /// Fetch the word-level transcript of a processed video.
    ///
    /// A 2xx body without `segments` is returned as-is; deciding that it
    /// means "no transcript" is up to the caller.
    pub async fn fetch_transcript(&self, video_id: &str) -> Result<TranscriptPayload, Error> {
        // The id becomes a single path segment; the transport percent-encodes it.
        if video_id.is_empty() || video_id.contains(['/', '?']) {
            tracing::warn!(video_id = %video_id, "transcript_invalid_video_id");
            return Err(Error::TranscriptFetchFailed(format!(
                "invalid video id: {video_id:?}"
            )));
        }
        let path = format!("/transcript/{video_id}");

        let response = self.http.get(&path).await.map_err(|e| {
            tracing::warn!(video_id = %video_id, error = %e, "transcript_transport_failed");
            Error::TranscriptFetchFailed(e.to_string())
        })?;

        let payload = parse_transcript_response(&response).inspect_err(|e| {
            tracing::warn!(
                video_id = %video_id,
                status = response.status,
                error = %e,
                "transcript_fetch_failed"
            );
        })?;

        tracing::info!(
            video_id = %video_id,
            segments = payload.segments.as_ref().map_or(0, |s| s.len()),
            "transcript_fetched"
        );
        Ok(payload)
    }
}
