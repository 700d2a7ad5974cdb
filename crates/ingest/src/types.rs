use hypr_http::HttpResponse;
use hypr_transcript_sync::TranscriptPayload;
use serde::{Deserialize, Serialize};

use crate::error::Error;

#[derive(Debug, Serialize)]
pub struct SubmitRequest<'a> {
    pub youtube_url: &'a str,
}

/// Backend answer to `POST /process`. Failures come back either as
/// `{success: false, error}` or as a bare `{error}` with a 4xx/5xx status.
#[derive(Debug, Deserialize)]
pub(crate) struct SubmitResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub video_id: Option<String>,
    #[serde(default)]
    pub video_title: Option<String>,
    #[serde(default)]
    pub video_path: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorResponse {
    pub error: String,
}

/// A processed video, ready to play.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmittedVideo {
    pub id: String,
    pub title: String,
    /// Media location relative to the backend root, e.g.
    /// `uploads/<id>/video.mp4`.
    pub media_path: String,
    #[serde(default)]
    pub message: Option<String>,
}

pub(crate) fn parse_submit_response(response: &HttpResponse) -> Result<SubmittedVideo, Error> {
    let parsed: SubmitResponse = serde_json::from_slice(&response.body).map_err(|e| {
        Error::SubmissionFailed(format!("HTTP {}: unreadable body ({e})", response.status))
    })?;

    if let Some(error) = parsed.error {
        return Err(Error::SubmissionRejected(error));
    }
    if !parsed.success || !response.is_success() {
        return Err(Error::SubmissionFailed(format!(
            "HTTP {} without success flag",
            response.status
        )));
    }

    match (parsed.video_id, parsed.video_path) {
        (Some(id), Some(media_path)) => Ok(SubmittedVideo {
            title: parsed.video_title.unwrap_or_else(|| id.clone()),
            id,
            media_path,
            message: parsed.message,
        }),
        _ => Err(Error::SubmissionFailed(
            "response is missing video_id or video_path".to_string(),
        )),
    }
}

pub(crate) fn parse_transcript_response(response: &HttpResponse) -> Result<TranscriptPayload, Error> {
    if !response.is_success() {
        let detail = serde_json::from_slice::<ErrorResponse>(&response.body)
            .map(|e| e.error)
            .unwrap_or_else(|_| format!("HTTP {}", response.status));
        return Err(Error::TranscriptFetchFailed(detail));
    }

    serde_json::from_slice(&response.body).map_err(|e| Error::TranscriptFetchFailed(e.to_string()))
}
