use std::sync::Arc;

use hypr_transcript_sync::TranscriptPayload;
use hypr_ingest::{IngestClient, ReqwestHttpClient, SubmittedVideo};
use tokio::sync::mpsc;

pub enum SessionEvent {
    Submitted {
        result: Result<SubmittedVideo, hypr_ingest::Error>,
        media_url: Option<String>,
    },
    Transcript {
        video_id: String,
        result: Result<TranscriptPayload, hypr_ingest::Error>,
    },
}

impl SessionEvent {
    /// Whether this event ends its submission (nothing else will follow).
    pub fn is_final(&self) -> bool {
        match self {
            Self::Submitted { result, .. } => result.is_err(),
            Self::Transcript { .. } => true,
        }
    }
}

/// Runs submissions on the tokio runtime and reports back over a channel so
/// the UI loop stays the only place that mutates state.
pub struct IngestRuntime {
    client: Arc<IngestClient<ReqwestHttpClient>>,
    tx: mpsc::UnboundedSender<SessionEvent>,
}

impl IngestRuntime {
    pub fn new(
        client: IngestClient<ReqwestHttpClient>,
        tx: mpsc::UnboundedSender<SessionEvent>,
    ) -> Self {
        Self {
            client: Arc::new(client),
            tx,
        }
    }

    /// Submit, then fetch the transcript of the resulting video.
    pub fn spawn_submission(&self, reference: String) {
        let client = self.client.clone();
        let tx = self.tx.clone();

        tokio::spawn(async move {
            let result = client.submit(&reference).await;
            let video = result.as_ref().ok().cloned();
            let media_url = video.as_ref().and_then(|v| media_url(client.http(), v));

            let _ = tx.send(SessionEvent::Submitted { result, media_url });

            let Some(video) = video else {
                return;
            };

            let result = client.fetch_transcript(&video.id).await;
            let _ = tx.send(SessionEvent::Transcript {
                video_id: video.id,
                result,
            });
        });
    }
}

fn media_url(http: &ReqwestHttpClient, video: &SubmittedVideo) -> Option<String> {
    match http.resolve(&video.media_path) {
        Ok(url) => Some(url.to_string()),
        Err(e) => {
            tracing::warn!(
                video_id = %video.id,
                media_path = %video.media_path,
                error = %e,
                "media_url_unresolved"
            );
            None
        }
    }
}
