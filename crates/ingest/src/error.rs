use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("video reference is empty")]
    EmptyReference,

    /// The backend answered and said no.
    #[error("submission rejected: {0}")]
    SubmissionRejected(String),

    /// Transport failure or an answer that could not be understood.
    #[error("submission failed: {0}")]
    SubmissionFailed(String),

    #[error("transcript fetch failed: {0}")]
    TranscriptFetchFailed(String),
}

impl Error {
    /// Text for the visible notice shown to the user.
    pub fn notice(&self) -> String {
        match self {
            Self::EmptyReference => "Enter a video URL first.".to_string(),
            Self::SubmissionRejected(message) => format!("Error: {message}"),
            Self::SubmissionFailed(_) => "An error occurred while processing the video.".to_string(),
            Self::TranscriptFetchFailed(_) => "Could not load transcript data.".to_string(),
        }
    }

    pub fn is_submission(&self) -> bool {
        matches!(
            self,
            Self::EmptyReference | Self::SubmissionRejected(_) | Self::SubmissionFailed(_)
        )
    }
}
