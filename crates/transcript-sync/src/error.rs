use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SyncError {
    #[error("no transcript loaded")]
    NoTranscript,

    #[error("token {index} out of range (transcript has {len} tokens)")]
    TokenOutOfRange { index: usize, len: usize },
}
