use crate::types::{Token, TranscriptPayload};

/// Store-agnostic input to the sync engine.
///
/// Convert the transcript store's payload into `TranscriptInput` before
/// feeding it to [`crate::controller::SyncController::load_transcript`] or
/// [`crate::view::SyncView::load`]. Keeps the controller free of wire-format
/// concerns and lets tests build token lists directly.
#[derive(Debug, Clone, PartialEq)]
pub enum TranscriptInput {
    /// The payload had no `segments` at all. Not an error: the video stays
    /// playable, there is simply nothing to sync against.
    Missing,
    /// Flattened tokens across all segments, in payload order. May be empty
    /// when every segment or word was malformed.
    Tokens(Vec<Token>),
}

impl TranscriptInput {
    /// Flatten a transcript store payload.
    ///
    /// Segment boundaries are dropped. Segments without a `words` list are
    /// skipped, and words missing either timestamp are dropped, since a token
    /// without a start can neither be highlighted nor seeked to.
    pub fn from_payload(payload: &TranscriptPayload) -> Self {
        let Some(segments) = payload.segments.as_ref() else {
            tracing::warn!("transcript_payload_missing_segments");
            return Self::Missing;
        };

        let mut tokens = Vec::new();
        let mut dropped = 0usize;

        for segment in segments {
            let Some(words) = segment.words.as_ref() else {
                continue;
            };

            for word in words {
                match (word.start, word.end) {
                    (Some(start), Some(end)) => {
                        tokens.push(Token::new(word.text.trim(), start, end))
                    }
                    _ => dropped += 1,
                }
            }
        }

        if dropped > 0 {
            tracing::warn!(dropped, kept = tokens.len(), "transcript_words_without_timing");
        }
        if tokens.is_empty() {
            tracing::warn!(segments = segments.len(), "transcript_has_no_tokens");
        }

        Self::Tokens(tokens)
    }

    pub fn tokens(&self) -> &[Token] {
        match self {
            Self::Missing => &[],
            Self::Tokens(tokens) => tokens,
        }
    }

    pub fn into_tokens(self) -> Vec<Token> {
        match self {
            Self::Missing => Vec::new(),
            Self::Tokens(tokens) => tokens,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }
}

impl From<Vec<Token>> for TranscriptInput {
    fn from(tokens: Vec<Token>) -> Self {
        Self::Tokens(tokens)
    }
}

impl From<&TranscriptPayload> for TranscriptInput {
    fn from(payload: &TranscriptPayload) -> Self {
        Self::from_payload(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> TranscriptInput {
        let payload: TranscriptPayload =
            serde_json::from_str(json).expect("fixture must parse as TranscriptPayload");
        TranscriptInput::from_payload(&payload)
    }

    #[test]
    fn flattens_segments_in_order() {
        let input = parse(
            r#"{"segments": [
                {"words": [{"text": " Hello", "start": 0.0, "end": 0.4}]},
                {"words": [{"text": "big", "start": 0.5, "end": 0.7},
                           {"text": "world", "start": 0.8, "end": 1.2}]}
            ]}"#,
        );

        let texts: Vec<&str> = input.tokens().iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, ["Hello", "big", "world"]);
        assert_eq!(input.tokens()[2].start, 0.8);
    }

    #[test]
    fn missing_segments_is_not_an_error() {
        let input = parse(r#"{"text": "whatever", "language": "en"}"#);
        assert!(input.is_missing());
        assert!(input.tokens().is_empty());
    }

    #[test]
    fn empty_segments_yield_empty_tokens() {
        let input = parse(r#"{"segments": []}"#);
        assert_eq!(input, TranscriptInput::Tokens(vec![]));
    }

    #[test]
    fn segments_without_words_are_skipped() {
        let input = parse(
            r#"{"segments": [
                {"text": "no words here"},
                {"words": null},
                {"words": [{"text": "ok", "start": 1.0, "end": 1.5}]}
            ]}"#,
        );
        assert_eq!(input.tokens(), [Token::new("ok", 1.0, 1.5)]);
    }

    #[test]
    fn words_without_timing_are_dropped() {
        let input = parse(
            r#"{"segments": [{"words": [
                {"text": "a", "start": 0.0},
                {"text": "b", "end": 1.0},
                {"text": "c", "start": 2.0, "end": 2.5}
            ]}]}"#,
        );
        assert_eq!(input.tokens(), [Token::new("c", 2.0, 2.5)]);
    }

    #[test]
    fn whisper_extra_fields_are_ignored() {
        let input = parse(
            r#"{"text": " Hi.", "language": "en", "segments": [{
                "id": 0, "seek": 0, "start": 0.0, "end": 0.6, "text": " Hi.",
                "confidence": 0.9,
                "words": [{"text": "Hi.", "start": 0.0, "end": 0.6, "confidence": 0.93}]
            }]}"#,
        );
        assert_eq!(input.tokens(), [Token::new("Hi.", 0.0, 0.6)]);
    }

    #[test]
    fn malformed_intervals_are_kept_as_is() {
        let input = parse(
            r#"{"segments": [{"words": [
                {"text": "late", "start": 3.0, "end": 2.0},
                {"text": "early", "start": 1.0, "end": 1.5}
            ]}]}"#,
        );
        assert_eq!(
            input.into_tokens(),
            vec![Token::new("late", 3.0, 2.0), Token::new("early", 1.0, 1.5)]
        );
    }
}
