/// One time-stamped transcript unit, usually a single word.
///
/// Times are seconds on the media clock. `start <= end` is expected but never
/// enforced: lookups stay deterministic on malformed intervals instead of
/// rejecting them.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[cfg_attr(feature = "specta", derive(specta::Type))]
pub struct Token {
    pub text: String,
    pub start: f64,
    pub end: f64,
}

impl Token {
    pub fn new(text: impl Into<String>, start: f64, end: f64) -> Self {
        Self {
            text: text.into(),
            start,
            end,
        }
    }

    /// Closed-interval containment. Always `false` when `start > end` or when
    /// any operand is NaN.
    pub fn contains(&self, t: f64) -> bool {
        self.start <= t && t <= self.end
    }
}

/// How the renderer should bring the active token into view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[cfg_attr(feature = "specta", derive(specta::Type))]
#[serde(rename_all = "snake_case")]
pub enum ScrollBehavior {
    /// Animated scroll, used while playback advances continuously.
    Smooth,
    /// Jump straight to the token, used after a seek.
    Immediate,
}

/// Side effect requested by [`crate::controller::SyncController`].
///
/// Effects are emitted in the order a renderer must apply them: any
/// `Unhighlight` of the previous token comes before the `Highlight` of the
/// next one, and `ScrollIntoView` always follows the `Highlight` it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[cfg_attr(feature = "specta", derive(specta::Type))]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SyncEffect {
    Unhighlight {
        index: usize,
    },
    Highlight {
        index: usize,
    },
    ScrollIntoView {
        index: usize,
        behavior: ScrollBehavior,
    },
}

/// Complete snapshot of sync state at a point in time.
///
/// This is the rendering contract: everything a UI layer needs to draw the
/// transcript pane. Produced by [`crate::view::SyncView::frame`].
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[cfg_attr(feature = "specta", derive(specta::Type))]
pub struct SyncFrame {
    pub tokens: Vec<Token>,
    pub active_index: Option<usize>,
    /// Last scroll request not yet consumed by the renderer.
    pub scroll_target: Option<(usize, ScrollBehavior)>,
    /// `false` when the store returned a body without `segments`.
    pub has_transcript: bool,
}

// ── Wire format ──────────────────────────────────────────────────────────────

/// Transcript store payload: `{segments: [{words: [{text, start, end}]}]}`.
///
/// Every level is optional so that partial or malformed payloads still
/// deserialize; [`crate::input::TranscriptInput::from_payload`] decides what
/// survives. Unknown fields (segment `text`, `id`, `seek`, word `confidence`,
/// top-level `language`, …) are ignored.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct TranscriptPayload {
    #[serde(default)]
    pub segments: Option<Vec<SegmentPayload>>,
}

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct SegmentPayload {
    #[serde(default)]
    pub words: Option<Vec<WordPayload>>,
}

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct WordPayload {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub start: Option<f64>,
    #[serde(default)]
    pub end: Option<f64>,
}
