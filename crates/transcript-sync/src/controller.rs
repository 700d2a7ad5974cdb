use crate::clock::{ClockEvent, MediaClock};
use crate::error::SyncError;
use crate::index::TokenIndex;
use crate::input::TranscriptInput;
use crate::types::{ScrollBehavior, SyncEffect};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncPhase {
    /// No transcript loaded yet.
    Idle,
    /// A transcript (possibly empty) is loaded and clock events are tracked.
    Tracking,
}

/// Owns the active-token state and turns clock notifications into
/// highlight/scroll [`SyncEffect`]s.
///
/// # Advance vs. jump
///
/// A continuous tick that lands in silence between two words clears the
/// highlight: snapping to the nearest word there would light it up early.
/// A seek landing in the same gap snaps to the nearest word, because a seek
/// has no exact landing token and "roughly here" is what the user asked for.
///
/// # Authority
///
/// [`Self::activate_token`] only commands the clock. The highlight follows
/// whatever position the clock reports next, so what is highlighted never
/// diverges from where playback actually is.
///
/// Every handler returns the effects to apply, in order. An empty vector
/// means nothing visible changed.
#[derive(Debug)]
pub struct SyncController {
    index: TokenIndex,
    phase: SyncPhase,
    active: Option<usize>,
}

impl SyncController {
    pub fn new() -> Self {
        Self {
            index: TokenIndex::default(),
            phase: SyncPhase::Idle,
            active: None,
        }
    }

    pub fn phase(&self) -> SyncPhase {
        self.phase
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    pub fn index(&self) -> &TokenIndex {
        &self.index
    }

    /// Replace the transcript wholesale. Valid from any phase.
    pub fn load_transcript(&mut self, input: impl Into<TranscriptInput>) -> Vec<SyncEffect> {
        let effects = self.deactivate();

        self.index = TokenIndex::build(input.into().into_tokens());
        self.phase = SyncPhase::Tracking;

        tracing::debug!(tokens = self.index.len(), "sync_transcript_loaded");
        effects
    }

    pub fn on_clock_event(&mut self, event: ClockEvent) -> Vec<SyncEffect> {
        match event {
            ClockEvent::Advance(t) => self.on_clock_advance(t),
            ClockEvent::Jump(t) => self.on_clock_jump(t),
        }
    }

    /// Normal playback tick.
    pub fn on_clock_advance(&mut self, t: f64) -> Vec<SyncEffect> {
        let next = self.index.active_at_from(t, self.active);
        if next == self.active {
            return Vec::new();
        }

        tracing::trace!(position = t, from = ?self.active, to = ?next, "sync_advance");
        self.transition(next, ScrollBehavior::Smooth)
    }

    /// Seek completed. Always re-activates, even when the nearest token is
    /// the one already active, so the view snaps back to it.
    pub fn on_clock_jump(&mut self, t: f64) -> Vec<SyncEffect> {
        let mut effects = self.deactivate();

        if let Some(next) = self.index.nearest_to(t) {
            tracing::debug!(position = t, index = next, "sync_jump");
            effects.extend(self.activate(next, ScrollBehavior::Immediate));
        }

        effects
    }

    /// Seek the clock to the token's start and resume playback.
    ///
    /// Leaves the active index untouched; the clock's next notification
    /// updates it.
    pub fn activate_token<C: MediaClock>(
        &self,
        index: usize,
        mut clock: C,
    ) -> Result<(), SyncError> {
        if self.phase == SyncPhase::Idle {
            return Err(SyncError::NoTranscript);
        }

        let token = self.index.get(index).ok_or(SyncError::TokenOutOfRange {
            index,
            len: self.index.len(),
        })?;

        tracing::debug!(index, start = token.start, "sync_activate_token");
        clock.seek(token.start);
        clock.play();
        Ok(())
    }

    /// Explicitly clear the highlight.
    pub fn deactivate(&mut self) -> Vec<SyncEffect> {
        match self.active.take() {
            Some(index) => vec![SyncEffect::Unhighlight { index }],
            None => Vec::new(),
        }
    }

    fn transition(&mut self, next: Option<usize>, behavior: ScrollBehavior) -> Vec<SyncEffect> {
        let mut effects = self.deactivate();
        if let Some(index) = next {
            effects.extend(self.activate(index, behavior));
        }
        effects
    }

    fn activate(&mut self, index: usize, behavior: ScrollBehavior) -> [SyncEffect; 2] {
        self.active = Some(index);
        [
            SyncEffect::Highlight { index },
            SyncEffect::ScrollIntoView { index, behavior },
        ]
    }
}

impl Default for SyncController {
    fn default() -> Self {
        Self::new()
    }
}
