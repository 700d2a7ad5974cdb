use crate::clock::{ClockEvent, MediaClock};
use crate::controller::{SyncController, SyncPhase};
use crate::error::SyncError;
use crate::input::TranscriptInput;
use crate::types::{ScrollBehavior, SyncEffect, SyncFrame, Token};

/// Stateful driver that applies controller effects and exposes a complete
/// [`SyncFrame`] snapshot after every update.
///
/// Use this when the renderer wants to read the full current state (e.g. a
/// terminal UI or a test assertion). A renderer that patches a retained tree
/// (DOM nodes, widgets) should drive [`SyncController`] directly and apply
/// each [`SyncEffect`] itself.
pub struct SyncView {
    controller: SyncController,
    highlighted: Option<usize>,
    scroll_target: Option<(usize, ScrollBehavior)>,
    has_transcript: bool,
}

impl SyncView {
    pub fn new() -> Self {
        Self {
            controller: SyncController::new(),
            highlighted: None,
            scroll_target: None,
            has_transcript: false,
        }
    }

    pub fn controller(&self) -> &SyncController {
        &self.controller
    }

    pub fn is_loaded(&self) -> bool {
        self.controller.phase() == SyncPhase::Tracking
    }

    pub fn tokens(&self) -> &[Token] {
        self.controller.index().tokens()
    }

    /// Replace the transcript. A [`TranscriptInput::Missing`] input still
    /// loads (empty) so later clock events are accepted and ignored.
    pub fn load(&mut self, input: impl Into<TranscriptInput>) {
        let input = input.into();
        self.has_transcript = !input.is_missing();

        let effects = self.controller.load_transcript(input);
        self.apply(&effects);
        self.scroll_target = None;
    }

    /// Feed one clock notification. Returns `true` if the visible frame
    /// changed.
    pub fn process(&mut self, event: ClockEvent) -> bool {
        let effects = self.controller.on_clock_event(event);
        self.apply(&effects);
        !effects.is_empty()
    }

    /// Forward a user activation (click, Enter) to the controller.
    pub fn activate<C: MediaClock>(&self, index: usize, clock: C) -> Result<(), SyncError> {
        self.controller.activate_token(index, clock)
    }

    pub fn deactivate(&mut self) -> bool {
        let effects = self.controller.deactivate();
        self.apply(&effects);
        !effects.is_empty()
    }

    /// Hand the pending scroll request to the renderer exactly once.
    pub fn take_scroll_request(&mut self) -> Option<(usize, ScrollBehavior)> {
        self.scroll_target.take()
    }

    /// Returns the complete snapshot needed to render the transcript pane.
    pub fn frame(&self) -> SyncFrame {
        SyncFrame {
            tokens: self.tokens().to_vec(),
            active_index: self.highlighted,
            scroll_target: self.scroll_target,
            has_transcript: self.has_transcript,
        }
    }

    fn apply(&mut self, effects: &[SyncEffect]) {
        for effect in effects {
            match *effect {
                SyncEffect::Unhighlight { index } => {
                    if self.highlighted == Some(index) {
                        self.highlighted = None;
                    }
                }
                SyncEffect::Highlight { index } => self.highlighted = Some(index),
                SyncEffect::ScrollIntoView { index, behavior } => {
                    self.scroll_target = Some((index, behavior));
                }
            }
        }
        debug_assert_eq!(self.highlighted, self.controller.active_index());
    }
}

impl Default for SyncView {
    fn default() -> Self {
        Self::new()
    }
}

// ── Convenience conversions ──────────────────────────────────────────────────

impl SyncFrame {
    /// Each token's text tagged with whether it is the active one. Useful for
    /// renderers that want a single flat word list.
    pub fn words(&self) -> impl Iterator<Item = (&str, bool)> {
        self.tokens
            .iter()
            .enumerate()
            .map(|(i, t)| (t.text.as_str(), self.active_index == Some(i)))
    }

    pub fn active_token(&self) -> Option<&Token> {
        self.active_index.and_then(|i| self.tokens.get(i))
    }
}
