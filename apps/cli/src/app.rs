use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use hypr_ingest::SubmittedVideo;
use hypr_transcript_sync::{
    ClockEvent, MediaClock, ScrollBehavior, SyncView, TranscriptInput, TranscriptPayload,
};

use crate::clock::SimulatedClock;
use crate::runtime::SessionEvent;
use crate::session::SubmissionQueue;
use crate::ui::ScrollState;

const SEEK_STEP_SECS: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Typing a video URL.
    Input,
    /// Watching; the highlight follows the clock.
    Player,
    /// Moving a cursor over tokens to pick one to jump to.
    Select,
}

#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    Submit(String),
}

pub struct LoadedVideo {
    pub video: SubmittedVideo,
    pub media_url: Option<String>,
}

pub struct App {
    pub mode: Mode,
    pub input: String,
    pub queue: SubmissionQueue,
    pub video: Option<LoadedVideo>,
    pub view: SyncView,
    pub clock: SimulatedClock,
    pub cursor: usize,
    pub scroll: ScrollState,
    pub notice: Option<String>,
    pub should_quit: bool,
}

impl App {
    pub fn new() -> Self {
        Self {
            mode: Mode::Input,
            input: String::new(),
            queue: SubmissionQueue::default(),
            video: None,
            view: SyncView::new(),
            clock: SimulatedClock::new(None),
            cursor: 0,
            scroll: ScrollState::default(),
            notice: None,
            should_quit: false,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.queue.is_loading()
    }

    pub fn submit(&mut self, reference: &str) -> Option<Command> {
        let reference = reference.trim();
        if reference.is_empty() {
            return None;
        }
        self.notice = None;
        self.queue.request(reference.to_string()).map(Command::Submit)
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Command> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return None;
        }

        match self.mode {
            Mode::Input => self.handle_input_key(key),
            Mode::Player => {
                self.handle_player_key(key);
                None
            }
            Mode::Select => {
                self.handle_select_key(key);
                None
            }
        }
    }

    fn handle_input_key(&mut self, key: KeyEvent) -> Option<Command> {
        match key.code {
            KeyCode::Enter => {
                let reference = self.input.clone();
                self.submit(&reference)
            }
            KeyCode::Backspace => {
                self.input.pop();
                None
            }
            KeyCode::Esc => {
                if self.video.is_some() {
                    self.mode = Mode::Player;
                } else {
                    self.should_quit = true;
                }
                None
            }
            KeyCode::Char(c) => {
                self.input.push(c);
                None
            }
            _ => None,
        }
    }

    fn handle_player_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char(' ') => self.clock.toggle(),
            KeyCode::Left => self.clock.seek_by(-SEEK_STEP_SECS),
            KeyCode::Right => self.clock.seek_by(SEEK_STEP_SECS),
            KeyCode::Home => self.clock.seek(0.0),
            KeyCode::Char('u') | KeyCode::Char('/') => self.mode = Mode::Input,
            KeyCode::Char('s') | KeyCode::Tab => self.enter_select(),
            _ => {}
        }
    }

    fn handle_select_key(&mut self, key: KeyEvent) {
        let last = self.view.tokens().len().saturating_sub(1);
        match key.code {
            KeyCode::Esc | KeyCode::Tab => self.mode = Mode::Player,
            KeyCode::Left | KeyCode::Up => self.move_cursor(self.cursor.saturating_sub(1)),
            KeyCode::Right | KeyCode::Down => self.move_cursor((self.cursor + 1).min(last)),
            KeyCode::Home => self.move_cursor(0),
            KeyCode::End => self.move_cursor(last),
            KeyCode::Enter => match self.view.activate(self.cursor, &mut self.clock) {
                Ok(()) => self.mode = Mode::Player,
                Err(e) => self.notice = Some(e.to_string()),
            },
            _ => {}
        }
    }

    fn enter_select(&mut self) {
        if self.view.tokens().is_empty() {
            return;
        }
        self.mode = Mode::Select;
        let start = self.view.controller().active_index().unwrap_or(0);
        self.move_cursor(start);
    }

    fn move_cursor(&mut self, index: usize) {
        self.cursor = index;
        self.scroll.request(index, ScrollBehavior::Immediate);
    }

    pub fn on_tick(&mut self, elapsed: Duration) {
        if let Some(event) = self.clock.tick(elapsed) {
            self.process_clock_event(event);
        }
    }

    fn process_clock_event(&mut self, event: ClockEvent) {
        if !self.view.process(event) {
            return;
        }
        if let Some((index, behavior)) = self.view.take_scroll_request() {
            // The cursor owns the viewport while selecting.
            if self.mode != Mode::Select {
                self.scroll.request(index, behavior);
            }
        }
    }

    /// Apply a session result. Returns the next parked submission once the
    /// current one has fully resolved.
    pub fn handle_session_event(&mut self, event: SessionEvent) -> Option<Command> {
        let is_final = event.is_final();

        match event {
            SessionEvent::Submitted {
                result: Ok(video),
                media_url,
            } => self.load_video(video, media_url),
            SessionEvent::Submitted { result: Err(e), .. } => {
                tracing::warn!(error = %e, "submission_notice");
                self.notice = Some(e.notice());
            }
            SessionEvent::Transcript { video_id, result } => self.load_transcript(&video_id, result),
        }

        if is_final {
            self.queue.resolve().map(Command::Submit)
        } else {
            None
        }
    }

    fn load_video(&mut self, video: SubmittedVideo, media_url: Option<String>) {
        tracing::info!(video_id = %video.id, media_url = ?media_url, "video_loaded");

        self.video = Some(LoadedVideo { video, media_url });
        self.view = SyncView::new();
        self.clock = SimulatedClock::new(None);
        self.cursor = 0;
        self.scroll.reset();
        self.notice = None;
        self.mode = Mode::Player;
    }

    fn load_transcript(
        &mut self,
        video_id: &str,
        result: Result<TranscriptPayload, hypr_ingest::Error>,
    ) {
        let current = self.video.as_ref().map(|v| v.video.id.as_str());
        if current != Some(video_id) {
            tracing::debug!(video_id = %video_id, "stale_transcript_dropped");
            return;
        }

        match result {
            Ok(payload) => self.view.load(TranscriptInput::from_payload(&payload)),
            Err(e) => {
                self.notice = Some(e.notice());
                self.view.load(TranscriptInput::Missing);
            }
        }

        let duration = self
            .view
            .tokens()
            .iter()
            .map(|t| t.end)
            .filter(|end| end.is_finite())
            .reduce(f64::max);
        self.clock.set_duration(duration);
        self.scroll.reset();
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
