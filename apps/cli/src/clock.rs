use std::time::Duration;

use hypr_transcript_sync::{ClockEvent, MediaClock};

/// Wall-clock stand-in for a media element.
///
/// Emits an [`ClockEvent::Advance`] on every tick while playing (the
/// `timeupdate` analogue) and exactly one [`ClockEvent::Jump`] on the first
/// tick after a seek (the `seeked` analogue). Paused clocks are silent.
#[derive(Debug, Clone)]
pub struct SimulatedClock {
    position: f64,
    /// `None` when the media length is unknown; playback then never ends.
    duration: Option<f64>,
    playing: bool,
    seeked: bool,
}

impl SimulatedClock {
    pub fn new(duration: Option<f64>) -> Self {
        Self {
            position: 0.0,
            duration,
            playing: false,
            seeked: false,
        }
    }

    pub fn duration(&self) -> Option<f64> {
        self.duration
    }

    pub fn set_duration(&mut self, duration: Option<f64>) {
        self.duration = duration;
        self.position = self.clamp(self.position);
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn pause(&mut self) {
        self.playing = false;
    }

    pub fn toggle(&mut self) {
        if self.playing {
            self.pause();
        } else {
            self.play();
        }
    }

    pub fn seek_by(&mut self, delta: f64) {
        self.seek(self.position + delta);
    }

    /// Advance wall time by `elapsed` and report what a media element would
    /// have notified during that interval.
    pub fn tick(&mut self, elapsed: Duration) -> Option<ClockEvent> {
        if std::mem::take(&mut self.seeked) {
            return Some(ClockEvent::Jump(self.position));
        }
        if !self.playing {
            return None;
        }

        self.position = self.clamp(self.position + elapsed.as_secs_f64());
        if self.duration.is_some_and(|d| self.position >= d) {
            self.playing = false;
        }
        Some(ClockEvent::Advance(self.position))
    }

    fn clamp(&self, position: f64) -> f64 {
        let position = position.max(0.0);
        match self.duration {
            Some(d) => position.min(d.max(0.0)),
            None => position,
        }
    }
}

impl MediaClock for SimulatedClock {
    fn position(&self) -> f64 {
        self.position
    }

    fn seek(&mut self, position: f64) {
        if !position.is_finite() {
            tracing::warn!(position, "clock_seek_ignored");
            return;
        }
        self.position = self.clamp(position);
        self.seeked = true;
    }

    fn play(&mut self) {
        // Replaying ended media rewinds, which is a seek.
        if self.duration.is_some_and(|d| self.position >= d) {
            self.position = 0.0;
            self.seeked = true;
        }
        self.playing = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TICK: Duration = Duration::from_millis(250);

    #[test]
    fn paused_clock_is_silent() {
        let mut clock = SimulatedClock::new(Some(10.0));
        assert_eq!(clock.tick(TICK), None);
        assert_eq!(clock.position(), 0.0);
    }

    #[test]
    fn playing_clock_advances() {
        let mut clock = SimulatedClock::new(Some(10.0));
        clock.play();
        assert_eq!(clock.tick(TICK), Some(ClockEvent::Advance(0.25)));
        assert_eq!(clock.tick(TICK), Some(ClockEvent::Advance(0.5)));
    }

    #[test]
    fn seek_reports_one_jump_then_advances() {
        let mut clock = SimulatedClock::new(Some(10.0));
        clock.seek(4.0);
        clock.play();
        assert_eq!(clock.tick(TICK), Some(ClockEvent::Jump(4.0)));
        assert_eq!(clock.tick(TICK), Some(ClockEvent::Advance(4.25)));
    }

    #[test]
    fn seek_while_paused_still_jumps() {
        let mut clock = SimulatedClock::new(Some(10.0));
        clock.seek_by(-3.0);
        assert_eq!(clock.tick(TICK), Some(ClockEvent::Jump(0.0)));
        assert_eq!(clock.tick(TICK), None);
    }

    #[test]
    fn stops_at_duration_and_restarts_on_play() {
        let mut clock = SimulatedClock::new(Some(0.3));
        clock.play();
        assert_eq!(clock.tick(TICK), Some(ClockEvent::Advance(0.25)));
        assert_eq!(clock.tick(TICK), Some(ClockEvent::Advance(0.3)));
        assert!(!clock.is_playing());

        clock.play();
        assert_eq!(clock.position(), 0.0);
        assert_eq!(clock.tick(TICK), Some(ClockEvent::Jump(0.0)));
        assert_eq!(clock.tick(TICK), Some(ClockEvent::Advance(0.25)));
    }

    #[test]
    fn unknown_duration_never_ends() {
        let mut clock = SimulatedClock::new(None);
        clock.seek(1.0e6);
        clock.play();
        clock.tick(TICK);
        clock.tick(TICK);
        assert!(clock.is_playing());
        assert_eq!(clock.position(), 1.0e6 + 0.25);
    }

    #[test]
    fn non_finite_seek_is_ignored() {
        let mut clock = SimulatedClock::new(Some(10.0));
        clock.seek(f64::NAN);
        assert_eq!(clock.tick(TICK), None);
        assert_eq!(clock.position(), 0.0);
    }

    #[test]
    fn toggle_and_shrinking_duration() {
        let mut clock = SimulatedClock::new(None);
        clock.seek(8.0);
        clock.toggle();
        assert!(clock.is_playing());
        clock.set_duration(Some(5.0));
        assert_eq!(clock.position(), 5.0);
        clock.toggle();
        assert!(!clock.is_playing());
    }
}
