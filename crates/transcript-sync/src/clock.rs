/// Position notification from the media clock.
///
/// The clock decides the classification: every `timeupdate`-style tick is an
/// `Advance`, and only an explicit seek completion is a `Jump`. Consumers must
/// not reclassify based on how far the position moved, otherwise small
/// backward jitter would be treated as a seek.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[cfg_attr(feature = "specta", derive(specta::Type))]
#[serde(tag = "type", content = "position", rename_all = "snake_case")]
pub enum ClockEvent {
    Advance(f64),
    Jump(f64),
}

impl ClockEvent {
    pub fn position(&self) -> f64 {
        match self {
            Self::Advance(t) | Self::Jump(t) => *t,
        }
    }
}

/// Control surface of the media playback element.
///
/// Implementations report the effect of `seek` back through a later
/// [`ClockEvent::Jump`]; the sync controller never assumes a seek landed.
pub trait MediaClock {
    fn position(&self) -> f64;
    fn seek(&mut self, position: f64);
    fn play(&mut self);
}

impl<C: MediaClock + ?Sized> MediaClock for &mut C {
    fn position(&self) -> f64 {
        (**self).position()
    }

    fn seek(&mut self, position: f64) {
        (**self).seek(position)
    }

    fn play(&mut self) {
        (**self).play()
    }
}
