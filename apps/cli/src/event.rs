use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use tokio::sync::mpsc;

use crate::runtime::SessionEvent;

pub enum AppEvent {
    Key(KeyEvent),
    Session(SessionEvent),
    /// Wall time elapsed since the previous tick.
    Tick(Duration),
    Resize,
}

/// Funnels terminal input, clock ticks and session results into one queue so
/// the app processes exactly one event at a time.
pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<AppEvent>,
}

impl EventHandler {
    pub fn new(mut session_rx: mpsc::UnboundedReceiver<SessionEvent>, tick: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();

        let input_tx = tx.clone();
        std::thread::spawn(move || {
            loop {
                let app_event = match event::read() {
                    Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => AppEvent::Key(key),
                    Ok(Event::Resize(_, _)) => AppEvent::Resize,
                    Ok(_) => continue,
                    Err(e) => {
                        tracing::error!(error = %e, "terminal_event_read_failed");
                        break;
                    }
                };
                if input_tx.send(app_event).is_err() {
                    break;
                }
            }
        });

        let tick_tx = tx.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(tick);
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            let mut last = Instant::now();
            loop {
                interval.tick().await;
                let now = Instant::now();
                if tick_tx.send(AppEvent::Tick(now - last)).is_err() {
                    break;
                }
                last = now;
            }
        });

        tokio::spawn(async move {
            while let Some(event) = session_rx.recv().await {
                if tx.send(AppEvent::Session(event)).is_err() {
                    break;
                }
            }
        });

        Self { rx }
    }

    pub async fn next(&mut self) -> Option<AppEvent> {
        self.rx.recv().await
    }
}
