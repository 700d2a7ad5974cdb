mod app;
mod clock;
mod event;
mod runtime;
mod session;
mod ui;

use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

use crate::{
    app::{App, Command},
    event::{AppEvent, EventHandler},
    runtime::IngestRuntime,
};
use clap::Parser;
use hypr_ingest::{IngestClient, ReqwestHttpClient};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "ytsync",
    about = "Play a processed video with its transcript highlighted word by word"
)]
struct Cli {
    /// Video URL to submit on start-up.
    url: Option<String>,

    #[arg(long, env = "YTSYNC_BASE_URL", default_value = "http://127.0.0.1:5000")]
    base_url: url::Url,

    /// Processing a long video can take minutes.
    #[arg(long, env = "YTSYNC_TIMEOUT_SECS", default_value_t = 600)]
    timeout_secs: u64,

    #[arg(long, env = "YTSYNC_TICK_MS", default_value_t = 100)]
    tick_ms: u64,

    #[arg(long, env = "YTSYNC_LOG_FILE")]
    log_file: Option<PathBuf>,
}

fn init_tracing(path: PathBuf) {
    let file = match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
    {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Failed to open log file {}: {e}", path.display());
            return;
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
}

fn setup_panic_hook() {
    let original = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        ratatui::restore();
        original(info);
    }));
}

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    init_tracing(
        cli.log_file
            .unwrap_or_else(|| std::env::temp_dir().join("ytsync.log")),
    );

    let http = match ReqwestHttpClient::new(cli.base_url, Duration::from_secs(cli.timeout_secs)) {
        Ok(http) => http,
        Err(e) => {
            eprintln!("Failed to build HTTP client: {e}");
            std::process::exit(1);
        }
    };
    tracing::info!(api_base = %http.api_base(), "ytsync_started");

    let (session_tx, session_rx) = tokio::sync::mpsc::unbounded_channel();
    let runtime = IngestRuntime::new(IngestClient::new(http), session_tx);

    let mut app = App::new();
    if let Some(url) = cli.url {
        app.input = url.clone();
        if let Some(Command::Submit(reference)) = app.submit(&url) {
            runtime.spawn_submission(reference);
        }
    }

    setup_panic_hook();
    let mut terminal = ratatui::init();
    let mut events = EventHandler::new(session_rx, Duration::from_millis(cli.tick_ms.max(1)));

    loop {
        terminal.draw(|frame| ui::draw(frame, &mut app)).ok();

        let command = match events.next().await {
            Some(AppEvent::Key(key)) => app.handle_key(key),
            Some(AppEvent::Session(event)) => app.handle_session_event(event),
            Some(AppEvent::Tick(elapsed)) => {
                app.on_tick(elapsed);
                None
            }
            Some(AppEvent::Resize) => None,
            None => break,
        };

        if let Some(Command::Submit(reference)) = command {
            runtime.spawn_submission(reference);
        }

        if app.should_quit {
            break;
        }
    }

    ratatui::restore();
}
