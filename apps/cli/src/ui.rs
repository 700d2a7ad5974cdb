use hypr_transcript_sync::{ScrollBehavior, SyncFrame, Token};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::app::{App, Mode};
use crate::session::SubmissionQueue;

/// Vertical scroll of the transcript pane, in wrapped lines.
#[derive(Debug, Default)]
pub struct ScrollState {
    offset: usize,
    target: Option<(usize, ScrollBehavior)>,
}

impl ScrollState {
    pub fn request(&mut self, index: usize, behavior: ScrollBehavior) {
        self.target = Some((index, behavior));
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn target_index(&self) -> Option<usize> {
        self.target.map(|(index, _)| index)
    }

    /// Move one frame toward centering the requested token. `line` is the
    /// wrapped line holding that token. Immediate requests land at once;
    /// smooth ones cover half the remaining distance per frame.
    pub fn step(&mut self, line: Option<usize>, height: usize, total_lines: usize) {
        let max_offset = total_lines.saturating_sub(height);
        self.offset = self.offset.min(max_offset);

        let Some((_, behavior)) = self.target else {
            return;
        };
        let Some(line) = line else {
            self.target = None;
            return;
        };

        let desired = line.saturating_sub(height / 2).min(max_offset);
        match behavior {
            ScrollBehavior::Immediate => self.offset = desired,
            ScrollBehavior::Smooth => {
                let step = desired.abs_diff(self.offset).div_ceil(2);
                if desired > self.offset {
                    self.offset += step;
                } else {
                    self.offset -= step;
                }
            }
        }

        if self.offset == desired {
            self.target = None;
        }
    }
}

/// Greedy word wrap. Returns token indices per line; a token wider than
/// `width` gets a line of its own.
pub fn layout_lines(tokens: &[Token], width: usize) -> Vec<Vec<usize>> {
    let mut lines = Vec::new();
    let mut current: Vec<usize> = Vec::new();
    let mut used = 0;

    for (i, token) in tokens.iter().enumerate() {
        let w = Span::raw(token.text.as_str()).width().max(1);
        if !current.is_empty() && used + 1 + w > width {
            lines.push(std::mem::take(&mut current));
            used = 0;
        }
        used += if current.is_empty() { w } else { w + 1 };
        current.push(i);
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

pub fn draw(frame: &mut Frame, app: &mut App) {
    let [header_area, media_area, body_area, notice_area, input_area, hint_area] =
        Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(frame.area());

    render_header(frame, app, header_area);
    render_media(frame, app, media_area);
    render_transcript(frame, app, body_area);
    render_notice(frame, app, notice_area);
    render_input(frame, app, input_area);
    render_hints(frame, app, hint_area);
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    use hypr_transcript_sync::MediaClock;

    let title = app
        .video
        .as_ref()
        .map(|v| v.video.title.as_str())
        .unwrap_or("ytsync");
    let status = if app.clock.is_playing() {
        "▶ PLAYING"
    } else {
        "⏸ PAUSED"
    };
    let duration = app
        .clock
        .duration()
        .map(format_time)
        .unwrap_or_else(|| "--:--".to_string());

    let mut text = format!(
        " {} | {} | {} / {} ",
        title,
        status,
        format_time(app.clock.position()),
        duration
    );
    if let Some(status) = loading_status(&app.queue) {
        text.push_str(&format!("| {status} "));
    }

    frame.render_widget(
        Paragraph::new(text).style(Style::default().fg(Color::DarkGray)),
        area,
    );
}

fn render_media(frame: &mut Frame, app: &App, area: Rect) {
    let Some(url) = app.video.as_ref().and_then(|v| v.media_url.as_deref()) else {
        return;
    };
    frame.render_widget(
        Paragraph::new(format!(" media: {url}")).style(Style::default().fg(Color::DarkGray)),
        area,
    );
}

fn render_transcript(frame: &mut Frame, app: &mut App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(
            " transcript ",
            Style::default().fg(Color::DarkGray),
        ));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let placeholder = if app.video.is_none() {
        Some(if app.is_loading() {
            "Processing video..."
        } else {
            "Enter a YouTube URL below and press Enter."
        })
    } else if !app.view.is_loaded() {
        Some("Loading transcript...")
    } else {
        None
    };

    let data = app.view.frame();
    let placeholder = placeholder.or(if data.has_transcript {
        None
    } else {
        Some("No transcript data available.")
    });

    if let Some(text) = placeholder {
        frame.render_widget(
            Paragraph::new(text).style(Style::default().fg(Color::DarkGray)),
            inner,
        );
        return;
    }

    let cursor = (app.mode == Mode::Select).then_some(app.cursor);
    let lines = layout_lines(&data.tokens, inner.width.max(1) as usize);
    let target_line = app
        .scroll
        .target_index()
        .and_then(|index| lines.iter().position(|line| line.contains(&index)));
    app.scroll
        .step(target_line, inner.height as usize, lines.len());

    let visible: Vec<Line> = lines
        .iter()
        .skip(app.scroll.offset())
        .take(inner.height as usize)
        .map(|line| render_line(&data, line, cursor))
        .collect();

    frame.render_widget(Paragraph::new(visible), inner);
}

fn render_line<'a>(data: &'a SyncFrame, line: &[usize], cursor: Option<usize>) -> Line<'a> {
    let mut spans = Vec::with_capacity(line.len() * 2);
    for (n, &index) in line.iter().enumerate() {
        if n > 0 {
            spans.push(Span::raw(" "));
        }

        let mut style = Style::default();
        if data.active_index == Some(index) {
            style = style
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD);
        }
        if cursor == Some(index) {
            style = style.add_modifier(Modifier::UNDERLINED | Modifier::REVERSED);
        }
        spans.push(Span::styled(data.tokens[index].text.as_str(), style));
    }
    Line::from(spans)
}

fn render_notice(frame: &mut Frame, app: &App, area: Rect) {
    if let Some(notice) = &app.notice {
        frame.render_widget(
            Paragraph::new(format!(" {notice}")).style(Style::default().fg(Color::Red)),
            area,
        );
    }
}

fn render_input(frame: &mut Frame, app: &App, area: Rect) {
    let prompt = " url> ";
    let style = if app.mode == Mode::Input {
        Style::default()
    } else {
        Style::default().fg(Color::DarkGray)
    };
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(prompt, Style::default().fg(Color::DarkGray)),
            Span::styled(app.input.as_str(), style),
        ])),
        area,
    );

    if app.mode == Mode::Input {
        let x = area.x + (prompt.len() + Span::raw(app.input.as_str()).width()) as u16;
        frame.set_cursor_position(Position::new(x.min(area.right().saturating_sub(1)), area.y));
    }
}

fn render_hints(frame: &mut Frame, app: &App, area: Rect) {
    let hints = match app.mode {
        Mode::Input => " [enter] submit  [esc] back  [ctrl-c] quit",
        Mode::Player => {
            " [space] play/pause  [←/→] seek 5s  [home] start  [s] select word  [u] new url  [q] quit"
        }
        Mode::Select => " [←/→] move  [home/end] first/last  [enter] jump  [esc] back",
    };
    frame.render_widget(
        Paragraph::new(hints).style(Style::default().fg(Color::DarkGray)),
        area,
    );
}

fn loading_status(queue: &SubmissionQueue) -> Option<String> {
    let current = queue.in_flight()?;
    Some(match queue.pending() {
        Some(next) => format!("Processing {current}... (next: {next})"),
        None => format!("Processing {current}..."),
    })
}

fn format_time(seconds: f64) -> String {
    let total = seconds.max(0.0) as u64;
    format!("{:02}:{:02}", total / 60, total % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(words: &[&str]) -> Vec<Token> {
        words
            .iter()
            .enumerate()
            .map(|(i, w)| Token::new(*w, i as f64, i as f64 + 0.5))
            .collect()
    }

    #[test]
    fn wraps_on_word_boundaries() {
        let lines = layout_lines(&tokens(&["aa", "bb", "cc", "dd"]), 5);
        assert_eq!(lines, vec![vec![0, 1], vec![2, 3]]);
    }

    #[test]
    fn oversized_word_gets_own_line() {
        let lines = layout_lines(&tokens(&["a", "abcdefgh", "b"]), 4);
        assert_eq!(lines, vec![vec![0], vec![1], vec![2]]);
    }

    #[test]
    fn empty_transcript_has_no_lines() {
        assert!(layout_lines(&[], 10).is_empty());
    }

    #[test]
    fn immediate_scroll_centers_target() {
        let mut scroll = ScrollState::default();
        scroll.request(0, ScrollBehavior::Immediate);
        scroll.step(Some(20), 10, 50);
        assert_eq!(scroll.offset(), 15);
        assert_eq!(scroll.target_index(), None);
    }

    #[test]
    fn smooth_scroll_converges() {
        let mut scroll = ScrollState::default();
        scroll.request(0, ScrollBehavior::Smooth);

        scroll.step(Some(20), 10, 50);
        assert_eq!(scroll.offset(), 8);
        assert!(scroll.target_index().is_some());

        for _ in 0..10 {
            scroll.step(Some(20), 10, 50);
        }
        assert_eq!(scroll.offset(), 15);
        assert_eq!(scroll.target_index(), None);
    }

    #[test]
    fn scroll_is_clamped_to_content() {
        let mut scroll = ScrollState::default();
        scroll.request(0, ScrollBehavior::Immediate);
        scroll.step(Some(11), 10, 12);
        assert_eq!(scroll.offset(), 2);

        scroll.step(None, 10, 5);
        assert_eq!(scroll.offset(), 0);
    }

    #[test]
    fn loading_status_names_current_and_parked_urls() {
        let mut queue = SubmissionQueue::default();
        assert_eq!(loading_status(&queue), None);

        queue.request("https://youtu.be/a".into());
        assert_eq!(
            loading_status(&queue).as_deref(),
            Some("Processing https://youtu.be/a...")
        );

        queue.request("https://youtu.be/b".into());
        assert_eq!(
            loading_status(&queue).as_deref(),
            Some("Processing https://youtu.be/a... (next: https://youtu.be/b)")
        );
    }

    #[test]
    fn time_format() {
        assert_eq!(format_time(0.0), "00:00");
        assert_eq!(format_time(75.9), "01:15");
        assert_eq!(format_time(-3.0), "00:00");
    }
}
