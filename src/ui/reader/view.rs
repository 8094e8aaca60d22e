use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use crate::app::mode::AppMode;
use crate::app::render_state::{RenderState, StatusKind, WordParts};
use crate::reading::PlaybackPhase;
use crate::ui::theme::Theme;

/// Blank cells inserted between graphemes for a given font size.
///
/// A cell terminal cannot scale glyphs, so size is rendered as letter
/// tracking: 1.0 is tight, every 2.0 above adds one cell.
pub fn tracking_for_font_size(font_size: f32) -> usize {
    if !font_size.is_finite() || font_size <= 1.0 {
        return 0;
    }
    ((font_size - 1.0) / 2.0).round() as usize
}

fn track(text: &str, tracking: usize) -> String {
    let gap = " ".repeat(tracking);
    text.graphemes(true).collect::<Vec<_>>().join(&gap)
}

/// Column at which the word line must start so the pivot sits at the centre.
pub fn pivot_start_column(word: &WordParts, tracking: usize, width: u16) -> u16 {
    let center_col = width / 2;
    let mut prefix = track(&word.left, tracking);
    if !word.left.is_empty() {
        prefix.push_str(&" ".repeat(tracking));
    }
    let prefix_width = UnicodeWidthStr::width(prefix.as_str()) as u16;
    center_col.saturating_sub(prefix_width)
}

pub fn render_word_line(
    word: &WordParts,
    font_size: f32,
    width: u16,
    theme: &Theme,
) -> Line<'static> {
    let tracking = tracking_for_font_size(font_size);
    let gap = " ".repeat(tracking);
    let start = pivot_start_column(word, tracking, width) as usize;
    let text_style = Style::default().fg(theme.text);

    let mut spans = vec![Span::raw(" ".repeat(start))];
    if !word.left.is_empty() {
        spans.push(Span::styled(track(&word.left, tracking) + &gap, text_style));
    }
    spans.push(Span::styled(
        word.pivot.clone(),
        Style::default()
            .fg(theme.anchor)
            .add_modifier(Modifier::BOLD),
    ));
    if !word.right.is_empty() {
        spans.push(Span::styled(gap + &track(&word.right, tracking), text_style));
    }
    Line::from(spans)
}

pub fn render_word_display(
    word: &WordParts,
    font_size: f32,
    width: u16,
    theme: &Theme,
) -> Paragraph<'static> {
    Paragraph::new(render_word_line(word, font_size, width, theme))
        .alignment(Alignment::Left)
        .style(Style::default().bg(theme.background))
}

pub fn render_progress_bar(progress: (usize, usize), width: u16, theme: &Theme) -> Line<'static> {
    let (current, total) = progress;
    let ratio = if total == 0 {
        0.0
    } else {
        (current as f64 / total as f64).clamp(0.0, 1.0)
    };

    let filled_len = (ratio * width as f64).round() as usize;
    let empty_len = (width as usize).saturating_sub(filled_len);

    Line::from(vec![
        Span::styled("━".repeat(filled_len), Style::default().fg(theme.anchor)),
        Span::styled("─".repeat(empty_len), Style::default().fg(theme.dimmed)),
    ])
}

/// Fraction of the bar at `column`, or `None` outside the bar.
pub fn fraction_at_column(column: u16, bar: Rect) -> Option<f64> {
    if bar.width == 0 || column < bar.x || column >= bar.x + bar.width {
        return None;
    }
    Some((column - bar.x) as f64 / bar.width as f64)
}

pub fn phase_label(phase: PlaybackPhase) -> &'static str {
    match phase {
        PlaybackPhase::Idle => "READY",
        PlaybackPhase::Playing => "PLAYING",
        PlaybackPhase::Paused => "PAUSED",
        PlaybackPhase::Finished => "FINISHED",
    }
}

pub fn format_remaining(secs: u64) -> String {
    if secs >= 60 {
        format!("{}m {:02}s", secs / 60, secs % 60)
    } else {
        format!("{}s", secs)
    }
}

pub fn render_status_line(state: &RenderState, theme: &Theme) -> Line<'static> {
    let (current, total) = state.progress;
    let mut text = format!(
        " {} · {} wpm · size {:.1} · {}/{} · ~{} left",
        phase_label(state.phase),
        state.wpm,
        state.font_size,
        current,
        total,
        format_remaining(state.remaining_secs)
    );
    if let Some(source) = &state.source {
        text.push_str(" · ");
        text.push_str(source);
    }
    if state.generating {
        text.push_str(" · generating…");
    }
    Line::from(Span::styled(text, Style::default().fg(theme.dimmed)))
}

pub fn render_message_line(state: &RenderState, theme: &Theme) -> Line<'static> {
    match &state.status {
        Some(status) => {
            let color = match status.kind {
                StatusKind::Info => theme.text,
                StatusKind::Error => theme.anchor,
            };
            Line::from(Span::styled(
                format!(" {}", status.text),
                Style::default().fg(color),
            ))
        }
        None => Line::default(),
    }
}

pub fn render_context(words: &[String], alignment: Alignment, theme: &Theme) -> Paragraph<'static> {
    Paragraph::new(words.join(" "))
        .alignment(alignment)
        .style(Style::default().fg(theme.dimmed).bg(theme.background))
}

pub fn render_placeholder(theme: &Theme) -> Paragraph<'static> {
    let text = "Type @filename to load a file\nOr @@ to load from clipboard\n\
                :gen <topic> to generate text\n:q to quit";
    Paragraph::new(text)
        .alignment(Alignment::Center)
        .style(Style::default().fg(theme.dimmed).bg(theme.background))
}

pub fn render_command_deck(frame: &mut Frame, area: Rect, state: &RenderState, theme: &Theme) {
    frame.render_widget(Clear, area);

    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(area);

    let accent_bar =
        Paragraph::new("▌").style(Style::default().fg(theme.anchor).bg(theme.background));
    frame.render_widget(accent_bar, layout[0]);

    let input_text = match state.mode {
        AppMode::Command if state.command_input.is_empty() => {
            " COMMAND  @file · @@ · :sum · :opt · :gen topic · :wpm n · :q".to_string()
        }
        AppMode::Command => format!(" COMMAND  {}▏", state.command_input),
        AppMode::Reading => " READING  : for commands · ? for keys".to_string(),
        AppMode::Quit => " QUIT".to_string(),
    };

    let input_widget = Paragraph::new(input_text)
        .block(
            Block::default()
                .borders(Borders::TOP)
                .border_style(Style::default().fg(theme.dimmed)),
        )
        .style(Style::default().fg(theme.text).bg(theme.background));

    frame.render_widget(input_widget, layout[1]);
}
