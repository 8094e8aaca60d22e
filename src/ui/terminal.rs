use crate::app::{mode::AppMode, App, RenderState};
use crate::ui::reader::view::{
    fraction_at_column, render_command_deck, render_context, render_message_line,
    render_placeholder, render_progress_bar, render_status_line, render_word_display,
};
use crate::ui::terminal_guard::TerminalGuard;
use crate::ui::theme::Theme;
use crossterm::event::{self, Event, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::Block,
    Frame, Terminal,
};
use std::io::{self, Stdout};
use std::time::{Duration, Instant};
use tracing::info;

/// Upper bound on how long the loop blocks, so status and spinner stay fresh.
const FRAME: Duration = Duration::from_millis(16);

pub struct TuiManager {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    theme: Theme,
    progress_area: Rect,
    _guard: TerminalGuard,
}

impl TuiManager {
    pub fn new(theme: Theme) -> Result<Self, io::Error> {
        let guard = TerminalGuard::new()?;
        let backend = CrosstermBackend::new(io::stdout());
        let terminal = Terminal::new(backend)?;

        Ok(TuiManager {
            terminal,
            theme,
            progress_area: Rect::default(),
            _guard: guard,
        })
    }

    /// Runs until the app asks to quit.
    ///
    /// The poll timeout is bounded by the scheduler's next deadline, so a
    /// word advances on time even when no input arrives.
    pub fn run_event_loop(&mut self, app: &mut App) -> io::Result<()> {
        info!("event loop started");
        loop {
            app.poll_transforms();
            app.tick(Instant::now());
            self.render_frame(app)?;

            if app.mode() == AppMode::Quit {
                info!("quit");
                return Ok(());
            }

            let timeout = app.poll_timeout(Instant::now(), FRAME);
            if event::poll(timeout)? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        app.handle_keypress(key.code, Instant::now());
                    }
                    Event::Mouse(mouse) => self.handle_mouse(app, mouse),
                    _ => {}
                }
            }
        }
    }

    fn handle_mouse(&self, app: &mut App, mouse: MouseEvent) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left)
            || mouse.row != self.progress_area.y
        {
            return;
        }
        if let Some(fraction) = fraction_at_column(mouse.column, self.progress_area) {
            app.seek_fraction(fraction, Instant::now());
        }
    }

    pub fn render_frame(&mut self, app: &App) -> io::Result<()> {
        let render_state = app.get_render_state();
        let theme = self.theme;
        let mut progress_area = Rect::default();

        self.terminal.draw(|frame| {
            progress_area = draw(frame, &render_state, &theme);
        })?;

        self.progress_area = progress_area;
        Ok(())
    }
}

/// Lays out one frame and returns where the progress bar went.
fn draw(frame: &mut Frame, state: &RenderState, theme: &Theme) -> Rect {
    let area = frame.area();
    frame.render_widget(
        Block::default().style(Style::default().bg(theme.background)),
        area,
    );

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(40),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(2),
        ])
        .split(area);

    match &state.word {
        Some(word) => {
            let word_display = render_word_display(word, state.font_size, rows[1].width, theme);
            frame.render_widget(word_display, rows[1]);

            let halves = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                .split(rows[2]);
            frame.render_widget(
                render_context(&state.context_left, Alignment::Right, theme),
                halves[0],
            );
            frame.render_widget(
                render_context(&state.context_right, Alignment::Left, theme),
                halves[1],
            );
        }
        None if state.source.is_none() => {
            let placeholder_area = Rect {
                y: rows[1].y,
                height: rows[1].height + rows[2].height + rows[3].height,
                ..rows[1]
            };
            frame.render_widget(render_placeholder(theme), placeholder_area);
        }
        None => {}
    }

    let progress_area = rows[4];
    frame.render_widget(
        render_progress_bar(state.progress, progress_area.width, theme),
        progress_area,
    );
    frame.render_widget(render_status_line(state, theme), rows[5]);
    frame.render_widget(render_message_line(state, theme), rows[6]);
    render_command_deck(frame, rows[7], state, theme);

    progress_area
}
