//! Play command implementation - local two-player TUI.

// The TUI uses intentional casts for layout and colours
#![allow(
    clippy::needless_pass_by_value,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]

use super::audio::Audio;
use super::{CliError, init_file_logging, load_config, resolve_seed};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        Block, Borders, Clear, Gauge, Paragraph,
        canvas::{Canvas, Points},
    },
};
use std::io::{Stdout, stdout};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::info;
use tugmath::cues::{Note, Sequencer, fanfare_length};
use tugmath::fireworks::Fireworks;
use tugmath::{GameEvent, Phase, Session, Slot, SlotStatus};

/// Target frame period.
const FRAME_MS: u64 = 16;

/// How long the rope panel shakes after a correct answer.
const SHAKE_MS: u64 = 300;

/// How long a slot's panel shows its pull after a correct answer.
const PULL_MS: u64 = 300;

/// Answer keys per slot, options left to right.
const KEYS: [[char; 3]; 2] = [['a', 's', 'd'], ['j', 'k', 'l']];

/// Execute the play command.
///
/// # Errors
///
/// Returns an error if the config is invalid or the terminal fails.
pub(crate) fn execute(
    config: Option<PathBuf>,
    seed: Option<u64>,
    log_file: Option<PathBuf>,
) -> Result<(), CliError> {
    if let Some(path) = &log_file {
        init_file_logging(path)?;
    }

    let config = load_config(config.as_deref())?;
    let seed = resolve_seed(seed);
    let session = Session::new(config, seed)?;
    let audio = Audio::open();
    info!(seed, ?config, audio = audio.is_some(), "play session created");

    run_tui(App::new(session, seed, audio))
}

/// Answer feedback shown until the slot gets its next problem.
#[derive(Debug, Clone, Copy)]
struct Flash {
    value: u32,
    correct: bool,
}

/// App state for the TUI.
struct App {
    session: Session,
    audio: Option<Audio>,
    started: Instant,
    /// Wall-clock ms of the frame being drawn.
    frame_ms: u64,
    last_tick_ms: u64,
    fireworks: Fireworks,
    terminal_size: (u16, u16),
    sky: (f64, f64),
    sequencer: Sequencer,
    note: Option<Note>,
    note_until_ms: u64,
    flashes: [Option<Flash>; 2],
    shake_until_ms: u64,
    pulled_until_ms: [u64; 2],
    revealed_at_ms: Option<u64>,
}

impl App {
    fn new(session: Session, seed: u64, audio: Option<Audio>) -> Self {
        Self {
            session,
            audio,
            started: Instant::now(),
            frame_ms: 0,
            last_tick_ms: 0,
            fireworks: Fireworks::new(160.0, 80.0, seed),
            terminal_size: (80, 20),
            sky: (160.0, 80.0),
            sequencer: Sequencer::new(),
            note: None,
            note_until_ms: 0,
            flashes: [None; 2],
            shake_until_ms: 0,
            pulled_until_ms: [0; 2],
            revealed_at_ms: None,
        }
    }

    /// Match the fireworks sky to the terminal's braille resolution.
    fn resize_sky(&mut self, width: u16, height: u16) {
        if (width, height) != self.terminal_size {
            self.terminal_size = (width, height);
            self.sky = (f64::from(width) * 2.0, f64::from(height) * 4.0);
            self.fireworks.resize(self.sky.0, self.sky.1);
        }
    }

    /// Advance the game clock and effects to the current wall time.
    fn update(&mut self) {
        let now = self.started.elapsed().as_millis() as u64;
        self.frame_ms = now;

        self.session.advance_to(now);
        for event in self.session.drain_events() {
            self.on_event(event);
        }

        if self.session.phase() == Phase::Playing
            && !self.sequencer.is_muted()
            && now >= self.note_until_ms
        {
            self.note = self.sequencer.next_note();
            if let (Some(audio), Some(note)) = (&self.audio, &self.note) {
                audio.play_note(note);
            }
            self.note_until_ms = now
                + self
                    .note
                    .map_or(FRAME_MS, |n| n.duration().as_millis() as u64);
        }

        while self.last_tick_ms + FRAME_MS <= now {
            self.fireworks.tick();
            self.last_tick_ms += FRAME_MS;
        }
    }

    fn on_event(&mut self, event: GameEvent) {
        let now = self.frame_ms;
        match event {
            GameEvent::PhaseChanged(Phase::Countdown) => {
                self.fireworks.stop();
                self.revealed_at_ms = None;
                self.flashes = [None; 2];
            }
            GameEvent::PhaseChanged(Phase::Playing) => {
                self.sequencer.restart();
                self.note_until_ms = now;
            }
            GameEvent::PhaseChanged(_) => self.note = None,
            GameEvent::ProblemChanged { slot, .. } => self.flashes[slot.index()] = None,
            GameEvent::AnswerJudged {
                slot,
                correct: true,
            } => {
                self.shake_until_ms = now + SHAKE_MS;
                self.pulled_until_ms[slot.index()] = now + PULL_MS;
                if let Some(audio) = self.sound() {
                    audio.play_cheer();
                }
            }
            GameEvent::WinnerRevealed(slot) => {
                info!(winner = %slot, "winner revealed");
                self.fireworks.start();
                self.revealed_at_ms = Some(now);
                if let Some(audio) = self.sound() {
                    audio.play_fanfare();
                }
            }
            GameEvent::AnswerJudged { correct: false, .. }
            | GameEvent::CountdownTick(_)
            | GameEvent::RopePositionChanged(_)
            | GameEvent::GameEnded(_) => {}
        }
    }

    /// Space / Enter: leave the start screen or play again.
    fn confirm(&mut self) {
        match self.session.phase() {
            Phase::Start => {
                self.session.begin();
            }
            Phase::End => {
                self.session.restart();
            }
            Phase::Countdown | Phase::Playing => {}
        }
    }

    fn answer(&mut self, slot: Slot, index: usize) {
        let Some(value) = self
            .session
            .slot(slot)
            .problem()
            .and_then(|p| p.options.get(index).copied())
        else {
            return;
        };
        if let Some(correct) = self.session.submit_answer(slot, value) {
            self.flashes[slot.index()] = Some(Flash { value, correct });
        }
    }

    fn toggle_mute(&mut self) {
        let muted = self.sequencer.toggle_mute();
        if muted {
            self.note = None;
        } else {
            self.note_until_ms = self.frame_ms;
        }
        info!(muted, "music toggled");
    }

    /// The output device, unless there is none or the player muted it.
    fn sound(&self) -> Option<&Audio> {
        self.audio.as_ref().filter(|_| !self.sequencer.is_muted())
    }

    fn is_pulling(&self, slot: Slot) -> bool {
        self.frame_ms < self.pulled_until_ms[slot.index()]
    }

    fn is_shaking(&self) -> bool {
        self.frame_ms < self.shake_until_ms
    }

    fn fanfare_playing(&self) -> bool {
        self.revealed_at_ms.is_some_and(|at| {
            self.frame_ms.saturating_sub(at) < fanfare_length().as_millis() as u64
        })
    }
}

/// Map a key to the slot and option it answers.
fn answer_key(c: char) -> Option<(Slot, usize)> {
    let c = c.to_ascii_lowercase();
    Slot::ALL.into_iter().find_map(|slot| {
        KEYS[slot.index()]
            .iter()
            .position(|&k| k == c)
            .map(|index| (slot, index))
    })
}

fn run_tui(mut app: App) -> Result<(), CliError> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
) -> Result<(), CliError> {
    loop {
        let size = terminal.size()?;
        app.resize_sky(size.width, size.height);
        app.update();

        terminal.draw(|f| ui(f, app))?;

        // Handle input with timeout
        if event::poll(Duration::from_millis(FRAME_MS))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => break,
                KeyCode::Char(' ') | KeyCode::Enter => app.confirm(),
                KeyCode::Char('m') => app.toggle_mute(),
                KeyCode::Char(c) => {
                    if let Some((slot, index)) = answer_key(c) {
                        app.answer(slot, index);
                    }
                }
                _ => {}
            }
        }
    }

    info!("play session closed");
    Ok(())
}

const fn slot_name(slot: Slot) -> &'static str {
    match slot {
        Slot::P1 => "BLUE",
        Slot::P2 => "RED",
    }
}

const fn slot_color(slot: Slot) -> Color {
    match slot {
        Slot::P1 => Color::Blue,
        Slot::P2 => Color::Red,
    }
}

fn ui(f: &mut Frame, app: &App) {
    if app.session.phase() == Phase::Start {
        render_start(f, f.area(), app);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(5), // Rope
            Constraint::Length(3), // Power
            Constraint::Min(9),    // Players
            Constraint::Length(3), // Footer
        ])
        .split(f.area());

    render_header(f, chunks[0], app);
    render_rope(f, chunks[1], app);
    render_power(f, chunks[2], app);

    let player_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[3]);
    for slot in Slot::ALL {
        render_player(f, player_chunks[slot.index()], app, slot);
    }

    render_footer(f, chunks[4], app);

    if let Some(label) = app.session.countdown_label() {
        let area = centered_rect(24, 5, f.area());
        let text = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                label.to_string(),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )),
        ])
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
        f.render_widget(Clear, area);
        f.render_widget(text, area);
    }

    if let (Some(winner), Some(_)) = (app.session.winner(), app.revealed_at_ms) {
        render_winner(f, f.area(), app, winner);
    }
}

fn render_start(f: &mut Frame, area: Rect, app: &App) {
    let config = app.session.config();
    let key_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "TUG OF MATH",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("Solve addition problems to pull the rope toward your side."),
        Line::from(format!(
            "A correct answer pulls {:.0}; a wrong one lets it slip {:.0} toward your opponent.",
            config.pull_strength, config.penalty_strength
        )),
        Line::from("Drag the knot into your zone to win."),
        Line::from(""),
        Line::from(vec![
            Span::styled(slot_name(Slot::P1), Style::default().fg(slot_color(Slot::P1))),
            Span::raw(": "),
            Span::styled("a s d", key_style),
            Span::raw("      "),
            Span::styled(slot_name(Slot::P2), Style::default().fg(slot_color(Slot::P2))),
            Span::raw(": "),
            Span::styled("j k l", key_style),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::raw("Press "),
            Span::styled("Space", key_style),
            Span::raw(" to start, "),
            Span::styled("q", key_style),
            Span::raw(" to quit"),
        ]),
    ];

    let start = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(start, area);
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let status = match app.session.phase() {
        Phase::Start => "READY".to_string(),
        Phase::Countdown => "GET READY".to_string(),
        Phase::Playing => "PULL!".to_string(),
        Phase::End => app
            .session
            .winner()
            .map_or_else(|| "GAME OVER".to_string(), |w| format!("{} WINS", slot_name(w))),
    };

    let music = if app.sequencer.is_muted() {
        "muted".to_string()
    } else {
        match app.note {
            Some(note) if !note.is_rest() => format!("♪ {:.0} Hz", note.freq_hz),
            Some(_) => "♪".to_string(),
            None => "-".to_string(),
        }
    };

    let title = format!(" Tug of Math | {status} | Music: {music} ");
    let header = Paragraph::new(title)
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL));

    f.render_widget(header, area);
}

fn render_rope(f: &mut Frame, area: Rect, app: &App) {
    // Jitter sideways by one column while shaking
    let area = if app.is_shaking() && (app.frame_ms / 40) % 2 == 0 {
        Rect {
            x: area.x + 1,
            width: area.width.saturating_sub(1),
            ..area
        }
    } else {
        Rect {
            width: area.width.saturating_sub(1),
            ..area
        }
    };

    let config = app.session.config();
    let position = app.session.rope_position();
    let width = usize::from(area.width.saturating_sub(2)).max(2);
    let last = (width - 1) as f64;
    let knot = ((position / 100.0) * last).round() as usize;
    let center = (last / 2.0).round() as usize;

    let spans: Vec<Span> = (0..width)
        .map(|col| {
            let at = col as f64 / last * 100.0;
            if col == knot {
                return Span::styled(
                    "●",
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                );
            }
            let color = if at <= config.p1_threshold() {
                slot_color(Slot::P1)
            } else if at >= config.p2_threshold() {
                slot_color(Slot::P2)
            } else {
                Color::Gray
            };
            let symbol = if col == center { "┼" } else { "═" };
            Span::styled(symbol, Style::default().fg(color))
        })
        .collect();

    let rope = Paragraph::new(vec![
        zone_labels(width),
        Line::from(spans),
        Line::from(format!("{position:.1}")).alignment(Alignment::Center),
    ])
    .block(Block::default().borders(Borders::ALL).title(" Rope "));

    f.render_widget(rope, area);
}

/// Zone names pinned to either end of a `width`-column line.
fn zone_labels(width: usize) -> Line<'static> {
    let left = format!("◀ {} zone", slot_name(Slot::P1));
    let right = format!("{} zone ▶", slot_name(Slot::P2));
    let gap = width.saturating_sub(left.chars().count() + right.chars().count());
    Line::from(vec![
        Span::styled(left, Style::default().fg(slot_color(Slot::P1))),
        Span::raw(" ".repeat(gap)),
        Span::styled(right, Style::default().fg(slot_color(Slot::P2))),
    ])
}

fn render_power(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    for slot in Slot::ALL {
        let power = app.session.power(slot);
        let gauge = Gauge::default()
            .block(Block::default().borders(Borders::ALL))
            .gauge_style(Style::default().fg(slot_color(slot)))
            .percent(u16::from(power))
            .label(format!("{} power {power}%", slot_name(slot)));
        f.render_widget(gauge, chunks[slot.index()]);
    }
}

fn render_player(f: &mut Frame, area: Rect, app: &App, slot: Slot) {
    let color = slot_color(slot);
    let state = app.session.slot(slot);
    let flash = app.flashes[slot.index()];
    let strained = app.session.rope().strains(slot);
    let pulling = app.is_pulling(slot);

    let mut title = format!(
        " {} [{}] ",
        slot_name(slot),
        KEYS[slot.index()].iter().collect::<String>()
    );
    if pulling {
        title.push_str("⚡ PULL! ");
    } else if strained {
        title.push_str("straining! ");
    }
    let border = if pulling {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else if strained {
        Style::default().fg(color).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(color)
    };

    let mut lines = vec![Line::from("")];
    match state.problem() {
        Some(problem) => {
            lines.push(Line::from(Span::styled(
                format!("{} + {} = ?", problem.operand_a, problem.operand_b),
                Style::default().add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(""));

            let locked = state.status() == SlotStatus::Locked;
            let mut options = Vec::new();
            for (i, value) in problem.options.iter().enumerate() {
                let style = match flash {
                    Some(shown) if shown.value == *value && shown.correct => {
                        Style::default().fg(Color::Black).bg(Color::Green)
                    }
                    Some(shown) if shown.value == *value => {
                        Style::default().fg(Color::Black).bg(Color::Red)
                    }
                    _ if locked => Style::default().fg(Color::DarkGray),
                    _ => Style::default().fg(Color::White),
                };
                let key = KEYS[slot.index()][i].to_ascii_uppercase();
                options.push(Span::styled(format!(" [{key}] {value} "), style));
                options.push(Span::raw("  "));
            }
            lines.push(Line::from(options));
            lines.push(Line::from(""));

            let status = match flash {
                Some(Flash { correct: true, .. }) => {
                    Span::styled("Correct!", Style::default().fg(Color::Green))
                }
                Some(Flash { correct: false, .. }) => {
                    Span::styled("Wrong!", Style::default().fg(Color::Red))
                }
                None if locked => Span::raw("..."),
                None => Span::styled("Pick an answer", Style::default().fg(Color::Gray)),
            };
            lines.push(Line::from(status));
        }
        None => lines.push(Line::from("Get ready...")),
    }

    let panel = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(Span::styled(title, border)),
    );
    f.render_widget(panel, area);
}

fn render_winner(f: &mut Frame, area: Rect, app: &App, winner: Slot) {
    let (width, height) = app.sky;
    let sky = Canvas::default()
        .marker(Marker::Braille)
        .x_bounds([0.0, width])
        .y_bounds([0.0, height])
        .paint(|ctx| {
            // Particles use y-down screen coordinates
            for rocket in app.fireworks.rockets() {
                ctx.draw(&Points {
                    coords: &[(rocket.x, height - rocket.y)],
                    color: hue_color(rocket.hue, 1.0),
                });
            }
            for spark in app.fireworks.sparks() {
                ctx.draw(&Points {
                    coords: &[(spark.x, height - spark.y)],
                    color: hue_color(spark.hue, spark.alpha),
                });
            }
        });
    f.render_widget(Clear, area);
    f.render_widget(sky, area);

    let title_style = if app.fanfare_playing() && (app.frame_ms / 150) % 2 == 0 {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
            .fg(slot_color(winner))
            .add_modifier(Modifier::BOLD)
    };

    let popup = centered_rect(40, 7, area);
    let text = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(format!("{} WINS!", slot_name(winner)), title_style)),
        Line::from(""),
        Line::from("Press Space to play again"),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(slot_color(winner))),
    );
    f.render_widget(Clear, popup);
    f.render_widget(text, popup);
}

fn render_footer(f: &mut Frame, area: Rect, app: &App) {
    let controls = match app.session.phase() {
        Phase::End => " [Space] Play again  [m] Mute  [q] Quit ",
        _ => " BLUE [a/s/d]  RED [j/k/l]  [m] Mute  [q] Quit ",
    };

    let footer = Paragraph::new(controls)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));

    f.render_widget(footer, area);
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Fully saturated colour for `hue`, dimmed by `brightness` in `[0, 1]`.
fn hue_color(hue: u16, brightness: f64) -> Color {
    let h = f64::from(hue % 360) / 60.0;
    let x = 1.0 - (h % 2.0 - 1.0).abs();
    let (r, g, b) = match h as u8 {
        0 => (1.0, x, 0.0),
        1 => (x, 1.0, 0.0),
        2 => (0.0, 1.0, x),
        3 => (0.0, x, 1.0),
        4 => (x, 0.0, 1.0),
        _ => (1.0, 0.0, x),
    };
    let scale = brightness.clamp(0.0, 1.0) * 255.0;
    Color::Rgb((r * scale) as u8, (g * scale) as u8, (b * scale) as u8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tugmath::Config;

    #[test]
    fn test_answer_keys() {
        assert_eq!(answer_key('a'), Some((Slot::P1, 0)));
        assert_eq!(answer_key('D'), Some((Slot::P1, 2)));
        assert_eq!(answer_key('k'), Some((Slot::P2, 1)));
        assert_eq!(answer_key('x'), None);
    }

    #[test]
    fn test_hue_color_primaries() {
        assert_eq!(hue_color(0, 1.0), Color::Rgb(255, 0, 0));
        assert_eq!(hue_color(120, 1.0), Color::Rgb(0, 255, 0));
        assert_eq!(hue_color(240, 1.0), Color::Rgb(0, 0, 255));
        assert_eq!(hue_color(240, 0.0), Color::Rgb(0, 0, 0));
    }

    #[test]
    fn test_centered_rect_clamps() {
        let area = Rect::new(0, 0, 10, 4);
        let r = centered_rect(40, 7, area);
        assert_eq!(r, area);
        let r = centered_rect(4, 2, area);
        assert_eq!(r, Rect::new(3, 1, 4, 2));
    }

    #[test]
    fn test_answer_flashes_and_locks() {
        let mut app = App::new(Session::new(Config::default(), 5).unwrap(), 5, None);
        app.confirm();
        app.session.advance_to(4000);
        app.session.drain_events();

        let answer = app.session.slot(Slot::P2).problem().unwrap().answer_index().unwrap();
        app.answer(Slot::P2, answer);
        assert!(app.flashes[Slot::P2.index()].is_some_and(|f| f.correct));
        assert_eq!(app.session.slot(Slot::P2).status(), SlotStatus::Locked);

        // Locked slots ignore further keys
        app.answer(Slot::P2, (answer + 1) % 3);
        assert!(app.flashes[Slot::P2.index()].is_some_and(|f| f.correct));
    }

    #[test]
    fn test_correct_answer_pulls_only_its_slot() {
        let mut app = App::new(Session::new(Config::default(), 6).unwrap(), 6, None);
        app.confirm();
        app.session.advance_to(4000);
        app.session.drain_events();

        let answer = app.session.slot(Slot::P1).problem().unwrap().answer_index().unwrap();
        app.answer(Slot::P1, answer);
        for event in app.session.drain_events() {
            app.on_event(event);
        }
        assert!(app.is_pulling(Slot::P1));
        assert!(!app.is_pulling(Slot::P2));
        assert!(app.is_shaking());

        app.frame_ms = PULL_MS;
        assert!(!app.is_pulling(Slot::P1));
    }

    #[test]
    fn test_zone_labels_fill_the_track() {
        for width in [21, 40, 117] {
            assert_eq!(zone_labels(width).width(), width);
        }
        assert!(zone_labels(10).width() > 10);
    }
}
