// Interactive terminal - boot banner, masked prompt, query results
// An append-only scrollback of styled lines, a live prompt, and a
// status bar with key hints.

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};
use std::io;
use std::time::{Duration, Instant};

use crate::clipboard::copy_to_clipboard;
use crate::history::CommandHistory;
use crate::mask::InputFormatter;
use crate::render::{DisplayMode, LineStyle, StyledLine};
use crate::session::{Outcome, Session};

/// Simulated network delay before a result appears.
const LOOKUP_DELAY: Duration = Duration::from_millis(500);
/// How long the transient copy status label stays up.
const COPY_STATUS_TTL: Duration = Duration::from_millis(2500);
/// Terminals at or below this width get the narrow (list) layout.
const NARROW_WIDTH: u16 = 80;

// ============================================================================
// LAYOUT MODE & INPUT SURFACES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutMode {
    Wide,
    Narrow,
}

pub fn layout_mode(width: u16) -> LayoutMode {
    if width <= NARROW_WIDTH {
        LayoutMode::Narrow
    } else {
        LayoutMode::Wide
    }
}

impl LayoutMode {
    pub fn display_mode(self) -> DisplayMode {
        match self {
            LayoutMode::Wide => DisplayMode::Table,
            LayoutMode::Narrow => DisplayMode::List,
        }
    }
}

/// One logical active input with two concrete presentations: the wide
/// layout draws the prompt inline with the scrollback, the narrow one
/// a dedicated bar at the bottom (label on its own line above it).
trait InputSurface {
    /// Rows reserved below the scrollback for this surface.
    fn bar_height(&self) -> u16;

    /// Prompt line appended to the scrollback, if this surface is inline.
    fn inline_prompt(&self, label: &str, text: &str) -> Option<Line<'static>>;

    /// Draw the dedicated bar area (inline surfaces draw nothing).
    fn render_bar(&self, f: &mut Frame, area: Rect, label: &str, text: &str);
}

struct InlinePrompt;

impl InputSurface for InlinePrompt {
    fn bar_height(&self) -> u16 {
        0
    }

    fn inline_prompt(&self, label: &str, text: &str) -> Option<Line<'static>> {
        Some(Line::from(vec![
            Span::styled(format!("{} ", label), Style::default().fg(Color::Cyan)),
            Span::raw(text.to_string()),
            Span::styled("█", Style::default().fg(Color::Green)),
        ]))
    }

    fn render_bar(&self, _f: &mut Frame, _area: Rect, _label: &str, _text: &str) {}
}

struct BottomBar;

impl InputSurface for BottomBar {
    fn bar_height(&self) -> u16 {
        4
    }

    fn inline_prompt(&self, _label: &str, _text: &str) -> Option<Line<'static>> {
        None
    }

    fn render_bar(&self, f: &mut Frame, area: Rect, label: &str, text: &str) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Length(3)])
            .split(area);

        let label_line = Paragraph::new(Line::from(Span::styled(
            label.to_string(),
            Style::default().fg(Color::Cyan),
        )));
        f.render_widget(label_line, rows[0]);

        let bar = Paragraph::new(Line::from(vec![
            Span::styled("> ", Style::default().fg(Color::Green)),
            Span::raw(text.to_string()),
            Span::styled("█", Style::default().fg(Color::Green)),
        ]))
        .block(Block::default().borders(Borders::ALL));
        f.render_widget(bar, rows[1]);
    }
}

fn surface_for(mode: LayoutMode) -> &'static dyn InputSurface {
    match mode {
        LayoutMode::Wide => &InlinePrompt,
        LayoutMode::Narrow => &BottomBar,
    }
}

// ============================================================================
// INPUT STATE
// ============================================================================

/// Current prompt text, re-masked through the formatter on every edit.
#[derive(Default)]
pub struct InputState {
    text: String,
    formatter: InputFormatter,
}

impl InputState {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn insert(&mut self, c: char) {
        self.text.push(c);
        self.reformat();
    }

    pub fn backspace(&mut self) {
        self.text.pop();
        self.reformat();
    }

    pub fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
        self.reformat();
    }

    pub fn take(&mut self) -> String {
        std::mem::take(&mut self.text)
    }

    fn reformat(&mut self) {
        // None means a reformat is already rewriting this field; the
        // guard keeps the change notification from recursing.
        if let Some(masked) = self.formatter.apply(&self.text) {
            self.text = masked;
        }
    }
}

// ============================================================================
// APP
// ============================================================================

enum Phase {
    Booting { next: usize, due: Instant },
    Prompt,
    Waiting { cnpj: String, due: Instant },
}

struct CopyStatus {
    label: String,
    error: bool,
    until: Instant,
}

pub struct App {
    session: Session,
    boot_lines: Vec<(StyledLine, u64)>,
    scrollback: Vec<StyledLine>,
    input: InputState,
    history: CommandHistory,
    phase: Phase,
    copy_text: Option<String>,
    copy_status: Option<CopyStatus>,
    should_quit: bool,
}

impl App {
    pub fn new() -> Self {
        let session = Session::new();
        let boot_lines = session.boot_sequence();
        let first_due = Instant::now() + Duration::from_millis(boot_lines[0].1);

        App {
            session,
            boot_lines,
            scrollback: Vec::new(),
            input: InputState::default(),
            history: CommandHistory::new(),
            phase: Phase::Booting {
                next: 0,
                due: first_due,
            },
            copy_text: None,
            copy_status: None,
            should_quit: false,
        }
    }

    /// CTRL+R: clear everything and replay the boot sequence.
    fn restart(&mut self) {
        *self = App::new();
    }

    /// Advance timed state: boot lines, pending lookups, label expiry.
    fn tick(&mut self, now: Instant, mode: LayoutMode) {
        match &mut self.phase {
            Phase::Booting { next, due } => {
                while *next < self.boot_lines.len() && now >= *due {
                    let (line, _) = self.boot_lines[*next].clone();
                    self.scrollback.push(line);
                    *next += 1;
                    if *next < self.boot_lines.len() {
                        // Relative to the previous deadline so a late tick
                        // can drain several lines at once
                        *due += Duration::from_millis(self.boot_lines[*next].1);
                    }
                }
                if *next >= self.boot_lines.len() {
                    self.phase = Phase::Prompt;
                }
            }
            Phase::Waiting { cnpj, due } => {
                if now >= *due {
                    let cnpj = cnpj.clone();
                    self.finish_query(&cnpj, mode);
                }
            }
            Phase::Prompt => {}
        }

        if let Some(status) = &self.copy_status {
            if now >= status.until {
                self.copy_status = None;
            }
        }
    }

    fn finish_query(&mut self, cnpj: &str, mode: LayoutMode) {
        match self.session.run_query(cnpj, mode.display_mode()) {
            Ok(output) => {
                self.scrollback.extend(output.lines);
                self.copy_text = Some(output.copy_text);
            }
            Err(err) => {
                self.scrollback
                    .push(StyledLine::error(format!("Erro na consulta: {}", err)));
            }
        }
        self.phase = Phase::Prompt;
    }

    fn skip_boot(&mut self) {
        if let Phase::Booting { next, .. } = self.phase {
            for (line, _) in self.boot_lines[next..].iter() {
                self.scrollback.push(line.clone());
            }
            self.phase = Phase::Prompt;
        }
    }

    fn submit(&mut self) {
        let command = self.input.take().trim().to_string();

        // Freeze the prompt line into the scrollback
        self.scrollback.push(StyledLine::plain(format!(
            "{} {}",
            self.session.prompt_label(),
            command
        )));

        if !command.is_empty() {
            self.history.push(&command);
        }

        match self.session.submit(&command) {
            Outcome::Reprompt => {}
            Outcome::Rejected(lines) => self.scrollback.extend(lines),
            Outcome::Accepted { cnpj, progress } => {
                self.scrollback.push(progress);
                self.phase = Phase::Waiting {
                    cnpj,
                    due: Instant::now() + LOOKUP_DELAY,
                };
            }
        }
    }

    fn copy_result(&mut self) {
        let Some(text) = &self.copy_text else {
            return;
        };
        let (label, error) = match copy_to_clipboard(text) {
            Ok(()) => ("Copiado para a área de transferência!".to_string(), false),
            Err(_) => ("Erro ao copiar!".to_string(), true),
        };
        self.copy_status = Some(CopyStatus {
            label,
            error,
            until: Instant::now() + COPY_STATUS_TTL,
        });
    }

    fn handle_key(&mut self, key: KeyEvent) {
        // Global shortcuts first
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('c') => {
                    self.should_quit = true;
                    return;
                }
                KeyCode::Char('r') => {
                    self.restart();
                    return;
                }
                KeyCode::Char('y') => {
                    self.copy_result();
                    return;
                }
                _ => {}
            }
        }
        // Esc quits only while no prompt is being edited; Ctrl+C is the
        // unconditional way out
        if key.code == KeyCode::Esc {
            if !matches!(self.phase, Phase::Prompt) {
                self.should_quit = true;
            }
            return;
        }

        match self.phase {
            Phase::Booting { .. } => match key.code {
                // Enter skips the boot animation
                KeyCode::Enter => self.skip_boot(),
                KeyCode::Char('q') => self.should_quit = true,
                _ => {}
            },
            Phase::Waiting { .. } => {
                if key.code == KeyCode::Char('q') {
                    self.should_quit = true;
                }
            }
            Phase::Prompt => match key.code {
                KeyCode::Enter => self.submit(),
                KeyCode::Backspace => self.input.backspace(),
                KeyCode::Up => {
                    if let Some(recalled) = self.history.up().map(str::to_string) {
                        self.input.set_text(&recalled);
                    }
                }
                KeyCode::Down => {
                    if let Some(recalled) = self.history.down().map(str::to_string) {
                        self.input.set_text(&recalled);
                    }
                }
                KeyCode::Char(c) => self.input.insert(c),
                _ => {}
            },
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TERMINAL LOOP
// ============================================================================

pub fn run_ui(app: &mut App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app
    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        let mode = layout_mode(terminal.size()?.width);
        app.tick(Instant::now(), mode);

        terminal.draw(|f| ui(f, app))?;

        if app.should_quit {
            return Ok(());
        }

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                app.handle_key(key);
            }
        }
    }
}

// ============================================================================
// RENDERING
// ============================================================================

fn style_for(style: LineStyle) -> Style {
    match style {
        LineStyle::Plain => Style::default().fg(Color::White),
        LineStyle::Info => Style::default().fg(Color::Cyan),
        LineStyle::Success => Style::default().fg(Color::Green),
        LineStyle::Comment => Style::default().fg(Color::DarkGray),
        LineStyle::Error => Style::default().fg(Color::Red),
    }
}

fn ui(f: &mut Frame, app: &App) {
    let mode = layout_mode(f.size().width);
    let surface = surface_for(mode);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),                       // Scrollback
            Constraint::Length(surface.bar_height()), // Input bar (narrow only)
            Constraint::Length(3),                    // Status bar
        ])
        .split(f.size());

    render_scrollback(f, chunks[0], app, surface);

    if matches!(app.phase, Phase::Prompt) {
        surface.render_bar(f, chunks[1], app.session.prompt_label(), app.input.text());
    }

    render_status_bar(f, chunks[2], app);
}

fn render_scrollback(f: &mut Frame, area: Rect, app: &App, surface: &dyn InputSurface) {
    let mut lines: Vec<Line> = app
        .scrollback
        .iter()
        .map(|l| Line::from(Span::styled(l.text.clone(), style_for(l.style))))
        .collect();

    if matches!(app.phase, Phase::Prompt) {
        if let Some(prompt) = surface.inline_prompt(app.session.prompt_label(), app.input.text()) {
            lines.push(prompt);
        }
    }

    // Auto-scroll: keep the newest lines visible
    let visible = area.height.saturating_sub(2) as usize;
    let offset = lines.len().saturating_sub(visible) as u16;

    let paragraph = Paragraph::new(lines).scroll((offset, 0)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Green))
            .title(" Terminal de Consulta de CNPJ "),
    );

    f.render_widget(paragraph, area);
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![
        Span::styled(" Enter", Style::default().fg(Color::Yellow)),
        Span::raw(" Consultar | "),
        Span::styled("↑/↓", Style::default().fg(Color::Yellow)),
        Span::raw(" Histórico | "),
        Span::styled("Ctrl+R", Style::default().fg(Color::Yellow)),
        Span::raw(" Reiniciar | "),
        Span::styled("Esc", Style::default().fg(Color::Red)),
        Span::raw(" Sair"),
    ];

    if app.copy_text.is_some() {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled("Ctrl+Y", Style::default().fg(Color::Yellow)));
        spans.push(Span::raw(" Copiar Resultado"));
    }

    if let Some(status) = &app.copy_status {
        let color = if status.error { Color::Red } else { Color::Green };
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(
            status.label.clone(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ));
    }

    let status_bar = Paragraph::new(vec![Line::from(spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );

    f.render_widget(status_bar, area);
}
