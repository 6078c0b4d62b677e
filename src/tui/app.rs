use super::bindings::{Action, Binding, lookup};
use super::config::Bindings;
use super::render::{
    FretboardWidget, NoteTableWidget, SelectorsWidget, StaffWidget, StatusWidget,
};
#[cfg(feature = "live")]
use crate::live::Player;
use crate::mode::Mode;
use crate::note_input::parse_note_name;
use crate::performance::Performance;
use crate::pitch::PitchClass;
use crate::scale::Scale;
use crate::timing::DELAYS;
use ratatui::crossterm::{
    event::{self, Event, KeyCode},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    widgets::{Block, Borders},
};
use std::{io, time::Duration};

const MIN_OCTAVE: i32 = 2;
const MAX_OCTAVE: i32 = 6;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    Root,
    Mode,
    Octave,
    Delay,
}

impl Field {
    pub const ALL: [Field; 4] = [Self::Root, Self::Mode, Self::Octave, Self::Delay];

    pub fn next(self) -> Field {
        let i = Self::ALL.iter().position(|&f| f == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Field {
        let i = Self::ALL.iter().position(|&f| f == self).unwrap_or(0);
        Self::ALL[(i + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

struct App {
    root: PitchClass,
    mode: Mode,
    octave: i32,
    delay_idx: usize,
    field: Field,
    scale: Scale,
    root_entry: Option<String>,
    message: Option<String>,
    should_quit: bool,
    bindings: Bindings,
    hints: String,
    #[cfg(feature = "live")]
    player: Option<Player>,
}

impl App {
    fn new() -> Self {
        let root = PitchClass::C;
        let mode = Mode::Ionian;
        let octave = 4;
        let bindings = Bindings::load();
        let hints = hints_line(&bindings.normal);
        Self {
            root,
            mode,
            octave,
            delay_idx: 2,
            field: Field::Root,
            scale: Scale::from_root(root, mode, octave),
            root_entry: None,
            message: None,
            should_quit: false,
            bindings,
            hints,
            #[cfg(feature = "live")]
            player: None,
        }
    }

    /// The one place scale data is derived from the selectors.
    fn recompute(&mut self) {
        self.scale = Scale::from_root(self.root, self.mode, self.octave);
    }

    fn handle_key(&mut self, code: KeyCode) {
        if self.root_entry.is_some() {
            self.handle_root_entry_key(code);
            return;
        }
        self.message = None;

        let Some(action) = lookup(&self.bindings.normal, code) else {
            return;
        };
        match action {
            Action::Quit => self.should_quit = true,
            Action::PrevField => self.field = self.field.prev(),
            Action::NextField => self.field = self.field.next(),
            Action::ValueUp => self.adjust(1),
            Action::ValueDown => self.adjust(-1),
            Action::Play => self.play(),
            Action::EnterRoot => self.root_entry = Some(String::new()),
            Action::Export => self.export(),
        }
    }

    fn adjust(&mut self, direction: i32) {
        match self.field {
            Field::Root => {
                self.root = if direction > 0 {
                    self.root.next()
                } else {
                    self.root.prev()
                };
            }
            Field::Mode => {
                self.mode = if direction > 0 {
                    self.mode.next()
                } else {
                    self.mode.prev()
                };
            }
            Field::Octave => {
                self.octave = (self.octave + direction).clamp(MIN_OCTAVE, MAX_OCTAVE);
            }
            Field::Delay => {
                let len = DELAYS.len() as i32;
                self.delay_idx = ((self.delay_idx as i32 + direction + len) % len) as usize;
            }
        }
        self.recompute();
    }

    fn handle_root_entry_key(&mut self, code: KeyCode) {
        let Some(entry) = &mut self.root_entry else {
            return;
        };
        match code {
            KeyCode::Esc => {
                self.root_entry = None;
                self.message = Some("Root entry cancelled".into());
            }
            KeyCode::Enter => {
                match parse_note_name(entry) {
                    Ok(pitch) => {
                        self.root = pitch;
                        self.recompute();
                        self.message = Some(format!("Root set to {}", pitch.name()));
                    }
                    Err(e) => {
                        self.message = Some(e);
                    }
                }
                self.root_entry = None;
            }
            KeyCode::Backspace => {
                entry.pop();
            }
            KeyCode::Char(c) => {
                if entry.len() < 4 {
                    entry.push(c);
                }
            }
            _ => {}
        }
    }

    fn play(&mut self) {
        let performance = Performance::new(&self.scale, DELAYS[self.delay_idx]);
        #[cfg(feature = "live")]
        {
            match &self.player {
                Some(player) => {
                    if player.play(performance) {
                        self.message =
                            Some(format!("Playing {} {}", self.root.name(), self.mode.name()));
                    } else {
                        self.message = Some("Already playing".into());
                    }
                }
                None => self.message = Some("Audio unavailable".into()),
            }
        }
        #[cfg(not(feature = "live"))]
        {
            let _ = performance;
            self.message = Some("Built without live audio".into());
        }
    }

    fn export(&mut self) {
        let filename = format!(
            "{}-{}-{}.wav",
            self.root.name().to_lowercase().replace('#', "s"),
            self.mode.name().to_lowercase(),
            self.octave
        );
        let performance = Performance::new(&self.scale, DELAYS[self.delay_idx]);
        match crate::wav::render_performance(&performance, &filename, 44100) {
            Ok(()) => self.message = Some(format!("Wrote {}", filename)),
            Err(e) => self.message = Some(format!("Export failed: {}", e)),
        }
    }

    fn playing(&self) -> bool {
        #[cfg(feature = "live")]
        {
            self.player.as_ref().is_some_and(|p| p.playing())
        }
        #[cfg(not(feature = "live"))]
        {
            false
        }
    }

    fn ui(&mut self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(4),
                Constraint::Min(12),
                Constraint::Length(9),
                Constraint::Length(1),
            ])
            .split(f.area());

        let sections = [" Mode ", " Notes ", " Staff ", " Fretboard "];
        for (i, title) in sections.iter().enumerate() {
            let block = Block::default().title(*title).borders(Borders::ALL);
            f.render_widget(block, chunks[i]);
        }

        let inner = |i: usize| Block::default().borders(Borders::ALL).inner(chunks[i]);

        let selectors = SelectorsWidget::new(self.root, self.mode, self.octave, self.delay_idx)
            .active(self.field)
            .entry(self.root_entry.as_deref());
        f.render_widget(selectors, inner(0));

        f.render_widget(NoteTableWidget::new(&self.scale), inner(1));
        f.render_widget(StaffWidget::new(&self.scale), inner(2));
        f.render_widget(FretboardWidget::new(&self.scale), inner(3));

        let mut status = StatusWidget::new(&self.hints).playing(self.playing());
        if let Some(ref msg) = self.message {
            status = status.message(msg);
        }
        f.render_widget(status, chunks[4]);
    }
}

fn key_label(code: KeyCode) -> String {
    match code {
        KeyCode::Char(' ') => "space".into(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Esc => "esc".into(),
        KeyCode::Enter => "enter".into(),
        other => format!("{:?}", other).to_lowercase(),
    }
}

fn hints_line(bindings: &[Binding]) -> String {
    let mut seen: Vec<Action> = Vec::new();
    let mut parts: Vec<String> = Vec::new();
    for b in bindings {
        if matches!(
            b.key,
            KeyCode::Left | KeyCode::Right | KeyCode::Up | KeyCode::Down
        ) {
            continue;
        }
        if seen.contains(&b.action) {
            continue;
        }
        seen.push(b.action);
        parts.push(format!("{} {}", key_label(b.key), b.hint));
    }
    parts.join("  ")
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    #[cfg(feature = "live")]
    let player = match Player::new() {
        Ok(p) => Some(p),
        Err(e) => {
            log::warn!("audio unavailable: {}", e);
            None
        }
    };

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new();
    #[cfg(feature = "live")]
    {
        app.player = player;
    }

    loop {
        terminal.draw(|f| app.ui(f))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                app.handle_key(key.code);
            }
        }

        if app.should_quit {
            break;
        }
    }

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    Ok(())
}
