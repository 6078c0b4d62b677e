use super::app::Field;
use crate::mode::Mode;
use crate::pitch::PitchClass;
use crate::scale::{Scale, ScaleNote};
use crate::timing::{DELAYS, NoteValue};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::Widget,
};

fn set_cell(buf: &mut Buffer, x: u16, y: u16, ch: char, style: Style) {
    if let Some(cell) = buf.cell_mut((x, y)) {
        cell.set_char(ch).set_style(style);
    }
}

fn set_str(buf: &mut Buffer, x: u16, y: u16, s: &str, style: Style) {
    for (i, ch) in s.chars().enumerate() {
        set_cell(buf, x + i as u16, y, ch, style);
    }
}

fn label_style() -> Style {
    Style::default().fg(Color::Rgb(130, 130, 130))
}

fn value_style() -> Style {
    Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
}

fn active_style() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(Color::Rgb(180, 180, 100))
        .add_modifier(Modifier::BOLD)
}

pub struct SelectorsWidget<'a> {
    root: PitchClass,
    mode: Mode,
    octave: i32,
    delay_idx: usize,
    active: Field,
    entry: Option<&'a str>,
}

impl<'a> SelectorsWidget<'a> {
    pub fn new(root: PitchClass, mode: Mode, octave: i32, delay_idx: usize) -> Self {
        Self {
            root,
            mode,
            octave,
            delay_idx,
            active: Field::Root,
            entry: None,
        }
    }

    pub fn active(mut self, field: Field) -> Self {
        self.active = field;
        self
    }

    /// Text typed into the root prompt, shown in place of the root value.
    pub fn entry(mut self, entry: Option<&'a str>) -> Self {
        self.entry = entry;
        self
    }
}

impl Widget for SelectorsWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let delay = DELAYS[self.delay_idx];
        let entry_text = self.entry.map(|e| format!("{}_", e));
        let root_text = match &entry_text {
            Some(text) => text.as_str(),
            None => self.root.name(),
        };
        let octave_text = self.octave.to_string();
        let delay_text = format!("{:.1}s {}", delay, NoteValue::from_delay(delay).symbol());

        let fields = [
            (Field::Root, "Root", root_text),
            (Field::Mode, "Mode", self.mode.name()),
            (Field::Octave, "Octave", octave_text.as_str()),
            (Field::Delay, "Delay", delay_text.as_str()),
        ];

        let mut x = area.x;
        let y = area.y;
        for (field, label, value) in fields {
            set_str(buf, x, y, label, label_style());
            x += label.len() as u16 + 1;
            let style = if field == self.active {
                active_style()
            } else {
                value_style()
            };
            set_str(buf, x, y, value, style);
            x += value.len() as u16 + 3;
        }
    }
}

const SLOT_WIDTH: u16 = 6;
const DEGREES: [&str; 8] = ["I", "II", "III", "IV", "V", "VI", "VII", "VIII"];

pub struct NoteTableWidget<'a> {
    scale: &'a Scale,
}

impl<'a> NoteTableWidget<'a> {
    pub fn new(scale: &'a Scale) -> Self {
        Self { scale }
    }
}

impl Widget for NoteTableWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for (i, note) in self.scale.iter().enumerate() {
            let x = area.x + i as u16 * SLOT_WIDTH;
            set_str(buf, x, area.y, DEGREES[i], label_style());
            set_str(buf, x, area.y + 1, note.pitch.name(), value_style());
        }
    }
}

/// Diatonic staff position: one step per letter name, sharps sharing the
/// letter below, matching how the notes sit on a drawn staff.
pub(super) fn staff_step(note: ScaleNote) -> i32 {
    let letter = match note.pitch {
        PitchClass::C | PitchClass::Cs => 0,
        PitchClass::D | PitchClass::Ds => 1,
        PitchClass::E => 2,
        PitchClass::F | PitchClass::Fs => 3,
        PitchClass::G | PitchClass::Gs => 4,
        PitchClass::A | PitchClass::As => 5,
        PitchClass::B => 6,
    };
    letter + 7 * note.octave
}

// Treble staff: bottom line E4, top line F5, one terminal row per diatonic
// step.
const E4_STEP: i32 = 30;
const F5_STEP: i32 = 38;

pub struct StaffWidget<'a> {
    scale: &'a Scale,
}

impl<'a> StaffWidget<'a> {
    pub fn new(scale: &'a Scale) -> Self {
        Self { scale }
    }
}

impl Widget for StaffWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < (F5_STEP - E4_STEP) as u16 + 2 {
            set_str(buf, area.x, area.y, "(window too small)", label_style());
            return;
        }

        let line_style = Style::default().fg(Color::Rgb(90, 90, 90));
        // Anchor E4 so a couple of ledger rows fit below the staff.
        let e4_y = area.y + area.height - 4;
        let row_of = |step: i32| -> Option<u16> {
            let y = e4_y as i32 - (step - E4_STEP);
            if y >= area.y as i32 && y < (area.y + area.height) as i32 {
                Some(y as u16)
            } else {
                None
            }
        };

        for step in (E4_STEP..=F5_STEP).step_by(2) {
            if let Some(y) = row_of(step) {
                for x in area.x..area.x + area.width {
                    set_cell(buf, x, y, '─', line_style);
                }
            }
        }

        for (i, &note) in self.scale.iter().enumerate() {
            let x = area.x + 6 + i as u16 * SLOT_WIDTH;
            let step = staff_step(note);
            let Some(y) = row_of(step) else {
                // Off the drawable range; mark the edge instead of lying.
                let edge = if step > F5_STEP { area.y } else { area.y + area.height - 1 };
                set_cell(buf, x, edge, '·', label_style());
                continue;
            };
            let outside = !(E4_STEP..=F5_STEP).contains(&step);
            if outside && (step - E4_STEP) % 2 == 0 {
                set_str(buf, x - 1, y, "───", line_style);
            }
            if note.pitch.is_sharp() {
                set_cell(buf, x - 1, y, '#', value_style());
            }
            set_cell(buf, x, y, '●', value_style());
        }
    }
}

// Standard tuning, listed high string first as on a chart.
const STRINGS: [(char, usize); 6] = [
    ('e', 4),
    ('B', 11),
    ('G', 7),
    ('D', 2),
    ('A', 9),
    ('E', 4),
];
const FRETS: u16 = 12;
const FRET_WIDTH: u16 = 4;

pub struct FretboardWidget<'a> {
    scale: &'a Scale,
}

impl<'a> FretboardWidget<'a> {
    pub fn new(scale: &'a Scale) -> Self {
        Self { scale }
    }
}

impl Widget for FretboardWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let in_scale = self.scale.pitch_classes();
        let root = self.scale.root().pitch.index();
        let string_style = Style::default().fg(Color::Rgb(110, 110, 110));
        let mark_style = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
        let root_style = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);

        // Fret numbers above the board, at the usual inlay positions.
        for fret in [3u16, 5, 7, 9, 12] {
            let x = area.x + 3 + (fret - 1) * FRET_WIDTH + 1;
            set_str(buf, x, area.y, &fret.to_string(), label_style());
        }

        for (row, (name, open)) in STRINGS.iter().enumerate() {
            let y = area.y + 1 + row as u16;
            let open_in_scale = in_scale[open % 12];
            let name_style = if open % 12 == root {
                root_style
            } else if open_in_scale {
                mark_style
            } else {
                label_style()
            };
            set_cell(buf, area.x, y, *name, name_style);
            set_cell(buf, area.x + 2, y, '║', string_style);

            for fret in 1..=FRETS {
                let x = area.x + 3 + (fret - 1) * FRET_WIDTH;
                set_str(buf, x, y, "───", string_style);
                set_cell(buf, x + 3, y, '│', string_style);

                let pc = (open + fret as usize) % 12;
                if in_scale[pc] {
                    let (ch, style) = if pc == root {
                        ('◉', root_style)
                    } else {
                        ('●', mark_style)
                    };
                    set_cell(buf, x + 1, y, ch, style);
                }
            }
        }
    }
}

pub struct StatusWidget<'a> {
    hints: &'a str,
    playing: bool,
    message: Option<&'a str>,
}

impl<'a> StatusWidget<'a> {
    pub fn new(hints: &'a str) -> Self {
        Self {
            hints,
            playing: false,
            message: None,
        }
    }

    pub fn playing(mut self, playing: bool) -> Self {
        self.playing = playing;
        self
    }

    pub fn message(mut self, message: &'a str) -> Self {
        self.message = Some(message);
        self
    }
}

impl Widget for StatusWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        set_str(buf, area.x, area.y, self.hints, label_style());

        let right = if self.playing {
            "PLAYING"
        } else {
            self.message.unwrap_or("")
        };
        if !right.is_empty() {
            let x = area.x + area.width.saturating_sub(right.len() as u16 + 1);
            let style = if self.playing {
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
            } else {
                value_style()
            };
            set_str(buf, x, area.y, right, style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_staff_steps() {
        let step = |pitch, octave| staff_step(ScaleNote { pitch, octave });
        assert_eq!(step(PitchClass::E, 4), E4_STEP);
        assert_eq!(step(PitchClass::F, 5), F5_STEP);
        assert_eq!(step(PitchClass::C, 4), 28);
        // Sharps sit on the same staff position as their letter.
        assert_eq!(step(PitchClass::Fs, 4), step(PitchClass::F, 4));
    }

    #[test]
    fn test_staff_steps_ascend_through_a_scale() {
        let scale = Scale::build("A", Mode::Aeolian, 3).unwrap();
        let steps: Vec<i32> = scale.iter().map(|&n| staff_step(n)).collect();
        for pair in steps.windows(2) {
            assert!(pair[1] > pair[0]);
        }
    }
}
