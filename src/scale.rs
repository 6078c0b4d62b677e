use crate::mode::Mode;
use crate::pitch::PitchClass;

pub const SCALE_LEN: usize = 8;

/// One sounded note: a pitch class at a concrete octave.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScaleNote {
    pub pitch: PitchClass,
    pub octave: i32,
}

impl ScaleNote {
    pub fn freq(self) -> f32 {
        self.pitch.freq(self.octave)
    }
}

impl std::fmt::Display for ScaleNote {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.pitch, self.octave)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ScaleError {
    InvalidRoot(String),
}

impl std::fmt::Display for ScaleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScaleError::InvalidRoot(name) => {
                write!(f, "'{}' is not a chromatic note name", name)
            }
        }
    }
}

impl std::error::Error for ScaleError {}

/// An eight-note run of a mode: seven degrees plus the root an octave up.
#[derive(Clone, Debug, PartialEq)]
pub struct Scale {
    notes: [ScaleNote; SCALE_LEN],
}

impl Scale {
    /// Builds the scale from a root name as given by the UI. Unknown names
    /// fail explicitly instead of indexing garbage.
    pub fn build(root_name: &str, mode: Mode, octave: i32) -> Result<Scale, ScaleError> {
        let root = PitchClass::from_name(root_name)
            .ok_or_else(|| ScaleError::InvalidRoot(root_name.to_string()))?;
        Ok(Self::from_root(root, mode, octave))
    }

    pub fn from_root(root: PitchClass, mode: Mode, octave: i32) -> Scale {
        let steps = mode.steps();
        // Rollover detection compares adjacent pitch indices, which is only
        // sound when the pattern spans exactly one octave.
        assert_eq!(steps.iter().map(|&s| s as usize).sum::<usize>(), 12);

        let root_index = root.index();
        let mut offset = 0usize;
        let mut prev_index = root_index;
        let mut running_octave = octave;

        let notes = std::array::from_fn(|degree| {
            let index = (root_index + offset) % 12;
            if index < prev_index {
                running_octave += 1;
            }
            if degree < steps.len() {
                offset += steps[degree] as usize;
            }
            prev_index = index;
            ScaleNote {
                pitch: PitchClass::from_index(index),
                octave: running_octave,
            }
        });

        log::debug!(
            "built {} {} starting at octave {}",
            root.name(),
            mode.name(),
            octave
        );

        Scale { notes }
    }

    pub fn notes(&self) -> &[ScaleNote; SCALE_LEN] {
        &self.notes
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScaleNote> {
        self.notes.iter()
    }

    pub fn root(&self) -> ScaleNote {
        self.notes[0]
    }

    /// Pitch classes present in the scale, for fretboard marking.
    pub fn pitch_classes(&self) -> [bool; 12] {
        let mut present = [false; 12];
        for note in &self.notes {
            present[note.pitch.index()] = true;
        }
        present
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(scale: &Scale) -> Vec<String> {
        scale.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_c_ionian() {
        let scale = Scale::build("C", Mode::Ionian, 4).unwrap();
        assert_eq!(
            names(&scale),
            vec!["C4", "D4", "E4", "F4", "G4", "A4", "B4", "C5"]
        );
    }

    #[test]
    fn test_a_aeolian_rolls_over_mid_scale() {
        let scale = Scale::build("A", Mode::Aeolian, 3).unwrap();
        assert_eq!(
            names(&scale),
            vec!["A3", "B3", "C4", "D4", "E4", "F4", "G4", "A4"]
        );
    }

    #[test]
    fn test_fs_lydian_sharps() {
        let scale = Scale::build("F#", Mode::Lydian, 3).unwrap();
        assert_eq!(
            names(&scale),
            vec!["F#3", "G#3", "A#3", "C4", "C#4", "D#4", "F4", "F#4"]
        );
    }

    #[test]
    fn test_invalid_root() {
        assert_eq!(
            Scale::build("X", Mode::Ionian, 4),
            Err(ScaleError::InvalidRoot("X".into()))
        );
    }

    #[test]
    fn test_unknown_mode_name_behaves_as_ionian() {
        let fallback = Scale::build("D", Mode::from_name("Foo"), 4).unwrap();
        let ionian = Scale::build("D", Mode::Ionian, 4).unwrap();
        assert_eq!(fallback, ionian);
    }

    #[test]
    fn test_every_root_and_mode() {
        for root in PitchClass::ALL {
            for mode in Mode::ALL {
                let scale = Scale::from_root(root, mode, 4);
                let notes = scale.notes();
                assert_eq!(notes.len(), SCALE_LEN);
                assert_eq!(notes[0].pitch, root);
                assert_eq!(notes[7].pitch, root);
                assert_eq!(notes[0].octave, 4);
                assert!(notes[7].octave == 4 || notes[7].octave == 5);
                for pair in notes.windows(2) {
                    assert!(pair[1].octave >= pair[0].octave);
                }
            }
        }
    }

    #[test]
    fn test_ascending_frequencies() {
        let scale = Scale::build("G#", Mode::Phrygian, 3).unwrap();
        for pair in scale.notes().windows(2) {
            assert!(pair[1].freq() > pair[0].freq());
        }
    }
}
