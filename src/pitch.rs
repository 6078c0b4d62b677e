/// The chromatic series, spelled with sharps.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PitchClass {
    C,
    Cs,
    D,
    Ds,
    E,
    F,
    Fs,
    G,
    Gs,
    A,
    As,
    B,
}

impl PitchClass {
    pub const ALL: [PitchClass; 12] = [
        Self::C,
        Self::Cs,
        Self::D,
        Self::Ds,
        Self::E,
        Self::F,
        Self::Fs,
        Self::G,
        Self::Gs,
        Self::A,
        Self::As,
        Self::B,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::C => "C",
            Self::Cs => "C#",
            Self::D => "D",
            Self::Ds => "D#",
            Self::E => "E",
            Self::F => "F",
            Self::Fs => "F#",
            Self::G => "G",
            Self::Gs => "G#",
            Self::A => "A",
            Self::As => "A#",
            Self::B => "B",
        }
    }

    pub fn is_sharp(self) -> bool {
        matches!(self, Self::Cs | Self::Ds | Self::Fs | Self::Gs | Self::As)
    }

    /// Position in the chromatic series, 0..12.
    pub fn index(self) -> usize {
        Self::ALL.iter().position(|&p| p == self).unwrap_or(0)
    }

    pub fn from_index(index: usize) -> PitchClass {
        Self::ALL[index % 12]
    }

    pub fn from_name(name: &str) -> Option<PitchClass> {
        Self::ALL.iter().copied().find(|p| p.name() == name)
    }

    pub fn add_semitones(self, steps: usize) -> PitchClass {
        Self::from_index(self.index() + steps)
    }

    pub fn next(self) -> PitchClass {
        self.add_semitones(1)
    }

    pub fn prev(self) -> PitchClass {
        self.add_semitones(11)
    }

    /// MIDI note number for this pitch class in the given octave (C4 = 60).
    pub fn midi(self, octave: i32) -> i32 {
        (octave + 1) * 12 + self.index() as i32
    }

    pub fn freq(self, octave: i32) -> f32 {
        crate::utils::midi_to_freq(self.midi(octave) as f32)
    }
}

impl std::fmt::Display for PitchClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for pitch in PitchClass::ALL {
            assert_eq!(PitchClass::from_name(pitch.name()), Some(pitch));
        }
        assert_eq!(PitchClass::from_name("H"), None);
        assert_eq!(PitchClass::from_name("c"), None);
    }

    #[test]
    fn test_index_wraps() {
        assert_eq!(PitchClass::B.add_semitones(1), PitchClass::C);
        assert_eq!(PitchClass::A.add_semitones(3), PitchClass::C);
        assert_eq!(PitchClass::C.prev(), PitchClass::B);
    }

    #[test]
    fn test_midi_reference_points() {
        assert_eq!(PitchClass::C.midi(4), 60);
        assert_eq!(PitchClass::A.midi(4), 69);
        assert!((PitchClass::A.freq(4) - 440.0).abs() < 0.001);
        assert!((PitchClass::C.freq(4) - 261.63).abs() < 0.01);
    }
}
