/// The seven diatonic modes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Ionian,
    Dorian,
    Phrygian,
    Lydian,
    Mixolydian,
    Aeolian,
    Locrian,
}

impl Mode {
    pub const ALL: [Mode; 7] = [
        Self::Ionian,
        Self::Dorian,
        Self::Phrygian,
        Self::Lydian,
        Self::Mixolydian,
        Self::Aeolian,
        Self::Locrian,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Ionian => "Ionian",
            Self::Dorian => "Dorian",
            Self::Phrygian => "Phrygian",
            Self::Lydian => "Lydian",
            Self::Mixolydian => "Mixolydian",
            Self::Aeolian => "Aeolian",
            Self::Locrian => "Locrian",
        }
    }

    /// Semitone steps between successive scale degrees. Always sums to 12.
    pub fn steps(self) -> [u8; 7] {
        match self {
            Self::Ionian => [2, 2, 1, 2, 2, 2, 1],
            Self::Dorian => [2, 1, 2, 2, 2, 1, 2],
            Self::Phrygian => [1, 2, 2, 2, 1, 2, 2],
            Self::Lydian => [2, 2, 2, 1, 2, 2, 1],
            Self::Mixolydian => [2, 2, 1, 2, 2, 1, 2],
            Self::Aeolian => [2, 1, 2, 2, 1, 2, 2],
            Self::Locrian => [1, 2, 2, 1, 2, 2, 2],
        }
    }

    /// Unrecognized names fall back to Ionian rather than failing.
    pub fn from_name(name: &str) -> Mode {
        Self::ALL
            .iter()
            .copied()
            .find(|m| m.name() == name)
            .unwrap_or(Self::Ionian)
    }

    pub fn next(self) -> Mode {
        let i = Self::ALL.iter().position(|&m| m == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Mode {
        let i = Self::ALL.iter().position(|&m| m == self).unwrap_or(0);
        Self::ALL[(i + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_steps_sum_to_octave() {
        for mode in Mode::ALL {
            let sum: u8 = mode.steps().iter().sum();
            assert_eq!(sum, 12, "{} steps must span an octave", mode.name());
        }
    }

    #[test]
    fn test_steps_are_half_or_whole() {
        for mode in Mode::ALL {
            assert!(mode.steps().iter().all(|&s| s == 1 || s == 2));
        }
    }

    #[test]
    fn test_from_name() {
        assert_eq!(Mode::from_name("Dorian"), Mode::Dorian);
        assert_eq!(Mode::from_name("Locrian"), Mode::Locrian);
    }

    #[test]
    fn test_unknown_name_defaults_to_ionian() {
        assert_eq!(Mode::from_name("Foo"), Mode::Ionian);
        assert_eq!(Mode::from_name(""), Mode::Ionian);
        assert_eq!(Mode::from_name("dorian"), Mode::Ionian);
    }

    #[test]
    fn test_cycling_covers_all() {
        let mut mode = Mode::Ionian;
        for _ in 0..Mode::ALL.len() {
            mode = mode.next();
        }
        assert_eq!(mode, Mode::Ionian);
        assert_eq!(Mode::Ionian.prev(), Mode::Locrian);
    }
}
