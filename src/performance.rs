use crate::envelopes::{Ramp, ramp};
use crate::oscillators::{Osc, sine};
use crate::scale::{SCALE_LEN, Scale};
use crate::signal::Signal;
use crate::timing::NoteValue;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScheduledNote {
    pub freq: f32,
    pub start: f32,
    pub end: f32,
}

/// A scale laid out on a time axis: one note every `delay` seconds, each
/// sounding for the delay's paired note length. Pure data, shared by live
/// playback and the WAV bounce.
#[derive(Clone, Debug)]
pub struct Performance {
    notes: [ScheduledNote; SCALE_LEN],
    total: f32,
}

impl Performance {
    pub fn new(scale: &Scale, delay: f32) -> Performance {
        let length = NoteValue::from_delay(delay).seconds();
        let notes = std::array::from_fn(|i| {
            let start = i as f32 * delay;
            ScheduledNote {
                freq: scale.notes()[i].freq(),
                start,
                end: start + length,
            }
        });
        Performance {
            notes,
            total: SCALE_LEN as f32 * delay,
        }
    }

    pub fn notes(&self) -> &[ScheduledNote; SCALE_LEN] {
        &self.notes
    }

    /// The full scheduled span; playback is considered in flight until this
    /// much time has elapsed.
    pub fn total(&self) -> f32 {
        self.total
    }

    /// Monophonic: the latest started note wins if lengths overlap.
    pub fn sounding_at(&self, t: f32) -> Option<&ScheduledNote> {
        self.notes
            .iter()
            .rev()
            .find(|n| t >= n.start && t < n.end)
    }

    pub fn finished(&self, t: f32) -> bool {
        t >= self.total
    }
}

/// Turns a performance into samples. Shared by the live stream and the WAV
/// bounce; does not allocate per sample.
pub struct Voice {
    osc: Osc,
    env: Ramp,
    volume: f32,
}

impl Voice {
    pub fn new(volume: f32) -> Voice {
        Voice {
            osc: sine(),
            // 5ms slopes keep note boundaries from clicking.
            env: ramp(0.005, 0.005),
            volume,
        }
    }

    pub fn sample(&mut self, performance: &Performance, signal: &Signal) -> f32 {
        let t = signal.elapsed();
        let Some(note) = performance.sounding_at(t) else {
            return 0.0;
        };
        let note = *note;
        self.osc.freq(note.freq);
        let level = self.env.level(t, note.start, note.end);
        self.osc.sample(signal) * level * self.volume
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mode::Mode;

    fn c_ionian() -> Scale {
        Scale::build("C", Mode::Ionian, 4).unwrap()
    }

    #[test]
    fn test_eight_notes_spaced_by_delay() {
        let perf = Performance::new(&c_ionian(), 0.6);
        assert_eq!(perf.notes().len(), SCALE_LEN);
        for (i, note) in perf.notes().iter().enumerate() {
            assert!((note.start - i as f32 * 0.6).abs() < 1e-6);
            assert!((note.end - note.start - 0.5).abs() < 1e-6);
        }
        assert!((perf.total() - 4.8).abs() < 1e-6);
    }

    #[test]
    fn test_sounding_at_picks_the_current_note() {
        let perf = Performance::new(&c_ionian(), 0.6);
        let first = perf.sounding_at(0.1).unwrap();
        assert!((first.freq - 261.63).abs() < 0.01);
        let third = perf.sounding_at(1.3).unwrap();
        assert!((third.freq - perf.notes()[2].freq).abs() < 1e-6);
    }

    #[test]
    fn test_gap_between_notes_is_silent() {
        // 0.2s spacing sounds 0.125s notes, leaving a gap before each next one.
        let perf = Performance::new(&c_ionian(), 0.2);
        assert!(perf.sounding_at(0.15).is_none());
        assert!(perf.sounding_at(0.21).is_some());
    }

    #[test]
    fn test_overlapping_lengths_stay_monophonic() {
        // An unrecognized delay falls back to the 1s half note, which overlaps
        // the 0.3s spacing; the later note must win.
        let perf = Performance::new(&c_ionian(), 0.3);
        let at = perf.sounding_at(0.95).unwrap();
        assert!((at.freq - perf.notes()[3].freq).abs() < 1e-6);
    }

    #[test]
    fn test_finished() {
        let perf = Performance::new(&c_ionian(), 0.2);
        assert!(!perf.finished(1.59));
        assert!(perf.finished(1.6));
    }

    #[test]
    fn test_voice_sounds_only_while_a_note_is_scheduled() {
        let perf = Performance::new(&c_ionian(), 0.2);
        let mut voice = Voice::new(0.25);
        let mut signal = Signal::new(44100);

        let mut heard_anything = false;
        let mut silent_in_gap = true;
        while !perf.finished(signal.elapsed()) {
            let sample = voice.sample(&perf, &signal);
            let t = signal.elapsed();
            if sample.abs() > 0.0 {
                heard_anything = true;
            }
            // Gap between the first note's 0.125s length and the next start.
            if t > 0.13 && t < 0.19 && sample != 0.0 {
                silent_in_gap = false;
            }
            signal.advance();
        }
        assert!(heard_anything);
        assert!(silent_in_gap);
    }
}
