use crate::pitch::PitchClass;
use nom::{
    Parser,
    branch::alt,
    character::complete::{char, digit1, one_of},
    combinator::opt,
};

fn parse_letter(input: &str) -> nom::IResult<&str, i32> {
    let (input, letter) = one_of("ABCDEFGabcdefg").parse(input)?;
    let semitones = match letter.to_ascii_uppercase() {
        'C' => 0,
        'D' => 2,
        'E' => 4,
        'F' => 5,
        'G' => 7,
        'A' => 9,
        _ => 11,
    };
    Ok((input, semitones))
}

fn parse_accidental(input: &str) -> nom::IResult<&str, i32> {
    let (input, shift) =
        opt(alt((char('#').map(|_| 1i32), char('b').map(|_| -1i32)))).parse(input)?;
    Ok((input, shift.unwrap_or(0)))
}

fn parse_pitch(input: &str) -> nom::IResult<&str, i32> {
    let (input, base) = parse_letter(input)?;
    let (input, shift) = parse_accidental(input)?;
    // Octave digits are accepted but ignored; the octave selector owns them.
    let (input, _) = opt(digit1).parse(input)?;
    Ok((input, base + shift))
}

/// Parses a typed note name ("C#", "db", "f4"). Flat spellings normalize to
/// the sharp spelling of the same pitch class.
pub fn parse_note_name(input: &str) -> Result<PitchClass, String> {
    match parse_pitch(input.trim()) {
        Ok(("", semitones)) => Ok(PitchClass::from_index(semitones.rem_euclid(12) as usize)),
        Ok((rest, _)) => Err(format!("Unexpected input: '{}'", rest)),
        Err(e) => Err(format!("Parse error: {:?}", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_letters() {
        assert_eq!(parse_note_name("C"), Ok(PitchClass::C));
        assert_eq!(parse_note_name("e"), Ok(PitchClass::E));
        assert_eq!(parse_note_name("b"), Ok(PitchClass::B));
    }

    #[test]
    fn test_sharps() {
        assert_eq!(parse_note_name("C#"), Ok(PitchClass::Cs));
        assert_eq!(parse_note_name("f#3"), Ok(PitchClass::Fs));
    }

    #[test]
    fn test_flats_normalize() {
        assert_eq!(parse_note_name("Db"), Ok(PitchClass::Cs));
        assert_eq!(parse_note_name("bb"), Ok(PitchClass::As));
        assert_eq!(parse_note_name("Cb"), Ok(PitchClass::B));
    }

    #[test]
    fn test_octave_digit_ignored() {
        assert_eq!(parse_note_name("A4"), Ok(PitchClass::A));
        assert_eq!(parse_note_name(" g#2 "), Ok(PitchClass::Gs));
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(parse_note_name("H").is_err());
        assert!(parse_note_name("").is_err());
        assert!(parse_note_name("C##").is_err());
        assert!(parse_note_name("C major").is_err());
    }
}
