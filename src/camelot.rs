//! Camelot wheel key notation
//!
//! The Camelot wheel is the standard DJ key notation: 12 positions, each with
//! an A (minor) and B (major) slot. Adjacent positions on the wheel and the
//! parallel slot at the same position mix harmonically.

use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use stratum_dsp::Key;

/// Wheel mode: A = minor (outer ring), B = major (inner ring)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    Minor,
    Major,
}

impl Mode {
    /// The opposite ring at the same wheel position
    pub fn parallel(self) -> Self {
        match self {
            Mode::Minor => Mode::Major,
            Mode::Major => Mode::Minor,
        }
    }

    fn letter(self) -> char {
        match self {
            Mode::Minor => 'A',
            Mode::Major => 'B',
        }
    }
}

/// A valid position on the Camelot wheel (one of 24 codes)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CamelotCode {
    number: u8,
    mode: Mode,
}

/// Camelot wheel number for each major key, indexed by pitch class (0 = C)
const MAJOR_NUMBERS: [u8; 12] = [8, 3, 10, 5, 12, 7, 2, 9, 4, 11, 6, 1];

/// Camelot wheel number for each minor key, indexed by pitch class (0 = C)
const MINOR_NUMBERS: [u8; 12] = [5, 12, 7, 2, 9, 4, 11, 6, 1, 8, 3, 10];

/// Note names using sharps, indexed by pitch class
const NOTE_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

impl CamelotCode {
    /// Create a code from a wheel number (1-12) and mode.
    /// Returns `None` for numbers outside the wheel.
    pub fn new(number: u8, mode: Mode) -> Option<Self> {
        if (1..=12).contains(&number) {
            Some(Self { number, mode })
        } else {
            None
        }
    }

    /// Wheel position (1-12)
    pub fn number(&self) -> u8 {
        self.number
    }

    /// Wheel mode (A/B ring)
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Map a pitch class (0 = C .. 11 = B) and mode to its wheel position
    pub fn from_pitch_class(pitch_class: u32, mode: Mode) -> Self {
        let pc = (pitch_class % 12) as usize;
        let number = match mode {
            Mode::Major => MAJOR_NUMBERS[pc],
            Mode::Minor => MINOR_NUMBERS[pc],
        };
        Self { number, mode }
    }

    /// Same position, opposite ring
    pub fn parallel(&self) -> Self {
        Self {
            number: self.number,
            mode: self.mode.parallel(),
        }
    }

    /// Next position clockwise, wrapping 12 -> 1
    pub fn clockwise(&self) -> Self {
        Self {
            number: self.number % 12 + 1,
            mode: self.mode,
        }
    }

    /// Previous position counter-clockwise, wrapping 1 -> 12
    pub fn counter_clockwise(&self) -> Self {
        Self {
            number: (self.number + 10) % 12 + 1,
            mode: self.mode,
        }
    }
}

impl fmt::Display for CamelotCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.number, self.mode.letter())
    }
}

/// Camelot code of a track: a valid wheel position or the Unknown sentinel
///
/// Keys the detection engine cannot map stay `Unknown` rather than failing;
/// downstream code must treat `Unknown` as harmonically incompatible with
/// everything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Camelot {
    Known(CamelotCode),
    Unknown,
}

impl Camelot {
    /// Map a detected key to its Camelot code
    pub fn from_key(key: &Key) -> Self {
        match key {
            Key::Major(pc) => Camelot::Known(CamelotCode::from_pitch_class(*pc, Mode::Major)),
            Key::Minor(pc) => Camelot::Known(CamelotCode::from_pitch_class(*pc, Mode::Minor)),
        }
    }

    /// Parse a `"<note> <major|minor>"` key name (e.g. `"C major"`, `"F# minor"`).
    /// Anything unrecognized yields `Unknown`.
    pub fn from_key_name(name: &str) -> Self {
        let mut parts = name.split_whitespace();
        let (Some(note), Some(scale)) = (parts.next(), parts.next()) else {
            return Camelot::Unknown;
        };
        if parts.next().is_some() {
            return Camelot::Unknown;
        }

        let Some(pc) = NOTE_NAMES.iter().position(|n| n.eq_ignore_ascii_case(note)) else {
            return Camelot::Unknown;
        };

        match scale.to_ascii_lowercase().as_str() {
            "major" => Camelot::Known(CamelotCode::from_pitch_class(pc as u32, Mode::Major)),
            "minor" => Camelot::Known(CamelotCode::from_pitch_class(pc as u32, Mode::Minor)),
            _ => Camelot::Unknown,
        }
    }

    /// Harmonically compatible codes for mixing
    ///
    /// For a known code this is always exactly four entries: the code itself,
    /// its parallel (opposite ring, same position), the next position
    /// clockwise, and the previous position counter-clockwise. For `Unknown`
    /// there is no meaningful neighborhood, so the list is empty.
    pub fn harmonic_matches(&self) -> Vec<Camelot> {
        match self {
            Camelot::Known(code) => vec![
                Camelot::Known(*code),
                Camelot::Known(code.parallel()),
                Camelot::Known(code.clockwise()),
                Camelot::Known(code.counter_clockwise()),
            ],
            Camelot::Unknown => Vec::new(),
        }
    }

    pub fn is_known(&self) -> bool {
        matches!(self, Camelot::Known(_))
    }
}

impl fmt::Display for Camelot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Camelot::Known(code) => code.fmt(f),
            Camelot::Unknown => write!(f, "Unknown"),
        }
    }
}

impl FromStr for Camelot {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "Unknown" {
            return Ok(Camelot::Unknown);
        }
        if s.len() < 2 {
            return Err(());
        }
        let (num, letter) = s.split_at(s.len() - 1);
        let number: u8 = num.parse().map_err(|_| ())?;
        let mode = match letter {
            "A" => Mode::Minor,
            "B" => Mode::Major,
            _ => return Err(()),
        };
        CamelotCode::new(number, mode).map(Camelot::Known).ok_or(())
    }
}

impl Serialize for Camelot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Human-readable key name for a detected key (e.g. `"C major"`, `"A minor"`)
pub fn key_name(key: &Key) -> String {
    match key {
        Key::Major(pc) => format!("{} major", NOTE_NAMES[(*pc % 12) as usize]),
        Key::Minor(pc) => format!("{} minor", NOTE_NAMES[(*pc % 12) as usize]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // The full 24-entry table from the Camelot wheel reference
    const EXPECTED: [(&str, &str); 24] = [
        ("C major", "8B"),
        ("G major", "9B"),
        ("D major", "10B"),
        ("A major", "11B"),
        ("E major", "12B"),
        ("B major", "1B"),
        ("F# major", "2B"),
        ("C# major", "3B"),
        ("G# major", "4B"),
        ("D# major", "5B"),
        ("A# major", "6B"),
        ("F major", "7B"),
        ("A minor", "8A"),
        ("E minor", "9A"),
        ("B minor", "10A"),
        ("F# minor", "11A"),
        ("C# minor", "12A"),
        ("G# minor", "1A"),
        ("D# minor", "2A"),
        ("A# minor", "3A"),
        ("F minor", "4A"),
        ("C minor", "5A"),
        ("G minor", "6A"),
        ("D minor", "7A"),
    ];

    #[test]
    fn test_all_24_keys_map_to_documented_codes() {
        for (name, code) in EXPECTED {
            assert_eq!(
                Camelot::from_key_name(name).to_string(),
                code,
                "wrong code for {}",
                name
            );
        }
    }

    #[test]
    fn test_unrecognized_keys_are_unknown() {
        assert_eq!(Camelot::from_key_name("H major"), Camelot::Unknown);
        assert_eq!(Camelot::from_key_name("C dorian"), Camelot::Unknown);
        assert_eq!(Camelot::from_key_name(""), Camelot::Unknown);
        assert_eq!(Camelot::from_key_name("C"), Camelot::Unknown);
        assert_eq!(Camelot::from_key_name("C major extra"), Camelot::Unknown);
    }

    #[test]
    fn test_from_stratum_key() {
        assert_eq!(Camelot::from_key(&Key::Major(0)).to_string(), "8B"); // C major
        assert_eq!(Camelot::from_key(&Key::Minor(9)).to_string(), "8A"); // A minor
        assert_eq!(Camelot::from_key(&Key::Major(11)).to_string(), "1B"); // B major
        assert_eq!(Camelot::from_key(&Key::Minor(8)).to_string(), "1A"); // G# minor
    }

    #[test]
    fn test_harmonic_matches_has_four_entries_with_self_and_parallel() {
        for (name, _) in EXPECTED {
            let camelot = Camelot::from_key_name(name);
            let matches = camelot.harmonic_matches();
            assert_eq!(matches.len(), 4);
            assert!(matches.contains(&camelot));

            let Camelot::Known(code) = camelot else {
                panic!("expected a known code for {}", name);
            };
            assert!(matches.contains(&Camelot::Known(code.parallel())));
        }
    }

    #[test]
    fn test_wheel_wraps_around() {
        let twelve_a: Camelot = "12A".parse().unwrap();
        let one_a: Camelot = "1A".parse().unwrap();

        assert!(twelve_a.harmonic_matches().contains(&one_a));
        assert!(one_a.harmonic_matches().contains(&twelve_a));

        let Camelot::Known(code) = twelve_a else { unreachable!() };
        assert_eq!(code.clockwise().to_string(), "1A");
        let Camelot::Known(code) = one_a else { unreachable!() };
        assert_eq!(code.counter_clockwise().to_string(), "12A");
    }

    #[test]
    fn test_unknown_harmonic_matches_are_empty() {
        assert!(Camelot::Unknown.harmonic_matches().is_empty());
    }

    #[test]
    fn test_parse_roundtrip() {
        for (name, code) in EXPECTED {
            let camelot = Camelot::from_key_name(name);
            assert_eq!(code.parse::<Camelot>().unwrap(), camelot);
        }
        assert_eq!("Unknown".parse::<Camelot>().unwrap(), Camelot::Unknown);
        assert!("13A".parse::<Camelot>().is_err());
        assert!("0B".parse::<Camelot>().is_err());
        assert!("8C".parse::<Camelot>().is_err());
    }
}
