//! Chord symbol parsing
//!
//! Parses chord symbols (C, Am, G7, Bbmaj7, etc.) into MIDI note sets.
//!
//! A symbol is a root letter (A-G, any case), an optional accidental (`#` or
//! `b`), then a quality suffix. The root letter is case-insensitive but the
//! suffix is matched exactly: `M7` and `Maj7` are major sevenths, `m7` is a
//! minor seventh.
//!
//! # MIDI Note Reference
//! - Root note = pitch class + (octave + 1) * 12, so C4 = 60
//! - Intervals: minor 3rd = +3, major 3rd = +4, perfect 5th = +7, minor 7th = +10, major 7th = +11

use serde::Serialize;
use std::fmt;

use crate::error::ChordMidiError;

/// Octave used when the caller does not pick one (C4 = middle C = 60).
pub const DEFAULT_OCTAVE: i8 = 4;

/// MIDI note numbers of one chord, in interval order. Empty means a rest.
pub type NoteSet = Vec<u8>;

/// Note letters A through G
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteName {
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

impl NoteName {
    /// Read a note letter, ignoring case.
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'C' => Some(NoteName::C),
            'D' => Some(NoteName::D),
            'E' => Some(NoteName::E),
            'F' => Some(NoteName::F),
            'G' => Some(NoteName::G),
            'A' => Some(NoteName::A),
            'B' => Some(NoteName::B),
            _ => None,
        }
    }

    fn as_char(self) -> char {
        match self {
            NoteName::C => 'C',
            NoteName::D => 'D',
            NoteName::E => 'E',
            NoteName::F => 'F',
            NoteName::G => 'G',
            NoteName::A => 'A',
            NoteName::B => 'B',
        }
    }
}

/// Accidental written directly after the root letter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Accidental {
    #[default]
    Natural,
    Sharp,
    Flat,
}

/// Semitone class 0-11 (C = 0, B = 11)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct PitchClass(u8);

impl PitchClass {
    pub fn value(self) -> u8 {
        self.0
    }
}

/// A root as written: letter plus accidental.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RootSpelling {
    pub name: NoteName,
    pub accidental: Accidental,
}

impl fmt::Display for RootSpelling {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name.as_char())?;
        match self.accidental {
            Accidental::Natural => Ok(()),
            Accidental::Sharp => f.write_str("#"),
            Accidental::Flat => f.write_str("b"),
        }
    }
}

/// Root spellings: (spelling, pitch class, octave adjustment).
///
/// `Cb` and `B#` sit on the other side of the C boundary from their letter,
/// so they also move the octave.
const ROOT_TABLE: [(&str, u8, i32); 21] = [
    ("C", 0, 0),
    ("C#", 1, 0),
    ("Db", 1, 0),
    ("D", 2, 0),
    ("D#", 3, 0),
    ("Eb", 3, 0),
    ("E", 4, 0),
    ("F", 5, 0),
    ("F#", 6, 0),
    ("Gb", 6, 0),
    ("G", 7, 0),
    ("G#", 8, 0),
    ("Ab", 8, 0),
    ("A", 9, 0),
    ("A#", 10, 0),
    ("Bb", 10, 0),
    ("B", 11, 0),
    ("Cb", 11, -1),
    ("E#", 5, 0),
    ("Fb", 4, 0),
    ("B#", 0, 1),
];

fn lookup_root(spelling: &str) -> Option<(PitchClass, i32)> {
    ROOT_TABLE
        .iter()
        .find(|(name, _, _)| *name == spelling)
        .map(|&(_, pitch_class, octave_shift)| (PitchClass(pitch_class), octave_shift))
}

/// Chord qualities
///
/// Every quality has a fixed interval set. Adding a variant forces an entry
/// in [`Quality::intervals`], and a spelling in [`Quality::from_suffix`] to
/// make it reachable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Quality {
    Major,
    Minor,
    Dominant7,
    Major7,
    Minor7,
    Diminished,
    Diminished7,
    Augmented,
    Dominant9,
    Major9,
    Minor9,
    Dominant11,
    Dominant13,
    Sus4,
    Sus2,
}

impl Quality {
    pub const ALL: [Quality; 15] = [
        Quality::Major,
        Quality::Minor,
        Quality::Dominant7,
        Quality::Major7,
        Quality::Minor7,
        Quality::Diminished,
        Quality::Diminished7,
        Quality::Augmented,
        Quality::Dominant9,
        Quality::Major9,
        Quality::Minor9,
        Quality::Dominant11,
        Quality::Dominant13,
        Quality::Sus4,
        Quality::Sus2,
    ];

    /// Match a quality suffix exactly (case-sensitive).
    ///
    /// The empty suffix is a major triad.
    pub fn from_suffix(suffix: &str) -> Option<Self> {
        let quality = match suffix {
            "" | "M" | "maj" => Quality::Major,
            "m" | "min" | "-" => Quality::Minor,
            "7" | "dom7" => Quality::Dominant7,
            "maj7" | "M7" | "Maj7" => Quality::Major7,
            "m7" | "min7" | "-7" => Quality::Minor7,
            "dim" => Quality::Diminished,
            "dim7" | "o7" => Quality::Diminished7,
            "aug" | "+" => Quality::Augmented,
            "9" | "dom9" => Quality::Dominant9,
            "maj9" => Quality::Major9,
            "m9" | "min9" => Quality::Minor9,
            "11" | "dom11" => Quality::Dominant11,
            "13" | "dom13" => Quality::Dominant13,
            "sus4" => Quality::Sus4,
            "sus2" => Quality::Sus2,
            _ => return None,
        };
        Some(quality)
    }

    /// Semitone offsets from the root, ascending, always starting at 0.
    pub fn intervals(self) -> &'static [u8] {
        match self {
            Quality::Major => &[0, 4, 7],
            Quality::Minor => &[0, 3, 7],
            Quality::Dominant7 => &[0, 4, 7, 10],
            Quality::Major7 => &[0, 4, 7, 11],
            Quality::Minor7 => &[0, 3, 7, 10],
            Quality::Diminished => &[0, 3, 6],
            Quality::Diminished7 => &[0, 3, 6, 9],
            Quality::Augmented => &[0, 4, 8],
            Quality::Dominant9 => &[0, 4, 7, 10, 14],
            Quality::Major9 => &[0, 4, 7, 11, 14],
            Quality::Minor9 => &[0, 3, 7, 10, 14],
            Quality::Dominant11 => &[0, 4, 7, 10, 14, 17],
            Quality::Dominant13 => &[0, 4, 7, 10, 14, 21],
            Quality::Sus4 => &[0, 5, 7],
            Quality::Sus2 => &[0, 2, 7],
        }
    }

    /// Canonical suffix for this quality.
    pub fn symbol(self) -> &'static str {
        match self {
            Quality::Major => "",
            Quality::Minor => "m",
            Quality::Dominant7 => "7",
            Quality::Major7 => "maj7",
            Quality::Minor7 => "m7",
            Quality::Diminished => "dim",
            Quality::Diminished7 => "dim7",
            Quality::Augmented => "aug",
            Quality::Dominant9 => "9",
            Quality::Major9 => "maj9",
            Quality::Minor9 => "m9",
            Quality::Dominant11 => "11",
            Quality::Dominant13 => "13",
            Quality::Sus4 => "sus4",
            Quality::Sus2 => "sus2",
        }
    }
}

/// A parsed chord symbol
///
/// # Fields
/// - `symbol`: the token as typed (trimmed)
/// - `root`: pitch class of the root
/// - `octave`: octave of the root after enharmonic adjustment (`Cb4` sounds in octave 3)
/// - `quality`: chord quality
/// - `notes`: MIDI note numbers, root first
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Chord {
    pub symbol: String,
    pub root: PitchClass,
    pub octave: i8,
    pub quality: Quality,
    pub notes: NoteSet,
}

/// Read the root off the front of a symbol.
///
/// Returns the spelling and the untouched remainder (the quality suffix).
fn split_root(symbol: &str) -> Result<(RootSpelling, &str), ChordMidiError> {
    let name = symbol
        .chars()
        .next()
        .and_then(NoteName::from_char)
        .ok_or_else(|| ChordMidiError::InvalidChordFormat {
            token: symbol.to_string(),
        })?;

    // The letter is ASCII, so the remainder starts at byte 1.
    let rest = &symbol[1..];
    let (accidental, suffix) = match rest.as_bytes().first() {
        Some(b'#') => (Accidental::Sharp, &rest[1..]),
        Some(b'b') => (Accidental::Flat, &rest[1..]),
        _ => (Accidental::Natural, rest),
    };

    Ok((RootSpelling { name, accidental }, suffix))
}

/// Parse a chord symbol into a [`Chord`]
///
/// # Examples
/// ```
/// use chordmidi::chord::{parse_chord_symbol, Quality};
///
/// let chord = parse_chord_symbol("Bbmaj7", 4).unwrap();
/// assert_eq!(chord.root.value(), 10);
/// assert_eq!(chord.quality, Quality::Major7);
/// assert_eq!(chord.notes, vec![70, 74, 77, 81]);
///
/// // Cb is B one octave below the written C
/// let chord = parse_chord_symbol("Cb", 4).unwrap();
/// assert_eq!(chord.octave, 3);
/// assert_eq!(chord.notes, vec![47, 51, 54]);
/// ```
///
/// # Errors
/// - [`ChordMidiError::InvalidChordFormat`] if the token does not start with A-G
/// - [`ChordMidiError::UnknownRoot`] if the root spelling is not in the root table
/// - [`ChordMidiError::UnknownQuality`] if the suffix is not a known quality
/// - [`ChordMidiError::NoteOutOfRange`] if any note falls outside 0-127
pub fn parse_chord_symbol(token: &str, octave: i8) -> Result<Chord, ChordMidiError> {
    let symbol = token.trim();
    let (spelling, suffix) = split_root(symbol)?;

    let spelling = spelling.to_string();
    let (root, octave_shift) =
        lookup_root(&spelling).ok_or_else(|| ChordMidiError::UnknownRoot {
            root: spelling.clone(),
            token: symbol.to_string(),
        })?;

    let quality = Quality::from_suffix(suffix).ok_or_else(|| ChordMidiError::UnknownQuality {
        quality: suffix.to_string(),
        token: symbol.to_string(),
    })?;

    let shifted = i32::from(octave) + octave_shift;
    let root_note = i32::from(root.value()) + (shifted + 1) * 12;

    let notes = quality
        .intervals()
        .iter()
        .map(|&interval| {
            let note = root_note + i32::from(interval);
            midi_note(note).ok_or_else(|| ChordMidiError::NoteOutOfRange {
                note,
                context: symbol.to_string(),
            })
        })
        .collect::<Result<NoteSet, _>>()?;

    // Any octave that leaves i8 puts the root far outside 0-127.
    let octave = i8::try_from(shifted).map_err(|_| ChordMidiError::NoteOutOfRange {
        note: root_note,
        context: symbol.to_string(),
    })?;

    log::trace!("parsed chord '{}' -> {:?}", symbol, notes);

    Ok(Chord {
        symbol: symbol.to_string(),
        root,
        octave,
        quality,
        notes,
    })
}

/// Parse a chord symbol into MIDI notes
///
/// A blank token is a rest and gives an empty note set.
///
/// # Examples
/// ```
/// use chordmidi::parse_chord;
///
/// // C minor 7th: C4, Eb4, G4, Bb4
/// assert_eq!(parse_chord("Cm7", 4).unwrap(), vec![60, 63, 67, 70]);
///
/// // G7 in octave 3: G3, B3, D4, F4
/// assert_eq!(parse_chord("G7", 3).unwrap(), vec![55, 59, 62, 65]);
///
/// assert!(parse_chord("  ", 4).unwrap().is_empty());
/// assert!(parse_chord("Cxyz", 4).is_err());
/// ```
pub fn parse_chord(token: &str, octave: i8) -> Result<NoteSet, ChordMidiError> {
    if token.trim().is_empty() {
        return Ok(NoteSet::new());
    }
    parse_chord_symbol(token, octave).map(|chord| chord.notes)
}

fn midi_note(note: i32) -> Option<u8> {
    u8::try_from(note).ok().filter(|n| *n <= 127)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chord_parsing() {
        // C minor 7th: C4, Eb4, G4, Bb4
        assert_eq!(parse_chord("Cm7", 4).unwrap(), vec![60, 63, 67, 70]);

        // F dominant 7th: F4, A4, C5, Eb5
        assert_eq!(parse_chord("F7", 4).unwrap(), vec![65, 69, 72, 75]);

        // Bb major 7th: Bb4, D5, F5, A5
        let bbmaj7 = parse_chord_symbol("Bbmaj7", 4).unwrap();
        assert_eq!(bbmaj7.root, PitchClass(10));
        assert_eq!(bbmaj7.notes, vec![70, 74, 77, 81]);

        // Plain letter is a major triad
        assert_eq!(parse_chord("C", 4).unwrap(), vec![60, 64, 67]);

        // F# major: F#4, A#4, C#5
        assert_eq!(parse_chord("F#", 4).unwrap(), vec![66, 70, 73]);
    }

    #[test]
    fn test_root_letter_is_case_insensitive() {
        assert_eq!(parse_chord("cm7", 4).unwrap(), vec![60, 63, 67, 70]);
        assert_eq!(parse_chord("bb", 4).unwrap(), parse_chord("Bb", 4).unwrap());
        assert_eq!(parse_chord("b", 4).unwrap(), vec![71, 75, 78]);
    }

    #[test]
    fn test_quality_is_case_sensitive() {
        assert_eq!(parse_chord("CM7", 4).unwrap(), vec![60, 64, 67, 71]);
        assert_eq!(parse_chord("CMaj7", 4).unwrap(), vec![60, 64, 67, 71]);
        assert_eq!(parse_chord("Cm7", 4).unwrap(), vec![60, 63, 67, 70]);
        assert!(matches!(
            parse_chord("CMAJ7", 4),
            Err(ChordMidiError::UnknownQuality { .. })
        ));
        assert!(matches!(
            parse_chord("CMin", 4),
            Err(ChordMidiError::UnknownQuality { .. })
        ));
    }

    #[test]
    fn test_cross_octave_enharmonics() {
        // Cb = B3
        let cb = parse_chord_symbol("Cb", 4).unwrap();
        assert_eq!(cb.root, PitchClass(11));
        assert_eq!(cb.octave, 3);
        assert_eq!(cb.notes, vec![47, 51, 54]);

        // B# = C5
        let bs = parse_chord_symbol("B#", 4).unwrap();
        assert_eq!(bs.root, PitchClass(0));
        assert_eq!(bs.octave, 5);
        assert_eq!(bs.notes, vec![72, 76, 79]);

        // E# and Fb stay in the written octave
        assert_eq!(parse_chord("E#", 4).unwrap(), parse_chord("F", 4).unwrap());
        assert_eq!(parse_chord("Fb", 4).unwrap(), parse_chord("E", 4).unwrap());
    }

    #[test]
    fn test_unknown_symbols_never_default_to_major() {
        assert_eq!(
            parse_chord("Xm7", 4),
            Err(ChordMidiError::InvalidChordFormat {
                token: "Xm7".to_string()
            })
        );
        assert_eq!(
            parse_chord("Cxyz", 4),
            Err(ChordMidiError::UnknownQuality {
                quality: "xyz".to_string(),
                token: "Cxyz".to_string(),
            })
        );
        assert!(parse_chord("7", 4).is_err());
        assert!(parse_chord("Hmaj7", 4).is_err());
    }

    #[test]
    fn test_every_quality_starts_at_root() {
        for quality in Quality::ALL {
            let intervals = quality.intervals();
            assert_eq!(intervals[0], 0, "{:?}", quality);
            assert!(intervals.windows(2).all(|w| w[0] < w[1]), "{:?}", quality);
        }
    }

    #[test]
    fn test_canonical_symbols_round_trip() {
        for quality in Quality::ALL {
            assert_eq!(Quality::from_suffix(quality.symbol()), Some(quality));
        }
    }

    #[test]
    fn test_quality_aliases() {
        assert_eq!(Quality::from_suffix("min"), Some(Quality::Minor));
        assert_eq!(Quality::from_suffix("-"), Some(Quality::Minor));
        assert_eq!(Quality::from_suffix("-7"), Some(Quality::Minor7));
        assert_eq!(Quality::from_suffix("dom7"), Some(Quality::Dominant7));
        assert_eq!(Quality::from_suffix("o7"), Some(Quality::Diminished7));
        assert_eq!(Quality::from_suffix("+"), Some(Quality::Augmented));
        assert_eq!(Quality::from_suffix("dom13"), Some(Quality::Dominant13));
        assert_eq!(Quality::from_suffix("°"), None);
    }

    #[test]
    fn test_extended_chords() {
        assert_eq!(parse_chord("C13", 4).unwrap(), vec![60, 64, 67, 70, 74, 81]);
        assert_eq!(parse_chord("Dm9", 4).unwrap(), vec![62, 65, 69, 72, 76]);
        assert_eq!(parse_chord("G11", 3).unwrap(), vec![55, 59, 62, 65, 69, 72]);
    }

    #[test]
    fn test_notes_out_of_range_are_rejected() {
        // C13 in octave 9: root 120, the minor 7th is already 130
        assert_eq!(
            parse_chord("C13", 9),
            Err(ChordMidiError::NoteOutOfRange {
                note: 130,
                context: "C13".to_string(),
            })
        );

        // Cb in octave -1 lands below note 0
        assert!(matches!(
            parse_chord("Cb", -1),
            Err(ChordMidiError::NoteOutOfRange { note: -1, .. })
        ));

        // C major in octave 9 tops out exactly at 127
        assert_eq!(parse_chord("C", 9).unwrap(), vec![120, 124, 127]);
        assert!(parse_chord("G", 9).is_err());

        // The enharmonic shift can step past the ends of i8
        assert!(matches!(
            parse_chord_symbol("Cb", i8::MIN),
            Err(ChordMidiError::NoteOutOfRange { .. })
        ));
        assert!(matches!(
            parse_chord_symbol("B#", i8::MAX),
            Err(ChordMidiError::NoteOutOfRange { .. })
        ));
    }

    #[test]
    fn test_chord_octave_matches_input_width() {
        let octave: i8 = parse_chord_symbol("B#", 3).unwrap().octave;
        assert_eq!(octave, 4);
        assert_eq!(parse_chord_symbol("Cb", 0).map(|c| c.octave), Ok(-1));
    }

    #[test]
    fn test_blank_token_is_a_rest() {
        assert_eq!(parse_chord("", 4).unwrap(), NoteSet::new());
        assert_eq!(parse_chord(" \t", 4).unwrap(), NoteSet::new());
        assert!(parse_chord_symbol("", 4).is_err());
    }

    #[test]
    fn test_chord_serializes_for_callers() {
        let chord = parse_chord_symbol("Am", 4).unwrap();
        assert_eq!(chord.root, PitchClass(9));

        let yaml = serde_yaml::to_string(&chord).unwrap();
        assert!(yaml.contains("symbol: Am"));
        assert!(yaml.contains("root: 9"));
        assert!(yaml.contains("quality: minor"));
    }

    #[test]
    fn test_surrounding_whitespace_is_ignored() {
        let chord = parse_chord_symbol("  Am7 ", 4).unwrap();
        assert_eq!(chord.symbol, "Am7");
        assert_eq!(chord.notes, vec![69, 72, 76, 79]);
    }
}
