//! # Public API
//!
//! This module contains the main entry points for the chordmidi library.
//!
//! ## Pipeline Functions
//!
//! - [`parse_progression()`] - Chord text to note sets, or every parse error
//! - [`build_file()`] - Note sets to Standard MIDI File bytes
//! - [`compile()`] - Both steps on a source that may carry YAML front matter
//! - [`compile_with_settings()`] - Same, starting from custom settings
//!
//! ## Typical Usage
//!
//! ```rust
//! use chordmidi::compile;
//!
//! let source = r#"---
//! tempo: 96
//! duration-beats: 2
//! ---
//! Cm7 - F7 - Bbmaj7 - Ebmaj7
//! "#;
//!
//! let bytes = compile(source)?;
//! // Offer `bytes` as a download with chordmidi::MIDI_MIME_TYPE
//! assert_eq!(&bytes[..4], b"MThd");
//! # Ok::<(), chordmidi::ChordMidiError>(())
//! ```
//!
//! ## Two-Step Usage
//!
//! ```rust
//! use chordmidi::{build_file, parse_progression};
//!
//! let progression = parse_progression("C G Am F").map_err(|errors| errors.len())?;
//! let bytes = build_file(&progression).map_err(|_| 0usize)?;
//! assert_eq!(&bytes[14..18], b"MTrk");
//! # Ok::<(), usize>(())
//! ```

use crate::chord::{NoteSet, DEFAULT_OCTAVE};
use crate::error::ChordMidiError;
use crate::midi::{sequence, MidiFile};
use crate::progression::{split_front_matter, split_tokens, tokenize_at, Progression};
use crate::settings::MidiSettings;

/// MIME type for the generated bytes.
pub const MIDI_MIME_TYPE: &str = "audio/midi";

/// File name offered for the generated bytes.
pub const DEFAULT_FILE_NAME: &str = "progression.mid";

/// Parse a chord progression with roots in octave 4.
///
/// # Example
/// ```rust
/// use chordmidi::parse_progression;
///
/// let progression = parse_progression("Cm7 - F7 - Bbmaj7").unwrap();
/// assert_eq!(progression[0], vec![60, 63, 67, 70]);
///
/// let errors = parse_progression("Xm7 - C - Cxyz").unwrap_err();
/// assert_eq!(errors.len(), 2);
/// ```
///
/// # Errors
/// Returns every chord error in input order if any token fails.
pub fn parse_progression(input: &str) -> Result<Progression, Vec<ChordMidiError>> {
    parse_progression_at(input, DEFAULT_OCTAVE)
}

/// Parse a chord progression with roots in the given octave.
pub fn parse_progression_at(
    input: &str,
    octave: i8,
) -> Result<Progression, Vec<ChordMidiError>> {
    let (progression, errors) = tokenize_at(input, octave);
    if errors.is_empty() {
        Ok(progression)
    } else {
        Err(errors)
    }
}

/// Build a Standard MIDI File from note sets with default settings.
///
/// 120 BPM, 480 ticks per quarter note, four beats per chord, velocity 64.
pub fn build_file(progression: &[NoteSet]) -> Result<Vec<u8>, ChordMidiError> {
    build_file_with_settings(progression, &MidiSettings::default())
}

/// Build a Standard MIDI File from note sets.
///
/// # Errors
/// - [`ChordMidiError::SettingsError`] if the settings are out of range
/// - [`ChordMidiError::NoteOutOfRange`] if a note is above 127; no bytes are
///   produced in that case
pub fn build_file_with_settings(
    progression: &[NoteSet],
    settings: &MidiSettings,
) -> Result<Vec<u8>, ChordMidiError> {
    let track = sequence(progression, settings)?;
    let bytes = MidiFile::new(track, settings.ticks_per_beat).to_bytes()?;
    log::debug!("wrote {} bytes of MIDI", bytes.len());
    Ok(bytes)
}

/// Compile a chord progression source to Standard MIDI File bytes.
///
/// This is the main entry point for the library.
///
/// # Pipeline
/// 1. Split off YAML front matter and merge it over the default settings
/// 2. Tokenize and parse every chord
/// 3. Sequence note events
/// 4. Write the SMF bytes
///
/// # Example
/// ```rust
/// use chordmidi::compile;
///
/// let bytes = compile("Cm7 - F7 - Bbmaj7")?;
/// assert_eq!(&bytes[..4], b"MThd");
/// # Ok::<(), chordmidi::ChordMidiError>(())
/// ```
///
/// # Errors
/// - [`ChordMidiError::SettingsError`] for bad front matter
/// - [`ChordMidiError::EmptyProgression`] if there are no chord tokens
/// - [`ChordMidiError::Progression`] with every chord error
pub fn compile(source: &str) -> Result<Vec<u8>, ChordMidiError> {
    compile_with_settings(source, &MidiSettings::default())
}

/// Compile with custom base settings.
///
/// Front matter in the source overrides `settings` key by key.
///
/// # Example
/// ```rust
/// use chordmidi::{compile_with_settings, MidiSettings};
///
/// let settings = MidiSettings {
///     tempo: 100.0,
///     ..MidiSettings::default()
/// };
/// let bytes = compile_with_settings("Am - Dm - E7", &settings)?;
/// // tempo event payload: 600000 us
/// assert_eq!(&bytes[26..29], &[0x09, 0x27, 0xC0]);
/// # Ok::<(), chordmidi::ChordMidiError>(())
/// ```
pub fn compile_with_settings(
    source: &str,
    settings: &MidiSettings,
) -> Result<Vec<u8>, ChordMidiError> {
    let (front_matter, chords) = split_front_matter(source);
    let settings = match front_matter {
        Some(yaml) => settings.merge_yaml(&yaml)?,
        None => {
            settings.validate()?;
            settings.clone()
        }
    };

    if split_tokens(&chords).is_empty() {
        return Err(ChordMidiError::EmptyProgression);
    }

    let progression =
        parse_progression_at(&chords, settings.octave).map_err(ChordMidiError::Progression)?;
    build_file_with_settings(&progression, &settings)
}
