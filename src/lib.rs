//! # chordmidi
//!
//! Convert a typed chord progression such as `Cm7 - F7 - Bbmaj7` into a
//! Standard MIDI File.
//!
//! ## Pipeline
//! ```text
//! string ──progression──▶ tokens ──chord──▶ note sets ──midi::sequence──▶ events ──midi::write_smf──▶ bytes
//! ```
//!
//! ## Modules
//! - `chord` - One chord symbol to MIDI notes
//! - `progression` - Tokenizing, error collection, front matter
//! - `midi` - Event sequencing and SMF serialization
//! - `settings` - Tempo, resolution, duration, octave
//! - `api` - Entry points
//! - `error` - Error type

pub mod api;
pub mod chord;
pub mod error;
pub mod midi;
pub mod progression;
pub mod settings;

pub use api::{
    build_file, build_file_with_settings, compile, compile_with_settings, parse_progression,
    parse_progression_at, DEFAULT_FILE_NAME, MIDI_MIME_TYPE,
};
pub use chord::{parse_chord, parse_chord_symbol, Chord, NoteSet, PitchClass, Quality};
pub use error::*;
pub use progression::{tokenize, Progression};
pub use settings::MidiSettings;
