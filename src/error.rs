//! # Error Types
//!
//! This module defines all error types for chordmidi.
//!
//! Chord errors carry the offending token so a caller can point the user at
//! the exact piece of input that failed. Parse errors for a whole progression
//! are collected rather than short-circuited, and surface together as
//! [`ChordMidiError::Progression`].
//!
//! ## Error Types
//! - `InvalidChordFormat` - Token does not start with a letter A-G
//! - `UnknownRoot` - Root spelling not in the root table
//! - `UnknownQuality` - Suffix not in the quality table
//! - `NoteOutOfRange` - Computed MIDI note outside 0-127
//! - `EmptyProgression` - Input contained no chord tokens
//! - `SettingsError` - Invalid YAML or out-of-range settings
//! - `InvalidMidiData` - Event or header value a MIDI file cannot hold
//! - `Progression` - Every parse error of one input, in order
//!
//! ## Usage
//! ```rust
//! use chordmidi::{compile, ChordMidiError};
//!
//! match compile("Cm7 - Xm7 - Cxyz") {
//!     Ok(bytes) => println!("{} bytes", bytes.len()),
//!     Err(ChordMidiError::Progression(errors)) => {
//!         for err in &errors {
//!             eprintln!("- {}", err);
//!         }
//!         assert_eq!(errors.len(), 2);
//!     }
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChordMidiError {
    /// The token does not start with a note letter.
    ///
    /// # Example
    /// ```
    /// # use chordmidi::ChordMidiError;
    /// let err = ChordMidiError::InvalidChordFormat { token: "7th".to_string() };
    /// assert_eq!(err.to_string(), "Invalid chord format: 7th");
    /// ```
    #[error("Invalid chord format: {token}")]
    InvalidChordFormat { token: String },

    /// Well-formed root spelling that has no entry in the root table.
    #[error("Unknown root: {root} in '{token}'")]
    UnknownRoot { root: String, token: String },

    /// Quality suffix that has no entry in the quality table.
    ///
    /// # Example
    /// ```
    /// # use chordmidi::ChordMidiError;
    /// let err = ChordMidiError::UnknownQuality {
    ///     quality: "xyz".to_string(),
    ///     token: "Cxyz".to_string(),
    /// };
    /// assert_eq!(err.to_string(), "Unknown chord quality: 'xyz' in 'Cxyz'");
    /// ```
    #[error("Unknown chord quality: '{quality}' in '{token}'")]
    UnknownQuality { quality: String, token: String },

    /// A computed or supplied note number does not fit in 0-127.
    #[error("MIDI note {note} out of range 0-127 in '{context}'")]
    NoteOutOfRange { note: i32, context: String },

    #[error("Please enter a chord progression")]
    EmptyProgression,

    /// Invalid settings.
    ///
    /// Occurs when YAML settings (config file or front matter) cannot be
    /// deserialized, or when a value is out of range.
    ///
    /// # Example
    /// ```
    /// # use chordmidi::ChordMidiError;
    /// let err = ChordMidiError::SettingsError("tempo must be greater than 0".to_string());
    /// assert_eq!(err.to_string(), "Invalid settings: tempo must be greater than 0");
    /// ```
    #[error("Invalid settings: {0}")]
    SettingsError(String),

    /// An event or header field does not fit its MIDI encoding.
    ///
    /// # Example
    /// ```
    /// # use chordmidi::ChordMidiError;
    /// let err = ChordMidiError::InvalidMidiData("velocity 200 out of range 0-127".to_string());
    /// assert_eq!(err.to_string(), "Invalid MIDI data: velocity 200 out of range 0-127");
    /// ```
    #[error("Invalid MIDI data: {0}")]
    InvalidMidiData(String),

    /// All chord errors found in one progression.
    #[error("Error parsing chords: {}", join_errors(.0))]
    Progression(Vec<ChordMidiError>),
}

fn join_errors(errors: &[ChordMidiError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
