//! # Settings
//!
//! Everything the sequencer and writer would otherwise hard-code: tempo,
//! resolution, chord length, octave, velocity and the placeholder note used
//! for rests.
//!
//! Settings can be written as YAML, either in a config file or in a front
//! matter block at the top of a progression:
//!
//! ```text
//! ---
//! tempo: 90
//! duration-beats: 2
//! ---
//! Cm7 - F7 - Bbmaj7
//! ```
//!
//! Missing keys keep their current value, so a document only needs the keys
//! it changes.

use serde::{Deserialize, Serialize};

use crate::chord::DEFAULT_OCTAVE;
use crate::error::ChordMidiError;
use crate::midi::{MAX_DATA_BYTE, MAX_DELTA_TICKS, MAX_DIVISION, MAX_TEMPO_MICROS};

/// Pipeline settings
///
/// # Fields
/// - `tempo`: beats (quarter notes) per minute
/// - `ticks_per_beat`: MIDI division, ticks per quarter note
/// - `duration_beats`: length of every chord in beats (fractions allowed)
/// - `octave`: octave of chord roots (4 puts C at 60)
/// - `velocity`: note-on and note-off velocity
/// - `rest_note`: note number of the silent note-off that stands in for a rest
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct MidiSettings {
    pub tempo: f64,
    pub ticks_per_beat: u16,
    pub duration_beats: f64,
    pub octave: i8,
    pub velocity: u8,
    pub rest_note: u8,
}

impl Default for MidiSettings {
    fn default() -> Self {
        Self {
            tempo: 120.0,
            ticks_per_beat: 480,
            duration_beats: 4.0,
            octave: DEFAULT_OCTAVE,
            velocity: 64,
            rest_note: 60,
        }
    }
}

/// Raw settings for YAML deserialization
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct RawSettings {
    tempo: Option<f64>,
    ticks_per_beat: Option<u16>,
    duration_beats: Option<f64>,
    octave: Option<i8>,
    velocity: Option<u8>,
    rest_note: Option<u8>,
}

impl MidiSettings {
    /// Parse a YAML settings document over the defaults.
    ///
    /// # Example
    /// ```
    /// use chordmidi::MidiSettings;
    ///
    /// let settings = MidiSettings::from_yaml("tempo: 90\nduration-beats: 2").unwrap();
    /// assert_eq!(settings.tempo, 90.0);
    /// assert_eq!(settings.duration_ticks(), 960);
    /// assert_eq!(settings.octave, 4);
    /// ```
    pub fn from_yaml(content: &str) -> Result<Self, ChordMidiError> {
        Self::default().merge_yaml(content)
    }

    /// Overlay a YAML settings document on these settings.
    ///
    /// The result is validated before it is returned.
    pub fn merge_yaml(&self, content: &str) -> Result<Self, ChordMidiError> {
        let mut merged = self.clone();

        // An empty document deserializes to nothing at all.
        if !content.trim().is_empty() {
            let raw: RawSettings = serde_yaml::from_str(content)
                .map_err(|e| ChordMidiError::SettingsError(e.to_string()))?;

            if let Some(tempo) = raw.tempo {
                merged.tempo = tempo;
            }
            if let Some(ticks_per_beat) = raw.ticks_per_beat {
                merged.ticks_per_beat = ticks_per_beat;
            }
            if let Some(duration_beats) = raw.duration_beats {
                merged.duration_beats = duration_beats;
            }
            if let Some(octave) = raw.octave {
                merged.octave = octave;
            }
            if let Some(velocity) = raw.velocity {
                merged.velocity = velocity;
            }
            if let Some(rest_note) = raw.rest_note {
                merged.rest_note = rest_note;
            }
        }

        merged.validate()?;
        Ok(merged)
    }

    /// Check every value against what a Standard MIDI File can hold.
    pub fn validate(&self) -> Result<(), ChordMidiError> {
        if !self.tempo.is_finite() || self.tempo <= 0.0 {
            return Err(ChordMidiError::SettingsError(format!(
                "tempo must be greater than 0, got {}",
                self.tempo
            )));
        }
        let micros = (60_000_000.0 / self.tempo).round();
        if micros < 1.0 || micros > f64::from(MAX_TEMPO_MICROS) {
            return Err(ChordMidiError::SettingsError(format!(
                "tempo {} BPM does not fit a MIDI tempo event",
                self.tempo
            )));
        }

        if self.ticks_per_beat == 0 || self.ticks_per_beat > MAX_DIVISION {
            return Err(ChordMidiError::SettingsError(format!(
                "ticks-per-beat must be between 1 and {}, got {}",
                MAX_DIVISION, self.ticks_per_beat
            )));
        }

        if !self.duration_beats.is_finite() || self.duration_beats < 0.0 {
            return Err(ChordMidiError::SettingsError(format!(
                "duration-beats must be 0 or more, got {}",
                self.duration_beats
            )));
        }
        if f64::from(self.ticks_per_beat) * self.duration_beats > f64::from(MAX_DELTA_TICKS) {
            return Err(ChordMidiError::SettingsError(format!(
                "duration-beats {} is too long for a MIDI delta-time",
                self.duration_beats
            )));
        }

        if self.velocity > MAX_DATA_BYTE {
            return Err(ChordMidiError::SettingsError(format!(
                "velocity must be between 0 and 127, got {}",
                self.velocity
            )));
        }
        if self.rest_note > MAX_DATA_BYTE {
            return Err(ChordMidiError::SettingsError(format!(
                "rest-note must be between 0 and 127, got {}",
                self.rest_note
            )));
        }

        Ok(())
    }

    /// Tempo as microseconds per quarter note (500000 at 120 BPM).
    pub fn tempo_micros(&self) -> u32 {
        (60_000_000.0 / self.tempo).round() as u32
    }

    /// Length of one chord in ticks, truncated toward zero.
    pub fn duration_ticks(&self) -> u32 {
        (f64::from(self.ticks_per_beat) * self.duration_beats) as u32
    }
}
