//! Event sequencing
//!
//! Turns a progression into one track of note events. Each chord is a closed
//! block: every note starts together, and every note stops together once the
//! chord's duration has passed. Nothing sustains across a chord boundary.

use super::types::{Event, Track, TrackBuilder, MAX_DATA_BYTE};
use crate::chord::NoteSet;
use crate::error::ChordMidiError;
use crate::settings::MidiSettings;

/// Sequence a progression into a MIDI track
///
/// # Event Layout
/// 1. `set_tempo` at delta 0
/// 2. For each chord:
///    - `note_on` for every note, all at delta 0, in stored order
///    - `note_off` for every note in the same order; the first carries the
///      chord duration, the others delta 0
/// 3. `end_of_track` at delta 0
///
/// # Rests
/// An empty note set emits a single `note_off` of `settings.rest_note` with
/// velocity 0 and the chord duration as delta. There is no matching
/// `note_on`; the event only moves time forward.
///
/// # Example
/// ```
/// use chordmidi::midi::{sequence, EventKind};
/// use chordmidi::MidiSettings;
///
/// let track = sequence(&[vec![60, 64, 67]], &MidiSettings::default()).unwrap();
///
/// // tempo + 3 note_on + 3 note_off + end_of_track
/// assert_eq!(track.len(), 8);
/// assert_eq!(track.events()[4].delta, 1920);
/// assert_eq!(track.events()[7].kind, EventKind::EndOfTrack);
/// ```
///
/// # Errors
/// - [`ChordMidiError::SettingsError`] if the settings are out of range
/// - [`ChordMidiError::NoteOutOfRange`] if any note is above 127
pub fn sequence(progression: &[NoteSet], settings: &MidiSettings) -> Result<Track, ChordMidiError> {
    settings.validate()?;
    let duration_ticks = settings.duration_ticks();
    let velocity = settings.velocity;

    let mut builder = TrackBuilder::new();
    builder.push(Event::set_tempo(settings.tempo_micros()))?;

    for (index, notes) in progression.iter().enumerate() {
        if let Some(&note) = notes.iter().find(|&&n| n > MAX_DATA_BYTE) {
            return Err(ChordMidiError::NoteOutOfRange {
                note: i32::from(note),
                context: format!("chord {}", index + 1),
            });
        }

        if notes.is_empty() {
            builder.push(Event::note_off(settings.rest_note, 0, duration_ticks))?;
            continue;
        }

        for &note in notes {
            builder.push(Event::note_on(note, velocity, 0))?;
        }
        for (i, &note) in notes.iter().enumerate() {
            let delta = if i == 0 { duration_ticks } else { 0 };
            builder.push(Event::note_off(note, velocity, delta))?;
        }
    }

    let track = builder.finish();
    log::debug!(
        "sequenced {} chords into {} events ({} ticks)",
        progression.len(),
        track.len(),
        track.total_ticks()
    );
    Ok(track)
}
