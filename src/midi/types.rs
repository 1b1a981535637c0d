//! MIDI event and file type definitions

use crate::error::ChordMidiError;

/// Largest note number or velocity (7-bit data byte).
pub const MAX_DATA_BYTE: u8 = 0x7F;
/// Largest tempo value that fits the 3-byte `set_tempo` payload.
pub const MAX_TEMPO_MICROS: u32 = 0x00FF_FFFF;
/// Largest metrical division (the top bit selects SMPTE timing).
pub const MAX_DIVISION: u16 = 0x7FFF;
/// Largest delta-time a 4-byte VLQ can carry.
pub const MAX_DELTA_TICKS: u32 = 0x0FFF_FFFF;

/// What an event does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    NoteOn { note: u8, velocity: u8 },
    NoteOff { note: u8, velocity: u8 },
    /// Meta event: microseconds per quarter note (24-bit)
    SetTempo { micros_per_quarter: u32 },
    /// Meta event: last event of every track
    EndOfTrack,
}

/// A timed MIDI event
///
/// `delta` is the number of ticks since the previous event in the track,
/// never an absolute time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Event {
    pub delta: u32,
    pub kind: EventKind,
}

impl Event {
    pub fn note_on(note: u8, velocity: u8, delta: u32) -> Self {
        Self {
            delta,
            kind: EventKind::NoteOn { note, velocity },
        }
    }

    pub fn note_off(note: u8, velocity: u8, delta: u32) -> Self {
        Self {
            delta,
            kind: EventKind::NoteOff { note, velocity },
        }
    }

    pub fn set_tempo(micros_per_quarter: u32) -> Self {
        Self {
            delta: 0,
            kind: EventKind::SetTempo { micros_per_quarter },
        }
    }

    pub fn end_of_track() -> Self {
        Self {
            delta: 0,
            kind: EventKind::EndOfTrack,
        }
    }

    pub fn is_note(&self) -> bool {
        matches!(
            self.kind,
            EventKind::NoteOn { .. } | EventKind::NoteOff { .. }
        )
    }

    /// Check that every field fits its encoding.
    ///
    /// # Errors
    /// - [`ChordMidiError::NoteOutOfRange`] for a note above 127
    /// - [`ChordMidiError::InvalidMidiData`] for a velocity above 127, a tempo
    ///   outside 1..=0xFFFFFF, or a delta above 0x0FFFFFFF
    pub fn validate(&self) -> Result<(), ChordMidiError> {
        if self.delta > MAX_DELTA_TICKS {
            return Err(ChordMidiError::InvalidMidiData(format!(
                "delta-time {} exceeds {}",
                self.delta, MAX_DELTA_TICKS
            )));
        }

        match self.kind {
            EventKind::NoteOn { note, velocity } | EventKind::NoteOff { note, velocity } => {
                if note > MAX_DATA_BYTE {
                    return Err(ChordMidiError::NoteOutOfRange {
                        note: i32::from(note),
                        context: "note event".to_string(),
                    });
                }
                if velocity > MAX_DATA_BYTE {
                    return Err(ChordMidiError::InvalidMidiData(format!(
                        "velocity {} out of range 0-127",
                        velocity
                    )));
                }
            }
            EventKind::SetTempo { micros_per_quarter } => {
                if micros_per_quarter == 0 || micros_per_quarter > MAX_TEMPO_MICROS {
                    return Err(ChordMidiError::InvalidMidiData(format!(
                        "tempo {} us does not fit 1..={}",
                        micros_per_quarter, MAX_TEMPO_MICROS
                    )));
                }
            }
            EventKind::EndOfTrack => {}
        }
        Ok(())
    }
}

/// An ordered, finished list of events
///
/// Tracks are built by [`TrackBuilder`] and cannot be changed afterwards. The
/// last event is always [`EventKind::EndOfTrack`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    events: Vec<Event>,
}

impl Track {
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Sum of all deltas: where the end of the track falls, in ticks.
    pub fn total_ticks(&self) -> u64 {
        self.events.iter().map(|e| u64::from(e.delta)).sum()
    }
}

/// Incremental track construction
#[derive(Debug, Default)]
pub struct TrackBuilder {
    events: Vec<Event>,
}

impl TrackBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event.
    ///
    /// Events that do not fit their encoding are rejected, so a finished
    /// [`Track`] always serializes to a valid chunk.
    pub fn push(&mut self, event: Event) -> Result<(), ChordMidiError> {
        event.validate()?;
        self.events.push(event);
        Ok(())
    }

    /// Append the end-of-track event and freeze the track.
    pub fn finish(mut self) -> Track {
        self.events.push(Event::end_of_track());
        Track {
            events: self.events,
        }
    }
}

/// Header chunk fields
///
/// # Fields
/// - `format`: 0 = one multi-channel track
/// - `tracks`: number of track chunks
/// - `division`: ticks per quarter note
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub format: u16,
    pub tracks: u16,
    pub division: u16,
}

impl Header {
    /// A format 0 file holds exactly one track, and the division must be a
    /// non-zero metrical value.
    pub fn validate(&self) -> Result<(), ChordMidiError> {
        if self.format != 0 || self.tracks != 1 {
            return Err(ChordMidiError::InvalidMidiData(format!(
                "format {} with {} tracks, expected format 0 with 1 track",
                self.format, self.tracks
            )));
        }
        if self.division == 0 || self.division > MAX_DIVISION {
            return Err(ChordMidiError::InvalidMidiData(format!(
                "division must be between 1 and {}, got {}",
                MAX_DIVISION, self.division
            )));
        }
        Ok(())
    }
}

/// A single-track (format 0) Standard MIDI File
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MidiFile {
    pub header: Header,
    pub track: Track,
}

impl MidiFile {
    pub fn new(track: Track, ticks_per_quarter: u16) -> Self {
        Self {
            header: Header {
                format: 0,
                tracks: 1,
                division: ticks_per_quarter,
            },
            track,
        }
    }
}
