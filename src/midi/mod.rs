//! # MIDI Module
//!
//! Turn parsed progressions into Standard MIDI File bytes.
//!
//! ## Purpose
//! This module is the back half of the pipeline:
//! 1. **Sequencing** - note sets become timed note-on/note-off events
//! 2. **Serialization** - events become a byte-exact format 0 SMF
//!
//! ## Sub-modules
//! - `types` - Event, Track, Header and MidiFile definitions
//! - `sequencer` - Progression to event track
//! - `writer` - Event track to SMF bytes, including VLQ encoding
//!
//! ## Key Types
//! - [`Event`] - One timed instruction (note on/off, tempo, end of track)
//! - [`Track`] - Finished, read-only list of events
//! - [`MidiFile`] - Header plus one track
//!
//! ## Entry Points
//! - [`sequence()`] - Progression to track
//! - [`write_smf()`] - Track to bytes
//!
//! ## Example
//! ```rust
//! use chordmidi::midi::{sequence, write_smf};
//! use chordmidi::MidiSettings;
//!
//! let settings = MidiSettings::default();
//! let progression = vec![vec![60, 63, 67, 70], vec![65, 69, 72, 75]];
//!
//! let track = sequence(&progression, &settings).unwrap();
//! let bytes = write_smf(&track, settings.ticks_per_beat).unwrap();
//!
//! assert_eq!(&bytes[0..4], b"MThd");
//! assert_eq!(track.len(), 1 + 2 * 8 + 1);
//! ```
//!
//! ## Timing
//!
//! Every delta-time is relative to the previous event. A chord of `n` notes
//! lasting `d` ticks is written as:
//!
//! ```text
//! 0 note_on ... 0 note_on     (n events)
//! d note_off 0 note_off ...   (n events)
//! ```
//!
//! so the next chord starts exactly `d` ticks after this one.
//!
//! ## Byte Layout
//!
//! ```text
//! MThd 00000006 0000 0001 01E0     header: format 0, one track, 480 tpq
//! MTrk <len>                        track chunk
//!   00 FF 51 03 07 A1 20            tempo 500000 us (120 BPM)
//!   00 90 3C 40 ...                 note events
//!   00 FF 2F 00                     end of track
//! ```
//!
//! ## Related Modules
//! - `chord` - Produces the note sets
//! - `settings` - Tempo, resolution and duration
//! - `api` - Runs the whole pipeline

mod sequencer;
mod types;
mod writer;


pub use sequencer::sequence;
pub use types::{
    Event, EventKind, Header, MidiFile, Track, TrackBuilder, MAX_DATA_BYTE, MAX_DELTA_TICKS,
    MAX_DIVISION, MAX_TEMPO_MICROS,
};
pub use writer::{encode_track, write_smf, write_vlq};
