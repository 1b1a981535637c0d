//! Standard MIDI File serialization
//!
//! Writes a format 0 file: one `MThd` header chunk and one `MTrk` track
//! chunk. All fixed-width integers are big-endian; delta-times are
//! variable-length quantities.

use super::types::{Event, EventKind, MidiFile, Track};
use crate::error::ChordMidiError;

const HEADER_LENGTH: u32 = 6;

const STATUS_NOTE_OFF: u8 = 0x80;
const STATUS_NOTE_ON: u8 = 0x90;
const META: u8 = 0xFF;
const META_SET_TEMPO: u8 = 0x51;
const META_END_OF_TRACK: u8 = 0x2F;

impl MidiFile {
    /// Serialize the whole file.
    ///
    /// # Errors
    /// Returns [`ChordMidiError::InvalidMidiData`] if the header is not a
    /// single-track file with a division in 1..=0x7FFF.
    pub fn to_bytes(&self) -> Result<Vec<u8>, ChordMidiError> {
        self.header.validate()?;
        let track = encode_track(&self.track);
        let mut out = Vec::with_capacity(14 + 8 + track.len());

        // MThd  length=6  format  ntrks  division
        out.extend_from_slice(b"MThd");
        out.extend_from_slice(&HEADER_LENGTH.to_be_bytes());
        out.extend_from_slice(&self.header.format.to_be_bytes());
        out.extend_from_slice(&self.header.tracks.to_be_bytes());
        out.extend_from_slice(&self.header.division.to_be_bytes());

        // The length prefix is taken from the encoded chunk itself.
        out.extend_from_slice(b"MTrk");
        out.extend_from_slice(&(track.len() as u32).to_be_bytes());
        out.extend_from_slice(&track);

        Ok(out)
    }
}

/// Serialize a track as a single-track Standard MIDI File
///
/// # Example
/// ```
/// use chordmidi::midi::{sequence, write_smf};
/// use chordmidi::MidiSettings;
///
/// let track = sequence(&[], &MidiSettings::default()).unwrap();
/// let bytes = write_smf(&track, 480).unwrap();
///
/// assert_eq!(&bytes[..4], b"MThd");
/// assert_eq!(&bytes[12..14], &[0x01, 0xE0]); // 480 ticks per quarter
/// assert_eq!(&bytes[14..18], b"MTrk");
///
/// assert!(write_smf(&track, 0).is_err());
/// ```
pub fn write_smf(track: &Track, ticks_per_quarter: u16) -> Result<Vec<u8>, ChordMidiError> {
    MidiFile::new(track.clone(), ticks_per_quarter).to_bytes()
}

/// Encode the event stream of a track chunk (without the chunk header).
///
/// Every event was checked when it was pushed, so this cannot fail.
pub fn encode_track(track: &Track) -> Vec<u8> {
    let mut t = Vec::new();
    for event in track.events() {
        encode_event(&mut t, event);
    }
    t
}

fn encode_event(buf: &mut Vec<u8>, event: &Event) {
    write_vlq(buf, event.delta);
    match event.kind {
        EventKind::NoteOn { note, velocity } => {
            buf.extend_from_slice(&[STATUS_NOTE_ON, note, velocity]);
        }
        EventKind::NoteOff { note, velocity } => {
            buf.extend_from_slice(&[STATUS_NOTE_OFF, note, velocity]);
        }
        EventKind::SetTempo { micros_per_quarter } => {
            buf.extend_from_slice(&[META, META_SET_TEMPO, 0x03]);
            // Low three bytes of the big-endian u32
            buf.extend_from_slice(&micros_per_quarter.to_be_bytes()[1..]);
        }
        EventKind::EndOfTrack => {
            buf.extend_from_slice(&[META, META_END_OF_TRACK, 0x00]);
        }
    }
}

/// Write a MIDI variable-length quantity (VLQ).
///
/// Seven bits per byte, most significant group first, high bit set on every
/// byte except the last. Zero is a single `0x00`. Values above
/// `MAX_DELTA_TICKS` take five bytes, which is not a valid delta-time;
/// [`Event::validate`] keeps them out of tracks.
pub fn write_vlq(buf: &mut Vec<u8>, mut value: u32) {
    let mut bytes = [0u8; 5];
    let mut i = bytes.len() - 1;
    bytes[i] = (value & 0x7F) as u8;
    value >>= 7;
    while value > 0 {
        i -= 1;
        bytes[i] = ((value & 0x7F) | 0x80) as u8;
        value >>= 7;
    }
    buf.extend_from_slice(&bytes[i..]);
}
