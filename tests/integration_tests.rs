//! Integration tests for chordmidi
//!
//! Tests the full pipeline from chord text to MIDI bytes, reading the output
//! back with an independent SMF parser.

use chordmidi::{
    build_file, build_file_with_settings, compile, compile_with_settings, parse_chord,
    parse_progression, ChordMidiError, MidiSettings,
};
use midly::{Format, MetaMessage, MidiMessage, Smf, Timing, TrackEventKind};

#[derive(Debug, PartialEq)]
enum Parsed {
    On(u8, u8),
    Off(u8, u8),
    Tempo(u32),
    End,
}

/// Read a file back, returning ticks per quarter and (delta, event) pairs.
fn reparse(bytes: &[u8]) -> (u16, Vec<(u32, Parsed)>) {
    let smf = Smf::parse(bytes).expect("generated file should parse");
    assert_eq!(smf.header.format, Format::SingleTrack);
    assert_eq!(smf.tracks.len(), 1);

    let ticks_per_quarter = match smf.header.timing {
        Timing::Metrical(tpq) => tpq.as_int(),
        other => panic!("unexpected timing {:?}", other),
    };

    let events = smf.tracks[0]
        .iter()
        .map(|event| {
            let parsed = match event.kind {
                TrackEventKind::Midi { message, .. } => match message {
                    MidiMessage::NoteOn { key, vel } => Parsed::On(key.as_int(), vel.as_int()),
                    MidiMessage::NoteOff { key, vel } => Parsed::Off(key.as_int(), vel.as_int()),
                    other => panic!("unexpected message {:?}", other),
                },
                TrackEventKind::Meta(MetaMessage::Tempo(tempo)) => Parsed::Tempo(tempo.as_int()),
                TrackEventKind::Meta(MetaMessage::EndOfTrack) => Parsed::End,
                other => panic!("unexpected event {:?}", other),
            };
            (event.delta.as_int(), parsed)
        })
        .collect();

    (ticks_per_quarter, events)
}

#[test]
fn test_compile_ii_v_i() {
    let bytes = compile("Cm7 - F7 - Bbmaj7").unwrap();
    let (ticks_per_quarter, events) = reparse(&bytes);

    assert_eq!(ticks_per_quarter, 480);
    assert_eq!(events.len(), 3 * (2 * 4) + 2);
    assert_eq!(events[0], (0, Parsed::Tempo(500_000)));
    assert_eq!(events[1], (0, Parsed::On(60, 64)));
    assert_eq!(events[4], (0, Parsed::On(70, 64)));
    assert_eq!(events[5], (1920, Parsed::Off(60, 64)));
    assert_eq!(events[9], (0, Parsed::On(65, 64)));
    assert_eq!(events[17], (0, Parsed::On(70, 64)));
    assert_eq!(events[20], (0, Parsed::On(81, 64)));
    assert_eq!(events[25], (0, Parsed::End));

    let total: u32 = events.iter().map(|(delta, _)| delta).sum();
    assert_eq!(total, 3 * 1920);
}

#[test]
fn test_track_length_field() {
    for source in ["C", "C G Am F", "C13 - Dbmaj9 - E#sus4 - Cb - B#dim7"] {
        let bytes = compile(source).unwrap();
        let length = u32::from_be_bytes([bytes[18], bytes[19], bytes[20], bytes[21]]);
        assert_eq!(length as usize, bytes.len() - 22, "{}", source);
    }
}

#[test]
fn test_front_matter_settings() {
    let source = r#"---
tempo: 90
duration-beats: 1.5
octave: 3
---
C - G
"#;
    let (ticks_per_quarter, events) = reparse(&compile(source).unwrap());

    assert_eq!(ticks_per_quarter, 480);
    assert_eq!(events[0], (0, Parsed::Tempo(666_667)));
    assert_eq!(events[1], (0, Parsed::On(48, 64)));
    assert_eq!(events[4], (720, Parsed::Off(48, 64)));
}

#[test]
fn test_dash_block_of_chords_compiles_as_chords() {
    let (_, events) = reparse(&compile("---\nC\n---\nG").unwrap());
    assert_eq!(events[1], (0, Parsed::On(60, 64)));
    assert_eq!(events[7], (0, Parsed::On(67, 64)));
    assert_eq!(events.len(), 2 * (2 * 3) + 2);

    let (_, events) = reparse(&compile("---\nCm7 - F7\n---\nBbmaj7").unwrap());
    assert_eq!(events.len(), 3 * (2 * 4) + 2);
    assert_eq!(events[17], (0, Parsed::On(70, 64)));
}

#[test]
fn test_front_matter_overrides_base_settings() {
    let settings = MidiSettings {
        tempo: 60.0,
        ticks_per_beat: 96,
        ..MidiSettings::default()
    };

    let (ticks_per_quarter, events) =
        reparse(&compile_with_settings("---\ntempo: 150\n---\nDm", &settings).unwrap());
    assert_eq!(ticks_per_quarter, 96);
    assert_eq!(events[0], (0, Parsed::Tempo(400_000)));
    assert_eq!(events[4], (384, Parsed::Off(62, 64)));

    let (_, events) = reparse(&compile_with_settings("Dm", &settings).unwrap());
    assert_eq!(events[0], (0, Parsed::Tempo(1_000_000)));
}

#[test]
fn test_every_parse_error_is_reported() {
    let err = compile("Xm7 - C - Cxyz - G - Hdim").unwrap_err();
    assert_eq!(
        err,
        ChordMidiError::Progression(vec![
            ChordMidiError::InvalidChordFormat {
                token: "Xm7".to_string()
            },
            ChordMidiError::UnknownQuality {
                quality: "xyz".to_string(),
                token: "Cxyz".to_string(),
            },
            ChordMidiError::InvalidChordFormat {
                token: "Hdim".to_string()
            },
        ])
    );

    let errors = parse_progression("Xm7 Cxyz").unwrap_err();
    assert_eq!(errors.len(), 2);
}

#[test]
fn test_out_of_range_octave_is_rejected() {
    let err = compile("---\noctave: 9\n---\nC - C13").unwrap_err();
    assert_eq!(
        err,
        ChordMidiError::Progression(vec![ChordMidiError::NoteOutOfRange {
            note: 130,
            context: "C13".to_string(),
        }])
    );
}

#[test]
fn test_empty_input() {
    assert_eq!(compile(""), Err(ChordMidiError::EmptyProgression));
    assert_eq!(compile(" - -- \n"), Err(ChordMidiError::EmptyProgression));
    assert_eq!(
        compile("---\ntempo: 100\n---\n"),
        Err(ChordMidiError::EmptyProgression)
    );
}

#[test]
fn test_bad_settings() {
    assert!(matches!(
        compile("---\ntempo: fast\n---\nC"),
        Err(ChordMidiError::SettingsError(_))
    ));
    assert!(matches!(
        compile("---\nticks-per-beat: 0\n---\nC"),
        Err(ChordMidiError::SettingsError(_))
    ));

    let settings = MidiSettings {
        velocity: 200,
        ..MidiSettings::default()
    };
    assert!(matches!(
        build_file_with_settings(&[vec![60]], &settings),
        Err(ChordMidiError::SettingsError(_))
    ));
}

#[test]
fn test_build_file_with_rest() {
    let progression = vec![parse_chord("C", 4).unwrap(), parse_chord("", 4).unwrap()];
    let (_, events) = reparse(&build_file(&progression).unwrap());

    assert_eq!(
        events,
        vec![
            (0, Parsed::Tempo(500_000)),
            (0, Parsed::On(60, 64)),
            (0, Parsed::On(64, 64)),
            (0, Parsed::On(67, 64)),
            (1920, Parsed::Off(60, 64)),
            (0, Parsed::Off(64, 64)),
            (0, Parsed::Off(67, 64)),
            (1920, Parsed::Off(60, 0)),
            (0, Parsed::End),
        ]
    );
}

#[test]
fn test_build_file_rejects_bad_notes() {
    let err = build_file(&[vec![60], vec![64, 200]]).unwrap_err();
    assert_eq!(
        err,
        ChordMidiError::NoteOutOfRange {
            note: 200,
            context: "chord 2".to_string(),
        }
    );
}

#[test]
fn test_build_empty_progression() {
    let (_, events) = reparse(&build_file(&[]).unwrap());
    assert_eq!(events, vec![(0, Parsed::Tempo(500_000)), (0, Parsed::End)]);
}

#[test]
fn test_cross_octave_enharmonics_through_the_pipeline() {
    assert_eq!(parse_chord("Cb", 4).unwrap(), vec![47, 51, 54]);

    let (_, events) = reparse(&compile("Cb B#").unwrap());
    assert_eq!(events[1], (0, Parsed::On(47, 64)));
    assert_eq!(events[7], (0, Parsed::On(72, 64)));
}

#[test]
fn test_writer_never_emits_unencodable_bytes() {
    use chordmidi::midi::{sequence, write_smf, Event, TrackBuilder};

    let settings = MidiSettings {
        velocity: 200,
        tempo: 0.0,
        ..MidiSettings::default()
    };
    assert!(matches!(
        sequence(&[vec![60]], &settings),
        Err(ChordMidiError::SettingsError(_))
    ));

    let mut builder = TrackBuilder::new();
    assert!(builder.push(Event::note_on(200, 64, 0)).is_err());
    builder.push(Event::note_on(60, 64, 0)).unwrap();
    builder.push(Event::note_off(60, 64, 480)).unwrap();
    let track = builder.finish();

    assert!(matches!(
        write_smf(&track, 0x8000),
        Err(ChordMidiError::InvalidMidiData(_))
    ));
    let (ticks_per_quarter, events) = reparse(&write_smf(&track, 480).unwrap());
    assert_eq!(ticks_per_quarter, 480);
    assert_eq!(
        events,
        vec![(0, Parsed::On(60, 64)), (480, Parsed::Off(60, 64)), (0, Parsed::End)]
    );
}
