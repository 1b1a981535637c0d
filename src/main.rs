use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use chordmidi::{ChordMidiError, MidiSettings, DEFAULT_FILE_NAME};
use clap::Parser;

/// Convert a chord progression into a Standard MIDI File.
///
/// Chords are separated by dashes or whitespace: "Cm7 - F7 - Bbmaj7" or "C G Am F".
#[derive(Parser, Debug)]
#[command(name = "chordmidi", version)]
struct Args {
    /// Chord progression to convert
    #[arg(conflicts_with = "file", required_unless_present_any = ["file", "show_settings"])]
    progression: Option<String>,

    /// Read the progression (and optional YAML front matter) from a file
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Where to write the MIDI file
    #[arg(short, long, default_value = DEFAULT_FILE_NAME)]
    output: PathBuf,

    /// YAML settings file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Tempo in beats per minute
    #[arg(long)]
    tempo: Option<f64>,

    /// Beats per chord
    #[arg(long)]
    duration_beats: Option<f64>,

    /// Octave of chord roots (4 puts C at MIDI 60)
    #[arg(long, allow_negative_numbers = true)]
    octave: Option<i8>,

    /// Print the effective settings as YAML and exit
    #[arg(long)]
    show_settings: bool,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let mut settings = match &args.config {
        Some(path) => {
            let content = read_file(path);
            match MidiSettings::from_yaml(&content) {
                Ok(settings) => settings,
                Err(e) => {
                    eprintln!("Error in '{}': {}", path.display(), e);
                    process::exit(1);
                }
            }
        }
        None => MidiSettings::default(),
    };

    // Flags override the config file
    if let Some(tempo) = args.tempo {
        settings.tempo = tempo;
    }
    if let Some(duration_beats) = args.duration_beats {
        settings.duration_beats = duration_beats;
    }
    if let Some(octave) = args.octave {
        settings.octave = octave;
    }
    if let Err(e) = settings.validate() {
        eprintln!("{}", e);
        process::exit(1);
    }
    log::debug!("settings: {:?}", settings);

    if args.show_settings {
        match serde_yaml::to_string(&settings) {
            Ok(yaml) => print!("{}", yaml),
            Err(e) => {
                eprintln!("Error printing settings: {}", e);
                process::exit(1);
            }
        }
        return;
    }

    let source = match (&args.progression, &args.file) {
        (Some(progression), _) => progression.clone(),
        (None, Some(path)) => read_file(path),
        (None, None) => {
            eprintln!("Please enter a chord progression.");
            process::exit(1);
        }
    };

    let bytes = match chordmidi::compile_with_settings(&source, &settings) {
        Ok(bytes) => bytes,
        Err(ChordMidiError::Progression(errors)) => {
            eprintln!("Error parsing chords:");
            for err in errors {
                eprintln!("- {}", err);
            }
            process::exit(1);
        }
        Err(e) => {
            eprintln!("Error generating MIDI: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = fs::write(&args.output, &bytes) {
        eprintln!("Error writing to '{}': {}", args.output.display(), e);
        process::exit(1);
    }
    eprintln!("Wrote {} bytes of MIDI to {}", bytes.len(), args.output.display());
}

fn read_file(path: &Path) -> String {
    match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("Error reading file '{}': {}", path.display(), e);
            process::exit(1);
        }
    }
}
