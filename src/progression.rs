//! # Progression Tokenizer
//!
//! Splits a typed progression into chord tokens and parses each one.
//!
//! ## Separators
//! Chords are separated by dashes, whitespace, or any mix of the two:
//! `Cm7 - F7 - Bbmaj7`, `C G Am F` and `C-G-Am-F` are all three or four
//! chords. A dash is always a separator, so the `-` and `-7` minor spellings
//! are not available inside a progression.
//!
//! ## Errors
//! Every token is parsed, even after a failure. The caller gets every error
//! at once, in input order, and must not sequence a progression that had any.
//!
//! ## Front Matter
//! A source may start with a YAML settings block between two `---` lines
//! (see [`crate::settings`]). [`split_front_matter`] separates it from the
//! chord text before tokenizing.

use crate::chord::{parse_chord, NoteSet, DEFAULT_OCTAVE};
use crate::error::ChordMidiError;

/// Note sets in playback order.
pub type Progression = Vec<NoteSet>;

/// Split chord text into non-empty tokens.
///
/// # Example
/// ```
/// use chordmidi::progression::split_tokens;
///
/// assert_eq!(split_tokens("Cm7 - F7 -Bbmaj7"), vec!["Cm7", "F7", "Bbmaj7"]);
/// assert_eq!(split_tokens("C\tG\n\nAm--F"), vec!["C", "G", "Am", "F"]);
/// ```
pub fn split_tokens(input: &str) -> Vec<&str> {
    input
        .split(|c: char| c == '-' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .collect()
}

/// Tokenize and parse a progression with roots in octave 4.
pub fn tokenize(input: &str) -> (Progression, Vec<ChordMidiError>) {
    tokenize_at(input, DEFAULT_OCTAVE)
}

/// Tokenize and parse a progression with roots in the given octave.
///
/// Returns the note sets of every chord that parsed and every error that
/// occurred. The progression is only usable when the error list is empty.
///
/// # Example
/// ```
/// use chordmidi::progression::tokenize_at;
///
/// let (progression, errors) = tokenize_at("C - Xm7 - G7 - Cxyz", 3);
/// assert_eq!(progression, vec![vec![48, 52, 55], vec![55, 59, 62, 65]]);
/// assert_eq!(errors.len(), 2);
/// ```
pub fn tokenize_at(input: &str, octave: i8) -> (Progression, Vec<ChordMidiError>) {
    let mut progression = Progression::new();
    let mut errors = Vec::new();

    for token in split_tokens(input) {
        match parse_chord(token, octave) {
            Ok(notes) => progression.push(notes),
            Err(e) => {
                log::debug!("rejected chord token '{}': {}", token, e);
                errors.push(e);
            }
        }
    }

    log::debug!(
        "tokenized {} chords with {} errors",
        progression.len(),
        errors.len()
    );
    (progression, errors)
}

/// Separate a leading YAML front matter block from the chord text.
///
/// The block must open on the first non-blank line with a line that is
/// exactly `---`, close with the next such line, and hold a YAML mapping
/// (or nothing). Anything else between the markers is chord text, since
/// dashes are separators. Returns `(Some(yaml), chord_text)` when a block
/// is found, otherwise `(None, source)`.
///
/// # Example
/// ```
/// use chordmidi::progression::split_front_matter;
///
/// let (yaml, chords) = split_front_matter("---\ntempo: 90\n---\nC - G");
/// assert_eq!(yaml.as_deref(), Some("tempo: 90"));
/// assert_eq!(chords, "C - G");
///
/// let (yaml, chords) = split_front_matter("C - G - Am");
/// assert!(yaml.is_none());
/// assert_eq!(chords, "C - G - Am");
///
/// let (yaml, chords) = split_front_matter("---\nC\n---\nG");
/// assert!(yaml.is_none());
/// assert_eq!(chords, "---\nC\n---\nG");
/// ```
pub fn split_front_matter(source: &str) -> (Option<String>, String) {
    let lines: Vec<&str> = source.lines().collect();

    let start = match lines.iter().position(|line| !line.trim().is_empty()) {
        Some(i) if lines[i].trim() == "---" => i,
        _ => return (None, source.to_string()),
    };

    match lines[start + 1..].iter().position(|line| line.trim() == "---") {
        Some(offset) => {
            let end = start + 1 + offset;
            let front_matter = lines[start + 1..end].join("\n");
            if !is_settings_block(&front_matter) {
                log::debug!("dash block is not a YAML mapping, reading it as chords");
                return (None, source.to_string());
            }
            let remaining = lines[end + 1..].join("\n");
            (Some(front_matter), remaining)
        }
        None => (None, source.to_string()),
    }
}

fn is_settings_block(content: &str) -> bool {
    if content.trim().is_empty() {
        return true;
    }
    matches!(
        serde_yaml::from_str::<serde_yaml::Value>(content),
        Ok(serde_yaml::Value::Mapping(_))
    )
}
