//! Implied tie/slur derivation.
//!
//! A run of notes that carry no sung syllable belongs to the nearest
//! preceding lyric-bearing note; the whole run is rendered as one slur group.
//! Explicit `(`/`)` markers in the source are a dead input channel: whatever
//! the tokens said is discarded and recomputed here.

use crate::parser::piece_parser::Note;

fn has_lyric(note: &Note) -> bool {
    note.lyric.chars().any(char::is_alphabetic)
}

/// Derive tie groups over a whole piece, returning a new annotated sequence.
///
/// A note anchors a group when it has a lyric, starts the sequence, or is a
/// rest; anchoring while a group is open closes that group on the previous
/// note. Every other note extends the open group from the current anchor.
/// A group still open at the end closes on the last note.
pub fn infer_ties(music: &[Note]) -> Vec<Note> {
    let mut annotated = discard_ties(music);
    let mut anchor = 0;
    let mut inside_group = false;
    for index in 0..annotated.len() {
        if has_lyric(&annotated[index]) || index == 0 || annotated[index].pitch.is_rest() {
            anchor = index;
            if inside_group {
                annotated[index - 1].tie_close = true;
                inside_group = false;
            }
        } else {
            annotated[anchor].tie_open = true;
            inside_group = true;
        }
    }
    if inside_group {
        if let Some(last) = annotated.last_mut() {
            last.tie_close = true;
        }
    }
    annotated
}

/// Drop all tie flags. Used directly for lyric-less pieces, where a tie
/// group has nothing to bind a syllable to.
pub fn discard_ties(music: &[Note]) -> Vec<Note> {
    music
        .iter()
        .map(|note| Note {
            tie_open: false,
            tie_close: false,
            ..note.clone()
        })
        .collect()
}
