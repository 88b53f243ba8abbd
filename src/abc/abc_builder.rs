use crate::error::Diagnostic;
use crate::parser::piece_parser::{split_duration, Note};
use crate::parser::token_parser::{Accidental, Pitch};
use num_rational::Rational32;
use std::collections::HashMap;

/// One independently printable system: an ABC notation fragment paired with
/// its space-joined lyric line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbcSystem {
    pub notation: String,
    pub lyrics: String,
}

/// Map an absolute octave onto ABC's case/comma/apostrophe notation.
fn abc_pitch(letter: char, octave: i32) -> String {
    if octave <= 3 {
        let mut pitch = letter.to_ascii_uppercase().to_string();
        for _ in octave..3 {
            pitch.push(',');
        }
        pitch
    } else if octave == 4 {
        letter.to_string()
    } else {
        let mut pitch = letter.to_string();
        for _ in 4..octave {
            pitch.push('\'');
        }
        pitch
    }
}

/// ABC length suffix for a duration code, against the `L:1/8` base unit.
/// Empty for a ratio of one, an integer for integral ratios, `num/den`
/// otherwise. `None` when the duration digits are unusable.
fn length_code(duration: &str) -> Option<String> {
    let (digits, dots) = split_duration(duration)?;
    let mut ratio = Rational32::new(8, digits);
    if dots == 1 {
        ratio *= Rational32::new(3, 2);
    }
    if ratio.is_integer() {
        let length = ratio.to_integer();
        if length == 1 {
            Some(String::new())
        } else {
            Some(length.to_string())
        }
    } else {
        Some(format!("{}/{}", ratio.numer(), ratio.denom()))
    }
}

/// Converts resolved, tie-annotated notes into ABC text, one bar at a time,
/// flushing a finished system at every requested break bar.
pub struct AbcBuilder {
    systems: Vec<AbcSystem>, // systems flushed so far
    tokens: Vec<String>,     // notation accumulated for the current system
    lyrics: Vec<String>,     // one syllable slot per note, rests included
    accidentals: HashMap<char, Accidental>,
    bar_number: usize,
    diagnostics: Vec<Diagnostic>,
}

impl AbcBuilder {
    pub fn new() -> Self {
        Self {
            systems: Vec::new(),
            tokens: Vec::new(),
            lyrics: Vec::new(),
            accidentals: HashMap::new(),
            bar_number: 0,
            diagnostics: Vec::new(),
        }
    }

    /// Render all notes and return the flushed systems.
    pub fn build_for_piece(
        mut self,
        music: &[Note],
        break_bars: &[usize],
    ) -> (Vec<AbcSystem>, Vec<Diagnostic>) {
        for note in music {
            self.add_note(note);
            if note.trailing_bar {
                self.tokens.push(" | ".to_string());
                self.accidentals.clear();
                self.bar_number += 1;
                if break_bars.contains(&self.bar_number) {
                    self.flush_system();
                }
            }
        }
        self.flush_system();
        (self.systems, self.diagnostics)
    }

    fn add_note(&mut self, note: &Note) {
        self.lyrics.push(note.lyric.clone());

        let mut rendered = String::new();
        if note.tie_open {
            rendered.push('(');
        }
        if let Some(digit) = note.triplet_prefix {
            rendered.push('(');
            rendered.push(digit);
        }
        match note.pitch {
            Pitch::Rest => rendered.push('z'),
            Pitch::Tone { letter, accidental } => {
                match accidental {
                    Some(Accidental::Sharp) => {
                        if self.accidentals.get(&letter) != Some(&Accidental::Sharp) {
                            rendered.push('^');
                            self.accidentals.insert(letter, Accidental::Sharp);
                        }
                    }
                    Some(Accidental::Flat) => {
                        if self.accidentals.get(&letter) != Some(&Accidental::Flat) {
                            rendered.push('_');
                            self.accidentals.insert(letter, Accidental::Flat);
                        }
                    }
                    Some(Accidental::Natural) => {
                        // a natural always prints, and wipes the bar memory
                        rendered.push('=');
                        self.accidentals.remove(&letter);
                    }
                    None => {}
                }
                rendered.push_str(&abc_pitch(letter, note.octave));
            }
        }
        match length_code(&note.duration) {
            Some(length) => rendered.push_str(&length),
            None => {
                log::warn!("unusable duration {:?} while emitting ABC", note.duration);
                self.diagnostics.push(Diagnostic::DurationParse {
                    duration: note.duration.clone(),
                });
            }
        }
        if note.tie_close {
            rendered.push(')');
        }
        self.tokens.push(rendered);
        if note.trailing_space {
            self.tokens.push(" ".to_string());
        }
    }

    fn flush_system(&mut self) {
        if self.tokens.is_empty() {
            return;
        }
        let notation = self.tokens.concat();
        let lyrics = self.lyrics.join(" ").replace(" _", "_");
        self.systems.push(AbcSystem { notation, lyrics });
        self.tokens.clear();
        self.lyrics.clear();
    }
}
