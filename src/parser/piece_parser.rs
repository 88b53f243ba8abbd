use crate::error::{Diagnostic, ScribeError};
use crate::parser::token_parser::{lyric_measures, split_measures, tokenize_measure, Pitch};
use num_rational::Rational32;
use serde::Deserialize;

/// Time signature assumed for beam-break arithmetic when a piece omits one.
pub const DEFAULT_TIME: &str = "4/4";

/// One catalog entry as supplied by the (external) catalog loader.
///
/// Unknown fields such as book, page or cross-reference keys are ignored;
/// resolving them is the caller's business.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct Piece {
    pub title: String,
    /// e.g. `"4/4"`; omitted from the ABC header when absent
    pub time: Option<String>,
    pub key: Option<String>,
    /// Compact notation DSL
    pub notes: Option<String>,
    pub lyrics: Option<String>,
    /// Legacy escape hatch: pre-rendered ABC that bypasses the transpiler
    pub notes_abc: Option<String>,
    /// 1-based bar indices after which the output splits into a new system
    pub break_bars: Vec<usize>,
}

/// One fully-resolved note. Octave and duration are always concrete here:
/// tokens that omit them inherit the previous note's carried state.
#[derive(Debug, Clone, PartialEq)]
pub struct Note {
    pub octave: i32,
    pub pitch: Pitch,
    /// Duration code: digits plus trailing dots, one dot = x1.5
    pub duration: String,
    /// Offset from the start of the measure, whole note = 1
    pub beat_position: Rational32,
    pub lyric: String,
    /// Emit a bar line after this note (independent of tie inference)
    pub trailing_bar: bool,
    /// Emit a beam-breaking space after this note
    pub trailing_space: bool,
    pub tie_open: bool,
    pub tie_close: bool,
    pub triplet_prefix: Option<char>,
}

/// Beats a beam must not continue across, per time signature.
fn no_beam_across(time: &str) -> Vec<Rational32> {
    match time {
        "4/4" => vec![Rational32::new(1, 2)],
        "6/8" => vec![Rational32::new(3, 8)],
        "3/4" => vec![Rational32::new(1, 3), Rational32::new(2, 3)],
        "2/2" => vec![Rational32::new(1, 2)],
        "2/4" => vec![Rational32::new(1, 4)],
        _ => Vec::new(),
    }
}

/// Shortest accepted note value; beat arithmetic would overflow on
/// arbitrary typed digits.
const MAX_DURATION_DENOMINATOR: i32 = 128;

/// Split a duration code into its digits and dot count.
/// `None` when the digits are unusable (empty, non-numeric, zero or
/// beyond a 128th note).
pub(crate) fn split_duration(duration: &str) -> Option<(i32, usize)> {
    let digits = duration.trim_end_matches('.');
    let dots = duration.len() - digits.len();
    let value = digits.parse::<i32>().ok()?;
    if value <= 0 || value > MAX_DURATION_DENOMINATOR {
        return None;
    }
    Some((value, dots))
}

/// Walks raw note tokens in measure order, carrying octave and duration
/// forward across tokens that omit them, and aligning lyric syllables onto
/// the resolved notes as it goes.
pub struct PieceParser {
    music: Vec<Note>,
    diagnostics: Vec<Diagnostic>,
    no_beam_across: Vec<Rational32>,
    octave: i32,
    duration: String,
    /// Last successfully computed time value, kept when digits fail to parse
    value: Rational32,
}

impl PieceParser {
    pub fn new(time: &str) -> Self {
        Self {
            music: Vec::new(),
            diagnostics: Vec::new(),
            no_beam_across: no_beam_across(time),
            octave: 4,
            duration: "4".to_string(),
            value: Rational32::new(1, 4),
        }
    }

    pub fn take_music(&mut self) -> Vec<Note> {
        std::mem::take(&mut self.music)
    }

    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    /// Resolve a whole notation line (with its lyric line) into `Note`s.
    ///
    /// Missing lyric measures are padded with empty syllable lists; surplus
    /// lyric measures are dropped. Both are expected data-entry gaps.
    pub fn parse(&mut self, notes: &str, lyrics: Option<&str>) -> Result<(), ScribeError> {
        let note_measures: Vec<_> = split_measures(notes)
            .iter()
            .enumerate()
            .map(|(index, measure)| tokenize_measure(index, measure, &mut self.diagnostics))
            .collect();
        let mut lyric_lists = lyric_measures(lyrics);
        while lyric_lists.len() < note_measures.len() {
            lyric_lists.push(Vec::new());
        }

        for (tokens, syllable_list) in note_measures.into_iter().zip(lyric_lists) {
            let mut current_beat = Rational32::from_integer(0);
            let mut syllables = syllable_list.into_iter();

            for token in tokens {
                self.octave += token.octave_shift;

                let mut candidate = self.duration.clone();
                match token.duration_digits {
                    Some(digits) => {
                        candidate = digits;
                        if token.dotted {
                            candidate.push('.');
                        }
                    }
                    None if token.dotted => {
                        if candidate.ends_with('.') {
                            return Err(ScribeError::UnsupportedInput(format!(
                                "double-dotted duration {candidate}."
                            )));
                        }
                        candidate.push('.');
                    }
                    None => {}
                }

                match split_duration(&candidate) {
                    Some((digits, dots)) => {
                        let mut value = Rational32::new(1, digits);
                        if dots == 1 {
                            value *= Rational32::new(3, 2);
                        }
                        self.duration = candidate;
                        self.value = value;
                    }
                    None => {
                        log::warn!("unusable duration {candidate:?}, previous duration kept");
                        self.diagnostics.push(Diagnostic::DurationParse {
                            duration: candidate,
                        });
                    }
                }

                let next_beat = current_beat + self.value;
                let trailing_space = token.beam_break || self.no_beam_across.contains(&next_beat);

                let lyric = if token.pitch.is_rest() {
                    String::new()
                } else {
                    syllables.next().unwrap_or_default()
                };

                self.music.push(Note {
                    octave: self.octave,
                    pitch: token.pitch,
                    duration: self.duration.clone(),
                    beat_position: current_beat,
                    lyric,
                    trailing_bar: false,
                    trailing_space,
                    tie_open: token.tie_open,
                    tie_close: token.tie_close,
                    triplet_prefix: token.triplet,
                });

                current_beat = next_beat;
            }

            if let Some(last) = self.music.last_mut() {
                last.trailing_bar = true;
            }
        }
        Ok(())
    }
}
