use crate::error::Diagnostic;
use nom::character::complete::{char, digit1, one_of};
use nom::combinator::opt;
use nom::multi::many0;
use nom::sequence::preceded;
use nom::{IResult, Parser};

/// Accidental suffix on a pitch letter (`+` sharp, `-` flat, `@` natural).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Accidental {
    Sharp,
    Flat,
    Natural,
}

impl Accidental {
    fn from_marker(c: char) -> Option<Self> {
        match c {
            '+' => Some(Self::Sharp),
            '-' => Some(Self::Flat),
            '@' => Some(Self::Natural),
            _ => None,
        }
    }
}

/// Pitch of one note token: a letter `a..g` with an optional accidental,
/// or a rest (`r`).
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Pitch {
    Rest,
    Tone {
        letter: char,
        accidental: Option<Accidental>,
    },
}

impl Pitch {
    pub const fn is_rest(&self) -> bool {
        matches!(self, Self::Rest)
    }
}

/// One raw note token as typed, before any state is carried across tokens.
///
/// Only the pitch is mandatory; octave and duration are inherited from the
/// previous note when omitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteToken {
    pub tie_open: bool,
    pub triplet: Option<char>,
    /// Net octave shift from a run of `^`/`v` markers (`^^` gives +2).
    pub octave_shift: i32,
    pub pitch: Pitch,
    pub duration_digits: Option<String>,
    pub dotted: bool,
    pub tie_close: bool,
    /// Explicit beam break (trailing backtick).
    pub beam_break: bool,
}

/// Parse one note token:
/// `(?  &digit?  ^/v*  [a-g r][+@-]?  digits? .?  )?  ` `` ` `` `?`
pub fn note_token(i: &str) -> IResult<&str, NoteToken> {
    let (i, tie_open) = opt(char('(')).parse(i)?;
    let (i, triplet) = opt(preceded(char('&'), one_of("0123456789"))).parse(i)?;
    let (i, shifts) = many0(one_of("^v")).parse(i)?;
    let (i, letter) = one_of("abcdefgr").parse(i)?;
    let (i, accidental_marker) = opt(one_of("+@-")).parse(i)?;
    let (i, duration_digits) = opt(digit1).parse(i)?;
    let (i, dot) = opt(char('.')).parse(i)?;
    let (i, tie_close) = opt(char(')')).parse(i)?;
    let (i, beam_break) = opt(char('`')).parse(i)?;

    let octave_shift = shifts
        .iter()
        .map(|&c| if c == '^' { 1 } else { -1 })
        .sum();
    let pitch = if letter == 'r' {
        // an accidental on a rest is consumed but meaningless
        Pitch::Rest
    } else {
        Pitch::Tone {
            letter,
            accidental: accidental_marker.and_then(Accidental::from_marker),
        }
    };

    Ok((
        i,
        NoteToken {
            tie_open: tie_open.is_some(),
            triplet,
            octave_shift,
            pitch,
            duration_digits: duration_digits.map(str::to_string),
            dotted: dot.is_some(),
            tie_close: tie_close.is_some(),
            beam_break: beam_break.is_some(),
        },
    ))
}

/// Split a notation line on bar separators and strip all whitespace inside
/// each measure. Whitespace between tokens is insignificant; beam breaks come
/// from the backtick marker or beat arithmetic, never from typed spaces.
pub fn split_measures(s: &str) -> Vec<String> {
    s.split('|')
        .map(|m| m.chars().filter(|c| !c.is_whitespace()).collect())
        .collect()
}

/// Extract all note tokens from one whitespace-stripped measure.
///
/// A stretch of input that matches no token (or a match that consumes
/// nothing) is skipped one char at a time with a diagnostic; hand-typed
/// input is expected to contain mistakes and they must not abort the piece.
pub fn tokenize_measure(
    measure_index: usize,
    measure: &str,
    diagnostics: &mut Vec<Diagnostic>,
) -> Vec<NoteToken> {
    let mut tokens = Vec::new();
    let mut rest = measure;
    while !rest.is_empty() {
        match note_token(rest) {
            Ok((remaining, token)) if remaining.len() < rest.len() => {
                rest = remaining;
                tokens.push(token);
            }
            _ => {
                let mut chars = rest.chars();
                let Some(bad) = chars.next() else {
                    break;
                };
                log::warn!("measure {measure_index}: no note token matches {bad:?}");
                diagnostics.push(Diagnostic::MalformedToken {
                    measure: measure_index,
                    fragment: bad.to_string(),
                });
                rest = chars.as_str();
            }
        }
    }
    tokens
}

/// Tokenize a lyric line into per-measure syllable lists.
///
/// A hyphen ends a syllable and implies a trailing space; an underscore is
/// itself a syllable and implies spaces on both sides. `None` yields a single
/// empty measure.
pub fn lyric_measures(s: Option<&str>) -> Vec<Vec<String>> {
    let Some(s) = s else {
        return vec![Vec::new()];
    };
    let with_implicit_spaces = s.replace('-', "- ").replace('_', " _ ");
    with_implicit_spaces
        .split('|')
        .map(|m| m.split_whitespace().map(str::to_string).collect())
        .collect()
}
