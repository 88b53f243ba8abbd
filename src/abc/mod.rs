pub mod abc_builder;
pub mod tie_inference;

use crate::abc::abc_builder::{AbcBuilder, AbcSystem};
use crate::abc::tie_inference::{discard_ties, infer_ties};
use crate::error::{Diagnostic, ScribeError};
use crate::parser::piece_parser::{Piece, PieceParser, DEFAULT_TIME};

/// Result of transpiling one piece: the ABC header block, one or more
/// printable systems, and every recoverable problem met along the way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transpiled {
    pub header: String,
    pub systems: Vec<AbcSystem>,
    pub diagnostics: Vec<Diagnostic>,
}

impl Transpiled {
    /// Combined ABC text: header, then `notation` / `w: lyrics` per system.
    pub fn abc(&self) -> String {
        let body: Vec<String> = self
            .systems
            .iter()
            .map(|system| format!("{}\nw: {}", system.notation, system.lyrics))
            .collect();
        format!("{}{}", self.header, body.join("\n"))
    }
}

/// `K:`/`M:` lines are omitted entirely when the piece has no such field;
/// the base note length is always declared.
fn abc_header(piece: &Piece) -> String {
    let mut header = String::new();
    if let Some(key) = &piece.key {
        header.push_str(&format!("K:{key}\n"));
    }
    if let Some(time) = &piece.time {
        header.push_str(&format!("M:{time}\n"));
    }
    header.push_str("L:1/8\n");
    header
}

/// Transpile one piece from the compact notation DSL into ABC.
///
/// Pure and deterministic: identical input records give byte-identical
/// output, and concurrent calls share no state.
///
/// A piece carrying a pre-rendered `notes_abc` field bypasses the transpiler
/// completely; that string and the raw `lyrics` field come back verbatim as
/// a single system (legacy passthrough mode).
pub fn transpile_piece(piece: &Piece) -> Result<Transpiled, ScribeError> {
    let header = abc_header(piece);

    if let Some(abc) = &piece.notes_abc {
        log::debug!("piece {:?}: legacy notes_abc passthrough", piece.title);
        return Ok(Transpiled {
            header,
            systems: vec![AbcSystem {
                notation: abc.clone(),
                lyrics: piece.lyrics.clone().unwrap_or_default(),
            }],
            diagnostics: Vec::new(),
        });
    }

    let notes = piece.notes.as_deref().unwrap_or("");
    let time = piece.time.as_deref().unwrap_or(DEFAULT_TIME);
    let mut parser = PieceParser::new(time);
    parser.parse(notes, piece.lyrics.as_deref())?;
    let music = parser.take_music();
    let mut diagnostics = parser.take_diagnostics();

    // A tie group binds notes to one sung syllable; without a lyric line
    // there is nothing to infer, and explicit parens are a dead channel
    // either way.
    let annotated = if piece.lyrics.is_some() {
        infer_ties(&music)
    } else {
        discard_ties(&music)
    };

    let (systems, builder_diagnostics) =
        AbcBuilder::new().build_for_piece(&annotated, &piece.break_bars);
    diagnostics.extend(builder_diagnostics);

    Ok(Transpiled {
        header,
        systems,
        diagnostics,
    })
}
