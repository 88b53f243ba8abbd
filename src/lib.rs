//! Tunescribe - compact music notation to ABC transpiler
//!
//! This library provides:
//! - Parsing of a hand-typed compact notation DSL with an aligned lyric line
//! - Implied tie/slur derivation from the lyric alignment
//! - ABC notation generation, split into printable systems
//!
//! # Example
//!
//! ```no_run
//! use tunescribe::{transpile_piece, Piece};
//!
//! let piece = Piece {
//!     title: "Example".to_string(),
//!     time: Some("4/4".to_string()),
//!     notes: Some("c4 d e f | g2 g".to_string()),
//!     lyrics: Some("la li lu le | lo".to_string()),
//!     ..Piece::default()
//! };
//! let result = transpile_piece(&piece).unwrap();
//! println!("{}", result.abc());
//! ```

pub mod abc;
pub mod error;
pub mod parser;

// Re-export main types for convenience
pub use abc::{
    abc_builder::{AbcBuilder, AbcSystem},
    tie_inference::infer_ties,
    transpile_piece, Transpiled,
};
pub use error::{Diagnostic, ScribeError};
pub use parser::{
    piece_parser::{Note, Piece, PieceParser, DEFAULT_TIME},
    token_parser::{Accidental, Pitch},
};
