pub mod piece_parser;
pub mod token_parser;
