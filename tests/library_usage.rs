//! Integration tests for tunescribe library usage.
//!
//! These tests verify that the library can be used as a dependency
//! from external projects.

use serde::Deserialize;
use tunescribe::{transpile_piece, Piece, ScribeError, Transpiled};

#[derive(Debug, Deserialize)]
struct Catalog {
    #[serde(rename = "Music", default)]
    music: Vec<Piece>,
}

fn load_catalog(file_path: &str) -> Catalog {
    let file = std::fs::File::open(file_path).expect("Failed to open test catalog");
    serde_yaml::from_reader(file).expect("Failed to parse test catalog")
}

/// Test that all major types are accessible from the library.
#[test]
fn test_types_accessible() {
    // This test verifies that the public API types compile and are usable.
    // If any re-export is missing, this test will fail to compile.

    fn _assert_types() {
        let _: fn(&Piece) -> Result<Transpiled, ScribeError> = transpile_piece;
        let _: &str = tunescribe::DEFAULT_TIME;
    }
}

/// Test transpiling every piece in the fixture catalog.
#[test]
fn test_transpile_catalog() {
    let catalog = load_catalog("test-files/tefillot.yaml");
    assert_eq!(catalog.music.len(), 3);

    for piece in &catalog.music {
        let result = transpile_piece(piece).expect("Failed to transpile piece");
        assert!(
            !result.systems.is_empty(),
            "Piece should produce at least one system: {}",
            piece.title
        );
        assert!(
            result.diagnostics.is_empty(),
            "Clean fixture should produce no diagnostics: {}",
            piece.title
        );
        assert!(result.header.contains("L:1/8"), "Piece: {}", piece.title);
    }
}

/// Test that break bars split a piece into multiple systems.
#[test]
fn test_break_bars_produce_systems() {
    let catalog = load_catalog("test-files/tefillot.yaml");
    let piece = catalog
        .music
        .iter()
        .find(|p| !p.break_bars.is_empty())
        .expect("Fixture should contain a piece with break bars");

    let result = transpile_piece(piece).expect("Failed to transpile piece");
    assert_eq!(result.systems.len(), 2);
    for system in &result.systems {
        assert!(system.notation.ends_with(" | "));
    }
}

/// Test the legacy notes_abc passthrough mode.
#[test]
fn test_legacy_passthrough() {
    let catalog = load_catalog("test-files/tefillot.yaml");
    let piece = catalog
        .music
        .iter()
        .find(|p| p.notes_abc.is_some())
        .expect("Fixture should contain a legacy piece");

    let result = transpile_piece(piece).expect("Failed to transpile piece");
    assert_eq!(result.systems.len(), 1);
    assert_eq!(
        Some(result.systems[0].notation.as_str()),
        piece.notes_abc.as_deref()
    );
    assert_eq!(
        Some(result.systems[0].lyrics.as_str()),
        piece.lyrics.as_deref()
    );
}

/// Test that absurd duration digits degrade to diagnostics, never a panic.
#[test]
fn test_oversized_durations_are_diagnostics() {
    let piece = Piece {
        title: "fat fingers".to_string(),
        notes: Some("c1999999999 d1999999998".to_string()),
        ..Piece::default()
    };
    let result = transpile_piece(&piece).expect("Oversized durations must not abort the piece");

    assert_eq!(result.diagnostics.len(), 2);
    // both notes fall back to the default quarter duration
    assert_eq!(result.systems[0].notation, "c2d2  | ");
}

/// Test error handling for unsupported input.
#[test]
fn test_unsupported_double_dot() {
    let piece = Piece {
        title: "double dot".to_string(),
        notes: Some("c4. c.".to_string()),
        ..Piece::default()
    };
    let result = transpile_piece(&piece);

    assert!(result.is_err(), "Should return error for double-dotted input");
    let err = result.unwrap_err();
    assert!(
        matches!(err, ScribeError::UnsupportedInput(_)),
        "Should be an UnsupportedInput error"
    );
}
