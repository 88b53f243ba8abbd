use clap::Parser;
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use tunescribe::ScribeError as LibScribeError;
use tunescribe::{transpile_piece, Piece};

fn main() {
    let result = main_result();
    std::process::exit(match result {
        Ok(()) => 0,
        Err(err) => {
            // use Display instead of Debug for user friendly error messages
            log::error!("{err}");
            1
        }
    });
}

pub fn main_result() -> Result<(), AppError> {
    // setup logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("tunescribe=info"))
        .init();

    // args
    let args = CliArgs::parse();
    let catalog_path = PathBuf::from(&args.catalog_file);

    // check if catalog file exists
    if !catalog_path.exists() {
        let err = AppError::CatalogError(format!("Catalog file not found {catalog_path:?}"));
        return Err(err);
    }
    log::info!("Transpiling catalog {catalog_path:?}");

    let file = File::open(&catalog_path)?;
    let reader = BufReader::new(file);
    let catalog: Catalog = serde_yaml::from_reader(reader)
        .map_err(|err| AppError::CatalogError(format!("Could not read catalog: {err}")))?;

    let mut index = 0;
    for piece in &catalog.music {
        if let Some(wanted) = &args.title {
            if &piece.title != wanted {
                continue;
            }
        }
        let result = transpile_piece(piece)?;
        for diagnostic in &result.diagnostics {
            log::warn!("{}: {diagnostic}", piece.title);
        }
        index += 1;
        println!("X:{index}");
        println!("T:{}", piece.title);
        println!("{}", result.abc());
        println!();
    }
    log::info!("Transpiled {index} pieces");
    Ok(())
}

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct CliArgs {
    /// Path to a YAML catalog of pieces (a `Music:` list of records).
    catalog_file: String,
    /// Only transpile the piece with this exact title.
    #[arg(long)]
    title: Option<String>,
}

/// Catalog file shape; fields other than the piece list belong to the
/// excluded cross-referencing layer and are ignored here.
#[derive(Debug, Deserialize)]
struct Catalog {
    #[serde(rename = "Music", default)]
    music: Vec<Piece>,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("catalog error: {0}")]
    CatalogError(String),
    #[error("transpile error: {0}")]
    TranspileError(String),
    #[error("other error: {0}")]
    OtherError(String),
}

impl From<LibScribeError> for AppError {
    fn from(error: LibScribeError) -> Self {
        match error {
            LibScribeError::UnsupportedInput(s) => Self::TranspileError(s),
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::OtherError(error.to_string())
    }
}
