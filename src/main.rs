// src/main.rs
mod utils;
mod extractors;
mod storage;

use std::path::PathBuf;

use clap::Parser;
use utils::AppError;
use extractors::sukta::{self, ExtractorConfig, SuktaExtractor, UnreadablePolicy};
use storage::StorageManager;

/// Command Line Interface for the Rigveda sukta name extractor
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory containing mandala1.txt ... mandala10.txt
    #[arg(short, long, default_value = "./")]
    input_dir: PathBuf,

    /// Output directory for the sukta table
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// File name of the sukta table
    #[arg(short = 'f', long, default_value = "sukta_names.csv")]
    output_file: String,

    /// First mandala index to read
    #[arg(long, default_value_t = sukta::DEFAULT_FIRST_MANDALA)]
    first_mandala: u32,

    /// Last mandala index to read (inclusive)
    #[arg(long, default_value_t = sukta::DEFAULT_LAST_MANDALA)]
    last_mandala: u32,

    /// Input file name template; `{n}` is replaced by the mandala index
    #[arg(long, default_value = sukta::DEFAULT_FILE_PATTERN)]
    file_pattern: String,

    /// Warn and skip unreadable mandala files instead of aborting the run
    #[arg(long)]
    skip_unreadable: bool,
}

/// Validates the arguments and turns them into an extractor configuration.
fn build_config(args: &Args) -> Result<ExtractorConfig, AppError> {
    if args.first_mandala == 0 {
        return Err(AppError::Config("Mandala numbering starts at 1".to_string()));
    }
    if args.first_mandala > args.last_mandala {
        return Err(AppError::Config(format!(
            "First mandala {} is after last mandala {}",
            args.first_mandala, args.last_mandala
        )));
    }
    if !args.file_pattern.contains(sukta::MANDALA_PLACEHOLDER) {
        return Err(AppError::Config(format!(
            "File pattern '{}' has no {} placeholder",
            args.file_pattern,
            sukta::MANDALA_PLACEHOLDER
        )));
    }

    Ok(ExtractorConfig {
        input_dir: args.input_dir.clone(),
        first_mandala: args.first_mandala,
        last_mandala: args.last_mandala,
        file_pattern: args.file_pattern.clone(),
        unreadable: if args.skip_unreadable {
            UnreadablePolicy::SkipAndWarn
        } else {
            UnreadablePolicy::Abort
        },
    })
}

/// Extracts every sukta name and writes the table. Returns the table path and row count.
fn run(args: &Args) -> Result<(PathBuf, usize), AppError> {
    let config = build_config(args)?;
    let storage = StorageManager::new(&args.output_dir)?;

    let extractor = SuktaExtractor::new(config);
    let outcome = extractor.extract_all()?;

    let path = storage.save_table(&outcome.records, &args.output_file)?;
    Ok((path, outcome.records.len()))
}

fn main() -> Result<(), AppError> {
    // 1. Setup Logging (reads RUST_LOG env var)
    utils::logging::setup_logging();

    // 2. Parse CLI Arguments
    let args = Args::parse();
    tracing::debug!("Starting extraction with args: {:?}", args);

    // 3. Extract and save
    let (path, count) = run(&args)?;

    tracing::info!("Output written to {} with {} entries.", path.display(), count);
    Ok(())
}
