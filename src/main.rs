//! Library Catalog - Binary Entry Point
//!
//! Runs a command script against a fresh catalog and writes the results
//! next to the input file.
//!
//! ```bash
//! library-catalog input.txt            # writes input_output_file.txt
//! library-catalog input.txt -o out.txt --log-level debug
//! ```

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use log::{error, info, LevelFilter};
use simplelog::{
    ColorChoice, CombinedLogger, Config, SharedLogger, TermLogger, TerminalMode, WriteLogger,
};

use library_catalog::config::{DEFAULT_CATALOG_CAPACITY, DEFAULT_LOG_LEVEL, OUTPUT_FILE_SUFFIX};
use library_catalog::script::run_script;
use library_catalog::{Library, Result};

/// Command-line arguments.
#[derive(Parser, Debug)]
#[command(name = "library-catalog")]
#[command(about = "Run a library catalog command script")]
#[command(version)]
struct Cli {
    /// Command script to execute
    input: PathBuf,

    /// Output file (defaults to the input path with `_output_file.txt`)
    #[arg(long, short = 'o')]
    output: Option<PathBuf>,

    /// Number of books to pre-allocate
    #[arg(long, default_value_t = DEFAULT_CATALOG_CAPACITY)]
    capacity: usize,

    /// Log level for stderr (off, error, warn, info, debug, trace)
    #[arg(long, default_value_t = DEFAULT_LOG_LEVEL)]
    log_level: LevelFilter,

    /// Also write debug-level logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_logging(&cli) {
        eprintln!("failed to initialize logging: {}", e);
        return ExitCode::FAILURE;
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let output_path = cli
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&cli.input));

    let input = BufReader::new(File::open(&cli.input)?);
    let mut output = BufWriter::new(File::create(&output_path)?);

    let mut library = Library::with_capacity(cli.capacity);
    let summary = run_script(&mut library, input, &mut output)?;

    info!(
        "wrote {} ({} commands, {} skipped, {} books remain, {} color flips)",
        output_path.display(),
        summary.executed,
        summary.skipped,
        library.len(),
        library.color_flip_count()
    );
    Ok(())
}

/// `dir/name.ext` becomes `dir/name_output_file.txt`
fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    input.with_file_name(format!("{}{}", stem, OUTPUT_FILE_SUFFIX))
}

fn init_logging(cli: &Cli) -> Result<()> {
    let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::new();
    loggers.push(TermLogger::new(
        cli.log_level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    ));
    if let Some(path) = &cli.log_file {
        loggers.push(WriteLogger::new(
            LevelFilter::Debug,
            Config::default(),
            File::create(path)?,
        ));
    }

    // Only fails if a logger is already installed
    let _ = CombinedLogger::init(loggers);
    Ok(())
}
