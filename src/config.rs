//! Tunable defaults shared by the library and the script runner.

use log::LevelFilter;

/// Default number of index nodes pre-allocated in the slab arena
pub const DEFAULT_CATALOG_CAPACITY: usize = 1024;

/// Suffix that replaces the input extension when deriving the output path
pub const OUTPUT_FILE_SUFFIX: &str = "_output_file.txt";

/// Log level used by the binary when none is given on the command line
pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Warn;
