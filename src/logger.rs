// Minimal `log` backend for the CLI: one line per record on stderr.

use log::{LevelFilter, Log, Metadata, Record};

struct StderrLogger;

impl Log for StderrLogger {
	fn enabled(&self, metadata: &Metadata) -> bool {
		metadata.level() <= log::max_level()
	}

	fn log(&self, record: &Record) {
		if !self.enabled(record.metadata()) {
			return;
		}
		eprintln!("[{:>5}] {}: {}", record.level(), record.target(), record.args());
	}

	fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

/// Maps the number of `-v` flags to a level; `quiet` wins over verbosity.
pub fn level_for(verbosity: u64, quiet: bool) -> LevelFilter {
	if quiet {
		return LevelFilter::Error;
	}
	match verbosity {
		0 => LevelFilter::Warn,
		1 => LevelFilter::Info,
		2 => LevelFilter::Debug,
		_ => LevelFilter::Trace,
	}
}

/// Installs the logger. Calling it twice keeps the first logger but still
/// updates the level.
pub fn init(level: LevelFilter) {
	let _ = log::set_logger(&LOGGER);
	log::set_max_level(level);
}
