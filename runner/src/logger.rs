use std::sync::Mutex;

use log::{Level, LevelFilter, Metadata, Record, SetLoggerError};

/// Prints log records on the terminal, errors go to stderr.
pub struct RunnerLogger {
    state: Mutex<LoggerState>,
}

struct LoggerState {
    level: LevelFilter,
}

/// Installed once by [RunnerLogger::init].
static LOGGER: RunnerLogger = RunnerLogger {
    state: Mutex::new(LoggerState {
        level: LevelFilter::Info,
    }),
};

impl RunnerLogger {
    pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        // The level must be in place before the first record can reach the logger.
        if let Ok(mut state) = LOGGER.state.lock() {
            state.level = level;
        }
        log::set_logger(&LOGGER)?;
        log::set_max_level(level);
        Ok(())
    }

    fn level(&self) -> LevelFilter {
        self.state
            .lock()
            .map(|state| state.level)
            .unwrap_or(LevelFilter::Info)
    }
}

impl log::Log for RunnerLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            match record.level() {
                Level::Error => {
                    eprintln!("\x1b[31m{}\x1b[0m", record.args());
                }
                Level::Warn => {
                    println!("\x1b[33m{}\x1b[0m", record.args());
                }
                Level::Info => {
                    println!("{}", record.args());
                }
                Level::Debug | Level::Trace => {
                    println!("\x1b[2m{}\x1b[0m", record.args());
                }
            }
        }
    }

    fn flush(&self) {}
}
