//! Console logger
//!
//! This is a logger implementation that writes messages, one byte at a time, to a console
//! register. Platforms without a console simply drop the logs.

use core::fmt::Write;

use bn_sum4_config as config;
use log::{Level, LevelFilter, Metadata, Record};

use crate::mmio::WriteOnly;

// ————————————————————————————————— Logger ————————————————————————————————— //

pub struct Logger {}

impl Logger {
    const GLOBAL_LOG_LEVEL: LevelFilter = match config::CONSOLE_ADDRESS {
        Some(_) => parse_level(config::LOG_LEVEL),
        None => LevelFilter::Off,
    };
}

impl log::Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= Self::GLOBAL_LOG_LEVEL
    }

    fn log(&self, record: &Record) {
        let Some(console) = config::CONSOLE_ADDRESS else {
            return;
        };
        if !self.enabled(record.metadata()) {
            return;
        }

        // Format into a stack-allocated buffer, 200 characters are enough for the panic
        // messages while keeping the stack usage low. Overflowing messages are truncated.
        let mut buff: StackBuffer<200> = StackBuffer::new();
        format_record(&mut buff, record).ok();

        // SAFETY: the console address is part of the platform configuration.
        let console = unsafe { WriteOnly::<u32>::new(console) };
        write_console(&console, buff.as_bytes());
    }

    fn flush(&self) {}
}

/// Initialize the firmware logger
///
/// This function is called automatically by `setup_binary!`.
pub fn init() {
    static LOGGER: Logger = Logger {};

    // SAFETY: called once on the boot hart before anything else runs, interrupts are disabled.
    unsafe {
        log::set_logger_racy(&LOGGER).ok();
        log::set_max_level_racy(Logger::GLOBAL_LOG_LEVEL);
    }
}

// ————————————————————————————————— Utils —————————————————————————————————— //

/// Format a record as a single `[Level | target] message` line.
fn format_record<W: Write>(out: &mut W, record: &Record) -> core::fmt::Result {
    writeln!(
        out,
        "[{} | {}] {}",
        level_display(record.level()),
        record.target(),
        record.args()
    )
}

/// Send the bytes to the console, one 32-bit store per byte.
fn write_console(console: &WriteOnly<u32>, bytes: &[u8]) {
    for byte in bytes {
        console.write(*byte as u32);
    }
}

const fn parse_level(level: Option<&str>) -> LevelFilter {
    match level {
        Some(s) => match s.as_bytes() {
            b"trace" => LevelFilter::Trace,
            b"debug" => LevelFilter::Debug,
            b"info" => LevelFilter::Info,
            b"warn" => LevelFilter::Warn,
            b"error" => LevelFilter::Error,
            b"off" => LevelFilter::Off,
            _ => LevelFilter::Info,
        },
        None => LevelFilter::Info,
    }
}

fn level_display(level: Level) -> &'static str {
    if config::LOG_COLOR {
        // We log with colors, using ANSI escape sequences
        match level {
            Level::Error => "\x1b[31;1mError\x1b[0m",
            Level::Warn => "\x1b[33;1mWarn\x1b[0m ",
            Level::Info => "\x1b[32;1mInfo\x1b[0m ",
            Level::Debug => "\x1b[34;1mDebug\x1b[0m",
            Level::Trace => "\x1b[35;1mTrace\x1b[0m",
        }
    } else {
        match level {
            Level::Error => "Error",
            Level::Warn => "Warn ",
            Level::Info => "Info ",
            Level::Debug => "Debug",
            Level::Trace => "Trace",
        }
    }
}

// —————————————————————————————— Stack Buffer —————————————————————————————— //

/// A simple buffer than can be stack allocated and implement the Write trait.
struct StackBuffer<const N: usize> {
    buff: [u8; N],
    cursor: usize,
}

impl<const N: usize> StackBuffer<N> {
    const fn new() -> Self {
        StackBuffer {
            buff: [0u8; N],
            cursor: 0,
        }
    }

    fn as_bytes(&self) -> &[u8] {
        &self.buff[..self.cursor]
    }
}

impl<const N: usize> Write for StackBuffer<N> {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        let bytes = s.as_bytes();

        // Keep as much as possible, then report the truncation.
        let n = bytes.len().min(N - self.cursor);
        let new_cursor = self.cursor + n;
        self.buff[self.cursor..new_cursor].copy_from_slice(&bytes[..n]);
        self.cursor = new_cursor;

        if n < bytes.len() {
            Err(core::fmt::Error)
        } else {
            Ok(())
        }
    }
}

// ————————————————————————————————— Tests —————————————————————————————————— //
