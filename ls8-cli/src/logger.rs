//! Stderr logger behind the `log` facade.

use log::{LevelFilter, Log, Metadata, Record};

/// Maximum level, chosen at build time through `LS8_LOG`
/// (`error`, `warn`, `info`, `debug` or `trace`).
pub const MAX_LEVEL: LevelFilter = match option_env!("LS8_LOG") {
    Some(val) => match val.as_bytes() {
        [b'e', ..] => LevelFilter::Error,
        [b'w', ..] => LevelFilter::Warn,
        [b'i', ..] => LevelFilter::Info,
        [b'd', ..] => LevelFilter::Debug,
        [b't', ..] => LevelFilter::Trace,
        _ => panic!("invalid LS8_LOG level"),
    },
    None => LevelFilter::Warn,
};

pub struct Logger;

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= MAX_LEVEL
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("[{}] {}", record.level(), record.args())
        }
    }

    fn flush(&self) {}
}

/// Install the logger. A second call is a no-op.
pub fn init() {
    if log::set_logger(&Logger).is_ok() {
        log::set_max_level(MAX_LEVEL);
    }
}
