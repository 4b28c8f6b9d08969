//! Console Logger
//!
//! `log` backend for the page and the service worker.
//! Routes records to `console.*` on wasm32; everywhere else hands off to
//! `env_logger`, so `RUST_LOG` still overrides the level in native tests.

use log::{Level, SetLoggerError};

#[cfg(target_arch = "wasm32")]
mod console {
    use log::{Level, Log, Metadata, Record};

    pub(crate) struct ConsoleLogger {
        pub(crate) level: Level,
    }

    impl Log for ConsoleLogger {
        fn enabled(&self, metadata: &Metadata) -> bool {
            metadata.level() <= self.level
        }

        fn log(&self, record: &Record) {
            if !self.enabled(record.metadata()) {
                return;
            }
            let line = wasm_bindgen::JsValue::from_str(&format!("{:<5} {}", record.level(), record.args()));
            match record.level() {
                Level::Error => web_sys::console::error_1(&line),
                Level::Warn => web_sys::console::warn_1(&line),
                Level::Info => web_sys::console::info_1(&line),
                Level::Debug | Level::Trace => web_sys::console::log_1(&line),
            }
        }

        fn flush(&self) {}
    }
}

/// Install the logger at the given level.
///
/// Returns an error if another logger was installed first.
#[cfg(target_arch = "wasm32")]
pub fn init_logger(level: Level) -> Result<(), SetLoggerError> {
    let logger: &'static console::ConsoleLogger = Box::leak(Box::new(console::ConsoleLogger { level }));
    log::set_logger(logger)?;
    log::set_max_level(level.to_level_filter());
    Ok(())
}

/// Install the logger at the given level.
///
/// Returns an error if another logger was installed first.
#[cfg(not(target_arch = "wasm32"))]
pub fn init_logger(level: Level) -> Result<(), SetLoggerError> {
    env_logger::Builder::new()
        .filter_level(level.to_level_filter())
        .parse_default_env()
        .try_init()
}

/// Install the logger, ignoring a second initialization.
pub fn init_or_ignore(level: Level) {
    let _ = init_logger(level);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_is_an_error() {
        init_or_ignore(Level::Debug);
        log::warn!("[cache] offline");
        assert!(init_logger(Level::Debug).is_err());
    }
}
