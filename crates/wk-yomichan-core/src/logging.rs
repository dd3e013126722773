//! Logging setup: env_logger behind the `log` facade, routed through
//! indicatif when spinners are on screen

use indicatif::MultiProgress;

/// Crates whose debug output drowns our own
const NOISY_MODULES: &[&str] = &["hyper_util", "reqwest", "native_tls"];

/// ANSI color code and padded label for a log level.
fn level_style(level: log::Level, color: bool) -> (&'static str, &'static str, &'static str) {
    let label = match level {
        log::Level::Error => "ERROR",
        log::Level::Warn => "WARN ",
        log::Level::Info => "INFO ",
        log::Level::Debug => "DEBUG",
        log::Level::Trace => "TRACE",
    };
    if !color {
        return ("", label, "");
    }
    let ansi = match level {
        log::Level::Error => "\x1b[31m",
        log::Level::Warn => "\x1b[33m",
        log::Level::Info => "\x1b[32m",
        log::Level::Debug => "\x1b[36m",
        log::Level::Trace => "\x1b[35m",
    };
    (ansi, label, "\x1b[0m")
}

fn default_filter(debug: bool) -> &'static str {
    if debug { "debug" } else { "info" }
}

/// Builder honoring `RUST_LOG`, falling back to `info` / `debug`
fn builder(debug: bool) -> env_logger::Builder {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter(debug)));
    if std::env::var_os("RUST_LOG").is_none() {
        for module in NOISY_MODULES {
            builder.filter_module(module, log::LevelFilter::Warn);
        }
    }
    builder
}

/// Logger that prints through indicatif MultiProgress so spinner lines stay intact.
pub struct IndicatifLogger {
    inner: env_logger::Logger,
    multi: MultiProgress,
}

impl IndicatifLogger {
    pub fn new(inner: env_logger::Logger, multi: MultiProgress) -> Self {
        Self { inner, multi }
    }
}

impl log::Log for IndicatifLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        self.inner.enabled(metadata)
    }

    fn log(&self, record: &log::Record) {
        if self.inner.enabled(record.metadata()) {
            let (pre, label, post) = level_style(record.level(), true);
            let line = format!("[{pre}{label}{post}] {}", record.args());
            self.multi.suspend(|| eprintln!("{line}"));
        }
    }

    fn flush(&self) {
        self.inner.flush();
    }
}

/// Initialize logging; pass the progress `MultiProgress` when stderr is a TTY
pub fn init_logging(debug: bool, multi: Option<&MultiProgress>) {
    use std::io::Write;

    if let Some(multi) = multi {
        let logger = builder(debug).build();
        let max_level = logger.filter();

        log::set_boxed_logger(Box::new(IndicatifLogger::new(logger, multi.clone())))
            .expect("failed to init logger");
        log::set_max_level(max_level);
    } else {
        // Non-TTY: no ANSI colors
        builder(debug)
            .format(|buf, record| {
                let (_, label, _) = level_style(record.level(), false);
                writeln!(buf, "[{label}] {}", record.args())
            })
            .init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_style_has_no_ansi() {
        assert_eq!(level_style(log::Level::Warn, false), ("", "WARN ", ""));
    }

    #[test]
    fn colored_style_resets() {
        let (pre, label, post) = level_style(log::Level::Error, true);
        assert_eq!(pre, "\x1b[31m");
        assert_eq!(label, "ERROR");
        assert_eq!(post, "\x1b[0m");
    }

    #[test]
    fn labels_are_equal_width() {
        for level in [
            log::Level::Error,
            log::Level::Warn,
            log::Level::Info,
            log::Level::Debug,
            log::Level::Trace,
        ] {
            assert_eq!(level_style(level, false).1.len(), 5);
        }
    }

    #[test]
    fn debug_flag_selects_filter() {
        assert_eq!(default_filter(true), "debug");
        assert_eq!(default_filter(false), "info");
    }
}
