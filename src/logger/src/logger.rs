use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use indicatif_log_bridge::LogWrapper;
use log::LevelFilter;
use log::Level;
use env_logger::{Builder, Env, fmt::Color};
use std::io::Write;
use once_cell::sync::OnceCell;

mod error;
pub use error::LoggerError;

static INSTANCE: OnceCell<Logger> = OnceCell::new();

/// Environment variable used to override the command line verbosity (e.g. `HEREDITY_LOG=trace`)
pub const LOG_ENV_VAR: &str = "HEREDITY_LOG";

#[derive(Debug)]
pub struct Logger {
    multi_pg: MultiProgress,
}


impl Logger {

    /// Initialize the global logger, and wrap it within an `indicatif::MultiProgress`, so that
    /// progress bars and log records do not step on each other.
    ///
    /// # Errors
    /// - if a global logger was already set.
    pub fn init(verbosity: u8) -> Result<(), LoggerError> {
        let log_level = Self::u8_to_loglevel(verbosity);
        let env = Env::default()
            .filter(LOG_ENV_VAR);

        let logger = Builder::new().filter_level(log_level)
            .format(|buf, record| {
                let (traceback, set_intensity) = if record.level() == LevelFilter::Error {
                    (format!("(@ {}:{}) ", record.file().unwrap_or("unknown"), record.line().unwrap_or(0)), true)
                } else {
                    (String::new(), false)
                };

                let mut arg_style = buf.style();
                arg_style.set_intense(set_intensity);

                let mut level_style = buf.style();
                let color = match record.level() {
                    Level::Error => Color::Red,
                    Level::Warn  => Color::Yellow,
                    Level::Info  => Color::Green,
                    Level::Debug => Color::Blue,
                    Level::Trace => Color::Cyan
                };
                level_style.set_color(color).set_bold(true);

                writeln!(
                    buf,
                    "[{} {: <5} {}] {traceback}{}",
                    chrono::Local::now().format("%Y-%m-%dT%H:%M:%S"),
                    level_style.value(record.level()),
                    record.target(),
                    arg_style.value(record.args())
                )
            })
            .parse_env(env)
            .build();

        // Progress bar support.
        let multi_pg = MultiProgress::new();
        LogWrapper::new(multi_pg.clone(), logger)
            .try_init()
            .map_err(LoggerError::SetLogger)?;
        INSTANCE.set(Self{multi_pg}).map_err(|_| LoggerError::AlreadyInitialized)
    }

    fn u8_to_loglevel(verbosity: u8) -> LevelFilter {
        match verbosity {
            0            => LevelFilter::Error,
            1            => LevelFilter::Warn,
            2            => LevelFilter::Info,
            3            => LevelFilter::Debug,
            4..= u8::MAX => LevelFilter::Trace
        }
    }

    pub fn set_level(verbosity: u8) {
        log::set_max_level(Self::u8_to_loglevel(verbosity));
    }

    /// Access the global `MultiProgress`. Returns `None` if `Logger::init()` was never called (e.g. in library tests).
    pub fn multi() -> Option<&'static MultiProgress> {
        INSTANCE.get().map(|logger| &logger.multi_pg)
    }

    /// Create a progress bar of `len` steps, attached to the global `MultiProgress`.
    /// The bar is hidden whenever the logger is uninitialized, or when the user asked for a quiet output.
    pub fn progress_bar(len: u64, message: &'static str) -> ProgressBar {
        let Some(multi) = Self::multi().filter(|_| log::max_level() >= LevelFilter::Info) else {
            return ProgressBar::hidden()
        };

        let style = ProgressStyle::with_template("{msg} [{elapsed_precise}] {wide_bar} {pos}/{len} ({eta})")
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        multi.add(ProgressBar::new(len).with_style(style).with_message(message))
    }
}
