use chrono::Local;
use log::{Level, LevelFilter, Metadata, Record};

/// Logger printing progress to the console.
///
/// Info lines are printed bare, like the tool's progress output; other
/// levels get a timestamp and level tag on stderr.
pub struct ConsoleLogger {
    max_level: LevelFilter,
}

impl ConsoleLogger {
    pub fn new(verbose: bool) -> Self {
        Self {
            max_level: if verbose {
                LevelFilter::Debug
            } else {
                LevelFilter::Info
            },
        }
    }

    pub fn init(self) -> Result<(), log::SetLoggerError> {
        let max_level = self.max_level;
        log::set_boxed_logger(Box::new(self))?;
        log::set_max_level(max_level);
        Ok(())
    }
}

impl log::Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.max_level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        match record.level() {
            Level::Info => println!("{}", record.args()),
            level => eprintln!(
                "{} [{}] {}: {}",
                Local::now().format("%H:%M:%S"),
                level,
                record.target(),
                record.args()
            ),
        }
    }

    fn flush(&self) {}
}
