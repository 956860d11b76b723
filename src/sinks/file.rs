//! File sink

use crate::core::{LoggerError, Result, Sink};
use std::fs::OpenOptions;
use std::path::Path;

impl Sink {
    /// Append to `path`, creating the file if needed
    ///
    /// Records are not buffered: each one reaches the file with a single
    /// append write before the logging call returns.
    ///
    /// ```no_run
    /// use fieldlog::{Logger, Sink};
    ///
    /// let logger = Logger::with_sink(Sink::file("/var/log/app.log").unwrap());
    /// logger.info("started");
    /// logger.flush().unwrap();
    /// ```
    pub fn file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| {
                LoggerError::io_operation(
                    "opening log file",
                    format!("cannot open '{}'", path.display()),
                    e,
                )
            })?;

        Ok(Sink::new(&path.display().to_string(), file))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_file_sink_appends() -> Result<()> {
        let dir = tempdir()?;
        let log_path = dir.path().join("app.log");
        fs::write(&log_path, "existing\n")?;

        let sink = Sink::file(&log_path)?;
        sink.write_record(b"first\n")?;
        sink.reopen().write_record(b"second\n")?;
        sink.flush()?;

        let content = fs::read_to_string(&log_path)?;
        assert_eq!(content, "existing\nfirst\nsecond\n");
        Ok(())
    }

    #[test]
    fn test_records_visible_without_flush() -> Result<()> {
        let dir = tempdir()?;
        let log_path = dir.path().join("live.log");

        let sink = Sink::file(&log_path)?;
        sink.write_record(b"first\n")?;
        assert_eq!(fs::read_to_string(&log_path)?, "first\n");

        sink.write_record(b"second\n")?;
        assert_eq!(fs::read_to_string(&log_path)?, "first\nsecond\n");
        Ok(())
    }

    #[test]
    fn test_file_sink_bad_path() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("no_such_dir").join("app.log");

        let err = Sink::file(&missing).unwrap_err();
        assert!(matches!(err, LoggerError::IoOperation { .. }));
        assert!(err.to_string().contains("opening log file"));
    }
}
