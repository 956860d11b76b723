//! Standard stream sinks

use crate::core::Sink;

impl Sink {
    /// The process's standard error stream, the default destination
    pub fn stderr() -> Self {
        Sink::new("stderr", std::io::stderr())
    }

    pub fn stdout() -> Self {
        Sink::new("stdout", std::io::stdout())
    }
}

impl Default for Sink {
    fn default() -> Self {
        Sink::stderr()
    }
}
