//! Diagnostics sink used by the resolver, the registry and the assembler.
//!
//! The generator never writes to stdout or to a global logger of its own.
//! Everything it wants to report goes through a [`Diagnostics`] sink passed
//! in by the caller. [`LogDiagnostics`] forwards to the `log` facade, so
//! binaries only need to install a logger (`env_logger` with `RUST_LOG`):
//!
//! ```bash
//! RUST_LOG=warn  generate-wrappers kotlin/ out/   # default, skipped members only
//! RUST_LOG=info  generate-wrappers kotlin/ out/   # one line per generated class
//! RUST_LOG=debug generate-wrappers kotlin/ out/   # every registered conversion function
//! ```

use log::Level;

/// Receiver for generator diagnostics.
pub trait Diagnostics {
    fn report(&mut self, level: Level, message: &str);

    fn debug(&mut self, message: &str) {
        self.report(Level::Debug, message);
    }

    fn info(&mut self, message: &str) {
        self.report(Level::Info, message);
    }

    fn warn(&mut self, message: &str) {
        self.report(Level::Warn, message);
    }

    fn error(&mut self, message: &str) {
        self.report(Level::Error, message);
    }
}

/// Forwards every message to the `log` facade under the `jow_codegen` target.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogDiagnostics;

impl Diagnostics for LogDiagnostics {
    fn report(&mut self, level: Level, message: &str) {
        log::log!(target: "jow_codegen", level, "{}", message);
    }
}

/// Keeps messages in memory, in the order they were reported.
#[derive(Debug, Default, Clone)]
pub struct CollectedDiagnostics {
    messages: Vec<(Level, String)>,
}

impl CollectedDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[(Level, String)] {
        &self.messages
    }

    /// Messages reported at exactly `level`.
    pub fn at(&self, level: Level) -> impl Iterator<Item = &str> {
        self.messages
            .iter()
            .filter(move |(l, _)| *l == level)
            .map(|(_, m)| m.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl Diagnostics for CollectedDiagnostics {
    fn report(&mut self, level: Level, message: &str) {
        self.messages.push((level, message.to_string()));
    }
}
