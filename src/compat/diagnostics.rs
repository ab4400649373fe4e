//! Debug-gated diagnostics

/// Receives diagnostic messages once the debug flag has allowed them through
pub trait DiagnosticSink {
    fn emit(&mut self, message: &str);
}

/// Forwards diagnostics to `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn emit(&mut self, message: &str) {
        tracing::info!(target: "clever_girl::diagnostics", "{}", message);
    }
}

/// Keeps every diagnostic in memory, e.g. for an in-game log viewer
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    entries: Vec<String>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }
}

impl DiagnosticSink for MemorySink {
    fn emit(&mut self, message: &str) {
        self.entries.push(message.to_string());
    }
}
