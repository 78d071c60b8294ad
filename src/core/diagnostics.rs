/*
 * Diagnostics reporting for the styling subsystem. Parse and resolution code
 * never writes to an ambient logger directly; it reports through an injected
 * `DiagnosticSinkOperations` so hosts can route messages wherever they like
 * and tests can capture them. `CoreDiagnosticSink` is the default sink and
 * forwards to the `log` crate under a `[styles]` prefix.
 */

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticSeverity {
    Info,
    Warning,
    Error,
}

pub trait DiagnosticSinkOperations: Send + Sync {
    fn report(&self, severity: DiagnosticSeverity, message: &str);
}

pub struct CoreDiagnosticSink {}

impl CoreDiagnosticSink {
    pub fn new() -> Self {
        CoreDiagnosticSink {}
    }
}

impl Default for CoreDiagnosticSink {
    fn default() -> Self {
        Self::new()
    }
}

impl DiagnosticSinkOperations for CoreDiagnosticSink {
    fn report(&self, severity: DiagnosticSeverity, message: &str) {
        match severity {
            DiagnosticSeverity::Info => log::info!("[styles] {message}"),
            DiagnosticSeverity::Warning => log::warn!("[styles] {message}"),
            DiagnosticSeverity::Error => log::error!("[styles] {message}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct CollectingSink {
        messages: Mutex<Vec<(DiagnosticSeverity, String)>>,
    }

    impl CollectingSink {
        fn new() -> Self {
            CollectingSink {
                messages: Mutex::new(Vec::new()),
            }
        }
    }

    impl DiagnosticSinkOperations for CollectingSink {
        fn report(&self, severity: DiagnosticSeverity, message: &str) {
            self.messages
                .lock()
                .unwrap()
                .push((severity, message.to_string()));
        }
    }

    #[test]
    fn test_sink_receives_severity_and_message() {
        let sink = CollectingSink::new();
        sink.report(DiagnosticSeverity::Warning, "[syntax warning] something");
        sink.report(DiagnosticSeverity::Error, "[syntax error] something else");

        let messages = sink.messages.lock().unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].0, DiagnosticSeverity::Warning);
        assert!(messages[1].1.contains("[syntax error]"));
    }

    #[test]
    fn test_core_sink_accepts_all_severities() {
        let sink = CoreDiagnosticSink::new();
        sink.report(DiagnosticSeverity::Info, "info message");
        sink.report(DiagnosticSeverity::Warning, "warning message");
        sink.report(DiagnosticSeverity::Error, "error message");
    }
}
