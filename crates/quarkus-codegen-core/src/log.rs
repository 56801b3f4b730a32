//! Human-readable progress log returned to the caller of a generation run.

/// Append-only, ordered record of what a run emitted.
///
/// Every appended line is also forwarded to `tracing` at `debug` level; the
/// caller owns user-facing output of the lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationLog {
    lines: Vec<String>,
}

impl GenerationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, line: impl Into<String>) {
        let line = line.into();
        tracing::debug!("{line}");
        self.lines.push(line);
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Render with CRLF after every line, the format written to log files.
    pub fn render(&self) -> String {
        self.lines.iter().map(|line| format!("{line}\r\n")).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_append_preserves_order() {
        let mut log = GenerationLog::new();
        assert!(log.is_empty());
        log.append("Generating Dockerfiles");
        log.append(String::from("Generating project files"));
        assert_eq!(log.len(), 2);
        assert_eq!(
            log.lines(),
            ["Generating Dockerfiles", "Generating project files"]
        );
    }

    #[test]
    fn test_render_crlf() {
        let mut log = GenerationLog::new();
        log.append("a");
        log.append("b");
        assert_eq!(log.render(), "a\r\nb\r\n");
        assert_eq!(GenerationLog::new().render(), "");
    }

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_lines_stay_below_info() {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::INFO)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            GenerationLog::new().append("Generating Dockerfiles");
            tracing::info!("run finished");
        });

        let output = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("run finished"));
        assert!(!output.contains("Generating Dockerfiles"));
    }
}
