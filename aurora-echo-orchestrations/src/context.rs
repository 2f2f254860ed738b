//! Operator echo
//!
//! Every step that reads or changes provider state writes a status line before
//! and after it acts. The lines go to stdout (the command's audit trail) and are
//! mirrored as tracing events. Tests capture them instead.

use chrono::Utc;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone)]
enum EchoOutput {
    Stdout,
    Captured(Arc<Mutex<Vec<String>>>),
}

#[derive(Debug, Clone)]
pub struct EchoContext {
    command: &'static str,
    output: EchoOutput,
}

impl EchoContext {
    /// Echo to stdout
    pub fn new(command: &'static str) -> Self {
        Self {
            command,
            output: EchoOutput::Stdout,
        }
    }

    /// Keep lines in memory, without the timestamped prefix
    pub fn capturing(command: &'static str) -> Self {
        Self {
            command,
            output: EchoOutput::Captured(Arc::new(Mutex::new(Vec::new()))),
        }
    }

    pub fn command(&self) -> &'static str {
        self.command
    }

    /// `[<utc timestamp>] aurora-echo <command>:`
    pub fn prefix(&self) -> String {
        format!(
            "[{}] aurora-echo {}:",
            Utc::now().format("%Y-%m-%d %H:%M:%S"),
            self.command
        )
    }

    /// A message with the echo prefix, for prompts shown outside the context
    pub fn prefixed(&self, message: &str) -> String {
        format!("{} {}", self.prefix(), message)
    }

    pub fn trace_info(&self, message: impl AsRef<str>) {
        let message = message.as_ref();
        tracing::info!(command = self.command, "{}", message);
        self.emit(message);
    }

    pub fn trace_warn(&self, message: impl AsRef<str>) {
        let message = message.as_ref();
        tracing::warn!(command = self.command, "{}", message);
        self.emit(message);
    }

    pub fn trace_error(&self, message: impl AsRef<str>) {
        let message = message.as_ref();
        tracing::error!(command = self.command, "{}", message);
        self.emit(message);
    }

    /// Multi-line payload echoed verbatim (no prefix)
    pub fn echo_block(&self, block: &str) {
        tracing::debug!(command = self.command, payload = block, "echoed payload");
        match &self.output {
            EchoOutput::Stdout => println!("{}", block),
            EchoOutput::Captured(lines) => {
                if let Ok(mut lines) = lines.lock() {
                    lines.push(block.to_string());
                }
            }
        }
    }

    /// Lines captured so far; always empty when echoing to stdout
    pub fn transcript(&self) -> Vec<String> {
        match &self.output {
            EchoOutput::Stdout => Vec::new(),
            EchoOutput::Captured(lines) => lines.lock().map(|l| l.clone()).unwrap_or_default(),
        }
    }

    fn emit(&self, message: &str) {
        match &self.output {
            EchoOutput::Stdout => println!("{}", self.prefixed(message)),
            EchoOutput::Captured(lines) => {
                if let Ok(mut lines) = lines.lock() {
                    lines.push(message.to_string());
                }
            }
        }
    }
}
