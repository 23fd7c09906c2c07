//! Status lines for the user.
//!
//! Every significant step prints one line to stderr: a component tag, a
//! glyph for success or failure, and the message. This is separate from
//! `log` output, which is opt-in diagnostics.

use colored::Colorize;

/// Kind of status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Plain informational line, no glyph
    Info,
    /// Step succeeded
    Success,
    /// Step failed
    Failure,
}

impl Status {
    /// Glyph printed before the message.
    pub fn glyph(self) -> &'static str {
        match self {
            Self::Info => "",
            Self::Success => "✓ ",
            Self::Failure => "✖ ",
        }
    }
}

/// Sink for status lines.
///
/// Components receive a `&dyn Reporter` instead of printing directly, so
/// tests can capture what a run said.
pub trait Reporter {
    /// Emit one status line.
    fn report(&self, status: Status, message: &str);

    /// Emit raw text without tag or glyph.
    fn echo(&self, text: &str);

    /// Informational line.
    fn info(&self, message: &str) {
        self.report(Status::Info, message);
    }

    /// Success line.
    fn success(&self, message: &str) {
        self.report(Status::Success, message);
    }

    /// Failure line.
    fn failure(&self, message: &str) {
        self.report(Status::Failure, message);
    }
}

/// Reporter that writes colored lines to stderr, tagged with a component
/// name (e.g. `ansible-role: ✓ ansible role 'x' installed to '...'`).
#[derive(Debug, Clone)]
pub struct ConsoleReporter {
    name: String,
}

impl ConsoleReporter {
    /// Create a reporter for the named component.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Component name used as the line tag.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Format a line the way it is printed.
    pub fn format_line(&self, status: Status, message: &str) -> String {
        let tag = format!("{}:", self.name).red().bold();
        let glyph = match status {
            Status::Info => status.glyph().normal(),
            Status::Success => status.glyph().cyan(),
            Status::Failure => status.glyph().red(),
        };
        format!("{tag} {glyph}{message}")
    }
}

impl Reporter for ConsoleReporter {
    fn report(&self, status: Status, message: &str) {
        eprintln!("{}", self.format_line(status, message));
    }

    fn echo(&self, text: &str) {
        eprintln!("{text}");
    }
}
