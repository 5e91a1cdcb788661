//! xolog_diagnostics: Diagnostic messages and error reporting infrastructure.
//!
//! Lexical errors are plain data: a [`Diagnostic`] carries the line, the
//! location and the resolved message text. Producers hand diagnostics to an
//! [`ErrorReporter`], which decides what to do with them (collect them,
//! print them, count them).

use std::fmt;
use std::io::{self, Write};

/// Diagnostic category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticCategory {
    Warning,
    Error,
}

impl DiagnosticCategory {
    /// Capitalized label used in one-line reports.
    pub fn label(self) -> &'static str {
        match self {
            DiagnosticCategory::Warning => "Warning",
            DiagnosticCategory::Error => "Error",
        }
    }
}

impl fmt::Display for DiagnosticCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticCategory::Warning => write!(f, "warning"),
            DiagnosticCategory::Error => write!(f, "error"),
        }
    }
}

/// A diagnostic message template with a code and category.
#[derive(Debug, Clone)]
pub struct DiagnosticMessage {
    /// The diagnostic code.
    pub code: u32,
    /// The category of this diagnostic.
    pub category: DiagnosticCategory,
    /// The message template string. May contain `{0}`, `{1}`, etc. placeholders.
    pub message: &'static str,
}

/// A realized diagnostic with location information and resolved message text.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    /// The 1-based source line, if known.
    pub line: Option<usize>,
    /// Free-form location detail. Empty for lexical errors.
    pub location: String,
    /// The resolved message text.
    pub message_text: String,
    /// The diagnostic code. Zero for reports that did not come from a template.
    pub code: u32,
    /// The category.
    pub category: DiagnosticCategory,
}

impl Diagnostic {
    /// Create a new diagnostic without a line.
    pub fn new(message: &DiagnosticMessage, args: &[&str]) -> Self {
        Self {
            line: None,
            location: String::new(),
            message_text: format_message(message.message, args),
            code: message.code,
            category: message.category,
        }
    }

    /// Create a new diagnostic attributed to a source line.
    pub fn at_line(line: usize, message: &DiagnosticMessage, args: &[&str]) -> Self {
        Self {
            line: Some(line),
            ..Self::new(message, args)
        }
    }

    /// Build an error from a raw `(line, location, message)` report.
    pub fn reported(line: usize, location: &str, message: &str) -> Self {
        Self {
            line: Some(line),
            location: location.to_string(),
            message_text: message.to_string(),
            code: 0,
            category: DiagnosticCategory::Error,
        }
    }

    /// Whether this is an error diagnostic.
    pub fn is_error(&self) -> bool {
        self.category == DiagnosticCategory::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(line) = self.line {
            write!(f, "[line {}] ", line)?;
        }
        write!(f, "{}", self.category.label())?;
        if !self.location.is_empty() {
            write!(f, " {}", self.location)?;
        }
        write!(f, ": {}", self.message_text)
    }
}

/// Format a diagnostic message template by replacing `{0}`, `{1}`, etc. with arguments.
pub fn format_message(template: &str, args: &[&str]) -> String {
    let mut result = template.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{}}}", i), arg);
    }
    result
}

/// Sink for errors found while processing source text.
///
/// `report` is the raw `(line, location, message)` interface. Producers that
/// already hold a [`Diagnostic`] call `report_diagnostic`, which sinks may
/// override to keep the code and category.
pub trait ErrorReporter {
    fn report(&mut self, line: usize, location: &str, message: &str);

    fn report_diagnostic(&mut self, diagnostic: Diagnostic) {
        self.report(
            diagnostic.line.unwrap_or(0),
            &diagnostic.location,
            &diagnostic.message_text,
        );
    }
}

impl<R: ErrorReporter + ?Sized> ErrorReporter for &mut R {
    fn report(&mut self, line: usize, location: &str, message: &str) {
        (**self).report(line, location, message);
    }

    fn report_diagnostic(&mut self, diagnostic: Diagnostic) {
        (**self).report_diagnostic(diagnostic);
    }
}

/// A collection of diagnostics accumulated while scanning.
#[derive(Debug, Clone, Default)]
pub struct DiagnosticCollection {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollection {
    pub fn new() -> Self {
        Self {
            diagnostics: Vec::new(),
        }
    }

    pub fn add(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.category == DiagnosticCategory::Error)
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.category == DiagnosticCategory::Error)
            .count()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }
}

impl ErrorReporter for DiagnosticCollection {
    fn report(&mut self, line: usize, location: &str, message: &str) {
        self.add(Diagnostic::reported(line, location, message));
    }

    fn report_diagnostic(&mut self, diagnostic: Diagnostic) {
        self.add(diagnostic);
    }
}

// ANSI color codes
const RED: &str = "\x1b[31m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

/// Writes each report as a single line to an output sink.
///
/// The sink is stderr unless another writer is supplied. The first write
/// failure is kept until [`take_write_error`](ConsoleReporter::take_write_error)
/// collects it; later reports are still attempted and counted.
pub struct ConsoleReporter<W: Write = io::Stderr> {
    out: W,
    use_color: bool,
    error_count: usize,
    write_error: Option<io::Error>,
}

impl ConsoleReporter<io::Stderr> {
    pub fn stderr(use_color: bool) -> Self {
        Self::new(io::stderr(), use_color)
    }
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(out: W, use_color: bool) -> Self {
        Self {
            out,
            use_color,
            error_count: 0,
            write_error: None,
        }
    }

    /// Whether any error has been reported. Never reset.
    pub fn had_error(&self) -> bool {
        self.error_count > 0
    }

    pub fn error_count(&self) -> usize {
        self.error_count
    }

    /// The first error hit while writing a report, if any.
    pub fn take_write_error(&mut self) -> Option<io::Error> {
        self.write_error.take()
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_line(&mut self, diagnostic: &Diagnostic) {
        let written = if self.use_color {
            let prefix = match diagnostic.line {
                Some(line) => format!("[line {}] ", line),
                None => String::new(),
            };
            let location = if diagnostic.location.is_empty() {
                String::new()
            } else {
                format!(" {}", diagnostic.location)
            };
            writeln!(
                self.out,
                "{}{}{}{}{}{}: {}",
                BOLD,
                RED,
                prefix,
                diagnostic.category.label(),
                RESET,
                location,
                diagnostic.message_text
            )
        } else {
            writeln!(self.out, "{}", diagnostic)
        };
        if let Err(e) = written {
            self.write_error.get_or_insert(e);
        }
    }
}

impl<W: Write> ErrorReporter for ConsoleReporter<W> {
    fn report(&mut self, line: usize, location: &str, message: &str) {
        self.report_diagnostic(Diagnostic::reported(line, location, message));
    }

    fn report_diagnostic(&mut self, diagnostic: Diagnostic) {
        if diagnostic.is_error() {
            self.error_count += 1;
        }
        self.write_line(&diagnostic);
    }
}

// ============================================================================
// Diagnostic Messages
// ============================================================================

pub mod messages {
    use super::*;

    macro_rules! diag {
        ($code:expr, Error, $msg:expr) => {
            DiagnosticMessage { code: $code, category: DiagnosticCategory::Error, message: $msg }
        };
        ($code:expr, Warning, $msg:expr) => {
            DiagnosticMessage { code: $code, category: DiagnosticCategory::Warning, message: $msg }
        };
    }

    // ========================================================================
    // Scanner errors (1000-1099)
    // ========================================================================
    pub const UNEXPECTED_CHARACTER_0: DiagnosticMessage = diag!(1001, Error, "Unexpected character: {0}");
    pub const UNTERMINATED_STRING: DiagnosticMessage = diag!(1002, Error, "Unterminated string.");
    pub const INVALID_NUMBER_0: DiagnosticMessage = diag!(1003, Error, "Invalid number literal: {0}");
}
