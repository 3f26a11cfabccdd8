//! Diagnostic channel shared by every renderer.
//!
//! Warnings never abort generation. They are collected in emission order so
//! the CLI can print the javadoc-style summary at the end, and are logged
//! through `tracing` as they happen.

use crate::model::Position;
use std::cell::RefCell;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub position: Option<Position>,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = match self.severity {
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        match self.position {
            Some(ref pos) => write!(f, "{}: {} - {}", pos, level, self.message),
            None => write!(f, "{} - {}", level, self.message),
        }
    }
}

#[derive(Debug, Default)]
pub struct Reporter {
    diagnostics: RefCell<Vec<Diagnostic>>,
}

impl Reporter {
    pub fn warning(&self, position: Option<&Position>, message: impl Into<String>) {
        self.report(Severity::Warning, position, message.into());
    }

    pub fn error(&self, position: Option<&Position>, message: impl Into<String>) {
        self.report(Severity::Error, position, message.into());
    }

    fn report(&self, severity: Severity, position: Option<&Position>, message: String) {
        let diagnostic = Diagnostic {
            severity,
            position: position.cloned(),
            message,
        };
        match severity {
            Severity::Warning => tracing::warn!("{}", diagnostic),
            Severity::Error => tracing::error!("{}", diagnostic),
        }
        self.diagnostics.borrow_mut().push(diagnostic);
    }

    pub fn warnings(&self) -> usize {
        self.count(Severity::Warning)
    }

    pub fn errors(&self) -> usize {
        self.count(Severity::Error)
    }

    fn count(&self, severity: Severity) -> usize {
        self.diagnostics
            .borrow()
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }

    #[cfg(test)]
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics.borrow().clone()
    }
}
