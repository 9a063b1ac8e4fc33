use ariadne::{Color, Label, Report, ReportKind, Source};
use std::fmt;

/// A compile error with source location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Byte range the diagnostic points at.
    pub span: std::ops::Range<usize>,
    /// Headline message.
    pub message: String,
    /// Optional text attached to the highlighted span.
    pub label: Option<String>,
}

impl Diagnostic {
    /// Create a diagnostic without a label.
    pub fn error(span: std::ops::Range<usize>, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
            label: None,
        }
    }

    /// Attach a label to the highlighted span.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "error: {}", self.message)
    }
}

/// Render diagnostics using ariadne for pretty terminal output.
pub fn render_diagnostics(source: &str, filename: &str, diagnostics: &[Diagnostic]) -> String {
    let mut output = Vec::new();

    for diag in diagnostics {
        let span = (filename, diag.span.clone());
        let label_text = diag.label.as_deref().unwrap_or(&diag.message);
        Report::build(ReportKind::Error, span.clone())
            .with_message(&diag.message)
            .with_label(
                Label::new(span)
                    .with_message(label_text)
                    .with_color(Color::Red),
            )
            .finish()
            .write((filename, Source::from(source)), &mut output)
            .ok();
    }

    String::from_utf8(output).unwrap_or_default()
}
