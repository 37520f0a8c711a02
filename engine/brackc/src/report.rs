//! Grammar-error reports with source context.

use ariadne::{Color, Label, Report, ReportKind, Source};
use brack_eval::GrammarError;

/// Print an ariadne report for a fatal grammar error.
pub fn emit(name: &str, source: &str, error: &GrammarError) {
    let diagnostic = error.to_diagnostic();
    let mut builder = Report::build(ReportKind::Error, name, diagnostic.span.start as usize)
        .with_message(&diagnostic.message);
    if let Some(code) = &diagnostic.code {
        builder = builder.with_code(code);
    }
    for label in &diagnostic.labels {
        let color = if label.is_primary {
            Color::Red
        } else {
            Color::Yellow
        };
        builder = builder.with_label(
            Label::new((name, label.span.range()))
                .with_message(&label.message)
                .with_color(color),
        );
    }
    for note in &diagnostic.notes {
        builder = builder.with_note(note);
    }
    let _ = builder.finish().eprint((name, Source::from(source)));
}
