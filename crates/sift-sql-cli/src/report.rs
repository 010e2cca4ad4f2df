//! Diagnostic rendering with source labels.

use std::io;

use ariadne::{Color, Label, Report, ReportKind, Source};
use sift_sql_core::{ErrorListener, ParseError};

/// Renders each syntax error to stderr as a labelled source excerpt.
pub struct SourceReporter<'a> {
    name: String,
    source: &'a str,
    reported: usize,
    failure: Option<io::Error>,
}

impl<'a> SourceReporter<'a> {
    pub fn new(name: impl Into<String>, source: &'a str) -> Self {
        Self {
            name: name.into(),
            source,
            reported: 0,
            failure: None,
        }
    }

    /// Returns how many diagnostics were rendered, or the first write
    /// failure.
    pub fn finish(self) -> io::Result<usize> {
        match self.failure {
            Some(error) => Err(error),
            None => Ok(self.reported),
        }
    }

    fn render(&self, error: &ParseError) -> io::Result<()> {
        // ariadne counts characters, spans count bytes.
        let start = char_offset(self.source, error.span.start);
        let end = char_offset(self.source, error.span.end).max(start);
        let note = if error.expected.is_empty() {
            error.kind.to_string()
        } else {
            format!("expected {}", error.expected.join(", "))
        };
        let label = Label::new((self.name.clone(), start..end))
            .with_message(note)
            .with_color(Color::Red);
        Report::build(ReportKind::Error, self.name.clone(), start)
            .with_message(&error.message)
            .with_label(label)
            .finish()
            .eprint((self.name.clone(), Source::from(self.source)))
    }
}

impl ErrorListener for SourceReporter<'_> {
    fn syntax_error(&mut self, error: &ParseError) {
        if self.failure.is_some() {
            return;
        }
        match self.render(error) {
            Ok(()) => self.reported += 1,
            Err(e) => self.failure = Some(e),
        }
    }
}

fn char_offset(source: &str, byte: usize) -> usize {
    let byte = byte.min(source.len());
    source
        .char_indices()
        .take_while(|(i, _)| *i < byte)
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_offset_counts_characters() {
        assert_eq!(char_offset("abc", 2), 2);
        assert_eq!(char_offset("é = 1", 2), 1);
        assert_eq!(char_offset("abc", 10), 3);
    }
}
