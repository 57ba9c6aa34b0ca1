use std::path::PathBuf;
pub use codespan_reporting::diagnostic::{LabelStyle, Severity};
use codespan_reporting::{diagnostic::Label as CodespanLabel, files::SimpleFiles};
use termcolor::Buffer;
use super::src_span::SrcSpan;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Warning,
    Error,
}

impl From<Level> for Severity {
    fn from(level: Level) -> Self {
        match level {
            Level::Error => Severity::Error,
            Level::Warning => Severity::Warning,
        }
    }
}

pub struct Label {
    pub text: Option<String>,
    pub span: SrcSpan
}

impl Label {
    pub fn new(text: &str, span: SrcSpan) -> Self {
        Self {
            text: Some(text.to_string()),
            span
        }
    }

    fn to_codespan_label(&self, file_id: usize, style: LabelStyle) -> CodespanLabel<usize> {
        let label = CodespanLabel::new(
            style,
            file_id,
            (self.span.start as usize)..(self.span.end as usize),
        );

        match &self.text {
            None => label,
            Some(text) => label.with_message(text.clone()),
        }
    }
}

pub struct Location<'a> {
    pub src: &'a str,
    pub path: PathBuf,
    pub label: Label,
}

impl<'a> Location<'a> {
    pub fn new(src: &'a str, path: PathBuf, label: Label) -> Self {
        Self {
            src,
            path,
            label
        }
    }

    /// Programs typed into a REPL or passed as text have no path.
    fn display_path(&self) -> String {
        if self.path.as_os_str().is_empty() {
            "<input>".to_string()
        } else {
            self.path.to_string_lossy().into_owned()
        }
    }
}

/// A titled message with optional notes, pointing into the program when a location is known.
pub struct Diagnostic<'a> {
    pub title: String,
    pub notes: Vec<String>,
    pub level: Level,
    pub location: Option<Location<'a>>
}

impl<'a> Diagnostic<'a> {
    pub fn write(&self, buf: &mut Buffer) {
        match &self.location {
            Some(location) => self.write_span(location, buf),
            None => self.write_title(buf),
        }
    }

    fn write_span(&self, location: &Location, buf: &mut Buffer) {
        let mut files = SimpleFiles::new();
        let file_id = files.add(location.display_path(), location.src);

        let labels = vec![location.label.to_codespan_label(file_id, LabelStyle::Primary)];

        let diagnostic = codespan_reporting::diagnostic::Diagnostic::new(self.level.into())
            .with_message(&self.title)
            .with_labels(labels)
            .with_notes(self.notes.clone());

        let config = codespan_reporting::term::Config::default();
        codespan_reporting::term::emit(buf, &config, &files, &diagnostic)
            .expect("write_diagnostic");
    }

    fn write_title(&self, buf: &mut Buffer) {
        use std::io::Write;
        use termcolor::{Color, ColorSpec, WriteColor};

        let (kind, colour) = match self.level {
            Level::Error => ("error", Color::Red),
            Level::Warning => ("warning", Color::Yellow),
        };

        buf.set_color(ColorSpec::new().set_bold(true).set_fg(Some(colour)))
            .expect("write_title_color1");
        write!(buf, "{kind}").expect("write_title_kind");

        buf.set_color(ColorSpec::new().set_bold(true))
            .expect("write_title_color2");
        writeln!(buf, ": {}", self.title).expect("write_title_title");

        buf.set_color(&ColorSpec::new())
            .expect("write_title_reset");

        for note in &self.notes {
            writeln!(buf, "  = {note}").expect("write_title_note");
        }
    }
}
