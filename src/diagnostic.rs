//! Error rendering for the command line
//!
//! Turns an [`Error`] and the source it came from into
//!
//! ```text
//! error[parse]: expected ';' after expression, found identifier 'y'
//!   --> prog.plc:3:11
//!    |
//!  3 |     x = 1 y
//!    |           ^
//! ```

use crate::Error;
use crossterm::style::Stylize;

/// 1-based line and column of a byte offset. Columns count characters.
pub fn line_col(source: &str, offset: usize) -> (usize, usize) {
    let mut line = 1;
    let mut col = 1;
    for (i, ch) in source.char_indices() {
        if i >= offset {
            break;
        }
        if ch == '\n' {
            line += 1;
            col = 1;
        } else {
            col += 1;
        }
    }
    (line, col)
}

/// Text of the 1-based line `line`, without its newline.
fn source_line(source: &str, line: usize) -> Option<&str> {
    source.split('\n').nth(line - 1).map(|text| text.trim_end_matches('\r'))
}

pub struct DiagnosticRenderer<'a> {
    source: &'a str,
    file_name: &'a str,
    use_color: bool,
}

impl<'a> DiagnosticRenderer<'a> {
    pub fn new(source: &'a str, file_name: &'a str, use_color: bool) -> Self {
        Self {
            source,
            file_name,
            use_color,
        }
    }

    pub fn render(&self, error: &Error) -> String {
        let mut output = format!(
            "{}: {}\n",
            self.paint(&format!("error[{}]", error.kind()), Paint::Error),
            self.paint(&error.to_string(), Paint::Bold),
        );

        let Some(offset) = error.offset() else {
            return output;
        };
        let (line, col) = line_col(self.source, offset);
        let width = line.to_string().len();
        let gutter = " ".repeat(width + 1);
        let bar = self.paint("|", Paint::Gutter);

        output.push_str(&format!(
            "{}{} {}:{}:{}\n",
            " ".repeat(width),
            self.paint("-->", Paint::Gutter),
            self.file_name,
            line,
            col
        ));

        if let Some(text) = source_line(self.source, line) {
            output.push_str(&format!("{gutter}{bar}\n"));
            output.push_str(&format!(
                "{} {bar} {text}\n",
                self.paint(&format!("{line:>width$}"), Paint::Gutter)
            ));
            output.push_str(&format!(
                "{gutter}{bar} {}{}\n",
                " ".repeat(col - 1),
                self.paint("^", Paint::Error)
            ));
        }

        output
    }

    fn paint(&self, text: &str, paint: Paint) -> String {
        if !self.use_color {
            return text.to_string();
        }
        match paint {
            Paint::Error => text.red().bold().to_string(),
            Paint::Bold => text.bold().to_string(),
            Paint::Gutter => text.blue().to_string(),
        }
    }
}

#[derive(Clone, Copy)]
enum Paint {
    Error,
    Bold,
    Gutter,
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    #[test]
    fn test_line_col() {
        let source = "ab\ncd\n";
        assert_eq!(line_col(source, 0), (1, 1));
        assert_eq!(line_col(source, 1), (1, 2));
        assert_eq!(line_col(source, 3), (2, 1));
        assert_eq!(line_col(source, 4), (2, 2));
    }

    #[test]
    fn test_render_points_at_offset() {
        let source = "FUN main ( ) DO\n    x = 1 ;\nEND";
        let error = crate::check_source(source).unwrap_err();
        let rendered = DiagnosticRenderer::new(source, "prog.plc", false).render(&error);

        assert_eq!(
            rendered,
            indoc! {"
                error[analysis]: undefined variable 'x'
                 --> prog.plc:2:5
                  |
                2 |     x = 1 ;
                  |     ^
            "}
        );
    }

    #[test]
    fn test_render_without_offset() {
        let source = "FUN helper ( ) DO END";
        let error = crate::check_source(source).unwrap_err();
        let rendered = DiagnosticRenderer::new(source, "prog.plc", false).render(&error);
        assert!(rendered.starts_with("error[analysis]: "), "{}", rendered);
        assert_eq!(rendered.lines().count(), 1);
    }
}
