// Output sink for the `print` built-in

use std::io::{self, Write};

/// Where `print` output goes.
///
/// A streaming terminal writes each line to stdout as soon as it is printed;
/// a capturing one keeps the lines for the caller to inspect afterwards.
#[derive(Debug, Clone)]
pub struct Terminal {
    pub lines: Vec<TerminalLine>,
    capture: bool,
}

/// A line of output with the offset of the `print` call that produced it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerminalLine {
    pub text: String,
    pub offset: usize,
}

impl Terminal {
    pub fn stdout() -> Self {
        Terminal {
            lines: Vec::new(),
            capture: false,
        }
    }

    pub fn captured() -> Self {
        Terminal {
            lines: Vec::new(),
            capture: true,
        }
    }

    pub fn is_captured(&self) -> bool {
        self.capture
    }

    /// Print one line
    pub fn print_line(&mut self, text: String, offset: usize) {
        if self.capture {
            self.lines.push(TerminalLine { text, offset });
            return;
        }

        let mut stdout = io::stdout().lock();
        // A closed stdout is not the program's error.
        if writeln!(stdout, "{text}").and_then(|_| stdout.flush()).is_err() {
            tracing::warn!("failed to write program output to stdout");
        }
    }

    /// Get all captured lines as a vector of strings
    pub fn get_output(&self) -> Vec<String> {
        self.lines.iter().map(|line| line.text.clone()).collect()
    }
}

impl Default for Terminal {
    fn default() -> Self {
        Self::stdout()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_captured_lines() {
        let mut terminal = Terminal::captured();
        terminal.print_line("first".to_string(), 0);
        terminal.print_line("second".to_string(), 10);

        assert_eq!(terminal.get_output(), vec!["first", "second"]);
        assert_eq!(terminal.lines[1].offset, 10);
    }

    #[test]
    fn test_stdout_keeps_nothing() {
        let mut terminal = Terminal::stdout();
        terminal.print_line("hello".to_string(), 0);
        assert!(terminal.get_output().is_empty());
    }
}
