//! Colored status output for the command line.

use std::io::{self, Write};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Writes status lines to stderr, colored when the terminal supports it.
///
/// Stdout is left to the pipeline's own progress messages and to
/// machine-readable output such as `build --json`.
#[derive(Debug, Clone)]
pub struct OutputManager {
    verbose: bool,
    quiet: bool,
}

impl OutputManager {
    /// Creates an output manager.
    ///
    /// `quiet` suppresses everything but errors; `verbose` enables
    /// [`verbose`](Self::verbose) lines.
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self { verbose, quiet }
    }

    fn write_tagged(&self, tag: &str, color: Color, message: &str) -> io::Result<()> {
        let mut stream = StandardStream::stderr(ColorChoice::Auto);
        stream.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true))?;
        write!(stream, "{}", tag)?;
        stream.reset()?;
        writeln!(stream, " {}", message)
    }

    /// Prints an informational line.
    pub fn info(&self, message: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.write_tagged("info:", Color::Cyan, message)
    }

    /// Prints a line only in verbose mode.
    pub fn verbose(&self, message: &str) -> io::Result<()> {
        if self.quiet || !self.verbose {
            return Ok(());
        }
        self.write_tagged("debug:", Color::Blue, message)
    }

    /// Prints a success line.
    pub fn success(&self, message: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.write_tagged("ok:", Color::Green, message)
    }

    /// Prints a warning line.
    pub fn warn(&self, message: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.write_tagged("warning:", Color::Yellow, message)
    }

    /// Prints an error line. Never suppressed.
    pub fn error(&self, message: &str) -> io::Result<()> {
        self.write_tagged("error:", Color::Red, message)
    }
}
