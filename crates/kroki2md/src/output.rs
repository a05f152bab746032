//! Colored terminal output utilities.

use console::{Style, Term};

/// How much detail is printed to the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum Verbosity {
    /// Only skip warnings, the dry-run notice and fatal errors.
    Silent,
    /// Configuration, progress, warnings and summaries.
    Normal,
    /// Adds processed files and rewritten line numbers.
    Detailed,
    /// Adds before/after content of rewritten lines.
    Trace,
}

impl Verbosity {
    /// Resolve verbosity from `--silent` and the `--verbose` count.
    ///
    /// A single `-v` is the same as the default.
    pub(crate) fn from_flags(silent: bool, verbose: u8) -> Self {
        match (silent, verbose) {
            (true, _) => Self::Silent,
            (false, 0 | 1) => Self::Normal,
            (false, 2) => Self::Detailed,
            (false, _) => Self::Trace,
        }
    }
}

/// Terminal output formatter gated by verbosity.
pub(crate) struct Output {
    term: Term,
    verbosity: Verbosity,
    green: Style,
    yellow: Style,
    red: Style,
    blue: Style,
}

impl Output {
    /// Create a new output formatter.
    #[must_use]
    pub(crate) fn new(verbosity: Verbosity) -> Self {
        Self {
            term: Term::stderr(),
            verbosity,
            green: Style::new().green(),
            yellow: Style::new().yellow(),
            red: Style::new().red(),
            blue: Style::new().blue(),
        }
    }

    /// Whether messages at `level` are printed.
    pub(crate) fn shows(&self, level: Verbosity) -> bool {
        self.verbosity != Verbosity::Silent && self.verbosity >= level
    }

    fn write_styled(&self, level: Verbosity, style: &Style, msg: &str) {
        if self.shows(level) {
            let _ = self.term.write_line(&style.apply_to(msg).to_string());
        }
    }

    /// Print an info message (blue).
    pub(crate) fn info(&self, level: Verbosity, msg: &str) {
        self.write_styled(level, &self.blue, msg);
    }

    /// Print a success message (green).
    pub(crate) fn success(&self, level: Verbosity, msg: &str) {
        self.write_styled(level, &self.green, msg);
    }

    /// Print a warning message (yellow).
    pub(crate) fn warning(&self, level: Verbosity, msg: &str) {
        self.write_styled(level, &self.yellow, msg);
    }

    /// Print a warning message (yellow), regardless of verbosity.
    pub(crate) fn always_warning(&self, msg: &str) {
        let _ = self.term.write_line(&self.yellow.apply_to(msg).to_string());
    }

    /// Print a removed line (red).
    pub(crate) fn removed(&self, level: Verbosity, msg: &str) {
        self.write_styled(level, &self.red, msg);
    }

    /// Print an empty line.
    pub(crate) fn blank(&self, level: Verbosity) {
        if self.shows(level) {
            let _ = self.term.write_line("");
        }
    }

    /// Print an error message (red), regardless of verbosity.
    pub(crate) fn error(&self, msg: &str) {
        let _ = self.term.write_line(&self.red.apply_to(msg).to_string());
    }
}
