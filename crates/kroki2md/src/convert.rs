//! Diagram conversion and document update.

use std::path::{Path, PathBuf};

use clap::{Args, ValueEnum};
use k2m_config::{CliSettings, Config};
use k2m_diagrams::{Converter, DiagramFormat, FileOutcome, LinkMapping, SkipReason};
use k2m_markdown::{Document, Substitution, substitute};

use crate::error::CliError;
use crate::output::{Output, Verbosity};

/// Output format accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum FormatArg {
    Svg,
    Png,
}

impl From<FormatArg> for DiagramFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Svg => Self::Svg,
            FormatArg::Png => Self::Png,
        }
    }
}

/// Arguments for converting diagrams and updating a markdown file.
#[derive(Args, Debug)]
pub(crate) struct ConvertArgs {
    /// Diagram source file to convert (repeatable).
    #[arg(short, long = "input", value_name = "FILE", required = true)]
    inputs: Vec<PathBuf>,

    /// Image format to request from Kroki [default: svg].
    #[arg(short, long, value_enum)]
    format: Option<FormatArg>,

    /// Show what would be updated without writing the markdown file.
    #[arg(short, long)]
    dry_run: bool,

    /// Increase output verbosity (-vv lists processed files, -vvv shows line changes).
    #[arg(short, long, action = clap::ArgAction::Count, conflicts_with = "silent")]
    verbose: u8,

    /// Silence console output.
    #[arg(short, long)]
    silent: bool,

    /// Kroki server URL (overrides config).
    #[arg(long, env = "KROKI_URL")]
    kroki_url: Option<String>,

    /// Path to configuration file (default: auto-discover kroki2md.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Markdown file to update.
    #[arg(value_name = "OUTPUT")]
    document: PathBuf,
}

impl ConvertArgs {
    /// Verbosity selected by `--silent` and `--verbose`.
    pub(crate) fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.silent, self.verbose)
    }

    /// Execute the conversion.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration is invalid, a diagram or the
    /// document cannot be read, or the document cannot be written.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new(self.verbosity());

        let cli_settings = CliSettings {
            kroki_url: self.kroki_url.clone(),
            format: self.format.map(DiagramFormat::from),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        self.print_configuration(&output, &config);

        let converter = Converter::new(
            config.kroki_url.as_str(),
            config.format,
            config.extensions.clone(),
        );
        let mapping = convert(&output, &converter, &self.inputs)?;

        output.info(
            Verbosity::Normal,
            &format!("Finding update points in {}:", self.document.display()),
        );
        let document = Document::read(&self.document)?;
        let substitution = substitute(&document, &mapping);
        print_replacements(&output, &substitution);

        if self.dry_run {
            output.always_warning(
                "This was a dry run.\n\tRun the same command without '--dry-run' to update the file",
            );
            output.blank(Verbosity::Normal);
            return Ok(());
        }

        output.info(
            Verbosity::Normal,
            &format!("Updating {}", self.document.display()),
        );
        substitution.document.write(&self.document)?;
        output.success(
            Verbosity::Normal,
            &format!("Updated {}", self.document.display()),
        );
        output.blank(Verbosity::Normal);

        Ok(())
    }

    fn print_configuration(&self, output: &Output, config: &Config) {
        output.info(Verbosity::Normal, "Configuration selected:");
        output.info(Verbosity::Normal, "\tInput file(s):");
        for (index, input) in self.inputs.iter().enumerate() {
            output.info(
                Verbosity::Normal,
                &format!("\t\t{index}: {}", input.display()),
            );
        }
        output.info(
            Verbosity::Normal,
            &format!("\tOutput file: {}", self.document.display()),
        );
        output.info(Verbosity::Normal, &format!("\tFormat: {}", config.format));
        output.info(
            Verbosity::Normal,
            &format!("\tKroki URL: {}", config.kroki_url),
        );
        if let Some(path) = &config.config_path {
            output.info(
                Verbosity::Normal,
                &format!("\tConfig file: {}", path.display()),
            );
        }
        output.info(Verbosity::Normal, &format!("\tDry run: {}", self.dry_run));
        output.info(
            Verbosity::Normal,
            &format!("\tVerbosity: {:?}", self.verbosity()),
        );
        output.blank(Verbosity::Normal);
    }
}

fn convert(
    output: &Output,
    converter: &Converter,
    inputs: &[PathBuf],
) -> Result<LinkMapping, CliError> {
    output.info(Verbosity::Normal, "Calculating conversions");

    let indent = output.shows(Verbosity::Normal);
    let conversion = converter.convert_with(inputs, |outcome| match outcome {
        FileOutcome::Processed { .. } => {
            output.success(
                Verbosity::Detailed,
                &format!("\tProcessed file: {}", outcome.path().display()),
            );
        }
        FileOutcome::Skipped { reason, .. } => {
            output.always_warning(&skip_message(outcome.path(), reason, indent));
        }
    })?;

    if conversion.has_warnings() {
        output.warning(Verbosity::Normal, "Conversion completed with warnings");
    } else {
        output.success(Verbosity::Normal, "Conversion completed");
    }
    output.blank(Verbosity::Normal);

    Ok(conversion.into_mapping())
}

/// Skip warnings are printed at every verbosity; silent runs drop the indent.
fn skip_message(path: &Path, reason: &SkipReason, indent: bool) -> String {
    let tab = if indent { "\t" } else { "" };
    format!("{tab}Skipping {} as {reason}", path.display())
}

fn print_replacements(output: &Output, substitution: &Substitution) {
    for replacement in &substitution.replacements {
        output.info(
            Verbosity::Detailed,
            &format!("@Line {}:", replacement.line_number),
        );
        output.removed(
            Verbosity::Trace,
            &format!("-- {}", trim_line_end(&replacement.before)),
        );
        output.success(
            Verbosity::Trace,
            &format!("++ {}", trim_line_end(&replacement.after)),
        );
    }
    output.info(
        Verbosity::Normal,
        &format!("Found {} update points", substitution.replacements.len()),
    );
    output.blank(Verbosity::Normal);
}

fn trim_line_end(line: &str) -> &str {
    line.trim_end_matches(['\r', '\n'])
}
