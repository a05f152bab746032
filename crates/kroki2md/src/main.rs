//! kroki2md CLI - Diagram files to Kroki links in markdown.
//!
//! Encodes each input diagram file into a Kroki link and rewrites image
//! placeholders such as `![flow.mmd]` in the target markdown file into
//! `![flow.mmd](https://kroki.io/mermaid/svg/...)`.

mod convert;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use convert::ConvertArgs;
use output::{Output, Verbosity};

/// Convert diagram files to Kroki URLs in markdown.
#[derive(Parser)]
#[command(name = "kroki2md", version, about)]
struct Cli {
    #[command(flatten)]
    args: ConvertArgs,
}

fn main() {
    let cli = Cli::parse();
    let verbosity = cli.args.verbosity();

    tracing_subscriber::fmt()
        .with_env_filter(log_filter(verbosity))
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = cli.args.execute() {
        Output::new(verbosity).error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}

/// -vvv enables debug logs from the library crates, otherwise `RUST_LOG`
/// with a `warn` fallback.
fn log_filter(verbosity: Verbosity) -> EnvFilter {
    if verbosity == Verbosity::Trace {
        EnvFilter::new("k2m_diagrams=debug,k2m_markdown=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    }
}
