//! Betterwhy CLI - explain why a module version is in the Go module graph.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use betterwhy::config::{Config, GO_ENV_VAR};
use betterwhy::identifier::validate_target;
use betterwhy::output::{self, OutputFormat};
use betterwhy::{Error, ModuleGraph};
use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

/// A better version of 'go mod why' which explains build requirements not
/// actually required for execution.
///
/// betterwhy traverses go mod's dependency graph to diagnose why a given
/// dependency is required. Unlike 'go mod why' it also looks at dependencies
/// that are pulled in but not needed for the build. This is useful for:
///
///  - a direct dependency's test dependencies
///  - explaining why an exact version was pulled in, so every entry in go.sum
///    can be accounted for
///
/// It does not handle indirect dependencies that do not declare their own
/// requirements. When several modules pull in the requested version, the
/// path shown is not guaranteed to be the shortest one.
#[derive(Parser, Debug)]
#[command(name = "betterwhy")]
#[command(version, about)]
#[command(after_help = "Example:\n  betterwhy github.com/stretchr/testify@v1.3.0")]
struct Cli {
    /// Dependency with version to explain (module@version)
    #[arg(value_parser = validate_target)]
    target: String,

    /// Read saved 'go mod graph' output from a file ('-' for stdin)
    #[arg(long, value_name = "PATH")]
    graph_file: Option<PathBuf>,

    /// Go executable used to run 'go mod graph'
    #[arg(long, value_name = "BIN", env = GO_ENV_VAR, default_value = "go")]
    go: PathBuf,

    /// Module directory to run 'go mod graph' in (defaults to current directory)
    #[arg(short = 'C', long, value_name = "DIR")]
    dir: Option<PathBuf>,

    /// Output in JSON format for programmatic use
    #[arg(long)]
    json: bool,

    /// Verbose logging to stderr (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn config(&self) -> Config {
        Config {
            graph_file: self.graph_file.clone(),
            go: self.go.clone(),
            dir: self.dir.clone(),
            format: if self.json {
                OutputFormat::Json
            } else {
                OutputFormat::Text
            },
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let config = cli.config();

    match run(&config, &cli.target) {
        Ok(()) => ExitCode::SUCCESS,
        Err(Error::Resolve(e)) if e.is_missing_lineage() => {
            let mut stdout = io::stdout().lock();
            if let Err(write_err) =
                output::write_missing(&mut stdout, config.format, &cli.target, &e)
            {
                report_error(&Error::Io(write_err));
            }
            ExitCode::FAILURE
        }
        Err(e) => {
            report_error(&e);
            ExitCode::FAILURE
        }
    }
}

/// Load the graph, resolve the target, and print its lineage.
fn run(config: &Config, target: &str) -> betterwhy::Result<()> {
    let text = config.load_edges()?;
    let graph = ModuleGraph::parse(&text);
    let lineage = betterwhy::resolve_in(&graph, target)?;

    let mut stdout = io::stdout().lock();
    output::write_lineage(&mut stdout, config.format, &lineage)?;
    stdout.flush()?;
    Ok(())
}

fn report_error(e: &Error) {
    eprintln!("{}: {e}", "error".red().bold());
    // Show cause chain for nested errors
    let mut source = std::error::Error::source(e);
    while let Some(cause) = source {
        eprintln!("  {}: {cause}", "caused by".dimmed());
        source = std::error::Error::source(cause);
    }
}
