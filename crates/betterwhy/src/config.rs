//! Run configuration.
//!
//! betterwhy has no config file. A [`Config`] is assembled from command-line
//! flags and environment by the binary and decides where the edge list comes
//! from and how the result is rendered.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Error, Result};
use crate::gomod::GoModGraph;
use crate::output::OutputFormat;

/// Value of `--graph-file` meaning standard input.
pub const STDIN_PATH: &str = "-";

/// Environment variable overriding the go executable.
pub const GO_ENV_VAR: &str = "BETTERWHY_GO";

/// Where the edge list is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphSource {
    /// Run `go mod graph`.
    Tool {
        /// The go executable.
        program: PathBuf,
        /// Module directory, or the current directory if `None`.
        dir: Option<PathBuf>,
    },
    /// Read saved `go mod graph` output from a file.
    File(PathBuf),
    /// Read saved `go mod graph` output from standard input.
    Stdin,
}

/// Resolved configuration for one run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Saved graph to read instead of running the tool (`-` for stdin).
    pub graph_file: Option<PathBuf>,
    /// The go executable.
    pub go: PathBuf,
    /// Directory in which to run the tool.
    pub dir: Option<PathBuf>,
    /// How to render the lineage.
    pub format: OutputFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            graph_file: None,
            go: PathBuf::from("go"),
            dir: None,
            format: OutputFormat::Text,
        }
    }
}

impl Config {
    /// The edge-list source selected by this configuration.
    ///
    /// A graph file takes precedence over running the tool.
    #[must_use]
    pub fn graph_source(&self) -> GraphSource {
        match &self.graph_file {
            Some(path) if path == Path::new(STDIN_PATH) => GraphSource::Stdin,
            Some(path) => GraphSource::File(path.clone()),
            None => GraphSource::Tool {
                program: self.go.clone(),
                dir: self.dir.clone(),
            },
        }
    }

    /// Obtain the edge list text, reading standard input if selected.
    ///
    /// # Errors
    ///
    /// Returns an error if the module directory does not exist, the tool
    /// fails, or the file/stdin cannot be read.
    pub fn load_edges(&self) -> Result<String> {
        self.load_edges_from(io::stdin().lock())
    }

    /// Obtain the edge list text, using `stdin` for [`GraphSource::Stdin`].
    ///
    /// # Errors
    ///
    /// See [`load_edges`](Self::load_edges).
    pub fn load_edges_from(&self, mut stdin: impl Read) -> Result<String> {
        let text = match self.graph_source() {
            GraphSource::Tool { program, dir } => {
                let mut tool = GoModGraph::new(program);
                if let Some(dir) = dir {
                    if !dir.is_dir() {
                        return Err(Error::Config(format!(
                            "module directory '{}' does not exist",
                            dir.display()
                        )));
                    }
                    tool = tool.in_dir(dir);
                }
                tool.run()?
            }
            GraphSource::File(path) => {
                debug!(path = %path.display(), "Reading saved module graph");
                fs::read_to_string(&path)?
            }
            GraphSource::Stdin => {
                debug!("Reading module graph from stdin");
                let mut text = String::new();
                stdin.read_to_string(&mut text)?;
                text
            }
        };
        Ok(text)
    }
}
