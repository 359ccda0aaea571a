//! `go mod graph` invocation.
//!
//! Captures the module requirement graph of the main module as text. The
//! output is handed to the resolver unchanged.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{debug, info};

use crate::error::GraphToolError;

/// Arguments passed to the go binary.
const GRAPH_ARGS: [&str; 2] = ["mod", "graph"];

/// Runs `go mod graph` for a module directory.
#[derive(Debug, Clone)]
pub struct GoModGraph {
    program: PathBuf,
    dir: Option<PathBuf>,
}

impl GoModGraph {
    /// Use the given go executable, running in the current directory.
    #[must_use]
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            dir: None,
        }
    }

    /// Run in `dir` instead of the current directory.
    #[must_use]
    pub fn in_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dir = Some(dir.into());
        self
    }

    /// The go executable.
    #[must_use]
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Command line as shown in diagnostics.
    #[must_use]
    pub fn command_line(&self) -> String {
        format!("{} {}", self.program.display(), GRAPH_ARGS.join(" "))
    }

    /// Run the tool and return its standard output.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The executable is not found
    /// - The process cannot be spawned
    /// - The process exits unsuccessfully (stderr is attached)
    /// - Standard output is not UTF-8
    pub fn run(&self) -> Result<String, GraphToolError> {
        let command_line = self.command_line();

        let mut command = Command::new(&self.program);
        command.args(GRAPH_ARGS);
        if let Some(dir) = &self.dir {
            command.current_dir(dir);
        }

        info!(
            command = %command_line,
            dir = ?self.dir,
            "Reading module graph"
        );

        let output = command.output().map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                GraphToolError::NotFound {
                    command: self.program.display().to_string(),
                }
            } else {
                GraphToolError::SpawnFailed {
                    command: command_line.clone(),
                    source: e,
                }
            }
        })?;

        if !output.status.success() {
            return Err(GraphToolError::Failed {
                command: command_line,
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let stdout = String::from_utf8(output.stdout)
            .map_err(|_| GraphToolError::InvalidUtf8 {
                command: command_line,
            })?;

        debug!(bytes = stdout.len(), "Captured module graph");
        Ok(stdout)
    }
}

impl Default for GoModGraph {
    fn default() -> Self {
        Self::new("go")
    }
}
