//! Error types for betterwhy operations.
//!
//! Errors are split along the boundary between the search and its caller:
//!
//! - **`ResolveError`**: outcomes of the lineage search itself (bad target,
//!   no path, cycle). The search never performs I/O, so these are the only
//!   errors it can produce.
//! - **`GraphToolError`**: failures running `go mod graph` to obtain the edge list.
//! - **`Error`**: top-level error for a whole run, wrapping both of the above.

use std::process::ExitStatus;

use thiserror::Error;

/// Result type for betterwhy operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for a betterwhy run.
#[derive(Debug, Error)]
pub enum Error {
    /// The lineage search did not produce a path
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// The graph-producing tool could not be run
    #[error(transparent)]
    GraphTool(#[from] GraphToolError),

    /// Reading a graph file or stdin failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid configuration or arguments
    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Returns `true` if the run completed but no lineage could be established.
    ///
    /// This is the "normal" failure outcome reported to the user as
    /// not-found, as opposed to an infrastructure failure.
    #[must_use]
    pub fn is_missing_lineage(&self) -> bool {
        matches!(self, Self::Resolve(e) if e.is_missing_lineage())
    }
}

/// Errors produced by the lineage search.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// The target is not a pinned `path@version` identifier.
    #[error("invalid target '{input}': {reason}")]
    InvalidInput {
        /// The rejected input.
        input: String,
        /// Why it was rejected.
        reason: &'static str,
    },

    /// No walk from an unversioned root reaches the target.
    #[error("requested dependency '{target}' not found in tree")]
    NotFound {
        /// The identifier that was searched for.
        target: String,
    },

    /// The walk would revisit a node already on the path.
    #[error("cycle detected while resolving '{target}': '{node}' is already on the path")]
    CycleDetected {
        /// The identifier that was searched for.
        target: String,
        /// The node the walk would have revisited.
        node: String,
        /// The partial path at the point of detection, target first.
        path: Vec<String>,
    },
}

impl ResolveError {
    /// Returns `true` for outcomes meaning "no valid lineage could be established".
    #[must_use]
    pub fn is_missing_lineage(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::CycleDetected { .. })
    }

    pub(crate) fn invalid_input(input: &str, reason: &'static str) -> Self {
        Self::InvalidInput {
            input: input.to_string(),
            reason,
        }
    }

    pub(crate) fn not_found(target: &str) -> Self {
        Self::NotFound {
            target: target.to_string(),
        }
    }
}

/// Errors running the external graph tool.
#[derive(Debug, Error)]
pub enum GraphToolError {
    /// The tool executable is not on `PATH`.
    #[error("{command} not found\n\nbetterwhy needs the Go toolchain to read the module graph.\nInstall Go from https://go.dev/dl/ or pass --graph-file with saved 'go mod graph' output.")]
    NotFound {
        /// The command that was not found.
        command: String,
    },

    /// The tool could not be started.
    #[error("failed to spawn '{command}': {source}")]
    SpawnFailed {
        /// The command that failed to spawn.
        command: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The tool ran but exited unsuccessfully.
    #[error("unable to execute '{command}' ({status}){}", format_stderr(.stderr))]
    Failed {
        /// The command line that was run.
        command: String,
        /// Exit status of the process.
        status: ExitStatus,
        /// Captured standard error, trimmed.
        stderr: String,
    },

    /// The tool wrote something other than UTF-8 to stdout.
    #[error("'{command}' produced output that is not valid UTF-8")]
    InvalidUtf8 {
        /// The command line that was run.
        command: String,
    },
}

fn format_stderr(stderr: &str) -> String {
    if stderr.is_empty() {
        String::new()
    } else {
        format!(": {stderr}")
    }
}
