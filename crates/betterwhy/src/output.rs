//! Rendering of resolution results.
//!
//! Text output is the `# <target>` header followed by one identifier per
//! line, root first. JSON output is a single object per run.

use std::io::{self, Write};

use serde::Serialize;

use crate::error::ResolveError;
use crate::resolver::Lineage;

/// Output format for results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Plain text, one identifier per line.
    #[default]
    Text,
    /// A JSON object.
    Json,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    target: &'a str,
    lineage: Option<&'a Lineage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Write a resolved lineage.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_lineage(
    out: &mut impl Write,
    format: OutputFormat,
    lineage: &Lineage,
) -> io::Result<()> {
    match format {
        OutputFormat::Text => {
            writeln!(out, "# {}", lineage.target())?;
            for id in lineage.iter() {
                writeln!(out, "{id}")?;
            }
            Ok(())
        }
        OutputFormat::Json => write_json(
            out,
            &JsonReport {
                target: lineage.target(),
                lineage: Some(lineage),
                error: None,
            },
        ),
    }
}

/// Write the diagnostic for a target with no lineage.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_missing(
    out: &mut impl Write,
    format: OutputFormat,
    target: &str,
    error: &ResolveError,
) -> io::Result<()> {
    match format {
        OutputFormat::Text => {
            writeln!(
                out,
                "requested dependency '{target}' not found in tree.  Tidy and verify it exists in go.sum"
            )?;
            if let ResolveError::CycleDetected { node, .. } = error {
                writeln!(out, "the search looped back to '{node}' before reaching the main module")?;
            }
            Ok(())
        }
        OutputFormat::Json => write_json(
            out,
            &JsonReport {
                target,
                lineage: None,
                error: Some(error.to_string()),
            },
        ),
    }
}

fn write_json(out: &mut impl Write, report: &JsonReport<'_>) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, report)?;
    writeln!(out)
}
