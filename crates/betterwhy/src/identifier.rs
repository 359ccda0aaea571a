//! Module identifier syntax.
//!
//! Identifiers are the tokens of `go mod graph` output: a module path,
//! optionally followed by `@version`. An identifier without a version is the
//! main module under analysis and terminates a lineage search.

use std::fmt;

use crate::error::ResolveError;

/// Separator between module path and version.
pub const VERSION_SEPARATOR: char = '@';

/// Returns `true` if the identifier carries a pinned version.
#[must_use]
pub fn is_pinned(id: &str) -> bool {
    id.contains(VERSION_SEPARATOR)
}

/// A module identifier split into its path and optional version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ModuleId<'a> {
    /// Module path (e.g. `github.com/stretchr/testify`).
    pub path: &'a str,
    /// Version, if pinned (e.g. `v1.3.0`).
    pub version: Option<&'a str>,
}

impl<'a> ModuleId<'a> {
    /// Split a token at its first `@`.
    #[must_use]
    pub fn parse(token: &'a str) -> Self {
        match token.split_once(VERSION_SEPARATOR) {
            Some((path, version)) => Self {
                path,
                version: Some(version),
            },
            None => Self {
                path: token,
                version: None,
            },
        }
    }

    /// Returns `true` if this is an unversioned (root) module.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.version.is_none()
    }
}

impl fmt::Display for ModuleId<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.version {
            Some(version) => write!(f, "{}{VERSION_SEPARATOR}{version}", self.path),
            None => f.write_str(self.path),
        }
    }
}

/// Validate a search target.
///
/// The target must be an exact version of a module, such as
/// `github.com/stretchr/testify@v1.3.0`. Surrounding whitespace is trimmed.
///
/// # Errors
///
/// Returns [`ResolveError::InvalidInput`] if the target:
/// - has no `@` version suffix
/// - has an empty module path or an empty version
/// - contains embedded whitespace (it could never match a graph token)
pub fn parse_target(input: &str) -> Result<&str, ResolveError> {
    let target = input.trim();

    if target.chars().any(char::is_whitespace) {
        return Err(ResolveError::invalid_input(
            input,
            "identifiers cannot contain whitespace",
        ));
    }

    let id = ModuleId::parse(target);
    match id.version {
        None => Err(ResolveError::invalid_input(
            input,
            "input must be an exact version of a module, pinned with the '@' symbol such as github.com/stretchr/testify@v1.3.0",
        )),
        Some(_) if id.path.is_empty() => {
            Err(ResolveError::invalid_input(input, "module path is empty"))
        }
        Some("") => Err(ResolveError::invalid_input(input, "version is empty")),
        Some(_) => Ok(target),
    }
}

/// Clap `value_parser` adapter for [`parse_target`].
///
/// # Errors
///
/// Returns the validation message if the target is rejected.
pub fn validate_target(s: &str) -> Result<String, String> {
    parse_target(s).map(str::to_string).map_err(|e| e.to_string())
}
