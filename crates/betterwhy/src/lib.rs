//! Betterwhy - explain why an exact module version is in a Go module graph.
//!
//! `go mod why` only explains packages needed by the build. Betterwhy walks
//! the full requirement graph printed by `go mod graph`, so it can also
//! explain versions that are pulled in but never built, such as a direct
//! dependency's test dependencies or any pinned entry in `go.sum`.
//!
//! ## Usage
//!
//! ```
//! let edges = "\
//! example.com/root example.com/mid@v1.0.0
//! example.com/mid@v1.0.0 example.com/leaf@v2.0.0
//! ";
//!
//! let lineage = betterwhy::resolve(edges, "example.com/leaf@v2.0.0")?;
//! assert_eq!(lineage.root(), "example.com/root");
//! assert_eq!(
//!     lineage.as_slice(),
//!     ["example.com/root", "example.com/mid@v1.0.0", "example.com/leaf@v2.0.0"]
//! );
//! # Ok::<(), betterwhy::ResolveError>(())
//! ```
//!
//! The path found is *a* path: when several requesters pull in the target,
//! the first one listed in the graph wins. Modules that never declare their
//! own requirements cannot be explained.

#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod gomod;
pub mod graph;
pub mod identifier;
pub mod output;
pub mod resolver;

pub use error::{Error, GraphToolError, ResolveError, Result};
pub use graph::{Edge, ModuleGraph};
pub use resolver::{Lineage, resolve, resolve_in};
