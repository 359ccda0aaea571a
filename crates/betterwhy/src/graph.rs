//! Parsed module graph.
//!
//! `go mod graph` prints one edge per line as `requester requested`. The
//! graph borrows its tokens from the captured text, keeps edges in input
//! order, and indexes the first requester of every requested node so each
//! search step is a single lookup.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use tracing::{debug, warn};

/// A single `requester requested` line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Edge<'a> {
    /// Module whose build graph pulled in `requested`.
    pub requester: &'a str,
    /// Module that was pulled in.
    pub requested: &'a str,
}

/// Edge list parsed from raw graph text.
#[derive(Debug, Clone, Default)]
pub struct ModuleGraph<'a> {
    edges: Vec<Edge<'a>>,
    /// requested -> index of the first edge naming it.
    first_incoming: HashMap<&'a str, usize>,
    skipped_lines: usize,
}

impl<'a> ModuleGraph<'a> {
    /// Parse graph text, one edge per line.
    ///
    /// Blank lines are ignored. Lines that do not have exactly two
    /// whitespace-separated tokens are skipped with a warning and counted
    /// in [`skipped_lines`](Self::skipped_lines).
    #[must_use]
    pub fn parse(text: &'a str) -> Self {
        let mut graph = Self::default();

        for (line_no, line) in text.lines().enumerate() {
            let mut tokens = line.split_whitespace();
            let (Some(requester), Some(requested), None) =
                (tokens.next(), tokens.next(), tokens.next())
            else {
                if !line.trim().is_empty() {
                    warn!(line = line_no + 1, content = line, "Skipping malformed graph line");
                    graph.skipped_lines += 1;
                }
                continue;
            };
            graph.push(Edge {
                requester,
                requested,
            });
        }

        debug!(
            edges = graph.edges.len(),
            nodes_with_requesters = graph.first_incoming.len(),
            skipped = graph.skipped_lines,
            "Parsed module graph"
        );

        graph
    }

    /// Build a graph from edges already split into tokens.
    #[must_use]
    pub fn from_edges(edges: impl IntoIterator<Item = Edge<'a>>) -> Self {
        let mut graph = Self::default();
        for edge in edges {
            graph.push(edge);
        }
        graph
    }

    fn push(&mut self, edge: Edge<'a>) {
        if let Entry::Vacant(slot) = self.first_incoming.entry(edge.requested) {
            slot.insert(self.edges.len());
        }
        self.edges.push(edge);
    }

    /// The requester of the first edge, in input order, whose requested side
    /// is exactly `requested`.
    #[must_use]
    pub fn first_requester(&self, requested: &str) -> Option<&'a str> {
        self.first_incoming
            .get(requested)
            .map(|&index| self.edges[index].requester)
    }

    /// Returns `true` if some line is exactly `requester requested`.
    #[must_use]
    pub fn contains_edge(&self, requester: &str, requested: &str) -> bool {
        self.edges
            .iter()
            .any(|e| e.requester == requester && e.requested == requested)
    }

    /// All edges in input order, duplicates included.
    #[must_use]
    pub fn edges(&self) -> &[Edge<'a>] {
        &self.edges
    }

    /// Number of edges.
    #[must_use]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Returns `true` if the graph has no edges.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Number of non-blank lines that were not valid edges.
    #[must_use]
    pub fn skipped_lines(&self) -> usize {
        self.skipped_lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
example.com/root example.com/mid@v1.0.0
example.com/root example.com/other@v1.1.0
example.com/mid@v1.0.0 example.com/leaf@v2.0.0
example.com/other@v1.1.0 example.com/leaf@v2.0.0
";

    #[test]
    fn parse_keeps_input_order() {
        let graph = ModuleGraph::parse(SAMPLE);

        assert_eq!(graph.len(), 4);
        assert_eq!(
            graph.edges()[0],
            Edge {
                requester: "example.com/root",
                requested: "example.com/mid@v1.0.0",
            }
        );
        assert_eq!(graph.edges()[3].requester, "example.com/other@v1.1.0");
        assert_eq!(graph.skipped_lines(), 0);
    }

    #[test]
    fn first_requester_prefers_earliest_edge() {
        let graph = ModuleGraph::parse(SAMPLE);

        assert_eq!(
            graph.first_requester("example.com/leaf@v2.0.0"),
            Some("example.com/mid@v1.0.0")
        );
        assert_eq!(graph.first_requester("example.com/root"), None);
    }

    #[test]
    fn first_requester_uses_exact_match() {
        let graph = ModuleGraph::parse("root foo@v1.0.0-beta\n");

        assert_eq!(graph.first_requester("foo@v1.0.0"), None);
        assert_eq!(graph.first_requester("foo@v1.0.0-beta"), Some("root"));
    }

    #[test]
    fn blank_lines_are_ignored_and_malformed_lines_counted() {
        let text = "\n  \nroot a@v1\nlonely@v1\nroot b@v1 extra\r\n\n";
        let graph = ModuleGraph::parse(text);

        assert_eq!(graph.len(), 1);
        assert_eq!(graph.skipped_lines(), 2);
    }

    #[test]
    fn crlf_and_repeated_spaces_are_tolerated() {
        let graph = ModuleGraph::parse("root   a@v1\r\na@v1\tb@v2\r\n");

        assert_eq!(graph.len(), 2);
        assert_eq!(graph.first_requester("b@v2"), Some("a@v1"));
    }

    #[test]
    fn duplicates_are_kept() {
        let graph = ModuleGraph::parse("root a@v1\nroot a@v1\n");

        assert_eq!(graph.len(), 2);
        assert!(graph.contains_edge("root", "a@v1"));
        assert!(!graph.contains_edge("a@v1", "root"));
    }

    #[test]
    fn from_edges_matches_parse() {
        let parsed = ModuleGraph::parse(SAMPLE);
        let built = ModuleGraph::from_edges(parsed.edges().iter().copied());

        assert_eq!(built.edges(), parsed.edges());
        assert_eq!(
            built.first_requester("example.com/leaf@v2.0.0"),
            parsed.first_requester("example.com/leaf@v2.0.0")
        );
    }

    #[test]
    fn empty_text_yields_empty_graph() {
        let graph = ModuleGraph::parse("");
        assert!(graph.is_empty());
    }
}
