//! Lineage resolution.
//!
//! Walks the module graph backwards from a pinned target: at every step the
//! first edge (in input order) whose requested side is the current node names
//! the next node. The walk stops at the first unversioned identifier, which is
//! the main module. The result is *a* path, not necessarily the shortest one.

use std::collections::HashSet;

use serde::Serialize;
use tracing::{debug, trace};

use crate::error::ResolveError;
use crate::graph::ModuleGraph;
use crate::identifier::{self, is_pinned};

/// A root-to-target walk through the module graph.
///
/// The first entry is unversioned; every later entry is pinned and was
/// requested by the entry before it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Lineage {
    nodes: Vec<String>,
}

impl Lineage {
    /// The unversioned module at the top of the walk.
    #[must_use]
    pub fn root(&self) -> &str {
        &self.nodes[0]
    }

    /// The identifier that was explained.
    #[must_use]
    pub fn target(&self) -> &str {
        &self.nodes[self.nodes.len() - 1]
    }

    /// Number of identifiers, root and target included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always `false`; a lineage holds at least its root and target.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Identifiers in root-first order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(String::as_str)
    }

    /// Identifiers in root-first order.
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.nodes
    }

    /// Consume the lineage, returning identifiers in root-first order.
    #[must_use]
    pub fn into_vec(self) -> Vec<String> {
        self.nodes
    }
}

/// Parse `edges_text` and resolve the lineage of `target`.
///
/// # Errors
///
/// - [`ResolveError::InvalidInput`] if `target` is not a pinned identifier
/// - [`ResolveError::NotFound`] if no unversioned root can be reached
/// - [`ResolveError::CycleDetected`] if the walk would revisit a node
pub fn resolve(edges_text: &str, target: &str) -> Result<Lineage, ResolveError> {
    let graph = ModuleGraph::parse(edges_text);
    resolve_in(&graph, target)
}

/// Resolve the lineage of `target` in an already parsed graph.
///
/// # Errors
///
/// See [`resolve`].
pub fn resolve_in(graph: &ModuleGraph<'_>, target: &str) -> Result<Lineage, ResolveError> {
    let target = identifier::parse_target(target)?;

    // Built tail-first: target, its requester, ..., root.
    let mut path: Vec<&str> = vec![target];
    let mut visited: HashSet<&str> = HashSet::from([target]);
    let mut current = target;
    // A simple path uses at most one edge per step.
    let max_steps = graph.len();

    while is_pinned(current) {
        let Some(requester) = graph.first_requester(current) else {
            debug!(
                module = target,
                dead_end = current,
                steps = path.len() - 1,
                "No requester found"
            );
            return Err(ResolveError::not_found(target));
        };

        if !visited.insert(requester) || path.len() > max_steps {
            debug!(module = target, node = requester, "Cycle detected");
            return Err(ResolveError::CycleDetected {
                target: target.to_string(),
                node: requester.to_string(),
                path: path.iter().map(ToString::to_string).collect(),
            });
        }

        trace!(requested = current, requester, "Stepping to requester");
        path.push(requester);
        current = requester;
    }

    debug!(module = target, root = current, length = path.len(), "Resolved lineage");

    Ok(Lineage {
        nodes: path.into_iter().rev().map(ToString::to_string).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const CHAIN: &str = "\
example.com/root example.com/mid@v1.0.0
example.com/mid@v1.0.0 example.com/leaf@v2.0.0
";

    #[test]
    fn resolves_root_first() {
        let lineage = resolve(CHAIN, "example.com/leaf@v2.0.0").unwrap();

        assert_eq!(
            lineage.as_slice(),
            [
                "example.com/root",
                "example.com/mid@v1.0.0",
                "example.com/leaf@v2.0.0"
            ]
        );
        assert_eq!(lineage.root(), "example.com/root");
        assert_eq!(lineage.target(), "example.com/leaf@v2.0.0");
        assert_eq!(lineage.len(), 3);
    }

    #[test]
    fn direct_dependency_has_two_entries() {
        let lineage = resolve(CHAIN, "example.com/mid@v1.0.0").unwrap();
        assert_eq!(
            lineage.into_vec(),
            vec!["example.com/root", "example.com/mid@v1.0.0"]
        );
    }

    #[test]
    fn first_matching_edge_wins() {
        let text = "\
root a@v1
root b@v1
b@v1 c@v1
a@v1 x@v1
b@v1 x@v1
";
        let lineage = resolve(text, "x@v1").unwrap();
        assert_eq!(lineage.as_slice(), ["root", "a@v1", "x@v1"]);
    }

    #[test]
    fn path_found_is_not_necessarily_shortest() {
        let text = "\
m@v1 t@v1
root t@v1
root m@v1
";
        let lineage = resolve(text, "t@v1").unwrap();
        assert_eq!(lineage.as_slice(), ["root", "m@v1", "t@v1"]);
    }

    #[rstest]
    #[case::absent("example.com/other@v9.9.9")]
    #[case::prefix_of_existing("example.com/leaf@v2.0")]
    #[case::only_as_requester("example.com/mid@v1.0.1")]
    fn unknown_target_is_not_found(#[case] target: &str) {
        assert_eq!(
            resolve(CHAIN, target),
            Err(ResolveError::NotFound {
                target: target.to_string()
            })
        );
    }

    #[test]
    fn substring_of_identifier_does_not_match() {
        let text = "root foo@v1.0.0-beta\n";
        assert!(matches!(
            resolve(text, "foo@v1.0.0"),
            Err(ResolveError::NotFound { .. })
        ));
    }

    #[test]
    fn dead_end_after_progress_is_not_found() {
        let text = "orphan@v1 leaf@v1\n";
        assert!(matches!(
            resolve(text, "leaf@v1"),
            Err(ResolveError::NotFound { .. })
        ));
    }

    #[test]
    fn two_node_cycle_is_detected() {
        let text = "a@1 b@2\nb@2 a@1\n";
        let err = resolve(text, "a@1").unwrap_err();

        assert_eq!(
            err,
            ResolveError::CycleDetected {
                target: "a@1".into(),
                node: "a@1".into(),
                path: vec!["a@1".into(), "b@2".into()],
            }
        );
    }

    #[test]
    fn cycle_not_through_target_is_detected() {
        let text = "\
b@v1 t@v1
c@v1 b@v1
d@v1 c@v1
b@v1 d@v1
root b@v1
";
        let err = resolve(text, "t@v1").unwrap_err();
        match err {
            ResolveError::CycleDetected { node, path, .. } => {
                assert_eq!(node, "b@v1");
                assert_eq!(path, ["t@v1", "b@v1", "c@v1", "d@v1"]);
            }
            other => panic!("expected cycle, got {other:?}"),
        }
    }

    #[test]
    fn self_loop_is_detected() {
        assert!(matches!(
            resolve("a@v1 a@v1\n", "a@v1"),
            Err(ResolveError::CycleDetected { .. })
        ));
    }

    #[test]
    fn unpinned_target_is_invalid_input() {
        assert!(matches!(
            resolve(CHAIN, "example.com/root"),
            Err(ResolveError::InvalidInput { .. })
        ));
    }

    #[test]
    fn resolve_in_reuses_parsed_graph() {
        let graph = ModuleGraph::parse(CHAIN);
        let first = resolve_in(&graph, "example.com/leaf@v2.0.0").unwrap();
        let second = resolve_in(&graph, "example.com/leaf@v2.0.0").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn lineage_serializes_as_array() {
        let lineage = resolve(CHAIN, "example.com/mid@v1.0.0").unwrap();
        let json = serde_json::to_string(&lineage).unwrap();
        assert_eq!(json, r#"["example.com/root","example.com/mid@v1.0.0"]"#);
    }
}
