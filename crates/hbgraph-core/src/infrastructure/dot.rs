//! Graphviz DOT export
//!
//! ```text
//! digraph G {
//!   0 [label="SEND:A\n<A:1, B:0>"];
//!   1 [label="RECV:B\n<A:1, B:1>"];
//!   0 -> 1;
//! }
//! ```

use crate::domain::graph::CausalGraph;
use crate::error::ExportError;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;
use tracing::info;

/// Render `graph` as a DOT digraph
///
/// One node per event labelled `KIND:PROCESS` over its clock, one edge per
/// adjacency entry in insertion order.
pub fn to_dot(graph: &CausalGraph) -> String {
    let mut out = String::from("digraph G {\n");

    for (i, event) in graph.events().iter().enumerate() {
        let label = format!("{}\\n{}", escape(&event.label()), escape(&event.clock().to_string()));
        // Writing to a String cannot fail
        let _ = writeln!(out, "  {i} [label=\"{label}\"];");
    }
    for (from, to) in graph.edge_pairs() {
        let _ = writeln!(out, "  {} -> {};", from.as_index(), to.as_index());
    }

    out.push_str("}\n");
    out
}

/// Write the DOT rendering of `graph` to `path`
///
/// # Errors
///
/// [`ExportError::Io`] if the file cannot be written.
pub fn write_dot(graph: &CausalGraph, path: impl AsRef<Path>) -> Result<(), ExportError> {
    let path = path.as_ref();
    fs::write(path, to_dot(graph))?;
    info!(path = %path.display(), nodes = graph.node_count(), "wrote DOT graph");
    Ok(())
}

fn escape(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '"' => escaped.push_str("\\\""),
            '\\' => escaped.push_str("\\\\"),
            '\n' => escaped.push_str("\\n"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::clock::VectorClock;
    use crate::domain::trace::{Event, Trace};

    fn vc(entries: &[(&str, u64)]) -> VectorClock {
        entries.iter().copied().collect()
    }

    #[test]
    fn test_dot_layout() {
        let trace: Trace = vec![
            Event::send("A", vc(&[("A", 1), ("B", 0)]), Some(0)),
            Event::receive("B", vc(&[("A", 1), ("B", 1)]), Some(0)),
        ]
        .into();
        let graph = CausalGraph::build(&trace);

        assert_eq!(
            to_dot(&graph),
            "digraph G {\n\
             \x20 0 [label=\"SEND:A\\n<A:1, B:0>\"];\n\
             \x20 1 [label=\"RECV:B\\n<A:1, B:1>\"];\n\
             \x20 0 -> 1;\n\
             }\n"
        );
    }

    #[test]
    fn test_labels_are_escaped() {
        assert_eq!(escape("say \"hi\"\\"), "say \\\"hi\\\"\\\\");
        assert_eq!(escape("a\nb"), "a\\nb");

        let trace: Trace = vec![Event::send("p\"q", vc(&[("p\"q", 1)]), None)].into();
        let dot = to_dot(&CausalGraph::build(&trace));
        assert!(dot.contains("SEND:p\\\"q"));
    }

    #[test]
    fn test_write_dot() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("graph.dot");
        let graph = CausalGraph::build(&Trace::new());

        write_dot(&graph, &path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "digraph G {\n}\n");
    }
}
