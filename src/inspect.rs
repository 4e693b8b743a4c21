//! Diagnostic dump of assembly state.
//!
//! Renders per-part connection state, the adjacency graph, the payload's
//! wiring, and the validation outcome into a string for logs or a debug
//! panel. Diagnostic only; nothing here affects core behavior.

use std::fmt::Write as _;

use crate::graph::ConnectionGraph;
use crate::registry::Registry;
use crate::validate::validate;

/// Render a full diagnostic report of the current assembly.
#[must_use]
pub fn dump(registry: &Registry) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "=== ROCKET ASSEMBLY ===");
    let _ = writeln!(out, "total parts: {}", registry.len());

    for (id, part) in registry.parts() {
        let _ = writeln!(out, "\n[{id}] role: {}", part.role());
        match part.connected_to() {
            Some(other) => {
                let _ = writeln!(out, "  connected to: {other}");
            }
            None => {
                let _ = writeln!(out, "  connected to: none");
            }
        }
        let _ = writeln!(out, "  connected by: {} part(s)", part.connected_by().len());
        for &by in part.connected_by() {
            let role = registry
                .get(by)
                .map_or("<missing>", |p| p.role().as_str());
            let _ = writeln!(out, "    - {by} ({role})");
        }
    }

    let graph = ConnectionGraph::build(registry);
    let _ = writeln!(out, "\n=== GRAPH ===");
    let _ = writeln!(out, "edges: {}", graph.edge_count());
    for id in graph.ids() {
        let role = registry
            .get(id)
            .map_or("<missing>", |p| p.role().as_str());
        let _ = writeln!(out, "{id} ({role}) degree {}", graph.degree(id));
        for &neighbor in graph.neighbors(id) {
            let neighbor_role = registry
                .get(neighbor)
                .map_or("<missing>", |p| p.role().as_str());
            let _ = writeln!(out, "  -> {neighbor} ({neighbor_role})");
        }
    }

    if let Some(payload) = registry.payload() {
        let _ = writeln!(out, "\n=== PAYLOAD ===");
        let _ = writeln!(out, "payload: {payload}");
        let _ = writeln!(out, "graph degree: {}", graph.degree(payload));
    }

    let _ = writeln!(out, "\n=== VALIDATION ===");
    match validate(registry) {
        Ok(report) => {
            let _ = writeln!(out, "valid: {} (result {})", report.rocket_type, report.result_code);
        }
        Err(err) => {
            let _ = writeln!(out, "invalid: {err}");
        }
    }

    out
}
