//! Main chain extraction.
//!
//! The main chain is the longest simple path from the payload whose terminal
//! part is not a side booster. Side branches may be walked through (so the
//! search can reach parts beyond them) but are never recorded as the best
//! terminal point.

use hashbrown::HashSet;

use crate::error::{AssemblyError, AssemblyResult};
use crate::graph::ConnectionGraph;
use crate::part::{PartId, PartRole};
use crate::registry::Registry;

/// Extract the main chain from the payload, root to tip.
///
/// Ties in path length are won by the first path found, so for a fixed graph
/// the result is identical across calls. Returns an empty chain when no
/// payload exists.
///
/// # Errors
///
/// Returns [`AssemblyError::CycleDetected`] if the connections form a loop.
/// The search excludes only the immediate parent, so a neighbor that is
/// already on the current path is a genuine cycle; refusing it keeps the
/// recursion bounded by the part count.
pub fn main_chain(
    graph: &ConnectionGraph,
    registry: &Registry,
) -> AssemblyResult<Vec<PartId>> {
    let Some(payload) = registry.payload() else {
        return Ok(Vec::new());
    };

    let mut best: Vec<PartId> = Vec::new();
    let mut path: Vec<PartId> = Vec::new();
    let mut on_path: HashSet<PartId> = HashSet::new();

    search(
        graph, registry, payload, None, &mut path, &mut on_path, &mut best,
    )?;

    Ok(best)
}

/// Extract the main chain as a sequence of roles, root to tip.
///
/// # Errors
///
/// Returns [`AssemblyError::CycleDetected`] if the connections form a loop.
pub fn main_chain_roles(
    graph: &ConnectionGraph,
    registry: &Registry,
) -> AssemblyResult<Vec<PartRole>> {
    let chain = main_chain(graph, registry)?;
    Ok(chain
        .into_iter()
        .filter_map(|id| registry.get(id).map(crate::part::Part::role))
        .collect())
}

fn search(
    graph: &ConnectionGraph,
    registry: &Registry,
    current: PartId,
    parent: Option<PartId>,
    path: &mut Vec<PartId>,
    on_path: &mut HashSet<PartId>,
    best: &mut Vec<PartId>,
) -> AssemblyResult<()> {
    path.push(current);
    on_path.insert(current);

    let is_side = registry
        .get(current)
        .is_some_and(|part| part.role().is_side());

    if !is_side && path.len() > best.len() {
        best.clone_from(path);
    }

    for &next in graph.neighbors(current) {
        if Some(next) == parent {
            continue;
        }
        if on_path.contains(&next) {
            return Err(AssemblyError::CycleDetected { id: next });
        }
        search(graph, registry, next, Some(current), path, on_path, best)?;
    }

    path.pop();
    on_path.remove(&current);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::part::Part;

    fn wire_line(registry: &mut Registry, roles: &[PartRole]) -> Vec<PartId> {
        let ids: Vec<PartId> = roles
            .iter()
            .map(|&role| registry.insert(Part::new(role)))
            .collect();
        for pair in ids.windows(2) {
            registry.attach(pair[1], pair[0]).unwrap();
        }
        ids
    }

    #[test]
    fn test_no_payload_yields_empty_chain() {
        let mut registry = Registry::new();
        wire_line(&mut registry, &[PartRole::CoreTank, PartRole::CoreThruster]);
        let graph = ConnectionGraph::build(&registry);
        assert!(main_chain(&graph, &registry).unwrap().is_empty());
    }

    #[test]
    fn test_straight_line_chain() {
        let mut registry = Registry::new();
        let ids = wire_line(
            &mut registry,
            &[
                PartRole::Payload,
                PartRole::Separator2,
                PartRole::CoreTank,
                PartRole::CoreThruster,
            ],
        );
        let graph = ConnectionGraph::build(&registry);

        assert_eq!(main_chain(&graph, &registry).unwrap(), ids);
        assert_eq!(
            main_chain_roles(&graph, &registry).unwrap(),
            vec![
                PartRole::Payload,
                PartRole::Separator2,
                PartRole::CoreTank,
                PartRole::CoreThruster,
            ]
        );
    }

    #[test]
    fn test_side_branch_never_terminates_chain() {
        let mut registry = Registry::new();
        let ids = wire_line(
            &mut registry,
            &[
                PartRole::Payload,
                PartRole::Separator2,
                PartRole::CoreTank,
                PartRole::CoreThruster,
            ],
        );

        // A deep side branch off the core tank: longer than the main stack,
        // but its parts are all side roles.
        let side_tank = registry.insert(Part::new(PartRole::SideTank));
        let side_thruster_a = registry.insert(Part::new(PartRole::SideThruster));
        let side_thruster_b = registry.insert(Part::new(PartRole::SideThruster));
        registry.attach(side_tank, ids[2]).unwrap();
        registry.attach(side_thruster_a, side_tank).unwrap();
        registry.attach(side_thruster_b, side_thruster_a).unwrap();

        let graph = ConnectionGraph::build(&registry);
        assert_eq!(main_chain(&graph, &registry).unwrap(), ids);
    }

    #[test]
    fn test_search_walks_through_side_parts() {
        // A non-side part hanging beyond a side branch is reachable and makes
        // a longer valid terminus.
        let mut registry = Registry::new();
        let payload = registry.insert(Part::new(PartRole::Payload));
        let side = registry.insert(Part::new(PartRole::SideTank));
        let tank = registry.insert(Part::new(PartRole::CoreTank));
        registry.attach(side, payload).unwrap();
        registry.attach(tank, side).unwrap();

        let graph = ConnectionGraph::build(&registry);
        assert_eq!(
            main_chain(&graph, &registry).unwrap(),
            vec![payload, side, tank]
        );
    }

    #[test]
    fn test_extraction_is_deterministic() {
        let mut registry = Registry::new();
        let ids = wire_line(
            &mut registry,
            &[
                PartRole::Payload,
                PartRole::Separator2,
                PartRole::CoreTank,
            ],
        );
        // Two equal-length branches off the core tank; the first registered
        // must win, every time.
        let left = registry.insert(Part::new(PartRole::CoreThruster));
        let right = registry.insert(Part::new(PartRole::LargeThruster));
        registry.attach(left, ids[2]).unwrap();
        registry.attach(right, ids[2]).unwrap();

        let graph = ConnectionGraph::build(&registry);
        let first = main_chain(&graph, &registry).unwrap();
        assert_eq!(first.last(), Some(&left));
        for _ in 0..10 {
            assert_eq!(main_chain(&graph, &registry).unwrap(), first);
        }
    }

    #[test]
    fn test_cycle_is_rejected() {
        // Triangle a-b-c reachable from the payload.
        let mut registry = Registry::new();
        let payload = registry.insert(Part::new(PartRole::Payload));
        let a = registry.insert(Part::new(PartRole::Separator2));
        let b = registry.insert(Part::new(PartRole::CoreTank));
        let c = registry.insert(Part::new(PartRole::CoreThruster));
        registry.attach(payload, a).unwrap();
        registry.attach(a, b).unwrap();
        registry.attach(b, c).unwrap();
        registry.attach(c, a).unwrap();

        let graph = ConnectionGraph::build(&registry);
        assert!(matches!(
            main_chain(&graph, &registry),
            Err(AssemblyError::CycleDetected { .. })
        ));
    }
}
