//! Layered topological ordering (Kahn peeling).

use rustc_hash::{FxHashMap, FxHashSet};
use thiserror::Error;

use super::graph::{Edge, NodeId};

/// Error types for diagram layering.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// Some nodes never reached zero in-degree.
    #[error(
        "Circular dependency detected; {} nodes could not be layered: {unplaced:?}",
        .unplaced.len()
    )]
    CycleDetected { unplaced: Vec<NodeId> },
}

/// Peel `nodes` into layers of zero in-degree.
///
/// Each round takes every remaining node with no unplaced predecessor, in the
/// order given by `nodes`, then releases its successors. Edges touching ids
/// outside `nodes` are ignored.
///
/// # Returns
/// * `Ok(layers)` where every node sits in a later layer than all of its
///   predecessors
/// * `Err(LayoutError::CycleDetected)` listing the nodes left over, in node
///   order, when peeling stalls
pub fn assign_layers(
    nodes: &[NodeId],
    edges: &[Edge],
) -> Result<Vec<Vec<NodeId>>, LayoutError> {
    let node_set: FxHashSet<NodeId> = nodes.iter().copied().collect();

    let mut in_degree: FxHashMap<NodeId, usize> = nodes.iter().map(|&id| (id, 0)).collect();
    let mut successors: FxHashMap<NodeId, Vec<NodeId>> =
        FxHashMap::with_capacity_and_hasher(nodes.len(), Default::default());

    for edge in edges {
        if !node_set.contains(&edge.source) || !node_set.contains(&edge.target) {
            continue;
        }
        successors.entry(edge.source).or_default().push(edge.target);
        if let Some(degree) = in_degree.get_mut(&edge.target) {
            *degree += 1;
        }
    }

    let mut remaining: Vec<NodeId> = nodes.to_vec();
    let mut layers: Vec<Vec<NodeId>> = Vec::new();

    while !remaining.is_empty() {
        let (layer, rest): (Vec<NodeId>, Vec<NodeId>) = remaining
            .into_iter()
            .partition(|id| in_degree.get(id).copied().unwrap_or(0) == 0);
        remaining = rest;

        if layer.is_empty() {
            return Err(LayoutError::CycleDetected { unplaced: remaining });
        }

        for id in &layer {
            if let Some(targets) = successors.get(id) {
                for target in targets {
                    if let Some(degree) = in_degree.get_mut(target) {
                        *degree = degree.saturating_sub(1);
                    }
                }
            }
        }
        layers.push(layer);
    }

    Ok(layers)
}

/// Map each node to the index of its layer.
pub fn layer_index(layers: &[Vec<NodeId>]) -> FxHashMap<NodeId, usize> {
    layers
        .iter()
        .enumerate()
        .flat_map(|(index, layer)| layer.iter().map(move |&id| (id, index)))
        .collect()
}
