//! Coordinate assignment for layered diagrams.

use std::collections::{BTreeMap, BTreeSet};

use crate::config::LayoutConfig;
use crate::critical_path::{NetworkResult, TaskTiming};
use crate::models::{Task, TaskId};

use super::graph::{build_graph, Edge, GraphNode, NodeId, NodeKind};
use super::layering::{assign_layers, LayoutError};

/// Visual class of a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeStyle {
    /// Start and Finish milestones
    Terminal,
    /// Task on the critical path
    Critical,
    Normal,
}

impl NodeStyle {
    pub fn classify(kind: NodeKind, id: NodeId, critical_path: &BTreeSet<TaskId>) -> Self {
        if kind.is_terminal() {
            NodeStyle::Terminal
        } else if critical_path.contains(&id) {
            NodeStyle::Critical
        } else {
            NodeStyle::Normal
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            NodeStyle::Terminal => "terminal",
            NodeStyle::Critical => "critical",
            NodeStyle::Normal => "normal",
        }
    }
}

/// A node with its diagram position. `x`/`y` give the box centre.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedNode {
    pub id: NodeId,
    pub name: String,
    pub duration: f64,
    pub kind: NodeKind,
    pub timing: TaskTiming,
    pub layer: usize,
    pub x: f64,
    pub y: f64,
    pub style: NodeStyle,
}

/// A renderable precedence diagram.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Layout {
    pub nodes: BTreeMap<NodeId, PlacedNode>,
    pub edges: Vec<Edge>,
    pub layers: Vec<Vec<NodeId>>,
    pub width: f64,
    pub height: f64,
}

impl Layout {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> Option<&PlacedNode> {
        self.nodes.get(&id)
    }

    pub fn layer_of(&self, id: NodeId) -> Option<usize> {
        self.nodes.get(&id).map(|n| n.layer)
    }

    /// Widest layer's node count.
    pub fn max_layer_width(&self) -> usize {
        self.layers.iter().map(Vec::len).max().unwrap_or(0)
    }
}

/// Canvas size for `layer_count` layers whose widest holds `max_layer_width`
/// nodes.
pub fn canvas_size(
    layer_count: usize,
    max_layer_width: usize,
    config: &LayoutConfig,
) -> (f64, f64) {
    let width = layer_count as f64 * config.layer_spacing + config.node_width * 2.0;
    let height =
        max_layer_width.max(1) as f64 * config.vertical_spacing + config.node_height * 2.0;
    (width, height)
}

/// Centre coordinates of slot `position` in a layer of `layer_len` nodes.
pub fn node_coordinates(
    layer: usize,
    position: usize,
    layer_len: usize,
    canvas_height: f64,
    config: &LayoutConfig,
) -> (f64, f64) {
    let x = layer as f64 * config.layer_spacing + config.node_width;
    let y = (canvas_height / (layer_len + 1) as f64) * (position + 1) as f64;
    (x, y)
}

/// Lay out the precedence diagram for `tasks` and their computed `result`.
///
/// Returns an empty layout when there are no tasks.
///
/// # Returns
/// * `Ok(Layout)` with every node positioned
/// * `Err(LayoutError::CycleDetected)` if the dependency graph has a cycle
pub fn plan_layout(
    tasks: &[Task],
    result: &NetworkResult,
    config: &LayoutConfig,
) -> Result<Layout, LayoutError> {
    let graph = build_graph(tasks, result.project_end);
    if graph.nodes.is_empty() {
        return Ok(Layout::default());
    }

    let layers = assign_layers(&graph.node_ids(), &graph.edges)?;
    let max_layer_width = layers.iter().map(Vec::len).max().unwrap_or(1);
    let (width, height) = canvas_size(layers.len(), max_layer_width, config);

    let by_id: BTreeMap<NodeId, &GraphNode> = graph.nodes.iter().map(|n| (n.id, n)).collect();
    let mut nodes = BTreeMap::new();

    for (layer_idx, layer) in layers.iter().enumerate() {
        for (position, id) in layer.iter().enumerate() {
            let Some(node) = by_id.get(id) else {
                continue;
            };
            let (x, y) = node_coordinates(layer_idx, position, layer.len(), height, config);
            nodes.insert(
                *id,
                PlacedNode {
                    id: *id,
                    name: node.name.clone(),
                    duration: node.duration,
                    kind: node.kind,
                    timing: node.timing,
                    layer: layer_idx,
                    x,
                    y,
                    style: NodeStyle::classify(node.kind, *id, &result.critical_path),
                },
            );
        }
    }

    Ok(Layout {
        nodes,
        edges: graph.edges,
        layers,
        width,
        height,
    })
}
