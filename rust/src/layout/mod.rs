//! Layered layout of the precedence diagram.
//!
//! Builds the Start/Finish-bracketed graph, peels it into topological layers
//! and assigns each node a position on the canvas. A layering that stalls is
//! reported as a cycle rather than drawn partially.

mod graph;
mod layering;
mod position;

pub use graph::{build_graph, Edge, GraphNode, NodeId, NodeKind, PrecedenceGraph, START_NODE_ID};
pub use layering::{assign_layers, layer_index, LayoutError};
pub use position::{canvas_size, node_coordinates, plan_layout, Layout, NodeStyle, PlacedNode};
