//! Precedence graph with synthetic Start and Finish nodes.

use rustc_hash::FxHashSet;

use crate::critical_path::{build_dependents_map, TaskTiming};
use crate::models::{Task, TaskId};

/// Diagram node id. Task ids are reused; Start is 0 and Finish follows the
/// largest task id.
pub type NodeId = TaskId;

pub const START_NODE_ID: NodeId = 0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Start,
    Task,
    Finish,
}

impl NodeKind {
    pub fn is_terminal(self) -> bool {
        matches!(self, NodeKind::Start | NodeKind::Finish)
    }
}

/// A node of the precedence diagram.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphNode {
    pub id: NodeId,
    pub name: String,
    pub duration: f64,
    pub kind: NodeKind,
    pub timing: TaskTiming,
}

/// A directed precedence edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Edge {
    pub source: NodeId,
    pub target: NodeId,
}

impl Edge {
    pub fn new(source: NodeId, target: NodeId) -> Self {
        Self { source, target }
    }
}

/// Nodes in diagram order (Start, tasks in insertion order, Finish) and edges
/// in emission order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PrecedenceGraph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<Edge>,
}

impl PrecedenceGraph {
    pub fn node_ids(&self) -> Vec<NodeId> {
        self.nodes.iter().map(|n| n.id).collect()
    }

    pub fn node(&self, id: NodeId) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn finish_id(&self) -> Option<NodeId> {
        self.nodes
            .iter()
            .find(|n| n.kind == NodeKind::Finish)
            .map(|n| n.id)
    }

    /// Direct predecessors of `id`, in edge order.
    pub fn predecessors(&self, id: NodeId) -> Vec<NodeId> {
        self.edges
            .iter()
            .filter(|e| e.target == id)
            .map(|e| e.source)
            .collect()
    }
}

/// Build the diagram graph for `tasks`.
///
/// For each task, in order, emits `Start -> task` when it has no
/// dependencies, `task -> Finish` when nothing depends on it, then
/// `dependency -> task` per dependency. Dependencies on unknown ids are
/// ignored. Finish is pinned at `project_end`.
pub fn build_graph(tasks: &[Task], project_end: f64) -> PrecedenceGraph {
    if tasks.is_empty() {
        return PrecedenceGraph::default();
    }

    let known: FxHashSet<TaskId> = tasks.iter().map(|t| t.id).collect();
    let dependents = build_dependents_map(tasks);
    let finish_id = tasks.iter().map(|t| t.id).max().unwrap_or(0) + 1;

    let mut nodes = Vec::with_capacity(tasks.len() + 2);
    nodes.push(GraphNode {
        id: START_NODE_ID,
        name: "Start".to_string(),
        duration: 0.0,
        kind: NodeKind::Start,
        timing: TaskTiming::default(),
    });
    nodes.extend(tasks.iter().map(|task| GraphNode {
        id: task.id,
        name: task.name.clone(),
        duration: task.duration,
        kind: NodeKind::Task,
        timing: task.timing,
    }));
    nodes.push(GraphNode {
        id: finish_id,
        name: "Finish".to_string(),
        duration: 0.0,
        kind: NodeKind::Finish,
        timing: TaskTiming::milestone(project_end),
    });

    let mut edges = Vec::new();
    for task in tasks {
        let deps: Vec<TaskId> = task
            .dependencies
            .iter()
            .copied()
            .filter(|dep| known.contains(dep))
            .collect();

        if deps.is_empty() {
            edges.push(Edge::new(START_NODE_ID, task.id));
        }
        if !dependents.contains_key(&task.id) {
            edges.push(Edge::new(task.id, finish_id));
        }
        edges.extend(deps.into_iter().map(|dep| Edge::new(dep, task.id)));
    }

    PrecedenceGraph { nodes, edges }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diamond() -> Vec<Task> {
        vec![
            Task::new(1, "A", 2.0, vec![]),
            Task::new(2, "B", 5.0, vec![1]),
            Task::new(3, "C", 1.0, vec![1]),
            Task::new(4, "D", 3.0, vec![2, 3]),
        ]
    }

    #[test]
    fn test_empty_graph() {
        let graph = build_graph(&[], 0.0);
        assert!(graph.nodes.is_empty());
        assert!(graph.edges.is_empty());
        assert_eq!(graph.finish_id(), None);
    }

    #[test]
    fn test_synthetic_nodes() {
        let graph = build_graph(&diamond(), 10.0);
        assert_eq!(graph.node_ids(), vec![0, 1, 2, 3, 4, 5]);

        let start = graph.node(0).unwrap();
        assert_eq!(start.kind, NodeKind::Start);
        assert_eq!(start.duration, 0.0);

        let finish = graph.node(5).unwrap();
        assert_eq!(finish.kind, NodeKind::Finish);
        assert_eq!(finish.timing, TaskTiming::milestone(10.0));
        assert_eq!(graph.finish_id(), Some(5));
    }

    #[test]
    fn test_edge_emission_order() {
        let graph = build_graph(&diamond(), 10.0);
        assert_eq!(
            graph.edges,
            vec![
                Edge::new(0, 1),
                Edge::new(1, 2),
                Edge::new(1, 3),
                Edge::new(4, 5),
                Edge::new(2, 4),
                Edge::new(3, 4),
            ]
        );
    }

    #[test]
    fn test_unknown_dependency_becomes_source() {
        let tasks = vec![
            Task::new(1, "A", 2.0, vec![]),
            Task::new(2, "B", 5.0, vec![9]),
        ];
        let graph = build_graph(&tasks, 5.0);
        assert_eq!(graph.predecessors(2), vec![0]);
        assert_eq!(graph.predecessors(3), vec![1, 2]);
    }
}
