//! The web of scenes: every possible ordering and branch.
//!
//! The graph stores only relationships between scene ids, never scene
//! content. Sequential edges carry the realized reading order and must stay
//! acyclic; branch and alternative edges describe unselected paths and may
//! form cycles freely.

use crate::error::StoryError;
use crate::id::SceneId;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// How one scene relates to a possible next scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EdgeKind {
    /// Part of the realized reading order.
    Sequential,
    /// A branching path not currently selected.
    Branch,
    /// An alternative take on the same transition.
    Alternative,
}

impl EdgeKind {
    pub fn name(&self) -> &'static str {
        match self {
            EdgeKind::Sequential => "sequential",
            EdgeKind::Branch => "branch",
            EdgeKind::Alternative => "alternative",
        }
    }
}

/// A directed edge between two scenes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SceneEdge {
    pub from: SceneId,
    pub to: SceneId,
    pub kind: EdgeKind,
}

impl SceneEdge {
    pub fn new(from: SceneId, to: SceneId, kind: EdgeKind) -> Self {
        Self { from, to, kind }
    }
}

/// The set of all edges between scenes.
///
/// Edges are kept in insertion order with set semantics: re-adding an
/// existing edge leaves the graph unchanged. Scene existence is validated
/// by the aggregate, not here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneGraph {
    edges: Vec<SceneEdge>,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// All edges in insertion order.
    pub fn edges(&self) -> &[SceneEdge] {
        &self.edges
    }

    pub fn contains(&self, edge: &SceneEdge) -> bool {
        self.edges.contains(edge)
    }

    /// Insert an edge.
    ///
    /// Returns `true` if the edge was new, `false` if it already existed.
    /// Fails with `SelfLoop` on a reflexive edge and `CycleViolation` when
    /// a sequential edge would close a cycle among sequential edges. The
    /// cycle check is a targeted reachability probe from `to` back to
    /// `from`, so edits stay cheap on large webs.
    pub(crate) fn add_edge(&mut self, edge: SceneEdge) -> Result<bool, StoryError> {
        if edge.from == edge.to {
            return Err(StoryError::SelfLoop(edge.from));
        }

        if self.contains(&edge) {
            return Ok(false);
        }

        if edge.kind == EdgeKind::Sequential && self.sequential_reaches(edge.to, edge.from) {
            return Err(StoryError::CycleViolation {
                from: edge.from,
                to: edge.to,
            });
        }

        self.edges.push(edge);
        Ok(true)
    }

    /// Remove an edge. Removing an absent edge is a no-op.
    ///
    /// Returns `true` if an edge was actually removed.
    pub(crate) fn remove_edge(&mut self, edge: &SceneEdge) -> bool {
        let before = self.edges.len();
        self.edges.retain(|e| e != edge);
        before != self.edges.len()
    }

    /// Remove every edge touching the given scene.
    pub(crate) fn remove_scene(&mut self, scene: SceneId) {
        self.edges.retain(|e| e.from != scene && e.to != scene);
    }

    /// Replace the whole sequential subgraph with the chain induced by
    /// `order`. Branch and alternative edges are untouched. Input
    /// validation (unknown/duplicate scenes) is the aggregate's job.
    pub(crate) fn replace_sequential(&mut self, order: &[SceneId]) {
        self.edges.retain(|e| e.kind != EdgeKind::Sequential);
        for pair in order.windows(2) {
            self.edges
                .push(SceneEdge::new(pair[0], pair[1], EdgeKind::Sequential));
        }
    }

    /// Direct successors of a scene along edges of one kind.
    pub fn successors(&self, scene: SceneId, kind: EdgeKind) -> impl Iterator<Item = SceneId> + '_ {
        self.edges
            .iter()
            .filter(move |e| e.kind == kind && e.from == scene)
            .map(|e| e.to)
    }

    /// Number of sequential edges pointing at a scene.
    pub fn incoming_sequential(&self, scene: SceneId) -> usize {
        self.edges
            .iter()
            .filter(|e| e.kind == EdgeKind::Sequential && e.to == scene)
            .count()
    }

    /// Whether `target` is reachable from `start` along sequential edges.
    ///
    /// Depth-first with a visited set; short-circuits on the first hit.
    pub fn sequential_reaches(&self, start: SceneId, target: SceneId) -> bool {
        let mut visited = HashSet::new();
        let mut stack = vec![start];

        while let Some(scene) = stack.pop() {
            if scene == target {
                return true;
            }
            if visited.insert(scene) {
                stack.extend(self.successors(scene, EdgeKind::Sequential));
            }
        }

        false
    }

    /// All scenes reachable from `start` along sequential edges, including
    /// `start` itself.
    pub(crate) fn sequential_reachable(&self, start: SceneId) -> HashSet<SceneId> {
        let mut visited = HashSet::new();
        let mut stack = vec![start];

        while let Some(scene) = stack.pop() {
            if visited.insert(scene) {
                stack.extend(self.successors(scene, EdgeKind::Sequential));
            }
        }

        visited
    }
}
