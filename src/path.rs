//! The story path resolver.
//!
//! Derives the current linear reading order from the web: a topological
//! traversal of the sequential-edge subgraph from the root scene, pairing
//! each scene with its active variant. Ties are broken by scene creation
//! order, so an unmodified board always resolves to the identical path.
//! Branch and alternative edges never contribute; they stay queryable as
//! the web.

use crate::error::StoryError;
use crate::graph::{EdgeKind, SceneGraph};
use crate::id::{SceneId, VariantId};
use crate::scene::Scene;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::warn;

/// One step of the realized story.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathEntry {
    pub scene: SceneId,
    pub variant: VariantId,
}

/// The realized linear story plus a diagnostic of what it left behind.
///
/// Orphans are scenes unreachable from the chosen root. They are reported,
/// not fatal: the path covers everything reachable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryPath {
    pub entries: Vec<PathEntry>,
    pub orphans: Vec<SceneId>,
}

impl StoryPath {
    /// Scene ids in reading order.
    pub fn scene_ids(&self) -> Vec<SceneId> {
        self.entries.iter().map(|e| e.scene).collect()
    }

    /// Whether every scene made it onto the path.
    pub fn is_complete(&self) -> bool {
        self.orphans.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Resolve the linear path for the given scenes and web.
///
/// `start` designates the scene to begin from; without it, exactly one
/// root scene (no incoming sequential edge) must exist or the call fails
/// with `AmbiguousRoot`.
pub fn resolve(
    scenes: &[Scene],
    graph: &SceneGraph,
    start: Option<SceneId>,
) -> Result<StoryPath, StoryError> {
    resolve_inner(scenes, graph, start, None)
}

/// Like [`resolve`], but checks a cancellation flag between traversal
/// steps. Long resolutions over very large webs can be abandoned
/// cooperatively; the result is then `Cancelled` rather than a truncated
/// path.
pub fn resolve_cancellable(
    scenes: &[Scene],
    graph: &SceneGraph,
    start: Option<SceneId>,
    cancel: &AtomicBool,
) -> Result<StoryPath, StoryError> {
    resolve_inner(scenes, graph, start, Some(cancel))
}

fn resolve_inner(
    scenes: &[Scene],
    graph: &SceneGraph,
    start: Option<SceneId>,
    cancel: Option<&AtomicBool>,
) -> Result<StoryPath, StoryError> {
    if scenes.is_empty() {
        return match start {
            Some(id) => Err(StoryError::UnknownScene(id)),
            None => Ok(StoryPath {
                entries: Vec::new(),
                orphans: Vec::new(),
            }),
        };
    }

    // Creation order doubles as the deterministic tie-break.
    let creation_index: HashMap<SceneId, usize> = scenes
        .iter()
        .enumerate()
        .map(|(i, s)| (s.id, i))
        .collect();

    let roots: Vec<SceneId> = scenes
        .iter()
        .map(|s| s.id)
        .filter(|&id| graph.incoming_sequential(id) == 0)
        .collect();

    let entry = match start {
        Some(id) => {
            if !creation_index.contains_key(&id) {
                return Err(StoryError::UnknownScene(id));
            }
            id
        }
        None => {
            if roots.len() != 1 {
                return Err(StoryError::AmbiguousRoot { candidates: roots });
            }
            roots[0]
        }
    };

    let reachable = graph.sequential_reachable(entry);

    // In-degrees restricted to the reachable subgraph, so scenes fed only
    // by unreachable sources still drain to zero.
    let mut indegree: HashMap<SceneId, usize> =
        reachable.iter().map(|&id| (id, 0)).collect();
    for edge in graph.edges() {
        if edge.kind == EdgeKind::Sequential
            && reachable.contains(&edge.from)
            && reachable.contains(&edge.to)
        {
            if let Some(count) = indegree.get_mut(&edge.to) {
                *count += 1;
            }
        }
    }

    let mut ready: Vec<SceneId> = indegree
        .iter()
        .filter(|(_, &count)| count == 0)
        .map(|(&id, _)| id)
        .collect();

    let mut entries = Vec::with_capacity(reachable.len());
    while !ready.is_empty() {
        if let Some(cancel) = cancel {
            if cancel.load(Ordering::Relaxed) {
                return Err(StoryError::Cancelled);
            }
        }

        // Earliest-created scene among the ready set.
        let next_pos = ready
            .iter()
            .enumerate()
            .min_by_key(|&(_, id)| creation_index.get(id).copied().unwrap_or(usize::MAX))
            .map(|(pos, _)| pos)
            .unwrap_or(0);
        let scene_id = ready.swap_remove(next_pos);

        if let Some(scene) = scenes.iter().find(|s| s.id == scene_id) {
            entries.push(PathEntry {
                scene: scene_id,
                variant: scene.active_variant_id(),
            });
        }

        for successor in graph.successors(scene_id, EdgeKind::Sequential) {
            if let Some(count) = indegree.get_mut(&successor) {
                *count -= 1;
                if *count == 0 {
                    ready.push(successor);
                }
            }
        }
    }

    let orphans: Vec<SceneId> = scenes
        .iter()
        .map(|s| s.id)
        .filter(|id| !reachable.contains(id))
        .collect();

    if !orphans.is_empty() {
        warn!(orphan_count = orphans.len(), "path leaves scenes unreachable");
    }

    Ok(StoryPath { entries, orphans })
}
