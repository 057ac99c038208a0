use crate::graph::RelationshipGraph;
use crate::types::EntityRelationship;
use std::collections::{HashSet, VecDeque};

/// Maximum number of paths returned by a single search
pub const MAX_PATHS: usize = 5;
/// Hard ceiling on path length regardless of the requested depth
pub const MAX_PATH_DEPTH: usize = 5;
pub const DEFAULT_PATH_DEPTH: usize = 3;

pub type RelationshipPath = Vec<EntityRelationship>;

impl RelationshipGraph {
    /// Breadth-first search for relationship paths from `from` to `to`.
    ///
    /// Returns at most [`MAX_PATHS`] paths of at most `max_depth` edges (clamped to
    /// [`MAX_PATH_DEPTH`]), shortest first, in field declaration order.
    ///
    /// An entity is expanded at most once across the whole search. This keeps the frontier small
    /// but can hide alternative paths that pass through an entity already reached by a shorter
    /// path.
    #[must_use]
    pub fn find_paths(&self, from: &str, to: &str, max_depth: usize) -> Vec<RelationshipPath> {
        let max_depth = max_depth.min(MAX_PATH_DEPTH);
        let mut paths: Vec<Vec<&EntityRelationship>> = Vec::new();
        if max_depth == 0 {
            return Vec::new();
        }

        let mut visited: HashSet<&str> = HashSet::new();
        visited.insert(from);

        let mut queue: VecDeque<Vec<&EntityRelationship>> = VecDeque::new();
        for rel in self.relationships(from) {
            if rel.target_entity == to {
                paths.push(vec![rel]);
            } else {
                queue.push_back(vec![rel]);
            }
        }

        while paths.len() < MAX_PATHS {
            let Some(current) = queue.pop_front() else {
                break;
            };
            if current.len() >= max_depth {
                continue;
            }

            let Some(last) = current.last() else {
                continue;
            };
            let entity = last.target_entity.as_str();
            if !visited.insert(entity) {
                continue;
            }

            for next in self.relationships(entity) {
                let mut path = current.clone();
                path.push(next);

                if next.target_entity == to {
                    paths.push(path);
                } else if path.len() < max_depth {
                    queue.push_back(path);
                }
            }
        }

        paths.truncate(MAX_PATHS);
        log::debug!("Found {} paths from {from} to {to}", paths.len());

        paths
            .into_iter()
            .map(|path| path.into_iter().cloned().collect())
            .collect()
    }
}
