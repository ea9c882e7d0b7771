//! Incremental island tracking.
//!
//! A union-find over face indices with union by rank and path compression.
//! Degenerate faces have no node and belong to no island. Each root also
//! carries the island's frontier: the half-edges that still wait for a
//! partner.

use std::cmp::Ordering;

use hashbrown::{HashMap, HashSet};

use crate::candidates::CandidateTable;
use crate::half_edge::HalfEdge;

#[derive(Debug, Clone, Copy)]
struct Node {
    parent: usize,
    rank: u32,
}

/// Union-find table of faces with per-island frontiers.
#[derive(Debug, Clone)]
pub(crate) struct IslandTracker {
    nodes: Vec<Option<Node>>,
    frontiers: HashMap<usize, HashSet<HalfEdge>>,
}

impl IslandTracker {
    /// One singleton island per non-degenerate face; its frontier holds the
    /// face's half-edges that have at least one candidate.
    pub fn new(table: &CandidateTable) -> Self {
        let face_count = table.face_count();
        let mut nodes = Vec::with_capacity(face_count);
        let mut frontiers = HashMap::new();

        for face in 0..face_count {
            if table.is_degenerate(face) {
                nodes.push(None);
                continue;
            }
            nodes.push(Some(Node {
                parent: face,
                rank: 0,
            }));

            let open: HashSet<HalfEdge> = (0..3)
                .map(|local| HalfEdge::new(face, local))
                .filter(|&edge| table.count(edge) > 0)
                .collect();
            frontiers.insert(face, open);
        }

        Self { nodes, frontiers }
    }

    /// Root of the island containing `face`, or `None` for degenerate faces.
    pub fn find(&mut self, face: usize) -> Option<usize> {
        let mut root = face;
        loop {
            let parent = self.nodes.get(root).copied().flatten()?.parent;
            if parent == root {
                break;
            }
            root = parent;
        }

        let mut current = face;
        while current != root {
            let Some(node) = self.nodes[current].as_mut() else {
                break;
            };
            current = std::mem::replace(&mut node.parent, root);
        }

        Some(root)
    }

    /// Record that `a` and `b` were resolved as partners.
    ///
    /// Merges the islands of their faces and removes both half-edges from
    /// the merged frontier.
    pub fn join(&mut self, a: HalfEdge, b: HalfEdge) {
        let (Some(root_a), Some(root_b)) = (self.find(a.face()), self.find(b.face())) else {
            return;
        };

        let root = if root_a == root_b {
            root_a
        } else {
            // Union by rank
            let (root, child) = match self.rank(root_a).cmp(&self.rank(root_b)) {
                Ordering::Less => (root_b, root_a),
                Ordering::Greater => (root_a, root_b),
                Ordering::Equal => {
                    if let Some(node) = self.nodes[root_a].as_mut() {
                        node.rank += 1;
                    }
                    (root_a, root_b)
                }
            };

            if let Some(node) = self.nodes[child].as_mut() {
                node.parent = root;
            }

            let absorbed = self.frontiers.remove(&child).unwrap_or_default();
            self.frontiers.entry(root).or_default().extend(absorbed);
            root
        };

        if let Some(frontier) = self.frontiers.get_mut(&root) {
            frontier.remove(&a);
            frontier.remove(&b);
        }
    }

    /// Frontier of the island rooted at `root`.
    #[cfg(test)]
    pub fn frontier(&self, root: usize) -> Option<&HashSet<HalfEdge>> {
        self.frontiers.get(&root)
    }

    /// Half-edges left in any frontier.
    pub fn frontier_size(&self) -> usize {
        self.frontiers.values().map(HashSet::len).sum()
    }

    /// Group faces by island, islands in order of their first face.
    pub fn islands(&mut self) -> Vec<Vec<usize>> {
        let mut slot_of_root: HashMap<usize, usize> = HashMap::new();
        let mut islands: Vec<Vec<usize>> = Vec::new();

        for face in 0..self.nodes.len() {
            let Some(root) = self.find(face) else {
                continue;
            };
            let slot = *slot_of_root.entry(root).or_insert_with(|| {
                islands.push(Vec::new());
                islands.len() - 1
            });
            islands[slot].push(face);
        }

        islands
    }

    fn rank(&self, face: usize) -> u32 {
        self.nodes[face].map_or(0, |node| node.rank)
    }
}
