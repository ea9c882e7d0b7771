//! Face adjacency graph with breadth-first flood fill.

use std::collections::VecDeque;

use hashbrown::HashSet;

/// An undirected graph over face indices.
///
/// # Example
///
/// ```
/// use mesh_islands::FaceGraph;
///
/// let mut graph = FaceGraph::new(4);
/// graph.connect(0, 2);
/// graph.connect(2, 3);
///
/// assert_eq!(graph.components(), vec![vec![0, 2, 3], vec![1]]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct FaceGraph {
    adjacency: Vec<Vec<usize>>,
    links: HashSet<(usize, usize)>,
}

impl FaceGraph {
    /// Create a graph of `face_count` isolated faces.
    #[must_use]
    pub fn new(face_count: usize) -> Self {
        Self {
            adjacency: vec![Vec::new(); face_count],
            links: HashSet::new(),
        }
    }

    /// Number of faces.
    #[must_use]
    pub fn face_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Connect two faces. Self loops and repeated links are ignored.
    ///
    /// # Panics
    ///
    /// Panics if either face is out of bounds.
    pub fn connect(&mut self, a: usize, b: usize) {
        if a == b || !self.links.insert((a.min(b), a.max(b))) {
            return;
        }
        self.adjacency[a].push(b);
        self.adjacency[b].push(a);
    }

    /// Neighbors of a face, in the order they were connected.
    #[must_use]
    pub fn neighbors(&self, face: usize) -> &[usize] {
        self.adjacency.get(face).map_or(&[], Vec::as_slice)
    }

    /// Connected components.
    ///
    /// Components are seeded from the lowest unvisited face and list their
    /// faces in breadth-first order. Every face appears in exactly one
    /// component.
    #[must_use]
    pub fn components(&self) -> Vec<Vec<usize>> {
        let mut visited = vec![false; self.adjacency.len()];
        let mut components = Vec::new();
        let mut queue = VecDeque::new();

        for seed in 0..self.adjacency.len() {
            if visited[seed] {
                continue;
            }
            visited[seed] = true;
            queue.push_back(seed);

            let mut component = Vec::new();
            while let Some(face) = queue.pop_front() {
                component.push(face);
                for &next in &self.adjacency[face] {
                    if !visited[next] {
                        visited[next] = true;
                        queue.push_back(next);
                    }
                }
            }
            components.push(component);
        }

        components
    }
}
