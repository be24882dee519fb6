//! Proximity graph over glyph centers

/// Undirected graph over points, edges stored as `(i, j)` with `i < j`
#[derive(Debug, Clone, Default)]
pub struct ProximityGraph {
    vertices: usize,
    edges: Vec<(usize, usize)>,
}

fn dist2(a: (f64, f64), b: (f64, f64)) -> f64 {
    let (dx, dy) = (a.0 - b.0, a.1 - b.1);
    dx * dx + dy * dy
}

impl ProximityGraph {
    /// Build the relative neighborhood graph of `points`.
    ///
    /// Points `i` and `j` are linked unless some third point `r` is closer
    /// to both of them than they are to each other.
    pub fn relative_neighborhood(points: &[(f64, f64)]) -> Self {
        let n = points.len();
        let mut edges = Vec::new();
        for i in 0..n {
            for j in (i + 1)..n {
                let dij = dist2(points[i], points[j]);
                let blocked = (0..n).any(|r| {
                    r != i
                        && r != j
                        && dist2(points[i], points[r]).max(dist2(points[j], points[r])) < dij
                });
                if !blocked {
                    edges.push((i, j));
                }
            }
        }
        Self { vertices: n, edges }
    }

    /// Number of vertices
    pub fn vertex_count(&self) -> usize {
        self.vertices
    }

    /// Edges in construction order
    pub fn edges(&self) -> &[(usize, usize)] {
        &self.edges
    }

    /// Keep only the edges for which `keep` returns true.
    pub fn retain_edges<F>(&mut self, mut keep: F)
    where
        F: FnMut(usize, usize) -> bool,
    {
        self.edges.retain(|&(i, j)| keep(i, j));
    }

    /// Connected components.
    ///
    /// Components are ordered by their smallest vertex and list their
    /// vertices in ascending order. Isolated vertices form singletons.
    pub fn components(&self) -> Vec<Vec<usize>> {
        let mut sets = DisjointSet::new(self.vertices);
        for &(i, j) in &self.edges {
            sets.union(i, j);
        }

        let mut slot = vec![usize::MAX; self.vertices];
        let mut components: Vec<Vec<usize>> = Vec::new();
        for v in 0..self.vertices {
            let root = sets.find(v);
            if slot[root] == usize::MAX {
                slot[root] = components.len();
                components.push(Vec::new());
            }
            components[slot[root]].push(v);
        }
        components
    }
}

/// Union-find with path halving
struct DisjointSet {
    parent: Vec<usize>,
}

impl DisjointSet {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
        }
    }

    fn find(&mut self, mut v: usize) -> usize {
        while self.parent[v] != v {
            self.parent[v] = self.parent[self.parent[v]];
            v = self.parent[v];
        }
        v
    }

    fn union(&mut self, a: usize, b: usize) {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra != rb {
            self.parent[ra.max(rb)] = ra.min(rb);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collinear_points_form_a_chain() {
        let g = ProximityGraph::relative_neighborhood(&[(0.0, 0.0), (10.0, 0.0), (20.0, 0.0)]);
        assert_eq!(g.edges(), &[(0, 1), (1, 2)]);
    }

    #[test]
    fn test_square_keeps_sides_only() {
        let pts = [(0.0, 0.0), (10.0, 0.0), (0.0, 10.0), (10.0, 10.0)];
        let g = ProximityGraph::relative_neighborhood(&pts);
        assert_eq!(g.edges(), &[(0, 1), (0, 2), (1, 3), (2, 3)]);
    }

    #[test]
    fn test_components() {
        let pts = [(0.0, 0.0), (100.0, 0.0), (10.0, 0.0), (110.0, 0.0), (300.0, 0.0)];
        let mut g = ProximityGraph::relative_neighborhood(&pts);
        g.retain_edges(|i, j| (pts[i].0 - pts[j].0).abs() < 50.0);
        assert_eq!(g.components(), vec![vec![0, 2], vec![1, 3], vec![4]]);
    }

    #[test]
    fn test_empty_and_single() {
        assert!(ProximityGraph::relative_neighborhood(&[]).components().is_empty());
        let g = ProximityGraph::relative_neighborhood(&[(1.0, 1.0)]);
        assert!(g.edges().is_empty());
        assert_eq!(g.components(), vec![vec![0]]);
    }
}
