//! Flat graph store: vertices keyed by label, edges referring to endpoints by label.

use std::collections::HashMap;

use super::types::{EdgeId, Label, Vertex, WeightedEdge};

#[derive(Clone, Debug, Default)]
pub struct Graph {
	vertices: HashMap<Label, Vertex>,
	/// Creation order of the vertices, used for drawing and hit priority.
	order: Vec<Label>,
	edges: Vec<WeightedEdge>,
	next_edge: u64,
}

impl Graph {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn vertex_count(&self) -> usize {
		self.vertices.len()
	}

	pub fn edge_count(&self) -> usize {
		self.edges.len()
	}

	pub fn is_empty(&self) -> bool {
		self.vertices.is_empty()
	}

	pub fn contains_vertex(&self, label: Label) -> bool {
		self.vertices.contains_key(&label)
	}

	pub fn vertex(&self, label: Label) -> Option<&Vertex> {
		self.vertices.get(&label)
	}

	pub fn vertex_mut(&mut self, label: Label) -> Option<&mut Vertex> {
		self.vertices.get_mut(&label)
	}

	/// Vertices in creation order.
	pub fn vertices(&self) -> impl Iterator<Item = &Vertex> {
		self.order.iter().filter_map(|label| self.vertices.get(label))
	}

	/// Edges in insertion order.
	pub fn edges(&self) -> impl Iterator<Item = &WeightedEdge> {
		self.edges.iter()
	}

	pub fn edge(&self, id: EdgeId) -> Option<&WeightedEdge> {
		self.edges.iter().find(|e| e.id == id)
	}

	pub fn edge_mut(&mut self, id: EdgeId) -> Option<&mut WeightedEdge> {
		self.edges.iter_mut().find(|e| e.id == id)
	}

	/// Inserts a vertex. Returns `false` and leaves the graph untouched when the
	/// label is already taken.
	pub fn add_vertex(&mut self, x: i32, y: i32, label: Label) -> bool {
		if self.vertices.contains_key(&label) {
			return false;
		}
		self.vertices.insert(label, Vertex::new(x, y, label));
		self.order.push(label);
		true
	}

	/// Removes a vertex together with every edge touching it and returns the
	/// removed edges. Removing an absent vertex is a no-op.
	pub fn remove_vertex(&mut self, label: Label) -> Vec<WeightedEdge> {
		if self.vertices.remove(&label).is_none() {
			return Vec::new();
		}
		self.order.retain(|l| *l != label);
		let (removed, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.edges)
			.into_iter()
			.partition(|e| e.touches(label));
		self.edges = kept;
		removed
	}

	/// Inserts an edge between two distinct existing vertices. Self-loops and
	/// dangling endpoints are refused with `None`. Parallel edges are allowed.
	pub fn add_edge(&mut self, v1: Label, v2: Label, weight: i32) -> Option<EdgeId> {
		if v1 == v2 || !self.contains_vertex(v1) || !self.contains_vertex(v2) {
			return None;
		}
		let id = EdgeId(self.next_edge);
		self.next_edge += 1;
		self.edges.push(WeightedEdge {
			id,
			endpoints: (v1, v2),
			weight,
			color: Default::default(),
		});
		Some(id)
	}

	pub fn remove_edge(&mut self, id: EdgeId) -> Option<WeightedEdge> {
		let pos = self.edges.iter().position(|e| e.id == id)?;
		Some(self.edges.remove(pos))
	}

	/// Edges incident to `label`, by weight ascending. Ties keep insertion
	/// order, which fixes the enumeration order of every traversal.
	pub fn incident_edges(&self, label: Label) -> Vec<&WeightedEdge> {
		let mut edges: Vec<&WeightedEdge> = self.edges.iter().filter(|e| e.touches(label)).collect();
		edges.sort_by_key(|e| e.weight);
		edges
	}

	/// All edges by weight ascending, insertion-stable on ties.
	pub fn edges_by_weight(&self) -> Vec<&WeightedEdge> {
		let mut edges: Vec<&WeightedEdge> = self.edges.iter().collect();
		edges.sort_by_key(|e| e.weight);
		edges
	}

	/// Paints every vertex and edge back to its default color.
	pub fn reset_colors(&mut self) {
		self.vertices.values_mut().for_each(Vertex::set_default);
		self.edges.iter_mut().for_each(WeightedEdge::set_default);
	}

	pub fn reset_distances(&mut self) {
		for vertex in self.vertices.values_mut() {
			vertex.distance = None;
		}
	}

	pub fn clear(&mut self) {
		self.vertices.clear();
		self.order.clear();
		self.edges.clear();
	}

	/// The most recently created vertex whose disk contains `(x, y)`.
	pub fn vertex_at(&self, x: f64, y: f64, radius: f64) -> Option<Label> {
		self.order.iter().rev().copied().find(|label| {
			self.vertices.get(label).is_some_and(|v| {
				let (dx, dy) = (v.x as f64 - x, v.y as f64 - y);
				(dx * dx + dy * dy).sqrt() <= radius
			})
		})
	}

	/// The most recently created edge whose segment passes within `tolerance`
	/// of `(x, y)`.
	pub fn edge_at(&self, x: f64, y: f64, tolerance: f64) -> Option<EdgeId> {
		self.edges.iter().rev().find_map(|edge| {
			let a = self.vertex(edge.first())?;
			let b = self.vertex(edge.second())?;
			let d = segment_distance(
				(x, y),
				(a.x as f64, a.y as f64),
				(b.x as f64, b.y as f64),
			);
			(d <= tolerance).then_some(edge.id)
		})
	}
}

fn segment_distance(p: (f64, f64), a: (f64, f64), b: (f64, f64)) -> f64 {
	let (abx, aby) = (b.0 - a.0, b.1 - a.1);
	let len2 = abx * abx + aby * aby;
	let t = if len2 < f64::EPSILON {
		0.0
	} else {
		(((p.0 - a.0) * abx + (p.1 - a.1) * aby) / len2).clamp(0.0, 1.0)
	};
	let (cx, cy) = (a.0 + t * abx, a.1 + t * aby);
	let (dx, dy) = (p.0 - cx, p.1 - cy);
	(dx * dx + dy * dy).sqrt()
}

#[cfg(test)]
mod tests {
	use super::*;

	fn triangle() -> (Graph, EdgeId, EdgeId, EdgeId) {
		let mut g = Graph::new();
		g.add_vertex(100, 100, 'A');
		g.add_vertex(200, 100, 'B');
		g.add_vertex(150, 200, 'C');
		let ab = g.add_edge('A', 'B', 1).unwrap();
		let bc = g.add_edge('B', 'C', 2).unwrap();
		let ac = g.add_edge('A', 'C', 3).unwrap();
		(g, ab, bc, ac)
	}

	#[test]
	fn duplicate_label_is_refused() {
		let mut g = Graph::new();
		assert!(g.add_vertex(0, 0, 'A'));
		assert!(!g.add_vertex(10, 10, 'A'));
		assert_eq!(g.vertex_count(), 1);
		assert_eq!(g.vertex('A').map(|v| (v.x, v.y)), Some((0, 0)));
	}

	#[test]
	fn edges_need_two_distinct_members() {
		let mut g = Graph::new();
		g.add_vertex(0, 0, 'A');
		g.add_vertex(10, 0, 'B');
		assert!(g.add_edge('A', 'A', 1).is_none());
		assert!(g.add_edge('A', 'Z', 1).is_none());
		assert!(g.add_edge('A', 'B', 1).is_some());
		assert_eq!(g.edge_count(), 1);
	}

	#[test]
	fn removing_a_vertex_drops_exactly_its_edges() {
		let (mut g, _, _, _) = triangle();
		g.add_vertex(300, 300, 'D');
		let cd = g.add_edge('C', 'D', 7).unwrap();

		let removed = g.remove_vertex('B');

		assert_eq!(removed.len(), 2);
		assert!(removed.iter().all(|e| e.touches('B')));
		assert_eq!(g.edge_count(), 2);
		assert!(g.edge(cd).is_some());
		for edge in g.edges() {
			assert!(g.contains_vertex(edge.first()));
			assert!(g.contains_vertex(edge.second()));
		}
	}

	#[test]
	fn removals_are_idempotent() {
		let (mut g, ab, _, _) = triangle();
		assert!(g.remove_edge(ab).is_some());
		assert!(g.remove_edge(ab).is_none());
		assert_eq!(g.remove_vertex('A').len(), 1);
		assert!(g.remove_vertex('A').is_empty());
		assert_eq!(g.vertex_count(), 2);
	}

	#[test]
	fn incident_edges_sort_by_weight_then_insertion() {
		let mut g = Graph::new();
		for (i, l) in ['A', 'B', 'C', 'D'].into_iter().enumerate() {
			g.add_vertex(i as i32 * 60, 0, l);
		}
		let ad = g.add_edge('A', 'D', 5).unwrap();
		let ab = g.add_edge('A', 'B', 2).unwrap();
		let ca = g.add_edge('C', 'A', 2).unwrap();

		let ids: Vec<EdgeId> = g.incident_edges('A').iter().map(|e| e.id).collect();
		assert_eq!(ids, vec![ab, ca, ad]);
	}

	#[test]
	fn parallel_edges_are_distinct() {
		let mut g = Graph::new();
		g.add_vertex(0, 0, 'A');
		g.add_vertex(10, 0, 'B');
		let first = g.add_edge('A', 'B', 3).unwrap();
		let second = g.add_edge('A', 'B', 3).unwrap();
		assert_ne!(first, second);
		assert_ne!(g.edge(first), g.edge(second));
		g.remove_edge(first);
		assert!(g.edge(second).is_some());
	}

	#[test]
	fn hit_testing_prefers_latest_vertex() {
		let mut g = Graph::new();
		g.add_vertex(100, 100, 'A');
		g.add_vertex(120, 100, 'B');
		assert_eq!(g.vertex_at(110.0, 100.0, 25.0), Some('B'));
		assert_eq!(g.vertex_at(80.0, 100.0, 25.0), Some('A'));
		assert_eq!(g.vertex_at(400.0, 400.0, 25.0), None);
	}

	#[test]
	fn hit_testing_edges_uses_segment_distance() {
		let (g, ab, _, _) = triangle();
		assert_eq!(g.edge_at(150.0, 103.0, 6.0), Some(ab));
		assert_eq!(g.edge_at(150.0, 120.0, 6.0), None);
		// Beyond the segment end the distance grows.
		assert_eq!(g.edge_at(240.0, 100.0, 6.0), None);
	}
}
