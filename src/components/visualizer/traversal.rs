//! The four animated traversals, written as resumable step machines.
//!
//! Each call to [`Traversal::advance`] applies the mutations of one visual step
//! (colors, visited sets, distances) and returns how long the caller should
//! wait before the next call. The caller owns the clock, which keeps the
//! traversals free of timers and lets tests drive them synchronously.

use std::collections::{HashMap, HashSet, VecDeque};

use super::graph::Graph;
use super::types::{Algorithm, EdgeId, Label, VertexColor};

/// What the caller should do after a call to [`Traversal::advance`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
	/// A visual step happened; wait the per-step pause.
	Pause,
	/// All steps happened; wait the settle interval before showing the result.
	Settle,
	/// Nothing left to do; the result can be shown.
	Done,
}

/// Insertion-ordered record of what the current traversal touched.
#[derive(Clone, Debug, Default)]
pub struct Visited {
	vertices: Vec<Label>,
	vertex_set: HashSet<Label>,
	edges: Vec<EdgeId>,
	edge_set: HashSet<EdgeId>,
}

impl Visited {
	pub fn vertices(&self) -> &[Label] {
		&self.vertices
	}

	pub fn edges(&self) -> &[EdgeId] {
		&self.edges
	}

	pub fn has_vertex(&self, label: Label) -> bool {
		self.vertex_set.contains(&label)
	}

	pub fn has_edge(&self, id: EdgeId) -> bool {
		self.edge_set.contains(&id)
	}

	/// Appends `label` unless already present. Returns whether it was new.
	pub fn visit_vertex(&mut self, label: Label) -> bool {
		let fresh = self.vertex_set.insert(label);
		if fresh {
			self.vertices.push(label);
		}
		fresh
	}

	pub fn visit_edge(&mut self, id: EdgeId) -> bool {
		let fresh = self.edge_set.insert(id);
		if fresh {
			self.edges.push(id);
		}
		fresh
	}

	pub fn is_empty(&self) -> bool {
		self.vertices.is_empty() && self.edges.is_empty()
	}

	pub fn clear(&mut self) {
		self.vertices.clear();
		self.vertex_set.clear();
		self.edges.clear();
		self.edge_set.clear();
	}
}

pub trait Traversal {
	fn algorithm(&self) -> Algorithm;

	/// Runs until the next visual step (or the end) and reports what to wait for.
	fn advance(&mut self, graph: &mut Graph, visited: &mut Visited) -> Step;
}

/// Builds the traversal for `algorithm`. Every algorithm except Prim needs a
/// starting vertex and yields `None` without one.
pub fn traversal_for(algorithm: Algorithm, start: Option<Label>) -> Option<Box<dyn Traversal>> {
	Some(match (algorithm, start) {
		(Algorithm::Dfs, Some(start)) => Box::new(DepthFirst::new(start)),
		(Algorithm::Bfs, Some(start)) => Box::new(BreadthFirst::new(start)),
		(Algorithm::Dijkstra, Some(start)) => Box::new(Dijkstra::new(start)),
		(Algorithm::Prim, _) => Box::new(Prim::default()),
		_ => return None,
	})
}

fn paint_vertex(graph: &mut Graph, label: Label, color: VertexColor) {
	if let Some(vertex) = graph.vertex_mut(label) {
		vertex.color = color;
	}
}

fn select_vertex(graph: &mut Graph, visited: &mut Visited, label: Label) {
	paint_vertex(graph, label, VertexColor::Selected);
	visited.visit_vertex(label);
}

fn select_edge(graph: &mut Graph, visited: &mut Visited, id: EdgeId) {
	if let Some(edge) = graph.edge_mut(id) {
		edge.set_selected();
	}
	visited.visit_edge(id);
}

fn incident_ids(graph: &Graph, label: Label) -> Vec<EdgeId> {
	graph.incident_edges(label).iter().map(|e| e.id).collect()
}

/// A vertex whose incident edges are being walked.
#[derive(Debug)]
struct Cursor {
	label: Label,
	edges: Vec<EdgeId>,
	next: usize,
}

impl Cursor {
	fn new(graph: &Graph, label: Label) -> Self {
		Self {
			label,
			edges: incident_ids(graph, label),
			next: 0,
		}
	}

	fn next_edge(&mut self) -> Option<EdgeId> {
		let id = self.edges.get(self.next).copied()?;
		self.next += 1;
		Some(id)
	}
}

/// Depth-first descent.
///
/// Taking an unvisited edge selects the edge's first endpoint and descends
/// into its second one, whichever side the walk came from. An edge that is
/// already visited marks its second endpoint without descending.
#[derive(Debug)]
pub struct DepthFirst {
	descend: Option<Label>,
	stack: Vec<Cursor>,
}

impl DepthFirst {
	pub fn new(start: Label) -> Self {
		Self {
			descend: Some(start),
			stack: Vec::new(),
		}
	}
}

impl Traversal for DepthFirst {
	fn algorithm(&self) -> Algorithm {
		Algorithm::Dfs
	}

	fn advance(&mut self, graph: &mut Graph, visited: &mut Visited) -> Step {
		loop {
			if let Some(label) = self.descend.take() {
				// A vertex is only expanded while something is left to visit.
				if visited.vertices().len() != graph.vertex_count() {
					self.stack.push(Cursor::new(graph, label));
				}
				continue;
			}
			let Some(cursor) = self.stack.last_mut() else {
				return Step::Done;
			};
			let Some(id) = cursor.next_edge() else {
				self.stack.pop();
				continue;
			};
			let Some((first, second)) = graph.edge(id).map(|e| e.endpoints) else {
				continue;
			};
			if visited.has_edge(id) {
				select_vertex(graph, visited, second);
				continue;
			}
			select_vertex(graph, visited, first);
			select_edge(graph, visited, id);
			self.descend = Some(second);
			return Step::Pause;
		}
	}
}

/// Breadth-first walk with a FIFO queue.
#[derive(Debug)]
pub struct BreadthFirst {
	start: Option<Label>,
	queue: VecDeque<Label>,
	current: Option<Cursor>,
}

impl BreadthFirst {
	pub fn new(start: Label) -> Self {
		Self {
			start: Some(start),
			queue: VecDeque::new(),
			current: None,
		}
	}
}

impl Traversal for BreadthFirst {
	fn algorithm(&self) -> Algorithm {
		Algorithm::Bfs
	}

	fn advance(&mut self, graph: &mut Graph, visited: &mut Visited) -> Step {
		if let Some(start) = self.start.take() {
			paint_vertex(graph, start, VertexColor::Selected);
			self.queue.push_back(start);
			return Step::Pause;
		}
		loop {
			if self.current.is_none() {
				let Some(label) = self.queue.pop_front() else {
					return Step::Done;
				};
				visited.visit_vertex(label);
				self.current = Some(Cursor::new(graph, label));
			}
			let Some(cursor) = self.current.as_mut() else {
				continue;
			};
			let Some(id) = cursor.next_edge() else {
				self.current = None;
				continue;
			};
			if visited.has_edge(id) {
				continue;
			}
			let Some(other) = graph.edge(id).and_then(|e| e.opposite(cursor.label)) else {
				continue;
			};
			self.queue.push_back(other);
			select_edge(graph, visited, id);
			paint_vertex(graph, other, VertexColor::Selected);
			return Step::Pause;
		}
	}
}

/// FIFO relaxation from a root vertex.
///
/// Vertices may be queued more than once; every edge is relaxed exactly once,
/// from whichever endpoint reaches it first.
#[derive(Debug)]
pub struct Dijkstra {
	start: Option<Label>,
	queue: VecDeque<Label>,
	current: Option<Cursor>,
}

impl Dijkstra {
	pub fn new(start: Label) -> Self {
		Self {
			start: Some(start),
			queue: VecDeque::new(),
			current: None,
		}
	}
}

impl Traversal for Dijkstra {
	fn algorithm(&self) -> Algorithm {
		Algorithm::Dijkstra
	}

	fn advance(&mut self, graph: &mut Graph, visited: &mut Visited) -> Step {
		if let Some(start) = self.start.take() {
			if let Some(root) = graph.vertex_mut(start) {
				root.set_root();
				root.distance = Some(0);
			}
			self.queue.push_back(start);
			return Step::Pause;
		}
		loop {
			if self.current.is_none() {
				let Some(label) = self.queue.pop_front() else {
					return Step::Done;
				};
				visited.visit_vertex(label);
				self.current = Some(Cursor::new(graph, label));
			}
			let Some(cursor) = self.current.as_mut() else {
				continue;
			};
			let Some(id) = cursor.next_edge() else {
				self.current = None;
				continue;
			};
			if visited.has_edge(id) {
				continue;
			}
			let Some((other, weight)) = graph
				.edge(id)
				.and_then(|e| e.opposite(cursor.label).map(|other| (other, e.weight)))
			else {
				continue;
			};
			let base = graph.vertex(cursor.label).and_then(|v| v.distance);
			if let (Some(base), Some(next)) = (base, graph.vertex_mut(other)) {
				let candidate = base.saturating_add(i64::from(weight));
				if next.distance.is_none_or(|d| candidate < d) {
					next.distance = Some(candidate);
				}
				if next.color != VertexColor::Root {
					next.set_selected();
				}
			}
			self.queue.push_back(other);
			select_edge(graph, visited, id);
			return Step::Pause;
		}
	}
}

/// Disjoint sets over vertex labels.
#[derive(Debug, Default)]
struct Components {
	parent: HashMap<Label, Label>,
}

impl Components {
	fn find(&self, label: Label) -> Label {
		let mut root = label;
		while let Some(&parent) = self.parent.get(&root) {
			root = parent;
		}
		root
	}

	/// Joins the sets of `a` and `b`. Returns `false` if they were already one.
	fn union(&mut self, a: Label, b: Label) -> bool {
		let (ra, rb) = (self.find(a), self.find(b));
		if ra == rb {
			return false;
		}
		self.parent.insert(ra, rb);
		true
	}
}

/// Spanning tree by edge weight: edges are taken lightest first whenever they
/// join two parts of the graph not yet connected by taken edges.
#[derive(Debug, Default)]
pub struct Prim {
	order: Option<Vec<EdgeId>>,
	next: usize,
	components: Components,
	settled: bool,
}

impl Traversal for Prim {
	fn algorithm(&self) -> Algorithm {
		Algorithm::Prim
	}

	fn advance(&mut self, graph: &mut Graph, visited: &mut Visited) -> Step {
		let order = self
			.order
			.get_or_insert_with(|| graph.edges_by_weight().iter().map(|e| e.id).collect());
		while let Some(&id) = order.get(self.next) {
			self.next += 1;
			let Some((a, b)) = graph.edge(id).map(|e| e.endpoints) else {
				continue;
			};
			if !self.components.union(a, b) {
				continue;
			}
			select_edge(graph, visited, id);
			select_vertex(graph, visited, a);
			select_vertex(graph, visited, b);
			return Step::Pause;
		}
		if self.settled {
			return Step::Done;
		}
		self.settled = true;
		Step::Settle
	}
}

/// The text shown once a run of `algorithm` ends. Empty when nothing was visited.
pub fn format_result(algorithm: Algorithm, graph: &Graph, visited: &Visited) -> String {
	match algorithm {
		Algorithm::Dfs => format_path("DFS", visited),
		Algorithm::Bfs => format_path("BFS", visited),
		Algorithm::Dijkstra => visited
			.vertices()
			.iter()
			.filter_map(|&label| {
				let distance = graph.vertex(label)?.distance?;
				(distance > 0).then(|| format!("{label}={distance}"))
			})
			.collect::<Vec<_>>()
			.join(", "),
		Algorithm::Prim => visited
			.edges()
			.iter()
			.filter_map(|&id| graph.edge(id))
			.map(|e| format!("{}={}", e.second(), e.first()))
			.collect::<Vec<_>>()
			.join(", "),
	}
}

fn format_path(prefix: &str, visited: &Visited) -> String {
	if visited.vertices().is_empty() {
		return String::new();
	}
	let path: Vec<String> = visited.vertices().iter().map(|l| l.to_string()).collect();
	format!("{prefix} : {}", path.join(" -> "))
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::visualizer::types::EdgeColor;

	fn graph(vertices: &[Label], edges: &[(Label, Label, i32)]) -> (Graph, Vec<EdgeId>) {
		let mut g = Graph::new();
		for (i, &label) in vertices.iter().enumerate() {
			g.add_vertex(100 + 80 * i as i32, 100, label);
		}
		let ids = edges
			.iter()
			.map(|&(a, b, w)| g.add_edge(a, b, w).unwrap())
			.collect();
		(g, ids)
	}

	fn drain(traversal: &mut dyn Traversal, g: &mut Graph, visited: &mut Visited) -> Vec<Step> {
		let mut steps = Vec::new();
		loop {
			let step = traversal.advance(g, visited);
			steps.push(step);
			if step == Step::Done {
				return steps;
			}
			assert!(steps.len() < 1000, "traversal does not terminate");
		}
	}

	fn run(algorithm: Algorithm, start: Option<Label>, g: &mut Graph) -> (Visited, Vec<Step>) {
		let mut traversal = traversal_for(algorithm, start).unwrap();
		let mut visited = Visited::default();
		let steps = drain(traversal.as_mut(), g, &mut visited);
		(visited, steps)
	}

	#[test]
	fn visited_behaves_as_ordered_set() {
		let mut v = Visited::default();
		assert!(v.visit_vertex('B'));
		assert!(v.visit_vertex('A'));
		assert!(!v.visit_vertex('B'));
		assert_eq!(v.vertices(), &['B', 'A']);
		v.clear();
		assert!(v.is_empty());
		assert!(!v.has_vertex('B'));
	}

	#[test]
	fn bfs_on_triangle() {
		let (mut g, _) = graph(&['A', 'B', 'C'], &[('A', 'B', 1), ('B', 'C', 2), ('A', 'C', 3)]);
		let (visited, steps) = run(Algorithm::Bfs, Some('A'), &mut g);

		assert_eq!(visited.vertices(), &['A', 'B', 'C']);
		assert_eq!(format_result(Algorithm::Bfs, &g, &visited), "BFS : A -> B -> C");
		// Root highlight plus one pause per discovered edge.
		assert_eq!(steps.iter().filter(|s| **s == Step::Pause).count(), 4);
		assert!(g.edges().all(|e| e.color == EdgeColor::Selected));
		assert!(g.vertices().all(|v| v.color == VertexColor::Selected));
	}

	#[test]
	fn dfs_on_path() {
		let (mut g, _) = graph(
			&['A', 'B', 'C', 'D'],
			&[('A', 'B', 1), ('B', 'C', 1), ('C', 'D', 1)],
		);
		let (visited, steps) = run(Algorithm::Dfs, Some('A'), &mut g);

		assert_eq!(visited.vertices(), &['A', 'B', 'C', 'D']);
		assert_eq!(format_result(Algorithm::Dfs, &g, &visited), "DFS : A -> B -> C -> D");
		assert_eq!(steps, vec![Step::Pause, Step::Pause, Step::Pause, Step::Done]);
	}

	#[test]
	fn dfs_marks_second_endpoint_of_visited_edges() {
		let (mut g, ids) = graph(&['A', 'B', 'C'], &[('A', 'B', 1), ('B', 'C', 2), ('A', 'C', 3)]);
		let (visited, _) = run(Algorithm::Dfs, Some('A'), &mut g);

		assert_eq!(visited.vertices(), &['A', 'B', 'C']);
		assert_eq!(visited.edges(), ids.as_slice());
	}

	#[test]
	fn dfs_follows_stored_endpoint_order() {
		// The edge is stored B-A, so starting at A selects B first and then
		// descends into A.
		let (mut g, _) = graph(&['A', 'B', 'C'], &[('B', 'A', 1), ('A', 'C', 2)]);
		let (visited, _) = run(Algorithm::Dfs, Some('A'), &mut g);

		assert_eq!(visited.vertices(), &['B', 'A', 'C']);
	}

	#[test]
	fn dijkstra_relaxes_through_cheaper_path() {
		let (mut g, _) = graph(&['A', 'B', 'C'], &[('A', 'B', 1), ('A', 'C', 5), ('B', 'C', 2)]);
		let (visited, _) = run(Algorithm::Dijkstra, Some('A'), &mut g);

		assert_eq!(g.vertex('B').and_then(|v| v.distance), Some(1));
		assert_eq!(g.vertex('C').and_then(|v| v.distance), Some(3));
		assert_eq!(format_result(Algorithm::Dijkstra, &g, &visited), "B=1, C=3");
		assert_eq!(g.vertex('A').map(|v| v.color), Some(VertexColor::Root));
		assert_eq!(g.vertex('C').map(|v| v.color), Some(VertexColor::Selected));
	}

	#[test]
	fn dijkstra_leaves_other_components_unreachable() {
		let (mut g, _) = graph(&['A', 'B', 'C', 'D'], &[('A', 'B', 4), ('C', 'D', 1)]);
		let (visited, _) = run(Algorithm::Dijkstra, Some('A'), &mut g);

		assert_eq!(visited.vertices(), &['A', 'B']);
		assert_eq!(g.vertex('C').and_then(|v| v.distance), None);
		assert_eq!(format_result(Algorithm::Dijkstra, &g, &visited), "B=4");
	}

	#[test]
	fn prim_on_k4() {
		let (mut g, ids) = graph(
			&['A', 'B', 'C', 'D'],
			&[
				('A', 'B', 1),
				('C', 'D', 2),
				('A', 'C', 3),
				('B', 'D', 4),
				('A', 'D', 10),
				('B', 'C', 10),
			],
		);
		let (visited, steps) = run(Algorithm::Prim, None, &mut g);

		assert_eq!(visited.edges(), &ids[..3]);
		let total: i32 = visited
			.edges()
			.iter()
			.filter_map(|id| g.edge(*id))
			.map(|e| e.weight)
			.sum();
		assert_eq!(total, 6);
		assert_eq!(format_result(Algorithm::Prim, &g, &visited), "B=A, D=C, C=A");
		assert_eq!(steps[steps.len() - 2..], [Step::Settle, Step::Done]);
	}

	#[test]
	fn prim_is_deterministic_for_equal_weights() {
		let edges = [('A', 'B', 1), ('B', 'C', 1), ('A', 'C', 1)];
		let (mut first, _) = graph(&['A', 'B', 'C'], &edges);
		let (mut second, _) = graph(&['A', 'B', 'C'], &edges);

		let (a, _) = run(Algorithm::Prim, None, &mut first);
		let (b, _) = run(Algorithm::Prim, None, &mut second);

		assert_eq!(a.edges(), b.edges());
		assert_eq!(format_result(Algorithm::Prim, &first, &a), "B=A, C=B");
	}

	#[test]
	fn repeated_runs_visit_in_the_same_order() {
		let edges = [('A', 'B', 2), ('A', 'C', 2), ('C', 'D', 1), ('B', 'D', 3)];
		for algorithm in [Algorithm::Dfs, Algorithm::Bfs, Algorithm::Dijkstra] {
			let (mut g, _) = graph(&['A', 'B', 'C', 'D'], &edges);
			let (first, _) = run(algorithm, Some('A'), &mut g);
			g.reset_colors();
			g.reset_distances();
			let (second, _) = run(algorithm, Some('A'), &mut g);
			assert_eq!(first.vertices(), second.vertices(), "{algorithm:?}");
		}
	}

	#[test]
	fn isolated_vertex_finishes_immediately() {
		let (mut g, _) = graph(&['A'], &[]);

		let (dfs, steps) = run(Algorithm::Dfs, Some('A'), &mut g);
		assert_eq!(steps, vec![Step::Done]);
		assert_eq!(format_result(Algorithm::Dfs, &g, &dfs), "");

		let (bfs, _) = run(Algorithm::Bfs, Some('A'), &mut g);
		assert_eq!(format_result(Algorithm::Bfs, &g, &bfs), "BFS : A");

		let (dijkstra, _) = run(Algorithm::Dijkstra, Some('A'), &mut g);
		assert_eq!(format_result(Algorithm::Dijkstra, &g, &dijkstra), "");
	}

	#[test]
	fn prim_on_empty_graph_only_settles() {
		let mut g = Graph::new();
		let (visited, steps) = run(Algorithm::Prim, None, &mut g);
		assert_eq!(steps, vec![Step::Settle, Step::Done]);
		assert_eq!(format_result(Algorithm::Prim, &g, &visited), "");
	}

	#[test]
	fn start_vertex_is_required_except_for_prim() {
		assert!(traversal_for(Algorithm::Dfs, None).is_none());
		assert!(traversal_for(Algorithm::Dijkstra, None).is_none());
		assert!(traversal_for(Algorithm::Prim, None).is_some());
	}
}
