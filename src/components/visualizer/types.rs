use std::fmt;

/// A vertex identifier. Exactly one character, unique within a graph.
pub type Label = char;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum VertexColor {
	#[default]
	Default,
	Selected,
	Root,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EdgeColor {
	#[default]
	Default,
	Selected,
}

#[derive(Clone, Debug)]
pub struct Vertex {
	pub label: Label,
	pub x: i32,
	pub y: i32,
	pub color: VertexColor,
	/// Tentative Dijkstra distance; `None` means unreachable.
	pub distance: Option<i64>,
}

impl Vertex {
	pub fn new(x: i32, y: i32, label: Label) -> Self {
		Self {
			label,
			x,
			y,
			color: VertexColor::Default,
			distance: None,
		}
	}

	pub fn set_default(&mut self) {
		self.color = VertexColor::Default;
	}

	pub fn set_selected(&mut self) {
		self.color = VertexColor::Selected;
	}

	pub fn set_root(&mut self) {
		self.color = VertexColor::Root;
	}
}

impl PartialEq for Vertex {
	fn eq(&self, other: &Self) -> bool {
		self.label == other.label
	}
}

impl Eq for Vertex {}

impl std::hash::Hash for Vertex {
	fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
		self.label.hash(state);
	}
}

/// Identity of an edge. Two edges joining the same pair with the same weight
/// are still distinct.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId(pub u64);

#[derive(Clone, Debug)]
pub struct WeightedEdge {
	pub id: EdgeId,
	/// Endpoints in click order.
	pub endpoints: (Label, Label),
	pub weight: i32,
	pub color: EdgeColor,
}

impl WeightedEdge {
	pub fn first(&self) -> Label {
		self.endpoints.0
	}

	pub fn second(&self) -> Label {
		self.endpoints.1
	}

	pub fn touches(&self, label: Label) -> bool {
		self.endpoints.0 == label || self.endpoints.1 == label
	}

	/// The endpoint across from `label`, if `label` is an endpoint at all.
	pub fn opposite(&self, label: Label) -> Option<Label> {
		match self.endpoints {
			(a, b) if a == label => Some(b),
			(a, b) if b == label => Some(a),
			_ => None,
		}
	}

	pub fn set_default(&mut self) {
		self.color = EdgeColor::Default;
	}

	pub fn set_selected(&mut self) {
		self.color = EdgeColor::Selected;
	}
}

impl PartialEq for WeightedEdge {
	fn eq(&self, other: &Self) -> bool {
		self.id == other.id
	}
}

impl Eq for WeightedEdge {}

impl fmt::Display for WeightedEdge {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}-{}:{}", self.endpoints.0, self.endpoints.1, self.weight)
	}
}

/// Editing intent that decides what a click on the canvas does.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
	#[default]
	Vertex,
	Edge,
	RemoveVertex,
	RemoveEdge,
	None,
}

impl Mode {
	pub const ALL: [Mode; 5] = [
		Mode::Vertex,
		Mode::Edge,
		Mode::RemoveVertex,
		Mode::RemoveEdge,
		Mode::None,
	];

	pub fn label(self) -> &'static str {
		match self {
			Mode::Vertex => "Add a Vertex",
			Mode::Edge => "Add an Edge",
			Mode::RemoveVertex => "Remove a Vertex",
			Mode::RemoveEdge => "Remove an Edge",
			Mode::None => "None",
		}
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Algorithm {
	Dfs,
	Bfs,
	Dijkstra,
	Prim,
}

impl Algorithm {
	pub const ALL: [Algorithm; 4] = [
		Algorithm::Dfs,
		Algorithm::Bfs,
		Algorithm::Dijkstra,
		Algorithm::Prim,
	];

	pub fn label(self) -> &'static str {
		match self {
			Algorithm::Dfs => "Depth-First Search",
			Algorithm::Bfs => "Breadth-First Search",
			Algorithm::Dijkstra => "Dijkstra's Algorithm",
			Algorithm::Prim => "Prim's Algorithm",
		}
	}

	/// Prim runs over the whole edge set and never waits for a starting vertex.
	pub fn needs_start(self) -> bool {
		!matches!(self, Algorithm::Prim)
	}
}
