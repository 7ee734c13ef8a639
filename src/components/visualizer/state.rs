use log::{debug, info, warn};

use super::config::VisualizerConfig;
use super::error::RunError;
use super::graph::Graph;
use super::prompt::{self, Prompter};
use super::run::{AlgorithmRun, CancellationToken, Pacing};
use super::traversal::{self, Step, Visited};
use super::types::{Algorithm, EdgeId, Label, Mode, VertexColor};

pub const CHOOSE_START: &str = "Please choose a starting vertex";
pub const PLEASE_WAIT: &str = "Please wait...";

/// Menu commands the editor understands. Exit is left to the window owner.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
	New,
	Mode(Mode),
	Algorithm(Algorithm),
}

/// What a click at some canvas position landed on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickTarget {
	Vertex(Label),
	Edge(EdgeId),
	Canvas,
}

/// The graph under edit plus everything the mode machine and the running
/// algorithm need to share with the view.
pub struct Editor {
	config: VisualizerConfig,
	graph: Graph,
	mode: Mode,
	algorithm: Option<Algorithm>,
	visited: Visited,
	/// Vertices picked in EDGE mode, in click order.
	pending_edge: Vec<Label>,
	display: String,
	/// Bumped whenever transient state is wiped; older runs become inert.
	generation: u64,
	running: Option<CancellationToken>,
	/// Bumped on every refresh request; the view redraws when it changes.
	revision: u64,
}

impl Editor {
	pub fn new(config: VisualizerConfig) -> Self {
		Self {
			config,
			graph: Graph::new(),
			mode: Mode::default(),
			algorithm: None,
			visited: Visited::default(),
			pending_edge: Vec::new(),
			display: String::new(),
			generation: 0,
			running: None,
			revision: 0,
		}
	}

	pub fn config(&self) -> &VisualizerConfig {
		&self.config
	}

	pub fn graph(&self) -> &Graph {
		&self.graph
	}

	pub fn mode(&self) -> Mode {
		self.mode
	}

	pub fn visited(&self) -> &Visited {
		&self.visited
	}

	pub fn pending_edge(&self) -> &[Label] {
		&self.pending_edge
	}

	pub fn display(&self) -> &str {
		&self.display
	}

	pub fn mode_indicator(&self) -> String {
		format!("Current Mode -> {}", self.mode.label())
	}

	pub fn revision(&self) -> u64 {
		self.revision
	}

	pub fn is_running(&self) -> bool {
		self.running.is_some()
	}

	fn refresh(&mut self) {
		self.revision = self.revision.wrapping_add(1);
	}

	/// Wipes visited sets, colors, distances and any edge selection, and
	/// detaches the in-flight run.
	fn clear_transient(&mut self) {
		self.visited.clear();
		self.pending_edge.clear();
		self.graph.reset_colors();
		self.graph.reset_distances();
		self.generation += 1;
		if self.running.take().is_some() {
			warn!("Run superseded by generation {}", self.generation);
		}
		self.refresh();
	}

	pub fn execute(&mut self, command: Command) -> Option<AlgorithmRun> {
		match command {
			Command::New => {
				self.reset();
				None
			}
			Command::Mode(mode) => {
				self.set_mode(mode);
				None
			}
			Command::Algorithm(algorithm) => self.choose_algorithm(algorithm),
		}
	}

	pub fn set_mode(&mut self, mode: Mode) {
		info!("Mode -> {}", mode.label());
		self.mode = mode;
		self.clear_transient();
		if mode != Mode::None {
			self.display.clear();
		}
	}

	/// Selects an algorithm and waits for a starting vertex, except Prim which
	/// starts right away and hands back its run.
	pub fn choose_algorithm(&mut self, algorithm: Algorithm) -> Option<AlgorithmRun> {
		info!("Algorithm -> {}", algorithm.label());
		self.clear_transient();
		self.mode = Mode::None;
		self.algorithm = Some(algorithm);
		self.display = CHOOSE_START.to_string();
		if algorithm.needs_start() {
			return None;
		}
		self.start_run(algorithm, None)
	}

	/// Drops the whole graph and returns to VERTEX mode.
	pub fn reset(&mut self) {
		info!("New graph");
		self.graph.clear();
		self.clear_transient();
		self.mode = Mode::Vertex;
		self.algorithm = None;
		self.display.clear();
	}

	pub fn hit(&self, x: f64, y: f64) -> ClickTarget {
		if let Some(label) = self.graph.vertex_at(x, y, self.config.vertex_radius()) {
			return ClickTarget::Vertex(label);
		}
		if let Some(id) = self.graph.edge_at(x, y, self.config.edge_hit_tolerance) {
			return ClickTarget::Edge(id);
		}
		ClickTarget::Canvas
	}

	/// Routes a click in canvas coordinates. Returns a run when the click
	/// started an algorithm.
	pub fn click(&mut self, x: f64, y: f64, prompter: &mut dyn Prompter) -> Option<AlgorithmRun> {
		match self.hit(x, y) {
			ClickTarget::Vertex(label) => self.vertex_click(label, prompter),
			ClickTarget::Edge(id) => {
				self.edge_click(id);
				None
			}
			ClickTarget::Canvas => {
				self.canvas_click(x.round() as i32, y.round() as i32, prompter);
				None
			}
		}
	}

	pub fn canvas_click(&mut self, x: i32, y: i32, prompter: &mut dyn Prompter) {
		if self.mode != Mode::Vertex {
			return;
		}
		let graph = &self.graph;
		let Some(label) = prompt::ask_label(prompter, |l| graph.contains_vertex(l)) else {
			return;
		};
		if self.graph.add_vertex(x, y, label) {
			info!("Added vertex {} at ({}, {})", label, x, y);
			self.refresh();
		}
	}

	pub fn vertex_click(&mut self, label: Label, prompter: &mut dyn Prompter) -> Option<AlgorithmRun> {
		match self.mode {
			Mode::Edge => {
				self.toggle_edge_endpoint(label, prompter);
				None
			}
			Mode::RemoveVertex => {
				let removed = self.graph.remove_vertex(label);
				self.pending_edge.retain(|l| *l != label);
				info!("Removed vertex {} and {} edge(s)", label, removed.len());
				self.refresh();
				None
			}
			Mode::None => {
				let algorithm = self.algorithm.filter(|a| a.needs_start())?;
				if self.is_running() {
					debug!("Ignoring {} while a run is active", label);
					return None;
				}
				self.clear_transient();
				self.display = PLEASE_WAIT.to_string();
				self.start_run(algorithm, Some(label))
			}
			Mode::Vertex | Mode::RemoveEdge => None,
		}
	}

	fn toggle_edge_endpoint(&mut self, label: Label, prompter: &mut dyn Prompter) {
		if let Some(pos) = self.pending_edge.iter().position(|l| *l == label) {
			self.pending_edge.remove(pos);
			self.paint(label, VertexColor::Default);
			return;
		}
		self.pending_edge.push(label);
		self.paint(label, VertexColor::Selected);
		if self.pending_edge.len() != 2 {
			return;
		}
		// Cancelling keeps both endpoints selected.
		let Some(weight) = prompt::ask_weight(prompter) else {
			return;
		};
		let (v1, v2) = (self.pending_edge[0], self.pending_edge[1]);
		if let Some(id) = self.graph.add_edge(v1, v2, weight) {
			info!("Added edge {:?} {}-{}:{}", id, v1, v2, weight);
		}
		for l in std::mem::take(&mut self.pending_edge) {
			self.paint(l, VertexColor::Default);
		}
	}

	fn paint(&mut self, label: Label, color: VertexColor) {
		if let Some(vertex) = self.graph.vertex_mut(label) {
			vertex.color = color;
		}
		self.refresh();
	}

	pub fn edge_click(&mut self, id: EdgeId) {
		if self.mode != Mode::RemoveEdge {
			return;
		}
		if let Some(edge) = self.graph.remove_edge(id) {
			info!("Removed edge {}", edge);
			self.refresh();
		}
	}

	fn start_run(&mut self, algorithm: Algorithm, start: Option<Label>) -> Option<AlgorithmRun> {
		let traversal = traversal::traversal_for(algorithm, start)?;
		let pacing = Pacing {
			step: self.config.step_pause,
			settle: self.config.settle,
		};
		let run = AlgorithmRun::new(self.generation, traversal, pacing);
		self.running = Some(run.token().clone());
		info!("Starting {} (generation {})", algorithm.label(), self.generation);
		Some(run)
	}

	/// Asks the in-flight run, if any, to stop at its next step.
	pub fn cancel_run(&mut self) {
		if let Some(token) = &self.running {
			token.cancel();
		}
	}

	/// Applies the next step of `run` to the graph.
	///
	/// A run from an older generation is refused without touching anything. A
	/// cancelled run is refused too, but the display still shows what it
	/// visited so far.
	pub fn advance_run(&mut self, run: &mut AlgorithmRun) -> Result<Step, RunError> {
		if run.generation() != self.generation {
			return Err(RunError::Superseded {
				run: run.generation(),
				current: self.generation,
			});
		}
		if run.token().is_cancelled() {
			warn!("{} cancelled", run.algorithm().label());
			self.finish_run(run.algorithm());
			return Err(RunError::Cancelled(run.generation()));
		}
		let step = run.traversal_mut().advance(&mut self.graph, &mut self.visited);
		self.refresh();
		match step {
			Step::Pause | Step::Settle => debug!(
				"{} {:?}: {} vertices, {} edges visited",
				run.algorithm().label(),
				step,
				self.visited.vertices().len(),
				self.visited.edges().len()
			),
			Step::Done => self.finish_run(run.algorithm()),
		}
		Ok(step)
	}

	fn finish_run(&mut self, algorithm: Algorithm) {
		self.display = traversal::format_result(algorithm, &self.graph, &self.visited);
		self.running = None;
		self.refresh();
		info!("{} finished: {:?}", algorithm.label(), self.display);
	}
}

impl Default for Editor {
	fn default() -> Self {
		Self::new(VisualizerConfig::default())
	}
}
