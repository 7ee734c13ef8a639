use std::time::Duration;

use super::types::{EdgeColor, VertexColor};

#[derive(Clone, Debug)]
pub struct Palette {
	pub background: &'static str,
	pub text: &'static str,
	pub vertex_default: &'static str,
	pub vertex_selected: &'static str,
	pub vertex_root: &'static str,
	pub vertex_label: &'static str,
	pub edge_default: &'static str,
	pub edge_selected: &'static str,
	pub weight: &'static str,
}

impl Default for Palette {
	fn default() -> Self {
		Self {
			background: "black",
			text: "white",
			vertex_default: "white",
			vertex_selected: "yellow",
			vertex_root: "red",
			vertex_label: "black",
			edge_default: "white",
			edge_selected: "yellow",
			weight: "yellow",
		}
	}
}

impl Palette {
	pub fn vertex(&self, color: VertexColor) -> &'static str {
		match color {
			VertexColor::Default => self.vertex_default,
			VertexColor::Selected => self.vertex_selected,
			VertexColor::Root => self.vertex_root,
		}
	}

	pub fn edge(&self, color: EdgeColor) -> &'static str {
		match color {
			EdgeColor::Default => self.edge_default,
			EdgeColor::Selected => self.edge_selected,
		}
	}
}

/// Geometry, pacing and colors of the visualizer.
#[derive(Clone, Debug)]
pub struct VisualizerConfig {
	pub width: f64,
	pub height: f64,
	pub menu_height: f64,
	pub vertex_diameter: f64,
	pub edge_width: f64,
	pub edge_hit_tolerance: f64,
	pub weight_font: &'static str,
	pub label_font: &'static str,
	/// Pause between two visual steps of a traversal.
	pub step_pause: Duration,
	/// Extra wait after Prim's last step, before the result is shown.
	pub settle: Duration,
	pub palette: Palette,
}

impl Default for VisualizerConfig {
	fn default() -> Self {
		Self {
			width: 800.0,
			height: 600.0,
			menu_height: 28.0,
			vertex_diameter: 50.0,
			edge_width: 4.0,
			edge_hit_tolerance: 6.0,
			weight_font: "bold 22px sans-serif",
			label_font: "14px sans-serif",
			step_pause: Duration::from_millis(200),
			settle: Duration::from_millis(500),
			palette: Palette::default(),
		}
	}
}

impl VisualizerConfig {
	pub fn canvas_height(&self) -> f64 {
		self.height - self.menu_height
	}

	pub fn vertex_radius(&self) -> f64 {
		self.vertex_diameter / 2.0
	}
}
