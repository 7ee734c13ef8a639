use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::state::Editor;

pub fn render(editor: &Editor, ctx: &CanvasRenderingContext2d) {
	let config = editor.config();
	let (width, height) = (config.width, config.canvas_height());
	ctx.set_fill_style_str(config.palette.background);
	ctx.fill_rect(0.0, 0.0, width, height);
	draw_edges(editor, ctx);
	draw_vertices(editor, ctx);
	draw_labels(editor, ctx);
}

fn draw_edges(editor: &Editor, ctx: &CanvasRenderingContext2d) {
	let (graph, config) = (editor.graph(), editor.config());
	ctx.set_line_width(config.edge_width);

	for edge in graph.edges() {
		let (Some(a), Some(b)) = (graph.vertex(edge.first()), graph.vertex(edge.second())) else {
			continue;
		};
		let (x1, y1, x2, y2) = (a.x as f64, a.y as f64, b.x as f64, b.y as f64);

		ctx.set_stroke_style_str(config.palette.edge(edge.color));
		ctx.begin_path();
		ctx.move_to(x1, y1);
		ctx.line_to(x2, y2);
		ctx.stroke();

		ctx.set_fill_style_str(config.palette.weight);
		ctx.set_font(config.weight_font);
		ctx.set_text_align("left");
		ctx.set_text_baseline("top");
		let (mx, my) = ((x1 + x2) / 2.0 + 3.0, (y1 + y2) / 2.0 + 3.0);
		let _ = ctx.fill_text(&edge.weight.to_string(), mx, my);
	}
}

fn draw_vertices(editor: &Editor, ctx: &CanvasRenderingContext2d) {
	let config = editor.config();
	let radius = config.vertex_radius();

	for vertex in editor.graph().vertices() {
		let (x, y) = (vertex.x as f64, vertex.y as f64);
		ctx.begin_path();
		let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(config.palette.vertex(vertex.color));
		ctx.fill();

		ctx.set_fill_style_str(config.palette.vertex_label);
		ctx.set_font(config.label_font);
		ctx.set_text_align("center");
		ctx.set_text_baseline("middle");
		let _ = ctx.fill_text(&vertex.label.to_string(), x, y);
	}
}

/// Mode indicator in the top-right corner, display line near the bottom.
fn draw_labels(editor: &Editor, ctx: &CanvasRenderingContext2d) {
	let config = editor.config();
	ctx.set_fill_style_str(config.palette.text);
	ctx.set_font(config.label_font);
	ctx.set_text_baseline("middle");

	ctx.set_text_align("right");
	let _ = ctx.fill_text(&editor.mode_indicator(), config.width - 20.0, 15.0);

	if !editor.display().is_empty() {
		ctx.set_text_align("center");
		let _ = ctx.fill_text(
			editor.display(),
			config.width / 2.0,
			config.height - 100.0 - config.menu_height + 15.0,
		);
	}
}
