//! Canvas rendering for the map editor.
//!
//! Drawing happens in passes for correct z-ordering: background, grid,
//! edges (with control handles for an edge being edited), the planned path
//! highlight, then vertices and labels on top. Anything the visibility
//! predicates place outside the map window is culled before a draw call is
//! issued.

use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::controls::{ActiveEditor, Controls};
use super::geometry::{self, Position};
use super::graph::Graph;
use super::map_window::MapWindow;
use super::theme::Theme;

/// Renders the complete editor scene to the canvas.
pub fn render(
	graph: &Graph,
	window: &MapWindow,
	controls: &Controls,
	ctx: &CanvasRenderingContext2d,
	theme: &Theme,
) {
	draw_background(ctx, window, theme);
	draw_grid(ctx, window, theme);
	draw_edges(graph, window, ctx, theme);
	draw_path(graph, window, controls, ctx, theme);
	draw_vertices(graph, window, ctx, theme);
}

fn draw_background(ctx: &CanvasRenderingContext2d, window: &MapWindow, theme: &Theme) {
	ctx.set_fill_style_str(&theme.background.to_css());
	ctx.fill_rect(0.0, 0.0, window.surface_width(), window.surface_height());
}

fn draw_grid(ctx: &CanvasRenderingContext2d, window: &MapWindow, theme: &Theme) {
	let block_size = theme.grid.block_size;
	let x_values = geometry::grid_line_values(window.min_x, window.max_x, block_size);
	let y_values = geometry::grid_line_values(window.min_y, window.max_y, block_size);

	ctx.set_stroke_style_str(&theme.grid.color.to_css());
	ctx.set_line_width(theme.grid.width);

	for value in x_values {
		let x = geometry::world_to_viewport(Position::new(value, 0.0), window).x;
		draw_line(
			ctx,
			Position::new(x, 0.0),
			Position::new(x, window.surface_height()),
		);
	}
	for value in y_values {
		let y = geometry::world_to_viewport(Position::new(0.0, value), window).y;
		draw_line(
			ctx,
			Position::new(0.0, y),
			Position::new(window.surface_width(), y),
		);
	}
}

fn draw_edges(graph: &Graph, window: &MapWindow, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	for edge in graph.edges() {
		let (Some(from), Some(to)) = (graph.vertex(edge.from_vertex), graph.vertex(edge.to_vertex))
		else {
			continue;
		};
		if !geometry::is_edge_visible(from.position, to.position, window) {
			continue;
		}

		let from_position = geometry::world_to_viewport(from.position, window);
		let to_position = geometry::world_to_viewport(to.position, window);
		let control_one = geometry::world_to_viewport(edge.control_point_one, window);
		let control_two = geometry::world_to_viewport(edge.control_point_two, window);

		ctx.set_stroke_style_str(&theme.edge.color.to_css());
		ctx.set_line_width(theme.edge.width);
		ctx.begin_path();
		ctx.move_to(from_position.x, from_position.y);
		ctx.bezier_curve_to(
			control_one.x,
			control_one.y,
			control_two.x,
			control_two.y,
			to_position.x,
			to_position.y,
		);
		ctx.stroke();

		if edge.is_being_edited {
			draw_control_handle(ctx, control_one, from_position, theme);
			draw_control_handle(ctx, control_two, to_position, theme);
		}
	}
}

/// A control handle is drawn as a spoke back to its endpoint plus a small
/// filled circle at the control point.
fn draw_control_handle(
	ctx: &CanvasRenderingContext2d,
	control_point: Position,
	connected_point: Position,
	theme: &Theme,
) {
	ctx.set_stroke_style_str(&theme.edge.handle_color.to_css());
	ctx.set_line_width(1.0);
	draw_line(ctx, control_point, connected_point);

	ctx.set_fill_style_str(&theme.edge.handle_color.to_css());
	ctx.begin_path();
	let _ = ctx.arc(
		control_point.x,
		control_point.y,
		theme.edge.handle_radius,
		0.0,
		2.0 * PI,
	);
	ctx.fill();
}

fn draw_path(
	graph: &Graph,
	window: &MapWindow,
	controls: &Controls,
	ctx: &CanvasRenderingContext2d,
	theme: &Theme,
) {
	let Some(ActiveEditor::Path(editor)) = controls.active_editor() else {
		return;
	};
	let Some(path) = editor.path() else {
		return;
	};

	let positions: Vec<Position> = path
		.iter()
		.filter_map(|id| graph.vertex(*id))
		.map(|vertex| geometry::world_to_viewport(vertex.position, window))
		.collect();
	if positions.len() < 2 {
		return;
	}

	let (dash, gap) = theme.path.dash_pattern;
	let _ = ctx.set_line_dash(&js_sys::Array::of2(
		&JsValue::from_f64(dash),
		&JsValue::from_f64(gap),
	));
	ctx.set_stroke_style_str(&theme.path.color.to_css());
	ctx.set_line_width(theme.path.width);

	ctx.begin_path();
	ctx.move_to(positions[0].x, positions[0].y);
	for position in &positions[1..] {
		ctx.line_to(position.x, position.y);
	}
	ctx.stroke();

	let _ = ctx.set_line_dash(&js_sys::Array::new());
}

fn draw_vertices(graph: &Graph, window: &MapWindow, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	// World-space radius scaled to the surface, so vertices shrink and grow
	// with the zoom.
	let scaled_radius =
		theme.vertex.radius / ((window.max_x - window.min_x) / window.surface_width());

	ctx.set_font(&format!("{}px sans-serif", theme.vertex.label_size));
	ctx.set_text_align("center");

	for vertex in graph.vertices() {
		if !geometry::is_vertex_visible(vertex.position, theme.vertex.radius, window) {
			continue;
		}
		let center = geometry::world_to_viewport(vertex.position, window);

		ctx.begin_path();
		let _ = ctx.arc(center.x, center.y, scaled_radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(&theme.vertex.fill.to_css());
		ctx.fill();
		ctx.set_stroke_style_str(&theme.vertex.stroke_color.to_css());
		ctx.set_line_width(theme.vertex.stroke_width);
		ctx.stroke();

		ctx.set_fill_style_str(&theme.vertex.label_color.to_css());
		let _ = ctx.fill_text(&vertex.name, center.x, center.y - scaled_radius - 6.0);
	}
}

fn draw_line(ctx: &CanvasRenderingContext2d, from: Position, to: Position) {
	ctx.begin_path();
	ctx.move_to(from.x, from.y);
	ctx.line_to(to.x, to.y);
	ctx.stroke();
}
