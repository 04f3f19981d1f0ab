//! Coordinate transforms and geometric predicates for the map editor.
//!
//! # Coordinate Spaces
//!
//! - **World-space**: The single global plane where vertex positions are
//!   stored, independent of pan and zoom.
//! - **Viewport-space**: Pixel coordinates on the rendering surface. The
//!   [`MapWindow`] bounds describe which world rectangle is currently
//!   mapped onto the surface.
//!
//! Everything here is stateless; the map window and surface dimensions are
//! passed in. Callers must guarantee a non-degenerate window (`max_x > min_x`,
//! `max_y > min_y`); the zoom clamps in [`super::map_window`] uphold this.

use super::map_window::MapWindow;

/// A point in world or viewport coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Position {
	pub x: f64,
	pub y: f64,
}

impl Position {
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}
}

/// Straight-line distance between two world points.
pub fn euclidean_distance(a: Position, b: Position) -> f64 {
	((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt()
}

/// Map a world position onto the rendering surface.
pub fn world_to_viewport(p: Position, window: &MapWindow) -> Position {
	Position {
		x: window.surface_width() * ((p.x - window.min_x) / (window.max_x - window.min_x)),
		y: window.surface_height() * ((p.y - window.min_y) / (window.max_y - window.min_y)),
	}
}

/// Map a surface position back into world space. Inverse of
/// [`world_to_viewport`].
pub fn viewport_to_world(p: Position, window: &MapWindow) -> Position {
	Position {
		x: window.min_x + (window.max_x - window.min_x) * (p.x / window.surface_width()),
		y: window.min_y + (window.max_y - window.min_y) * (p.y / window.surface_height()),
	}
}

/// Hit test against a circle via its axis-aligned bounding box, inclusive on
/// every side. Not a true circular distance check; clicks in the box corners
/// outside the circle still count as hits.
pub fn is_point_in_circle(point: Position, center: Position, radius: f64) -> bool {
	point.x >= center.x - radius
		&& point.x <= center.x + radius
		&& point.y >= center.y - radius
		&& point.y <= center.y + radius
}

/// Whether any part of a vertex with the given radius can appear inside the
/// window. True when the center is strictly inside, or when the
/// radius-expanded bounding box overlaps the window on both axes at once.
pub fn is_vertex_visible(position: Position, radius: f64, window: &MapWindow) -> bool {
	if is_strictly_inside(position, window) {
		return true;
	}

	let right_edge = position.x + radius;
	let left_edge = position.x - radius;
	let top_edge = position.y - radius;
	let bottom_edge = position.y + radius;
	let is_right_edge_visible = right_edge > window.min_x && right_edge < window.max_x;
	let is_left_edge_visible = left_edge > window.min_x && left_edge < window.max_x;
	let is_top_edge_visible = top_edge > window.min_y && top_edge < window.max_y;
	let is_bottom_edge_visible = bottom_edge > window.min_y && bottom_edge < window.max_y;

	(is_right_edge_visible || is_left_edge_visible)
		&& (is_top_edge_visible || is_bottom_edge_visible)
}

/// Whether an edge between the two endpoints should be drawn: true when
/// either endpoint lies strictly inside the window.
///
/// Coarse on purpose: an edge whose body crosses the window while both
/// endpoints sit outside it is culled.
// TODO: test the segment (or its bounding box) against the window instead, so
// a long edge spanning the window is not dropped.
pub fn is_edge_visible(from: Position, to: Position, window: &MapWindow) -> bool {
	is_strictly_inside(from, window) || is_strictly_inside(to, window)
}

fn is_strictly_inside(p: Position, window: &MapWindow) -> bool {
	p.x > window.min_x && p.x < window.max_x && p.y > window.min_y && p.y < window.max_y
}

/// Grid line coordinates aligned to multiples of `block_size` covering
/// `[min, max]`. The first value is the smallest multiple of `block_size`
/// that is `>= min`.
pub fn grid_line_values(min: f64, max: f64, block_size: f64) -> Vec<f64> {
	let mut values = Vec::new();
	if block_size <= 0.0 {
		return values;
	}

	let mut value = (min / block_size).ceil() * block_size;
	while value <= max {
		values.push(value);
		value += block_size;
	}
	values
}

#[cfg(test)]
mod tests {
	use super::*;

	fn window() -> MapWindow {
		MapWindow::new(800.0, 600.0)
	}

	#[test]
	fn world_to_viewport_maps_bounds_to_surface_corners() {
		let window = window();
		let origin = world_to_viewport(Position::new(0.0, 0.0), &window);
		assert_eq!(origin, Position::new(0.0, 0.0));

		let far = world_to_viewport(Position::new(800.0, 600.0), &window);
		assert_eq!(far, Position::new(800.0, 600.0));
	}

	#[test]
	fn viewport_round_trip_preserves_position() {
		let mut window = window();
		window.min_x = -120.0;
		window.max_x = 530.0;
		window.min_y = 44.5;
		window.max_y = 410.25;

		let p = Position::new(17.25, 199.875);
		let back = viewport_to_world(world_to_viewport(p, &window), &window);
		assert!((back.x - p.x).abs() < 1e-9);
		assert!((back.y - p.y).abs() < 1e-9);
	}

	#[test]
	fn point_in_circle_is_inclusive_on_the_box_edge() {
		let center = Position::new(10.0, 10.0);
		assert!(is_point_in_circle(Position::new(18.0, 10.0), center, 8.0));
		assert!(is_point_in_circle(Position::new(2.0, 2.0), center, 8.0));
		assert!(!is_point_in_circle(Position::new(18.1, 10.0), center, 8.0));
	}

	#[test]
	fn vertex_on_boundary_is_not_inside_with_zero_radius() {
		let window = window();
		let on_left_bound = Position::new(window.min_x, 300.0);
		assert!(!is_vertex_visible(on_left_bound, 0.0, &window));
	}

	#[test]
	fn vertex_on_boundary_is_visible_with_positive_radius() {
		let window = window();
		// Center sits exactly on min_x: the strict inside check fails, but the
		// right edge of the expanded box pokes into the window on both axes.
		let on_left_bound = Position::new(window.min_x, 300.0);
		assert!(is_vertex_visible(on_left_bound, 8.0, &window));
	}

	#[test]
	fn vertex_overlapping_one_axis_only_is_not_visible() {
		let window = window();
		// Horizontally inside the window's x range, vertically far above it.
		let above = Position::new(400.0, -500.0);
		assert!(!is_vertex_visible(above, 8.0, &window));
	}

	#[test]
	fn edge_with_one_endpoint_inside_is_visible() {
		let window = window();
		let inside = Position::new(100.0, 100.0);
		let outside = Position::new(5000.0, 5000.0);
		assert!(is_edge_visible(inside, outside, &window));
		assert!(is_edge_visible(outside, inside, &window));
	}

	#[test]
	fn edge_crossing_with_both_endpoints_outside_is_culled() {
		let window = window();
		// Body crosses the window; both endpoints are out of bounds. The
		// documented approximation drops it.
		let left = Position::new(-100.0, 300.0);
		let right = Position::new(900.0, 300.0);
		assert!(!is_edge_visible(left, right, &window));
	}

	#[test]
	fn grid_lines_align_to_block_multiples() {
		assert_eq!(
			grid_line_values(0.0, 100.0, 25.0),
			vec![0.0, 25.0, 50.0, 75.0, 100.0]
		);
		assert_eq!(grid_line_values(1.0, 100.0, 25.0), vec![25.0, 50.0, 75.0, 100.0]);
	}

	#[test]
	fn grid_lines_start_at_smallest_multiple_above_negative_min() {
		assert_eq!(grid_line_values(-30.0, 10.0, 25.0), vec![-25.0, 0.0]);
	}

	#[test]
	fn grid_lines_empty_when_no_multiple_in_range() {
		assert!(grid_line_values(1.0, 24.0, 25.0).is_empty());
	}
}
