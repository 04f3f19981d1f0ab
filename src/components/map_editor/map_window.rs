//! The visible window into world space.
//!
//! A [`MapWindow`] owns the world rectangle currently mapped onto the
//! rendering surface and reacts to drag, zoom, and resize gestures. Zoom is
//! a percentage clamped to `[MIN_ZOOM_PERCENTAGE, MAX_ZOOM_PERCENTAGE]`;
//! the rectangle is recomputed so the world point under the cursor (or the
//! surface center, for button zoom and resize) stays fixed. The clamps keep
//! the rectangle non-degenerate, which the coordinate transforms in
//! [`super::geometry`] rely on.

use super::events::Subscribers;
use super::geometry::Position;

/// Zoom at which one world unit maps to one surface pixel.
pub const DEFAULT_ZOOM_PERCENTAGE: f64 = 100.0;
/// Upper zoom clamp (narrowest world rectangle).
pub const MAX_ZOOM_PERCENTAGE: f64 = 300.0;
/// Lower zoom clamp (widest world rectangle).
pub const MIN_ZOOM_PERCENTAGE: f64 = 25.0;
/// Zoom change applied by the zoom in/out buttons.
const ZOOM_STEP_SIZE: f64 = 10.0;

/// The world rectangle mapped onto the rendering surface.
pub struct MapWindow {
	pub min_x: f64,
	pub max_x: f64,
	pub min_y: f64,
	pub max_y: f64,
	zoom_percentage: f64,
	surface_width: f64,
	surface_height: f64,
	subscribers: Subscribers,
}

impl MapWindow {
	/// Window sized to the surface at the default zoom, anchored at the
	/// world origin.
	pub fn new(surface_width: f64, surface_height: f64) -> Self {
		debug_assert!(surface_width > 0.0 && surface_height > 0.0);
		Self {
			min_x: 0.0,
			max_x: surface_width,
			min_y: 0.0,
			max_y: surface_height,
			zoom_percentage: DEFAULT_ZOOM_PERCENTAGE,
			surface_width,
			surface_height,
			subscribers: Subscribers::new(),
		}
	}

	pub fn zoom_percentage(&self) -> f64 {
		self.zoom_percentage
	}

	pub fn surface_width(&self) -> f64 {
		self.surface_width
	}

	pub fn surface_height(&self) -> f64 {
		self.surface_height
	}

	/// Register a callback invoked after every mutating operation.
	pub fn subscribe(&mut self, callback: impl Fn() + 'static) {
		self.subscribers.subscribe(callback);
	}

	/// Convert a screen-space length to world units at the current zoom.
	pub fn scaled_value(&self, value: f64) -> f64 {
		value / (self.zoom_percentage / DEFAULT_ZOOM_PERCENTAGE)
	}

	/// Pan by a screen-space pointer delta. Both bounds shift together; the
	/// world moves opposite to the pointer.
	pub fn on_drag(&mut self, delta_x: f64, delta_y: f64) {
		let scaled_delta_x = self.scaled_value(delta_x);
		let scaled_delta_y = self.scaled_value(delta_y);
		self.update(
			-scaled_delta_x,
			-scaled_delta_x,
			-scaled_delta_y,
			-scaled_delta_y,
		);
		self.publish();
	}

	/// Wheel zoom: one percent per event, anchored at the cursor. A positive
	/// `delta_y` (wheel towards the user) zooms out.
	pub fn on_scroll(&mut self, delta_y: f64, cursor: Position) {
		if delta_y > 0.0 && self.zoom_percentage > MIN_ZOOM_PERCENTAGE {
			self.zoom_percentage -= 1.0;
		} else if delta_y < 0.0 && self.zoom_percentage < MAX_ZOOM_PERCENTAGE {
			self.zoom_percentage += 1.0;
		} else {
			return;
		}

		self.apply_zoom(
			cursor.x / self.surface_width,
			cursor.y / self.surface_height,
		);
	}

	/// Button zoom in by one step, anchored at the surface center.
	pub fn on_zoom_in(&mut self) {
		let allowance = MAX_ZOOM_PERCENTAGE - self.zoom_percentage;
		self.zoom_percentage += allowance.min(ZOOM_STEP_SIZE);
		self.apply_zoom(0.5, 0.5);
	}

	/// Button zoom out by one step, anchored at the surface center.
	pub fn on_zoom_out(&mut self) {
		let allowance = self.zoom_percentage - MIN_ZOOM_PERCENTAGE;
		self.zoom_percentage -= allowance.min(ZOOM_STEP_SIZE);
		self.apply_zoom(0.5, 0.5);
	}

	/// The surface changed size; recompute the rectangle about its center so
	/// the visible world center is preserved.
	pub fn on_resize(&mut self, surface_width: f64, surface_height: f64) {
		debug_assert!(surface_width > 0.0 && surface_height > 0.0);
		self.surface_width = surface_width;
		self.surface_height = surface_height;
		self.apply_zoom(0.5, 0.5);
	}

	/// Recompute the rectangle for the current zoom, distributing the size
	/// change between min and max according to the cursor's fractional
	/// position on the surface.
	fn apply_zoom(&mut self, horizontal_factor: f64, vertical_factor: f64) {
		let previous_width = self.max_x - self.min_x;
		let previous_height = self.max_y - self.min_y;

		let new_width =
			(self.surface_width * (DEFAULT_ZOOM_PERCENTAGE / self.zoom_percentage)).round();
		let new_height =
			(self.surface_height * (DEFAULT_ZOOM_PERCENTAGE / self.zoom_percentage)).round();

		let delta_x = new_width - previous_width;
		let delta_y = new_height - previous_height;

		let min_x_delta = delta_x * horizontal_factor;
		let max_x_delta = delta_x - min_x_delta;
		let min_y_delta = delta_y * vertical_factor;
		let max_y_delta = delta_y - min_y_delta;

		self.update(-min_x_delta, max_x_delta, -min_y_delta, max_y_delta);
		self.publish();
	}

	fn update(&mut self, min_x_delta: f64, max_x_delta: f64, min_y_delta: f64, max_y_delta: f64) {
		self.min_x += min_x_delta;
		self.max_x += max_x_delta;
		self.min_y += min_y_delta;
		self.max_y += max_y_delta;
	}

	fn publish(&self) {
		self.subscribers.notify();
	}
}

#[cfg(test)]
mod tests {
	use std::cell::Cell;
	use std::rc::Rc;

	use super::super::geometry::viewport_to_world;
	use super::*;

	#[test]
	fn drag_translates_without_resizing() {
		let mut window = MapWindow::new(800.0, 600.0);
		window.on_drag(40.0, -25.0);

		assert_eq!(window.min_x, -40.0);
		assert_eq!(window.max_x, 760.0);
		assert_eq!(window.min_y, 25.0);
		assert_eq!(window.max_y, 625.0);
		assert_eq!(window.max_x - window.min_x, 800.0);
		assert_eq!(window.max_y - window.min_y, 600.0);
	}

	#[test]
	fn drag_deltas_scale_with_zoom() {
		let mut window = MapWindow::new(800.0, 600.0);
		window.on_zoom_in(); // 110%: a screen pixel covers fewer world units
		let width_before = window.max_x - window.min_x;
		let min_x_before = window.min_x;

		window.on_drag(11.0, 0.0);
		assert!((window.min_x - (min_x_before - 10.0)).abs() < 1e-9);
		assert!((window.max_x - window.min_x - width_before).abs() < 1e-9);
	}

	#[test]
	fn zoom_in_is_clamped_and_monotonic() {
		let mut window = MapWindow::new(800.0, 600.0);
		let mut previous_width = window.max_x - window.min_x;

		for _ in 0..30 {
			window.on_zoom_in();
			let width = window.max_x - window.min_x;
			assert!(width <= previous_width);
			assert!(window.zoom_percentage() <= MAX_ZOOM_PERCENTAGE);
			previous_width = width;
		}
		assert_eq!(window.zoom_percentage(), MAX_ZOOM_PERCENTAGE);
	}

	#[test]
	fn zoom_out_is_clamped_and_monotonic() {
		let mut window = MapWindow::new(800.0, 600.0);
		let mut previous_width = window.max_x - window.min_x;

		for _ in 0..30 {
			window.on_zoom_out();
			let width = window.max_x - window.min_x;
			assert!(width >= previous_width);
			assert!(window.zoom_percentage() >= MIN_ZOOM_PERCENTAGE);
			previous_width = width;
		}
		assert_eq!(window.zoom_percentage(), MIN_ZOOM_PERCENTAGE);
	}

	#[test]
	fn button_zoom_preserves_the_world_center() {
		let mut window = MapWindow::new(800.0, 600.0);
		window.on_drag(-120.0, 35.0);
		let center_x = (window.min_x + window.max_x) / 2.0;
		let center_y = (window.min_y + window.max_y) / 2.0;

		window.on_zoom_in();
		window.on_zoom_in();
		window.on_zoom_out();

		assert!(((window.min_x + window.max_x) / 2.0 - center_x).abs() < 1e-9);
		assert!(((window.min_y + window.max_y) / 2.0 - center_y).abs() < 1e-9);
	}

	#[test]
	fn wheel_zoom_keeps_the_world_point_under_the_cursor() {
		let mut window = MapWindow::new(800.0, 600.0);
		let cursor = Position::new(200.0, 450.0);
		let anchor = viewport_to_world(cursor, &window);

		window.on_scroll(-1.0, cursor);
		let after = viewport_to_world(cursor, &window);

		assert!((after.x - anchor.x).abs() < 1e-9);
		assert!((after.y - anchor.y).abs() < 1e-9);
	}

	#[test]
	fn wheel_zoom_stops_at_the_limits() {
		let mut window = MapWindow::new(800.0, 600.0);
		let cursor = Position::new(400.0, 300.0);

		for _ in 0..250 {
			window.on_scroll(-1.0, cursor);
		}
		assert_eq!(window.zoom_percentage(), MAX_ZOOM_PERCENTAGE);

		for _ in 0..400 {
			window.on_scroll(1.0, cursor);
		}
		assert_eq!(window.zoom_percentage(), MIN_ZOOM_PERCENTAGE);
	}

	#[test]
	fn resize_preserves_the_world_center() {
		let mut window = MapWindow::new(800.0, 600.0);
		window.on_drag(90.0, -10.0);
		let center_x = (window.min_x + window.max_x) / 2.0;
		let center_y = (window.min_y + window.max_y) / 2.0;

		window.on_resize(1024.0, 768.0);

		assert!(((window.min_x + window.max_x) / 2.0 - center_x).abs() < 1e-9);
		assert!(((window.min_y + window.max_y) / 2.0 - center_y).abs() < 1e-9);
		assert_eq!(window.max_x - window.min_x, 1024.0);
	}

	#[test]
	fn every_mutation_publishes() {
		let mut window = MapWindow::new(800.0, 600.0);
		let count = Rc::new(Cell::new(0));
		let seen = count.clone();
		window.subscribe(move || seen.set(seen.get() + 1));

		window.on_drag(1.0, 1.0);
		window.on_zoom_in();
		window.on_zoom_out();
		window.on_scroll(-1.0, Position::new(400.0, 300.0));
		window.on_resize(640.0, 480.0);

		assert_eq!(count.get(), 5);
	}
}
