//! Interaction control: edit modes, click-versus-drag, and the editors.
//!
//! [`Controls`] turns raw pointer events into graph, map-window, and planner
//! operations. A pointer gesture is a click until movement exceeds the drag
//! threshold; a completed gesture produces at most one semantic action:
//! drag deltas while it lasted, or exactly one click action on mouse-up.
//! Which action that is depends on the current [`EditMode`].
//!
//! Vertex selections flow into the active editor. The controller holds at
//! most one editor at a time and disposes the previous one before
//! activating the next.

use log::debug;

use super::geometry::{self, Position};
use super::graph::{EdgeId, EdgeVariant, Graph, VertexId};
use super::map_window::MapWindow;
use super::planner::{PathPlanner, PlanOutcome};

/// How pointer gestures on the canvas are interpreted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditMode {
	Navigation,
	VertexCreation,
	EdgeCreation,
	PathPlanning,
}

/// Movement beyond this many pixels on either axis while the button is down
/// turns the gesture into a drag.
const DRAGGING_THRESHOLD: f64 = 5.0;

/// Inspector for a single vertex: editable name, delete, plan-from-here.
#[derive(Debug)]
pub struct VertexEditor {
	vertex: VertexId,
}

impl VertexEditor {
	pub fn new(vertex: VertexId) -> Self {
		Self { vertex }
	}

	pub fn vertex(&self) -> VertexId {
		self.vertex
	}

	fn on_vertex_selection(&mut self, vertex: VertexId) {
		self.vertex = vertex;
	}
}

/// Collects two vertex selections and creates the edge between them. The
/// created edge keeps showing its control handles until the editor is
/// disposed.
#[derive(Debug, Default)]
pub struct EdgeEditor {
	first: Option<VertexId>,
	second: Option<VertexId>,
	edge: Option<EdgeId>,
}

impl EdgeEditor {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn first(&self) -> Option<VertexId> {
		self.first
	}

	pub fn second(&self) -> Option<VertexId> {
		self.second
	}

	pub fn edge(&self) -> Option<EdgeId> {
		self.edge
	}

	fn on_vertex_selection(&mut self, graph: &mut Graph, vertex: VertexId, variant: EdgeVariant) {
		if self.first.is_none() {
			self.first = Some(vertex);
		} else {
			self.second = Some(vertex);
		}

		if let (Some(first), Some(second)) = (self.first, self.second)
			&& self.edge.is_none()
		{
			self.edge = graph.create_edge(first, second, variant);
			if let Some(edge) = self.edge.and_then(|id| graph.edge_mut(id)) {
				edge.is_being_edited = true;
			}
		}
	}

	fn dispose(&mut self, graph: &mut Graph) {
		if let Some(edge) = self.edge.and_then(|id| graph.edge_mut(id)) {
			edge.is_being_edited = false;
		}
	}
}

/// Wraps one path-planning session for display.
#[derive(Debug, Default)]
pub struct PathEditor {
	planner: PathPlanner,
}

impl PathEditor {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn planner(&self) -> &PathPlanner {
		&self.planner
	}

	/// The planned route, if this session found one.
	pub fn path(&self) -> Option<&[VertexId]> {
		match self.planner.outcome() {
			Some(PlanOutcome::Found(path)) => Some(path),
			_ => None,
		}
	}

	fn on_vertex_selection(&mut self, graph: &mut Graph, vertex: VertexId) {
		self.planner.on_vertex_selection(graph, vertex);
	}
}

/// The one editor the controller can hold, as a tagged variant. Every
/// variant supports the same trio: panel state, vertex selection, dispose.
#[derive(Debug)]
pub enum ActiveEditor {
	Vertex(VertexEditor),
	Edge(EdgeEditor),
	Path(PathEditor),
}

impl ActiveEditor {
	fn on_vertex_selection(&mut self, graph: &mut Graph, vertex: VertexId, variant: EdgeVariant) {
		match self {
			ActiveEditor::Vertex(editor) => editor.on_vertex_selection(vertex),
			ActiveEditor::Edge(editor) => editor.on_vertex_selection(graph, vertex, variant),
			ActiveEditor::Path(editor) => editor.on_vertex_selection(graph, vertex),
		}
	}

	fn dispose(&mut self, graph: &mut Graph) {
		match self {
			ActiveEditor::Edge(editor) => editor.dispose(graph),
			ActiveEditor::Vertex(_) | ActiveEditor::Path(_) => {}
		}
	}
}

/// Pointer and mode state for the editor canvas.
pub struct Controls {
	edit_mode: EditMode,
	edge_variant: EdgeVariant,
	vertex_hit_radius: f64,
	is_down: bool,
	is_dragging: bool,
	previous_position: Position,
	active_editor: Option<ActiveEditor>,
}

impl Controls {
	/// `vertex_hit_radius` is the world-space radius used to resolve clicks
	/// to vertices, normally the drawn vertex radius.
	pub fn new(vertex_hit_radius: f64) -> Self {
		Self {
			edit_mode: EditMode::Navigation,
			edge_variant: EdgeVariant::Bidirectional,
			vertex_hit_radius,
			is_down: false,
			is_dragging: false,
			previous_position: Position::default(),
			active_editor: None,
		}
	}

	pub fn edit_mode(&self) -> EditMode {
		self.edit_mode
	}

	pub fn edge_variant(&self) -> EdgeVariant {
		self.edge_variant
	}

	pub fn set_edge_variant(&mut self, variant: EdgeVariant) {
		self.edge_variant = variant;
	}

	pub fn active_editor(&self) -> Option<&ActiveEditor> {
		self.active_editor.as_ref()
	}

	/// Switch the interaction mode. The previous editor is disposed; edge
	/// creation and path planning start with a fresh editor straight away.
	pub fn set_edit_mode(&mut self, graph: &mut Graph, mode: EditMode) {
		debug!("edit mode -> {mode:?}");
		self.edit_mode = mode;
		match mode {
			EditMode::EdgeCreation => {
				self.activate_editor(graph, ActiveEditor::Edge(EdgeEditor::new()));
			}
			EditMode::PathPlanning => {
				self.activate_editor(graph, ActiveEditor::Path(PathEditor::new()));
			}
			EditMode::Navigation | EditMode::VertexCreation => self.close_editor(graph),
		}
	}

	/// Dispose and drop the active editor (the side panel was closed).
	pub fn close_editor(&mut self, graph: &mut Graph) {
		if let Some(mut editor) = self.active_editor.take() {
			editor.dispose(graph);
		}
	}

	/// Start a path-planning session seeded with `vertex` as the start (the
	/// inspector's "plan a path from here" action).
	pub fn plan_path_from(&mut self, graph: &mut Graph, vertex: VertexId) {
		self.edit_mode = EditMode::PathPlanning;
		let mut editor = PathEditor::new();
		editor.on_vertex_selection(graph, vertex);
		self.activate_editor(graph, ActiveEditor::Path(editor));
	}

	/// Remove the inspected vertex and close the inspector. No-op unless a
	/// vertex editor is active.
	pub fn delete_inspected_vertex(&mut self, graph: &mut Graph) {
		let inspected = match &self.active_editor {
			Some(ActiveEditor::Vertex(editor)) => Some(editor.vertex()),
			_ => None,
		};
		if let Some(vertex) = inspected {
			self.close_editor(graph);
			graph.remove_vertex(vertex);
		}
	}

	pub fn on_mouse_down(&mut self, position: Position) {
		self.is_down = true;
		self.previous_position = position;
	}

	/// Track movement while the button is down. Once the drag threshold is
	/// crossed the gesture becomes a drag; in navigation mode every further
	/// move pans the map window by the incremental delta.
	pub fn on_mouse_move(&mut self, position: Position, map_window: &mut MapWindow) {
		if !self.is_down {
			return;
		}

		if self.is_dragging {
			let delta_x = position.x - self.previous_position.x;
			let delta_y = position.y - self.previous_position.y;
			self.previous_position = position;
			if self.edit_mode == EditMode::Navigation {
				map_window.on_drag(delta_x, delta_y);
			}
			return;
		}

		if self.has_started_dragging(position) {
			self.previous_position = position;
			self.is_dragging = true;
		}
	}

	/// Complete the gesture. A gesture that never became a drag emits exactly
	/// one click action for the current mode.
	pub fn on_mouse_up(&mut self, position: Position, graph: &mut Graph, map_window: &MapWindow) {
		let was_click = self.is_down && !self.is_dragging;
		self.is_down = false;
		self.is_dragging = false;
		if !was_click {
			return;
		}

		let world_position = geometry::viewport_to_world(position, map_window);
		match self.edit_mode {
			EditMode::Navigation => {
				if let Some(vertex) = graph.vertex_at(world_position, self.vertex_hit_radius) {
					self.activate_editor(graph, ActiveEditor::Vertex(VertexEditor::new(vertex)));
				}
			}
			EditMode::VertexCreation => {
				let vertex = graph.create_vertex(world_position);
				self.activate_editor(graph, ActiveEditor::Vertex(VertexEditor::new(vertex)));
			}
			EditMode::EdgeCreation => {
				if let Some(vertex) = graph.vertex_at(world_position, self.vertex_hit_radius) {
					if !matches!(self.active_editor, Some(ActiveEditor::Edge(_))) {
						self.activate_editor(graph, ActiveEditor::Edge(EdgeEditor::new()));
					}
					self.forward_selection(graph, vertex);
				}
			}
			EditMode::PathPlanning => {
				if let Some(vertex) = graph.vertex_at(world_position, self.vertex_hit_radius) {
					if !matches!(self.active_editor, Some(ActiveEditor::Path(_))) {
						self.activate_editor(graph, ActiveEditor::Path(PathEditor::new()));
					}
					self.forward_selection(graph, vertex);
				}
			}
		}
	}

	/// The pointer left the canvas: abandon the gesture without an action.
	pub fn on_mouse_leave(&mut self) {
		self.is_down = false;
		self.is_dragging = false;
	}

	fn has_started_dragging(&self, position: Position) -> bool {
		(position.x - self.previous_position.x).abs() > DRAGGING_THRESHOLD
			|| (position.y - self.previous_position.y).abs() > DRAGGING_THRESHOLD
	}

	fn activate_editor(&mut self, graph: &mut Graph, editor: ActiveEditor) {
		self.close_editor(graph);
		self.active_editor = Some(editor);
	}

	fn forward_selection(&mut self, graph: &mut Graph, vertex: VertexId) {
		let variant = self.edge_variant;
		if let Some(editor) = &mut self.active_editor {
			editor.on_vertex_selection(graph, vertex, variant);
		}
	}
}
