//! The graph model: vertices, weighted edges, and adjacency.
//!
//! The graph owns every vertex and edge; the rest of the editor refers to
//! them through [`VertexId`] and [`EdgeId`] handles. Both lists keep
//! creation order. Mutations go through the methods here, which uphold the
//! structural invariants (every edge's endpoints are stored vertices,
//! removing a vertex removes its incident edges everywhere) and notify
//! subscribers once the mutation is complete.

use log::debug;

use super::events::Subscribers;
use super::geometry::{self, Position};

/// Handle to a vertex owned by a [`Graph`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct VertexId(usize);

/// Handle to an edge owned by a [`Graph`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EdgeId(usize);

/// Whether a new edge is traversable from both endpoints or only from its
/// `from` endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EdgeVariant {
	Bidirectional,
	Unidirectional,
}

/// A labeled node on the map.
#[derive(Clone, Debug)]
pub struct Vertex {
	pub id: VertexId,
	pub position: Position,
	pub name: String,
	/// Incident edges in insertion order. A unidirectional edge appears only
	/// in its `from` endpoint's list.
	pub edges: Vec<EdgeId>,
	// Planner scratch. Owned by the path planner during a run and reset to
	// these defaults after every planning session.
	pub(crate) cost: f64,
	pub(crate) distance_to_target: Option<f64>,
	pub(crate) previous_in_path: Option<VertexId>,
}

/// A weighted connection between two vertices.
///
/// The weight is the Euclidean distance between the endpoints at creation
/// time and is fixed thereafter. The control points shape the rendered
/// Bezier curve; they start on the chord, so a fresh edge draws straight.
#[derive(Clone, Debug)]
pub struct Edge {
	pub id: EdgeId,
	pub from_vertex: VertexId,
	pub to_vertex: VertexId,
	pub weight: f64,
	pub control_point_one: Position,
	pub control_point_two: Position,
	/// Render flag: the edge editor shows control handles while set.
	pub is_being_edited: bool,
}

/// Owner of all vertices and edges.
#[derive(Default)]
pub struct Graph {
	vertices: Vec<Vertex>,
	edges: Vec<Edge>,
	next_vertex_id: usize,
	next_edge_id: usize,
	next_name_number: usize,
	subscribers: Subscribers,
}

impl Graph {
	pub fn new() -> Self {
		Self::default()
	}

	/// Register a callback invoked after every mutating operation.
	pub fn subscribe(&mut self, callback: impl Fn() + 'static) {
		self.subscribers.subscribe(callback);
	}

	/// All vertices in creation order.
	pub fn vertices(&self) -> &[Vertex] {
		&self.vertices
	}

	/// All edges in creation order.
	pub fn edges(&self) -> &[Edge] {
		&self.edges
	}

	pub fn vertex(&self, id: VertexId) -> Option<&Vertex> {
		self.vertices.iter().find(|vertex| vertex.id == id)
	}

	pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
		self.edges.iter().find(|edge| edge.id == id)
	}

	pub(crate) fn vertex_mut(&mut self, id: VertexId) -> Option<&mut Vertex> {
		self.vertices.iter_mut().find(|vertex| vertex.id == id)
	}

	pub(crate) fn edge_mut(&mut self, id: EdgeId) -> Option<&mut Edge> {
		self.edges.iter_mut().find(|edge| edge.id == id)
	}

	/// The first vertex (in creation order) whose hit box contains the world
	/// position.
	pub fn vertex_at(&self, position: Position, radius: f64) -> Option<VertexId> {
		self.vertices
			.iter()
			.find(|vertex| geometry::is_point_in_circle(position, vertex.position, radius))
			.map(|vertex| vertex.id)
	}

	/// Create a vertex at the given world position with an auto-incrementing
	/// default name.
	pub fn create_vertex(&mut self, position: Position) -> VertexId {
		let id = VertexId(self.next_vertex_id);
		self.next_vertex_id += 1;
		self.next_name_number += 1;

		self.vertices.push(Vertex {
			id,
			position,
			name: format!("Node {}", self.next_name_number),
			edges: Vec::new(),
			cost: f64::INFINITY,
			distance_to_target: None,
			previous_in_path: None,
		});
		debug!("created vertex {id:?} at ({}, {})", position.x, position.y);
		self.publish();
		id
	}

	/// Create an edge between two existing vertices. The weight is the
	/// Euclidean distance between them at this moment.
	///
	/// Self-loops are rejected; unknown endpoints are a no-op. Parallel
	/// edges between the same pair are allowed.
	pub fn create_edge(
		&mut self,
		from: VertexId,
		to: VertexId,
		variant: EdgeVariant,
	) -> Option<EdgeId> {
		if from == to {
			debug!("rejected self-loop edge on {from:?}");
			return None;
		}
		let from_position = self.vertex(from)?.position;
		let to_position = self.vertex(to)?.position;

		let id = EdgeId(self.next_edge_id);
		self.next_edge_id += 1;

		self.edges.push(Edge {
			id,
			from_vertex: from,
			to_vertex: to,
			weight: geometry::euclidean_distance(from_position, to_position),
			control_point_one: lerp(from_position, to_position, 1.0 / 3.0),
			control_point_two: lerp(from_position, to_position, 2.0 / 3.0),
			is_being_edited: false,
		});

		if let Some(vertex) = self.vertex_mut(from) {
			vertex.edges.push(id);
		}
		if variant == EdgeVariant::Bidirectional {
			if let Some(vertex) = self.vertex_mut(to) {
				vertex.edges.push(id);
			}
		}

		self.publish();
		Some(id)
	}

	/// Remove a vertex and every edge incident to it. Removing a vertex that
	/// is not part of the graph is a no-op.
	pub fn remove_vertex(&mut self, id: VertexId) {
		let removed_edges: Vec<EdgeId> = self
			.edges
			.iter()
			.filter(|edge| edge.from_vertex == id || edge.to_vertex == id)
			.map(|edge| edge.id)
			.collect();

		self.vertices.retain(|vertex| vertex.id != id);
		self.edges
			.retain(|edge| edge.from_vertex != id && edge.to_vertex != id);
		for vertex in &mut self.vertices {
			vertex.edges.retain(|edge| !removed_edges.contains(edge));
		}

		self.publish();
	}

	/// Remove an edge from the graph and from both endpoints' adjacency
	/// lists. Unknown edges are a no-op.
	pub fn remove_edge(&mut self, id: EdgeId) {
		self.edges.retain(|edge| edge.id != id);
		for vertex in &mut self.vertices {
			vertex.edges.retain(|edge| *edge != id);
		}
		self.publish();
	}

	/// Change a vertex label.
	pub fn rename_vertex(&mut self, id: VertexId, name: impl Into<String>) {
		if let Some(vertex) = self.vertex_mut(id) {
			vertex.name = name.into();
			self.publish();
		}
	}

	/// Restore every vertex's planner scratch fields to their defaults.
	pub(crate) fn reset_planner_scratch(&mut self) {
		for vertex in &mut self.vertices {
			vertex.cost = f64::INFINITY;
			vertex.distance_to_target = None;
			vertex.previous_in_path = None;
		}
	}

	fn publish(&self) {
		self.subscribers.notify();
	}
}

fn lerp(a: Position, b: Position, t: f64) -> Position {
	Position {
		x: a.x + (b.x - a.x) * t,
		y: a.y + (b.y - a.y) * t,
	}
}

#[cfg(test)]
mod tests {
	use std::cell::Cell;
	use std::rc::Rc;

	use super::*;

	#[test]
	fn vertices_get_auto_incrementing_names() {
		let mut graph = Graph::new();
		let a = graph.create_vertex(Position::new(0.0, 0.0));
		let b = graph.create_vertex(Position::new(1.0, 1.0));

		assert_eq!(graph.vertex(a).unwrap().name, "Node 1");
		assert_eq!(graph.vertex(b).unwrap().name, "Node 2");
	}

	#[test]
	fn edge_weight_is_the_distance_at_creation() {
		let mut graph = Graph::new();
		let a = graph.create_vertex(Position::new(0.0, 0.0));
		let b = graph.create_vertex(Position::new(3.0, 4.0));

		let edge = graph
			.create_edge(a, b, EdgeVariant::Bidirectional)
			.and_then(|id| graph.edge(id))
			.unwrap();
		assert!((edge.weight - 5.0).abs() < 1e-9);
	}

	#[test]
	fn bidirectional_edge_lands_in_both_adjacency_lists() {
		let mut graph = Graph::new();
		let a = graph.create_vertex(Position::new(0.0, 0.0));
		let b = graph.create_vertex(Position::new(10.0, 0.0));
		let edge = graph.create_edge(a, b, EdgeVariant::Bidirectional).unwrap();

		assert_eq!(graph.vertex(a).unwrap().edges, vec![edge]);
		assert_eq!(graph.vertex(b).unwrap().edges, vec![edge]);
	}

	#[test]
	fn unidirectional_edge_lands_only_in_the_from_list() {
		let mut graph = Graph::new();
		let a = graph.create_vertex(Position::new(0.0, 0.0));
		let b = graph.create_vertex(Position::new(10.0, 0.0));
		let edge = graph.create_edge(a, b, EdgeVariant::Unidirectional).unwrap();

		assert_eq!(graph.vertex(a).unwrap().edges, vec![edge]);
		assert!(graph.vertex(b).unwrap().edges.is_empty());
	}

	#[test]
	fn self_loops_are_rejected() {
		let mut graph = Graph::new();
		let a = graph.create_vertex(Position::new(0.0, 0.0));

		assert_eq!(graph.create_edge(a, a, EdgeVariant::Bidirectional), None);
		assert!(graph.edges().is_empty());
	}

	#[test]
	fn parallel_edges_are_allowed() {
		let mut graph = Graph::new();
		let a = graph.create_vertex(Position::new(0.0, 0.0));
		let b = graph.create_vertex(Position::new(10.0, 0.0));

		let first = graph.create_edge(a, b, EdgeVariant::Bidirectional).unwrap();
		let second = graph.create_edge(a, b, EdgeVariant::Bidirectional).unwrap();

		assert_ne!(first, second);
		assert_eq!(graph.edges().len(), 2);
		assert_eq!(graph.vertex(a).unwrap().edges.len(), 2);
	}

	#[test]
	fn removing_a_vertex_cascades_to_incident_edges() {
		let mut graph = Graph::new();
		let a = graph.create_vertex(Position::new(0.0, 0.0));
		let b = graph.create_vertex(Position::new(10.0, 0.0));
		let c = graph.create_vertex(Position::new(0.0, 10.0));
		graph.create_edge(a, b, EdgeVariant::Bidirectional);
		graph.create_edge(b, c, EdgeVariant::Bidirectional);
		let surviving = graph.create_edge(a, c, EdgeVariant::Bidirectional).unwrap();

		graph.remove_vertex(b);

		assert!(graph.vertex(b).is_none());
		assert_eq!(graph.edges().len(), 1);
		for edge in graph.edges() {
			assert_ne!(edge.from_vertex, b);
			assert_ne!(edge.to_vertex, b);
		}
		assert_eq!(graph.vertex(a).unwrap().edges, vec![surviving]);
		assert_eq!(graph.vertex(c).unwrap().edges, vec![surviving]);
	}

	#[test]
	fn removing_an_unknown_vertex_is_a_no_op() {
		let mut graph = Graph::new();
		let a = graph.create_vertex(Position::new(0.0, 0.0));
		graph.remove_vertex(a);

		// Stale handle; nothing left to remove.
		graph.remove_vertex(a);
		assert!(graph.vertices().is_empty());
	}

	#[test]
	fn removing_an_edge_cleans_both_adjacency_lists() {
		let mut graph = Graph::new();
		let a = graph.create_vertex(Position::new(0.0, 0.0));
		let b = graph.create_vertex(Position::new(10.0, 0.0));
		let edge = graph.create_edge(a, b, EdgeVariant::Bidirectional).unwrap();

		graph.remove_edge(edge);

		assert!(graph.edges().is_empty());
		assert!(graph.vertex(a).unwrap().edges.is_empty());
		assert!(graph.vertex(b).unwrap().edges.is_empty());
	}

	#[test]
	fn vertex_at_uses_the_inclusive_hit_box() {
		let mut graph = Graph::new();
		let a = graph.create_vertex(Position::new(100.0, 100.0));

		assert_eq!(graph.vertex_at(Position::new(108.0, 100.0), 8.0), Some(a));
		assert_eq!(graph.vertex_at(Position::new(109.0, 100.0), 8.0), None);
	}

	#[test]
	fn vertex_at_prefers_creation_order() {
		let mut graph = Graph::new();
		let first = graph.create_vertex(Position::new(0.0, 0.0));
		graph.create_vertex(Position::new(4.0, 0.0));

		assert_eq!(graph.vertex_at(Position::new(2.0, 0.0), 8.0), Some(first));
	}

	#[test]
	fn mutations_publish_and_reads_do_not() {
		let mut graph = Graph::new();
		let count = Rc::new(Cell::new(0));
		let seen = count.clone();
		graph.subscribe(move || seen.set(seen.get() + 1));

		let a = graph.create_vertex(Position::new(0.0, 0.0));
		let b = graph.create_vertex(Position::new(1.0, 0.0));
		let edge = graph.create_edge(a, b, EdgeVariant::Bidirectional).unwrap();
		graph.rename_vertex(a, "Start");
		let _ = graph.vertex(a);
		let _ = graph.vertex_at(Position::new(0.0, 0.0), 8.0);
		graph.remove_edge(edge);
		graph.remove_vertex(b);

		assert_eq!(count.get(), 6);
	}

	#[test]
	fn renaming_an_unknown_vertex_is_silent() {
		let mut graph = Graph::new();
		let a = graph.create_vertex(Position::new(0.0, 0.0));
		graph.remove_vertex(a);
		graph.rename_vertex(a, "ghost");
		assert!(graph.vertices().is_empty());
	}
}
