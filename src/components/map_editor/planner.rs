//! Shortest-path planning between two selected vertices.
//!
//! The search is an informed variant of Dijkstra: every relaxation folds the
//! straight-line distance to the target into the stored cost, so `cost` is
//! the evolving priority key rather than a pure distance-so-far. The
//! heuristic is cached per vertex on first touch and re-added on every
//! relaxation. This greedy bias is intentional and load-bearing: a
//! heuristically cheap direct hop beats a detour of equal edge weight.
//!
//! Vertex selection uses a binary heap with lazy deletion; order among
//! equal-cost candidates is unspecified. A vertex is expanded at most once,
//! though later relaxations may still improve an expanded vertex's cost and
//! predecessor without re-expanding it.
//!
//! Planner scratch fields on the vertices are reset after every run,
//! success or failure, so independent sessions never see leaked state.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};

use log::{info, warn};
use thiserror::Error;

use super::geometry;
use super::graph::{Graph, VertexId};

/// Misuse of the direct planning API. Not reachable through the
/// [`PathPlanner`] selection protocol, which only forwards hit-tested ids.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum PlanError {
	#[error("vertex {0:?} is not part of the graph")]
	UnknownVertex(VertexId),
}

/// Result of a planning run.
#[derive(Clone, Debug, PartialEq)]
pub enum PlanOutcome {
	/// The vertices along the path, start first, end last.
	Found(Vec<VertexId>),
	/// No chain of traversable edges connects start to end.
	NotFound,
}

/// Heap entry ordered by ascending cost.
#[derive(Debug)]
struct Candidate {
	cost: f64,
	vertex: VertexId,
}

impl PartialEq for Candidate {
	fn eq(&self, other: &Self) -> bool {
		self.cost.total_cmp(&other.cost) == Ordering::Equal
	}
}

impl Eq for Candidate {}

impl PartialOrd for Candidate {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}

impl Ord for Candidate {
	fn cmp(&self, other: &Self) -> Ordering {
		// Reversed: BinaryHeap is a max-heap, we pop the cheapest first.
		other.cost.total_cmp(&self.cost)
	}
}

/// Compute the least-cost path from `start` to `end`.
///
/// "No path" is an expected outcome, not an error; `Err` only signals ids
/// that are not part of the graph.
pub fn plan(graph: &mut Graph, start: VertexId, end: VertexId) -> Result<PlanOutcome, PlanError> {
	if graph.vertex(start).is_none() {
		return Err(PlanError::UnknownVertex(start));
	}
	let Some(end_position) = graph.vertex(end).map(|vertex| vertex.position) else {
		return Err(PlanError::UnknownVertex(end));
	};

	// Defensive: guarantees no leakage even if an earlier run was interrupted.
	graph.reset_planner_scratch();

	if let Some(vertex) = graph.vertex_mut(start) {
		vertex.cost = 0.0;
	}

	let mut heap = BinaryHeap::new();
	let mut expanded: HashSet<VertexId> = HashSet::new();
	heap.push(Candidate {
		cost: 0.0,
		vertex: start,
	});

	while let Some(Candidate { vertex: current, .. }) = heap.pop() {
		if current == end {
			break;
		}
		if !expanded.insert(current) {
			// Stale duplicate of an already expanded vertex.
			continue;
		}

		let Some((current_cost, edge_ids)) = graph
			.vertex(current)
			.map(|vertex| (vertex.cost, vertex.edges.clone()))
		else {
			continue;
		};

		for edge_id in edge_ids {
			let Some(edge) = graph.edge(edge_id) else {
				continue;
			};
			let neighbor = if edge.from_vertex == current {
				edge.to_vertex
			} else {
				edge.from_vertex
			};
			let weight = edge.weight;

			let Some(vertex) = graph.vertex_mut(neighbor) else {
				continue;
			};
			let neighbor_position = vertex.position;
			let heuristic = *vertex.distance_to_target.get_or_insert_with(|| {
				geometry::euclidean_distance(neighbor_position, end_position)
			});

			let candidate_cost = current_cost + weight + heuristic;
			if candidate_cost < vertex.cost {
				vertex.cost = candidate_cost;
				vertex.previous_in_path = Some(current);
				heap.push(Candidate {
					cost: candidate_cost,
					vertex: neighbor,
				});
			}
		}
	}

	let outcome = reconstruct(graph, start, end);
	graph.reset_planner_scratch();
	Ok(outcome)
}

/// Walk the predecessor chain backwards from `end`. The chain is valid only
/// if it terminates at `start`; anything else is reported as not found
/// rather than returned as a partial path.
fn reconstruct(graph: &Graph, start: VertexId, end: VertexId) -> PlanOutcome {
	let step_limit = graph.vertices().len();
	let mut path = vec![end];
	let mut current = end;

	while let Some(previous) = graph.vertex(current).and_then(|vertex| vertex.previous_in_path) {
		if path.len() > step_limit {
			// A predecessor cycle; relaxation invariants should rule this
			// out, bail instead of walking forever.
			warn!("predecessor chain exceeded {step_limit} steps, treating as no path");
			return PlanOutcome::NotFound;
		}
		path.push(previous);
		current = previous;
	}
	path.reverse();

	if path.first() == Some(&start) && path.last() == Some(&end) {
		PlanOutcome::Found(path)
	} else {
		PlanOutcome::NotFound
	}
}

/// A one-shot planning session fed by vertex selections.
///
/// The first selection fixes the start, the second fixes the end and runs
/// the search immediately. Selections after that are ignored; callers make
/// a fresh planner per session.
#[derive(Debug, Default)]
pub struct PathPlanner {
	start: Option<VertexId>,
	end: Option<VertexId>,
	outcome: Option<PlanOutcome>,
}

impl PathPlanner {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn start(&self) -> Option<VertexId> {
		self.start
	}

	pub fn end(&self) -> Option<VertexId> {
		self.end
	}

	/// The result of this session, once both endpoints have been selected.
	pub fn outcome(&self) -> Option<&PlanOutcome> {
		self.outcome.as_ref()
	}

	/// Feed one selected vertex into the session.
	pub fn on_vertex_selection(&mut self, graph: &mut Graph, vertex: VertexId) {
		if self.outcome.is_some() {
			return;
		}

		if self.start.is_none() {
			self.start = Some(vertex);
			return;
		}
		self.end = Some(vertex);

		let (Some(start), Some(end)) = (self.start, self.end) else {
			return;
		};
		match plan(graph, start, end) {
			Ok(outcome) => {
				if outcome == PlanOutcome::NotFound {
					info!("no path found from {start:?} to {end:?}");
				}
				self.outcome = Some(outcome);
			}
			Err(error) => {
				warn!("path planning failed: {error}");
				self.outcome = Some(PlanOutcome::NotFound);
			}
		}
	}
}
