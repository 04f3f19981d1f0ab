//! Seed graph data for bootstrapping the editor.
//!
//! The application shell can embed a JSON document in the page and have the
//! editor start with a graph already on the map. This is a one-way
//! convenience; the editor never writes the graph back out.

use serde::Deserialize;

use super::geometry::Position;
use super::graph::{EdgeVariant, Graph};

/// A vertex in the seed document.
#[derive(Clone, Debug, Deserialize)]
pub struct SeedVertex {
	pub x: f64,
	pub y: f64,
	/// Optional label; unnamed vertices keep their auto-assigned name.
	pub name: Option<String>,
}

/// An edge in the seed document, referencing vertices by their index in the
/// `vertices` array.
#[derive(Clone, Debug, Deserialize)]
pub struct SeedEdge {
	pub from: usize,
	pub to: usize,
}

/// Complete seed document: vertices and the edges between them.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct SeedGraph {
	pub vertices: Vec<SeedVertex>,
	pub edges: Vec<SeedEdge>,
}

impl SeedGraph {
	/// Build a fresh graph from the seed data. Out-of-range edge indices are
	/// skipped.
	pub fn build(&self) -> Graph {
		let mut graph = Graph::new();

		let ids: Vec<_> = self
			.vertices
			.iter()
			.map(|seed| {
				let id = graph.create_vertex(Position::new(seed.x, seed.y));
				if let Some(name) = &seed.name {
					graph.rename_vertex(id, name.clone());
				}
				id
			})
			.collect();

		for edge in &self.edges {
			if let (Some(&from), Some(&to)) = (ids.get(edge.from), ids.get(edge.to)) {
				graph.create_edge(from, to, EdgeVariant::Bidirectional);
			}
		}

		graph
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn builds_vertices_edges_and_names() {
		let seed: SeedGraph = serde_json::from_str(
			r#"{
				"vertices": [
					{ "x": 0.0, "y": 0.0, "name": "Depot" },
					{ "x": 100.0, "y": 0.0 }
				],
				"edges": [{ "from": 0, "to": 1 }]
			}"#,
		)
		.unwrap();

		let graph = seed.build();
		assert_eq!(graph.vertices().len(), 2);
		assert_eq!(graph.vertices()[0].name, "Depot");
		assert_eq!(graph.vertices()[1].name, "Node 2");
		assert_eq!(graph.edges().len(), 1);
	}

	#[test]
	fn out_of_range_edges_are_skipped() {
		let seed = SeedGraph {
			vertices: vec![SeedVertex {
				x: 0.0,
				y: 0.0,
				name: None,
			}],
			edges: vec![SeedEdge { from: 0, to: 7 }],
		};

		assert!(seed.build().edges().is_empty());
	}
}
