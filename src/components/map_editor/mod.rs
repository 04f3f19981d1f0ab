//! Interactive node/edge map editor component.
//!
//! Renders a pannable, zoomable canvas over a world-coordinate graph with:
//! - Vertex and weighted-edge creation, edges drawn as Bezier curves
//! - Drag panning and cursor-anchored wheel zoom over a background grid
//! - Shortest-path planning between two selected vertices
//! - A toolbar for edit modes and a side panel hosting the active editor
//!
//! The core modules (`geometry`, `map_window`, `graph`, `planner`,
//! `controls`) are plain Rust with no web dependencies; `component` and
//! `render` put them on a canvas.
//!
//! # Example
//!
//! ```ignore
//! use graph_map_editor::{MapEditorCanvas, SeedGraph};
//!
//! view! { <MapEditorCanvas fullscreen=true /> }
//! ```

mod component;
pub mod controls;
pub mod events;
pub mod geometry;
pub mod graph;
pub mod map_window;
pub mod planner;
mod render;
pub mod theme;
mod types;

pub use component::MapEditorCanvas;
pub use controls::{Controls, EditMode};
pub use graph::{EdgeVariant, Graph};
pub use planner::{PathPlanner, PlanOutcome, plan};
pub use theme::Theme;
pub use types::{SeedEdge, SeedGraph, SeedVertex};
