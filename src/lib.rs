//! graph-map-editor: Interactive node/edge map editing with path planning.
//!
//! This crate provides a WASM-based map editor component: a pannable,
//! zoomable canvas over a world-coordinate graph, with vertex/edge editing
//! and shortest-path planning between selected vertices.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;

pub use components::map_editor::{MapEditorCanvas, PlanOutcome, SeedGraph};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("graph-map-editor: logging initialized");
}

/// Load seed graph data from a script element with id="graph-data".
/// Expected format: JSON with { vertices: [...], edges: [...] }
fn load_seed_graph() -> Option<SeedGraph> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("graph-data")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;

	match serde_json::from_str::<SeedGraph>(&json_text) {
		Ok(seed) => {
			info!(
				"graph-map-editor: loaded {} vertices, {} edges",
				seed.vertices.len(),
				seed.edges.len()
			);
			Some(seed)
		}
		Err(e) => {
			warn!("graph-map-editor: failed to parse seed graph: {}", e);
			None
		}
	}
}

/// Main application component.
/// Loads any embedded seed graph and renders the fullscreen editor.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let seed = load_seed_graph();

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="light" />
		<Title text="Graph Map Editor" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="fullscreen-editor">
			<MapEditorCanvas seed=seed fullscreen=true />
			<div class="editor-overlay">
				<h1>"Graph Map Editor"</h1>
				<p class="subtitle">
					"Drag to pan, scroll to zoom. Use the toolbar to add vertices and edges or plan a path."
				</p>
			</div>
		</div>
	}
}
