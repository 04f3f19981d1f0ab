//! Leptos component wrapping the map editor canvas.
//!
//! The component creates an HTML canvas element and wires up mouse/wheel
//! event handlers for panning, zooming, and editing gestures. A
//! `requestAnimationFrame` loop repaints whenever the graph or map window
//! reports a change. The toolbar switches edit modes and the side panel
//! hosts the active editor.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent, Window};

use super::controls::{ActiveEditor, Controls, EditMode};
use super::geometry::Position;
use super::graph::{EdgeVariant, Graph, VertexId};
use super::map_window::MapWindow;
use super::planner::PlanOutcome;
use super::render;
use super::theme::Theme;
use super::types::SeedGraph;

/// Bundles the editor core objects constructed once at mount. Everything is
/// passed by reference from here; there are no globals.
struct EditorContext {
	graph: Graph,
	map_window: MapWindow,
	controls: Controls,
	theme: Theme,
}

type SharedContext = Rc<RefCell<Option<EditorContext>>>;

/// Renders the interactive map editor: canvas, toolbar, and side panel.
///
/// The component sizes itself to its parent container by default; set
/// `fullscreen = true` to fill the viewport and resize with the window.
/// Explicit `width`/`height` override automatic sizing. An optional `seed`
/// graph puts vertices and edges on the map at startup.
#[component]
pub fn MapEditorCanvas(
	#[prop(default = None)] seed: Option<SeedGraph>,
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let context: SharedContext = Rc::new(RefCell::new(None));
	let needs_redraw: Rc<Cell<bool>> = Rc::new(Cell::new(true));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	// Mirrors of the controller state for reactive toolbar/panel rendering.
	let current_mode = RwSignal::new(EditMode::Navigation);
	let current_variant = RwSignal::new(EdgeVariant::Bidirectional);
	let panel_version = RwSignal::new(0u32);

	let (context_init, needs_redraw_init, animate_init, resize_cb_init) = (
		context.clone(),
		needs_redraw.clone(),
		animate.clone(),
		resize_cb.clone(),
	);

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let window: Window = web_sys::window().unwrap();

		let (w, h) = if fullscreen {
			(
				window.inner_width().unwrap().as_f64().unwrap(),
				window.inner_height().unwrap().as_f64().unwrap(),
			)
		} else {
			(
				width.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_width() as f64)
						.unwrap_or(800.0)
				}),
				height.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_height() as f64)
						.unwrap_or(600.0)
				}),
			)
		};
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let ctx: CanvasRenderingContext2d = canvas
			.get_context("2d")
			.unwrap()
			.unwrap()
			.dyn_into()
			.unwrap();

		let theme = Theme::default();
		let mut graph = seed.clone().map(|s| s.build()).unwrap_or_default();
		let mut map_window = MapWindow::new(w, h);
		let graph_dirty = needs_redraw_init.clone();
		graph.subscribe(move || graph_dirty.set(true));
		let window_dirty = needs_redraw_init.clone();
		map_window.subscribe(move || window_dirty.set(true));

		*context_init.borrow_mut() = Some(EditorContext {
			controls: Controls::new(theme.vertex.radius),
			graph,
			map_window,
			theme,
		});
		needs_redraw_init.set(true);

		if fullscreen {
			let (context_resize, canvas_resize) = (context_init.clone(), canvas.clone());
			*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
				let win: Window = web_sys::window().unwrap();
				let (nw, nh) = (
					win.inner_width().unwrap().as_f64().unwrap(),
					win.inner_height().unwrap().as_f64().unwrap(),
				);
				canvas_resize.set_width(nw as u32);
				canvas_resize.set_height(nh as u32);
				if let Some(ref mut c) = *context_resize.borrow_mut() {
					c.map_window.on_resize(nw, nh);
				}
			}));
			if let Some(ref cb) = *resize_cb_init.borrow() {
				let _ =
					window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}

		let (context_anim, animate_inner) = (context_init.clone(), animate_init.clone());
		let redraw_anim = needs_redraw_init.clone();
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if redraw_anim.replace(false)
				&& let Some(ref c) = *context_anim.borrow()
			{
				render::render(&c.graph, &c.map_window, &c.controls, &ctx, &c.theme);
			}
			if let Some(ref cb) = *animate_inner.borrow() {
				let _ = web_sys::window()
					.unwrap()
					.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let cursor_position = move |ev: &MouseEvent| {
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		let rect = canvas.get_bounding_client_rect();
		Position::new(
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		)
	};

	let context_md = context.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let position = cursor_position(&ev);
		if let Some(ref mut c) = *context_md.borrow_mut() {
			c.controls.on_mouse_down(position);
		}
	};

	let context_mm = context.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let position = cursor_position(&ev);
		if let Some(ref mut c) = *context_mm.borrow_mut() {
			let EditorContext {
				controls,
				map_window,
				..
			} = c;
			controls.on_mouse_move(position, map_window);
		}
	};

	let context_mu = context.clone();
	let redraw_mu = needs_redraw.clone();
	let on_mouseup = move |ev: MouseEvent| {
		let position = cursor_position(&ev);
		if let Some(ref mut c) = *context_mu.borrow_mut() {
			let EditorContext {
				controls,
				graph,
				map_window,
				..
			} = c;
			controls.on_mouse_up(position, graph, map_window);
		}
		redraw_mu.set(true);
		panel_version.update(|n| *n += 1);
	};

	let context_ml = context.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut c) = *context_ml.borrow_mut() {
			c.controls.on_mouse_leave();
		}
	};

	let context_wh = context.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let position = cursor_position(&ev);
		if let Some(ref mut c) = *context_wh.borrow_mut() {
			c.map_window.on_scroll(ev.delta_y(), position);
		}
	};

	let set_mode = {
		let context = context.clone();
		let needs_redraw = needs_redraw.clone();
		move |mode: EditMode| {
			if let Some(ref mut c) = *context.borrow_mut() {
				let EditorContext {
					controls, graph, ..
				} = c;
				controls.set_edit_mode(graph, mode);
			}
			current_mode.set(mode);
			needs_redraw.set(true);
			panel_version.update(|n| *n += 1);
		}
	};
	let nav_click = {
		let set_mode = set_mode.clone();
		move |_: MouseEvent| set_mode(EditMode::Navigation)
	};
	let vertex_click = {
		let set_mode = set_mode.clone();
		move |_: MouseEvent| set_mode(EditMode::VertexCreation)
	};
	let edge_click = {
		let set_mode = set_mode.clone();
		move |_: MouseEvent| set_mode(EditMode::EdgeCreation)
	};
	let path_click = move |_: MouseEvent| set_mode(EditMode::PathPlanning);

	let mode_button_class = move |mode: EditMode| {
		move || {
			if current_mode.get() == mode {
				"tool-button is-active"
			} else {
				"tool-button"
			}
		}
	};

	let set_variant = {
		let context = context.clone();
		move |variant: EdgeVariant| {
			if let Some(ref mut c) = *context.borrow_mut() {
				c.controls.set_edge_variant(variant);
			}
			current_variant.set(variant);
		}
	};
	let two_way_click = {
		let set_variant = set_variant.clone();
		move |_: MouseEvent| set_variant(EdgeVariant::Bidirectional)
	};
	let one_way_click = move |_: MouseEvent| set_variant(EdgeVariant::Unidirectional);

	let variant_button_class = move |variant: EdgeVariant| {
		move || {
			if current_variant.get() == variant {
				"tool-button is-active"
			} else {
				"tool-button"
			}
		}
	};

	let context_zi = context.clone();
	let on_zoom_in = move |_: MouseEvent| {
		if let Some(ref mut c) = *context_zi.borrow_mut() {
			c.map_window.on_zoom_in();
		}
	};
	let context_zo = context.clone();
	let on_zoom_out = move |_: MouseEvent| {
		if let Some(ref mut c) = *context_zo.borrow_mut() {
			c.map_window.on_zoom_out();
		}
	};

	let context_panel_handle = StoredValue::new_local(context.clone());
	let redraw_panel_handle = StoredValue::new_local(needs_redraw.clone());
	let panel = move || {
		panel_version.get();
		let context_panel = context_panel_handle.get_value();
		let redraw_panel = redraw_panel_handle.get_value();
		let borrowed = context_panel.borrow();
		let Some(c) = borrowed.as_ref() else {
			return ().into_any();
		};
		let name_of = |id: Option<VertexId>| {
			id.and_then(|id| c.graph.vertex(id))
				.map(|vertex| vertex.name.clone())
				.unwrap_or_default()
		};
		match c.controls.active_editor() {
			None => ().into_any(),
			Some(ActiveEditor::Vertex(editor)) => vertex_panel(
				editor.vertex(),
				name_of(Some(editor.vertex())),
				context_panel.clone(),
				redraw_panel.clone(),
				panel_version,
			)
			.into_any(),
			Some(ActiveEditor::Edge(editor)) => edge_panel(
				name_of(editor.first()),
				name_of(editor.second()),
				context_panel.clone(),
				redraw_panel.clone(),
				panel_version,
			)
			.into_any(),
			Some(ActiveEditor::Path(editor)) => {
				let steps = editor.path().map(|path| {
					path.iter()
						.filter_map(|id| c.graph.vertex(*id))
						.map(|vertex| vertex.name.clone())
						.collect::<Vec<_>>()
				});
				let not_found = matches!(editor.planner().outcome(), Some(PlanOutcome::NotFound));
				path_panel(
					name_of(editor.planner().start()),
					name_of(editor.planner().end()),
					steps,
					not_found,
				)
				.into_any()
			}
		}
	};

	view! {
		<div class="map-editor">
			<canvas
				node_ref=canvas_ref
				class="map-editor-canvas"
				on:mousedown=on_mousedown
				on:mousemove=on_mousemove
				on:mouseup=on_mouseup
				on:mouseleave=on_mouseleave
				on:wheel=on_wheel
				style="display: block; cursor: grab;"
			/>
			<div class="toolbar">
				<button class=mode_button_class(EditMode::Navigation) on:click=nav_click>
					"Navigate"
				</button>
				<button class=mode_button_class(EditMode::VertexCreation) on:click=vertex_click>
					"Add vertex"
				</button>
				<button class=mode_button_class(EditMode::EdgeCreation) on:click=edge_click>
					"Add edge"
				</button>
				<button class=mode_button_class(EditMode::PathPlanning) on:click=path_click>
					"Plan path"
				</button>
				<span class="toolbar-divider" />
				<button
					class=variant_button_class(EdgeVariant::Bidirectional)
					on:click=two_way_click
				>
					"Two-way edges"
				</button>
				<button
					class=variant_button_class(EdgeVariant::Unidirectional)
					on:click=one_way_click
				>
					"One-way edges"
				</button>
				<span class="toolbar-divider" />
				<button class="tool-button" on:click=on_zoom_in>
					"Zoom in"
				</button>
				<button class="tool-button" on:click=on_zoom_out>
					"Zoom out"
				</button>
			</div>
			<aside class="side-panel">{panel}</aside>
		</div>
	}
}

/// Inspector for one vertex: editable name, delete, plan-a-path.
fn vertex_panel(
	vertex: VertexId,
	name: String,
	context: SharedContext,
	needs_redraw: Rc<Cell<bool>>,
	panel_version: RwSignal<u32>,
) -> impl IntoView {
	let context_rename = context.clone();
	let on_name_input = move |ev: web_sys::Event| {
		if let Some(ref mut c) = *context_rename.borrow_mut() {
			c.graph.rename_vertex(vertex, event_target_value(&ev));
		}
	};

	let context_delete = context.clone();
	let on_delete = move |_: MouseEvent| {
		if let Some(ref mut c) = *context_delete.borrow_mut() {
			let EditorContext {
				controls, graph, ..
			} = c;
			controls.delete_inspected_vertex(graph);
		}
		panel_version.update(|n| *n += 1);
	};

	let context_plan = context.clone();
	let on_plan = move |_: MouseEvent| {
		if let Some(ref mut c) = *context_plan.borrow_mut() {
			let EditorContext {
				controls, graph, ..
			} = c;
			controls.plan_path_from(graph, vertex);
		}
		needs_redraw.set(true);
		panel_version.update(|n| *n += 1);
	};

	view! {
		<div class="vertex-editor">
			<input class="name-input" name="name" prop:value=name on:input=on_name_input />
			<button class="panel-button" on:click=on_delete>
				"Delete"
			</button>
			<button class="panel-button" on:click=on_plan>
				"Plan a path from here"
			</button>
		</div>
	}
}

/// Edge creation panel: the two selected endpoints and a save action that
/// finishes editing.
fn edge_panel(
	first: String,
	second: String,
	context: SharedContext,
	needs_redraw: Rc<Cell<bool>>,
	panel_version: RwSignal<u32>,
) -> impl IntoView {
	let on_save = move |_: MouseEvent| {
		if let Some(ref mut c) = *context.borrow_mut() {
			let EditorContext {
				controls, graph, ..
			} = c;
			controls.close_editor(graph);
		}
		needs_redraw.set(true);
		panel_version.update(|n| *n += 1);
	};

	view! {
		<div class="edge-editor">
			<input name="vertex-one" prop:value=first readonly=true />
			<input name="vertex-two" prop:value=second readonly=true />
			<p class="panel-hint">"Click two vertices to connect them."</p>
			<button class="panel-button" on:click=on_save>
				"Save"
			</button>
		</div>
	}
}

/// Path planning panel: selected endpoints plus the planned steps or the
/// no-path notice.
fn path_panel(
	start: String,
	end: String,
	steps: Option<Vec<String>>,
	not_found: bool,
) -> impl IntoView {
	let result = if not_found {
		view! { <p class="panel-hint">"No path found."</p> }.into_any()
	} else {
		match steps {
			Some(steps) => steps
				.into_iter()
				.map(|step| {
					view! {
						<div class="step-container">
							<p class="step-title">{step}</p>
						</div>
					}
				})
				.collect_view()
				.into_any(),
			None => view! { <p class="panel-hint">"Select start and end vertices."</p> }.into_any(),
		}
	};

	view! {
		<div class="path-planner">
			<input name="start" prop:value=start readonly=true />
			<input name="end" prop:value=end readonly=true />
			<div class="path-steps">{result}</div>
		</div>
	}
}
