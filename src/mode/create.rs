use std::cell::RefCell;
use std::rc::Rc;

use log::{info, warn};

use super::{GraphMode, ModeKind, hover_in, hover_out};
use crate::coordinator::EventService;
use crate::graph::{GraphError, IdGenerator, Node};
use crate::layout::{HandlerId, InputEvent, InputKind, LayoutSurface};

/// Fill applied to a node while it is the pending edge source.
pub const SELECTED_FILL: &str = "#ffffff";

#[derive(Debug, Default)]
struct CreateState {
	ids: IdGenerator,
	/// First endpoint of an edge being drawn.
	pending: Option<String>,
}

/// Canvas presses add nodes; two node presses in a row add an edge.
pub struct CreateMode {
	weight: f64,
	state: Rc<RefCell<CreateState>>,
	handlers: Vec<HandlerId>,
	events: EventService,
}

impl CreateMode {
	pub fn new(weight: f64, events: EventService) -> Self {
		Self {
			weight,
			state: Rc::default(),
			handlers: Vec::new(),
			events,
		}
	}

	/// Weight carried by the selection event; edges are unweighted for now.
	pub fn weight(&self) -> f64 {
		self.weight
	}

	pub fn pending(&self) -> Option<String> {
		self.state.borrow().pending.clone()
	}
}

fn report(events: &EventService, err: GraphError) {
	warn!("gesture ignored: {err}");
	events.emit_log(err.to_string());
}

fn canvas_pressed(
	state: &RefCell<CreateState>,
	events: &EventService,
	layout: &mut LayoutSurface,
	event: &InputEvent,
) {
	layout.stop_simulation();
	let id = {
		let graph = layout.graph();
		state.borrow_mut().ids.next_id(|id| !graph.has_node(id))
	};
	match layout.graph_mut().add_node(Node::at(id.clone(), event.x, event.y)) {
		Ok(_) => {
			info!("node {id} created at ({}, {})", event.x, event.y);
			events.emit_log(format!("added node {id}"));
		}
		Err(err) => report(events, err),
	}
	layout.rebuild();
}

fn node_pressed(
	state: &RefCell<CreateState>,
	events: &EventService,
	layout: &mut LayoutSurface,
	event: &InputEvent,
) {
	let Some(idx) = event.node else {
		return;
	};
	let id = layout.graph().node(idx).id().to_string();
	layout.set_node_fill(&id, Some(SELECTED_FILL));

	let pending = state.borrow_mut().pending.take();
	match pending {
		None => state.borrow_mut().pending = Some(id),
		Some(first) if first == id => {
			layout.set_node_fill(&id, None);
			events.emit_log(format!("selection of {id} cancelled"));
		}
		Some(first) => {
			match layout.graph_mut().add_edge(first.as_str(), id.as_str()) {
				Ok(_) => {
					info!("edge {first}->{id} created");
					events.emit_log(format!("added edge {first}->{id}"));
					layout.rebuild();
				}
				Err(err) => report(events, err),
			}
			layout.set_node_fill(&first, None);
			layout.set_node_fill(&id, None);
		}
	}
}

impl GraphMode for CreateMode {
	fn kind(&self) -> ModeKind {
		ModeKind::Create
	}

	fn apply(&mut self, layout: &mut LayoutSurface) {
		layout.input_mut().remove_all(self.handlers.drain(..));
		layout.bind_edges();
		layout.bind_nodes();
		layout.default_force_simulation();

		let (state, events) = (self.state.clone(), self.events.clone());
		let on_canvas = move |layout: &mut LayoutSurface, ev: &InputEvent| {
			canvas_pressed(&state, &events, layout, ev)
		};
		let (state, events) = (self.state.clone(), self.events.clone());
		let on_node = move |layout: &mut LayoutSurface, ev: &InputEvent| {
			node_pressed(&state, &events, layout, ev)
		};

		let input = layout.input_mut();
		self.handlers = vec![
			input.install(InputKind::CanvasPress, on_canvas),
			input.install(InputKind::NodePress, on_node),
			input.install(InputKind::HoverIn, |layout, ev| hover_in(layout, ev.node)),
			input.install(InputKind::HoverOut, |layout, ev| hover_out(layout, ev.node)),
		];
	}

	fn exit(&mut self, layout: &mut LayoutSurface) {
		layout.stop_simulation();
		if let Some(id) = self.state.borrow_mut().pending.take() {
			layout.set_node_fill(&id, None);
		}
		layout.input_mut().remove_all(self.handlers.drain(..));
	}
}
