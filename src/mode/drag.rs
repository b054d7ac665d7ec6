use log::debug;

use super::{GraphMode, ModeKind, hover_in, hover_out};
use crate::layout::{HandlerId, InputEvent, InputKind, LayoutSurface};

/// Press-and-hold pins a node and lets the layout re-settle around it.
#[derive(Debug, Default)]
pub struct DragMode {
	handlers: Vec<HandlerId>,
}

impl DragMode {
	pub fn new() -> Self {
		Self::default()
	}
}

fn drag_started(layout: &mut LayoutSurface, event: &InputEvent) {
	let Some(idx) = event.node else {
		return;
	};
	let target = layout.force_config().drag_alpha_target;
	let simulation = layout.simulation_mut();
	simulation.set_alpha_target(target);
	simulation.restart();

	let node = layout.graph_mut().node_at_mut(idx);
	node.pin(node.x, node.y);
	debug!("drag started on {}", node.id());
}

fn dragged(layout: &mut LayoutSurface, event: &InputEvent) {
	let Some(idx) = event.node else {
		return;
	};
	let (x, y) = (layout.view().adjust_x(event.x), layout.view().adjust_y(event.y));
	layout.graph_mut().node_at_mut(idx).pin(x, y);
}

fn drag_ended(layout: &mut LayoutSurface, event: &InputEvent) {
	let Some(idx) = event.node else {
		return;
	};
	layout.simulation_mut().set_alpha_target(0.0);
	layout.graph_mut().node_at_mut(idx).release();
}

impl GraphMode for DragMode {
	fn kind(&self) -> ModeKind {
		ModeKind::Drag
	}

	fn apply(&mut self, layout: &mut LayoutSurface) {
		layout.input_mut().remove_all(self.handlers.drain(..));
		layout.bind_edges();
		layout.bind_nodes();
		layout.default_force_simulation();

		let input = layout.input_mut();
		self.handlers = vec![
			input.install(InputKind::DragStart, drag_started),
			input.install(InputKind::DragMove, dragged),
			input.install(InputKind::DragEnd, drag_ended),
			input.install(InputKind::HoverIn, |layout, ev| hover_in(layout, ev.node)),
			input.install(InputKind::HoverOut, |layout, ev| hover_out(layout, ev.node)),
		];
	}

	fn exit(&mut self, layout: &mut LayoutSurface) {
		layout.stop_simulation();
		layout.simulation_mut().set_alpha_target(0.0);
		// A drag cut short by the switch would otherwise stay pinned.
		if let Some(idx) = layout.dragging() {
			layout.graph_mut().node_at_mut(idx).release();
		}
		layout.input_mut().remove_all(self.handlers.drain(..));
	}
}
