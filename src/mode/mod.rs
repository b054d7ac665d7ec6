//! Interaction modes: mutually exclusive sets of input handlers.

mod create;
mod drag;

use serde::{Deserialize, Serialize};

pub use create::{CreateMode, SELECTED_FILL};
pub use drag::DragMode;

use crate::coordinator::EventService;
use crate::graph::NodeIdx;
use crate::layout::LayoutSurface;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModeKind {
	Drag,
	Create,
}

/// Mode selection published by the UI, `{"tag": "drag"}` or
/// `{"tag": "create", "weight": n}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "tag", rename_all = "lowercase")]
pub enum ModeEvent {
	Drag,
	Create { weight: f64 },
}

impl ModeEvent {
	pub fn kind(&self) -> ModeKind {
		match self {
			ModeEvent::Drag => ModeKind::Drag,
			ModeEvent::Create { .. } => ModeKind::Create,
		}
	}

	/// Builds a fresh, not yet applied mode for this event.
	pub fn build(&self, events: &EventService) -> Box<dyn GraphMode> {
		match *self {
			ModeEvent::Drag => Box::new(DragMode::new()),
			ModeEvent::Create { weight } => Box::new(CreateMode::new(weight, events.clone())),
		}
	}
}

/// One interaction behaviour over a [`LayoutSurface`].
///
/// `apply` binds visuals, starts the simulation and installs handlers; `exit`
/// stops the simulation and removes exactly the handlers `apply` installed.
pub trait GraphMode {
	fn kind(&self) -> ModeKind;

	fn apply(&mut self, layout: &mut LayoutSurface);

	/// Reserved for modes that animate an algorithm.
	fn play(&mut self) {}

	fn pause(&mut self) {}

	fn exit(&mut self, layout: &mut LayoutSurface);
}

/// Hover handlers shared by every mode.
fn hover_in(layout: &mut LayoutSurface, node: Option<NodeIdx>) {
	if let Some(node) = node {
		layout.focus_node(node, true);
	}
}

fn hover_out(layout: &mut LayoutSurface, node: Option<NodeIdx>) {
	if let Some(node) = node {
		layout.focus_node(node, false);
	}
}
