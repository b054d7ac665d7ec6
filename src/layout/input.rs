//! Handler registry for pointer gestures routed by the layout surface.

use std::rc::Rc;

use super::LayoutSurface;
use crate::graph::NodeIdx;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InputKind {
	DragStart,
	DragMove,
	DragEnd,
	HoverIn,
	HoverOut,
	CanvasPress,
	NodePress,
}

/// A routed gesture, in canvas coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InputEvent {
	pub kind: InputKind,
	pub x: f64,
	pub y: f64,
	/// Node under the pointer, or the drag subject.
	pub node: Option<NodeIdx>,
}

pub type Handler = Rc<dyn Fn(&mut LayoutSurface, &InputEvent)>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct HandlerId(u64);

/// Installed handlers in installation order.
#[derive(Default)]
pub struct InputBindings {
	next_id: u64,
	handlers: Vec<(HandlerId, InputKind, Handler)>,
}

impl InputBindings {
	pub fn install(
		&mut self,
		kind: InputKind,
		handler: impl Fn(&mut LayoutSurface, &InputEvent) + 'static,
	) -> HandlerId {
		let id = HandlerId(self.next_id);
		self.next_id += 1;
		self.handlers.push((id, kind, Rc::new(handler)));
		id
	}

	/// Returns false if `id` was not installed.
	pub fn remove(&mut self, id: HandlerId) -> bool {
		let before = self.handlers.len();
		self.handlers.retain(|(h, _, _)| *h != id);
		self.handlers.len() != before
	}

	/// Removes every id in `ids`, returning how many were installed.
	pub fn remove_all(&mut self, ids: impl IntoIterator<Item = HandlerId>) -> usize {
		ids.into_iter().filter(|&id| self.remove(id)).count()
	}

	/// Snapshot of handlers for `kind`, so dispatch can hand out `&mut LayoutSurface`.
	pub fn handlers_for(&self, kind: InputKind) -> Vec<Handler> {
		self.handlers
			.iter()
			.filter(|(_, k, _)| *k == kind)
			.map(|(_, _, h)| h.clone())
			.collect()
	}

	pub fn count(&self, kind: InputKind) -> usize {
		self.handlers.iter().filter(|(_, k, _)| *k == kind).count()
	}

	pub fn len(&self) -> usize {
		self.handlers.len()
	}

	pub fn is_empty(&self) -> bool {
		self.handlers.is_empty()
	}
}
