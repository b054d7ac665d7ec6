//! Mode and log broadcast channels, and the controller that reacts to them.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use log::{info, warn};

use crate::layout::LayoutSurface;
use crate::mode::{DragMode, GraphMode, ModeEvent, ModeKind};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber<T> = Rc<dyn Fn(&T)>;

struct ChannelInner<T> {
	next_id: u64,
	subscribers: Vec<(SubscriptionId, Subscriber<T>)>,
}

/// Synchronous multicast: `emit` calls every current subscriber in
/// subscription order. Nothing is buffered for later subscribers.
pub struct Channel<T> {
	inner: Rc<RefCell<ChannelInner<T>>>,
}

impl<T> Clone for Channel<T> {
	fn clone(&self) -> Self {
		Self {
			inner: self.inner.clone(),
		}
	}
}

impl<T> Default for Channel<T> {
	fn default() -> Self {
		Self {
			inner: Rc::new(RefCell::new(ChannelInner {
				next_id: 0,
				subscribers: Vec::new(),
			})),
		}
	}
}

impl<T> Channel<T> {
	pub fn subscribe(&self, subscriber: impl Fn(&T) + 'static) -> SubscriptionId {
		let mut inner = self.inner.borrow_mut();
		let id = SubscriptionId(inner.next_id);
		inner.next_id += 1;
		inner.subscribers.push((id, Rc::new(subscriber)));
		id
	}

	pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
		let mut inner = self.inner.borrow_mut();
		let before = inner.subscribers.len();
		inner.subscribers.retain(|(s, _)| *s != id);
		inner.subscribers.len() != before
	}

	/// Delivers `value` and returns how many subscribers saw it.
	///
	/// The subscriber list is snapshotted first, so subscribers may publish or
	/// (un)subscribe from inside the callback.
	pub fn emit(&self, value: &T) -> usize {
		let subscribers: Vec<Subscriber<T>> = self
			.inner
			.borrow()
			.subscribers
			.iter()
			.map(|(_, s)| s.clone())
			.collect();
		for subscriber in &subscribers {
			subscriber(value);
		}
		subscribers.len()
	}

	pub fn subscriber_count(&self) -> usize {
		self.inner.borrow().subscribers.len()
	}
}

/// Session-scoped event hub. Clones share the same channels.
#[derive(Clone, Default)]
pub struct EventService {
	modes: Channel<ModeEvent>,
	logs: Channel<String>,
}

impl EventService {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn change_mode(&self, event: ModeEvent) -> usize {
		self.modes.emit(&event)
	}

	pub fn subscribe_mode(&self, subscriber: impl Fn(&ModeEvent) + 'static) -> SubscriptionId {
		self.modes.subscribe(subscriber)
	}

	pub fn unsubscribe_mode(&self, id: SubscriptionId) -> bool {
		self.modes.unsubscribe(id)
	}

	pub fn emit_log(&self, message: impl Into<String>) -> usize {
		self.logs.emit(&message.into())
	}

	pub fn subscribe_log(&self, subscriber: impl Fn(&String) + 'static) -> SubscriptionId {
		self.logs.subscribe(subscriber)
	}

	pub fn unsubscribe_log(&self, id: SubscriptionId) -> bool {
		self.logs.unsubscribe(id)
	}
}

pub type SharedController = Rc<RefCell<ModeController>>;

/// Holds the layout and exactly one active mode.
pub struct ModeController {
	layout: LayoutSurface,
	mode: Box<dyn GraphMode>,
	events: EventService,
	subscription: Option<SubscriptionId>,
}

impl ModeController {
	/// Starts in drag mode.
	pub fn new(layout: LayoutSurface, events: EventService) -> Self {
		Self::with_mode(layout, events, Box::new(DragMode::new()))
	}

	pub fn with_mode(
		mut layout: LayoutSurface,
		events: EventService,
		mut mode: Box<dyn GraphMode>,
	) -> Self {
		mode.apply(&mut layout);
		info!("mode {:?} applied", mode.kind());
		Self {
			layout,
			mode,
			events,
			subscription: None,
		}
	}

	/// Subscribes the controller to mode changes on its event service.
	pub fn attach(self) -> SharedController {
		let events = self.events.clone();
		let shared = Rc::new(RefCell::new(self));
		let weak: Weak<RefCell<ModeController>> = Rc::downgrade(&shared);
		let id = events.subscribe_mode(move |event| {
			let Some(controller) = weak.upgrade() else {
				return;
			};
			match controller.try_borrow_mut() {
				Ok(mut controller) => controller.switch(event),
				Err(_) => warn!("mode change to {:?} dropped: controller busy", event.kind()),
			};
		});
		shared.borrow_mut().subscription = Some(id);
		shared
	}

	/// Exits the active mode, then builds and applies the requested one.
	pub fn switch(&mut self, event: &ModeEvent) {
		self.mode.exit(&mut self.layout);
		self.mode = event.build(&self.events);
		self.mode.apply(&mut self.layout);
		info!("mode {:?} applied", event.kind());
		self.events.emit_log(format!("mode: {:?}", event.kind()));
	}

	pub fn mode_kind(&self) -> ModeKind {
		self.mode.kind()
	}

	pub fn play(&mut self) {
		self.mode.play();
	}

	pub fn pause(&mut self) {
		self.mode.pause();
	}

	pub fn layout(&self) -> &LayoutSurface {
		&self.layout
	}

	pub fn layout_mut(&mut self) -> &mut LayoutSurface {
		&mut self.layout
	}

	pub fn events(&self) -> &EventService {
		&self.events
	}

	pub fn tick(&mut self, dt: f64) -> bool {
		self.layout.tick(dt)
	}
}

impl Drop for ModeController {
	fn drop(&mut self) {
		if let Some(id) = self.subscription.take() {
			self.events.unsubscribe_mode(id);
		}
	}
}
