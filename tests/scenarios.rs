use std::cell::RefCell;
use std::rc::Rc;

use graph_plane::config::{ForceConfig, ViewConfig};
use graph_plane::coordinator::{EventService, ModeController};
use graph_plane::graph::{Graph, Node};
use graph_plane::layout::{InputKind, LayoutSurface};
use graph_plane::loader::load_graph;
use graph_plane::mode::{CreateMode, DragMode, GraphMode, ModeEvent, ModeKind};

fn two_nodes() -> LayoutSurface {
	let graph = Graph::new(
		[Node::at("A", 100.0, 100.0), Node::at("B", 250.0, 200.0)],
		Vec::<(&str, &str)>::new(),
	)
	.unwrap();
	LayoutSurface::new(graph, ViewConfig::default(), ForceConfig::default())
}

#[test]
fn create_mode_session() {
	let mut layout = two_nodes();
	let mut mode = CreateMode::new(0.0, EventService::new());
	mode.apply(&mut layout);

	// Empty canvas press: new node with the first free id.
	layout.pointer_down(10.0, 20.0);
	layout.pointer_up(10.0, 20.0);
	let created = layout.graph().get_node("0").unwrap();
	assert_eq!((created.x, created.y), (10.0, 20.0));
	assert_eq!(layout.graph().node_count(), 3);

	// A then B: edge A -> B. Positions are read back from the visuals since
	// the restarted simulation may tick in a real host.
	let (ax, ay) = {
		let a = layout.node_visual("A").unwrap();
		(a.x, a.y)
	};
	let (bx, by) = {
		let b = layout.node_visual("B").unwrap();
		(b.x, b.y)
	};
	layout.pointer_down(ax, ay);
	layout.pointer_up(ax, ay);
	layout.pointer_down(bx, by);
	layout.pointer_up(bx, by);
	assert!(layout.graph().has_edge("A", "B"));
	assert_eq!(layout.graph().edge_count(), 1);

	// A then A: nothing added, selection cleared.
	layout.pointer_down(ax, ay);
	layout.pointer_up(ax, ay);
	assert_eq!(mode.pending().as_deref(), Some("A"));
	layout.pointer_down(ax, ay);
	layout.pointer_up(ax, ay);
	assert_eq!(layout.graph().edge_count(), 1);
	assert_eq!(mode.pending(), None);
}

#[test]
fn drag_mode_pins_then_releases() {
	let mut layout = two_nodes();
	let mut mode = DragMode::new();
	mode.apply(&mut layout);

	layout.pointer_down(100.0, 100.0);
	layout.pointer_move(5.0, 5.0);
	let a = layout.graph().get_node("A").unwrap();
	assert_eq!((a.fx, a.fy), (Some(5.0), Some(5.0)));

	// While pinned the simulation holds the node on the pin.
	for _ in 0..10 {
		layout.tick(0.016);
	}
	let a = layout.graph().get_node("A").unwrap();
	assert_eq!((a.x, a.y), (5.0, 5.0));

	layout.pointer_up(5.0, 5.0);
	let a = layout.graph().get_node("A").unwrap();
	assert_eq!((a.fx, a.fy), (None, None));
	assert_eq!(layout.simulation().alpha_target(), 0.0);

	// Free again: the layout pulls it off the corner.
	for _ in 0..10 {
		layout.tick(0.016);
	}
	let a = layout.graph().get_node("A").unwrap();
	assert_ne!((a.x, a.y), (5.0, 5.0));
}

#[test]
fn drag_move_is_clamped() {
	let mut layout = two_nodes();
	let mut mode = DragMode::new();
	mode.apply(&mut layout);

	layout.pointer_down(100.0, 100.0);
	layout.pointer_move(2.0, 400.0);
	let a = layout.graph().get_node("A").unwrap();
	assert_eq!((a.fx, a.fy), (Some(4.0), Some(320.0)));
}

#[test]
fn double_switch_leaves_one_set_of_handlers() {
	let mut layout = two_nodes();
	let mut mode = DragMode::new();
	for _ in 0..2 {
		mode.exit(&mut layout);
		mode.apply(&mut layout);
	}
	for kind in [
		InputKind::DragStart,
		InputKind::DragMove,
		InputKind::DragEnd,
		InputKind::HoverIn,
		InputKind::HoverOut,
	] {
		assert_eq!(layout.input().count(kind), 1, "{kind:?}");
	}

	// One press on a node: one drag-start handler, nothing for node-press.
	assert_eq!(layout.pointer_down(100.0, 100.0), 1);
	assert_eq!(layout.pointer_move(120.0, 110.0), 1);
	assert_eq!(layout.pointer_up(120.0, 110.0), 1);
}

#[test]
fn coordinator_switches_through_the_channel() {
	let events = EventService::new();
	let logs = Rc::new(RefCell::new(Vec::new()));
	let sink = logs.clone();
	events.subscribe_log(move |m| sink.borrow_mut().push(m.clone()));

	let controller = ModeController::new(two_nodes(), events.clone()).attach();
	events.change_mode(ModeEvent::Create { weight: 0.0 });
	events.change_mode(ModeEvent::Create { weight: 0.0 });
	{
		let controller = controller.borrow();
		assert_eq!(controller.mode_kind(), ModeKind::Create);
		let input = controller.layout().input();
		assert_eq!(input.count(InputKind::CanvasPress), 1);
		assert_eq!(input.count(InputKind::NodePress), 1);
		assert_eq!(input.count(InputKind::DragStart), 0);
	}

	// A canvas press reaches exactly the create handler.
	let fired = controller.borrow_mut().layout_mut().pointer_down(30.0, 30.0);
	assert_eq!(fired, 1);
	assert_eq!(controller.borrow().layout().graph().node_count(), 3);

	events.change_mode(ModeEvent::Drag);
	assert_eq!(controller.borrow().mode_kind(), ModeKind::Drag);
	assert_eq!(
		controller
			.borrow()
			.layout()
			.input()
			.count(InputKind::CanvasPress),
		0
	);
	assert_eq!(logs.borrow().last().map(String::as_str), Some("mode: Drag"));
}

#[test]
fn bundled_network_loads() {
	let view = ViewConfig::default();
	let graph = load_graph(include_str!("../assets/network.json"), &view).unwrap();
	assert_eq!(graph.node_count(), 11);
	assert_eq!(graph.edge_count(), 12);
	assert!(graph.has_edge("hub", "1"));
	assert!(graph.has_edge("6", "hub"));

	let mut layout = LayoutSurface::new(graph, view, ForceConfig::default());
	let mut mode = DragMode::new();
	mode.apply(&mut layout);
	let mut ticks = 0;
	while layout.tick(0.016) {
		ticks += 1;
	}
	assert!(ticks > 0 && ticks < 400);
	for node in layout.node_visuals().iter() {
		assert!(node.x.is_finite() && node.y.is_finite());
	}
}
