//! Bridge between the graph, its visual bindings and the live simulation.

pub mod binding;
pub mod forces;
pub mod input;
mod simulation;

use log::debug;

pub use binding::{
	BindReport, EdgeJoin, EdgeVisual, NodeVisual, VisualSet, edge_key, node_key,
};
pub use input::{Handler, HandlerId, InputBindings, InputEvent, InputKind};
pub use simulation::Simulation;

use crate::config::{ForceConfig, ViewConfig};
use crate::graph::{Graph, NodeIdx};

#[derive(Clone, Debug, Default)]
struct PointerState {
	drag: Option<NodeIdx>,
	hovered: Option<NodeIdx>,
}

/// Owns the graph for a session together with everything that mirrors it.
///
/// Bindings are not refreshed automatically: after adding a node or edge call
/// [`LayoutSurface::rebuild`] (or the individual `bind_*` and
/// [`LayoutSurface::default_force_simulation`]) or the new elements are neither
/// drawn nor animated.
pub struct LayoutSurface {
	graph: Graph,
	view: ViewConfig,
	forces: ForceConfig,
	nodes: VisualSet<NodeVisual>,
	edges: VisualSet<EdgeVisual, EdgeJoin>,
	simulation: Simulation,
	input: InputBindings,
	pointer: PointerState,
}

impl LayoutSurface {
	/// The initial simulation is stopped until a mode starts one.
	pub fn new(graph: Graph, view: ViewConfig, forces: ForceConfig) -> Self {
		let mut simulation = Simulation::new(&graph, &view, &forces);
		simulation.stop();
		Self {
			graph,
			view,
			forces,
			nodes: VisualSet::default(),
			edges: VisualSet::default(),
			simulation,
			input: InputBindings::default(),
			pointer: PointerState::default(),
		}
	}

	pub fn graph(&self) -> &Graph {
		&self.graph
	}

	pub fn graph_mut(&mut self) -> &mut Graph {
		&mut self.graph
	}

	pub fn view(&self) -> &ViewConfig {
		&self.view
	}

	pub fn force_config(&self) -> &ForceConfig {
		&self.forces
	}

	pub fn simulation(&self) -> &Simulation {
		&self.simulation
	}

	pub fn simulation_mut(&mut self) -> &mut Simulation {
		&mut self.simulation
	}

	pub fn input(&self) -> &InputBindings {
		&self.input
	}

	pub fn input_mut(&mut self) -> &mut InputBindings {
		&mut self.input
	}

	pub fn bind_edges(&mut self) -> BindReport<EdgeJoin> {
		let graph = &self.graph;
		let report = self.edges.reconcile(
			graph.edge_entries().map(|(idx, edge)| {
				let join = (edge.from().to_string(), edge.to().to_string());
				(join, (idx, edge))
			}),
			|(from, to), (idx, edge)| {
				EdgeVisual::enter(
					&edge_key(from, to),
					idx,
					graph.node(edge.source()),
					graph.node(edge.target()),
				)
			},
		);
		if !report.is_empty() {
			debug!(
				"edges bound: +{} -{}",
				report.entered.len(),
				report.exited.len()
			);
		}
		report
	}

	pub fn bind_nodes(&mut self) -> BindReport {
		let (graph, radius) = (&self.graph, self.view.node_radius);
		let report = self.nodes.reconcile(
			graph
				.node_entries()
				.map(|(idx, node)| (node_key(node.id()), (idx, node))),
			|key, (idx, node)| NodeVisual::enter(key, idx, node, radius),
		);
		if !report.is_empty() {
			debug!(
				"nodes bound: +{} -{}",
				report.entered.len(),
				report.exited.len()
			);
		}
		report
	}

	/// Discards the current simulation and starts one over the current graph.
	pub fn default_force_simulation(&mut self) -> &mut Simulation {
		self.simulation = Simulation::new(&self.graph, &self.view, &self.forces);
		&mut self.simulation
	}

	/// Rebinds visuals and restarts the simulation after a structural change.
	pub fn rebuild(&mut self) {
		self.bind_edges();
		self.bind_nodes();
		self.default_force_simulation();
	}

	pub fn stop_simulation(&mut self) {
		self.simulation.stop();
	}

	/// Host animation frame: advances the simulation if it is running and
	/// projects positions onto the bound visuals. Returns whether it ticked.
	pub fn tick(&mut self, dt: f64) -> bool {
		let ticked = self.simulation.step(self.graph.nodes_mut());
		if ticked {
			self.project();
		}
		for visual in self.nodes.iter_mut() {
			visual.radius.advance(dt);
		}
		ticked
	}

	/// Copies node positions onto node visuals and edge endpoints.
	pub fn project(&mut self) {
		let graph = &self.graph;
		for visual in self.nodes.iter_mut() {
			let node = graph.node(visual.node);
			visual.x = node.x;
			visual.y = node.y;
		}
		for visual in self.edges.iter_mut() {
			let edge = graph.edge(visual.edge);
			let (s, t) = (graph.node(edge.source()), graph.node(edge.target()));
			visual.x1 = s.x;
			visual.y1 = s.y;
			visual.x2 = t.x;
			visual.y2 = t.y;
		}
	}

	pub fn node_visuals(&self) -> &VisualSet<NodeVisual> {
		&self.nodes
	}

	pub fn edge_visuals(&self) -> &VisualSet<EdgeVisual, EdgeJoin> {
		&self.edges
	}

	pub fn node_visual(&self, id: &str) -> Option<&NodeVisual> {
		self.nodes.get(&node_key(id))
	}

	pub fn node_visual_mut(&mut self, id: &str) -> Option<&mut NodeVisual> {
		self.nodes.get_mut(&node_key(id))
	}

	pub fn edge_visual(&self, from: &str, to: &str) -> Option<&EdgeVisual> {
		self.edges.get(&(from.to_string(), to.to_string()))
	}

	/// Starts the hover radius transition for `node`.
	pub fn focus_node(&mut self, node: NodeIdx, focused: bool) {
		let radius = if focused {
			self.view.node_radius_on_focus
		} else {
			self.view.node_radius
		};
		let duration = self.view.focus_transition;
		let key = node_key(self.graph.node(node).id());
		if let Some(visual) = self.nodes.get_mut(&key) {
			visual.radius.retarget(radius, duration);
		}
	}

	pub fn set_node_fill(&mut self, id: &str, fill: Option<&str>) {
		if let Some(visual) = self.node_visual_mut(id) {
			visual.fill = fill.map(str::to_string);
		}
	}

	/// Topmost node visual under `(x, y)`.
	pub fn node_at(&self, x: f64, y: f64) -> Option<NodeIdx> {
		let padding = self.view.hit_padding;
		self.nodes
			.iter()
			.filter(|v| {
				let (dx, dy) = (v.x - x, v.y - y);
				(dx * dx + dy * dy).sqrt() < v.radius.value() + padding
			})
			.last()
			.map(|v| v.node)
	}

	pub fn dragging(&self) -> Option<NodeIdx> {
		self.pointer.drag
	}

	pub fn hovered(&self) -> Option<NodeIdx> {
		self.pointer.hovered
	}

	/// A press goes either to the node under the pointer or to the canvas,
	/// never both.
	pub fn pointer_down(&mut self, x: f64, y: f64) -> usize {
		match self.node_at(x, y) {
			Some(node) => {
				// Without drag handlers the press must not suspend hover tracking.
				if self.input.count(InputKind::DragStart) > 0 {
					self.pointer.drag = Some(node);
				}
				self.fire(InputKind::NodePress, x, y, Some(node))
					+ self.fire(InputKind::DragStart, x, y, Some(node))
			}
			None => self.fire(InputKind::CanvasPress, x, y, None),
		}
	}

	pub fn pointer_move(&mut self, x: f64, y: f64) -> usize {
		if let Some(node) = self.pointer.drag {
			return self.fire(InputKind::DragMove, x, y, Some(node));
		}
		let hit = self.node_at(x, y);
		if hit == self.pointer.hovered {
			return 0;
		}
		let previous = std::mem::replace(&mut self.pointer.hovered, hit);
		let mut fired = 0;
		if let Some(node) = previous {
			fired += self.fire(InputKind::HoverOut, x, y, Some(node));
		}
		if let Some(node) = hit {
			fired += self.fire(InputKind::HoverIn, x, y, Some(node));
		}
		fired
	}

	pub fn pointer_up(&mut self, x: f64, y: f64) -> usize {
		match self.pointer.drag.take() {
			Some(node) => self.fire(InputKind::DragEnd, x, y, Some(node)),
			None => 0,
		}
	}

	/// Pointer left the canvas: ends any drag and clears hover.
	pub fn pointer_leave(&mut self) -> usize {
		let mut fired = 0;
		if let Some(node) = self.pointer.drag.take() {
			let (x, y) = (self.graph.node(node).x, self.graph.node(node).y);
			fired += self.fire(InputKind::DragEnd, x, y, Some(node));
		}
		if let Some(node) = self.pointer.hovered.take() {
			let (x, y) = (self.graph.node(node).x, self.graph.node(node).y);
			fired += self.fire(InputKind::HoverOut, x, y, Some(node));
		}
		fired
	}

	fn fire(&mut self, kind: InputKind, x: f64, y: f64, node: Option<NodeIdx>) -> usize {
		let event = InputEvent { kind, x, y, node };
		let handlers = self.input.handlers_for(kind);
		for handler in &handlers {
			handler(self, &event);
		}
		handlers.len()
	}
}
