use log::debug;

use super::forces::{CenterForce, CollideForce, Force, Jiggle, LinkForce, ManyBodyForce};
use crate::config::{ForceConfig, ViewConfig};
use crate::graph::{Graph, Node};

/// Cooling force layout over the nodes of one [`Graph`] snapshot.
///
/// The link force is built from the edge list at construction time, so after
/// any structural change the simulation has to be rebuilt.
pub struct Simulation {
	forces: Vec<(&'static str, Box<dyn Force>)>,
	alpha: f64,
	alpha_min: f64,
	alpha_decay: f64,
	alpha_target: f64,
	velocity_decay: f64,
	node_count: usize,
	running: bool,
	jiggle: Jiggle,
}

impl Simulation {
	pub fn new(graph: &Graph, view: &ViewConfig, config: &ForceConfig) -> Self {
		let (cx, cy) = view.center();
		let forces: Vec<(&'static str, Box<dyn Force>)> = vec![
			(
				"center",
				Box::new(CenterForce {
					x: cx,
					y: cy,
					strength: config.center_strength,
				}),
			),
			(
				"link",
				Box::new(LinkForce::new(
					graph.edges(),
					graph.node_count(),
					config.link_distance,
				)),
			),
			(
				"collision",
				Box::new(CollideForce {
					radius: view.collision_radius,
					strength: config.collide_strength,
				}),
			),
			(
				"charge",
				Box::new(ManyBodyForce {
					strength: config.charge_strength,
					distance_min: config.charge_distance_min,
					distance_max: config.charge_distance_max,
				}),
			),
		];
		debug!(
			"simulation built: {} nodes, {} edges",
			graph.node_count(),
			graph.edge_count()
		);

		Self {
			forces,
			alpha: 1.0,
			alpha_min: config.alpha_min,
			alpha_decay: config.alpha_decay,
			alpha_target: 0.0,
			velocity_decay: 1.0 - config.velocity_decay,
			node_count: graph.node_count(),
			running: true,
			jiggle: Jiggle::default(),
		}
	}

	pub fn alpha(&self) -> f64 {
		self.alpha
	}

	pub fn set_alpha(&mut self, alpha: f64) {
		self.alpha = alpha;
	}

	pub fn alpha_target(&self) -> f64 {
		self.alpha_target
	}

	pub fn set_alpha_target(&mut self, target: f64) {
		self.alpha_target = target;
	}

	pub fn is_running(&self) -> bool {
		self.running
	}

	/// Number of nodes the forces were built for.
	pub fn node_count(&self) -> usize {
		self.node_count
	}

	pub fn restart(&mut self) {
		self.running = true;
	}

	/// Halts future ticks; positions already applied stay where they are.
	pub fn stop(&mut self) {
		self.running = false;
	}

	/// One integration step, regardless of whether the simulation is running.
	pub fn tick(&mut self, nodes: &mut [Node]) {
		self.alpha += (self.alpha_target - self.alpha) * self.alpha_decay;

		for (_, force) in &mut self.forces {
			force.apply(nodes, self.alpha, &mut self.jiggle);
		}

		for node in nodes.iter_mut() {
			match node.fx {
				Some(fx) => {
					node.x = fx;
					node.vx = 0.0;
				}
				None => {
					node.vx *= self.velocity_decay;
					node.x += node.vx;
				}
			}
			match node.fy {
				Some(fy) => {
					node.y = fy;
					node.vy = 0.0;
				}
				None => {
					node.vy *= self.velocity_decay;
					node.y += node.vy;
				}
			}
		}
	}

	/// Scheduler entry point: ticks if running and stops once cooled.
	///
	/// Returns whether a tick happened.
	pub fn step(&mut self, nodes: &mut [Node]) -> bool {
		if !self.running {
			return false;
		}
		self.tick(nodes);
		if self.alpha < self.alpha_min {
			debug!("simulation settled");
			self.running = false;
		}
		true
	}

	pub fn force_names(&self) -> impl Iterator<Item = &'static str> + '_ {
		self.forces.iter().map(|(name, _)| *name)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn graph() -> Graph {
		Graph::new(
			[
				Node::at("a", 300.0, 150.0),
				Node::at("b", 310.0, 160.0),
				Node::at("c", 400.0, 170.0),
			],
			[("a", "b"), ("b", "c")],
		)
		.unwrap()
	}

	fn simulation(graph: &Graph) -> Simulation {
		Simulation::new(graph, &ViewConfig::default(), &ForceConfig::default())
	}

	#[test]
	fn registers_all_forces() {
		let graph = graph();
		let sim = simulation(&graph);
		let names: Vec<_> = sim.force_names().collect();
		assert_eq!(names, ["center", "link", "collision", "charge"]);
		assert_eq!(sim.node_count(), 3);
	}

	#[test]
	fn cools_down_and_stops() {
		let mut graph = graph();
		let mut sim = simulation(&graph);
		let mut ticks = 0;
		while sim.step(graph.nodes_mut()) {
			ticks += 1;
			assert!(ticks < 1000);
		}
		assert!(!sim.is_running());
		assert!(sim.alpha() < 0.001);
		for node in graph.nodes() {
			assert!(node.x.is_finite() && node.y.is_finite());
		}
	}

	#[test]
	fn alpha_target_keeps_it_warm() {
		let mut graph = graph();
		let mut sim = simulation(&graph);
		sim.set_alpha_target(0.6);
		for _ in 0..1000 {
			assert!(sim.step(graph.nodes_mut()));
		}
		assert!((sim.alpha() - 0.6).abs() < 0.01);
	}

	#[test]
	fn pinned_node_stays_put() {
		let mut graph = graph();
		let mut sim = simulation(&graph);
		graph.node_mut("a").unwrap().pin(5.0, 5.0);
		for _ in 0..50 {
			sim.tick(graph.nodes_mut());
		}
		let a = graph.get_node("a").unwrap();
		assert_eq!((a.x, a.y), (5.0, 5.0));
		assert_eq!((a.vx, a.vy), (0.0, 0.0));
	}

	#[test]
	fn stop_halts_steps_until_restart() {
		let mut graph = graph();
		let mut sim = simulation(&graph);
		sim.stop();
		let before = graph.nodes().to_vec();
		assert!(!sim.step(graph.nodes_mut()));
		assert_eq!(graph.nodes(), &before[..]);
		sim.restart();
		assert!(sim.step(graph.nodes_mut()));
		assert_ne!(graph.nodes(), &before[..]);
	}

	#[test]
	fn linked_nodes_settle_near_link_distance() {
		let mut graph = Graph::new(
			[Node::at("a", 200.0, 150.0), Node::at("b", 500.0, 170.0)],
			[("a", "b")],
		)
		.unwrap();
		let mut sim = simulation(&graph);
		while sim.step(graph.nodes_mut()) {}
		let (a, b) = (&graph.nodes()[0], &graph.nodes()[1]);
		let d = ((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt();
		// Spring rest length 30, pushed out a little by the charge.
		assert!(d > 25.0 && d < 80.0, "{d}");
	}
}
