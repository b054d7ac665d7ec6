//! Individual forces applied by [`Simulation`](super::Simulation) each tick.
//!
//! Forces read positions and add to velocities; only [`CenterForce`] moves
//! positions directly. Pairwise forces are computed brute force, which is fine
//! for the hand-built graphs this surface edits.

use crate::graph::{Edge, Node};

/// Deterministic stand-in for a random nudge, used to split coincident points.
#[derive(Clone, Debug, Default)]
pub struct Jiggle {
	state: u32,
}

impl Jiggle {
	pub fn nudge(&mut self) -> f64 {
		// Numerical Recipes LCG, mapped to roughly [-0.5e-6, 0.5e-6).
		self.state = self.state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
		(self.state as f64 / u32::MAX as f64 - 0.5) * 1e-6
	}
}

pub trait Force {
	fn apply(&mut self, nodes: &mut [Node], alpha: f64, jiggle: &mut Jiggle);
}

/// Translates the whole layout so its mean position sits on `(x, y)`.
pub struct CenterForce {
	pub x: f64,
	pub y: f64,
	pub strength: f64,
}

impl Force for CenterForce {
	fn apply(&mut self, nodes: &mut [Node], _alpha: f64, _jiggle: &mut Jiggle) {
		if nodes.is_empty() {
			return;
		}
		let n = nodes.len() as f64;
		let (sx, sy) = nodes
			.iter()
			.fold((0.0, 0.0), |(sx, sy), node| (sx + node.x, sy + node.y));
		let (dx, dy) = (
			(sx / n - self.x) * self.strength,
			(sy / n - self.y) * self.strength,
		);
		for node in nodes {
			node.x -= dx;
			node.y -= dy;
		}
	}
}

struct Link {
	source: usize,
	target: usize,
	strength: f64,
	bias: f64,
}

/// Spring along each edge toward `distance`.
///
/// Strength and bias come from endpoint degrees, so hubs move less than leaves.
pub struct LinkForce {
	links: Vec<Link>,
	distance: f64,
}

impl LinkForce {
	pub fn new(edges: &[Edge], node_count: usize, distance: f64) -> Self {
		let mut degree = vec![0usize; node_count];
		for edge in edges {
			degree[edge.source().index()] += 1;
			degree[edge.target().index()] += 1;
		}
		let links = edges
			.iter()
			.map(|edge| {
				let (s, t) = (edge.source().index(), edge.target().index());
				let (ds, dt) = (degree[s] as f64, degree[t] as f64);
				Link {
					source: s,
					target: t,
					strength: 1.0 / ds.min(dt),
					bias: ds / (ds + dt),
				}
			})
			.collect();
		Self { links, distance }
	}
}

impl Force for LinkForce {
	fn apply(&mut self, nodes: &mut [Node], alpha: f64, jiggle: &mut Jiggle) {
		for link in &self.links {
			if link.source == link.target {
				continue;
			}
			let (s, t) = (&nodes[link.source], &nodes[link.target]);
			let mut x = t.x + t.vx - s.x - s.vx;
			let mut y = t.y + t.vy - s.y - s.vy;
			if x == 0.0 {
				x = jiggle.nudge();
			}
			if y == 0.0 {
				y = jiggle.nudge();
			}
			let l = (x * x + y * y).sqrt();
			let k = (l - self.distance) / l * alpha * link.strength;
			let (x, y) = (x * k, y * k);

			let t = &mut nodes[link.target];
			t.vx -= x * link.bias;
			t.vy -= y * link.bias;
			let s = &mut nodes[link.source];
			s.vx += x * (1.0 - link.bias);
			s.vy += y * (1.0 - link.bias);
		}
	}
}

/// Pushes apart nodes whose circles of `radius` overlap.
pub struct CollideForce {
	pub radius: f64,
	pub strength: f64,
}

impl Force for CollideForce {
	fn apply(&mut self, nodes: &mut [Node], _alpha: f64, jiggle: &mut Jiggle) {
		let r = self.radius * 2.0;
		for i in 0..nodes.len() {
			for j in (i + 1)..nodes.len() {
				let (a, b) = (&nodes[i], &nodes[j]);
				let mut x = a.x + a.vx - b.x - b.vx;
				let mut y = a.y + a.vy - b.y - b.vy;
				let mut l = x * x + y * y;
				if l >= r * r {
					continue;
				}
				if x == 0.0 {
					x = jiggle.nudge();
					l += x * x;
				}
				if y == 0.0 {
					y = jiggle.nudge();
					l += y * y;
				}
				let d = l.sqrt();
				let k = (r - d) / d * self.strength;
				// Equal radii: each side takes half the correction.
				let (x, y) = (x * k * 0.5, y * k * 0.5);
				nodes[i].vx += x;
				nodes[i].vy += y;
				nodes[j].vx -= x;
				nodes[j].vy -= y;
			}
		}
	}
}

/// Pairwise charge; negative strength repels.
///
/// Pairs at or beyond `distance_max` are skipped.
pub struct ManyBodyForce {
	pub strength: f64,
	pub distance_min: f64,
	pub distance_max: f64,
}

impl Force for ManyBodyForce {
	fn apply(&mut self, nodes: &mut [Node], alpha: f64, jiggle: &mut Jiggle) {
		let (min2, max2) = (
			self.distance_min * self.distance_min,
			self.distance_max * self.distance_max,
		);
		let positions: Vec<(f64, f64)> = nodes.iter().map(|n| (n.x, n.y)).collect();
		for (i, node) in nodes.iter_mut().enumerate() {
			for (j, &(px, py)) in positions.iter().enumerate() {
				if i == j {
					continue;
				}
				let (mut x, mut y) = (px - node.x, py - node.y);
				let mut l = x * x + y * y;
				if l >= max2 {
					continue;
				}
				if x == 0.0 {
					x = jiggle.nudge();
					l += x * x;
				}
				if y == 0.0 {
					y = jiggle.nudge();
					l += y * y;
				}
				if l < min2 {
					l = (min2 * l).sqrt();
				}
				let w = self.strength * alpha / l;
				node.vx += x * w;
				node.vy += y * w;
			}
		}
	}
}
