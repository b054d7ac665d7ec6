//! Canvas geometry and force parameters.

pub const WIDTH: f64 = 700.0;
pub const HEIGHT: f64 = 324.0;

pub const NODE_RADIUS: f64 = 4.0;
pub const NODE_RADIUS_ON_FOCUS: f64 = 9.0;
pub const COLLISION_RADIUS: f64 = NODE_RADIUS;
/// Extra slack around a node's radius that still counts as a hit.
pub const HIT_PADDING: f64 = 3.0;
/// Duration of the hover radius transition, in seconds.
pub const FOCUS_TRANSITION: f64 = 0.25;

/// Size of the drawing plane and node geometry.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewConfig {
	pub width: f64,
	pub height: f64,
	pub node_radius: f64,
	pub node_radius_on_focus: f64,
	pub collision_radius: f64,
	pub hit_padding: f64,
	pub focus_transition: f64,
}

impl Default for ViewConfig {
	fn default() -> Self {
		Self {
			width: WIDTH,
			height: HEIGHT,
			node_radius: NODE_RADIUS,
			node_radius_on_focus: NODE_RADIUS_ON_FOCUS,
			collision_radius: COLLISION_RADIUS,
			hit_padding: HIT_PADDING,
			focus_transition: FOCUS_TRANSITION,
		}
	}
}

impl ViewConfig {
	pub fn center(&self) -> (f64, f64) {
		(self.width / 2.0, self.height / 2.0)
	}

	/// Clamps `x` so a node of default radius stays fully on the canvas.
	pub fn adjust_x(&self, x: f64) -> f64 {
		adjust(x, self.node_radius, self.width - self.node_radius)
	}

	pub fn adjust_y(&self, y: f64) -> f64 {
		adjust(y, self.node_radius, self.height - self.node_radius)
	}
}

fn adjust(point: f64, lower: f64, upper: f64) -> f64 {
	point.max(lower).min(upper)
}

/// Parameters of the force simulation.
#[derive(Clone, Debug, PartialEq)]
pub struct ForceConfig {
	pub alpha_min: f64,
	pub alpha_decay: f64,
	pub velocity_decay: f64,
	pub link_distance: f64,
	pub charge_strength: f64,
	pub charge_distance_min: f64,
	pub charge_distance_max: f64,
	pub collide_strength: f64,
	pub center_strength: f64,
	/// Energy target while a node is being dragged.
	pub drag_alpha_target: f64,
}

impl Default for ForceConfig {
	fn default() -> Self {
		let alpha_min = 0.001;
		Self {
			alpha_min,
			alpha_decay: 1.0 - alpha_min.powf(1.0 / 300.0),
			velocity_decay: 0.4,
			link_distance: 30.0,
			charge_strength: -100.0,
			charge_distance_min: 1.0,
			charge_distance_max: 100.0,
			collide_strength: 1.0,
			center_strength: 1.0,
			drag_alpha_target: 0.6,
		}
	}
}
