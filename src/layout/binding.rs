//! Keyed join between graph elements and their visual counterparts.

use std::hash::Hash;

use indexmap::{Equivalent, IndexMap};

use crate::graph::{EdgeIdx, Node, NodeIdx};

pub fn node_key(id: &str) -> String {
	format!("n{id}")
}

/// Lookup key of an edge visual. Not unique once ids contain `-`, so edge
/// visuals are joined on [`EdgeJoin`] instead.
pub fn edge_key(from: &str, to: &str) -> String {
	format!("e{from}-{to}")
}

/// Ordered `(from, to)` id pair that edge visuals are joined on.
pub type EdgeJoin = (String, String);

/// Node radius moving toward a target over a fixed duration.
#[derive(Clone, Debug, PartialEq)]
pub struct Tween {
	from: f64,
	to: f64,
	elapsed: f64,
	duration: f64,
}

impl Tween {
	pub fn settled(value: f64) -> Self {
		Self {
			from: value,
			to: value,
			elapsed: 0.0,
			duration: 0.0,
		}
	}

	pub fn value(&self) -> f64 {
		if self.elapsed >= self.duration {
			return self.to;
		}
		let t = self.elapsed / self.duration;
		// cubic in-out, the usual default for attribute transitions
		let eased = if t < 0.5 {
			4.0 * t * t * t
		} else {
			1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
		};
		self.from + (self.to - self.from) * eased
	}

	pub fn target(&self) -> f64 {
		self.to
	}

	/// Starts from the current value, so interrupted transitions do not jump.
	pub fn retarget(&mut self, to: f64, duration: f64) {
		self.from = self.value();
		self.to = to;
		self.elapsed = 0.0;
		self.duration = duration;
	}

	pub fn advance(&mut self, dt: f64) {
		self.elapsed = (self.elapsed + dt).min(self.duration);
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct NodeVisual {
	pub key: String,
	pub node: NodeIdx,
	pub x: f64,
	pub y: f64,
	pub radius: Tween,
	/// Overrides the palette colour while set.
	pub fill: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct EdgeVisual {
	pub key: String,
	pub edge: EdgeIdx,
	pub x1: f64,
	pub y1: f64,
	pub x2: f64,
	pub y2: f64,
}

/// Keys created and removed by one reconcile pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BindReport<K = String> {
	pub entered: Vec<K>,
	pub exited: Vec<K>,
}

impl<K> Default for BindReport<K> {
	fn default() -> Self {
		Self {
			entered: Vec::new(),
			exited: Vec::new(),
		}
	}
}

impl<K> BindReport<K> {
	pub fn is_empty(&self) -> bool {
		self.entered.is_empty() && self.exited.is_empty()
	}
}

/// Visual elements keyed by their stable join key, in data order.
#[derive(Clone, Debug)]
pub struct VisualSet<V, K = String> {
	items: IndexMap<K, V>,
}

impl<V, K> Default for VisualSet<V, K> {
	fn default() -> Self {
		Self {
			items: IndexMap::new(),
		}
	}
}

impl<V, K: Hash + Eq + Clone> VisualSet<V, K> {
	/// Joins `data` against the current set.
	///
	/// Keys not yet present are created with `enter`; existing visuals are
	/// kept as they are; visuals whose key is missing from `data` are removed.
	/// The resulting order follows `data`.
	pub fn reconcile<D>(
		&mut self,
		data: impl IntoIterator<Item = (K, D)>,
		mut enter: impl FnMut(&K, D) -> V,
	) -> BindReport<K> {
		let mut report = BindReport::default();
		let mut next = IndexMap::with_capacity(self.items.len());
		for (key, datum) in data {
			let visual = match self.items.swap_remove(&key) {
				Some(existing) => existing,
				None => {
					report.entered.push(key.clone());
					enter(&key, datum)
				}
			};
			next.insert(key, visual);
		}
		report.exited.extend(self.items.drain(..).map(|(key, _)| key));
		self.items = next;
		report
	}

	pub fn get<Q: ?Sized + Hash + Equivalent<K>>(&self, key: &Q) -> Option<&V> {
		self.items.get(key)
	}

	pub fn get_mut<Q: ?Sized + Hash + Equivalent<K>>(&mut self, key: &Q) -> Option<&mut V> {
		self.items.get_mut(key)
	}

	pub fn iter(&self) -> impl Iterator<Item = &V> {
		self.items.values()
	}

	pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut V> {
		self.items.values_mut()
	}

	pub fn keys(&self) -> impl Iterator<Item = &K> {
		self.items.keys()
	}

	pub fn len(&self) -> usize {
		self.items.len()
	}

	pub fn is_empty(&self) -> bool {
		self.items.is_empty()
	}
}

impl NodeVisual {
	pub fn enter(key: &str, node: NodeIdx, data: &Node, radius: f64) -> Self {
		Self {
			key: key.to_string(),
			node,
			x: data.x,
			y: data.y,
			radius: Tween::settled(radius),
			fill: None,
		}
	}
}

impl EdgeVisual {
	pub fn enter(key: &str, edge: EdgeIdx, source: &Node, target: &Node) -> Self {
		Self {
			key: key.to_string(),
			edge,
			x1: source.x,
			y1: source.y,
			x2: target.x,
			y2: target.y,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn keys<V>(set: &VisualSet<V>) -> Vec<&str> {
		set.keys().map(String::as_str).collect()
	}

	#[test]
	fn keys_follow_the_join_format() {
		assert_eq!(node_key("7"), "n7");
		assert_eq!(edge_key("1", "2"), "e1-2");
	}

	#[test]
	fn reconcile_enters_keeps_and_exits() {
		let mut set: VisualSet<(String, u32)> = VisualSet::default();
		let report = set.reconcile(
			[("a".to_string(), 1), ("b".to_string(), 2)],
			|key, d| (key.to_string(), d),
		);
		assert_eq!(report.entered, ["a", "b"]);
		assert!(report.exited.is_empty());

		set.get_mut("a").unwrap().1 = 100;
		let report = set.reconcile(
			[("c".to_string(), 3), ("a".to_string(), 9)],
			|key, d| (key.to_string(), d),
		);
		assert_eq!(report.entered, ["c"]);
		assert_eq!(report.exited, ["b"]);
		assert_eq!(keys(&set), ["c", "a"]);
		// Existing visuals survive untouched.
		assert_eq!(set.get("a").unwrap().1, 100);
	}

	#[test]
	fn reconcile_is_a_no_op_when_data_is_unchanged() {
		let mut set: VisualSet<u32> = VisualSet::default();
		set.reconcile([("a".to_string(), 1)], |_, d| d);
		assert!(set.reconcile([("a".to_string(), 1)], |_, d| d).is_empty());
		assert_eq!(set.len(), 1);
	}

	#[test]
	fn pair_keys_keep_hyphenated_edges_apart() {
		let mut set: VisualSet<String, EdgeJoin> = VisualSet::default();
		let pair = |a: &str, b: &str| (a.to_string(), b.to_string());
		let report = set.reconcile(
			[(pair("a-b", "c"), ()), (pair("a", "b-c"), ())],
			|(from, to), _| edge_key(from, to),
		);
		assert_eq!(report.entered.len(), 2);
		assert_eq!(set.len(), 2);
		assert_eq!(set.get(&pair("a-b", "c")).unwrap(), "ea-b-c");
		assert_eq!(set.get(&pair("a", "b-c")).unwrap(), "ea-b-c");
	}

	#[test]
	fn tween_reaches_target_and_retargets_smoothly() {
		let mut tween = Tween::settled(4.0);
		tween.retarget(9.0, 0.25);
		assert_eq!(tween.value(), 4.0);
		tween.advance(0.125);
		let mid = tween.value();
		assert!(mid > 4.0 && mid < 9.0);

		tween.retarget(4.0, 0.25);
		assert_eq!(tween.value(), mid);
		tween.advance(1.0);
		assert_eq!(tween.value(), 4.0);
		assert_eq!(tween.target(), 4.0);
	}
}
