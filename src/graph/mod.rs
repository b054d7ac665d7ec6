//! Authoritative node/edge storage with adjacency and id allocation.

mod error;
mod id_gen;

use std::collections::HashMap;

pub use error::GraphError;
pub use id_gen::IdGenerator;

/// Position of a node in [`Graph::nodes`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeIdx(usize);

impl NodeIdx {
	pub fn index(self) -> usize {
		self.0
	}
}

/// Position of an edge in [`Graph::edges`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EdgeIdx(usize);

impl EdgeIdx {
	pub fn index(self) -> usize {
		self.0
	}
}

/// A graph vertex together with the simulation state attached to it.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
	id: String,
	pub x: f64,
	pub y: f64,
	pub vx: f64,
	pub vy: f64,
	/// Pinned x; `Some` holds the node in place for the next tick.
	pub fx: Option<f64>,
	/// Pinned y.
	pub fy: Option<f64>,
}

impl Node {
	pub fn new(id: impl Into<String>) -> Self {
		Self::at(id, 0.0, 0.0)
	}

	pub fn at(id: impl Into<String>, x: f64, y: f64) -> Self {
		Self {
			id: id.into(),
			x,
			y,
			vx: 0.0,
			vy: 0.0,
			fx: None,
			fy: None,
		}
	}

	pub fn id(&self) -> &str {
		&self.id
	}

	pub fn is_pinned(&self) -> bool {
		self.fx.is_some() || self.fy.is_some()
	}

	pub fn pin(&mut self, x: f64, y: f64) {
		self.fx = Some(x);
		self.fy = Some(y);
	}

	pub fn release(&mut self) {
		self.fx = None;
		self.fy = None;
	}
}

/// A directed edge with its endpoints resolved at insertion time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Edge {
	from: String,
	to: String,
	source: NodeIdx,
	target: NodeIdx,
}

impl Edge {
	pub fn from(&self) -> &str {
		&self.from
	}

	pub fn to(&self) -> &str {
		&self.to
	}

	pub fn source(&self) -> NodeIdx {
		self.source
	}

	pub fn target(&self) -> NodeIdx {
		self.target
	}
}

/// Nodes and edges in insertion order plus an outgoing adjacency index.
///
/// Every mutation goes through [`Graph::add_node`] or [`Graph::add_edge`], which
/// validate before touching any storage, so a failed call leaves the graph as it
/// was.
#[derive(Clone, Debug, Default)]
pub struct Graph {
	nodes: Vec<Node>,
	index: HashMap<String, NodeIdx>,
	adjacency: Vec<Vec<EdgeIdx>>,
	edges: Vec<Edge>,
}

impl Graph {
	/// Builds a graph through the same validated path as live mutation.
	pub fn new<I, L, S>(nodes: I, links: L) -> Result<Self, GraphError>
	where
		I: IntoIterator<Item = Node>,
		L: IntoIterator<Item = (S, S)>,
		S: Into<String>,
	{
		let mut graph = Self::default();
		for node in nodes {
			graph.add_node(node)?;
		}
		for (from, to) in links {
			graph.add_edge(from, to)?;
		}
		Ok(graph)
	}

	pub fn add_node(&mut self, node: Node) -> Result<NodeIdx, GraphError> {
		if self.index.contains_key(node.id()) {
			return Err(GraphError::DuplicateNode { id: node.id });
		}
		let idx = NodeIdx(self.nodes.len());
		self.index.insert(node.id.clone(), idx);
		self.adjacency.push(Vec::new());
		self.nodes.push(node);
		Ok(idx)
	}

	pub fn add_edge(
		&mut self,
		from: impl Into<String>,
		to: impl Into<String>,
	) -> Result<EdgeIdx, GraphError> {
		let (from, to) = (from.into(), to.into());
		let (Some(&source), Some(&target)) = (self.index.get(&from), self.index.get(&to)) else {
			return Err(GraphError::UnknownEndpoint { from, to });
		};
		if self.has_edge(&from, &to) {
			return Err(GraphError::DuplicateEdge { from, to });
		}

		let idx = EdgeIdx(self.edges.len());
		self.adjacency[source.0].push(idx);
		self.edges.push(Edge {
			from,
			to,
			source,
			target,
		});
		Ok(idx)
	}

	pub fn has_node(&self, id: &str) -> bool {
		self.index.contains_key(id)
	}

	/// Whether the ordered pair `from -> to` is already connected.
	pub fn has_edge(&self, from: &str, to: &str) -> bool {
		self.index.get(from).is_some_and(|&source| {
			self.adjacency[source.0]
				.iter()
				.any(|&e| self.edges[e.0].to == to)
		})
	}

	pub fn index_of(&self, id: &str) -> Option<NodeIdx> {
		self.index.get(id).copied()
	}

	pub fn get_node(&self, id: &str) -> Result<&Node, GraphError> {
		self.index
			.get(id)
			.map(|&idx| &self.nodes[idx.0])
			.ok_or_else(|| GraphError::UnknownNode { id: id.to_string() })
	}

	pub fn node_mut(&mut self, id: &str) -> Result<&mut Node, GraphError> {
		match self.index.get(id) {
			Some(&idx) => Ok(&mut self.nodes[idx.0]),
			None => Err(GraphError::UnknownNode { id: id.to_string() }),
		}
	}

	/// Indices handed out by this graph are always in range.
	pub fn node(&self, idx: NodeIdx) -> &Node {
		&self.nodes[idx.0]
	}

	pub fn node_at_mut(&mut self, idx: NodeIdx) -> &mut Node {
		&mut self.nodes[idx.0]
	}

	pub fn edge(&self, idx: EdgeIdx) -> &Edge {
		&self.edges[idx.0]
	}

	pub fn nodes(&self) -> &[Node] {
		&self.nodes
	}

	/// Mutable view for the simulation; ids stay read-only.
	pub fn nodes_mut(&mut self) -> &mut [Node] {
		&mut self.nodes
	}

	pub fn edges(&self) -> &[Edge] {
		&self.edges
	}

	pub fn node_entries(&self) -> impl Iterator<Item = (NodeIdx, &Node)> {
		self.nodes.iter().enumerate().map(|(i, n)| (NodeIdx(i), n))
	}

	pub fn edge_entries(&self) -> impl Iterator<Item = (EdgeIdx, &Edge)> {
		self.edges.iter().enumerate().map(|(i, e)| (EdgeIdx(i), e))
	}

	pub fn node_count(&self) -> usize {
		self.nodes.len()
	}

	pub fn edge_count(&self) -> usize {
		self.edges.len()
	}

	/// Outgoing edges of `id` in insertion order.
	pub fn out_edges(&self, id: &str) -> Result<impl Iterator<Item = &Edge>, GraphError> {
		let idx = self
			.index_of(id)
			.ok_or_else(|| GraphError::UnknownNode { id: id.to_string() })?;
		Ok(self.adjacency[idx.0].iter().map(|&e| &self.edges[e.0]))
	}

	pub fn get_edge_nodes(&self, edge: &Edge) -> Result<(&Node, &Node), GraphError> {
		Ok((self.get_node(&edge.from)?, self.get_node(&edge.to)?))
	}
}

#[cfg(test)]
mod tests {
	use proptest::prelude::*;

	use super::*;

	fn abc() -> Graph {
		Graph::new(
			["a", "b", "c"].map(Node::new),
			Vec::<(&str, &str)>::new(),
		)
		.unwrap()
	}

	#[test]
	fn add_node_keeps_insertion_order() {
		let graph = abc();
		let ids: Vec<_> = graph.nodes().iter().map(Node::id).collect();
		assert_eq!(ids, ["a", "b", "c"]);
		assert!(graph.has_node("b"));
		assert!(!graph.has_node("d"));
	}

	#[test]
	fn duplicate_node_is_rejected_without_change() {
		let mut graph = abc();
		let err = graph.add_node(Node::at("b", 1.0, 2.0)).unwrap_err();
		assert_eq!(err, GraphError::DuplicateNode { id: "b".into() });
		assert_eq!(graph.node_count(), 3);
		assert_eq!(graph.get_node("b").unwrap().x, 0.0);
	}

	#[test]
	fn add_edge_resolves_endpoints() {
		let mut graph = abc();
		let e = graph.add_edge("a", "c").unwrap();
		let edge = graph.edge(e);
		assert_eq!((edge.from(), edge.to()), ("a", "c"));
		assert_eq!(graph.node(edge.source()).id(), "a");
		assert_eq!(graph.node(edge.target()).id(), "c");

		let (u, v) = graph.get_edge_nodes(edge).unwrap();
		assert_eq!((u.id(), v.id()), ("a", "c"));
	}

	#[test]
	fn unknown_endpoint_leaves_graph_untouched() {
		let mut graph = abc();
		graph.add_edge("a", "b").unwrap();
		let err = graph.add_edge("a", "z").unwrap_err();
		assert_eq!(
			err,
			GraphError::UnknownEndpoint {
				from: "a".into(),
				to: "z".into()
			}
		);
		assert_eq!(graph.edge_count(), 1);
		assert_eq!(graph.out_edges("a").unwrap().count(), 1);
	}

	#[test]
	fn duplicate_edge_compares_ordered_ids() {
		let mut graph = abc();
		graph.add_edge("a", "b").unwrap();
		assert!(matches!(
			graph.add_edge("a", "b"),
			Err(GraphError::DuplicateEdge { .. })
		));
		// Same target from another source, and the reverse direction, are distinct.
		graph.add_edge("c", "b").unwrap();
		graph.add_edge("b", "a").unwrap();
		// A second edge out of `a` to a different target is fine.
		graph.add_edge("a", "c").unwrap();
		assert_eq!(graph.edge_count(), 4);
		assert!(graph.has_edge("a", "b"));
		assert!(!graph.has_edge("c", "a"));
	}

	#[test]
	fn self_loops_are_allowed_once() {
		let mut graph = abc();
		graph.add_edge("a", "a").unwrap();
		assert!(graph.add_edge("a", "a").is_err());
	}

	#[test]
	fn out_edges_follow_insertion_order() {
		let mut graph = abc();
		graph.add_edge("a", "c").unwrap();
		graph.add_edge("b", "c").unwrap();
		graph.add_edge("a", "b").unwrap();
		let targets: Vec<_> = graph.out_edges("a").unwrap().map(Edge::to).collect();
		assert_eq!(targets, ["c", "b"]);
		assert!(graph.out_edges("z").is_err());
	}

	#[test]
	fn lookups_report_unknown_nodes() {
		let graph = abc();
		assert_eq!(
			graph.get_node("x").unwrap_err(),
			GraphError::UnknownNode { id: "x".into() }
		);
		assert_eq!(graph.index_of("c").map(NodeIdx::index), Some(2));
	}

	#[test]
	fn constructor_validates_links() {
		let err = Graph::new([Node::new("a")], [("a", "b")]).unwrap_err();
		assert!(matches!(err, GraphError::UnknownEndpoint { .. }));
	}

	proptest! {
		#[test]
		fn distinct_ids_are_all_stored(ids in prop::collection::hash_set("[a-z0-9]{1,6}", 0..40)) {
			let mut graph = Graph::default();
			for id in &ids {
				graph.add_node(Node::new(id.clone())).unwrap();
			}
			prop_assert_eq!(graph.nodes().len(), ids.len());
			for id in &ids {
				prop_assert!(graph.has_node(id));
				let repeated = graph.add_node(Node::new(id.clone()));
				prop_assert!(matches!(repeated, Err(GraphError::DuplicateNode { .. })), "expected duplicate node error");
			}
			prop_assert_eq!(graph.node_count(), ids.len());
		}

		#[test]
		fn edges_grow_once_per_ordered_pair(pairs in prop::collection::vec((0usize..6, 0usize..6), 0..30)) {
			let mut graph = Graph::new((0..6).map(|i| Node::new(i.to_string())), Vec::<(String, String)>::new()).unwrap();
			let mut seen = std::collections::HashSet::new();
			for (u, v) in pairs {
				let before = graph.edge_count();
				let result = graph.add_edge(u.to_string(), v.to_string());
				if seen.insert((u, v)) {
					let e = result.unwrap();
					prop_assert_eq!(graph.edge_count(), before + 1);
					let (a, b) = graph.get_edge_nodes(graph.edge(e)).unwrap();
					prop_assert_eq!(a, &graph.nodes()[u]);
					prop_assert_eq!(b, &graph.nodes()[v]);
				} else {
					prop_assert!(matches!(result, Err(GraphError::DuplicateEdge { .. })), "expected duplicate edge error");
					prop_assert_eq!(graph.edge_count(), before);
				}
			}
		}
	}
}
