//! Structural errors raised by [`Graph`](super::Graph).

use thiserror::Error;

/// Invariant violations reported synchronously by graph mutations and lookups.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum GraphError {
	/// `add_node` with an id that is already present.
	#[error("graph already has node associated with id: {id}")]
	DuplicateNode { id: String },

	/// `add_edge` referencing an endpoint that is not in the graph.
	#[error("graph does not have given nodes: {from} or {to}")]
	UnknownEndpoint { from: String, to: String },

	/// `add_edge` repeating an ordered `(from, to)` pair.
	#[error("duplicate edge: {from}-{to}")]
	DuplicateEdge { from: String, to: String },

	/// Lookup of an absent node.
	#[error("accessing nonexistent node with id: {id}")]
	UnknownNode { id: String },
}
