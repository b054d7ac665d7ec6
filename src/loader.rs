//! Initial graph documents of the form `{ "nodes": [{"id"}], "links": [{"source", "target"}] }`.

use std::f64::consts::PI;
use std::fmt;

use log::info;
use serde::Deserialize;
use thiserror::Error;

use crate::config::ViewConfig;
use crate::graph::{Graph, GraphError, Node};

#[derive(Debug, Error)]
pub enum LoadError {
	#[error("malformed network document: {0}")]
	Json(#[from] serde_json::Error),

	#[error(transparent)]
	Graph(#[from] GraphError),
}

/// Identifiers may be written as numbers or strings; both end up as strings.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(untagged)]
enum InputId {
	Number(serde_json::Number),
	Text(String),
}

impl fmt::Display for InputId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			InputId::Number(n) => write_number(f, n),
			InputId::Text(s) => f.write_str(s),
		}
	}
}

/// Integral numbers print without a fraction whichever way the document wrote
/// them, so `1`, `1.0` and `1e0` name the same node.
fn write_number(f: &mut fmt::Formatter<'_>, n: &serde_json::Number) -> fmt::Result {
	if n.is_i64() || n.is_u64() {
		return write!(f, "{n}");
	}
	match n.as_f64() {
		Some(v) if v == 0.0 => f.write_str("0"),
		Some(v) if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e21 => write!(f, "{v:.0}"),
		Some(v) => write!(f, "{v}"),
		None => write!(f, "{n}"),
	}
}

#[derive(Debug, Deserialize)]
struct InputNode {
	id: InputId,
}

#[derive(Debug, Deserialize)]
struct InputLink {
	source: InputId,
	target: InputId,
}

#[derive(Debug, Deserialize)]
struct InputData {
	nodes: Vec<InputNode>,
	links: Vec<InputLink>,
}

/// Normalized document: string ids, links as `(from, to)`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Network {
	pub nodes: Vec<String>,
	pub links: Vec<(String, String)>,
}

impl Network {
	/// Builds the graph, seeding positions on a circle around the canvas centre.
	pub fn into_graph(self, view: &ViewConfig) -> Result<Graph, GraphError> {
		let (cx, cy) = view.center();
		let radius = view.width.min(view.height) / 3.0;
		let count = self.nodes.len().max(1) as f64;
		let nodes = self.nodes.into_iter().enumerate().map(|(i, id)| {
			let angle = i as f64 * 2.0 * PI / count;
			Node::at(id, cx + radius * angle.cos(), cy + radius * angle.sin())
		});
		Graph::new(nodes, self.links)
	}
}

pub fn parse_network(json: &str) -> Result<Network, LoadError> {
	let input: InputData = serde_json::from_str(json)?;
	let network = Network {
		nodes: input.nodes.iter().map(|n| n.id.to_string()).collect(),
		links: input
			.links
			.iter()
			.map(|l| (l.source.to_string(), l.target.to_string()))
			.collect(),
	};
	info!(
		"network parsed: {} nodes, {} links",
		network.nodes.len(),
		network.links.len()
	);
	Ok(network)
}

/// Parses and builds in one step.
pub fn load_graph(json: &str, view: &ViewConfig) -> Result<Graph, LoadError> {
	Ok(parse_network(json)?.into_graph(view)?)
}
