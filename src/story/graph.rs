//! Directed story graph derived from a [`StoryDefinition`].
//!
//! Nodes keep their authoring order. Edges are stored grouped by source node:
//! navigation edges first in [`Direction`] order, then choice edges in the order
//! they were authored. That grouping is the order [`StoryGraph::outgoing_edges`]
//! hands back, so it is stable for the lifetime of the graph.

use std::collections::HashMap;
use std::fmt;
use std::ops::Range;

use log::info;

use super::error::StoryError;
use super::types::{Direction, StoryDefinition, StoryNode};

/// How an edge was authored.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum EdgeKind {
	/// Unconditional movement through a directional exit.
	Navigation(Direction),
	/// A player choice, carrying its label.
	Choice(String),
}

impl EdgeKind {
	/// True for player choices.
	pub fn is_choice(&self) -> bool {
		matches!(self, Self::Choice(_))
	}

	/// Direction or choice text.
	pub fn label(&self) -> &str {
		match self {
			Self::Navigation(direction) => direction.as_str(),
			Self::Choice(label) => label,
		}
	}
}

impl fmt::Display for EdgeKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Navigation(direction) => write!(f, "navigation ({direction})"),
			Self::Choice(label) => write!(f, "choice \"{label}\""),
		}
	}
}

/// A directed transition between two nodes.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Edge {
	pub source: String,
	pub target: String,
	pub kind: EdgeKind,
}

/// Immutable story graph.
#[derive(Clone, Debug, Default)]
pub struct StoryGraph {
	nodes: Vec<(String, StoryNode)>,
	index: HashMap<String, usize>,
	edges: Vec<Edge>,
	/// Per node (parallel to `nodes`), the slice of `edges` it is the source of.
	outgoing: Vec<Range<usize>>,
}

/// Build the graph for a story.
///
/// Every exit and choice must point at a node of the story; the first one that
/// does not fails the whole build with [`StoryError::DanglingReference`].
pub fn build_graph(definition: &StoryDefinition) -> Result<StoryGraph, StoryError> {
	let nodes: Vec<(String, StoryNode)> = definition
		.iter()
		.map(|(key, node)| (key.to_string(), node.clone()))
		.collect();
	let index: HashMap<String, usize> = nodes
		.iter()
		.enumerate()
		.map(|(i, (key, _))| (key.clone(), i))
		.collect();

	let mut edges = Vec::new();
	let mut outgoing = Vec::with_capacity(nodes.len());

	for (key, node) in &nodes {
		let start = edges.len();
		let navigation = node
			.kind
			.exits()
			.into_iter()
			.flatten()
			.map(|(&direction, target)| (target, EdgeKind::Navigation(direction)));
		let choices = node
			.kind
			.choices()
			.iter()
			.map(|choice| (&choice.target, EdgeKind::Choice(choice.label.clone())));

		for (target, kind) in navigation.chain(choices) {
			if !index.contains_key(target) {
				return Err(StoryError::DanglingReference {
					node: key.clone(),
					target: target.clone(),
					edge: kind,
				});
			}
			edges.push(Edge {
				source: key.clone(),
				target: target.clone(),
				kind,
			});
		}
		outgoing.push(start..edges.len());
	}

	info!(
		"story-map: built graph with {} nodes, {} edges",
		nodes.len(),
		edges.len()
	);

	Ok(StoryGraph {
		nodes,
		index,
		edges,
		outgoing,
	})
}

impl StoryGraph {
	/// Parse the JSON authoring format and build its graph.
	pub fn from_json(text: &str) -> Result<Self, StoryError> {
		build_graph(&StoryDefinition::from_json(text)?)
	}

	/// Number of nodes.
	pub fn len(&self) -> usize {
		self.nodes.len()
	}

	/// True when the graph has no nodes.
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	/// True if `key` is a node of the graph.
	pub fn contains(&self, key: &str) -> bool {
		self.index.contains_key(key)
	}

	/// Node stored under `key`.
	pub fn node(&self, key: &str) -> Option<&StoryNode> {
		self.index.get(key).map(|&i| &self.nodes[i].1)
	}

	/// Nodes with their keys, in authoring order.
	pub fn nodes(&self) -> impl Iterator<Item = (&str, &StoryNode)> {
		self.nodes.iter().map(|(k, n)| (k.as_str(), n))
	}

	/// Node keys in authoring order, e.g. for populating a start/end selector.
	pub fn node_keys(&self) -> impl Iterator<Item = &str> {
		self.nodes.iter().map(|(k, _)| k.as_str())
	}

	/// Every edge, grouped by source in node order.
	pub fn edges(&self) -> &[Edge] {
		&self.edges
	}

	/// Edges leaving `key`: navigation in direction order, then choices in
	/// authoring order. Empty for unknown keys.
	pub fn outgoing_edges(&self, key: &str) -> &[Edge] {
		match self.index.get(key) {
			Some(&i) => &self.edges[self.outgoing[i].clone()],
			None => &[],
		}
	}

	/// Distinct targets of the edges leaving `key`, in outgoing-edge order.
	pub fn successors(&self, key: &str) -> Vec<&str> {
		let mut targets: Vec<&str> = Vec::new();
		for edge in self.outgoing_edges(key) {
			if !targets.contains(&edge.target.as_str()) {
				targets.push(&edge.target);
			}
		}
		targets
	}

	/// Edges arriving at `key`, in edge-list order.
	pub fn incoming_edges<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a Edge> + 'a {
		self.edges.iter().filter(move |edge| edge.target == key)
	}

	/// True iff `key` names a node with no outgoing edges. Unknown keys are not
	/// terminal.
	pub fn is_terminal(&self, key: &str) -> bool {
		self.contains(key) && self.outgoing_edges(key).is_empty()
	}

	/// Render a path as node titles joined by arrows. Keys that are not in the
	/// graph are shown as-is.
	pub fn describe_path<S: AsRef<str>>(&self, path: &[S]) -> String {
		path.iter()
			.map(|key| {
				let key = key.as_ref();
				self.node(key).map_or(key, |node| node.title.as_str())
			})
			.collect::<Vec<_>>()
			.join(" → ")
	}
}
