//! Plain graph data for a force-layout renderer.
//!
//! The shape is the `{ nodes, links }` document force-graph front ends consume:
//! node ids are story keys, links reference them by id.

use serde::{Deserialize, Serialize};

use super::graph::{EdgeKind, StoryGraph};

/// A node in the exported graph.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct GraphNode {
	/// Story node key. Used to reference nodes in links.
	pub id: String,
	/// Display label, the node title.
	pub label: Option<String>,
	/// Cluster name, the node's type tag.
	pub group: Option<String>,
	/// Set for endings.
	#[serde(default)]
	pub terminal: bool,
}

/// Whether a link came from an exit or a choice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkKind {
	/// From a directional exit.
	Navigation,
	/// From a player choice.
	Choice,
}

/// A directed edge between two nodes.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct GraphLink {
	/// Source node ID.
	pub source: String,
	/// Target node ID.
	pub target: String,
	pub kind: LinkKind,
	/// Direction name or choice text.
	pub label: String,
}

/// Complete graph data: nodes and links.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct GraphData {
	pub nodes: Vec<GraphNode>,
	pub links: Vec<GraphLink>,
}

impl From<&StoryGraph> for GraphData {
	fn from(graph: &StoryGraph) -> Self {
		let nodes = graph
			.nodes()
			.map(|(key, node)| GraphNode {
				id: key.to_string(),
				label: Some(node.title.clone()),
				group: Some(node.node_type.clone()),
				terminal: graph.is_terminal(key),
			})
			.collect();
		let links = graph
			.edges()
			.iter()
			.map(|edge| GraphLink {
				source: edge.source.clone(),
				target: edge.target.clone(),
				kind: match edge.kind {
					EdgeKind::Navigation(_) => LinkKind::Navigation,
					EdgeKind::Choice(_) => LinkKind::Choice,
				},
				label: edge.kind.label().to_string(),
			})
			.collect();
		Self { nodes, links }
	}
}

impl GraphData {
	/// Serialize as a JSON document.
	pub fn to_json(&self) -> serde_json::Result<String> {
		serde_json::to_string(self)
	}
}
