//! Read-only queries over a [`StoryGraph`]: counts, per-node connections,
//! branch listings and node filters.

use super::graph::{Edge, StoryGraph};
use super::types::StoryNode;

/// Number of characters shown in a node's content preview.
pub const PREVIEW_CHARS: usize = 200;

/// Summary counts for a whole story.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StoryStatistics {
	pub total_nodes: usize,
	/// Nodes offering at least one choice.
	pub choice_nodes: usize,
	/// Nodes with exits but no choices.
	pub navigation_nodes: usize,
	/// Terminal nodes.
	pub ending_nodes: usize,
	pub time_distortion_nodes: usize,
}

impl StoryStatistics {
	/// Count every node of `graph`.
	pub fn collect(graph: &StoryGraph) -> Self {
		graph.nodes().fold(Self::default(), |mut stats, (key, node)| {
			stats.total_nodes += 1;
			if node.kind.has_choices() {
				stats.choice_nodes += 1;
			} else if node.kind.exit_count() > 0 {
				stats.navigation_nodes += 1;
			}
			if graph.is_terminal(key) {
				stats.ending_nodes += 1;
			}
			if node.time_distortion {
				stats.time_distortion_nodes += 1;
			}
			stats
		})
	}
}

/// Edge counts touching a node.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Connections {
	pub incoming: usize,
	pub outgoing: usize,
}

/// Outgoing edges of a node split by kind, each in outgoing-edge order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Branches<'g> {
	pub choices: Vec<&'g Edge>,
	pub exits: Vec<&'g Edge>,
}

impl Branches<'_> {
	/// True when the node leads nowhere.
	pub fn is_ending(&self) -> bool {
		self.choices.is_empty() && self.exits.is_empty()
	}
}

/// Predicate selecting which nodes a view shows.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum NodeFilter {
	#[default]
	All,
	/// Nodes whose type tag equals the given one.
	Type(String),
	TimeDistortion,
	HasChoices,
}

impl NodeFilter {
	/// True if `node` passes the filter.
	pub fn matches(&self, node: &StoryNode) -> bool {
		match self {
			Self::All => true,
			Self::Type(node_type) => node.node_type == *node_type,
			Self::TimeDistortion => node.time_distortion,
			Self::HasChoices => node.kind.has_choices(),
		}
	}
}

impl StoryGraph {
	/// Shorthand for [`StoryStatistics::collect`].
	pub fn statistics(&self) -> StoryStatistics {
		StoryStatistics::collect(self)
	}

	/// Incoming and outgoing edge counts for `key`; zero for unknown keys.
	pub fn connections(&self, key: &str) -> Connections {
		Connections {
			incoming: self.incoming_edges(key).count(),
			outgoing: self.outgoing_edges(key).len(),
		}
	}

	/// Outgoing edges of `key` split into choices and exits.
	pub fn branches(&self, key: &str) -> Branches<'_> {
		let (choices, exits) = self
			.outgoing_edges(key)
			.iter()
			.partition(|edge| edge.kind.is_choice());
		Branches { choices, exits }
	}

	/// Distinct type tags in the order they first appear.
	pub fn node_types(&self) -> Vec<&str> {
		let mut types: Vec<&str> = Vec::new();
		for (_, node) in self.nodes() {
			if !types.contains(&node.node_type.as_str()) {
				types.push(&node.node_type);
			}
		}
		types
	}

	/// Keys of nodes passing `filter`, in authoring order.
	pub fn filter_nodes<'a>(&'a self, filter: &'a NodeFilter) -> impl Iterator<Item = &'a str> + 'a {
		self.nodes()
			.filter(move |(_, node)| filter.matches(node))
			.map(|(key, _)| key)
	}

	/// Edges whose endpoints both pass `filter`.
	pub fn visible_edges<'a>(&'a self, filter: &'a NodeFilter) -> impl Iterator<Item = &'a Edge> + 'a {
		let visible = move |key: &str| self.node(key).is_some_and(|node| filter.matches(node));
		self.edges()
			.iter()
			.filter(move |edge| visible(&edge.source) && visible(&edge.target))
	}
}
