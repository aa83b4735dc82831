//! Game session: where the player is, where they have been, how they got here.
//!
//! A [`GameSession`] is a value. [`GameSession::apply`] never mutates the record
//! it is called on; it returns the next one, so callers can keep earlier
//! records around (e.g. for an undo stack) or discard a failed step freely.

use std::collections::BTreeSet;

use log::debug;

use super::error::SessionError;
use super::graph::{EdgeKind, StoryGraph};
use super::types::Direction;

/// Node a new game starts from.
pub const DEFAULT_ENTRY_NODE: &str = "intro";

/// Something the player can do at a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
	/// Follow a directional exit.
	Move(Direction),
	/// Pick the choice at this index of the node's choice list.
	Choose(usize),
}

/// One transition taken during play.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Step {
	pub from: String,
	pub to: String,
	/// The exit or choice that was followed.
	pub via: EdgeKind,
}

/// Explicit per-step record of a game in progress.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameSession {
	/// Node the player stands on.
	pub current_node: String,
	/// Every node entered so far, the entry node included.
	pub visited_nodes: BTreeSet<String>,
	/// Transitions taken, oldest first.
	pub history: Vec<Step>,
}

impl GameSession {
	/// Begin a session at `entry`.
	pub fn start(graph: &StoryGraph, entry: &str) -> Result<Self, SessionError> {
		if !graph.contains(entry) {
			return Err(SessionError::UnknownNode(entry.to_string()));
		}
		debug!("story-map: session started at {}", entry);
		Ok(Self {
			current_node: entry.to_string(),
			visited_nodes: BTreeSet::from([entry.to_string()]),
			history: Vec::new(),
		})
	}

	/// Actions offered at the current node.
	///
	/// Nodes with choices offer only their choices; navigation is not available
	/// there. Other nodes offer their exits in direction order.
	pub fn available_actions(&self, graph: &StoryGraph) -> Vec<Action> {
		let Some(node) = graph.node(&self.current_node) else {
			return Vec::new();
		};
		if node.kind.has_choices() {
			(0..node.kind.choices().len()).map(Action::Choose).collect()
		} else {
			node.kind
				.exits()
				.into_iter()
				.flat_map(|exits| exits.keys().copied())
				.map(Action::Move)
				.collect()
		}
	}

	/// Take `action` from the current node, returning the resulting session.
	pub fn apply(&self, graph: &StoryGraph, action: Action) -> Result<Self, SessionError> {
		let node = graph
			.node(&self.current_node)
			.ok_or_else(|| SessionError::UnknownNode(self.current_node.clone()))?;

		let (target, via) = match action {
			Action::Move(direction) => {
				let target = node
					.kind
					.exit(direction)
					.filter(|_| !node.kind.has_choices())
					.ok_or_else(|| SessionError::NoExit {
						node: self.current_node.clone(),
						direction,
					})?;
				(target, EdgeKind::Navigation(direction))
			}
			Action::Choose(index) => {
				let choice =
					node.kind
						.choices()
						.get(index)
						.ok_or_else(|| SessionError::NoSuchChoice {
							node: self.current_node.clone(),
							index,
						})?;
				(choice.target.as_str(), EdgeKind::Choice(choice.label.clone()))
			}
		};

		debug!(
			"story-map: {} -> {} via {}",
			self.current_node, target, via
		);

		let mut next = self.clone();
		next.visited_nodes.insert(target.to_string());
		next.history.push(Step {
			from: self.current_node.clone(),
			to: target.to_string(),
			via,
		});
		next.current_node = target.to_string();
		Ok(next)
	}

	/// True if the player has been on `key` at any point.
	pub fn has_visited(&self, key: &str) -> bool {
		self.visited_nodes.contains(key)
	}

	/// True once the player stands on an ending.
	pub fn is_finished(&self, graph: &StoryGraph) -> bool {
		graph.is_terminal(&self.current_node)
	}

	/// Only the choices made so far, skipping plain movement.
	pub fn choice_history(&self) -> impl Iterator<Item = &Step> {
		self.history.iter().filter(|step| step.via.is_choice())
	}
}
