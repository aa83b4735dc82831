//! Errors raised while loading a story or stepping a session.

use thiserror::Error;

use super::graph::EdgeKind;
use super::types::Direction;

/// Failure to turn authored content into a [`StoryGraph`](super::StoryGraph).
#[derive(Debug, Error)]
pub enum StoryError {
	/// The JSON text is malformed or does not match the authoring format.
	#[error("failed to parse story definition: {0}")]
	Parse(#[from] serde_json::Error),
	/// An exit or choice points at a key that is not in the story.
	#[error("node `{node}` has a {edge} edge to missing node `{target}`")]
	DanglingReference {
		node: String,
		target: String,
		edge: EdgeKind,
	},
}

/// A session transition that the current node does not offer.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SessionError {
	/// The session refers to a key the graph does not have.
	#[error("unknown node `{0}`")]
	UnknownNode(String),
	/// The current node offers no move in that direction.
	#[error("no {direction} exit from `{node}`")]
	NoExit { node: String, direction: Direction },
	/// The choice index is past the end of the node's choices.
	#[error("node `{node}` has no choice #{index}")]
	NoSuchChoice { node: String, index: usize },
}
