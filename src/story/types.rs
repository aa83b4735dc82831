//! Story definition data structures, as authored.
//!
//! The JSON authoring format is an object keyed by node id:
//!
//! ```json
//! {
//!   "intro": {
//!     "title": "The Gate",
//!     "content": "<p>A hedge wall rises before you.</p>",
//!     "type": "intro",
//!     "exits": { "up": "hall" },
//!     "choices": [{ "text": "Turn back", "nextNode": "home" }]
//!   }
//! }
//! ```

use std::collections::{BTreeMap, HashSet};
use std::fmt;

use log::warn;
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use super::error::StoryError;

/// Category tag used when a node does not name one.
pub const DEFAULT_NODE_TYPE: &str = "default";

/// One of the four directional exits a node can offer.
///
/// The declaration order is the fixed presentation order of navigation edges.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
	Up,
	Down,
	Left,
	Right,
}

impl Direction {
	/// All directions in presentation order.
	pub const ALL: [Direction; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

	/// Lowercase name, as used in the authoring format.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Up => "up",
			Self::Down => "down",
			Self::Left => "left",
			Self::Right => "right",
		}
	}
}

impl fmt::Display for Direction {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Directional exits, iterated in [`Direction`] order.
pub type Exits = BTreeMap<Direction, String>;

/// A player-selected transition.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Choice {
	/// Text shown to the player.
	#[serde(rename = "text", alias = "label")]
	pub label: String,
	/// Key of the node this choice leads to.
	#[serde(rename = "nextNode", alias = "target")]
	pub target: String,
}

impl Choice {
	/// A choice labelled `label` leading to `target`.
	pub fn new(label: impl Into<String>, target: impl Into<String>) -> Self {
		Self {
			label: label.into(),
			target: target.into(),
		}
	}
}

/// Outgoing structure of a node.
///
/// Empty exit maps and empty choice lists are normalized away, so a node is
/// `Terminal` exactly when it offers nothing to follow.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum NodeKind {
	/// An ending: no exits and no choices.
	#[default]
	Terminal,
	/// Only directional exits.
	Navigable { exits: Exits },
	/// Only choices.
	Choosable { choices: Vec<Choice> },
	/// Both exits and choices.
	Branching { exits: Exits, choices: Vec<Choice> },
}

impl NodeKind {
	/// Pick the variant matching which parts are non-empty.
	pub fn from_parts(exits: Exits, choices: Vec<Choice>) -> Self {
		match (exits.is_empty(), choices.is_empty()) {
			(true, true) => Self::Terminal,
			(false, true) => Self::Navigable { exits },
			(true, false) => Self::Choosable { choices },
			(false, false) => Self::Branching { exits, choices },
		}
	}

	/// Split back into exits and choices, empty where absent.
	pub fn into_parts(self) -> (Exits, Vec<Choice>) {
		match self {
			Self::Terminal => (Exits::new(), Vec::new()),
			Self::Navigable { exits } => (exits, Vec::new()),
			Self::Choosable { choices } => (Exits::new(), choices),
			Self::Branching { exits, choices } => (exits, choices),
		}
	}

	/// The exit map, if the node has any exits.
	pub fn exits(&self) -> Option<&Exits> {
		match self {
			Self::Navigable { exits } | Self::Branching { exits, .. } => Some(exits),
			Self::Terminal | Self::Choosable { .. } => None,
		}
	}

	/// Target of the exit in `direction`.
	pub fn exit(&self, direction: Direction) -> Option<&str> {
		self.exits()
			.and_then(|exits| exits.get(&direction))
			.map(String::as_str)
	}

	/// Choices in authoring order; empty when there are none.
	pub fn choices(&self) -> &[Choice] {
		match self {
			Self::Choosable { choices } | Self::Branching { choices, .. } => choices,
			Self::Terminal | Self::Navigable { .. } => &[],
		}
	}

	/// True for endings.
	pub fn is_terminal(&self) -> bool {
		matches!(self, Self::Terminal)
	}

	/// True when at least one choice is offered.
	pub fn has_choices(&self) -> bool {
		!self.choices().is_empty()
	}

	/// Number of directional exits.
	pub fn exit_count(&self) -> usize {
		self.exits().map_or(0, Exits::len)
	}
}

/// Node record as it appears in the authoring format.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawStoryNode {
	title: String,
	#[serde(default)]
	content: String,
	#[serde(rename = "type")]
	node_type: Option<String>,
	#[serde(default)]
	exits: Exits,
	#[serde(default)]
	choices: Vec<Choice>,
	#[serde(default)]
	time_distortion: bool,
}

/// A single narrative location.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(from = "RawStoryNode")]
pub struct StoryNode {
	/// Display name.
	pub title: String,
	/// Narrative text. May contain markup; the graph never looks inside it.
	pub content: String,
	/// Free-form category tag (e.g. "library", "garden").
	pub node_type: String,
	/// Display-only marker carried over from the authoring format.
	pub time_distortion: bool,
	pub kind: NodeKind,
}

impl From<RawStoryNode> for StoryNode {
	fn from(raw: RawStoryNode) -> Self {
		Self {
			title: raw.title,
			content: raw.content,
			node_type: raw
				.node_type
				.unwrap_or_else(|| DEFAULT_NODE_TYPE.to_string()),
			time_distortion: raw.time_distortion,
			kind: NodeKind::from_parts(raw.exits, raw.choices),
		}
	}
}

impl StoryNode {
	/// A terminal node with the given title and no content.
	pub fn new(title: impl Into<String>) -> Self {
		Self {
			title: title.into(),
			content: String::new(),
			node_type: DEFAULT_NODE_TYPE.to_string(),
			time_distortion: false,
			kind: NodeKind::Terminal,
		}
	}

	/// Set the narrative text.
	pub fn with_content(mut self, content: impl Into<String>) -> Self {
		self.content = content.into();
		self
	}

	/// Set the category tag.
	pub fn with_type(mut self, node_type: impl Into<String>) -> Self {
		self.node_type = node_type.into();
		self
	}

	/// Set the time-distortion marker.
	pub fn with_time_distortion(mut self, time_distortion: bool) -> Self {
		self.time_distortion = time_distortion;
		self
	}

	/// Add (or replace) the exit in `direction`.
	pub fn with_exit(mut self, direction: Direction, target: impl Into<String>) -> Self {
		let (mut exits, choices) = std::mem::take(&mut self.kind).into_parts();
		exits.insert(direction, target.into());
		self.kind = NodeKind::from_parts(exits, choices);
		self
	}

	/// Append a choice after the existing ones.
	pub fn with_choice(mut self, label: impl Into<String>, target: impl Into<String>) -> Self {
		let (exits, mut choices) = std::mem::take(&mut self.kind).into_parts();
		choices.push(Choice::new(label, target));
		self.kind = NodeKind::from_parts(exits, choices);
		self
	}

	/// True when the node has neither exits nor choices.
	pub fn is_terminal(&self) -> bool {
		self.kind.is_terminal()
	}

	/// Plain-text preview of the content: markup tags removed, cut to at most
	/// `max_chars` characters.
	///
	/// Only a `<` closed by a later `>` starts a tag. A `<` left open at the end
	/// of the content is ordinary text.
	pub fn content_preview(&self, max_chars: usize) -> String {
		let mut preview = String::new();
		// Text since an unclosed `<`, dropped if a `>` turns it into a tag.
		let mut pending = String::new();
		let mut taken = 0;
		for c in self.content.chars() {
			if !pending.is_empty() {
				pending.push(c);
				if c == '>' {
					pending.clear();
				}
				continue;
			}
			if c == '<' {
				pending.push(c);
				continue;
			}
			if taken == max_chars {
				break;
			}
			preview.push(c);
			taken += 1;
		}
		preview.extend(pending.chars().take(max_chars - taken));
		preview
	}
}

/// The full authored story: node keys in authoring order with their nodes.
///
/// Keys are unique. When the same key is supplied twice the first node is kept.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StoryDefinition {
	nodes: Vec<(String, StoryNode)>,
	keys: HashSet<String>,
}

impl StoryDefinition {
	/// An empty story.
	pub fn new() -> Self {
		Self::default()
	}

	/// Parse the JSON authoring format.
	pub fn from_json(text: &str) -> Result<Self, StoryError> {
		Ok(serde_json::from_str(text)?)
	}

	/// Add a node, keeping any node already stored under `key`.
	/// Returns false when the node was dropped as a duplicate.
	pub fn insert(&mut self, key: impl Into<String>, node: StoryNode) -> bool {
		let key = key.into();
		if !self.keys.insert(key.clone()) {
			warn!("story-map: duplicate node key `{}`, keeping the first", key);
			return false;
		}
		self.nodes.push((key, node));
		true
	}

	/// Builder form of [`insert`](Self::insert).
	pub fn with_node(mut self, key: impl Into<String>, node: StoryNode) -> Self {
		self.insert(key, node);
		self
	}

	/// Keys and nodes in authoring order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &StoryNode)> {
		self.nodes.iter().map(|(k, n)| (k.as_str(), n))
	}

	/// Number of nodes kept.
	pub fn len(&self) -> usize {
		self.nodes.len()
	}

	/// True when the story has no nodes.
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}
}

impl<K: Into<String>> FromIterator<(K, StoryNode)> for StoryDefinition {
	fn from_iter<I: IntoIterator<Item = (K, StoryNode)>>(iter: I) -> Self {
		let mut definition = Self::new();
		for (key, node) in iter {
			definition.insert(key, node);
		}
		definition
	}
}

struct StoryDefinitionVisitor;

impl<'de> Visitor<'de> for StoryDefinitionVisitor {
	type Value = StoryDefinition;

	fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("a map of node keys to story nodes")
	}

	fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
		let capacity = access.size_hint().unwrap_or(0);
		let mut definition = StoryDefinition {
			nodes: Vec::with_capacity(capacity),
			keys: HashSet::with_capacity(capacity),
		};
		while let Some((key, node)) = access.next_entry::<String, StoryNode>()? {
			definition.insert(key, node);
		}
		Ok(definition)
	}
}

impl<'de> Deserialize<'de> for StoryDefinition {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		deserializer.deserialize_map(StoryDefinitionVisitor)
	}
}

#[cfg(test)]
mod tests {
	use test_log::test;

	use super::*;

	#[test]
	fn parses_authoring_format() {
		let definition = StoryDefinition::from_json(
			r#"{
				"intro": {
					"title": "The Gate",
					"content": "<p>Hedges.</p>",
					"type": "intro",
					"exits": { "right": "hall", "up": "tower" },
					"choices": [{ "text": "Turn back", "nextNode": "home" }]
				},
				"home": { "title": "Home", "timeDistortion": true }
			}"#,
		)
		.unwrap();

		let nodes: Vec<_> = definition.iter().collect();
		assert_eq!(nodes[0].0, "intro");
		assert_eq!(nodes[1].0, "home");

		let intro = nodes[0].1;
		assert_eq!(intro.node_type, "intro");
		assert_eq!(intro.kind.exit(Direction::Up), Some("tower"));
		assert_eq!(intro.kind.choices(), &[Choice::new("Turn back", "home")]);
		assert!(matches!(intro.kind, NodeKind::Branching { .. }));

		let home = nodes[1].1;
		assert!(home.is_terminal());
		assert!(home.time_distortion);
		assert_eq!(home.node_type, DEFAULT_NODE_TYPE);
	}

	#[test]
	fn empty_exits_and_choices_mean_terminal() {
		let definition = StoryDefinition::from_json(
			r#"{ "end": { "title": "The End", "exits": {}, "choices": [] } }"#,
		)
		.unwrap();
		let (_, end) = definition.iter().next().unwrap();
		assert_eq!(end.kind, NodeKind::Terminal);
	}

	#[test]
	fn duplicate_keys_keep_the_first_node() {
		let definition = StoryDefinition::from_json(
			r#"{ "a": { "title": "First" }, "b": { "title": "B" }, "a": { "title": "Second" } }"#,
		)
		.unwrap();
		assert_eq!(definition.len(), 2);
		let (_, a) = definition.iter().next().unwrap();
		assert_eq!(a.title, "First");
	}

	#[test]
	fn unknown_direction_is_rejected() {
		let result = StoryDefinition::from_json(
			r#"{ "a": { "title": "A", "exits": { "sideways": "b" } } }"#,
		);
		assert!(matches!(result, Err(StoryError::Parse(_))));
	}

	#[test]
	fn builder_normalizes_kind() {
		let node = StoryNode::new("Hall").with_exit(Direction::Left, "a");
		assert!(matches!(node.kind, NodeKind::Navigable { .. }));

		let node = node.with_choice("Read", "b");
		assert!(matches!(node.kind, NodeKind::Branching { .. }));
		assert_eq!(node.kind.exit_count(), 1);
		assert!(node.kind.has_choices());
	}

	#[test]
	fn content_preview_strips_markup() {
		let node = StoryNode::new("Library")
			.with_content("<h3>Stacks</h3><p>Dusty <em>old</em> books.</p>");
		assert_eq!(node.content_preview(200), "StacksDusty old books.");
		assert_eq!(node.content_preview(6), "Stacks");
		assert_eq!(node.content_preview(0), "");
	}

	#[test]
	fn content_preview_keeps_unclosed_angle_bracket() {
		let node = StoryNode::new("Clock").with_content("Time runs 1 < 2 hours");
		assert_eq!(node.content_preview(200), "Time runs 1 < 2 hours");
		assert_eq!(node.content_preview(13), "Time runs 1 <");
		assert_eq!(node.content_preview(15), "Time runs 1 < 2");

		let node = StoryNode::new("Clock").with_content("a <b>bold</b> c < d");
		assert_eq!(node.content_preview(200), "a bold c < d");

		let node = StoryNode::new("Clock").with_content("x < y > z");
		assert_eq!(node.content_preview(200), "x  z");
	}

	#[test]
	fn insert_reports_duplicates() {
		let mut definition = StoryDefinition::new();
		assert!(definition.insert("a", StoryNode::new("First")));
		assert!(definition.insert("b", StoryNode::new("B")));
		assert!(!definition.insert("a", StoryNode::new("Second")));

		let kept: Vec<_> = definition.iter().map(|(k, n)| (k, n.title.as_str())).collect();
		assert_eq!(kept, [("a", "First"), ("b", "B")]);
	}
}
