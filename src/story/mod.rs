//! Story graph core shared by the game and the story-map visualizer.
//!
//! - [`StoryDefinition`] holds authored nodes, parsed from JSON
//! - [`build_graph`] derives the immutable [`StoryGraph`] with typed edges
//! - [`find_all_paths`] enumerates simple paths between two nodes
//! - [`GameSession`] steps a player through the graph as a value
//! - [`GraphData`] exports `{ nodes, links }` for a force-layout renderer
//!
//! # Example
//!
//! ```
//! use story_map::{Direction, StoryDefinition, StoryNode, build_graph, find_all_paths};
//!
//! let definition = StoryDefinition::new()
//!     .with_node("a", StoryNode::new("Gate").with_exit(Direction::Up, "b"))
//!     .with_node("b", StoryNode::new("Hall").with_choice("Go on", "c"))
//!     .with_node("c", StoryNode::new("End"));
//! let graph = build_graph(&definition).unwrap();
//!
//! let paths = find_all_paths(&graph, "a", "c");
//! assert_eq!(paths, vec![vec!["a", "b", "c"]]);
//! assert_eq!(graph.describe_path(&paths[0]), "Gate → Hall → End");
//! ```

mod analysis;
mod error;
mod export;
mod graph;
mod paths;
mod session;
mod types;

pub use analysis::{Branches, Connections, NodeFilter, PREVIEW_CHARS, StoryStatistics};
pub use error::{SessionError, StoryError};
pub use export::{GraphData, GraphLink, GraphNode, LinkKind};
pub use graph::{Edge, EdgeKind, StoryGraph, build_graph};
pub use paths::{PathLimits, find_all_paths, find_paths};
pub use session::{Action, DEFAULT_ENTRY_NODE, GameSession, Step};
pub use types::{Choice, DEFAULT_NODE_TYPE, Direction, Exits, NodeKind, StoryDefinition, StoryNode};
