//! story-map: story graph core for a browser interactive-fiction game and its
//! story-map visualizer.
//!
//! The crate turns a hand-authored story definition into a directed graph,
//! enumerates paths between nodes, steps game sessions and exports plain graph
//! data for a renderer. Drawing and input handling belong to the host page.

pub mod story;

pub use story::{
	Action, Choice, Direction, Edge, EdgeKind, GameSession, GraphData, GraphLink, GraphNode,
	NodeFilter, NodeKind, PathLimits, SessionError, StoryDefinition, StoryError, StoryGraph,
	StoryNode, StoryStatistics, build_graph, find_all_paths, find_paths,
};

#[cfg(target_arch = "wasm32")]
use log::{Level, info, warn};
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;
#[cfg(target_arch = "wasm32")]
use web_sys::{HtmlScriptElement, Window};

/// Initialize logging and panic hooks for the WASM target.
#[cfg(target_arch = "wasm32")]
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("story-map: logging initialized");
}

/// Load the story from a script element with id="story-data".
/// Expected format: JSON object of node key -> node.
#[cfg(target_arch = "wasm32")]
pub fn load_story() -> Option<StoryGraph> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("story-data")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;

	match StoryGraph::from_json(&json_text) {
		Ok(graph) => {
			info!(
				"story-map: loaded {} nodes, {} edges",
				graph.len(),
				graph.edges().len()
			);
			Some(graph)
		}
		Err(e) => {
			warn!("story-map: failed to load story data: {}", e);
			None
		}
	}
}
