//! Exhaustive simple-path enumeration between two story nodes.
//!
//! The search is a plain depth-first walk over [`StoryGraph::successors`], the
//! distinct targets of a node's outgoing edges in edge order. Paths are sequences
//! of node keys, so parallel edges to the same target produce one path. Each
//! branch receives its own copy of the visited set and the path so far, and a
//! node seen on one branch never blocks a sibling branch.
//!
//! The number of paths grows exponentially with branching. [`find_all_paths`]
//! is unbounded; callers that need a guard use [`find_paths`] with
//! [`PathLimits`].

use std::collections::HashSet;

use log::debug;

use super::graph::StoryGraph;

/// Optional caps on path enumeration. The default imposes none.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PathLimits {
	/// Stop once this many paths have been found.
	pub max_paths: Option<usize>,
	/// Ignore paths longer than this many edges.
	pub max_depth: Option<usize>,
}

impl PathLimits {
	/// No caps; same as `default()`.
	pub fn unbounded() -> Self {
		Self::default()
	}

	/// Cap the number of paths returned.
	pub fn with_max_paths(mut self, max_paths: usize) -> Self {
		self.max_paths = Some(max_paths);
		self
	}

	/// Cap path length, counted in edges.
	pub fn with_max_depth(mut self, max_depth: usize) -> Self {
		self.max_depth = Some(max_depth);
		self
	}
}

/// Every simple path from `start` to `end`, in depth-first pre-order.
///
/// Returns `[[start]]` when `start == end`, and nothing when either key is not a
/// node of the graph.
pub fn find_all_paths(graph: &StoryGraph, start: &str, end: &str) -> Vec<Vec<String>> {
	find_paths(graph, start, end, PathLimits::unbounded())
}

/// [`find_all_paths`] with caps. Paths that are kept appear in the same order
/// the unbounded search would report them.
pub fn find_paths(
	graph: &StoryGraph,
	start: &str,
	end: &str,
	limits: PathLimits,
) -> Vec<Vec<String>> {
	if !graph.contains(start) || !graph.contains(end) {
		debug!("story-map: path query {} -> {} names an unknown node", start, end);
		return Vec::new();
	}

	let mut found = Vec::new();
	walk(graph, start, end, HashSet::new(), Vec::new(), &limits, &mut found);
	debug!(
		"story-map: found {} path(s) from {} to {}",
		found.len(),
		start,
		end
	);
	found
}

fn walk<'g>(
	graph: &'g StoryGraph,
	current: &'g str,
	end: &str,
	mut visited: HashSet<&'g str>,
	mut path: Vec<&'g str>,
	limits: &PathLimits,
	found: &mut Vec<Vec<String>>,
) {
	if limits.max_paths.is_some_and(|max| found.len() >= max) {
		return;
	}

	path.push(current);
	if current == end {
		found.push(path.iter().map(|key| key.to_string()).collect());
		return;
	}
	if !visited.insert(current) {
		return;
	}
	if limits.max_depth.is_some_and(|max| path.len() > max) {
		return;
	}

	for next in graph.successors(current) {
		walk(
			graph,
			next,
			end,
			visited.clone(),
			path.clone(),
			limits,
			found,
		);
	}
}

#[cfg(test)]
mod tests {
	use test_log::test;

	use super::*;
	use crate::story::{Direction, StoryDefinition, StoryNode, build_graph};

	fn graph(nodes: &[(&str, &[&str])]) -> StoryGraph {
		let definition: StoryDefinition = nodes
			.iter()
			.map(|&(key, targets)| {
				let node = targets.iter().fold(StoryNode::new(key.to_uppercase()), |node, target| {
					node.with_choice(format!("to {target}"), *target)
				});
				(key, node)
			})
			.collect();
		build_graph(&definition).unwrap()
	}

	fn paths(expected: &[&[&str]]) -> Vec<Vec<String>> {
		expected
			.iter()
			.map(|path| path.iter().map(|key| key.to_string()).collect())
			.collect()
	}

	#[test]
	fn straight_line() {
		let g = graph(&[("A", &["B"]), ("B", &["C"]), ("C", &[])]);
		assert_eq!(find_all_paths(&g, "A", "C"), paths(&[&["A", "B", "C"]]));
	}

	#[test]
	fn parallel_edges_collapse_to_one_path() {
		let definition = StoryDefinition::new()
			.with_node(
				"A",
				StoryNode::new("A")
					.with_choice("Open the door", "B")
					.with_choice("Kick the door", "B"),
			)
			.with_node("B", StoryNode::new("B").with_exit(Direction::Up, "C"))
			.with_node("C", StoryNode::new("C"));
		let g = build_graph(&definition).unwrap();
		assert_eq!(g.outgoing_edges("A").len(), 2);
		assert_eq!(find_all_paths(&g, "A", "C"), paths(&[&["A", "B", "C"]]));
	}

	#[test]
	fn parallel_edges_do_not_multiply_downstream_paths() {
		let g = graph(&[("A", &["B", "B"]), ("B", &["C", "D"]), ("C", &[]), ("D", &["C"])]);
		assert_eq!(
			find_all_paths(&g, "A", "C"),
			paths(&[&["A", "B", "C"], &["A", "B", "D", "C"]])
		);
	}

	#[test]
	fn cycle_is_not_reentered() {
		let g = graph(&[("A", &["B"]), ("B", &["A", "C"]), ("C", &[])]);
		assert_eq!(find_all_paths(&g, "A", "C"), paths(&[&["A", "B", "C"]]));
	}

	#[test]
	fn unknown_start_or_end_gives_nothing() {
		let g = graph(&[("A", &["B"]), ("B", &[])]);
		assert!(find_all_paths(&g, "ghost", "A").is_empty());
		assert!(find_all_paths(&g, "A", "ghost").is_empty());
		assert!(find_all_paths(&g, "ghost", "ghost").is_empty());
	}

	#[test]
	fn terminal_node() {
		let g = graph(&[("A", &["E"]), ("E", &[])]);
		assert_eq!(find_all_paths(&g, "E", "E"), paths(&[&["E"]]));
		assert!(find_all_paths(&g, "E", "A").is_empty());
	}

	#[test]
	fn same_start_and_end_is_a_single_path_even_on_a_cycle() {
		let g = graph(&[("A", &["B"]), ("B", &["A"])]);
		assert_eq!(find_all_paths(&g, "A", "A"), paths(&[&["A"]]));
		assert_eq!(find_all_paths(&g, "B", "B"), paths(&[&["B"]]));
	}

	#[test]
	fn sibling_branches_do_not_block_each_other() {
		let g = graph(&[
			("A", &["B", "C"]),
			("B", &["D"]),
			("C", &["D"]),
			("D", &["E"]),
			("E", &[]),
		]);
		assert_eq!(
			find_all_paths(&g, "A", "E"),
			paths(&[&["A", "B", "D", "E"], &["A", "C", "D", "E"]])
		);
	}

	#[test]
	fn paths_follow_outgoing_edge_order() {
		let g = graph(&[
			("A", &["C", "B"]),
			("B", &["D"]),
			("C", &["B", "D"]),
			("D", &[]),
		]);
		assert_eq!(
			find_all_paths(&g, "A", "D"),
			paths(&[&["A", "C", "B", "D"], &["A", "C", "D"], &["A", "B", "D"]])
		);
	}

	#[test]
	fn every_path_is_simple_and_connected() {
		let g = graph(&[
			("A", &["B", "C", "D"]),
			("B", &["A", "C", "E"]),
			("C", &["B", "D", "E"]),
			("D", &["A", "C", "E"]),
			("E", &["A"]),
		]);
		let found = find_all_paths(&g, "A", "E");
		assert!(!found.is_empty());
		for path in &found {
			assert_eq!(path.first().map(String::as_str), Some("A"));
			assert_eq!(path.last().map(String::as_str), Some("E"));

			let unique: HashSet<_> = path.iter().collect();
			assert_eq!(unique.len(), path.len(), "repeated node in {path:?}");

			for pair in path.windows(2) {
				assert!(
					g.outgoing_edges(&pair[0]).iter().any(|e| e.target == pair[1]),
					"no edge {} -> {}",
					pair[0],
					pair[1]
				);
			}
		}
		let unique: HashSet<_> = found.iter().collect();
		assert_eq!(unique.len(), found.len());
	}

	#[test]
	fn max_paths_keeps_the_first_paths() {
		let g = graph(&[
			("A", &["C", "B"]),
			("B", &["D"]),
			("C", &["B", "D"]),
			("D", &[]),
		]);
		let all = find_all_paths(&g, "A", "D");
		let capped = find_paths(&g, "A", "D", PathLimits::default().with_max_paths(2));
		assert_eq!(capped, all[..2]);
		assert!(find_paths(&g, "A", "D", PathLimits::default().with_max_paths(0)).is_empty());
	}

	#[test]
	fn max_depth_drops_long_paths() {
		let g = graph(&[
			("A", &["C", "B"]),
			("B", &["D"]),
			("C", &["B", "D"]),
			("D", &[]),
		]);
		let short = find_paths(&g, "A", "D", PathLimits::default().with_max_depth(2));
		assert_eq!(short, paths(&[&["A", "C", "D"], &["A", "B", "D"]]));
		let none = find_paths(&g, "A", "D", PathLimits::default().with_max_depth(1));
		assert!(none.is_empty());
		let zero = find_paths(&g, "A", "A", PathLimits::default().with_max_depth(0));
		assert_eq!(zero, paths(&[&["A"]]));
	}
}
