//! Return path verification for non-void functions.
//!
//! [`ReturnChecker`] builds the control-flow graph of a generated function
//! and finds blocks reachable from `entry` that end without a terminator,
//! i.e. paths that would fall off the end of the function.
//!
//! # Example
//!
//! ```ignore
//! let checker = ReturnChecker::new();
//! if !checker.all_paths_return(function) {
//!     // Error: not all code paths return a value
//! }
//! ```

use gdsl_ir::{BlockId, IrFunction};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::Dfs;

/// Verifies all code paths end in a terminator.
#[derive(Debug, Default, Clone, Copy)]
pub struct ReturnChecker;

impl ReturnChecker {
    pub fn new() -> Self {
        Self
    }

    /// Whether every block reachable from `entry` is terminated.
    ///
    /// A function without blocks has no path that returns.
    pub fn all_paths_return(&self, func: &IrFunction) -> bool {
        !func.blocks().is_empty() && self.open_blocks(func).is_empty()
    }

    /// Reachable blocks without a terminator, in block order.
    pub fn open_blocks(&self, func: &IrFunction) -> Vec<BlockId> {
        self.reachable(func)
            .into_iter()
            .filter(|&block| !func.is_terminated(block))
            .collect()
    }

    /// Whether `block` can be reached from `entry`.
    pub fn is_reachable(&self, func: &IrFunction, block: BlockId) -> bool {
        self.reachable(func).contains(&block)
    }

    /// Blocks reachable from `entry`, in block order.
    fn reachable(&self, func: &IrFunction) -> Vec<BlockId> {
        let count = func.blocks().len();
        if count == 0 {
            return Vec::new();
        }

        let mut graph = DiGraph::<BlockId, ()>::with_capacity(count, count * 2);
        let nodes: Vec<NodeIndex> = (0..count)
            .map(|i| graph.add_node(BlockId(i as u32)))
            .collect();
        for (i, &node) in nodes.iter().enumerate() {
            for succ in func.successors(BlockId(i as u32)) {
                if let Some(&target) = nodes.get(succ.0 as usize) {
                    graph.add_edge(node, target, ());
                }
            }
        }

        let mut seen = vec![false; count];
        let mut dfs = Dfs::new(&graph, nodes[0]);
        while let Some(node) = dfs.next(&graph) {
            seen[node.index()] = true;
        }

        seen.iter()
            .enumerate()
            .filter(|(_, reached)| **reached)
            .map(|(i, _)| BlockId(i as u32))
            .collect()
    }
}
