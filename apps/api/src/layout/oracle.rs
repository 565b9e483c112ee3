//! Height Oracle: the measurement capability the paginator is built on.
//!
//! Implementors only report a node's content height; the collapsed outer height is derived here
//! so trial packing, true-height packing and detached page measurement all apply the same
//! collapse rule:
//!
//! ```text
//! height = content + max(margin_top, preceding_margin_bottom) + margin_bottom + buffer
//! ```

use std::cell::Cell;

use tracing::trace;

use crate::layout::classify::TagSets;
use crate::layout::paginator::page_height;
use crate::models::Node;

/// Collapsed outer height of a block and the bottom margin it hands to its next sibling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    pub height: f64,
    pub margin_bottom: f64,
}

pub trait HeightOracle {
    /// Height of the node's box without its vertical margins.
    fn content_height(&self, node: &Node) -> f64;

    /// Outer height of `node` following a sibling whose bottom margin was
    /// `preceding_margin_bottom`, inflated by `buffer`. `buffer = 0` is the true height.
    fn measure(&self, node: &Node, preceding_margin_bottom: f64, buffer: f64) -> Measurement {
        let style = &node.style;
        Measurement {
            height: self.content_height(node)
                + style.margin_top.max(preceding_margin_bottom)
                + style.margin_bottom
                + buffer,
            margin_bottom: style.margin_bottom,
        }
    }

    /// True height of a packed page's `nodes`, measured in a fresh off-screen container.
    fn measure_detached(&self, nodes: &[Node], tags: &TagSets) -> f64 {
        let container = OffscreenContainer::mount(nodes);
        container.page_height(self, tags)
    }
}

thread_local! {
    static LIVE_CONTAINERS: Cell<usize> = const { Cell::new(0) };
}

/// A detached copy of a page's nodes, alive for exactly one measurement.
///
/// Mounting clones the nodes so the measurement can never touch the caller's tree; dropping the
/// guard unmounts it.
pub struct OffscreenContainer {
    nodes: Vec<Node>,
}

impl OffscreenContainer {
    pub fn mount(nodes: &[Node]) -> OffscreenContainer {
        LIVE_CONTAINERS.with(|live| live.set(live.get() + 1));
        trace!(nodes = nodes.len(), "mounted offscreen container");
        OffscreenContainer {
            nodes: nodes.to_vec(),
        }
    }

    pub fn nodes_mut(&mut self) -> &mut [Node] {
        &mut self.nodes
    }

    /// Page height of the mounted nodes, booked unit by unit as the paginator books it.
    pub fn page_height<O: HeightOracle + ?Sized>(&self, oracle: &O, tags: &TagSets) -> f64 {
        page_height(oracle, &self.nodes, tags)
    }
}

impl Drop for OffscreenContainer {
    fn drop(&mut self) {
        LIVE_CONTAINERS.with(|live| live.set(live.get().saturating_sub(1)));
        trace!("unmounted offscreen container");
    }
}

/// Containers currently mounted on this thread.
#[cfg(test)]
pub fn live_containers() -> usize {
    LIVE_CONTAINERS.with(|live| live.get())
}

/// Sum of true outer heights of `nodes` placed one after another, margin carry starting at 0.
pub fn stack_heights<O: HeightOracle + ?Sized>(oracle: &O, nodes: &[Node]) -> f64 {
    let mut carry = 0.0;
    let mut total = 0.0;
    for node in nodes {
        let m = oracle.measure(node, carry, 0.0);
        total += m.height;
        carry = m.margin_bottom;
    }
    total
}
