//! Greedy Paginator: packs the document tree onto pages for one trial buffer.
//!
//! Written as a fold over an explicit `PackState`: each top-level node takes the state by value
//! and hands back the updated one, so nothing outside the fold is mutated and the packer runs
//! the same against the box-model engine or a synthetic oracle.
//!
//! # Packing rules
//! - Plain top-level blocks are placed whole.
//! - Sections are opened as shallow wrappers; item/content children are split atom by atom,
//!   reopening fresh section and item wrappers after every page break.
//! - A title immediately followed by a divider is measured and placed as one unit.
//! - A unit that does not fit flushes the page first, unless the page is still empty, in which
//!   case it is placed regardless (first-unit exception, guarantees progress).

use serde::Serialize;
use tracing::warn;

use crate::layout::atoms::collect_atoms;
use crate::layout::classify::{SectionChild, TagSets};
use crate::layout::oracle::HeightOracle;
use crate::layout::page_config::PaginationConfig;
use crate::models::Node;

// ────────────────────────────────────────────────────────────────────────────
// Output types
// ────────────────────────────────────────────────────────────────────────────

/// One packed page: cloned top-level/section structures and the true (buffer-free) height.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page {
    pub nodes: Vec<Node>,
    pub height: f64,
}

/// Result of one packing run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Pagination {
    pub pages: Vec<Page>,
}

impl Pagination {
    pub fn heights(&self) -> Vec<f64> {
        self.pages.iter().map(|p| p.height).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Public entry point
// ────────────────────────────────────────────────────────────────────────────

/// Packs the children of `root` onto pages with every measurement inflated by `buffer`.
pub fn paginate<O: HeightOracle + ?Sized>(
    root: &Node,
    oracle: &O,
    buffer: f64,
    config: &PaginationConfig,
) -> Pagination {
    let ctx = PackContext {
        oracle,
        buffer,
        config,
    };
    root.children
        .iter()
        .fold(PackState::default(), |state, node| state.pack_top_level(node, &ctx))
        .finish()
}

// ────────────────────────────────────────────────────────────────────────────
// Fold state
// ────────────────────────────────────────────────────────────────────────────

struct PackContext<'a, O: ?Sized> {
    oracle: &'a O,
    buffer: f64,
    config: &'a PaginationConfig,
}

/// Heights of one placement unit (a block, an atom, or a title/divider pair).
#[derive(Debug, Clone, Copy)]
struct UnitHeight {
    buffered: f64,
    actual: f64,
    margin_bottom: f64,
}

/// Structure of the page being filled.
///
/// Section and item wrappers are opened lazily by the first unit that lands in them, so a
/// page never ends with an empty wrapper.
#[derive(Debug, Default)]
struct PageBuilder {
    nodes: Vec<Node>,
    units: usize,
    section_open: bool,
    item_open: bool,
}

impl PageBuilder {
    fn is_empty(&self) -> bool {
        self.units == 0
    }

    fn place_block(&mut self, node: &Node) {
        self.nodes.push(node.clone());
        self.close_section();
    }

    fn close_section(&mut self) {
        self.section_open = false;
        self.item_open = false;
    }

    fn close_item(&mut self) {
        self.item_open = false;
    }

    fn section_wrapper(&mut self, section: &Node) -> &mut Node {
        if !self.section_open || self.nodes.is_empty() {
            self.nodes.push(section.shallow_clone());
            self.section_open = true;
            self.item_open = false;
        }
        let last = self.nodes.len() - 1;
        &mut self.nodes[last]
    }

    fn place_in_section(&mut self, section: &Node, children: &[&Node]) {
        let wrapper = self.section_wrapper(section);
        wrapper.children.extend(children.iter().map(|c| (*c).clone()));
        self.item_open = false;
    }

    fn place_atom(&mut self, section: &Node, item: &Node, atom: &Node) {
        let reopen_item = !self.item_open || !self.section_open;
        let wrapper = self.section_wrapper(section);
        if reopen_item || wrapper.children.is_empty() {
            wrapper.children.push(item.shallow_clone());
        }
        let last = wrapper.children.len() - 1;
        wrapper.children[last].children.push(atom.clone());
        self.item_open = true;
    }
}

#[derive(Debug, Default)]
struct PackState {
    pages: Vec<Page>,
    page: PageBuilder,
    /// Accumulated height including the trial buffer; drives the fit test.
    buffered: f64,
    /// Accumulated true height; recorded with the page.
    actual: f64,
    /// Bottom margin of the last placed block on this page.
    carry: f64,
}

impl PackState {
    fn pack_top_level<O: HeightOracle + ?Sized>(
        self,
        node: &Node,
        ctx: &PackContext<'_, O>,
    ) -> Self {
        let tags = &ctx.config.tags;
        if !tags.is_section(node) || node.children.is_empty() {
            let mut state = self.admit(&[node], ctx);
            state.page.place_block(node);
            return state;
        }

        let mut state = self;
        state.page.close_section();

        let children = &node.children;
        let mut i = 0;
        while i < children.len() {
            let child = &children[i];
            let kind = tags.section_child(child);
            state = match kind {
                SectionChild::Body => state.pack_body(node, child, ctx),
                SectionChild::Title
                    if children.get(i + 1).is_some_and(|next| tags.is_divider(next)) =>
                {
                    let pair = [child, &children[i + 1]];
                    i += 1;
                    let mut state = state.admit(&pair, ctx);
                    state.page.place_in_section(node, &pair);
                    state
                }
                _ => {
                    let mut state = state.admit(&[child], ctx);
                    state.page.place_in_section(node, &[child]);
                    state
                }
            };
            i += 1;
        }
        state
    }

    fn pack_body<O: HeightOracle + ?Sized>(
        self,
        section: &Node,
        body: &Node,
        ctx: &PackContext<'_, O>,
    ) -> Self {
        let mut state = self;
        state.page.close_item();
        for atom in collect_atoms(body, &ctx.config.tags) {
            state = state.admit(&[atom], ctx);
            state.page.place_atom(section, body, atom);
        }
        state
    }

    /// Measures a unit, breaks the page if it does not fit, and books its heights.
    /// The caller places the unit's nodes into `self.page` afterwards.
    fn admit<O: HeightOracle + ?Sized>(self, unit: &[&Node], ctx: &PackContext<'_, O>) -> Self {
        let mut state = self;
        let mut height = measure_unit(ctx.oracle, unit, state.carry, ctx.buffer);

        if !state.page.is_empty() && state.buffered + height.buffered > ctx.config.fit_limit() {
            state = state.flush();
            height = measure_unit(ctx.oracle, unit, 0.0, ctx.buffer);
        }

        if state.page.is_empty() && height.actual > ctx.config.fit_limit() {
            warn!(
                height = height.actual,
                limit = ctx.config.fit_limit(),
                "Pagination: single unit taller than a page, placing it on its own page"
            );
        }

        state.buffered += height.buffered;
        state.actual += height.actual;
        state.carry = height.margin_bottom;
        state.page.units += 1;
        state
    }

    fn flush(mut self) -> Self {
        if !self.page.is_empty() {
            let page = std::mem::take(&mut self.page);
            self.pages.push(Page {
                nodes: page.nodes,
                height: self.actual,
            });
        }
        self.page = PageBuilder::default();
        self.buffered = 0.0;
        self.actual = 0.0;
        self.carry = 0.0;
        self
    }

    fn finish(self) -> Pagination {
        let state = self.flush();
        Pagination { pages: state.pages }
    }
}

/// Measures the nodes of one unit in sequence, each collapsing against the previous one's
/// bottom margin. Trial and true heights share the same margin chain.
fn measure_unit<O: HeightOracle + ?Sized>(
    oracle: &O,
    unit: &[&Node],
    carry: f64,
    buffer: f64,
) -> UnitHeight {
    let mut height = UnitHeight {
        buffered: 0.0,
        actual: 0.0,
        margin_bottom: carry,
    };
    for node in unit {
        let trial = oracle.measure(node, height.margin_bottom, buffer);
        let truth = oracle.measure(node, height.margin_bottom, 0.0);
        height.buffered += trial.height;
        height.actual += truth.height;
        height.margin_bottom = truth.margin_bottom;
    }
    height
}

/// True height of a packed page, booked the way the packer books it: the placed units (plain
/// blocks, section children, body atoms) stacked from margin carry 0. Wrapper margins and padding
/// are never counted.
pub fn page_height<O: HeightOracle + ?Sized>(oracle: &O, nodes: &[Node], tags: &TagSets) -> f64 {
    let mut carry = 0.0;
    let mut total = 0.0;
    for unit in placed_units(nodes, tags) {
        let m = oracle.measure(unit, carry, 0.0);
        total += m.height;
        carry = m.margin_bottom;
    }
    total
}

fn placed_units<'a>(nodes: &'a [Node], tags: &TagSets) -> Vec<&'a Node> {
    let mut units = Vec::new();
    for node in nodes {
        if !tags.is_section(node) || node.children.is_empty() {
            units.push(node);
            continue;
        }
        for child in &node.children {
            match tags.section_child(child) {
                SectionChild::Body => units.extend(collect_atoms(child, tags)),
                _ => units.push(child),
            }
        }
    }
    units
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
