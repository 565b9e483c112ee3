//! Deterministic oracles and document builders shared by the layout tests.

use crate::layout::oracle::HeightOracle;
use crate::models::Node;

/// Content height is the node's declared `height`, or 0.
pub struct FixedHeights;

impl HeightOracle for FixedHeights {
    fn content_height(&self, node: &Node) -> f64 {
        node.height.unwrap_or(0.0)
    }
}

/// Text whose leading dominates its height: `height + lines * (line_height - 1.4) * leading`.
///
/// Lets a single 0.05 line-height step save a controllable number of pixels.
pub struct LeadingOracle {
    pub leading: f64,
    pub default_line_height: f64,
}

impl HeightOracle for LeadingOracle {
    fn content_height(&self, node: &Node) -> f64 {
        let line_height = node.style.line_height.unwrap_or(self.default_line_height);
        let own = node.height.unwrap_or(0.0)
            + f64::from(node.lines.unwrap_or(0)) * (line_height - 1.4) * self.leading;
        own + node
            .children
            .iter()
            .map(|c| self.measure(c, 0.0, 0.0).height)
            .sum::<f64>()
    }
}

pub fn block(height: f64) -> Node {
    Node::block(&[]).with_height(height)
}

pub fn line(height: f64) -> Node {
    Node::block(&["text-line"]).with_height(height)
}

pub fn title(height: f64) -> Node {
    Node::block(&["section-title"]).with_height(height)
}

pub fn divider(height: f64) -> Node {
    Node::block(&["section-divider"]).with_height(height)
}

pub fn item(lines: Vec<Node>) -> Node {
    Node::block(&["experience-item"]).with_children(lines)
}

pub fn section(children: Vec<Node>) -> Node {
    Node::block(&["resume-section"]).with_children(children)
}

pub fn root(children: Vec<Node>) -> Node {
    Node::block(&["resume-root"]).with_children(children)
}

/// Seeded linear congruential generator for reproducible random documents.
pub struct Lcg(pub u64);

impl Lcg {
    pub fn next_u32(&mut self) -> u32 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (self.0 >> 33) as u32
    }

    pub fn range(&mut self, lo: u32, hi: u32) -> u32 {
        lo + self.next_u32() % (hi - lo + 1)
    }
}

/// Random resume-shaped document: headers, sections with optional title/divider pairs, items
/// of text lines, free content blocks and plain blocks, all with margins.
pub fn random_document(seed: u64) -> Node {
    let mut rng = Lcg(seed);
    let mut top = Vec::new();
    for _ in 0..rng.range(1, 6) {
        if rng.range(0, 3) == 0 {
            let height = f64::from(rng.range(20, 160));
            let margin_bottom = f64::from(rng.range(0, 12));
            top.push(block(height).with_margins(0.0, margin_bottom));
            continue;
        }
        let mut children = Vec::new();
        if rng.range(0, 3) > 0 {
            let height = f64::from(rng.range(18, 30));
            let margin_top = f64::from(rng.range(4, 16));
            children.push(title(height).with_margins(margin_top, 4.0));
            children.push(divider(1.0).with_margins(0.0, f64::from(rng.range(2, 8))));
        }
        for _ in 0..rng.range(0, 4) {
            match rng.range(0, 4) {
                0 => children.push(block(f64::from(rng.range(10, 60)))),
                1 => children.push(
                    Node::block(&["section-content"])
                        .with_children((0..rng.range(1, 8)).map(|_| line(22.0)).collect()),
                ),
                _ => {
                    let mut lines = vec![Node::block(&["item-header"])
                        .with_height(f64::from(rng.range(20, 28)))
                        .with_margins(0.0, 4.0)];
                    lines.extend((0..rng.range(1, 12)).map(|_| {
                        let height = f64::from(rng.range(18, 26));
                        line(height).with_margins(0.0, f64::from(rng.range(0, 4)))
                    }));
                    children.push(item(lines));
                }
            }
        }
        top.push(section(children).with_margins(f64::from(rng.range(0, 10)), 0.0));
    }
    root(top)
}
