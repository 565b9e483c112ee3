//! Box-model height engine: the production `HeightOracle`.
//!
//! Estimates rendered block heights without a browser:
//! - a node with an explicit `height` is exactly that tall;
//! - a node with children is its vertical padding plus the children stacked with margin collapse
//!   (the first child's top margin and the last child's bottom margin stay inside the parent);
//! - a text leaf is `lines × font_size × line_height` plus padding, where `lines` is given or
//!   derived by word-wrapping `text` against the content width.
//!
//! Nodes that leave `line_height` / `font_size` unset use the theme values. Inherited values are
//! resolved onto the tree beforehand with `Node::propagate_text_style`.

use crate::layout::oracle::{stack_heights, HeightOracle};
use crate::layout::page_config::PaginationConfig;
use crate::layout::text_metrics::{get_metrics, FontMetricTable};
use crate::models::Node;

pub struct BoxModelEngine {
    line_height: f64,
    font_size: f64,
    content_width: f64,
    metrics: &'static FontMetricTable,
}

impl BoxModelEngine {
    pub fn new(config: &PaginationConfig) -> BoxModelEngine {
        BoxModelEngine {
            line_height: config.base_line_height,
            font_size: config.base_font_size,
            content_width: config.content_width,
            metrics: get_metrics(config.font),
        }
    }

    fn text_lines(&self, node: &Node, font_size: f64) -> u32 {
        if let Some(lines) = node.lines {
            return lines;
        }
        match &node.text {
            Some(text) => {
                let width_em = (self.content_width / font_size) as f32;
                self.metrics.wrapped_lines(text, width_em)
            }
            None => 0,
        }
    }
}

impl HeightOracle for BoxModelEngine {
    fn content_height(&self, node: &Node) -> f64 {
        if let Some(height) = node.height {
            return height;
        }

        let style = &node.style;
        let padding = style.padding_top + style.padding_bottom;
        if !node.children.is_empty() {
            return padding + stack_heights(self, &node.children);
        }

        let font_size = style.font_size.unwrap_or(self.font_size);
        let line_height = style.line_height.unwrap_or(self.line_height);
        padding + f64::from(self.text_lines(node, font_size)) * font_size * line_height
    }
}
