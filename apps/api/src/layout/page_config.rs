//! Page geometry and tuning constants for the pagination pipeline.
//!
//! Defaults describe an A4 sheet rendered at 96 DPI: 1123 px tall with 36 px top and 57 px
//! bottom padding, leaving 1030 px of content height, and 794 px wide with 47 px padding on
//! each side, leaving 700 px of text width.

use crate::layout::classify::TagSets;
use crate::layout::text_metrics::FontFamily;

pub const A4_HEIGHT_PX: f64 = 1123.0;
pub const PAGE_PADDING_Y_PX: f64 = 93.0;

/// Everything the paginator, optimizer and compressor read.
#[derive(Debug, Clone)]
pub struct PaginationConfig {
    /// Usable content height of one page.
    pub max_content_height: f64,
    /// Sub-pixel overshoot still accepted by the fit test.
    pub overflow_tolerance: f64,
    /// Buffer search bracket.
    pub buffer_min: f64,
    pub buffer_max: f64,
    pub search_iterations: u32,
    /// Theme line height the document is rendered with.
    pub base_line_height: f64,
    pub base_font_size: f64,
    pub content_width: f64,
    pub font: FontFamily,
    /// Readability floor for line-height compression.
    pub min_line_height: f64,
    pub line_height_step: f64,
    /// Leftover above which a page (after the first) is compressed.
    pub compression_threshold: f64,
    /// Leftover the compressor aims to bring a page down to.
    pub compression_goal: f64,
    /// Fraction of the targeted reduction a compression must actually save to be kept.
    pub min_savings_ratio: f64,
    pub tags: TagSets,
}

impl PaginationConfig {
    /// Largest accumulated height the fit test admits.
    pub fn fit_limit(&self) -> f64 {
        self.max_content_height + self.overflow_tolerance
    }

    /// Unused vertical space of a page with the given true height.
    pub fn leftover(&self, height: f64) -> f64 {
        self.max_content_height - height
    }
}

impl Default for PaginationConfig {
    fn default() -> Self {
        default_pagination_config()
    }
}

/// Returns the A4 resume defaults.
pub fn default_pagination_config() -> PaginationConfig {
    PaginationConfig {
        max_content_height: A4_HEIGHT_PX - PAGE_PADDING_Y_PX,
        overflow_tolerance: 2.0,
        buffer_min: -15.0,
        buffer_max: 15.0,
        search_iterations: 12,
        base_line_height: 1.6,
        base_font_size: 14.0,
        content_width: 700.0,
        font: FontFamily::Inter,
        min_line_height: 1.4,
        line_height_step: 0.05,
        compression_threshold: 300.0,
        compression_goal: 200.0,
        min_savings_ratio: 0.5,
        tags: TagSets::default(),
    }
}
