//! Overflow Compressor: trims line spacing on pages that end far too early.
//!
//! Only pages after the first are considered, and each gets at most one line-height decrement.
//! The decrement is measured on a detached copy first and kept only when it recovers at least
//! half of the targeted reduction.

use serde::Serialize;
use tracing::{debug, info};

use crate::layout::oracle::{HeightOracle, OffscreenContainer};
use crate::layout::page_config::PaginationConfig;
use crate::layout::paginator::{Page, Pagination};

/// What happened to one page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CompressionOutcome {
    /// Leftover was at or below the compression threshold.
    WithinThreshold,
    /// The base line height is already at the readability floor.
    AtFloor,
    /// The decrement saved too little and was discarded.
    InsufficientSavings { savings: f64, required: f64 },
    /// The decrement was kept; `height` is the re-measured page height.
    #[serde(rename_all = "camelCase")]
    Applied {
        from_line_height: f64,
        to_line_height: f64,
        savings: f64,
        height: f64,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageCompression {
    pub index: usize,
    #[serde(flatten)]
    pub outcome: CompressionOutcome,
}

/// Runs one compression attempt on every page after the first, updating applied pages in place.
pub fn compress_pages<O: HeightOracle + ?Sized>(
    pagination: &mut Pagination,
    oracle: &O,
    config: &PaginationConfig,
) -> Vec<PageCompression> {
    pagination
        .pages
        .iter_mut()
        .enumerate()
        .skip(1)
        .map(|(index, page)| PageCompression {
            index,
            outcome: compress_page(page, oracle, config),
        })
        .collect()
}

fn compress_page<O: HeightOracle + ?Sized>(
    page: &mut Page,
    oracle: &O,
    config: &PaginationConfig,
) -> CompressionOutcome {
    let leftover = config.leftover(page.height);
    if leftover <= config.compression_threshold {
        return CompressionOutcome::WithinThreshold;
    }

    let from = config.base_line_height;
    let to = (from - config.line_height_step).max(config.min_line_height);
    if to >= from {
        debug!(line_height = from, "Compression: already at line-height floor");
        return CompressionOutcome::AtFloor;
    }

    let target_reduction = leftover - config.compression_goal;
    let before = oracle.measure_detached(&page.nodes, &config.tags);
    let after = {
        let mut container = OffscreenContainer::mount(&page.nodes);
        for node in container.nodes_mut() {
            node.apply_line_height(to);
        }
        container.page_height(oracle, &config.tags)
    };
    let savings = before - after;
    let required = config.min_savings_ratio * target_reduction;

    if savings < required {
        debug!(
            savings,
            required, "Compression: savings below threshold, leaving page untouched"
        );
        return CompressionOutcome::InsufficientSavings { savings, required };
    }

    for node in &mut page.nodes {
        node.apply_line_height(to);
    }
    page.height = oracle.measure_detached(&page.nodes, &config.tags);
    info!(
        from_line_height = from,
        to_line_height = to,
        savings,
        height = page.height,
        "Compression: applied line-height decrement"
    );

    CompressionOutcome::Applied {
        from_line_height: from,
        to_line_height: to,
        savings,
        height: page.height,
    }
}
