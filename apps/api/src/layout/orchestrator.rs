//! Pagination Orchestrator: runs the full pipeline and publishes the pages.
//!
//! # Pipeline
//! 1. Await the surface (pending render commit).
//! 2. Baseline pack with buffer 0. No pages means nothing to publish.
//! 3. Pick the first-page target band from the baseline leftovers.
//! 4. Golden-section search over the buffer.
//! 5. Line-height compression on pages after the first.
//! 6. Await the surface again, drop the run if a newer one started, then publish.
//!
//! Steps 2–5 are CPU-bound and run synchronously in `plan_pages`, called through
//! `tokio::task::spawn_blocking`.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::errors::AppError;
use crate::layout::compressor::{compress_pages, PageCompression};
use crate::layout::oracle::HeightOracle;
use crate::layout::page_config::PaginationConfig;
use crate::layout::paginator::{paginate, Pagination};
use crate::layout::search::{BufferSearch, Evaluation, GoldenSection};
use crate::layout::surface::RenderSurface;
use crate::layout::target::{select_band, TargetBand};
use crate::models::Node;

// ────────────────────────────────────────────────────────────────────────────
// Synchronous planning
// ────────────────────────────────────────────────────────────────────────────

/// Final partition of a document, before publication.
#[derive(Debug, Clone)]
pub struct PagePlan {
    pub pagination: Pagination,
    pub buffer: f64,
    /// Whitespace score of the chosen buffer, measured before compression.
    pub score: f64,
    pub band: TargetBand,
    pub compression: Vec<PageCompression>,
}

/// Runs baseline, band selection, buffer search and compression. `None` when the document
/// produces no pages.
pub fn plan_pages<O: HeightOracle + ?Sized>(
    root: &Node,
    oracle: &O,
    config: &PaginationConfig,
) -> Option<PagePlan> {
    let baseline = paginate(root, oracle, 0.0, config);
    if baseline.is_empty() {
        debug!("Pagination: baseline produced no pages");
        return None;
    }

    let leftovers: Vec<f64> = baseline
        .heights()
        .iter()
        .map(|h| config.leftover(*h))
        .collect();
    let band = select_band(&leftovers);
    info!(
        pages = baseline.len(),
        leftovers = ?leftovers,
        strategy = ?band.strategy,
        target = band.target,
        tolerance = band.tolerance,
        "Pagination: baseline measured"
    );

    let mut objective = |buffer: f64| {
        Evaluation::new(buffer, paginate(root, oracle, buffer, config), &band, config)
    };
    let best = GoldenSection::from_config(config).search(&mut objective);

    let best = if best.is_feasible() {
        best
    } else {
        warn!(
            pages = baseline.len(),
            "Pagination: every trial buffer overflows, keeping the baseline partition"
        );
        Evaluation::new(0.0, baseline, &band, config)
    };

    info!(
        buffer = best.buffer,
        score = best.score,
        heights = ?best.heights,
        first_page_leftover = best.first_page_leftover,
        "Pagination: buffer selected"
    );

    let Evaluation {
        buffer,
        mut pagination,
        score,
        ..
    } = best;
    let compression = compress_pages(&mut pagination, oracle, config);

    Some(PagePlan {
        pagination,
        buffer,
        score,
        band,
        compression,
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Report types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSummary {
    pub index: usize,
    pub height: f64,
    pub leftover: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationReport {
    pub total_pages: usize,
    pub buffer: f64,
    pub score: f64,
    pub band: TargetBand,
    pub pages: Vec<PageSummary>,
    pub compression: Vec<PageCompression>,
}

impl PaginationReport {
    fn from_plan(plan: PagePlan, config: &PaginationConfig) -> PaginationReport {
        let pages = plan
            .pagination
            .pages
            .iter()
            .enumerate()
            .map(|(index, page)| PageSummary {
                index,
                height: page.height,
                leftover: config.leftover(page.height),
            })
            .collect();
        PaginationReport {
            total_pages: plan.pagination.len(),
            buffer: plan.buffer,
            score: plan.score,
            band: plan.band,
            pages,
            compression: plan.compression,
        }
    }
}

#[derive(Debug, Clone)]
pub enum PaginationOutcome {
    Published(PaginationReport),
    /// No document, or a document with nothing to place.
    Empty,
    /// A newer run started before this one could publish.
    Superseded,
}

// ────────────────────────────────────────────────────────────────────────────
// Async orchestrator
// ────────────────────────────────────────────────────────────────────────────

pub struct Orchestrator {
    oracle: Arc<dyn HeightOracle + Send + Sync>,
    surface: Arc<dyn RenderSurface>,
    config: Arc<PaginationConfig>,
    generation: AtomicU64,
}

impl Orchestrator {
    pub fn new(
        oracle: Arc<dyn HeightOracle + Send + Sync>,
        surface: Arc<dyn RenderSurface>,
        config: PaginationConfig,
    ) -> Orchestrator {
        Orchestrator {
            oracle,
            surface,
            config: Arc::new(config),
            generation: AtomicU64::new(0),
        }
    }

    /// Paginates `root` and publishes the pages to the surface.
    pub async fn paginate(&self, root: Option<Node>) -> Result<PaginationOutcome, AppError> {
        let Some(root) = root else {
            debug!("Pagination: no document, nothing to do");
            return Ok(PaginationOutcome::Empty);
        };
        let ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        self.surface.settle().await;

        let oracle = Arc::clone(&self.oracle);
        let config = Arc::clone(&self.config);
        let plan = tokio::task::spawn_blocking(move || plan_pages(&root, oracle.as_ref(), &config))
            .await
            .map_err(|e| {
                AppError::Internal(anyhow::anyhow!("spawn_blocking failed in pagination: {e}"))
            })?;

        let Some(plan) = plan else {
            return Ok(PaginationOutcome::Empty);
        };

        self.surface.settle().await;

        if self.generation.load(Ordering::SeqCst) != ticket {
            info!(ticket, "Pagination: superseded by a newer run, discarding");
            return Ok(PaginationOutcome::Superseded);
        }

        self.surface.prepare(plan.pagination.len()).await;
        for (index, page) in plan.pagination.pages.iter().enumerate() {
            if !self.surface.replace(index, page.nodes.clone()).await {
                warn!(index, "Pagination: page container missing, page not published");
            }
        }

        let report = PaginationReport::from_plan(plan, &self.config);
        info!(total_pages = report.total_pages, "Pagination: published");
        Ok(PaginationOutcome::Published(report))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
