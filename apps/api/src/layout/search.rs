//! Buffer Optimizer: one-dimensional search for the trial buffer that minimises the
//! whitespace score.
//!
//! The search only sees an objective `buffer -> Evaluation`; packing and scoring live with the
//! caller. `GoldenSection` is what the pipeline runs. `ExhaustiveScan` walks a fixed grid and
//! exists to cross-check it in tests.

use tracing::debug;

use crate::layout::page_config::PaginationConfig;
use crate::layout::paginator::Pagination;
use crate::layout::scoring::whitespace_score;
use crate::layout::target::TargetBand;

/// Outcome of packing with one trial buffer.
#[derive(Debug, Clone)]
pub struct Evaluation {
    pub buffer: f64,
    pub pagination: Pagination,
    pub heights: Vec<f64>,
    pub first_page_leftover: f64,
    pub score: f64,
}

impl Evaluation {
    pub fn new(
        buffer: f64,
        pagination: Pagination,
        band: &TargetBand,
        config: &PaginationConfig,
    ) -> Evaluation {
        let heights = pagination.heights();
        let score = whitespace_score(&heights, config.max_content_height, band);
        let first_page_leftover = heights
            .first()
            .map_or(f64::INFINITY, |h| config.leftover(*h));
        Evaluation {
            buffer,
            pagination,
            heights,
            first_page_leftover,
            score,
        }
    }

    pub fn is_feasible(&self) -> bool {
        self.score.is_finite()
    }
}

pub trait BufferSearch {
    /// Returns the best evaluation seen. Ties keep the earlier one.
    fn search(&self, objective: &mut dyn FnMut(f64) -> Evaluation) -> Evaluation;
}

/// Keeps whichever of `best` and `candidate` scores strictly lower.
fn keep_better(best: Option<Evaluation>, candidate: Evaluation) -> Option<Evaluation> {
    match best {
        Some(best) if best.score <= candidate.score => Some(best),
        _ => Some(candidate),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Golden-section search
// ────────────────────────────────────────────────────────────────────────────

const PHI: f64 = 1.618_033_988_749_895;

#[derive(Debug, Clone, Copy)]
pub struct GoldenSection {
    pub lower: f64,
    pub upper: f64,
    pub iterations: u32,
}

impl GoldenSection {
    pub fn from_config(config: &PaginationConfig) -> GoldenSection {
        GoldenSection {
            lower: config.buffer_min,
            upper: config.buffer_max,
            iterations: config.search_iterations,
        }
    }
}

impl BufferSearch for GoldenSection {
    fn search(&self, objective: &mut dyn FnMut(f64) -> Evaluation) -> Evaluation {
        let (mut left, mut right) = (self.lower, self.upper);
        let mut best: Option<Evaluation> = None;

        for iteration in 0..self.iterations {
            let mid1 = right - (right - left) / PHI;
            let mid2 = left + (right - left) / PHI;
            let first = objective(mid1);
            let second = objective(mid2);
            let (s1, s2) = (first.score, second.score);

            if s1 < s2 {
                right = mid2;
            } else {
                left = mid1;
            }

            debug!(
                iteration = iteration + 1,
                left,
                right,
                mid1,
                score1 = s1,
                mid2,
                score2 = s2,
                "Golden-section step"
            );

            best = keep_better(best, first);
            best = keep_better(best, second);
        }

        // Bracket ends are scored last so equally good interior points win.
        best = keep_better(best, objective(self.lower));
        best = keep_better(best, objective(self.upper));
        best.unwrap_or_else(|| objective(self.lower))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Exhaustive scan
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
pub struct ExhaustiveScan {
    pub candidates: Vec<f64>,
}

#[cfg(test)]
impl ExhaustiveScan {
    /// Every `step` from `lower` to `upper` inclusive.
    pub fn grid(lower: f64, upper: f64, step: f64) -> ExhaustiveScan {
        let count = ((upper - lower) / step).round() as usize;
        ExhaustiveScan {
            candidates: (0..=count).map(|i| lower + step * i as f64).collect(),
        }
    }
}

#[cfg(test)]
impl BufferSearch for ExhaustiveScan {
    fn search(&self, objective: &mut dyn FnMut(f64) -> Evaluation) -> Evaluation {
        let mut best = None;
        for &buffer in &self.candidates {
            best = keep_better(best, objective(buffer));
        }
        best.unwrap_or_else(|| objective(0.0))
    }
}
