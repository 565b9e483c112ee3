//! Dynamic Target Policy: picks how much whitespace the first page should keep.
//!
//! When page 2 of the buffer-free baseline is mostly empty, the first page is allowed to end
//! earlier so content can flow onto page 2. The tiers are keyed on page 2's leftover.

use serde::Serialize;

/// Named tiers of the policy, from strictest to most relaxed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetStrategy {
    /// Page 2 leftover ≤ 100 (or a single page): keep page 1 within 4–20 px.
    Standard,
    /// Page 2 leftover > 100: 20–40 px.
    Moderate,
    /// Page 2 leftover > 150: 30–60 px.
    Relaxed,
    /// Page 2 leftover > 300: 60–100 px.
    Extreme,
}

/// Desired leftover on the first page and the half-width of the accepted band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TargetBand {
    pub target: f64,
    pub tolerance: f64,
    pub strategy: TargetStrategy,
}

impl TargetBand {
    pub const STANDARD: TargetBand = TargetBand {
        target: 12.0,
        tolerance: 8.0,
        strategy: TargetStrategy::Standard,
    };

    pub fn contains(&self, leftover: f64) -> bool {
        leftover >= self.target - self.tolerance && leftover <= self.target + self.tolerance
    }

    /// Band selected by the leftover of the second baseline page.
    pub fn for_second_page_leftover(leftover: f64) -> TargetBand {
        if leftover > 300.0 {
            TargetBand {
                target: 80.0,
                tolerance: 20.0,
                strategy: TargetStrategy::Extreme,
            }
        } else if leftover > 150.0 {
            TargetBand {
                target: 45.0,
                tolerance: 15.0,
                strategy: TargetStrategy::Relaxed,
            }
        } else if leftover > 100.0 {
            TargetBand {
                target: 30.0,
                tolerance: 10.0,
                strategy: TargetStrategy::Moderate,
            }
        } else {
            TargetBand::STANDARD
        }
    }
}

/// Selects the first-page band from the baseline leftovers (one per page, in order).
pub fn select_band(baseline_leftovers: &[f64]) -> TargetBand {
    match baseline_leftovers.get(1) {
        Some(&second) => TargetBand::for_second_page_leftover(second),
        None => TargetBand::STANDARD,
    }
}
