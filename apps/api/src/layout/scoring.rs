//! Whitespace score of a page partition. Lower is better.
//!
//! - Any page with negative leftover (overflow) scores `+∞`.
//! - Page 1 earns −10 inside the target band, otherwise twice its distance from the target.
//! - Every later page adds its leftover: unused space is penalised linearly.

use crate::layout::target::TargetBand;

const IN_BAND_BONUS: f64 = -10.0;
const FIRST_PAGE_DEVIATION_WEIGHT: f64 = 2.0;

pub fn whitespace_score(heights: &[f64], max_content_height: f64, band: &TargetBand) -> f64 {
    let mut total = 0.0;
    for (index, height) in heights.iter().enumerate() {
        let leftover = max_content_height - height;
        if leftover < 0.0 {
            return f64::INFINITY;
        }
        total += if index == 0 {
            if band.contains(leftover) {
                IN_BAND_BONUS
            } else {
                FIRST_PAGE_DEVIATION_WEIGHT * (leftover - band.target).abs()
            }
        } else {
            leftover
        };
    }
    total
}
