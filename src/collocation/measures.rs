//! Association measures over n-gram contingency tables.
//!
//! A contingency table for an order-`n` phrase has `2^n` cells. Bit `j` of a cell
//! index is set when position `j` holds *some other* word than the phrase's `j`th
//! word, so cell `0` is the phrase itself and cell `2^n - 1` is "none of the words".

use crate::constants::collocation::LIKELIHOOD_EPSILON;

/// Build the contingency table from marginal counts.
///
/// `marginal(mask)` must return the number of windows whose positions in `mask`
/// hold the phrase's words (positions outside the mask unconstrained), with
/// `marginal(0)` equal to the total number of tokens. Cells are recovered by
/// inclusion-exclusion; negative cells (possible near the stream edges) are
/// clamped to zero.
pub fn contingency(order: usize, marginal: impl Fn(usize) -> u64) -> Vec<f64> {
    let full = (1usize << order) - 1;
    (0..=full)
        .map(|cell| {
            let required = full & !cell;
            let mut total: i128 = 0;
            // walk every subset of `cell`
            let mut subset = cell;
            loop {
                let count = marginal(required | subset) as i128;
                if subset.count_ones() % 2 == 0 {
                    total += count;
                } else {
                    total -= count;
                }
                if subset == 0 {
                    break;
                }
                subset = (subset - 1) & cell;
            }
            total.max(0) as f64
        })
        .collect()
}

/// Expected cell values under independence of positions.
pub fn expected_values(order: usize, contingency: &[f64]) -> Vec<f64> {
    let cells = contingency.len();
    let total: f64 = contingency.iter().sum();
    let denominator = total.powi(order as i32 - 1);
    (0..cells)
        .map(|cell| {
            let product: f64 = (0..order)
                .map(|position| {
                    let bit = 1usize << position;
                    contingency
                        .iter()
                        .enumerate()
                        .filter(|(other, _)| other & bit == cell & bit)
                        .map(|(_, observed)| observed)
                        .sum::<f64>()
                })
                .product();
            if denominator > 0.0 {
                product / denominator
            } else {
                0.0
            }
        })
        .collect()
}

/// Log-likelihood ratio: `2 * sum(obs * ln(obs / (exp + eps) + eps))` over observed cells.
pub fn likelihood_ratio(order: usize, contingency: &[f64]) -> f64 {
    let expected = expected_values(order, contingency);
    2.0 * contingency
        .iter()
        .zip(expected.iter())
        .filter(|(observed, _)| **observed > 0.0)
        .map(|(observed, expected)| {
            observed * (observed / (expected + LIKELIHOOD_EPSILON) + LIKELIHOOD_EPSILON).ln()
        })
        .sum::<f64>()
}
