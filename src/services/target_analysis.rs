use crate::services::currency::format_amount;
use crate::services::simulation_types::TargetAnalysis;
use crate::services::statistics::round_dp;

/// Computes the empirical probability of meeting or exceeding each revenue
/// target. Results are sorted ascending by target value regardless of the
/// order the caller supplied them in.
pub fn analyze_targets(outcomes: &[f64], targets: &[f64], trial_count: usize) -> Vec<TargetAnalysis> {
    let mut sorted_targets = targets.to_vec();
    sorted_targets.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    sorted_targets
        .iter()
        .map(|&target| {
            let hit_count = outcomes.iter().filter(|outcome| **outcome >= target).count();
            let probability = if trial_count == 0 {
                0.0
            } else {
                hit_count as f64 / trial_count as f64
            };
            TargetAnalysis {
                target: round_dp(target, 2),
                target_label: format_amount(target),
                probability: round_dp(probability, 4),
                probability_pct: format!("{:.1}%", probability * 100.0),
            }
        })
        .collect()
}
