use crate::domain::opportunity::Opportunity;
use crate::services::percentiles;
use crate::services::simulation_types::SummaryStatistics;

/// Derives descriptive statistics from the sampled outcome distribution.
///
/// The pipeline aggregates are computed analytically from the opportunity
/// list, not from the samples: `weighted_pipeline_value` is the expected
/// value the simulated mean should converge to.
pub fn compute_summary(outcomes: &[f64], opportunities: &[Opportunity]) -> SummaryStatistics {
    let total_pipeline_value: f64 = opportunities.iter().map(|o| o.amount).sum();
    let weighted_pipeline_value: f64 = opportunities
        .iter()
        .map(|o| o.amount * o.win_probability)
        .sum();

    if outcomes.is_empty() {
        return SummaryStatistics {
            mean: 0.0,
            median: 0.0,
            std_dev: 0.0,
            p10: 0.0,
            p25: 0.0,
            p75: 0.0,
            p90: 0.0,
            min_outcome: 0.0,
            max_outcome: 0.0,
            total_pipeline_value: round_dp(total_pipeline_value, 2),
            weighted_pipeline_value: round_dp(weighted_pipeline_value, 2),
        };
    }

    let mut sorted = outcomes.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let mean = outcomes.iter().sum::<f64>() / outcomes.len() as f64;
    // Population variance, not sample-corrected.
    let variance = outcomes
        .iter()
        .map(|outcome| (outcome - mean).powi(2))
        .sum::<f64>()
        / outcomes.len() as f64;

    SummaryStatistics {
        mean,
        median: percentiles::value_or_zero(&sorted, 50.0),
        std_dev: variance.sqrt(),
        p10: percentiles::value_or_zero(&sorted, 10.0),
        p25: percentiles::value_or_zero(&sorted, 25.0),
        p75: percentiles::value_or_zero(&sorted, 75.0),
        p90: percentiles::value_or_zero(&sorted, 90.0),
        min_outcome: sorted[0],
        max_outcome: sorted[sorted.len() - 1],
        total_pipeline_value: round_dp(total_pipeline_value, 2),
        weighted_pipeline_value: round_dp(weighted_pipeline_value, 2),
    }
}

pub(crate) fn round_dp(value: f64, places: i32) -> f64 {
    let factor = 10_f64.powi(places);
    (value * factor).round() / factor
}
