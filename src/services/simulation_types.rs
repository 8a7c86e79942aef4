use serde::Serialize;

#[derive(Serialize, Debug, Clone)]
pub struct SummaryStatistics {
    pub mean: f64,
    pub median: f64,
    pub std_dev: f64,
    pub p10: f64,
    pub p25: f64,
    pub p75: f64,
    pub p90: f64,
    pub min_outcome: f64,
    pub max_outcome: f64,
    pub total_pipeline_value: f64,
    pub weighted_pipeline_value: f64,
}

/// Probability of meeting or exceeding one revenue target.
#[derive(Serialize, Debug, Clone)]
pub struct TargetAnalysis {
    pub target: f64,
    pub target_label: String,
    pub probability: f64,
    pub probability_pct: String,
}

/// One bar of the outcome distribution: `[range_low, range_high)`, except the
/// last bucket whose upper bound is inclusive.
#[derive(Serialize, Debug, Clone)]
pub struct HistogramBucket {
    pub range_low: f64,
    pub range_high: f64,
    pub label: String,
    pub count: usize,
    pub frequency: f64,
}

#[derive(Serialize, Debug, Clone)]
pub struct SimulationMetadata {
    pub trial_count: usize,
    pub opportunities_included: usize,
    pub opportunities_excluded: usize,
    pub compute_time_ms: f64,
    pub timestamp: String,
    pub horizon_days: Option<u32>,
}

#[derive(Serialize, Debug, Clone)]
pub struct SimulationReport {
    pub summary_statistics: SummaryStatistics,
    pub target_analysis: Vec<TargetAnalysis>,
    pub histogram_buckets: Vec<HistogramBucket>,
    pub metadata: SimulationMetadata,
}
