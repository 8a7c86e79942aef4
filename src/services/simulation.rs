use std::ops::RangeInclusive;
use std::time::Instant;

use chrono::{Local, NaiveDate, Utc};
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use thiserror::Error;

use crate::domain::opportunity::Opportunity;
use crate::services::histogram::{HistogramError, build_buckets, write_histogram_png};
use crate::services::horizon::filter_by_horizon;
use crate::services::opportunity_yaml::{
    OpportunityYamlError, deserialize_opportunities_from_yaml_str,
};
use crate::services::simulation_types::{SimulationMetadata, SimulationReport};
use crate::services::statistics::{compute_summary, round_dp};
use crate::services::target_analysis::analyze_targets;
use crate::services::trial_engine::run_trials;

#[derive(Error, Debug)]
pub enum SimulationError {
    #[error("failed to read opportunity file: {0}")]
    ReadOpportunities(#[from] std::io::Error),
    #[error("failed to parse opportunity yaml: {0}")]
    ParseOpportunities(#[from] OpportunityYamlError),
    #[error("trial count {trials} outside allowed range {min}..={max}")]
    TrialCountOutOfRange {
        trials: usize,
        min: usize,
        max: usize,
    },
    #[error("horizon of {days} days outside allowed range {min}..={max}")]
    HorizonOutOfRange { days: u32, min: u32, max: u32 },
    #[error("revenue target must be positive, got {0}")]
    InvalidTarget(f64),
    #[error("opportunity {name} has non-positive amount {amount}")]
    InvalidAmount { name: String, amount: f64 },
    #[error("opportunity {name} has win probability {probability} outside 0..=1")]
    InvalidProbability { name: String, probability: f64 },
    #[error("{count} opportunities exceed the limit of {max}")]
    TooManyOpportunities { count: usize, max: usize },
    #[error(
        "request of {trials} trials x {opportunities} opportunities exceeds the limit of {max_cells} draws"
    )]
    RequestTooLarge {
        trials: usize,
        opportunities: usize,
        max_cells: usize,
    },
    #[error("failed to render histogram: {0}")]
    Histogram(#[from] HistogramError),
}

/// Tunable simulation settings, constructed explicitly and handed to
/// `Forecaster::new`.
#[derive(Debug, Clone)]
pub struct ForecastConfig {
    pub default_trial_count: usize,
    pub trial_count_bounds: RangeInclusive<usize>,
    pub horizon_bounds: RangeInclusive<u32>,
    pub max_opportunities: usize,
    /// Upper bound on `trial_count * opportunity count`, the number of
    /// Bernoulli draws one request may perform.
    pub max_trial_cells: usize,
    /// Targets analyzed when the caller supplies none.
    pub default_targets: Vec<f64>,
    pub histogram_buckets: usize,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            default_trial_count: 10_000,
            trial_count_bounds: 100..=100_000,
            horizon_bounds: 1..=730,
            max_opportunities: 500,
            max_trial_cells: 50_000_000,
            default_targets: vec![
                1_000_000.0,
                5_000_000.0,
                10_000_000.0,
                25_000_000.0,
                50_000_000.0,
            ],
            histogram_buckets: 12,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SimulationParameters {
    pub trial_count: usize,
    pub horizon_days: Option<u32>,
    /// Empty means "use the configured defaults".
    pub targets: Vec<f64>,
}

pub struct Forecaster {
    config: ForecastConfig,
}

impl Forecaster {
    pub fn new(config: ForecastConfig) -> Self {
        Self { config }
    }

    /// Runs one forecast with the process RNG and the current local date.
    pub fn run(
        &self,
        opportunities: &[Opportunity],
        parameters: &SimulationParameters,
    ) -> Result<SimulationReport, SimulationError> {
        let mut rng = rand::thread_rng();
        self.run_with_rng(opportunities, parameters, Local::now().date_naive(), &mut rng)
    }

    /// Full pipeline with injected date and RNG: validate, filter by horizon,
    /// sample trials, then derive statistics, target analysis and histogram
    /// from the one outcome distribution.
    pub fn run_with_rng<R: Rng + ?Sized>(
        &self,
        opportunities: &[Opportunity],
        parameters: &SimulationParameters,
        today: NaiveDate,
        rng: &mut R,
    ) -> Result<SimulationReport, SimulationError> {
        self.validate(opportunities, parameters)?;

        let started = Instant::now();
        let (included, excluded) = filter_by_horizon(opportunities, parameters.horizon_days, today);
        let outcomes = run_trials(&included, parameters.trial_count, rng);

        let targets = if parameters.targets.is_empty() {
            &self.config.default_targets
        } else {
            &parameters.targets
        };

        let summary_statistics = compute_summary(&outcomes, &included);
        let target_analysis = analyze_targets(&outcomes, targets, parameters.trial_count);
        let histogram_buckets = build_buckets(
            &outcomes,
            self.config.histogram_buckets,
            parameters.trial_count,
        );

        let metadata = SimulationMetadata {
            trial_count: parameters.trial_count,
            opportunities_included: included.len(),
            opportunities_excluded: excluded,
            compute_time_ms: round_dp(started.elapsed().as_secs_f64() * 1000.0, 2),
            timestamp: Utc::now().to_rfc3339(),
            horizon_days: parameters.horizon_days,
        };

        Ok(SimulationReport {
            summary_statistics,
            target_analysis,
            histogram_buckets,
            metadata,
        })
    }

    fn validate(
        &self,
        opportunities: &[Opportunity],
        parameters: &SimulationParameters,
    ) -> Result<(), SimulationError> {
        if !self.config.trial_count_bounds.contains(&parameters.trial_count) {
            return Err(SimulationError::TrialCountOutOfRange {
                trials: parameters.trial_count,
                min: *self.config.trial_count_bounds.start(),
                max: *self.config.trial_count_bounds.end(),
            });
        }
        if let Some(days) = parameters.horizon_days {
            if !self.config.horizon_bounds.contains(&days) {
                return Err(SimulationError::HorizonOutOfRange {
                    days,
                    min: *self.config.horizon_bounds.start(),
                    max: *self.config.horizon_bounds.end(),
                });
            }
        }
        for target in &parameters.targets {
            if *target <= 0.0 {
                return Err(SimulationError::InvalidTarget(*target));
            }
        }
        if opportunities.len() > self.config.max_opportunities {
            return Err(SimulationError::TooManyOpportunities {
                count: opportunities.len(),
                max: self.config.max_opportunities,
            });
        }
        for opportunity in opportunities {
            if opportunity.amount <= 0.0 {
                return Err(SimulationError::InvalidAmount {
                    name: opportunity.name.clone(),
                    amount: opportunity.amount,
                });
            }
            if !(0.0..=1.0).contains(&opportunity.win_probability) {
                return Err(SimulationError::InvalidProbability {
                    name: opportunity.name.clone(),
                    probability: opportunity.win_probability,
                });
            }
        }
        let cells = parameters.trial_count.saturating_mul(opportunities.len());
        if cells > self.config.max_trial_cells {
            return Err(SimulationError::RequestTooLarge {
                trials: parameters.trial_count,
                opportunities: opportunities.len(),
                max_cells: self.config.max_trial_cells,
            });
        }
        Ok(())
    }
}

pub(crate) fn simulate_from_opportunity_file(
    input_path: &str,
    parameters: &SimulationParameters,
    seed: Option<u64>,
    histogram_path: &str,
) -> Result<SimulationReport, SimulationError> {
    let yaml = std::fs::read_to_string(input_path)?;
    let opportunities = deserialize_opportunities_from_yaml_str(&yaml)?;
    let forecaster = Forecaster::new(ForecastConfig::default());

    let report = match seed {
        Some(seed) => {
            let mut rng = StdRng::seed_from_u64(seed);
            forecaster.run_with_rng(
                &opportunities,
                parameters,
                Local::now().date_naive(),
                &mut rng,
            )?
        }
        None => forecaster.run(&opportunities, parameters)?,
    };

    write_histogram_png(histogram_path, &report.histogram_buckets)?;
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{build_opportunity, on_date, sample_pipeline};

    fn default_parameters(trial_count: usize) -> SimulationParameters {
        SimulationParameters {
            trial_count,
            horizon_days: None,
            targets: Vec::new(),
        }
    }

    #[test]
    fn rejects_trial_count_outside_bounds() {
        let forecaster = Forecaster::new(ForecastConfig::default());
        let deals = sample_pipeline(on_date(2026, 8, 7));
        let mut rng = StdRng::seed_from_u64(1);

        let too_low = forecaster.run_with_rng(
            &deals,
            &default_parameters(5),
            on_date(2026, 8, 7),
            &mut rng,
        );
        assert!(matches!(
            too_low,
            Err(SimulationError::TrialCountOutOfRange { trials: 5, .. })
        ));

        let too_high = forecaster.run_with_rng(
            &deals,
            &default_parameters(1_000_000),
            on_date(2026, 8, 7),
            &mut rng,
        );
        assert!(matches!(
            too_high,
            Err(SimulationError::TrialCountOutOfRange { .. })
        ));
    }

    #[test]
    fn rejects_horizon_outside_bounds() {
        let forecaster = Forecaster::new(ForecastConfig::default());
        let deals = sample_pipeline(on_date(2026, 8, 7));
        let mut rng = StdRng::seed_from_u64(1);
        let parameters = SimulationParameters {
            trial_count: 1_000,
            horizon_days: Some(1_000),
            targets: Vec::new(),
        };

        let result = forecaster.run_with_rng(&deals, &parameters, on_date(2026, 8, 7), &mut rng);

        assert!(matches!(
            result,
            Err(SimulationError::HorizonOutOfRange { days: 1_000, .. })
        ));
    }

    #[test]
    fn rejects_non_positive_target() {
        let forecaster = Forecaster::new(ForecastConfig::default());
        let deals = sample_pipeline(on_date(2026, 8, 7));
        let mut rng = StdRng::seed_from_u64(1);
        let parameters = SimulationParameters {
            trial_count: 1_000,
            horizon_days: None,
            targets: vec![1_000_000.0, -5.0],
        };

        let result = forecaster.run_with_rng(&deals, &parameters, on_date(2026, 8, 7), &mut rng);

        assert!(matches!(result, Err(SimulationError::InvalidTarget(t)) if t == -5.0));
    }

    #[test]
    fn rejects_invalid_opportunity_fields() {
        let forecaster = Forecaster::new(ForecastConfig::default());
        let mut rng = StdRng::seed_from_u64(1);
        let today = on_date(2026, 8, 7);

        let bad_amount = vec![build_opportunity("Zero", 0.0, 0.5, today)];
        let result =
            forecaster.run_with_rng(&bad_amount, &default_parameters(1_000), today, &mut rng);
        assert!(matches!(result, Err(SimulationError::InvalidAmount { .. })));

        let bad_probability = vec![build_opportunity("Overconfident", 1_000.0, 1.5, today)];
        let result =
            forecaster.run_with_rng(&bad_probability, &default_parameters(1_000), today, &mut rng);
        assert!(matches!(
            result,
            Err(SimulationError::InvalidProbability { .. })
        ));
    }

    #[test]
    fn rejects_oversized_requests_distinctly_from_validation() {
        let config = ForecastConfig {
            max_trial_cells: 1_000,
            ..ForecastConfig::default()
        };
        let forecaster = Forecaster::new(config);
        let deals = sample_pipeline(on_date(2026, 8, 7));
        let mut rng = StdRng::seed_from_u64(1);

        let result = forecaster.run_with_rng(
            &deals,
            &default_parameters(1_000),
            on_date(2026, 8, 7),
            &mut rng,
        );

        assert!(matches!(
            result,
            Err(SimulationError::RequestTooLarge {
                trials: 1_000,
                opportunities: 4,
                max_cells: 1_000,
            })
        ));
    }

    #[test]
    fn uses_configured_default_targets_when_none_are_given() {
        let forecaster = Forecaster::new(ForecastConfig::default());
        let deals = sample_pipeline(on_date(2026, 8, 7));
        let mut rng = StdRng::seed_from_u64(1);

        let report = forecaster
            .run_with_rng(
                &deals,
                &default_parameters(1_000),
                on_date(2026, 8, 7),
                &mut rng,
            )
            .unwrap();

        let targets: Vec<f64> = report.target_analysis.iter().map(|t| t.target).collect();
        assert_eq!(
            targets,
            vec![
                1_000_000.0,
                5_000_000.0,
                10_000_000.0,
                25_000_000.0,
                50_000_000.0
            ]
        );
    }

    #[test]
    fn certain_pipeline_produces_exact_outcomes() {
        let forecaster = Forecaster::new(ForecastConfig::default());
        let today = on_date(2026, 8, 7);
        let deals = vec![build_opportunity("Certain", 1_000_000.0, 1.0, today)];
        let mut rng = StdRng::seed_from_u64(1);
        let parameters = SimulationParameters {
            trial_count: 1_000,
            horizon_days: None,
            targets: vec![0.01, 10_000_000_000.0],
        };

        let report = forecaster
            .run_with_rng(&deals, &parameters, today, &mut rng)
            .unwrap();

        let stats = &report.summary_statistics;
        assert_eq!(stats.mean, 1_000_000.0);
        assert_eq!(stats.min_outcome, 1_000_000.0);
        assert_eq!(stats.max_outcome, 1_000_000.0);
        assert_eq!(stats.std_dev, 0.0);

        assert!(report.target_analysis[0].probability > 0.99);
        assert!(report.target_analysis[1].probability < 0.01);
    }

    #[test]
    fn metadata_reflects_horizon_filtering() {
        let forecaster = Forecaster::new(ForecastConfig::default());
        let today = on_date(2026, 8, 7);
        let deals = sample_pipeline(today);
        let mut rng = StdRng::seed_from_u64(1);
        let parameters = SimulationParameters {
            trial_count: 1_000,
            horizon_days: Some(45),
            targets: Vec::new(),
        };

        let report = forecaster
            .run_with_rng(&deals, &parameters, today, &mut rng)
            .unwrap();

        assert_eq!(report.metadata.trial_count, 1_000);
        assert_eq!(report.metadata.opportunities_included, 1);
        assert_eq!(report.metadata.opportunities_excluded, 3);
        assert_eq!(report.metadata.horizon_days, Some(45));
        assert_eq!(report.histogram_buckets.len(), 12);
        let counted: usize = report.histogram_buckets.iter().map(|b| b.count).sum();
        assert_eq!(counted, 1_000);
    }

    #[test]
    fn fixed_seed_makes_the_forecast_deterministic() {
        let forecaster = Forecaster::new(ForecastConfig::default());
        let today = on_date(2026, 8, 7);
        let deals = sample_pipeline(today);

        let mut first_rng = StdRng::seed_from_u64(2026);
        let first = forecaster
            .run_with_rng(&deals, &default_parameters(2_000), today, &mut first_rng)
            .unwrap();
        let mut second_rng = StdRng::seed_from_u64(2026);
        let second = forecaster
            .run_with_rng(&deals, &default_parameters(2_000), today, &mut second_rng)
            .unwrap();

        assert_eq!(first.summary_statistics.mean, second.summary_statistics.mean);
        assert_eq!(
            first.summary_statistics.std_dev,
            second.summary_statistics.std_dev
        );
        let first_counts: Vec<usize> = first.histogram_buckets.iter().map(|b| b.count).collect();
        let second_counts: Vec<usize> = second.histogram_buckets.iter().map(|b| b.count).collect();
        assert_eq!(first_counts, second_counts);
    }

    #[test]
    fn empty_pipeline_still_fills_the_distribution() {
        let forecaster = Forecaster::new(ForecastConfig::default());
        let mut rng = StdRng::seed_from_u64(1);

        let report = forecaster
            .run_with_rng(&[], &default_parameters(500), on_date(2026, 8, 7), &mut rng)
            .unwrap();

        assert_eq!(report.metadata.opportunities_included, 0);
        assert_eq!(report.summary_statistics.mean, 0.0);
        assert_eq!(report.summary_statistics.total_pipeline_value, 0.0);
        let counted: usize = report.histogram_buckets.iter().map(|b| b.count).sum();
        assert_eq!(counted, 500);
    }
}
