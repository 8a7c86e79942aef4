use crate::services::currency::format_amount;
use crate::services::simulation_types::{SimulationReport, SummaryStatistics};

pub fn format_simulation_report(report: &SimulationReport) -> String {
    let meta = &report.metadata;
    let horizon = match meta.horizon_days {
        Some(days) => format!("{days} days"),
        None => "none".to_string(),
    };

    let mut lines = Vec::new();
    lines.push("Pipeline Forecast".to_string());
    lines.push(format!("Trials: {}", meta.trial_count));
    lines.push(format!(
        "Opportunities included: {}",
        meta.opportunities_included
    ));
    lines.push(format!(
        "Opportunities excluded: {}",
        meta.opportunities_excluded
    ));
    lines.push(format!("Horizon: {horizon}"));
    lines.push(format!("Compute time: {:.2} ms", meta.compute_time_ms));
    lines.push(String::new());
    lines.push("Summary:".to_string());
    lines.push("Statistic | Revenue".to_string());
    lines.push("----------|--------".to_string());
    lines.extend(summary_rows(&report.summary_statistics));
    lines.push(String::new());
    lines.push("Targets:".to_string());
    lines.push("Target | Probability".to_string());
    lines.push("-------|------------".to_string());
    for target in &report.target_analysis {
        lines.push(format!(
            "{} | {}",
            target.target_label, target.probability_pct
        ));
    }

    lines.join("\n")
}

fn summary_rows(stats: &SummaryStatistics) -> Vec<String> {
    vec![
        format!("Mean | {}", format_amount(stats.mean)),
        format!("Median | {}", format_amount(stats.median)),
        format!("Std dev | {}", format_amount(stats.std_dev)),
        format!("P10 | {}", format_amount(stats.p10)),
        format!("P25 | {}", format_amount(stats.p25)),
        format!("P75 | {}", format_amount(stats.p75)),
        format!("P90 | {}", format_amount(stats.p90)),
        format!("Min | {}", format_amount(stats.min_outcome)),
        format!("Max | {}", format_amount(stats.max_outcome)),
        format!("Pipeline total | {}", format_amount(stats.total_pipeline_value)),
        format!(
            "Pipeline weighted | {}",
            format_amount(stats.weighted_pipeline_value)
        ),
    ]
}
