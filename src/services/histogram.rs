use plotters::prelude::*;
use thiserror::Error;

use crate::services::currency::format_amount;
use crate::services::simulation_types::HistogramBucket;
use crate::services::statistics::round_dp;

#[derive(Error, Debug)]
pub enum HistogramError {
    #[error("failed to render histogram: {0}")]
    Render(String),
}

/// Bins the outcome distribution into `bucket_count` equal-width buckets over
/// the observed `[min, max]` range. The final bucket's upper bound is
/// inclusive so the maximum outcome stays in range. A collapsed range (all
/// outcomes equal) is widened by half a unit on each side.
pub fn build_buckets(
    outcomes: &[f64],
    bucket_count: usize,
    trial_count: usize,
) -> Vec<HistogramBucket> {
    if outcomes.is_empty() || bucket_count == 0 {
        return Vec::new();
    }

    let min_value = outcomes.iter().cloned().fold(f64::INFINITY, f64::min);
    let max_value = outcomes.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let (low_edge, high_edge) = if max_value > min_value {
        (min_value, max_value)
    } else {
        (min_value - 0.5, max_value + 0.5)
    };
    let width = (high_edge - low_edge) / bucket_count as f64;

    let mut counts = vec![0_usize; bucket_count];
    for outcome in outcomes {
        let index = ((outcome - low_edge) / width) as usize;
        counts[index.min(bucket_count - 1)] += 1;
    }

    counts
        .iter()
        .enumerate()
        .map(|(i, &count)| {
            let low = low_edge + width * i as f64;
            let high = if i + 1 == bucket_count {
                high_edge
            } else {
                low_edge + width * (i + 1) as f64
            };
            let frequency = if trial_count == 0 {
                0.0
            } else {
                count as f64 / trial_count as f64
            };
            HistogramBucket {
                range_low: round_dp(low, 2),
                range_high: round_dp(high, 2),
                label: format!("{} – {}", format_amount(low), format_amount(high)),
                count,
                frequency: round_dp(frequency, 4),
            }
        })
        .collect()
}

pub fn write_histogram_png(
    output_path: &str,
    buckets: &[HistogramBucket],
) -> Result<(), HistogramError> {
    if buckets.is_empty() {
        return Ok(());
    }

    let max_count = buckets.iter().map(|b| b.count).max().unwrap_or(1);
    let tick_labels: Vec<String> = buckets
        .iter()
        .map(|b| format_amount(b.range_low))
        .chain(buckets.last().map(|b| format_amount(b.range_high)))
        .collect();

    let root = BitMapBackend::new(output_path, (800, 600)).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| HistogramError::Render(e.to_string()))?;

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .caption("Revenue Forecast", ("sans-serif", 30))
        .x_label_area_size(55)
        .y_label_area_size(65)
        .build_cartesian_2d(0..buckets.len() as i32, 0..(max_count + 1))
        .map_err(|e| HistogramError::Render(e.to_string()))?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc("Total revenue")
        .y_desc("Trials")
        .label_style(("sans-serif", 18))
        .axis_desc_style(("sans-serif", 22))
        .x_label_formatter(&|value| {
            tick_labels
                .get(*value as usize)
                .cloned()
                .unwrap_or_default()
        })
        .draw()
        .map_err(|e| HistogramError::Render(e.to_string()))?;

    let bar_color = RGBColor(30, 122, 204);
    let bar_style = ShapeStyle::from(&bar_color).filled();
    chart
        .draw_series(buckets.iter().enumerate().map(|(i, bucket)| {
            Rectangle::new([(i as i32, 0), (i as i32 + 1, bucket.count)], bar_style)
        }))
        .map_err(|e| HistogramError::Render(e.to_string()))?;

    root.present()
        .map_err(|e| HistogramError::Render(e.to_string()))?;
    Ok(())
}
