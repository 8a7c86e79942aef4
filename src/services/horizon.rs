use chrono::{Duration, NaiveDate};

use crate::domain::opportunity::Opportunity;

/// Restricts the pipeline to opportunities closing inside the forward-looking
/// window `[today, today + horizon_days]`, both bounds inclusive. With no
/// horizon every opportunity passes through. `today` is a parameter so the
/// filter stays deterministic under test.
pub fn filter_by_horizon(
    opportunities: &[Opportunity],
    horizon_days: Option<u32>,
    today: NaiveDate,
) -> (Vec<Opportunity>, usize) {
    let Some(days) = horizon_days else {
        return (opportunities.to_vec(), 0);
    };

    let window_end = today + Duration::days(i64::from(days));
    let included: Vec<Opportunity> = opportunities
        .iter()
        .filter(|o| today <= o.close_date && o.close_date <= window_end)
        .cloned()
        .collect();
    let excluded = opportunities.len() - included.len();
    (included, excluded)
}
