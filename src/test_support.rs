use chrono::{Duration, NaiveDate};

use crate::domain::opportunity::Opportunity;

pub fn on_date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub fn build_opportunity(
    name: &str,
    amount: f64,
    win_probability: f64,
    close_date: NaiveDate,
) -> Opportunity {
    Opportunity {
        name: name.to_string(),
        amount,
        win_probability,
        close_date,
    }
}

/// Four deals totaling $4.25M with a weighted value of $2.2125M, closing at
/// +30/+60/+90/+120 days.
pub fn sample_pipeline(today: NaiveDate) -> Vec<Opportunity> {
    vec![
        build_opportunity("Deal A", 1_000_000.0, 0.9, today + Duration::days(30)),
        build_opportunity("Deal B", 500_000.0, 0.5, today + Duration::days(60)),
        build_opportunity("Deal C", 2_000_000.0, 0.25, today + Duration::days(90)),
        build_opportunity("Deal D", 750_000.0, 0.75, today + Duration::days(120)),
    ]
}
