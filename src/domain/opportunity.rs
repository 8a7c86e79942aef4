use chrono::NaiveDate;

/// One open deal in the pipeline. The name is carried through for reporting
/// only; the simulation uses amount, win probability and close date.
#[derive(Debug, Clone, PartialEq)]
pub struct Opportunity {
    pub name: String,
    pub amount: f64,
    pub win_probability: f64,
    pub close_date: NaiveDate,
}
