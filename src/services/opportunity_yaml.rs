use chrono::NaiveDate;
use serde::Deserialize;
use thiserror::Error;

use crate::domain::opportunity::Opportunity;

#[derive(Error, Debug)]
pub enum OpportunityYamlError {
    #[error("failed to parse opportunity yaml: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("invalid close date for {name}: {value}")]
    InvalidCloseDate { name: String, value: String },
}

#[derive(Deserialize)]
struct OpportunityRecord {
    name: String,
    amount: f64,
    win_probability: f64,
    close_date: String,
}

pub fn deserialize_opportunities_from_yaml_str(
    yaml: &str,
) -> Result<Vec<Opportunity>, OpportunityYamlError> {
    let records: Vec<OpportunityRecord> = serde_yaml::from_str(yaml)?;
    records
        .into_iter()
        .map(|record| {
            let close_date = NaiveDate::parse_from_str(&record.close_date, "%Y-%m-%d")
                .map_err(|_| OpportunityYamlError::InvalidCloseDate {
                    name: record.name.clone(),
                    value: record.close_date.clone(),
                })?;
            Ok(Opportunity {
                name: record.name,
                amount: record.amount,
                win_probability: record.win_probability,
                close_date,
            })
        })
        .collect()
}
