pub mod currency;
pub mod histogram;
pub mod horizon;
pub mod opportunity_yaml;
pub mod percentiles;
pub mod simulation;
pub mod simulation_types;
pub mod statistics;
pub mod target_analysis;
pub mod trial_engine;
