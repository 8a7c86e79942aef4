use crate::commands::base_commands::{Commands, ReportEncoding};
use crate::commands::report_format::format_simulation_report;
use crate::services::simulation::{SimulationParameters, simulate_from_opportunity_file};
use crate::services::simulation_types::SimulationReport;

pub fn simulate_command(cmd: Commands) {
    if let Commands::Simulate {
        input,
        output,
        trials,
        horizon_days,
        targets,
        seed,
        format,
    } = cmd
    {
        let histogram_path = format!("{output}.png");
        let parameters = SimulationParameters {
            trial_count: trials,
            horizon_days,
            targets,
        };

        let report =
            match simulate_from_opportunity_file(&input, &parameters, seed, &histogram_path) {
                Ok(report) => report,
                Err(e) => {
                    eprintln!("Failed to simulate pipeline: {e}");
                    return;
                }
            };

        let encoded = match encode_report(&report, format) {
            Ok(contents) => contents,
            Err(e) => {
                eprintln!("Failed to serialize simulation report: {e}");
                return;
            }
        };

        if let Err(e) = std::fs::write(&output, encoded) {
            eprintln!("Failed to write simulation report: {e}");
        } else {
            println!("{}", format_simulation_report(&report));
            println!("Simulation report written to {output}");
            println!("Simulation histogram written to {histogram_path}");
        }
    }
}

fn encode_report(report: &SimulationReport, format: ReportEncoding) -> Result<String, String> {
    match format {
        ReportEncoding::Yaml => serde_yaml::to_string(report).map_err(|e| e.to_string()),
        ReportEncoding::Json => serde_json::to_string_pretty(report).map_err(|e| e.to_string()),
    }
}
