/*!
 * Configuration
 * Command-line surface and the startup configuration derived from it
 */

use crate::core::limits::DEFAULT_OUTPUT_PATH;
use crate::runtime::{ClockSource, QuantumConfig};
use clap::Parser;
use std::path::PathBuf;

/// Sort every input file in its own cooperative context, then merge
#[derive(Debug, Parser)]
#[command(name = "cosort", version, about)]
pub struct Cli {
    /// Quantum latency budget in microseconds
    pub latency_us: u64,

    /// Input files of whitespace-separated integers, one context each
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Clock used for quantum accounting
    #[arg(long, value_enum, default_value_t = ClockSource::Monotonic, env = "COSORT_CLOCK")]
    pub clock: ClockSource,

    /// Path of the merged output file
    #[arg(short, long, default_value = DEFAULT_OUTPUT_PATH, env = "COSORT_OUTPUT")]
    pub output: PathBuf,

    /// Print the run report as JSON
    #[arg(long, env = "COSORT_REPORT_JSON")]
    pub json: bool,
}

/// Startup configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub quantum: QuantumConfig,
    pub inputs: Vec<PathBuf>,
    pub output: PathBuf,
    pub json_report: bool,
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        Self {
            quantum: QuantumConfig::from_micros(cli.latency_us).with_clock(cli.clock),
            inputs: cli.files,
            output: cli.output,
            json_report: cli.json,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_parse_arguments() {
        let cli = Cli::try_parse_from(["cosort", "250", "a.txt", "b.txt", "--clock", "process-cpu"])
            .unwrap();
        let config = Config::from(cli);

        assert_eq!(config.quantum.latency, Duration::from_micros(250));
        assert_eq!(config.quantum.clock, ClockSource::ProcessCpu);
        assert_eq!(config.inputs, vec![PathBuf::from("a.txt"), PathBuf::from("b.txt")]);
        assert_eq!(config.output, PathBuf::from(DEFAULT_OUTPUT_PATH));
        assert!(!config.json_report);
    }

    #[test]
    fn test_requires_input_files() {
        assert!(Cli::try_parse_from(["cosort", "1000"]).is_err());
        assert!(Cli::try_parse_from(["cosort"]).is_err());
    }
}
