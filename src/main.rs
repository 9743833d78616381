/*!
 * cosort - Main Entry Point
 *
 * Reads every input file in its own cooperative context, sorts each array
 * with the resumable sort, reports per-context running time, and writes the
 * merged result.
 */

use clap::Parser;
use cosort::{init_tracing, merge_into, run_pipeline, Cli, Config, TokioReader};
use tracing::info;

fn main() -> miette::Result<()> {
    init_tracing();

    let config = Config::from(Cli::parse());
    info!(
        inputs = config.inputs.len(),
        latency_micros = config.quantum.latency.as_micros() as u64,
        clock = config.quantum.clock.as_str(),
        "cosort starting"
    );

    let reader = TokioReader::new()?;
    let output = run_pipeline(&config.inputs, reader, config.quantum)?;

    if config.json_report {
        let json = output
            .report
            .to_json()
            .map_err(|e| miette::miette!("failed to serialize report: {e}"))?;
        println!("{json}");
    } else {
        println!("{}", output.report);
    }

    merge_into(&config.output, output.arrays)?;
    Ok(())
}
