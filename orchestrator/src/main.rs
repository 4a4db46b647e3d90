mod configs;
mod diff;
mod error;
mod matrix_io;

use std::{env, num::NonZeroUsize, path::Path, process::ExitCode, time::Instant};

use log::{error, info};

use crate::{configs::RunConfig, error::OrchestratorErr};

const USAGE: &str = "usage: orchestrator run <config.json>\n       orchestrator gen <path> <rows> <cols> [seed]";

fn main() -> ExitCode {
    env_logger::init();

    match dispatch() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn dispatch() -> Result<(), OrchestratorErr> {
    let args: Vec<String> = env::args().skip(1).collect();

    match args.first().map(String::as_str) {
        Some("run") => match &args[1..] {
            [config] => run_convolution(Path::new(config)),
            _ => Err(OrchestratorErr::InvalidConfig(USAGE.into())),
        },
        Some("gen") => match &args[1..] {
            [path, rows, cols] => generate(path, rows, cols, "0"),
            [path, rows, cols, seed] => generate(path, rows, cols, seed),
            _ => Err(OrchestratorErr::InvalidConfig(USAGE.into())),
        },
        _ => Err(OrchestratorErr::InvalidConfig(USAGE.into())),
    }
}

fn generate(path: &str, rows: &str, cols: &str, seed: &str) -> Result<(), OrchestratorErr> {
    let parse = |name: &str, value: &str| {
        value
            .parse::<usize>()
            .map_err(|e| OrchestratorErr::InvalidConfig(format!("{name} {value:?}: {e}")))
    };

    let rows = parse("rows", rows)?;
    let cols = parse("cols", cols)?;
    let seed = seed
        .parse::<u64>()
        .map_err(|e| OrchestratorErr::InvalidConfig(format!("seed {seed:?}: {e}")))?;

    matrix_io::generate(Path::new(path), rows, cols, seed)?;
    info!(rows = rows, cols = cols, seed = seed; "input file written");
    Ok(())
}

/// The original homework flow: sequential pass, parallel pass over a fresh
/// copy of the input, then a diff of the two outputs and a speedup line.
fn run_convolution(config_path: &Path) -> Result<(), OrchestratorErr> {
    let config = RunConfig::load(config_path)?;

    let grid = matrix_io::read_input(&config.input)?;
    info!(rows = grid.rows(), cols = grid.cols(); "input loaded");

    let start = Instant::now();
    stencil::run_pass(&grid, NonZeroUsize::MIN)?;
    let seq_elapsed = start.elapsed();
    matrix_io::write_output(&config.sequential_output, &grid)?;
    info!("sequential pass took {}ms", seq_elapsed.as_millis());

    // The pass mutates the grid in place; reload for a pre-pass copy.
    let grid = matrix_io::read_input(&config.input)?;

    let start = Instant::now();
    stencil::run_pass(&grid, config.workers)?;
    let par_elapsed = start.elapsed();
    matrix_io::write_output(&config.parallel_output, &grid)?;
    info!(workers = config.workers.get(); "parallel pass took {}ms", par_elapsed.as_millis());

    info!(
        "speedup: {:.2}x",
        seq_elapsed.as_secs_f64() / par_elapsed.as_secs_f64().max(f64::EPSILON)
    );

    if config.verify {
        match diff::compare_outputs(&config.sequential_output, &config.parallel_output)? {
            None => info!("outputs match"),
            Some(mismatch) => return Err(OrchestratorErr::OutputMismatch(mismatch)),
        }
    }

    Ok(())
}
