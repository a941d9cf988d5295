use super::CliError;
use anyhow::Context;
use satin_core::domain::ExecutionMode;
use satin_core::modules::report::render_table;
use satin_core::modules::{
    DEFAULT_INPUT_POWER_FILE, DEFAULT_LASER_FILE, FileReportDestination, read_input_powers,
    read_laser_configs, run_all,
};
use satin_core::numerics::sweep;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub(super) enum ModeArg {
    Concurrent,
    Sequential,
}

impl From<ModeArg> for ExecutionMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Concurrent => Self::Concurrent,
            ModeArg::Sequential => Self::Sequential,
        }
    }
}

#[derive(clap::Args)]
pub(super) struct RunArgs {
    /// Input power source, one integer wattage per line
    #[arg(long, default_value = DEFAULT_INPUT_POWER_FILE)]
    input_powers: PathBuf,

    /// Laser source: destination, gain, pressure and CO2 source per line
    #[arg(long, default_value = DEFAULT_LASER_FILE)]
    lasers: PathBuf,

    /// Directory report destinations are resolved against
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,

    /// How laser tasks are scheduled
    #[arg(long, value_enum, default_value_t = ModeArg::Concurrent)]
    mode: ModeArg,

    /// Run every laser on one thread (same as --mode sequential)
    #[arg(long, conflicts_with = "mode")]
    single: bool,
}

impl RunArgs {
    fn execution_mode(&self) -> ExecutionMode {
        if self.single {
            ExecutionMode::Sequential
        } else {
            self.mode.into()
        }
    }
}

#[derive(clap::Args)]
pub(super) struct SweepArgs {
    /// Input power in watts
    #[arg(long, allow_negative_numbers = true)]
    input_power: i32,

    /// Small-signal gain in percent
    #[arg(long)]
    gain: f32,

    /// Print rows as JSON instead of the report table
    #[arg(long)]
    json: bool,
}

pub(super) fn run_batch_command(args: RunArgs) -> Result<i32, CliError> {
    let mode = args.execution_mode();
    let input_powers = read_input_powers(&args.input_powers).map_err(CliError::Compute)?;
    let lasers = read_laser_configs(&args.lasers).map_err(CliError::Compute)?;
    let destination = Arc::new(FileReportDestination::new(&args.output_dir));

    let summary =
        run_all(&lasers, &input_powers, destination, mode).map_err(CliError::Compute)?;
    println!(
        "The time was {:.3} seconds.",
        summary.elapsed.as_secs_f64()
    );
    Ok(0)
}

pub(super) fn run_sweep_command(args: SweepArgs) -> Result<i32, CliError> {
    let rows = sweep(args.input_power, args.gain);
    let rendered = if args.json {
        let mut json =
            serde_json::to_string_pretty(&rows).context("failed to serialise sweep rows")?;
        json.push('\n');
        json
    } else {
        render_table(&rows)
    };

    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(rendered.as_bytes())
        .context("failed to write sweep to standard output")?;
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::{ModeArg, RunArgs};
    use satin_core::domain::ExecutionMode;
    use std::path::PathBuf;

    fn run_args(mode: ModeArg, single: bool) -> RunArgs {
        RunArgs {
            input_powers: PathBuf::from("pin.dat"),
            lasers: PathBuf::from("laser.dat"),
            output_dir: PathBuf::from("."),
            mode,
            single,
        }
    }

    #[test]
    fn single_flag_selects_sequential_mode() {
        assert_eq!(
            run_args(ModeArg::Concurrent, true).execution_mode(),
            ExecutionMode::Sequential
        );
        assert_eq!(
            run_args(ModeArg::Concurrent, false).execution_mode(),
            ExecutionMode::Concurrent
        );
        assert_eq!(
            run_args(ModeArg::Sequential, false).execution_mode(),
            ExecutionMode::Sequential
        );
    }
}
