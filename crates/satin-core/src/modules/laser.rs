use super::report::{write_footer, write_header, write_row};
use super::traits::{ReportDestination, ReportWriter};
use crate::domain::{LaserConfig, ResultRow, SatinError, SatinResult};
use crate::numerics::{SATURATION_LADDER_LEN, sweep};
use chrono::{DateTime, Local};
use std::io::{self, Write};
use std::time::Instant;
use tracing::{debug, info};

/// Header metadata plus every row written for one laser.
#[derive(Debug, Clone, PartialEq)]
pub struct LaserReport {
    pub laser: LaserConfig,
    pub started_at: DateTime<Local>,
    pub finished_at: DateTime<Local>,
    pub rows: Vec<ResultRow>,
}

/// One laser's share of the batch: every input power swept against the
/// laser's small-signal gain.
#[derive(Debug, Clone, Copy)]
pub struct LaserTask<'a> {
    laser: &'a LaserConfig,
    input_powers: &'a [i32],
}

impl<'a> LaserTask<'a> {
    pub fn new(laser: &'a LaserConfig, input_powers: &'a [i32]) -> Self {
        Self {
            laser,
            input_powers,
        }
    }

    pub fn laser(&self) -> &'a LaserConfig {
        self.laser
    }

    pub fn row_count(&self) -> usize {
        self.input_powers.len() * SATURATION_LADDER_LEN
    }

    /// Rows in report order without touching any destination.
    pub fn compute_rows(&self) -> Vec<ResultRow> {
        let mut rows = Vec::with_capacity(self.row_count());
        for &input_power in self.input_powers {
            rows.extend(sweep(input_power, self.laser.small_signal_gain));
        }
        rows
    }

    /// Opens the laser's destination, streams the header and each input
    /// power's rows as they are computed, then the footer.
    pub fn run(&self, destination: &dyn ReportDestination) -> SatinResult<LaserReport> {
        let laser = self.laser;
        let mut writer = destination.open(laser)?;
        let clock = Instant::now();
        let started_at = Local::now();
        info!(
            destination = %laser.output_destination,
            input_powers = self.input_powers.len(),
            "laser task started"
        );

        write_header(&mut writer, laser, &started_at).map_err(|source| write_error(laser, source))?;

        let mut rows = Vec::with_capacity(self.row_count());
        for &input_power in self.input_powers {
            let swept = sweep(input_power, laser.small_signal_gain);
            write_rows(&mut writer, &swept).map_err(|source| write_error(laser, source))?;
            debug!(
                destination = %laser.output_destination,
                input_power,
                "input power swept"
            );
            rows.extend(swept);
        }

        let finished_at = Local::now();
        write_footer(&mut writer, &finished_at).map_err(|source| write_error(laser, source))?;
        writer.flush().map_err(|source| {
            SatinError::io_system(
                "IO.REPORT_CLOSE",
                format!(
                    "failed to close report '{}': {}",
                    laser.output_destination, source
                ),
            )
        })?;

        info!(
            destination = %laser.output_destination,
            rows = rows.len(),
            elapsed_ms = clock.elapsed().as_millis() as u64,
            "laser task finished"
        );

        Ok(LaserReport {
            laser: laser.clone(),
            started_at,
            finished_at,
            rows,
        })
    }
}

fn write_rows(writer: &mut ReportWriter, rows: &[ResultRow]) -> io::Result<()> {
    for row in rows {
        write_row(writer, row)?;
    }
    Ok(())
}

fn write_error(laser: &LaserConfig, source: io::Error) -> SatinError {
    SatinError::io_system(
        "IO.REPORT_WRITE",
        format!(
            "failed to write report '{}': {}",
            laser.output_destination, source
        ),
    )
}
