use crate::domain::{LaserConfig, SatinError, SatinResult};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::PathBuf;

pub type ReportWriter = Box<dyn Write + Send>;

/// Where a laser's report goes. Each laser opens its own writer; no two
/// lasers ever share one.
pub trait ReportDestination: Send + Sync {
    fn open(&self, laser: &LaserConfig) -> SatinResult<ReportWriter>;
}

/// Writes `<output_dir>/<output_destination>`, truncating any previous report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReportDestination {
    output_dir: PathBuf,
}

impl FileReportDestination {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn report_path(&self, laser: &LaserConfig) -> PathBuf {
        self.output_dir.join(&laser.output_destination)
    }
}

impl ReportDestination for FileReportDestination {
    fn open(&self, laser: &LaserConfig) -> SatinResult<ReportWriter> {
        let path = self.report_path(laser);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| {
                SatinError::io_system(
                    "IO.REPORT_DIRECTORY",
                    format!(
                        "failed to create report directory '{}': {}",
                        parent.display(),
                        source
                    ),
                )
            })?;
        }

        let file = File::create(&path).map_err(|source| {
            SatinError::io_system(
                "IO.REPORT_OPEN",
                format!("failed to open report '{}': {}", path.display(), source),
            )
        })?;
        Ok(Box::new(BufWriter::new(file)))
    }
}
