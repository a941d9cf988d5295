pub mod dispatch;
pub mod laser;
pub mod parser;
pub mod report;

mod traits;

pub use dispatch::{DispatchSummary, run_all};
pub use laser::{LaserReport, LaserTask};
pub use parser::{
    DEFAULT_INPUT_POWER_FILE, DEFAULT_LASER_FILE, InputLineError, parse_input_powers,
    parse_laser_configs, read_input_powers, read_laser_configs,
};
pub use traits::{FileReportDestination, ReportDestination, ReportWriter};
