use crate::domain::{LaserConfig, ResultRow};
use chrono::{DateTime, Local};
use std::io::{self, Write};

/// `ctime` layout without its trailing newline.
pub const REPORT_TIMESTAMP_FORMAT: &str = "%a %b %e %H:%M:%S %Y";

const TABLE_HEADING: &str = "Pin\t\tPout\t\tSat. Int\tln(Pout/Pin)\tPout-Pin\n\
(watts)\t\t(watts)\t\t(watts/cm2)\t\t\t(watts)\n";

pub fn format_timestamp(timestamp: &DateTime<Local>) -> String {
    timestamp.format(REPORT_TIMESTAMP_FORMAT).to_string()
}

pub fn write_header<W: Write + ?Sized>(
    writer: &mut W,
    laser: &LaserConfig,
    started_at: &DateTime<Local>,
) -> io::Result<()> {
    write!(
        writer,
        "Start date: {}\n\nGaussian Beam\n\nPressure in Main Discharge = {}kPa\n\
Small-signal Gain = {:4.1}\nCO2 via {}\n\n{}",
        format_timestamp(started_at),
        laser.discharge_pressure,
        laser.small_signal_gain,
        laser.carbon_dioxide_source,
        TABLE_HEADING
    )
}

pub fn write_row<W: Write + ?Sized>(writer: &mut W, row: &ResultRow) -> io::Result<()> {
    writer.write_all(format_row(row).as_bytes())
}

pub fn write_footer<W: Write + ?Sized>(
    writer: &mut W,
    finished_at: &DateTime<Local>,
) -> io::Result<()> {
    write!(writer, "\nEnd date: {}\n\n", format_timestamp(finished_at))
}

pub fn format_row(row: &ResultRow) -> String {
    format!(
        "{}\t\t{}\t\t{}\t\t{}\t\t{}\n",
        row.input_power,
        fixed(row.output_power, 7),
        row.saturation_intensity,
        fixed(row.log_ratio, 5),
        fixed(row.power_delta, 7)
    )
}

/// `%<width>.3f`, including printf's `nan`, `-nan`, `inf` and `-inf` spellings
/// for non-finite values.
fn fixed(value: f64, width: usize) -> String {
    if value.is_finite() {
        return format!("{value:width$.3}");
    }
    let text = match (value.is_nan(), value.is_sign_negative()) {
        (true, false) => "nan",
        (true, true) => "-nan",
        (false, false) => "inf",
        (false, true) => "-inf",
    };
    format!("{text:>width$}")
}

/// Table body without the timestamped header and footer.
pub fn render_table(rows: &[ResultRow]) -> String {
    rows.iter().map(format_row).collect()
}
