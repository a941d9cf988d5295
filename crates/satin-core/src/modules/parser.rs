use crate::domain::{InputPowerSet, LaserConfig, SatinError, SatinResult};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

pub const DEFAULT_INPUT_POWER_FILE: &str = "pin.dat";
pub const DEFAULT_LASER_FILE: &str = "laser.dat";

const LASER_FIELD_COUNT: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputLineError {
    #[error("line {line}: expected an integer input power, got '{token}'")]
    InvalidInputPower { line: usize, token: String },
    #[error("line {line}: expected {expected} fields (destination gain pressure co2) got {actual}")]
    LaserFieldCount {
        line: usize,
        expected: usize,
        actual: usize,
    },
    #[error("line {line}: invalid {field} '{token}'")]
    InvalidLaserField {
        line: usize,
        field: &'static str,
        token: String,
    },
    #[error("line {line}: destination '{destination}' already used on line {first_line}")]
    DuplicateDestination {
        line: usize,
        first_line: usize,
        destination: String,
    },
}

impl InputLineError {
    pub const fn line(&self) -> usize {
        match self {
            Self::InvalidInputPower { line, .. }
            | Self::LaserFieldCount { line, .. }
            | Self::InvalidLaserField { line, .. }
            | Self::DuplicateDestination { line, .. } => *line,
        }
    }
}

/// Reads whitespace-separated integer input powers in file order.
pub fn read_input_powers(path: impl AsRef<Path>) -> SatinResult<InputPowerSet> {
    let path = path.as_ref();
    let source = read_input_source(path)?;
    parse_input_powers(&source).map_err(|error| {
        SatinError::input_validation(
            "INPUT.INPUT_POWER_LINE",
            format!("{}: {}", path.display(), error),
        )
    })
}

pub fn parse_input_powers(source: &str) -> Result<InputPowerSet, InputLineError> {
    let mut powers = Vec::new();
    for (index, line) in source.lines().enumerate() {
        for token in line.split_whitespace() {
            let power = token
                .parse::<i32>()
                .map_err(|_| InputLineError::InvalidInputPower {
                    line: index + 1,
                    token: token.to_string(),
                })?;
            powers.push(power);
        }
    }
    Ok(InputPowerSet::new(powers))
}

/// Reads one laser record per non-blank line:
/// `destination small_signal_gain discharge_pressure co2_source`.
///
/// Every laser owns its destination exclusively, so a repeated destination is
/// rejected.
pub fn read_laser_configs(path: impl AsRef<Path>) -> SatinResult<Vec<LaserConfig>> {
    let path = path.as_ref();
    let source = read_input_source(path)?;
    parse_laser_configs(&source).map_err(|error| {
        SatinError::input_validation(
            "INPUT.LASER_LINE",
            format!("{}: {}", path.display(), error),
        )
    })
}

pub fn parse_laser_configs(source: &str) -> Result<Vec<LaserConfig>, InputLineError> {
    let mut lasers = Vec::new();
    let mut first_lines: HashMap<String, usize> = HashMap::new();
    for (index, line) in source.lines().enumerate() {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.is_empty() {
            continue;
        }
        let line = index + 1;
        let laser = parse_laser_fields(line, &fields)?;
        if let Some(&first_line) = first_lines.get(&laser.output_destination) {
            return Err(InputLineError::DuplicateDestination {
                line,
                first_line,
                destination: laser.output_destination,
            });
        }
        first_lines.insert(laser.output_destination.clone(), line);
        lasers.push(laser);
    }
    Ok(lasers)
}

fn parse_laser_fields(line: usize, fields: &[&str]) -> Result<LaserConfig, InputLineError> {
    let [destination, gain, pressure, source] = fields else {
        return Err(InputLineError::LaserFieldCount {
            line,
            expected: LASER_FIELD_COUNT,
            actual: fields.len(),
        });
    };

    if destination.chars().any(char::is_control) {
        return Err(InputLineError::InvalidLaserField {
            line,
            field: "destination",
            token: destination.escape_default().to_string(),
        });
    }

    let small_signal_gain = gain
        .parse::<f32>()
        .map_err(|_| InputLineError::InvalidLaserField {
            line,
            field: "small-signal gain",
            token: gain.to_string(),
        })?;
    let discharge_pressure =
        pressure
            .parse::<i32>()
            .map_err(|_| InputLineError::InvalidLaserField {
                line,
                field: "discharge pressure",
                token: pressure.to_string(),
            })?;

    Ok(LaserConfig::new(
        *destination,
        small_signal_gain,
        discharge_pressure,
        *source,
    ))
}

fn read_input_source(path: &Path) -> SatinResult<String> {
    fs::read_to_string(path).map_err(|source| {
        SatinError::io_system(
            "IO.INPUT_READ",
            format!("failed to read '{}': {}", path.display(), source),
        )
    })
}
