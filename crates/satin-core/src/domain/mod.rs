pub mod errors;

pub use errors::{SatinError, SatinErrorCategory, SatinResult};

use serde::Serialize;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ExecutionMode {
    /// One native thread per laser configuration.
    #[default]
    Concurrent,
    /// Every laser on the calling thread, in source order.
    Sequential,
}

impl ExecutionMode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Concurrent => "concurrent",
            Self::Sequential => "sequential",
        }
    }
}

impl Display for ExecutionMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str((*self).as_str())
    }
}

/// One gain-medium entry from the laser source.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LaserConfig {
    /// Name of the report artifact this laser writes.
    pub output_destination: String,
    /// Small-signal gain in percent, kept at the single precision it is stored in.
    pub small_signal_gain: f32,
    /// Discharge pressure in kPa; report metadata only.
    pub discharge_pressure: i32,
    pub carbon_dioxide_source: String,
}

impl LaserConfig {
    pub fn new(
        output_destination: impl Into<String>,
        small_signal_gain: f32,
        discharge_pressure: i32,
        carbon_dioxide_source: impl Into<String>,
    ) -> Self {
        Self {
            output_destination: output_destination.into(),
            small_signal_gain,
            discharge_pressure,
            carbon_dioxide_source: carbon_dioxide_source.into(),
        }
    }
}

/// Input powers in watts, in source order. Never mutated after loading, so a
/// plain shared slice is handed to every worker.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InputPowerSet {
    powers: Vec<i32>,
}

impl InputPowerSet {
    pub fn new(powers: Vec<i32>) -> Self {
        Self { powers }
    }

    pub fn as_slice(&self) -> &[i32] {
        &self.powers
    }

    pub fn len(&self) -> usize {
        self.powers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.powers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = i32> + '_ {
        self.powers.iter().copied()
    }
}

impl From<Vec<i32>> for InputPowerSet {
    fn from(powers: Vec<i32>) -> Self {
        Self::new(powers)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ResultRow {
    pub input_power: i32,
    pub output_power: f64,
    pub saturation_intensity: i32,
    pub log_ratio: f64,
    pub power_delta: f64,
}

impl ResultRow {
    /// Derives the ratio columns from a propagated output power. A zero input
    /// power yields a non-finite `log_ratio`; nothing is clamped.
    pub fn from_output(input_power: i32, saturation_intensity: i32, output_power: f64) -> Self {
        let input = f64::from(input_power);
        Self {
            input_power,
            output_power,
            saturation_intensity,
            log_ratio: (output_power / input).ln(),
            power_delta: output_power - input,
        }
    }
}
