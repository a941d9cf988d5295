use super::propagation::compute_output_power;
use crate::domain::ResultRow;

pub const SATURATION_LADDER_START: i32 = 10_000;
pub const SATURATION_LADDER_END: i32 = 25_000;
pub const SATURATION_LADDER_STEP: i32 = 1_000;
pub const SATURATION_LADDER_LEN: usize =
    ((SATURATION_LADDER_END - SATURATION_LADDER_START) / SATURATION_LADDER_STEP) as usize + 1;

/// Saturation intensities swept for every input power, in W/cm², ascending.
pub fn saturation_ladder() -> impl Iterator<Item = i32> {
    (SATURATION_LADDER_START..=SATURATION_LADDER_END).step_by(SATURATION_LADDER_STEP as usize)
}

/// Runs the propagation kernel once per ladder step for one
/// `(input_power, small_signal_gain)` pair, returning rows in ladder order.
pub fn sweep(input_power: i32, small_signal_gain: f32) -> Vec<ResultRow> {
    let mut rows = Vec::with_capacity(SATURATION_LADDER_LEN);
    for saturation_intensity in saturation_ladder() {
        let output_power =
            compute_output_power(input_power, small_signal_gain, saturation_intensity);
        rows.push(ResultRow::from_output(
            input_power,
            saturation_intensity,
            output_power,
        ));
    }
    rows
}
