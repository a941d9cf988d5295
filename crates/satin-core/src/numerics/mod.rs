pub mod propagation;
pub mod sweep;

pub use propagation::{axial_weights, compute_output_power};
pub use sweep::{
    SATURATION_LADDER_END, SATURATION_LADDER_LEN, SATURATION_LADDER_START,
    SATURATION_LADDER_STEP, saturation_ladder, sweep,
};
