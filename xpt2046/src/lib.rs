#![cfg_attr(not(test), no_std)]

mod calibration;
mod xpt2046;

pub use calibration::{calibration_math, CalibrationData, CalibrationPoint, CalibrationSet};
pub use xpt2046::{Xpt2046, MAX_OVERSAMPLE};

// Control bytes and the plausibility window come from the XPT2046 datasheet
// and the ESP32 "Cheap Yellow Display" touchscreen examples.
