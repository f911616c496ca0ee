//! Capture devices and the capture-chance formula

mod ball;
mod chance;

pub use ball::Ball;
pub use chance::{
    CAPTURE_BOOST, CHANCE_RANGE, CaptureContext, capture_chance, hp_factor, roll_capture,
};
