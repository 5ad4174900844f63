#![cfg_attr(not(test), no_std)]

mod click;
mod config;
mod decoder;
mod driver;
mod errors;
mod event;
mod sample;

pub use click::{ClickDetector, GestureState};
pub use config::{ConfigError, DisplacementMetric, TouchConfig};
pub use decoder::EventDecoder;
pub use driver::TouchDriver;
pub use embedded_graphics::prelude::Point;
pub use errors::Error;
pub use event::{
    EventWord, TouchEvent, TouchKind, MAX_COORD, TOUCH_END, TOUCH_MOVE, TOUCH_START,
};
pub use sample::{PollCounter, RawSample, SampleSource, TickSource};
