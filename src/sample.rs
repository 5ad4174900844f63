use crate::errors::Result;

/// One reading from the touch controller.
///
/// Coordinates are already bus-scaled. Their value is meaningless when
/// `contact` is false.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RawSample {
    pub contact: bool,
    pub x: u16,
    pub y: u16,
}

impl RawSample {
    pub const RELEASED: RawSample = RawSample {
        contact: false,
        x: 0,
        y: 0,
    };

    pub const fn touched(x: u16, y: u16) -> Self {
        Self {
            contact: true,
            x,
            y,
        }
    }
}

/// Hardware side of the driver: bus setup and a raw reading per poll.
pub trait SampleSource {
    type BusError: core::fmt::Debug;

    /// Brings up the bus and checks the controller answers.
    fn init(&mut self) -> Result<(), Self::BusError>;

    fn sample(&mut self) -> Result<RawSample, Self::BusError>;
}

/// Monotonic tick counter used to time gestures. Wrapping is allowed.
pub trait TickSource {
    fn ticks(&mut self) -> u32;
}

impl<F> TickSource for F
where
    F: FnMut() -> u32,
{
    fn ticks(&mut self) -> u32 {
        self()
    }
}

/// Counts polls, for boards without a usable timer.
#[derive(Debug, Default, Clone)]
pub struct PollCounter {
    count: u32,
}

impl PollCounter {
    pub const fn new() -> Self {
        Self { count: 0 }
    }
}

impl TickSource for PollCounter {
    fn ticks(&mut self) -> u32 {
        let now = self.count;
        self.count = self.count.wrapping_add(1);
        now
    }
}
