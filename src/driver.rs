use embedded_graphics::prelude::Point;
use embedded_hal::delay::DelayNs;
use log::{debug, trace};

use crate::{
    errors::Result, ClickDetector, EventDecoder, EventWord, SampleSource, TickSource, TouchConfig,
    TouchEvent, TouchKind,
};

/// Poll-on-read touch driver.
///
/// Owns the sample source, the decoder and the click detector. Every read of
/// the event path runs exactly one poll cycle; nothing blocks except
/// [`TouchDriver::wait_for_click`].
pub struct TouchDriver<S, T>
where
    S: SampleSource,
    T: TickSource,
{
    source: S,
    ticks: T,
    config: TouchConfig,
    decoder: EventDecoder,
    clicks: ClickDetector,
    latest: EventWord,
}

impl<S, T> TouchDriver<S, T>
where
    S: SampleSource,
    T: TickSource,
{
    pub fn new(source: S, ticks: T, config: TouchConfig) -> Self {
        Self {
            source,
            ticks,
            config,
            decoder: EventDecoder::new(),
            clicks: ClickDetector::new(),
            latest: EventWord::NONE,
        }
    }

    /// Brings up the controller and clears all touch state.
    ///
    /// Failing here means the panel is unusable; the caller is expected to
    /// halt.
    pub fn init(&mut self) -> Result<(), S::BusError> {
        self.source.init()?;
        self.reset();
        debug!("Touch driver initialized with {:?}", self.config);
        Ok(())
    }

    pub fn reset(&mut self) {
        self.decoder.reset();
        self.clicks.reset();
        self.latest = EventWord::NONE;
    }

    pub fn config(&self) -> &TouchConfig {
        &self.config
    }

    /// New thresholds apply from the next poll. An open gesture is kept.
    pub fn set_config(&mut self, config: TouchConfig) {
        self.config = config;
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    pub fn release(self) -> S {
        self.source
    }

    /// One poll cycle, surfacing bus errors.
    ///
    /// A failed read leaves the decoder untouched, so the next successful
    /// poll carries on where the last one stopped.
    pub fn try_poll(&mut self) -> Result<Option<TouchEvent>, S::BusError> {
        let sample = match self.source.sample() {
            Ok(sample) => sample,
            Err(e) => {
                self.latest = EventWord::NONE;
                return Err(e);
            }
        };
        let now = self.ticks.ticks();
        let event = self.decoder.decode(sample, &self.config);
        if let Some(event) = event.as_ref() {
            let kind: &'static str = event.kind.into();
            trace!("{kind} at {:?}, tick {now}", event.point);
            self.clicks.observe(event, now, &self.config);
        }
        self.latest = event.into();
        Ok(event)
    }

    /// One poll cycle. Bus errors read as "no event".
    pub fn poll_event(&mut self) -> Option<TouchEvent> {
        match self.try_poll() {
            Ok(event) => event,
            Err(e) => {
                trace!("Touch poll failed: {e}");
                None
            }
        }
    }

    /// One poll cycle, packed for ABI callers. Zero when nothing happened.
    pub fn read_event(&mut self) -> u32 {
        self.poll_event();
        self.latest.into()
    }

    /// Word produced by the most recent poll, without polling again.
    pub fn latest_event(&self) -> EventWord {
        self.latest
    }

    /// Completed click, if one is waiting. Each click is handed out once.
    pub fn take_click(&mut self) -> Option<Point> {
        self.clicks.take_click()
    }

    /// Packed click word, zero when none is waiting. Read-once.
    pub fn read_click(&mut self) -> u32 {
        self.take_click()
            .map_or(EventWord::NONE, EventWord::from_click)
            .into()
    }

    /// Blocks until a tap completes, polling every `interval_ms`.
    ///
    /// Pending events are flushed first and a gesture already in progress is
    /// ignored, so only a tap that starts after the call is returned.
    pub fn wait_for_click<D: DelayNs>(&mut self, delay: &mut D, interval_ms: u32) -> Point {
        while self.poll_event().is_some() {
            delay.delay_ms(interval_ms);
        }
        self.clicks.take_click();

        let mut started = false;
        loop {
            match self.poll_event().map(|event| event.kind) {
                Some(TouchKind::Start) => started = true,
                Some(TouchKind::End) if started => {
                    if let Some(point) = self.clicks.take_click() {
                        return point;
                    }
                    started = false;
                }
                Some(TouchKind::End) => {
                    self.clicks.take_click();
                }
                _ => (),
            }
            delay.delay_ms(interval_ms);
        }
    }
}

impl<S, T> core::fmt::Debug for TouchDriver<S, T>
where
    S: SampleSource,
    T: TickSource,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TouchDriver")
            .field("config", &self.config)
            .field("decoder", &self.decoder)
            .field("clicks", &self.clicks)
            .field("latest", &self.latest)
            .finish()
    }
}
