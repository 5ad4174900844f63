use embedded_graphics::prelude::Point;

use crate::{RawSample, TouchConfig, TouchEvent, TouchKind, MAX_COORD};

/// Turns the raw sample stream into Start/Move/End events.
///
/// Idle until contact, then Touching until release. While touching, only
/// moves larger than the noise threshold (measured from the last reported
/// point) produce an event.
#[derive(Debug, Default, Clone)]
pub struct EventDecoder {
    /// Last point reported upward, `Some` while touching.
    reported: Option<Point>,
    /// Most recent contact point, reported again on release.
    last_contact: Point,
}

impl EventDecoder {
    pub const fn new() -> Self {
        Self {
            reported: None,
            last_contact: Point::new(0, 0),
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn touching(&self) -> bool {
        self.reported.is_some()
    }

    pub fn decode(&mut self, sample: RawSample, config: &TouchConfig) -> Option<TouchEvent> {
        if !sample.contact {
            return self
                .reported
                .take()
                .map(|_| TouchEvent::new(TouchKind::End, self.last_contact));
        }

        // Never past what a packed word can carry.
        let limit = config.max_coord.min(MAX_COORD);
        let point = Point::new(sample.x.min(limit) as i32, sample.y.min(limit) as i32);
        self.last_contact = point;

        match self.reported {
            None => {
                self.reported = Some(point);
                Some(TouchEvent::new(TouchKind::Start, point))
            }
            Some(previous) => {
                let delta = point - previous;
                let moved = delta.x.unsigned_abs().max(delta.y.unsigned_abs());
                if moved > config.noise_threshold as u32 {
                    self.reported = Some(point);
                    Some(TouchEvent::new(TouchKind::Move, point))
                } else {
                    None
                }
            }
        }
    }
}
