use embedded_graphics::prelude::Point;
use log::debug;

use crate::{TouchConfig, TouchEvent, TouchKind};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GestureState {
    pub active: bool,
    pub start: Point,
    pub start_tick: u32,
}

impl GestureState {
    const IDLE: GestureState = GestureState {
        active: false,
        start: Point::new(0, 0),
        start_tick: 0,
    };
}

/// Decides on each End whether the gesture was a tap.
///
/// Displacement is taken between the Start and End points only, so jitter in
/// between does not count against the tap.
#[derive(Debug, Default, Clone)]
pub struct ClickDetector {
    gesture: GestureState,
    click: Option<Point>,
}

impl ClickDetector {
    pub const fn new() -> Self {
        Self {
            gesture: GestureState::IDLE,
            click: None,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn gesture(&self) -> &GestureState {
        &self.gesture
    }

    /// Feeds one decoded event observed at tick `now`.
    ///
    /// Returns the click point when this event completed a tap. The click is
    /// also kept until [`ClickDetector::take_click`] or the next tap.
    pub fn observe(&mut self, event: &TouchEvent, now: u32, config: &TouchConfig) -> Option<Point> {
        match event.kind {
            TouchKind::Start => {
                if !self.gesture.active {
                    self.gesture = GestureState {
                        active: true,
                        start: event.point,
                        start_tick: now,
                    };
                }
                None
            }
            TouchKind::Move => None,
            TouchKind::End => {
                if !self.gesture.active {
                    return None;
                }
                let gesture = core::mem::replace(&mut self.gesture, GestureState::IDLE);
                let elapsed = now.wrapping_sub(gesture.start_tick);
                let still = config.metric.within(
                    gesture.start,
                    event.point,
                    config.click_max_displacement,
                );

                if still && elapsed <= config.click_max_ticks {
                    debug!("Click at {:?} after {} ticks", event.point, elapsed);
                    self.click = Some(event.point);
                    self.click
                } else {
                    debug!(
                        "Drag from {:?} to {:?} over {} ticks, no click",
                        gesture.start, event.point, elapsed
                    );
                    None
                }
            }
        }
    }

    pub fn take_click(&mut self) -> Option<Point> {
        self.click.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn start(x: i32, y: i32) -> TouchEvent {
        TouchEvent::new(TouchKind::Start, Point::new(x, y))
    }

    fn moved(x: i32, y: i32) -> TouchEvent {
        TouchEvent::new(TouchKind::Move, Point::new(x, y))
    }

    fn end(x: i32, y: i32) -> TouchEvent {
        TouchEvent::new(TouchKind::End, Point::new(x, y))
    }

    #[test]
    fn short_still_tap_is_a_click() {
        let config = TouchConfig::default();
        let mut detector = ClickDetector::new();
        detector.observe(&start(100, 100), 1000, &config);
        let click = detector.observe(&end(102, 101), 1150, &config);

        assert_eq!(click, Some(Point::new(102, 101)));
        assert_eq!(detector.take_click(), Some(Point::new(102, 101)));
        assert_eq!(detector.take_click(), None);
        assert!(!detector.gesture().active);
    }

    #[test]
    fn drag_is_not_a_click() {
        let config = TouchConfig::default();
        let mut detector = ClickDetector::new();
        detector.observe(&start(100, 100), 0, &config);
        assert_eq!(detector.observe(&end(200, 100), 100, &config), None);
        assert_eq!(detector.take_click(), None);
        assert!(!detector.gesture().active);
    }

    #[test]
    fn long_press_is_not_a_click() {
        let config = TouchConfig::default();
        let mut detector = ClickDetector::new();
        detector.observe(&start(100, 100), 0, &config);
        assert_eq!(detector.observe(&end(100, 100), 201, &config), None);
    }

    #[test]
    fn duration_limit_is_inclusive() {
        let config = TouchConfig::default();
        let mut detector = ClickDetector::new();
        detector.observe(&start(10, 10), 0, &config);
        assert!(detector.observe(&end(15, 15), 200, &config).is_some());
    }

    #[test]
    fn intermediate_moves_do_not_count() {
        let config = TouchConfig::default();
        let mut detector = ClickDetector::new();
        detector.observe(&start(100, 100), 0, &config);
        detector.observe(&moved(140, 160), 5, &config);
        detector.observe(&moved(99, 101), 10, &config);
        assert_eq!(
            detector.observe(&end(101, 100), 20, &config),
            Some(Point::new(101, 100))
        );
    }

    #[test]
    fn end_without_start_is_ignored() {
        let config = TouchConfig::default();
        let mut detector = ClickDetector::new();
        assert_eq!(detector.observe(&end(5, 5), 3, &config), None);
        assert_eq!(detector.take_click(), None);
    }

    #[test]
    fn second_start_keeps_the_first_gesture() {
        let config = TouchConfig::default();
        let mut detector = ClickDetector::new();
        detector.observe(&start(100, 100), 0, &config);
        detector.observe(&start(300, 300), 50, &config);
        assert_eq!(detector.gesture().start, Point::new(100, 100));
        assert_eq!(detector.gesture().start_tick, 0);
        assert_eq!(detector.observe(&end(300, 300), 60, &config), None);
    }

    #[test]
    fn tick_wraparound_is_handled() {
        let config = TouchConfig::default();
        let mut detector = ClickDetector::new();
        detector.observe(&start(1, 1), u32::MAX - 5, &config);
        assert!(detector.observe(&end(1, 1), 10, &config).is_some());
    }

    #[test]
    fn newer_click_overwrites_unread_one() {
        let config = TouchConfig::default();
        let mut detector = ClickDetector::new();
        detector.observe(&start(10, 10), 0, &config);
        detector.observe(&end(10, 10), 5, &config);
        detector.observe(&start(80, 80), 10, &config);
        detector.observe(&end(80, 80), 15, &config);
        assert_eq!(detector.take_click(), Some(Point::new(80, 80)));
        assert_eq!(detector.take_click(), None);
    }
}
