use embedded_graphics::prelude::Point;
use strum_macros::{IntoStaticStr, VariantArray};

// Flag values are shared with the TREZOR touch HAL, so packed words can be
// handed to existing C callers as-is.
pub const TOUCH_START: u32 = 0x0001_0000;
pub const TOUCH_MOVE: u32 = 0x0002_0000;
pub const TOUCH_END: u32 = 0x0004_0000;

/// Largest coordinate a packed word can hold.
pub const MAX_COORD: u16 = 0x0FFF;

const KIND_MASK: u32 = TOUCH_START | TOUCH_MOVE | TOUCH_END;
const COORD_MASK: u32 = MAX_COORD as u32;
const X_SHIFT: u32 = 20;
const Y_SHIFT: u32 = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoStaticStr, VariantArray)]
pub enum TouchKind {
    Start,
    Move,
    End,
}

impl TouchKind {
    pub const fn flag(self) -> u32 {
        match self {
            TouchKind::Start => TOUCH_START,
            TouchKind::Move => TOUCH_MOVE,
            TouchKind::End => TOUCH_END,
        }
    }

    fn from_flags(flags: u32) -> Option<Self> {
        match flags & KIND_MASK {
            TOUCH_START => Some(TouchKind::Start),
            TOUCH_MOVE => Some(TouchKind::Move),
            TOUCH_END => Some(TouchKind::End),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TouchEvent {
    pub point: Point,
    pub kind: TouchKind,
}

impl TouchEvent {
    pub const fn new(kind: TouchKind, point: Point) -> Self {
        Self { point, kind }
    }
}

/// Packed form of an event or click, as handed across the C ABI.
///
/// Layout: y in bits 0..=11, kind flags in bits 16..=18, x in bits 20..=31.
/// A zero word means nothing is pending. Click words carry no kind flag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct EventWord(pub u32);

impl EventWord {
    pub const NONE: EventWord = EventWord(0);

    /// Coordinates outside the 12-bit range are saturated before packing.
    pub fn pack_point(point: Point) -> u32 {
        let x = point.x.clamp(0, COORD_MASK as i32) as u32;
        let y = point.y.clamp(0, COORD_MASK as i32) as u32;
        (x << X_SHIFT) | (y << Y_SHIFT)
    }

    pub fn from_event(event: TouchEvent) -> Self {
        Self(event.kind.flag() | Self::pack_point(event.point))
    }

    pub fn from_click(point: Point) -> Self {
        Self(Self::pack_point(point))
    }

    pub fn is_none(self) -> bool {
        self.0 == 0
    }

    pub fn point(self) -> Point {
        let x = (self.0 >> X_SHIFT) & COORD_MASK;
        let y = (self.0 >> Y_SHIFT) & COORD_MASK;
        Point::new(x as i32, y as i32)
    }

    /// `None` for zero words, click words, and words with more than one flag.
    pub fn kind(self) -> Option<TouchKind> {
        TouchKind::from_flags(self.0)
    }

    pub fn event(self) -> Option<TouchEvent> {
        self.kind().map(|kind| TouchEvent::new(kind, self.point()))
    }
}

impl From<Option<TouchEvent>> for EventWord {
    fn from(value: Option<TouchEvent>) -> Self {
        value.map_or(EventWord::NONE, EventWord::from_event)
    }
}

impl From<EventWord> for u32 {
    fn from(value: EventWord) -> Self {
        value.0
    }
}
