use embedded_graphics::prelude::Point;
use serde_derive::{Deserialize, Serialize};

// Three-point affine fit, after:
// https://github.com/ardnew/XPT2046_Calibrated/blob/8d3f8b518b617b6fbc870ef3229b27aa83028c56/src/XPT2046_Calibrated.cpp
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct CalibrationPoint {
    pub x: f64,
    pub y: f64,
}

impl From<&Point> for CalibrationPoint {
    fn from(value: &Point) -> Self {
        Self {
            x: value.x as f64,
            y: value.y as f64,
        }
    }
}

impl From<Point> for CalibrationPoint {
    fn from(value: Point) -> Self {
        Self::from(&value)
    }
}

impl From<(u16, u16)> for CalibrationPoint {
    fn from((x, y): (u16, u16)) -> Self {
        Self {
            x: x as f64,
            y: y as f64,
        }
    }
}

/// Three reference points, either where targets were drawn or where the
/// panel reported the taps on them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CalibrationSet {
    pub a: CalibrationPoint,
    pub b: CalibrationPoint,
    pub c: CalibrationPoint,
}

impl CalibrationSet {
    pub fn new<P: Into<CalibrationPoint>>(a: P, b: P, c: P) -> Self {
        Self {
            a: a.into(),
            b: b.into(),
            c: c.into(),
        }
    }
}

/// Affine map from raw controller readings to screen coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalibrationData {
    pub alpha_x: f64,
    pub beta_x: f64,
    pub delta_x: f64,
    pub alpha_y: f64,
    pub beta_y: f64,
    pub delta_y: f64,
}

impl Default for CalibrationData {
    fn default() -> Self {
        CalibrationData {
            alpha_x: 1.0,
            beta_x: 0.0,
            delta_x: 0.0,
            alpha_y: 0.0,
            beta_y: 1.0,
            delta_y: 0.0,
        }
    }
}

impl CalibrationData {
    /// Rounds to the nearest unit. Results below zero or above `u16::MAX`
    /// saturate.
    pub fn apply(&self, (x, y): (u16, u16)) -> (u16, u16) {
        let (x, y) = (x as f64, y as f64);
        let cx = self.alpha_x * x + self.beta_x * y + self.delta_x;
        let cy = self.alpha_y * x + self.beta_y * y + self.delta_y;
        ((cx + 0.5) as u16, (cy + 0.5) as u16)
    }
}

/// Solves for the map taking `touch` (observed) onto `screen` (targets).
///
/// `None` when the observed points are collinear.
pub fn calibration_math(screen: &CalibrationSet, touch: &CalibrationSet) -> Option<CalibrationData> {
    let delta = ((touch.a.x - touch.c.x) * (touch.b.y - touch.c.y))
        - ((touch.b.x - touch.c.x) * (touch.a.y - touch.c.y));
    if delta == 0.0 {
        return None;
    }

    let alpha_x = ((screen.a.x - screen.c.x) * (touch.b.y - touch.c.y)
        - (screen.b.x - screen.c.x) * (touch.a.y - touch.c.y))
        / delta;

    let beta_x = ((touch.a.x - touch.c.x) * (screen.b.x - screen.c.x)
        - (touch.b.x - touch.c.x) * (screen.a.x - screen.c.x))
        / delta;

    let delta_x = ((screen.a.x * ((touch.b.x * touch.c.y) - (touch.c.x * touch.b.y)))
        - (screen.b.x * ((touch.a.x * touch.c.y) - (touch.c.x * touch.a.y)))
        + (screen.c.x * ((touch.a.x * touch.b.y) - (touch.b.x * touch.a.y))))
        / delta;

    let alpha_y = ((screen.a.y - screen.c.y) * (touch.b.y - touch.c.y)
        - (screen.b.y - screen.c.y) * (touch.a.y - touch.c.y))
        / delta;

    let beta_y = ((touch.a.x - touch.c.x) * (screen.b.y - screen.c.y)
        - (touch.b.x - touch.c.x) * (screen.a.y - screen.c.y))
        / delta;

    let delta_y = ((screen.a.y * ((touch.b.x * touch.c.y) - (touch.c.x * touch.b.y)))
        - (screen.b.y * ((touch.a.x * touch.c.y) - (touch.c.x * touch.a.y)))
        + (screen.c.y * ((touch.a.x * touch.b.y) - (touch.b.x * touch.a.y))))
        / delta;

    Some(CalibrationData {
        alpha_x,
        beta_x,
        delta_x,
        alpha_y,
        beta_y,
        delta_y,
    })
}
