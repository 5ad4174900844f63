use embedded_graphics::prelude::Point;
use serde_derive::{Deserialize, Serialize};

pub type Result<T> = ::core::result::Result<T, ConfigError>;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0:?}")]
    Postcard(postcard::Error),
}

impl From<postcard::Error> for ConfigError {
    fn from(value: postcard::Error) -> Self {
        Self::Postcard(value)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DisplacementMetric {
    /// max(|dx|, |dy|)
    #[default]
    Chebyshev,
    Euclidean,
}

impl DisplacementMetric {
    /// True when `a` and `b` are no further apart than `limit`.
    pub fn within(self, a: Point, b: Point, limit: u16) -> bool {
        let dx = (a.x - b.x).unsigned_abs() as u64;
        let dy = (a.y - b.y).unsigned_abs() as u64;
        let limit = limit as u64;
        match self {
            DisplacementMetric::Chebyshev => dx.max(dy) <= limit,
            DisplacementMetric::Euclidean => dx * dx + dy * dy <= limit * limit,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TouchConfig {
    /// Moves smaller than this (Chebyshev, in controller units) are dropped.
    pub noise_threshold: u16,
    pub click_max_displacement: u16,
    pub click_max_ticks: u32,
    /// Upper bound sample coordinates get clamped to. Values above
    /// [`crate::MAX_COORD`] act as `MAX_COORD`.
    pub max_coord: u16,
    pub metric: DisplacementMetric,
}

impl Default for TouchConfig {
    fn default() -> Self {
        TouchConfig {
            noise_threshold: 2,
            click_max_displacement: 5,
            click_max_ticks: 200,
            max_coord: 4095,
            metric: DisplacementMetric::Chebyshev,
        }
    }
}

impl TouchConfig {
    pub fn to_slice<'a>(&self, buf: &'a mut [u8]) -> Result<&'a mut [u8]> {
        Ok(postcard::to_slice(self, buf)?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(postcard::from_bytes(bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chebyshev_uses_the_larger_axis() {
        let metric = DisplacementMetric::Chebyshev;
        assert!(metric.within(Point::new(100, 100), Point::new(105, 104), 5));
        assert!(!metric.within(Point::new(100, 100), Point::new(100, 106), 5));
    }

    #[test]
    fn euclidean_is_stricter_on_diagonals() {
        let a = Point::new(0, 0);
        let b = Point::new(4, 4);
        assert!(DisplacementMetric::Chebyshev.within(a, b, 5));
        assert!(!DisplacementMetric::Euclidean.within(a, b, 5));
        assert!(DisplacementMetric::Euclidean.within(a, Point::new(3, 4), 5));
    }

    #[test]
    fn config_survives_postcard() {
        let config = TouchConfig {
            noise_threshold: 8,
            click_max_displacement: 12,
            click_max_ticks: 350,
            max_coord: 319,
            metric: DisplacementMetric::Euclidean,
        };
        let mut buf = [0u8; 64];
        let used = config.to_slice(&mut buf).unwrap();
        assert_eq!(TouchConfig::from_bytes(used).unwrap(), config);
    }

    #[test]
    fn truncated_blob_is_rejected() {
        let mut buf = [0u8; 64];
        let used = TouchConfig::default().to_slice(&mut buf).unwrap();
        let short = used.len() - 1;
        assert!(matches!(
            TouchConfig::from_bytes(&buf[..short]),
            Err(ConfigError::Postcard(_))
        ));
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(TouchConfig::from_bytes(&[]).is_err());
    }

    #[test]
    fn small_buffer_is_an_error() {
        let mut buf = [0u8; 2];
        assert!(matches!(
            TouchConfig::default().to_slice(&mut buf),
            Err(ConfigError::Postcard(_))
        ));
    }
}
