use embedded_hal::spi::SpiDevice;
use log::{debug, warn};
use touchpanel::{Error, RawSample, SampleSource};

use crate::calibration::CalibrationData;

// Control bytes: start bit, channel, 12-bit mode, differential for the
// position channels, PD1..PD0 = 00 so PENIRQ stays armed between reads.
const CMD_READ_X: u8 = 0xD0;
const CMD_READ_Y: u8 = 0x90;
// Single-ended TEMP0 with the internal reference on.
const CMD_READ_TEMP0: u8 = 0x87;
const CMD_POWER_DOWN: u8 = 0x80;

const ADC_MAX: u16 = 0x0FFF;
pub const MAX_OVERSAMPLE: usize = 16;

pub struct Xpt2046<SPI>
where
    SPI: SpiDevice,
{
    spi: SPI,
    oversample: usize,
    pub(crate) calibration: Option<CalibrationData>,
}

impl<SPI> Xpt2046<SPI>
where
    SPI: SpiDevice,
{
    pub fn new(touch_spi_device: SPI, calibration: Option<CalibrationData>) -> Self {
        Self {
            spi: touch_spi_device,
            oversample: 4,
            calibration,
        }
    }

    pub fn calibrated(&self) -> bool {
        self.calibration.is_some()
    }

    pub fn set_calibration(&mut self, calibration: Option<CalibrationData>) {
        self.calibration = calibration;
    }

    /// Readings averaged per sample, clamped to `1..=MAX_OVERSAMPLE`.
    pub fn set_oversample(&mut self, count: usize) {
        self.oversample = count.clamp(1, MAX_OVERSAMPLE);
    }

    pub fn release(self) -> SPI {
        self.spi
    }

    fn read_channel(&mut self, command: u8) -> Result<u16, SPI::Error> {
        let mut rx = [0u8; 3];
        self.spi.transfer(&mut rx, &[command, 0, 0])?;
        Ok((u16::from_be_bytes([rx[1], rx[2]]) >> 3) & ADC_MAX)
    }

    /// Averaged, uncalibrated reading. `None` while the panel is not pressed.
    ///
    /// Useful for collecting calibration taps.
    pub fn raw_point(&mut self) -> Result<Option<(u16, u16)>, SPI::Error> {
        let (mut sum_x, mut sum_y) = (0u32, 0u32);
        for _ in 0..self.oversample {
            let x = self.read_channel(CMD_READ_X)?;
            let y = self.read_channel(CMD_READ_Y)?;
            if out_of_range((x, y)) {
                return Ok(None);
            }
            sum_x += x as u32;
            sum_y += y as u32;
        }

        let count = self.oversample as u32;
        Ok(Some(((sum_x / count) as u16, (sum_y / count) as u16)))
    }
}

/// Readings outside this window mean no pressure on the panel.
fn out_of_range((x, y): (u16, u16)) -> bool {
    x < 250 || y < 230 || x > 4000 || y > 3900
}

impl<SPI> SampleSource for Xpt2046<SPI>
where
    SPI: SpiDevice,
{
    type BusError = SPI::Error;

    fn init(&mut self) -> Result<(), Error<Self::BusError>> {
        self.read_channel(CMD_POWER_DOWN).map_err(Error::Bus)?;
        let probe = self.read_channel(CMD_READ_TEMP0).map_err(Error::Bus)?;
        // Leave the internal reference off again and PENIRQ armed.
        self.read_channel(CMD_POWER_DOWN).map_err(Error::Bus)?;

        if probe == 0 || probe == ADC_MAX {
            warn!("XPT2046 probe read {probe:#05x}, controller not answering");
            return Err(Error::Unresponsive);
        }
        debug!(
            "XPT2046 up, TEMP0 = {probe:#05x}, calibrated: {}",
            self.calibrated()
        );
        Ok(())
    }

    fn sample(&mut self) -> Result<RawSample, Error<Self::BusError>> {
        let Some(raw) = self.raw_point().map_err(Error::Bus)? else {
            return Ok(RawSample::RELEASED);
        };
        let (x, y) = match self.calibration.as_ref() {
            Some(calibration) => calibration.apply(raw),
            None => raw,
        };
        Ok(RawSample::touched(x, y))
    }
}
