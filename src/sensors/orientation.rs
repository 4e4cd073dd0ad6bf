//! MPU-6050 six-axis IMU over I²C.
//!
//! Configured for ±8 g / ±500 °/s with the 21 Hz digital low-pass filter.
//! Pitch and roll come from the gravity vector; "yaw" is the raw Z-axis
//! rotation rate since there is no magnetometer to anchor a heading.

use embedded_hal::i2c::I2c;

use super::MotionSource;
use crate::error::SensorError;
use crate::fsm::context::Orientation;

pub const DEFAULT_ADDRESS: u8 = 0x68;

const REG_CONFIG: u8 = 0x1A;
const REG_GYRO_CONFIG: u8 = 0x1B;
const REG_ACCEL_CONFIG: u8 = 0x1C;
const REG_ACCEL_XOUT_H: u8 = 0x3B;
const REG_PWR_MGMT_1: u8 = 0x6B;

const DLPF_21HZ: u8 = 0x04;
const GYRO_500DPS: u8 = 0x08;
const ACCEL_8G: u8 = 0x10;

const ACCEL_LSB_PER_G: f32 = 4096.0;
const GYRO_LSB_PER_DPS: f32 = 65.5;

/// Scaled accelerometer (g) and gyroscope (°/s) sample.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MotionSample {
    pub accel: [f32; 3],
    pub gyro: [f32; 3],
}

impl MotionSample {
    /// Parse the 14-byte burst starting at ACCEL_XOUT_H.
    pub fn from_registers(buf: &[u8; 14]) -> Self {
        let word = |i: usize| f32::from(i16::from_be_bytes([buf[i], buf[i + 1]]));
        Self {
            accel: [
                word(0) / ACCEL_LSB_PER_G,
                word(2) / ACCEL_LSB_PER_G,
                word(4) / ACCEL_LSB_PER_G,
            ],
            // bytes 6..8 are the die temperature
            gyro: [
                word(8) / GYRO_LSB_PER_DPS,
                word(10) / GYRO_LSB_PER_DPS,
                word(12) / GYRO_LSB_PER_DPS,
            ],
        }
    }
}

impl Orientation {
    pub fn from_motion(sample: &MotionSample) -> Self {
        let [ax, ay, az] = sample.accel;
        Self {
            pitch: ay.atan2(az).to_degrees(),
            roll: (-ax).atan2(az).to_degrees(),
            yaw: sample.gyro[2],
        }
    }
}

pub struct Mpu6050<I> {
    i2c: I,
    address: u8,
}

impl<I: I2c> Mpu6050<I> {
    pub fn new(i2c: I, address: u8) -> Self {
        Self { i2c, address }
    }

    /// Wake the chip and apply range / filter settings.
    pub fn init(&mut self) -> Result<(), SensorError> {
        for (reg, value) in [
            (REG_PWR_MGMT_1, 0x00),
            (REG_GYRO_CONFIG, GYRO_500DPS),
            (REG_ACCEL_CONFIG, ACCEL_8G),
            (REG_CONFIG, DLPF_21HZ),
        ] {
            self.i2c
                .write(self.address, &[reg, value])
                .map_err(|_| SensorError::BusError)?;
        }
        Ok(())
    }

    pub fn read_sample(&mut self) -> Result<MotionSample, SensorError> {
        let mut buf = [0u8; 14];
        self.i2c
            .write_read(self.address, &[REG_ACCEL_XOUT_H], &mut buf)
            .map_err(|_| SensorError::BusError)?;
        Ok(MotionSample::from_registers(&buf))
    }
}

impl<I: I2c> MotionSource for Mpu6050<I> {
    fn read_motion(&mut self) -> Result<Orientation, SensorError> {
        self.read_sample().map(|s| Orientation::from_motion(&s))
    }
}
