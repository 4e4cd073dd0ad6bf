//! Propulsion motor driver (L293D H-bridge).
//!
//! Binary control only: IN1 high / IN2 low with the enable channel at
//! full duty runs the motor forward; everything low stops it.
//!
//! The driver is a dumb actuator.  Whether the motor should run is decided
//! by the mode table in [`fsm::states`](crate::fsm::states).

use embedded_hal::digital::OutputPin;
use embedded_hal::pwm::SetDutyCycle;

use super::MotorOutput;
use crate::error::ActuatorError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotorState {
    Stopped,
    RunningForward,
}

pub struct MotorDriver<IN1, IN2, EN> {
    in1: IN1,
    in2: IN2,
    enable: EN,
    state: MotorState,
}

impl<IN1, IN2, EN> MotorDriver<IN1, IN2, EN>
where
    IN1: OutputPin,
    IN2: OutputPin,
    EN: SetDutyCycle,
{
    pub fn new(in1: IN1, in2: IN2, enable: EN) -> Self {
        Self {
            in1,
            in2,
            enable,
            state: MotorState::Stopped,
        }
    }

    pub fn forward(&mut self) -> Result<(), ActuatorError> {
        self.in1.set_high().map_err(|_| ActuatorError::PinWriteFailed)?;
        self.in2.set_low().map_err(|_| ActuatorError::PinWriteFailed)?;
        self.enable
            .set_duty_cycle_fully_on()
            .map_err(|_| ActuatorError::PwmWriteFailed)?;
        self.state = MotorState::RunningForward;
        Ok(())
    }

    pub fn halt(&mut self) -> Result<(), ActuatorError> {
        // Drop enable first so the bridge never sees a direction change
        // while powered.
        self.enable
            .set_duty_cycle_fully_off()
            .map_err(|_| ActuatorError::PwmWriteFailed)?;
        self.in1.set_low().map_err(|_| ActuatorError::PinWriteFailed)?;
        self.in2.set_low().map_err(|_| ActuatorError::PinWriteFailed)?;
        self.state = MotorState::Stopped;
        Ok(())
    }

    pub fn state(&self) -> MotorState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == MotorState::RunningForward
    }
}

impl<IN1, IN2, EN> MotorOutput for MotorDriver<IN1, IN2, EN>
where
    IN1: OutputPin,
    IN2: OutputPin,
    EN: SetDutyCycle,
{
    fn run_full(&mut self) -> Result<(), ActuatorError> {
        self.forward()
    }

    fn stop(&mut self) -> Result<(), ActuatorError> {
        self.halt()
    }
}
