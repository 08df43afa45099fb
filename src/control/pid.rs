use serde::{Deserialize, Serialize};

use crate::core::error::{SimResult, check_time_step};

#[derive(PartialEq, Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct PidGains {
    pub kp: f64,
    pub ki: f64,
    pub kd: f64,
}

impl PidGains {
    pub fn new(kp: f64, ki: f64, kd: f64) -> Self {
        Self { kp, ki, kd }
    }
}

/// PID controller for a single simulation run.
///
/// There is no `reset`: the accumulated integral and the previous error belong
/// to exactly one run. `Simulator` takes the controller by value, so starting
/// another run means building a new controller.
#[derive(Clone, Debug)]
pub struct PIDController {
    kp: f64,
    ki: f64,
    kd: f64,
    setpoint: f64,
    integral: f64,
    last_error: Option<f64>,
    derivative_term: f64,
}

impl PIDController {
    pub fn new(kp: f64, ki: f64, kd: f64, setpoint: f64) -> Self {
        Self {
            kp,
            ki,
            kd,
            setpoint,
            integral: 0.0,
            last_error: None,
            derivative_term: 0.0,
        }
    }

    pub fn from_gains(gains: PidGains, setpoint: f64) -> Self {
        Self::new(gains.kp, gains.ki, gains.kd, setpoint)
    }

    pub fn get_gains(&self) -> PidGains {
        PidGains::new(self.kp, self.ki, self.kd)
    }

    pub fn get_setpoint(&self) -> f64 {
        self.setpoint
    }

    /// Accumulated integral term, already scaled by `ki`.
    pub fn get_integral(&self) -> f64 {
        self.integral
    }

    pub fn get_last_error(&self) -> Option<f64> {
        self.last_error
    }

    pub fn get_derivative_term(&self) -> f64 {
        self.derivative_term
    }

    /// Unsaturated control command for `measurement`.
    ///
    /// The integral accumulates without any anti-windup clamp. The derivative
    /// term stays at zero until a previous error exists, so the first sample
    /// produces no derivative kick. Fails with `InvalidTimeStep` and leaves the
    /// state untouched when `dt` is not positive.
    pub fn evaluate(&mut self, measurement: f64, dt: f64) -> SimResult<f64> {
        let dt = check_time_step(dt)?;

        let error = self.setpoint - measurement;
        self.integral += error * self.ki * dt;
        if let Some(last_error) = self.last_error {
            self.derivative_term = (error - last_error) / dt * self.kd;
        }
        self.last_error = Some(error);

        Ok(self.kp * error + self.integral + self.derivative_term)
    }
}
