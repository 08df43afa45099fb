use std::{fs, path::Path};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::core::error::{SimError, SimResult, check_time_step};
use crate::simulation::physics::{AltitudePhysics, GRAVITY, THRUST_MAX, THRUST_MIN};

pub const DEFAULT_SETPOINT: f64 = 50.0; // m
pub const DEFAULT_DT: f64 = 0.02; // s
pub const DEFAULT_NUM_STEPS: usize = 1000;

/// Plant and run parameters. Missing JSON fields take the defaults.
#[derive(PartialEq, Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub setpoint: f64,
    pub gravity: f64,
    pub thrust_min: f64,
    pub thrust_max: f64,
    pub dt: f64,
    pub num_steps: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            setpoint: DEFAULT_SETPOINT,
            gravity: GRAVITY,
            thrust_min: THRUST_MIN,
            thrust_max: THRUST_MAX,
            dt: DEFAULT_DT,
            num_steps: DEFAULT_NUM_STEPS,
        }
    }
}

impl SimulationConfig {
    pub fn from_json_str(json: &str) -> SimResult<Self> {
        let config: SimulationConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> SimResult<Self> {
        let path = path.as_ref();
        debug!("loading simulation config from {}", path.display());
        Self::from_json_str(&fs::read_to_string(path)?)
    }

    pub fn validate(&self) -> SimResult<()> {
        check_time_step(self.dt)?;
        // NaN bounds fail this check as well
        if !(self.thrust_min <= self.thrust_max) {
            return Err(SimError::InvalidConfig(format!(
                "thrust_min ({}) must not exceed thrust_max ({})",
                self.thrust_min, self.thrust_max
            )));
        }
        Ok(())
    }

    pub fn physics(&self) -> AltitudePhysics {
        AltitudePhysics::new(self.gravity, self.thrust_min, self.thrust_max)
    }
}
