use crate::core::PlantState;

pub const GRAVITY: f64 = -9.81; // m/s², acts downward
pub const THRUST_MIN: f64 = 0.0; // m/s²
pub const THRUST_MAX: f64 = 100.0; // m/s²

/// Hard clamp to `[xmin, xmax]`. NaN is returned unchanged.
pub fn clip(x: f64, xmin: f64, xmax: f64) -> f64 {
    if x < xmin {
        xmin
    } else if x > xmax {
        xmax
    } else {
        x
    }
}

#[derive(PartialEq, Clone, Copy, Debug)]
pub struct AltitudePhysics {
    // Physical parameters
    gravity: f64,    // m/s²
    thrust_min: f64, // m/s²
    thrust_max: f64, // m/s²
}

impl Default for AltitudePhysics {
    fn default() -> Self {
        AltitudePhysics::new(GRAVITY, THRUST_MIN, THRUST_MAX)
    }
}

impl AltitudePhysics {
    pub fn new(gravity: f64, thrust_min: f64, thrust_max: f64) -> Self {
        Self {
            gravity,
            thrust_min,
            thrust_max,
        }
    }

    /// Actuator limit: thrust can neither be negative nor exceed the supply.
    pub fn saturate(&self, command: f64) -> f64 {
        clip(command, self.thrust_min, self.thrust_max)
    }

    /// Advances the plant one step under constant `thrust`.
    ///
    /// Position and velocity use the same net acceleration; it does not depend
    /// on position, so nothing is recomputed between the two updates.
    pub fn next_state(&self, thrust: f64, state: PlantState, dt: f64) -> PlantState {
        let acceleration = thrust + self.gravity;

        PlantState {
            position: state.position + state.velocity * dt + 0.5 * acceleration * dt * dt,
            velocity: state.velocity + acceleration * dt,
        }
    }

    pub fn get_gravity(&self) -> f64 {
        self.gravity
    }

    pub fn get_thrust_limits(&self) -> (f64, f64) {
        (self.thrust_min, self.thrust_max)
    }
}
