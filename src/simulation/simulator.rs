use log::{debug, trace, warn};

use crate::control::pid::{PIDController, PidGains};
use crate::core::error::{SimResult, check_time_step};
use crate::core::{PlantState, Trajectory};
use crate::simulation::config::SimulationConfig;
use crate::simulation::physics::AltitudePhysics;

/// One recorded step of a run.
#[derive(PartialEq, Clone, Copy, Debug)]
pub struct StepRecord {
    pub step: usize,
    pub time: f64,        // s, end of the step
    pub command: f64,     // raw controller output
    pub thrust: f64,      // saturated command, m/s²
    pub state: PlantState, // state at `time`
}

/// Fixed-step closed-loop simulator for the altitude plant.
///
/// The simulator itself holds no run state and can be reused; every run
/// consumes its own `PIDController`.
#[derive(Clone, Debug)]
pub struct Simulator {
    config: SimulationConfig,
    physics: AltitudePhysics,
}

impl Default for Simulator {
    fn default() -> Self {
        let config = SimulationConfig::default();
        Self {
            physics: config.physics(),
            config,
        }
    }
}

impl Simulator {
    pub fn new(config: SimulationConfig) -> SimResult<Self> {
        config.validate()?;
        Ok(Self {
            physics: config.physics(),
            config,
        })
    }

    pub fn get_config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn get_physics(&self) -> &AltitudePhysics {
        &self.physics
    }

    /// Runs `config.num_steps` steps of `config.dt`.
    pub fn run(&self, controller: PIDController) -> SimResult<Trajectory> {
        self.run_with(controller, self.config.num_steps, self.config.dt)
    }

    /// Builds a fresh controller from `gains` and the configured setpoint.
    pub fn run_gains(&self, gains: PidGains) -> SimResult<Trajectory> {
        self.run(PIDController::from_gains(gains, self.config.setpoint))
    }

    /// Runs `num_steps` steps of `dt`, returning `num_steps + 1` samples.
    /// A bad `dt` fails before anything is simulated.
    pub fn run_with(
        &self,
        controller: PIDController,
        num_steps: usize,
        dt: f64,
    ) -> SimResult<Trajectory> {
        let gains = controller.get_gains();
        debug!(
            "run start: kp={} ki={} kd={} setpoint={} steps={} dt={}",
            gains.kp,
            gains.ki,
            gains.kd,
            controller.get_setpoint(),
            num_steps,
            dt
        );

        let mut run = self.start_run(controller, dt, num_steps + 1)?;
        for _ in 0..num_steps {
            run.step()?;
        }

        let trajectory = run.into_trajectory();
        match trajectory.final_position() {
            Some(position) if !position.is_finite() => {
                warn!("run finished with non-finite position {}", position)
            }
            Some(position) => debug!("run finished: final position {:.3}", position),
            None => {}
        }

        Ok(trajectory)
    }

    /// Starts a step-wise run with the configured `dt`.
    pub fn start(&self, controller: PIDController) -> SimResult<SimulationRun> {
        self.start_with(controller, self.config.dt)
    }

    pub fn start_with(&self, controller: PIDController, dt: f64) -> SimResult<SimulationRun> {
        self.start_run(controller, dt, 1)
    }

    fn start_run(
        &self,
        controller: PIDController,
        dt: f64,
        capacity: usize,
    ) -> SimResult<SimulationRun> {
        let dt = check_time_step(dt)?;
        let state = PlantState::default();

        let mut trajectory = Trajectory::with_capacity(capacity);
        trajectory.push(0.0, state.position);

        Ok(SimulationRun {
            controller,
            physics: self.physics,
            state,
            dt,
            steps: 0,
            trajectory,
        })
    }
}

/// A run in progress, advanced one step at a time.
#[derive(Clone, Debug)]
pub struct SimulationRun {
    controller: PIDController,
    physics: AltitudePhysics,
    state: PlantState,
    dt: f64,
    steps: usize,
    trajectory: Trajectory,
}

impl SimulationRun {
    pub fn step(&mut self) -> SimResult<StepRecord> {
        let command = self.controller.evaluate(self.state.position, self.dt)?;
        let thrust = self.physics.saturate(command);
        self.state = self.physics.next_state(thrust, self.state, self.dt);

        self.steps += 1;
        let time = self.steps as f64 * self.dt;
        self.trajectory.push(time, self.state.position);

        trace!(
            "step {}: t={:.3} command={:.3} thrust={:.3} position={:.3} velocity={:.3}",
            self.steps,
            time,
            command,
            thrust,
            self.state.position,
            self.state.velocity
        );

        Ok(StepRecord {
            step: self.steps,
            time,
            command,
            thrust,
            state: self.state,
        })
    }

    pub fn get_state(&self) -> PlantState {
        self.state
    }

    pub fn get_controller(&self) -> &PIDController {
        &self.controller
    }

    pub fn get_step_count(&self) -> usize {
        self.steps
    }

    pub fn trajectory(&self) -> &Trajectory {
        &self.trajectory
    }

    pub fn into_trajectory(self) -> Trajectory {
        self.trajectory
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::SimError;
    use crate::simulation::physics::GRAVITY;

    fn zero_controller() -> PIDController {
        PIDController::new(0.0, 0.0, 0.0, 50.0)
    }

    #[test]
    fn test_default_run_shape() {
        let simulator = Simulator::default();

        let trajectory = simulator.run(zero_controller()).unwrap();

        assert_eq!(trajectory.len(), 1001);
        assert_eq!(trajectory.get_times()[0], 0.0);
        assert_eq!(trajectory.get_positions()[0], 0.0);
        assert_eq!(trajectory.get_times()[1000], 1000.0 * 0.02);
    }

    #[test]
    fn test_zero_steps_only_has_initial_sample() {
        let simulator = Simulator::default();

        let trajectory = simulator.run_with(zero_controller(), 0, 0.02).unwrap();

        assert_eq!(trajectory.get_times(), &[0.0]);
        assert_eq!(trajectory.get_positions(), &[0.0]);
    }

    #[test]
    fn test_step_record_matches_trajectory() {
        let simulator = Simulator::default();
        let mut run = simulator
            .start(PIDController::new(5.0, 0.0, 0.0, 50.0))
            .unwrap();

        let record = run.step().unwrap();

        // error 50 * kp 5 = 250, saturated to the actuator maximum
        assert_eq!(record.step, 1);
        assert_eq!(record.command, 250.0);
        assert_eq!(record.thrust, 100.0);
        assert_eq!(record.time, 0.02);
        assert_eq!(record.state, run.get_state());
        assert_eq!(run.trajectory().get_positions()[1], record.state.position);
        assert_eq!(run.get_step_count(), 1);
    }

    #[test]
    fn test_negative_command_is_cut_to_zero_thrust() {
        let simulator = Simulator::default();
        let mut run = simulator
            .start(PIDController::new(1.0, 0.0, 0.0, -10.0))
            .unwrap();

        let record = run.step().unwrap();

        assert_eq!(record.command, -10.0);
        assert_eq!(record.thrust, 0.0);
        assert_eq!(record.state.velocity, GRAVITY * 0.02);
    }

    #[test]
    fn test_run_matches_step_wise_run() {
        let simulator = Simulator::default();
        let gains = PidGains::new(2.0, 0.1, 1.5);

        let trajectory = simulator
            .run_with(PIDController::from_gains(gains, 50.0), 200, 0.02)
            .unwrap();

        let mut run = simulator
            .start_with(PIDController::from_gains(gains, 50.0), 0.02)
            .unwrap();
        for _ in 0..200 {
            run.step().unwrap();
        }

        assert_eq!(run.into_trajectory(), trajectory);
    }

    #[test]
    fn test_run_gains_uses_configured_setpoint() {
        let config = SimulationConfig {
            setpoint: 5.0,
            num_steps: 3000,
            ..SimulationConfig::default()
        };
        let simulator = Simulator::new(config).unwrap();

        let trajectory = simulator.run_gains(PidGains::new(4.0, 1.0, 3.0)).unwrap();

        let final_position = trajectory.final_position().unwrap();
        assert!(
            (final_position - 5.0).abs() < 0.5,
            "drone settles near the setpoint, got {}",
            final_position
        );
    }

    #[test]
    fn test_rejects_bad_time_step() {
        let simulator = Simulator::default();

        assert!(matches!(
            simulator.run_with(zero_controller(), 10, 0.0),
            Err(SimError::InvalidTimeStep(_))
        ));
        assert!(matches!(
            simulator.start_with(zero_controller(), -0.02),
            Err(SimError::InvalidTimeStep(_))
        ));
        assert!(matches!(
            Simulator::new(SimulationConfig {
                dt: 0.0,
                ..SimulationConfig::default()
            }),
            Err(SimError::InvalidTimeStep(_))
        ));
    }
}
