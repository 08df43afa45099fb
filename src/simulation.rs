pub mod config;
pub mod physics;
pub mod simulator;

pub use config::SimulationConfig;
pub use physics::{AltitudePhysics, clip};
pub use simulator::{SimulationRun, Simulator, StepRecord};
