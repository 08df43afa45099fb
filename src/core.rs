pub mod error;
pub mod state;

pub use error::{SimError, SimResult};
pub use state::{PlantState, Trajectory};
