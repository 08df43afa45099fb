pub mod pid;

pub use pid::{PIDController, PidGains};
