pub mod control;
pub mod core;
pub mod simulation;

// Re-export key items
pub use control::*;
pub use self::core::*;
pub use simulation::*;
