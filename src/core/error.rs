use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("time step must be positive and finite, got {0}")]
    InvalidTimeStep(f64),

    #[error("invalid simulation config: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type SimResult<T> = Result<T, SimError>;

/// Rejects zero, negative and non-finite time steps.
pub fn check_time_step(dt: f64) -> SimResult<f64> {
    if dt.is_finite() && dt > 0.0 {
        Ok(dt)
    } else {
        Err(SimError::InvalidTimeStep(dt))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_time_step() {
        assert_eq!(check_time_step(0.02).ok(), Some(0.02));
        assert!(matches!(check_time_step(0.0), Err(SimError::InvalidTimeStep(_))));
        assert!(matches!(check_time_step(-0.5), Err(SimError::InvalidTimeStep(_))));
        assert!(check_time_step(f64::NAN).is_err());
        assert!(check_time_step(f64::INFINITY).is_err());
    }

    #[test]
    fn test_error_display() {
        let err = SimError::InvalidTimeStep(-1.0);
        assert_eq!(err.to_string(), "time step must be positive and finite, got -1");
    }
}
