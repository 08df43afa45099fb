#[derive(PartialEq, Clone, Copy, Debug, Default)]
pub struct PlantState {
    pub position: f64, // m
    pub velocity: f64, // m/s
}

impl PlantState {
    pub fn new(position: f64, velocity: f64) -> Self {
        PlantState { position, velocity }
    }
}

/// Time/position history of one simulation run.
///
/// Both sequences always have the same length and are index-aligned. Samples
/// can only be appended from inside the crate, so a trajectory handed back by
/// the simulator is read-only for the caller.
#[derive(PartialEq, Clone, Debug, Default)]
pub struct Trajectory {
    times: Vec<f64>,
    positions: Vec<f64>,
}

impl Trajectory {
    pub fn new() -> Self {
        Self {
            times: Vec::new(),
            positions: Vec::new(),
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            times: Vec::with_capacity(capacity),
            positions: Vec::with_capacity(capacity),
        }
    }

    pub(crate) fn push(&mut self, time: f64, position: f64) {
        self.times.push(time);
        self.positions.push(position);
    }

    pub fn get_times(&self) -> &[f64] {
        &self.times
    }

    pub fn get_positions(&self) -> &[f64] {
        &self.positions
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// `(time, position)` pairs in recording order.
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.times.iter().copied().zip(self.positions.iter().copied())
    }

    pub fn final_position(&self) -> Option<f64> {
        self.positions.last().copied()
    }

    /// Highest recorded position and the time it was reached.
    pub fn peak_position(&self) -> Option<(f64, f64)> {
        self.iter()
            .fold(None, |peak: Option<(f64, f64)>, (time, position)| match peak {
                Some((_, best)) if best >= position => peak,
                _ => Some((time, position)),
            })
    }

    pub fn into_parts(self) -> (Vec<f64>, Vec<f64>) {
        (self.times, self.positions)
    }
}
