use altitude_sim::{PidGains, SimulationConfig, Trajectory};

pub struct DisplayData {
    pub gains: PidGains,
    pub setpoint: f64,
    pub steps: usize,
    pub dt: f64,
    pub final_position: Option<f64>,
    pub peak: Option<(f64, f64)>,
    pub rows: Vec<(f64, f64)>,
}

/// Keeps every `stride`-th sample plus the last one.
pub fn decimate(trajectory: &Trajectory, stride: usize) -> Vec<(f64, f64)> {
    let stride = stride.max(1);
    let last = trajectory.len().saturating_sub(1);

    trajectory
        .iter()
        .enumerate()
        .filter(|(index, _)| index % stride == 0 || *index == last)
        .map(|(_, sample)| sample)
        .collect()
}

pub fn format_optional(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.2}", v),
        None => "N/A".to_string(),
    }
}

pub fn log_to_terminal(
    trajectory: &Trajectory,
    gains: PidGains,
    config: &SimulationConfig,
    stride: usize,
) {
    let display_data = DisplayData {
        gains,
        setpoint: config.setpoint,
        steps: trajectory.len().saturating_sub(1),
        dt: config.dt,
        final_position: trajectory.final_position(),
        peak: trajectory.peak_position(),
        rows: decimate(trajectory, stride),
    };

    println!("--- Controller ---");
    println!(
        "Kp = {:.2}  Ki = {:.2}  Kd = {:.2}",
        display_data.gains.kp, display_data.gains.ki, display_data.gains.kd
    );
    println!("Setpoint: {:.2}m", display_data.setpoint);

    println!("\n--- Trajectory ---");
    println!("{:>8} | {:>10} | {:>10}", "Time(s)", "Pos(m)", "Target(m)");
    println!("---------|------------|-----------");
    for (time, position) in &display_data.rows {
        println!(
            "{:>8.2} | {:>10.2} | {:>10.2}",
            time, position, display_data.setpoint
        );
    }

    println!("\n--- Summary ---");
    println!("Steps: {} (dt = {}s)", display_data.steps, display_data.dt);
    println!(
        "Final Position: {}m",
        format_optional(display_data.final_position)
    );
    match display_data.peak {
        Some((time, position)) => println!("Peak Position: {:.2}m at {:.2}s", position, time),
        None => println!("Peak Position: N/A"),
    }
    println!("----------------------\n");
}
