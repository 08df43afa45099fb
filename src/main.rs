mod ui;

use std::{env, process::ExitCode};

use altitude_sim::{PidGains, SimulationConfig, Simulator};
use chrono::Local;
use fern::Dispatch;
use log::{error, info};

use ui::terminal_ui::log_to_terminal;

const LOG_LEVEL_VAR: &str = "ALTITUDE_SIM_LOG";
const TABLE_STRIDE: usize = 50;

fn setup_logger() -> Result<(), Box<dyn std::error::Error>> {
    let level = env::var(LOG_LEVEL_VAR)
        .ok()
        .and_then(|value| value.parse::<log::LevelFilter>().ok())
        .unwrap_or(log::LevelFilter::Info);

    Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{}][{}][{}] {}",
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(level)
        .chain(std::fs::File::create("altitude-sim.log")?)
        .chain(std::io::stdout())
        .apply()?;

    Ok(())
}

/// `[CONFIG.json] [KP KI KD]`
fn parse_args(args: &[String]) -> Result<(Option<&str>, PidGains), String> {
    let no_gains: &[String] = &[];
    let (config_path, gains) = match args {
        [] => (None, no_gains),
        [path] => (Some(path.as_str()), no_gains),
        [_, _, _] => (None, args),
        [path, rest @ ..] if rest.len() == 3 => (Some(path.as_str()), rest),
        _ => return Err("usage: altitude-sim [CONFIG.json] [KP KI KD]".to_string()),
    };

    if gains.is_empty() {
        return Ok((config_path, PidGains::default()));
    }

    let values = gains
        .iter()
        .map(|value| {
            value
                .parse::<f64>()
                .map_err(|e| format!("invalid gain {:?}: {}", value, e))
        })
        .collect::<Result<Vec<f64>, String>>()?;

    Ok((config_path, PidGains::new(values[0], values[1], values[2])))
}

fn run(args: &[String]) -> Result<(), Box<dyn std::error::Error>> {
    let (config_path, gains) = parse_args(args)?;

    let config = match config_path {
        Some(path) => SimulationConfig::load(path)?,
        None => SimulationConfig::default(),
    };
    info!(
        "simulating {} steps of {}s towards setpoint {}",
        config.num_steps, config.dt, config.setpoint
    );

    let simulator = Simulator::new(config)?;
    let trajectory = simulator.run_gains(gains)?;

    log_to_terminal(&trajectory, gains, simulator.get_config(), TABLE_STRIDE);
    Ok(())
}

fn main() -> ExitCode {
    if let Err(e) = setup_logger() {
        eprintln!("failed to set up logger: {}", e);
        return ExitCode::FAILURE;
    }

    let args: Vec<String> = env::args().skip(1).collect();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
