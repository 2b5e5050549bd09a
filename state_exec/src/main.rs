//! # Robot State Executable
//!
//! This executable replays a recording of robot states, as produced by the control loop once
//! per sample, and writes the canonical text form of the states into the session so that runs
//! can be diffed against each other.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Monitor holding the latest robot state.
mod monitor;

/// Parameters for the state executable.
mod params;

/// Reader for robot state recordings.
mod replay;

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

// External
use color_eyre::{eyre::WrapErr, Result};
use log::{debug, info, warn};
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::PathBuf,
};
use structopt::StructOpt;

// Internal
use monitor::StateMonitor;
use params::StateExecParams;
use replay::ReplayReader;
use util::{
    host,
    logger::{level_from_verbosity, logger_init},
    session::Session,
};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Replay a robot state recording into the session log.
#[derive(Debug, StructOpt)]
#[structopt(name = "state_exec")]
struct Opts {
    /// Recording to replay, overriding `samples_path` from the parameters.
    #[structopt(parse(from_os_str))]
    samples: Option<PathBuf>,

    /// Increase log verbosity (-v for debug, -vv for trace).
    #[structopt(short, long, parse(from_occurrences))]
    verbose: u8,
}

// ------------------------------------------------------------------------------------------------
// MAIN
// ------------------------------------------------------------------------------------------------

fn main() -> Result<()> {
    color_eyre::install()?;

    let opts = Opts::from_args();

    // ---- EARLY INITIALISATION ----

    // Initialise session
    let session = Session::new("state_exec", "sessions").wrap_err("Failed to create the session")?;

    // Initialise logger
    logger_init(level_from_verbosity(opts.verbose), &session)
        .wrap_err("Failed to initialise logging")?;

    info!("Robot State Executable\n");
    info!("Session directory: {:?}\n", session.session_root);
    debug!("CLI arguments: {:?}", opts);

    info!("Initialising...");

    // ---- LOAD PARAMETERS ----

    let params: StateExecParams =
        util::params::load("state_exec.toml").wrap_err("Failed to load parameters")?;
    params.are_valid().wrap_err("Invalid parameters")?;

    info!("Parameters loaded");

    // ---- OPEN REPLAY AND OUTPUT ----

    let samples_path = match opts.samples {
        Some(p) => p,
        None => {
            let p = PathBuf::from(&params.samples_path);
            if p.is_absolute() {
                p
            } else {
                host::get_sw_root()
                    .wrap_err("Failed to get the software root")?
                    .join(p)
            }
        }
    };

    info!("Replaying states from {:?}", samples_path);

    let replay = ReplayReader::open(&samples_path).wrap_err("Failed to open the recording")?;

    let text_path = session.file_path(&params.text_file_name);
    let mut text_file = BufWriter::new(
        File::create(&text_path).wrap_err("Failed to create the state text file")?,
    );

    info!("Writing formatted states to {:?}", text_path);

    // ---- MAIN LOOP ----

    let mut monitor = StateMonitor::new(params.decimation);
    let mut num_logged = 0usize;
    let mut num_regressions = 0usize;

    for sample in replay {
        let sample = sample.wrap_err("Failed to read the recording")?;

        let (_, report) = monitor.update(sample);

        if report.id_regressed {
            warn!(
                "Message ID did not increase at sample {} (now {})",
                report.index, sample.message_id
            );
            num_regressions += 1;
        }

        if report.log_due {
            // Format a copy so the text always comes from a single sample
            let state_str = monitor.current().to_string();

            info!("[{}] {}", report.index, state_str);
            writeln!(text_file, "{}", state_str).wrap_err("Failed to write the state text file")?;
            num_logged += 1;
        }
    }

    text_file
        .flush()
        .wrap_err("Failed to flush the state text file")?;

    info!(
        "Replay complete: {} samples read, {} logged, {} message ID regressions",
        monitor.num_samples(),
        num_logged,
        num_regressions
    );

    Ok(())
}
