//! ffbtest - steering wheel force feedback tester
//!
//! Drives a wheel through the vendor steering SDK: probe slots, send
//! constant forces for a given wheel angle, and stop every effect.

#![deny(static_mut_refs)]
#![deny(unused_must_use)]
#![deny(clippy::unwrap_used)]

mod commands;
mod error;
mod output;
mod slider;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use logi_ffb::{DEFAULT_PROBE_SLOTS, DeviceConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::error::CliError;

#[derive(Parser)]
#[command(name = "ffbtest")]
#[command(about = "Steering wheel force feedback tester")]
#[command(version)]
#[command(long_about = "
ffbtest checks that a steering wheel answers to force feedback commands
through the vendor steering SDK shipped with Logitech G HUB.

Wheel angles in [-450, 450] degrees map linearly onto constant forces in
[-100, 100] percent. Use --json for machine-readable output.
")]
struct Cli {
    /// Output format (human-readable or JSON)
    #[arg(
        long,
        global = true,
        help = "Output in JSON format for machine parsing"
    )]
    json: bool,

    /// Verbose logging
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// SDK library to load instead of the default search
    #[arg(long, global = true, env = "FFBTEST_BINDING", value_name = "PATH")]
    binding: Option<PathBuf>,

    /// Device slot the session drives
    #[arg(long, global = true, env = "FFBTEST_SLOT", default_value_t = 0)]
    slot: u8,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    fn device_config(&self) -> DeviceConfig {
        let config = DeviceConfig::default().with_slot(self.slot);
        match &self.binding {
            Some(path) => config.with_binding_path(path),
            None => config,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Report which device slots have a wheel attached
    Probe {
        /// Number of slots to query, starting at 0
        #[arg(long, default_value_t = DEFAULT_PROBE_SLOTS)]
        slots: u8,
    },

    /// Show process architecture and library location hints
    Env,

    /// Initialize the SDK and report the connection state
    Init,

    /// Play constant forces for a sequence of wheel angles
    Angle {
        /// Wheel angles in degrees, applied in order
        #[arg(required = true, allow_negative_numbers = true, value_name = "DEG")]
        degrees: Vec<i32>,

        /// How long to hold each force before moving on
        #[arg(long, default_value_t = 1000, value_name = "MS")]
        hold_ms: u64,
    },

    /// Stop every effect on the wheel
    Stop,

    /// Interactive session reading commands from stdin
    Console,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("ffbtest={log_level},logi_ffb={log_level},logi_ffb_binding={log_level}")
                    .into()
            }),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    match execute_command(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if cli.json {
                output::print_error_json(&e);
            } else {
                output::print_error_human(&e);
            }

            let exit_code = e.downcast_ref::<CliError>().map_or(1, CliError::exit_code);
            ExitCode::from(exit_code)
        }
    }
}

fn execute_command(cli: &Cli) -> Result<()> {
    let config = cli.device_config();
    match &cli.command {
        Commands::Probe { slots } => commands::probe::execute(&config, *slots, cli.json),
        Commands::Env => commands::env::execute(&config, cli.json),
        Commands::Init => commands::ffb::init(config, cli.json),
        Commands::Angle { degrees, hold_ms } => {
            commands::ffb::angle(config, degrees, *hold_ms, cli.json)
        }
        Commands::Stop => commands::ffb::stop(config, cli.json),
        Commands::Console => commands::console::execute(config, cli.json),
    }
}
