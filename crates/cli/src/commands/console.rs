//! Interactive console
//!
//! Reads one command per line and drives a single long-lived session, the
//! way a slider and a STOP ALL button would. Errors are reported and the
//! console keeps running; end of input behaves like `quit`.

use std::io::{self, BufRead};
use std::str::FromStr;

use anyhow::Result;
use colored::*;
use logi_ffb::prelude::BindingLoader;
use logi_ffb::{BindingSource, DeviceConfig, DeviceSession};

use crate::error::CliError;
use crate::output;
use crate::slider::Slider;

const HELP: &[(&str, &str)] = &[
    ("angle <DEG>", "play the force for a wheel angle"),
    ("stop", "stop every effect"),
    ("init", "initialize now and show the connection state"),
    ("binding <PATH|default>", "switch SDK library and reinitialize lazily"),
    ("slot <N>", "switch device slot and reinitialize lazily"),
    ("state", "show the connection state"),
    ("help", "show this list"),
    ("quit", "stop the wheel and exit"),
];

/// A single console line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    Angle(i32),
    Stop,
    Init,
    Binding(BindingSource),
    Slot(u8),
    State,
    Help,
    Quit,
}

impl FromStr for ConsoleCommand {
    type Err = CliError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(word, rest)| (word, rest.trim()));

        match (word.to_ascii_lowercase().as_str(), rest) {
            ("angle", value) => value
                .parse()
                .map(Self::Angle)
                .map_err(|e| CliError::InvalidInput(format!("angle '{value}': {e}"))),
            ("slot", value) => value
                .parse()
                .map(Self::Slot)
                .map_err(|e| CliError::InvalidInput(format!("slot '{value}': {e}"))),
            ("binding", "") => Err(CliError::InvalidInput(
                "binding needs a library path or 'default'".to_string(),
            )),
            ("binding", "default") => Ok(Self::Binding(BindingSource::Default)),
            ("binding", path) => Ok(Self::Binding(BindingSource::path(path))),
            ("stop", "") => Ok(Self::Stop),
            ("init", "") => Ok(Self::Init),
            ("state", "") => Ok(Self::State),
            ("help" | "?", "") => Ok(Self::Help),
            ("quit" | "exit", "") => Ok(Self::Quit),
            _ => Err(CliError::InvalidInput(format!(
                "unrecognized command '{line}'; type 'help'"
            ))),
        }
    }
}

enum Flow {
    Continue,
    Quit,
}

/// Run the console over stdin.
pub fn execute(config: DeviceConfig, json: bool) -> Result<()> {
    let mut session = DeviceSession::new(config);
    let stdin = io::stdin();
    run(&mut session, stdin.lock(), json)?;
    Ok(())
}

/// Run the console over `input` until it ends or a `quit` line.
///
/// The session is shut down before returning.
pub fn run<L, R>(session: &mut DeviceSession<L>, input: R, json: bool) -> Result<(), CliError>
where
    L: BindingLoader,
    R: BufRead,
{
    let mut slider = Slider::new();
    if !json {
        println!("{}", "Type 'help' for commands, 'quit' to exit.".dimmed());
    }

    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let flow = line
            .parse::<ConsoleCommand>()
            .and_then(|command| apply(session, &mut slider, command, json));
        match flow {
            Ok(Flow::Continue) => {}
            Ok(Flow::Quit) => break,
            Err(err) => output::print_recoverable_error(&err, json),
        }
    }

    session.shutdown();
    tracing::info!("Console closed");
    Ok(())
}

fn apply<L: BindingLoader>(
    session: &mut DeviceSession<L>,
    slider: &mut Slider,
    command: ConsoleCommand,
    json: bool,
) -> Result<Flow, CliError> {
    match command {
        ConsoleCommand::Angle(deg) => match slider.move_to(deg) {
            Some(angle) => {
                let outcome = session.send_angle(angle)?;
                output::print_outcome(Some(angle), outcome, json);
            }
            None => output::print_unchanged(deg, json),
        },
        ConsoleCommand::Stop => {
            slider.reset();
            let outcome = session.stop_all()?;
            output::print_outcome(None, outcome, json);
        }
        ConsoleCommand::Init => {
            let state = session.ensure_initialized()?;
            output::print_state(state, session.config(), json);
        }
        ConsoleCommand::Binding(source) => {
            slider.reset();
            let config = session.config().clone().with_binding(source);
            session.reconfigure(config);
            output::print_state(session.state(), session.config(), json);
        }
        ConsoleCommand::Slot(slot) => {
            slider.reset();
            let config = session.config().clone().with_slot(slot);
            session.reconfigure(config);
            output::print_state(session.state(), session.config(), json);
        }
        ConsoleCommand::State => output::print_state(session.state(), session.config(), json),
        ConsoleCommand::Help => print_help(json),
        ConsoleCommand::Quit => return Ok(Flow::Quit),
    }
    Ok(Flow::Continue)
}

fn print_help(json: bool) {
    if json {
        let commands: Vec<_> = HELP
            .iter()
            .map(|(usage, about)| serde_json::json!({ "usage": usage, "about": about }))
            .collect();
        println!("{}", serde_json::json!({ "success": true, "commands": commands }));
        return;
    }
    for (usage, about) in HELP {
        println!("  {:<24} {}", usage.bold(), about);
    }
}
