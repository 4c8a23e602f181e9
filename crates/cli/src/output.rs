//! Output formatting for CLI responses

use anyhow::Error;
use colored::*;
use logi_ffb::{
    AngleCommand, BindingInitError, CommandOutcome, ConnectionState, DeviceConfig, DiagnosticReport,
    EnvironmentReport,
};
use serde_json::{Value, json};

use crate::error::CliError;

/// Print error in JSON format
pub fn print_error_json(error: &Error) {
    let cli_error = error.downcast_ref::<CliError>();
    let error_json = json!({
        "success": false,
        "error": {
            "message": error.to_string(),
            "type": cli_error.map_or("other", error_type_name),
            "hints": cli_error.map_or(&[][..], CliError::hints),
        }
    });
    print_json(&error_json, "error");
}

/// Print error in human-readable format
pub fn print_error_human(error: &Error) {
    eprintln!("{} {}", "Error:".red().bold(), error);

    // Print error chain if available
    let mut source = error.source();
    while let Some(err) = source {
        eprintln!("  {} {}", "Caused by:".yellow(), err);
        source = err.source();
    }

    if let Some(cli_error) = error.downcast_ref::<CliError>() {
        print_hints(cli_error.hints());
    }
}

/// Print an error that did not end the program.
pub fn print_recoverable_error(error: &CliError, json: bool) {
    if json {
        let output = json!({
            "success": false,
            "error": {
                "message": error.to_string(),
                "type": error_type_name(error),
                "hints": error.hints(),
            }
        });
        print_json(&output, "error");
    } else {
        eprintln!("{} {}", "Error:".red().bold(), error);
        print_hints(error.hints());
    }
}

fn print_hints(hints: &[&str]) {
    if hints.is_empty() {
        return;
    }
    eprintln!("{}", "Possible causes:".yellow().bold());
    for hint in hints {
        eprintln!("  • {hint}");
    }
}

/// Print probe results
pub fn print_report(report: &DiagnosticReport, json: bool) {
    if json {
        let output = json!({
            "success": true,
            "report": report
        });
        print_json(&output, "probe report");
        return;
    }

    println!("{} {}", "Binding:".bold(), report.binding());
    for entry in report.entries() {
        let marker = if entry.connected {
            "●".green()
        } else {
            "○".dimmed()
        };
        println!("  {} Device index {}: {}", marker, entry.slot, entry.connected);
    }
    if !report.any_device_found() {
        println!("{}", "No device detected!".yellow());
    }
}

/// Print the host environment summary
pub fn print_environment(report: &EnvironmentReport, json: bool) {
    if json {
        let output = json!({
            "success": true,
            "environment": report,
            "supported_platform": report.is_supported_platform(),
        });
        print_json(&output, "environment");
        return;
    }

    println!("{report}");
    if !report.is_supported_platform() {
        println!(
            "{} the steering wheel SDK only runs on Windows",
            "Warning:".yellow().bold()
        );
    }
}

/// Print the session's connection state
pub fn print_state(state: ConnectionState, config: &DeviceConfig, json: bool) {
    if json {
        let output = json!({
            "success": true,
            "state": state,
            "binding": config.binding.to_string(),
            "slot": config.slot,
        });
        print_json(&output, "state");
        return;
    }

    let label = match state {
        ConnectionState::Connected => state.as_str().green(),
        ConnectionState::Disconnected => state.as_str().red(),
        ConnectionState::Unknown => state.as_str().dimmed(),
    };
    println!(
        "{} {} (binding {}, slot {})",
        "State:".bold(),
        label,
        config.binding,
        config.slot
    );
}

/// Print the outcome of a force or stop command
pub fn print_outcome(angle: Option<AngleCommand>, outcome: CommandOutcome, json: bool) {
    if json {
        let output = match angle {
            Some(angle) => json!({
                "success": true,
                "angle": angle,
                "outcome": outcome_json(outcome)
            }),
            None => json!({
                "success": true,
                "outcome": outcome_json(outcome)
            }),
        };
        print_json(&output, "outcome");
        return;
    }

    match (outcome, angle) {
        (CommandOutcome::Sent(force), Some(angle)) => {
            println!("{} {} → {}", "✓".green(), angle, force);
        }
        (CommandOutcome::Sent(force), None) => println!("{} {}", "✓".green(), force),
        (CommandOutcome::Stopped, _) => println!("{} All effects stopped", "✓".green()),
        (CommandOutcome::Skipped(state), _) => {
            println!("{} Not sent, wheel is {}", "•".yellow(), state);
        }
    }
}

/// Print an angle that was not resent because it did not change
pub fn print_unchanged(degrees: i32, json: bool) {
    if json {
        let output = json!({
            "success": true,
            "angle": degrees,
            "outcome": { "kind": "unchanged" }
        });
        print_json(&output, "outcome");
    } else {
        println!("{} {}° unchanged", "•".dimmed(), degrees);
    }
}

fn outcome_json(outcome: CommandOutcome) -> Value {
    match outcome {
        CommandOutcome::Sent(force) => json!({ "kind": "sent", "force": force }),
        CommandOutcome::Stopped => json!({ "kind": "stopped" }),
        CommandOutcome::Skipped(state) => json!({ "kind": "skipped", "state": state }),
    }
}

fn error_type_name(error: &CliError) -> &'static str {
    match error {
        CliError::Init(BindingInitError::Load(_)) => "binding_load",
        CliError::Init(BindingInitError::SdkInitFailed { .. }) => "sdk_init",
        CliError::Init(BindingInitError::DeviceNotFound { .. }) => "device_not_found",
        CliError::Command(_) => "command",
        CliError::InvalidInput(_) => "invalid_input",
        CliError::IoError(_) => "io",
    }
}

fn print_json(value: &Value, what: &str) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{s}"),
        Err(e) => eprintln!("Failed to format {what} as JSON: {e}"),
    }
}
