use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast;
use tracing::{info, warn};

use common::models::ControlIntent;
use dashboard::router::ViewRouter;

/// The bot's mode catalog. The wire type stays a free string; anything
/// outside this list is relayed with a warning.
pub const KNOWN_MODES: &[&str] = &["SAFE", "BALANCED", "AGGRESSIVE", "SCALPING_M5"];

#[derive(Debug, PartialEq)]
pub enum Command {
    Toggle(bool),
    Mode(String),
    View(String),
    Help,
}

pub fn parse_command(line: &str) -> Option<Command> {
    let mut parts = line.split_whitespace();
    match parts.next()? {
        "toggle" => match parts.next()? {
            "on" => Some(Command::Toggle(true)),
            "off" => Some(Command::Toggle(false)),
            _ => None,
        },
        "mode" => parts.next().map(|m| Command::Mode(m.to_uppercase())),
        "view" => parts.next().map(|v| Command::View(v.to_lowercase())),
        "help" => Some(Command::Help),
        _ => None,
    }
}

/// Reads operator commands from stdin, raising `ControlIntent`s for the
/// control relay and switching the active view locally.
pub async fn read_commands(intent_tx: broadcast::Sender<ControlIntent>, mut router: ViewRouter) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Ok(Some(line)) = lines.next_line().await {
        match parse_command(&line) {
            Some(Command::Toggle(enabled)) => {
                let _ = intent_tx.send(ControlIntent::ToggleTrading(enabled));
            }
            Some(Command::Mode(mode)) => {
                if !KNOWN_MODES.contains(&mode.as_str()) {
                    warn!("Mode {} is outside the known catalog, sending anyway", mode);
                }
                let _ = intent_tx.send(ControlIntent::SetMode(mode));
            }
            Some(Command::View(name)) => {
                if router.activate(&name) {
                    info!("Active view: {}", router.active());
                } else {
                    warn!("No such view: {}", name);
                }
            }
            Some(Command::Help) => print_help(),
            None => {
                if !line.trim().is_empty() {
                    warn!("Unrecognized command: {}", line.trim());
                }
                print_help();
            }
        }
    }
}

fn print_help() {
    info!(
        "Commands: toggle on|off, mode <{}>, view <name>, help",
        KNOWN_MODES.join("|")
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_commands_parse() {
        assert_eq!(parse_command("toggle on"), Some(Command::Toggle(true)));
        assert_eq!(parse_command("toggle off"), Some(Command::Toggle(false)));
        assert_eq!(parse_command("toggle maybe"), None);
        assert_eq!(parse_command("toggle"), None);
    }

    #[test]
    fn mode_commands_uppercase_their_argument() {
        assert_eq!(
            parse_command("mode aggressive"),
            Some(Command::Mode("AGGRESSIVE".to_string()))
        );
        assert_eq!(
            parse_command("mode scalping_m5"),
            Some(Command::Mode("SCALPING_M5".to_string()))
        );
    }

    #[test]
    fn view_commands_lowercase_their_argument() {
        assert_eq!(
            parse_command("view Signals"),
            Some(Command::View("signals".to_string()))
        );
    }

    #[test]
    fn garbage_is_rejected() {
        assert_eq!(parse_command(""), None);
        assert_eq!(parse_command("restart everything"), None);
    }
}
