//! CLI command definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for travelmate
#[derive(Parser, Debug)]
#[command(name = "travelmate")]
#[command(author, version, about = "Travel-planning chat assistant with a streaming relay")]
#[command(long_about = r#"
TravelMate relays chat requests to an AI gateway and streams the replies back.

  serve   Run the HTTP relay (POST any path, Server-Sent-Events response)
  chat    Talk to a relay from the terminal
  ask     Send one message and print the streamed reply
  config  Show configuration sources and the effective settings

Configuration files are loaded from (in priority order):
1. TRAVELMATE_* environment variables (e.g. TRAVELMATE_UPSTREAM__MODEL)
2. --config <path>        Explicit config file
3. ./travelmate.toml      Project-level config
4. ~/.config/travelmate/config.toml   Global config

Example:
  travelmate serve --bind 0.0.0.0:8787
  travelmate chat
  travelmate ask "Plan a 3-day trip to Goa"
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Also write logs to a daily-rotated file in this directory
    #[arg(long, global = true, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Run the streaming relay server
    Serve {
        /// Address to listen on (overrides relay.bind)
        #[arg(short, long, value_name = "ADDR")]
        bind: Option<String>,
    },

    /// Start an interactive chat session
    Chat {
        /// Relay endpoint (overrides client.relay_url)
        #[arg(long, value_name = "URL")]
        relay_url: Option<String>,

        /// Suppress progress indicators
        #[arg(short, long)]
        quiet: bool,

        /// Start without the assistant greeting
        #[arg(long)]
        no_greeting: bool,
    },

    /// Send a single message and print the reply
    Ask {
        /// The message to send
        question: String,

        /// Relay endpoint (overrides client.relay_url)
        #[arg(long, value_name = "URL")]
        relay_url: Option<String>,
    },

    /// Show configuration file locations and effective settings
    Config,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_serve_with_bind() {
        let cli = Cli::try_parse_from(["travelmate", "serve", "--bind", "0.0.0.0:9000"]).unwrap();
        assert_eq!(
            cli.command,
            Command::Serve {
                bind: Some("0.0.0.0:9000".to_string())
            }
        );
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["travelmate", "chat", "-q", "-vv", "--no-config"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(cli.no_config);
        assert_eq!(
            cli.command,
            Command::Chat {
                relay_url: None,
                quiet: true,
                no_greeting: false,
            }
        );
    }

    #[test]
    fn ask_requires_question() {
        assert!(Cli::try_parse_from(["travelmate", "ask"]).is_err());
        let cli = Cli::try_parse_from(["travelmate", "ask", "Plan a 3-day trip to Goa"]).unwrap();
        assert!(matches!(cli.command, Command::Ask { ref question, .. } if question == "Plan a 3-day trip to Goa"));
    }

    #[test]
    fn subcommand_is_required() {
        assert!(Cli::try_parse_from(["travelmate"]).is_err());
    }
}
