pub mod commands;
pub mod console;
pub mod logging;

use std::path::PathBuf;
use std::process::ExitCode;

use canteen_core::config::{ConfigOverrides, LoadOptions};
use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "canteen",
    about = "Canteen point-of-sale console",
    long_about = "Show the menu, take customer orders, print bills with GST, and manage the menu from a password-gated admin mode. All state lives for one session only.",
    after_help = "Examples:\n  canteen\n  canteen menu --json\n  canteen --config canteen.toml config"
)]
pub struct Cli {
    #[arg(long, global = true, value_name = "PATH", help = "Read configuration from this TOML file")]
    config: Option<PathBuf>,
    #[arg(long, global = true, value_name = "LEVEL", help = "Override logging.level (trace|debug|info|warn|error)")]
    log_level: Option<String>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Start an interactive session (default)")]
    Run,
    #[command(about = "Print the default menu and exit")]
    Menu {
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
    #[command(about = "Inspect effective configuration values with source attribution and redaction")]
    Config,
}

impl Cli {
    fn load_options(&self) -> LoadOptions {
        LoadOptions {
            config_path: self.config.clone(),
            require_file: self.config.is_some(),
            overrides: ConfigOverrides {
                log_level: self.log_level.clone(),
                ..ConfigOverrides::default()
            },
        }
    }
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();
    let options = cli.load_options();

    let result = match cli.command.unwrap_or(Command::Run) {
        Command::Run => commands::run::run(options),
        Command::Menu { json } => commands::menu::run(json),
        Command::Config => {
            commands::CommandResult { exit_code: 0, output: commands::config::run(options) }
        }
    };

    if !result.output.is_empty() {
        println!("{}", result.output);
    }
    ExitCode::from(result.exit_code)
}
