use std::io;

use anyhow::Context;
use canteen_core::config::{AppConfig, LoadOptions};
use canteen_core::menu::MenuStore;
use canteen_core::session::Session;

use crate::commands::CommandResult;
use crate::console::prompt::Prompter;
use crate::console::run_console;
use crate::logging::init_logging;

pub fn run(options: LoadOptions) -> CommandResult {
    let config = match AppConfig::load(options) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::failure(
                "run",
                "config_validation",
                format!("configuration issue: {error}"),
                2,
            );
        }
    };
    init_logging(&config);

    match interactive(&config) {
        Ok(()) => CommandResult::output(String::new()),
        Err(error) => CommandResult::failure("run", "console_io", format!("{error:#}"), 1),
    }
}

fn interactive(config: &AppConfig) -> anyhow::Result<()> {
    let mut session = Session::new(MenuStore::seeded(), config.admin_credential());
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut prompter = Prompter::new(stdin.lock(), stdout.lock());

    run_console(&mut prompter, &mut session).context("interactive session failed")
}
