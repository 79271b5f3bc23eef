pub mod admin;
pub mod order;
pub mod prompt;
pub mod render;

use std::io::{BufRead, Write};

use canteen_core::audit::AuditSink;
use canteen_core::session::Session;
use thiserror::Error;
use tracing::info;

use self::prompt::Prompter;
use self::render::render_menu;

#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error("console i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("console input closed")]
    EndOfInput,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MainAction {
    ShowMenu,
    PlaceOrder,
    AdminMode,
    Exit,
}

impl MainAction {
    pub fn from_choice(choice: i64) -> Option<Self> {
        match choice {
            1 => Some(Self::ShowMenu),
            2 => Some(Self::PlaceOrder),
            3 => Some(Self::AdminMode),
            4 => Some(Self::Exit),
            _ => None,
        }
    }
}

const MAIN_MENU: &str = "\n========= MAIN MENU =========
  1. Show Menu
  2. Place Order
  3. Admin Mode
  4. Exit
---------------------------";

/// Top-level dispatch until the user exits or input closes.
pub fn run_console<R, W, S>(
    prompter: &mut Prompter<R, W>,
    session: &mut Session<S>,
) -> Result<(), ConsoleError>
where
    R: BufRead,
    W: Write,
    S: AuditSink,
{
    info!(
        event_name = "canteen.session.started",
        menu_items = session.menu().len(),
        "session started"
    );
    prompter.say("\n===== Welcome to Canteen Management System =====")?;

    let result = match main_loop(prompter, session) {
        Err(ConsoleError::EndOfInput) => {
            info!(event_name = "canteen.session.input_closed", "console input closed");
            Ok(())
        }
        other => other,
    };

    info!(
        event_name = "canteen.session.stopped",
        orders = session.history().len(),
        total_sales = %session.history().total_sales(),
        "session ended"
    );
    result
}

fn main_loop<R, W, S>(
    prompter: &mut Prompter<R, W>,
    session: &mut Session<S>,
) -> Result<(), ConsoleError>
where
    R: BufRead,
    W: Write,
    S: AuditSink,
{
    loop {
        prompter.say(MAIN_MENU)?;
        let choice = prompter.read_integer("Enter your choice: ")?;
        match MainAction::from_choice(choice) {
            Some(MainAction::ShowMenu) => prompter.say(render_menu(session.menu()))?,
            Some(MainAction::PlaceOrder) => {
                order::place_order(prompter, session)?;
            }
            Some(MainAction::AdminMode) => admin::admin_console(prompter, session)?,
            Some(MainAction::Exit) => {
                prompter.say("\nThank you for using Canteen Management System!")?;
                return Ok(());
            }
            None => prompter.say("  [!] Invalid choice. Try again.")?,
        }
    }
}
