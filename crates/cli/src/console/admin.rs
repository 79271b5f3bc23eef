use std::io::{BufRead, Write};

use canteen_core::admin::AdminAction;
use canteen_core::audit::AuditSink;
use canteen_core::domain::menu::{ItemCode, MenuItem};
use canteen_core::errors::DomainError;
use canteen_core::session::Session;

use crate::console::prompt::Prompter;
use crate::console::render::{money, render_history, render_menu};
use crate::console::ConsoleError;

const ADMIN_MENU: &str = "\n======= ADMIN MENU =======
  1. Add Menu Item
  2. Remove Menu Item
  3. Update Item Price
  4. View Session Order History
  5. View Customer Menu
  6. Return to Main Menu
--------------------------";

/// Password prompt followed by the admin loop. A wrong password returns straight to the caller.
pub fn admin_console<R, W, S>(
    prompter: &mut Prompter<R, W>,
    session: &mut Session<S>,
) -> Result<(), ConsoleError>
where
    R: BufRead,
    W: Write,
    S: AuditSink,
{
    prompter.say("\n--- Admin Login ---")?;
    let attempt = prompter.read_line("Enter Admin Password: ")?;
    if let Err(error) = session.admin_login(&attempt) {
        prompter.say(error.user_message())?;
        return Ok(());
    }

    prompter.say("\nWelcome, Admin!")?;
    let result = admin_loop(prompter, session);
    session.admin_logout();
    result
}

fn admin_loop<R, W, S>(
    prompter: &mut Prompter<R, W>,
    session: &mut Session<S>,
) -> Result<(), ConsoleError>
where
    R: BufRead,
    W: Write,
    S: AuditSink,
{
    loop {
        prompter.say(ADMIN_MENU)?;
        let choice = prompter.read_integer("Enter your choice: ")?;
        match AdminAction::from_choice(choice) {
            Some(AdminAction::AddItem) => add_item(prompter, session)?,
            Some(AdminAction::RemoveItem) => remove_item(prompter, session)?,
            Some(AdminAction::UpdatePrice) => update_price(prompter, session)?,
            Some(AdminAction::ViewHistory) => {
                prompter.say(render_history(&session.history_report()))?
            }
            Some(AdminAction::ViewMenu) => prompter.say(render_menu(session.menu()))?,
            Some(AdminAction::ReturnToMain) => {
                prompter.say("  Returning to Main Menu...")?;
                return Ok(());
            }
            None => prompter.say("  [!] Invalid choice. Try again.")?,
        }
    }
}

fn add_item<R, W, S>(
    prompter: &mut Prompter<R, W>,
    session: &mut Session<S>,
) -> Result<(), ConsoleError>
where
    R: BufRead,
    W: Write,
    S: AuditSink,
{
    prompter.say("\n--- Add New Menu Item ---")?;
    let code = ItemCode(prompter.read_integer("Enter new Item Code: ")?);
    if session.menu().contains(code) {
        return prompter.say(DomainError::DuplicateCode { code }.user_message());
    }

    let name = prompter.read_line("Enter Item Name: ")?;
    let price = prompter.read_price("Enter Item Price: Rs. ")?;
    match session.add_menu_item(code, MenuItem::new(name.clone(), price)) {
        Ok(()) => prompter.say(format!("  [*] Item '{name}' added successfully!")),
        Err(error) => prompter.say(error.user_message()),
    }
}

fn remove_item<R, W, S>(
    prompter: &mut Prompter<R, W>,
    session: &mut Session<S>,
) -> Result<(), ConsoleError>
where
    R: BufRead,
    W: Write,
    S: AuditSink,
{
    prompter.say("\n--- Remove Menu Item ---")?;
    prompter.say(render_menu(session.menu()))?;
    let code = ItemCode(prompter.read_integer("Enter Item Code to remove: ")?);
    match session.remove_menu_item(code) {
        Ok(item) => prompter.say(format!("  [*] Item '{}' removed successfully!", item.name)),
        Err(error) => prompter.say(error.user_message()),
    }
}

fn update_price<R, W, S>(
    prompter: &mut Prompter<R, W>,
    session: &mut Session<S>,
) -> Result<(), ConsoleError>
where
    R: BufRead,
    W: Write,
    S: AuditSink,
{
    prompter.say("\n--- Update Item Price ---")?;
    prompter.say(render_menu(session.menu()))?;
    let code = ItemCode(prompter.read_integer("Enter Item Code to update: ")?);
    let Some(item) = session.menu().lookup(code) else {
        return prompter.say(DomainError::NotFound { code }.user_message());
    };

    let current = format!("  Current Price for '{}' is {}", item.name, money(item.price));
    prompter.say(current)?;
    let price = prompter.read_price("  Enter new Price: Rs. ")?;
    match session.update_item_price(code, price) {
        Ok(_) => prompter.say("  [*] Price updated successfully!"),
        Err(error) => prompter.say(error.user_message()),
    }
}
