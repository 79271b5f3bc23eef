use std::io::{BufRead, Write};

use canteen_core::audit::AuditSink;
use canteen_core::billing::Receipt;
use canteen_core::domain::menu::ItemCode;
use canteen_core::domain::order::OrderDraft;
use canteen_core::session::Session;
use tracing::info;

use crate::console::prompt::Prompter;
use crate::console::render::render_receipt;
use crate::console::ConsoleError;

/// Collects a customer's lines and bills them. Returns `None` when nothing valid was
/// entered or the bill could not be computed.
///
/// An unknown code or a bad quantity re-prompts the same slot; only a valid line
/// advances the `collected` count.
pub fn place_order<R, W, S>(
    prompter: &mut Prompter<R, W>,
    session: &mut Session<S>,
) -> Result<Option<Receipt>, ConsoleError>
where
    R: BufRead,
    W: Write,
    S: AuditSink,
{
    let customer_name = prompter.read_line("\nEnter Customer Name: ")?;
    let declared = prompter.read_integer("Enter number of *different* items: ")?;
    let slots = usize::try_from(declared).unwrap_or(0);

    let mut draft = OrderDraft::new(customer_name);
    let mut collected = 0;
    while collected < slots {
        prompter.say(format!("\n--- Item {} ---", collected + 1))?;
        let code = ItemCode(prompter.read_integer("  Enter Item Code: ")?);
        if !session.menu().contains(code) {
            prompter.say(format!("  [!] Item code {code} does not exist. Try again."))?;
            continue;
        }

        let quantity = prompter.read_integer("  Enter Quantity: ")?;
        match draft.add_line(code, quantity, session.menu()) {
            Ok(_) => collected += 1,
            Err(error) => prompter.say(error.user_message())?,
        }
    }

    if draft.is_empty() {
        info!(event_name = "canteen.order.cancelled", declared, "order cancelled with no lines");
        prompter.say("\nOrder cancelled as no valid items were added.")?;
        return Ok(None);
    }

    match session.generate_bill(draft) {
        Ok(receipt) => {
            prompter.say(render_receipt(&receipt))?;
            Ok(Some(receipt))
        }
        Err(error) => {
            prompter.say(error.user_message())?;
            Ok(None)
        }
    }
}
