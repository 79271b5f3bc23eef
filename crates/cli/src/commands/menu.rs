use canteen_core::menu::MenuStore;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::commands::CommandResult;
use crate::console::render::render_menu;

#[derive(Debug, Serialize)]
struct MenuEntry<'a> {
    code: i64,
    name: &'a str,
    price: Decimal,
}

pub fn run(json: bool) -> CommandResult {
    let menu = MenuStore::seeded();
    if !json {
        return CommandResult::output(render_menu(&menu));
    }

    let entries = menu
        .list()
        .map(|(code, item)| MenuEntry { code: code.0, name: &item.name, price: item.price })
        .collect::<Vec<_>>();
    match serde_json::to_string_pretty(&entries) {
        Ok(output) => CommandResult::output(output),
        Err(error) => CommandResult::failure("menu", "serialization", error.to_string(), 1),
    }
}
