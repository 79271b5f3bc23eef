use std::fmt::Write;

use canteen_core::billing::{round_currency, BillLine, Receipt, CURRENCY_SCALE};
use canteen_core::history::HistoryReport;
use canteen_core::menu::MenuStore;
use rust_decimal::Decimal;

const RULE: &str = "----------------------------------------";
const DOUBLE_RULE: &str = "========================================";

/// `Rs. 105.00`
pub fn money(amount: Decimal) -> String {
    let mut rounded = round_currency(amount);
    rounded.rescale(CURRENCY_SCALE);
    format!("Rs. {rounded}")
}

pub fn render_menu(menu: &MenuStore) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\n=========== CANTEEN MENU ===========");
    let _ = writeln!(out, "{:<10}{:<20}{:<10}", "Code", "Item", "Price");
    let _ = writeln!(out, "------------------------------------");
    for (code, item) in menu.list() {
        let _ = writeln!(out, "{:<10}{:<20}{}", code.to_string(), item.name, money(item.price));
    }
    out.push_str("------------------------------------");
    out
}

pub fn render_receipt(receipt: &Receipt) -> String {
    let bill = &receipt.bill;
    let mut out = String::new();
    let _ = writeln!(out, "\n============= BILL RECEIPT =============");
    let _ = writeln!(out, "Order #{}", receipt.order.number);
    let _ = writeln!(out, "Customer Name: {}", receipt.order.customer_name);
    let _ = writeln!(out, "Date: {}", receipt.order.placed_at.format("%Y-%m-%d %H:%M UTC"));
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "{:<20}{:<10}{:<10}", "Item", "Qty", "Amount");
    let _ = writeln!(out, "{RULE}");
    for line in &bill.lines {
        match line {
            BillLine::Charged { name, quantity, amount, .. } => {
                let _ = writeln!(out, "{:<20}{:<10}{}", name, quantity.to_string(), money(*amount));
            }
            BillLine::Skipped { code, .. } => {
                let _ = writeln!(out, "  [!] Invalid Item Code: {code} (Ignored)");
            }
        }
    }
    let tax_pct = (bill.tax_rate * Decimal::ONE_HUNDRED).normalize();
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "Total Amount: {}", money(bill.subtotal));
    let _ = writeln!(out, "{:<14}{}", format!("GST ({tax_pct}%):"), money(bill.tax_total));
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "Grand Total:  {}", money(bill.grand_total));
    let _ = writeln!(out, "{DOUBLE_RULE}");
    out.push_str("Thank You! Visit Again.\n");
    out
}

pub fn render_history(report: &HistoryReport) -> String {
    let mut out = String::from("\n--- Session Order History ---\n");
    if report.entries.is_empty() {
        out.push_str("  No orders placed in this session yet.");
        return out;
    }

    for entry in &report.entries {
        let _ = writeln!(out, "{RULE}");
        let _ = writeln!(out, "Order #{} | Customer: {}", entry.number, entry.customer_name);
        let _ = writeln!(out, "  Items:");
        for line in &entry.lines {
            let _ = writeln!(out, "    - {:<20} (Qty: {})", line.label, line.quantity);
        }
        let _ = writeln!(out, "  Total Bill: {}", money(entry.total_bill));
    }
    let _ = writeln!(out, "{DOUBLE_RULE}");
    let _ = writeln!(out, "  Total Session Sales: {}", money(report.total_sales));
    out.push_str(DOUBLE_RULE);
    out
}
