use chrono::Utc;
use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::admin::{AdminCredential, AdminGate};
use crate::audit::{AuditCategory, AuditEvent, AuditOutcome, AuditSink, InMemoryAuditSink};
use crate::billing::{BillingEngine, Receipt, StandardBillingEngine};
use crate::domain::menu::{ItemCode, MenuItem};
use crate::domain::order::{Order, OrderDraft};
use crate::errors::DomainError;
use crate::history::{HistoryReport, OrderHistory};
use crate::menu::MenuStore;

const CASHIER_ACTOR: &str = "cashier";
const ADMIN_ACTOR: &str = "admin";

/// All state for one console run. Nothing outlives the process.
pub struct Session<S = InMemoryAuditSink> {
    menu: MenuStore,
    history: OrderHistory,
    credential: AdminCredential,
    admin: AdminGate,
    billing: Box<dyn BillingEngine>,
    audit: S,
}

impl Session<InMemoryAuditSink> {
    pub fn new(menu: MenuStore, credential: AdminCredential) -> Self {
        Self {
            menu,
            history: OrderHistory::default(),
            credential,
            admin: AdminGate::default(),
            billing: Box::new(StandardBillingEngine),
            audit: InMemoryAuditSink::default(),
        }
    }
}

impl<S> Session<S>
where
    S: AuditSink,
{
    pub fn with_audit_sink<T: AuditSink>(self, audit: T) -> Session<T> {
        Session {
            menu: self.menu,
            history: self.history,
            credential: self.credential,
            admin: self.admin,
            billing: self.billing,
            audit,
        }
    }

    pub fn with_billing_engine(mut self, billing: impl BillingEngine + 'static) -> Self {
        self.billing = Box::new(billing);
        self
    }

    pub fn menu(&self) -> &MenuStore {
        &self.menu
    }

    pub fn history(&self) -> &OrderHistory {
        &self.history
    }

    pub fn audit(&self) -> &S {
        &self.audit
    }

    pub fn history_report(&self) -> HistoryReport {
        self.history.summarize(&self.menu)
    }

    /// Bills the draft against the current menu and records the finalized order.
    ///
    /// An order whose amounts overflow is refused as a whole and leaves the
    /// history untouched.
    pub fn generate_bill(&mut self, draft: OrderDraft) -> Result<Receipt, DomainError> {
        match self.bill_and_record(draft) {
            Ok(receipt) => Ok(receipt),
            Err(error) => {
                warn!(
                    event_name = "canteen.order.billing_failed",
                    error_class = error.error_class(),
                    "order could not be billed"
                );
                let event = AuditEvent::new(
                    "order.billing_failed",
                    AuditCategory::Order,
                    CASHIER_ACTOR,
                    AuditOutcome::Failed,
                );
                self.audit.emit(event.with_metadata("error_class", error.error_class()));
                Err(error)
            }
        }
    }

    fn bill_and_record(&mut self, draft: OrderDraft) -> Result<Receipt, DomainError> {
        let bill = self.billing.bill(&draft, &self.menu)?;
        for code in bill.skipped_codes() {
            warn!(
                event_name = "canteen.order.line_skipped",
                item_code = code.0,
                "order line references an item missing from the menu"
            );
        }

        let number = self.history.next_number();
        let order = Order::finalize(draft, number, bill.grand_total, Utc::now());
        let recorded = self.history.record(order)?.clone();

        info!(
            event_name = "canteen.order.billed",
            order_number = number.0,
            lines = recorded.lines.len(),
            subtotal = %bill.subtotal,
            tax_total = %bill.tax_total,
            grand_total = %bill.grand_total,
            "order billed and recorded"
        );
        let event = AuditEvent::new(
            "order.billed",
            AuditCategory::Order,
            CASHIER_ACTOR,
            AuditOutcome::Success,
        );
        self.audit.emit(
            event.with_order(number).with_metadata("grand_total", bill.grand_total.to_string()),
        );

        Ok(Receipt { order: recorded, bill })
    }

    pub fn is_admin(&self) -> bool {
        self.admin.is_logged_in()
    }

    pub fn admin_login(&mut self, attempt: &str) -> Result<(), DomainError> {
        let result = self.admin.login(&self.credential, attempt);
        let (event_type, outcome) = match &result {
            Ok(()) => {
                info!(event_name = "canteen.admin.login_accepted", "admin logged in");
                ("admin.login_accepted", AuditOutcome::Success)
            }
            Err(_) => {
                warn!(event_name = "canteen.admin.login_rejected", "admin password rejected");
                ("admin.login_rejected", AuditOutcome::Rejected)
            }
        };
        self.audit.emit(AuditEvent::new(event_type, AuditCategory::Admin, ADMIN_ACTOR, outcome));
        result
    }

    pub fn admin_logout(&mut self) {
        self.admin.logout();
        info!(event_name = "canteen.admin.logout", "admin returned to main menu");
    }

    pub fn add_menu_item(&mut self, code: ItemCode, item: MenuItem) -> Result<(), DomainError> {
        self.require_admin()?;
        let name = item.name.clone();
        let price = item.price;
        let result = self.menu.insert(code, item);
        self.audit_menu_change("menu.item_added", code, &result);
        if result.is_ok() {
            info!(
                event_name = "canteen.menu.item_added",
                item_code = code.0,
                name = %name,
                price = %price,
                "menu item added"
            );
        }
        result
    }

    pub fn remove_menu_item(&mut self, code: ItemCode) -> Result<MenuItem, DomainError> {
        self.require_admin()?;
        let result = self.menu.remove(code);
        self.audit_menu_change("menu.item_removed", code, &result);
        if let Ok(item) = &result {
            info!(
                event_name = "canteen.menu.item_removed",
                item_code = code.0,
                name = %item.name,
                "menu item removed"
            );
        }
        result
    }

    /// Returns the previous price.
    pub fn update_item_price(
        &mut self,
        code: ItemCode,
        price: Decimal,
    ) -> Result<Decimal, DomainError> {
        self.require_admin()?;
        let result = self.menu.update_price(code, price);
        self.audit_menu_change("menu.price_updated", code, &result);
        if let Ok(previous) = &result {
            info!(
                event_name = "canteen.menu.price_updated",
                item_code = code.0,
                previous_price = %previous,
                price = %price,
                "menu price updated"
            );
        }
        result
    }

    fn require_admin(&self) -> Result<(), DomainError> {
        if self.admin.is_logged_in() {
            Ok(())
        } else {
            Err(DomainError::AccessDenied)
        }
    }

    fn audit_menu_change<T>(
        &self,
        event_type: &str,
        code: ItemCode,
        result: &Result<T, DomainError>,
    ) {
        let outcome = if result.is_ok() { AuditOutcome::Success } else { AuditOutcome::Rejected };
        let mut event = AuditEvent::new(event_type, AuditCategory::Menu, ADMIN_ACTOR, outcome);
        if let Err(error) = result {
            warn!(
                event_name = "canteen.menu.change_rejected",
                item_code = code.0,
                error_class = error.error_class(),
                "menu change rejected"
            );
            event = event.with_metadata("error_class", error.error_class());
        }
        self.audit.emit(event.with_metadata("item_code", code.to_string()));
    }
}
