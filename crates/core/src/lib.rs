pub mod admin;
pub mod audit;
pub mod billing;
pub mod config;
pub mod domain;
pub mod errors;
pub mod history;
pub mod menu;
pub mod session;

pub use admin::{AdminAction, AdminCredential, AdminGate, AdminState};
pub use audit::{AuditCategory, AuditEvent, AuditOutcome, AuditSink, InMemoryAuditSink};
pub use billing::{Bill, BillLine, BillingEngine, Receipt, StandardBillingEngine, TAX_RATE};
pub use domain::menu::{ItemCode, MenuItem};
pub use domain::order::{Order, OrderDraft, OrderLine, OrderNumber};
pub use errors::DomainError;
pub use history::{HistoryEntry, HistoryLine, HistoryReport, OrderHistory, DELETED_ITEM_LABEL};
pub use menu::MenuStore;
pub use session::Session;
