use std::collections::{BTreeMap, VecDeque};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::order::OrderNumber;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuditCategory {
    Order,
    Menu,
    Admin,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuditOutcome {
    Success,
    Rejected,
    Failed,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEvent {
    pub event_id: String,
    pub order_number: Option<OrderNumber>,
    pub event_type: String,
    pub category: AuditCategory,
    pub actor: String,
    pub outcome: AuditOutcome,
    pub metadata: BTreeMap<String, String>,
    pub occurred_at: DateTime<Utc>,
}

impl AuditEvent {
    pub fn new(
        event_type: impl Into<String>,
        category: AuditCategory,
        actor: impl Into<String>,
        outcome: AuditOutcome,
    ) -> Self {
        Self {
            event_id: Uuid::new_v4().to_string(),
            order_number: None,
            event_type: event_type.into(),
            category,
            actor: actor.into(),
            outcome,
            metadata: BTreeMap::new(),
            occurred_at: Utc::now(),
        }
    }

    pub fn with_order(mut self, number: OrderNumber) -> Self {
        self.order_number = Some(number);
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

pub trait AuditSink: Send + Sync {
    fn emit(&self, event: AuditEvent);
}

/// Events kept by [`InMemoryAuditSink::default`] before the oldest are dropped.
pub const DEFAULT_AUDIT_CAPACITY: usize = 1_000;

/// Bounded in-memory trail; once full, each new event evicts the oldest one.
#[derive(Clone)]
pub struct InMemoryAuditSink {
    events: Arc<Mutex<VecDeque<AuditEvent>>>,
    capacity: usize,
}

impl Default for InMemoryAuditSink {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_AUDIT_CAPACITY)
    }
}

impl InMemoryAuditSink {
    pub fn with_capacity(capacity: usize) -> Self {
        Self { events: Arc::new(Mutex::new(VecDeque::new())), capacity: capacity.max(1) }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Retained events, oldest first.
    pub fn events(&self) -> Vec<AuditEvent> {
        match self.events.lock() {
            Ok(events) => events.iter().cloned().collect(),
            Err(poisoned) => poisoned.into_inner().iter().cloned().collect(),
        }
    }
}

impl AuditSink for InMemoryAuditSink {
    fn emit(&self, event: AuditEvent) {
        let mut events = match self.events.lock() {
            Ok(events) => events,
            Err(poisoned) => poisoned.into_inner(),
        };
        if events.len() >= self.capacity {
            events.pop_front();
        }
        events.push_back(event);
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        audit::{AuditCategory, AuditEvent, AuditOutcome, AuditSink, InMemoryAuditSink},
        domain::order::OrderNumber,
    };

    #[test]
    fn in_memory_sink_records_events_with_metadata() {
        let sink = InMemoryAuditSink::default();
        sink.emit(
            AuditEvent::new("order.billed", AuditCategory::Order, "cashier", AuditOutcome::Success)
                .with_order(OrderNumber(3))
                .with_metadata("grand_total", "105.00"),
        );

        let events = sink.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].order_number, Some(OrderNumber(3)));
        assert_eq!(events[0].metadata.get("grand_total").map(String::as_str), Some("105.00"));
        assert!(!events[0].event_id.is_empty());
    }

    #[test]
    fn clones_share_the_same_event_buffer() {
        let sink = InMemoryAuditSink::default();
        let handle = sink.clone();

        handle.emit(AuditEvent::new(
            "admin.login_rejected",
            AuditCategory::Admin,
            "admin",
            AuditOutcome::Rejected,
        ));

        assert_eq!(sink.events().len(), 1);
    }

    #[test]
    fn full_sink_evicts_oldest_events() {
        let sink = InMemoryAuditSink::with_capacity(2);

        for kind in ["admin.login_rejected", "order.billed", "menu.item_added"] {
            sink.emit(AuditEvent::new(kind, AuditCategory::Admin, "admin", AuditOutcome::Success));
        }

        let kinds = sink.events().into_iter().map(|event| event.event_type).collect::<Vec<_>>();
        assert_eq!(kinds, vec!["order.billed", "menu.item_added"]);
        assert_eq!(InMemoryAuditSink::default().capacity(), super::DEFAULT_AUDIT_CAPACITY);
    }
}
