//! Order store
//!
//! Orders carry two independent counters. The internal `id` follows the
//! usual watermark (max id + 1) and can therefore be handed out again once
//! the highest orders are deleted. The customer-facing order number comes
//! from `latest_order_number`, which only ever grows and is persisted next
//! to the orders, so an order number is never issued twice.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{EntityStore, Record};
use crate::database::{Persistence, Repository};
use crate::model::{Id, Order, OrderDraft, OrderNumber, OrderStatus, StatusUpdate};

impl Record for Order {
    const COLLECTION: &'static str = "orders";
    const NEWEST_FIRST: bool = true;
    type Draft = (OrderNumber, OrderDraft);
    type Patch = StatusUpdate;

    fn id(&self) -> Id {
        self.id
    }

    fn from_draft(id: Id, (order_number, draft): (OrderNumber, OrderDraft)) -> Self {
        Self {
            id,
            order_number,
            customer: draft.customer,
            date: draft.date,
            total: draft.total,
            status: draft.status,
            items: draft.items,
            contact: draft.contact,
            payment_method: draft.payment_method,
        }
    }

    fn apply(&mut self, patch: StatusUpdate) {
        self.status = patch.status;
    }
}

/// Persisted shape: `{ "orders": [...], "latestOrderNumber": 10003 }`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderState {
    #[serde(flatten)]
    pub orders: EntityStore<Order>,
    pub latest_order_number: u64,
}

pub struct OrderStore {
    state: OrderState,
    persistence: Persistence<OrderState>,
}

impl OrderStore {
    pub fn load(
        repo: impl Repository<OrderState> + 'static,
        key: &'static str,
        seed: impl FnOnce() -> OrderState,
    ) -> Self {
        let persistence = Persistence::new(repo, key);
        let state = persistence.restore().unwrap_or_else(seed);
        Self { state, persistence }
    }

    /// Orders, newest first.
    pub fn all(&self) -> &[Order] {
        self.state.orders.all()
    }

    pub fn get(&self, id: Id) -> Option<&Order> {
        self.state.orders.get(id)
    }

    pub fn len(&self) -> usize {
        self.state.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.orders.is_empty()
    }

    pub fn latest_order_number(&self) -> u64 {
        self.state.latest_order_number
    }

    pub fn set_orders(&mut self, orders: Vec<Order>) {
        self.state.orders.set_all(orders);
        self.persist();
    }

    /// Creates an order, assigning its id and the next order number, and
    /// returns it so the caller can hand the order number to the customer.
    pub fn add_order(&mut self, draft: OrderDraft) -> Order {
        let next = self.state.latest_order_number + 1;
        let order = self.state.orders.add((OrderNumber(next), draft));
        self.state.latest_order_number = next;
        info!(
            id = order.id,
            order_number = %order.order_number,
            total = order.total,
            "Order created"
        );
        self.persist();
        order
    }

    /// Sets the status of order `id`. Any status may follow any other.
    pub fn update_order_status(&mut self, id: Id, status: OrderStatus) -> Option<Order> {
        let order = self.state.orders.update(id, StatusUpdate { status })?;
        debug!(id, order_number = %order.order_number, %status, "Order status updated");
        self.persist();
        Some(order)
    }

    pub fn delete_order(&mut self, id: Id) -> Option<Order> {
        let removed = self.state.orders.remove(id)?;
        debug!(id, order_number = %removed.order_number, "Order deleted");
        self.persist();
        Some(removed)
    }

    pub fn get_order_by_number(&self, order_number: OrderNumber) -> Option<&Order> {
        self.state.orders.find(|o| o.order_number == order_number)
    }

    /// Text of the admin "notify customer" action. Nothing is delivered.
    pub fn notify(&self, id: Id) -> Option<String> {
        let order = self.get(id)?;
        let notice = format!("Notification sent to {} at {}!", order.customer, order.contact);
        info!(id, contact = %order.contact, "Customer notified about order");
        Some(notice)
    }

    pub fn is_persistent(&self) -> bool {
        self.persistence.is_active()
    }

    fn persist(&mut self) {
        self.persistence.save(&self.state);
    }
}
