//! Orders domain module.
//!
//! The central aggregate: binds a customer, one of their addresses, an
//! employee and line items, and drives the dual-status state machine
//! (delivery + payment) with its cancellation/refund and rating rules.

pub mod order;
pub mod status;

pub use order::{
    Order, OrderId, OrderItem, OrderItemId, orders_for_customer, orders_for_employee,
};
pub use status::{DeliveryStatus, PaymentStatus};
